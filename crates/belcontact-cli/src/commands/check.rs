use crate::commands::print_json;
use crate::error::invalid_input;
use anyhow::Result;
use belcontact_config::AppConfig;
use belcontact_core::domain::{BelgianNumberingPlan, BelgianPhoneNumber, PhoneClass};
use belcontact_core::dto::PhoneReportDto;
use clap::{ArgAction, Args};

#[derive(Debug, Args)]
pub struct CheckArgs {
    pub number: String,
    /// Reject characters other than digits, spaces, dots, slashes and a leading `+`
    #[arg(long, action = ArgAction::SetTrue)]
    pub strict: bool,
    /// Do not accept the national `0` prefix in place of `+32`
    #[arg(long, action = ArgAction::SetTrue)]
    pub no_local_prefix: bool,
}

/// Prints the report, then fails with invalid input when the number is
/// Belgian but not valid.
pub fn check_number(config: &AppConfig, json: bool, args: CheckArgs) -> Result<()> {
    let plan = if args.no_local_prefix {
        BelgianNumberingPlan::new(false)
    } else {
        config.policy.plan
    };
    let strict = args.strict || config.policy.strict_characters;
    let number = BelgianPhoneNumber::with_plan(&args.number, plan);
    let report = PhoneReportDto::from_number(&number, strict);

    if json {
        print_json(&report)?;
    } else {
        println!("{}: {}", report.input, report.class.as_str());
        println!("digits: {}", report.digits);
        if report.has_valid_country_prefix {
            println!("local digits: {}", report.local_digits);
        }
        if strict && !report.contains_only_allowed_characters {
            println!("contains characters outside the allowed set");
        }
    }

    if report.valid || report.class == PhoneClass::Foreign {
        Ok(())
    } else {
        Err(invalid_input(format!(
            "{} is not a valid Belgian phone number",
            report.input
        )))
    }
}
