use crate::error::invalid_input;
use anyhow::Result;
use belcontact_core::domain::{ContactMethodId, ContactMethodKind, PersonId};
use chrono::{TimeZone, Utc};
use std::str::FromStr;

pub fn now_utc() -> i64 {
    Utc::now().timestamp()
}

pub fn format_timestamp_date(ts: i64) -> String {
    match Utc.timestamp_opt(ts, 0).single() {
        Some(dt) => dt.format("%Y-%m-%d").to_string(),
        None => ts.to_string(),
    }
}

pub fn parse_person_id(raw: &str) -> Result<PersonId> {
    parse_id(raw, "person id")
}

pub fn parse_contact_method_id(raw: &str) -> Result<ContactMethodId> {
    parse_id(raw, "contact method id")
}

/// Accepts `phone`, `mobile_phone` (or `mobile`), `email`, or any other label.
pub fn parse_contact_method_kind(raw: &str) -> Result<ContactMethodKind> {
    ContactMethodKind::from_str(raw).map_err(|err| invalid_input(err.to_string()))
}

/// Renders blank mirrored fields as `-` in text output.
pub fn display_or_dash(value: &str) -> &str {
    if value.trim().is_empty() {
        "-"
    } else {
        value
    }
}

fn parse_id<T: FromStr>(raw: &str, what: &str) -> Result<T> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(invalid_input(format!("{what} cannot be empty")));
    }
    T::from_str(trimmed).map_err(|_| invalid_input(format!("invalid {what}: {trimmed}")))
}

#[cfg(test)]
mod tests {
    use super::{
        display_or_dash, format_timestamp_date, parse_contact_method_kind, parse_person_id,
    };
    use belcontact_core::domain::{ContactMethodKind, PersonId};

    #[test]
    fn parses_ids_with_whitespace() {
        assert_eq!(parse_person_id(" 12 ").expect("id"), PersonId::new(12));
        assert!(parse_person_id("").is_err());
        assert!(parse_person_id("abc").is_err());
    }

    #[test]
    fn parses_kinds_and_labels() {
        assert_eq!(
            parse_contact_method_kind("mobile").expect("kind"),
            ContactMethodKind::MobilePhone
        );
        assert_eq!(
            parse_contact_method_kind("Fax").expect("kind"),
            ContactMethodKind::other("Fax").expect("label")
        );
        assert!(parse_contact_method_kind("  ").is_err());
    }

    #[test]
    fn formats_dates_and_blanks() {
        assert_eq!(format_timestamp_date(0), "1970-01-01");
        assert_eq!(display_or_dash(""), "-");
        assert_eq!(display_or_dash("02 345 67 89"), "02 345 67 89");
    }
}
