mod commands;
mod error;
mod util;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

use crate::commands::{check, methods, persons, Context};
use crate::error::{exit_code_for, report_error};
use belcontact_config as config;
use belcontact_store::{paths, Store};

#[derive(Debug, Parser)]
#[command(name = "belcontact", version, about = "belcontact CLI")]
struct Cli {
    #[arg(long, global = true)]
    db_path: Option<PathBuf>,
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true)]
    json: bool,
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(subcommand)]
    Person(persons::PersonCommand),
    #[command(subcommand)]
    Method(methods::MethodCommand),
    /// Classify a phone number against the Belgian numbering plan
    Check(check::CheckArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    init_logging(verbose);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err, verbose);
            exit_code_for(&err)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        db_path,
        config: config_path,
        json,
        verbose,
        command,
    } = cli;

    let app_config = config::load(config_path.clone()).with_context(|| "load config")?;
    if verbose {
        match config::resolve_config_path(config_path) {
            Ok(path) => {
                if path.exists() {
                    debug!(path = %path.display(), "config resolved");
                } else {
                    debug!(path = %path.display(), "config missing, using defaults");
                }
            }
            Err(err) => {
                debug!(error = %err, "config unavailable");
            }
        }
    }

    match command {
        Command::Check(args) => check::check_number(&app_config, json, args),
        command => {
            let db_path =
                paths::resolve_db_path(db_path).with_context(|| "resolve database path")?;
            if verbose {
                debug!(path = %db_path.display(), "database path resolved");
            }

            let store = Store::open(&db_path)
                .with_context(|| format!("open database {}", db_path.display()))?
                .with_policy(app_config.validation_policy());
            store.migrate().with_context(|| "run migrations")?;

            let ctx = Context {
                store: &store,
                json,
            };

            match command {
                Command::Person(cmd) => match cmd {
                    persons::PersonCommand::Add(args) => persons::add_person(&ctx, args),
                    persons::PersonCommand::Edit(args) => persons::edit_person(&ctx, args),
                    persons::PersonCommand::Show(args) => persons::show_person(&ctx, args),
                    persons::PersonCommand::Ls(args) => persons::list_persons(&ctx, args),
                    persons::PersonCommand::Rm(args) => persons::remove_person(&ctx, args),
                },
                Command::Method(cmd) => match cmd {
                    methods::MethodCommand::Add(args) => methods::add_method(&ctx, args),
                    methods::MethodCommand::Edit(args) => methods::edit_method(&ctx, args),
                    methods::MethodCommand::Rm(args) => methods::remove_method(&ctx, args),
                    methods::MethodCommand::Ls(args) => methods::list_methods(&ctx, args),
                },
                Command::Check(_) => {
                    unreachable!("check command handled before store initialization")
                }
            }
        }
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .try_init();
}
