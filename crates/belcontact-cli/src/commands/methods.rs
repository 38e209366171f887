use crate::commands::{print_json, Context};
use crate::error::not_found;
use crate::util::{now_utc, parse_contact_method_id, parse_contact_method_kind, parse_person_id};
use anyhow::Result;
use belcontact_core::domain::ContactMethod;
use belcontact_core::dto::ContactMethodDto;
use belcontact_core::rules::Reconciliation;
use belcontact_store::repo::{ContactMethodNew, ContactMethodUpdate};
use clap::{Args, Subcommand};
use serde::Serialize;
use tracing::{debug, warn};

#[derive(Debug, Subcommand)]
pub enum MethodCommand {
    Add(MethodAddArgs),
    Edit(MethodEditArgs),
    Rm(MethodRemoveArgs),
    Ls(MethodListArgs),
}

#[derive(Debug, Args)]
pub struct MethodAddArgs {
    pub person_id: String,
    /// phone, mobile_phone (or mobile), email, or any other label
    pub kind: String,
    pub detail: String,
}

#[derive(Debug, Args)]
pub struct MethodEditArgs {
    pub id: String,
    #[arg(long)]
    pub kind: Option<String>,
    #[arg(long)]
    pub detail: Option<String>,
}

#[derive(Debug, Args)]
pub struct MethodRemoveArgs {
    pub id: String,
}

#[derive(Debug, Args)]
pub struct MethodListArgs {
    pub person_id: String,
}

#[derive(Debug, Serialize)]
struct MethodWriteDto {
    method: ContactMethodDto,
    mirrored: Vec<String>,
}

#[derive(Debug, Serialize)]
struct MethodRemovalDto {
    method: ContactMethodDto,
    reconciliation: String,
}

pub fn add_method(ctx: &Context<'_>, args: MethodAddArgs) -> Result<()> {
    let person_id = parse_person_id(&args.person_id)?;
    let kind = parse_contact_method_kind(&args.kind)?;
    let written = ctx.store.contact_methods().create(
        now_utc(),
        ContactMethodNew {
            person_id,
            kind,
            detail: args.detail,
        },
    )?;
    report_write(ctx, "added", &written.method, &written.mirror)
}

pub fn edit_method(ctx: &Context<'_>, args: MethodEditArgs) -> Result<()> {
    let id = parse_contact_method_id(&args.id)?;
    let kind = match args.kind {
        Some(raw) => Some(parse_contact_method_kind(&raw)?),
        None => None,
    };
    let written = ctx.store.contact_methods().update(
        now_utc(),
        id,
        ContactMethodUpdate {
            kind,
            detail: args.detail,
        },
    )?;
    report_write(ctx, "updated", &written.method, &written.mirror)
}

pub fn remove_method(ctx: &Context<'_>, args: MethodRemoveArgs) -> Result<()> {
    let id = parse_contact_method_id(&args.id)?;
    let removal = ctx
        .store
        .contact_methods()
        .delete(now_utc(), id)?
        .ok_or_else(|| not_found("contact method not found"))?;
    log_reconciliation(&removal.method, &removal.reconciliation);

    if ctx.json {
        print_json(&MethodRemovalDto {
            method: ContactMethodDto::from(&removal.method),
            reconciliation: describe(&removal.reconciliation),
        })?;
    } else {
        println!("deleted {}", removal.method.id);
        if removal.reconciliation.changed_person() {
            println!("{}", describe(&removal.reconciliation));
        }
    }
    Ok(())
}

pub fn list_methods(ctx: &Context<'_>, args: MethodListArgs) -> Result<()> {
    let person_id = parse_person_id(&args.person_id)?;
    if ctx.store.persons().get(person_id)?.is_none() {
        return Err(not_found("person not found"));
    }
    let items: Vec<ContactMethodDto> = ctx
        .store
        .contact_methods()
        .list_for_person(person_id)?
        .iter()
        .map(ContactMethodDto::from)
        .collect();

    if ctx.json {
        print_json(&items)?;
        return Ok(());
    }

    if items.is_empty() {
        println!("no contact methods");
        return Ok(());
    }

    for item in items {
        println!("{} {} {}", item.id, item.kind, item.detail);
    }
    Ok(())
}

fn report_write(
    ctx: &Context<'_>,
    verb: &str,
    method: &ContactMethod,
    mirror: &[Reconciliation],
) -> Result<()> {
    for outcome in mirror {
        log_reconciliation(method, outcome);
    }

    if ctx.json {
        print_json(&MethodWriteDto {
            method: ContactMethodDto::from(method),
            mirrored: mirror.iter().map(describe).collect(),
        })?;
    } else {
        println!("{} {} {} {}", verb, method.id, method.kind, method.detail);
        for outcome in mirror.iter().filter(|outcome| outcome.changed_person()) {
            println!("{}", describe(outcome));
        }
    }
    Ok(())
}

fn log_reconciliation(method: &ContactMethod, outcome: &Reconciliation) {
    match outcome {
        Reconciliation::Orphaned => {
            warn!(id = %method.id, "contact method has no person; nothing to reconcile");
        }
        Reconciliation::PersonMissing(person_id) => {
            warn!(
                id = %method.id,
                person_id = %person_id,
                "person of contact method not found; nothing to reconcile"
            );
        }
        other => debug!(id = %method.id, outcome = ?other, "person reconciled"),
    }
}

fn describe(outcome: &Reconciliation) -> String {
    match outcome {
        Reconciliation::NotMirrored => "not mirrored".to_string(),
        Reconciliation::Orphaned => "no person".to_string(),
        Reconciliation::PersonMissing(person_id) => format!("person {} missing", person_id),
        Reconciliation::Unchanged => "unchanged".to_string(),
        Reconciliation::Cleared { person_id, field } => {
            format!("person {} {} cleared", person_id, field.as_str())
        }
        Reconciliation::Replaced {
            person_id,
            field,
            value,
        } => format!("person {} {} -> {}", person_id, field.as_str(), value),
    }
}
