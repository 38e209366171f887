use crate::commands::{print_json, Context};
use crate::error::not_found;
use crate::util::{display_or_dash, format_timestamp_date, now_utc, parse_person_id};
use anyhow::Result;
use belcontact_core::dto::PersonDetailDto;
use belcontact_store::repo::{PersonNew, PersonUpdate};
use clap::{Args, Subcommand};
use serde::Serialize;

#[derive(Debug, Subcommand)]
pub enum PersonCommand {
    Add(PersonAddArgs),
    Edit(PersonEditArgs),
    Show(PersonShowArgs),
    Ls(PersonListArgs),
    Rm(PersonRemoveArgs),
}

#[derive(Debug, Args)]
pub struct PersonAddArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long = "mobile")]
    pub mobile_phone: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
}

/// Pass an empty value (`--phone ""`) to blank a field.
#[derive(Debug, Args)]
pub struct PersonEditArgs {
    pub id: String,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long = "mobile")]
    pub mobile_phone: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
}

#[derive(Debug, Args)]
pub struct PersonShowArgs {
    pub id: String,
}

#[derive(Debug, Args)]
pub struct PersonListArgs {}

#[derive(Debug, Args)]
pub struct PersonRemoveArgs {
    pub id: String,
}

#[derive(Debug, Serialize)]
struct PersonListItemDto {
    id: i64,
    name: String,
    phone: String,
    mobile_phone: String,
    email: String,
}

pub fn add_person(ctx: &Context<'_>, args: PersonAddArgs) -> Result<()> {
    let person = ctx.store.persons().create(
        now_utc(),
        PersonNew {
            name: args.name,
            phone: args.phone.unwrap_or_default(),
            mobile_phone: args.mobile_phone.unwrap_or_default(),
            email: args.email.unwrap_or_default(),
        },
    )?;

    if ctx.json {
        print_json(&person)?;
    } else {
        println!("{} {}", person.id, person.name);
    }
    Ok(())
}

pub fn edit_person(ctx: &Context<'_>, args: PersonEditArgs) -> Result<()> {
    let id = parse_person_id(&args.id)?;
    let person = ctx.store.persons().update(
        now_utc(),
        id,
        PersonUpdate {
            name: args.name,
            phone: args.phone,
            mobile_phone: args.mobile_phone,
            email: args.email,
        },
    )?;

    if ctx.json {
        print_json(&person)?;
    } else {
        println!("updated {} {}", person.id, person.name);
    }
    Ok(())
}

pub fn show_person(ctx: &Context<'_>, args: PersonShowArgs) -> Result<()> {
    let id = parse_person_id(&args.id)?;
    let person = ctx
        .store
        .persons()
        .get(id)?
        .ok_or_else(|| not_found("person not found"))?;
    let methods = ctx.store.contact_methods().list_for_person(person.id)?;
    let detail = PersonDetailDto::new(&person, &methods);

    if ctx.json {
        print_json(&detail)?;
        return Ok(());
    }

    println!("{} {}", detail.id, detail.name);
    println!("phone: {}", display_or_dash(&detail.phone));
    println!("mobile: {}", display_or_dash(&detail.mobile_phone));
    println!("email: {}", display_or_dash(&detail.email));
    println!("updated: {}", format_timestamp_date(detail.updated_at));
    if detail.contact_methods.is_empty() {
        println!("contact methods: none");
    } else {
        println!("contact methods:");
        for method in &detail.contact_methods {
            println!("  {} {} {}", method.id, method.kind, method.detail);
        }
    }
    Ok(())
}

pub fn list_persons(ctx: &Context<'_>, _args: PersonListArgs) -> Result<()> {
    let persons = ctx.store.persons().list()?;
    let items: Vec<PersonListItemDto> = persons
        .into_iter()
        .map(|person| PersonListItemDto {
            id: person.id.get(),
            name: person.name,
            phone: person.phone,
            mobile_phone: person.mobile_phone,
            email: person.email,
        })
        .collect();

    if ctx.json {
        print_json(&items)?;
        return Ok(());
    }

    if items.is_empty() {
        println!("no persons");
        return Ok(());
    }

    for item in items {
        println!(
            "{} {} phone={} mobile={} email={}",
            item.id,
            item.name,
            display_or_dash(&item.phone),
            display_or_dash(&item.mobile_phone),
            display_or_dash(&item.email)
        );
    }
    Ok(())
}

pub fn remove_person(ctx: &Context<'_>, args: PersonRemoveArgs) -> Result<()> {
    let id = parse_person_id(&args.id)?;
    ctx.store.persons().delete(id)?;
    if ctx.json {
        print_json(&serde_json::json!({ "id": id }))?;
    } else {
        println!("deleted {}", id);
    }
    Ok(())
}
