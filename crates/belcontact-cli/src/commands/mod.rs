use anyhow::Result;
use belcontact_store::Store;
use serde::Serialize;
use std::io::{self, Write};

pub mod check;
pub mod methods;
pub mod persons;

pub struct Context<'a> {
    pub store: &'a Store,
    pub json: bool,
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
