use anyhow::Result;
use custlink_config::AppConfig;
use custlink_core::Catalog;
use serde::Serialize;
use std::io::{self, Write};

pub mod completions;
pub mod list;
pub mod search;
pub mod show;
pub mod summary;

pub struct Context<'a> {
    pub catalog: &'a Catalog,
    pub json: bool,
    pub config: &'a AppConfig,
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
