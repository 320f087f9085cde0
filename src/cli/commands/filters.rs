//! Filters command implementation

use crate::FilterRegistry;
use anyhow::Result;
use clap::{ArgMatches, Command};

pub fn command() -> Command {
    Command::new("filters").about("List the registered document filters")
}

pub async fn run(_matches: &ArgMatches) -> Result<()> {
    let registry = FilterRegistry::with_builtins();

    println!("Available filters:");
    for (name, description) in registry.describe() {
        println!("  {:<16} {}", name, description);
    }

    Ok(())
}
