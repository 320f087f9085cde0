//! Info command implementation

use crate::cli::utils;
use anyhow::Result;
use clap::{ArgMatches, Command};

pub fn command() -> Command {
    Command::new("info").about("Show tool information").arg(
        clap::Arg::new("detailed")
            .short('d')
            .long("detailed")
            .help("Show detailed information")
            .action(clap::ArgAction::SetTrue),
    )
}

pub async fn run(matches: &ArgMatches) -> Result<()> {
    let detailed = matches.get_flag("detailed");

    println!("SwaggerScan - Swagger 2.0 document assembler");
    println!("Version: {}", env!("CARGO_PKG_VERSION"));

    if detailed {
        println!("\nDetailed Information:");
        println!("  - Resource discovery from *.resources.yaml manifests");
        println!("  - Package prefix selection and hidden resource handling");
        println!("  - Route templates with regex constraints normalised");
        println!("  - Named document filters");
        println!("  - JSON and YAML output");
        println!("\nSettings lookup order:");
        let mut lookup = vec!["--config <FILE>".to_string()];
        lookup.extend(utils::DEFAULT_SETTINGS_FILES.iter().map(|name| format!("./{name}")));
        lookup.extend(utils::user_settings_path().map(|path| path.display().to_string()));
        for (index, entry) in lookup.iter().enumerate() {
            println!("  {}. {}", index + 1, entry);
        }
    }

    Ok(())
}
