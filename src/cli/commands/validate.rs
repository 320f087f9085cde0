//! Validate command implementation

use crate::cli::utils;
use crate::scanner::PackageFilter;
use anyhow::Result;
use clap::{ArgMatches, Command};
use tracing::info;

pub fn command() -> Command {
    Command::new("validate")
        .about("Validate settings and resource manifests")
        .arg(utils::config_arg())
}

pub async fn run(matches: &ArgMatches) -> Result<()> {
    info!("Validating settings file");

    let settings = utils::load_config(matches)?;
    let app = utils::create_app(settings)?;
    app.check_filter()?;

    let settings = app.settings();
    let packages = PackageFilter::parse(settings.api.resource_package.as_deref());

    println!("Settings file is valid!");
    println!("Version: {}", settings.version);
    println!("Registered resources: {}", app.registry().len());
    println!("Resources to scan: {}", app.resources().len());
    if packages.allows_all() {
        println!("Packages: all");
    } else {
        println!("Packages: {}", packages.prefixes().join(", "));
    }
    println!(
        "Filter: {}",
        settings.api.filter.as_deref().unwrap_or("none")
    );
    println!(
        "Output: {:?} ({})",
        settings.output.path, settings.output.format
    );

    Ok(())
}
