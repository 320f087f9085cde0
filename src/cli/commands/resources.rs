//! Resources command implementation

use crate::cli::utils;
use crate::resource::ApiMarker;
use anyhow::Result;
use clap::{ArgMatches, Command};

pub fn command() -> Command {
    Command::new("resources")
        .about("List the resources a scan would pick up")
        .arg(utils::config_arg())
        .arg(
            clap::Arg::new("all")
                .short('a')
                .long("all")
                .help("List every registered resource, ignoring package settings")
                .action(clap::ArgAction::SetTrue),
        )
}

pub async fn run(matches: &ArgMatches) -> Result<()> {
    let settings = utils::load_config(matches)?;
    let app = utils::create_app(settings)?;

    let resources = if matches.get_flag("all") {
        app.registry().all().to_vec()
    } else {
        app.resources()
    };

    if resources.is_empty() {
        println!("No resources found.");
        return Ok(());
    }

    println!("Resources ({}):", resources.len());
    for resource in &resources {
        let markers: Vec<&str> = resource
            .markers
            .iter()
            .map(|marker| match marker {
                ApiMarker::Api => "api",
                ApiMarker::Path => "path",
                ApiMarker::SwaggerDefinition => "definition",
            })
            .collect();

        println!(
            "  - {} [{}] {} endpoint(s){}",
            resource.name,
            markers.join(", "),
            resource.endpoints.len(),
            resource
                .path
                .as_deref()
                .map(|path| format!(" at {path}"))
                .unwrap_or_default()
        );
    }

    Ok(())
}
