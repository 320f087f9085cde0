//! Generate command implementation

use crate::cli::utils;
use crate::output::{self, OutputFormat};
use anyhow::Result;
use clap::{ArgMatches, Command};
use std::path::PathBuf;
use tracing::{info, warn};

pub fn command() -> Command {
    Command::new("generate")
        .about("Generate a Swagger document from the registered resources")
        .arg(utils::config_arg())
        .arg(
            clap::Arg::new("output")
                .short('o')
                .long("output")
                .help("Document file path (overrides settings)")
                .value_name("FILE"),
        )
        .arg(
            clap::Arg::new("format")
                .short('f')
                .long("format")
                .help("Document format")
                .value_parser(["json", "yaml"]),
        )
        .arg(
            clap::Arg::new("dry-run")
                .long("dry-run")
                .help("Print the document instead of writing it")
                .action(clap::ArgAction::SetTrue),
        )
}

pub async fn run(matches: &ArgMatches) -> Result<()> {
    let settings = utils::load_config(matches)?;

    let output_path = matches
        .get_one::<String>("output")
        .map(PathBuf::from)
        .unwrap_or_else(|| settings.output.path.clone());

    let format = match matches.get_one::<String>("format") {
        Some(format) => format.parse::<OutputFormat>()?,
        None if matches.contains_id("output") => {
            OutputFormat::from_path(&output_path).unwrap_or(settings.output.format)
        }
        None => settings.output.format,
    };

    let dry_run = matches.get_flag("dry-run");

    let mut app = utils::create_app(settings)?;
    if let Err(e) = app.check_filter() {
        warn!("{}; generating without it", e);
    }

    info!("Generating Swagger document");
    let document = app.generate();

    if dry_run {
        println!(
            "{}",
            output::render(&document.swagger, format, document.pretty_print)?
        );
        return Ok(());
    }

    output::write(&document.swagger, &output_path, format, document.pretty_print).await?;

    let stats = &document.statistics;
    println!("Generation completed!");
    println!("Resources scanned: {}", stats.resources_scanned);
    println!("Paths: {}", stats.paths);
    println!("Operations: {}", stats.operations);
    if let Some(filter) = &stats.filter {
        println!(
            "Filter: {} ({} operations removed)",
            filter, stats.operations_filtered
        );
    }
    println!("Output: {:?} ({})", output_path, format);
    println!("Processing time: {}ms", stats.processing_time_ms);

    Ok(())
}
