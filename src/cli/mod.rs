//! CLI command implementations

use anyhow::Result;
use clap::{ArgMatches, Command};

pub mod commands;

/// Main CLI application
pub struct CliApp;

impl CliApp {
    /// Create the CLI application
    pub fn app() -> Command {
        Command::new("swagger-scan")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Assemble Swagger 2.0 API documents from REST resource descriptors")
            .subcommand(commands::init::command())
            .subcommand(commands::generate::command())
            .subcommand(commands::validate::command())
            .subcommand(commands::resources::command())
            .subcommand(commands::filters::command())
            .subcommand(commands::info::command())
    }

    /// Run the CLI application
    pub async fn run(matches: &ArgMatches) -> Result<()> {
        match matches.subcommand() {
            Some(("init", sub_matches)) => commands::init::run(sub_matches).await,
            Some(("generate", sub_matches)) => commands::generate::run(sub_matches).await,
            Some(("validate", sub_matches)) => commands::validate::run(sub_matches).await,
            Some(("resources", sub_matches)) => commands::resources::run(sub_matches).await,
            Some(("filters", sub_matches)) => commands::filters::run(sub_matches).await,
            Some(("info", sub_matches)) => commands::info::run(sub_matches).await,
            _ => {
                // No subcommand provided, show help
                let _ = Self::app().print_help();
                Ok(())
            }
        }
    }
}

/// Common CLI utilities
pub mod utils {
    use anyhow::{anyhow, Result};
    use std::path::PathBuf;

    /// Settings file names looked up in the working directory
    pub const DEFAULT_SETTINGS_FILES: [&str; 2] = ["swagger-scan.yaml", "swagger-scan.yml"];

    /// Settings file in the platform config directory
    pub fn user_settings_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("swagger-scan").join("config.yaml"))
    }

    /// Get settings file path from arguments or use default
    pub fn get_config_path(matches: &clap::ArgMatches) -> Result<PathBuf> {
        if let Some(config_path) = matches.get_one::<String>("config") {
            return Ok(PathBuf::from(config_path));
        }

        let candidates = DEFAULT_SETTINGS_FILES
            .iter()
            .map(PathBuf::from)
            .chain(user_settings_path());

        for path in candidates {
            if path.exists() {
                return Ok(path);
            }
        }

        Err(anyhow!("No settings file found. Use --config to specify a file or create one with 'swagger-scan init'"))
    }

    /// Load settings from file
    pub fn load_config(matches: &clap::ArgMatches) -> Result<crate::Settings> {
        let config_path = get_config_path(matches)?;
        tracing::debug!("Loading settings from {:?}", config_path);
        crate::Settings::from_file(&config_path)
    }

    /// Create SwaggerScan instance
    pub fn create_app(settings: crate::Settings) -> Result<crate::SwaggerScan> {
        Ok(crate::SwaggerScan::new(settings)?)
    }

    /// The `--config` argument shared by commands that read settings
    pub fn config_arg() -> clap::Arg {
        clap::Arg::new("config")
            .short('c')
            .long("config")
            .help("Settings file path")
            .value_name("FILE")
    }
}
