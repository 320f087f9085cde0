//! Init command implementation

use crate::resource::{
    ApiDescriptor, EndpointDescriptor, ParameterDescriptor, ResourceDescriptor, ResourceManifest,
};
use crate::Settings;
use anyhow::{Context, Result};
use clap::{ArgMatches, Command};
use std::path::{Path, PathBuf};
use swagger_model::{HttpMethod, ParameterLocation};
use tracing::info;

pub fn command() -> Command {
    Command::new("init")
        .about("Initialize a new settings file")
        .arg(
            clap::Arg::new("output")
                .short('o')
                .long("output")
                .help("Output file path")
                .value_name("FILE")
                .default_value("swagger-scan.yaml"),
        )
        .arg(
            clap::Arg::new("example")
                .short('e')
                .long("example")
                .help("Create example settings and a sample resource manifest")
                .action(clap::ArgAction::SetTrue),
        )
}

pub async fn run(matches: &ArgMatches) -> Result<()> {
    let output_path = matches
        .get_one::<String>("output")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("swagger-scan.yaml"));
    let example = matches.get_flag("example");

    info!("Initializing settings file: {:?}", output_path);

    let settings = if example {
        create_example_settings()
    } else {
        Settings::default()
    };

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create directory {parent:?}"))?;
    }
    settings.save_to_file(&output_path)?;

    info!("Settings file created: {:?}", output_path);

    if example {
        let base = output_path.parent().unwrap_or_else(|| Path::new(""));
        for dir in &settings.resources.directories {
            let manifest_path = base.join(dir).join("example.resources.yaml");
            write_example_manifest(&manifest_path).await?;
            println!("Sample resource manifest written to {:?}", manifest_path);
        }
        println!("Example settings created with a sample users API.");
        println!("Edit the files to describe your own resources.");
    } else {
        println!("Default settings file created.");
        println!("Add resource manifests under ./resources to get started.");
    }

    Ok(())
}

fn create_example_settings() -> Settings {
    let mut settings = Settings::default();

    settings.api.title = Some("Example API".to_string());
    settings.api.version = Some("1.0.0".to_string());
    settings.api.description = Some("Sample API assembled by swagger-scan".to_string());
    settings.api.host = Some("api.example.com".to_string());
    settings.api.base_path = Some("/v1".to_string());
    settings.api.schemes = Some(vec!["https".to_string()]);
    settings.api.resource_package = Some("com.example".to_string());
    settings.api.filter = Some("hide-internal".to_string());
    settings.api.pretty_print = Some("true".to_string());

    settings
}

fn example_manifest() -> ResourceManifest {
    let users = ResourceDescriptor::new("com.example.api", "UserResource")
        .with_api(ApiDescriptor {
            tags: vec!["users".to_string()],
            description: Some("User management".to_string()),
            hidden: false,
        })
        .at_path("/users")
        .endpoint(
            EndpointDescriptor::new(HttpMethod::Get, None)
                .summary("List users")
                .operation_id("listUsers"),
        )
        .endpoint(
            EndpointDescriptor::new(HttpMethod::Get, Some("/{id: [0-9]+}"))
                .summary("Fetch a user")
                .operation_id("getUser")
                .parameter(ParameterDescriptor {
                    name: "id".to_string(),
                    location: ParameterLocation::Path,
                    description: None,
                    required: true,
                    param_type: Some("integer".to_string()),
                }),
        )
        .endpoint(
            EndpointDescriptor::new(HttpMethod::Post, Some("/{id}/reindex"))
                .summary("Rebuild search entries")
                .tag("internal"),
        );

    ResourceManifest {
        resources: vec![users],
    }
}

async fn write_example_manifest(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create directory {parent:?}"))?;
    }
    let content = serde_yaml::to_string(&example_manifest())?;
    tokio::fs::write(path, content)
        .await
        .with_context(|| format!("Failed to write manifest {path:?}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::ResourceRegistry;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_example_manifest_loads_back() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("resources").join("example.resources.yaml");

        write_example_manifest(&path).await.unwrap();

        let mut registry = ResourceRegistry::new();
        assert_eq!(registry.discover(temp_dir.path()).unwrap(), 1);
        let resource = registry.get("com.example.api.UserResource").unwrap();
        assert_eq!(resource.endpoints.len(), 3);
    }

    #[tokio::test]
    async fn test_example_setup_generates_from_nested_settings_file() {
        let temp_dir = TempDir::new().unwrap();
        let settings_path = temp_dir.path().join("conf").join("swagger-scan.yaml");

        let matches = crate::cli::CliApp::app()
            .try_get_matches_from([
                "swagger-scan",
                "init",
                "--example",
                "-o",
                settings_path.to_str().unwrap(),
            ])
            .unwrap();
        let (_, sub_matches) = matches.subcommand().unwrap();
        run(sub_matches).await.unwrap();

        assert!(temp_dir
            .path()
            .join("conf")
            .join("resources")
            .join("example.resources.yaml")
            .exists());

        let settings = Settings::from_file(&settings_path).unwrap();
        let mut app = crate::SwaggerScan::new(settings).unwrap();
        let document = app.generate();

        assert!(document.swagger.path("/users").is_some());
        assert!(document.swagger.path("/users/{id}").is_some());
    }

    #[test]
    fn test_example_settings_are_valid() {
        assert!(create_example_settings().validate().is_ok());
    }
}
