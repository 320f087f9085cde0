//! Document rendering

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::info;

use swagger_model::Swagger;

/// Serialization format of the generated document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

impl OutputFormat {
    /// Guess the format from a file extension, `None` when unrecognised
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "json" => Some(OutputFormat::Json),
            "yaml" | "yml" => Some(OutputFormat::Yaml),
            _ => None,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Json => f.write_str("json"),
            OutputFormat::Yaml => f.write_str("yaml"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            other => Err(anyhow::anyhow!("Unsupported output format: {}", other)),
        }
    }
}

/// Render a document. `pretty` only affects JSON; YAML is always indented.
pub fn render(swagger: &Swagger, format: OutputFormat, pretty: bool) -> Result<String> {
    let rendered = match format {
        OutputFormat::Json if pretty => serde_json::to_string_pretty(swagger)?,
        OutputFormat::Json => serde_json::to_string(swagger)?,
        OutputFormat::Yaml => serde_yaml::to_string(swagger)?,
    };
    Ok(rendered)
}

/// Render a document and write it to `path`, creating parent directories
pub async fn write(swagger: &Swagger, path: &Path, format: OutputFormat, pretty: bool) -> Result<()> {
    let rendered = render(swagger, format, pretty)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create output directory {parent:?}"))?;
    }

    tokio::fs::write(path, rendered)
        .await
        .with_context(|| format!("Failed to write document to {path:?}"))?;

    info!("Wrote {} document to {:?}", format, path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn document() -> Swagger {
        Swagger::new()
            .with_host(Some("api.example.com".to_string()))
            .with_base_path(Some("/v1".to_string()))
    }

    #[test]
    fn test_render_json_compact_and_pretty() {
        let compact = render(&document(), OutputFormat::Json, false).unwrap();
        assert!(!compact.contains('\n'));
        assert!(compact.contains("\"basePath\":\"/v1\""));

        let pretty = render(&document(), OutputFormat::Json, true).unwrap();
        assert!(pretty.contains('\n'));
    }

    #[test]
    fn test_render_yaml() {
        let yaml = render(&document(), OutputFormat::Yaml, false).unwrap();
        assert!(yaml.contains("basePath: /v1"));
        let parsed: Swagger = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.host.as_deref(), Some("api.example.com"));
    }

    #[test]
    fn test_format_from_path_and_str() {
        assert_eq!(OutputFormat::from_path(Path::new("a/swagger.yml")), Some(OutputFormat::Yaml));
        assert_eq!(OutputFormat::from_path(Path::new("swagger.json")), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::from_path(Path::new("swagger")), None);
        assert_eq!("YAML".parse::<OutputFormat>().unwrap(), OutputFormat::Yaml);
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[tokio::test]
    async fn test_write_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out").join("swagger.json");

        write(&document(), &path, OutputFormat::Json, true)
            .await
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: Swagger = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed.base_path.as_deref(), Some("/v1"));
    }
}
