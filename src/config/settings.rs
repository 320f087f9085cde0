//! Settings file structure and implementation

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};

use swagger_model::Scheme;

use crate::output::OutputFormat;

/// Settings file version understood by this build
pub const SETTINGS_VERSION: &str = "1.0";

/// Main settings structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Settings version
    pub version: String,

    /// API description settings applied to the bean
    #[serde(default)]
    pub api: ApiSettings,

    /// Where resource manifests are discovered
    #[serde(default)]
    pub resources: ResourceSettings,

    /// Output configuration
    #[serde(default)]
    pub output: OutputSettings,
}

impl Settings {
    /// Load settings from a YAML file. Relative resource directories are
    /// resolved against the file's directory.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {path:?}"))?;
        let mut settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse settings file {path:?}"))?;
        settings.validate()?;

        if let Some(base) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            settings.resources.resolve_relative_to(base);
        }
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.version != SETTINGS_VERSION {
            return Err(anyhow!("Unsupported settings version: {}", self.version));
        }

        self.api.validate()?;
        self.output.validate()?;

        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: SETTINGS_VERSION.to_string(),
            api: ApiSettings::default(),
            resources: ResourceSettings::default(),
            output: OutputSettings::default(),
        }
    }
}

/// API description settings, one entry per bean property
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    /// Comma-separated package prefixes to scan
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_package: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub schemes: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub terms_of_service_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_path: Option<String>,

    /// Filter registry name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,

    /// Accepts a boolean or a string such as "true"
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "string_or_bool"
    )]
    pub pretty_print: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub scan_all_resources: Option<bool>,

    /// Comma-separated route prefixes to leave out
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignored_routes: Option<String>,
}

impl ApiSettings {
    pub fn validate(&self) -> Result<()> {
        for scheme in self.schemes.iter().flatten() {
            if Scheme::for_value(scheme).is_none() {
                return Err(anyhow!("Unknown scheme in settings: {}", scheme));
            }
        }
        Ok(())
    }
}

fn string_or_bool<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    Ok(Option::<Flag>::deserialize(deserializer)?.map(|flag| match flag {
        Flag::Bool(value) => value.to_string(),
        Flag::Text(value) => value,
    }))
}

/// Resource manifest discovery settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceSettings {
    /// Directories scanned for `*.resources.yaml` manifests
    pub directories: Vec<PathBuf>,
}

impl ResourceSettings {
    /// Anchor relative directories at `base`, the settings file's directory
    pub fn resolve_relative_to(&mut self, base: &Path) {
        for dir in &mut self.directories {
            if dir.is_relative() {
                *dir = base.join(&*dir);
            }
        }
    }
}

impl Default for ResourceSettings {
    fn default() -> Self {
        Self {
            directories: vec![PathBuf::from("./resources")],
        }
    }
}

/// Output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    /// Document file path
    pub path: PathBuf,

    /// Document format
    #[serde(default)]
    pub format: OutputFormat,
}

impl OutputSettings {
    pub fn validate(&self) -> Result<()> {
        if self.path.as_os_str().is_empty() {
            return Err(anyhow!("Output path cannot be empty"));
        }
        Ok(())
    }
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("swagger.json"),
            format: OutputFormat::Json,
        }
    }
}
