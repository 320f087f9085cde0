//! The top-level Swagger document

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::info::{ExternalDocs, Info, Tag};
use crate::operation::Path;

/// Transfer protocol of the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    Http,
    Https,
    Ws,
    Wss,
}

impl Scheme {
    /// Resolve a scheme from its configuration string, `None` when unknown
    pub fn for_value(value: &str) -> Option<Scheme> {
        match value.trim().to_ascii_lowercase().as_str() {
            "http" => Some(Scheme::Http),
            "https" => Some(Scheme::Https),
            "ws" => Some(Scheme::Ws),
            "wss" => Some(Scheme::Wss),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
            Scheme::Ws => "ws",
            Scheme::Wss => "wss",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Scheme::for_value(s).ok_or_else(|| format!("Unknown scheme: {s}"))
    }
}

fn default_swagger_version() -> String {
    "2.0".to_string()
}

/// Swagger 2.0 document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Swagger {
    /// Specification version, always "2.0"
    #[serde(default = "default_swagger_version")]
    pub swagger: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<Info>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_path: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub schemes: Vec<Scheme>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub consumes: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub produces: Vec<String>,

    #[serde(default)]
    pub paths: BTreeMap<String, Path>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_docs: Option<ExternalDocs>,
}

impl Default for Swagger {
    fn default() -> Self {
        Self {
            swagger: default_swagger_version(),
            info: None,
            host: None,
            base_path: None,
            tags: Vec::new(),
            schemes: Vec::new(),
            consumes: Vec::new(),
            produces: Vec::new(),
            paths: BTreeMap::new(),
            external_docs: None,
        }
    }
}

impl Swagger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the info block. `None` clears it.
    pub fn with_info(mut self, info: Option<Info>) -> Self {
        self.info = info;
        self
    }

    /// Replace the host. `None` clears it.
    pub fn with_host(mut self, host: Option<String>) -> Self {
        self.host = host;
        self
    }

    /// Replace the base path. `None` clears it.
    pub fn with_base_path(mut self, base_path: Option<String>) -> Self {
        self.base_path = base_path;
        self
    }

    /// Add a scheme unless it is already listed
    pub fn add_scheme(&mut self, scheme: Scheme) {
        if !self.schemes.contains(&scheme) {
            self.schemes.push(scheme);
        }
    }

    /// Add a media type to the document-level consumes list
    pub fn add_consumes(&mut self, media_type: &str) {
        if !self.consumes.iter().any(|m| m == media_type) {
            self.consumes.push(media_type.to_string());
        }
    }

    /// Add a media type to the document-level produces list
    pub fn add_produces(&mut self, media_type: &str) {
        if !self.produces.iter().any(|m| m == media_type) {
            self.produces.push(media_type.to_string());
        }
    }

    /// Add a tag unless one with the same name exists. A description on the
    /// new tag fills in a missing one.
    pub fn add_tag(&mut self, tag: Tag) {
        match self.tags.iter_mut().find(|t| t.name == tag.name) {
            Some(existing) => {
                if existing.description.is_none() {
                    existing.description = tag.description;
                }
            }
            None => self.tags.push(tag),
        }
    }

    pub fn tag(&self, name: &str) -> Option<&Tag> {
        self.tags.iter().find(|t| t.name == name)
    }

    /// Insert or replace a path item
    pub fn insert_path(&mut self, path: impl Into<String>, item: Path) -> Option<Path> {
        self.paths.insert(path.into(), item)
    }

    pub fn path(&self, path: &str) -> Option<&Path> {
        self.paths.get(path)
    }

    /// Path item for `path`, created empty when missing
    pub fn path_entry(&mut self, path: &str) -> &mut Path {
        self.paths.entry(path.to_string()).or_default()
    }

    /// Total number of operations across all paths
    pub fn operation_count(&self) -> usize {
        self.paths.values().map(|p| p.operations().len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::info::{Contact, License};
    use crate::operation::{HttpMethod, Operation};

    #[test]
    fn test_scheme_for_value() {
        assert_eq!(Scheme::for_value("http"), Some(Scheme::Http));
        assert_eq!(Scheme::for_value("HTTPS"), Some(Scheme::Https));
        assert_eq!(Scheme::for_value(" wss "), Some(Scheme::Wss));
        assert_eq!(Scheme::for_value("ftp"), None);
    }

    #[test]
    fn test_add_scheme_deduplicates() {
        let mut swagger = Swagger::new();
        swagger.add_scheme(Scheme::Https);
        swagger.add_scheme(Scheme::Http);
        swagger.add_scheme(Scheme::Https);
        assert_eq!(swagger.schemes, vec![Scheme::Https, Scheme::Http]);
    }

    #[test]
    fn test_add_tag_keeps_first_and_fills_description() {
        let mut swagger = Swagger::new();
        swagger.add_tag(Tag::new("users"));
        swagger.add_tag(Tag {
            name: "users".to_string(),
            description: Some("User management".to_string()),
            external_docs: None,
        });

        assert_eq!(swagger.tags.len(), 1);
        assert_eq!(
            swagger.tag("users").and_then(|t| t.description.as_deref()),
            Some("User management")
        );
    }

    #[test]
    fn test_overlay_setters_clear_with_none() {
        let swagger = Swagger::new()
            .with_host(Some("api.example.com".to_string()))
            .with_base_path(Some("/v1".to_string()));
        assert_eq!(swagger.host.as_deref(), Some("api.example.com"));

        let swagger = swagger.with_host(None);
        assert!(swagger.host.is_none());
        assert_eq!(swagger.base_path.as_deref(), Some("/v1"));
    }

    #[test]
    fn test_serializes_wire_names() {
        let mut swagger = Swagger::new()
            .with_info(Some(
                Info::new()
                    .title("Pets")
                    .version("1.0")
                    .terms_of_service("https://example.com/tos")
                    .contact(Contact::named("Jane"))
                    .license(License::new("MIT", "https://opensource.org/licenses/MIT")),
            ))
            .with_base_path(Some("/api".to_string()));
        swagger.add_scheme(Scheme::Https);
        swagger
            .path_entry("/pets")
            .set(HttpMethod::Get, Operation::default());

        let json = serde_json::to_value(&swagger).unwrap();
        assert_eq!(json["swagger"], "2.0");
        assert_eq!(json["basePath"], "/api");
        assert_eq!(json["schemes"][0], "https");
        assert_eq!(json["info"]["termsOfService"], "https://example.com/tos");
        assert_eq!(json["info"]["contact"]["name"], "Jane");
        assert!(json["paths"]["/pets"]["get"].is_object());
        assert!(json.get("host").is_none());
    }

    #[test]
    fn test_yaml_document_parses() {
        let yaml = r#"
swagger: "2.0"
info:
  title: Pets
  version: "1.0"
basePath: /api
schemes: [http]
paths:
  /pets:
    get:
      summary: List pets
      responses:
        "200":
          description: ok
"#;
        let swagger: Swagger = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(swagger.base_path.as_deref(), Some("/api"));
        assert_eq!(swagger.operation_count(), 1);
    }
}
