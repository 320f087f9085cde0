//! Resource descriptors
//!
//! A resource is the unit the scanner discovers: a named type in a package
//! that carries one or more API markers and describes the endpoints it
//! serves. Descriptors are registered in code or loaded from YAML manifests.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use swagger_model::{HttpMethod, ParameterLocation};

/// Marker recognised by the scanner
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiMarker {
    /// Documented API resource
    Api,

    /// Routed resource without API documentation
    Path,

    /// Document-level definition (info, host, schemes, tags)
    SwaggerDefinition,
}

/// API documentation attached to a resource
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiDescriptor {
    /// Tags applied to every endpoint of the resource
    pub tags: Vec<String>,

    /// Resource description
    pub description: Option<String>,

    /// Hidden resources are never read
    pub hidden: bool,
}

/// Parameter of an endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterDescriptor {
    pub name: String,

    pub location: ParameterLocation,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub required: bool,

    #[serde(default, rename = "type")]
    pub param_type: Option<String>,
}

/// Response of an endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseDescriptor {
    /// HTTP status code, e.g. "200" or "default"
    pub code: String,

    pub description: String,
}

/// A single endpoint (method + path) of a resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointDescriptor {
    pub method: HttpMethod,

    /// Path relative to the resource path
    #[serde(default)]
    pub path: Option<String>,

    #[serde(default)]
    pub summary: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub operation_id: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub hidden: bool,

    #[serde(default)]
    pub deprecated: bool,

    #[serde(default)]
    pub consumes: Vec<String>,

    #[serde(default)]
    pub produces: Vec<String>,

    #[serde(default)]
    pub parameters: Vec<ParameterDescriptor>,

    #[serde(default)]
    pub responses: Vec<ResponseDescriptor>,
}

impl EndpointDescriptor {
    pub fn new(method: HttpMethod, path: Option<&str>) -> Self {
        Self {
            method,
            path: path.map(str::to_string),
            summary: None,
            description: None,
            operation_id: None,
            tags: Vec::new(),
            hidden: false,
            deprecated: false,
            consumes: Vec::new(),
            produces: Vec::new(),
            parameters: Vec::new(),
            responses: Vec::new(),
        }
    }

    pub fn summary(mut self, summary: &str) -> Self {
        self.summary = Some(summary.to_string());
        self
    }

    pub fn operation_id(mut self, operation_id: &str) -> Self {
        self.operation_id = Some(operation_id.to_string());
        self
    }

    pub fn tag(mut self, tag: &str) -> Self {
        self.tags.push(tag.to_string());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn deprecated(mut self) -> Self {
        self.deprecated = true;
        self
    }

    pub fn parameter(mut self, parameter: ParameterDescriptor) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn response(mut self, code: &str, description: &str) -> Self {
        self.responses.push(ResponseDescriptor {
            code: code.to_string(),
            description: description.to_string(),
        });
        self
    }
}

/// Info fields declared by a definition resource
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InfoDescriptor {
    pub title: Option<String>,
    pub version: Option<String>,
    pub description: Option<String>,
    pub terms_of_service: Option<String>,
    pub contact: Option<String>,
    pub license: Option<String>,
    pub license_url: Option<String>,
}

/// Tag declared by a definition resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagDescriptor {
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,
}

/// Document-level data declared by a `SwaggerDefinition` resource
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefinitionDescriptor {
    pub host: Option<String>,
    pub base_path: Option<String>,
    pub schemes: Vec<String>,
    pub consumes: Vec<String>,
    pub produces: Vec<String>,
    pub tags: Vec<TagDescriptor>,
    pub info: Option<InfoDescriptor>,
    pub external_docs_url: Option<String>,
    pub external_docs_description: Option<String>,
}

/// A discoverable REST resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceDescriptor {
    /// Fully-qualified type name, unique within a registry
    pub name: String,

    /// Package (module path) the type lives in
    pub package: String,

    #[serde(default)]
    pub markers: BTreeSet<ApiMarker>,

    #[serde(default)]
    pub api: Option<ApiDescriptor>,

    /// Resource path prefix
    #[serde(default)]
    pub path: Option<String>,

    #[serde(default)]
    pub consumes: Vec<String>,

    #[serde(default)]
    pub produces: Vec<String>,

    #[serde(default)]
    pub endpoints: Vec<EndpointDescriptor>,

    #[serde(default)]
    pub definition: Option<DefinitionDescriptor>,
}

impl ResourceDescriptor {
    pub fn new(package: &str, type_name: &str) -> Self {
        Self {
            name: format!("{package}.{type_name}"),
            package: package.to_string(),
            markers: BTreeSet::new(),
            api: None,
            path: None,
            consumes: Vec::new(),
            produces: Vec::new(),
            endpoints: Vec::new(),
            definition: None,
        }
    }

    pub fn with_marker(mut self, marker: ApiMarker) -> Self {
        self.markers.insert(marker);
        self
    }

    /// Attach API documentation; implies the `Api` marker
    pub fn with_api(mut self, api: ApiDescriptor) -> Self {
        self.markers.insert(ApiMarker::Api);
        self.api = Some(api);
        self
    }

    /// Set the resource path; implies the `Path` marker
    pub fn at_path(mut self, path: &str) -> Self {
        self.markers.insert(ApiMarker::Path);
        self.path = Some(path.to_string());
        self
    }

    /// Attach document-level data; implies the `SwaggerDefinition` marker
    pub fn with_definition(mut self, definition: DefinitionDescriptor) -> Self {
        self.markers.insert(ApiMarker::SwaggerDefinition);
        self.definition = Some(definition);
        self
    }

    pub fn endpoint(mut self, endpoint: EndpointDescriptor) -> Self {
        self.endpoints.push(endpoint);
        self
    }

    pub fn has_marker(&self, marker: ApiMarker) -> bool {
        self.markers.contains(&marker)
    }

    /// Whether the resource carries any recognised marker
    pub fn is_marked(&self) -> bool {
        !self.markers.is_empty()
    }

    /// Prefix match on the package name
    pub fn in_package(&self, prefix: &str) -> bool {
        self.package.starts_with(prefix)
    }

    /// Whether the `Api` documentation marks this resource hidden
    pub fn is_hidden(&self) -> bool {
        self.api.as_ref().map(|api| api.hidden).unwrap_or(false)
    }
}

/// YAML manifest listing resources
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceManifest {
    #[serde(default)]
    pub resources: Vec<ResourceDescriptor>,
}
