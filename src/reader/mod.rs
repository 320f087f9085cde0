//! Reader that turns scanned resources into a Swagger document

use std::collections::BTreeMap;
use tracing::{debug, info, warn};

use swagger_model::{
    Contact, ExternalDocs, Info, License, Operation, Parameter, Response, Scheme, Swagger, Tag,
};

use crate::resource::{
    ApiMarker, DefinitionDescriptor, EndpointDescriptor, InfoDescriptor, ResourceDescriptor,
};
use crate::utils::{join_paths, non_blank, strip_path_regex, with_leading_slash};

/// Reader settings supplied by the configuration
pub trait ReaderConfig {
    /// Read resources that only carry the `Path` marker
    fn scan_all_resources(&self) -> bool;

    /// Route prefixes excluded from the document
    fn ignored_routes(&self) -> &[String];
}

/// Default response added to operations that declare none
const DEFAULT_RESPONSE_CODE: &str = "200";
const DEFAULT_RESPONSE_DESCRIPTION: &str = "successful operation";

/// Builds and owns a Swagger document
#[derive(Debug, Clone, Default)]
pub struct Reader {
    swagger: Swagger,
}

impl Reader {
    pub fn new(swagger: Swagger) -> Self {
        Self { swagger }
    }

    pub fn swagger(&self) -> &Swagger {
        &self.swagger
    }

    pub fn swagger_mut(&mut self) -> &mut Swagger {
        &mut self.swagger
    }

    /// Read resources into the document. Definition resources are applied
    /// before any endpoint is read.
    pub fn read(&mut self, resources: &[ResourceDescriptor], config: &dyn ReaderConfig) -> &Swagger {
        for resource in resources
            .iter()
            .filter(|r| r.has_marker(ApiMarker::SwaggerDefinition))
        {
            if let Some(definition) = &resource.definition {
                debug!("Applying definition from {}", resource.name);
                self.read_definition(definition);
            }
        }

        let mut operations = 0;
        let mut read_resources = 0;
        for resource in resources {
            if !Self::should_read(resource, config) {
                continue;
            }
            read_resources += 1;
            operations += self.read_resource(resource, config);
        }

        info!(
            "Read {} operations from {} resources",
            operations, read_resources
        );

        &self.swagger
    }

    fn should_read(resource: &ResourceDescriptor, config: &dyn ReaderConfig) -> bool {
        if resource.has_marker(ApiMarker::Api) {
            if resource.is_hidden() {
                debug!("Skipping hidden resource {}", resource.name);
                return false;
            }
            return true;
        }

        config.scan_all_resources() && resource.has_marker(ApiMarker::Path)
    }

    fn read_definition(&mut self, definition: &DefinitionDescriptor) {
        if let Some(info) = &definition.info {
            let merged = merge_info(self.swagger.info.take().unwrap_or_default(), info);
            self.swagger.info = Some(merged);
        }

        if let Some(host) = non_blank(definition.host.as_deref()) {
            self.swagger.host = Some(host.to_string());
        }

        if let Some(base_path) = non_blank(definition.base_path.as_deref()) {
            self.swagger.base_path = Some(with_leading_slash(base_path));
        }

        for value in &definition.schemes {
            match Scheme::for_value(value) {
                Some(scheme) => self.swagger.add_scheme(scheme),
                None => warn!("Ignoring unknown scheme in definition: {}", value),
            }
        }

        for media_type in &definition.consumes {
            self.swagger.add_consumes(media_type);
        }
        for media_type in &definition.produces {
            self.swagger.add_produces(media_type);
        }

        for tag in &definition.tags {
            self.swagger.add_tag(Tag {
                name: tag.name.clone(),
                description: tag.description.clone(),
                external_docs: None,
            });
        }

        if let Some(url) = non_blank(definition.external_docs_url.as_deref()) {
            self.swagger.external_docs = Some(ExternalDocs {
                description: definition.external_docs_description.clone(),
                url: url.to_string(),
            });
        }
    }

    /// Returns the number of operations added
    fn read_resource(&mut self, resource: &ResourceDescriptor, config: &dyn ReaderConfig) -> usize {
        let resource_tags: Vec<String> = resource
            .api
            .as_ref()
            .map(|api| api.tags.clone())
            .unwrap_or_default();

        let resource_path = resource.path.as_deref().map(strip_path_regex);

        let mut added = 0;
        for endpoint in &resource.endpoints {
            if endpoint.hidden {
                continue;
            }

            let endpoint_path = endpoint.path.as_deref().map(strip_path_regex);
            let path = join_paths(&[resource_path.as_deref(), endpoint_path.as_deref()]);

            if is_ignored(&path, config.ignored_routes()) {
                debug!("Skipping ignored route {} {}", endpoint.method, path);
                continue;
            }

            let operation = build_operation(resource, endpoint, &resource_tags);
            for tag in &operation.tags {
                self.swagger.add_tag(Tag::new(tag.clone()));
            }

            let replaced = self
                .swagger
                .path_entry(&path)
                .set(endpoint.method, operation);
            if replaced.is_some() {
                debug!(
                    "{} {} redefined by {}",
                    endpoint.method, path, resource.name
                );
            }
            added += 1;
        }

        added
    }
}

/// Whether `path` is covered by one of the ignored routes: equal to it, or
/// below it at a segment boundary
pub fn is_ignored(path: &str, ignored_routes: &[String]) -> bool {
    ignored_routes.iter().any(|route| {
        path.starts_with(route.as_str())
            && (path.len() == route.len() || path[route.len()..].starts_with('/'))
    })
}

fn build_operation(
    resource: &ResourceDescriptor,
    endpoint: &EndpointDescriptor,
    resource_tags: &[String],
) -> Operation {
    let tags = if endpoint.tags.is_empty() {
        resource_tags.to_vec()
    } else {
        endpoint.tags.clone()
    };

    let consumes = if endpoint.consumes.is_empty() {
        resource.consumes.clone()
    } else {
        endpoint.consumes.clone()
    };

    let produces = if endpoint.produces.is_empty() {
        resource.produces.clone()
    } else {
        endpoint.produces.clone()
    };

    let parameters = endpoint
        .parameters
        .iter()
        .map(|p| Parameter {
            name: p.name.clone(),
            location: p.location,
            description: p.description.clone(),
            required: p.required,
            param_type: p.param_type.clone(),
        })
        .collect();

    let mut responses: BTreeMap<String, Response> = endpoint
        .responses
        .iter()
        .map(|r| (r.code.clone(), Response::new(r.description.clone())))
        .collect();
    if responses.is_empty() {
        responses.insert(
            DEFAULT_RESPONSE_CODE.to_string(),
            Response::new(DEFAULT_RESPONSE_DESCRIPTION),
        );
    }

    Operation {
        tags,
        summary: endpoint.summary.clone(),
        description: endpoint.description.clone(),
        operation_id: endpoint.operation_id.clone(),
        consumes,
        produces,
        parameters,
        responses,
        deprecated: endpoint.deprecated,
    }
}

fn merge_info(mut info: Info, declared: &InfoDescriptor) -> Info {
    if let Some(title) = non_blank(declared.title.as_deref()) {
        info = info.title(title);
    }
    if let Some(version) = non_blank(declared.version.as_deref()) {
        info = info.version(version);
    }
    if let Some(description) = non_blank(declared.description.as_deref()) {
        info = info.description(description);
    }
    if let Some(tos) = non_blank(declared.terms_of_service.as_deref()) {
        info = info.terms_of_service(tos);
    }
    if let Some(contact) = non_blank(declared.contact.as_deref()) {
        info = info.contact(Contact::named(contact));
    }
    if let (Some(name), Some(url)) = (
        non_blank(declared.license.as_deref()),
        non_blank(declared.license_url.as_deref()),
    ) {
        info = info.license(License::new(name, url));
    }
    info
}
