//! Applies a filter to a document

use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

use swagger_model::{HttpMethod, Swagger};

use super::SpecFilter;

/// Runs a [`SpecFilter`] over a document
pub struct SpecFilterRunner;

impl SpecFilterRunner {
    /// Remove disallowed operations, parameters and tags. Paths left without
    /// operations are dropped, and when anything was removed, so are tags no
    /// longer referenced by an operation.
    pub fn filter(mut swagger: Swagger, filter: &dyn SpecFilter) -> Swagger {
        let mut removed = false;
        let mut paths = BTreeMap::new();

        for (name, mut item) in std::mem::take(&mut swagger.paths) {
            let had_operations = !item.is_empty();

            for method in HttpMethod::ALL {
                let Some(operation) = item.operation_mut(method) else {
                    continue;
                };

                if !filter.is_operation_allowed(operation, &name, method) {
                    debug!("Filter {} removed {} {}", filter.name(), method, name);
                    item.remove(method);
                    removed = true;
                    continue;
                }

                let parameters = std::mem::take(&mut operation.parameters);
                let before = parameters.len();
                let kept: Vec<_> = parameters
                    .into_iter()
                    .filter(|p| filter.is_param_allowed(p, operation, &name))
                    .collect();
                removed |= kept.len() != before;
                operation.parameters = kept;
            }

            if had_operations && item.is_empty() {
                continue;
            }
            paths.insert(name, item);
        }
        swagger.paths = paths;

        let disallowed: BTreeSet<String> = swagger
            .tags
            .iter()
            .filter(|t| !filter.is_tag_allowed(t))
            .map(|t| t.name.clone())
            .collect();
        if !disallowed.is_empty() {
            removed = true;
            swagger.tags.retain(|t| !disallowed.contains(&t.name));
            for item in swagger.paths.values_mut() {
                for method in HttpMethod::ALL {
                    if let Some(operation) = item.operation_mut(method) {
                        operation.tags.retain(|t| !disallowed.contains(t));
                    }
                }
            }
        }

        if removed {
            let referenced: BTreeSet<String> = swagger
                .paths
                .values()
                .flat_map(|item| item.operations())
                .flat_map(|(_, op)| op.tags.iter().cloned())
                .collect();
            swagger.tags.retain(|t| referenced.contains(&t.name));
        }

        swagger
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::builtin::{HideInternalFilter, NoDeprecatedFilter, NoOpFilter};
    use swagger_model::{Operation, Parameter, ParameterLocation, Tag};

    fn operation(tags: &[&str]) -> Operation {
        Operation {
            tags: tags.iter().map(|t| t.to_string()).collect(),
            ..Operation::default()
        }
    }

    fn document() -> Swagger {
        let mut swagger = Swagger::new();
        swagger.add_tag(Tag::new("users"));
        swagger.add_tag(Tag::new("internal"));
        swagger.add_tag(Tag::new("admin"));

        swagger
            .path_entry("/users")
            .set(HttpMethod::Get, operation(&["users"]));
        swagger
            .path_entry("/users")
            .set(HttpMethod::Delete, operation(&["users", "internal"]));
        swagger
            .path_entry("/admin/reindex")
            .set(HttpMethod::Post, operation(&["admin", "internal"]));
        swagger
    }

    #[test]
    fn test_noop_keeps_document() {
        let original = document();
        let filtered = SpecFilterRunner::filter(original.clone(), &NoOpFilter);
        assert_eq!(filtered, original);
    }

    #[test]
    fn test_hide_internal_removes_operations_paths_and_tags() {
        let filtered = SpecFilterRunner::filter(document(), &HideInternalFilter);

        let users = filtered.path("/users").expect("users path kept");
        assert!(users.operation(HttpMethod::Get).is_some());
        assert!(users.operation(HttpMethod::Delete).is_none());
        assert!(filtered.path("/admin/reindex").is_none());

        let tag_names: Vec<_> = filtered.tags.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(tag_names, vec!["users"]);
    }

    #[test]
    fn test_no_deprecated() {
        let mut swagger = Swagger::new();
        let mut old = operation(&[]);
        old.deprecated = true;
        swagger.path_entry("/old").set(HttpMethod::Get, old);
        swagger.path_entry("/new").set(HttpMethod::Get, operation(&[]));

        let filtered = SpecFilterRunner::filter(swagger, &NoDeprecatedFilter);
        assert!(filtered.path("/old").is_none());
        assert!(filtered.path("/new").is_some());
    }

    struct NoHeaders;

    impl SpecFilter for NoHeaders {
        fn name(&self) -> &str {
            "no-headers"
        }

        fn is_param_allowed(&self, parameter: &Parameter, _operation: &Operation, _path: &str) -> bool {
            parameter.location != ParameterLocation::Header
        }
    }

    #[test]
    fn test_parameters_filtered() {
        let mut swagger = Swagger::new();
        let mut op = operation(&[]);
        for (name, location) in [("id", ParameterLocation::Path), ("X-Trace", ParameterLocation::Header)] {
            op.parameters.push(Parameter {
                name: name.to_string(),
                location,
                description: None,
                required: false,
                param_type: None,
            });
        }
        swagger.path_entry("/items/{id}").set(HttpMethod::Get, op);

        let filtered = SpecFilterRunner::filter(swagger, &NoHeaders);
        let params = &filtered
            .path("/items/{id}")
            .and_then(|p| p.operation(HttpMethod::Get))
            .expect("operation kept")
            .parameters;
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].name, "id");
    }
}
