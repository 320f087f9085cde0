//! Filter registry: maps configuration names to filter factories

use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

use super::builtin::{HideInternalFilterFactory, NoDeprecatedFilterFactory, NoOpFilterFactory};
use super::{FilterError, FilterFactory, SpecFilter};

/// Registry of filter factories keyed by name
#[derive(Default)]
pub struct FilterRegistry {
    factories: BTreeMap<String, Box<dyn FilterFactory>>,
}

impl FilterRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in filters
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("noop", Box::new(NoOpFilterFactory));
        registry.register("hide-internal", Box::new(HideInternalFilterFactory));
        registry.register("no-deprecated", Box::new(NoDeprecatedFilterFactory));
        registry
    }

    /// Register a factory, replacing any previous one under the same name
    pub fn register(&mut self, name: &str, factory: Box<dyn FilterFactory>) {
        debug!("Registering filter factory: {}", name);
        self.factories.insert(name.to_string(), factory);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<String> {
        self.factories.keys().cloned().collect()
    }

    /// Name and description of every registered filter, sorted by name
    pub fn describe(&self) -> Vec<(String, String)> {
        self.factories
            .iter()
            .map(|(name, factory)| (name.clone(), factory.description().to_string()))
            .collect()
    }

    /// Instantiate the filter registered under `name`
    pub fn instantiate(&self, name: &str) -> Result<Arc<dyn SpecFilter>, FilterError> {
        let factory = self
            .factories
            .get(name.trim())
            .ok_or_else(|| FilterError::NotFound(name.to_string()))?;

        factory
            .create()
            .map(Arc::from)
            .map_err(|e| FilterError::Construction {
                name: name.to_string(),
                reason: format!("{e:#}"),
            })
    }
}

impl Clone for FilterRegistry {
    fn clone(&self) -> Self {
        Self {
            factories: self
                .factories
                .iter()
                .map(|(name, factory)| (name.clone(), factory.clone_box()))
                .collect(),
        }
    }
}
