//! Scan context
//!
//! Holds the registrations a scan leaves behind: the active scanner, the
//! active filter and the filter registry used to resolve filter names. The
//! context is passed explicitly; each registration overwrites the previous
//! one.

use std::sync::Arc;
use tracing::debug;

use swagger_model::Swagger;

use crate::filter::{FilterRegistry, SpecFilter, SpecFilterRunner};
use crate::scanner::Scanner;

pub struct ScanContext {
    scanner: Option<Arc<dyn Scanner>>,
    filter: Option<Arc<dyn SpecFilter>>,
    filters: FilterRegistry,
    scanner_registrations: usize,
}

impl ScanContext {
    pub fn new(filters: FilterRegistry) -> Self {
        Self {
            scanner: None,
            filter: None,
            filters,
            scanner_registrations: 0,
        }
    }

    pub fn active_scanner(&self) -> Option<Arc<dyn Scanner>> {
        self.scanner.clone()
    }

    pub fn set_scanner(&mut self, scanner: Arc<dyn Scanner>) {
        self.scanner_registrations += 1;
        debug!(
            "Registered active scanner (registration #{})",
            self.scanner_registrations
        );
        self.scanner = Some(scanner);
    }

    /// Number of times a scanner has been registered
    pub fn scanner_registrations(&self) -> usize {
        self.scanner_registrations
    }

    pub fn active_filter(&self) -> Option<Arc<dyn SpecFilter>> {
        self.filter.clone()
    }

    pub fn set_filter(&mut self, filter: Arc<dyn SpecFilter>) {
        debug!("Registered active filter: {}", filter.name());
        self.filter = Some(filter);
    }

    pub fn filters(&self) -> &FilterRegistry {
        &self.filters
    }

    pub fn filters_mut(&mut self) -> &mut FilterRegistry {
        &mut self.filters
    }

    /// Run the active filter over `swagger`, or return it unchanged
    pub fn apply_active_filter(&self, swagger: Swagger) -> Swagger {
        match &self.filter {
            Some(filter) => SpecFilterRunner::filter(swagger, filter.as_ref()),
            None => swagger,
        }
    }
}

impl Default for ScanContext {
    fn default() -> Self {
        Self::new(FilterRegistry::with_builtins())
    }
}
