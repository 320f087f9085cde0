//! Swagger Scan Library
//!
//! Assembles Swagger 2.0 API documents from registered REST resource
//! descriptors. A [`BeanConfig`] holds the document settings, scans a
//! [`ResourceRegistry`] for marked resources, reads them into a document and
//! overlays its own settings. Filters are resolved by name through the
//! [`FilterRegistry`] held by a [`ScanContext`].

pub mod cli;
pub mod config;
pub mod context;
pub mod filter;
pub mod output;
pub mod reader;
pub mod resource;
pub mod scanner;
pub mod utils;

pub use config::{ApiSettings, BeanConfig, Settings, SwaggerConfig};
pub use context::ScanContext;
pub use filter::{FilterError, FilterFactory, FilterRegistry, SpecFilter, SpecFilterRunner};
pub use output::OutputFormat;
pub use reader::{Reader, ReaderConfig};
pub use resource::{ApiMarker, ResourceDescriptor, ResourceManifest};
pub use scanner::{PackageFilter, ResourceRegistry, ResourceScanner, Scanner};
pub use swagger_model as model;

use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

use swagger_model::Swagger;

/// Main application context that ties settings, resources and filters
/// together
pub struct SwaggerScan {
    settings: Settings,
    registry: Arc<ResourceRegistry>,
    context: ScanContext,
}

impl SwaggerScan {
    /// Create an instance, discovering resource manifests from the
    /// configured directories
    pub fn new(settings: Settings) -> SwaggerScanResult<Self> {
        settings
            .validate()
            .map_err(|e| SwaggerScanError::Config(format!("{e:#}")))?;

        let mut registry = ResourceRegistry::new();
        for dir in &settings.resources.directories {
            let loaded = registry
                .discover(dir)
                .map_err(|e| SwaggerScanError::Registry(format!("{e:#}")))?;
            info!("Discovered {} resources in {:?}", loaded, dir);
        }

        Ok(Self::with_registry(settings, registry))
    }

    /// Create an instance over an already populated registry
    pub fn with_registry(settings: Settings, registry: ResourceRegistry) -> Self {
        Self {
            settings,
            registry: Arc::new(registry),
            context: ScanContext::default(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn registry(&self) -> &ResourceRegistry {
        &self.registry
    }

    pub fn context(&self) -> &ScanContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut ScanContext {
        &mut self.context
    }

    /// A fresh bean built from the API settings
    pub fn bean(&self) -> BeanConfig {
        BeanConfig::from_settings(&self.settings.api, Arc::clone(&self.registry))
    }

    /// Resources the bean would scan
    pub fn resources(&self) -> Vec<ResourceDescriptor> {
        self.bean().classes()
    }

    /// Fail when a filter is configured but not registered
    pub fn check_filter(&self) -> SwaggerScanResult<()> {
        match self.settings.api.filter.as_deref() {
            Some(name) if !self.context.filters().contains(name.trim()) => Err(
                SwaggerScanError::Filter(FilterError::NotFound(name.to_string())),
            ),
            _ => Ok(()),
        }
    }

    /// Scan, configure and filter the document
    pub fn generate(&mut self) -> GeneratedDocument {
        let start_time = Instant::now();

        let mut bean = self.bean();
        bean.set_scan(true, &mut self.context);

        let swagger = bean.configure(bean.swagger().clone(), &mut self.context);
        let operations_before = swagger.operation_count();
        let swagger = self.context.apply_active_filter(swagger);

        let filter = self.context.active_filter().map(|f| f.name().to_string());
        if bean.filter_name().is_some() && filter.is_none() {
            warn!("Document generated without its configured filter");
        }

        let statistics = GenerationStatistics {
            resources_scanned: bean.classes().len(),
            paths: swagger.paths.len(),
            operations: swagger.operation_count(),
            operations_filtered: operations_before.saturating_sub(swagger.operation_count()),
            filter,
            processing_time_ms: start_time.elapsed().as_millis() as u64,
        };

        info!(
            "Generated document: {} paths, {} operations in {}ms",
            statistics.paths, statistics.operations, statistics.processing_time_ms
        );

        GeneratedDocument {
            swagger,
            pretty_print: bean.pretty_print(),
            statistics,
        }
    }
}

/// Result of a generation run
#[derive(Debug, Clone)]
pub struct GeneratedDocument {
    pub swagger: Swagger,
    pub pretty_print: bool,
    pub statistics: GenerationStatistics,
}

/// Generation statistics
#[derive(Debug, Clone)]
pub struct GenerationStatistics {
    pub resources_scanned: usize,
    pub paths: usize,
    pub operations: usize,
    pub operations_filtered: usize,
    pub filter: Option<String>,
    pub processing_time_ms: u64,
}

/// Application error types
#[derive(thiserror::Error, Debug)]
pub enum SwaggerScanError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Resource registry error: {0}")]
    Registry(String),

    #[error("Filter error: {0}")]
    Filter(#[from] FilterError),
}

/// Result type for the main application
pub type SwaggerScanResult<T> = Result<T, SwaggerScanError>;
