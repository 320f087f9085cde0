//! Document filters
//!
//! A filter is a pluggable transformation applied to the finished document.
//! Filters are selected by name from a [`FilterRegistry`] whose factories are
//! registered at compile time.

use anyhow::Result;

use swagger_model::{HttpMethod, Operation, Parameter, Tag};

pub mod builtin;
pub mod registry;
pub mod runner;

pub use builtin::{HideInternalFilter, NoDeprecatedFilter, NoOpFilter};
pub use registry::FilterRegistry;
pub use runner::SpecFilterRunner;

/// Filter errors
#[derive(thiserror::Error, Debug)]
pub enum FilterError {
    #[error("No filter registered under name: {0}")]
    NotFound(String),

    #[error("Failed to construct filter {name}: {reason}")]
    Construction { name: String, reason: String },
}

/// Decides which parts of a document are kept. Every check allows by
/// default.
pub trait SpecFilter: Send + Sync {
    /// Registry name of the filter
    fn name(&self) -> &str;

    fn is_operation_allowed(&self, _operation: &Operation, _path: &str, _method: HttpMethod) -> bool {
        true
    }

    fn is_param_allowed(&self, _parameter: &Parameter, _operation: &Operation, _path: &str) -> bool {
        true
    }

    fn is_tag_allowed(&self, _tag: &Tag) -> bool {
        true
    }
}

/// Factory trait for creating filters
pub trait FilterFactory: Send + Sync {
    /// Create a new filter instance
    fn create(&self) -> Result<Box<dyn SpecFilter>>;

    /// One-line description shown when listing filters
    fn description(&self) -> &str;

    /// Clone the factory as a boxed trait object
    fn clone_box(&self) -> Box<dyn FilterFactory>;
}
