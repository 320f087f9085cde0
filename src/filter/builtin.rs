//! Built-in filters and their factories

use anyhow::Result;

use swagger_model::{HttpMethod, Operation, Tag};

use super::{FilterFactory, SpecFilter};

/// Tag marking operations that must not be published
pub const INTERNAL_TAG: &str = "internal";

/// Keeps everything
pub struct NoOpFilter;

impl SpecFilter for NoOpFilter {
    fn name(&self) -> &str {
        "noop"
    }
}

/// Removes operations tagged `internal` along with the tag itself
pub struct HideInternalFilter;

impl SpecFilter for HideInternalFilter {
    fn name(&self) -> &str {
        "hide-internal"
    }

    fn is_operation_allowed(&self, operation: &Operation, _path: &str, _method: HttpMethod) -> bool {
        !operation.has_tag(INTERNAL_TAG)
    }

    fn is_tag_allowed(&self, tag: &Tag) -> bool {
        tag.name != INTERNAL_TAG
    }
}

/// Removes deprecated operations
pub struct NoDeprecatedFilter;

impl SpecFilter for NoDeprecatedFilter {
    fn name(&self) -> &str {
        "no-deprecated"
    }

    fn is_operation_allowed(&self, operation: &Operation, _path: &str, _method: HttpMethod) -> bool {
        !operation.deprecated
    }
}

#[derive(Clone)]
pub struct NoOpFilterFactory;

impl FilterFactory for NoOpFilterFactory {
    fn create(&self) -> Result<Box<dyn SpecFilter>> {
        Ok(Box::new(NoOpFilter))
    }

    fn description(&self) -> &str {
        "Keeps the document unchanged"
    }

    fn clone_box(&self) -> Box<dyn FilterFactory> {
        Box::new(self.clone())
    }
}

#[derive(Clone)]
pub struct HideInternalFilterFactory;

impl FilterFactory for HideInternalFilterFactory {
    fn create(&self) -> Result<Box<dyn SpecFilter>> {
        Ok(Box::new(HideInternalFilter))
    }

    fn description(&self) -> &str {
        "Removes operations tagged 'internal'"
    }

    fn clone_box(&self) -> Box<dyn FilterFactory> {
        Box::new(self.clone())
    }
}

#[derive(Clone)]
pub struct NoDeprecatedFilterFactory;

impl FilterFactory for NoDeprecatedFilterFactory {
    fn create(&self) -> Result<Box<dyn SpecFilter>> {
        Ok(Box::new(NoDeprecatedFilter))
    }

    fn description(&self) -> &str {
        "Removes deprecated operations"
    }

    fn clone_box(&self) -> Box<dyn FilterFactory> {
        Box::new(self.clone())
    }
}
