//! Swagger 2.0 API description model
//!
//! Plain serde types for the document assembled by `swagger-scan`. Field
//! names serialize to the Swagger 2.0 wire names and absent values are
//! omitted.

pub mod info;
pub mod operation;
pub mod swagger;

pub use info::{Contact, ExternalDocs, Info, License, Tag};
pub use operation::{HttpMethod, Operation, Parameter, ParameterLocation, Path, Response};
pub use swagger::{Scheme, Swagger};
