//! Configuration management for swagger-scan

pub mod bean;
pub mod settings;

#[cfg(test)]
mod tests;

// Re-export main types for convenience
pub use bean::{BeanConfig, SwaggerConfig};
pub use settings::{ApiSettings, OutputSettings, ResourceSettings, Settings, SETTINGS_VERSION};
