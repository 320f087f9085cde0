//! CLI command modules

pub mod filters;
pub mod generate;
pub mod info;
pub mod init;
pub mod resources;
pub mod validate;
