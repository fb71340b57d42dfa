mod adapter;
mod plugin_impl;

pub mod config;
pub mod error;
pub mod extractor;
pub mod resolver;

pub use adapter::{SchemarsPlugin, SchemarsPluginBuilder};
pub use config::SchemarsPluginConfig;
pub use extractor::SchemaExtractor;
pub use resolver::SchemaResolver;
