//! JSON configuration for directive registries
//!
//! A [`SigilConfig`] document describes imports, enumerations and user
//! directive schemas; [`SigilConfig::build`] validates it and freezes the
//! result into a [`ConfiguredEnvironment`] ready to compile statements.

pub mod document;
pub mod error;

pub use document::{AttributeConfig, ConfiguredEnvironment, EnumConfig, EnumConstantConfig, SchemaConfig, SigilConfig};
pub use error::ConfigError;
