use std::path::PathBuf;
use sigil_core::DefinitionError;
use thiserror::Error;

/// Errors raised while loading a configuration document
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration document: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Definition(#[from] DefinitionError),

    #[error("Default value {value} of attribute '{attribute}' of '{schema}' cannot be read as {kind}")]
    InvalidDefault {
        schema: String,
        attribute: String,
        kind: String,
        value: String,
    },
}

impl ConfigError {
    pub(crate) fn invalid_default(schema: &str, attribute: &str, kind: impl ToString, value: &serde_json::Value) -> Self {
        Self::InvalidDefault {
            schema: schema.to_string(),
            attribute: attribute.to_string(),
            kind: kind.to_string(),
            value: value.to_string(),
        }
    }
}
