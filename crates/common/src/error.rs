//! Error types for Propflow

use thiserror::Error;

/// Result type alias using the Propflow Error
pub type Result<T> = std::result::Result<T, Error>;

/// Propflow error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("unknown component: {0}")]
    UnknownComponent(String),

    #[error("component is not concrete: {0}")]
    NotConcrete(String),

    #[error("component already registered: {0}")]
    AlreadyRegistered(String),

    #[error("unknown hierarchy root: {0}")]
    UnknownRoot(String),

    #[error("missing required parameter: {key}")]
    MissingParameter { key: String },

    #[error("invalid parameter {key}: expected {expected}")]
    InvalidParameter { key: String, expected: &'static str },

    #[error("duplicate element id: {0}")]
    DuplicateId(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
