//! Error types for E2E verification

use thiserror::Error;

#[derive(Error, Debug)]
pub enum E2eError {
    #[error("app failed to start: {0}")]
    AppStartup(String),

    #[error("app is not running")]
    AppNotRunning,

    #[error("app health check failed after {0} attempts")]
    HealthCheck(usize),

    #[error("Playwright not found. Install with: npx playwright install")]
    BrowserNotFound,

    #[error("browser error: {0}")]
    Browser(String),

    #[error("component {component} has no id parameter")]
    MissingIdentifier { component: String },

    #[error("no element found with id: {0}")]
    ElementNotFound(String),

    #[error("element {id}: parameter {key} did not propagate")]
    AttributeMismatch { id: String, key: String },

    #[error("matrix spec error: {0}")]
    SpecParse(String),

    #[error("component error: {0}")]
    Component(#[from] propflow_common::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type E2eResult<T> = Result<T, E2eError>;
