//! Propflow Web Application
//!
//! Serves one page assembled from the component catalog, plus the health
//! endpoint the harness polls during startup.

pub mod app;
pub mod server;

pub use app::{App, AppDefinition};
pub use server::{router, serve};
