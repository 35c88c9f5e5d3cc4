//! Propflow E2E Verification Framework
//!
//! This crate proves that construction parameters propagate into rendered
//! HTML. It serves an assembled component page, drives Playwright through
//! its CLI, and asserts every recorded identifier resolves to a live
//! element.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                  E2E Verifier (Rust)                       │
//! ├────────────────────────────────────────────────────────────┤
//! │  AppHarness                                                │
//! │    ├── create(config, app_factory) -> AppHarness           │
//! │    ├── app_instance() -> Option<&AppInstance>              │
//! │    └── frontend() -> BrowserSession                        │
//! ├────────────────────────────────────────────────────────────┤
//! │  Verifier                                                  │
//! │    └── verify(app, session) -> VerifyReport                │
//! │          for each recorded (component, params):            │
//! │            require params.id, find_element(By::Id, id)     │
//! ├────────────────────────────────────────────────────────────┤
//! │  MatrixSpec (YAML)                                         │
//! │    ├── name, description, exclude                          │
//! │    └── components: [{ component, id?, params }]            │
//! └────────────────────────────────────────────────────────────┘
//! ```

pub mod browser;
pub mod error;
pub mod harness;
pub mod matrix;
pub mod verify;

pub use browser::{BrowserSession, By, Element, ElementLookup, PageSession};
pub use error::{E2eError, E2eResult};
pub use harness::{AppHarness, AppInstance, HarnessConfig};
pub use matrix::MatrixSpec;
pub use verify::{Verifier, VerifyOptions, VerifyReport};
