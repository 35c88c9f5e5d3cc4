//! Element verification
//!
//! Walks the recorded test context in order and asserts every identifier
//! resolves to a live element. A missing id parameter or a missing
//! element is an immediate failure; there are no retries.

use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::browser::{By, Element, ElementLookup};
use crate::error::{E2eError, E2eResult};
use crate::harness::AppInstance;

/// Verification options
#[derive(Debug, Clone, Default)]
pub struct VerifyOptions {
    /// Also compare construction parameters against rendered
    /// attributes/properties. Off by default.
    pub verify_attributes: bool,
}

/// One successfully verified element
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifiedElement {
    pub id: String,
    pub component: String,
    pub tag: String,
}

/// Outcome of one verification pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyReport {
    pub total: usize,
    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
    pub elements: Vec<VerifiedElement>,
}

impl VerifyReport {
    /// Write the report as JSON under the given directory
    pub fn write(&self, dir: &Path) -> E2eResult<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join("verify-results.json");
        std::fs::write(&path, serde_json::to_string_pretty(self)?)?;
        Ok(path)
    }
}

/// Sequential element verifier
#[derive(Debug, Default)]
pub struct Verifier {
    options: VerifyOptions,
}

// params that never correspond to a rendered attribute
const NON_ATTRIBUTE_KEYS: &[&str] = &["id", "tag", "text", "code", "header", "content", "options"];

impl Verifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: VerifyOptions) -> Self {
        Self { options }
    }

    /// Verify every recorded entry against the session.
    ///
    /// Fails fast: a `None` app means the app never started; an entry
    /// without an id parameter cannot be verified at all.
    pub fn verify(
        &self,
        app: Option<&AppInstance>,
        session: &impl ElementLookup,
    ) -> E2eResult<VerifyReport> {
        let app = app.ok_or(E2eError::AppNotRunning)?;

        let started_at = Utc::now();
        let start = Instant::now();
        let mut elements = Vec::new();

        for entry in app.context.entries() {
            let id = entry
                .params
                .str("id")
                .ok_or_else(|| E2eError::MissingIdentifier {
                    component: entry.component.clone(),
                })?;

            let element = session.find_element(By::Id, id)?;
            debug!(%id, component = %entry.component, "found element");

            if self.options.verify_attributes {
                self.check_attributes(id, &entry.params, &element)?;
            }

            elements.push(VerifiedElement {
                id: id.to_string(),
                component: entry.component.clone(),
                tag: element.tag.clone(),
            });
        }

        Ok(VerifyReport {
            total: elements.len(),
            started_at,
            duration_ms: start.elapsed().as_millis() as u64,
            elements,
        })
    }

    fn check_attributes(
        &self,
        id: &str,
        params: &propflow_common::Params,
        element: &Element,
    ) -> E2eResult<()> {
        for (key, expected) in params.iter() {
            if NON_ATTRIBUTE_KEYS.contains(&key.as_str()) || key.starts_with("on_") {
                continue;
            }
            let attr_matches = match expected.as_str() {
                Some(s) => element.get_attribute(key) == Some(s),
                None => element
                    .get_attribute(key)
                    .map(|v| v == expected.to_string())
                    .unwrap_or(false),
            };
            let prop_matches = element.get_property(key) == Some(expected);
            if !attr_matches && !prop_matches {
                return Err(E2eError::AttributeMismatch {
                    id: id.to_string(),
                    key: key.clone(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::PageSession;
    use crate::harness::AppInstance;
    use propflow_common::assemble::TestContext;
    use propflow_common::page::{Element as PageElement, PageNode, RenderContext};
    use propflow_common::Params;

    fn instance(context: TestContext) -> AppInstance {
        AppInstance {
            session_token: "tok".to_string(),
            context,
        }
    }

    fn page_with_button() -> PageNode {
        PageNode::fragment(vec![PageElement::new("button").attr("id", "button").into()])
    }

    #[test]
    fn missing_app_fails_before_lookup() {
        let session = PageSession::from_page(&page_with_button(), &RenderContext::default());
        let result = Verifier::new().verify(None, &session);
        assert!(matches!(result, Err(E2eError::AppNotRunning)));
    }

    #[test]
    fn missing_id_fails_before_lookup() {
        let mut context = TestContext::new();
        context.record("form.button", Params::new());

        let session = PageSession::from_page(&page_with_button(), &RenderContext::default());
        let result = Verifier::new().verify(Some(&instance(context)), &session);
        assert!(matches!(
            result,
            Err(E2eError::MissingIdentifier { ref component }) if component == "form.button"
        ));
    }

    #[test]
    fn missing_element_names_the_identifier() {
        let mut context = TestContext::new();
        context.record("form.button", Params::new().with("id", "ghost"));

        let session = PageSession::from_page(&page_with_button(), &RenderContext::default());
        let result = Verifier::new().verify(Some(&instance(context)), &session);
        assert!(matches!(
            result,
            Err(E2eError::ElementNotFound(ref id)) if id == "ghost"
        ));
    }

    #[test]
    fn attribute_check_is_off_by_default() {
        let mut context = TestContext::new();
        context.record(
            "form.button",
            Params::new().with("id", "button").with("type", "submit"),
        );

        // rendered type is "button", not "submit" - without the option
        // enabled this still verifies
        let session = PageSession::from_page(
            &PageNode::fragment(vec![PageElement::new("button")
                .attr("id", "button")
                .attr("type", "button")
                .into()]),
            &RenderContext::default(),
        );

        let report = Verifier::new()
            .verify(Some(&instance(context.clone())), &session)
            .unwrap();
        assert_eq!(report.total, 1);

        let strict = Verifier::with_options(VerifyOptions {
            verify_attributes: true,
        });
        assert!(matches!(
            strict.verify(Some(&instance(context)), &session),
            Err(E2eError::AttributeMismatch { .. })
        ));
    }

    #[test]
    fn report_round_trips_as_json() {
        let dir = tempfile::tempdir().unwrap();
        let report = VerifyReport {
            total: 1,
            started_at: Utc::now(),
            duration_ms: 7,
            elements: vec![VerifiedElement {
                id: "button".to_string(),
                component: "form.button".to_string(),
                tag: "button".to_string(),
            }],
        };

        let path = report.write(dir.path()).unwrap();
        let loaded: VerifyReport =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(loaded.total, 1);
        assert_eq!(loaded.elements[0].id, "button");
    }
}
