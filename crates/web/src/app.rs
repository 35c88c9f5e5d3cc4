//! Application definition and rendering

use propflow_common::assemble::{assemble, AssemblyReport, TestContext};
use propflow_common::catalog;
use propflow_common::page::{PageNode, RenderContext};
use uuid::Uuid;

/// What an app factory produces: the page fragment and the typed context
/// recording what was assembled onto it.
#[derive(Debug)]
pub struct AppDefinition {
    pub page: PageNode,
    pub context: TestContext,
}

/// A runnable application instance. Each instance gets its own session
/// token, substituted into the page at render time.
#[derive(Debug)]
pub struct App {
    page: PageNode,
    session_token: String,
    context: TestContext,
}

impl App {
    pub fn new(definition: AppDefinition) -> Self {
        Self {
            page: definition.page,
            session_token: Uuid::new_v4().to_string(),
            context: definition.context,
        }
    }

    pub fn session_token(&self) -> &str {
        &self.session_token
    }

    pub fn context(&self) -> &TestContext {
        &self.context
    }

    pub fn page(&self) -> &PageNode {
        &self.page
    }

    /// Full HTML document for the page
    pub fn render(&self) -> String {
        let ctx = RenderContext {
            session_token: self.session_token.clone(),
        };
        format!(
            "<!doctype html><html><head><meta charset=\"utf-8\"><title>Propflow</title></head><body>{}</body></html>",
            self.page.render(&ctx)
        )
    }
}

/// Default app: the full showcase matrix assembled against the catalog.
/// Assembly failures are returned for the caller to report.
pub fn showcase() -> (App, AssemblyReport) {
    let registry = catalog::registry();
    let assembly = assemble(&registry, &catalog::showcase_matrix());
    let app = App::new(AppDefinition {
        page: assembly.page,
        context: assembly.context,
    });
    (app, assembly.report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_substitutes_session_token() {
        let (app, report) = showcase();
        assert!(report.is_clean());

        let html = app.render();
        assert!(html.contains(&format!("value=\"{}\"", app.session_token())));
        assert!(html.contains("id=\"token\""));
        assert!(html.contains("id=\"checkbox\""));
    }

    #[test]
    fn each_instance_gets_a_fresh_token() {
        let (a, _) = showcase();
        let (b, _) = showcase();
        assert_ne!(a.session_token(), b.session_token());
    }
}
