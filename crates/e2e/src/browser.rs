//! Browser session driving Playwright
//!
//! Element lookups run through a generated node script, one subprocess
//! per probe. The session only needs the lookup surface, so it is modeled
//! as the [`ElementLookup`] trait; [`PageSession`] implements the same
//! trait over an assembled page tree for browserless tests.

use std::collections::HashMap;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use serde::Deserialize;
use tracing::debug;

use propflow_common::page::{PageNode, RenderContext};

use crate::error::{E2eError, E2eResult};

/// Element locator strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum By {
    Id,
}

/// A resolved element: its tag plus attribute and property snapshots
#[derive(Debug, Clone, Deserialize)]
pub struct Element {
    #[serde(default)]
    pub tag: String,
    #[serde(default)]
    attributes: HashMap<String, String>,
    #[serde(default)]
    properties: HashMap<String, serde_json::Value>,
}

impl Element {
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn get_property(&self, name: &str) -> Option<&serde_json::Value> {
        self.properties.get(name)
    }
}

/// Anything that can resolve an identifier to a live element
pub trait ElementLookup {
    fn find_element(&self, by: By, locator: &str) -> E2eResult<Element>;
}

#[derive(Debug, Clone, Copy, Default)]
pub enum Browser {
    #[default]
    Chromium,
    Firefox,
    Webkit,
}

impl Browser {
    fn as_str(&self) -> &'static str {
        match self {
            Browser::Chromium => "chromium",
            Browser::Firefox => "firefox",
            Browser::Webkit => "webkit",
        }
    }
}

impl std::str::FromStr for Browser {
    type Err = E2eError;

    fn from_str(s: &str) -> E2eResult<Self> {
        match s {
            "chromium" => Ok(Browser::Chromium),
            "firefox" => Ok(Browser::Firefox),
            "webkit" => Ok(Browser::Webkit),
            other => Err(E2eError::Browser(format!("unknown browser: {other}"))),
        }
    }
}

/// Configuration for a browser session
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    pub base_url: String,
    pub artifact_dir: PathBuf,
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub browser: Browser,
    pub headless: bool,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080".to_string(),
            artifact_dir: PathBuf::from("test-results/browser"),
            viewport_width: 1280,
            viewport_height: 720,
            browser: Browser::Chromium,
            headless: true,
        }
    }
}

/// Playwright-backed browser session
pub struct BrowserSession {
    config: BrowserConfig,
}

#[derive(Debug, Deserialize)]
struct ProbeResult {
    found: bool,
    #[serde(default)]
    tag: String,
    #[serde(default)]
    attributes: HashMap<String, String>,
    #[serde(default)]
    properties: HashMap<String, serde_json::Value>,
}

impl BrowserSession {
    pub fn new(config: BrowserConfig) -> E2eResult<Self> {
        Self::check_playwright_installed()?;
        std::fs::create_dir_all(&config.artifact_dir)?;
        Ok(Self { config })
    }

    /// Check if Playwright is installed
    pub fn check_playwright_installed() -> E2eResult<()> {
        let output = Command::new("npx")
            .args(["playwright", "--version"])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();

        match output {
            Ok(status) if status.success() => Ok(()),
            _ => Err(E2eError::BrowserNotFound),
        }
    }

    /// Build the probe script for one element lookup
    fn build_script(&self, by: By, locator: &str) -> String {
        let lookup = match by {
            By::Id => format!("document.getElementById('{}')", js_string(locator)),
        };
        format!(
            r#"
const {{ chromium, firefox, webkit }} = require('playwright');

(async () => {{
  const browser = await {browser}.launch({{ headless: {headless} }});
  const context = await browser.newContext({{
    viewport: {{ width: {width}, height: {height} }}
  }});
  const page = await context.newPage();

  try {{
    await page.goto('{base_url}/');
    const result = await page.evaluate(() => {{
      const el = {lookup};
      if (!el) return {{ found: false }};
      const attributes = {{}};
      for (const attr of el.attributes) attributes[attr.name] = attr.value;
      const properties = {{}};
      for (const name of ['value', 'checked', 'disabled']) {{
        if (name in el) properties[name] = el[name];
      }}
      return {{ found: true, tag: el.tagName.toLowerCase(), attributes, properties }};
    }});
    console.log(JSON.stringify(result));
  }} catch (error) {{
    console.error(JSON.stringify({{ found: false, error: error.message }}));
    process.exit(1);
  }} finally {{
    await browser.close();
  }}
}})();
"#,
            browser = self.config.browser.as_str(),
            headless = self.config.headless,
            width = self.config.viewport_width,
            height = self.config.viewport_height,
            base_url = self.config.base_url,
        )
    }

    /// Run a probe script with node and parse its JSON result
    fn run_script(&self, script: &str) -> E2eResult<ProbeResult> {
        let temp_dir = tempfile::tempdir()?;
        let script_path = temp_dir.path().join("probe.js");
        std::fs::write(&script_path, script)?;

        debug!("running browser probe: {}", script_path.display());

        let output = Command::new("node")
            .arg(&script_path)
            .current_dir(temp_dir.path())
            .output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            return Err(E2eError::Browser(format!(
                "probe failed:\nstdout: {}\nstderr: {}",
                stdout, stderr
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let line = stdout
            .lines()
            .rev()
            .find(|l| l.trim_start().starts_with('{'))
            .ok_or_else(|| E2eError::Browser(format!("no probe output:\n{}", stdout)))?;
        Ok(serde_json::from_str(line)?)
    }
}

impl ElementLookup for BrowserSession {
    fn find_element(&self, by: By, locator: &str) -> E2eResult<Element> {
        let script = self.build_script(by, locator);
        let result = self.run_script(&script)?;
        if !result.found {
            return Err(E2eError::ElementNotFound(locator.to_string()));
        }
        Ok(Element {
            tag: result.tag,
            attributes: result.attributes,
            properties: result.properties,
        })
    }
}

/// In-memory session over an assembled page tree. Lookup semantics match
/// the browser's `getElementById`: first match in document order.
pub struct PageSession {
    elements: Vec<(String, Element)>,
}

impl PageSession {
    pub fn from_page(page: &PageNode, ctx: &RenderContext) -> Self {
        let elements = page
            .elements_by_id()
            .into_iter()
            .map(|(id, el)| {
                let attributes: HashMap<String, String> =
                    el.rendered_attrs(ctx).into_iter().collect();
                (
                    id.to_string(),
                    Element {
                        tag: el.tag().to_string(),
                        attributes,
                        properties: HashMap::new(),
                    },
                )
            })
            .collect();
        Self { elements }
    }
}

impl ElementLookup for PageSession {
    fn find_element(&self, _by: By, locator: &str) -> E2eResult<Element> {
        self.elements
            .iter()
            .find(|(id, _)| id == locator)
            .map(|(_, el)| el.clone())
            .ok_or_else(|| E2eError::ElementNotFound(locator.to_string()))
    }
}

fn js_string(input: &str) -> String {
    input.replace('\\', "\\\\").replace('\'', "\\'")
}

#[cfg(test)]
mod tests {
    use super::*;
    use propflow_common::page::Element as PageElement;

    #[test]
    fn probe_script_embeds_lookup_and_viewport() {
        let session = BrowserSession {
            config: BrowserConfig {
                base_url: "http://127.0.0.1:9999".to_string(),
                ..Default::default()
            },
        };
        let script = session.build_script(By::Id, "checkbox");
        assert!(script.contains("document.getElementById('checkbox')"));
        assert!(script.contains("await page.goto('http://127.0.0.1:9999/')"));
        assert!(script.contains("width: 1280, height: 720"));
        assert!(script.contains("chromium.launch({ headless: true })"));
    }

    #[test]
    fn js_string_escapes_quotes() {
        assert_eq!(js_string("a'b\\c"), "a\\'b\\\\c");
    }

    #[test]
    fn page_session_resolves_first_match() {
        let page = PageNode::fragment(vec![
            PageElement::new("button").attr("id", "dup").into(),
            PageElement::new("span").attr("id", "dup").into(),
        ]);
        let session = PageSession::from_page(&page, &RenderContext::default());

        let element = session.find_element(By::Id, "dup").unwrap();
        assert_eq!(element.tag, "button");

        assert!(matches!(
            session.find_element(By::Id, "missing"),
            Err(E2eError::ElementNotFound(_))
        ));
    }

    #[test]
    fn parses_probe_output() {
        let json = r#"{"found": true, "tag": "input", "attributes": {"id": "token"}, "properties": {"value": "abc"}}"#;
        let result: ProbeResult = serde_json::from_str(json).unwrap();
        assert!(result.found);
        assert_eq!(result.attributes.get("id").map(String::as_str), Some("token"));
        assert_eq!(result.properties["value"], "abc");
    }
}
