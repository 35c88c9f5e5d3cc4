//! Page assembly
//!
//! Turns a test matrix into a single renderable fragment plus the typed
//! test context the verifier reads later. Instantiation is isolated per
//! component: one failing factory is recorded and skipped, never aborting
//! the rest of the matrix.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::exclude::ExclusionPolicy;
use crate::page::{Element, PageNode};
use crate::params::Params;
use crate::registry::Registry;

/// Fixed control element ids, always present on the assembled page
pub const TOKEN_ID: &str = "token";
pub const ICON_ID: &str = "icon";
pub const DEBOUNCE_INPUT_ID: &str = "input-inside-debounce";

/// One requested component instantiation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Descriptor {
    pub component: String,
    #[serde(default)]
    pub params: Params,
}

/// Ordered sequence of descriptors; order determines page layout
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TestMatrix {
    entries: Vec<Descriptor>,
}

impl TestMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, component: impl Into<String>, params: Params) {
        self.entries.push(Descriptor {
            component: component.into(),
            params,
        });
    }

    pub fn with(mut self, component: impl Into<String>, params: Params) -> Self {
        self.push(component, params);
        self
    }

    /// Matrix of every concrete component the policy admits, in
    /// enumeration order, with empty construction parameters.
    pub fn discover(registry: &Registry, root: &str, policy: &ExclusionPolicy) -> Result<Self> {
        let mut matrix = Self::new();
        for spec in registry.enumerate(root, policy)? {
            matrix.push(spec.qualified, Params::new());
        }
        Ok(matrix)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Descriptor> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Recorded instantiation, with the final merged parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixEntry {
    pub component: String,
    pub params: Params,
}

/// Typed record of what was assembled, read by the verifier.
///
/// Owned by the test and handed around next to the app handle, rather
/// than being bolted onto the application object itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TestContext {
    entries: Vec<MatrixEntry>,
}

impl TestContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, component: impl Into<String>, params: Params) {
        self.entries.push(MatrixEntry {
            component: component.into(),
            params,
        });
    }

    pub fn entries(&self) -> &[MatrixEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A component that could not be assembled
#[derive(Debug)]
pub struct AssemblyFailure {
    pub component: String,
    pub error: Error,
}

/// Aggregate outcome of one assembly pass
#[derive(Debug, Default)]
pub struct AssemblyReport {
    pub built: usize,
    pub failures: Vec<AssemblyFailure>,
}

impl AssemblyReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Assembled page plus its context and report
#[derive(Debug)]
pub struct Assembly {
    pub page: PageNode,
    pub context: TestContext,
    pub report: AssemblyReport,
}

/// Assemble a matrix into one page fragment.
///
/// The fixed control elements come first; subjects follow as siblings in
/// matrix order. Each subject's params gain a generated
/// `id-<qualified-name>` identifier unless an explicit `id` was supplied.
/// A descriptor whose id collides with an already-claimed one is rejected
/// and recorded, so the page never carries a duplicate id.
pub fn assemble(registry: &Registry, matrix: &TestMatrix) -> Assembly {
    let mut children = fixed_controls();
    let mut used_ids: Vec<String> = children
        .iter()
        .flat_map(|node| {
            node.elements_by_id()
                .into_iter()
                .map(|(id, _)| id.to_string())
                .collect::<Vec<_>>()
        })
        .collect();

    let mut context = TestContext::new();
    let mut report = AssemblyReport::default();

    for descriptor in matrix.iter() {
        match instantiate(registry, descriptor, &used_ids) {
            Ok((node, params, id)) => {
                debug!(component = %descriptor.component, %id, "assembled component");
                used_ids.push(id);
                children.push(node);
                context.record(&descriptor.component, params);
                report.built += 1;
            }
            Err(error) => {
                warn!(component = %descriptor.component, %error, "component failed to assemble");
                report.failures.push(AssemblyFailure {
                    component: descriptor.component.clone(),
                    error,
                });
            }
        }
    }

    Assembly {
        page: PageNode::fragment(children),
        context,
        report,
    }
}

fn instantiate(
    registry: &Registry,
    descriptor: &Descriptor,
    used_ids: &[String],
) -> Result<(PageNode, Params, String)> {
    let spec = registry
        .get(&descriptor.component)
        .ok_or_else(|| Error::UnknownComponent(descriptor.component.clone()))?;
    let factory = spec
        .factory
        .ok_or_else(|| Error::NotConcrete(descriptor.component.clone()))?;

    let mut params = descriptor.params.clone();
    let id = match params.str("id").map(str::to_string) {
        Some(explicit) => explicit,
        None => {
            let generated = format!("id-{}", spec.qualified);
            params.insert("id", generated.clone());
            generated
        }
    };
    if used_ids.iter().any(|used| *used == id) {
        return Err(Error::DuplicateId(id));
    }

    let node = factory(&params)?;
    Ok((node, params, id))
}

/// The utility elements every assembled page starts with: the session
/// token display, an icon, and a debounce-wrapped input.
fn fixed_controls() -> Vec<PageNode> {
    vec![
        Element::new("input")
            .attr("id", TOKEN_ID)
            .attr("type", "text")
            .token_attr("value")
            .flag("readonly")
            .into(),
        Element::new("span")
            .attr("id", ICON_ID)
            .attr("class", "icon")
            .attr("data-icon", "pencil")
            .into(),
        Element::new("div")
            .attr("class", "debounce")
            .attr("data-debounce-ms", "300")
            .child(
                Element::new("input")
                    .attr("id", DEBOUNCE_INPUT_ID)
                    .attr("type", "text"),
            )
            .into(),
    ]
}
