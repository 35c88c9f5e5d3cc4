//! The built-in component catalog
//!
//! Each submodule contributes its registry entries through `specs()`.
//! `install` seeds the process-wide registry once; `registry` builds a
//! private one, which tests prefer.

pub mod disclosure;
pub mod display;
pub mod forms;
pub mod layout;
pub mod table;

use std::sync::Once;

use serde_json::json;
use tracing::warn;

use crate::assemble::TestMatrix;
use crate::error::Result;
use crate::params::Params;
use crate::registry::{self, ComponentSpec, Registry};
use crate::COMPONENT_ROOT;

fn entries() -> Vec<ComponentSpec> {
    let mut specs = vec![ComponentSpec::abstract_base(
        COMPONENT_ROOT,
        "component",
        "core",
        &[],
    )];
    specs.extend(forms::specs());
    specs.extend(layout::specs());
    specs.extend(display::specs());
    specs.extend(table::specs());
    specs.extend(disclosure::specs());
    specs
}

/// Register the catalog into the given registry
pub fn install_into(registry: &mut Registry) -> Result<()> {
    for spec in entries() {
        registry.register(spec)?;
    }
    Ok(())
}

/// Fresh private registry holding the full catalog
pub fn registry() -> Registry {
    let mut reg = Registry::new();
    // entries() carries no duplicates, so this cannot fail on a fresh registry
    if let Err(error) = install_into(&mut reg) {
        warn!(%error, "catalog entry skipped");
    }
    reg
}

static INSTALL: Once = Once::new();

/// Seed the process-wide registry with the catalog. Idempotent; entries
/// already claimed by earlier registrations are skipped with a warning.
pub fn install() {
    INSTALL.call_once(|| {
        for spec in entries() {
            if let Err(error) = registry::register_global(spec) {
                warn!(%error, "catalog entry skipped");
            }
        }
    });
}

/// The hand-picked matrix covering the whole catalog, with the
/// parameters each component needs to build. Ids follow the showcase
/// page conventions.
pub fn showcase_matrix() -> TestMatrix {
    let mut matrix = TestMatrix::new();

    matrix.push("table.table", Params::new().with("id", "test-table"));
    matrix.push("table.header", Params::new().with("id", "test-table-header"));
    matrix.push(
        "table.column-header-cell",
        Params::new()
            .with("id", "test-table-column-header-cell")
            .with("text", "Column Header"),
    );
    matrix.push("table.body", Params::new().with("id", "test-table-body"));
    matrix.push("table.row", Params::new().with("id", "test-table-row"));
    matrix.push(
        "table.row-header-cell",
        Params::new().with("id", "row-header-cell").with("text", "Row Header"),
    );
    matrix.push(
        "table.cell",
        Params::new().with("id", "row-1-col-1").with("text", "Row 1, Column 1"),
    );

    matrix.push(
        "display.icon",
        Params::new().with("id", "icon-pencil").with("tag", "pencil"),
    );
    matrix.push(
        "display.callout",
        Params::new()
            .with("id", "callout")
            .with("icon", "info")
            .with(
                "text",
                "You will need admin privileges to install and access this application.",
            ),
    );
    matrix.push(
        "display.code-block",
        Params::new()
            .with("id", "codeblock")
            .with("language", "rust")
            .with("show_line_numbers", true)
            .with(
                "code",
                "fn fib(n: u64) -> u64 {\n    if n <= 1 { n } else { fib(n - 1) + fib(n - 2) }\n}",
            ),
    );
    matrix.push(
        "display.avatar",
        Params::new().with("id", "avatar").with("src", "/logo.jpg"),
    );
    matrix.push("layout.flex", Params::new().with("id", "flex"));
    matrix.push("display.ordered-list", Params::new().with("id", "olist"));
    matrix.push(
        "display.list-item",
        Params::new().with("id", "olist-item1").with("text", "Item1"),
    );
    matrix.push("display.unordered-list", Params::new().with("id", "ulist"));
    matrix.push(
        "display.progress",
        Params::new().with("id", "progress-50-percent").with("value", 50u64),
    );
    matrix.push("layout.scroll-area", Params::new().with("id", "scrollarea"));
    matrix.push("display.spinner", Params::new().with("id", "spinner"));

    matrix.push("disclosure.accordion", Params::new().with("id", "accordeon"));
    matrix.push(
        "disclosure.accordion-item",
        Params::new()
            .with("id", "accordeon-item")
            .with("header", "First Item")
            .with("content", "The first accordion item's content"),
    );
    matrix.push("disclosure.tabs", Params::new().with("id", "tabs"));
    matrix.push("disclosure.tab-list", Params::new().with("id", "tabs-list"));
    matrix.push(
        "disclosure.tab-trigger",
        Params::new()
            .with("id", "tabs-trigger-1")
            .with("value", "tab1")
            .with("text", "Tab 1"),
    );
    matrix.push(
        "disclosure.tab-content",
        Params::new()
            .with("id", "tabs-content-1")
            .with("value", "tab1")
            .with("text", "item on tab 1"),
    );

    matrix.push("form.form", Params::new().with("id", "form"));
    matrix.push(
        "form.button",
        Params::new().with("id", "button").with("text", "Some button"),
    );
    matrix.push(
        "form.checkbox",
        Params::new().with("id", "checkbox").with("default_checked", true),
    );
    matrix.push("form.input", Params::new().with("id", "test-input"));
    matrix.push(
        "form.radio",
        Params::new()
            .with("id", "radio")
            .with("options", json!(["1", "2", "3"]))
            .with("default_value", "1"),
    );
    matrix.push(
        "form.select",
        Params::new()
            .with("id", "select")
            .with("options", json!(["Apple", "Orange", "Banana", "Grape", "Pear"])),
    );
    matrix.push(
        "form.slider",
        Params::new().with("id", "slider").with("default_value", 40u64),
    );
    matrix.push(
        "form.switch",
        Params::new().with("id", "switch").with("default_checked", true),
    );
    matrix.push(
        "form.textarea",
        Params::new().with("id", "textarea").with("placeholder", "type here..."),
    );
    matrix.push("form.upload", Params::new().with("id", "upload"));

    matrix
}
