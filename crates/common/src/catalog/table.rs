//! Table family
//!
//! Rendered as role-annotated divs so instances stay valid DOM nodes when
//! composed as page-level siblings (a bare `<tr>` outside a table is
//! dropped by the HTML parser).

use crate::error::Result;
use crate::page::{Element, PageNode};
use crate::params::Params;
use crate::registry::ComponentSpec;
use crate::COMPONENT_ROOT;

pub(crate) fn specs() -> Vec<ComponentSpec> {
    vec![
        ComponentSpec::concrete("table.table", "table", "table", &[COMPONENT_ROOT], table),
        ComponentSpec::concrete("table.header", "header", "table", &[COMPONENT_ROOT], header),
        ComponentSpec::concrete("table.body", "body", "table", &[COMPONENT_ROOT], body),
        ComponentSpec::concrete("table.row", "row", "table", &[COMPONENT_ROOT], row),
        ComponentSpec::concrete("table.cell", "cell", "table", &[COMPONENT_ROOT], cell),
        ComponentSpec::concrete(
            "table.column-header-cell",
            "column-header-cell",
            "table",
            &["table.cell"],
            column_header_cell,
        ),
        ComponentSpec::concrete(
            "table.row-header-cell",
            "row-header-cell",
            "table",
            &["table.cell"],
            row_header_cell,
        ),
    ]
}

fn table(params: &Params) -> Result<PageNode> {
    Ok(Element::with_id("div", params)?
        .attr("class", "table")
        .attr("role", "table")
        .into())
}

fn header(params: &Params) -> Result<PageNode> {
    Ok(Element::with_id("div", params)?
        .attr("class", "table-header")
        .attr("role", "rowgroup")
        .into())
}

fn body(params: &Params) -> Result<PageNode> {
    Ok(Element::with_id("div", params)?
        .attr("class", "table-body")
        .attr("role", "rowgroup")
        .into())
}

fn row(params: &Params) -> Result<PageNode> {
    Ok(Element::with_id("div", params)?.attr("role", "row").into())
}

fn cell(params: &Params) -> Result<PageNode> {
    let text = params.str("text").unwrap_or_default();
    Ok(Element::with_id("div", params)?
        .attr("role", "cell")
        .text(text)
        .into())
}

fn column_header_cell(params: &Params) -> Result<PageNode> {
    let text = params.str("text").unwrap_or_default();
    Ok(Element::with_id("div", params)?
        .attr("role", "columnheader")
        .text(text)
        .into())
}

fn row_header_cell(params: &Params) -> Result<PageNode> {
    let text = params.str("text").unwrap_or_default();
    Ok(Element::with_id("div", params)?
        .attr("role", "rowheader")
        .text(text)
        .into())
}
