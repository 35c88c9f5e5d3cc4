//! Layout containers

use crate::error::Result;
use crate::page::{Element, PageNode};
use crate::params::Params;
use crate::registry::ComponentSpec;
use crate::COMPONENT_ROOT;

pub(crate) fn specs() -> Vec<ComponentSpec> {
    vec![
        ComponentSpec::concrete("layout.flex", "flex", "layout", &[COMPONENT_ROOT], flex),
        ComponentSpec::concrete(
            "layout.scroll-area",
            "scroll-area",
            "layout",
            &[COMPONENT_ROOT],
            scroll_area,
        ),
    ]
}

fn flex(params: &Params) -> Result<PageNode> {
    Ok(Element::with_id("div", params)?.attr("class", "flex").into())
}

fn scroll_area(params: &Params) -> Result<PageNode> {
    Ok(Element::with_id("div", params)?
        .attr("class", "scroll-area")
        .into())
}
