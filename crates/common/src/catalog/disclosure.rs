//! Disclosure components: accordion and tabs

use crate::error::Result;
use crate::page::{Element, PageNode};
use crate::params::Params;
use crate::registry::ComponentSpec;
use crate::COMPONENT_ROOT;

pub(crate) fn specs() -> Vec<ComponentSpec> {
    vec![
        ComponentSpec::concrete(
            "disclosure.accordion",
            "accordion",
            "disclosure",
            &[COMPONENT_ROOT],
            accordion,
        ),
        ComponentSpec::concrete(
            "disclosure.accordion-item",
            "accordion-item",
            "disclosure",
            &[COMPONENT_ROOT],
            accordion_item,
        ),
        ComponentSpec::concrete("disclosure.tabs", "tabs", "disclosure", &[COMPONENT_ROOT], tabs),
        ComponentSpec::concrete(
            "disclosure.tab-list",
            "tab-list",
            "disclosure",
            &[COMPONENT_ROOT],
            tab_list,
        ),
        ComponentSpec::concrete(
            "disclosure.tab-trigger",
            "tab-trigger",
            "disclosure",
            &[COMPONENT_ROOT],
            tab_trigger,
        ),
        ComponentSpec::concrete(
            "disclosure.tab-content",
            "tab-content",
            "disclosure",
            &[COMPONENT_ROOT],
            tab_content,
        ),
    ]
}

fn accordion(params: &Params) -> Result<PageNode> {
    Ok(Element::with_id("div", params)?
        .attr("class", "accordion")
        .into())
}

fn accordion_item(params: &Params) -> Result<PageNode> {
    let header = params.require_str("header")?;
    let content = params.require_str("content")?;
    Ok(Element::with_id("details", params)?
        .child(Element::new("summary").text(header))
        .child(Element::new("div").attr("class", "accordion-content").text(content))
        .into())
}

fn tabs(params: &Params) -> Result<PageNode> {
    Ok(Element::with_id("div", params)?.attr("class", "tabs").into())
}

fn tab_list(params: &Params) -> Result<PageNode> {
    Ok(Element::with_id("div", params)?.attr("role", "tablist").into())
}

fn tab_trigger(params: &Params) -> Result<PageNode> {
    let value = params.require_str("value")?;
    let text = params.str("text").unwrap_or(value);
    Ok(Element::with_id("button", params)?
        .attr("type", "button")
        .attr("role", "tab")
        .attr("data-value", value)
        .text(text)
        .into())
}

fn tab_content(params: &Params) -> Result<PageNode> {
    let value = params.require_str("value")?;
    let text = params.str("text").unwrap_or_default();
    Ok(Element::with_id("div", params)?
        .attr("role", "tabpanel")
        .attr("data-value", value)
        .text(text)
        .into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::RenderContext;

    #[test]
    fn accordion_item_requires_header_and_content() {
        assert!(accordion_item(&Params::new().with("id", "accordeon-item")).is_err());

        let node = accordion_item(
            &Params::new()
                .with("id", "accordeon-item")
                .with("header", "First Item")
                .with("content", "The first accordion item's content"),
        )
        .unwrap();
        let html = node.render(&RenderContext::default());
        assert!(html.contains("<summary>First Item</summary>"));
        assert!(html.contains("The first accordion item's content"));
    }

    #[test]
    fn tab_trigger_requires_value() {
        assert!(tab_trigger(&Params::new().with("id", "tabs-trigger-1")).is_err());

        let node = tab_trigger(
            &Params::new()
                .with("id", "tabs-trigger-1")
                .with("value", "tab1")
                .with("text", "Tab 1"),
        )
        .unwrap();
        let html = node.render(&RenderContext::default());
        assert!(html.contains(r#"data-value="tab1""#));
        assert!(html.contains(">Tab 1</button>"));
    }
}
