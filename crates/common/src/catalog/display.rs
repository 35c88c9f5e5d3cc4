//! Data display components

use crate::error::Result;
use crate::page::{Element, PageNode};
use crate::params::Params;
use crate::registry::ComponentSpec;
use crate::COMPONENT_ROOT;

pub(crate) fn specs() -> Vec<ComponentSpec> {
    vec![
        ComponentSpec::concrete("display.avatar", "avatar", "display", &[COMPONENT_ROOT], avatar),
        ComponentSpec::concrete("display.callout", "callout", "display", &[COMPONENT_ROOT], callout),
        ComponentSpec::concrete(
            "display.code-block",
            "code-block",
            "display",
            &[COMPONENT_ROOT],
            code_block,
        ),
        ComponentSpec::concrete("display.icon", "icon", "display", &[COMPONENT_ROOT], icon),
        ComponentSpec::concrete(
            "display.progress",
            "progress",
            "display",
            &[COMPONENT_ROOT],
            progress,
        ),
        ComponentSpec::concrete("display.spinner", "spinner", "display", &[COMPONENT_ROOT], spinner),
        ComponentSpec::abstract_base("display.list", "list", "display", &[COMPONENT_ROOT]),
        ComponentSpec::concrete(
            "display.ordered-list",
            "ordered-list",
            "display",
            &["display.list"],
            ordered_list,
        ),
        ComponentSpec::concrete(
            "display.unordered-list",
            "unordered-list",
            "display",
            &["display.list"],
            unordered_list,
        ),
        ComponentSpec::concrete(
            "display.list-item",
            "list-item",
            "display",
            &[COMPONENT_ROOT],
            list_item,
        ),
    ]
}

fn avatar(params: &Params) -> Result<PageNode> {
    let src = params.require_str("src")?;
    Ok(Element::with_id("img", params)?
        .attr("class", "avatar")
        .attr("src", src)
        .into())
}

fn callout(params: &Params) -> Result<PageNode> {
    let mut el = Element::with_id("div", params)?
        .attr("class", "callout")
        .attr("role", "note");
    if let Some(icon) = params.str("icon") {
        el = el.child(Element::new("span").attr("class", "icon").attr("data-icon", icon));
    }
    if let Some(text) = params.str("text") {
        el = el.text(text);
    }
    Ok(el.into())
}

fn code_block(params: &Params) -> Result<PageNode> {
    let code = params.str("code").unwrap_or_default();
    let mut el = Element::with_id("pre", params)?.attr("class", "code-block");
    if let Some(language) = params.str("language") {
        el = el.attr("data-language", language);
    }
    if params.bool("show_line_numbers").unwrap_or(false) {
        el = el.flag("data-line-numbers");
    }
    Ok(el.child(Element::new("code").text(code)).into())
}

fn icon(params: &Params) -> Result<PageNode> {
    let tag = params.str("tag").unwrap_or("circle");
    Ok(Element::with_id("span", params)?
        .attr("class", "icon")
        .attr("data-icon", tag)
        .into())
}

fn progress(params: &Params) -> Result<PageNode> {
    let mut el = Element::with_id("progress", params)?.attr("max", "100");
    if let Some(value) = params.u64("value") {
        el = el.attr("value", value.to_string());
    }
    Ok(el.into())
}

fn spinner(params: &Params) -> Result<PageNode> {
    Ok(Element::with_id("div", params)?
        .attr("class", "spinner")
        .attr("role", "status")
        .into())
}

fn ordered_list(params: &Params) -> Result<PageNode> {
    Ok(Element::with_id("ol", params)?.into())
}

fn unordered_list(params: &Params) -> Result<PageNode> {
    Ok(Element::with_id("ul", params)?.into())
}

fn list_item(params: &Params) -> Result<PageNode> {
    let text = params.str("text").unwrap_or_default();
    Ok(Element::with_id("li", params)?.text(text).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::RenderContext;

    #[test]
    fn avatar_requires_src() {
        assert!(avatar(&Params::new().with("id", "avatar")).is_err());
        let node = avatar(&Params::new().with("id", "avatar").with("src", "/logo.jpg")).unwrap();
        let html = node.render(&RenderContext::default());
        assert!(html.contains(r#"src="/logo.jpg""#));
    }

    #[test]
    fn code_block_escapes_source() {
        let node = code_block(
            &Params::new()
                .with("id", "codeblock")
                .with("code", "if n <= 1 { n } else { fib(n - 1) }")
                .with("language", "rust")
                .with("show_line_numbers", true),
        )
        .unwrap();
        let html = node.render(&RenderContext::default());
        assert!(html.contains("data-language=\"rust\""));
        assert!(html.contains(" data-line-numbers"));
        assert!(html.contains("n &lt;= 1"));
    }

    #[test]
    fn progress_propagates_value() {
        let node = progress(&Params::new().with("id", "progress-50-percent").with("value", 50u64))
            .unwrap();
        let html = node.render(&RenderContext::default());
        assert!(html.contains(r#"value="50""#));
        assert!(html.contains(r#"max="100""#));
    }
}
