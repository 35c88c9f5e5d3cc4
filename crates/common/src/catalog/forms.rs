//! Form controls

use crate::error::Result;
use crate::page::{Element, PageNode};
use crate::params::Params;
use crate::registry::ComponentSpec;
use crate::COMPONENT_ROOT;

pub(crate) fn specs() -> Vec<ComponentSpec> {
    vec![
        ComponentSpec::concrete("form.form", "form", "form", &[COMPONENT_ROOT], form),
        ComponentSpec::concrete("form.button", "button", "form", &[COMPONENT_ROOT], button),
        ComponentSpec::abstract_base("form.field", "field", "form", &[COMPONENT_ROOT]),
        ComponentSpec::concrete("form.input", "input", "form", &["form.field"], input),
        ComponentSpec::concrete(
            "form.debounce-input",
            "debounce-input",
            "form",
            &["form.input"],
            debounce_input,
        ),
        ComponentSpec::concrete("form.checkbox", "checkbox", "form", &["form.field"], checkbox),
        ComponentSpec::concrete("form.switch", "switch", "form", &["form.field"], switch),
        ComponentSpec::concrete("form.radio", "radio", "form", &["form.field"], radio),
        ComponentSpec::concrete("form.slider", "slider", "form", &["form.field"], slider),
        ComponentSpec::concrete("form.select", "select", "form", &["form.field"], select),
        ComponentSpec::concrete("form.textarea", "textarea", "form", &["form.field"], textarea),
        ComponentSpec::concrete("form.upload", "upload", "form", &["form.field"], upload),
    ]
}

fn form(params: &Params) -> Result<PageNode> {
    Ok(Element::with_id("form", params)?.into())
}

fn button(params: &Params) -> Result<PageNode> {
    let text = params.str("text").unwrap_or("Button");
    Ok(Element::with_id("button", params)?
        .attr("type", "button")
        .text(text)
        .into())
}

fn input(params: &Params) -> Result<PageNode> {
    let mut el = Element::with_id("input", params)?.attr("type", "text");
    if let Some(value) = params.str("value") {
        el = el.attr("value", value);
    }
    if let Some(placeholder) = params.str("placeholder") {
        el = el.attr("placeholder", placeholder);
    }
    if params.bool("read_only").unwrap_or(false) {
        el = el.flag("readonly");
    }
    Ok(el.into())
}

/// The id lands on the inner input; the wrapper only carries the
/// debounce interval.
fn debounce_input(params: &Params) -> Result<PageNode> {
    let ms = params.u64("debounce_ms").unwrap_or(300);
    let inner = Element::with_id("input", params)?.attr("type", "text");
    Ok(Element::new("div")
        .attr("class", "debounce")
        .attr("data-debounce-ms", ms.to_string())
        .child(inner)
        .into())
}

fn checkbox(params: &Params) -> Result<PageNode> {
    let mut el = Element::with_id("input", params)?.attr("type", "checkbox");
    if params.bool("default_checked").unwrap_or(false) {
        el = el.flag("checked");
    }
    Ok(el.into())
}

fn switch(params: &Params) -> Result<PageNode> {
    let checked = params.bool("default_checked").unwrap_or(false);
    Ok(Element::with_id("button", params)?
        .attr("type", "button")
        .attr("role", "switch")
        .attr("aria-checked", checked.to_string())
        .into())
}

fn radio(params: &Params) -> Result<PageNode> {
    let options = params.require_str_list("options")?;
    let name = params.require_str("id")?.to_string();
    let default = params.str("default_value").map(str::to_string);
    let mut group = Element::with_id("div", params)?.attr("role", "radiogroup");
    for option in options {
        let mut item = Element::new("input")
            .attr("type", "radio")
            .attr("name", name.clone())
            .attr("value", option);
        if default.as_deref() == Some(option) {
            item = item.flag("checked");
        }
        group = group.child(Element::new("label").child(item).text(option));
    }
    Ok(group.into())
}

fn slider(params: &Params) -> Result<PageNode> {
    let mut el = Element::with_id("input", params)?.attr("type", "range");
    if let Some(value) = params.u64("default_value") {
        el = el.attr("value", value.to_string());
    }
    Ok(el.into())
}

fn select(params: &Params) -> Result<PageNode> {
    let options = if params.contains("options") {
        params.require_str_list("options")?
    } else {
        Vec::new()
    };
    let mut el = Element::with_id("select", params)?;
    for option in options {
        el = el.child(Element::new("option").attr("value", option).text(option));
    }
    Ok(el.into())
}

fn textarea(params: &Params) -> Result<PageNode> {
    let mut el = Element::with_id("textarea", params)?;
    if let Some(placeholder) = params.str("placeholder") {
        el = el.attr("placeholder", placeholder);
    }
    Ok(el.into())
}

fn upload(params: &Params) -> Result<PageNode> {
    Ok(Element::with_id("input", params)?.attr("type", "file").into())
}
