//! Page tree and HTML rendering
//!
//! A page is a rooted tree of nodes. The root produced by assembly is a
//! fragment: it groups children without rendering a wrapper of its own.
//! Attribute values are static strings except for the session-token
//! placeholder, which is substituted when the running app renders the page.

use std::collections::BTreeMap;

use crate::error::Result;
use crate::params::Params;

/// Attribute value on an element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    /// Literal value
    Static(String),
    /// Substituted with the app session token at render time
    SessionToken,
    /// Boolean attribute rendered as the bare attribute name
    Flag,
}

/// Context available while rendering a page
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    pub session_token: String,
}

/// A single element in the page tree
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    tag: String,
    attrs: BTreeMap<String, AttrValue>,
    children: Vec<PageNode>,
}

/// A node in the page tree
#[derive(Debug, Clone, PartialEq)]
pub enum PageNode {
    /// Groups children without a visible wrapper
    Fragment(Vec<PageNode>),
    Element(Element),
    Text(String),
}

// Elements with no closing tag
const VOID_TAGS: &[&str] = &["input", "img", "br", "hr", "meta", "link"];

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// Element carrying the mandatory `id` parameter
    pub fn with_id(tag: impl Into<String>, params: &Params) -> Result<Self> {
        Ok(Self::new(tag).attr("id", params.require_str("id")?))
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), AttrValue::Static(value.into()));
        self
    }

    pub fn flag(mut self, name: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), AttrValue::Flag);
        self
    }

    pub fn token_attr(mut self, name: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), AttrValue::SessionToken);
        self
    }

    pub fn child(mut self, node: impl Into<PageNode>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(PageNode::Text(text.into()))
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn id(&self) -> Option<&str> {
        match self.attrs.get("id") {
            Some(AttrValue::Static(v)) => Some(v),
            _ => None,
        }
    }

    pub fn get_attr(&self, name: &str) -> Option<&AttrValue> {
        self.attrs.get(name)
    }

    /// Attribute map as rendered, with the token substituted
    pub fn rendered_attrs(&self, ctx: &RenderContext) -> BTreeMap<String, String> {
        self.attrs
            .iter()
            .map(|(name, value)| {
                let rendered = match value {
                    AttrValue::Static(v) => v.clone(),
                    AttrValue::SessionToken => ctx.session_token.clone(),
                    AttrValue::Flag => String::new(),
                };
                (name.clone(), rendered)
            })
            .collect()
    }

    fn render_into(&self, out: &mut String, ctx: &RenderContext) {
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.attrs {
            out.push(' ');
            out.push_str(name);
            match value {
                AttrValue::Static(v) => {
                    out.push_str("=\"");
                    out.push_str(&escape_attr(v));
                    out.push('"');
                }
                AttrValue::SessionToken => {
                    out.push_str("=\"");
                    out.push_str(&escape_attr(&ctx.session_token));
                    out.push('"');
                }
                AttrValue::Flag => {}
            }
        }
        out.push('>');
        if VOID_TAGS.contains(&self.tag.as_str()) {
            return;
        }
        for child in &self.children {
            child.render_into(out, ctx);
        }
        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
    }
}

impl From<Element> for PageNode {
    fn from(el: Element) -> Self {
        PageNode::Element(el)
    }
}

impl PageNode {
    pub fn fragment(children: Vec<PageNode>) -> Self {
        PageNode::Fragment(children)
    }

    /// Render this subtree to HTML
    pub fn render(&self, ctx: &RenderContext) -> String {
        let mut out = String::new();
        self.render_into(&mut out, ctx);
        out
    }

    fn render_into(&self, out: &mut String, ctx: &RenderContext) {
        match self {
            PageNode::Fragment(children) => {
                for child in children {
                    child.render_into(out, ctx);
                }
            }
            PageNode::Element(el) => el.render_into(out, ctx),
            PageNode::Text(text) => out.push_str(&escape_text(text)),
        }
    }

    /// First element with the given id, in document order
    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        match self {
            PageNode::Fragment(children) => children.iter().find_map(|c| c.find_by_id(id)),
            PageNode::Element(el) => {
                if el.id() == Some(id) {
                    return Some(el);
                }
                el.children.iter().find_map(|c| c.find_by_id(id))
            }
            PageNode::Text(_) => None,
        }
    }

    /// Number of elements carrying the given id
    pub fn count_id(&self, id: &str) -> usize {
        match self {
            PageNode::Fragment(children) => children.iter().map(|c| c.count_id(id)).sum(),
            PageNode::Element(el) => {
                let own = usize::from(el.id() == Some(id));
                own + el.children.iter().map(|c| c.count_id(id)).sum::<usize>()
            }
            PageNode::Text(_) => 0,
        }
    }

    /// All identified elements in document order
    pub fn elements_by_id(&self) -> Vec<(&str, &Element)> {
        let mut out = Vec::new();
        self.collect_ids(&mut out);
        out
    }

    fn collect_ids<'a>(&'a self, out: &mut Vec<(&'a str, &'a Element)>) {
        match self {
            PageNode::Fragment(children) => {
                for child in children {
                    child.collect_ids(out);
                }
            }
            PageNode::Element(el) => {
                if let Some(id) = el.id() {
                    out.push((id, el));
                }
                for child in &el.children {
                    child.collect_ids(out);
                }
            }
            PageNode::Text(_) => {}
        }
    }
}

fn escape_text(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(input: &str) -> String {
    escape_text(input).replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> RenderContext {
        RenderContext {
            session_token: "tok-123".to_string(),
        }
    }

    #[test]
    fn renders_element_with_attrs_and_text() {
        let node: PageNode = Element::new("button")
            .attr("id", "button")
            .attr("type", "button")
            .text("Some button")
            .into();

        assert_eq!(
            node.render(&ctx()),
            r#"<button id="button" type="button">Some button</button>"#
        );
    }

    #[test]
    fn fragment_renders_without_wrapper() {
        let node = PageNode::fragment(vec![
            Element::new("span").attr("id", "a").into(),
            Element::new("span").attr("id", "b").into(),
        ]);
        assert_eq!(node.render(&ctx()), r#"<span id="a"></span><span id="b"></span>"#);
    }

    #[test]
    fn void_elements_have_no_closing_tag() {
        let node: PageNode = Element::new("input").attr("id", "test-input").into();
        assert_eq!(node.render(&ctx()), r#"<input id="test-input">"#);
    }

    #[test]
    fn session_token_substituted_at_render() {
        let node: PageNode = Element::new("input")
            .attr("id", "token")
            .token_attr("value")
            .flag("readonly")
            .into();

        let html = node.render(&ctx());
        assert!(html.contains(r#"value="tok-123""#));
        assert!(html.contains(" readonly"));
    }

    #[test]
    fn text_and_attrs_are_escaped() {
        let node: PageNode = Element::new("div")
            .attr("id", "x")
            .attr("title", r#"a"b<c"#)
            .text("1 < 2 & 3")
            .into();

        let html = node.render(&ctx());
        assert!(html.contains(r#"title="a&quot;b&lt;c""#));
        assert!(html.contains("1 &lt; 2 &amp; 3"));
    }

    #[test]
    fn find_and_count_by_id() {
        let page = PageNode::fragment(vec![
            Element::new("div")
                .attr("id", "outer")
                .child(Element::new("span").attr("id", "inner"))
                .into(),
            Element::new("span").attr("id", "inner").into(),
        ]);

        assert_eq!(page.find_by_id("outer").map(Element::tag), Some("div"));
        assert_eq!(page.find_by_id("inner").map(Element::tag), Some("span"));
        assert_eq!(page.count_id("inner"), 2);
        assert_eq!(page.count_id("missing"), 0);

        let ids: Vec<&str> = page.elements_by_id().into_iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["outer", "inner", "inner"]);
    }
}
