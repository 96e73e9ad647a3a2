//! Parsed HTML documents
//!
//! [`HtmlPage`] wraps an html5ever-parsed `scraper::Html` and exposes it through
//! the traits in [`crate::dom`]. CSS lookups go through scraper's selector
//! engine.

use anyhow::Result;
use ego_tree::NodeId;
use scraper::{ElementRef, Html, Node, Selector};
use tracing::debug;

use crate::dom::{DomTree, ElementView, NodeRef, SelectorCounter, SelectorResolver};
use crate::errors::CssprobeError;

/// A parsed HTML document
pub struct HtmlPage {
    html: Html,
}

impl HtmlPage {
    /// Parse a full document (missing `html`/`head`/`body` are synthesized)
    pub fn parse(source: &str) -> Self {
        let html = Html::parse_document(source);
        if !html.errors.is_empty() {
            debug!("Parsed document with {} recoverable errors", html.errors.len());
        }
        HtmlPage { html }
    }

    /// Handle of the document node
    pub fn document(&self) -> NodeId {
        self.html.tree.root().id()
    }

    /// Elements matching `css`, in document order
    pub fn find_all(&self, css: &str) -> Result<Vec<NodeId>> {
        let selector = parse_selector(css)?;
        Ok(self.html.select(&selector).map(|el| el.id()).collect())
    }

    /// Tag name of an element handle
    pub fn tag_name(&self, handle: NodeId) -> Option<&str> {
        self.node(handle).as_element().map(|el| el.tag)
    }

    /// Collapsed text content of an element
    pub fn text_content(&self, handle: NodeId) -> Option<String> {
        let node = self.html.tree.get(handle)?;
        let element = ElementRef::wrap(node)?;
        let text = element.text().collect::<Vec<_>>().join(" ");
        let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
        (!collapsed.is_empty()).then_some(collapsed)
    }
}

fn parse_selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| {
        CssprobeError::InvalidSelector(format!("Invalid CSS selector '{}': {}", css, e)).into()
    })
}

impl DomTree for HtmlPage {
    type Handle = NodeId;

    fn node(&self, handle: NodeId) -> NodeRef<'_> {
        let Some(node) = self.html.tree.get(handle) else {
            return NodeRef::Absent;
        };

        match node.value() {
            Node::Element(el) => NodeRef::Element(ElementView {
                tag: el.name(),
                id: el.attr("id"),
            }),
            Node::Text(_) => NodeRef::Text,
            Node::Document => NodeRef::Document,
            _ => NodeRef::Other,
        }
    }

    fn parent(&self, handle: NodeId) -> Option<NodeId> {
        self.html.tree.get(handle)?.parent().map(|p| p.id())
    }

    fn children(&self, handle: NodeId) -> Vec<NodeId> {
        self.html
            .tree
            .get(handle)
            .map(|node| node.children().map(|c| c.id()).collect())
            .unwrap_or_default()
    }
}

/// Selectors that fail to parse match nothing
impl SelectorCounter for HtmlPage {
    fn count_matching(&self, selector: &str) -> usize {
        match parse_selector(selector) {
            Ok(sel) => self.html.select(&sel).count(),
            Err(e) => {
                debug!("{}", e);
                0
            }
        }
    }
}

impl SelectorResolver for HtmlPage {
    fn select_all(&self, selector: &str) -> Result<Vec<NodeId>> {
        self.find_all(selector)
    }
}

#[cfg(test)]
#[path = "page_test.rs"]
mod page_test;
