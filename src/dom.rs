//! DOM abstraction the selector synthesizer walks over
//!
//! The synthesizer never touches a concrete DOM. It reads nodes through
//! [`DomTree`] and asks document-wide questions through the [`SelectorCounter`]
//! and [`SelectorResolver`] capabilities, so the same walk runs against parsed
//! HTML pages and against hand-built [`DomArena`] trees.

use anyhow::Result;
use std::fmt::Debug;

use crate::escape::unescape_identifier;

/// A view of a single DOM node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRef<'a> {
    /// Markup tag
    Element(ElementView<'a>),
    /// Character data
    Text,
    /// Root of a document tree
    Document,
    /// Comments, doctypes, processing instructions, fragments
    Other,
    /// No node at all (e.g. the parent of a detached root)
    Absent,
}

/// The element attributes the synthesizer reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementView<'a> {
    /// Tag name as stored in the tree
    pub tag: &'a str,
    /// Value of the `id` attribute, if present (may be empty)
    pub id: Option<&'a str>,
}

impl<'a> ElementView<'a> {
    /// The id, if it is present and non-empty
    pub fn non_empty_id(&self) -> Option<&'a str> {
        self.id.filter(|id| !id.is_empty())
    }
}

impl<'a> NodeRef<'a> {
    pub fn as_element(&self) -> Option<ElementView<'a>> {
        match self {
            NodeRef::Element(el) => Some(*el),
            _ => None,
        }
    }

    /// Short name of the node kind, used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            NodeRef::Element(_) => "element",
            NodeRef::Text => "text",
            NodeRef::Document => "document",
            NodeRef::Other => "other",
            NodeRef::Absent => "absent",
        }
    }
}

/// Read-only access to a DOM tree
pub trait DomTree {
    /// Opaque node handle
    type Handle: Copy + Eq + Debug;

    fn node(&self, handle: Self::Handle) -> NodeRef<'_>;

    fn parent(&self, handle: Self::Handle) -> Option<Self::Handle>;

    /// Child nodes of every kind, in document order
    fn children(&self, handle: Self::Handle) -> Vec<Self::Handle>;

    fn resolve(&self, handle: Option<Self::Handle>) -> NodeRef<'_> {
        match handle {
            Some(h) => self.node(h),
            None => NodeRef::Absent,
        }
    }

    /// Element children only, in document order
    fn element_children(&self, handle: Self::Handle) -> Vec<Self::Handle> {
        self.children(handle)
            .into_iter()
            .filter(|&child| matches!(self.node(child), NodeRef::Element(_)))
            .collect()
    }

    /// Whether the node hangs off a document root
    fn is_connected(&self, handle: Self::Handle) -> bool {
        let mut current = handle;
        while let Some(parent) = self.parent(current) {
            current = parent;
        }
        matches!(self.node(current), NodeRef::Document)
    }
}

/// Counts the elements of the whole document matching a CSS selector
pub trait SelectorCounter {
    fn count_matching(&self, selector: &str) -> usize;
}

impl<F> SelectorCounter for F
where
    F: Fn(&str) -> usize,
{
    fn count_matching(&self, selector: &str) -> usize {
        self(selector)
    }
}

/// Resolves a CSS selector to the matching elements of a document
pub trait SelectorResolver: DomTree {
    fn select_all(&self, selector: &str) -> Result<Vec<Self::Handle>>;
}

/// Handle into a [`DomArena`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArenaId(usize);

#[derive(Debug)]
enum ArenaData {
    Document,
    Element { tag: String, id: Option<String> },
    Text,
    Comment,
}

#[derive(Debug)]
struct ArenaNode {
    data: ArenaData,
    parent: Option<ArenaId>,
    children: Vec<ArenaId>,
}

/// In-memory DOM tree
///
/// Nodes are created detached and attached with [`DomArena::append_child`],
/// which makes it easy to build connected documents as well as orphaned
/// subtrees.
#[derive(Debug)]
pub struct DomArena {
    nodes: Vec<ArenaNode>,
}

impl Default for DomArena {
    fn default() -> Self {
        Self::new()
    }
}

impl DomArena {
    /// Create an arena holding only a document node
    pub fn new() -> Self {
        DomArena {
            nodes: vec![ArenaNode {
                data: ArenaData::Document,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    pub fn document(&self) -> ArenaId {
        ArenaId(0)
    }

    pub fn create_element(&mut self, tag: &str, id: Option<&str>) -> ArenaId {
        self.push(ArenaData::Element {
            tag: tag.to_string(),
            id: id.map(str::to_string),
        })
    }

    pub fn create_text(&mut self) -> ArenaId {
        self.push(ArenaData::Text)
    }

    pub fn create_comment(&mut self) -> ArenaId {
        self.push(ArenaData::Comment)
    }

    /// Move `child` to the end of `parent`'s child list
    pub fn append_child(&mut self, parent: ArenaId, child: ArenaId) -> Result<()> {
        self.check(parent)?;
        self.check(child)?;
        if child == self.document() {
            anyhow::bail!("The document node cannot be appended");
        }

        let mut ancestor = Some(parent);
        while let Some(a) = ancestor {
            if a == child {
                anyhow::bail!("Appending {:?} to {:?} would create a cycle", child, parent);
            }
            ancestor = self.nodes[a.0].parent;
        }

        self.detach(child)?;
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
        Ok(())
    }

    /// Create an element and append it to `parent` in one step
    pub fn append_element(
        &mut self,
        parent: ArenaId,
        tag: &str,
        id: Option<&str>,
    ) -> Result<ArenaId> {
        let el = self.create_element(tag, id);
        self.append_child(parent, el)?;
        Ok(el)
    }

    /// Remove a node (and its subtree) from its parent
    pub fn detach(&mut self, node: ArenaId) -> Result<()> {
        self.check(node)?;
        if let Some(parent) = self.nodes[node.0].parent.take() {
            self.nodes[parent.0].children.retain(|&c| c != node);
        }
        Ok(())
    }

    /// Connected elements whose id equals `id`
    pub fn elements_with_id(&self, id: &str) -> Vec<ArenaId> {
        (0..self.nodes.len())
            .map(ArenaId)
            .filter(|&h| match &self.nodes[h.0].data {
                ArenaData::Element { id: Some(own), .. } => own == id,
                _ => false,
            })
            .filter(|&h| self.is_connected(h))
            .collect()
    }

    fn push(&mut self, data: ArenaData) -> ArenaId {
        self.nodes.push(ArenaNode {
            data,
            parent: None,
            children: Vec::new(),
        });
        ArenaId(self.nodes.len() - 1)
    }

    fn check(&self, node: ArenaId) -> Result<()> {
        if node.0 >= self.nodes.len() {
            anyhow::bail!("Unknown node {:?}", node);
        }
        Ok(())
    }
}

impl DomTree for DomArena {
    type Handle = ArenaId;

    fn node(&self, handle: ArenaId) -> NodeRef<'_> {
        match self.nodes.get(handle.0).map(|n| &n.data) {
            Some(ArenaData::Document) => NodeRef::Document,
            Some(ArenaData::Element { tag, id }) => NodeRef::Element(ElementView {
                tag,
                id: id.as_deref(),
            }),
            Some(ArenaData::Text) => NodeRef::Text,
            Some(ArenaData::Comment) => NodeRef::Other,
            None => NodeRef::Absent,
        }
    }

    fn parent(&self, handle: ArenaId) -> Option<ArenaId> {
        self.nodes.get(handle.0).and_then(|n| n.parent)
    }

    fn children(&self, handle: ArenaId) -> Vec<ArenaId> {
        self.nodes
            .get(handle.0)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }
}

/// The arena only understands `#id` selectors; anything else matches nothing.
impl SelectorCounter for DomArena {
    fn count_matching(&self, selector: &str) -> usize {
        match selector.strip_prefix('#') {
            Some(escaped) => self.elements_with_id(&unescape_identifier(escaped)).len(),
            None => 0,
        }
    }
}

#[cfg(test)]
#[path = "dom_test.rs"]
mod dom_test;
