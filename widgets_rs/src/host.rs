//! Minimal host-page model: elements addressed by [`NodeId`], each with an
//! `innerHTML`.
//!
//! This is what a host page looks like from a widget's side. The mount
//! pipeline only ever needs to check that an element is attached and to
//! replace its content.

use std::collections::HashMap;
use std::fmt;

/// Identity of an element in a [`HostDocument`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug)]
struct Element {
    tag: String,
    inner_html: String,
}

/// Elements owned by one host page.
#[derive(Debug, Default)]
pub struct HostDocument {
    elements: HashMap<NodeId, Element>,
    next_id: u64,
}

impl HostDocument {
    /// Empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty, attached element and returns its id.
    pub fn create_element(&mut self, tag: impl Into<String>) -> NodeId {
        self.next_id += 1;
        let id = NodeId(self.next_id);
        self.elements.insert(
            id,
            Element {
                tag: tag.into(),
                inner_html: String::new(),
            },
        );
        id
    }

    /// True while `node` is attached.
    pub fn contains(&self, node: NodeId) -> bool {
        self.elements.contains_key(&node)
    }

    /// Tag name of an attached element.
    pub fn tag(&self, node: NodeId) -> Option<&str> {
        self.elements.get(&node).map(|el| el.tag.as_str())
    }

    /// Current content of an attached element.
    pub fn inner_html(&self, node: NodeId) -> Option<&str> {
        self.elements.get(&node).map(|el| el.inner_html.as_str())
    }

    /// Replaces the content of `node`. Returns false if it is detached.
    pub fn set_inner_html(&mut self, node: NodeId, html: impl Into<String>) -> bool {
        match self.elements.get_mut(&node) {
            Some(el) => {
                el.inner_html = html.into();
                true
            }
            None => false,
        }
    }

    /// Detaches `node`. Ids are never reused.
    pub fn remove(&mut self, node: NodeId) -> bool {
        self.elements.remove(&node).is_some()
    }

    /// Number of attached elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// True when no element is attached.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
