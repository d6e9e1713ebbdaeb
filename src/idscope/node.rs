//! # Node Model
//!
//! The engine never walks a document itself. It talks to nodes through two
//! small traits:
//!
//! - [`Node`]: attribute get/set plus the one piece of type information the
//!   default policy needs (is this a label?),
//! - [`Tree`]: descendant selection by attribute presence.
//!
//! Attribute writes go through `&self`, the way DOM handles work: the engine
//! holds shared references to the nodes it is rewriting while decision
//! functions inspect them.
//!
//! [`Element`] is the bundled in-memory implementation. It serializes to JSON:
//!
//! ```json
//! { "tag": "label", "attributes": { "for": "email" }, "children": [] }
//! ```

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;

pub trait Node {
    fn attribute(&self, name: &str) -> Option<String>;

    fn set_attribute(&self, name: &str, value: &str);

    /// Whether the node is a label-type element.
    fn is_label(&self) -> bool;
}

pub trait Tree: Node + Sized {
    /// Descendants (not `self`) carrying at least one of `names`, in document
    /// order.
    fn select(&self, names: &IndexSet<String>) -> Vec<&Self>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub tag: String,
    #[serde(default, skip_serializing_if = "attributes_empty")]
    attributes: RefCell<IndexMap<String, String>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Element>,
}

fn attributes_empty(attributes: &RefCell<IndexMap<String, String>>) -> bool {
    attributes.borrow().is_empty()
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    pub fn with_attr(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.borrow_mut().insert(name.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn child(&self, index: usize) -> Option<&Element> {
        self.children.get(index)
    }

    /// Attributes in insertion order.
    pub fn attributes(&self) -> Vec<(String, String)> {
        self.attributes
            .borrow()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub fn has_any(&self, names: &IndexSet<String>) -> bool {
        let attributes = self.attributes.borrow();
        names.iter().any(|name| attributes.contains_key(name))
    }

    /// Pre-order walk over every descendant.
    pub fn descendants(&self) -> Vec<&Element> {
        let mut out = Vec::new();
        let mut stack: Vec<&Element> = self.children.iter().rev().collect();
        while let Some(el) = stack.pop() {
            out.push(el);
            stack.extend(el.children.iter().rev());
        }
        out
    }
}

impl Node for Element {
    fn attribute(&self, name: &str) -> Option<String> {
        self.attributes.borrow().get(name).cloned()
    }

    fn set_attribute(&self, name: &str, value: &str) {
        self.attributes
            .borrow_mut()
            .insert(name.to_string(), value.to_string());
    }

    fn is_label(&self) -> bool {
        self.tag.eq_ignore_ascii_case("label")
    }
}

impl Tree for Element {
    fn select(&self, names: &IndexSet<String>) -> Vec<&Self> {
        self.descendants()
            .into_iter()
            .filter(|el| el.has_any(names))
            .collect()
    }
}
