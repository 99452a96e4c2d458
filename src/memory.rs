//! In-memory document
//!
//! A flat arena of elements with parent links, enough to stand in for the
//! sidebar markup when no browser is available. Hrefs are resolved against
//! the document location the way a browser resolves `HTMLAnchorElement.href`.

use std::collections::{BTreeMap, BTreeSet};

use url::Url;

use crate::error::{NavError, NavResult};
use crate::selector::{Selector, SimpleSelector};
use crate::view::View;

/// Handle to an element inside a [`MemoryView`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// An element description used to populate a [`MemoryView`]
#[derive(Debug, Clone, Default)]
pub struct MemoryElement {
    pub tag: String,
    pub id: Option<String>,
    pub classes: BTreeSet<String>,
    pub attributes: BTreeMap<String, String>,
    parent: Option<NodeId>,
}

impl MemoryElement {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_class(mut self, token: &str) -> Self {
        self.classes.insert(token.to_string());
        self
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    /// Anchor element pointing at `href`
    pub fn link(href: &str) -> Self {
        Self::new("a").with_attr("href", href)
    }

    fn matches(&self, part: &SimpleSelector) -> bool {
        match part {
            SimpleSelector::Tag(tag) => &self.tag == tag,
            SimpleSelector::Id(id) => self.id.as_deref() == Some(id.as_str()),
            SimpleSelector::Class(class) => self.classes.contains(class),
        }
    }
}

/// A document held entirely in memory
#[derive(Debug, Clone)]
pub struct MemoryView {
    location: Url,
    elements: Vec<MemoryElement>,
}

impl MemoryView {
    /// Create an empty document located at an absolute URL
    pub fn new(location: &str) -> NavResult<Self> {
        Ok(Self {
            location: parse_location(location)?,
            elements: Vec::new(),
        })
    }

    /// Add a top-level element
    pub fn insert(&mut self, element: MemoryElement) -> NodeId {
        self.push(element, None)
    }

    /// Add an element nested inside `parent`
    pub fn insert_child(&mut self, parent: NodeId, element: MemoryElement) -> NodeId {
        self.push(element, Some(parent))
    }

    fn push(&mut self, mut element: MemoryElement, parent: Option<NodeId>) -> NodeId {
        element.parent = parent;
        self.elements.push(element);
        NodeId(self.elements.len() - 1)
    }

    /// Move the document to another URL, relative ones resolve against the current location
    pub fn navigate(&mut self, location: &str) -> NavResult<()> {
        self.location = self
            .location
            .join(location)
            .map_err(|source| NavError::InvalidLocation {
                location: location.to_string(),
                source,
            })?;
        Ok(())
    }

    pub fn location(&self) -> &Url {
        &self.location
    }

    pub fn get(&self, node: NodeId) -> &MemoryElement {
        &self.elements[node.0]
    }

    /// Ids of all elements currently carrying `token`
    pub fn ids_with_class(&self, token: &str) -> Vec<String> {
        self.elements
            .iter()
            .filter(|element| element.classes.contains(token))
            .filter_map(|element| element.id.clone())
            .collect()
    }

    fn ancestors(&self, node: NodeId) -> impl Iterator<Item = &MemoryElement> + '_ {
        let mut next = self.elements[node.0].parent;
        std::iter::from_fn(move || {
            let current = next?;
            let element = &self.elements[current.0];
            next = element.parent;
            Some(element)
        })
    }

    fn selector_matches(&self, node: NodeId, selector: &Selector) -> bool {
        if !self.elements[node.0].matches(selector.subject()) {
            return false;
        }

        // Descendant combinators only, so the nearest satisfying ancestor is always safe to take
        let mut ancestors = self.ancestors(node);
        selector
            .ancestors()
            .all(|part| ancestors.any(|element| element.matches(part)))
    }
}

impl View for MemoryView {
    type Node = NodeId;

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.elements
            .iter()
            .position(|element| element.id.as_deref() == Some(id))
            .map(NodeId)
    }

    fn query_all(&self, selector: &Selector) -> Vec<NodeId> {
        (0..self.elements.len())
            .map(NodeId)
            .filter(|node| self.selector_matches(*node, selector))
            .collect()
    }

    fn id(&self, node: &NodeId) -> String {
        self.get(*node).id.clone().unwrap_or_default()
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.get(*node).attributes.get(name).cloned()
    }

    fn href(&self, node: &NodeId) -> Option<String> {
        let element = self.get(*node);
        if element.tag != "a" {
            return element.attributes.get("href").cloned();
        }
        // Anchors without an href resolve to the empty string
        let raw = match element.attributes.get("href") {
            Some(raw) => raw,
            None => return Some(String::new()),
        };
        Some(
            self.location
                .join(raw)
                .map(|url| url.to_string())
                .unwrap_or_else(|_| raw.clone()),
        )
    }

    fn has_class(&self, node: &NodeId, token: &str) -> bool {
        self.get(*node).classes.contains(token)
    }

    fn add_class(&mut self, node: &NodeId, token: &str) {
        self.elements[node.0].classes.insert(token.to_string());
    }

    fn remove_class(&mut self, node: &NodeId, token: &str) {
        self.elements[node.0].classes.remove(token);
    }

    fn current_path(&self) -> Option<String> {
        Some(self.location.path().to_string())
    }
}

fn parse_location(location: &str) -> NavResult<Url> {
    Url::parse(location).map_err(|source| NavError::InvalidLocation {
        location: location.to_string(),
        source,
    })
}
