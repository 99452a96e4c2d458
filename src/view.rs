//! The document capability the controller is written against
//!
//! `DomView` implements it over a live browser document and `MemoryView`
//! over an in-memory element tree, so the toggle and highlight logic runs
//! the same way in both.

use serde::{Deserialize, Serialize};

use crate::selector::Selector;

/// Glyph shown on a sidebar icon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IconState {
    /// Sidebar is hidden, clicking will expand it
    Expand,
    /// Sidebar is visible, clicking will collapse it
    Collapse,
}

impl IconState {
    /// Glyph matching a sidebar visibility
    pub fn for_visibility(visible: bool) -> Self {
        if visible {
            IconState::Collapse
        } else {
            IconState::Expand
        }
    }
}

/// The two controls that toggle the sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SidebarTrigger {
    Main,
    Secondary,
}

/// Minimal read/write access to a document's elements
pub trait View {
    /// Handle to one element
    type Node: Clone;

    fn element_by_id(&self, id: &str) -> Option<Self::Node>;

    /// All elements matching `selector`, in document order
    fn query_all(&self, selector: &Selector) -> Vec<Self::Node>;

    /// The element's id, empty when it has none
    fn id(&self, node: &Self::Node) -> String;

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

    /// Fully resolved link target, `None` for elements that are not links
    fn href(&self, node: &Self::Node) -> Option<String>;

    fn has_class(&self, node: &Self::Node, token: &str) -> bool;

    fn add_class(&mut self, node: &Self::Node, token: &str);

    fn remove_class(&mut self, node: &Self::Node, token: &str);

    /// Flip a class token, returning whether it is now present
    fn toggle_class(&mut self, node: &Self::Node, token: &str) -> bool {
        if self.has_class(node, token) {
            self.remove_class(node, token);
            false
        } else {
            self.add_class(node, token);
            true
        }
    }

    /// Path component of the page's current location, `None` when it cannot be read
    fn current_path(&self) -> Option<String>;
}
