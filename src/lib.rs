//! Nav Chrome - sidebar and dropdown state for server-rendered pages
//!
//! Synchronizes a handful of visibility flags with CSS class tokens:
//! - Sidebar show/hide, with the trigger's icon glyph kept in step
//! - Mutually exclusive top-level dropdown submenus
//! - Highlighting the navigation link for the current page on load
//!
//! The logic is written against the [`view::View`] trait. With the `wasm`
//! feature it drives the live browser document; [`memory::MemoryView`]
//! runs it headless.
//!
//! ## Example
//! ```rust
//! use nav_chrome::prelude::*;
//!
//! let mut view = MemoryView::new("http://localhost/reports").unwrap();
//! let sidebar = view.insert(MemoryElement::new("aside").with_id("sidebar"));
//! view.insert(MemoryElement::new("button").with_id("toggleSidebarMain"));
//! view.insert(MemoryElement::new("i").with_id("sidebarIconMain"));
//! view.insert_child(sidebar, MemoryElement::new("button").with_id("toggleSidebar"));
//! view.insert_child(sidebar, MemoryElement::new("i").with_id("sidebarIcon"));
//! view.insert_child(sidebar, MemoryElement::link("/reports"));
//!
//! let mut nav = NavController::attach(view, NavConfig::default()).unwrap();
//! assert_eq!(nav.highlight_active_link().len(), 1);
//! assert!(!nav.toggle_sidebar(SidebarTrigger::Main));
//! ```

pub mod config;
pub mod controller;
pub mod error;
pub mod links;
pub mod memory;
pub mod mount;
pub mod selector;
pub mod view;

#[cfg(feature = "wasm")]
pub mod dom;
#[cfg(feature = "wasm")]
mod logging;
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export common types
pub mod prelude {
    pub use crate::config::{ClassNames, ElementIds, LinkAttributes, MenuIdPattern, NavConfig};
    pub use crate::controller::NavController;
    pub use crate::error::{NavError, NavResult};
    pub use crate::links::{href_matches, ActiveLink, MatchMode};
    pub use crate::memory::{MemoryElement, MemoryView, NodeId};
    pub use crate::selector::Selector;
    pub use crate::view::{IconState, SidebarTrigger, View};
}
