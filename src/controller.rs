//! Navigation UI controller
//!
//! Keeps the sidebar, its two icons, the dropdown submenus and the active
//! link highlight in sync. All state lives in the view's class tokens; the
//! controller holds only handles to the fixed elements and the page contract.

use log::{debug, info, warn};

use crate::config::NavConfig;
use crate::error::{NavError, NavResult};
use crate::links::{href_matches, ActiveLink};
use crate::selector::Selector;
use crate::view::{IconState, SidebarTrigger, View};

/// A control together with the icon that mirrors the sidebar state
#[derive(Debug, Clone)]
struct Trigger<N> {
    control: N,
    icon: N,
}

pub struct NavController<V: View> {
    view: V,
    config: NavConfig,
    sidebar: V::Node,
    main: Trigger<V::Node>,
    secondary: Trigger<V::Node>,
    dropdown_selector: Selector,
    link_selector: Selector,
}

impl<V: View> NavController<V> {
    /// Bind to a document, failing if any of the fixed elements is missing
    pub fn new(view: V, config: NavConfig) -> NavResult<Self> {
        config.validate()?;
        let dropdown_selector = config.dropdown_selector()?;
        let link_selector = config.link_selector()?;

        let ids = &config.elements;
        let sidebar = require(&view, &ids.sidebar)?;
        let main = Trigger {
            control: require(&view, &ids.main_toggle)?,
            icon: require(&view, &ids.main_icon)?,
        };
        let secondary = Trigger {
            control: require(&view, &ids.secondary_toggle)?,
            icon: require(&view, &ids.secondary_icon)?,
        };

        Ok(Self {
            view,
            config,
            sidebar,
            main,
            secondary,
            dropdown_selector,
            link_selector,
        })
    }

    /// Bind to a document and put the sidebar into its load-time state
    pub fn attach(view: V, config: NavConfig) -> NavResult<Self> {
        let mut controller = Self::new(view, config)?;
        controller.reset_sidebar();
        info!("Navigation controller attached to #{}", controller.config.elements.sidebar);
        Ok(controller)
    }

    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Handle of the control element for a trigger
    pub fn trigger(&self, trigger: SidebarTrigger) -> &V::Node {
        match trigger {
            SidebarTrigger::Main => &self.main.control,
            SidebarTrigger::Secondary => &self.secondary.control,
        }
    }

    fn trigger_icon(&self, trigger: SidebarTrigger) -> V::Node {
        match trigger {
            SidebarTrigger::Main => self.main.icon.clone(),
            SidebarTrigger::Secondary => self.secondary.icon.clone(),
        }
    }

    // ========================
    // Sidebar
    // ========================

    pub fn sidebar_visible(&self) -> bool {
        !self.view.has_class(&self.sidebar, &self.config.classes.hidden)
    }

    /// Force the sidebar visible with the collapse glyph on the main icon
    pub fn reset_sidebar(&mut self) {
        let sidebar = self.sidebar.clone();
        let main_icon = self.main.icon.clone();
        self.view.remove_class(&sidebar, &self.config.classes.hidden);
        self.apply_icon(&main_icon, IconState::Collapse);
    }

    /// Flip sidebar visibility and sync the trigger's icon. Returns the new visibility.
    pub fn toggle_sidebar(&mut self, trigger: SidebarTrigger) -> bool {
        let sidebar = self.sidebar.clone();
        let hidden = self.view.toggle_class(&sidebar, &self.config.classes.hidden);
        let icon = self.trigger_icon(trigger);
        self.apply_icon(&icon, IconState::for_visibility(!hidden));
        debug!("Sidebar {} via {:?} trigger", if hidden { "hidden" } else { "shown" }, trigger);
        !hidden
    }

    // ========================
    // Element visibility by id
    // ========================

    pub fn is_hidden(&self, id: &str) -> NavResult<bool> {
        let node = require(&self.view, id)?;
        Ok(self.view.has_class(&node, &self.config.classes.hidden))
    }

    pub fn set_hidden(&mut self, id: &str, hidden: bool) -> NavResult<()> {
        let node = require(&self.view, id)?;
        self.apply_hidden(&node, hidden);
        Ok(())
    }

    pub fn set_icon_state(&mut self, id: &str, state: IconState) -> NavResult<()> {
        let node = require(&self.view, id)?;
        self.apply_icon(&node, state);
        Ok(())
    }

    fn apply_hidden(&mut self, node: &V::Node, hidden: bool) {
        if hidden {
            self.view.add_class(node, &self.config.classes.hidden);
        } else {
            self.view.remove_class(node, &self.config.classes.hidden);
        }
    }

    fn apply_icon(&mut self, node: &V::Node, state: IconState) {
        let classes = &self.config.classes;
        let (remove, add) = match state {
            IconState::Expand => (&classes.collapse_icon, &classes.expand_icon),
            IconState::Collapse => (&classes.expand_icon, &classes.collapse_icon),
        };
        self.view.remove_class(node, remove);
        self.view.add_class(node, add);
    }

    // ========================
    // Dropdowns
    // ========================

    /// Whether the dropdown menu with this id is open
    pub fn is_open(&self, menu_id: &str) -> NavResult<bool> {
        let menu = self
            .view
            .element_by_id(menu_id)
            .ok_or_else(|| NavError::MissingDropdown(menu_id.to_string()))?;
        Ok(!self.view.has_class(&menu, &self.config.classes.hidden))
    }

    /// Ids of all open dropdown menus, in document order
    pub fn open_dropdowns(&self) -> Vec<String> {
        self.view
            .query_all(&self.dropdown_selector)
            .iter()
            .filter(|menu| !self.view.has_class(menu, &self.config.classes.hidden))
            .map(|menu| self.view.id(menu))
            .collect()
    }

    /// Flip a dropdown menu open or closed. Top-level menus (no `parent_id`)
    /// close every other open menu first. Returns whether the menu is now open.
    pub fn toggle_dropdown(&mut self, menu_id: &str, parent_id: Option<&str>) -> NavResult<bool> {
        let menu = self
            .view
            .element_by_id(menu_id)
            .ok_or_else(|| NavError::MissingDropdown(menu_id.to_string()))?;

        if parent_id.is_none() {
            self.close_all_dropdowns_except(menu_id);
        }

        let hidden = self.view.toggle_class(&menu, &self.config.classes.hidden);
        debug!(
            "Dropdown #{} {} (parent: {:?})",
            menu_id,
            if hidden { "closed" } else { "opened" },
            parent_id
        );
        Ok(!hidden)
    }

    /// Close every open dropdown menu other than `menu_id`. Returns how many were closed.
    pub fn close_all_dropdowns_except(&mut self, menu_id: &str) -> usize {
        let hidden = &self.config.classes.hidden;
        let to_close: Vec<V::Node> = self
            .view
            .query_all(&self.dropdown_selector)
            .into_iter()
            .filter(|menu| self.view.id(menu) != menu_id && !self.view.has_class(menu, hidden))
            .collect();

        for menu in &to_close {
            self.apply_hidden(menu, true);
        }
        to_close.len()
    }

    // ========================
    // Active link
    // ========================

    /// Highlight every link targeting the current page and open its parent menu.
    /// The Home link is never highlighted by path.
    pub fn highlight_active_link(&mut self) -> Vec<ActiveLink> {
        // An empty path would suffix-match every link
        let current_path = match self.view.current_path() {
            Some(path) if !path.is_empty() => path,
            _ => {
                warn!("Current page path is unavailable, skipping active link highlight");
                return Vec::new();
            }
        };
        let links = self.view.query_all(&self.link_selector);
        let mut active = Vec::new();

        for link in links {
            let title = self.view.attribute(&link, &self.config.link_attributes.title);
            if title.as_deref() == Some(self.config.home_title.as_str()) {
                continue;
            }

            let href = match self.view.href(&link) {
                Some(href) => href,
                None => continue,
            };
            if !href_matches(&href, &current_path, self.config.match_mode) {
                continue;
            }

            self.view.add_class(&link, &self.config.classes.highlight);

            let parent = self
                .view
                .attribute(&link, &self.config.link_attributes.parent)
                .filter(|parent| !parent.is_empty());
            let opened_menu = parent.as_deref().and_then(|parent| self.open_parent_menu(parent));

            active.push(ActiveLink {
                href,
                parent,
                opened_menu,
            });
        }

        info!(
            "Highlighted {} navigation link(s) for {}",
            active.len(),
            current_path
        );
        active
    }

    fn open_parent_menu(&mut self, parent: &str) -> Option<String> {
        let menu_id = self.config.menu_ids.menu_id(parent);
        match self.view.element_by_id(&menu_id) {
            Some(menu) => {
                self.apply_hidden(&menu, false);
                Some(menu_id)
            }
            None => {
                warn!("Parent dropdown '{}' has no menu element #{}", parent, menu_id);
                None
            }
        }
    }
}

fn require<V: View>(view: &V, id: &str) -> NavResult<V::Node> {
    view.element_by_id(id)
        .ok_or_else(|| NavError::MissingElement(id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryElement, MemoryView, NodeId};

    fn page() -> MemoryView {
        let mut view = MemoryView::new("http://localhost/dashboard").unwrap();
        let sidebar = view.insert(MemoryElement::new("aside").with_id("sidebar").with_class("hidden"));
        view.insert(MemoryElement::new("button").with_id("toggleSidebarMain"));
        view.insert(MemoryElement::new("i").with_id("sidebarIconMain").with_class("fa-bars"));
        view.insert_child(sidebar, MemoryElement::new("button").with_id("toggleSidebar"));
        view.insert_child(sidebar, MemoryElement::new("i").with_id("sidebarIcon"));
        view.insert_child(
            sidebar,
            MemoryElement::new("ul")
                .with_id("dropdownToolsMenu")
                .with_class("dropdown-menu")
                .with_class("hidden"),
        );
        view
    }

    #[test]
    fn test_missing_required_element() {
        let mut config = NavConfig::default();
        config.elements.secondary_icon = "nope".to_string();
        match NavController::new(page(), config) {
            Err(NavError::MissingElement(id)) => assert_eq!(id, "nope"),
            other => panic!("expected MissingElement, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_attach_forces_visible_sidebar() {
        let controller = NavController::attach(page(), NavConfig::default()).unwrap();
        assert!(controller.sidebar_visible());
        let view = controller.view();
        let icon = view.element_by_id("sidebarIconMain").unwrap();
        assert!(view.has_class(&icon, "fa-times"));
        assert!(!view.has_class(&icon, "fa-bars"));
    }

    #[test]
    fn test_toggle_sidebar_syncs_icon() {
        let mut controller = NavController::attach(page(), NavConfig::default()).unwrap();

        assert!(!controller.toggle_sidebar(SidebarTrigger::Secondary));
        let icon = controller.view().element_by_id("sidebarIcon").unwrap();
        assert!(controller.view().has_class(&icon, "fa-bars"));
        assert!(!controller.view().has_class(&icon, "fa-times"));

        assert!(controller.toggle_sidebar(SidebarTrigger::Secondary));
        assert!(controller.view().has_class(&icon, "fa-times"));
        assert!(!controller.view().has_class(&icon, "fa-bars"));
    }

    #[test]
    fn test_visibility_by_id() {
        let mut controller = NavController::attach(page(), NavConfig::default()).unwrap();
        assert!(controller.is_hidden("dropdownToolsMenu").unwrap());
        controller.set_hidden("dropdownToolsMenu", false).unwrap();
        assert!(controller.is_open("dropdownToolsMenu").unwrap());
        controller.set_icon_state("sidebarIcon", IconState::Expand).unwrap();
        let icon = controller.view().element_by_id("sidebarIcon").unwrap();
        assert!(controller.view().has_class(&icon, "fa-bars"));
        assert!(matches!(
            controller.set_hidden("ghost", true),
            Err(NavError::MissingElement(_))
        ));
    }

    /// Document whose location cannot be read
    struct NoLocation(MemoryView);

    impl View for NoLocation {
        type Node = NodeId;

        fn element_by_id(&self, id: &str) -> Option<NodeId> {
            self.0.element_by_id(id)
        }

        fn query_all(&self, selector: &Selector) -> Vec<NodeId> {
            self.0.query_all(selector)
        }

        fn id(&self, node: &NodeId) -> String {
            self.0.id(node)
        }

        fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
            self.0.attribute(node, name)
        }

        fn href(&self, node: &NodeId) -> Option<String> {
            self.0.href(node)
        }

        fn has_class(&self, node: &NodeId, token: &str) -> bool {
            self.0.has_class(node, token)
        }

        fn add_class(&mut self, node: &NodeId, token: &str) {
            self.0.add_class(node, token)
        }

        fn remove_class(&mut self, node: &NodeId, token: &str) {
            self.0.remove_class(node, token)
        }

        fn current_path(&self) -> Option<String> {
            None
        }
    }

    #[test]
    fn test_unreadable_location_highlights_nothing() {
        let mut view = page();
        let sidebar = view.element_by_id("sidebar").unwrap();
        let menu = view.element_by_id("dropdownToolsMenu").unwrap();
        view.insert_child(sidebar, MemoryElement::link("/dashboard"));
        view.insert_child(menu, MemoryElement::link("/tools").with_attr("data-parent", "Tools"));

        let mut controller = NavController::attach(NoLocation(view), NavConfig::default()).unwrap();
        assert!(controller.highlight_active_link().is_empty());
        assert!(controller.open_dropdowns().is_empty());
        let inner = &controller.view().0;
        let highlighted = inner
            .query_all(&Selector::parse("a").unwrap())
            .into_iter()
            .filter(|link| inner.has_class(link, "bg-cyan-800"))
            .count();
        assert_eq!(highlighted, 0);
    }

    #[test]
    fn test_toggle_unknown_dropdown_touches_nothing() {
        let mut controller = NavController::attach(page(), NavConfig::default()).unwrap();
        controller.toggle_dropdown("dropdownToolsMenu", None).unwrap();
        assert!(matches!(
            controller.toggle_dropdown("dropdownGhostMenu", None),
            Err(NavError::MissingDropdown(_))
        ));
        assert_eq!(controller.open_dropdowns(), vec!["dropdownToolsMenu".to_string()]);
    }
}
