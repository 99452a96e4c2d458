//! Page contract configuration
//!
//! Every element id, class token and attribute name the controller reads or
//! writes lives here. The defaults describe the markup the sidebar templates
//! ship with; a page can override any subset by passing JSON to `mount`.

use std::str::FromStr;

use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::error::{NavError, NavResult};
use crate::links::MatchMode;
use crate::selector::Selector;

/// Ids of the fixed sidebar elements
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementIds {
    pub sidebar: String,
    pub main_toggle: String,
    pub main_icon: String,
    pub secondary_toggle: String,
    pub secondary_icon: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            sidebar: "sidebar".to_string(),
            main_toggle: "toggleSidebarMain".to_string(),
            main_icon: "sidebarIconMain".to_string(),
            secondary_toggle: "toggleSidebar".to_string(),
            secondary_icon: "sidebarIcon".to_string(),
        }
    }
}

/// Class tokens used as visibility, glyph and highlight signals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassNames {
    pub hidden: String,
    /// Glyph shown while the sidebar is hidden
    pub expand_icon: String,
    /// Glyph shown while the sidebar is visible
    pub collapse_icon: String,
    pub highlight: String,
}

impl Default for ClassNames {
    fn default() -> Self {
        Self {
            hidden: "hidden".to_string(),
            expand_icon: "fa-bars".to_string(),
            collapse_icon: "fa-times".to_string(),
            highlight: "bg-cyan-800".to_string(),
        }
    }
}

/// Attribute names read from navigation links
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkAttributes {
    pub title: String,
    pub parent: String,
}

impl Default for LinkAttributes {
    fn default() -> Self {
        Self {
            title: "data-title".to_string(),
            parent: "data-parent".to_string(),
        }
    }
}

/// Naming convention `<prefix><ParentId><suffix>` for nested menu ids
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuIdPattern {
    pub prefix: String,
    pub suffix: String,
}

impl Default for MenuIdPattern {
    fn default() -> Self {
        Self {
            prefix: "dropdown".to_string(),
            suffix: "Menu".to_string(),
        }
    }
}

impl MenuIdPattern {
    /// Element id of the menu belonging to a parent dropdown identifier
    pub fn menu_id(&self, parent: &str) -> String {
        format!("{}{}{}", self.prefix, parent, self.suffix)
    }
}

/// Full controller configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    pub elements: ElementIds,
    pub classes: ClassNames,
    pub dropdown_selector: String,
    pub link_selector: String,
    pub link_attributes: LinkAttributes,
    /// Links with this title are never highlighted by path
    pub home_title: String,
    pub menu_ids: MenuIdPattern,
    pub match_mode: MatchMode,
    pub log_level: String,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            elements: ElementIds::default(),
            classes: ClassNames::default(),
            dropdown_selector: ".dropdown-menu".to_string(),
            link_selector: "#sidebar a".to_string(),
            link_attributes: LinkAttributes::default(),
            home_title: "Home".to_string(),
            menu_ids: MenuIdPattern::default(),
            match_mode: MatchMode::default(),
            log_level: "info".to_string(),
        }
    }
}

impl NavConfig {
    /// Parse a (possibly partial) JSON configuration and validate it
    pub fn from_json(json: &str) -> NavResult<Self> {
        let config: NavConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every id, token and selector is usable
    pub fn validate(&self) -> NavResult<()> {
        let ids = [
            ("elements.sidebar", &self.elements.sidebar),
            ("elements.main_toggle", &self.elements.main_toggle),
            ("elements.main_icon", &self.elements.main_icon),
            ("elements.secondary_toggle", &self.elements.secondary_toggle),
            ("elements.secondary_icon", &self.elements.secondary_icon),
            ("classes.hidden", &self.classes.hidden),
            ("classes.expand_icon", &self.classes.expand_icon),
            ("classes.collapse_icon", &self.classes.collapse_icon),
            ("classes.highlight", &self.classes.highlight),
            ("link_attributes.title", &self.link_attributes.title),
            ("link_attributes.parent", &self.link_attributes.parent),
        ];
        for (field, value) in ids {
            validate_token(field, value)?;
        }

        if self.classes.expand_icon == self.classes.collapse_icon {
            return Err(NavError::InvalidConfig(
                "classes.expand_icon and classes.collapse_icon must differ".to_string(),
            ));
        }

        self.dropdown_selector()?;
        self.link_selector()?;
        self.level_filter()?;
        Ok(())
    }

    pub fn dropdown_selector(&self) -> NavResult<Selector> {
        Selector::parse(&self.dropdown_selector)
    }

    pub fn link_selector(&self) -> NavResult<Selector> {
        Selector::parse(&self.link_selector)
    }

    pub fn level_filter(&self) -> NavResult<LevelFilter> {
        LevelFilter::from_str(&self.log_level).map_err(|_| {
            NavError::InvalidConfig(format!("unknown log_level '{}'", self.log_level))
        })
    }
}

fn validate_token(field: &str, value: &str) -> NavResult<()> {
    if value.is_empty() {
        return Err(NavError::InvalidConfig(format!("{} must not be empty", field)));
    }
    if value.chars().any(|c| c.is_ascii_whitespace()) {
        return Err(NavError::InvalidConfig(format!(
            "{} must not contain whitespace: '{}'",
            field, value
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = NavConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.level_filter().unwrap(), LevelFilter::Info);
        assert_eq!(config.menu_ids.menu_id("Analytics"), "dropdownAnalyticsMenu");
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = NavConfig::from_json(
            r#"{"classes": {"highlight": "active"}, "match_mode": "path", "log_level": "debug"}"#,
        )
        .unwrap();
        assert_eq!(config.classes.highlight, "active");
        assert_eq!(config.classes.hidden, "hidden");
        assert_eq!(config.elements.sidebar, "sidebar");
        assert_eq!(config.match_mode, MatchMode::Path);
        assert_eq!(config.level_filter().unwrap(), LevelFilter::Debug);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            NavConfig::from_json(r#"{"classes": {"hidden": ""}}"#),
            Err(NavError::InvalidConfig(_))
        ));
        assert!(matches!(
            NavConfig::from_json(r#"{"classes": {"highlight": "bg cyan"}}"#),
            Err(NavError::InvalidConfig(_))
        ));
        assert!(matches!(
            NavConfig::from_json(r#"{"classes": {"expand_icon": "x", "collapse_icon": "x"}}"#),
            Err(NavError::InvalidConfig(_))
        ));
        assert!(matches!(
            NavConfig::from_json(r#"{"link_selector": "nav > a"}"#),
            Err(NavError::InvalidSelector { .. })
        ));
        assert!(matches!(
            NavConfig::from_json(r#"{"log_level": "loud"}"#),
            Err(NavError::InvalidConfig(_))
        ));
        assert!(matches!(
            NavConfig::from_json("{not json"),
            Err(NavError::SerializationError(_))
        ));
    }
}
