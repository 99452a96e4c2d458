//! Matching navigation links against the current page

use serde::{Deserialize, Serialize};
use url::Url;

/// How a link's resolved href is compared with the current path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// The resolved href ends with the current path. A link to `/archive/reports`
    /// therefore also matches `/reports`.
    #[default]
    Suffix,
    /// The path component of the resolved href equals the current path
    Path,
}

/// Does a link target the page at `current_path`?
pub fn href_matches(href: &str, current_path: &str, mode: MatchMode) -> bool {
    match mode {
        MatchMode::Suffix => href.ends_with(current_path),
        MatchMode::Path => match Url::parse(href) {
            Ok(url) => url.path() == current_path,
            // Unresolved relative hrefs compare verbatim
            Err(_) => href == current_path,
        },
    }
}

/// A navigation link that was highlighted for the current page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveLink {
    pub href: String,
    /// Parent dropdown identifier declared on the link
    pub parent: Option<String>,
    /// Id of the dropdown menu that was forced open
    pub opened_menu: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffix_match() {
        assert!(href_matches("http://localhost/reports", "/reports", MatchMode::Suffix));
        assert!(!href_matches("http://localhost/settings", "/reports", MatchMode::Suffix));
        // Kept on purpose: a route whose path is a suffix of another matches both
        assert!(href_matches("http://localhost/archive/reports", "/reports", MatchMode::Suffix));
    }

    #[test]
    fn test_path_match() {
        assert!(href_matches("http://localhost/reports", "/reports", MatchMode::Path));
        assert!(!href_matches("http://localhost/archive/reports", "/reports", MatchMode::Path));
        assert!(href_matches("http://localhost/reports?tab=2", "/reports", MatchMode::Path));
        assert!(href_matches("/reports", "/reports", MatchMode::Path));
    }

    #[test]
    fn test_empty_href_never_matches_a_path() {
        assert!(!href_matches("", "/reports", MatchMode::Suffix));
        assert!(!href_matches("", "/reports", MatchMode::Path));
    }
}
