//! Minimal CSS selectors
//!
//! Only the shapes the navigation markup needs are supported: a chain of
//! simple parts (`tag`, `#id` or `.class`) joined by the descendant
//! combinator, e.g. `.dropdown-menu` or `#sidebar a`.

use std::fmt;
use std::str::FromStr;

use crate::error::{NavError, NavResult};

/// One simple selector in a descendant chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleSelector {
    Tag(String),
    Id(String),
    Class(String),
}

impl SimpleSelector {
    fn parse(part: &str, whole: &str) -> NavResult<Self> {
        let invalid = |reason: &str| NavError::InvalidSelector {
            selector: whole.to_string(),
            reason: reason.to_string(),
        };

        let (kind, name) = match part.chars().next() {
            Some('#') => ('#', &part[1..]),
            Some('.') => ('.', &part[1..]),
            _ => (' ', part),
        };

        if name.is_empty() {
            return Err(invalid("empty name"));
        }
        if !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(invalid("compound and attribute selectors are not supported"));
        }

        Ok(match kind {
            '#' => SimpleSelector::Id(name.to_string()),
            '.' => SimpleSelector::Class(name.to_string()),
            _ => SimpleSelector::Tag(name.to_ascii_lowercase()),
        })
    }
}

impl fmt::Display for SimpleSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimpleSelector::Tag(tag) => write!(f, "{}", tag),
            SimpleSelector::Id(id) => write!(f, "#{}", id),
            SimpleSelector::Class(class) => write!(f, ".{}", class),
        }
    }
}

/// A descendant chain of simple selectors, outermost first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    parts: Vec<SimpleSelector>,
}

impl Selector {
    /// Parse a selector such as `#sidebar a`
    pub fn parse(input: &str) -> NavResult<Self> {
        let parts = input
            .split_ascii_whitespace()
            .map(|part| SimpleSelector::parse(part, input))
            .collect::<NavResult<Vec<_>>>()?;

        if parts.is_empty() {
            return Err(NavError::InvalidSelector {
                selector: input.to_string(),
                reason: "empty selector".to_string(),
            });
        }

        Ok(Self { parts })
    }

    pub fn parts(&self) -> &[SimpleSelector] {
        &self.parts
    }

    /// The part the matched element itself must satisfy
    pub fn subject(&self) -> &SimpleSelector {
        // parse() rejects empty chains
        &self.parts[self.parts.len() - 1]
    }

    /// The parts that must be satisfied by ancestors, innermost first
    pub fn ancestors(&self) -> impl Iterator<Item = &SimpleSelector> {
        self.parts[..self.parts.len() - 1].iter().rev()
    }
}

impl FromStr for Selector {
    type Err = NavError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", part)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_descendant_chain() {
        let selector = Selector::parse("#sidebar  a").unwrap();
        assert_eq!(
            selector.parts(),
            &[
                SimpleSelector::Id("sidebar".to_string()),
                SimpleSelector::Tag("a".to_string())
            ]
        );
        assert_eq!(selector.subject(), &SimpleSelector::Tag("a".to_string()));
        assert_eq!(selector.to_string(), "#sidebar a");
    }

    #[test]
    fn test_parse_class() {
        let selector: Selector = ".dropdown-menu".parse().unwrap();
        assert_eq!(selector.ancestors().count(), 0);
        assert_eq!(
            selector.subject(),
            &SimpleSelector::Class("dropdown-menu".to_string())
        );
    }

    #[test]
    fn test_rejects_unsupported_shapes() {
        assert!(Selector::parse("").is_err());
        assert!(Selector::parse("a.active").is_err());
        assert!(Selector::parse("nav > a").is_err());
        assert!(Selector::parse("a[href]").is_err());
        assert!(Selector::parse("#").is_err());
    }
}
