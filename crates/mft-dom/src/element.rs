//! Element Query
//!
//! Simple CSS selector matching: tag, class, id, universal.

use crate::ElementData;

/// Simple selector for matching
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleSelector {
    Tag(String),
    Class(String),
    Id(String),
    Universal,
}

impl SimpleSelector {
    /// Parse a simple selector string
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }

        if s == "*" {
            Some(Self::Universal)
        } else if let Some(id) = s.strip_prefix('#') {
            Some(Self::Id(id.to_string()))
        } else if let Some(class) = s.strip_prefix('.') {
            Some(Self::Class(class.to_string()))
        } else {
            Some(Self::Tag(s.to_lowercase()))
        }
    }

    /// Check whether an element matches this selector
    pub fn matches(&self, element: &ElementData) -> bool {
        match self {
            Self::Universal => true,
            Self::Tag(tag) => element.tag.eq_ignore_ascii_case(tag),
            Self::Id(id) => element.id.as_deref() == Some(id),
            Self::Class(class) => element.has_class(class),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_selector_parse() {
        assert!(matches!(SimpleSelector::parse("div"), Some(SimpleSelector::Tag(_))));
        assert!(matches!(SimpleSelector::parse(".modal"), Some(SimpleSelector::Class(_))));
        assert!(matches!(SimpleSelector::parse("#id"), Some(SimpleSelector::Id(_))));
        assert!(matches!(SimpleSelector::parse("*"), Some(SimpleSelector::Universal)));
        assert!(SimpleSelector::parse("  ").is_none());
    }

    #[test]
    fn test_element_matches() {
        let mut el = ElementData::new("div");
        el.set_attr("id", "main");
        el.set_attr("class", "container active");

        assert!(SimpleSelector::Tag("div".to_string()).matches(&el));
        assert!(SimpleSelector::Id("main".to_string()).matches(&el));
        assert!(SimpleSelector::Class("container".to_string()).matches(&el));
        assert!(SimpleSelector::Universal.matches(&el));
        assert!(!SimpleSelector::Class("hidden".to_string()).matches(&el));
    }
}
