//! Selector parsing
//!
//! Only `#id` and bare tag names are understood. Anything else is not a
//! selector this engine can run and queries answer with no match.

/// Supported selector forms
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// `#id`
    Id(String),
    /// Bare tag name, stored lower-cased
    Tag(String),
}

impl Selector {
    /// Parse a selector string
    pub fn parse(s: &str) -> Option<Self> {
        if s.is_empty() {
            return None;
        }
        if let Some(id) = s.strip_prefix('#') {
            return Some(Self::Id(id.to_string()));
        }
        if s.chars().all(is_tag_char) {
            Some(Self::Tag(s.to_lowercase()))
        } else {
            None
        }
    }

    /// Case-insensitive tag match against a node name
    pub fn matches_tag(&self, name: &str) -> bool {
        match self {
            Selector::Tag(tag) => name.to_lowercase() == *tag,
            Selector::Id(_) => false,
        }
    }
}

fn is_tag_char(c: char) -> bool {
    !c.is_whitespace()
        && !matches!(
            c,
            '.' | '#' | '[' | ']' | ':' | '>' | '+' | '~' | ',' | '*' | '(' | ')' | '=' | '"' | '\''
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_supported_forms() {
        assert_eq!(Selector::parse("#main"), Some(Selector::Id("main".into())));
        assert_eq!(Selector::parse("CANVAS"), Some(Selector::Tag("canvas".into())));
        assert_eq!(Selector::parse("my-widget"), Some(Selector::Tag("my-widget".into())));
    }

    #[test]
    fn test_parse_rejects_other_syntax() {
        for s in ["", ".cls", "div.cls", "div > p", "a, b", "*", "[id]", "p:first-child"] {
            assert_eq!(Selector::parse(s), None, "{s:?} should not parse");
        }
    }

    #[test]
    fn test_tag_match_is_case_insensitive() {
        let sel = Selector::parse("Img").unwrap();
        assert!(sel.matches_tag("IMG"));
        assert!(sel.matches_tag("img"));
        assert!(!sel.matches_tag("IMAGE"));
        assert!(!Selector::Id("img".into()).matches_tag("IMG"));
    }
}
