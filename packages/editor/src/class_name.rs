//! CSS class-name grammar.
//!
//! Selector names double as class tokens in the rendered page, so every
//! name (and, for the legacy rename gate, the selected selector's id) has to
//! match `^-?[_a-zA-Z]+[_a-zA-Z0-9-]*$`.

use regex::Regex;
use std::sync::LazyLock;

static CLASS_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-?[_a-zA-Z]+[_a-zA-Z0-9-]*$").expect("class-name pattern is valid")
});

/// Check whether `candidate` can be used as a CSS class token
pub fn is_valid_class_name(candidate: &str) -> bool {
    CLASS_NAME.is_match(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_identifiers() {
        for name in ["newClass", "newClass_1", "-card", "_private", "btn-primary", "a9"] {
            assert!(is_valid_class_name(name), "{name} should be valid");
        }
    }

    #[test]
    fn test_rejects_non_identifiers() {
        for name in ["", "1abc", "--x", "-9", "has space", "dot.name", "ümlaut", "a:hover"] {
            assert!(!is_valid_class_name(name), "{name} should be rejected");
        }
    }

    #[test]
    fn test_uuid_with_leading_digit_is_rejected() {
        assert!(!is_valid_class_name("3f2a9c1e-0000-4000-8000-000000000000"));
        assert!(is_valid_class_name("css_3f2a9c1e000040008000000000000000"));
    }
}
