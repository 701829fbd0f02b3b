//! The canonical selector ordering.
//!
//! A single total order is used for the top-level selector list and every
//! classification bucket, so any bucket's order is a sub-sequence of the
//! order the full list would imply. The order is not CSS cascade
//! specificity; it only has to present related selectors together, base
//! forms before compounds built on them.

use std::cmp::Ordering;

/// Characters that carry selector structure rather than identity.
const PUNCTUATION: &[char] = &[
    '#', '.', '[', ']', ':', '(', ')', '*', '+', '>', '~', '=', '^', '$', '|', '"', '\'', '\\',
    ',',
];

fn is_punctuation(c: char) -> bool {
    c.is_whitespace() || PUNCTUATION.contains(&c)
}

/// Primary key: the selector lowercased with structural punctuation
/// removed. A base selector's key is a strict prefix of the key of any
/// compound built from it, which puts the base first.
fn sort_key(selector: &str) -> String {
    selector
        .chars()
        .filter(|c| !is_punctuation(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Tie-break: the amount of structure. Chained classes, combinators and
/// pseudo-classes all add punctuation, so simpler forms sort first.
fn punctuation_weight(selector: &str) -> usize {
    selector.chars().filter(|c| is_punctuation(*c)).count()
}

/// Total, deterministic order over selector strings. The universal
/// selector is pinned first; remaining ties fall through to raw byte
/// order, so repeated runs always produce the same sequence.
pub fn compare(a: &str, b: &str) -> Ordering {
    match (a == "*", b == "*") {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => sort_key(a)
            .cmp(&sort_key(b))
            .then_with(|| punctuation_weight(a).cmp(&punctuation_weight(b)))
            .then_with(|| a.cmp(b)),
    }
}

/// Sort with the canonical order and drop exact-text duplicates. Equal
/// entries end up adjacent, so a single dedup pass suffices.
pub fn sort_unique(mut items: Vec<String>) -> Vec<String> {
    items.sort_by(|a, b| compare(a, b));
    items.dedup();
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(items: &[&str]) -> Vec<String> {
        sort_unique(items.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_universal_sorts_first() {
        assert_eq!(
            sorted(&["div", "*", ".class", "#id"]),
            vec!["*", ".class", "div", "#id"]
        );
    }

    #[test]
    fn test_base_before_compounds_built_on_it() {
        assert_eq!(
            sorted(&[".class:hover", ".class", ".class.class2", ".class > .class4"]),
            vec![".class", ".class.class2", ".class > .class4", ".class:hover"]
        );
    }

    #[test]
    fn test_kind_punctuation_is_ignored_for_grouping() {
        // Names interleave regardless of the leading marker.
        assert_eq!(
            sorted(&["span", "#id", "div", "[attribute]", ".class"]),
            vec!["[attribute]", ".class", "div", "#id", "span"]
        );
    }

    #[test]
    fn test_equal_keys_break_on_simplicity_then_text() {
        // "#foo" and ".foo" share the key "foo" and the same weight.
        assert_eq!(sorted(&[".foo", "#foo"]), vec!["#foo", ".foo"]);
        // ".ab" is simpler than ".a.b" despite the identical key.
        assert_eq!(sorted(&[".a.b", ".ab"]), vec![".ab", ".a.b"]);
    }

    #[test]
    fn test_never_fails_on_synthetic_and_escaped_input() {
        let awkward = [
            ":not(.class8)",
            ".class-1\\.5",
            ".class-\\[36px\\]",
            "[data-x=\"a,b\"]",
            "",
        ];
        for a in &awkward {
            for b in &awkward {
                let _ = compare(a, b);
            }
        }
    }

    #[test]
    fn test_order_is_antisymmetric_and_transitive() {
        let items = ["*", "[attribute]", ".class", ".class:hover", "div", "#id", "span"];
        for a in &items {
            for b in &items {
                assert_eq!(compare(a, b), compare(b, a).reverse());
                for c in &items {
                    if compare(a, b) == Ordering::Less && compare(b, c) == Ordering::Less {
                        assert_eq!(compare(a, c), Ordering::Less);
                    }
                }
            }
        }
    }

    #[test]
    fn test_sort_unique_drops_duplicates() {
        assert_eq!(
            sorted(&[".class", "div", ".class", "div", ".class"]),
            vec![".class", "div"]
        );
    }

    #[test]
    fn test_deterministic_regardless_of_input_order() {
        let a = sorted(&["div", "span", ".class", "#id", "*"]);
        let b = sorted(&["*", "#id", ".class", "span", "div"]);
        assert_eq!(a, b);
    }
}
