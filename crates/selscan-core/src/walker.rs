use regex::Regex;

use crate::types::{Rule, Stylesheet};

/// Collects candidate selector branches from a rule tree.
///
/// Branches inside keyframes blocks are frame markers (`0%`, `from`), not
/// selectors, and never reach the downstream stages. Everything else is
/// appended in encounter order; duplicates are resolved later.
pub struct RuleWalker {
    keyframes: Regex,
}

impl Default for RuleWalker {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleWalker {
    pub fn new() -> Self {
        // Matches "keyframes" and vendor-prefixed forms like
        // "-webkit-keyframes".
        let keyframes =
            Regex::new(r"^(-[a-z]+-)?keyframes$").expect("static pattern should compile");
        Self { keyframes }
    }

    /// Pure fold over the stylesheet: every selector branch of every style
    /// rule whose immediate parent is not a keyframes at-rule.
    pub fn collect(&self, stylesheet: &Stylesheet) -> Vec<String> {
        let mut accumulated = Vec::new();
        self.collect_rules(&stylesheet.rules, None, &mut accumulated);
        accumulated
    }

    fn collect_rules(&self, rules: &[Rule], parent_at: Option<&str>, out: &mut Vec<String>) {
        let in_keyframes = parent_at.is_some_and(|name| self.keyframes.is_match(name));
        for rule in rules {
            match rule {
                Rule::Style(style) => {
                    if !in_keyframes {
                        out.extend(style.selectors.iter().cloned());
                    }
                }
                Rule::At(at) => self.collect_rules(&at.rules, Some(&at.name), out),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AtRule, StyleRule};

    fn style(selectors: &[&str]) -> Rule {
        Rule::Style(StyleRule {
            selectors: selectors.iter().map(|s| s.to_string()).collect(),
        })
    }

    fn at(name: &str, rules: Vec<Rule>) -> Rule {
        Rule::At(AtRule {
            name: name.to_string(),
            prelude: String::new(),
            rules,
        })
    }

    #[test]
    fn test_collects_branches_in_encounter_order_with_duplicates() {
        let sheet = Stylesheet {
            rules: vec![style(&[".a", "div"]), style(&["div"]), style(&["#id"])],
        };
        let walker = RuleWalker::new();
        assert_eq!(walker.collect(&sheet), vec![".a", "div", "div", "#id"]);
    }

    #[test]
    fn test_skips_keyframes_children() {
        let sheet = Stylesheet {
            rules: vec![
                style(&[".spinner"]),
                at("keyframes", vec![style(&["0%"]), style(&["50%"]), style(&["100%"])]),
                at("-webkit-keyframes", vec![style(&["from"]), style(&["to"])]),
            ],
        };
        let walker = RuleWalker::new();
        assert_eq!(walker.collect(&sheet), vec![".spinner"]);
    }

    #[test]
    fn test_descends_into_non_keyframes_at_rules() {
        let sheet = Stylesheet {
            rules: vec![at(
                "media",
                vec![
                    style(&[".narrow"]),
                    at("supports", vec![style(&[".grid"])]),
                    at("keyframes", vec![style(&["from"])]),
                ],
            )],
        };
        let walker = RuleWalker::new();
        assert_eq!(walker.collect(&sheet), vec![".narrow", ".grid"]);
    }

    #[test]
    fn test_keyframes_match_is_exact_or_vendor_prefixed() {
        let walker = RuleWalker::new();
        assert!(walker.keyframes.is_match("keyframes"));
        assert!(walker.keyframes.is_match("-moz-keyframes"));
        // A name merely containing the word is a different at-rule.
        assert!(!walker.keyframes.is_match("keyframes-extra"));
    }

    #[test]
    fn test_empty_stylesheet_yields_nothing() {
        let walker = RuleWalker::new();
        assert!(walker.collect(&Stylesheet::default()).is_empty());
    }
}
