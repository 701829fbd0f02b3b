use crate::classify::bucket_for;
use crate::parser::{ParseError, SelectorParser};
use crate::report::SimpleBuckets;
use crate::types::{Component, PseudoArgument};

/// Expands one selector string into its atomic contributions.
///
/// Structural nodes (combinators, comments, the grouping wrapper) and
/// pseudo identities contribute nothing themselves; selector-list
/// arguments of non-positional pseudo-classes are re-examined as if they
/// were top-level. Arguments of `nth-*` pseudo-classes are index
/// expressions, never selectors, and are skipped entirely.
pub struct Decomposer<'a> {
    parser: &'a dyn SelectorParser,
}

impl<'a> Decomposer<'a> {
    pub fn new(parser: &'a dyn SelectorParser) -> Self {
        Self { parser }
    }

    /// Parse `selector` and append its contributions to `buckets`. The
    /// output is unordered and may contain duplicates; aggregation handles
    /// both. A parse failure fails the run.
    pub fn decompose_into(
        &self,
        selector: &str,
        buckets: &mut SimpleBuckets,
    ) -> Result<(), ParseError> {
        let branch = self.parser.parse_selector(selector)?;
        collect(&branch.components, buckets);
        Ok(())
    }
}

fn collect(components: &[Component], buckets: &mut SimpleBuckets) {
    for component in components {
        match component {
            Component::Combinator(_) | Component::Comment(_) | Component::PseudoElement(_) => {}
            Component::PseudoClass { argument, .. } => {
                if component.is_positional_pseudo() {
                    continue;
                }
                if let Some(PseudoArgument::SelectorList(branches)) = argument {
                    for nested in branches {
                        collect(&nested.components, buckets);
                    }
                }
            }
            other => {
                let text = other.to_string();
                if let Some(bucket) = bucket_for(other) {
                    buckets.push(bucket, text.clone());
                }
                buckets.all.push(text);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Combinator, SelectorBranch};

    /// Parser stub returning a canned component tree, so the walk rules
    /// are tested independently of real selector parsing.
    struct FixedParser(SelectorBranch);

    impl SelectorParser for FixedParser {
        fn parse_selector(&self, _selector: &str) -> Result<SelectorBranch, ParseError> {
            Ok(self.0.clone())
        }
    }

    fn decompose(branch: SelectorBranch) -> SimpleBuckets {
        let parser = FixedParser(branch);
        let mut buckets = SimpleBuckets::default();
        Decomposer::new(&parser)
            .decompose_into("ignored", &mut buckets)
            .unwrap();
        buckets
    }

    #[test]
    fn test_atomic_nodes_land_in_all_and_their_own_bucket() {
        let buckets = decompose(SelectorBranch {
            components: vec![
                Component::Type("div".into()),
                Component::Class("class".into()),
                Component::Combinator(Combinator::Descendant),
                Component::Id("id".into()),
                Component::Attribute("attribute".into()),
            ],
        });
        assert_eq!(buckets.all, vec!["div", ".class", "#id", "[attribute]"]);
        assert_eq!(buckets.types, vec!["div"]);
        assert_eq!(buckets.classes, vec![".class"]);
        assert_eq!(buckets.ids, vec!["#id"]);
        assert_eq!(buckets.attributes, vec!["[attribute]"]);
    }

    #[test]
    fn test_universal_contributes_only_to_all() {
        let buckets = decompose(SelectorBranch {
            components: vec![Component::Universal],
        });
        assert_eq!(buckets.all, vec!["*"]);
        assert!(buckets.types.is_empty());
    }

    #[test]
    fn test_not_argument_is_reexamined_but_not_itself_recorded() {
        let buckets = decompose(SelectorBranch {
            components: vec![
                Component::Class("class".into()),
                Component::PseudoClass {
                    name: "not".into(),
                    argument: Some(PseudoArgument::SelectorList(vec![SelectorBranch {
                        components: vec![Component::Class("class8".into())],
                    }])),
                },
            ],
        });
        assert_eq!(buckets.all, vec![".class", ".class8"]);
        assert_eq!(buckets.classes, vec![".class", ".class8"]);
    }

    #[test]
    fn test_nth_arguments_are_skipped_even_when_selector_shaped() {
        let buckets = decompose(SelectorBranch {
            components: vec![
                Component::Type("li".into()),
                Component::PseudoClass {
                    name: "nth-child".into(),
                    // "odd" parses as a type selector, but positional
                    // arguments are keywords, not selectors.
                    argument: Some(PseudoArgument::SelectorList(vec![SelectorBranch {
                        components: vec![Component::Type("odd".into())],
                    }])),
                },
            ],
        });
        assert_eq!(buckets.all, vec!["li"]);
        assert_eq!(buckets.types, vec!["li"]);
    }

    #[test]
    fn test_pseudo_element_and_comment_contribute_nothing() {
        let buckets = decompose(SelectorBranch {
            components: vec![
                Component::Class("class".into()),
                Component::PseudoElement("before".into()),
                Component::Comment(" note ".into()),
            ],
        });
        assert_eq!(buckets.all, vec![".class"]);
    }

    #[test]
    fn test_decomposition_is_idempotent_per_input() {
        let branch = SelectorBranch {
            components: vec![
                Component::Class("class".into()),
                Component::PseudoClass {
                    name: "hover".into(),
                    argument: None,
                },
            ],
        };
        let first = decompose(branch.clone());
        let second = decompose(branch);
        assert_eq!(first, second);
    }
}
