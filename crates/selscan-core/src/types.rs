use std::fmt;

use serde::{Deserialize, Serialize};

/// A parsed stylesheet: a tree of style rules and at-rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stylesheet {
    pub rules: Vec<Rule>,
}

/// A top-level or nested rule node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rule {
    Style(StyleRule),
    At(AtRule),
}

/// A style rule. The selector list is already split on top-level commas,
/// one trimmed branch per entry. Declarations are not retained; nothing in
/// the inventory reads them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleRule {
    pub selectors: Vec<String>,
}

/// An at-rule. `rules` is empty for statement at-rules such as `@import`
/// and for at-rules whose block holds only declarations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtRule {
    /// Name without the leading `@` (e.g. "media", "-webkit-keyframes").
    pub name: String,
    pub prelude: String,
    pub rules: Vec<Rule>,
}

/// A structural operator joining two compound selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Combinator {
    Descendant,
    Child,
    NextSibling,
    SubsequentSibling,
}

impl fmt::Display for Combinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Combinator::Descendant => write!(f, " "),
            Combinator::Child => write!(f, " > "),
            Combinator::NextSibling => write!(f, " + "),
            Combinator::SubsequentSibling => write!(f, " ~ "),
        }
    }
}

/// One comma-separated branch of a selector list, as a component sequence.
/// This is the grouping node of the component tree: it wraps components but
/// is not itself an atomic selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorBranch {
    pub components: Vec<Component>,
}

impl fmt::Display for SelectorBranch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for component in &self.components {
            write!(f, "{component}")?;
        }
        Ok(())
    }
}

/// Argument of a functional pseudo-class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PseudoArgument {
    /// A nested selector list, e.g. the `.a, .b` in `:not(.a, .b)`.
    SelectorList(Vec<SelectorBranch>),
    /// A non-selector expression, e.g. the `2n+1` in `:nth-child(2n+1)`.
    Expression(String),
}

/// An atomic unit of a selector. Identifier text is stored exactly as
/// written, escapes included, so the canonical form round-trips.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Component {
    Universal,
    Type(String),
    Id(String),
    Class(String),
    /// Raw attribute selector body without the surrounding brackets,
    /// e.g. `href^="https"` for `[href^="https"]`.
    Attribute(String),
    PseudoClass {
        /// Name without the leading colon (e.g. "hover", "nth-child").
        name: String,
        argument: Option<PseudoArgument>,
    },
    /// Name without the leading colons (e.g. "before").
    PseudoElement(String),
    Combinator(Combinator),
    Comment(String),
}

impl Component {
    /// True for positional pseudo-classes (`:nth-child`, `:nth-of-type`, ...)
    /// whose argument is an index expression rather than a selector.
    pub fn is_positional_pseudo(&self) -> bool {
        matches!(self, Component::PseudoClass { name, .. } if name.starts_with("nth-"))
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Component::Universal => write!(f, "*"),
            Component::Type(name) => write!(f, "{name}"),
            Component::Id(name) => write!(f, "#{name}"),
            Component::Class(name) => write!(f, ".{name}"),
            Component::Attribute(body) => write!(f, "[{body}]"),
            Component::PseudoClass { name, argument } => {
                write!(f, ":{name}")?;
                match argument {
                    None => Ok(()),
                    Some(PseudoArgument::Expression(expr)) => write!(f, "({expr})"),
                    Some(PseudoArgument::SelectorList(branches)) => {
                        write!(f, "(")?;
                        for (i, branch) in branches.iter().enumerate() {
                            if i > 0 {
                                write!(f, ", ")?;
                            }
                            write!(f, "{branch}")?;
                        }
                        write!(f, ")")
                    }
                }
            }
            Component::PseudoElement(name) => write!(f, "::{name}"),
            Component::Combinator(combinator) => write!(f, "{combinator}"),
            Component::Comment(text) => write!(f, "/*{text}*/"),
        }
    }
}
