use thiserror::Error;

use crate::types::{SelectorBranch, Stylesheet};

/// Parse failures surfaced by the collaborator parsers. None of these are
/// recovered inside the core; a malformed input fails its whole run.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("unclosed {construct} starting at offset {offset}")]
    Unclosed { construct: &'static str, offset: usize },

    #[error("unexpected character '{found}' at offset {offset} in selector '{selector}'")]
    UnexpectedChar {
        selector: String,
        found: char,
        offset: usize,
    },

    #[error("empty selector branch in '{selector}'")]
    EmptyBranch { selector: String },
}

/// Parses stylesheet text into a rule tree.
pub trait StylesheetParser: Send + Sync {
    fn parse(&self, css: &str) -> Result<Stylesheet, ParseError>;
}

/// Parses one selector branch into its component tree.
pub trait SelectorParser: Send + Sync {
    fn parse_selector(&self, selector: &str) -> Result<SelectorBranch, ParseError>;
}
