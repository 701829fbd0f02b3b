//! Stylesheet text to rule tree.
//!
//! A single forward pass over the input. Declarations are consumed but not
//! retained; the inventory only ever reads selector preludes and at-rule
//! names. Anything that looks like an orphan declaration while scanning for
//! rules (text ending in `;` or at the closing brace) is discarded, which
//! also covers declaration-only at-rule bodies such as `@font-face`.

use selscan_core::parser::{ParseError, StylesheetParser};
use selscan_core::types::{AtRule, Rule, StyleRule, Stylesheet};

pub struct CssStylesheetParser;

impl StylesheetParser for CssStylesheetParser {
    fn parse(&self, css: &str) -> Result<Stylesheet, ParseError> {
        let mut scanner = Scanner::new(css);
        let rules = scanner.parse_rules(false)?;
        Ok(Stylesheet { rules })
    }
}

struct Scanner {
    chars: Vec<char>,
    pos: usize,
}

impl Scanner {
    fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    fn skip_whitespace_and_comments(&mut self) -> Result<(), ParseError> {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.pos += 1;
                }
                Some('/') if self.peek_at(1) == Some('*') => {
                    self.skip_comment()?;
                }
                _ => return Ok(()),
            }
        }
    }

    fn skip_comment(&mut self) -> Result<(), ParseError> {
        let offset = self.pos;
        self.pos += 2;
        while let Some(c) = self.bump() {
            if c == '*' && self.peek() == Some('/') {
                self.pos += 1;
                return Ok(());
            }
        }
        Err(ParseError::Unclosed {
            construct: "comment",
            offset,
        })
    }

    fn skip_string(&mut self, quote: char) -> Result<(), ParseError> {
        let offset = self.pos;
        self.pos += 1;
        while let Some(c) = self.bump() {
            if c == '\\' {
                self.bump();
            } else if c == quote {
                return Ok(());
            }
        }
        Err(ParseError::Unclosed {
            construct: "string",
            offset,
        })
    }

    /// Parse rules until EOF, or until the matching `}` when inside a block.
    fn parse_rules(&mut self, in_block: bool) -> Result<Vec<Rule>, ParseError> {
        let block_offset = self.pos;
        let mut rules = Vec::new();
        loop {
            self.skip_whitespace_and_comments()?;
            match self.peek() {
                None => {
                    if in_block {
                        return Err(ParseError::Unclosed {
                            construct: "block",
                            offset: block_offset,
                        });
                    }
                    return Ok(rules);
                }
                Some('}') => {
                    self.pos += 1;
                    if in_block {
                        return Ok(rules);
                    }
                    // Stray closing brace at the top level; drop it.
                }
                Some('@') => rules.push(self.parse_at_rule()?),
                Some(_) => {
                    if let Some(rule) = self.parse_qualified_rule()? {
                        rules.push(Rule::Style(rule));
                    }
                }
            }
        }
    }

    fn parse_at_rule(&mut self) -> Result<Rule, ParseError> {
        self.pos += 1; // '@'
        let mut name = String::new();
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                name.push(c);
                self.pos += 1;
            } else {
                break;
            }
        }

        let (prelude, terminator) = self.read_prelude()?;
        let rules = match terminator {
            Some('{') => {
                self.pos += 1;
                self.parse_rules(true)?
            }
            Some(';') => {
                self.pos += 1;
                Vec::new()
            }
            // Statement at-rule at EOF, e.g. a trailing `@charset "utf-8"`.
            _ => Vec::new(),
        };

        Ok(Rule::At(AtRule {
            name,
            prelude: prelude.trim().to_string(),
            rules,
        }))
    }

    /// Returns `Ok(None)` for non-rule text (declarations encountered while
    /// scanning an at-rule body that holds no nested rules).
    fn parse_qualified_rule(&mut self) -> Result<Option<StyleRule>, ParseError> {
        let (prelude, terminator) = self.read_prelude()?;
        match terminator {
            Some('{') => {
                self.pos += 1;
                self.skip_block()?;
                Ok(Some(StyleRule {
                    selectors: split_branches(&prelude),
                }))
            }
            Some(';') => {
                self.pos += 1;
                Ok(None)
            }
            // '}' or EOF: leave the terminator for the caller.
            _ => Ok(None),
        }
    }

    /// Read raw prelude text up to `{`, `;`, an unnested `}`, or EOF,
    /// without consuming the terminator. Strings and comments are opaque.
    fn read_prelude(&mut self) -> Result<(String, Option<char>), ParseError> {
        let mut prelude = String::new();
        let mut depth = 0usize;
        loop {
            match self.peek() {
                None => return Ok((prelude, None)),
                Some('{') | Some(';') if depth == 0 => return Ok((prelude, self.peek())),
                Some('}') if depth == 0 => return Ok((prelude, Some('}'))),
                Some('/') if self.peek_at(1) == Some('*') => {
                    self.skip_comment()?;
                    prelude.push(' ');
                }
                Some(q @ ('"' | '\'')) => {
                    let start = self.pos;
                    self.skip_string(q)?;
                    prelude.extend(&self.chars[start..self.pos]);
                }
                Some('\\') => {
                    prelude.push('\\');
                    self.pos += 1;
                    if let Some(c) = self.bump() {
                        prelude.push(c);
                    }
                }
                Some(c) => {
                    if c == '(' || c == '[' {
                        depth += 1;
                    } else if c == ')' || c == ']' {
                        depth = depth.saturating_sub(1);
                    }
                    prelude.push(c);
                    self.pos += 1;
                }
            }
        }
    }

    /// Consume a `{ ... }` block body after its opening brace, honoring
    /// nesting, strings, comments and escapes.
    fn skip_block(&mut self) -> Result<(), ParseError> {
        let offset = self.pos - 1;
        let mut depth = 1usize;
        loop {
            match self.peek() {
                None => {
                    return Err(ParseError::Unclosed {
                        construct: "block",
                        offset,
                    })
                }
                Some('/') if self.peek_at(1) == Some('*') => self.skip_comment()?,
                Some(q @ ('"' | '\'')) => self.skip_string(q)?,
                Some('\\') => {
                    self.pos += 1;
                    self.bump();
                }
                Some('{') => {
                    depth += 1;
                    self.pos += 1;
                }
                Some('}') => {
                    depth -= 1;
                    self.pos += 1;
                    if depth == 0 {
                        return Ok(());
                    }
                }
                Some(_) => {
                    self.pos += 1;
                }
            }
        }
    }
}

/// Split a selector prelude on top-level commas. Commas inside brackets,
/// parentheses, strings, or behind an escape do not split.
fn split_branches(prelude: &str) -> Vec<String> {
    let mut branches = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut chars = prelude.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                current.push(c);
                if let Some(next) = chars.next() {
                    current.push(next);
                }
            }
            '"' | '\'' => {
                match quote {
                    None => quote = Some(c),
                    Some(q) if q == c => quote = None,
                    Some(_) => {}
                }
                current.push(c);
            }
            '(' | '[' if quote.is_none() => {
                depth += 1;
                current.push(c);
            }
            ')' | ']' if quote.is_none() => {
                depth = depth.saturating_sub(1);
                current.push(c);
            }
            ',' if depth == 0 && quote.is_none() => {
                branches.push(std::mem::take(&mut current));
                current.clear();
            }
            _ => current.push(c),
        }
    }
    branches.push(current);
    branches
        .into_iter()
        .map(|b| b.trim().to_string())
        .filter(|b| !b.is_empty())
        .collect()
}
