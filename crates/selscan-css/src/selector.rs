//! One selector branch to its component tree.
//!
//! Identifier escapes are kept exactly as written so that canonical forms
//! round-trip (`.class-1\.5` classifies as the class `.class-1\.5`, not a
//! mangled unescaped variant). Functional pseudo-class arguments are parsed
//! as a nested selector list when they read as one; anything else (index
//! expressions like `2n+1`, language ranges) is kept as a raw expression.

use selscan_core::parser::{ParseError, SelectorParser};
use selscan_core::types::{Combinator, Component, PseudoArgument, SelectorBranch};

pub struct CssSelectorParser;

impl SelectorParser for CssSelectorParser {
    fn parse_selector(&self, selector: &str) -> Result<SelectorBranch, ParseError> {
        parse_branch(selector)
    }
}

fn parse_branch(selector: &str) -> Result<SelectorBranch, ParseError> {
    let components = Scanner::new(selector).parse_components()?;
    if components.is_empty() {
        return Err(ParseError::EmptyBranch {
            selector: selector.to_string(),
        });
    }
    if matches!(components.last(), Some(Component::Combinator(_))) {
        return Err(ParseError::UnexpectedChar {
            selector: selector.to_string(),
            found: match components.last() {
                Some(Component::Combinator(Combinator::Child)) => '>',
                Some(Component::Combinator(Combinator::NextSibling)) => '+',
                Some(Component::Combinator(Combinator::SubsequentSibling)) => '~',
                _ => ' ',
            },
            offset: selector.chars().count(),
        });
    }
    Ok(SelectorBranch { components })
}

struct Scanner<'a> {
    selector: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(selector: &'a str) -> Self {
        Self {
            selector,
            chars: selector.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn unexpected(&self, found: char) -> ParseError {
        ParseError::UnexpectedChar {
            selector: self.selector.to_string(),
            found,
            offset: self.pos,
        }
    }

    fn skip_whitespace(&mut self) -> bool {
        let before = self.pos;
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
        self.pos != before
    }

    fn parse_components(&mut self) -> Result<Vec<Component>, ParseError> {
        let mut components: Vec<Component> = Vec::new();
        loop {
            let had_whitespace = self.skip_whitespace();
            let Some(c) = self.peek() else {
                return Ok(components);
            };

            if let Some(combinator) = explicit_combinator(c) {
                if components.is_empty()
                    || matches!(components.last(), Some(Component::Combinator(_)))
                {
                    return Err(self.unexpected(c));
                }
                self.pos += 1;
                components.push(Component::Combinator(combinator));
                continue;
            }

            // Whitespace between two compounds is a descendant combinator.
            if had_whitespace
                && !components.is_empty()
                && !matches!(components.last(), Some(Component::Combinator(_)))
            {
                components.push(Component::Combinator(Combinator::Descendant));
            }

            components.push(self.parse_simple(c)?);
        }
    }

    fn parse_simple(&mut self, c: char) -> Result<Component, ParseError> {
        match c {
            '*' => {
                self.pos += 1;
                Ok(Component::Universal)
            }
            '.' => {
                self.pos += 1;
                let name = self.read_identifier()?;
                Ok(Component::Class(name))
            }
            '#' => {
                self.pos += 1;
                let name = self.read_identifier()?;
                Ok(Component::Id(name))
            }
            '[' => self.read_attribute(),
            ':' => self.read_pseudo(),
            '/' if self.peek_at(1) == Some('*') => self.read_comment(),
            _ if is_identifier_start(c) => {
                let name = self.read_identifier()?;
                Ok(Component::Type(name))
            }
            other => Err(self.unexpected(other)),
        }
    }

    fn read_identifier(&mut self) -> Result<String, ParseError> {
        let mut name = String::new();
        while let Some(c) = self.peek() {
            if c == '\\' {
                // Escapes are preserved verbatim, backslash included.
                name.push(c);
                self.pos += 1;
                if let Some(escaped) = self.peek() {
                    name.push(escaped);
                    self.pos += 1;
                }
            } else if is_identifier_char(c) {
                name.push(c);
                self.pos += 1;
            } else {
                break;
            }
        }
        if name.is_empty() {
            let found = self.peek().unwrap_or(' ');
            return Err(self.unexpected(found));
        }
        Ok(name)
    }

    fn read_attribute(&mut self) -> Result<Component, ParseError> {
        let offset = self.pos;
        self.pos += 1; // '['
        let mut body = String::new();
        loop {
            match self.peek() {
                None => {
                    return Err(ParseError::Unclosed {
                        construct: "attribute selector",
                        offset,
                    })
                }
                Some(']') => {
                    self.pos += 1;
                    return Ok(Component::Attribute(body));
                }
                Some(q @ ('"' | '\'')) => {
                    body.push(q);
                    self.pos += 1;
                    loop {
                        match self.peek() {
                            None => {
                                return Err(ParseError::Unclosed {
                                    construct: "string",
                                    offset,
                                })
                            }
                            Some('\\') => {
                                body.push('\\');
                                self.pos += 1;
                                if let Some(escaped) = self.peek() {
                                    body.push(escaped);
                                    self.pos += 1;
                                }
                            }
                            Some(c) => {
                                body.push(c);
                                self.pos += 1;
                                if c == q {
                                    break;
                                }
                            }
                        }
                    }
                }
                Some('\\') => {
                    body.push('\\');
                    self.pos += 1;
                    if let Some(escaped) = self.peek() {
                        body.push(escaped);
                        self.pos += 1;
                    }
                }
                Some(c) => {
                    body.push(c);
                    self.pos += 1;
                }
            }
        }
    }

    fn read_comment(&mut self) -> Result<Component, ParseError> {
        let offset = self.pos;
        self.pos += 2; // "/*"
        let mut text = String::new();
        loop {
            match self.peek() {
                None => {
                    return Err(ParseError::Unclosed {
                        construct: "comment",
                        offset,
                    })
                }
                Some('*') if self.peek_at(1) == Some('/') => {
                    self.pos += 2;
                    return Ok(Component::Comment(text));
                }
                Some(c) => {
                    text.push(c);
                    self.pos += 1;
                }
            }
        }
    }

    fn read_pseudo(&mut self) -> Result<Component, ParseError> {
        self.pos += 1; // ':'
        let element = if self.peek() == Some(':') {
            self.pos += 1;
            true
        } else {
            false
        };
        let name = self.read_identifier()?;

        if element {
            return Ok(Component::PseudoElement(name));
        }

        let argument = if self.peek() == Some('(') {
            Some(self.read_pseudo_argument()?)
        } else {
            None
        };
        Ok(Component::PseudoClass { name, argument })
    }

    fn read_pseudo_argument(&mut self) -> Result<PseudoArgument, ParseError> {
        let offset = self.pos;
        self.pos += 1; // '('
        let mut raw = String::new();
        let mut depth = 1usize;
        loop {
            match self.peek() {
                None => {
                    return Err(ParseError::Unclosed {
                        construct: "pseudo-class arguments",
                        offset,
                    })
                }
                Some('\\') => {
                    raw.push('\\');
                    self.pos += 1;
                    if let Some(escaped) = self.peek() {
                        raw.push(escaped);
                        self.pos += 1;
                    }
                }
                Some('(') => {
                    depth += 1;
                    raw.push('(');
                    self.pos += 1;
                }
                Some(')') => {
                    depth -= 1;
                    self.pos += 1;
                    if depth == 0 {
                        break;
                    }
                    raw.push(')');
                }
                Some(c) => {
                    raw.push(c);
                    self.pos += 1;
                }
            }
        }
        Ok(parse_argument(&raw))
    }
}

/// Selector-list interpretation first, raw expression as the fallback.
/// A piece only counts as a selector when its canonical form reproduces the
/// written text; index expressions like `2n+1` tokenize but fail that
/// round-trip, so they stay raw.
fn parse_argument(raw: &str) -> PseudoArgument {
    let mut branches = Vec::new();
    for piece in split_top_level_commas(raw) {
        match parse_branch(&piece) {
            Ok(branch) if branch.to_string() == piece => branches.push(branch),
            _ => return PseudoArgument::Expression(raw.trim().to_string()),
        }
    }
    if branches.is_empty() {
        return PseudoArgument::Expression(raw.trim().to_string());
    }
    PseudoArgument::SelectorList(branches)
}

fn split_top_level_commas(raw: &str) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                current.push(c);
                if let Some(next) = chars.next() {
                    current.push(next);
                }
            }
            '(' | '[' => {
                depth += 1;
                current.push(c);
            }
            ')' | ']' => {
                depth = depth.saturating_sub(1);
                current.push(c);
            }
            ',' if depth == 0 => {
                pieces.push(std::mem::take(&mut current));
            }
            _ => current.push(c),
        }
    }
    pieces.push(current);
    pieces
        .into_iter()
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect()
}

fn explicit_combinator(c: char) -> Option<Combinator> {
    match c {
        '>' => Some(Combinator::Child),
        '+' => Some(Combinator::NextSibling),
        '~' => Some(Combinator::SubsequentSibling),
        _ => None,
    }
}

fn is_identifier_start(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_' || c == '\\' || c == '%' || !c.is_ascii()
}

fn is_identifier_char(c: char) -> bool {
    is_identifier_start(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(selector: &str) -> Vec<Component> {
        CssSelectorParser
            .parse_selector(selector)
            .unwrap()
            .components
    }

    #[test]
    fn test_single_simple_selectors() {
        assert_eq!(parse("*"), vec![Component::Universal]);
        assert_eq!(parse("div"), vec![Component::Type("div".into())]);
        assert_eq!(parse(".class"), vec![Component::Class("class".into())]);
        assert_eq!(parse("#id"), vec![Component::Id("id".into())]);
        assert_eq!(
            parse("[attribute]"),
            vec![Component::Attribute("attribute".into())]
        );
    }

    #[test]
    fn test_compound_selector() {
        assert_eq!(
            parse("div.class#id"),
            vec![
                Component::Type("div".into()),
                Component::Class("class".into()),
                Component::Id("id".into()),
            ]
        );
    }

    #[test]
    fn test_combinators_with_and_without_spaces() {
        let expected = vec![
            Component::Class("a".into()),
            Component::Combinator(Combinator::Child),
            Component::Class("b".into()),
        ];
        assert_eq!(parse(".a > .b"), expected);
        assert_eq!(parse(".a>.b"), expected);

        assert_eq!(
            parse(".a .b"),
            vec![
                Component::Class("a".into()),
                Component::Combinator(Combinator::Descendant),
                Component::Class("b".into()),
            ]
        );
        assert_eq!(
            parse(".a ~ .b")[1],
            Component::Combinator(Combinator::SubsequentSibling)
        );
        assert_eq!(
            parse(".a + .b")[1],
            Component::Combinator(Combinator::NextSibling)
        );
    }

    #[test]
    fn test_escaped_identifiers_are_preserved() {
        assert_eq!(
            parse(".class-1\\.5"),
            vec![Component::Class("class-1\\.5".into())]
        );
        assert_eq!(
            parse(".class-\\[36px\\]"),
            vec![Component::Class("class-\\[36px\\]".into())]
        );
    }

    #[test]
    fn test_attribute_with_quoted_value() {
        assert_eq!(
            parse("[href^=\"https\"]"),
            vec![Component::Attribute("href^=\"https\"".into())]
        );
        // A bracket inside a quoted value does not close the selector.
        assert_eq!(
            parse("[data-x=\"a]b\"]"),
            vec![Component::Attribute("data-x=\"a]b\"".into())]
        );
    }

    #[test]
    fn test_pseudo_class_and_element() {
        assert_eq!(
            parse(".class:hover"),
            vec![
                Component::Class("class".into()),
                Component::PseudoClass {
                    name: "hover".into(),
                    argument: None
                },
            ]
        );
        assert_eq!(
            parse(".class::before")[1],
            Component::PseudoElement("before".into())
        );
    }

    #[test]
    fn test_not_argument_parses_as_selector_list() {
        let components = parse(":not(.class8, div)");
        let Component::PseudoClass { name, argument } = &components[0] else {
            panic!("expected pseudo-class");
        };
        assert_eq!(name, "not");
        let Some(PseudoArgument::SelectorList(branches)) = argument else {
            panic!("expected selector list");
        };
        assert_eq!(branches.len(), 2);
        assert_eq!(branches[0].components, vec![Component::Class("class8".into())]);
        assert_eq!(branches[1].components, vec![Component::Type("div".into())]);
    }

    #[test]
    fn test_nth_expression_argument_falls_back_to_raw() {
        let components = parse("li:nth-child(2n+1)");
        let Component::PseudoClass { name, argument } = &components[1] else {
            panic!("expected pseudo-class");
        };
        assert_eq!(name, "nth-child");
        // "2n+1" tokenizes, but its canonical selector form would be
        // "2n + 1", so the selector-list interpretation is rejected.
        match argument {
            Some(PseudoArgument::Expression(expr)) => assert_eq!(expr, "2n+1"),
            Some(PseudoArgument::SelectorList(_)) => {
                panic!("index expression must not parse as a selector list")
            }
            None => panic!("expected an argument"),
        }
    }

    #[test]
    fn test_keyframe_marker_parses_as_type_like_token() {
        // Frame markers never reach the decomposer, but the parser still
        // has to accept them without failing a synthetic call.
        assert_eq!(parse("0%"), vec![Component::Type("0%".into())]);
    }

    #[test]
    fn test_comment_component() {
        assert_eq!(
            parse(".a/* note */.b"),
            vec![
                Component::Class("a".into()),
                Component::Comment(" note ".into()),
                Component::Class("b".into()),
            ]
        );
    }

    #[test]
    fn test_malformed_selectors_error() {
        assert!(CssSelectorParser.parse_selector("").is_err());
        assert!(CssSelectorParser.parse_selector("   ").is_err());
        assert!(CssSelectorParser.parse_selector(".a >").is_err());
        assert!(CssSelectorParser.parse_selector("> .a").is_err());
        assert!(CssSelectorParser.parse_selector("[unclosed").is_err());
        assert!(CssSelectorParser.parse_selector(".").is_err());
    }

    #[test]
    fn test_canonical_form_round_trips() {
        for selector in [
            ".class > .class4",
            "div.class#id",
            "[href^=\"https\"]",
            ".class:not(.class8)",
            "li:nth-child(2n+1)",
            ".class::before",
        ] {
            assert_eq!(parse_branch(selector).unwrap().to_string(), selector);
        }
    }
}
