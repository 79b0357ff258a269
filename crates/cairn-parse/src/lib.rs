//! Surface-form parser for cairn.
//!
//! Reads the bracketed text that `Display` on `Cell`/`Stack` produces:
//!
//! ```text
//! [[2 1 +]]                 program state: code [2 1 +], no data
//! [1.5f 2.5 "text" true]    float, double, text, bool
//! [typeof(int) 'a]          type tag literal, type variable
//! ['a 'b] -> ['b 'a]        signature (barewords are type names)
//! ```
//!
//! Quotations are written in code order: the first cell inside the
//! brackets is the top of the resulting stack.

use std::collections::HashMap;

use cairn_core::{Cell, Stack, TypeTag};
use thiserror::Error;

/// Error raised when text is not a well-formed cell.
#[derive(Clone, Debug, PartialEq, Error)]
#[error("{message} at offset {offset}")]
pub struct ParseError {
    pub message: String,
    /// Byte offset into the input.
    pub offset: usize,
}

impl ParseError {
    fn new(message: impl Into<String>, offset: usize) -> Self {
        Self {
            message: message.into(),
            offset,
        }
    }
}

/// What a bareword means.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Context {
    /// Barewords are symbols.
    Program,
    /// Barewords are type names.
    Signature,
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
    context: Context,
    names: Option<&'a HashMap<String, Cell>>,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str, context: Context) -> Self {
        Self {
            src,
            pos: 0,
            context,
            names: None,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos).copied()
    }

    /// Skip whitespace. Returns true if more input follows.
    fn skip_whitespace(&mut self) -> bool {
        while let Some(b) = self.peek() {
            if !b.is_ascii_whitespace() {
                return true;
            }
            self.pos += 1;
        }
        false
    }

    fn expect_end(&mut self) -> Result<(), ParseError> {
        if self.skip_whitespace() {
            return Err(ParseError::new("unexpected trailing input", self.pos));
        }
        Ok(())
    }

    fn cell(&mut self) -> Result<Cell, ParseError> {
        if !self.skip_whitespace() {
            return Err(ParseError::new("expected a cell", self.pos));
        }
        match self.peek() {
            Some(b'[') => self.quotation().map(Cell::Quotation),
            Some(b']') => Err(ParseError::new("unmatched ']'", self.pos)),
            Some(b'"') => self.text(),
            Some(b'\'') => self.variable(),
            _ => self.word(),
        }
    }

    fn quotation(&mut self) -> Result<Stack, ParseError> {
        let open = self.pos;
        self.pos += 1;
        let mut cells = Vec::new();
        loop {
            if !self.skip_whitespace() {
                return Err(ParseError::new("unclosed '['", open));
            }
            if self.peek() == Some(b']') {
                self.pos += 1;
                return Ok(Stack::from_code(cells));
            }
            cells.push(self.cell()?);
        }
    }

    fn text(&mut self) -> Result<Cell, ParseError> {
        let open = self.pos;
        self.pos += 1;
        let src = self.src;
        let mut out = String::new();
        let mut chars = src[self.pos..].char_indices();
        while let Some((i, c)) = chars.next() {
            match c {
                '"' => {
                    self.pos += i + 1;
                    return Ok(Cell::Text(out));
                }
                '\\' => {
                    let Some((j, escaped)) = chars.next() else {
                        break;
                    };
                    out.push(match escaped {
                        '"' => '"',
                        '\\' => '\\',
                        'n' => '\n',
                        't' => '\t',
                        'r' => '\r',
                        other => {
                            return Err(ParseError::new(
                                format!("unknown escape '\\{}'", other),
                                self.pos + j - 1,
                            ));
                        }
                    });
                }
                c => out.push(c),
            }
        }
        Err(ParseError::new("unterminated text", open))
    }

    fn variable(&mut self) -> Result<Cell, ParseError> {
        let start = self.pos;
        self.pos += 1;
        let name = self.token();
        if !name.starts_with(|c: char| c.is_alphabetic() || c == '_') {
            return Err(ParseError::new("expected a variable name after '", start));
        }
        Ok(Cell::Variable(name.to_owned()))
    }

    /// Read up to the next delimiter.
    fn token(&mut self) -> &'a str {
        let src = self.src;
        let start = self.pos;
        while let Some(b) = self.peek() {
            if b.is_ascii_whitespace() || b == b'[' || b == b']' || b == b'"' {
                break;
            }
            self.pos += 1;
        }
        &src[start..self.pos]
    }

    fn word(&mut self) -> Result<Cell, ParseError> {
        let start = self.pos;
        let word = self.token();

        if let Some(rest) = word.strip_prefix("typeof(") {
            return match rest.strip_suffix(')') {
                Some(name) if !name.is_empty() && !name.contains(['(', ')']) => {
                    Ok(Cell::Type(TypeTag::new(name)))
                }
                _ => Err(ParseError::new("malformed typeof(...)", start)),
            };
        }
        match word {
            "true" => return Ok(Cell::Bool(true)),
            "false" => return Ok(Cell::Bool(false)),
            _ => {}
        }
        if looks_numeric(word) {
            return number(word, start);
        }

        match self.context {
            Context::Signature => Ok(Cell::Type(TypeTag::new(word))),
            Context::Program => Ok(self
                .names
                .and_then(|names| names.get(word).cloned())
                .unwrap_or_else(|| Cell::Symbol(word.to_owned()))),
        }
    }
}

/// A token is a number if it starts with a digit, or a sign followed by one.
fn looks_numeric(word: &str) -> bool {
    let digits = word.strip_prefix('-').unwrap_or(word);
    digits.starts_with(|c: char| c.is_ascii_digit())
}

fn number(word: &str, offset: usize) -> Result<Cell, ParseError> {
    let bad = || ParseError::new(format!("malformed number '{}'", word), offset);

    if let Some(body) = word.strip_suffix('f') {
        return body.parse::<f32>().map(Cell::Float).map_err(|_| bad());
    }
    let digits = word.strip_prefix('-').unwrap_or(word);
    if digits.bytes().all(|b| b.is_ascii_digit()) {
        return word
            .parse::<i64>()
            .map(Cell::Int)
            .map_err(|_| ParseError::new(format!("integer '{}' out of range", word), offset));
    }
    word.parse::<f64>().map(Cell::Double).map_err(|_| bad())
}

/// Parse a single cell.
pub fn parse(text: &str) -> Result<Cell, ParseError> {
    let mut parser = Parser::new(text, Context::Program);
    let cell = parser.cell()?;
    parser.expect_end()?;
    Ok(cell)
}

/// Parse a single cell, replacing barewords found in `names` by their cell.
pub fn parse_with(text: &str, names: &HashMap<String, Cell>) -> Result<Cell, ParseError> {
    let mut parser = Parser::new(text, Context::Program);
    parser.names = Some(names);
    let cell = parser.cell()?;
    parser.expect_end()?;
    Ok(cell)
}

/// Parse a program state: one bracketed quotation whose contents become the
/// state, first cell on top.
///
/// `[[2 1 +]]` is a state with code `[2 1 +]` and no data.
pub fn parse_state(text: &str) -> Result<Stack, ParseError> {
    let mut parser = Parser::new(text, Context::Program);
    if !parser.skip_whitespace() || parser.peek() != Some(b'[') {
        return Err(ParseError::new("expected '[' to open a program state", parser.pos));
    }
    let state = parser.quotation()?;
    parser.expect_end()?;
    Ok(state)
}

/// Parse bare program text, e.g. `2 1 +`, into a code quotation with the
/// first cell on top.
pub fn parse_program(text: &str) -> Result<Stack, ParseError> {
    let mut parser = Parser::new(text, Context::Program);
    let mut cells = Vec::new();
    while parser.skip_whitespace() {
        cells.push(parser.cell()?);
    }
    Ok(Stack::from_code(cells))
}

/// Parse a bracketed list of types, e.g. `[int 'a]`.
pub fn parse_types(text: &str) -> Result<Stack, ParseError> {
    let mut parser = Parser::new(text, Context::Signature);
    let types = parser.types()?;
    parser.expect_end()?;
    Ok(types)
}

/// Parse a stack-effect signature `[consumed…] -> [produced…]`.
///
/// Both sides are listed top first, like any stack.
pub fn parse_signature(text: &str) -> Result<(Stack, Stack), ParseError> {
    let mut parser = Parser::new(text, Context::Signature);
    let consumes = parser.types()?;
    parser.skip_whitespace();
    if !parser.src[parser.pos..].starts_with("->") {
        return Err(ParseError::new("expected '->'", parser.pos));
    }
    parser.pos += 2;
    let produces = parser.types()?;
    parser.expect_end()?;
    Ok((consumes, produces))
}

impl Parser<'_> {
    fn types(&mut self) -> Result<Stack, ParseError> {
        if !self.skip_whitespace() || self.peek() != Some(b'[') {
            return Err(ParseError::new("expected '[' to open a type list", self.pos));
        }
        self.quotation()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(text: &str) {
        assert_eq!(parse(text).unwrap().to_string(), text);
    }

    #[test]
    fn scalars() {
        assert_eq!(parse("42").unwrap(), Cell::Int(42));
        assert_eq!(parse("-7").unwrap(), Cell::Int(-7));
        assert_eq!(parse("1.5f").unwrap(), Cell::Float(1.5));
        assert_eq!(parse("2.5").unwrap(), Cell::Double(2.5));
        assert_eq!(parse("1e3").unwrap(), Cell::Double(1000.0));
        assert_eq!(parse("true").unwrap(), Cell::Bool(true));
        assert_eq!(parse("\"a\\\"b\\n\"").unwrap(), Cell::text("a\"b\n"));
    }

    #[test]
    fn barewords() {
        assert_eq!(parse("+").unwrap(), Cell::symbol("+"));
        assert_eq!(parse("-").unwrap(), Cell::symbol("-"));
        assert_eq!(parse("minus").unwrap(), Cell::symbol("minus"));
        assert_eq!(parse("if").unwrap(), Cell::symbol("if"));
        assert_eq!(parse("typeof(int)").unwrap(), Cell::Type(TypeTag::INT));
        assert_eq!(parse("'a").unwrap(), Cell::variable("a"));
    }

    #[test]
    fn quotations_are_code_ordered() {
        let cell = parse("[2 1 +]").unwrap();
        let Cell::Quotation(code) = cell else {
            panic!("expected a quotation");
        };
        assert_eq!(code.peek(), Some(&Cell::Int(2)));
        assert_eq!(code.len(), 3);
    }

    #[test]
    fn states() {
        let state = parse_state("[[2 1 +]]").unwrap();
        assert_eq!(state.len(), 1);
        assert_eq!(state.to_string(), "[[2 1 +]]");

        let state = parse_state(" [ [] d c  10 ] ").unwrap();
        assert_eq!(state.to_string(), "[[] d c 10]");
    }

    #[test]
    fn programs() {
        let code = parse_program("2 [1] +").unwrap();
        assert_eq!(code.to_string(), "[2 [1] +]");
        assert_eq!(code.peek(), Some(&Cell::Int(2)));
        assert!(parse_program("  ").unwrap().is_empty());
        assert_eq!(parse_program("1 ]").unwrap_err().message, "unmatched ']'");
    }

    #[test]
    fn printed_forms_read_back() {
        roundtrip("[1 1.5f 2.5 -3 \"x y\" true [a [b]] 'v]");
        roundtrip("[]");
    }

    #[test]
    fn substitution_map() {
        let mut names = HashMap::new();
        names.insert("x".to_owned(), Cell::Int(9));
        assert_eq!(
            parse_with("[x y]", &names).unwrap(),
            Cell::quotation([Cell::Int(9), Cell::symbol("y")])
        );
    }

    #[test]
    fn signatures() {
        let (consumes, produces) = parse_signature("['a] -> ['a 'a]").unwrap();
        assert_eq!(consumes, Stack::from_code([Cell::variable("a")]));
        assert_eq!(produces.to_string(), "['a 'a]");

        let (consumes, produces) = parse_signature("[int text]->[bool]").unwrap();
        assert_eq!(consumes.peek(), Some(&Cell::Type(TypeTag::INT)));
        assert_eq!(produces, Stack::from_code([Cell::Type(TypeTag::BOOL)]));

        assert_eq!(parse_types("[]").unwrap(), Stack::new());
    }

    #[test]
    fn errors() {
        assert_eq!(parse("[1 2").unwrap_err(), ParseError::new("unclosed '['", 0));
        assert_eq!(parse("]").unwrap_err().message, "unmatched ']'");
        assert_eq!(parse("\"abc").unwrap_err().message, "unterminated text");
        assert_eq!(parse("typeof(int").unwrap_err().message, "malformed typeof(...)");
        assert_eq!(parse("1 2").unwrap_err(), ParseError::new("unexpected trailing input", 2));
        assert_eq!(parse("").unwrap_err().message, "expected a cell");
        assert!(parse("99999999999999999999").is_err());
        assert!(parse("1.2.3").is_err());
        assert!(parse_state("1").is_err());
        assert!(parse_signature("[a] [b]").is_err());
        assert_eq!(
            parse("[1 2").unwrap_err().to_string(),
            "unclosed '[' at offset 0"
        );
    }
}
