//! S-expression reader
//!
//! Turns source text into [`Datum`] trees. The reader is purely syntactic:
//! `(if a b)` comes out as a three-element list, and the parser decides
//! later that `if` is a special form.

mod scanner;
mod token;

pub use scanner::{Position, Scanner};
pub use token::{Abbreviation, Token};

use std::str::Chars;

use crate::error::SyntaxError;
use crate::value::{Datum, Value};

/// Deepest nesting of lists, vectors and abbreviations the reader accepts.
///
/// The parser and printer walk data recursively; the bound keeps them
/// within a thread's native stack.
pub const MAX_NESTING: usize = 512;

/// A compound datum still being read.
enum Partial {
    /// Inside `(`, items so far
    List(Vec<Datum>),

    /// Inside `#(`, items so far
    Vector(Vec<Datum>),

    /// After ` . `, waiting for the tail
    Dotted(Vec<Datum>),

    /// After a quote-family prefix, waiting for its datum
    Abbreviation(Abbreviation),
}

/// Open a new compound form; nothing is complete yet.
fn open_partial(open: &mut Vec<Partial>, partial: Partial) -> Result<Option<Datum>, SyntaxError> {
    if open.len() >= MAX_NESTING {
        return Err(SyntaxError::NestingTooDeep { limit: MAX_NESTING });
    }
    open.push(partial);
    Ok(None)
}

/// Builds one datum at a time from a token stream.
///
/// # Example
///
/// ```
/// use schemer::reader::Reader;
///
/// let mut reader = Reader::new("(a . b) #(1 2) 'c");
/// let data: Vec<String> = reader
///     .by_ref()
///     .map(|d| d.unwrap().write_string())
///     .collect();
/// assert_eq!(data, vec!["(a . b)", "#(1 2)", "'c"]);
/// ```
pub struct Reader<I: Iterator<Item = char>> {
    scanner: Scanner<I>,
}

impl<'a> Reader<Chars<'a>> {
    /// Read from a string slice.
    pub fn new(source: &'a str) -> Self {
        Self::from_chars(source.chars())
    }
}

impl<I: Iterator<Item = char>> Reader<I> {
    /// Read from any character iterator.
    pub fn from_chars(input: I) -> Self {
        Self {
            scanner: Scanner::from_chars(input),
        }
    }

    /// Where reading will resume.
    pub fn position(&self) -> Position {
        self.scanner.position()
    }

    /// Read the next complete datum, or `None` once no tokens remain.
    ///
    /// # Errors
    ///
    /// Scanner errors pass through. A stray `)` or `.` is
    /// `UnexpectedToken`, input ending inside a list or vector is
    /// `UnexpectedEof`, and data nested more than [`MAX_NESTING`] levels
    /// deep is `NestingTooDeep`.
    pub fn next_datum(&mut self) -> Result<Option<Datum>, SyntaxError> {
        match self.scanner.next_token()? {
            Some(token) => self.datum_from(token).map(Some),
            None => Ok(None),
        }
    }

    /// Build one datum starting at `token`.
    ///
    /// Open lists, vectors and abbreviations live on an explicit stack, so
    /// nesting depth costs heap, not native stack.
    fn datum_from(&mut self, mut token: Token) -> Result<Datum, SyntaxError> {
        let mut open: Vec<Partial> = Vec::new();
        loop {
            let mut complete = match token {
                Token::OpenParen => open_partial(&mut open, Partial::List(Vec::new()))?,
                Token::VectorOpen => open_partial(&mut open, Partial::Vector(Vec::new()))?,
                Token::Abbreviation(abbreviation) => {
                    open_partial(&mut open, Partial::Abbreviation(abbreviation))?
                }
                Token::CloseParen => match open.pop() {
                    Some(Partial::List(items)) => Some(Value::list(items)),
                    Some(Partial::Vector(items)) => Some(Value::vector(items)),
                    _ => return Err(SyntaxError::UnexpectedToken(")".to_string())),
                },
                Token::Dot => match open.pop() {
                    Some(Partial::List(items)) if !items.is_empty() => {
                        open.push(Partial::Dotted(items));
                        None
                    }
                    _ => return Err(SyntaxError::UnexpectedToken(".".to_string())),
                },
                atom => Some(
                    atom.into_atom()
                        .map_err(|token| SyntaxError::UnexpectedToken(token.to_string()))?,
                ),
            };

            // Hand each finished datum to the innermost open form
            while let Some(datum) = complete.take() {
                match open.pop() {
                    None => return Ok(datum),
                    Some(Partial::List(mut items)) => {
                        items.push(datum);
                        open.push(Partial::List(items));
                    }
                    Some(Partial::Vector(mut items)) => {
                        items.push(datum);
                        open.push(Partial::Vector(items));
                    }
                    Some(Partial::Abbreviation(abbreviation)) => {
                        complete = Some(Value::list(vec![
                            Value::symbol(abbreviation.expansion()),
                            datum,
                        ]));
                    }
                    Some(Partial::Dotted(items)) => match self.expect_token()? {
                        Token::CloseParen => complete = Some(Value::list_with_tail(items, datum)),
                        other => return Err(SyntaxError::ExpectedCloseParen(other.to_string())),
                    },
                }
            }

            token = self.expect_token()?;
        }
    }

    fn expect_token(&mut self) -> Result<Token, SyntaxError> {
        self.scanner
            .next_token()?
            .ok_or(SyntaxError::UnexpectedEof)
    }
}

impl<I: Iterator<Item = char>> Iterator for Reader<I> {
    type Item = Result<Datum, SyntaxError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_datum().transpose()
    }
}

/// Read every datum in `source`.
///
/// # Errors
///
/// The first syntax error encountered.
pub fn read_all(source: &str) -> Result<Vec<Datum>, SyntaxError> {
    Reader::new(source).collect()
}
