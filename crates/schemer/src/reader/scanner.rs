//! Character stream to token stream

use std::iter::Peekable;
use std::str::Chars;

use super::token::{Abbreviation, Token};
use crate::error::SyntaxError;
use crate::symbol::Symbol;

/// Line and column of the next unread character, both 1-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// Line number
    pub line: usize,
    /// Column number
    pub column: usize,
}

impl Default for Position {
    fn default() -> Self {
        Self { line: 1, column: 1 }
    }
}

/// Lazy tokenizer over a character stream.
///
/// Identifiers and `#`-syntax are case-folded to lowercase; string and
/// character literal contents keep their case.
///
/// # Example
///
/// ```
/// use schemer::reader::{Scanner, Token};
///
/// let mut scanner = Scanner::new("(Car x)");
/// assert_eq!(scanner.next_token().unwrap(), Some(Token::OpenParen));
/// assert_eq!(scanner.next_token().unwrap(), Some(Token::Symbol("car".into())));
/// ```
pub struct Scanner<I: Iterator<Item = char>> {
    input: Peekable<I>,

    /// Characters given back by a failed multi-character match
    pushback: Vec<char>,

    position: Position,
}

impl<'a> Scanner<Chars<'a>> {
    /// Scan a string slice.
    pub fn new(source: &'a str) -> Self {
        Self::from_chars(source.chars())
    }
}

impl<I: Iterator<Item = char>> Scanner<I> {
    /// Scan any character iterator.
    pub fn from_chars(input: I) -> Self {
        Self {
            input: input.peekable(),
            pushback: Vec::new(),
            position: Position::default(),
        }
    }

    /// Where scanning will resume.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Produce the next token, or `None` at end of input.
    ///
    /// # Errors
    ///
    /// Any malformed token, missing delimiter, bad string escape, or input
    /// ending inside a token.
    pub fn next_token(&mut self) -> Result<Option<Token>, SyntaxError> {
        self.skip_atmosphere();
        let Some(c) = self.peek() else {
            return Ok(None);
        };

        if is_initial(c) {
            return self.symbol().map(Some);
        }
        if c.is_ascii_digit() {
            return self.number().map(|n| Some(Token::Number(n)));
        }

        self.read();
        let token = match c {
            '#' => self.pound()?,
            '"' => self.string()?,
            '.' => self.dot()?,
            ',' => self.comma(),
            '+' => self.signed(1.0, "+")?,
            '-' => self.signed(-1.0, "-")?,
            '`' => Token::Abbreviation(Abbreviation::Quasiquote),
            '\'' => Token::Abbreviation(Abbreviation::Quote),
            '(' => Token::OpenParen,
            ')' => Token::CloseParen,
            other => return Err(SyntaxError::InvalidToken(other.to_string())),
        };
        Ok(Some(token))
    }

    // ═══════════════════════════════════════════════════════════════════
    // Token Rules
    // ═══════════════════════════════════════════════════════════════════

    /// Whitespace and `;` comments running to end of line.
    fn skip_atmosphere(&mut self) {
        let mut in_comment = false;
        while let Some(c) = self.peek_raw() {
            in_comment |= c == ';';
            in_comment &= c != '\r' && c != '\n';
            if !in_comment && !c.is_whitespace() {
                break;
            }
            self.read_raw();
        }
    }

    fn symbol(&mut self) -> Result<Token, SyntaxError> {
        let mut text = String::new();
        while let Some(c) = self.read() {
            text.push(c);
            match self.peek() {
                Some(next) if is_subsequent(next) => continue,
                _ => break,
            }
        }
        self.check_delimiter()?;
        Ok(Token::Symbol(Symbol::intern(&text)))
    }

    /// Digits and decimal points. The first character is taken as is, so a
    /// sign may be followed by anything that is not a delimiter.
    fn number(&mut self) -> Result<f64, SyntaxError> {
        let mut text = String::new();
        while let Some(c) = self.read() {
            text.push(c);
            match self.peek() {
                Some(next) if next.is_ascii_digit() || next == '.' => continue,
                _ => break,
            }
        }
        self.check_delimiter()?;
        text.parse::<f64>()
            .map_err(|_| SyntaxError::UnmetExpectation {
                found: text,
                expected: "number",
            })
    }

    /// `+` or `-` alone is a symbol; followed by more, it signs a number.
    /// `+inf.0`, `-inf.0` and `+nan.0` name the non-finite numbers.
    fn signed(&mut self, sign: f64, name: &str) -> Result<Token, SyntaxError> {
        match self.peek_raw() {
            None => Ok(Token::Symbol(Symbol::intern(name))),
            Some(c) if is_delimiter(c) => Ok(Token::Symbol(Symbol::intern(name))),
            Some(_) if self.read_match("inf.0") => {
                self.check_delimiter()?;
                Ok(Token::Number(sign * f64::INFINITY))
            }
            Some(_) if self.read_match("nan.0") => {
                self.check_delimiter()?;
                Ok(Token::Number(f64::NAN))
            }
            Some(_) => Ok(Token::Number(sign * self.number()?)),
        }
    }

    fn pound(&mut self) -> Result<Token, SyntaxError> {
        let c = self.read().ok_or(SyntaxError::UnexpectedEof)?;
        match c {
            '(' => Ok(Token::VectorOpen),
            '\'' => Ok(Token::Abbreviation(Abbreviation::Syntax)),
            '`' => Ok(Token::Abbreviation(Abbreviation::Quasisyntax)),
            ',' => {
                if self.peek_raw() == Some('@') {
                    self.read_raw();
                    Ok(Token::Abbreviation(Abbreviation::UnsyntaxSplicing))
                } else {
                    Ok(Token::Abbreviation(Abbreviation::Unsyntax))
                }
            }
            't' | 'f' => {
                self.check_delimiter()?;
                Ok(Token::Boolean(c == 't'))
            }
            '\\' => {
                let c = if self.read_match("newline") {
                    '\n'
                } else if self.read_match("space") {
                    ' '
                } else {
                    self.read_raw().ok_or(SyntaxError::UnexpectedEof)?
                };
                self.check_delimiter()?;
                Ok(Token::Char(c))
            }
            other => Err(SyntaxError::InvalidToken(format!("#{}", other))),
        }
    }

    /// Body of a string literal, after the opening quote.
    fn string(&mut self) -> Result<Token, SyntaxError> {
        let mut text = String::new();
        loop {
            match self.read_raw() {
                None => return Err(SyntaxError::UnexpectedEof),
                Some('"') => return Ok(Token::Str(text)),
                Some('\\') => match self.read_raw() {
                    None => return Err(SyntaxError::UnexpectedEof),
                    Some(c @ ('\\' | '"')) => text.push(c),
                    Some(other) => return Err(SyntaxError::InvalidEscape(other)),
                },
                Some(c) => text.push(c),
            }
        }
    }

    fn dot(&mut self) -> Result<Token, SyntaxError> {
        if self.read_match("..") {
            self.check_delimiter()?;
            return Ok(Token::Symbol(Symbol::intern("...")));
        }
        self.check_delimiter()?;
        Ok(Token::Dot)
    }

    fn comma(&mut self) -> Token {
        if self.peek_raw() == Some('@') {
            self.read_raw();
            Token::Abbreviation(Abbreviation::UnquoteSplicing)
        } else {
            Token::Abbreviation(Abbreviation::Unquote)
        }
    }

    fn check_delimiter(&mut self) -> Result<(), SyntaxError> {
        match self.peek_raw() {
            Some(c) if !is_delimiter(c) => Err(SyntaxError::ExpectedDelimiter(c)),
            _ => Ok(()),
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Character Access
    // ═══════════════════════════════════════════════════════════════════

    fn peek_raw(&mut self) -> Option<char> {
        match self.pushback.last() {
            Some(&c) => Some(c),
            None => self.input.peek().copied(),
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.peek_raw().map(|c| c.to_ascii_lowercase())
    }

    fn read_raw(&mut self) -> Option<char> {
        if let Some(c) = self.pushback.pop() {
            return Some(c);
        }
        let c = self.input.next()?;
        let line_break = c == '\n' || (c == '\r' && self.input.peek() != Some(&'\n'));
        if line_break {
            self.position.line += 1;
            self.position.column = 1;
        } else {
            self.position.column += 1;
        }
        Some(c)
    }

    fn read(&mut self) -> Option<char> {
        self.read_raw().map(|c| c.to_ascii_lowercase())
    }

    /// Consume `word` (case-insensitively) if it comes next; otherwise
    /// consume nothing.
    fn read_match(&mut self, word: &str) -> bool {
        let mut taken = Vec::with_capacity(word.len());
        for expected in word.chars() {
            match self.read_raw() {
                Some(c) => {
                    taken.push(c);
                    if !c.eq_ignore_ascii_case(&expected) {
                        self.unread(taken);
                        return false;
                    }
                }
                None => {
                    self.unread(taken);
                    return false;
                }
            }
        }
        true
    }

    fn unread(&mut self, taken: Vec<char>) {
        self.pushback.extend(taken.into_iter().rev());
    }
}

impl<I: Iterator<Item = char>> Iterator for Scanner<I> {
    type Item = Result<Token, SyntaxError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Character Classes
// ═══════════════════════════════════════════════════════════════════════

fn is_delimiter(c: char) -> bool {
    c.is_whitespace() || matches!(c, '(' | ')' | ';' | '"')
}

fn is_initial(c: char) -> bool {
    c.is_ascii_alphabetic() || is_special_initial(c)
}

fn is_special_initial(c: char) -> bool {
    matches!(
        c,
        '!' | '$' | '%' | '&' | '*' | '/' | ':' | '<' | '=' | '>' | '?' | '^' | '_' | '~'
    )
}

fn is_subsequent(c: char) -> bool {
    is_initial(c) || c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | '@')
}
