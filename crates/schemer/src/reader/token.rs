//! Lexical tokens

use std::fmt;

use crate::symbol::Symbol;
use crate::value::Value;

/// One lexical token.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// `#t` / `#f`
    Boolean(bool),
    /// Decimal number
    Number(f64),
    /// String literal contents, escapes resolved
    Str(String),
    /// `#\x`, `#\space`, `#\newline`
    Char(char),
    /// Case-folded identifier (also `+`, `-`, `...`)
    Symbol(Symbol),
    /// `(`
    OpenParen,
    /// `)`
    CloseParen,
    /// `#(`
    VectorOpen,
    /// `.`
    Dot,
    /// Quote-family prefix
    Abbreviation(Abbreviation),
}

impl Token {
    /// The datum this token stands for by itself, if it is an atom.
    pub fn into_atom(self) -> Result<Value, Token> {
        match self {
            Token::Boolean(b) => Ok(Value::Boolean(b)),
            Token::Number(n) => Ok(Value::Number(n)),
            Token::Str(s) => Ok(Value::from(s)),
            Token::Char(c) => Ok(Value::Char(c)),
            Token::Symbol(s) => Ok(Value::Symbol(s)),
            other => Err(other),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::OpenParen => write!(f, "("),
            Token::CloseParen => write!(f, ")"),
            Token::VectorOpen => write!(f, "#("),
            Token::Dot => write!(f, "."),
            Token::Abbreviation(a) => write!(f, "{}", a.prefix()),
            atom => match atom.clone().into_atom() {
                Ok(value) => write!(f, "{:?}", value),
                Err(_) => Ok(()),
            },
        }
    }
}

/// Reader shorthand that expands to a two-element list `(keyword datum)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Abbreviation {
    /// `'`
    Quote,
    /// `` ` ``
    Quasiquote,
    /// `,`
    Unquote,
    /// `,@`
    UnquoteSplicing,
    /// `#'`
    Syntax,
    /// ``#` ``
    Quasisyntax,
    /// `#,`
    Unsyntax,
    /// `#,@`
    UnsyntaxSplicing,
}

impl Abbreviation {
    const ALL: [Abbreviation; 8] = [
        Abbreviation::Quote,
        Abbreviation::Quasiquote,
        Abbreviation::Unquote,
        Abbreviation::UnquoteSplicing,
        Abbreviation::Syntax,
        Abbreviation::Quasisyntax,
        Abbreviation::Unsyntax,
        Abbreviation::UnsyntaxSplicing,
    ];

    /// The source text of the shorthand.
    pub fn prefix(self) -> &'static str {
        match self {
            Abbreviation::Quote => "'",
            Abbreviation::Quasiquote => "`",
            Abbreviation::Unquote => ",",
            Abbreviation::UnquoteSplicing => ",@",
            Abbreviation::Syntax => "#'",
            Abbreviation::Quasisyntax => "#`",
            Abbreviation::Unsyntax => "#,",
            Abbreviation::UnsyntaxSplicing => "#,@",
        }
    }

    /// The keyword the shorthand expands to.
    pub fn expansion(self) -> &'static str {
        match self {
            Abbreviation::Quote => "quote",
            Abbreviation::Quasiquote => "quasiquote",
            Abbreviation::Unquote => "unquote",
            Abbreviation::UnquoteSplicing => "unquote-splicing",
            Abbreviation::Syntax => "syntax",
            Abbreviation::Quasisyntax => "quasisyntax",
            Abbreviation::Unsyntax => "unsyntax",
            Abbreviation::UnsyntaxSplicing => "unsyntax-splicing",
        }
    }

    /// Reverse lookup from keyword text.
    pub fn from_expansion(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.expansion() == keyword)
    }
}
