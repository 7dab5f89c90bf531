//! Display and Debug implementations for Value
//!
//! `Debug` renders the machine-readable *write* form; `Display` renders the
//! *display* form, which differs only in printing strings and characters raw.

use std::fmt;

use super::*;
use crate::reader::Abbreviation;

/// Which of the two external representations to produce.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Style {
    Write,
    Display,
}

/// Pending output while rendering compound values.
enum Piece {
    Value(Value),
    Text(&'static str),
}

/// Render `value` without native recursion; nested pairs and vectors are
/// expanded onto an explicit stack of pieces.
fn render(value: &Value, style: Style, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut pending = vec![Piece::Value(value.clone())];
    while let Some(piece) = pending.pop() {
        match piece {
            Piece::Text(text) => f.write_str(text)?,
            Piece::Value(Value::Pair(pair)) => expand_pair(&pair, &mut pending),
            Piece::Value(Value::Vector(vector)) => {
                pending.push(Piece::Text(")"));
                push_separated(vector.to_vec(), &mut pending);
                pending.push(Piece::Text("#("));
            }
            Piece::Value(atom) => render_atom(&atom, style, f)?,
        }
    }
    Ok(())
}

/// Push `items` so they pop in order, separated by single spaces.
fn push_separated(items: Vec<Value>, pending: &mut Vec<Piece>) {
    for (i, item) in items.into_iter().enumerate().rev() {
        pending.push(Piece::Value(item));
        if i > 0 {
            pending.push(Piece::Text(" "));
        }
    }
}

fn expand_pair(pair: &Pair, pending: &mut Vec<Piece>) {
    if let Some(prefix) = abbreviation_prefix(pair) {
        if let Value::Pair(rest) = pair.cdr() {
            pending.push(Piece::Value(rest.car()));
            pending.push(Piece::Text(prefix));
            return;
        }
    }

    let mut items = vec![pair.car()];
    let mut rest = pair.cdr();
    while let Value::Pair(next) = rest {
        items.push(next.car());
        rest = next.cdr();
    }

    pending.push(Piece::Text(")"));
    if !rest.is_null() {
        pending.push(Piece::Value(rest));
        pending.push(Piece::Text(" . "));
    }
    push_separated(items, pending);
    pending.push(Piece::Text("("));
}

fn render_atom(value: &Value, style: Style, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match value {
        Value::Boolean(true) => write!(f, "#t"),
        Value::Boolean(false) => write!(f, "#f"),
        Value::Number(n) => render_number(*n, f),

        Value::Str(s) => match style {
            Style::Display => write!(f, "{}", s),
            Style::Write => {
                write!(f, "\"")?;
                for c in s.chars() {
                    match c {
                        '\\' => write!(f, "\\\\")?,
                        '"' => write!(f, "\\\"")?,
                        c => write!(f, "{}", c)?,
                    }
                }
                write!(f, "\"")
            }
        },

        Value::Char(c) => match (style, *c) {
            (Style::Display, c) => write!(f, "{}", c),
            (Style::Write, ' ') => write!(f, "#\\space"),
            (Style::Write, '\n') => write!(f, "#\\newline"),
            (Style::Write, c) => write!(f, "#\\{}", c),
        },

        Value::Symbol(s) => write!(f, "{}", s),
        Value::Null => write!(f, "()"),
        Value::Void => write!(f, "#<void>"),
        Value::Procedure(Procedure::Closure(_)) => write!(f, "#<procedure>"),
        Value::Procedure(Procedure::Primitive(_)) => write!(f, "#<primitive>"),

        Value::Pair(_) | Value::Vector(_) => render(value, style, f),
    }
}

/// `(quote x)` and friends print as `'x`; only the one-operand shape qualifies.
fn abbreviation_prefix(pair: &Pair) -> Option<&'static str> {
    let Value::Symbol(head) = pair.car() else {
        return None;
    };
    let Value::Pair(rest) = pair.cdr() else {
        return None;
    };
    if !rest.cdr().is_null() {
        return None;
    }
    Abbreviation::from_expansion(head.as_str()).map(Abbreviation::prefix)
}

/// Finite numbers in shortest decimal form; infinities and NaN in the
/// `+inf.0` notation the scanner reads back.
fn render_number(n: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if n.is_nan() {
        write!(f, "+nan.0")
    } else if n.is_infinite() {
        write!(f, "{}inf.0", if n > 0.0 { "+" } else { "-" })
    } else {
        write!(f, "{}", n)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render(self, Style::Write, f)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Display is the human-facing form, Debug is the readable-back form
        render(self, Style::Display, f)
    }
}

impl fmt::Debug for Pair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pending = Vec::new();
        expand_pair(self, &mut pending);
        while let Some(piece) = pending.pop() {
            match piece {
                Piece::Text(text) => f.write_str(text)?,
                Piece::Value(value) => render(&value, Style::Write, f)?,
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items().iter()).finish()
    }
}

impl fmt::Debug for Procedure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Procedure::Primitive(p) => write!(f, "{:?}", p),
            Procedure::Closure(c) => write!(f, "{:?}", c),
        }
    }
}

impl Value {
    /// The machine-readable representation, as a `String`.
    pub fn write_string(&self) -> String {
        format!("{:?}", self)
    }
}
