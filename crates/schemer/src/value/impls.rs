//! Value trait implementations: constructors, predicates, extractors, From traits, PartialEq

use std::rc::Rc;

use super::*;
use crate::error::EvalError;

// ═══════════════════════════════════════════════════════════════════
// Convenience Constructors
// ═══════════════════════════════════════════════════════════════════

impl Value {
    /// Create a string value
    pub fn string(s: impl AsRef<str>) -> Self {
        Value::Str(Rc::from(s.as_ref()))
    }

    /// Create an interned symbol value
    pub fn symbol(name: &str) -> Self {
        Value::Symbol(Symbol::intern(name))
    }

    /// Create a fresh pair
    pub fn cons(car: Value, cdr: Value) -> Self {
        Value::Pair(Rc::new(Pair::new(car, cdr)))
    }

    /// Create a proper list of `items`
    pub fn list(items: impl IntoIterator<Item = Value>) -> Self {
        Self::list_with_tail(items, Value::Null)
    }

    /// Create a list of `items` ending in `tail` instead of `()`
    pub fn list_with_tail(items: impl IntoIterator<Item = Value>, tail: Value) -> Self {
        let items: Vec<Value> = items.into_iter().collect();
        items
            .into_iter()
            .rev()
            .fold(tail, |rest, item| Value::cons(item, rest))
    }

    /// Create a vector value
    pub fn vector(items: Vec<Value>) -> Self {
        Value::Vector(Rc::new(Vector::new(items)))
    }

    /// Wrap a primitive as a procedure value
    pub fn primitive(primitive: Primitive) -> Self {
        Value::Procedure(Procedure::Primitive(Rc::new(primitive)))
    }

    /// Wrap a closure as a procedure value
    pub fn closure(closure: Closure) -> Self {
        Value::Procedure(Procedure::Closure(Rc::new(closure)))
    }

    /// Iterate over the cars of a pair chain starting here
    pub fn iter(&self) -> ListIter {
        ListIter::new(self.clone())
    }

    // ═══════════════════════════════════════════════════════════════════
    // Type Predicates
    // ═══════════════════════════════════════════════════════════════════
    /// Everything except `#f` counts as true
    pub fn is_true(&self) -> bool {
        !matches!(self, Value::Boolean(false))
    }

    /// Check if value is the empty list
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Check if value is void
    pub fn is_void(&self) -> bool {
        matches!(self, Value::Void)
    }

    /// Check if value is a pair
    pub fn is_pair(&self) -> bool {
        matches!(self, Value::Pair(_))
    }

    /// Check if value is a proper list (`()` or pairs ending in `()`)
    pub fn is_list(&self) -> bool {
        let mut iter = self.iter();
        iter.by_ref().for_each(drop);
        iter.is_proper()
    }

    /// Check if value is a symbol
    pub fn is_symbol(&self) -> bool {
        matches!(self, Value::Symbol(_))
    }

    /// Check if value is callable
    pub fn is_procedure(&self) -> bool {
        matches!(self, Value::Procedure(_))
    }

    // ═══════════════════════════════════════════════════════════════════
    // Extractors (return TypeError on mismatch)
    // ═══════════════════════════════════════════════════════════════════
    /// Extract a number
    pub fn as_number(&self) -> Result<f64, EvalError> {
        match self {
            Value::Number(n) => Ok(*n),
            other => Err(EvalError::type_error("number", other)),
        }
    }

    /// Extract a pair
    pub fn as_pair(&self) -> Result<&Rc<Pair>, EvalError> {
        match self {
            Value::Pair(p) => Ok(p),
            other => Err(EvalError::type_error("pair", other)),
        }
    }

    /// Extract a symbol
    pub fn as_symbol(&self) -> Result<&Symbol, EvalError> {
        match self {
            Value::Symbol(s) => Ok(s),
            other => Err(EvalError::type_error("symbol", other)),
        }
    }

    /// Extract string slice
    pub fn as_str(&self) -> Result<&str, EvalError> {
        match self {
            Value::Str(s) => Ok(s),
            other => Err(EvalError::type_error("string", other)),
        }
    }

    /// Extract a character
    pub fn as_char(&self) -> Result<char, EvalError> {
        match self {
            Value::Char(c) => Ok(*c),
            other => Err(EvalError::type_error("char", other)),
        }
    }

    /// Extract a vector
    pub fn as_vector(&self) -> Result<&Rc<Vector>, EvalError> {
        match self {
            Value::Vector(v) => Ok(v),
            other => Err(EvalError::type_error("vector", other)),
        }
    }

    /// Extract a procedure
    pub fn as_procedure(&self) -> Result<&Procedure, EvalError> {
        match self {
            Value::Procedure(p) => Ok(p),
            other => Err(EvalError::type_error("procedure", other)),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// PartialEq Implementation
// ═══════════════════════════════════════════════════════════════════

/// Atoms compare by value, symbols by identity, and compound cells and
/// procedures by reference.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::Null, Value::Null) => true,
            (Value::Void, Value::Void) => true,
            (Value::Pair(a), Value::Pair(b)) => Rc::ptr_eq(a, b),
            (Value::Vector(a), Value::Vector(b)) => Rc::ptr_eq(a, b),
            (Value::Procedure(a), Value::Procedure(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// From Implementations
// ═══════════════════════════════════════════════════════════════════

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::Char(c)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(Rc::from(s))
    }
}

impl From<Symbol> for Value {
    fn from(s: Symbol) -> Self {
        Value::Symbol(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::list(items)
    }
}
