//! Process-wide symbol interning

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, OnceLock};

use dashmap::DashMap;

/// The intern table. Append-only for the life of the process.
fn table() -> &'static DashMap<Arc<str>, Symbol> {
    static TABLE: OnceLock<DashMap<Arc<str>, Symbol>> = OnceLock::new();
    TABLE.get_or_init(DashMap::new)
}

/// An interned symbol.
///
/// Two symbols with the same text are the same handle, so equality and
/// hashing go by identity rather than by comparing text.
///
/// # Example
///
/// ```
/// use schemer::Symbol;
///
/// let a = Symbol::intern("lambda");
/// let b = Symbol::intern("lambda");
/// assert_eq!(a, b);
/// assert_eq!(a.as_str(), "lambda");
/// assert_ne!(a, Symbol::intern("define"));
/// ```
#[derive(Clone)]
pub struct Symbol(Arc<str>);

impl Symbol {
    /// Return the canonical symbol for `text`, creating it on first use.
    pub fn intern(text: &str) -> Self {
        let table = table();
        if let Some(existing) = table.get(text) {
            return existing.value().clone();
        }
        let key: Arc<str> = Arc::from(text);
        table
            .entry(key.clone())
            .or_insert_with(|| Symbol(key))
            .value()
            .clone()
    }

    /// The symbol's text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Symbol {}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (Arc::as_ptr(&self.0) as *const u8 as usize).hash(state);
    }
}

impl From<&str> for Symbol {
    fn from(text: &str) -> Self {
        Symbol::intern(text)
    }
}

impl From<&Symbol> for Symbol {
    fn from(symbol: &Symbol) -> Self {
        symbol.clone()
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
