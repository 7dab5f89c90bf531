//! One lexical scope level

use std::cell::RefCell;

use indexmap::IndexMap;

use super::Environment;
use crate::symbol::Symbol;
use crate::value::Value;

/// A binding map plus a link to the enclosing scope.
///
/// Bindings keep definition order so inspection lists them the way they
/// were written.
pub(super) struct Frame {
    bindings: RefCell<IndexMap<Symbol, Value>>,
    parent: Option<Environment>,
}

impl Frame {
    pub(super) fn new(parent: Option<Environment>) -> Self {
        Self {
            bindings: RefCell::new(IndexMap::new()),
            parent,
        }
    }

    pub(super) fn parent(&self) -> Option<&Environment> {
        self.parent.as_ref()
    }

    pub(super) fn lookup(&self, name: &Symbol) -> Option<Value> {
        self.bindings.borrow().get(name).cloned()
    }

    pub(super) fn contains(&self, name: &Symbol) -> bool {
        self.bindings.borrow().contains_key(name)
    }

    /// Add or overwrite; an overwritten binding keeps its position.
    pub(super) fn insert(&self, name: Symbol, value: Value) {
        self.bindings.borrow_mut().insert(name, value);
    }

    pub(super) fn names(&self) -> Vec<Symbol> {
        self.bindings.borrow().keys().cloned().collect()
    }
}
