//! Value representation for runtime values

mod callable;
mod display;
mod impls;
mod list;

pub use callable::{Arity, Closure, Primitive, PrimitiveFnPtr, Procedure};
pub use list::ListIter;

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use crate::error::EvalError;
use crate::symbol::Symbol;

/// Runtime value representation for the interpreter.
///
/// The same type carries reader output, AST literals and evaluation
/// results. Values are organized into three tiers:
/// - Tier 1: Inline atoms and markers (no allocation beyond the symbol table)
/// - Tier 2: Shared, mutable compound cells (`Rc`-wrapped)
/// - Tier 3: Procedures (primitives and closures)
#[derive(Clone)]
pub enum Value {
    // ═══════════════════════════════════════════════════════════════════
    // Tier 1: Inline Atoms
    // ═══════════════════════════════════════════════════════════════════
    /// `#t` or `#f`
    Boolean(bool),

    /// The only numeric type
    Number(f64),

    /// Immutable string
    Str(Rc<str>),

    /// Unicode scalar value
    Char(char),

    /// Interned symbol
    Symbol(Symbol),

    /// The empty list `()`
    Null,

    /// Result of forms evaluated for effect
    Void,

    // ═══════════════════════════════════════════════════════════════════
    // Tier 2: Shared Compound Cells
    // ═══════════════════════════════════════════════════════════════════
    /// Mutable cons cell, aliased by every holder
    Pair(Rc<Pair>),

    /// Fixed-length mutable array
    Vector(Rc<Vector>),

    // ═══════════════════════════════════════════════════════════════════
    // Tier 3: Procedures
    // ═══════════════════════════════════════════════════════════════════
    /// Primitive or closure
    Procedure(Procedure),
}

/// The subset of [`Value`] the reader produces: no procedures, no void.
///
/// It shares the representation; the alias only documents intent.
pub type Datum = Value;

/// A mutable cons cell.
pub struct Pair {
    car: RefCell<Value>,
    cdr: RefCell<Value>,
}

impl Pair {
    /// Create a new pair.
    pub fn new(car: Value, cdr: Value) -> Self {
        Self {
            car: RefCell::new(car),
            cdr: RefCell::new(cdr),
        }
    }

    /// The first element.
    pub fn car(&self) -> Value {
        self.car.borrow().clone()
    }

    /// The second element.
    pub fn cdr(&self) -> Value {
        self.cdr.borrow().clone()
    }

    /// Replace the first element in place.
    pub fn set_car(&self, value: Value) {
        *self.car.borrow_mut() = value;
    }

    /// Replace the second element in place.
    pub fn set_cdr(&self, value: Value) {
        *self.cdr.borrow_mut() = value;
    }
}

/// Unlinks uniquely owned pairs through a worklist, so dropping a long or
/// deeply nested structure does not recurse once per pair.
impl Drop for Pair {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        detach(self.car.get_mut(), &mut pending);
        detach(self.cdr.get_mut(), &mut pending);
        while let Some(pair) = pending.pop() {
            if let Ok(mut owned) = Rc::try_unwrap(pair) {
                detach(owned.car.get_mut(), &mut pending);
                detach(owned.cdr.get_mut(), &mut pending);
            }
        }
    }
}

fn detach(slot: &mut Value, pending: &mut Vec<Rc<Pair>>) {
    if let Value::Pair(_) = slot {
        if let Value::Pair(pair) = std::mem::replace(slot, Value::Null) {
            pending.push(pair);
        }
    }
}

/// A fixed-length mutable array of values.
pub struct Vector {
    items: RefCell<Box<[Value]>>,
}

impl Vector {
    /// Create a vector holding `items`.
    pub fn new(items: Vec<Value>) -> Self {
        Self {
            items: RefCell::new(items.into_boxed_slice()),
        }
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    /// Check if the vector has no slots.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Value at `index`, if in range.
    pub fn get(&self, index: usize) -> Option<Value> {
        self.items.borrow().get(index).cloned()
    }

    /// Overwrite the slot at `index`.
    ///
    /// # Errors
    ///
    /// Returns `TypeError` if `index` is out of range.
    pub fn set(&self, index: usize, value: Value) -> Result<(), EvalError> {
        match self.items.borrow_mut().get_mut(index) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(EvalError::TypeError {
                expected: "vector index",
                got: "out-of-range index",
            }),
        }
    }

    /// Borrow the slots.
    pub fn items(&self) -> Ref<'_, [Value]> {
        Ref::map(self.items.borrow(), |items| &**items)
    }

    /// Copy the slots out.
    pub fn to_vec(&self) -> Vec<Value> {
        self.items.borrow().to_vec()
    }
}
