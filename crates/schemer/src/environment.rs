//! Runtime environment managing variable bindings

mod frame;
mod prelude;

use std::fmt;
use std::rc::Rc;

use frame::Frame;

use crate::error::EnvironmentError;
use crate::symbol::Symbol;
use crate::value::{Primitive, Value};

thread_local! {
    static GLOBAL: Environment = Environment::with_prelude();
}

/// The runtime environment: a chain of binding frames.
///
/// Cloning is cheap and yields a handle to the *same* frame, so a closure
/// and the code that created it observe each other's mutations.
///
/// # Example
///
/// ```
/// use schemer::{Environment, Symbol, Value};
///
/// let global = Environment::new();
/// global.define("x", Value::Number(1.0));
///
/// // Enter a new scope
/// let local = global.extend();
/// local.define("x", Value::Number(10.0)); // Shadows outer x
///
/// let x = Symbol::intern("x");
/// assert_eq!(local.get(&x).unwrap(), Value::Number(10.0));
/// assert_eq!(global.get(&x).unwrap(), Value::Number(1.0));
///
/// // Assignment reaches the nearest frame holding the binding
/// local.assign(&x, Value::Number(5.0)).unwrap();
/// assert_eq!(global.get(&x).unwrap(), Value::Number(1.0));
/// ```
#[derive(Clone)]
pub struct Environment {
    frame: Rc<Frame>,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    /// Create a new empty root environment.
    pub fn new() -> Self {
        Self {
            frame: Rc::new(Frame::new(None)),
        }
    }

    /// The default environment of the current thread, seeded with the
    /// primitive procedures.
    ///
    /// Every call returns a handle to the same frame, so top-level
    /// definitions persist between calls.
    pub fn global() -> Self {
        GLOBAL.with(Environment::clone)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Frame Management
    // ═══════════════════════════════════════════════════════════════════

    /// Create an empty child frame whose parent is this environment.
    pub fn extend(&self) -> Self {
        Self {
            frame: Rc::new(Frame::new(Some(self.clone()))),
        }
    }

    /// The enclosing environment, `None` at the root.
    pub fn parent(&self) -> Option<Environment> {
        self.frame.parent().cloned()
    }

    /// Number of frames from here to the root, inclusive.
    pub fn depth(&self) -> usize {
        self.frames().count()
    }

    /// Check whether two handles refer to the same frame.
    pub fn ptr_eq(&self, other: &Environment) -> bool {
        Rc::ptr_eq(&self.frame, &other.frame)
    }

    fn frames(&self) -> impl Iterator<Item = &Frame> {
        std::iter::successors(Some(&*self.frame), |frame| {
            frame.parent().map(|env| &*env.frame)
        })
    }

    // ═══════════════════════════════════════════════════════════════════
    // Binding Definition and Assignment
    // ═══════════════════════════════════════════════════════════════════

    /// Bind `name` in this frame, overwriting any binding already here
    /// and shadowing any outer one.
    pub fn define(&self, name: impl Into<Symbol>, value: Value) {
        let name = name.into();
        tracing::trace!(name = %name, depth = self.depth(), "define");
        self.frame.insert(name, value);
    }

    /// Update the nearest existing binding of `name`.
    ///
    /// # Errors
    ///
    /// `UnboundVariable` if no frame in the chain binds `name`.
    pub fn assign(&self, name: &Symbol, value: Value) -> Result<(), EnvironmentError> {
        match self.frames().find(|frame| frame.contains(name)) {
            Some(frame) => {
                frame.insert(name.clone(), value);
                Ok(())
            }
            None => Err(unbound(name)),
        }
    }

    /// `define` when `is_definition`, otherwise `assign`.
    ///
    /// # Errors
    ///
    /// `UnboundVariable` for an assignment to a name bound nowhere.
    pub fn set(
        &self,
        name: &Symbol,
        value: Value,
        is_definition: bool,
    ) -> Result<(), EnvironmentError> {
        if is_definition {
            self.define(name, value);
            Ok(())
        } else {
            self.assign(name, value)
        }
    }

    /// Register a primitive under its own name.
    pub fn define_primitive(&self, primitive: Primitive) {
        let name = Symbol::intern(&primitive.name);
        self.define(name, Value::primitive(primitive));
    }

    // ═══════════════════════════════════════════════════════════════════
    // Binding Lookup
    // ═══════════════════════════════════════════════════════════════════

    /// Value of the innermost binding of `name`.
    ///
    /// # Errors
    ///
    /// `UnboundVariable` if no frame in the chain binds `name`.
    pub fn get(&self, name: &Symbol) -> Result<Value, EnvironmentError> {
        self.frames()
            .find_map(|frame| frame.lookup(name))
            .ok_or_else(|| unbound(name))
    }

    /// Check if any frame in the chain binds `name`.
    pub fn contains(&self, name: impl Into<Symbol>) -> bool {
        let name = name.into();
        self.frames().any(|frame| frame.contains(&name))
    }

    /// Check if this frame itself binds `name`.
    pub fn contains_in_current_frame(&self, name: impl Into<Symbol>) -> bool {
        self.frame.contains(&name.into())
    }

    /// Names bound in this frame, in definition order.
    pub fn names_in_current_frame(&self) -> Vec<Symbol> {
        self.frame.names()
    }
}

fn unbound(name: &Symbol) -> EnvironmentError {
    EnvironmentError::UnboundVariable {
        name: name.as_str().to_string(),
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("depth", &self.depth())
            .field("names", &self.names_in_current_frame())
            .finish()
    }
}
