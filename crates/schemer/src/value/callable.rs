//! Callable value types: primitives and closures

use std::fmt;
use std::rc::Rc;

use super::Value;
use crate::ast::{Expression, Formals, Lambda};
use crate::environment::Environment;
use crate::error::EvalError;

/// Type alias for primitive function pointers to reduce complexity
pub type PrimitiveFnPtr = Rc<dyn Fn(&[Value]) -> Result<Value, EvalError>>;

/// Anything that can sit in call position.
#[derive(Clone)]
pub enum Procedure {
    /// Built-in native function
    Primitive(Rc<Primitive>),

    /// Lambda closed over its defining environment
    Closure(Rc<Closure>),
}

impl Procedure {
    /// Check if two handles refer to the same procedure object.
    pub fn ptr_eq(&self, other: &Procedure) -> bool {
        match (self, other) {
            (Procedure::Primitive(a), Procedure::Primitive(b)) => Rc::ptr_eq(a, b),
            (Procedure::Closure(a), Procedure::Closure(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// Accepted argument counts, inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arity {
    /// Minimum argument count
    pub min: usize,

    /// Maximum argument count (`None` for variadic)
    pub max: Option<usize>,
}

impl Arity {
    /// Exactly `n` arguments.
    pub const fn exactly(n: usize) -> Self {
        Self {
            min: n,
            max: Some(n),
        }
    }

    /// `n` or more arguments.
    pub const fn at_least(n: usize) -> Self {
        Self { min: n, max: None }
    }

    /// Between `min` and `max` arguments.
    pub const fn range(min: usize, max: usize) -> Self {
        Self {
            min,
            max: Some(max),
        }
    }

    /// Validate an argument count.
    ///
    /// # Errors
    ///
    /// - `ArityMismatch` for a fixed arity that is not met
    /// - `TooFewArguments` below the minimum of a variable arity
    /// - `TooManyArguments` above the maximum of a bounded arity
    pub fn check(&self, given: usize) -> Result<(), EvalError> {
        match self.max {
            Some(max) if max == self.min && given != max => Err(EvalError::ArityMismatch {
                expected: max,
                given,
            }),
            _ if given < self.min => Err(EvalError::TooFewArguments {
                expected: self.min,
                given,
            }),
            Some(max) if given > max => Err(EvalError::TooManyArguments {
                expected: max,
                given,
            }),
            _ => Ok(()),
        }
    }
}

/// A built-in native function.
///
/// Primitives receive their already-evaluated arguments and never see the
/// calling environment.
#[derive(Clone)]
pub struct Primitive {
    /// Function name (for display/debugging)
    pub name: String,

    /// Accepted argument counts
    pub arity: Arity,

    /// The actual function pointer
    pub func: PrimitiveFnPtr,
}

impl Primitive {
    /// Create a primitive from a name, an arity and a function.
    pub fn new(
        name: impl Into<String>,
        arity: Arity,
        func: impl Fn(&[Value]) -> Result<Value, EvalError> + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            arity,
            func: Rc::new(func),
        }
    }

    /// Check arity, then invoke.
    pub fn call(&self, args: &[Value]) -> Result<Value, EvalError> {
        self.arity.check(args.len())?;
        (self.func)(args)
    }
}

impl fmt::Debug for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Primitive({})", self.name)
    }
}

/// A lambda paired with the environment it was created in.
///
/// The environment is shared, not copied: later mutation of captured
/// bindings is visible to the body.
#[derive(Clone)]
pub struct Closure {
    /// Defining environment
    pub env: Environment,

    /// The lambda expression
    pub lambda: Rc<Lambda>,
}

impl Closure {
    /// Close `lambda` over `env`.
    pub fn new(env: Environment, lambda: Rc<Lambda>) -> Self {
        Self { env, lambda }
    }

    /// The parameter list.
    pub fn formals(&self) -> &Formals {
        &self.lambda.formals
    }

    /// The body expression.
    pub fn body(&self) -> &Expression {
        &self.lambda.body
    }
}

impl fmt::Debug for Closure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Closure({:?})", self.lambda.formals)
    }
}
