//! # Schemer
//!
//! A small Scheme interpreter with proper tail calls.
//!
//! ## Architecture
//!
//! - **Reader**: characters to tokens to S-expression data
//! - **Parser**: data to an AST of six special forms plus calls
//! - **Evaluator**: an explicit-stack evaluate/apply loop, so tail calls
//!   never grow the native stack
//! - **Environment**: shared, mutable chains of binding frames seeded with
//!   a fixed set of primitives
//!
//! ## Example
//!
//! ```
//! use schemer::{eval_str, Environment, Value};
//!
//! let env = Environment::with_prelude();
//! let result = eval_str("(define (square x) (* x x)) (square 7)", &env).unwrap();
//! assert_eq!(result, Value::Number(49.0));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ast;
pub mod context;
pub mod environment;
pub mod error;
pub mod eval;
pub mod parser;
pub mod reader;
pub mod symbol;
pub mod value;

// Re-export main types
pub use ast::{Expression, Formals};
pub use context::EvalContext;
pub use environment::Environment;
pub use error::{EnvironmentError, EvalError, Result, SchemeError, SyntaxError};
pub use eval::{evaluate, evaluate_with, Evaluate};
pub use parser::parse_top_level;
pub use reader::{read_all, Reader, Scanner};
pub use symbol::Symbol;
pub use value::{Datum, Procedure, Value};

/// Schemer version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Read, parse and evaluate every datum in `source` in order.
///
/// Returns the value of the last one, or void for empty input.
///
/// # Errors
///
/// The first syntax or evaluation error; data before it have already been
/// evaluated.
pub fn eval_str(source: &str, env: &Environment) -> Result<Value> {
    eval_str_with(source, env, &EvalContext::default())
}

/// [`eval_str`] under an explicit context.
///
/// # Errors
///
/// As [`eval_str`].
pub fn eval_str_with(source: &str, env: &Environment, ctx: &EvalContext) -> Result<Value> {
    let mut last = Value::Void;
    for datum in Reader::new(source) {
        let expr = parse_top_level(&datum?)?;
        last = evaluate_with(&expr, env, ctx)?;
    }
    Ok(last)
}
