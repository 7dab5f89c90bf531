//! Expression evaluation

mod call;
mod continuation;
mod machine;

pub use call::build_call_environment;

use crate::ast::Expression;
use crate::{Environment, EvalContext, EvalError, Value};

use machine::Machine;

/// Trait for evaluating AST nodes to values.
///
/// This is the core abstraction for the interpreter.
pub trait Evaluate {
    /// Evaluate this AST node in the given environment.
    fn eval(&self, env: &Environment, ctx: &EvalContext) -> Result<Value, EvalError>;
}

impl Evaluate for Expression {
    fn eval(&self, env: &Environment, ctx: &EvalContext) -> Result<Value, EvalError> {
        evaluate_with(self, env, ctx)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Convenience Functions
// ═══════════════════════════════════════════════════════════════════════

/// Evaluate an expression with default settings.
///
/// # Errors
///
/// The first failure encountered; evaluation stops there.
pub fn evaluate(expr: &Expression, env: &Environment) -> Result<Value, EvalError> {
    evaluate_with(expr, env, &EvalContext::default())
}

/// Evaluate an expression under an explicit context.
///
/// # Errors
///
/// The first failure encountered, including `StackOverflow` when the
/// context bounds the continuation stack and `Exit` when the program
/// calls `exit`.
#[tracing::instrument(level = "debug", skip_all, fields(kind = expr.kind()))]
pub fn evaluate_with(
    expr: &Expression,
    env: &Environment,
    ctx: &EvalContext,
) -> Result<Value, EvalError> {
    Machine::new(ctx).run(expr, env)
}
