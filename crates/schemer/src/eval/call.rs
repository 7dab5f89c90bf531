//! Procedure invocation

use crate::environment::Environment;
use crate::error::EvalError;
use crate::value::{Closure, Procedure, Value};

use super::machine::Step;

/// Invoke `procedure` on already-evaluated arguments.
///
/// A primitive runs to completion here. A closure does not: its body comes
/// back as the next expression to evaluate, so the call occupies no
/// continuation frame.
pub(super) fn invoke(procedure: Procedure, args: Vec<Value>) -> Result<Step, EvalError> {
    match procedure {
        Procedure::Primitive(primitive) => {
            tracing::trace!(primitive = %primitive.name, args = args.len(), "call primitive");
            primitive.call(&args).map(Step::Apply)
        }
        Procedure::Closure(closure) => {
            let env = build_call_environment(&closure, args)?;
            Ok(Step::Evaluate(closure.body().clone(), env))
        }
    }
}

/// A fresh frame over the closure's captured environment, with
/// parameters bound positionally and any excess collected for the rest
/// parameter.
///
/// # Errors
///
/// - `ArityMismatch` if there is no rest parameter and the count differs
/// - `TooFewArguments` if there is a rest parameter and the count is short
pub fn build_call_environment(
    closure: &Closure,
    args: Vec<Value>,
) -> Result<Environment, EvalError> {
    let formals = closure.formals();
    let required = formals.required();
    let given = args.len();

    match formals.rest {
        None if given != required => {
            return Err(EvalError::ArityMismatch {
                expected: required,
                given,
            })
        }
        Some(_) if given < required => {
            return Err(EvalError::TooFewArguments {
                expected: required,
                given,
            })
        }
        _ => {}
    }

    let env = closure.env.extend();
    let mut args = args.into_iter();
    for (param, arg) in formals.parameters.iter().zip(args.by_ref()) {
        env.define(param, arg);
    }
    if let Some(rest) = &formals.rest {
        env.define(rest, Value::list(args));
    }
    Ok(env)
}
