//! Standard prelude with the primitive procedures

use std::io::{self, Write};

use super::Environment;
use crate::error::EvalError;
use crate::value::{Arity, Primitive, Value};

impl Environment {
    /// Create a root environment holding the primitive procedures.
    pub fn with_prelude() -> Self {
        let env = Self::new();
        env.load_prelude();
        env
    }

    /// Load the primitive procedures into this frame.
    pub fn load_prelude(&self) {
        // Arithmetic
        self.define_primitive(Primitive::new("+", Arity::at_least(0), builtin_add));
        self.define_primitive(Primitive::new("-", Arity::at_least(1), builtin_subtract));
        self.define_primitive(Primitive::new("/", Arity::at_least(1), builtin_divide));
        self.define_primitive(Primitive::new("*", Arity::at_least(0), builtin_multiply));
        self.define_primitive(Primitive::new("=", Arity::exactly(2), builtin_numeric_equal));

        // Pairs
        self.define_primitive(Primitive::new("cons", Arity::exactly(2), builtin_cons));
        self.define_primitive(Primitive::new("car", Arity::exactly(1), builtin_car));
        self.define_primitive(Primitive::new("cdr", Arity::exactly(1), builtin_cdr));

        // Output and process control
        self.define_primitive(Primitive::new("display", Arity::exactly(1), builtin_display));
        self.define_primitive(Primitive::new("exit", Arity::range(0, 1), builtin_exit));
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Built-in Function Implementations
// ═══════════════════════════════════════════════════════════════════════

fn numbers(args: &[Value]) -> Result<Vec<f64>, EvalError> {
    args.iter().map(Value::as_number).collect()
}

/// First operand and the rest; a lone operand is combined with `identity`.
fn fold_left(
    args: &[Value],
    identity: f64,
    op: impl Fn(f64, f64) -> f64,
) -> Result<Value, EvalError> {
    let numbers = numbers(args)?;
    let (first, rest) = numbers
        .split_first()
        .ok_or(EvalError::TooFewArguments {
            expected: 1,
            given: 0,
        })?;
    let result = if rest.is_empty() {
        op(identity, *first)
    } else {
        rest.iter().fold(*first, |acc, n| op(acc, *n))
    };
    Ok(Value::Number(result))
}

fn builtin_add(args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Number(numbers(args)?.iter().sum()))
}

fn builtin_multiply(args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Number(numbers(args)?.iter().product()))
}

fn builtin_subtract(args: &[Value]) -> Result<Value, EvalError> {
    fold_left(args, 0.0, |a, b| a - b)
}

fn builtin_divide(args: &[Value]) -> Result<Value, EvalError> {
    fold_left(args, 1.0, |a, b| a / b)
}

fn builtin_numeric_equal(args: &[Value]) -> Result<Value, EvalError> {
    let [a, b] = args else {
        return Err(EvalError::ArityMismatch {
            expected: 2,
            given: args.len(),
        });
    };
    Ok(Value::Boolean(a.as_number()? == b.as_number()?))
}

fn builtin_cons(args: &[Value]) -> Result<Value, EvalError> {
    let [car, cdr] = args else {
        return Err(EvalError::ArityMismatch {
            expected: 2,
            given: args.len(),
        });
    };
    Ok(Value::cons(car.clone(), cdr.clone()))
}

fn builtin_car(args: &[Value]) -> Result<Value, EvalError> {
    Ok(single(args)?.as_pair()?.car())
}

fn builtin_cdr(args: &[Value]) -> Result<Value, EvalError> {
    Ok(single(args)?.as_pair()?.cdr())
}

fn builtin_display(args: &[Value]) -> Result<Value, EvalError> {
    display_to(&mut io::stdout().lock(), single(args)?)
}

/// Write the display form of `value` to `out` and flush it.
fn display_to(out: &mut impl Write, value: &Value) -> Result<Value, EvalError> {
    write!(out, "{}", value)
        .and_then(|()| out.flush())
        .map_err(|err| EvalError::Output {
            message: err.to_string(),
        })?;
    Ok(Value::Void)
}

fn builtin_exit(args: &[Value]) -> Result<Value, EvalError> {
    let code = match args.first() {
        None => 0,
        Some(arg) => {
            let n = arg.as_number()?;
            if n.fract() != 0.0 || n < i32::MIN as f64 || n > i32::MAX as f64 {
                return Err(EvalError::TypeError {
                    expected: "exit code",
                    got: "number",
                });
            }
            n as i32
        }
    };
    tracing::debug!(code, "exit requested");
    Err(EvalError::Exit { code })
}

fn single(args: &[Value]) -> Result<&Value, EvalError> {
    match args {
        [arg] => Ok(arg),
        _ => Err(EvalError::ArityMismatch {
            expected: 1,
            given: args.len(),
        }),
    }
}
