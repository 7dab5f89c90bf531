//! The evaluate/apply trampoline
//!
//! Evaluation never recurses on the native stack. Work still to be done
//! with a sub-expression's value is pushed as a [`Continuation`]; the loop
//! alternates between evaluating an expression and handing a value to the
//! top frame. Tail positions (the last member of a sequence, the arms of
//! an `if`, a closure body, an assignment source) are evaluated without
//! pushing anything, so tail calls run in constant stack depth.

use crate::ast::Expression;
use crate::context::EvalContext;
use crate::environment::Environment;
use crate::error::EvalError;
use crate::value::{Closure, Value};

use super::call::invoke;
use super::continuation::Continuation;

/// What the loop does next.
pub(super) enum Step {
    /// Evaluate an expression under an environment
    Evaluate(Expression, Environment),

    /// Deliver a value to the top continuation frame
    Apply(Value),
}

pub(super) struct Machine<'a> {
    stack: Vec<Continuation>,
    ctx: &'a EvalContext,
}

impl<'a> Machine<'a> {
    pub(super) fn new(ctx: &'a EvalContext) -> Self {
        Self {
            stack: Vec::new(),
            ctx,
        }
    }

    /// Run to a final value or the first error.
    pub(super) fn run(mut self, expr: &Expression, env: &Environment) -> Result<Value, EvalError> {
        let mut step = Step::Evaluate(expr.clone(), env.clone());
        loop {
            step = match step {
                Step::Evaluate(expr, env) => self.evaluate(expr, env)?,
                Step::Apply(value) => match self.stack.pop() {
                    Some(frame) => self.resume(frame, value)?,
                    None => return Ok(value),
                },
            };
        }
    }

    fn push(&mut self, frame: Continuation) -> Result<(), EvalError> {
        if let Some(max) = self.ctx.max_stack_depth {
            if self.stack.len() >= max {
                return Err(EvalError::StackOverflow {
                    depth: self.stack.len() + 1,
                    max,
                });
            }
        }
        self.stack.push(frame);
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════
    // Evaluate Phase
    // ═══════════════════════════════════════════════════════════════════

    fn evaluate(&mut self, expr: Expression, env: Environment) -> Result<Step, EvalError> {
        if self.ctx.trace {
            tracing::trace!(depth = self.stack.len(), kind = expr.kind(), "evaluate");
        }

        match expr {
            Expression::Literal(value) => Ok(Step::Apply(value)),

            Expression::Variable(name) => Ok(Step::Apply(env.get(&name)?)),

            Expression::Lambda(lambda) => {
                Ok(Step::Apply(Value::closure(Closure::new(env, lambda))))
            }

            Expression::Assignment(assignment) => {
                let source = assignment.source.clone();
                self.push(Continuation::Assignment {
                    assignment,
                    env: env.clone(),
                })?;
                Ok(Step::Evaluate(source, env))
            }

            Expression::Conditional(conditional) => {
                let test = conditional.test.clone();
                self.push(Continuation::Conditional {
                    conditional,
                    env: env.clone(),
                })?;
                Ok(Step::Evaluate(test, env))
            }

            Expression::ProcedureCall(call) => {
                let procedure = call.procedure.clone();
                self.push(Continuation::Procedure {
                    call,
                    env: env.clone(),
                })?;
                Ok(Step::Evaluate(procedure, env))
            }

            Expression::Sequence(sequence) => {
                self.push(Continuation::Sequence {
                    sequence,
                    index: 0,
                    env,
                })?;
                Ok(Step::Apply(Value::Void))
            }
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Apply Phase
    // ═══════════════════════════════════════════════════════════════════

    fn resume(&mut self, frame: Continuation, value: Value) -> Result<Step, EvalError> {
        if self.ctx.trace {
            tracing::trace!(depth = self.stack.len(), frame = frame.kind(), value = ?value, "apply");
        }

        match frame {
            Continuation::Assignment { assignment, env } => {
                env.set(&assignment.destination, value, assignment.is_definition)?;
                Ok(Step::Apply(Value::Void))
            }

            Continuation::Conditional { conditional, env } => {
                if value.is_true() {
                    Ok(Step::Evaluate(conditional.consequent.clone(), env))
                } else {
                    match &conditional.alternate {
                        Some(alternate) => Ok(Step::Evaluate(alternate.clone(), env)),
                        None => Ok(Step::Apply(Value::Void)),
                    }
                }
            }

            Continuation::Procedure { call, env } => {
                let Value::Procedure(procedure) = value else {
                    return Err(EvalError::NotAProcedure {
                        value: value.write_string(),
                    });
                };
                let Some(first) = call.arguments.first().cloned() else {
                    return invoke(procedure, Vec::new());
                };
                let evaluated = Vec::with_capacity(call.arguments.len());
                self.push(Continuation::Arguments {
                    procedure,
                    call,
                    evaluated,
                    env: env.clone(),
                })?;
                Ok(Step::Evaluate(first, env))
            }

            Continuation::Arguments {
                procedure,
                call,
                mut evaluated,
                env,
            } => {
                evaluated.push(value);
                match call.arguments.get(evaluated.len()).cloned() {
                    Some(next) => {
                        self.push(Continuation::Arguments {
                            procedure,
                            call,
                            evaluated,
                            env: env.clone(),
                        })?;
                        Ok(Step::Evaluate(next, env))
                    }
                    None => invoke(procedure, evaluated),
                }
            }

            Continuation::Sequence {
                sequence,
                index,
                env,
            } => {
                let Some(member) = sequence.expressions.get(index).cloned() else {
                    return Ok(Step::Apply(value));
                };
                if index + 1 < sequence.expressions.len() {
                    self.push(Continuation::Sequence {
                        sequence,
                        index: index + 1,
                        env: env.clone(),
                    })?;
                }
                Ok(Step::Evaluate(member, env))
            }
        }
    }
}
