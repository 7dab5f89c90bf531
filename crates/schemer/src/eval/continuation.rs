//! Pending work on the evaluator's explicit stack

use std::rc::Rc;

use crate::ast::{Assignment, Conditional, ProcedureCall, Sequence};
use crate::environment::Environment;
use crate::value::{Procedure, Value};

/// One frame of the continuation stack.
///
/// Every frame records the environment that was current when it was
/// pushed; resuming the frame makes that environment current again.
pub(crate) enum Continuation {
    /// Waiting for the test value of an `if`
    Conditional {
        conditional: Rc<Conditional>,
        env: Environment,
    },

    /// Waiting for the value to bind
    Assignment {
        assignment: Rc<Assignment>,
        env: Environment,
    },

    /// Waiting for the value in operator position
    Procedure {
        call: Rc<ProcedureCall>,
        env: Environment,
    },

    /// Collecting argument values; the next argument to evaluate is at
    /// index `evaluated.len()`
    Arguments {
        procedure: Procedure,
        call: Rc<ProcedureCall>,
        evaluated: Vec<Value>,
        env: Environment,
    },

    /// Walking a sequence; `index` is the next member to evaluate
    Sequence {
        sequence: Rc<Sequence>,
        index: usize,
        env: Environment,
    },
}

impl Continuation {
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Continuation::Conditional { .. } => "conditional",
            Continuation::Assignment { .. } => "assignment",
            Continuation::Procedure { .. } => "procedure",
            Continuation::Arguments { .. } => "arguments",
            Continuation::Sequence { .. } => "sequence",
        }
    }
}
