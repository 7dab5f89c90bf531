//! Abstract syntax tree produced by the parser
//!
//! Nodes are immutable once built. Compound nodes sit behind `Rc` so that
//! continuation frames and closures can hold them without copying.

use std::rc::Rc;

use crate::symbol::Symbol;
use crate::value::Value;

/// An expression ready for evaluation.
#[derive(Debug, Clone)]
pub enum Expression {
    /// Self-evaluating datum or `(quote datum)`
    Literal(Value),

    /// Reference to a binding
    Variable(Symbol),

    /// `define` or `set!`
    Assignment(Rc<Assignment>),

    /// `if`
    Conditional(Rc<Conditional>),

    /// `lambda`
    Lambda(Rc<Lambda>),

    /// Application of a procedure to arguments
    ProcedureCall(Rc<ProcedureCall>),

    /// `begin`, or a multi-expression body
    Sequence(Rc<Sequence>),
}

impl Expression {
    /// True for a definition, or a sequence made only of definitions.
    pub fn is_definition(&self) -> bool {
        match self {
            Expression::Assignment(a) => a.is_definition,
            Expression::Sequence(s) => s.is_definition,
            _ => false,
        }
    }

    /// Short name of the node kind, for tracing.
    pub fn kind(&self) -> &'static str {
        match self {
            Expression::Literal(_) => "literal",
            Expression::Variable(_) => "variable",
            Expression::Assignment(a) if a.is_definition => "definition",
            Expression::Assignment(_) => "assignment",
            Expression::Conditional(_) => "conditional",
            Expression::Lambda(_) => "lambda",
            Expression::ProcedureCall(_) => "call",
            Expression::Sequence(_) => "sequence",
        }
    }
}

/// Binding a value to a symbol.
#[derive(Debug)]
pub struct Assignment {
    /// Symbol being bound or updated
    pub destination: Symbol,

    /// Expression producing the value
    pub source: Expression,

    /// `define` (true) or `set!` (false)
    pub is_definition: bool,
}

/// Two- or three-armed conditional.
#[derive(Debug)]
pub struct Conditional {
    /// Condition; anything but `#f` selects the consequent
    pub test: Expression,

    /// Taken when the test is true
    pub consequent: Expression,

    /// Taken when the test is `#f`; absent means the result is void
    pub alternate: Option<Expression>,
}

/// A procedure literal.
#[derive(Debug)]
pub struct Lambda {
    /// Parameter list
    pub formals: Formals,

    /// Body, a [`Sequence`] when more than one expression was written
    pub body: Expression,
}

/// Required parameters plus an optional rest parameter.
#[derive(Debug, Clone, Default)]
pub struct Formals {
    /// Bound positionally
    pub parameters: Vec<Symbol>,

    /// Bound to the list of leftover arguments
    pub rest: Option<Symbol>,
}

impl Formals {
    /// Number of arguments that must be supplied.
    pub fn required(&self) -> usize {
        self.parameters.len()
    }

    /// Whether extra arguments are collected into a list.
    pub fn is_variadic(&self) -> bool {
        self.rest.is_some()
    }
}

/// `(procedure argument...)`
#[derive(Debug)]
pub struct ProcedureCall {
    /// Expression in operator position
    pub procedure: Expression,

    /// Operand expressions, evaluated left to right
    pub arguments: Vec<Expression>,
}

/// Expressions evaluated in order; the last one supplies the value.
#[derive(Debug)]
pub struct Sequence {
    /// Never empty
    pub expressions: Vec<Expression>,

    /// Every member is a definition
    pub is_definition: bool,
}

impl Sequence {
    /// Build a sequence, computing its definition flag.
    pub fn new(expressions: Vec<Expression>) -> Self {
        let is_definition = expressions.iter().all(Expression::is_definition);
        Self {
            expressions,
            is_definition,
        }
    }
}
