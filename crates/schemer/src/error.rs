//! Error types for reading, parsing and evaluation

use thiserror::Error;

use crate::value::{Procedure, Value};

/// Failure raised while scanning, reading or parsing source text.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SyntaxError {
    /// A character or `#`-sequence that cannot start any token
    #[error("Error: Invalid token: \"{0}\".")]
    InvalidToken(String),

    /// A token was not followed by whitespace, a parenthesis, `;` or `"`
    #[error("Error: Expected whitespace, parenthesis, semicolon, or double-quote, found \"{0}\".")]
    ExpectedDelimiter(char),

    /// A string escape other than `\\` or `\"`
    #[error("Error: Expected backslash or double quote, found \"{0}\".")]
    InvalidEscape(char),

    /// Input ended inside a token, list, vector or string
    #[error("Error: Unexpected end of file.")]
    UnexpectedEof,

    /// A dotted tail was followed by something other than `)`
    #[error("Error: Expected closing parenthesis, found \"{0}\".")]
    ExpectedCloseParen(String),

    /// A token that cannot begin a datum (stray `)` or `.`)
    #[error("Error: Unexpected token \"{0}\".")]
    UnexpectedToken(String),

    /// A datum of the wrong kind where a specific kind is required
    #[error("Error: {found} is not a valid {expected}.")]
    UnmetExpectation {
        /// Written form of what was found
        found: String,
        /// What was expected (e.g. "symbol", "number")
        expected: &'static str,
    },

    /// A special form or call with the wrong shape or operand count
    #[error("Error: Bad syntax in {keyword}: {form}.")]
    MalformedForm {
        /// Operator name (e.g. "if", "define")
        keyword: &'static str,
        /// Written form of the offending datum
        form: String,
    },

    /// Lists, vectors and abbreviations nested past the reader's limit
    #[error("Error: Data nested deeper than {limit} levels.")]
    NestingTooDeep {
        /// Maximum open nesting levels
        limit: usize,
    },

    /// `define` where only an expression is allowed
    #[error("Error: Illegal definition in expression context: {form}.")]
    IllegalDefinition {
        /// Written form of the definition
        form: String,
    },
}

/// Errors raised by environment lookup and assignment.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EnvironmentError {
    /// No frame in the chain binds the symbol
    #[error("Error: Unbound variable: {name}.")]
    UnboundVariable {
        /// Symbol text
        name: String,
    },
}

/// Errors raised while evaluating an expression.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    /// Lookup or assignment failure
    #[error(transparent)]
    Environment(#[from] EnvironmentError),

    /// The value in call position cannot be applied
    #[error("Error: {value} is not a procedure.")]
    NotAProcedure {
        /// Written form of the value
        value: String,
    },

    /// Fixed-arity procedure called with the wrong number of arguments
    #[error("Error: Procedure expects {expected} argument(s), given {given}.")]
    ArityMismatch {
        /// Required argument count
        expected: usize,
        /// Supplied argument count
        given: usize,
    },

    /// Variadic procedure called with fewer than its required arguments
    #[error("Error: Procedure expects at least {expected} argument(s), given {given}.")]
    TooFewArguments {
        /// Minimum argument count
        expected: usize,
        /// Supplied argument count
        given: usize,
    },

    /// Procedure called with more than its maximum number of arguments
    #[error("Error: Procedure expects at most {expected} argument(s), given {given}.")]
    TooManyArguments {
        /// Maximum argument count
        expected: usize,
        /// Supplied argument count
        given: usize,
    },

    /// A value of the wrong variant reached a primitive or internal cast
    #[error("Type error: expected {expected}, got {got}")]
    TypeError {
        /// Expected type
        expected: &'static str,
        /// Actual type received
        got: &'static str,
    },

    /// Continuation stack grew past the configured bound
    #[error("Stack overflow: continuation depth {depth} exceeds maximum {max}")]
    StackOverflow {
        /// Depth that was reached
        depth: usize,
        /// Configured maximum
        max: usize,
    },

    /// Writing program output failed
    #[error("Error: Output failed: {message}")]
    Output {
        /// Description of the I/O failure
        message: String,
    },

    /// Raised by the `exit` primitive; not a failure
    #[error("Exit requested with code {code}")]
    Exit {
        /// Process exit status
        code: i32,
    },
}

impl EvalError {
    /// Build a type error for `value` where `expected` was required.
    pub fn type_error(expected: &'static str, value: &Value) -> Self {
        EvalError::TypeError {
            expected,
            got: type_name(value),
        }
    }
}

/// Any failure surfaced by the interpreter core.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemeError {
    /// Scanning, reading or parsing failed
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    /// Evaluation failed
    #[error(transparent)]
    Eval(#[from] EvalError),
}

impl SchemeError {
    /// True for failed casts, as opposed to syntax or semantic failures.
    pub fn is_type_error(&self) -> bool {
        matches!(self, SchemeError::Eval(EvalError::TypeError { .. }))
    }

    /// The requested status if this is an `exit` signal.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            SchemeError::Eval(EvalError::Exit { code }) => Some(*code),
            _ => None,
        }
    }
}

impl From<EnvironmentError> for SchemeError {
    fn from(err: EnvironmentError) -> Self {
        SchemeError::Eval(err.into())
    }
}

/// Result type alias for interpreter operations
pub type Result<T> = std::result::Result<T, SchemeError>;

/// Human-readable type name of a value, for error messages.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Boolean(_) => "boolean",
        Value::Number(_) => "number",
        Value::Str(_) => "string",
        Value::Char(_) => "char",
        Value::Symbol(_) => "symbol",
        Value::Pair(_) => "pair",
        Value::Vector(_) => "vector",
        Value::Null => "null",
        Value::Void => "void",
        Value::Procedure(Procedure::Primitive(_)) => "primitive",
        Value::Procedure(Procedure::Closure(_)) => "procedure",
    }
}
