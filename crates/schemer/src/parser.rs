//! Datum to AST translation
//!
//! Recognizes the six special forms (`lambda`, `set!`, `define`, `if`,
//! `quote`, `begin`); every other pair is a procedure call, every other
//! symbol a variable reference, and every other atom a literal.
//!
//! # Definition Contexts
//!
//! `define` is legal at top level and at the start of a body. A body stays
//! in start-of-body context only while it has seen nothing but definitions;
//! the first ordinary expression ends it. Every operand of every other form
//! is parsed in plain expression context, where `define` is rejected.

use std::rc::Rc;

use crate::ast::{Assignment, Conditional, Expression, Formals, Lambda, ProcedureCall, Sequence};
use crate::error::SyntaxError;
use crate::symbol::Symbol;
use crate::value::{Datum, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Context {
    TopLevel,
    StartBody,
    Expression,
}

/// Parse one datum read at top level.
///
/// # Example
///
/// ```
/// use schemer::{parse_top_level, reader::read_all};
///
/// let data = read_all("(define (id x) x)").unwrap();
/// let expr = parse_top_level(&data[0]).unwrap();
/// assert!(expr.is_definition());
/// ```
///
/// # Errors
///
/// `MalformedForm` for a special form of the wrong shape,
/// `UnmetExpectation` where a symbol or parameter list is required, and
/// `IllegalDefinition` for `define` in expression context.
pub fn parse_top_level(datum: &Datum) -> Result<Expression, SyntaxError> {
    parse(datum, Context::TopLevel)
}

fn parse(datum: &Datum, context: Context) -> Result<Expression, SyntaxError> {
    let pair = match datum {
        Value::Symbol(symbol) => return Ok(Expression::Variable(symbol.clone())),
        Value::Pair(pair) => pair,
        literal => return Ok(Expression::Literal(literal.clone())),
    };

    if let Value::Symbol(keyword) = pair.car() {
        match keyword.as_str() {
            "lambda" => return parse_lambda(datum),
            "set!" => return parse_assignment(datum),
            "define" => return parse_definition(datum, context),
            "if" => return parse_conditional(datum),
            "quote" => return parse_quotation(datum),
            "begin" => return parse_begin(datum, context),
            _ => {}
        }
    }

    parse_procedure_call(datum)
}

// ═══════════════════════════════════════════════════════════════════════
// Special Forms
// ═══════════════════════════════════════════════════════════════════════

/// `(define name expr)` or `(define (name . formals) body...)`
fn parse_definition(form: &Datum, context: Context) -> Result<Expression, SyntaxError> {
    if context == Context::Expression {
        return Err(SyntaxError::IllegalDefinition {
            form: form.write_string(),
        });
    }

    let operands = operands(form, "define")?;
    let (destination, source) = match operands.as_slice() {
        [Value::Symbol(name), source] => (name.clone(), parse(source, Context::Expression)?),
        [Value::Symbol(_), ..] => return Err(malformed("define", form)),
        [Value::Pair(signature), body @ ..] if !body.is_empty() => {
            let name = expect_symbol(&signature.car())?;
            let lambda = build_lambda(&signature.cdr(), body)?;
            (name, Expression::Lambda(Rc::new(lambda)))
        }
        [target, ..] if !target.is_pair() => {
            return Err(SyntaxError::UnmetExpectation {
                found: target.write_string(),
                expected: "symbol",
            })
        }
        _ => return Err(malformed("define", form)),
    };

    Ok(Expression::Assignment(Rc::new(Assignment {
        destination,
        source,
        is_definition: true,
    })))
}

/// `(set! name expr)`
fn parse_assignment(form: &Datum) -> Result<Expression, SyntaxError> {
    let operands = operands(form, "set!")?;
    let [target, source] = operands.as_slice() else {
        return Err(malformed("set!", form));
    };

    Ok(Expression::Assignment(Rc::new(Assignment {
        destination: expect_symbol(target)?,
        source: parse(source, Context::Expression)?,
        is_definition: false,
    })))
}

/// `(if test consequent [alternate])`
fn parse_conditional(form: &Datum) -> Result<Expression, SyntaxError> {
    let operands = operands(form, "if")?;
    let (test, consequent, alternate) = match operands.as_slice() {
        [test, consequent] => (test, consequent, None),
        [test, consequent, alternate] => (test, consequent, Some(alternate)),
        _ => return Err(malformed("if", form)),
    };

    Ok(Expression::Conditional(Rc::new(Conditional {
        test: parse(test, Context::Expression)?,
        consequent: parse(consequent, Context::Expression)?,
        alternate: alternate
            .map(|alt| parse(alt, Context::Expression))
            .transpose()?,
    })))
}

/// `(lambda formals body...)`
fn parse_lambda(form: &Datum) -> Result<Expression, SyntaxError> {
    let operands = operands(form, "lambda")?;
    match operands.split_first() {
        Some((formals, body)) if !body.is_empty() => {
            Ok(Expression::Lambda(Rc::new(build_lambda(formals, body)?)))
        }
        _ => Err(malformed("lambda", form)),
    }
}

/// `(quote datum)`; the datum is taken verbatim.
fn parse_quotation(form: &Datum) -> Result<Expression, SyntaxError> {
    let operands = operands(form, "quote")?;
    match operands.as_slice() {
        [datum] => Ok(Expression::Literal(datum.clone())),
        _ => Err(malformed("quote", form)),
    }
}

/// `(begin expr...)`, parsed in the surrounding context.
fn parse_begin(form: &Datum, context: Context) -> Result<Expression, SyntaxError> {
    let operands = operands(form, "begin")?;
    if operands.is_empty() {
        return Err(malformed("begin", form));
    }
    parse_sequence(&operands, context)
}

fn parse_procedure_call(form: &Datum) -> Result<Expression, SyntaxError> {
    let Value::Pair(pair) = form else {
        return Err(malformed("procedure call", form));
    };
    let procedure = parse(&pair.car(), Context::Expression)?;
    let arguments = operands(form, "procedure call")?
        .iter()
        .map(|arg| parse(arg, Context::Expression))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Expression::ProcedureCall(Rc::new(ProcedureCall {
        procedure,
        arguments,
    })))
}

// ═══════════════════════════════════════════════════════════════════════
// Bodies and Formals
// ═══════════════════════════════════════════════════════════════════════

fn build_lambda(formals: &Datum, body: &[Datum]) -> Result<Lambda, SyntaxError> {
    let formals = parse_formals(formals)?;
    let body = match body {
        [single] => parse(single, Context::StartBody)?,
        _ => parse_sequence(body, Context::StartBody)?,
    };
    Ok(Lambda { formals, body })
}

/// Members in order. In start-of-body context the first non-definition
/// switches the rest of the sequence to expression context.
fn parse_sequence(members: &[Datum], mut context: Context) -> Result<Expression, SyntaxError> {
    let mut expressions = Vec::with_capacity(members.len());
    for member in members {
        let expression = parse(member, context)?;
        if context == Context::StartBody && !expression.is_definition() {
            context = Context::Expression;
        }
        expressions.push(expression);
    }
    Ok(Expression::Sequence(Rc::new(Sequence::new(expressions))))
}

/// `args`, `(a b)`, or `(a b . rest)`
fn parse_formals(datum: &Datum) -> Result<Formals, SyntaxError> {
    match datum {
        Value::Symbol(rest) => Ok(Formals {
            parameters: Vec::new(),
            rest: Some(rest.clone()),
        }),
        Value::Null => Ok(Formals::default()),
        Value::Pair(_) => {
            let mut iter = datum.iter();
            let parameters = iter
                .by_ref()
                .map(|param| expect_symbol(&param))
                .collect::<Result<Vec<_>, _>>()?;
            let rest = match iter.tail() {
                Value::Null => None,
                tail => Some(expect_symbol(tail)?),
            };
            Ok(Formals { parameters, rest })
        }
        other => Err(SyntaxError::UnmetExpectation {
            found: other.write_string(),
            expected: "formals",
        }),
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Helpers
// ═══════════════════════════════════════════════════════════════════════

/// Everything after the head of `form`, which must be a proper list.
fn operands(form: &Datum, keyword: &'static str) -> Result<Vec<Datum>, SyntaxError> {
    let Value::Pair(pair) = form else {
        return Err(malformed(keyword, form));
    };
    let mut iter = pair.cdr().iter();
    let items: Vec<Datum> = iter.by_ref().collect();
    if !iter.is_proper() {
        return Err(malformed(keyword, form));
    }
    Ok(items)
}

fn expect_symbol(datum: &Datum) -> Result<Symbol, SyntaxError> {
    match datum {
        Value::Symbol(symbol) => Ok(symbol.clone()),
        other => Err(SyntaxError::UnmetExpectation {
            found: other.write_string(),
            expected: "symbol",
        }),
    }
}

fn malformed(keyword: &'static str, form: &Datum) -> SyntaxError {
    SyntaxError::MalformedForm {
        keyword,
        form: form.write_string(),
    }
}
