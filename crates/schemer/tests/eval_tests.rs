//! Evaluator tests

use pretty_assertions::assert_eq;
use schemer::*;

// Helper to read, parse and evaluate source in a fresh prelude environment
fn eval(source: &str) -> Result<Value> {
    eval_str(source, &Environment::with_prelude())
}

fn eval_ok(source: &str) -> Value {
    eval(source).unwrap()
}

// Helper rendering the result in written form
fn eval_written(source: &str) -> String {
    eval_ok(source).write_string()
}

fn eval_err(source: &str) -> EvalError {
    match eval(source) {
        Err(SchemeError::Eval(err)) => err,
        other => panic!("expected evaluation error, got {:?}", other),
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Literal Evaluation
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_eval_self_evaluating() {
    assert_eq!(eval_ok("42"), Value::Number(42.0));
    assert_eq!(eval_ok("\"str\""), Value::string("str"));
    assert_eq!(eval_ok("#\\a"), Value::Char('a'));
    assert_eq!(eval_ok("#f"), Value::Boolean(false));
    assert_eq!(eval_written("#(1 x)"), "#(1 x)");
    assert_eq!(eval_ok("()"), Value::Null);
}

#[test]
fn test_eval_quote() {
    assert_eq!(eval_written("'(a b . c)"), "(a b . c)");
    assert_eq!(eval_ok("'sym"), Value::symbol("sym"));
    assert_eq!(eval_written("''x"), "'x");
}

#[test]
fn test_eval_empty_source_is_void() {
    assert_eq!(eval_ok(""), Value::Void);
}

// ═══════════════════════════════════════════════════════════════════════
// Arithmetic
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_eval_arithmetic() {
    assert_eq!(eval_ok("(+ 1 2 3)"), Value::Number(6.0));
    assert_eq!(eval_ok("(- 5)"), Value::Number(-5.0));
    assert_eq!(eval_ok("(*)"), Value::Number(1.0));
    assert_eq!(eval_ok("(/ 2)"), Value::Number(0.5));
    assert_eq!(eval_ok("(+)"), Value::Number(0.0));
    assert_eq!(eval_ok("(- 10 1 2)"), Value::Number(7.0));
    assert_eq!(eval_ok("(/ 9 3)"), Value::Number(3.0));
    assert_eq!(eval_ok("(* 2 (+ 1 2) 4)"), Value::Number(24.0));
}

#[test]
fn test_eval_numeric_equality() {
    assert_eq!(eval_ok("(= 1 1)"), Value::Boolean(true));
    assert_eq!(eval_ok("(= 1 2)"), Value::Boolean(false));
}

#[test]
fn test_division_by_zero_writes_readable_infinity() {
    assert_eq!(eval_written("(/ 1 0)"), "+inf.0");
    assert_eq!(eval_written("(- (/ 1 0))"), "-inf.0");
    assert_eq!(eval_written("(- (/ 1 0) (/ 1 0))"), "+nan.0");
    assert_eq!(eval_ok("(+ +inf.0 1)"), Value::Number(f64::INFINITY));
    assert_eq!(eval_written("'(+inf.0 x)"), "(+inf.0 x)");
}

#[test]
fn test_eval_arithmetic_type_error() {
    let err = eval("(+ 1 \"two\")").unwrap_err();
    assert!(err.is_type_error());
}

#[test]
fn test_eval_primitive_arity() {
    assert_eq!(
        eval_err("(-)"),
        EvalError::TooFewArguments {
            expected: 1,
            given: 0
        }
    );
    assert_eq!(
        eval_err("(cons 1)"),
        EvalError::ArityMismatch {
            expected: 2,
            given: 1
        }
    );
    assert_eq!(
        eval_err("(exit 1 2)"),
        EvalError::TooManyArguments {
            expected: 1,
            given: 2
        }
    );
}

// ═══════════════════════════════════════════════════════════════════════
// Pairs
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_eval_pairs() {
    assert_eq!(eval_written("(cons 1 2)"), "(1 . 2)");
    assert_eq!(eval_written("(cons 1 '())"), "(1)");
    assert_eq!(eval_ok("(car '(a b))"), Value::symbol("a"));
    assert_eq!(eval_written("(cdr '(a b))"), "(b)");
    assert!(eval("(car 5)").unwrap_err().is_type_error());
}

// ═══════════════════════════════════════════════════════════════════════
// Conditionals and Sequences
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_eval_if() {
    assert_eq!(eval_ok("(if #t 1 2)"), Value::Number(1.0));
    assert_eq!(eval_ok("(if #f 1 2)"), Value::Number(2.0));
    assert_eq!(eval_ok("(if 0 1 2)"), Value::Number(1.0)); // only #f is false
    assert_eq!(eval_ok("(if '() 1 2)"), Value::Number(1.0));
    assert_eq!(eval_ok("(if #f 1)"), Value::Void);
}

#[test]
fn test_eval_if_evaluates_one_branch() {
    assert_eq!(
        eval_ok("(define x 0) (if #t (set! x 1) (set! x 2)) x"),
        Value::Number(1.0)
    );
}

#[test]
fn test_eval_begin() {
    assert_eq!(eval_ok("(begin 1 2 3)"), Value::Number(3.0));
    assert_eq!(
        eval_ok("(define x 1) (begin (set! x (+ x 1)) (set! x (* x 10)) x)"),
        Value::Number(20.0)
    );
}

// ═══════════════════════════════════════════════════════════════════════
// Definitions and Assignment
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_eval_define_and_set_return_void() {
    assert_eq!(eval_ok("(define x 1)"), Value::Void);
    assert_eq!(eval_ok("(define x 1) (set! x 2)"), Value::Void);
    assert_eq!(eval_ok("(define x 1) (set! x 2) x"), Value::Number(2.0));
}

#[test]
fn test_eval_redefine() {
    assert_eq!(eval_ok("(define x 1) (define x 2) x"), Value::Number(2.0));
}

#[test]
fn test_eval_unbound_variable() {
    assert_eq!(
        eval_err("undefined-thing"),
        EvalError::Environment(EnvironmentError::UnboundVariable {
            name: "undefined-thing".to_string()
        })
    );
}

#[test]
fn test_eval_set_unbound_fails_but_define_succeeds() {
    assert!(matches!(
        eval_err("(set! fresh 1)"),
        EvalError::Environment(EnvironmentError::UnboundVariable { .. })
    ));
    assert_eq!(eval_ok("(define fresh 1) fresh"), Value::Number(1.0));
}

// ═══════════════════════════════════════════════════════════════════════
// Procedures and Scoping
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_eval_lambda_application() {
    assert_eq!(eval_ok("((lambda (x y) (+ x y)) 3 4)"), Value::Number(7.0));
    assert_eq!(eval_ok("((lambda () 5))"), Value::Number(5.0));
}

#[test]
fn test_eval_define_procedure() {
    assert_eq!(
        eval_ok("(define (square x) (* x x)) (square 9)"),
        Value::Number(81.0)
    );
}

#[test]
fn test_eval_closures_see_later_mutation() {
    assert_eq!(
        eval_ok("(define x 1) (define (f) x) (set! x 2) (f)"),
        Value::Number(2.0)
    );
}

#[test]
fn test_eval_parameter_shadows_only_inside_body() {
    assert_eq!(
        eval_written("(define x 'outer) (define (f x) x) (cons (f 'inner) x)"),
        "(inner . outer)"
    );
}

#[test]
fn test_eval_closure_captures_environment() {
    let source = "
        (define (make-counter)
          (define n 0)
          (lambda () (set! n (+ n 1)) n))
        (define c (make-counter))
        (c) (c)
        (define d (make-counter))
        (d)
        (c)";
    assert_eq!(eval_ok(source), Value::Number(3.0));
}

#[test]
fn test_eval_set_inside_closure_mutates_outer() {
    assert_eq!(
        eval_ok("(define x 1) (define (bump) (set! x (+ x 1))) (bump) (bump) x"),
        Value::Number(3.0)
    );
}

#[test]
fn test_eval_internal_define_is_local() {
    assert_eq!(
        eval_ok("(define x 1) (define (f) (define x 2) x) (f) x"),
        Value::Number(1.0)
    );
}

#[test]
fn test_eval_body_definitions() {
    assert_eq!(
        eval_ok("((lambda () (define x 1) (define y 2) (+ x y)))"),
        Value::Number(3.0)
    );
}

#[test]
fn test_eval_rest_parameters() {
    assert_eq!(eval_written("((lambda args args) 1 2 3)"), "(1 2 3)");
    assert_eq!(eval_written("((lambda args args))"), "()");
    assert_eq!(eval_written("((lambda (a . rest) rest) 1 2 3)"), "(2 3)");
    assert_eq!(eval_written("((lambda (a . rest) rest) 1)"), "()");
}

#[test]
fn test_eval_higher_order() {
    let source = "
        (define (compose f g) (lambda (x) (f (g x))))
        (define (inc x) (+ x 1))
        (define (dbl x) (* x 2))
        ((compose inc dbl) 5)";
    assert_eq!(eval_ok(source), Value::Number(11.0));
}

#[test]
fn test_eval_arguments_left_to_right() {
    let source = "
        (define trail '())
        (define (note x) (set! trail (cons x trail)) x)
        (+ (note 1) (note 2) (note 3))
        trail";
    assert_eq!(eval_written(source), "(3 2 1)");
}

#[test]
fn test_eval_operator_evaluated_first() {
    let source = "
        (define order '())
        ((begin (set! order (cons 'op order)) +)
         (begin (set! order (cons 'arg order)) 1))
        order";
    assert_eq!(eval_written(source), "(arg op)");
}

// ═══════════════════════════════════════════════════════════════════════
// Call Errors
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_eval_closure_arity_errors() {
    let define = "(define (two a b) a) ";
    assert_eq!(
        eval_err(&format!("{}(two 1)", define)),
        EvalError::ArityMismatch {
            expected: 2,
            given: 1
        }
    );
    assert_eq!(
        eval_err(&format!("{}(two 1 2 3)", define)),
        EvalError::ArityMismatch {
            expected: 2,
            given: 3
        }
    );
}

#[test]
fn test_eval_rest_arity() {
    let define = "(define (at-least-one a . rest) a) ";
    assert_eq!(
        eval_ok(&format!("{}(at-least-one 1)", define)),
        Value::Number(1.0)
    );
    assert_eq!(
        eval_ok(&format!("{}(at-least-one 1 2 3)", define)),
        Value::Number(1.0)
    );
    assert_eq!(
        eval_err(&format!("{}(at-least-one)", define)),
        EvalError::TooFewArguments {
            expected: 1,
            given: 0
        }
    );
}

#[test]
fn test_eval_not_a_procedure() {
    assert_eq!(
        eval_err("(5 1)"),
        EvalError::NotAProcedure {
            value: "5".to_string()
        }
    );
    assert_eq!(
        eval_err("(\"f\")"),
        EvalError::NotAProcedure {
            value: "\"f\"".to_string()
        }
    );
}

#[test]
fn test_eval_error_stops_evaluation() {
    let env = Environment::with_prelude();
    assert!(eval_str("(define a 1) (car 1) (define b 2)", &env).is_err());
    assert!(env.contains("a"));
    assert!(!env.contains("b"));
}

// ═══════════════════════════════════════════════════════════════════════
// Exit, Context and the Evaluate Trait
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_eval_exit_signal() {
    assert_eq!(eval_err("(exit)"), EvalError::Exit { code: 0 });
    let err = eval("(define x 1) (exit 7) x").unwrap_err();
    assert_eq!(err.exit_code(), Some(7));
}

#[test]
fn test_eval_display_returns_void() {
    assert_eq!(eval_ok("(display \"\")"), Value::Void);
}

#[test]
fn test_evaluate_trait() {
    let env = Environment::with_prelude();
    let data = read_all("(+ 40 2)").unwrap();
    let expr = parse_top_level(&data[0]).unwrap();
    let ctx = EvalContext::new().with_trace(true);
    assert_eq!(expr.eval(&env, &ctx), Ok(Value::Number(42.0)));
    assert_eq!(evaluate(&expr, &env), Ok(Value::Number(42.0)));
}

#[test]
fn test_eval_syntax_error_surfaces() {
    assert!(matches!(
        eval("(if)"),
        Err(SchemeError::Syntax(SyntaxError::MalformedForm { .. }))
    ));
    assert!(matches!(
        eval("(1 2"),
        Err(SchemeError::Syntax(SyntaxError::UnexpectedEof))
    ));
}
