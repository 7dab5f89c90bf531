//! Environment tests

use pretty_assertions::assert_eq;
use schemer::value::{Arity, Primitive};
use schemer::*;

fn sym(name: &str) -> Symbol {
    Symbol::intern(name)
}

fn unbound(name: &str) -> EnvironmentError {
    EnvironmentError::UnboundVariable {
        name: name.to_string(),
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Basic Operations
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_environment_new_is_empty() {
    let env = Environment::new();
    assert!(env.names_in_current_frame().is_empty());
    assert_eq!(env.depth(), 1); // Root frame
    assert!(env.parent().is_none());
}

#[test]
fn test_environment_define_and_get() {
    let env = Environment::new();
    env.define("x", Value::Number(42.0));

    assert_eq!(env.get(&sym("x")), Ok(Value::Number(42.0)));
    assert_eq!(env.get(&sym("y")), Err(unbound("y")));
    assert!(env.contains("x"));
    assert!(!env.contains("y"));
}

#[test]
fn test_environment_define_overwrites() {
    let env = Environment::new();
    env.define("a", Value::Number(1.0));
    env.define("b", Value::Number(2.0));
    env.define("a", Value::Number(3.0));

    assert_eq!(env.get(&sym("a")), Ok(Value::Number(3.0)));
    assert_eq!(env.names_in_current_frame(), vec![sym("a"), sym("b")]);
}

// ═══════════════════════════════════════════════════════════════════════
// Scoping and Shadowing
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_environment_extend() {
    let global = Environment::new();
    global.define("x", Value::Number(1.0));

    let local = global.extend();
    local.define("y", Value::Number(2.0));

    assert_eq!(local.depth(), 2);
    assert!(local.parent().unwrap().ptr_eq(&global));
    assert_eq!(local.get(&sym("x")), Ok(Value::Number(1.0)));
    assert_eq!(local.get(&sym("y")), Ok(Value::Number(2.0)));
    assert!(global.get(&sym("y")).is_err()); // y is local
}

#[test]
fn test_environment_shadowing() {
    let global = Environment::new();
    global.define("x", Value::Number(1.0));

    let local = global.extend();
    local.define("x", Value::Number(10.0)); // Shadow outer x

    assert_eq!(local.get(&sym("x")), Ok(Value::Number(10.0)));
    assert_eq!(global.get(&sym("x")), Ok(Value::Number(1.0)));
}

#[test]
fn test_environment_nested_scopes() {
    let a = Environment::new();
    a.define("a", Value::Number(1.0));
    let b = a.extend();
    b.define("b", Value::Number(2.0));
    let c = b.extend();
    c.define("c", Value::Number(3.0));

    assert_eq!(c.depth(), 3);
    assert!(c.contains("a"));
    assert!(c.contains("b"));
    assert!(c.contains("c"));
    assert!(!b.contains("c"));
    assert!(c.contains_in_current_frame("c"));
    assert!(!c.contains_in_current_frame("a"));
}

#[test]
fn test_clones_share_frame() {
    let env = Environment::new();
    let alias = env.clone();
    alias.define("shared", Value::Boolean(true));

    assert!(env.ptr_eq(&alias));
    assert_eq!(env.get(&sym("shared")), Ok(Value::Boolean(true)));
    assert!(!env.ptr_eq(&Environment::new()));
}

// ═══════════════════════════════════════════════════════════════════════
// Definition versus Assignment
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_assign_updates_nearest_binding() {
    let global = Environment::new();
    global.define("x", Value::Number(1.0));
    let local = global.extend();

    local.assign(&sym("x"), Value::Number(2.0)).unwrap();

    assert_eq!(global.get(&sym("x")), Ok(Value::Number(2.0)));
    assert!(!local.contains_in_current_frame("x"));
}

#[test]
fn test_assign_unbound_fails() {
    let env = Environment::new().extend();
    assert_eq!(
        env.assign(&sym("nowhere"), Value::Null),
        Err(unbound("nowhere"))
    );
}

#[test]
fn test_set_with_definition_flag() {
    let global = Environment::new();
    global.define("x", Value::Number(1.0));
    let local = global.extend();

    local.set(&sym("x"), Value::Number(5.0), true).unwrap();
    assert_eq!(local.get(&sym("x")), Ok(Value::Number(5.0)));
    assert_eq!(global.get(&sym("x")), Ok(Value::Number(1.0)));

    local.set(&sym("x"), Value::Number(6.0), false).unwrap();
    assert_eq!(local.get(&sym("x")), Ok(Value::Number(6.0)));
    assert_eq!(global.get(&sym("x")), Ok(Value::Number(1.0)));

    assert_eq!(
        local.set(&sym("fresh"), Value::Null, false),
        Err(unbound("fresh"))
    );
    assert!(local.set(&sym("fresh"), Value::Null, true).is_ok());
}

// ═══════════════════════════════════════════════════════════════════════
// Prelude and Global Environment
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_prelude_binds_primitives() {
    let env = Environment::with_prelude();
    for name in ["+", "-", "*", "/", "=", "cons", "car", "cdr", "display", "exit"] {
        let value = env.get(&sym(name)).unwrap();
        assert!(value.is_procedure(), "{} should be a procedure", name);
    }
    assert_eq!(env.names_in_current_frame().len(), 10);
}

#[test]
fn test_define_primitive() {
    let env = Environment::new();
    env.define_primitive(Primitive::new("twice", Arity::exactly(1), |args| {
        Ok(Value::Number(args[0].as_number()? * 2.0))
    }));
    assert_eq!(eval_str("(twice 21)", &env), Ok(Value::Number(42.0)));
}

#[test]
fn test_global_is_shared_within_thread() {
    let first = Environment::global();
    let second = Environment::global();
    assert!(first.ptr_eq(&second));
    assert!(first.contains("car"));

    first.define("global-test-marker", Value::Number(1.0));
    assert!(second.contains("global-test-marker"));
}

#[test]
fn test_debug_lists_current_frame() {
    let env = Environment::new();
    env.define("x", Value::Null);
    let debug = format!("{:?}", env);
    assert!(debug.contains("depth: 1"));
    assert!(debug.contains("x"));
}
