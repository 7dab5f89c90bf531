//! Reader tests

use pretty_assertions::assert_eq;
use schemer::reader::MAX_NESTING;
use schemer::*;

fn read_one(source: &str) -> Datum {
    let mut data = read_all(source).unwrap();
    assert_eq!(data.len(), 1, "expected one datum in {:?}", source);
    data.remove(0)
}

fn written(source: &str) -> String {
    read_one(source).write_string()
}

fn read_err(source: &str) -> SyntaxError {
    read_all(source).unwrap_err()
}

// ═══════════════════════════════════════════════════════════════════════
// Round Trips
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_atoms_round_trip() {
    for source in ["42", "-3.14", "0.5", "#t", "#f", "foo", "\"a \\\"b\\\" \\\\\""] {
        assert_eq!(written(source), source);
    }
}

#[test]
fn test_characters_round_trip() {
    for source in [r"#\a", r"#\Z", r"#\space", r"#\newline", r"#\)"] {
        assert_eq!(written(source), source);
    }
}

#[test]
fn test_lists_round_trip() {
    for source in ["()", "(a b c)", "(a (b (c)) d)", "(a . b)", "(a b . c)", "((a . b) . (c))"] {
        let expected = if source == "((a . b) . (c))" {
            "((a . b) c)"
        } else {
            source
        };
        assert_eq!(written(source), expected);
    }
}

#[test]
fn test_vectors_round_trip() {
    assert_eq!(written("#()"), "#()");
    assert_eq!(written("#(1 \"two\" (3) #(4))"), "#(1 \"two\" (3) #(4))");
}

#[test]
fn test_case_folding_and_normalisation() {
    assert_eq!(written("(DEFINE X +5)"), "(define x 5)");
    assert_eq!(written("(  a\n\tb ; note\n )"), "(a b)");
}

// ═══════════════════════════════════════════════════════════════════════
// Structure
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_proper_list_structure() {
    let list = read_one("(1 2 3)");
    assert!(list.is_list());
    let items: Vec<Value> = list.iter().collect();
    assert_eq!(
        items,
        vec![Value::Number(1.0), Value::Number(2.0), Value::Number(3.0)]
    );
}

#[test]
fn test_dotted_tail() {
    let dotted = read_one("(1 . 2)");
    assert!(!dotted.is_list());
    let pair = dotted.as_pair().unwrap();
    assert_eq!(pair.car(), Value::Number(1.0));
    assert_eq!(pair.cdr(), Value::Number(2.0));
}

#[test]
fn test_abbreviation_expands_to_list() {
    let quoted = read_one("'x");
    let items: Vec<Value> = quoted.iter().collect();
    assert_eq!(items, vec![Value::symbol("quote"), Value::symbol("x")]);
    assert_eq!(quoted.write_string(), "'x");
}

#[test]
fn test_all_abbreviations_round_trip() {
    for source in ["'a", "`a", ",a", ",@a", "#'a", "#`a", "#,a", "#,@a", "'(1 ,x)"] {
        assert_eq!(written(source), source);
    }
    assert_eq!(written("(quasiquote x)"), "`x");
}

#[test]
fn test_symbols_are_interned_across_data() {
    let data = read_all("foo FOO").unwrap();
    let a = data[0].as_symbol().unwrap();
    let b = data[1].as_symbol().unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_reader_iterates_data() {
    let mut reader = Reader::new("1 (2) #(3)");
    assert_eq!(reader.next_datum().unwrap(), Some(Value::Number(1.0)));
    assert_eq!(reader.next_datum().unwrap().unwrap().write_string(), "(2)");
    assert_eq!(reader.next_datum().unwrap().unwrap().write_string(), "#(3)");
    assert_eq!(reader.next_datum().unwrap(), None);
    assert!(reader.next().is_none());
}

#[test]
fn test_reader_from_chars() {
    let source = String::from("(a b)");
    let mut reader = Reader::from_chars(source.chars());
    assert_eq!(reader.next_datum().unwrap().unwrap().write_string(), "(a b)");
}

// ═══════════════════════════════════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_stray_close_paren() {
    assert_eq!(read_err(")"), SyntaxError::UnexpectedToken(")".to_string()));
}

#[test]
fn test_stray_dot() {
    assert_eq!(read_err("."), SyntaxError::UnexpectedToken(".".to_string()));
    assert_eq!(
        read_err("( . a)"),
        SyntaxError::UnexpectedToken(".".to_string())
    );
    assert_eq!(
        read_err("#(a . b)"),
        SyntaxError::UnexpectedToken(".".to_string())
    );
}

#[test]
fn test_dotted_tail_needs_close_paren() {
    assert_eq!(
        read_err("(a . b c)"),
        SyntaxError::ExpectedCloseParen("c".to_string())
    );
}

#[test]
fn test_unterminated_forms() {
    assert_eq!(read_err("(a b"), SyntaxError::UnexpectedEof);
    assert_eq!(read_err("#(1 2"), SyntaxError::UnexpectedEof);
    assert_eq!(read_err("(a . "), SyntaxError::UnexpectedEof);
    assert_eq!(read_err("'"), SyntaxError::UnexpectedEof);
}

#[test]
fn test_data_before_error_are_read() {
    let mut reader = Reader::new("ok )");
    assert_eq!(reader.next_datum().unwrap(), Some(Value::symbol("ok")));
    assert!(reader.next_datum().is_err());
}

// ═══════════════════════════════════════════════════════════════════════
// Nesting Depth
// ═══════════════════════════════════════════════════════════════════════

fn nested(depth: usize) -> String {
    format!("'{}{}", "(".repeat(depth), ")".repeat(depth))
}

#[test]
fn test_deep_nesting_is_a_syntax_error() {
    assert_eq!(
        read_err(&nested(10_000)),
        SyntaxError::NestingTooDeep { limit: MAX_NESTING }
    );
}

#[test]
fn test_nesting_up_to_limit_reads() {
    // The quote counts as one level
    let source = nested(MAX_NESTING - 1);
    assert_eq!(written(&source), source);
    assert!(read_all(&nested(MAX_NESTING)).is_err());
}

#[test]
fn test_deep_vectors_and_quotes_count() {
    let vectors = format!("{}{}", "#(".repeat(MAX_NESTING + 1), ")".repeat(MAX_NESTING + 1));
    assert!(matches!(
        read_err(&vectors),
        SyntaxError::NestingTooDeep { .. }
    ));
    let quotes = format!("{}x", "'".repeat(MAX_NESTING + 1));
    assert!(matches!(read_err(&quotes), SyntaxError::NestingTooDeep { .. }));
}

#[test]
fn test_reading_continues_after_nested_datum() {
    let data = read_all("((a) #(b (c))) 'd").unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0].write_string(), "((a) #(b (c)))");
    assert_eq!(data[1].write_string(), "'d");
}

#[test]
fn test_non_finite_numbers_round_trip() {
    assert_eq!(written("(+inf.0 -inf.0 +nan.0)"), "(+inf.0 -inf.0 +nan.0)");
}
