//! Integration tests for error reporting
//!
//! These tests cover furthest-failure positions, expected-set ordering,
//! message rendering and serialization of diagnostics.

use combinol::prelude::*;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// ============================================================================
// Position Tests
// ============================================================================

#[test]
fn test_failure_position_on_later_line() {
    let line = regex("[a-z]+").unwrap().skip(literal("\n"));
    let p = line.many();

    let input = "abc\ndef\ngh1\n";
    let failure = p.parse(input).unwrap_err();
    assert_eq!(failure.position, Position::new(10, 3, 3));
}

#[test]
fn test_failure_position_counts_characters() {
    let p = char_run(|c| c != '!').skip(literal("?"));
    let failure = p.parse("ééé!").unwrap_err();
    assert_eq!(failure.position.offset, 6);
    assert_eq!(failure.position.column, 4);
}

// ============================================================================
// Expected Set Tests
// ============================================================================

#[test]
fn test_expected_sorted_case_insensitively() {
    let p = alternative(vec![
        literal("b").described_as("beta"),
        literal("a").described_as("Alpha"),
        literal("c").described_as("Gamma"),
        literal("d").described_as("alpha"),
    ]);
    let failure = p.parse("z").unwrap_err();
    assert_eq!(failure.expected, strings(&["Alpha", "alpha", "beta", "Gamma"]));
}

#[test]
fn test_expected_deduplicated() {
    let p = alternative(vec![literal("x").result(1), literal("x").result(2)]);
    let failure = p.parse("y").unwrap_err();
    assert_eq!(failure.expected, strings(&["'x'"]));
}

#[test]
fn test_unassigned_reference_is_reported() {
    let r: Ref<String> = Ref::new();
    let p = literal("a").then(r.parser());

    let failure = p.parse("ab").unwrap_err();
    assert_eq!(failure.position.offset, 1);
    assert_eq!(
        failure.expected,
        strings(&["used reference before assignment"])
    );
}

// ============================================================================
// Formatting Tests
// ============================================================================

#[test]
fn test_format_at_end_of_input() {
    let p = seq3(literal("("), literal("a").many(), literal(")"));
    let input = "(aa";
    let failure = p.parse(input).unwrap_err();
    assert_eq!(
        failure.format(input),
        "expected one of ')', 'a', got the end of the input"
    );
}

#[test]
fn test_format_with_snippet() {
    let p = literal("SELECT ").then(regex("[a-z]+").unwrap());
    let input = "SELECT 42 FROM somewhere_long";
    let failure = p.parse(input).unwrap_err();
    assert_eq!(
        failure.format(input),
        "expected /[a-z]+/ at line 1 column 8, got '...42 FROM some...'"
    );
}

#[test]
fn test_format_error_is_deterministic() {
    let input = "x";
    let expected = strings(&["'b'", "'A'"]);
    let a = format_error(input, &Position::start(), &expected);
    let b = format_error(input, &Position::start(), &expected);
    assert_eq!(a, b);
    assert_eq!(a, "expected one of 'b', 'A' at line 1 column 1, got 'x'");
}

#[test]
fn test_failure_display() {
    let failure = regex("[0-9]+").unwrap().parse("abc").unwrap_err();
    assert_eq!(failure.to_string(), "expected /[0-9]+/ at line 1 column 1");
}

#[test]
fn test_parse_error_wraps_failure() {
    let p = literal("a");
    let err = p
        .parse_with_config("b", &ParserConfig::default())
        .unwrap_err();
    assert_eq!(err.failure().map(|f| f.position.offset), Some(0));
    assert_eq!(err.to_string(), "Parse failed: expected 'a' at line 1 column 1");
}

// ============================================================================
// Grammar Error Tests
// ============================================================================

#[test]
fn test_invalid_regex() {
    let err = regex("(unclosed").unwrap_err();
    assert!(matches!(err, GrammarError::InvalidRegex { .. }));
    assert!(err.to_string().starts_with("Invalid regex /(unclosed/"));
}

#[test]
fn test_reference_set_twice() {
    let r: Ref<String> = Ref::new();
    r.set(literal("a")).unwrap();
    assert_eq!(r.set(literal("b")), Err(GrammarError::ReferenceAlreadySet));
}

// ============================================================================
// Serialization Tests
// ============================================================================

#[test]
fn test_failure_serializes_to_json() {
    let failure = regex("[0-9]+").unwrap().parse("abc").unwrap_err();
    let json = serde_json::to_value(&failure).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "position": { "offset": 0, "line": 1, "column": 1 },
            "expected": ["/[0-9]+/"]
        })
    );

    let back: ParseFailure = serde_json::from_value(json).unwrap();
    assert_eq!(back, failure);
}

#[test]
fn test_mark_serializes_to_json() {
    let mark = literal("hi").mark().parse("hi").unwrap();
    let json = serde_json::to_string(&mark).unwrap();
    assert!(json.contains("\"value\":\"hi\""));
    assert!(json.contains("\"end\":{\"offset\":2,\"line\":1,\"column\":3}"));
}
