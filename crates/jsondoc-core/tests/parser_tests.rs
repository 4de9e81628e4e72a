//! Integration tests for the recovering parser — every malformed input
//! must yield diagnostics plus the largest well-formed tree, via the
//! public API only.

use jsondoc_core::{parse, Ast, ErrorCode, JsonDocument, NodeId, ParseOptions, Range, Severity};
use pretty_assertions::assert_eq;
use serde_json::json;

fn parse_default(text: &str) -> JsonDocument {
    let document = parse(text, &ParseOptions::default());
    check_tree_invariants(document.ast());
    document
}

fn codes(document: &JsonDocument) -> Vec<(ErrorCode, usize)> {
    document
        .syntax_errors
        .iter()
        .map(|problem| (problem.code.unwrap(), problem.range.start))
        .collect()
}

/// Every reachable node satisfies the tree invariants: parent back-links,
/// containment, and ordered disjoint siblings.
fn check_tree_invariants(ast: &Ast) {
    fn walk(ast: &Ast, id: NodeId) {
        let node = &ast[id];
        assert!(node.range.start <= node.range.end);
        let mut previous_end: Option<usize> = None;
        for child in ast.children(id) {
            let child_node = &ast[child];
            assert_eq!(child_node.parent, Some(id));
            assert!(node.range.start <= child_node.range.start);
            assert!(child_node.range.end <= node.range.end);
            if let Some(previous) = previous_end {
                assert!(previous <= child_node.range.start, "siblings out of order");
            }
            previous_end = Some(child_node.range.end);
            walk(ast, child);
        }
    }
    if let Some(root) = ast.root() {
        assert!(ast[root].parent.is_none());
        walk(ast, root);
    }
}

// ── Well-formed input ───────────────────────────────────────────────────────

#[test]
fn test_clean_documents_have_no_diagnostics() {
    for text in [
        "null",
        "true",
        "-12.5e3",
        r#""hello""#,
        "[]",
        "{}",
        r#"{"a": [1, {"b": null}], "c": "x"}"#,
    ] {
        let document = parse_default(text);
        assert_eq!(document.syntax_errors, vec![], "{text}");
        assert!(document.root().is_some());
    }
}

#[test]
fn test_value_projection_agrees_with_serde() {
    for text in [
        "17",
        "[1, 2.5, true, null]",
        r#"{"a": {"b": [false, "s"]}, "c": -3}"#,
        r#""\u00e9\n\t\u0041""#,
        r#"{"nested": {"deep": {"deeper": [[[1]]]}}}"#,
    ] {
        let document = parse_default(text);
        let expected: serde_json::Value = serde_json::from_str(text).unwrap();
        assert_eq!(document.value(), Some(expected), "{text}");
    }
}

#[test]
fn test_empty_input_has_no_root_and_no_errors() {
    for text in ["", "   ", "\n\n", "// only a comment\n"] {
        let document = parse_default(text);
        assert!(document.root().is_none(), "{text:?}");
        assert_eq!(document.syntax_errors, vec![], "{text:?}");
    }
}

// ── Recovery ────────────────────────────────────────────────────────────────

#[test]
fn test_trailing_comma_in_object() {
    let document = parse_default(r#"{"a": 1,}"#);
    assert_eq!(codes(&document), vec![(ErrorCode::TrailingComma, 7)]);
    assert_eq!(document.syntax_errors[0].range, Range::new(7, 8));
    // The tree is intact: one object with one property.
    assert_eq!(document.value(), Some(json!({"a": 1})));
}

#[test]
fn test_trailing_comma_in_array() {
    let document = parse_default("[1,]");
    assert_eq!(codes(&document), vec![(ErrorCode::TrailingComma, 2)]);
    assert_eq!(document.value(), Some(json!([1])));
}

#[test]
fn test_missing_comma_between_properties() {
    let document = parse_default(r#"{"a":1 "b":2}"#);
    assert_eq!(codes(&document), vec![(ErrorCode::CommaExpected, 7)]);
    assert_eq!(document.value(), Some(json!({"a": 1, "b": 2})));
}

#[test]
fn test_missing_comma_between_items() {
    let document = parse_default("[1 2]");
    assert_eq!(codes(&document), vec![(ErrorCode::CommaExpected, 3)]);
    assert_eq!(document.value(), Some(json!([1, 2])));
}

#[test]
fn test_unquoted_property_key_is_recovered() {
    let document = parse_default("{port: 80}");
    assert_eq!(codes(&document), vec![(ErrorCode::Undefined, 1)]);
    assert_eq!(
        document.syntax_errors[0].message,
        "Property keys must be doublequoted"
    );
    // The stray token's text becomes the key.
    assert_eq!(document.value(), Some(json!({"port": 80})));
}

#[test]
fn test_missing_colon_on_same_line_continues() {
    let document = parse_default(r#"{"a" 1}"#);
    assert_eq!(codes(&document), vec![(ErrorCode::ColonExpected, 5)]);
    assert_eq!(document.value(), Some(json!({"a": 1})));
}

#[test]
fn test_missing_colon_before_next_line_starts_new_property() {
    let document = parse_default("{\"a\"\n\"b\": 1}");
    // The comma complaint lands on the same offset and is deduplicated.
    assert_eq!(codes(&document), vec![(ErrorCode::ColonExpected, 5)]);
    // `a` is kept as a valueless property; `b` parses normally.
    assert_eq!(document.value(), Some(json!({"b": 1})));
    let root = document.root().unwrap();
    assert_eq!(document.ast().children(root).count(), 2);
}

#[test]
fn test_missing_value_after_colon() {
    let document = parse_default(r#"{"a":}"#);
    assert_eq!(codes(&document), vec![(ErrorCode::ValueExpected, 5)]);
    // The property survives without a value and projection omits it.
    assert_eq!(document.value(), Some(json!({})));
    let root = document.root().unwrap();
    assert_eq!(document.ast().children(root).count(), 1);
}

#[test]
fn test_missing_value_in_array_slot() {
    let document = parse_default("[1,,2]");
    assert_eq!(codes(&document), vec![(ErrorCode::ValueExpected, 3)]);
    assert_eq!(document.value(), Some(json!([1, 2])));
}

#[test]
fn test_leading_comma_in_array() {
    let document = parse_default("[,1]");
    assert_eq!(codes(&document), vec![(ErrorCode::ValueExpected, 1)]);
    assert_eq!(document.value(), Some(json!([1])));
}

#[test]
fn test_unclosed_array_reports_at_last_visible_character() {
    let document = parse_default("[1, 2  ");
    assert_eq!(
        codes(&document),
        vec![(ErrorCode::CommaOrCloseBracketExpected, 4)]
    );
    assert_eq!(document.syntax_errors[0].range, Range::new(4, 5));
    assert_eq!(document.value(), Some(json!([1, 2])));
}

#[test]
fn test_unclosed_object() {
    let document = parse_default(r#"{"a": 1"#);
    assert_eq!(
        codes(&document),
        vec![(ErrorCode::CommaOrCloseBraceExpected, 6)]
    );
    assert_eq!(document.value(), Some(json!({"a": 1})));
}

#[test]
fn test_garbage_root() {
    let document = parse_default(":");
    assert!(document.root().is_none());
    assert_eq!(codes(&document), vec![(ErrorCode::Undefined, 0)]);
    assert_eq!(
        document.syntax_errors[0].message,
        "Expected a JSON object, array or literal."
    );
}

#[test]
fn test_content_after_root() {
    let document = parse_default("{} []");
    assert_eq!(codes(&document), vec![(ErrorCode::Undefined, 3)]);
    assert_eq!(document.syntax_errors[0].message, "End of file expected.");
    assert_eq!(document.value(), Some(json!({})));
}

#[test]
fn test_deep_recovery_keeps_outer_structure() {
    let document = parse_default(r#"{"outer": {"a": }, "next": 1}"#);
    assert_eq!(codes(&document), vec![(ErrorCode::ValueExpected, 16)]);
    assert_eq!(document.value(), Some(json!({"outer": {}, "next": 1})));
}

// ── Duplicate keys ──────────────────────────────────────────────────────────

#[test]
fn test_duplicate_key_flags_both_occurrences() {
    let document = parse_default(r#"{"a": 1, "a": 2}"#);
    let duplicates: Vec<_> = document
        .syntax_errors
        .iter()
        .filter(|problem| problem.message == "Duplicate object key")
        .collect();
    assert_eq!(duplicates.len(), 2);
    assert!(duplicates.iter().all(|p| p.severity == Severity::Warning));
    // Second occurrence first, then the first occurrence.
    assert_eq!(duplicates[0].range, Range::new(9, 12));
    assert_eq!(duplicates[1].range, Range::new(1, 4));
}

#[test]
fn test_third_duplicate_does_not_reflag_the_first() {
    let document = parse_default(r#"{"a": 1, "a": 2, "a": 3}"#);
    let duplicates: Vec<_> = document
        .syntax_errors
        .iter()
        .filter(|problem| problem.message == "Duplicate object key")
        .map(|problem| problem.range.start)
        .collect();
    assert_eq!(duplicates, vec![9, 1, 17]);
}

// ── Comments and options ────────────────────────────────────────────────────

#[test]
fn test_jsonc_comments_are_silent_by_default() {
    let document = parse_default("{\"a\": /* inline */ 1} // trailing");
    assert_eq!(document.syntax_errors, vec![]);
    assert_eq!(document.comments, vec![]);
    assert_eq!(document.value(), Some(json!({"a": 1})));
}

#[test]
fn test_scan_error_inside_string() {
    let document = parse_default(r#"{"a": "b\qc"}"#);
    assert_eq!(
        codes(&document),
        vec![(ErrorCode::InvalidEscapeCharacter, 6)]
    );
    // The string node survives with the remaining characters.
    assert_eq!(document.value(), Some(json!({"a": "bc"})));
}

#[test]
fn test_unterminated_block_comment() {
    let document = parse_default("{} /* open");
    assert_eq!(
        codes(&document),
        vec![(ErrorCode::UnexpectedEndOfComment, 3)]
    );
}

// ── Torture inputs: recovery soundness ──────────────────────────────────────

#[test]
fn test_malformed_inputs_keep_tree_invariants() {
    for text in [
        "{",
        "}",
        "[[[",
        "]]]",
        "{\"a\"",
        "{\"a\":",
        "{\"a\":1,",
        "[{\"a\": [1,]},",
        ":::",
        "{,}",
        "[,]",
        "{\"a\" \"b\" \"c\"}",
        "tru",
        "-",
        "1.",
        "\"unterminated",
        "{\"\\u12\": 1}",
        "{a b c : : 2}",
        "// comment only\n[1, , ]",
        "{\"a\": 1 2}",
        "[\"\u{1F600}",
    ] {
        // parse_default checks the invariants; every input must also
        // produce at least one diagnostic or an empty root.
        let document = parse_default(text);
        assert!(
            !document.syntax_errors.is_empty() || document.root().is_none(),
            "{text:?} parsed silently"
        );
    }
}
