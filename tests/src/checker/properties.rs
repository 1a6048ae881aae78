//! Pass-level properties
//!
//! Determinism, completion on malformed input, the unknown-node guard, and
//! the serialized shape of diagnostics as a host would transport them.

use vml_checker::diagnostics::{Diagnostic, Severity};
use vml_checker::validate;
use vml_syntax::node::{Span, SyntaxNode, SyntaxTree};

use crate::utils::{
    attr, constraint, counter, document, feature, feature_with, item, leaf, span_of, span_of_nth,
};

/// A document violating one rule per checker: duplicate feature, bad
/// cardinality, bad value literal, unresolved constraint item.
fn messy_tree() -> (String, SyntaxNode) {
    let src = "features\n    Phone {color = red}\n    Phone [5..2]\nconstraints\n    Tablet".to_string();
    let tree = document(
        &src,
        vec![
            feature_with(
                span_of_nth(&src, "Phone", 0),
                vec![attr(span_of(&src, "color"), Some(span_of(&src, "red")))],
            ),
            feature(span_of_nth(&src, "Phone", 1)),
            counter(span_of(&src, "[5..2]")),
        ],
        vec![constraint(
            span_of(&src, "Tablet"),
            vec![item(span_of(&src, "Tablet"))],
        )],
    );
    (src, tree)
}

#[test]
fn every_violation_is_reported_and_none_is_fatal() {
    let (src, tree) = messy_tree();
    let diagnostics = validate(&tree, &src);
    assert_eq!(diagnostics.len(), 4, "got: {diagnostics:?}");

    let has = |needle: &str| {
        diagnostics
            .iter()
            .any(|diagnostic| diagnostic.message.contains(needle))
    };
    assert!(has("defined multiple times"), "got: {diagnostics:?}");
    assert!(has("invalid attribute value"), "got: {diagnostics:?}");
    assert!(has("5 is greater than 2"), "got: {diagnostics:?}");
    assert!(has("neither a valid ID"), "got: {diagnostics:?}");
}

#[test]
fn the_pass_is_deterministic() {
    let (src, tree) = messy_tree();
    let first = validate(&tree, &src);
    let second = validate(&tree, &src);
    assert_eq!(first, second, "identical tree must yield an identical list");
}

#[test]
fn a_clean_document_yields_no_diagnostics() {
    let src = "features\n    Phone {price = 12}\nconstraints\n    Phone.price";
    let tree = document(
        src,
        vec![feature_with(
            span_of_nth(src, "Phone", 0),
            vec![attr(span_of_nth(src, "price", 0), Some(span_of(src, "12")))],
        )],
        vec![constraint(
            span_of(src, "Phone.price"),
            vec![item(span_of(src, "Phone.price"))],
        )],
    );
    assert!(validate(&tree, src).is_empty());
}

#[test]
fn error_recovery_artifacts_are_surfaced_by_the_guard() {
    let src = "features\n    Phone ???\nconstraints";
    let mut tree = document(src, vec![feature(span_of(src, "Phone"))], vec![]);
    tree.children[0]
        .children
        .push(leaf("ERROR", span_of(src, "???")));

    let diagnostics = validate(&tree, src);
    assert_eq!(diagnostics.len(), 1, "got: {diagnostics:?}");
    assert!(
        diagnostics[0]
            .message
            .contains("features have to be connected with a quoting operator"),
        "got: {}",
        diagnostics[0].message
    );
    assert_eq!(diagnostics[0].span, span_of(src, "???"));
    assert_eq!(diagnostics[0].severity, Severity::Error);
}

#[test]
fn missing_token_placeholders_are_surfaced_too() {
    let src = "features\n    Phone\nconstraints";
    let mut tree = document(src, vec![feature(span_of(src, "Phone"))], vec![]);
    let end = span_of(src, "Phone").end;
    tree.children[0]
        .children
        .push(leaf("MISSING", Span::new(end, end)));

    let diagnostics = validate(&tree, src);
    assert_eq!(diagnostics.len(), 1, "got: {diagnostics:?}");
}

#[test]
fn guard_walks_below_unknown_nodes() {
    let src = "features\n    Phone oops oops\nconstraints";
    let mut tree = document(src, vec![feature(span_of(src, "Phone"))], vec![]);
    let inner = leaf("ERROR", span_of_nth(src, "oops", 1));
    tree.children[0].children.push(SyntaxNode::new(
        "ERROR",
        span_of_nth(src, "oops", 0),
        vec![inner],
    ));

    let diagnostics = validate(&tree, src);
    assert_eq!(diagnostics.len(), 2, "one per artifact, got: {diagnostics:?}");
}

#[test]
fn diagnostics_round_trip_through_serde() -> anyhow::Result<()> {
    let (src, tree) = messy_tree();
    let diagnostics = validate(&tree, &src);

    let json = serde_json::to_string(&diagnostics)?;
    let back: Vec<Diagnostic> = serde_json::from_str(&json)?;
    assert_eq!(back, diagnostics);

    // The wire shape the host relies on: span offsets, severity, message,
    // and the fix field (absent here — none of these findings offer one).
    let value: serde_json::Value = serde_json::from_str(&json)?;
    let first = &value[0];
    assert!(first["span"]["start"].is_u64());
    assert!(first["span"]["end"].is_u64());
    assert_eq!(first["severity"], "Error");
    assert!(first["message"].is_string());
    assert!(first["fix"].is_null());
    Ok(())
}

#[test]
fn validate_tree_facade_matches_the_checker() {
    let (src, tree) = messy_tree();
    let direct = validate(&tree, &src);
    let via_facade = vml::validate_tree(&SyntaxTree::new(tree), &src);
    assert_eq!(direct, via_facade);
}
