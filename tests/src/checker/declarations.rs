//! Declaration collector tests
//!
//! These tests verify that the collector:
//! 1. Reports duplicate feature names and keeps the first entry
//! 2. Reports duplicate keys within one feature and keeps the first
//! 3. Infers attribute value types lexically
//! 4. Always completes and returns a table, empty included

use vml_checker::declarations::{ValueType, collect};
use vml_syntax::node::Span;

use crate::utils::{attr, document, feature, feature_with, leaf, node, span_of, span_of_nth};

#[test]
fn duplicate_feature_is_reported_and_first_entry_wins() {
    let src = "features\n    Phone\n    Phone\nconstraints";
    let tree = document(
        src,
        vec![
            feature(span_of_nth(src, "Phone", 0)),
            feature(span_of_nth(src, "Phone", 1)),
        ],
        vec![],
    );

    let mut out = Vec::new();
    let table = collect(&tree, src, &mut out);

    assert_eq!(out.len(), 1, "exactly one duplicate diagnostic, got: {out:?}");
    assert!(
        out[0].message.contains("Phone") && out[0].message.contains("multiple times"),
        "diagnostic should name the feature, got: {}",
        out[0].message
    );
    assert_eq!(out[0].span, span_of_nth(src, "Phone", 1));
    assert_eq!(table.len(), 1, "table retains exactly one entry");
    assert!(table.contains("Phone"));
}

#[test]
fn duplicate_key_is_reported_and_first_key_wins() {
    let src = "features\n    Phone {price = 12, price = 13}\nconstraints";
    let tree = document(
        src,
        vec![feature_with(
            span_of(src, "Phone"),
            vec![
                attr(span_of_nth(src, "price", 0), Some(span_of(src, "12"))),
                attr(span_of_nth(src, "price", 1), Some(span_of(src, "13"))),
            ],
        )],
        vec![],
    );

    let mut out = Vec::new();
    let table = collect(&tree, src, &mut out);

    assert_eq!(out.len(), 1, "exactly one duplicate-key diagnostic, got: {out:?}");
    assert!(
        out[0].message.contains("price") && out[0].message.contains("Phone"),
        "diagnostic should name the key and the owning feature, got: {}",
        out[0].message
    );
    let keys = table.keys_of("Phone").unwrap();
    assert_eq!(keys.len(), 1, "table keeps only the first occurrence");
    assert_eq!(keys[0].value_type, ValueType::Integer);
}

#[test]
fn value_types_are_inferred_from_literal_text() {
    let src = "features\n    Phone {price = 12, weight = 12.5, name = \"abc\", id = 'abc', tag}\nconstraints";
    let tree = document(
        src,
        vec![feature_with(
            span_of(src, "Phone"),
            vec![
                attr(span_of(src, "price"), Some(span_of_nth(src, "12", 0))),
                attr(span_of(src, "weight"), Some(span_of(src, "12.5"))),
                attr(span_of(src, "name"), Some(span_of(src, "\"abc\""))),
                attr(span_of(src, "id"), Some(span_of(src, "'abc'"))),
                attr(span_of(src, "tag"), None),
            ],
        )],
        vec![],
    );

    let mut out = Vec::new();
    let table = collect(&tree, src, &mut out);

    let keys = table.keys_of("Phone").unwrap();
    let type_of = |key: &str| {
        keys.iter()
            .find(|attr| attr.key == key)
            .unwrap_or_else(|| panic!("key `{key}` missing from table"))
            .value_type
    };
    assert_eq!(type_of("price"), ValueType::Integer);
    assert_eq!(type_of("weight"), ValueType::Float);
    assert_eq!(type_of("name"), ValueType::String);
    assert_eq!(type_of("id"), ValueType::String);
    assert_eq!(type_of("tag"), ValueType::Unknown);
    assert!(out.is_empty(), "well-formed declarations, got: {out:?}");
}

#[test]
fn nested_features_are_collected() {
    let src = "features\n    Root\n        Child\nconstraints";
    let child = feature(span_of(src, "Child"));
    let root_span = Span::new(span_of(src, "Root").start, span_of(src, "Child").end);
    let root_feature = node(
        "extended_feature",
        root_span,
        vec![leaf("name", span_of(src, "Root")), child],
    );
    let tree = document(src, vec![root_feature], vec![]);

    let mut out = Vec::new();
    let table = collect(&tree, src, &mut out);

    assert!(out.is_empty());
    assert_eq!(table.features().collect::<Vec<_>>(), ["Root", "Child"]);
}

#[test]
fn collector_is_idempotent() {
    let src = "features\n    Phone\n    Phone\nconstraints";
    let tree = document(
        src,
        vec![
            feature(span_of_nth(src, "Phone", 0)),
            feature(span_of_nth(src, "Phone", 1)),
        ],
        vec![],
    );

    let mut first = Vec::new();
    collect(&tree, src, &mut first);
    let mut second = Vec::new();
    collect(&tree, src, &mut second);
    assert_eq!(first, second, "re-running the collector must not change the diagnostics");
}

#[test]
fn empty_document_yields_empty_table() {
    let src = "features\nconstraints";
    let tree = document(src, vec![], vec![]);
    let mut out = Vec::new();
    let table = collect(&tree, src, &mut out);
    assert!(table.is_empty());
    assert!(out.is_empty());
}
