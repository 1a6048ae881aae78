//! Constraint checks.
//!
//! Operates per constraint expression: the parenthesis-count rule, aggregate
//! operand type checking against the declaration table, and reference
//! resolution for bare constraint items (negation, dotted feature.key paths,
//! quoted numeric identifiers, adjacent-feature detection).

use std::sync::LazyLock;

use regex::Regex;
use vml_syntax::kind::NodeKind;
use vml_syntax::node::{Span, SyntaxNode};

use crate::declarations::DeclarationTable;
use crate::diagnostics::{Diagnostic, ValidationError};

static QUOTED_NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^'-?\d+'$").unwrap());

pub(crate) fn check(
    root: &SyntaxNode,
    source: &str,
    table: &DeclarationTable,
    out: &mut Vec<Diagnostic>,
) {
    for node in root.descendants() {
        if NodeKind::from_kind(&node.kind) == Some(NodeKind::Constraint) {
            check_constraint(node, source, table, out);
        }
    }
}

fn check_constraint(
    constraint: &SyntaxNode,
    source: &str,
    table: &DeclarationTable,
    out: &mut Vec<Diagnostic>,
) {
    let text = constraint.text(source);
    // A count rule, not balance checking: the language profile allows one
    // pair per constraint and nothing deeper.
    if text.matches('(').count() > 1 || text.matches(')').count() > 1 {
        out.push(
            ValidationError::ExtraParentheses {
                span: constraint.span,
            }
            .into_diagnostic(),
        );
    }

    for child in constraint.descendants() {
        match NodeKind::from_kind(&child.kind) {
            Some(NodeKind::Operation) => check_operation(child, source, table, out),
            Some(NodeKind::ConstraintItem) => check_item(child, source, table, out),
            _ => {}
        }
    }
}

/// Type-checks one aggregate invocation.
///
/// The key resolves across all features, first declared owner wins. `sum` and
/// `avg` need a numeric key, `len` a string key; other function names pass
/// unchecked.
fn check_operation(
    operation: &SyntaxNode,
    source: &str,
    table: &DeclarationTable,
    out: &mut Vec<Diagnostic>,
) {
    let Some(key_node) = operation.child_of_kind("key") else {
        return;
    };
    let key = key_node.text(source).trim();
    if key.is_empty() {
        return;
    }
    let Some(attribute) = table.resolve_key(key) else {
        out.push(
            ValidationError::UnknownAggregateKey {
                key: key.to_string(),
                span: key_node.span,
            }
            .into_diagnostic(),
        );
        return;
    };

    let head = operation.text(source);
    let function = head.split('(').next().unwrap_or("").trim();
    match function {
        "sum" | "avg" => {
            if !attribute.value_type.is_numeric() {
                out.push(
                    ValidationError::AggregateNeedsNumber {
                        key: key.to_string(),
                        function: function.to_string(),
                        span: operation.span,
                    }
                    .into_diagnostic(),
                );
            }
        }
        "len" => {
            if !attribute.value_type.is_string() {
                out.push(
                    ValidationError::AggregateNeedsString {
                        key: key.to_string(),
                        span: operation.span,
                    }
                    .into_diagnostic(),
                );
            }
        }
        _ => {}
    }
}

/// Resolves one bare constraint item.
fn check_item(
    item: &SyntaxNode,
    source: &str,
    table: &DeclarationTable,
    out: &mut Vec<Diagnostic>,
) {
    let text = item.text(source);
    // Track the byte offset of the reference within the item so word-level
    // diagnostics can point at exact sub-spans.
    let mut offset = text.len() - text.trim_start().len();
    let mut reference = text.trim();
    if let Some(stripped) = reference.strip_prefix('!') {
        offset += 1 + (stripped.len() - stripped.trim_start().len());
        reference = stripped.trim_start();
    }
    if reference.is_empty() {
        return;
    }

    if let Some((feature, key)) = reference.split_once('.') {
        if table.contains(feature) {
            if !key.is_empty()
                && !table
                    .keys_of(feature)
                    .is_some_and(|keys| keys.iter().any(|attr| attr.key == key))
            {
                out.push(
                    ValidationError::UnknownFeatureKey {
                        key: key.to_string(),
                        feature: feature.to_string(),
                        span: item.span,
                    }
                    .into_diagnostic(),
                );
            }
            return;
        }
        // Unknown feature on the left of the dot: falls through to the
        // unresolved-reference path below.
    }

    if table.contains(reference) || QUOTED_NUMBER.is_match(reference) {
        return;
    }

    out.push(
        ValidationError::UnresolvedReference {
            reference: reference.to_string(),
            span: item.span,
        }
        .into_diagnostic(),
    );

    // Two feature names written adjacently parse into one unresolved item;
    // point at each word that is itself a declared feature.
    for (word_offset, word) in split_words(reference) {
        if table.contains(word) {
            let start = item.span.start + offset + word_offset;
            out.push(
                ValidationError::MissingOperator {
                    word: word.to_string(),
                    span: Span::new(start, start + word.len()),
                }
                .into_diagnostic(),
            );
        }
    }
}

/// Whitespace-separated words of `text` with their byte offsets.
fn split_words(text: &str) -> Vec<(usize, &str)> {
    let mut words = Vec::new();
    let mut start: Option<usize> = None;
    for (i, ch) in text.char_indices() {
        if ch.is_whitespace() {
            if let Some(s) = start.take() {
                words.push((s, &text[s..i]));
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        words.push((s, &text[s..]));
    }
    words
}
