//! Structural checks.
//!
//! Section headers, cardinality ranges, reserved feature names, and attribute
//! value literal syntax. Each check is independent; none blocks the others.

use std::sync::LazyLock;

use regex::Regex;
use vml_syntax::kind::NodeKind;
use vml_syntax::node::SyntaxNode;

use crate::diagnostics::{Diagnostic, SectionKind, ValidationError};

static CARDINALITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\[\s*(\d+)\s*\.\.\s*(\d+)\s*\]\s*$").unwrap());
static INTEGER_VALUE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^-?\d+$").unwrap());
static STRING_VALUE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"^".*"$"#).unwrap());
static IDENT_VALUE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^'[A-Za-z_]\w*'$").unwrap());

pub(crate) fn check(root: &SyntaxNode, source: &str, out: &mut Vec<Diagnostic>) {
    for node in root.descendants() {
        match NodeKind::from_kind(&node.kind) {
            Some(NodeKind::FeaturesSection) => {
                check_section_header(node, source, SectionKind::Features, out);
            }
            Some(NodeKind::ConstraintsSection) => {
                check_section_header(node, source, SectionKind::Constraints, out);
            }
            Some(NodeKind::Counter) => check_counter(node, source, out),
            Some(NodeKind::ExtendedFeature) => check_reserved_name(node, source, out),
            Some(NodeKind::AttributeSelection) => check_value_literal(node, source, out),
            _ => {}
        }
    }
}

/// The section's first whitespace-delimited token must be its keyword,
/// exactly. An empty section has no first token and is flagged too.
fn check_section_header(
    node: &SyntaxNode,
    source: &str,
    section: SectionKind,
    out: &mut Vec<Diagnostic>,
) {
    let first = node.text(source).split_whitespace().next();
    if first != Some(section.keyword()) {
        out.push(
            ValidationError::SectionHeader {
                section,
                span: node.span,
            }
            .into_diagnostic(),
        );
    }
}

fn check_counter(node: &SyntaxNode, source: &str, out: &mut Vec<Diagnostic>) {
    match parse_cardinality(node.text(source)) {
        None => out.push(ValidationError::MalformedCardinality { span: node.span }.into_diagnostic()),
        Some((min, max)) if min > max => out.push(
            ValidationError::CardinalityOutOfOrder {
                min,
                max,
                span: node.span,
            }
            .into_diagnostic(),
        ),
        Some(_) => {}
    }
}

/// Extracts the bounds of a `[min..max]` range, or `None` when the text does
/// not match the pattern (bounds too large to represent count as no match).
pub(crate) fn parse_cardinality(text: &str) -> Option<(u64, u64)> {
    let captures = CARDINALITY.captures(text)?;
    let min = captures[1].parse::<u64>().ok()?;
    let max = captures[2].parse::<u64>().ok()?;
    Some((min, max))
}

fn check_reserved_name(node: &SyntaxNode, source: &str, out: &mut Vec<Diagnostic>) {
    let Some(name_node) = node.child_of_kind("name") else {
        return;
    };
    let name = name_node.text(source).trim();
    if name == "features" || name == "constraints" {
        out.push(
            ValidationError::ReservedFeatureName {
                name: name.to_string(),
                span: name_node.span,
            }
            .into_diagnostic(),
        );
    }
}

fn check_value_literal(selection: &SyntaxNode, source: &str, out: &mut Vec<Diagnostic>) {
    let Some(value_node) = selection.child_of_kind("value") else {
        return;
    };
    if !is_valid_value_literal(value_node.text(source)) {
        out.push(ValidationError::InvalidAttributeValue { span: value_node.span }.into_diagnostic());
    }
}

/// A value literal is an optionally negative integer, a double-quoted string,
/// or a single-quoted identifier.
pub(crate) fn is_valid_value_literal(text: &str) -> bool {
    let text = text.trim();
    INTEGER_VALUE.is_match(text) || STRING_VALUE.is_match(text) || IDENT_VALUE.is_match(text)
}
