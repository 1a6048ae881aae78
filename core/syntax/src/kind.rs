//! Recognized grammar vocabulary.
//!
//! [`NodeKind`] is the closed set of node kinds the checker understands,
//! covering every structural category of the language: sections, feature
//! declarations, attribute blocks, state/counter blocks, constraint
//! sub-structures, brackets, operators, and comments. Kinds outside this set
//! (notably tree-sitter's `ERROR` and missing-token placeholders) resolve to
//! `None` and are reported by the checker's unknown-node guard.

/// Tagged view over a node's grammar kind string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    SourceFile,
    FeaturesSection,
    ConstraintsSection,
    ExtendedFeature,
    Attributes,
    AttributeSelection,
    Key,
    Value,
    State,
    Counter,
    Constraint,
    ConstraintItem,
    Operation,
    Name,
    Comment,
    Bracket,
    Operator,
}

impl NodeKind {
    /// Maps a raw grammar kind to its tagged variant.
    ///
    /// Returns `None` for anything outside the recognized vocabulary; that is
    /// the unknown-node path, not an error here.
    #[must_use]
    pub fn from_kind(kind: &str) -> Option<NodeKind> {
        match kind {
            "source_file" => Some(NodeKind::SourceFile),
            "features" => Some(NodeKind::FeaturesSection),
            "constraints" => Some(NodeKind::ConstraintsSection),
            "extended_feature" => Some(NodeKind::ExtendedFeature),
            "attributes" => Some(NodeKind::Attributes),
            "attribute_selection" => Some(NodeKind::AttributeSelection),
            "key" => Some(NodeKind::Key),
            "value" => Some(NodeKind::Value),
            "state" => Some(NodeKind::State),
            "counter" => Some(NodeKind::Counter),
            "constraint" => Some(NodeKind::Constraint),
            "constraint_item" => Some(NodeKind::ConstraintItem),
            "operation" => Some(NodeKind::Operation),
            "name" => Some(NodeKind::Name),
            "comment" => Some(NodeKind::Comment),
            "[" | "]" | "{" | "}" | "(" | ")" => Some(NodeKind::Bracket),
            "!" | "&" | "|" | "=>" | "<=>" | "=" | "==" | ">" | "<" | ">=" | "<=" | "+" | "-"
            | "*" | "/" | "." | ".." | "," => Some(NodeKind::Operator),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_recognized(kind: &str) -> bool {
        Self::from_kind(kind).is_some()
    }
}
