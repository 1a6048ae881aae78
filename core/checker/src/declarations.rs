//! Declaration collection.
//!
//! One traversal over the tree builds the [`DeclarationTable`]: feature name
//! → ordered attribute keys with lexically inferred value types. Duplicate
//! feature names and duplicate keys within one feature are reported as a side
//! effect; the table always keeps the first occurrence so later resolution is
//! deterministic. The traversal never fails — it returns a table for every
//! input, empty included.

use core::fmt;
use std::fmt::{Display, Formatter};

use rustc_hash::{FxHashMap, FxHashSet};
use vml_syntax::kind::NodeKind;
use vml_syntax::node::SyntaxNode;

use crate::diagnostics::{Diagnostic, ValidationError};

/// Inferred attribute value type.
///
/// Never declared in the source language; inference is purely lexical on the
/// value's literal text. `Unknown` covers attributes declared without a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Integer,
    Float,
    String,
    Unknown,
}

impl ValueType {
    /// Infers the type of a value literal.
    ///
    /// Parses as an integer ⇒ `Integer`; otherwise parses as a float ⇒
    /// `Float`; anything else is `String` (double-quoted strings and
    /// single-quoted identifiers alike — the language does not distinguish
    /// string sub-kinds for typing purposes).
    #[must_use]
    pub fn infer(text: &str) -> ValueType {
        let text = text.trim();
        if text.parse::<i64>().is_ok() {
            ValueType::Integer
        } else if text.parse::<f64>().is_ok() {
            ValueType::Float
        } else {
            ValueType::String
        }
    }

    #[must_use]
    pub fn is_numeric(self) -> bool {
        matches!(self, ValueType::Integer | ValueType::Float)
    }

    #[must_use]
    pub fn is_string(self) -> bool {
        matches!(self, ValueType::String)
    }
}

impl Display for ValueType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::Integer => write!(f, "integer"),
            ValueType::Float => write!(f, "float"),
            ValueType::String => write!(f, "string"),
            ValueType::Unknown => write!(f, "unknown"),
        }
    }
}

/// One attribute declared on a feature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeKey {
    pub key: String,
    pub value_type: ValueType,
}

/// Per-pass mapping from feature name to its declared attribute keys.
///
/// Iteration follows declaration order, so "first feature owning a key" is
/// deterministic. Built once per validation pass, read-only thereafter.
#[derive(Debug, Default, Clone)]
pub struct DeclarationTable {
    order: Vec<String>,
    entries: FxHashMap<String, Vec<AttributeKey>>,
}

impl DeclarationTable {
    /// Registers a feature. Returns `false` if the name already exists, in
    /// which case the table is unchanged (first occurrence wins).
    fn insert(&mut self, name: &str, keys: Vec<AttributeKey>) -> bool {
        if self.entries.contains_key(name) {
            return false;
        }
        self.order.push(name.to_string());
        self.entries.insert(name.to_string(), keys);
        true
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// The attribute keys of a declared feature, in declaration order.
    #[must_use]
    pub fn keys_of(&self, name: &str) -> Option<&[AttributeKey]> {
        self.entries.get(name).map(Vec::as_slice)
    }

    /// Resolves a key across all features, in declaration order; the first
    /// feature owning the key wins. The language does not scope keys to a
    /// feature at aggregate call sites.
    #[must_use]
    pub fn resolve_key(&self, key: &str) -> Option<&AttributeKey> {
        self.order.iter().find_map(|name| {
            self.entries
                .get(name)
                .and_then(|keys| keys.iter().find(|attr| attr.key == key))
        })
    }

    /// Declared feature names, in declaration order.
    pub fn features(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Builds the declaration table for the document, reporting duplicate feature
/// names and duplicate keys as it goes.
pub fn collect(root: &SyntaxNode, source: &str, out: &mut Vec<Diagnostic>) -> DeclarationTable {
    let mut table = DeclarationTable::default();
    for node in root.descendants() {
        if NodeKind::from_kind(&node.kind) != Some(NodeKind::ExtendedFeature) {
            continue;
        }
        let Some(name_node) = node.child_of_kind("name") else {
            continue;
        };
        let name = name_node.text(source).trim();
        if name.is_empty() {
            continue;
        }

        let mut keys: Vec<AttributeKey> = Vec::new();
        let mut seen: FxHashSet<String> = FxHashSet::default();
        if let Some(attributes) = node.child_of_kind("attributes") {
            for selection in attributes.children_of_kind("attribute_selection") {
                let Some(key_node) = selection.child_of_kind("key") else {
                    continue;
                };
                let key = key_node.text(source).trim().to_string();
                if key.is_empty() {
                    continue;
                }
                if !seen.insert(key.clone()) {
                    out.push(
                        ValidationError::DuplicateKey {
                            key,
                            feature: name.to_string(),
                            span: key_node.span,
                        }
                        .into_diagnostic(),
                    );
                    continue;
                }
                let value_type = selection
                    .child_of_kind("value")
                    .map_or(ValueType::Unknown, |value| {
                        ValueType::infer(value.text(source))
                    });
                keys.push(AttributeKey { key, value_type });
            }
        }

        if !table.insert(name, keys) {
            out.push(
                ValidationError::DuplicateFeature {
                    name: name.to_string(),
                    span: name_node.span,
                }
                .into_diagnostic(),
            );
        }
    }
    table
}
