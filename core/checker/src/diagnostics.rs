//! Validation diagnostics.
//!
//! Every finding the checker can produce is a [`ValidationError`] variant
//! carrying the identifiers its message needs plus the source span it points
//! at. Findings are converted into the host-facing [`Diagnostic`] record
//! (span, severity, rendered message, optional quick-fix) before being
//! appended to the pass's output list.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use vml_syntax::node::Span;

use std::fmt::{self, Display, Formatter};

/// Severity attached to a diagnostic. The model permits warnings, but every
/// rule currently reports `Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Error,
    Warning,
}

/// Data-only fix description: delete the text between two offsets.
///
/// The host interprets it; the checker never mutates the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickFix {
    pub delete: Span,
}

/// One reported violation, as handed to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub span: Span,
    pub severity: Severity,
    pub message: String,
    pub fix: Option<QuickFix>,
}

/// The section a header diagnostic refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Features,
    Constraints,
}

impl SectionKind {
    /// The keyword the section's first token must be.
    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            SectionKind::Features => "features",
            SectionKind::Constraints => "constraints",
        }
    }
}

impl Display for SectionKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

/// Represents a single validation finding with its source span.
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    #[error("feature `{name}` is defined multiple times")]
    DuplicateFeature { name: String, span: Span },

    #[error("key `{key}` is already defined for feature `{feature}`")]
    DuplicateKey {
        key: String,
        feature: String,
        span: Span,
    },

    #[error("the {section} section has to start with the keyword `{section}`")]
    SectionHeader { section: SectionKind, span: Span },

    #[error("malformed cardinality, pattern is number1 .. number2")]
    MalformedCardinality { span: Span },

    #[error("invalid cardinality: {min} is greater than {max}, the lower bound must not exceed the upper bound")]
    CardinalityOutOfOrder { min: u64, max: u64, span: Span },

    #[error("`{name}` is a reserved keyword and cannot be used as a feature name")]
    ReservedFeatureName { name: String, span: Span },

    #[error("invalid attribute value, expected an integer, a double-quoted string or a single-quoted identifier")]
    InvalidAttributeValue { span: Span },

    #[error("only one pair of parentheses per constraint is allowed")]
    ExtraParentheses { span: Span },

    #[error("`{key}` is not a valid key")]
    UnknownAggregateKey { key: String, span: Span },

    #[error("`{key}` must be a number for the {function} operation")]
    AggregateNeedsNumber {
        key: String,
        function: String,
        span: Span,
    },

    #[error("`{key}` must be a string for the len operation")]
    AggregateNeedsString { key: String, span: Span },

    #[error("`{key}` is not a valid key for the feature `{feature}`")]
    UnknownFeatureKey {
        key: String,
        feature: String,
        span: Span,
    },

    #[error("`{reference}` is neither a valid ID nor a declared feature")]
    UnresolvedReference { reference: String, span: Span },

    #[error("`{word}` has to be separated by an operator")]
    MissingOperator { word: String, span: Span },

    #[error("unexpected input, features have to be connected with a quoting operator")]
    UnrecognizedNode { span: Span },
}

impl ValidationError {
    /// Returns the source span associated with this finding.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            ValidationError::DuplicateFeature { span, .. }
            | ValidationError::DuplicateKey { span, .. }
            | ValidationError::SectionHeader { span, .. }
            | ValidationError::MalformedCardinality { span }
            | ValidationError::CardinalityOutOfOrder { span, .. }
            | ValidationError::ReservedFeatureName { span, .. }
            | ValidationError::InvalidAttributeValue { span }
            | ValidationError::ExtraParentheses { span }
            | ValidationError::UnknownAggregateKey { span, .. }
            | ValidationError::AggregateNeedsNumber { span, .. }
            | ValidationError::AggregateNeedsString { span, .. }
            | ValidationError::UnknownFeatureKey { span, .. }
            | ValidationError::UnresolvedReference { span, .. }
            | ValidationError::MissingOperator { span, .. }
            | ValidationError::UnrecognizedNode { span } => *span,
        }
    }

    /// The fix offered alongside this finding, if any. The fix is advisory;
    /// the finding is reported whether or not the host applies it.
    #[must_use]
    pub fn quick_fix(&self) -> Option<QuickFix> {
        match self {
            ValidationError::ReservedFeatureName { span, .. } => Some(QuickFix { delete: *span }),
            _ => None,
        }
    }

    /// Renders this finding into the host-facing diagnostic record.
    #[must_use]
    pub fn into_diagnostic(self) -> Diagnostic {
        Diagnostic {
            span: self.span(),
            severity: Severity::Error,
            fix: self.quick_fix(),
            message: self.to_string(),
        }
    }
}
