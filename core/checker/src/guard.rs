//! Unknown-node guard.
//!
//! Flags every node whose grammar kind falls outside the recognized
//! vocabulary. Parser error recovery leaves placeholder nodes (`ERROR`,
//! missing-token stand-ins) in the tree; this pass surfaces them as
//! user-facing diagnostics instead of silently skipping them.

use vml_syntax::kind::NodeKind;
use vml_syntax::node::SyntaxNode;

use crate::diagnostics::{Diagnostic, ValidationError};

pub(crate) fn check(root: &SyntaxNode, out: &mut Vec<Diagnostic>) {
    for node in root.descendants() {
        if NodeKind::from_kind(&node.kind).is_none() {
            out.push(ValidationError::UnrecognizedNode { span: node.span }.into_diagnostic());
        }
    }
}
