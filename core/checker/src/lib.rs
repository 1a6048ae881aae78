#![warn(clippy::pedantic)]
//! Semantic validation for VML documents.
//!
//! This crate implements the validation pass: a stateless function of
//! (syntax tree, source text) → ordered diagnostic list. It consumes the
//! owned tree produced by `vml-syntax` and never parses raw text itself.
//!
//! ## Phases
//!
//! 1. **Collect declarations** — one traversal builds the
//!    [`declarations::DeclarationTable`] (feature name → attribute keys with
//!    inferred value types), reporting duplicate features and duplicate keys.
//! 2. **Structural checks** — section headers, cardinality ranges, reserved
//!    feature names, attribute value literal syntax.
//! 3. **Constraint checks** — parenthesis counts, aggregate operand types
//!    against the table, feature/key reference resolution.
//! 4. **Unknown-node guard** — parser error-recovery artifacts surfaced as
//!    diagnostics.
//!
//! The collector runs first because the constraint checker reads its table;
//! the remaining phases are pure readers of the tree and could run in any
//! order. Diagnostic order follows traversal order and is deterministic, but
//! callers should rely only on presence, not position.
//!
//! ## Error Handling
//!
//! Every violation is *reported, never fatal*: a malformed cardinality, an
//! unresolved key, or an unrecognized node never aborts the pass. A node
//! missing an expected child skips the checks that depend on it. The pass
//! always completes and always returns whatever diagnostics accumulated,
//! including none.
//!
//! ## Quick Start
//!
//! ```ignore
//! use vml_checker::validate;
//!
//! let diagnostics = validate(tree.root(), source);
//! for diagnostic in &diagnostics {
//!     eprintln!("{}: {}", diagnostic.span, diagnostic.message);
//! }
//! ```

use vml_syntax::node::SyntaxNode;

use crate::diagnostics::Diagnostic;

mod constraints;
pub mod declarations;
pub mod diagnostics;
mod guard;
mod structure;

/// Runs the full validation pass over one document.
///
/// Pure function of the tree and its source text: no state survives across
/// calls, and running it twice on the same input yields the same list.
#[must_use]
pub fn validate(root: &SyntaxNode, source: &str) -> Vec<Diagnostic> {
    let mut out = Vec::new();
    let table = declarations::collect(root, source, &mut out);
    structure::check(root, source, &mut out);
    constraints::check(root, source, &table, &mut out);
    guard::check(root, &mut out);
    out
}
