#![warn(clippy::pedantic)]
//! Orchestration Crate for the VML Validation Pipeline
//!
//! This crate provides the main entry points for validating VML documents —
//! feature models written as a tree of features with optional typed
//! attributes, plus a constraints section over feature names, attribute keys,
//! and aggregate functions.
//!
//! ## Overview
//!
//! ```text
//! .vml source → tree-sitter (host) → owned SyntaxTree → validate → Vec<Diagnostic>
//! ```
//!
//! Parsing is owned by the host editor: it loads the VML tree-sitter grammar,
//! parses the document, and hands the CST root plus the source text to
//! [`analyze`]. Everything after that point lives in this workspace. Hosts
//! that keep the owned tree around (for example to re-run validation after a
//! quick-fix) can call [`validate_tree`] directly.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! fn check(root: tree_sitter::Node, source: &str) -> anyhow::Result<()> {
//!     let diagnostics = vml::analyze(root, source)?;
//!     for diagnostic in &diagnostics {
//!         eprintln!("{}: {}", diagnostic.span, diagnostic.message);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! This crate is a thin layer that delegates to specialized crates:
//!
//! - [`vml_syntax`] — owned syntax-tree view and the tree-sitter builder
//! - [`vml_checker`] — the validation pass (declaration collection,
//!   structural checks, constraint checks, unknown-node guard)
//!
//! ## Error Handling
//!
//! Validation findings are *data*, not errors: the pass always completes and
//! returns its diagnostic list, empty included. The only fallible step is
//! converting the CST into the owned tree (no source added, non-UTF-8
//! source), reported through `anyhow::Result`.
//!
//! ## Lifecycle
//!
//! Each call rebuilds everything from the current document: the declaration
//! table and the diagnostic list are created at the start of the pass and
//! discarded at its end. No state survives between calls — each edit in the
//! host triggers a fresh, independent pass over the then-current tree.

use vml_checker::diagnostics::Diagnostic;
use vml_syntax::builder::Builder;
use vml_syntax::node::SyntaxTree;

/// Converts a parsed CST into the owned tree and runs the validation pass.
///
/// # Errors
///
/// Returns an error if the owned tree cannot be built (see
/// [`Builder::build_tree`]); validation itself never fails.
///
/// # Panics
///
/// Panics if `root` is not a `source_file` node, which indicates the host
/// handed over something other than a document root.
pub fn analyze(root: tree_sitter::Node, source: &str) -> anyhow::Result<Vec<Diagnostic>> {
    let mut builder = Builder::new();
    builder.add_source_code(root, source.as_bytes());
    let tree = builder.build_tree()?;
    Ok(vml_checker::validate(tree.root(), source))
}

/// Runs the validation pass over an already-built owned tree.
#[must_use]
pub fn validate_tree(tree: &SyntaxTree, source: &str) -> Vec<Diagnostic> {
    vml_checker::validate(tree.root(), source)
}
