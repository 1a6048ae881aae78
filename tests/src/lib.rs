//! End-to-end tests for the VML validation pass.
//!
//! The parser is external, so these tests build the syntax trees the checker
//! consumes by hand (see `utils`), with spans computed from the test source
//! text — the same shape the tree-sitter builder produces.

#[cfg(test)]
mod checker;
