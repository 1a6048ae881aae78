//! Builder that converts a tree-sitter concrete syntax tree (CST) into the
//! owned [`SyntaxTree`] the checker consumes.
//!
//! The grammar itself is owned by the host: whatever `tree_sitter::Language`
//! it loaded, the conversion only relies on the node surface (kind name, byte
//! range, ordered children). Every node is converted, anonymous tokens
//! included, so the unknown-node guard sees error-recovery artifacts exactly
//! as the parser produced them.

use tree_sitter::Node;

use crate::node::{Span, SyntaxNode, SyntaxTree};

pub struct Builder<'a> {
    source_code: Option<(Node<'a>, &'a [u8])>,
}

impl Default for Builder<'_> {
    fn default() -> Self {
        Builder::new()
    }
}

impl<'a> Builder<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self { source_code: None }
    }

    /// Adds a source code and CST to the builder.
    ///
    /// # Panics
    ///
    /// This function will panic if the `root` node is not of type `source_file`.
    pub fn add_source_code(&mut self, root: Node<'a>, code: &'a [u8]) {
        assert!(
            root.kind() == "source_file",
            "Expected a root node of type `source_file`"
        );
        self.source_code = Some((root, code));
    }

    /// Converts the CST into an owned [`SyntaxTree`].
    ///
    /// # Errors
    ///
    /// Returns an error if no source was added or the source bytes are not
    /// valid UTF-8 (spans must slice the text safely later).
    pub fn build_tree(&self) -> anyhow::Result<SyntaxTree> {
        let (root, code) = self
            .source_code
            .ok_or_else(|| anyhow::anyhow!("No source code added to the builder"))?;
        std::str::from_utf8(code)
            .map_err(|e| anyhow::anyhow!("Source code is not valid UTF-8: {e}"))?;
        Ok(SyntaxTree::new(Self::convert(&root)))
    }

    fn convert(node: &Node) -> SyntaxNode {
        let mut children = Vec::with_capacity(node.child_count());
        for i in 0..node.child_count() {
            if let Some(child) = node.child(u32::try_from(i).unwrap()) {
                children.push(Self::convert(&child));
            }
        }
        // Zero-width tokens inserted by error recovery keep the kind of the
        // token they stand in for; rename them so they stay visible as
        // artifacts downstream.
        let kind = if node.is_missing() {
            "MISSING".to_string()
        } else {
            node.kind().to_string()
        };
        SyntaxNode::new(kind, Span::new(node.start_byte(), node.end_byte()), children)
    }
}
