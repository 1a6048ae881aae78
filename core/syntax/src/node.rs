//! Owned, spanned syntax nodes.
//!
//! A [`SyntaxNode`] is the read-only view the checker operates on: a grammar
//! kind name, a byte span into the source text, and ordered children. Nodes
//! carry no text of their own; [`SyntaxNode::text`] slices the source by span
//! so the tree stays cheap to clone and impossible to desynchronize from the
//! document it was built from.

use core::fmt;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Half-open byte range `[start, end)` into the source text.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Slices `source` by this span, or returns `""` when the span falls
    /// outside the text or splits a UTF-8 sequence.
    #[must_use]
    pub fn slice<'a>(&self, source: &'a str) -> &'a str {
        source.get(self.start..self.end).unwrap_or("")
    }
}

impl Display for Span {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// A single node of the owned syntax tree.
///
/// `kind` is the raw grammar name as produced by the parser; it is kept as a
/// string so unrecognized kinds (parser error-recovery artifacts) survive the
/// conversion and can be reported.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct SyntaxNode {
    pub kind: String,
    pub span: Span,
    pub children: Vec<SyntaxNode>,
}

impl SyntaxNode {
    #[must_use]
    pub fn new(kind: impl Into<String>, span: Span, children: Vec<SyntaxNode>) -> Self {
        Self {
            kind: kind.into(),
            span,
            children,
        }
    }

    #[must_use]
    pub fn leaf(kind: impl Into<String>, span: Span) -> Self {
        Self::new(kind, span, Vec::new())
    }

    /// The source text this node spans.
    #[must_use]
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        self.span.slice(source)
    }

    /// First direct child with the given grammar kind.
    #[must_use]
    pub fn child_of_kind(&self, kind: &str) -> Option<&SyntaxNode> {
        self.children.iter().find(|child| child.kind == kind)
    }

    /// All direct children with the given grammar kind, in document order.
    pub fn children_of_kind<'a>(
        &'a self,
        kind: &'a str,
    ) -> impl Iterator<Item = &'a SyntaxNode> + 'a {
        self.children.iter().filter(move |child| child.kind == kind)
    }

    /// Preorder traversal of this node and everything below it.
    #[must_use]
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }
}

/// Preorder iterator returned by [`SyntaxNode::descendants`].
pub struct Descendants<'a> {
    stack: Vec<&'a SyntaxNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a SyntaxNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// An owned syntax tree for a single document.
///
/// Immutable after construction; one tree is built per validation pass and
/// discarded with it.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct SyntaxTree {
    root: SyntaxNode,
}

impl SyntaxTree {
    #[must_use]
    pub fn new(root: SyntaxNode) -> Self {
        Self { root }
    }

    #[must_use]
    pub fn root(&self) -> &SyntaxNode {
        &self.root
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.root.descendants().count()
    }
}
