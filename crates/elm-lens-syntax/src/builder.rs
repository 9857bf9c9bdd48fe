//! Incremental construction of a [`SyntaxTree`]
//!
//! Nodes are opened and closed in source order. Interior nodes opened with
//! [`TreeBuilder::open`] take their span from their first and last child;
//! leaves added with [`TreeBuilder::leaf`] or [`TreeBuilder::token`] locate
//! their text by searching forward from the end of the previous leaf. Parser
//! adapters that already know byte ranges use the `*_spanned` variants.
//!
//! Builder methods chain; the first error is remembered and reported by
//! [`TreeBuilder::finish`].

use std::ops::Range;

use thiserror::Error;

use crate::point::{Point, Span};
use crate::tree::{NodeData, NodeId, SyntaxTree};

/// Errors that can occur while building a tree
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// Leaf text not present in the remaining source
    #[error("Text {text:?} for {kind} not found after byte {offset}")]
    TextNotFound {
        kind: String,
        text: String,
        offset: usize,
    },

    /// Byte range outside the source or reversed
    #[error("Invalid span {start}..{end} for {kind} (source is {len} bytes)")]
    InvalidSpan {
        kind: String,
        start: usize,
        end: usize,
        len: usize,
    },

    /// `close` called with no open node
    #[error("close() called without a matching open()")]
    UnbalancedClose,

    /// A second top-level node was opened
    #[error("Tree already has a root; cannot add {kind} at the top level")]
    MultipleRoots { kind: String },

    /// `finish` called with nodes still open
    #[error("Node {kind} was never closed")]
    UnclosedNode { kind: String },

    /// `finish` called before any node was added
    #[error("Tree has no nodes")]
    EmptyTree,
}

/// Builder for [`SyntaxTree`]
pub struct TreeBuilder {
    source: String,
    line_starts: Vec<usize>,
    nodes: Vec<NodeData>,
    implicit: Vec<bool>,
    stack: Vec<NodeId>,
    root: Option<NodeId>,
    cursor: usize,
    error: Option<BuildError>,
}

impl TreeBuilder {
    pub fn new(source: impl Into<String>) -> Self {
        let source = source.into();
        let line_starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self {
            source,
            line_starts,
            nodes: Vec::new(),
            implicit: Vec::new(),
            stack: Vec::new(),
            root: None,
            cursor: 0,
            error: None,
        }
    }

    /// Open a named interior node whose span is derived from its children
    pub fn open(&mut self, kind: &str) -> &mut Self {
        let at = self.cursor;
        if let Some(id) = self.push(kind, true, at..at, true) {
            self.stack.push(id);
        }
        self
    }

    /// Open an interior node with a known byte range
    pub fn open_spanned(&mut self, kind: &str, named: bool, bytes: Range<usize>) -> &mut Self {
        if self.check_span(kind, &bytes) {
            self.cursor = self.cursor.max(bytes.start);
            if let Some(id) = self.push(kind, named, bytes, false) {
                self.stack.push(id);
            }
        }
        self
    }

    /// Add a named leaf, locating `text` after the previous leaf
    pub fn leaf(&mut self, kind: &str, text: &str) -> &mut Self {
        self.add_found(kind, true, text)
    }

    /// Add an anonymous token whose kind is its own text (`=`, `let`, ...)
    pub fn token(&mut self, text: &str) -> &mut Self {
        self.add_found(text, false, text)
    }

    /// Add a leaf with a known byte range
    pub fn leaf_spanned(&mut self, kind: &str, named: bool, bytes: Range<usize>) -> &mut Self {
        if self.check_span(kind, &bytes) {
            self.cursor = self.cursor.max(bytes.end);
            self.push(kind, named, bytes, false);
        }
        self
    }

    /// Close the innermost open node
    pub fn close(&mut self) -> &mut Self {
        let Some(id) = self.stack.pop() else {
            self.fail(BuildError::UnbalancedClose);
            return self;
        };
        if self.implicit[id.index()] {
            let bytes = if self.root == Some(id) {
                0..self.source.len()
            } else {
                let children = &self.nodes[id.index()].children;
                match (children.first(), children.last()) {
                    (Some(first), Some(last)) => {
                        self.nodes[first.index()].bytes.start..self.nodes[last.index()].bytes.end
                    }
                    _ => self.cursor..self.cursor,
                }
            };
            self.nodes[id.index()].bytes = bytes;
        } else {
            self.cursor = self.cursor.max(self.nodes[id.index()].bytes.end);
        }
        self
    }

    /// Finish the tree, computing positions and sibling links
    pub fn finish(mut self) -> Result<SyntaxTree, BuildError> {
        if let Some(error) = self.error.take() {
            return Err(error);
        }
        if let Some(open) = self.stack.last() {
            return Err(BuildError::UnclosedNode {
                kind: self.nodes[open.index()].kind.clone(),
            });
        }
        let root = self.root.ok_or(BuildError::EmptyTree)?;

        for i in 0..self.nodes.len() {
            let bytes = self.nodes[i].bytes.clone();
            let span = Span::new(self.point_at(bytes.start), self.point_at(bytes.end));
            self.nodes[i].span = span;

            let named: Vec<NodeId> = self.nodes[i]
                .children
                .iter()
                .copied()
                .filter(|child| self.nodes[child.index()].named)
                .collect();
            for pair in named.windows(2) {
                self.nodes[pair[0].index()].next_named_sibling = Some(pair[1]);
                self.nodes[pair[1].index()].prev_named_sibling = Some(pair[0]);
            }
        }

        Ok(SyntaxTree {
            source: self.source,
            line_starts: self.line_starts,
            nodes: self.nodes,
            root,
        })
    }

    fn add_found(&mut self, kind: &str, named: bool, text: &str) -> &mut Self {
        if self.error.is_some() {
            return self;
        }
        match self.source[self.cursor..].find(text) {
            Some(offset) => {
                let start = self.cursor + offset;
                let end = start + text.len();
                self.cursor = end;
                self.push(kind, named, start..end, false);
            }
            None => self.fail(BuildError::TextNotFound {
                kind: kind.to_string(),
                text: text.to_string(),
                offset: self.cursor,
            }),
        }
        self
    }

    fn push(&mut self, kind: &str, named: bool, bytes: Range<usize>, implicit: bool) -> Option<NodeId> {
        if self.error.is_some() {
            return None;
        }
        let id = NodeId(self.nodes.len() as u32);
        let parent = self.stack.last().copied();
        match parent {
            Some(parent) => self.nodes[parent.index()].children.push(id),
            None if self.root.is_none() => self.root = Some(id),
            None => {
                self.fail(BuildError::MultipleRoots {
                    kind: kind.to_string(),
                });
                return None;
            }
        }
        self.nodes.push(NodeData {
            kind: kind.to_string(),
            named,
            bytes,
            span: Span::default(),
            parent,
            children: Vec::new(),
            prev_named_sibling: None,
            next_named_sibling: None,
        });
        self.implicit.push(implicit);
        Some(id)
    }

    fn check_span(&mut self, kind: &str, bytes: &Range<usize>) -> bool {
        if bytes.start > bytes.end || bytes.end > self.source.len() {
            self.fail(BuildError::InvalidSpan {
                kind: kind.to_string(),
                start: bytes.start,
                end: bytes.end,
                len: self.source.len(),
            });
            return false;
        }
        true
    }

    fn fail(&mut self, error: BuildError) {
        if self.error.is_none() {
            self.error = Some(error);
        }
    }

    fn point_at(&self, byte: usize) -> Point {
        let row = self.line_starts.partition_point(|&start| start <= byte) - 1;
        Point::new(row as u32, (byte - self.line_starts[row]) as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_implicit_spans_follow_children() {
        let mut b = TreeBuilder::new("module Main exposing (..)\n\nimport Html\n");
        b.open("file")
            .open("module_declaration")
            .token("module")
            .open("upper_case_qid")
            .leaf("upper_case_identifier", "Main")
            .close()
            .close()
            .open("import_clause")
            .token("import")
            .open("upper_case_qid")
            .leaf("upper_case_identifier", "Html")
            .close()
            .close()
            .close();
        let tree = b.finish().unwrap();

        let module = tree.root_node().child_of_kind("module_declaration").unwrap();
        assert_eq!(module.text(), "module Main");
        assert_eq!(module.start(), Point::new(0, 0));

        let import = tree.root_node().child_of_kind("import_clause").unwrap();
        assert_eq!(import.start(), Point::new(2, 0));
        assert_eq!(import.end(), Point::new(2, 11));

        // The implicit root covers the whole source
        assert_eq!(tree.root_node().end(), Point::new(3, 0));
    }

    #[test]
    fn test_spanned_nodes_use_given_ranges() {
        let mut b = TreeBuilder::new("x = 1");
        b.open_spanned("file", true, 0..5)
            .open_spanned("value_declaration", true, 0..5)
            .leaf_spanned("lower_case_identifier", true, 0..1)
            .leaf_spanned("=", false, 2..3)
            .leaf_spanned("number_constant_expr", true, 4..5)
            .close()
            .close();
        let tree = b.finish().unwrap();
        let decl = tree.root_node().child_of_kind("value_declaration").unwrap();
        assert_eq!(decl.named_children().count(), 2);
        assert_eq!(decl.last_named_child().unwrap().text(), "1");
    }

    #[test]
    fn test_missing_text_is_reported() {
        let mut b = TreeBuilder::new("foo");
        b.open("file").leaf("lower_case_identifier", "bar").close();
        assert!(matches!(b.finish(), Err(BuildError::TextNotFound { .. })));
    }

    #[test]
    fn test_unclosed_node_is_reported() {
        let mut b = TreeBuilder::new("foo");
        b.open("file").leaf("lower_case_identifier", "foo");
        assert_eq!(
            b.finish().unwrap_err(),
            BuildError::UnclosedNode {
                kind: "file".to_string()
            }
        );
    }

    #[test]
    fn test_second_root_is_rejected() {
        let mut b = TreeBuilder::new("a b");
        b.open("file").close().open("file").close();
        assert!(matches!(b.finish(), Err(BuildError::MultipleRoots { .. })));
    }

    #[test]
    fn test_invalid_span_is_rejected() {
        let mut b = TreeBuilder::new("abc");
        b.open_spanned("file", true, 0..10).close();
        assert!(matches!(b.finish(), Err(BuildError::InvalidSpan { .. })));
    }

    #[test]
    fn test_empty_builder() {
        assert_eq!(TreeBuilder::new("").finish().unwrap_err(), BuildError::EmptyTree);
    }
}
