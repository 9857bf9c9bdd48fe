//! Arena-backed syntax tree
//!
//! A [`SyntaxTree`] owns its source text and a flat vector of nodes in
//! pre-order. [`SyntaxNode`] is a cheap `Copy` handle pairing the tree with a
//! [`NodeId`]; every navigation method returns another handle into the same
//! arena.

use std::fmt;
use std::ops::Range;

use crate::point::{Point, Span};

/// Index of a node inside its tree's arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone)]
pub(crate) struct NodeData {
    pub(crate) kind: String,
    pub(crate) named: bool,
    pub(crate) bytes: Range<usize>,
    pub(crate) span: Span,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) prev_named_sibling: Option<NodeId>,
    pub(crate) next_named_sibling: Option<NodeId>,
}

/// Immutable syntax tree for one source file
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    pub(crate) source: String,
    pub(crate) line_starts: Vec<usize>,
    pub(crate) nodes: Vec<NodeData>,
    pub(crate) root: NodeId,
}

impl SyntaxTree {
    /// The root node (a `file` node for Elm sources)
    pub fn root_node(&self) -> SyntaxNode<'_> {
        self.node(self.root)
    }

    /// Handle for a node id. Panics if the id belongs to another tree.
    pub fn node(&self, id: NodeId) -> SyntaxNode<'_> {
        assert!(id.index() < self.nodes.len(), "node id out of range");
        SyntaxNode { tree: self, id }
    }

    /// Handle for a node id, or `None` if it is out of range
    pub fn get(&self, id: NodeId) -> Option<SyntaxNode<'_>> {
        (id.index() < self.nodes.len()).then_some(SyntaxNode { tree: self, id })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Column of `point` in UTF-16 code units, the unit LSP positions count in.
    /// Rows outside the source keep their byte column.
    pub fn utf16_column(&self, point: Point) -> u32 {
        let Some(&line_start) = self.line_starts.get(point.row as usize) else {
            return point.column;
        };
        let column = point.column as usize;
        self.source[line_start..]
            .char_indices()
            .take_while(|&(offset, ch)| offset < column && ch != '\n')
            .map(|(_, ch)| ch.len_utf16() as u32)
            .sum()
    }

    /// Number of nodes in the arena
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in pre-order
    pub fn nodes(&self) -> impl Iterator<Item = SyntaxNode<'_>> + '_ {
        (0..self.nodes.len()).map(move |i| SyntaxNode {
            tree: self,
            id: NodeId(i as u32),
        })
    }
}

/// Handle to a node inside a [`SyntaxTree`]
#[derive(Clone, Copy)]
pub struct SyntaxNode<'t> {
    tree: &'t SyntaxTree,
    id: NodeId,
}

impl<'t> SyntaxNode<'t> {
    fn data(&self) -> &'t NodeData {
        &self.tree.nodes[self.id.index()]
    }

    fn wrap(&self, id: Option<NodeId>) -> Option<SyntaxNode<'t>> {
        id.map(|id| SyntaxNode {
            tree: self.tree,
            id,
        })
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn tree(&self) -> &'t SyntaxTree {
        self.tree
    }

    /// Grammar type tag, e.g. `value_declaration`
    pub fn kind(&self) -> &'t str {
        &self.data().kind
    }

    pub fn is_named(&self) -> bool {
        self.data().named
    }

    pub fn start(&self) -> Point {
        self.data().span.start
    }

    pub fn end(&self) -> Point {
        self.data().span.end
    }

    pub fn span(&self) -> Span {
        self.data().span
    }

    pub fn byte_range(&self) -> Range<usize> {
        self.data().bytes.clone()
    }

    /// Source text covered by this node
    pub fn text(&self) -> &'t str {
        self.tree.source.get(self.data().bytes.clone()).unwrap_or("")
    }

    pub fn parent(&self) -> Option<SyntaxNode<'t>> {
        self.wrap(self.data().parent)
    }

    pub fn child_count(&self) -> usize {
        self.data().children.len()
    }

    /// All children, named and anonymous, in source order
    pub fn children(&self) -> impl DoubleEndedIterator<Item = SyntaxNode<'t>> + 't {
        let tree = self.tree;
        self.data()
            .children
            .iter()
            .map(move |&id| SyntaxNode { tree, id })
    }

    pub fn named_children(&self) -> impl DoubleEndedIterator<Item = SyntaxNode<'t>> + 't {
        self.children().filter(|child| child.is_named())
    }

    pub fn last_child(&self) -> Option<SyntaxNode<'t>> {
        self.wrap(self.data().children.last().copied())
    }

    pub fn last_named_child(&self) -> Option<SyntaxNode<'t>> {
        self.named_children().next_back()
    }

    pub fn prev_named_sibling(&self) -> Option<SyntaxNode<'t>> {
        self.wrap(self.data().prev_named_sibling)
    }

    pub fn next_named_sibling(&self) -> Option<SyntaxNode<'t>> {
        self.wrap(self.data().next_named_sibling)
    }

    /// First named child with the given kind
    pub fn child_of_kind(&self, kind: &str) -> Option<SyntaxNode<'t>> {
        self.named_children().find(|child| child.kind() == kind)
    }

    /// Parent, grandparent, ... up to the root
    pub fn ancestors(&self) -> impl Iterator<Item = SyntaxNode<'t>> + 't {
        std::iter::successors(self.parent(), |node| node.parent())
    }

    /// This node and every node below it, in pre-order
    pub fn descendants(&self) -> Descendants<'t> {
        Descendants { stack: vec![*self] }
    }

    /// Smallest named node whose span contains `point`, starting from this node.
    ///
    /// At a boundary shared by two siblings the one starting there wins; a
    /// child merely ending at the point is only taken when nothing starts
    /// there.
    pub fn named_descendant_for_point(&self, point: Point) -> Option<SyntaxNode<'t>> {
        if !self.span().contains(point) {
            return None;
        }
        let mut current = *self;
        let mut best = self.is_named().then_some(*self);
        while let Some(child) = current
            .children()
            .find(|c| c.start() <= point && point < c.end())
            .or_else(|| current.children().find(|c| c.span().contains(point)))
        {
            if child.is_named() {
                best = Some(child);
            }
            current = child;
        }
        best
    }
}

impl PartialEq for SyntaxNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for SyntaxNode<'_> {}

impl fmt::Debug for SyntaxNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.kind(), self.span())
    }
}

/// Pre-order iterator driven by an explicit stack
pub struct Descendants<'t> {
    stack: Vec<SyntaxNode<'t>>,
}

impl<'t> Iterator for Descendants<'t> {
    type Item = SyntaxNode<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().rev());
        Some(node)
    }
}
