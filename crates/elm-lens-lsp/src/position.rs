//! Byte positions to LSP positions
//!
//! Trees measure columns in bytes. LSP clients count UTF-16 code units
//! unless another encoding is negotiated, so every range leaving the server
//! goes through here with the tree it was measured against.

use elm_lens_syntax::{Point, Span, SyntaxTree};
use tower_lsp::lsp_types::{Location, Position, Range};

use crate::workspace::{FileId, TreeAccess};

pub fn lsp_position(tree: &SyntaxTree, point: Point) -> Position {
    Position::new(point.row, tree.utf16_column(point))
}

pub fn lsp_range(tree: &SyntaxTree, span: Span) -> Range {
    Range::new(lsp_position(tree, span.start), lsp_position(tree, span.end))
}

/// Range of a span in another workspace file.
/// Without a tree for the file the byte columns pass through unchanged.
pub fn file_range(trees: &dyn TreeAccess, file_id: &FileId, span: Span) -> Range {
    match trees.get(file_id) {
        Some(tree) => lsp_range(&tree, span),
        None => Range::new(
            Position::new(span.start.row, span.start.column),
            Position::new(span.end.row, span.end.column),
        ),
    }
}

/// `Location` for a span, or `None` if the file id is not a URL
pub fn file_location(trees: &dyn TreeAccess, file_id: &FileId, span: Span) -> Option<Location> {
    let uri = file_id.to_url()?;
    Some(Location::new(uri, file_range(trees, file_id, span)))
}
