//! Folding range generation for Elm syntax trees
//!
//! Generates folding ranges for:
//! - Runs of consecutive `import` clauses (Imports kind)
//! - `let` bindings and the `in` body, as separate folds
//! - Each branch of an `if`/`then`/`else` chain after the condition
//! - Case expressions and branches, top-level values, type declarations,
//!   type aliases and record literals
//! - Block comments (Comment kind)

use elm_lens_syntax::{Point, Span, SyntaxNode, SyntaxTree};
use tower_lsp::lsp_types::{FoldingRange, FoldingRangeKind};

/// Node kinds folded as a single region spanning the whole node
const REGION_CONSTRUCTS: &[&str] = &[
    "case_of_expr",
    "type_alias_declaration",
    "type_declaration",
    "record_expr",
    "case_of_branch",
];

/// Named children of a `let_in_expr` that are never its body
const LET_NON_BODY: &[&str] = &[
    "value_declaration",
    "type_annotation",
    "line_comment",
    "block_comment",
];

/// Kind of a fold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoldKind {
    Imports,
    Region,
    Comment,
}

/// A collapsible span of source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FoldRange {
    pub start: Point,
    pub end: Point,
    pub kind: FoldKind,
}

impl FoldRange {
    fn new(start: Point, end: Point, kind: FoldKind) -> Self {
        Self { start, end, kind }
    }

    fn spanning(span: Span, kind: FoldKind) -> Self {
        Self::new(span.start, span.end, kind)
    }

    pub fn span(&self) -> Span {
        Span::new(self.start, self.end)
    }

    /// Wire form, with columns in UTF-16 units of `tree`'s source
    pub fn to_folding_range(&self, tree: &SyntaxTree) -> FoldingRange {
        FoldingRange {
            start_line: self.start.row,
            start_character: Some(tree.utf16_column(self.start)),
            end_line: self.end.row,
            end_character: Some(tree.utf16_column(self.end)),
            kind: Some(match self.kind {
                FoldKind::Imports => FoldingRangeKind::Imports,
                FoldKind::Region => FoldingRangeKind::Region,
                FoldKind::Comment => FoldingRangeKind::Comment,
            }),
            collapsed_text: None,
        }
    }
}

/// Analyzer for generating folding ranges
pub struct FoldingAnalyzer;

impl FoldingAnalyzer {
    /// Folding ranges for the whole tree, in pre-order. No tree, no folds.
    pub fn compute_folding_ranges(tree: Option<&SyntaxTree>) -> Vec<FoldRange> {
        let mut folds = Vec::new();
        let Some(tree) = tree else {
            return folds;
        };

        let mut stack = vec![tree.root_node()];
        while let Some(node) = stack.pop() {
            let classifiable = node.is_named()
                && node.parent().is_some_and(|parent| parent.child_count() > 0);
            if classifiable {
                Self::classify(node, &mut folds);
            }
            stack.extend(node.children().rev());
        }

        folds
    }

    /// Same ranges, converted for the wire
    pub fn generate_ranges(tree: Option<&SyntaxTree>) -> Vec<FoldingRange> {
        let Some(tree) = tree else {
            return Vec::new();
        };
        Self::compute_folding_ranges(Some(tree))
            .iter()
            .map(|fold| fold.to_folding_range(tree))
            .collect()
    }

    fn classify(node: SyntaxNode<'_>, folds: &mut Vec<FoldRange>) {
        match node.kind() {
            "import_clause" => {
                let starts_run = node
                    .prev_named_sibling()
                    .map_or(true, |prev| prev.kind() != "import_clause");
                if starts_run {
                    let last = Self::last_import_in_run(node);
                    folds.push(FoldRange::new(node.start(), last.end(), FoldKind::Imports));
                }
            }
            "let_in_expr" => {
                let last_binding = node
                    .named_children()
                    .filter(|child| child.kind() == "value_declaration")
                    .last();
                if let Some(binding) = last_binding {
                    folds.push(FoldRange::new(node.start(), binding.end(), FoldKind::Region));
                }

                let body = node
                    .last_named_child()
                    .filter(|child| !LET_NON_BODY.contains(&child.kind()));
                if let Some(body) = body {
                    folds.push(FoldRange::new(
                        body.start().line_above(),
                        node.end(),
                        FoldKind::Region,
                    ));
                }
            }
            "if_else_expr" => {
                for branch in node.named_children().skip(1) {
                    folds.push(FoldRange::new(
                        branch.start().line_above(),
                        branch.end(),
                        FoldKind::Region,
                    ));
                }
            }
            "value_declaration" => {
                let top_level = node.parent().is_some_and(|parent| parent.parent().is_none());
                if top_level {
                    folds.push(FoldRange::spanning(node.span(), FoldKind::Region));
                }
            }
            "block_comment" => folds.push(FoldRange::spanning(node.span(), FoldKind::Comment)),
            kind if REGION_CONSTRUCTS.contains(&kind) => {
                folds.push(FoldRange::spanning(node.span(), FoldKind::Region));
            }
            _ => {}
        }
    }

    fn last_import_in_run(first: SyntaxNode<'_>) -> SyntaxNode<'_> {
        let mut last = first;
        while let Some(next) = last
            .next_named_sibling()
            .filter(|next| next.kind() == "import_clause")
        {
            last = next;
        }
        last
    }
}
