//! Structural intelligence for elm-lens
//!
//! This module derives folding ranges from the shape of an Elm syntax tree:
//! import runs, `let` blocks, `if` branches, case expressions, declarations,
//! record literals and block comments.

pub mod folding;

pub use folding::{FoldKind, FoldRange, FoldingAnalyzer};
