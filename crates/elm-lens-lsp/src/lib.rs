//! Elm Language Server Protocol features
//!
//! This library provides folding ranges and code lenses for Elm files:
//! - Folding ranges for import runs, `let` blocks, `if` branches, case
//!   expressions, top-level values, type declarations, records and block
//!   comments
//! - "exposed" / "local" lenses on top-level functions and types, optionally
//!   toggling the module's exposing list
//! - Reference-count lenses on top-level functions, types and the module name,
//!   resolved lazily through `codeLens/resolve`
//!
//! # Library Usage
//!
//! ```
//! use elm_lens_lsp::lens::{LensDiscoverer, LensFamily};
//! use elm_lens_lsp::structural::{FoldKind, FoldingAnalyzer};
//! use elm_lens_lsp::workspace::{DeclaredModuleName, FileId};
//! use elm_lens_syntax::TreeBuilder;
//!
//! // The shape tree-sitter-elm gives `answer =\n    42`
//! let mut builder = TreeBuilder::new("answer =\n    42\n");
//! builder
//!     .open("file")
//!     .open("value_declaration")
//!     .open("function_declaration_left")
//!     .leaf("lower_case_identifier", "answer")
//!     .close()
//!     .token("=")
//!     .leaf("number_constant_expr", "42")
//!     .close()
//!     .close();
//! let tree = builder.finish().unwrap();
//!
//! let folds = FoldingAnalyzer::compute_folding_ranges(Some(&tree));
//! assert_eq!(folds.len(), 1);
//! assert_eq!(folds[0].kind, FoldKind::Region);
//!
//! let file_id = FileId::from("file:///src/Answer.elm");
//! let lenses = LensDiscoverer::new(&DeclaredModuleName).discover(Some(&tree), &file_id);
//! assert_eq!(lenses.len(), 2);
//! assert_eq!(lenses[0].family(), LensFamily::Exposure);
//! assert_eq!(lenses[1].family(), LensFamily::ReferenceCount);
//! ```
//!
//! # Binary Usage
//!
//! ```bash
//! # Start the language server (typically called by an editor)
//! elm-lens-lsp
//!
//! # With debug logging
//! RUST_LOG=debug elm-lens-lsp
//! ```

pub mod config;
pub mod lens;
pub mod parser;
pub mod position;
pub mod server;
pub mod structural;
pub mod workspace;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export main entry point
pub use server::{run_server, Backend};

// Re-export commonly used types
pub use config::{Capabilities, Settings};
pub use lens::{LensDiscoverer, LensError, LensPlaceholder, LensResolver, ResolvedLens};
pub use parser::DocumentParser;
#[cfg(feature = "tree-sitter")]
pub use parser::ElmParser;
pub use structural::{FoldKind, FoldRange, FoldingAnalyzer};
pub use workspace::{FileId, Forest, NameResolver};
