//! elm-lens-syntax - Arena syntax tree definitions
//!
//! This crate provides the immutable, position-annotated syntax tree that the
//! elm-lens folding and code lens analyzers walk. Nodes live in a flat arena
//! owned by [`SyntaxTree`]; parent, child and sibling relations are stored as
//! [`NodeId`] indices, so no node owns another.
//!
//! # Example
//!
//! ```
//! use elm_lens_syntax::TreeBuilder;
//!
//! let mut builder = TreeBuilder::new("import Html\n");
//! builder
//!     .open("file")
//!     .open("import_clause")
//!     .token("import")
//!     .open("upper_case_qid")
//!     .leaf("upper_case_identifier", "Html")
//!     .close()
//!     .close()
//!     .close();
//! let tree = builder.finish().unwrap();
//!
//! let import = tree.root_node().named_children().next().unwrap();
//! assert_eq!(import.kind(), "import_clause");
//! assert_eq!(import.text(), "import Html");
//! ```

pub mod builder;
pub mod point;
pub mod tree;

pub use builder::{BuildError, TreeBuilder};
pub use point::{Point, Span};
pub use tree::{NodeId, SyntaxNode, SyntaxTree};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
