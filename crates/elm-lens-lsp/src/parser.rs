//! Source-to-tree parsing
//!
//! The analyzers only ever see [`SyntaxTree`]s. [`DocumentParser`] is the
//! seam where source text becomes one; the `tree-sitter` feature provides
//! [`ElmParser`], which parses with tree-sitter-elm and copies the result
//! into the arena node for node.

use elm_lens_syntax::SyntaxTree;

/// Turns document text into a syntax tree
pub trait DocumentParser: Send + Sync {
    /// `None` when the text could not be turned into a tree at all
    fn parse(&self, source: &str) -> Option<SyntaxTree>;
}

#[cfg(feature = "tree-sitter")]
pub use self::elm::{ElmParser, ParserError};

#[cfg(feature = "tree-sitter")]
mod elm {
    use std::sync::Mutex;

    use elm_lens_syntax::{BuildError, SyntaxTree, TreeBuilder};
    use thiserror::Error;
    use tracing::{error, warn};
    use tree_sitter::{Parser, Tree};

    use super::DocumentParser;

    /// Errors raised while setting up the parser
    #[derive(Error, Debug)]
    pub enum ParserError {
        #[error("Incompatible tree-sitter-elm grammar: {0}")]
        Language(#[from] tree_sitter::LanguageError),
    }

    /// tree-sitter-elm behind a lock, since a `Parser` is not `Sync`
    pub struct ElmParser {
        parser: Mutex<Parser>,
    }

    impl ElmParser {
        pub fn new() -> Result<Self, ParserError> {
            let mut parser = Parser::new();
            parser.set_language(&tree_sitter_elm::LANGUAGE.into())?;
            Ok(Self {
                parser: Mutex::new(parser),
            })
        }
    }

    impl DocumentParser for ElmParser {
        fn parse(&self, source: &str) -> Option<SyntaxTree> {
            let tree = {
                let Ok(mut parser) = self.parser.lock() else {
                    error!("Parser lock poisoned");
                    return None;
                };
                parser.parse(source, None)?
            };
            match convert(source, &tree) {
                Ok(tree) => Some(tree),
                Err(e) => {
                    warn!("Could not convert parse tree: {}", e);
                    None
                }
            }
        }
    }

    /// Copy a tree-sitter tree into the arena with an explicit cursor walk
    fn convert(source: &str, tree: &Tree) -> Result<SyntaxTree, BuildError> {
        let mut builder = TreeBuilder::new(source);
        let mut cursor = tree.walk();
        loop {
            let node = cursor.node();
            if node.child_count() == 0 {
                builder.leaf_spanned(node.kind(), node.is_named(), node.byte_range());
            } else {
                builder.open_spanned(node.kind(), node.is_named(), node.byte_range());
                if cursor.goto_first_child() {
                    continue;
                }
                builder.close();
            }

            loop {
                if cursor.goto_next_sibling() {
                    break;
                }
                if !cursor.goto_parent() {
                    return builder.finish();
                }
                builder.close();
            }
        }
    }

}
