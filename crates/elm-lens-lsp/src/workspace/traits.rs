//! Collaborator interfaces
//!
//! Lens resolution reads trees and symbol information through these traits
//! instead of a global registry, so each analyzer can be handed whatever
//! implementation the caller has (the server's [`Forest`](super::Forest), or
//! stubs in tests).

use std::sync::Arc;

use elm_lens_syntax::{Span, SyntaxNode, SyntaxTree};
use serde::{Deserialize, Serialize};

use super::forest::FileId;

/// Kind of a resolved declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SymbolKind {
    /// Top-level function or value
    Function,
    /// Custom type or type alias
    Type,
    /// A module, identified by its declared name
    Module,
    /// Let binding, parameter or pattern variable
    Local,
}

/// The declaring site of a symbol
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Definition {
    pub file_id: FileId,
    pub name: String,
    pub kind: SymbolKind,
    /// Span of the declaring name node
    pub span: Span,
}

/// One usage of a definition somewhere in the workspace
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceSite {
    pub file_id: FileId,
    pub span: Span,
}

/// Lookup of the current tree for a file
pub trait TreeAccess {
    fn get(&self, file_id: &FileId) -> Option<Arc<SyntaxTree>>;
}

/// Maps a usage node to the declaration it refers to
pub trait DefinitionResolver {
    fn resolve(&self, node: SyntaxNode<'_>, file_id: &FileId, tree: &SyntaxTree) -> Option<Definition>;
}

/// Enumerates every usage of a declaration across the workspace
pub trait ReferenceResolver {
    fn find_all(&self, definition: &Definition) -> Vec<ReferenceSite>;
}

/// Decides whether a top-level name is in the module's export list
pub trait ExposureClassifier {
    fn is_exposed(&self, tree: &SyntaxTree, name: &str, is_callable: bool) -> bool;
}

/// Finds the node holding the module's own name
pub trait ModuleNameLocator {
    fn locate<'t>(&self, tree: &'t SyntaxTree) -> Option<SyntaxNode<'t>>;
}
