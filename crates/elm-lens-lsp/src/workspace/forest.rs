//! Parsed-tree cache
//!
//! Maps file ids to the most recent tree for that file. Trees are shared
//! behind `Arc`, so replacing an entry after a reparse never invalidates a
//! tree another request is still reading.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use elm_lens_syntax::SyntaxTree;
use serde::{Deserialize, Serialize};
use tower_lsp::lsp_types::Url;

use super::exposure::DeclaredModuleName;
use super::traits::{ModuleNameLocator, TreeAccess};

/// Identifier of a workspace file (its document URI)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileId(String);

impl FileId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse as a URL, for building LSP locations
    pub fn to_url(&self) -> Option<Url> {
        Url::parse(&self.0).ok()
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FileId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<&Url> for FileId {
    fn from(url: &Url) -> Self {
        Self(url.as_str().to_string())
    }
}

/// The set of parsed trees in a workspace
#[derive(Debug, Default, Clone)]
pub struct Forest {
    trees: BTreeMap<FileId, Arc<SyntaxTree>>,
}

impl Forest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the tree for a file, returning the previous one
    pub fn insert(&mut self, file_id: FileId, tree: SyntaxTree) -> Option<Arc<SyntaxTree>> {
        self.trees.insert(file_id, Arc::new(tree))
    }

    pub fn remove(&mut self, file_id: &FileId) -> Option<Arc<SyntaxTree>> {
        self.trees.remove(file_id)
    }

    pub fn contains(&self, file_id: &FileId) -> bool {
        self.trees.contains_key(file_id)
    }

    /// Number of files in the forest
    pub fn len(&self) -> usize {
        self.trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    /// Trees ordered by file id
    pub fn iter(&self) -> impl Iterator<Item = (&FileId, &Arc<SyntaxTree>)> {
        self.trees.iter()
    }

    /// The file declaring `module <name>`; the lowest file id wins on duplicates
    pub fn module(&self, name: &str) -> Option<(&FileId, &Arc<SyntaxTree>)> {
        self.trees.iter().find(|(_, tree)| {
            DeclaredModuleName
                .locate(tree)
                .is_some_and(|node| node.text() == name)
        })
    }
}

impl TreeAccess for Forest {
    fn get(&self, file_id: &FileId) -> Option<Arc<SyntaxTree>> {
        self.trees.get(file_id).cloned()
    }
}
