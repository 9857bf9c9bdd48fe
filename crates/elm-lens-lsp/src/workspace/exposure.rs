//! Export-list classification
//!
//! Reads `module Foo exposing (...)` headers. A file without a module
//! declaration exposes nothing.

use elm_lens_syntax::{SyntaxNode, SyntaxTree};

use super::traits::{ExposureClassifier, ModuleNameLocator};

/// Classifies names against the module declaration's exposing list
#[derive(Debug, Clone, Copy, Default)]
pub struct ExposingList;

impl ExposureClassifier for ExposingList {
    fn is_exposed(&self, tree: &SyntaxTree, name: &str, is_callable: bool) -> bool {
        tree.root_node()
            .child_of_kind("module_declaration")
            .and_then(|module| module.child_of_kind("exposing_list"))
            .is_some_and(|list| exposes(list, name, is_callable))
    }
}

/// Whether an `exposing_list` node covers `name`.
///
/// Shared by module headers and import clauses.
pub(crate) fn exposes(list: SyntaxNode<'_>, name: &str, is_callable: bool) -> bool {
    list.named_children().any(|entry| match entry.kind() {
        "double_dot" => true,
        "exposed_value" => is_callable && entry.text() == name,
        "exposed_type" => {
            !is_callable
                && entry
                    .child_of_kind("upper_case_identifier")
                    .is_some_and(|id| id.text() == name)
        }
        _ => false,
    })
}

/// Locates the `upper_case_qid` naming the module in its declaration
#[derive(Debug, Clone, Copy, Default)]
pub struct DeclaredModuleName;

impl ModuleNameLocator for DeclaredModuleName {
    fn locate<'t>(&self, tree: &'t SyntaxTree) -> Option<SyntaxNode<'t>> {
        tree.root_node()
            .child_of_kind("module_declaration")?
            .child_of_kind("upper_case_qid")
    }
}
