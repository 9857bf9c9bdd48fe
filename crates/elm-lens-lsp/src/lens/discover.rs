//! Lens discovery
//!
//! Walks the top level of a tree and emits placeholders for the two lens
//! families. Exposure lenses come first (functions and types interleaved in
//! source order), then reference-count lenses (types, then functions, then
//! the module name).

use elm_lens_syntax::{SyntaxNode, SyntaxTree};

use super::placeholder::{LensFamily, LensPlaceholder};
use crate::workspace::resolver::function_name;
use crate::workspace::{FileId, ModuleNameLocator};

/// Produces lens placeholders for a file
pub struct LensDiscoverer<'a> {
    module_names: &'a dyn ModuleNameLocator,
}

impl<'a> LensDiscoverer<'a> {
    pub fn new(module_names: &'a dyn ModuleNameLocator) -> Self {
        Self { module_names }
    }

    /// Placeholders for every lens in the file. No tree, no lenses.
    pub fn discover(&self, tree: Option<&SyntaxTree>, file_id: &FileId) -> Vec<LensPlaceholder> {
        let Some(tree) = tree else {
            return Vec::new();
        };
        let mut lenses = self.exposure_lenses(tree, file_id);
        lenses.extend(self.reference_lenses(tree, file_id));
        lenses
    }

    fn exposure_lenses(&self, tree: &SyntaxTree, file_id: &FileId) -> Vec<LensPlaceholder> {
        let mut lenses = Vec::new();
        for node in tree.root_node().children() {
            if let Some(name) = function_name(node) {
                lenses.push(LensPlaceholder::new(
                    function_anchor(node).span(),
                    LensFamily::Exposure,
                    file_id,
                    name.text(),
                    true,
                ));
            } else if let Some(name) = type_name(node) {
                lenses.push(LensPlaceholder::new(
                    node.span(),
                    LensFamily::Exposure,
                    file_id,
                    name.text(),
                    false,
                ));
            }
        }
        lenses
    }

    fn reference_lenses(&self, tree: &SyntaxTree, file_id: &FileId) -> Vec<LensPlaceholder> {
        let root = tree.root_node();

        let types = root.children().filter_map(type_name).map(|name| {
            LensPlaceholder::new(name.span(), LensFamily::ReferenceCount, file_id, name.text(), false)
        });

        let functions = root.children().filter_map(|node| {
            let name = function_name(node)?;
            Some(LensPlaceholder::new(
                function_anchor(node).span(),
                LensFamily::ReferenceCount,
                file_id,
                name.text(),
                true,
            ))
        });

        let module = self
            .module_names
            .locate(tree)
            .filter(|node| node.last_child().is_some())
            .map(|node| {
                LensPlaceholder::new(node.span(), LensFamily::ReferenceCount, file_id, node.text(), false)
            });

        types.chain(functions).chain(module).collect()
    }
}

/// The preceding type annotation when directly adjacent, else the declaration
fn function_anchor(declaration: SyntaxNode<'_>) -> SyntaxNode<'_> {
    declaration
        .prev_named_sibling()
        .filter(|sibling| sibling.kind() == "type_annotation")
        .unwrap_or(declaration)
}

fn type_name(node: SyntaxNode<'_>) -> Option<SyntaxNode<'_>> {
    match node.kind() {
        "type_declaration" | "type_alias_declaration" => node.child_of_kind("upper_case_identifier"),
        _ => None,
    }
}
