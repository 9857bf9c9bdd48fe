//! Name-based definition and reference resolution
//!
//! Resolves identifiers by Elm's scoping rules as far as the syntax tree
//! shows them: local bindings first (parameters, `let` bindings, case and
//! lambda patterns), then the file's top-level declarations, then modules
//! brought in by `import` clauses. Qualified names go through the import's
//! `as` alias, or its full module name when it has none.
//!
//! Reference search is a full scan of the forest: every identifier with the
//! right text is resolved and kept if it lands on the same definition.

use elm_lens_syntax::{SyntaxNode, SyntaxTree};

use super::exposure::{exposes, DeclaredModuleName};
use super::forest::{FileId, Forest};
use super::traits::{
    Definition, DefinitionResolver, ModuleNameLocator, ReferenceResolver, ReferenceSite, SymbolKind,
};

/// Resolver over every tree in a [`Forest`]
#[derive(Debug, Clone, Copy)]
pub struct NameResolver<'f> {
    forest: &'f Forest,
}

impl<'f> NameResolver<'f> {
    pub fn new(forest: &'f Forest) -> Self {
        Self { forest }
    }

    fn resolve_lower(&self, node: SyntaxNode<'_>, file_id: &FileId, tree: &SyntaxTree) -> Option<Definition> {
        let parent = node.parent()?;
        match parent.kind() {
            "function_declaration_left" => {
                let declaration = parent.parent()?;
                let kind = if is_top_level(declaration) {
                    SymbolKind::Function
                } else {
                    SymbolKind::Local
                };
                Some(definition(file_id, node, kind))
            }
            "lower_pattern" => Some(definition(file_id, node, SymbolKind::Local)),
            "type_annotation" => {
                let declaration = parent.next_named_sibling()?;
                let name = function_name(declaration)?;
                (name.text() == node.text())
                    .then(|| self.resolve_lower(name, file_id, tree))
                    .flatten()
            }
            "value_qid" => {
                let qualifier = qualifier_of(node);
                if qualifier.is_empty() {
                    self.lookup_unqualified(node, file_id, tree, SymbolKind::Function)
                } else {
                    self.lookup_qualified(&qualifier, node.text(), file_id, tree, SymbolKind::Function)
                }
            }
            _ => None,
        }
    }

    fn resolve_upper(&self, node: SyntaxNode<'_>, file_id: &FileId, tree: &SyntaxTree) -> Option<Definition> {
        let parent = node.parent()?;
        match parent.kind() {
            "type_declaration" | "type_alias_declaration" => {
                let is_name = parent.child_of_kind("upper_case_identifier") == Some(node);
                is_name.then(|| definition(file_id, node, SymbolKind::Type))
            }
            "upper_case_qid" => {
                let owner = parent.parent()?;
                match owner.kind() {
                    "module_declaration" => Some(definition(file_id, parent, SymbolKind::Module)),
                    "import_clause" => {
                        let (module_file, module_tree) = self.forest.module(parent.text())?;
                        let name = DeclaredModuleName.locate(module_tree)?;
                        Some(definition(module_file, name, SymbolKind::Module))
                    }
                    // Constructor calls, not type positions
                    "value_expr" => None,
                    _ => {
                        // Only the final segment names the type; earlier ones are the qualifier
                        let last = parent
                            .named_children()
                            .filter(|child| child.kind() == "upper_case_identifier")
                            .last()?;
                        if last != node {
                            return None;
                        }
                        let qualifier = qualifier_of(node);
                        if qualifier.is_empty() {
                            self.lookup_unqualified(node, file_id, tree, SymbolKind::Type)
                        } else {
                            self.lookup_qualified(&qualifier, node.text(), file_id, tree, SymbolKind::Type)
                        }
                    }
                }
            }
            "exposed_type" => self.resolve_exposed(parent, node.text(), file_id, tree, SymbolKind::Type),
            _ => None,
        }
    }

    /// Entries of an exposing list point at the module that owns the list
    fn resolve_exposed(
        &self,
        entry: SyntaxNode<'_>,
        name: &str,
        file_id: &FileId,
        tree: &SyntaxTree,
        kind: SymbolKind,
    ) -> Option<Definition> {
        let list = entry.parent()?;
        let owner = list.parent()?;
        match owner.kind() {
            "module_declaration" => top_level(file_id, tree, name, kind),
            "import_clause" => {
                let qid = owner.child_of_kind("upper_case_qid")?;
                let (module_file, module_tree) = self.forest.module(qid.text())?;
                top_level(module_file, module_tree, name, kind)
            }
            _ => None,
        }
    }

    fn lookup_unqualified(
        &self,
        node: SyntaxNode<'_>,
        file_id: &FileId,
        tree: &SyntaxTree,
        kind: SymbolKind,
    ) -> Option<Definition> {
        let name = node.text();
        if kind == SymbolKind::Function {
            if let Some(local) = lookup_local(node, name, file_id) {
                return Some(local);
            }
        }
        if let Some(found) = top_level(file_id, tree, name, kind) {
            return Some(found);
        }

        let is_callable = kind == SymbolKind::Function;
        imports(tree).find_map(|import| {
            let list = import.child_of_kind("exposing_list")?;
            if !exposes(list, name, is_callable) {
                return None;
            }
            let qid = import.child_of_kind("upper_case_qid")?;
            let (module_file, module_tree) = self.forest.module(qid.text())?;
            top_level(module_file, module_tree, name, kind)
        })
    }

    fn lookup_qualified(
        &self,
        qualifier: &str,
        name: &str,
        file_id: &FileId,
        tree: &SyntaxTree,
        kind: SymbolKind,
    ) -> Option<Definition> {
        let own_module = DeclaredModuleName.locate(tree).map(|qid| qid.text());
        if own_module == Some(qualifier) {
            return top_level(file_id, tree, name, kind);
        }
        imports(tree).find_map(|import| {
            let qid = import.child_of_kind("upper_case_qid")?;
            let alias = import
                .child_of_kind("as_clause")
                .and_then(|clause| clause.child_of_kind("upper_case_identifier"))
                .map(|id| id.text());
            if alias.unwrap_or(qid.text()) != qualifier {
                return None;
            }
            let (module_file, module_tree) = self.forest.module(qid.text())?;
            top_level(module_file, module_tree, name, kind)
        })
    }

    fn candidate_kinds(kind: SymbolKind) -> &'static [&'static str] {
        match kind {
            SymbolKind::Function | SymbolKind::Local => &["lower_case_identifier", "exposed_value"],
            SymbolKind::Type => &["upper_case_identifier"],
            SymbolKind::Module => &[],
        }
    }
}

impl DefinitionResolver for NameResolver<'_> {
    fn resolve(&self, node: SyntaxNode<'_>, file_id: &FileId, tree: &SyntaxTree) -> Option<Definition> {
        match node.kind() {
            "lower_case_identifier" => self.resolve_lower(node, file_id, tree),
            "upper_case_identifier" => self.resolve_upper(node, file_id, tree),
            "exposed_value" => {
                self.resolve_exposed(node, node.text(), file_id, tree, SymbolKind::Function)
            }
            "upper_case_qid" => {
                let segment = node.named_children().last()?;
                self.resolve_upper(segment, file_id, tree)
            }
            "type_annotation" | "function_declaration_left" => {
                let name = node.child_of_kind("lower_case_identifier")?;
                self.resolve_lower(name, file_id, tree)
            }
            "value_declaration" => self.resolve_lower(function_name(node)?, file_id, tree),
            "type_declaration" | "type_alias_declaration" => {
                let name = node.child_of_kind("upper_case_identifier")?;
                self.resolve_upper(name, file_id, tree)
            }
            "module_declaration" => self.resolve(node.child_of_kind("upper_case_qid")?, file_id, tree),
            _ => None,
        }
    }
}

impl ReferenceResolver for NameResolver<'_> {
    fn find_all(&self, definition: &Definition) -> Vec<ReferenceSite> {
        let mut sites = Vec::new();

        if definition.kind == SymbolKind::Module {
            for (file_id, tree) in self.forest.iter() {
                for import in imports(tree) {
                    if let Some(qid) = import.child_of_kind("upper_case_qid") {
                        if qid.text() == definition.name {
                            sites.push(ReferenceSite {
                                file_id: file_id.clone(),
                                span: qid.span(),
                            });
                        }
                    }
                }
            }
            return sites;
        }

        let kinds = Self::candidate_kinds(definition.kind);
        for (file_id, tree) in self.forest.iter() {
            if definition.kind == SymbolKind::Local && *file_id != definition.file_id {
                continue;
            }
            for node in tree.nodes() {
                if !kinds.contains(&node.kind()) || node.text() != definition.name {
                    continue;
                }
                let is_declaration = *file_id == definition.file_id && node.span() == definition.span;
                let is_annotation = node.parent().is_some_and(|p| p.kind() == "type_annotation");
                if is_declaration || is_annotation {
                    continue;
                }
                if self.resolve(node, file_id, tree).as_ref() == Some(definition) {
                    sites.push(ReferenceSite {
                        file_id: file_id.clone(),
                        span: node.span(),
                    });
                }
            }
        }
        sites
    }
}

fn definition(file_id: &FileId, node: SyntaxNode<'_>, kind: SymbolKind) -> Definition {
    Definition {
        file_id: file_id.clone(),
        name: node.text().to_string(),
        kind,
        span: node.span(),
    }
}

fn is_top_level(node: SyntaxNode<'_>) -> bool {
    node.parent().is_some_and(|parent| parent.parent().is_none())
}

fn imports<'t>(tree: &'t SyntaxTree) -> impl Iterator<Item = SyntaxNode<'t>> + 't {
    tree.root_node()
        .named_children()
        .filter(|node| node.kind() == "import_clause")
}

/// Name node of a `value_declaration`
pub(crate) fn function_name(declaration: SyntaxNode<'_>) -> Option<SyntaxNode<'_>> {
    if declaration.kind() != "value_declaration" {
        return None;
    }
    declaration
        .child_of_kind("function_declaration_left")?
        .child_of_kind("lower_case_identifier")
}

/// `Foo.Bar` for the `baz` in `Foo.Bar.baz`
fn qualifier_of(node: SyntaxNode<'_>) -> String {
    let Some(parent) = node.parent() else {
        return String::new();
    };
    parent
        .named_children()
        .take_while(|segment| *segment != node)
        .filter(|segment| segment.kind() == "upper_case_identifier")
        .map(|segment| segment.text())
        .collect::<Vec<_>>()
        .join(".")
}

/// Declaration named `name` among the root's children
fn top_level(file_id: &FileId, tree: &SyntaxTree, name: &str, kind: SymbolKind) -> Option<Definition> {
    tree.root_node().named_children().find_map(|node| {
        let name_node = match (kind, node.kind()) {
            (SymbolKind::Function, "value_declaration") => function_name(node)?,
            (SymbolKind::Type, "type_declaration" | "type_alias_declaration") => {
                node.child_of_kind("upper_case_identifier")?
            }
            _ => return None,
        };
        (name_node.text() == name).then(|| definition(file_id, name_node, kind))
    })
}

/// Innermost binding of `name` visible from `node`
fn lookup_local(node: SyntaxNode<'_>, name: &str, file_id: &FileId) -> Option<Definition> {
    node.ancestors().find_map(|scope| {
        let binder = match scope.kind() {
            "value_declaration" => scope
                .child_of_kind("function_declaration_left")
                .and_then(|left| bound_pattern(left, name)),
            "let_in_expr" => scope
                .named_children()
                .filter_map(function_name)
                .find(|candidate| candidate.text() == name),
            "case_of_branch" => scope
                .named_children()
                .next()
                .and_then(|pattern| bound_pattern(pattern, name)),
            "anonymous_function_expr" => {
                let body = scope.last_named_child();
                scope
                    .named_children()
                    .filter(|child| Some(*child) != body)
                    .find_map(|pattern| bound_pattern(pattern, name))
            }
            _ => None,
        }?;
        Some(definition(file_id, binder, SymbolKind::Local))
    })
}

/// A `lower_case_identifier` inside a `lower_pattern` under `pattern` that binds `name`
fn bound_pattern<'t>(pattern: SyntaxNode<'t>, name: &str) -> Option<SyntaxNode<'t>> {
    pattern.descendants().find(|node| {
        node.kind() == "lower_case_identifier"
            && node.text() == name
            && node.parent().is_some_and(|p| p.kind() == "lower_pattern")
    })
}
