//! Elm-shaped syntax tree fixtures shared by the unit tests
//!
//! Each helper mirrors the node layout tree-sitter-elm produces for the
//! construct, emitting leaves in source order so `TreeBuilder` can locate
//! them by text.

use elm_lens_syntax::{SyntaxTree, TreeBuilder};

use crate::parser::DocumentParser;
use crate::workspace::{FileId, Forest};

pub(crate) const CALC_URI: &str = "file:///workspace/src/Calc.elm";
pub(crate) const UTILS_URI: &str = "file:///workspace/src/Utils.elm";
pub(crate) const MAIN_URI: &str = "file:///workspace/src/Main.elm";

pub(crate) fn qid(b: &mut TreeBuilder, name: &str) {
    b.open("upper_case_qid");
    for (i, segment) in name.split('.').enumerate() {
        if i > 0 {
            b.leaf("dot", ".");
        }
        b.leaf("upper_case_identifier", segment);
    }
    b.close();
}

pub(crate) fn exposing_list(b: &mut TreeBuilder, entries: &[&str]) {
    b.open("exposing_list").token("exposing").token("(");
    for entry in entries {
        if *entry == ".." {
            b.leaf("double_dot", "..");
        } else if entry.starts_with(|c: char| c.is_ascii_uppercase()) {
            let name = entry.trim_end_matches("(..)");
            b.open("exposed_type").leaf("upper_case_identifier", name);
            if name.len() != entry.len() {
                b.leaf("exposed_union_constructors", "(..)");
            }
            b.close();
        } else {
            b.leaf("exposed_value", entry);
        }
    }
    b.token(")").close();
}

pub(crate) fn module_declaration(b: &mut TreeBuilder, name: &str, exposing: &[&str]) {
    b.open("module_declaration").token("module");
    qid(b, name);
    exposing_list(b, exposing);
    b.close();
}

pub(crate) fn import(b: &mut TreeBuilder, name: &str, alias: Option<&str>, exposing: Option<&[&str]>) {
    b.open("import_clause").token("import");
    qid(b, name);
    if let Some(alias) = alias {
        b.open("as_clause")
            .token("as")
            .leaf("upper_case_identifier", alias)
            .close();
    }
    if let Some(entries) = exposing {
        exposing_list(b, entries);
    }
    b.close();
}

/// `name : A -> B`, each type possibly qualified
pub(crate) fn type_annotation(b: &mut TreeBuilder, name: &str, types: &[&str]) {
    b.open("type_annotation")
        .leaf("lower_case_identifier", name)
        .token(":")
        .open("type_expression");
    for (i, ty) in types.iter().enumerate() {
        if i > 0 {
            b.token("->");
        }
        b.open("type_ref");
        qid(b, ty);
        b.close();
    }
    b.close().close();
}

/// `name p1 p2 = <body>`
pub(crate) fn value_declaration(
    b: &mut TreeBuilder,
    name: &str,
    params: &[&str],
    body: impl FnOnce(&mut TreeBuilder),
) {
    b.open("value_declaration")
        .open("function_declaration_left")
        .leaf("lower_case_identifier", name);
    for param in params {
        b.open("lower_pattern")
            .leaf("lower_case_identifier", param)
            .close();
    }
    b.close().token("=");
    body(b);
    b.close();
}

/// `type Name = A | B`
pub(crate) fn type_declaration(b: &mut TreeBuilder, name: &str, variants: &[&str]) {
    b.open("type_declaration")
        .token("type")
        .leaf("upper_case_identifier", name)
        .token("=");
    for (i, variant) in variants.iter().enumerate() {
        if i > 0 {
            b.token("|");
        }
        b.open("union_variant")
            .leaf("upper_case_identifier", variant)
            .close();
    }
    b.close();
}

/// `type alias Name = { field : Type }`
pub(crate) fn type_alias(b: &mut TreeBuilder, name: &str, field: &str, field_type: &str) {
    b.open("type_alias_declaration")
        .token("type")
        .token("alias")
        .leaf("upper_case_identifier", name)
        .token("=")
        .open("type_expression")
        .open("record_type")
        .token("{")
        .open("field_type")
        .leaf("lower_case_identifier", field)
        .token(":")
        .open("type_expression")
        .open("type_ref");
    qid(b, field_type);
    b.close().close().close().token("}").close().close().close();
}

/// A (possibly qualified) value reference such as `helper` or `U.helper`
pub(crate) fn value_ref(b: &mut TreeBuilder, name: &str) {
    b.open("value_expr").open("value_qid");
    let mut segments: Vec<&str> = name.split('.').collect();
    let value = segments.pop().unwrap_or_default();
    for segment in segments {
        b.leaf("upper_case_identifier", segment).leaf("dot", ".");
    }
    b.leaf("lower_case_identifier", value).close().close();
}

pub(crate) fn number(b: &mut TreeBuilder, literal: &str) {
    b.leaf("number_constant_expr", literal);
}

pub(crate) fn binary(b: &mut TreeBuilder, left: &str, operator: &str, right: &str) {
    b.open("bin_op_expr");
    value_ref(b, left);
    b.open("operator")
        .leaf("operator_identifier", operator)
        .close();
    value_ref(b, right);
    b.close();
}

fn add_declaration(b: &mut TreeBuilder) {
    type_annotation(b, "add", &["Int", "Int", "Int"]);
    value_declaration(b, "add", &["a", "b"], |b| binary(b, "a", "+", "b"));
}

/// One annotated function and nothing else
pub(crate) const ADD_ONLY_SOURCE: &str = "\
add : Int -> Int -> Int
add a b =
    a + b
";

pub(crate) fn add_only_tree() -> SyntaxTree {
    let mut b = TreeBuilder::new(ADD_ONLY_SOURCE);
    b.open("file");
    add_declaration(&mut b);
    b.close();
    b.finish().unwrap()
}

/// `add` plus a `main` calling it twice, optionally under a module header
pub(crate) fn calc_source(with_module: bool) -> String {
    let header = if with_module {
        "module Calc exposing (main)\n\n\n"
    } else {
        ""
    };
    format!(
        "{header}add : Int -> Int -> Int
add a b =
    a + b


main =
    add 1 (add 2 3)
"
    )
}

pub(crate) fn calc_tree(with_module: bool) -> SyntaxTree {
    let source = calc_source(with_module);
    let mut b = TreeBuilder::new(source);
    b.open("file");
    if with_module {
        module_declaration(&mut b, "Calc", &["main"]);
    }
    add_declaration(&mut b);
    value_declaration(&mut b, "main", &[], |b| {
        b.open("function_call_expr");
        value_ref(b, "add");
        number(b, "1");
        b.open("parenthesized_expr").token("(").open("function_call_expr");
        value_ref(b, "add");
        number(b, "2");
        number(b, "3");
        b.close().token(")").close();
        b.close();
    });
    b.close();
    b.finish().unwrap()
}

pub(crate) const UTILS_SOURCE: &str = "\
module Utils exposing (Config, helper)


type alias Config =
    { name : String }


type Msg
    = Noop
    | Refresh


helper : Int -> Int
helper n =
    n


unused =
    1
";

pub(crate) fn utils_tree() -> SyntaxTree {
    let mut b = TreeBuilder::new(UTILS_SOURCE);
    b.open("file");
    module_declaration(&mut b, "Utils", &["Config", "helper"]);
    type_alias(&mut b, "Config", "name", "String");
    type_declaration(&mut b, "Msg", &["Noop", "Refresh"]);
    type_annotation(&mut b, "helper", &["Int", "Int"]);
    value_declaration(&mut b, "helper", &["n"], |b| value_ref(b, "n"));
    value_declaration(&mut b, "unused", &[], |b| number(b, "1"));
    b.close();
    b.finish().unwrap()
}

pub(crate) const MAIN_SOURCE: &str = "\
module Main exposing (main)

import Utils as U exposing (Config, helper)


view : U.Config -> Int
view config =
    helper (U.helper 1)


main =
    view
";

pub(crate) fn main_tree() -> SyntaxTree {
    let mut b = TreeBuilder::new(MAIN_SOURCE);
    b.open("file");
    module_declaration(&mut b, "Main", &["main"]);
    import(&mut b, "Utils", Some("U"), Some(&["Config", "helper"]));
    type_annotation(&mut b, "view", &["U.Config", "Int"]);
    value_declaration(&mut b, "view", &["config"], |b| {
        b.open("function_call_expr");
        value_ref(b, "helper");
        b.open("parenthesized_expr").token("(").open("function_call_expr");
        value_ref(b, "U.helper");
        number(b, "1");
        b.close().token(")").close();
        b.close();
    });
    value_declaration(&mut b, "main", &[], |b| value_ref(b, "view"));
    b.close();
    b.finish().unwrap()
}

/// Forest holding `Utils` and `Main`
pub(crate) fn two_module_forest() -> Forest {
    let mut forest = Forest::new();
    forest.insert(FileId::from(UTILS_URI), utils_tree());
    forest.insert(FileId::from(MAIN_URI), main_tree());
    forest
}

/// Parser that recognizes the fixture sources above and nothing else
pub(crate) struct FixtureParser;

impl DocumentParser for FixtureParser {
    fn parse(&self, source: &str) -> Option<SyntaxTree> {
        if source == calc_source(true) {
            Some(calc_tree(true))
        } else if source == calc_source(false) {
            Some(calc_tree(false))
        } else {
            match source {
                ADD_ONLY_SOURCE => Some(add_only_tree()),
                UTILS_SOURCE => Some(utils_tree()),
                MAIN_SOURCE => Some(main_tree()),
                _ => None,
            }
        }
    }
}
