use std::fmt::Write as _;

use crate::lower::{AstSrc, Cardinality, Field};

const HEADER: &str = "\
//! Generated by `sprig grammar --codegen`, do not edit by hand.

use crate::ast::{AstChildren, AstNode, support};
use crate::{SyntaxKind, SyntaxNode, SyntaxToken};
";

/// Renders typed node definitions as invocations of the `ast_node!` and
/// `ast_enum!` macros of `sprig-syntax`.
pub fn generate_nodes(src: &AstSrc) -> String {
    let mut buf = String::from(HEADER);

    buf.push_str("\nast_node! {\n");
    for node in &src.nodes {
        if node.fields.is_empty() {
            writeln!(buf, "    {} => {} {{}}", node.name, node.kind).unwrap();
            continue;
        }

        writeln!(buf, "    {} => {} {{", node.name, node.kind).unwrap();
        for field in &node.fields {
            let (name, card, ty) = match field {
                Field::Token { name, kind } => (name, "token", kind),
                Field::Node { name, ty, cardinality: Cardinality::Optional } => (name, "child", ty),
                Field::Node { name, ty, cardinality: Cardinality::Many } => (name, "children", ty),
            };
            writeln!(buf, "        {name}: {card} {ty},").unwrap();
        }
        buf.push_str("    }\n");
    }
    buf.push_str("}\n");

    if !src.enums.is_empty() {
        buf.push_str("\nast_enum! {\n");
        for enum_ in &src.enums {
            writeln!(buf, "    {} {{", enum_.name).unwrap();
            for variant in &enum_.variants {
                writeln!(buf, "        {variant},").unwrap();
            }
            buf.push_str("    }\n");
        }
        buf.push_str("}\n");
    }

    buf
}
