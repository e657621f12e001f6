//! Reader for the grammar notation that describes the shape of sprig's
//! syntax trees.
//!
//! A grammar is a list of definitions `Name = rule`, where a rule is built
//! from rule references, quoted terminals, sequences, `|` alternations,
//! `*` repetition, `?` options, parentheses and `label:` annotations.

mod codegen;
mod lexer;
mod lower;
mod model;
mod parser;
mod validate;

use std::str::FromStr;

pub use codegen::generate_nodes;
pub use lower::{
    AstEnumSrc, AstNodeSrc, AstSrc, Cardinality, Field, lower, to_lower_snake_case,
    to_upper_snake_case, token_kind_name,
};
pub use model::{Grammar, MissingKind, Node, NodeData, Rule, Token};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GrammarError {
    #[error("unexpected character `{ch}` at offset {offset}")]
    UnexpectedChar { ch: char, offset: usize },
    #[error("unterminated token literal starting at offset {offset}")]
    UnterminatedLiteral { offset: usize },
    #[error("expected {expected} at offset {offset}")]
    UnexpectedToken { expected: &'static str, offset: usize },
    #[error("rule `{rule}` at offset {offset} has no body")]
    MissingBody { rule: String, offset: usize },
    #[error("rule `{name}` at offset {offset} is already defined at offset {first}")]
    DuplicateRule { name: String, first: usize, offset: usize },
    #[error("undefined rule `{name}` referenced from `{referenced_from}` at offset {offset}")]
    UndefinedRule { name: String, referenced_from: String, offset: usize },
}

impl FromStr for Grammar {
    type Err = GrammarError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let grammar = parser::parse(text)?;
        tracing::debug!(
            rules = grammar.iter().count(),
            tokens = grammar.tokens().count(),
            "parsed grammar"
        );
        Ok(grammar)
    }
}
