//! Resilient parser producing lossless syntax trees.
//!
//! Parsing never fails: malformed input ends up in `ERROR` nodes and the
//! diagnostics of the returned [`Parse`]. [`reparse`] applies an edit to a
//! previous parse, reusing as much of the old tree as it can.

mod event;
mod grammar;
mod input;
mod parser;
mod reparse;

#[cfg(test)]
mod tests;

use sprig_syntax::ast::SourceFile;
use sprig_syntax::{GreenNode, Indel, Parse, SyntaxError, SyntaxKind, T};
use sprig_tokenizer::Token;

use crate::input::Input;
use crate::parser::Parser;

/// Parses a whole source file.
pub fn parse(text: &str) -> Parse<SourceFile> {
    tracing::trace!(len = text.len(), "parsing source file");

    let tokens = sprig_tokenizer::tokenize(text);
    let (green, errors, _) = run(&tokens, grammar::source_file);
    Parse::new(green, errors)
}

/// Applies `edit` to the text of `old` and parses the result, reusing the
/// unaffected parts of the old tree.
///
/// # Panics
///
/// Panics if the edit's range lies outside of the parsed text.
pub fn reparse(old: &Parse<SourceFile>, edit: &Indel) -> Parse<SourceFile> {
    let root = old.syntax_node();
    assert!(
        root.text_range().contains_range(edit.delete),
        "edit {:?} is out of bounds of a text of length {:?}",
        edit.delete,
        root.text_range().len(),
    );

    if let Some((green, errors)) = reparse::incremental_reparse(&root, edit, old.errors()) {
        return Parse::new(green, errors);
    }

    tracing::debug!("falling back to a full reparse");
    let mut text = root.text();
    edit.apply(&mut text);
    parse(&text)
}

/// Brace-delimited constructs that can be parsed on their own, which is what
/// block reparsing relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reparser {
    StmtList,
    RecordFieldList,
    ItemList,
    AssocItemList,
    VariantList,
    MatchArmList,
    UseTreeList,
}

impl Reparser {
    pub fn for_node(kind: SyntaxKind) -> Option<Self> {
        let reparser = match kind {
            SyntaxKind::STMT_LIST => Self::StmtList,
            SyntaxKind::RECORD_FIELD_LIST => Self::RecordFieldList,
            SyntaxKind::ITEM_LIST => Self::ItemList,
            SyntaxKind::ASSOC_ITEM_LIST => Self::AssocItemList,
            SyntaxKind::VARIANT_LIST => Self::VariantList,
            SyntaxKind::MATCH_ARM_LIST => Self::MatchArmList,
            SyntaxKind::USE_TREE_LIST => Self::UseTreeList,
            _ => return None,
        };
        Some(reparser)
    }

    pub fn kind(self) -> SyntaxKind {
        match self {
            Self::StmtList => SyntaxKind::STMT_LIST,
            Self::RecordFieldList => SyntaxKind::RECORD_FIELD_LIST,
            Self::ItemList => SyntaxKind::ITEM_LIST,
            Self::AssocItemList => SyntaxKind::ASSOC_ITEM_LIST,
            Self::VariantList => SyntaxKind::VARIANT_LIST,
            Self::MatchArmList => SyntaxKind::MATCH_ARM_LIST,
            Self::UseTreeList => SyntaxKind::USE_TREE_LIST,
        }
    }

    /// Parses `text` as exactly one node of this kind. Returns `None` unless
    /// the braces of `text` are balanced and the node spans all of it.
    /// Error ranges are relative to the start of `text`.
    pub fn parse(self, text: &str) -> Option<(GreenNode, Vec<SyntaxError>)> {
        let tokens = sprig_tokenizer::tokenize(text);
        if !is_balanced(&tokens) {
            return None;
        }

        let entry: fn(&mut Parser<'_>) = match self {
            Self::StmtList => grammar::fragments::stmt_list,
            Self::RecordFieldList => grammar::fragments::record_field_list,
            Self::ItemList => grammar::fragments::item_list,
            Self::AssocItemList => grammar::fragments::assoc_item_list,
            Self::VariantList => grammar::fragments::variant_list,
            Self::MatchArmList => grammar::fragments::match_arm_list,
            Self::UseTreeList => grammar::fragments::use_tree_list,
        };

        let (green, errors, consumed_all) = run(&tokens, entry);
        (consumed_all && green.kind() == self.kind()).then_some((green, errors))
    }
}

fn run(tokens: &[Token<'_>], entry: fn(&mut Parser<'_>)) -> (GreenNode, Vec<SyntaxError>, bool) {
    let input = Input::new(tokens);
    let mut p = Parser::new(&input);
    entry(&mut p);
    let consumed_all = p.at(SyntaxKind::EOF);
    let (green, errors) = event::build_tree(tokens, p.finish());
    (green, errors, consumed_all)
}

/// `{`, then anything with balanced braces, then the matching `}`, with no
/// trivia on either side.
fn is_balanced(tokens: &[Token<'_>]) -> bool {
    let [first, .., last, eof] = tokens else {
        return false;
    };
    if first.kind != T!['{'] || last.kind != T!['}'] || eof.kind != SyntaxKind::EOF {
        return false;
    }

    let mut depth = 0u32;
    for token in &tokens[..tokens.len() - 1] {
        match token.kind {
            T!['{'] => depth += 1,
            T!['}'] => {
                depth -= 1;
                if depth == 0 && !std::ptr::eq(token, last) {
                    return false;
                }
            }
            _ => {}
        }
    }
    depth == 0
}
