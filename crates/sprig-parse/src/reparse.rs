//! Incremental reparsing. An edit confined to a single token relexes just
//! that token; an edit confined to a brace-delimited list reparses just that
//! list. Everything else is the caller's business.

use sprig_syntax::SyntaxKind::{self, *};
use sprig_syntax::{
    GreenNode, Indel, NodeCache, NodeOrToken, SyntaxError, SyntaxNode, SyntaxToken, T, TextRange,
    TextSize,
};

use crate::Reparser;
use crate::parser::NESTING_LIMIT;

pub(crate) fn incremental_reparse(
    root: &SyntaxNode,
    edit: &Indel,
    errors: &[SyntaxError],
) -> Option<(GreenNode, Vec<SyntaxError>)> {
    if let Some((green, new_errors, range)) = reparse_token(root, edit, errors) {
        tracing::debug!(?range, "relexed a single token");
        return Some((green, merge_errors(errors, new_errors, range, edit)));
    }

    if let Some((green, new_errors, range)) = reparse_block(root, edit) {
        tracing::debug!(?range, "reparsed a block");
        return Some((green, merge_errors(errors, new_errors, range, edit)));
    }

    None
}

fn reparse_token(
    root: &SyntaxNode,
    edit: &Indel,
    errors: &[SyntaxError],
) -> Option<(GreenNode, Vec<SyntaxError>, TextRange)> {
    let prev_token = root.covering_element(edit.delete).into_token()?;
    let prev_kind = prev_token.kind();
    if !is_relexable(&prev_token, edit) {
        return None;
    }

    // A lexer error of the old token would go stale.
    let range = prev_token.text_range();
    if errors.iter().any(|error| error.range().start() == range.start()) {
        return None;
    }

    let new_text = edited_text(prev_token.text(), range.start(), edit);
    if single_token(&new_text) != Some(prev_kind) {
        return None;
    }
    if prev_kind == COMMENT && !is_plain_line_comment(&new_text) {
        return None;
    }

    // The token must not glue onto its neighbour: deleting `ruh` from
    // `bruh"str"` leaves a byte string.
    if let Some(next) = prev_token.next_token() {
        let glued = format!("{new_text}{}", next.text());
        let first = sprig_tokenizer::tokenize(&glued)[0];
        if first.kind != prev_kind || first.text.len() != new_text.len() {
            return None;
        }
    }

    let new_token = NodeCache::global().token(prev_kind, &new_text);
    tracing::trace!(kind = ?prev_kind, text = new_text, "replacing token");
    Some((prev_token.replace_with(new_token), Vec::new(), range))
}

fn is_relexable(token: &SyntaxToken, edit: &Indel) -> bool {
    match token.kind() {
        IDENT | LIFETIME_IDENT | INT_NUMBER | FLOAT_NUMBER | STRING | BYTE_STRING | CHAR | BYTE => {
            true
        }
        // Blank lines decide which comments belong to the next item.
        WHITESPACE => !token.text().contains('\n') && !edit.insert.contains('\n'),
        COMMENT => is_plain_line_comment(token.text()) && !edit.insert.contains('\n'),
        _ => false,
    }
}

/// `//` and `///` comments; inner doc comments end comment attachment.
fn is_plain_line_comment(text: &str) -> bool {
    text.starts_with("//") && !text.starts_with("//!")
}

fn single_token(text: &str) -> Option<SyntaxKind> {
    match sprig_tokenizer::tokenize(text).as_slice() {
        [token, eof] if eof.kind == EOF && token.error.is_none() => Some(token.kind),
        _ => None,
    }
}

fn reparse_block(
    root: &SyntaxNode,
    edit: &Indel,
) -> Option<(GreenNode, Vec<SyntaxError>, TextRange)> {
    let covering = match root.covering_element(edit.delete) {
        NodeOrToken::Node(node) => node,
        NodeOrToken::Token(token) => token.parent(),
    };

    for node in covering.ancestors() {
        let Some(reparser) = Reparser::for_node(node.kind()) else {
            continue;
        };
        let range = node.text_range();
        if !range.contains_range(edit.delete) {
            continue;
        }
        // An unterminated list runs to the end of the file, and its
        // diagnostics sit at the end too, where the merge cannot tell them
        // apart from the ones reported after the list.
        if node.last_child_or_token().map(|last| last.kind()) != Some(T!['}']) {
            tracing::trace!(kind = ?node.kind(), "old block is unterminated");
            continue;
        }

        let text = edited_text(&node.text(), range.start(), edit);
        let Some((green, errors)) = reparser.parse(&text) else {
            tracing::trace!(kind = ?node.kind(), "edited text is not a single block");
            continue;
        };
        // The fragment starts at nesting level zero. Close to the limit a
        // full parse could cut it off elsewhere.
        if node.ancestors().count() + depth(&green) >= NESTING_LIMIT as usize {
            tracing::trace!(kind = ?node.kind(), "block is nested too deep");
            continue;
        }

        let errors = errors
            .into_iter()
            .map(|error| {
                let range = error.range() + range.start();
                error.with_range(range)
            })
            .collect();
        return Some((node.replace_with(green), errors, range));
    }

    None
}

fn depth(node: &GreenNode) -> usize {
    1 + node.children().iter().filter_map(|child| child.as_node()).map(depth).max().unwrap_or(0)
}

fn edited_text(old: &str, start: TextSize, edit: &Indel) -> String {
    let mut text = old.to_owned();
    let edit = Indel::replace(edit.delete - start, edit.insert.clone());
    edit.apply(&mut text);
    text
}

/// Keeps the old diagnostics outside of the reparsed `range`, shifted past
/// the edit, and adds `new_errors` in between.
///
/// A node's first token is always consumed by the node itself, so a
/// diagnostic anchored there was reported by an enclosing node.
fn merge_errors(
    old_errors: &[SyntaxError],
    new_errors: Vec<SyntaxError>,
    range: TextRange,
    edit: &Indel,
) -> Vec<SyntaxError> {
    let mut errors = Vec::with_capacity(old_errors.len() + new_errors.len());

    errors.extend(
        old_errors.iter().filter(|error| error.range().start() <= range.start()).cloned(),
    );
    errors.extend(new_errors);
    errors.extend(old_errors.iter().filter(|error| error.range().start() >= range.end()).map(
        |error| {
            let shifted = TextRange::new(
                edit.shift_after(error.range().start()),
                edit.shift_after(error.range().end()),
            );
            error.clone().with_range(shifted)
        },
    ));

    errors
}
