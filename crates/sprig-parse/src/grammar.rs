//! Grammar functions, one per construct. Each starts at the construct's
//! first token and leaves the parser after its last one; none of them ever
//! fails, they report errors and keep going.

use sprig_syntax::SyntaxKind::{self, *};
use sprig_syntax::{SyntaxSet, T};

use crate::parser::{CompletedMarker, Marker, Parser};

mod exprs;
mod generics;
mod items;
mod params;
mod paths;
mod patterns;
mod types;

pub(crate) fn source_file(p: &mut Parser<'_>) {
    let m = p.start();
    items::mod_contents(p, false);
    m.complete(p, SOURCE_FILE);
}

/// Brace-delimited constructs that can be reparsed in isolation.
pub(crate) mod fragments {
    use super::{exprs, items};
    use crate::parser::Parser;

    pub(crate) fn stmt_list(p: &mut Parser<'_>) {
        exprs::stmt_list(p);
    }

    pub(crate) fn record_field_list(p: &mut Parser<'_>) {
        items::record_field_list(p);
    }

    pub(crate) fn item_list(p: &mut Parser<'_>) {
        items::item_list(p);
    }

    pub(crate) fn assoc_item_list(p: &mut Parser<'_>) {
        items::assoc_item_list(p);
    }

    pub(crate) fn variant_list(p: &mut Parser<'_>) {
        items::variant_list(p);
    }

    pub(crate) fn match_arm_list(p: &mut Parser<'_>) {
        exprs::match_arm_list(p);
    }

    pub(crate) fn use_tree_list(p: &mut Parser<'_>) {
        items::use_tree_list(p);
    }
}

const NAME_REF_FIRST: SyntaxSet =
    SyntaxSet::new([IDENT, INT_NUMBER, T![self], T![super], T![crate], T![Self]]);

fn name_r(p: &mut Parser<'_>, recovery: SyntaxSet) {
    if p.at(IDENT) || p.at(T![self]) {
        let m = p.start();
        p.bump_any();
        m.complete(p, NAME);
    } else {
        p.err_recover("expected a name", recovery);
    }
}

fn name(p: &mut Parser<'_>) {
    name_r(p, SyntaxSet::EMPTY);
}

fn name_ref(p: &mut Parser<'_>) {
    if p.at_ts(NAME_REF_FIRST) {
        let m = p.start();
        p.bump_any();
        m.complete(p, NAME_REF);
    } else {
        p.err_and_bump("expected an identifier");
    }
}

fn lifetime(p: &mut Parser<'_>) {
    let m = p.start();
    p.bump(LIFETIME_IDENT);
    m.complete(p, LIFETIME);
}

fn opt_visibility(p: &mut Parser<'_>) -> bool {
    if !p.at(T![pub]) {
        return false;
    }

    let m = p.start();
    p.bump(T![pub]);
    // `pub(crate)`, `pub(super)`, `pub(self)`; `pub (T)` in a tuple struct
    // is a public field of parenthesized type.
    if p.at(T!['(']) && matches!(p.nth(1), T![crate] | T![super] | T![self]) && p.nth(2) == T![')']
    {
        p.bump(T!['(']);
        paths::use_path(p);
        p.bump(T![')']);
    }
    m.complete(p, VISIBILITY);
    true
}

/// Parses `bra (element delim)* element? ket`. Stray delimiters and tokens
/// that cannot start an element are wrapped in `ERROR` nodes; a brace or a
/// token from `recovery` ends the list.
#[allow(clippy::too_many_arguments)]
fn delimited(
    p: &mut Parser<'_>,
    bra: SyntaxKind,
    ket: SyntaxKind,
    delim: SyntaxKind,
    unexpected_message: &str,
    first_set: SyntaxSet,
    recovery: SyntaxSet,
    mut parser: impl FnMut(&mut Parser<'_>) -> bool,
) {
    p.bump(bra);

    while !p.at(ket) && !p.at(EOF) {
        if p.at(delim) {
            let m = p.start();
            p.error(unexpected_message);
            p.bump(delim);
            m.complete(p, ERROR);
            continue;
        }

        let before = p.pos();
        if !parser(p) || p.pos() == before {
            if p.at_ts(recovery) || matches!(p.current(), T!['{'] | T!['}'] | EOF) {
                break;
            }
            p.err_and_bump(unexpected_message);
            continue;
        }

        if !p.eat(delim) {
            if p.at_ts(first_set) {
                p.expect(delim);
            } else {
                break;
            }
        }
    }

    p.expect(ket);
}

/// Consumes a block or reports it missing; everything that needs a body
/// goes through here.
fn block_expr(p: &mut Parser<'_>) -> Option<CompletedMarker> {
    if !p.at(T!['{']) {
        p.error("expected a block");
        return None;
    }

    let m = p.start();
    exprs::stmt_list(p);
    Some(m.complete(p, BLOCK_EXPR))
}
