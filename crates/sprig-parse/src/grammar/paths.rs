use super::*;

const SEGMENT_FIRST: SyntaxSet = SyntaxSet::new([IDENT, T![self], T![super], T![crate], T![Self]]);

/// Includes `:` for paths starting with `::`.
pub(super) const PATH_FIRST: SyntaxSet = SEGMENT_FIRST.with(T![:]);

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// `use` trees: no generic arguments, stops before `::*` and `::{`.
    Use,
    /// Types: `Vec<T>` and `Vec::<T>`.
    Type,
    /// Expressions and patterns: only the turbofish `Vec::<T>`.
    Expr,
}

pub(super) fn is_start(p: &Parser<'_>) -> bool {
    p.at_ts(SEGMENT_FIRST) || p.at(T![::])
}

pub(super) fn use_path(p: &mut Parser<'_>) -> CompletedMarker {
    path(p, Mode::Use)
}

pub(super) fn type_path(p: &mut Parser<'_>) -> CompletedMarker {
    path(p, Mode::Type)
}

pub(super) fn expr_path(p: &mut Parser<'_>) -> CompletedMarker {
    path(p, Mode::Expr)
}

fn path(p: &mut Parser<'_>, mode: Mode) -> CompletedMarker {
    let m = p.start();
    path_segment(p, mode, true);
    let mut qualifier = m.complete(p, PATH);

    loop {
        let ends_use_path = mode == Mode::Use && matches!(p.nth(2), T![*] | T!['{']);
        if !p.at(T![::]) || ends_use_path {
            return qualifier;
        }

        let m = qualifier.precede(p);
        p.bump(T![::]);
        path_segment(p, mode, false);
        qualifier = m.complete(p, PATH);
    }
}

fn path_segment(p: &mut Parser<'_>, mode: Mode, first: bool) {
    let m = p.start();
    if first {
        p.eat(T![::]);
    }

    if p.at_ts(SEGMENT_FIRST) {
        name_ref(p);
        match mode {
            Mode::Type if p.at(T![<]) => generics::generic_arg_list(p, false),
            Mode::Type | Mode::Expr if p.at(T![::]) && p.nth(2) == T![<] => {
                generics::generic_arg_list(p, true);
            }
            _ => {}
        }
    } else {
        p.err_recover("expected a path segment", items::ITEM_RECOVERY);
    }

    m.complete(p, PATH_SEGMENT);
}
