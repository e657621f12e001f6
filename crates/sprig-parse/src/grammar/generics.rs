use super::*;

const GENERIC_PARAM_FIRST: SyntaxSet = SyntaxSet::new([IDENT, LIFETIME_IDENT, T![const]]);
const GENERIC_ARG_FIRST: SyntaxSet = types::TYPE_FIRST.with(LIFETIME_IDENT);
const LIST_RECOVERY: SyntaxSet = SyntaxSet::new([T![;], T![=], T!['(']]);

pub(super) fn opt_generic_param_list(p: &mut Parser<'_>) {
    if !p.at(T![<]) {
        return;
    }

    let m = p.start();
    delimited(
        p,
        T![<],
        T![>],
        T![,],
        "expected a generic parameter",
        GENERIC_PARAM_FIRST,
        LIST_RECOVERY,
        generic_param,
    );
    m.complete(p, GENERIC_PARAM_LIST);
}

fn generic_param(p: &mut Parser<'_>) -> bool {
    let m = p.start();
    match p.current() {
        LIFETIME_IDENT => {
            lifetime(p);
            if p.eat(T![:]) {
                lifetime_bounds(p);
            }
            m.complete(p, LIFETIME_PARAM);
        }
        IDENT => {
            name(p);
            if p.eat(T![:]) {
                opt_type_bound_list(p);
            }
            if p.eat(T![=]) {
                types::type_(p);
            }
            m.complete(p, TYPE_PARAM);
        }
        T![const] => {
            p.bump(T![const]);
            name(p);
            if p.expect(T![:]) {
                types::type_(p);
            }
            m.complete(p, CONST_PARAM);
        }
        _ => {
            m.abandon(p);
            return false;
        }
    }
    true
}

/// `'a + 'b`, the bounds of a lifetime parameter.
fn lifetime_bounds(p: &mut Parser<'_>) {
    let list = p.start();
    while p.at(LIFETIME_IDENT) {
        let bound = p.start();
        lifetime(p);
        bound.complete(p, TYPE_BOUND);
        if !p.eat(T![+]) {
            break;
        }
    }
    list.complete(p, TYPE_BOUND_LIST);
}

pub(super) fn generic_arg_list(p: &mut Parser<'_>, turbofish: bool) {
    let m = p.start();
    if turbofish {
        p.bump(T![::]);
    }
    delimited(
        p,
        T![<],
        T![>],
        T![,],
        "expected a generic argument",
        GENERIC_ARG_FIRST,
        LIST_RECOVERY,
        generic_arg,
    );
    m.complete(p, GENERIC_ARG_LIST);
}

fn generic_arg(p: &mut Parser<'_>) -> bool {
    if p.at(LIFETIME_IDENT) {
        let m = p.start();
        lifetime(p);
        m.complete(p, LIFETIME_ARG);
    } else if p.at_ts(types::TYPE_FIRST) {
        let m = p.start();
        types::type_(p);
        m.complete(p, TYPE_ARG);
    } else {
        return false;
    }
    true
}

pub(super) fn opt_where_clause(p: &mut Parser<'_>) {
    if !p.at(T![where]) {
        return;
    }

    let m = p.start();
    p.bump(T![where]);
    while p.at(LIFETIME_IDENT) || p.at_ts(types::TYPE_FIRST) {
        where_predicate(p);
        if !p.eat(T![,]) {
            break;
        }
    }
    m.complete(p, WHERE_CLAUSE);
}

fn where_predicate(p: &mut Parser<'_>) {
    let m = p.start();
    if p.at(LIFETIME_IDENT) {
        lifetime(p);
        if p.expect(T![:]) {
            lifetime_bounds(p);
        }
    } else {
        types::type_(p);
        if p.expect(T![:]) {
            opt_type_bound_list(p);
        }
    }
    m.complete(p, WHERE_PRED);
}

/// `Clone + 'a + ?Sized`. Nothing is produced when no bound follows.
pub(super) fn opt_type_bound_list(p: &mut Parser<'_>) {
    if !at_type_bound(p) {
        return;
    }
    type_bound_list(p);
}

pub(super) fn type_bound_list(p: &mut Parser<'_>) {
    let m = p.start();
    while at_type_bound(p) {
        type_bound(p);
        if !p.eat(T![+]) {
            break;
        }
    }
    m.complete(p, TYPE_BOUND_LIST);
}

pub(super) fn at_type_bound(p: &Parser<'_>) -> bool {
    p.at(LIFETIME_IDENT) || p.at(T![?]) || paths::is_start(p) || p.at(T!['('])
}

fn type_bound(p: &mut Parser<'_>) {
    let m = p.start();
    if p.at(LIFETIME_IDENT) {
        lifetime(p);
    } else {
        p.eat(T![?]);
        types::type_no_bounds(p);
    }
    m.complete(p, TYPE_BOUND);
}
