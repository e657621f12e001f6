use std::mem;

use super::*;

const PARAM_RECOVERY: SyntaxSet = SyntaxSet::new([T![;], T![-], T![where]]).union(items::ITEM_FIRST);

/// `(self, a: A, b: B)` of a function.
pub(super) fn param_list(p: &mut Parser<'_>) {
    let m = p.start();
    let mut first = true;
    delimited(
        p,
        T!['('],
        T![')'],
        T![,],
        "expected a parameter",
        patterns::PAT_FIRST,
        PARAM_RECOVERY,
        |p| {
            if mem::take(&mut first) && at_self_param(p) {
                self_param(p);
                return true;
            }
            param(p)
        },
    );
    m.complete(p, PARAM_LIST);
}

/// `|a, b: B|` or `||` of a closure.
pub(super) fn closure_param_list(p: &mut Parser<'_>) {
    let m = p.start();
    if p.at(T![||]) {
        p.bump(T![||]);
    } else {
        delimited(
            p,
            T![|],
            T![|],
            T![,],
            "expected a parameter",
            patterns::PAT_FIRST,
            PARAM_RECOVERY,
            closure_param,
        );
    }
    m.complete(p, PARAM_LIST);
}

fn at_self_param(p: &Parser<'_>) -> bool {
    let n = match (p.nth(0), p.nth(1)) {
        (T![&], LIFETIME_IDENT) => 2,
        (T![&], _) => 1,
        _ => 0,
    };
    let n = if p.nth(n) == T![mut] { n + 1 } else { n };
    p.nth(n) == T![self] && !p.nth_at(n + 1, T![::])
}

fn self_param(p: &mut Parser<'_>) {
    let m = p.start();
    if p.eat(T![&]) && p.at(LIFETIME_IDENT) {
        lifetime(p);
    }
    p.eat(T![mut]);
    name(p);
    if p.eat(T![:]) {
        types::type_(p);
    }
    m.complete(p, SELF_PARAM);
}

fn param(p: &mut Parser<'_>) -> bool {
    if !p.at_ts(patterns::PAT_FIRST) {
        return false;
    }

    let m = p.start();
    patterns::pattern_single(p);
    if p.expect(T![:]) {
        types::type_(p);
    }
    m.complete(p, PARAM);
    true
}

fn closure_param(p: &mut Parser<'_>) -> bool {
    if !p.at_ts(patterns::PAT_FIRST) {
        return false;
    }

    let m = p.start();
    patterns::pattern_single(p);
    if p.eat(T![:]) {
        types::type_(p);
    }
    m.complete(p, PARAM);
    true
}
