use super::*;

pub(super) const PAT_FIRST: SyntaxSet = exprs::LITERAL_FIRST.union(SyntaxSet::new([
    IDENT,
    T![self],
    T![super],
    T![crate],
    T![Self],
    T![:],
    T![-],
    T![_],
    T![&],
    T!['('],
    T![.],
    T![ref],
    T![mut],
]));

const PAT_RECOVERY: SyntaxSet =
    SyntaxSet::new([T![=], T![:], T![,], T![')'], T![|], T![if], T![in], T![;]]);

/// A pattern, possibly an or-pattern `A | B`. A leading `|` is allowed.
pub(super) fn pattern(p: &mut Parser<'_>) {
    let m = p.start();
    let leading_pipe = p.eat(T![|]);
    pattern_single(p);

    if p.at(T![|]) || leading_pipe {
        while p.eat(T![|]) {
            pattern_single(p);
        }
        m.complete(p, OR_PAT);
    } else {
        m.abandon(p);
    }
}

/// A pattern without a top-level `|`, as in closure parameters.
pub(super) fn pattern_single(p: &mut Parser<'_>) {
    p.nested(atom_pat);
}

fn atom_pat(p: &mut Parser<'_>) {
    match p.current() {
        T![_] => {
            let m = p.start();
            p.bump(T![_]);
            m.complete(p, WILDCARD_PAT);
        }
        T![&] => {
            let m = p.start();
            p.bump(T![&]);
            p.eat(T![mut]);
            pattern_single(p);
            m.complete(p, REF_PAT);
        }
        T!['('] => {
            let m = p.start();
            pat_list(p);
            m.complete(p, TUPLE_PAT);
        }
        T![.] if p.at(T![..]) => {
            let m = p.start();
            p.bump(T![..]);
            m.complete(p, REST_PAT);
        }
        T![ref] | T![mut] => ident_pat(p),
        IDENT | T![self] if !p.nth_at(1, T![::]) && p.nth(1) != T!['('] => ident_pat(p),
        _ if p.at(T![-]) || p.at_ts(exprs::LITERAL_FIRST) => {
            let m = p.start();
            p.eat(T![-]);
            if exprs::literal(p).is_none() {
                p.error("expected a literal");
            }
            m.complete(p, LITERAL_PAT);
        }
        _ if paths::is_start(p) => path_pat(p),
        _ => p.err_recover("expected a pattern", PAT_RECOVERY),
    }
}

fn ident_pat(p: &mut Parser<'_>) {
    let m = p.start();
    p.eat(T![ref]);
    p.eat(T![mut]);
    name_r(p, PAT_RECOVERY);
    if p.eat(T![@]) {
        pattern_single(p);
    }
    m.complete(p, IDENT_PAT);
}

fn path_pat(p: &mut Parser<'_>) {
    let path = paths::expr_path(p);
    let m = path.precede(p);
    if p.at(T!['(']) {
        pat_list(p);
        m.complete(p, TUPLE_STRUCT_PAT);
    } else {
        m.complete(p, PATH_PAT);
    }
}

fn pat_list(p: &mut Parser<'_>) {
    delimited(
        p,
        T!['('],
        T![')'],
        T![,],
        "expected a pattern",
        PAT_FIRST,
        PAT_RECOVERY.union(items::ITEM_FIRST),
        |p| {
            if !p.at_ts(PAT_FIRST) {
                return false;
            }
            pattern(p);
            true
        },
    );
}
