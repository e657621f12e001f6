use super::*;

pub(crate) const LITERAL_FIRST: SyntaxSet = SyntaxSet::new([
    T![true],
    T![false],
    INT_NUMBER,
    FLOAT_NUMBER,
    STRING,
    BYTE_STRING,
    CHAR,
    BYTE,
]);

pub(super) const ATOM_FIRST: SyntaxSet = LITERAL_FIRST.union(paths::PATH_FIRST).union(COMPOUND_FIRST);

const COMPOUND_FIRST: SyntaxSet = SyntaxSet::new([
    T!['('],
    T!['['],
    T!['{'],
    T![|],
    T![move],
    T![async],
    T![unsafe],
    T![const],
    T![if],
    T![let],
    T![loop],
    T![while],
    T![for],
    T![match],
    T![return],
    T![break],
    T![continue],
]);

pub(crate) fn literal(p: &mut Parser<'_>) -> Option<CompletedMarker> {
    if !p.at_ts(LITERAL_FIRST) {
        return None;
    }
    let m = p.start();
    p.bump_any();
    Some(m.complete(p, LITERAL))
}

pub(super) fn atom_expr(p: &mut Parser<'_>, r: Restrictions) -> Option<(CompletedMarker, bool)> {
    if let Some(m) = literal(p) {
        return Some((m, false));
    }
    if paths::is_start(p) {
        return Some((path_expr(p, r), false));
    }

    let done = match p.current() {
        T!['('] => paren_or_tuple_expr(p),
        T!['['] => array_expr(p),
        T![|] => closure_expr(p),
        T![move] if p.nth(1) == T![|] => closure_expr(p),
        T![if] => if_expr(p),
        T![let] => let_expr(p, r),
        T![loop] => loop_expr(p),
        T![while] => while_expr(p),
        T![for] => for_expr(p),
        T![match] => match_expr(p),
        T!['{'] => block_expr_with_modifiers(p),
        T![unsafe] | T![const] if p.nth(1) == T!['{'] => block_expr_with_modifiers(p),
        T![async] if p.nth(1) == T!['{'] || (p.nth(1) == T![move] && p.nth(2) == T!['{']) => {
            block_expr_with_modifiers(p)
        }
        T![return] => return_expr(p, r),
        T![break] => break_expr(p, r),
        T![continue] => continue_expr(p),
        T![move] | T![async] | T![unsafe] | T![const] => {
            p.err_and_bump("expected an expression");
            return None;
        }
        _ => {
            p.err_recover("expected an expression", EXPR_RECOVERY);
            return None;
        }
    };
    Some((done, is_block_like(done.kind())))
}

fn path_expr(p: &mut Parser<'_>, r: Restrictions) -> CompletedMarker {
    let path = paths::expr_path(p);
    let m = path.precede(p);
    if p.at(T!['{']) && !r.forbid_structs {
        record_expr_field_list(p);
        m.complete(p, RECORD_EXPR)
    } else {
        m.complete(p, PATH_EXPR)
    }
}

fn record_expr_field_list(p: &mut Parser<'_>) {
    let m = p.start();
    p.bump(T!['{']);
    while !p.at(EOF) && !p.at(T!['}']) {
        if p.at(T![..]) {
            p.bump(T![..]);
            if p.at_ts(EXPR_FIRST) {
                expr(p);
            }
            break;
        }

        if p.at(T!['{']) {
            items::error_block(p, "expected a field");
            continue;
        }
        if !p.at_ts(EXPR_FIRST) {
            p.err_and_bump("expected a field");
            continue;
        }

        record_expr_field(p);
        if !p.at(T!['}']) {
            p.expect(T![,]);
        }
    }
    p.expect(T!['}']);
    m.complete(p, RECORD_EXPR_FIELD_LIST);
}

fn record_expr_field(p: &mut Parser<'_>) {
    let m = p.start();
    if matches!(p.current(), IDENT | INT_NUMBER) && p.nth(1) == T![:] && !p.nth_at(1, T![::]) {
        name_ref(p);
        p.bump(T![:]);
    }
    expr(p);
    m.complete(p, RECORD_EXPR_FIELD);
}

/// `(a)` is a parenthesized expression; `()`, `(a,)` and `(a, b)` are tuples.
fn paren_or_tuple_expr(p: &mut Parser<'_>) -> CompletedMarker {
    let m = p.start();
    p.bump(T!['(']);

    let mut n_exprs = 0;
    let mut saw_comma = false;
    while !p.at(EOF) && !p.at(T![')']) {
        if !p.at_ts(EXPR_FIRST) {
            p.err_recover("expected an expression", EXPR_RECOVERY);
            break;
        }
        expr(p);
        n_exprs += 1;
        if !p.eat(T![,]) {
            break;
        }
        saw_comma = true;
    }
    p.expect(T![')']);

    m.complete(p, if n_exprs == 1 && !saw_comma { PAREN_EXPR } else { TUPLE_EXPR })
}

fn array_expr(p: &mut Parser<'_>) -> CompletedMarker {
    let m = p.start();
    p.bump(T!['[']);
    if p.eat(T![']']) {
        return m.complete(p, ARRAY_EXPR);
    }

    expr(p);
    if p.eat(T![;]) {
        expr(p);
    } else {
        while p.eat(T![,]) {
            if p.at(T![']']) {
                break;
            }
            expr(p);
        }
    }
    p.expect(T![']']);
    m.complete(p, ARRAY_EXPR)
}

fn closure_expr(p: &mut Parser<'_>) -> CompletedMarker {
    let m = p.start();
    p.eat(T![move]);
    params::closure_param_list(p);
    if p.at(T![->]) {
        let ret = p.start();
        p.bump(T![->]);
        types::type_no_bounds(p);
        ret.complete(p, RET_TYPE);
        // An explicit return type requires a block body.
        block_expr(p);
    } else if p.at_ts(EXPR_FIRST) {
        expr(p);
    } else {
        p.error("expected a closure body");
    }
    m.complete(p, CLOSURE_EXPR)
}

fn if_expr(p: &mut Parser<'_>) -> CompletedMarker {
    let m = p.start();
    p.bump(T![if]);
    expr_no_struct(p);
    block_expr(p);
    if p.eat(T![else]) {
        if p.at(T![if]) {
            if_expr(p);
        } else {
            block_expr(p);
        }
    }
    m.complete(p, IF_EXPR)
}

/// `let` in a condition. The scrutinee binds tighter than `&&` and `||`,
/// so `let Some(x) = a && b` chains two conditions.
fn let_expr(p: &mut Parser<'_>, r: Restrictions) -> CompletedMarker {
    let m = p.start();
    p.bump(T![let]);
    patterns::pattern(p);
    p.expect(T![=]);
    expr_bp(p, Restrictions { prefer_stmt: false, ..r }, 5);
    m.complete(p, LET_EXPR)
}

fn loop_expr(p: &mut Parser<'_>) -> CompletedMarker {
    let m = p.start();
    p.bump(T![loop]);
    block_expr(p);
    m.complete(p, LOOP_EXPR)
}

fn while_expr(p: &mut Parser<'_>) -> CompletedMarker {
    let m = p.start();
    p.bump(T![while]);
    expr_no_struct(p);
    block_expr(p);
    m.complete(p, WHILE_EXPR)
}

fn for_expr(p: &mut Parser<'_>) -> CompletedMarker {
    let m = p.start();
    p.bump(T![for]);
    patterns::pattern(p);
    if p.expect(T![in]) {
        expr_no_struct(p);
    }
    block_expr(p);
    m.complete(p, FOR_EXPR)
}

fn match_expr(p: &mut Parser<'_>) -> CompletedMarker {
    let m = p.start();
    p.bump(T![match]);
    expr_no_struct(p);
    if p.at(T!['{']) {
        match_arm_list(p);
    } else {
        p.error("expected `{`");
    }
    m.complete(p, MATCH_EXPR)
}

fn block_expr_with_modifiers(p: &mut Parser<'_>) -> CompletedMarker {
    let m = p.start();
    if p.eat(T![async]) {
        p.eat(T![move]);
    } else if !p.eat(T![unsafe]) {
        p.eat(T![const]);
    }
    stmt_list(p);
    m.complete(p, BLOCK_EXPR)
}

fn return_expr(p: &mut Parser<'_>, r: Restrictions) -> CompletedMarker {
    let m = p.start();
    p.bump(T![return]);
    if at_expr_start(p, r) {
        expr_bp(p, Restrictions { prefer_stmt: false, ..r }, 1);
    }
    m.complete(p, RETURN_EXPR)
}

fn break_expr(p: &mut Parser<'_>, r: Restrictions) -> CompletedMarker {
    let m = p.start();
    p.bump(T![break]);
    if p.at(LIFETIME_IDENT) {
        lifetime(p);
    }
    if at_expr_start(p, r) {
        expr_bp(p, Restrictions { prefer_stmt: false, ..r }, 1);
    }
    m.complete(p, BREAK_EXPR)
}

fn continue_expr(p: &mut Parser<'_>) -> CompletedMarker {
    let m = p.start();
    p.bump(T![continue]);
    if p.at(LIFETIME_IDENT) {
        lifetime(p);
    }
    m.complete(p, CONTINUE_EXPR)
}
