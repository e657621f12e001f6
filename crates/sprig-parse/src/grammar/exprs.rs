mod atom;

use super::*;

pub(super) use atom::{LITERAL_FIRST, literal};

pub(super) const EXPR_FIRST: SyntaxSet = LITERAL_FIRST
    .union(atom::ATOM_FIRST)
    .union(SyntaxSet::new([T![-], T![!], T![*], T![&], T![.]]));

const EXPR_RECOVERY: SyntaxSet =
    SyntaxSet::new([T![;], T![,], T![')'], T![']'], T![=>]]).union(items::ITEM_FIRST);

#[derive(Clone, Copy, Default)]
struct Restrictions {
    /// `S {` starts a block, not a record expression: `if x {}`.
    forbid_structs: bool,
    /// An expression statement ends after a block-like expression:
    /// `match x {} - 1` is two statements.
    prefer_stmt: bool,
}

pub(super) fn expr(p: &mut Parser<'_>) -> Option<CompletedMarker> {
    expr_bp(p, Restrictions::default(), 1).map(|(m, _)| m)
}

fn expr_no_struct(p: &mut Parser<'_>) {
    expr_bp(p, Restrictions { forbid_structs: true, prefer_stmt: false }, 1);
}

pub(super) fn stmt_list(p: &mut Parser<'_>) -> CompletedMarker {
    let m = p.start();
    p.bump(T!['{']);
    stmt_list_contents(p);
    p.expect(T!['}']);
    m.complete(p, STMT_LIST)
}

pub(super) fn stmt_list_contents(p: &mut Parser<'_>) {
    while !p.at(EOF) && !p.at(T!['}']) {
        let before = p.pos();
        stmt(p);
        if p.pos() == before {
            let m = p.start();
            p.error("expected a statement");
            p.bump_any();
            m.complete(p, ERROR);
        }
    }
}

fn stmt(p: &mut Parser<'_>) {
    match p.current() {
        // Empty statements belong to the list itself.
        T![;] => {
            p.bump(T![;]);
            return;
        }
        T![let] => {
            let_stmt(p);
            return;
        }
        _ => {}
    }

    if items::opt_item(p) {
        return;
    }

    if !p.at_ts(EXPR_FIRST) {
        p.err_and_bump("expected a statement");
        return;
    }

    let m = p.start();
    let r = Restrictions { prefer_stmt: true, ..Default::default() };
    let Some((_, is_block_like)) = expr_bp(p, r, 1) else {
        m.abandon(p);
        return;
    };

    if p.at(T!['}']) {
        // Tail expression.
        m.abandon(p);
        return;
    }

    if !p.eat(T![;]) && !is_block_like {
        p.error("expected `;`");
    }
    m.complete(p, EXPR_STMT);
}

fn let_stmt(p: &mut Parser<'_>) {
    let m = p.start();
    p.bump(T![let]);
    patterns::pattern(p);
    if p.eat(T![:]) {
        types::type_(p);
    }
    if p.eat(T![=]) {
        expr(p);
    }
    if p.at(T![else]) {
        let m = p.start();
        p.bump(T![else]);
        block_expr(p);
        m.complete(p, LET_ELSE);
    }
    p.expect(T![;]);
    m.complete(p, LET_STMT);
}

pub(super) fn match_arm_list(p: &mut Parser<'_>) {
    let m = p.start();
    p.bump(T!['{']);
    while !p.at(EOF) && !p.at(T!['}']) {
        if p.at(T!['{']) {
            items::error_block(p, "expected a match arm");
            continue;
        }
        let before = p.pos();
        match_arm(p);
        if p.pos() == before {
            let m = p.start();
            p.error("expected a match arm");
            p.bump_any();
            m.complete(p, ERROR);
        }
    }
    p.expect(T!['}']);
    m.complete(p, MATCH_ARM_LIST);
}

fn match_arm(p: &mut Parser<'_>) {
    if !p.at_ts(patterns::PAT_FIRST) && !p.at(T![|]) {
        p.err_and_bump("expected a match arm");
        return;
    }

    let m = p.start();
    patterns::pattern(p);
    if p.at(T![if]) {
        let guard = p.start();
        p.bump(T![if]);
        expr(p);
        guard.complete(p, MATCH_GUARD);
    }
    p.expect(T![=>]);

    let is_block_like = expr(p).is_some_and(|arm| is_block_like(arm.kind()));
    // The comma is optional after a block and after the last arm.
    if !p.eat(T![,]) && !is_block_like && !p.at(T!['}']) {
        p.error("expected `,`");
    }
    m.complete(p, MATCH_ARM);
}

fn is_block_like(kind: SyntaxKind) -> bool {
    matches!(kind, BLOCK_EXPR | IF_EXPR | LOOP_EXPR | WHILE_EXPR | FOR_EXPR | MATCH_EXPR)
}

enum Associativity {
    Left,
    Right,
}

/// Binding power of the binary operator at the cursor, or 0.
#[rustfmt::skip]
fn current_op(p: &Parser<'_>) -> (u8, SyntaxKind, Associativity) {
    use Associativity::*;
    const NOT_AN_OP: (u8, SyntaxKind, Associativity) = (0, T![@], Left);

    match p.current() {
        T![|] if p.at(T![||])  => (3,  T![||],  Left),
        T![|] if p.at(T![|=])  => (1,  T![|=],  Right),
        T![|]                  => (6,  T![|],   Left),
        T![>] if p.at(T![>>=]) => (1,  T![>>=], Right),
        T![>] if p.at(T![>>])  => (9,  T![>>],  Left),
        T![>] if p.at(T![>=])  => (5,  T![>=],  Left),
        T![>]                  => (5,  T![>],   Left),
        T![=] if p.at(T![=>])  => NOT_AN_OP,
        T![=] if p.at(T![==])  => (5,  T![==],  Left),
        T![=]                  => (1,  T![=],   Right),
        T![<] if p.at(T![<=])  => (5,  T![<=],  Left),
        T![<] if p.at(T![<<=]) => (1,  T![<<=], Right),
        T![<] if p.at(T![<<])  => (9,  T![<<],  Left),
        T![<]                  => (5,  T![<],   Left),
        T![+] if p.at(T![+=])  => (1,  T![+=],  Right),
        T![+]                  => (10, T![+],   Left),
        T![^] if p.at(T![^=])  => (1,  T![^=],  Right),
        T![^]                  => (7,  T![^],   Left),
        T![%] if p.at(T![%=])  => (1,  T![%=],  Right),
        T![%]                  => (11, T![%],   Left),
        T![&] if p.at(T![&=])  => (1,  T![&=],  Right),
        T![&] if p.at(T![&&])  => (4,  T![&&],  Left),
        T![&]                  => (8,  T![&],   Left),
        T![/] if p.at(T![/=])  => (1,  T![/=],  Right),
        T![/]                  => (11, T![/],   Left),
        T![*] if p.at(T![*=])  => (1,  T![*=],  Right),
        T![*]                  => (11, T![*],   Left),
        T![.] if p.at(T![..=]) => (2,  T![..=], Left),
        T![.] if p.at(T![..])  => (2,  T![..],  Left),
        T![!] if p.at(T![!=])  => (5,  T![!=],  Left),
        T![-] if p.at(T![-=])  => (1,  T![-=],  Right),
        T![-]                  => (10, T![-],   Left),
        T![as]                 => (12, T![as],  Left),
        _                      => NOT_AN_OP,
    }
}

/// Precedence climbing. Returns the expression and whether it is a
/// block-like expression that ended a statement.
fn expr_bp(p: &mut Parser<'_>, r: Restrictions, bp: u8) -> Option<(CompletedMarker, bool)> {
    p.nested(|p| binary_expr(p, r, bp)).flatten()
}

fn binary_expr(p: &mut Parser<'_>, r: Restrictions, bp: u8) -> Option<(CompletedMarker, bool)> {
    let (mut lhs, is_block_like) = lhs(p, r)?;
    if r.prefer_stmt && is_block_like {
        return Some((lhs, true));
    }
    let r = Restrictions { prefer_stmt: false, ..r };

    loop {
        let (op_bp, op, associativity) = current_op(p);
        if op_bp < bp {
            break;
        }

        let m = lhs.precede(p);
        p.bump(op);

        if op == T![as] {
            types::type_no_bounds(p);
            lhs = m.complete(p, CAST_EXPR);
            continue;
        }

        if matches!(op, T![..] | T![..=]) {
            if at_expr_start(p, r) {
                expr_bp(p, r, op_bp + 1);
            }
            lhs = m.complete(p, RANGE_EXPR);
            continue;
        }

        let rhs_bp = match associativity {
            Associativity::Left => op_bp + 1,
            Associativity::Right => op_bp,
        };
        expr_bp(p, r, rhs_bp);
        lhs = m.complete(p, BIN_EXPR);
    }

    Some((lhs, false))
}

fn at_expr_start(p: &Parser<'_>, r: Restrictions) -> bool {
    p.at_ts(EXPR_FIRST) && !(r.forbid_structs && p.at(T!['{']))
}

fn lhs(p: &mut Parser<'_>, r: Restrictions) -> Option<(CompletedMarker, bool)> {
    let m;
    let kind = match p.current() {
        T![*] | T![!] | T![-] => {
            m = p.start();
            p.bump_any();
            PREFIX_EXPR
        }
        T![&] => {
            m = p.start();
            p.bump(T![&]);
            p.eat(T![mut]);
            REF_EXPR
        }
        T![.] if p.at(T![..=]) || p.at(T![..]) => {
            m = p.start();
            if !p.eat(T![..=]) {
                p.bump(T![..]);
            }
            if at_expr_start(p, r) {
                expr_bp(p, Restrictions { prefer_stmt: false, ..r }, 3);
            }
            return Some((m.complete(p, RANGE_EXPR), false));
        }
        _ => {
            let (lhs, is_block_like) = atom::atom_expr(p, r)?;
            let allow_calls = !(r.prefer_stmt && is_block_like);
            return Some(postfix_expr(p, lhs, is_block_like, allow_calls));
        }
    };

    expr_bp(p, Restrictions { prefer_stmt: false, ..r }, 255);
    Some((m.complete(p, kind), false))
}

fn postfix_expr(
    p: &mut Parser<'_>,
    mut lhs: CompletedMarker,
    mut is_block_like: bool,
    mut allow_calls: bool,
) -> (CompletedMarker, bool) {
    loop {
        lhs = match p.current() {
            T!['('] if allow_calls => call_expr(p, lhs),
            T!['['] if allow_calls => index_expr(p, lhs),
            T![.] if !p.at(T![..]) => field_or_method_call_expr(p, lhs),
            T![?] => try_expr(p, lhs),
            _ => break,
        };
        allow_calls = true;
        is_block_like = false;
    }
    (lhs, is_block_like)
}

fn call_expr(p: &mut Parser<'_>, lhs: CompletedMarker) -> CompletedMarker {
    let m = lhs.precede(p);
    arg_list(p);
    m.complete(p, CALL_EXPR)
}

fn index_expr(p: &mut Parser<'_>, lhs: CompletedMarker) -> CompletedMarker {
    let m = lhs.precede(p);
    p.bump(T!['[']);
    expr(p);
    p.expect(T![']']);
    m.complete(p, INDEX_EXPR)
}

fn field_or_method_call_expr(p: &mut Parser<'_>, lhs: CompletedMarker) -> CompletedMarker {
    let m = lhs.precede(p);
    p.bump(T![.]);
    if p.at(IDENT) && (p.nth(1) == T!['('] || (p.nth_at(1, T![::]) && p.nth(3) == T![<])) {
        name_ref(p);
        if p.at(T![::]) {
            generics::generic_arg_list(p, true);
        }
        if p.at(T!['(']) {
            arg_list(p);
        } else {
            p.error("expected an argument list");
        }
        m.complete(p, METHOD_CALL_EXPR)
    } else {
        if p.at(IDENT) || p.at(INT_NUMBER) {
            name_ref(p);
        } else {
            p.error("expected a field name or number");
        }
        m.complete(p, FIELD_EXPR)
    }
}

fn try_expr(p: &mut Parser<'_>, lhs: CompletedMarker) -> CompletedMarker {
    let m = lhs.precede(p);
    p.bump(T![?]);
    m.complete(p, TRY_EXPR)
}

fn arg_list(p: &mut Parser<'_>) {
    let m = p.start();
    delimited(
        p,
        T!['('],
        T![')'],
        T![,],
        "expected an argument",
        EXPR_FIRST,
        EXPR_RECOVERY,
        |p| {
            if !p.at_ts(EXPR_FIRST) {
                return false;
            }
            expr(p);
            true
        },
    );
    m.complete(p, ARG_LIST);
}
