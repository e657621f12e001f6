use super::*;

pub(super) const ITEM_FIRST: SyntaxSet = SyntaxSet::new([
    T![pub],
    T![const],
    T![async],
    T![unsafe],
    T![fn],
    T![struct],
    T![enum],
    T![trait],
    T![impl],
    T![mod],
    T![use],
    T![type],
    T![static],
]);

pub(super) const ITEM_RECOVERY: SyntaxSet = ITEM_FIRST.with(T![;]);

const FIELD_FIRST: SyntaxSet = SyntaxSet::new([T![pub], IDENT]);
const USE_TREE_FIRST: SyntaxSet =
    SyntaxSet::new([T![*], T!['{'], T![:], IDENT, T![self], T![super], T![crate], T![Self]]);

pub(super) fn mod_contents(p: &mut Parser<'_>, stop_on_r_curly: bool) {
    while !(p.at(EOF) || (p.at(T!['}']) && stop_on_r_curly)) {
        item_or_recover(p);
    }
}

fn item_or_recover(p: &mut Parser<'_>) {
    if opt_item(p) {
        return;
    }

    match p.current() {
        T!['{'] => error_block(p, "expected an item"),
        T!['}'] => {
            let m = p.start();
            p.error("unmatched `}`");
            p.bump(T!['}']);
            m.complete(p, ERROR);
        }
        _ => p.err_and_bump("expected an item"),
    }
}

/// Parses an item if one starts here. Statements share this with modules.
pub(super) fn opt_item(p: &mut Parser<'_>) -> bool {
    let m = p.start();
    let has_visibility = opt_visibility(p);

    let mut n_modifiers = 0;
    while n_modifiers < 3 && matches!(p.nth(n_modifiers), T![const] | T![async] | T![unsafe]) {
        n_modifiers += 1;
    }

    match p.current() {
        _ if p.nth(n_modifiers) == T![fn] => fn_(p, m),
        T![const] if matches!(p.nth(1), IDENT | T![_]) => const_(p, m),
        T![static] => static_(p, m),
        T![struct] => struct_(p, m),
        T![enum] => enum_(p, m),
        T![trait] => trait_(p, m),
        T![unsafe] if p.nth(1) == T![trait] => trait_(p, m),
        T![impl] => impl_(p, m),
        T![unsafe] if p.nth(1) == T![impl] => impl_(p, m),
        T![mod] => module(p, m),
        T![use] => use_(p, m),
        T![type] => type_alias(p, m),
        _ if has_visibility => {
            p.error("expected an item after visibility");
            m.complete(p, ERROR);
        }
        _ => {
            m.abandon(p);
            return false;
        }
    }
    true
}

fn fn_(p: &mut Parser<'_>, m: Marker) {
    fn_modifiers(p);
    p.bump(T![fn]);

    name_r(p, ITEM_RECOVERY.with(T!['(']));
    generics::opt_generic_param_list(p);

    if p.at(T!['(']) {
        params::param_list(p);
    } else {
        p.error("expected function parameters");
    }

    if p.at(T![->]) {
        let ret = p.start();
        p.bump(T![->]);
        types::type_(p);
        ret.complete(p, RET_TYPE);
    }

    generics::opt_where_clause(p);

    if !p.eat(T![;]) {
        block_expr(p);
    }
    m.complete(p, FN);
}

/// Eats the modifiers in front of `fn`. They belong in `const async unsafe`
/// order; a repeated or misplaced one becomes an `ERROR` token.
fn fn_modifiers(p: &mut Parser<'_>) {
    let rank = |kind: SyntaxKind| match kind {
        T![const] => Some(0),
        T![async] => Some(1),
        T![unsafe] => Some(2),
        _ => None,
    };

    let mut next = 0;
    while let Some(current) = rank(p.current()) {
        if current < next {
            p.err_and_bump("modifiers must be written as `const async unsafe fn`");
        } else {
            p.bump_any();
            next = current + 1;
        }
    }
}

fn const_(p: &mut Parser<'_>, m: Marker) {
    p.bump(T![const]);
    if !p.eat(T![_]) {
        name_r(p, ITEM_RECOVERY);
    }
    if p.expect(T![:]) {
        types::type_(p);
    }
    if p.eat(T![=]) {
        exprs::expr(p);
    }
    p.expect(T![;]);
    m.complete(p, CONST);
}

fn static_(p: &mut Parser<'_>, m: Marker) {
    p.bump(T![static]);
    p.eat(T![mut]);
    name_r(p, ITEM_RECOVERY);
    if p.expect(T![:]) {
        types::type_(p);
    }
    if p.eat(T![=]) {
        exprs::expr(p);
    }
    p.expect(T![;]);
    m.complete(p, STATIC);
}

fn struct_(p: &mut Parser<'_>, m: Marker) {
    p.bump(T![struct]);
    name_r(p, ITEM_RECOVERY);
    generics::opt_generic_param_list(p);

    if p.at(T!['(']) {
        tuple_field_list(p);
        generics::opt_where_clause(p);
        p.expect(T![;]);
    } else {
        generics::opt_where_clause(p);
        if p.at(T!['{']) {
            record_field_list(p);
        } else if !p.eat(T![;]) {
            p.error("expected `{`, `(` or `;`");
        }
    }
    m.complete(p, STRUCT);
}

pub(super) fn record_field_list(p: &mut Parser<'_>) {
    let m = p.start();
    delimited(
        p,
        T!['{'],
        T!['}'],
        T![,],
        "expected a field",
        FIELD_FIRST,
        ITEM_RECOVERY,
        record_field,
    );
    m.complete(p, RECORD_FIELD_LIST);
}

fn record_field(p: &mut Parser<'_>) -> bool {
    if !p.at_ts(FIELD_FIRST) {
        return false;
    }

    let m = p.start();
    opt_visibility(p);
    name_r(p, ITEM_RECOVERY.with(T![:]));
    if p.expect(T![:]) {
        types::type_(p);
    }
    m.complete(p, RECORD_FIELD);
    true
}

fn tuple_field_list(p: &mut Parser<'_>) {
    let m = p.start();
    delimited(
        p,
        T!['('],
        T![')'],
        T![,],
        "expected a field",
        types::TYPE_FIRST.with(T![pub]),
        ITEM_RECOVERY,
        tuple_field,
    );
    m.complete(p, TUPLE_FIELD_LIST);
}

fn tuple_field(p: &mut Parser<'_>) -> bool {
    if !p.at(T![pub]) && !p.at_ts(types::TYPE_FIRST) {
        return false;
    }

    let m = p.start();
    opt_visibility(p);
    types::type_(p);
    m.complete(p, TUPLE_FIELD);
    true
}

fn enum_(p: &mut Parser<'_>, m: Marker) {
    p.bump(T![enum]);
    name_r(p, ITEM_RECOVERY);
    generics::opt_generic_param_list(p);
    generics::opt_where_clause(p);
    if p.at(T!['{']) {
        variant_list(p);
    } else {
        p.error("expected `{`");
    }
    m.complete(p, ENUM);
}

pub(super) fn variant_list(p: &mut Parser<'_>) {
    let m = p.start();
    delimited(
        p,
        T!['{'],
        T!['}'],
        T![,],
        "expected a variant",
        FIELD_FIRST,
        ITEM_RECOVERY,
        variant,
    );
    m.complete(p, VARIANT_LIST);
}

fn variant(p: &mut Parser<'_>) -> bool {
    if !p.at_ts(FIELD_FIRST) {
        return false;
    }

    let m = p.start();
    opt_visibility(p);
    name_r(p, ITEM_RECOVERY);
    match p.current() {
        T!['{'] => record_field_list(p),
        T!['('] => tuple_field_list(p),
        _ => {}
    }
    if p.eat(T![=]) {
        exprs::expr(p);
    }
    m.complete(p, VARIANT);
    true
}

fn trait_(p: &mut Parser<'_>, m: Marker) {
    p.eat(T![unsafe]);
    p.bump(T![trait]);
    name_r(p, ITEM_RECOVERY);
    generics::opt_generic_param_list(p);
    if p.eat(T![:]) {
        generics::opt_type_bound_list(p);
    }
    generics::opt_where_clause(p);
    if p.at(T!['{']) {
        assoc_item_list(p);
    } else {
        p.error("expected `{`");
    }
    m.complete(p, TRAIT);
}

fn impl_(p: &mut Parser<'_>, m: Marker) {
    p.eat(T![unsafe]);
    p.bump(T![impl]);
    generics::opt_generic_param_list(p);

    p.eat(T![!]);
    types::type_(p);
    if p.eat(T![for]) {
        types::type_(p);
    }

    generics::opt_where_clause(p);
    if p.at(T!['{']) {
        assoc_item_list(p);
    } else {
        p.error("expected `{`");
    }
    m.complete(p, IMPL);
}

pub(super) fn assoc_item_list(p: &mut Parser<'_>) {
    let m = p.start();
    p.bump(T!['{']);
    p.nested(|p| mod_contents(p, true));
    p.expect(T!['}']);
    m.complete(p, ASSOC_ITEM_LIST);
}

fn module(p: &mut Parser<'_>, m: Marker) {
    p.bump(T![mod]);
    name_r(p, ITEM_RECOVERY.with(T!['{']));
    if p.at(T!['{']) {
        item_list(p);
    } else {
        p.expect(T![;]);
    }
    m.complete(p, MODULE);
}

pub(super) fn item_list(p: &mut Parser<'_>) {
    let m = p.start();
    p.bump(T!['{']);
    p.nested(|p| mod_contents(p, true));
    p.expect(T!['}']);
    m.complete(p, ITEM_LIST);
}

fn use_(p: &mut Parser<'_>, m: Marker) {
    p.bump(T![use]);
    use_tree(p, true);
    p.expect(T![;]);
    m.complete(p, USE);
}

fn use_tree(p: &mut Parser<'_>, top_level: bool) -> bool {
    let m = p.start();
    match p.current() {
        T![*] => p.bump(T![*]),
        T![:] if p.at(T![::]) && matches!(p.nth(2), T![*] | T!['{']) => {
            p.bump(T![::]);
            glob_or_list(p);
        }
        T!['{'] => use_tree_list(p),
        _ if paths::is_start(p) => {
            paths::use_path(p);
            if p.at(T![as]) {
                rename(p);
            } else if p.eat(T![::]) {
                glob_or_list(p);
            }
        }
        _ => {
            m.abandon(p);
            if top_level {
                p.err_recover("expected a use tree", ITEM_RECOVERY);
            }
            return false;
        }
    }
    m.complete(p, USE_TREE);
    true
}

fn glob_or_list(p: &mut Parser<'_>) {
    match p.current() {
        T![*] => p.bump(T![*]),
        T!['{'] => use_tree_list(p),
        _ => p.error("expected `{` or `*`"),
    }
}

pub(super) fn use_tree_list(p: &mut Parser<'_>) {
    let m = p.start();
    delimited(
        p,
        T!['{'],
        T!['}'],
        T![,],
        "expected a use tree",
        USE_TREE_FIRST,
        ITEM_RECOVERY,
        |p| use_tree(p, false),
    );
    m.complete(p, USE_TREE_LIST);
}

fn rename(p: &mut Parser<'_>) {
    let m = p.start();
    p.bump(T![as]);
    if !p.eat(T![_]) {
        name(p);
    }
    m.complete(p, RENAME);
}

fn type_alias(p: &mut Parser<'_>, m: Marker) {
    p.bump(T![type]);
    name_r(p, ITEM_RECOVERY);
    generics::opt_generic_param_list(p);
    if p.eat(T![:]) {
        generics::opt_type_bound_list(p);
    }
    generics::opt_where_clause(p);
    if p.eat(T![=]) {
        types::type_(p);
    }
    p.expect(T![;]);
    m.complete(p, TYPE_ALIAS);
}

/// Skips a stray `{ ... }` as one `ERROR` node, so that its closing brace
/// does not end the enclosing list.
pub(super) fn error_block(p: &mut Parser<'_>, message: &str) {
    let m = p.start();
    p.error(message);
    p.bump(T!['{']);
    exprs::stmt_list_contents(p);
    p.eat(T!['}']);
    m.complete(p, ERROR);
}
