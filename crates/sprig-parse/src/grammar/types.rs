use super::*;

pub(super) const TYPE_FIRST: SyntaxSet = SyntaxSet::new([
    IDENT,
    T![self],
    T![super],
    T![crate],
    T![Self],
    T![:],
    T!['('],
    T!['['],
    T![!],
    T![*],
    T![&],
    T![_],
    T![impl],
    T![dyn],
]);

const TYPE_RECOVERY: SyntaxSet =
    SyntaxSet::new([T![')'], T![']'], T![,], T![;], T![=], T![>]]).union(items::ITEM_FIRST);

pub(super) fn type_(p: &mut Parser<'_>) {
    type_with_bounds(p, true);
}

/// A type that cannot be followed by `+ Bound`, as in `&dyn A + B`.
pub(super) fn type_no_bounds(p: &mut Parser<'_>) {
    type_with_bounds(p, false);
}

fn type_with_bounds(p: &mut Parser<'_>, allow_bounds: bool) {
    p.nested(|p| single_type(p, allow_bounds));
}

fn single_type(p: &mut Parser<'_>, allow_bounds: bool) {
    match p.current() {
        T!['('] => paren_or_tuple_type(p),
        T![!] => {
            let m = p.start();
            p.bump(T![!]);
            m.complete(p, NEVER_TYPE);
        }
        T![*] => ptr_type(p),
        T![&] => ref_type(p),
        T!['['] => array_or_slice_type(p),
        T![_] => {
            let m = p.start();
            p.bump(T![_]);
            m.complete(p, INFER_TYPE);
        }
        T![impl] => bounded_type(p, T![impl], IMPL_TRAIT_TYPE, allow_bounds),
        T![dyn] => bounded_type(p, T![dyn], DYN_TRAIT_TYPE, allow_bounds),
        _ if paths::is_start(p) => path_type(p),
        _ => p.err_recover("expected a type", TYPE_RECOVERY),
    }
}

pub(super) fn path_type(p: &mut Parser<'_>) {
    let m = p.start();
    paths::type_path(p);
    m.complete(p, PATH_TYPE);
}

fn paren_or_tuple_type(p: &mut Parser<'_>) {
    let m = p.start();
    p.bump(T!['(']);

    let mut n_types = 0;
    let mut trailing_comma = false;
    while !p.at(T![')']) && !p.at(EOF) {
        if !p.at_ts(TYPE_FIRST) {
            p.err_recover("expected a type", TYPE_RECOVERY);
            break;
        }
        type_(p);
        n_types += 1;

        trailing_comma = p.eat(T![,]);
        if !trailing_comma {
            break;
        }
    }
    p.expect(T![')']);

    let kind = if n_types == 1 && !trailing_comma { PAREN_TYPE } else { TUPLE_TYPE };
    m.complete(p, kind);
}

fn ptr_type(p: &mut Parser<'_>) {
    let m = p.start();
    p.bump(T![*]);
    if !p.eat(T![const]) && !p.eat(T![mut]) {
        p.error("expected `mut` or `const`");
    }
    type_no_bounds(p);
    m.complete(p, PTR_TYPE);
}

fn ref_type(p: &mut Parser<'_>) {
    let m = p.start();
    p.bump(T![&]);
    if p.at(LIFETIME_IDENT) {
        lifetime(p);
    }
    p.eat(T![mut]);
    type_no_bounds(p);
    m.complete(p, REF_TYPE);
}

fn array_or_slice_type(p: &mut Parser<'_>) {
    let m = p.start();
    p.bump(T!['[']);
    type_(p);

    let kind = if p.eat(T![;]) {
        exprs::expr(p);
        ARRAY_TYPE
    } else {
        SLICE_TYPE
    };
    p.expect(T![']']);
    m.complete(p, kind);
}

fn bounded_type(p: &mut Parser<'_>, keyword: SyntaxKind, kind: SyntaxKind, allow_bounds: bool) {
    let m = p.start();
    p.bump(keyword);
    if allow_bounds && generics::at_type_bound(p) {
        generics::type_bound_list(p);
    } else {
        let list = p.start();
        let bound = p.start();
        single_bound(p);
        bound.complete(p, TYPE_BOUND);
        list.complete(p, TYPE_BOUND_LIST);
    }
    m.complete(p, kind);
}

fn single_bound(p: &mut Parser<'_>) {
    if p.at(LIFETIME_IDENT) {
        lifetime(p);
    } else if paths::is_start(p) {
        path_type(p);
    } else {
        p.err_recover("expected a trait bound", TYPE_RECOVERY);
    }
}
