use expect_test::{Expect, expect};
use sprig_syntax::ast::{self, AstNode, BinaryOp};
use sprig_syntax::{Indel, Parse, SyntaxErrorKind, SyntaxKind, TextRange};

use crate::{Reparser, parse, reparse};

fn check(text: &str, expect: Expect) {
    let parse = parse(text);
    expect.assert_eq(&parse.debug_dump());
}

fn first_fn(text: &str) -> ast::Fn {
    let file = parse(text).tree();
    file.syntax().descendants().find_map(ast::Fn::cast).expect("no function in the test input")
}

fn tail_expr(text: &str) -> ast::Expr {
    first_fn(text)
        .body()
        .and_then(|body| body.stmt_list())
        .and_then(|stmts| stmts.tail_expr())
        .expect("function without a tail expression")
}

/// Reparses `before` with the edit and checks the result against a parse
/// from scratch.
fn check_reparse(before: &str, delete: TextRange, insert: &str) -> Parse<ast::SourceFile> {
    let old = parse(before);
    let edit = Indel::replace(delete, insert);
    let new = reparse(&old, &edit);

    let mut after = before.to_owned();
    edit.apply(&mut after);
    assert_eq!(new.syntax_node().text(), after);
    assert_eq!(new, parse(&after), "incremental and full parses differ for {after:?}");
    new
}

fn range(start: u32, end: u32) -> TextRange {
    TextRange::new(start.into(), end.into())
}

#[test]
fn empty_function() {
    check(
        "fn f() {}",
        expect![[r#"
            SOURCE_FILE@0..9
              FN@0..9
                FN_KW@0..2 "fn"
                WHITESPACE@2..3 " "
                NAME@3..4
                  IDENT@3..4 "f"
                PARAM_LIST@4..6
                  LEFT_PAREN@4..5 "("
                  RIGHT_PAREN@5..6 ")"
                WHITESPACE@6..7 " "
                BLOCK_EXPR@7..9
                  STMT_LIST@7..9
                    LEFT_BRACE@7..8 "{"
                    RIGHT_BRACE@8..9 "}"
        "#]],
    );
}

#[test]
fn missing_r_paren_recovers_at_the_body() {
    check(
        "fn f( {}",
        expect![[r#"
            SOURCE_FILE@0..8
              FN@0..8
                FN_KW@0..2 "fn"
                WHITESPACE@2..3 " "
                NAME@3..4
                  IDENT@3..4 "f"
                PARAM_LIST@4..5
                  LEFT_PAREN@4..5 "("
                WHITESPACE@5..6 " "
                BLOCK_EXPR@6..8
                  STMT_LIST@6..8
                    LEFT_BRACE@6..7 "{"
                    RIGHT_BRACE@7..8 "}"
            error 6..7: expected `)`
        "#]],
    );

    let parse = parse("fn f( {}");
    assert_eq!(parse.errors().len(), 1);
    assert_eq!(parse.errors()[0].kind(), SyntaxErrorKind::UnterminatedConstruct);
}

#[test]
fn comments_attach_to_the_next_item() {
    check(
        "// doc\nfn f() {}\n",
        expect![[r#"
            SOURCE_FILE@0..17
              FN@0..16
                COMMENT@0..6 "// doc"
                WHITESPACE@6..7 "\n"
                FN_KW@7..9 "fn"
                WHITESPACE@9..10 " "
                NAME@10..11
                  IDENT@10..11 "f"
                PARAM_LIST@11..13
                  LEFT_PAREN@11..12 "("
                  RIGHT_PAREN@12..13 ")"
                WHITESPACE@13..14 " "
                BLOCK_EXPR@14..16
                  STMT_LIST@14..16
                    LEFT_BRACE@14..15 "{"
                    RIGHT_BRACE@15..16 "}"
              WHITESPACE@16..17 "\n"
        "#]],
    );
}

#[test]
fn blank_line_detaches_comments() {
    let func = first_fn("// license\n\nfn f() {}");
    let first = func.syntax().first_token().unwrap();
    assert_eq!(first.kind(), SyntaxKind::FN_KW);

    let func = first_fn("// a\n//! inner\n// b\nfn f() {}");
    let first = func.syntax().first_token().unwrap();
    assert_eq!(first.text(), "// b");
}

#[test]
fn record_fields() {
    let file = parse("struct S { a: i32, b: i32 }").tree();
    let Some(ast::Item::Struct(strukt)) = file.items().next() else {
        panic!("expected a struct");
    };
    let names: Vec<String> = strukt
        .record_field_list()
        .unwrap()
        .fields()
        .map(|field| field.name().unwrap().text())
        .collect();
    assert_eq!(names, ["a", "b"]);
}

#[test]
fn binary_operators_respect_precedence() {
    let ast::Expr::BinExpr(sum) = tail_expr("fn f() { 1 + 2 * 3 }") else {
        panic!("expected a binary expression");
    };
    assert_eq!(sum.op_kind(), Some(BinaryOp::Add));
    let Some(ast::Expr::BinExpr(product)) = sum.rhs() else {
        panic!("expected a product on the right");
    };
    assert_eq!(product.op_kind(), Some(BinaryOp::Mul));

    let ast::Expr::BinExpr(assign) = tail_expr("fn f() { a = b += c }") else {
        panic!("expected an assignment");
    };
    assert_eq!(assign.op_kind(), Some(BinaryOp::Assign(None)));
    assert!(matches!(assign.rhs(), Some(ast::Expr::BinExpr(_))));
}

#[test]
fn composite_punctuation_needs_joint_tokens() {
    let ast::Expr::BinExpr(and) = tail_expr("fn f() { a && b }") else {
        panic!("expected a binary expression");
    };
    assert_eq!(and.op_kind(), Some(BinaryOp::And));

    let ast::Expr::BinExpr(bitand) = tail_expr("fn f() { a & &b }") else {
        panic!("expected a binary expression");
    };
    assert_eq!(bitand.op_kind(), Some(BinaryOp::BitAnd));
    assert!(matches!(bitand.rhs(), Some(ast::Expr::RefExpr(_))));
}

#[test]
fn nested_generics_close_with_shift_token() {
    let parse = parse("fn f(x: Vec<Vec<u8>>) {}");
    assert!(parse.ok(), "{:?}", parse.errors());
}

#[test]
fn condition_is_not_a_record_literal() {
    let ast::Expr::IfExpr(if_expr) = tail_expr("fn f() { if x {} else { S { a: 1 } } }") else {
        panic!("expected an if expression");
    };
    assert!(matches!(if_expr.condition(), Some(ast::Expr::PathExpr(_))));
    assert!(if_expr.then_branch().is_some());
    assert!(if_expr.syntax().descendants().any(|node| node.kind() == SyntaxKind::RECORD_EXPR));
}

#[test]
fn block_like_statements_need_no_semicolon() {
    let parse = parse("fn f() { if a {} match b { _ => {} } loop {} x }");
    assert!(parse.ok(), "{:?}", parse.errors());

    let stmts = first_fn("fn f() { if a {} match b { _ => {} } loop {} x }")
        .body()
        .and_then(|body| body.stmt_list())
        .unwrap();
    assert_eq!(stmts.statements().count(), 3);
    assert!(matches!(stmts.tail_expr(), Some(ast::Expr::PathExpr(_))));
}

#[test]
fn missing_semicolon_is_reported() {
    let parse = parse("fn f() { a b }");
    let errors: Vec<_> = parse.errors().iter().map(|e| (e.range(), e.message())).collect();
    assert_eq!(errors, [(range(11, 12), "expected `;`")]);
}

#[test]
fn match_arms() {
    let ast::Expr::MatchExpr(match_expr) =
        tail_expr("fn f() { match x { A => 1, B if y => {} C => 2 } }")
    else {
        panic!("expected a match expression");
    };
    let arms: Vec<_> = match_expr.match_arm_list().unwrap().arms().collect();
    assert_eq!(arms.len(), 3);
    assert!(arms[1].guard().is_some());
}

#[test]
fn stray_tokens_end_up_in_error_nodes() {
    let parse = parse("fn f() {} ) struct S;");
    assert_eq!(parse.errors().len(), 1);
    assert_eq!(parse.syntax_node().text(), "fn f() {} ) struct S;");
    assert!(parse.syntax_node().children().any(|node| node.kind() == SyntaxKind::ERROR));
    assert_eq!(parse.tree().items().count(), 2);
}

#[test]
fn unterminated_string_keeps_the_text() {
    let parse = parse("fn f() { \"abc }");
    assert!(parse.errors().iter().any(|e| e.kind() == SyntaxErrorKind::UnterminatedConstruct));
    assert_eq!(parse.syntax_node().text(), "fn f() { \"abc }");
}

#[test]
fn renaming_a_function_reuses_its_siblings() {
    let old = parse("fn f() {}");
    let new = check_reparse("fn f() {}", range(3, 4), "g");
    assert!(new.errors().is_empty());

    let old_fn = old.tree().syntax().descendants().find_map(ast::Fn::cast).unwrap();
    let new_fn = new.tree().syntax().descendants().find_map(ast::Fn::cast).unwrap();
    assert_eq!(new_fn.name().unwrap().text(), "g");

    let old_params = old_fn.param_list().unwrap();
    let new_params = new_fn.param_list().unwrap();
    assert!(old_params.syntax().green().ptr_eq(new_params.syntax().green()));

    let old_body = old_fn.body().unwrap();
    let new_body = new_fn.body().unwrap();
    assert!(old_body.syntax().green().ptr_eq(new_body.syntax().green()));
}

#[test]
fn editing_a_body_reuses_other_items() {
    let text = "fn a() { 1 }\nfn b() { 2 }";
    let old = parse(text);
    let new = check_reparse(text, range(9, 10), "1 + 1");

    let old_b = old.tree().items().nth(1).unwrap();
    let new_b = new.tree().items().nth(1).unwrap();
    assert!(old_b.syntax().green().ptr_eq(new_b.syntax().green()));
}

#[test]
fn reparse_keeps_and_shifts_errors_outside_of_the_edit() {
    let new = check_reparse("fn a() { 1 }\nfn b( {}", range(9, 10), "22");
    assert_eq!(new.errors().len(), 1);
    assert_eq!(new.errors()[0].range(), range(20, 21));
}

#[test]
fn reparse_fixes_errors_inside_the_edit() {
    let new = check_reparse("fn f() { let x = ; }", range(16, 16), "1");
    assert!(new.ok(), "{:?}", new.errors());
}

#[test]
fn reparse_falls_back_when_braces_change() {
    check_reparse("fn f() { 1 }\nfn g() {}", range(11, 12), "");
    check_reparse("fn f() { 1 }", range(9, 9), "{");
    check_reparse("fn f() {}", range(3, 4), "fn");
}

#[test]
fn reparse_of_whitespace_and_comments() {
    check_reparse("fn f() {  }", range(8, 9), "");
    check_reparse("// a\nfn f() {}", range(3, 4), "bc");
    check_reparse("// a\nfn f() {}", range(4, 5), "\n\n");
    check_reparse("// a\nfn f() {}", range(2, 2), "!");
}

#[test]
fn reparser_rejects_unbalanced_fragments() {
    assert!(Reparser::StmtList.parse("{ 1 }").is_some());
    assert!(Reparser::StmtList.parse("{ 1 } }").is_none());
    assert!(Reparser::StmtList.parse("{ 1 }{}").is_none());
    assert!(Reparser::StmtList.parse(" { 1 }").is_none());
    assert!(Reparser::RecordFieldList.parse("{ a: i32, b: u8 }").is_some());
    assert!(Reparser::UseTreeList.parse("{ a, b::{c, d} }").is_some());
    assert_eq!(Reparser::for_node(SyntaxKind::MATCH_ARM_LIST), Some(Reparser::MatchArmList));
    assert_eq!(Reparser::for_node(SyntaxKind::FN), None);
}

#[test]
fn fn_modifiers_in_any_order() {
    for text in [
        "unsafe const fn f() {}",
        "async const fn f() {}",
        "const const fn f() {}",
        "fn f() { unsafe async fn g() {} }",
    ] {
        let parse = parse(text);
        assert_eq!(parse.syntax_node().text(), text);
        assert!(
            parse.syntax_node().descendants().any(|node| node.kind() == SyntaxKind::FN),
            "no function in {text:?}"
        );
        assert_eq!(parse.errors().len(), 1, "{text:?}: {:?}", parse.errors());
    }
    assert!(parse("const async unsafe fn f() {}").ok());
}

#[test]
fn closing_a_block_at_the_end_of_the_file() {
    let new = check_reparse("fn f() { a", range(10, 10), " }");
    assert!(new.ok(), "{:?}", new.errors());

    check_reparse("{{fn", range(2, 4), "}");
    check_reparse("fn f() { { 1 }", range(14, 14), "}");
}

#[test]
fn deep_nesting_is_cut_off() {
    let deep = |open: &str, close: &str| {
        format!("{}x{}", open.repeat(1_500), close.repeat(1_500))
    };
    let texts = [
        format!("fn f() {{ {} }}", deep("(", ")")),
        format!("fn f() {{ {} }}", deep("[", "]")),
        format!("fn f() {{ {} }}", deep("{", "}")),
        format!("fn f() {{ {} }}", deep("!", "")),
        format!("fn f() {{ {}", "(".repeat(1_500)),
        format!("fn f(x: {}) {{}}", deep("[", "]")),
        format!("fn f() {{ let {} = 1; }}", deep("(", ")")),
        format!("{} {}", "mod m {".repeat(1_500), "}".repeat(1_500)),
    ];

    for text in texts {
        let parse = parse(&text);
        assert_eq!(parse.syntax_node().text(), text);
        assert!(
            parse.errors().iter().any(|error| error.message() == "nesting is too deep"),
            "{:?}",
            parse.errors()
        );
    }
}

#[test]
fn moderate_nesting_parses_cleanly() {
    let text = format!("fn f() {{ {}1{} }}", "(".repeat(40), ")".repeat(40));
    assert!(parse(&text).ok());
    check_reparse(&text, range(9, 9), "{ 2 }; ");
}

#[test]
fn lexer_errors_keep_their_kind() {
    let errors = |text: &str| {
        parse(text).errors().iter().map(|error| (error.kind(), error.range())).collect::<Vec<_>>()
    };

    assert_eq!(errors("/* open"), [(SyntaxErrorKind::UnterminatedConstruct, range(0, 7))]);
    assert!(errors("fn f() { r##x; }").contains(&(SyntaxErrorKind::UnexpectedToken, range(9, 12))));
}

#[test]
fn block_conditions_are_not_bodies() {
    let ast::Expr::IfExpr(if_expr) = tail_expr("fn f() { if { c } { 1 } }") else {
        panic!("expected an if expression");
    };
    assert_eq!(if_expr.condition().unwrap().syntax().text(), "{ c }");
    assert_eq!(if_expr.then_branch().unwrap().syntax().text(), "{ 1 }");

    let ast::Expr::WhileExpr(while_expr) = tail_expr("fn f() { while { c } { 2 } }") else {
        panic!("expected a while loop");
    };
    assert_eq!(while_expr.loop_body().unwrap().syntax().text(), "{ 2 }");

    let ast::Expr::ForExpr(for_expr) = tail_expr("fn f() { for x in { v } { 3 } }") else {
        panic!("expected a for loop");
    };
    assert_eq!(for_expr.iterable().unwrap().syntax().text(), "{ v }");
    assert_eq!(for_expr.loop_body().unwrap().syntax().text(), "{ 3 }");

    let ast::Expr::IfExpr(missing) = tail_expr("fn f() { if { c } }") else {
        panic!("expected an if expression");
    };
    assert!(missing.then_branch().is_none());
}

#[test]
fn identical_subtrees_share_one_allocation() {
    let a = first_fn("fn a(x: u8) { x + 1 }");
    let b = first_fn("struct S;\n\nfn b(x: u8) { x + 1 }");

    let params = |f: &ast::Fn| f.param_list().unwrap().syntax().green().clone();
    let body = |f: &ast::Fn| f.body().unwrap().syntax().green().clone();
    assert!(params(&a).ptr_eq(&params(&b)));
    assert!(body(&a).ptr_eq(&body(&b)));
    assert!(!a.syntax().green().ptr_eq(b.syntax().green()));
}
