use sprig_grammar::{Grammar, MissingKind, generate_nodes, lower};
use sprig_syntax::{GRAMMAR, SyntaxKind};

fn grammar() -> Grammar {
    GRAMMAR.parse().unwrap()
}

#[test]
fn every_rule_and_terminal_has_a_kind() {
    let missing = grammar().check_kinds(
        |name| SyntaxKind::from_rule_name(name).is_some(),
        |spelling| SyntaxKind::from_spelling(spelling).is_some(),
    );
    assert_eq!(missing, Vec::<MissingKind>::new());
}

#[test]
fn terminal_names_agree_with_the_kind_table() {
    let grammar = grammar();
    for token in grammar.tokens() {
        let spelling = grammar.token_name(token);
        let kind = SyntaxKind::from_spelling(spelling).unwrap();
        assert_eq!(sprig_grammar::token_kind_name(spelling).as_deref(), Some(kind.name()), "{spelling}");
    }
}

#[test]
fn generated_nodes_are_fresh() {
    let actual = generate_nodes(&lower(&grammar()));
    let expected = include_str!("../src/ast/generated.rs");
    assert!(
        actual == expected,
        "src/ast/generated.rs is stale, regenerate it with `sprig grammar crates/sprig-syntax/rust.ungram --codegen`"
    );
}
