use proptest::prelude::*;
use sprig_parse::{parse, reparse};
use sprig_syntax::{Indel, TextRange, TextSize};

const PIECES: &[&str] = &[
    "fn", "struct", "enum", "impl", "trait", "mod", "use", "let", "if", "else", "match", "while",
    "for", "in", "loop", "return", "pub", "const", "async", "unsafe", "static", "type", "where",
    "mut", "ref", "move", "dyn", "as", "break", "continue", "self", "Self", "crate", "super",
    "r#x", "x", "foo", "S", "_", "1", "0x1f", "2.5", "\"s\"", "\"open", "b'a'", "'c'", "'a",
    "(", ")", "{", "}", "[", "]", "<", ">", ",", ";", ":", "::", ".", "..", "=", "==", "=>",
    "->", "+", "-", "*", "/", "%", "^", "&", "&&", "|", "||", "!", "?", "#", "@", "~",
    "// c\n", "/// d\n", "//! i\n", "/* b */", "/* open", " ", "\n", "\n\n",
];

fn piece() -> impl Strategy<Value = &'static str> {
    prop::sample::select(PIECES)
}

fn token_soup() -> impl Strategy<Value = String> {
    prop::collection::vec((piece(), prop::sample::select(&["", " ", "\n"][..])), 0..48)
        .prop_map(|pieces| pieces.into_iter().flat_map(|(piece, sep)| [piece, sep]).collect())
}

/// A source text together with an edit that lies in bounds.
fn edited_soup() -> impl Strategy<Value = (String, Indel)> {
    (token_soup(), any::<prop::sample::Index>(), 0..6usize, prop::collection::vec(piece(), 0..3))
        .prop_map(|(text, at, len, insert)| {
            let start = at.index(text.len() + 1);
            let end = (start + len).min(text.len());
            let delete = TextRange::new(
                TextSize::new(start as u32),
                TextSize::new(end as u32),
            );
            (text, Indel::replace(delete, insert.concat()))
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1024))]

    #[test]
    fn parsing_is_lossless(text in token_soup()) {
        let parse = parse(&text);
        prop_assert_eq!(parse.syntax_node().text(), text);
    }

    #[test]
    fn arbitrary_bytes_parse(text in "\\PC{0,64}") {
        let parse = parse(&text);
        prop_assert_eq!(parse.syntax_node().text(), text);
    }

    #[test]
    fn errors_lie_within_the_text(text in token_soup()) {
        let parse = parse(&text);
        let range = parse.syntax_node().text_range();
        for error in parse.errors() {
            prop_assert!(range.contains_range(error.range()), "{:?} outside of {:?}", error, range);
        }
    }

    #[test]
    fn reparse_matches_a_fresh_parse((text, edit) in edited_soup()) {
        let old = parse(&text);
        let new = reparse(&old, &edit);

        let mut after = text.clone();
        edit.apply(&mut after);
        prop_assert_eq!(new.syntax_node().text(), after.clone());
        prop_assert_eq!(new, parse(&after));
    }

    #[test]
    fn closing_blocks_at_the_end_match_a_fresh_parse(
        text in token_soup(),
        closing in "[ }\\n]{1,4}",
    ) {
        let old = parse(&text);
        let edit = Indel::insert(TextSize::of(text.as_str()), closing);
        let new = reparse(&old, &edit);

        let mut after = text.clone();
        edit.apply(&mut after);
        prop_assert_eq!(new, parse(&after));
    }
}
