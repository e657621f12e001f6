//! Lexer for the Rust subset understood by sprig.
//!
//! The token stream is lossless: trivia are ordinary tokens and every byte of
//! the input belongs to exactly one token. Punctuation is always emitted one
//! character at a time; the parser glues adjacent pieces into `::`, `>>=`
//! and friends, which is what lets `Vec<Vec<T>>` close two generic lists.

mod cursor;

use cursor::{Cursor, EOF_CHAR};
pub use sprig_syntax::{SyntaxErrorKind, SyntaxKind};
use sprig_syntax::SyntaxKind::*;
use text_size::{TextRange, TextSize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'text> {
    pub kind: SyntaxKind,
    pub text: &'text str,
    pub offset: TextSize,
    /// Set when the token is malformed, e.g. an unterminated string.
    pub error: Option<LexError>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexError {
    pub kind: SyntaxErrorKind,
    pub message: &'static str,
}

impl Token<'_> {
    pub fn range(&self) -> TextRange {
        TextRange::at(self.offset, TextSize::of(self.text))
    }
}

pub struct Tokenizer<'text> {
    text: &'text str,
    cursor: Cursor<'text>,
    error: Option<LexError>,
    finished: bool,
}

impl<'text> Tokenizer<'text> {
    pub fn new(text: &'text str) -> Self {
        Self { text, cursor: Cursor::new(text), error: None, finished: false }
    }

    fn unexpected(&mut self, message: &'static str) {
        self.error = Some(LexError { kind: SyntaxErrorKind::UnexpectedToken, message });
    }

    fn unterminated(&mut self, message: &'static str) {
        self.error = Some(LexError { kind: SyntaxErrorKind::UnterminatedConstruct, message });
    }

    fn offset(&self) -> TextSize {
        TextSize::of(self.text) - self.cursor.len()
    }

    fn range(&self) -> TextRange {
        let end = self.offset();
        TextRange::new(end - self.cursor.pos_within_token(), end)
    }

    fn text(&self) -> &'text str {
        &self.text[self.range()]
    }

    /// Produces the next token. Once the input is exhausted this keeps
    /// returning an empty `EOF` token.
    pub fn next_token(&mut self) -> Token<'text> {
        self.error = None;
        let kind = self.syntax_kind();
        let token =
            Token { kind, text: self.text(), offset: self.range().start(), error: self.error };
        self.cursor.reset_pos_within_token();
        token
    }

    fn syntax_kind(&mut self) -> SyntaxKind {
        if self.cursor.is_eof() {
            return EOF;
        }

        match self.cursor.advance() {
            c if c.is_whitespace() => {
                self.cursor.advance_while(char::is_whitespace);
                WHITESPACE
            }
            '/' if self.cursor.matches('/') => {
                self.cursor.advance_while(|c| c != '\n');
                COMMENT
            }
            '/' if self.cursor.matches('*') => self.block_comment(),

            'r' if self.cursor.matches('#') && is_ident_start(self.cursor.second()) => {
                self.cursor.advance();
                self.cursor.advance_while(is_ident_continue);
                IDENT
            }
            'r' if self.cursor.matches('"') || self.cursor.matches('#') => {
                self.raw_string();
                STRING
            }
            'b' if self.cursor.matches('\'') => {
                self.cursor.advance();
                self.quoted('\'', "unterminated byte literal");
                BYTE
            }
            'b' if self.cursor.matches('"') => {
                self.cursor.advance();
                self.quoted('"', "unterminated byte string literal");
                BYTE_STRING
            }
            'b' if self.cursor.matches('r')
                && (self.cursor.second() == '"' || self.cursor.second() == '#') =>
            {
                self.cursor.advance();
                self.raw_string();
                BYTE_STRING
            }
            c if is_ident_start(c) => {
                self.cursor.advance_while(is_ident_continue);
                match self.text() {
                    "_" => UNDERSCORE,
                    text => SyntaxKind::from_keyword(text).unwrap_or(IDENT),
                }
            }

            c @ '0'..='9' => {
                let kind = self.number(c);
                self.suffix();
                kind
            }

            '\'' => self.lifetime_or_char(),
            '"' => {
                self.quoted('"', "unterminated string literal");
                STRING
            }

            ';' => SEMICOLON,
            ',' => COMMA,
            '(' => LEFT_PAREN,
            ')' => RIGHT_PAREN,
            '{' => LEFT_BRACE,
            '}' => RIGHT_BRACE,
            '[' => LEFT_BRACKET,
            ']' => RIGHT_BRACKET,
            '<' => LEFT_ANGLE,
            '>' => RIGHT_ANGLE,
            '@' => AT,
            '#' => POUND,
            '~' => TILDE,
            '?' => QUESTION,
            '$' => DOLLAR,
            '&' => AMP,
            '|' => PIPE,
            '+' => PLUS,
            '*' => STAR,
            '/' => SLASH,
            '^' => CARET,
            '%' => PERCENT,
            '.' => DOT,
            ':' => COLON,
            '=' => EQ,
            '!' => BANG,
            '-' => MINUS,

            _ => {
                self.unexpected("unknown character");
                ERROR
            }
        }
    }

    fn block_comment(&mut self) -> SyntaxKind {
        self.cursor.advance();
        let mut depth = 1usize;
        while depth > 0 {
            match self.cursor.advance() {
                '/' if self.cursor.matches('*') => {
                    self.cursor.advance();
                    depth += 1;
                }
                '*' if self.cursor.matches('/') => {
                    self.cursor.advance();
                    depth -= 1;
                }
                EOF_CHAR if self.cursor.is_eof() => {
                    self.unterminated("unterminated block comment");
                    break;
                }
                _ => {}
            }
        }
        COMMENT
    }

    /// Body of a `'`- or `"`-delimited literal; the opening quote is consumed.
    fn quoted(&mut self, quote: char, unterminated: &'static str) {
        loop {
            if self.cursor.is_eof() {
                self.unterminated(unterminated);
                return;
            }
            match self.cursor.advance() {
                '\\' => {
                    self.cursor.advance();
                }
                c if c == quote => return,
                '\n' if quote == '\'' => {
                    self.unterminated(unterminated);
                    return;
                }
                _ => {}
            }
        }
    }

    /// `r#"..."#` with any number of fences; the `r` is consumed.
    fn raw_string(&mut self) {
        let mut hashes = 0usize;
        while self.cursor.eat('#') {
            hashes += 1;
        }
        if !self.cursor.eat('"') {
            self.unexpected("expected `\"` in raw string literal");
            return;
        }

        loop {
            if self.cursor.is_eof() {
                self.unterminated("unterminated raw string literal");
                return;
            }
            if self.cursor.advance() == '"' {
                let mut closing = 0;
                while closing < hashes && self.cursor.eat('#') {
                    closing += 1;
                }
                if closing == hashes {
                    return;
                }
            }
        }
    }

    /// `'a` is a lifetime, `'a'` and `'\n'` are characters.
    fn lifetime_or_char(&mut self) -> SyntaxKind {
        if is_ident_start(self.cursor.peek()) && self.cursor.second() != '\'' {
            self.cursor.advance_while(is_ident_continue);
            return LIFETIME_IDENT;
        }
        self.quoted('\'', "unterminated character literal");
        CHAR
    }

    fn number(&mut self, first: char) -> SyntaxKind {
        if first == '0' {
            match self.cursor.peek() {
                'b' | 'o' => {
                    self.cursor.advance();
                    self.digits(false);
                    return INT_NUMBER;
                }
                'x' => {
                    self.cursor.advance();
                    self.digits(true);
                    return INT_NUMBER;
                }
                _ => {}
            }
        }
        self.digits(false);

        // `1..2` and `1.foo()` keep the integer on its own.
        if self.cursor.matches('.')
            && self.cursor.second() != '.'
            && !is_ident_start(self.cursor.second())
        {
            self.cursor.advance();
            if self.cursor.peek().is_ascii_digit() {
                self.digits(false);
                self.exponent();
            }
            return FLOAT_NUMBER;
        }

        if self.exponent() { FLOAT_NUMBER } else { INT_NUMBER }
    }

    fn digits(&mut self, allow_hex: bool) {
        loop {
            match self.cursor.peek() {
                '_' | '0'..='9' => {
                    self.cursor.advance();
                }
                'a'..='f' | 'A'..='F' if allow_hex => {
                    self.cursor.advance();
                }
                _ => return,
            }
        }
    }

    fn exponent(&mut self) -> bool {
        if !(self.cursor.matches('e') || self.cursor.matches('E')) {
            return false;
        }
        let signed = matches!(self.cursor.second(), '+' | '-');
        let digit = if signed { self.cursor.third() } else { self.cursor.second() };
        if !digit.is_ascii_digit() {
            return false;
        }

        self.cursor.advance();
        if signed {
            self.cursor.advance();
        }
        self.digits(false);
        true
    }

    /// Type suffix such as `u8` or `f64`.
    fn suffix(&mut self) {
        if is_ident_start(self.cursor.peek()) {
            self.cursor.advance_while(is_ident_continue);
        }
    }
}

impl<'text> Iterator for Tokenizer<'text> {
    type Item = Token<'text>;

    /// Yields every token, then one final `EOF`.
    fn next(&mut self) -> Option<Token<'text>> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        self.finished = token.kind == EOF;
        Some(token)
    }
}

/// Lexes all of `text`. The last token is always `EOF`.
pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    Tokenizer::new(text).collect()
}

fn is_ident_start(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}

fn is_ident_continue(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str) -> Vec<(SyntaxKind, &str)> {
        tokenize(text)
            .into_iter()
            .filter(|token| token.kind != EOF)
            .map(|token| (token.kind, token.text))
            .collect()
    }

    #[test]
    fn test_integer_literals() {
        let inputs = ["123", "0", "0b1010", "0o755", "0x1f", "123_456", "7u8", "0xffusize"];

        for input in inputs {
            assert_eq!(kinds(input), [(INT_NUMBER, input)], "Input: '{input}'");
        }
    }

    #[test]
    fn test_float_literals() {
        let inputs = ["123.456", "0.0", "1e10", "1.0e-5", "123_456.789_012", "2.", "1f64"];

        for input in inputs {
            let expected = if input == "1f64" { INT_NUMBER } else { FLOAT_NUMBER };
            assert_eq!(kinds(input), [(expected, input)], "Input: '{input}'");
        }
    }

    #[test]
    fn test_numbers_before_dots() {
        assert_eq!(kinds("1..2"), [(INT_NUMBER, "1"), (DOT, "."), (DOT, "."), (INT_NUMBER, "2")]);
        assert_eq!(kinds("1.max"), [(INT_NUMBER, "1"), (DOT, "."), (IDENT, "max")]);
    }

    #[test]
    fn test_punctuation_is_single_char() {
        assert_eq!(
            kinds("a::b>>=c"),
            [
                (IDENT, "a"),
                (COLON, ":"),
                (COLON, ":"),
                (IDENT, "b"),
                (RIGHT_ANGLE, ">"),
                (RIGHT_ANGLE, ">"),
                (EQ, "="),
                (IDENT, "c"),
            ]
        );
    }

    #[test]
    fn test_keywords_and_identifiers() {
        assert_eq!(
            kinds("fn Self _ _x r#fn"),
            [
                (FN_KW, "fn"),
                (WHITESPACE, " "),
                (SELF_TYPE_KW, "Self"),
                (WHITESPACE, " "),
                (UNDERSCORE, "_"),
                (WHITESPACE, " "),
                (IDENT, "_x"),
                (WHITESPACE, " "),
                (IDENT, "r#fn"),
            ]
        );
    }

    #[test]
    fn test_lifetimes_and_chars() {
        assert_eq!(
            kinds("'a 'b' '\\n'"),
            [
                (LIFETIME_IDENT, "'a"),
                (WHITESPACE, " "),
                (CHAR, "'b'"),
                (WHITESPACE, " "),
                (CHAR, "'\\n'"),
            ]
        );
    }

    #[test]
    fn test_strings() {
        assert_eq!(kinds(r#""a\"b""#), [(STRING, r#""a\"b""#)]);
        assert_eq!(kinds(r###"r#"x"y"#"###), [(STRING, r###"r#"x"y"#"###)]);
        assert_eq!(kinds(r#"b"xy" b'z'"#), [
            (BYTE_STRING, r#"b"xy""#),
            (WHITESPACE, " "),
            (BYTE, "b'z'"),
        ]);
    }

    #[test]
    fn test_comments() {
        assert_eq!(
            kinds("// line\n/* a /* nested */ b */x"),
            [
                (COMMENT, "// line"),
                (WHITESPACE, "\n"),
                (COMMENT, "/* a /* nested */ b */"),
                (IDENT, "x"),
            ]
        );
    }

    #[test]
    fn test_errors_are_tokens() {
        let error = |text| tokenize(text)[0].error.map(|error| (error.kind, error.message));

        assert_eq!(tokenize("\"open")[0].kind, STRING);
        assert_eq!(
            error("\"open"),
            Some((SyntaxErrorKind::UnterminatedConstruct, "unterminated string literal"))
        );

        let tokens = tokenize("a € b");
        assert_eq!(tokens[2].kind, ERROR);
        assert_eq!(tokens[2].text, "€");
        assert_eq!(error("€"), Some((SyntaxErrorKind::UnexpectedToken, "unknown character")));

        assert_eq!(
            error("r##x"),
            Some((SyntaxErrorKind::UnexpectedToken, "expected `\"` in raw string literal"))
        );
        assert_eq!(
            error("/* open"),
            Some((SyntaxErrorKind::UnterminatedConstruct, "unterminated block comment"))
        );
        assert_eq!(error("'a'"), None);
    }

    #[test]
    fn test_lossless_with_offsets() {
        let text = "fn main() {\n    let x = 'a';\n}\n";
        let tokens = tokenize(text);
        assert_eq!(tokens.last().map(|token| token.kind), Some(EOF));

        let mut offset = TextSize::new(0);
        let mut rebuilt = String::new();
        for token in &tokens {
            assert_eq!(token.offset, offset);
            offset += TextSize::of(token.text);
            rebuilt.push_str(token.text);
        }
        assert_eq!(rebuilt, text);
    }
}
