use crate::GrammarError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TokenKind {
    /// A rule name or a label.
    Ident(String),
    /// Contents of a `'...'` literal with escapes resolved.
    Literal(String),
    Eq,
    Colon,
    Pipe,
    Star,
    QuestionMark,
    LeftParen,
    RightParen,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Token {
    pub(crate) kind: TokenKind,
    pub(crate) offset: usize,
}

/// Splits grammar text into tokens, dropping whitespace and `//` comments.
pub(crate) fn tokenize(text: &str) -> Result<Vec<Token>, GrammarError> {
    let mut tokens = Vec::new();
    let mut chars = text.char_indices().peekable();

    while let Some((offset, c)) = chars.next() {
        let kind = match c {
            c if c.is_whitespace() => continue,
            '/' if chars.next_if(|&(_, c)| c == '/').is_some() => {
                while chars.next_if(|&(_, c)| c != '\n').is_some() {}
                continue;
            }
            '=' => TokenKind::Eq,
            ':' => TokenKind::Colon,
            '|' => TokenKind::Pipe,
            '*' => TokenKind::Star,
            '?' => TokenKind::QuestionMark,
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            '\'' => {
                let mut literal = String::new();
                loop {
                    match chars.next() {
                        Some((_, '\'')) => break,
                        Some((_, '\\')) => match chars.next() {
                            Some((_, c @ ('\'' | '\\'))) => literal.push(c),
                            Some((offset, ch)) => {
                                return Err(GrammarError::UnexpectedChar { ch, offset });
                            }
                            None => return Err(GrammarError::UnterminatedLiteral { offset }),
                        },
                        Some((_, c)) => literal.push(c),
                        None => return Err(GrammarError::UnterminatedLiteral { offset }),
                    }
                }
                TokenKind::Literal(literal)
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let mut ident = String::from(c);
                while let Some((_, c)) = chars.next_if(|&(_, c)| c.is_ascii_alphanumeric() || c == '_')
                {
                    ident.push(c);
                }
                TokenKind::Ident(ident)
            }
            ch => return Err(GrammarError::UnexpectedChar { ch, offset }),
        };
        tokens.push(Token { kind, offset });
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::{TokenKind, tokenize};
    use crate::GrammarError;

    #[test]
    fn tokens_and_comments() {
        let tokens = tokenize("// doc\nA = label:B 'x'* | ('\\'')?").unwrap();
        let kinds: Vec<TokenKind> = tokens.into_iter().map(|token| token.kind).collect();
        assert_eq!(
            kinds,
            [
                TokenKind::Ident("A".into()),
                TokenKind::Eq,
                TokenKind::Ident("label".into()),
                TokenKind::Colon,
                TokenKind::Ident("B".into()),
                TokenKind::Literal("x".into()),
                TokenKind::Star,
                TokenKind::Pipe,
                TokenKind::LeftParen,
                TokenKind::Literal("'".into()),
                TokenKind::RightParen,
                TokenKind::QuestionMark,
            ]
        );
    }

    #[test]
    fn errors_carry_offsets() {
        assert_eq!(tokenize("A = 'abc"), Err(GrammarError::UnterminatedLiteral { offset: 4 }));
        assert_eq!(tokenize("A = B;"), Err(GrammarError::UnexpectedChar { ch: ';', offset: 5 }));
    }
}
