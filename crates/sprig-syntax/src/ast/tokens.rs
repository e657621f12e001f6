use crate::ast::AstToken;
use crate::{SyntaxKind, SyntaxToken};

macro_rules! ast_token {
    ($($name:ident => $kind:ident,)*) => {
        $(
            #[derive(Debug, Clone, PartialEq, Eq, Hash)]
            pub struct $name(SyntaxToken);

            impl AstToken for $name {
                fn can_cast(kind: SyntaxKind) -> bool {
                    kind == SyntaxKind::$kind
                }

                fn cast(syntax: SyntaxToken) -> Option<Self> {
                    Self::can_cast(syntax.kind()).then(|| Self(syntax))
                }

                fn syntax(&self) -> &SyntaxToken {
                    &self.0
                }
            }
        )*
    };
}

ast_token! {
    Comment => COMMENT,
    Ident => IDENT,
    IntNumber => INT_NUMBER,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommentShape {
    Line,
    Block,
}

impl Comment {
    pub fn shape(&self) -> CommentShape {
        if self.text().starts_with("/*") { CommentShape::Block } else { CommentShape::Line }
    }

    /// `///`, `//!`, `/**` and `/*!` comments. `////` and `/***` are not doc.
    pub fn is_doc(&self) -> bool {
        let text = self.text();
        let outer = |prefix: &str, fourth: char| {
            text.strip_prefix(prefix).is_some_and(|rest| !rest.starts_with(fourth))
        };
        outer("///", '/')
            || (outer("/**", '*') && text != "/**/")
            || text.starts_with("//!")
            || text.starts_with("/*!")
    }

    /// The comment text without its delimiters.
    pub fn body(&self) -> &str {
        let text = self.text();
        match self.shape() {
            CommentShape::Line => text.trim_start_matches('/').trim_start_matches('!'),
            CommentShape::Block => {
                let text = text.strip_prefix("/*").unwrap_or(text);
                text.strip_suffix("*/").unwrap_or(text)
            }
        }
    }
}

impl Ident {
    /// The identifier with a leading `r#` removed.
    pub fn unraw(&self) -> &str {
        self.text().strip_prefix("r#").unwrap_or(self.text())
    }
}

impl IntNumber {
    pub fn radix(&self) -> u32 {
        match self.text().get(..2) {
            Some("0x") => 16,
            Some("0o") => 8,
            Some("0b") => 2,
            _ => 10,
        }
    }

    /// The numeric value, ignoring `_` separators and any type suffix.
    pub fn value(&self) -> Option<u128> {
        let radix = self.radix();
        let digits = if radix == 10 { self.text() } else { &self.text()[2..] };
        let digits: String = digits
            .chars()
            .take_while(|c| *c == '_' || c.is_digit(radix))
            .filter(|c| *c != '_')
            .collect();
        u128::from_str_radix(&digits, radix).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::{Comment, CommentShape, Ident, IntNumber};
    use crate::ast::AstToken as _;
    use crate::{Builder, NodeCache, SyntaxKind, SyntaxNode, SyntaxToken};

    fn token(kind: SyntaxKind, text: &str) -> SyntaxToken {
        let cache = NodeCache::new();
        let mut builder = Builder::with_cache(&cache);
        builder.start_node(SyntaxKind::SOURCE_FILE);
        builder.token(kind, text);
        builder.finish_node();
        SyntaxNode::new_root(builder.finish()).first_token().unwrap()
    }

    #[test]
    fn int_values() {
        let hex = IntNumber::cast(token(SyntaxKind::INT_NUMBER, "0xff_u8")).unwrap();
        assert_eq!(hex.radix(), 16);
        assert_eq!(hex.value(), Some(255));

        let decimal = IntNumber::cast(token(SyntaxKind::INT_NUMBER, "1_000usize")).unwrap();
        assert_eq!(decimal.value(), Some(1000));
    }

    #[test]
    fn comments() {
        let doc = Comment::cast(token(SyntaxKind::COMMENT, "/// docs")).unwrap();
        assert!(doc.is_doc());
        assert_eq!(doc.shape(), CommentShape::Line);
        assert_eq!(doc.body(), " docs");

        let block = Comment::cast(token(SyntaxKind::COMMENT, "/* x */")).unwrap();
        assert!(!block.is_doc());
        assert_eq!(block.body(), " x ");

        assert!(!Comment::cast(token(SyntaxKind::COMMENT, "//// rule")).unwrap().is_doc());
    }

    #[test]
    fn raw_identifiers() {
        let raw = Ident::cast(token(SyntaxKind::IDENT, "r#match")).unwrap();
        assert_eq!(raw.unraw(), "match");
        assert!(Ident::cast(token(SyntaxKind::WHITESPACE, " ")).is_none());
    }
}
