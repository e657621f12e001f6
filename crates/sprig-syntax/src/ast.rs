//! Typed wrappers around the untyped syntax tree.
//!
//! Every grammar rule gets a wrapper: plain rules become structs with one
//! accessor per field, top-level alternations become enums. Accessors never
//! panic: a field that error recovery left out is simply `None`.

use std::marker::PhantomData;

use crate::{SyntaxKind, SyntaxNode, SyntaxNodeChildren, SyntaxToken};

/// Declares node wrappers. This is the shape emitted by
/// `sprig_grammar::codegen`.
macro_rules! ast_node {
    (@field $field:ident child $ty:ident) => {
        pub fn $field(&self) -> Option<$ty> {
            support::child(self.syntax())
        }
    };
    (@field $field:ident children $ty:ident) => {
        pub fn $field(&self) -> AstChildren<$ty> {
            support::children(self.syntax())
        }
    };
    (@field $field:ident token $kind:ident) => {
        pub fn $field(&self) -> Option<SyntaxToken> {
            support::token(self.syntax(), SyntaxKind::$kind)
        }
    };
    ($($name:ident => $kind:ident { $($field:ident : $card:ident $ty:ident),* $(,)? })*) => {
        $(
            #[derive(Debug, Clone, PartialEq, Eq, Hash)]
            pub struct $name(SyntaxNode);

            impl $name {
                $(ast_node!(@field $field $card $ty);)*
            }

            impl AstNode for $name {
                fn can_cast(kind: SyntaxKind) -> bool {
                    kind == SyntaxKind::$kind
                }

                fn cast(syntax: SyntaxNode) -> Option<Self> {
                    Self::can_cast(syntax.kind()).then(|| Self(syntax))
                }

                fn syntax(&self) -> &SyntaxNode {
                    &self.0
                }
            }
        )*
    };
}

/// Declares sum types over node wrappers.
macro_rules! ast_enum {
    ($($name:ident { $($variant:ident),* $(,)? })*) => {
        $(
            #[derive(Debug, Clone, PartialEq, Eq, Hash)]
            pub enum $name {
                $($variant($variant),)*
            }

            impl AstNode for $name {
                fn can_cast(kind: SyntaxKind) -> bool {
                    $(<$variant as AstNode>::can_cast(kind))||*
                }

                fn cast(syntax: SyntaxNode) -> Option<Self> {
                    let kind = syntax.kind();
                    $(
                        if <$variant as AstNode>::can_cast(kind) {
                            return <$variant as AstNode>::cast(syntax).map(Self::$variant);
                        }
                    )*
                    None
                }

                fn syntax(&self) -> &SyntaxNode {
                    match self {
                        $(Self::$variant(it) => it.syntax(),)*
                    }
                }
            }

            $(
                impl From<$variant> for $name {
                    fn from(node: $variant) -> Self {
                        Self::$variant(node)
                    }
                }
            )*
        )*
    };
}

mod ext;
mod generated;
mod tokens;

pub use ext::{ArithOp, BinaryOp, ElseBranch, LiteralKind, RangeOp, UnaryOp};
pub use generated::*;
pub use tokens::{Comment, CommentShape, Ident, IntNumber};

/// A typed view of a [`SyntaxNode`] of one or more kinds.
pub trait AstNode {
    fn can_cast(kind: SyntaxKind) -> bool
    where
        Self: Sized;

    fn cast(syntax: SyntaxNode) -> Option<Self>
    where
        Self: Sized;

    fn syntax(&self) -> &SyntaxNode;
}

/// A typed view of a [`SyntaxToken`].
pub trait AstToken {
    fn can_cast(kind: SyntaxKind) -> bool
    where
        Self: Sized;

    fn cast(syntax: SyntaxToken) -> Option<Self>
    where
        Self: Sized;

    fn syntax(&self) -> &SyntaxToken;

    fn text(&self) -> &str {
        self.syntax().text()
    }
}

/// Lazy iterator over the children of a node that cast to `N`.
pub struct AstChildren<N> {
    inner: SyntaxNodeChildren,
    _ty: PhantomData<N>,
}

impl<N> AstChildren<N> {
    fn new(parent: &SyntaxNode) -> Self {
        Self { inner: parent.children(), _ty: PhantomData }
    }
}

impl<N> Clone for AstChildren<N> {
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone(), _ty: PhantomData }
    }
}

impl<N: AstNode> Iterator for AstChildren<N> {
    type Item = N;

    fn next(&mut self) -> Option<N> {
        self.inner.find_map(N::cast)
    }
}

pub mod support {
    use super::{AstChildren, AstNode};
    use crate::{NodeOrToken, SyntaxKind, SyntaxNode, SyntaxToken};

    /// The first child of `parent` that casts to `N`.
    pub fn child<N: AstNode>(parent: &SyntaxNode) -> Option<N> {
        parent.children().find_map(N::cast)
    }

    pub fn children<N: AstNode>(parent: &SyntaxNode) -> AstChildren<N> {
        AstChildren::new(parent)
    }

    /// The first direct token child of `parent` with the given kind.
    pub fn token(parent: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxToken> {
        parent
            .children_with_tokens()
            .filter_map(NodeOrToken::into_token)
            .find(|token| token.kind() == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::{AstNode as _, Expr, Item, Literal, Name, SourceFile};
    use crate::{Builder, NodeCache, SyntaxKind, SyntaxNode, T};

    /// `fn f() { 1 }`, built by hand.
    fn function() -> SyntaxNode {
        let cache = NodeCache::new();
        let mut builder = Builder::with_cache(&cache);
        builder.start_node(SyntaxKind::SOURCE_FILE);
        builder.start_node(SyntaxKind::FN);
        builder.token(T![fn], "fn");
        builder.token(SyntaxKind::WHITESPACE, " ");
        builder.start_node(SyntaxKind::NAME);
        builder.token(SyntaxKind::IDENT, "f");
        builder.finish_node();
        builder.start_node(SyntaxKind::PARAM_LIST);
        builder.token(T!['('], "(");
        builder.token(T![')'], ")");
        builder.finish_node();
        builder.token(SyntaxKind::WHITESPACE, " ");
        builder.start_node(SyntaxKind::BLOCK_EXPR);
        builder.start_node(SyntaxKind::STMT_LIST);
        builder.token(T!['{'], "{");
        builder.token(SyntaxKind::WHITESPACE, " ");
        builder.start_node(SyntaxKind::LITERAL);
        builder.token(SyntaxKind::INT_NUMBER, "1");
        builder.finish_node();
        builder.token(SyntaxKind::WHITESPACE, " ");
        builder.token(T!['}'], "}");
        builder.finish_node();
        builder.finish_node();
        builder.finish_node();
        builder.finish_node();
        SyntaxNode::new_root(builder.finish())
    }

    #[test]
    fn accessors_follow_the_grammar() {
        let file = SourceFile::cast(function()).unwrap();
        let items: Vec<Item> = file.items().collect();
        let [Item::Fn(function)] = items.as_slice() else { panic!("expected one function") };

        assert_eq!(function.fn_token().map(|token| token.text().to_owned()).as_deref(), Some("fn"));
        assert_eq!(function.name().map(|name| name.text()).as_deref(), Some("f"));
        assert_eq!(function.param_list().unwrap().params().count(), 0);
        assert!(function.ret_type().is_none());
        assert!(function.semicolon_token().is_none());

        let body = function.body().unwrap().stmt_list().unwrap();
        assert_eq!(body.statements().count(), 0);
        let Some(Expr::Literal(literal)) = body.tail_expr() else { panic!("expected a literal") };
        assert_eq!(literal.syntax().text(), "1");
    }

    #[test]
    fn children_are_restartable() {
        let file = SourceFile::cast(function()).unwrap();
        let items = file.items();
        assert_eq!(items.clone().count(), 1);
        assert_eq!(items.count(), 1);
    }

    #[test]
    fn cast_checks_the_kind() {
        let root = function();
        assert!(Name::cast(root.clone()).is_none());
        assert!(Literal::cast(root.clone()).is_none());
        assert!(Item::cast(root.first_child().unwrap()).is_some());
        assert!(Expr::can_cast(SyntaxKind::BIN_EXPR));
        assert!(!Expr::can_cast(SyntaxKind::FN));
    }
}
