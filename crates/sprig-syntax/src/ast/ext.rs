//! Accessors the grammar cannot express as plain fields: operators, and
//! nodes holding several children of the same type.

use crate::ast::{self, AstNode, support};
use crate::{NodeOrToken, SyntaxKind, SyntaxNode, SyntaxToken, T};

impl ast::Name {
    pub fn text(&self) -> String {
        self.syntax().text()
    }
}

impl ast::NameRef {
    pub fn text(&self) -> String {
        self.syntax().text()
    }
}

impl ast::Lifetime {
    pub fn text(&self) -> String {
        self.syntax().text()
    }
}

/// First non-trivia token directly under the node.
fn first_direct_token(node: &impl AstNode) -> Option<SyntaxToken> {
    node.syntax()
        .children_with_tokens()
        .filter_map(NodeOrToken::into_token)
        .find(|token| !token.kind().is_trivia())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Or,
    And,
    Eq,
    NotEq,
    Less,
    LessEq,
    Greater,
    GreaterEq,
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Shl,
    Shr,
    BitXor,
    BitOr,
    BitAnd,
    /// `=`, or a compound assignment carrying its arithmetic operator.
    Assign(Option<ArithOp>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Shl,
    Shr,
    BitXor,
    BitOr,
    BitAnd,
}

impl BinaryOp {
    pub fn from_kind(kind: SyntaxKind) -> Option<Self> {
        let op = match kind {
            T![||] => Self::Or,
            T![&&] => Self::And,
            T![==] => Self::Eq,
            T![!=] => Self::NotEq,
            T![<] => Self::Less,
            T![<=] => Self::LessEq,
            T![>] => Self::Greater,
            T![>=] => Self::GreaterEq,
            T![+] => Self::Add,
            T![-] => Self::Sub,
            T![*] => Self::Mul,
            T![/] => Self::Div,
            T![%] => Self::Rem,
            T![<<] => Self::Shl,
            T![>>] => Self::Shr,
            T![^] => Self::BitXor,
            T![|] => Self::BitOr,
            T![&] => Self::BitAnd,
            T![=] => Self::Assign(None),
            T![+=] => Self::Assign(Some(ArithOp::Add)),
            T![-=] => Self::Assign(Some(ArithOp::Sub)),
            T![*=] => Self::Assign(Some(ArithOp::Mul)),
            T![/=] => Self::Assign(Some(ArithOp::Div)),
            T![%=] => Self::Assign(Some(ArithOp::Rem)),
            T![<<=] => Self::Assign(Some(ArithOp::Shl)),
            T![>>=] => Self::Assign(Some(ArithOp::Shr)),
            T![^=] => Self::Assign(Some(ArithOp::BitXor)),
            T![|=] => Self::Assign(Some(ArithOp::BitOr)),
            T![&=] => Self::Assign(Some(ArithOp::BitAnd)),
            _ => return None,
        };
        Some(op)
    }
}

impl ast::BinExpr {
    pub fn lhs(&self) -> Option<ast::Expr> {
        support::children(self.syntax()).next()
    }

    /// The right operand. `None` when recovery left only one operand.
    pub fn rhs(&self) -> Option<ast::Expr> {
        let op = self.op_token()?;
        support::children(self.syntax())
            .find(|expr: &ast::Expr| expr.syntax().text_range().start() >= op.text_range().end())
    }

    pub fn op_token(&self) -> Option<SyntaxToken> {
        first_direct_token(self)
    }

    pub fn op_kind(&self) -> Option<BinaryOp> {
        BinaryOp::from_kind(self.op_token()?.kind())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// `*`
    Deref,
    /// `!`
    Not,
    /// `-`
    Neg,
}

impl ast::PrefixExpr {
    pub fn op_token(&self) -> Option<SyntaxToken> {
        first_direct_token(self)
    }

    pub fn op_kind(&self) -> Option<UnaryOp> {
        match self.op_token()?.kind() {
            T![*] => Some(UnaryOp::Deref),
            T![!] => Some(UnaryOp::Not),
            T![-] => Some(UnaryOp::Neg),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangeOp {
    /// `..`
    Exclusive,
    /// `..=`
    Inclusive,
}

impl ast::RangeExpr {
    pub fn op_token(&self) -> Option<SyntaxToken> {
        support::token(self.syntax(), T![..]).or_else(|| support::token(self.syntax(), T![..=]))
    }

    pub fn op_kind(&self) -> Option<RangeOp> {
        match self.op_token()?.kind() {
            T![..] => Some(RangeOp::Exclusive),
            T![..=] => Some(RangeOp::Inclusive),
            _ => None,
        }
    }

    pub fn start(&self) -> Option<ast::Expr> {
        let op = self.op_token()?;
        support::children(self.syntax())
            .next()
            .filter(|expr: &ast::Expr| expr.syntax().text_range().end() <= op.text_range().start())
    }

    pub fn end(&self) -> Option<ast::Expr> {
        let op = self.op_token()?;
        support::children(self.syntax())
            .find(|expr: &ast::Expr| expr.syntax().text_range().start() >= op.text_range().end())
    }
}

impl ast::IndexExpr {
    pub fn base(&self) -> Option<ast::Expr> {
        support::children(self.syntax()).next()
    }

    pub fn index(&self) -> Option<ast::Expr> {
        support::children(self.syntax()).nth(1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ElseBranch {
    Block(ast::BlockExpr),
    IfExpr(ast::IfExpr),
}

impl ast::IfExpr {
    /// The block after the condition, even when the condition is a block.
    pub fn then_branch(&self) -> Option<ast::BlockExpr> {
        nth_block(self.syntax(), 1)
    }

    pub fn else_branch(&self) -> Option<ElseBranch> {
        let else_token = self.else_token()?;
        let node = self
            .syntax()
            .children()
            .find(|node| node.text_range().start() >= else_token.text_range().end())?;
        if let Some(block) = ast::BlockExpr::cast(node.clone()) {
            return Some(ElseBranch::Block(block));
        }
        Self::cast(node).map(ElseBranch::IfExpr)
    }
}

impl ast::WhileExpr {
    pub fn loop_body(&self) -> Option<ast::BlockExpr> {
        nth_block(self.syntax(), 1)
    }
}

impl ast::ForExpr {
    pub fn loop_body(&self) -> Option<ast::BlockExpr> {
        // Without `in` the parser skips the iterable.
        nth_block(self.syntax(), usize::from(self.in_token().is_some()))
    }
}

/// The `n`th expression child of `node`, if it is a block.
fn nth_block(node: &SyntaxNode, n: usize) -> Option<ast::BlockExpr> {
    match support::children::<ast::Expr>(node).nth(n)? {
        ast::Expr::BlockExpr(block) => Some(block),
        _ => None,
    }
}

impl ast::Impl {
    /// The implemented trait in `impl Trait for Type`.
    pub fn trait_(&self) -> Option<ast::Type> {
        self.for_token()?;
        support::children(self.syntax()).next()
    }

    pub fn self_ty(&self) -> Option<ast::Type> {
        let mut types = support::children(self.syntax());
        match self.for_token() {
            Some(for_token) => types.find(|ty: &ast::Type| {
                ty.syntax().text_range().start() >= for_token.text_range().end()
            }),
            None => types.next(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    Int,
    Float,
    String,
    ByteString,
    Char,
    Byte,
    Bool(bool),
}

impl ast::Literal {
    pub fn token(&self) -> Option<SyntaxToken> {
        first_direct_token(self)
    }

    pub fn kind(&self) -> Option<LiteralKind> {
        let kind = match self.token()?.kind() {
            SyntaxKind::INT_NUMBER => LiteralKind::Int,
            SyntaxKind::FLOAT_NUMBER => LiteralKind::Float,
            SyntaxKind::STRING => LiteralKind::String,
            SyntaxKind::BYTE_STRING => LiteralKind::ByteString,
            SyntaxKind::CHAR => LiteralKind::Char,
            SyntaxKind::BYTE => LiteralKind::Byte,
            SyntaxKind::TRUE_KW => LiteralKind::Bool(true),
            SyntaxKind::FALSE_KW => LiteralKind::Bool(false),
            _ => return None,
        };
        Some(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::{BinaryOp, ElseBranch, LiteralKind, RangeOp};
    use crate::ast::{self, AstNode as _};
    use crate::{Builder, NodeCache, SyntaxKind, SyntaxNode, T};

    fn leaf(builder: &mut Builder<'_>, node: SyntaxKind, token: SyntaxKind, text: &str) {
        builder.start_node(node);
        builder.token(token, text);
        builder.finish_node();
    }

    /// `a + 1`
    fn addition(builder: &mut Builder<'_>) {
        builder.start_node(SyntaxKind::BIN_EXPR);
        builder.start_node(SyntaxKind::PATH_EXPR);
        builder.start_node(SyntaxKind::PATH);
        builder.start_node(SyntaxKind::PATH_SEGMENT);
        leaf(builder, SyntaxKind::NAME_REF, SyntaxKind::IDENT, "a");
        builder.finish_node();
        builder.finish_node();
        builder.finish_node();
        builder.token(SyntaxKind::WHITESPACE, " ");
        builder.token(T![+], "+");
        builder.token(SyntaxKind::WHITESPACE, " ");
        leaf(builder, SyntaxKind::LITERAL, SyntaxKind::INT_NUMBER, "1");
        builder.finish_node();
    }

    #[test]
    fn binary_operands() {
        let cache = NodeCache::new();
        let mut builder = Builder::with_cache(&cache);
        addition(&mut builder);
        let expr = ast::BinExpr::cast(SyntaxNode::new_root(builder.finish())).unwrap();

        assert_eq!(expr.op_kind(), Some(BinaryOp::Add));
        assert_eq!(expr.lhs().unwrap().syntax().text(), "a");
        let Some(ast::Expr::Literal(rhs)) = expr.rhs() else { panic!("expected a literal") };
        assert_eq!(rhs.kind(), Some(LiteralKind::Int));
    }

    #[test]
    fn half_open_range() {
        let cache = NodeCache::new();
        let mut builder = Builder::with_cache(&cache);
        builder.start_node(SyntaxKind::RANGE_EXPR);
        builder.token(T![..], "..");
        leaf(&mut builder, SyntaxKind::LITERAL, SyntaxKind::INT_NUMBER, "2");
        builder.finish_node();
        let range = ast::RangeExpr::cast(SyntaxNode::new_root(builder.finish())).unwrap();

        assert_eq!(range.op_kind(), Some(RangeOp::Exclusive));
        assert!(range.start().is_none());
        assert_eq!(range.end().unwrap().syntax().text(), "2");
    }

    #[test]
    fn else_if_chain() {
        let cache = NodeCache::new();
        let mut builder = Builder::with_cache(&cache);
        let block = |builder: &mut Builder<'_>| {
            builder.start_node(SyntaxKind::BLOCK_EXPR);
            builder.start_node(SyntaxKind::STMT_LIST);
            builder.token(T!['{'], "{");
            builder.token(T!['}'], "}");
            builder.finish_node();
            builder.finish_node();
        };
        builder.start_node(SyntaxKind::IF_EXPR);
        builder.token(T![if], "if");
        leaf(&mut builder, SyntaxKind::LITERAL, T![true], "true");
        block(&mut builder);
        builder.token(T![else], "else");
        builder.start_node(SyntaxKind::IF_EXPR);
        builder.token(T![if], "if");
        leaf(&mut builder, SyntaxKind::LITERAL, T![false], "false");
        block(&mut builder);
        builder.finish_node();
        builder.finish_node();
        let expr = ast::IfExpr::cast(SyntaxNode::new_root(builder.finish())).unwrap();

        let Some(ast::Expr::Literal(condition)) = expr.condition() else { panic!() };
        assert_eq!(condition.kind(), Some(LiteralKind::Bool(true)));
        assert!(expr.then_branch().is_some());
        let Some(ElseBranch::IfExpr(nested)) = expr.else_branch() else { panic!("expected else if") };
        assert!(nested.else_branch().is_none());
    }
}
