use std::fmt;
use std::hash::{Hash, Hasher};

use text_size::TextSize;
use triomphe::Arc;

use crate::{NodeOrToken, SyntaxKind};

pub type GreenElement = NodeOrToken<GreenNode, GreenToken>;

/// Immutable leaf: a kind and the exact source bytes it covers.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct GreenToken {
    data: Arc<GreenTokenData>,
}

#[derive(PartialEq, Eq, Hash)]
struct GreenTokenData {
    kind: SyntaxKind,
    text: Box<str>,
}

impl GreenToken {
    /// Creates a token outside of any cache.
    pub fn new(kind: SyntaxKind, text: &str) -> Self {
        Self { data: Arc::new(GreenTokenData { kind, text: text.into() }) }
    }

    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.data.kind
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.data.text
    }

    #[inline]
    pub fn text_len(&self) -> TextSize {
        TextSize::of(self.text())
    }

    /// `true` if both handles point at the same allocation.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }

    pub(crate) fn as_ptr(&self) -> *const () {
        std::ptr::from_ref::<GreenTokenData>(&self.data).cast()
    }

    /// `true` if no other handle to this allocation exists.
    pub(crate) fn is_unique(&self) -> bool {
        self.data.is_unique()
    }
}

impl fmt::Debug for GreenToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} {:?}", self.kind(), self.text())
    }
}

impl fmt::Display for GreenToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// Immutable interior node. Holds no positions: a node can appear at any
/// offset and in any number of trees.
#[derive(Clone, Eq)]
pub struct GreenNode {
    data: Arc<GreenNodeData>,
}

#[derive(PartialEq, Eq, Hash)]
struct GreenNodeData {
    kind: SyntaxKind,
    text_len: TextSize,
    children: Box<[GreenElement]>,
}

impl GreenNode {
    /// Creates a node outside of any cache.
    pub fn new(kind: SyntaxKind, children: impl IntoIterator<Item = GreenElement>) -> Self {
        let children: Box<[GreenElement]> = children.into_iter().collect();
        let text_len = children.iter().map(GreenElement::text_len).sum();
        Self { data: Arc::new(GreenNodeData { kind, text_len, children }) }
    }

    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.data.kind
    }

    #[inline]
    pub fn text_len(&self) -> TextSize {
        self.data.text_len
    }

    #[inline]
    pub fn children(&self) -> &[GreenElement] {
        &self.data.children
    }

    /// `true` if both handles point at the same allocation.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }

    pub(crate) fn as_ptr(&self) -> *const () {
        std::ptr::from_ref::<GreenNodeData>(&self.data).cast()
    }

    /// `true` if no other handle to this allocation exists.
    pub(crate) fn is_unique(&self) -> bool {
        self.data.is_unique()
    }

    /// Returns a copy of this node with the child at `index` swapped for
    /// `new_child`. All other children are shared with `self`.
    pub fn replace_child(&self, index: usize, new_child: GreenElement) -> Self {
        let mut children = self.children().to_vec();
        children[index] = new_child;
        Self::new(self.kind(), children)
    }

    /// Concatenated text of every token below this node.
    pub fn text(&self) -> String {
        let mut buf = String::with_capacity(self.text_len().into());
        self.write_text(&mut buf);
        buf
    }

    fn write_text(&self, buf: &mut String) {
        for child in self.children() {
            match child {
                NodeOrToken::Node(node) => node.write_text(buf),
                NodeOrToken::Token(token) => buf.push_str(token.text()),
            }
        }
    }
}

impl PartialEq for GreenNode {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.data == other.data
    }
}

impl Hash for GreenNode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.data.hash(state);
    }
}

impl fmt::Debug for GreenNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GreenNode")
            .field("kind", &self.kind())
            .field("text_len", &self.text_len())
            .field("n_children", &self.children().len())
            .finish()
    }
}

impl fmt::Display for GreenNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

impl GreenElement {
    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        match self {
            NodeOrToken::Node(node) => node.kind(),
            NodeOrToken::Token(token) => token.kind(),
        }
    }

    #[inline]
    pub fn text_len(&self) -> TextSize {
        match self {
            NodeOrToken::Node(node) => node.text_len(),
            NodeOrToken::Token(token) => token.text_len(),
        }
    }

    pub(crate) fn as_ptr(&self) -> *const () {
        match self {
            NodeOrToken::Node(node) => node.as_ptr(),
            NodeOrToken::Token(token) => token.as_ptr(),
        }
    }
}

impl From<GreenNode> for GreenElement {
    fn from(node: GreenNode) -> Self {
        NodeOrToken::Node(node)
    }
}

impl From<GreenToken> for GreenElement {
    fn from(token: GreenToken) -> Self {
        NodeOrToken::Token(token)
    }
}

#[cfg(test)]
mod tests {
    use super::{GreenNode, GreenToken};
    use crate::{NodeOrToken, SyntaxKind, T};

    fn name(text: &str) -> GreenNode {
        GreenNode::new(SyntaxKind::NAME, [GreenToken::new(SyntaxKind::IDENT, text).into()])
    }

    #[test]
    fn text_len_is_the_sum_of_children() {
        let node = GreenNode::new(
            SyntaxKind::FN,
            [
                GreenToken::new(T![fn], "fn").into(),
                GreenToken::new(SyntaxKind::WHITESPACE, " ").into(),
                name("main").into(),
            ],
        );
        assert_eq!(u32::from(node.text_len()), 7);
        assert_eq!(node.text(), "fn main");
    }

    #[test]
    fn replace_child_shares_the_rest() {
        let keyword = GreenToken::new(T![fn], "fn");
        let node = GreenNode::new(SyntaxKind::FN, [keyword.clone().into(), name("f").into()]);
        let replaced = node.replace_child(1, name("g").into());

        assert_eq!(replaced.text(), "fng");
        match &replaced.children()[0] {
            NodeOrToken::Token(token) => assert!(token.ptr_eq(&keyword)),
            NodeOrToken::Node(_) => panic!("expected a token"),
        }
        assert_ne!(node, replaced);
    }

    #[test]
    fn equality_is_structural() {
        assert_eq!(name("x"), name("x"));
        assert!(!name("x").ptr_eq(&name("x")));
        assert_ne!(name("x"), name("y"));
    }
}
