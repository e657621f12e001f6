//! Positioned, parent-aware view over a green tree.
//!
//! Red nodes are created on demand while navigating and are cheap to drop.
//! They never mutate the green tree they point into. Absolute offsets are not
//! stored in green nodes: a red node derives its offset from its parent the
//! first time it is asked and caches it.

use std::cell::Cell;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter;
use std::rc::Rc;

use text_size::{TextRange, TextSize};

use crate::cursor::{Preorder, PreorderWithTokens};
use crate::green::{GreenElement, GreenNode, GreenToken};
use crate::{NodeOrToken, SyntaxKind, TokenAtOffset, WalkEvent};

pub type SyntaxElement = NodeOrToken<SyntaxNode, SyntaxToken>;

#[derive(Clone)]
pub struct SyntaxNode(Rc<NodeData>);

struct NodeData {
    green: GreenNode,
    parent: Option<SyntaxNode>,
    index: u32,
    offset: Cell<Option<TextSize>>,
}

#[derive(Clone)]
pub struct SyntaxToken(Rc<TokenData>);

struct TokenData {
    green: GreenToken,
    parent: SyntaxNode,
    index: u32,
    offset: Cell<Option<TextSize>>,
}

impl SyntaxNode {
    /// Creates the root of a red tree.
    pub fn new_root(green: GreenNode) -> Self {
        Self(Rc::new(NodeData {
            green,
            parent: None,
            index: 0,
            offset: Cell::new(Some(TextSize::new(0))),
        }))
    }

    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.0.green.kind()
    }

    #[inline]
    pub fn green(&self) -> &GreenNode {
        &self.0.green
    }

    #[inline]
    pub fn parent(&self) -> Option<Self> {
        self.0.parent.clone()
    }

    /// Position among the parent's children, tokens included.
    #[inline]
    pub fn index(&self) -> usize {
        self.0.index as usize
    }

    /// Absolute offset of the node's first byte.
    pub fn offset(&self) -> TextSize {
        if let Some(offset) = self.0.offset.get() {
            return offset;
        }

        let offset = match &self.0.parent {
            Some(parent) => parent.offset() + relative_offset(parent.green(), self.index()),
            None => TextSize::new(0),
        };
        self.0.offset.set(Some(offset));
        offset
    }

    #[inline]
    pub fn text_range(&self) -> TextRange {
        TextRange::at(self.offset(), self.green().text_len())
    }

    /// The exact source text covered by this node.
    pub fn text(&self) -> String {
        self.green().text()
    }

    pub fn children(&self) -> SyntaxNodeChildren {
        SyntaxNodeChildren { inner: self.children_with_tokens() }
    }

    pub fn children_with_tokens(&self) -> SyntaxElementChildren {
        SyntaxElementChildren::new(self.clone(), 0, TextSize::new(0))
    }

    pub fn first_child(&self) -> Option<Self> {
        self.children().next()
    }

    pub fn last_child(&self) -> Option<Self> {
        let children = self.green().children();
        (0..children.len())
            .rev()
            .find(|&index| matches!(children[index], NodeOrToken::Node(_)))
            .and_then(|index| self.child_at(index).into_node())
    }

    pub fn first_child_or_token(&self) -> Option<SyntaxElement> {
        self.children_with_tokens().next()
    }

    pub fn last_child_or_token(&self) -> Option<SyntaxElement> {
        let len = self.green().children().len();
        len.checked_sub(1).map(|index| self.child_at(index))
    }

    pub fn first_token(&self) -> Option<SyntaxToken> {
        self.children_with_tokens().find_map(|child| match child {
            NodeOrToken::Node(node) => node.first_token(),
            NodeOrToken::Token(token) => Some(token),
        })
    }

    pub fn last_token(&self) -> Option<SyntaxToken> {
        let len = self.green().children().len();
        (0..len).rev().find_map(|index| match self.child_at(index) {
            NodeOrToken::Node(node) => node.last_token(),
            NodeOrToken::Token(token) => Some(token),
        })
    }

    pub fn next_sibling(&self) -> Option<Self> {
        let parent = self.parent()?;
        let start = self.index() + 1;
        let rel = relative_offset(parent.green(), self.index()) + self.green().text_len();
        SyntaxNodeChildren { inner: SyntaxElementChildren::new(parent, start, rel) }.next()
    }

    pub fn prev_sibling(&self) -> Option<Self> {
        let parent = self.parent()?;
        let children = parent.green().children();
        (0..self.index())
            .rev()
            .find(|&index| matches!(children[index], NodeOrToken::Node(_)))
            .and_then(|index| parent.child_at(index).into_node())
    }

    pub fn next_sibling_or_token(&self) -> Option<SyntaxElement> {
        let parent = self.parent()?;
        next_sibling_of(&parent, self.index())
    }

    pub fn prev_sibling_or_token(&self) -> Option<SyntaxElement> {
        let parent = self.parent()?;
        let index = self.index().checked_sub(1)?;
        Some(parent.child_at(index))
    }

    /// The node itself followed by all of its parents, innermost first.
    pub fn ancestors(&self) -> impl Iterator<Item = Self> + use<> {
        iter::successors(Some(self.clone()), Self::parent)
    }

    /// The node itself and every node below it, in preorder.
    pub fn descendants(&self) -> impl Iterator<Item = Self> + use<> {
        self.preorder().filter_map(|event| match event {
            WalkEvent::Enter(node) => Some(node),
            WalkEvent::Leave(_) => None,
        })
    }

    pub fn descendants_with_tokens(&self) -> impl Iterator<Item = SyntaxElement> + use<> {
        self.preorder_with_tokens().filter_map(|event| match event {
            WalkEvent::Enter(element) => Some(element),
            WalkEvent::Leave(_) => None,
        })
    }

    pub fn preorder(&self) -> Preorder {
        Preorder::new(self.clone())
    }

    pub fn preorder_with_tokens(&self) -> PreorderWithTokens {
        PreorderWithTokens::new(self.clone())
    }

    /// Finds the token(s) touching `offset`. Offsets outside of the node
    /// yield [`TokenAtOffset::None`].
    pub fn token_at_offset(&self, offset: TextSize) -> TokenAtOffset<SyntaxToken> {
        let range = self.text_range();
        if range.is_empty() || offset < range.start() || range.end() < offset {
            return TokenAtOffset::None;
        }

        let mut children = self.children_with_tokens().filter(|child| {
            let child_range = child.text_range();
            !child_range.is_empty()
                && child_range.start() <= offset
                && offset <= child_range.end()
        });

        let Some(left) = children.next() else {
            return TokenAtOffset::None;
        };

        match children.next() {
            Some(right) => match (left.token_at_offset(offset), right.token_at_offset(offset)) {
                (TokenAtOffset::Single(left), TokenAtOffset::Single(right)) => {
                    TokenAtOffset::Between(left, right)
                }
                (left, _) => left,
            },
            None => left.token_at_offset(offset),
        }
    }

    /// Returns the smallest element that fully covers `range`.
    pub fn covering_element(&self, range: TextRange) -> SyntaxElement {
        let mut element = SyntaxElement::Node(self.clone());
        if !self.text_range().contains_range(range) {
            return element;
        }

        loop {
            element = match &element {
                NodeOrToken::Token(_) => return element,
                NodeOrToken::Node(node) => match node.child_or_token_at_range(range) {
                    Some(child) => child,
                    None => return element,
                },
            };
        }
    }

    /// The first child whose range contains `range`.
    pub fn child_or_token_at_range(&self, range: TextRange) -> Option<SyntaxElement> {
        self.children_with_tokens().find(|child| child.text_range().contains_range(range))
    }

    /// Builds a new root in which this node's green is replaced by
    /// `replacement`. Every green node off the path to the root is shared
    /// with the current tree.
    pub fn replace_with(&self, replacement: GreenNode) -> GreenNode {
        debug_assert_eq!(self.kind(), replacement.kind());
        match &self.0.parent {
            None => replacement,
            Some(parent) => {
                let new_parent = parent.green().replace_child(self.index(), replacement.into());
                parent.replace_with(new_parent)
            }
        }
    }

    /// Indented dump of the subtree with kinds, ranges and token texts.
    pub fn debug_dump(&self) -> String {
        let mut buf = String::new();
        let mut indent = 0;

        for event in self.preorder_with_tokens() {
            match event {
                WalkEvent::Enter(element) => {
                    let line = match element {
                        NodeOrToken::Node(node) => format!("{node:?}"),
                        NodeOrToken::Token(token) => format!("{token:?}"),
                    };
                    buf.push_str(&"  ".repeat(indent));
                    buf.push_str(&line);
                    buf.push('\n');
                    indent += 1;
                }
                WalkEvent::Leave(_) => indent -= 1,
            }
        }

        buf
    }

    fn new_child(green: GreenNode, parent: Self, index: usize, offset: Option<TextSize>) -> Self {
        Self(Rc::new(NodeData {
            green,
            parent: Some(parent),
            index: index as u32,
            offset: Cell::new(offset),
        }))
    }

    fn child_at(&self, index: usize) -> SyntaxElement {
        make_child(self, index, None)
    }

    fn cached_offset(&self) -> Option<TextSize> {
        self.0.offset.get()
    }
}

impl PartialEq for SyntaxNode {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
            || (self.green().ptr_eq(other.green()) && self.offset() == other.offset())
    }
}

impl Eq for SyntaxNode {}

impl Hash for SyntaxNode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.green().as_ptr().hash(state);
        self.offset().hash(state);
    }
}

impl fmt::Debug for SyntaxNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.write_str(&self.debug_dump())
        } else {
            write!(f, "{:?}@{:?}", self.kind(), self.text_range())
        }
    }
}

impl fmt::Display for SyntaxNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.green(), f)
    }
}

impl SyntaxToken {
    fn new(green: GreenToken, parent: SyntaxNode, index: usize, offset: Option<TextSize>) -> Self {
        Self(Rc::new(TokenData { green, parent, index: index as u32, offset: Cell::new(offset) }))
    }

    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.0.green.kind()
    }

    #[inline]
    pub fn text(&self) -> &str {
        self.0.green.text()
    }

    #[inline]
    pub fn green(&self) -> &GreenToken {
        &self.0.green
    }

    /// Tokens always live inside a node.
    #[inline]
    pub fn parent(&self) -> SyntaxNode {
        self.0.parent.clone()
    }

    pub fn parent_ancestors(&self) -> impl Iterator<Item = SyntaxNode> + use<> {
        self.parent().ancestors()
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.0.index as usize
    }

    pub fn offset(&self) -> TextSize {
        if let Some(offset) = self.0.offset.get() {
            return offset;
        }

        let parent = &self.0.parent;
        let offset = parent.offset() + relative_offset(parent.green(), self.index());
        self.0.offset.set(Some(offset));
        offset
    }

    #[inline]
    pub fn text_range(&self) -> TextRange {
        TextRange::at(self.offset(), self.green().text_len())
    }

    pub fn next_sibling_or_token(&self) -> Option<SyntaxElement> {
        next_sibling_of(&self.0.parent, self.index())
    }

    pub fn prev_sibling_or_token(&self) -> Option<SyntaxElement> {
        let index = self.index().checked_sub(1)?;
        Some(self.0.parent.child_at(index))
    }

    /// The next token in the whole tree, skipping empty nodes.
    pub fn next_token(&self) -> Option<Self> {
        let mut element = SyntaxElement::Token(self.clone());
        loop {
            let sibling = match element.next_sibling_or_token() {
                Some(sibling) => sibling,
                None => element
                    .parent()?
                    .ancestors()
                    .find_map(|ancestor| ancestor.next_sibling_or_token())?,
            };
            match sibling {
                NodeOrToken::Token(token) => return Some(token),
                NodeOrToken::Node(node) => match node.first_token() {
                    Some(token) => return Some(token),
                    None => element = NodeOrToken::Node(node),
                },
            }
        }
    }

    /// The previous token in the whole tree, skipping empty nodes.
    pub fn prev_token(&self) -> Option<Self> {
        let mut element = SyntaxElement::Token(self.clone());
        loop {
            let sibling = match element.prev_sibling_or_token() {
                Some(sibling) => sibling,
                None => element
                    .parent()?
                    .ancestors()
                    .find_map(|ancestor| ancestor.prev_sibling_or_token())?,
            };
            match sibling {
                NodeOrToken::Token(token) => return Some(token),
                NodeOrToken::Node(node) => match node.last_token() {
                    Some(token) => return Some(token),
                    None => element = NodeOrToken::Node(node),
                },
            }
        }
    }

    /// Builds a new root in which this token is replaced by `replacement`.
    pub fn replace_with(&self, replacement: GreenToken) -> GreenNode {
        let parent = &self.0.parent;
        let new_parent = parent.green().replace_child(self.index(), replacement.into());
        parent.replace_with(new_parent)
    }
}

impl PartialEq for SyntaxToken {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
            || (self.green().ptr_eq(other.green()) && self.offset() == other.offset())
    }
}

impl Eq for SyntaxToken {}

impl Hash for SyntaxToken {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.green().as_ptr().hash(state);
        self.offset().hash(state);
    }
}

impl fmt::Debug for SyntaxToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{:?} {:?}", self.kind(), self.text_range(), self.text())
    }
}

impl fmt::Display for SyntaxToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

impl SyntaxElement {
    pub fn kind(&self) -> SyntaxKind {
        match self {
            NodeOrToken::Node(node) => node.kind(),
            NodeOrToken::Token(token) => token.kind(),
        }
    }

    pub fn text_range(&self) -> TextRange {
        match self {
            NodeOrToken::Node(node) => node.text_range(),
            NodeOrToken::Token(token) => token.text_range(),
        }
    }

    pub fn parent(&self) -> Option<SyntaxNode> {
        match self {
            NodeOrToken::Node(node) => node.parent(),
            NodeOrToken::Token(token) => Some(token.parent()),
        }
    }

    pub fn next_sibling_or_token(&self) -> Option<Self> {
        match self {
            NodeOrToken::Node(node) => node.next_sibling_or_token(),
            NodeOrToken::Token(token) => token.next_sibling_or_token(),
        }
    }

    pub fn prev_sibling_or_token(&self) -> Option<Self> {
        match self {
            NodeOrToken::Node(node) => node.prev_sibling_or_token(),
            NodeOrToken::Token(token) => token.prev_sibling_or_token(),
        }
    }

    pub fn token_at_offset(&self, offset: TextSize) -> TokenAtOffset<SyntaxToken> {
        match self {
            NodeOrToken::Node(node) => node.token_at_offset(offset),
            NodeOrToken::Token(token) => TokenAtOffset::Single(token.clone()),
        }
    }
}

impl From<SyntaxNode> for SyntaxElement {
    fn from(node: SyntaxNode) -> Self {
        NodeOrToken::Node(node)
    }
}

impl From<SyntaxToken> for SyntaxElement {
    fn from(token: SyntaxToken) -> Self {
        NodeOrToken::Token(token)
    }
}

/// Child nodes of a node, tokens skipped. A clone continues independently
/// from the same position.
#[derive(Clone)]
pub struct SyntaxNodeChildren {
    inner: SyntaxElementChildren,
}

impl Iterator for SyntaxNodeChildren {
    type Item = SyntaxNode;

    fn next(&mut self) -> Option<SyntaxNode> {
        self.inner.find_map(NodeOrToken::into_node)
    }
}

/// Child nodes and tokens of a node.
#[derive(Clone)]
pub struct SyntaxElementChildren {
    parent: SyntaxNode,
    next: usize,
    /// Offset of `next`, relative to the parent's start.
    rel_offset: TextSize,
}

impl SyntaxElementChildren {
    fn new(parent: SyntaxNode, next: usize, rel_offset: TextSize) -> Self {
        Self { parent, next, rel_offset }
    }
}

impl Iterator for SyntaxElementChildren {
    type Item = SyntaxElement;

    fn next(&mut self) -> Option<SyntaxElement> {
        let green = self.parent.green().children().get(self.next)?;
        let offset = self.parent.cached_offset().map(|start| start + self.rel_offset);
        let element = make_child(&self.parent, self.next, offset);

        self.rel_offset += green.text_len();
        self.next += 1;
        Some(element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.parent.green().children().len().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

fn make_child(parent: &SyntaxNode, index: usize, offset: Option<TextSize>) -> SyntaxElement {
    match &parent.green().children()[index] {
        NodeOrToken::Node(green) => {
            NodeOrToken::Node(SyntaxNode::new_child(green.clone(), parent.clone(), index, offset))
        }
        NodeOrToken::Token(green) => {
            NodeOrToken::Token(SyntaxToken::new(green.clone(), parent.clone(), index, offset))
        }
    }
}

fn next_sibling_of(parent: &SyntaxNode, index: usize) -> Option<SyntaxElement> {
    let next = index + 1;
    (next < parent.green().children().len()).then(|| parent.child_at(next))
}

/// Sum of the lengths of the children before `index`.
fn relative_offset(parent: &GreenNode, index: usize) -> TextSize {
    parent.children()[..index].iter().map(GreenElement::text_len).sum()
}

#[cfg(test)]
mod tests {
    use expect_test::expect;
    use text_size::{TextRange, TextSize};

    use crate::{Builder, GreenToken, NodeCache, SyntaxKind, SyntaxNode, T, TokenAtOffset};

    /// `a + bc`
    fn sum(cache: &NodeCache) -> SyntaxNode {
        let mut builder = Builder::with_cache(cache);
        builder.start_node(SyntaxKind::BIN_EXPR);
        builder.start_node(SyntaxKind::NAME_REF);
        builder.token(SyntaxKind::IDENT, "a");
        builder.finish_node();
        builder.token(SyntaxKind::WHITESPACE, " ");
        builder.token(T![+], "+");
        builder.token(SyntaxKind::WHITESPACE, " ");
        builder.start_node(SyntaxKind::NAME_REF);
        builder.token(SyntaxKind::IDENT, "bc");
        builder.finish_node();
        builder.finish_node();
        SyntaxNode::new_root(builder.finish())
    }

    #[test]
    fn dump() {
        let cache = NodeCache::new();
        expect![[r#"
            BIN_EXPR@0..6
              NAME_REF@0..1
                IDENT@0..1 "a"
              WHITESPACE@1..2 " "
              PLUS@2..3 "+"
              WHITESPACE@3..4 " "
              NAME_REF@4..6
                IDENT@4..6 "bc"
        "#]]
        .assert_eq(&sum(&cache).debug_dump());
    }

    #[test]
    fn navigation() {
        let cache = NodeCache::new();
        let root = sum(&cache);
        let lhs = root.first_child().unwrap();
        let rhs = root.last_child().unwrap();

        assert_eq!(lhs.next_sibling(), Some(rhs.clone()));
        assert_eq!(rhs.prev_sibling(), Some(lhs.clone()));
        assert_eq!(rhs.text_range(), TextRange::new(4.into(), 6.into()));
        assert_eq!(rhs.parent(), Some(root.clone()));
        assert_eq!(rhs.ancestors().count(), 2);
        assert_eq!(root.descendants().count(), 3);
        assert_eq!(root.descendants_with_tokens().count(), 8);

        let first = root.first_token().unwrap();
        let tokens: Vec<_> =
            std::iter::successors(Some(first), |token| token.next_token()).map(|t| t.kind()).collect();
        assert_eq!(
            tokens,
            [SyntaxKind::IDENT, SyntaxKind::WHITESPACE, T![+], SyntaxKind::WHITESPACE, SyntaxKind::IDENT]
        );
        assert_eq!(root.last_token().unwrap().prev_token().unwrap().kind(), SyntaxKind::WHITESPACE);
    }

    #[test]
    fn equal_structure_is_not_equal_position() {
        let cache = NodeCache::new();
        let root = sum(&cache);
        let lhs = root.first_child().unwrap();
        assert_eq!(lhs, root.first_child().unwrap());
        assert_ne!(lhs, root.last_child().unwrap());
    }

    #[test]
    fn offsets() {
        let cache = NodeCache::new();
        let root = sum(&cache);

        let TokenAtOffset::Between(left, right) = root.token_at_offset(TextSize::new(1)) else {
            panic!("expected two tokens")
        };
        assert_eq!((left.text(), right.text()), ("a", " "));
        assert_eq!(root.token_at_offset(TextSize::new(5)).right_biased().unwrap().text(), "bc");
        assert!(matches!(root.token_at_offset(TextSize::new(7)), TokenAtOffset::None));

        let covering = root.covering_element(TextRange::new(4.into(), 5.into()));
        assert_eq!(covering.kind(), SyntaxKind::IDENT);
        let covering = root.covering_element(TextRange::new(0.into(), 3.into()));
        assert_eq!(covering.kind(), SyntaxKind::BIN_EXPR);
    }

    #[test]
    fn replace_shares_untouched_subtrees() {
        let cache = NodeCache::new();
        let root = sum(&cache);
        let ident = root.last_token().unwrap();
        let new_root = SyntaxNode::new_root(ident.replace_with(GreenToken::new(SyntaxKind::IDENT, "xyz")));

        assert_eq!(new_root.text(), "a + xyz");
        let old_lhs = root.first_child().unwrap();
        let new_lhs = new_root.first_child().unwrap();
        assert!(old_lhs.green().ptr_eq(new_lhs.green()));
        assert_eq!(root.text(), "a + bc");
    }
}
