//! Stack-based construction of green trees.

use crate::green::{GreenElement, GreenNode};
use crate::{NodeCache, NodeOrToken, SyntaxKind};

const DEFAULT_TREE_DEPTH: usize = 64;
const DEFAULT_CHILDREN_LEN: usize = 256;

/// Position in the builder recorded before the children of a node whose kind
/// is only known after they have been built.
#[derive(Clone, Copy, Debug)]
pub struct Checkpoint(usize);

/// Builds a [`GreenNode`] from a sequence of `start_node` / `token` /
/// `finish_node` calls. Every finished node and token is deduplicated through
/// a [`NodeCache`].
///
/// Nothing is observable until [`Builder::finish`]: dropping the builder
/// midway discards everything built so far.
pub struct Builder<'cache> {
    cache: &'cache NodeCache,
    /// Open nodes: their kind and the index of their first child.
    parents: Vec<(SyntaxKind, usize)>,
    children: Vec<GreenElement>,
}

impl Default for Builder<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl Builder<'static> {
    /// Creates a builder backed by the process-wide cache.
    pub fn new() -> Self {
        Self::with_cache(NodeCache::global())
    }
}

impl<'cache> Builder<'cache> {
    pub fn with_cache(cache: &'cache NodeCache) -> Self {
        Self {
            cache,
            parents: Vec::with_capacity(DEFAULT_TREE_DEPTH),
            children: Vec::with_capacity(DEFAULT_CHILDREN_LEN),
        }
    }

    /// Opens a new node and makes it current.
    pub fn start_node(&mut self, kind: SyntaxKind) {
        self.parents.push((kind, self.children.len()));
    }

    /// Appends a token to the current node.
    pub fn token(&mut self, kind: SyntaxKind, text: &str) {
        let token = self.cache.token(kind, text);
        self.children.push(NodeOrToken::Token(token));
    }

    /// Closes the current node.
    pub fn finish_node(&mut self) {
        let (kind, first_child) = self.parents.pop().expect("no opened nodes?");
        let children = self.children.split_off(first_child);
        let node = self.cache.node(kind, children);
        self.children.push(NodeOrToken::Node(node));
    }

    /// Remembers the current position so that a node started later with
    /// [`Builder::start_node_at`] wraps everything built from here on.
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.children.len())
    }

    /// Opens a node that adopts every child built since `checkpoint`.
    pub fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        let Checkpoint(checkpoint) = checkpoint;
        assert!(
            checkpoint <= self.children.len(),
            "checkpoint no longer valid, was `finish_node` called early?"
        );

        if let Some(&(_, first_child)) = self.parents.last() {
            assert!(
                checkpoint >= first_child,
                "checkpoint no longer valid, was an unmatched `start_node` called?"
            );
        }

        self.parents.push((kind, checkpoint));
    }

    /// Completes the tree. Every `start_node` must have been matched by a
    /// `finish_node`, leaving exactly one root.
    pub fn finish(mut self) -> GreenNode {
        assert!(self.parents.is_empty(), "`finish` called with {} open nodes", self.parents.len());
        assert_eq!(self.children.len(), 1, "the tree must have exactly one root");
        match self.children.pop() {
            Some(NodeOrToken::Node(node)) => node,
            Some(NodeOrToken::Token(_)) | None => panic!("the root must be a node"),
        }
    }
}
