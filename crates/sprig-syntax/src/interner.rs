use std::sync::{LazyLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use rustc_hash::FxHashMap;

use crate::SyntaxKind;
use crate::green::{GreenElement, GreenNode, GreenToken};

static GLOBAL: LazyLock<NodeCache> = LazyLock::new(NodeCache::default);

/// Cached nodes allowed before the first collection. After a collection the
/// cache may grow to twice the survivors before the next one.
const FIRST_COLLECTION: usize = 1 << 16;

/// Deduplicates tokens and nodes so that structurally identical subtrees
/// share one allocation.
///
/// Every node handed out by the cache has cached children, so two nodes are
/// structurally equal exactly when their kinds match and their children are
/// the same allocations. Keys therefore store child addresses; an entry keeps
/// its children alive, so an address cannot be reused while the entry exists.
///
/// Lookups of existing entries only take the read lock, so concurrent
/// parses mostly contend on inserts. Entries that no tree refers to any
/// more are dropped by [`NodeCache::collect_garbage`], which insertion also
/// runs once the cache has doubled since the last collection.
#[derive(Default)]
pub struct NodeCache {
    inner: RwLock<CacheInner>,
}

struct CacheInner {
    tokens: FxHashMap<SyntaxKind, FxHashMap<Box<str>, GreenToken>>,
    nodes: FxHashMap<NodeKey, GreenNode>,
    next_collection: usize,
}

impl Default for CacheInner {
    fn default() -> Self {
        Self {
            tokens: FxHashMap::default(),
            nodes: FxHashMap::default(),
            next_collection: FIRST_COLLECTION,
        }
    }
}

#[derive(PartialEq, Eq, Hash)]
struct NodeKey {
    kind: SyntaxKind,
    children: Box<[usize]>,
}

impl NodeCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide cache used by [`Builder::new`](crate::Builder::new).
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    pub fn token(&self, kind: SyntaxKind, text: &str) -> GreenToken {
        if let Some(token) = self.read().tokens.get(&kind).and_then(|by_text| by_text.get(text)) {
            return token.clone();
        }

        let mut inner = self.write();
        let by_text = inner.tokens.entry(kind).or_default();
        if let Some(token) = by_text.get(text) {
            return token.clone();
        }

        let token = GreenToken::new(kind, text);
        by_text.insert(text.into(), token.clone());
        token
    }

    pub fn node(&self, kind: SyntaxKind, children: Vec<GreenElement>) -> GreenNode {
        let key = NodeKey {
            kind,
            children: children.iter().map(|child| child.as_ptr() as usize).collect(),
        };

        if let Some(node) = self.read().nodes.get(&key) {
            return node.clone();
        }

        let mut inner = self.write();
        let node = inner.nodes.entry(key).or_insert_with(|| GreenNode::new(kind, children)).clone();
        if inner.nodes.len() >= inner.next_collection {
            let removed = inner.collect();
            inner.next_collection = (inner.nodes.len() * 2).max(FIRST_COLLECTION);
            tracing::debug!(removed, kept = inner.nodes.len(), "collected unused green nodes");
        }
        node
    }

    /// Drops every entry that only the cache still refers to and returns how
    /// many were removed. Trees built earlier stay valid; their subtrees
    /// just stop being shared with later ones.
    pub fn collect_garbage(&self) -> usize {
        self.write().collect()
    }

    /// Number of distinct nodes and tokens held by the cache.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> RwLockReadGuard<'_, CacheInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, CacheInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl CacheInner {
    fn len(&self) -> usize {
        self.nodes.len() + self.tokens.values().map(FxHashMap::len).sum::<usize>()
    }

    fn collect(&mut self) -> usize {
        let before = self.len();

        // Dropping a node can leave its children unreferenced in turn.
        loop {
            let n_nodes = self.nodes.len();
            self.nodes.retain(|_, node| !node.is_unique());
            if self.nodes.len() == n_nodes {
                break;
            }
        }
        for by_text in self.tokens.values_mut() {
            by_text.retain(|_, token| !token.is_unique());
        }
        self.tokens.retain(|_, by_text| !by_text.is_empty());

        before - self.len()
    }
}

impl std::fmt::Debug for NodeCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeCache").field("len", &self.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::NodeCache;
    use crate::{NodeOrToken, SyntaxKind};

    #[test]
    fn tokens_are_shared() {
        let cache = NodeCache::new();
        let a = cache.token(SyntaxKind::IDENT, "answer");
        let b = cache.token(SyntaxKind::IDENT, "answer");
        let c = cache.token(SyntaxKind::STRING, "answer");

        assert!(a.ptr_eq(&b));
        assert!(!a.ptr_eq(&c));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn nodes_are_shared_by_structure() {
        let cache = NodeCache::new();
        let name = |text: &str| {
            let ident = cache.token(SyntaxKind::IDENT, text);
            cache.node(SyntaxKind::NAME, vec![NodeOrToken::Token(ident)])
        };

        let first = name("x");
        let second = name("x");
        let other = name("y");

        assert!(first.ptr_eq(&second));
        assert!(!first.ptr_eq(&other));
    }

    #[test]
    fn separate_caches_do_not_share() {
        let left = NodeCache::new().token(SyntaxKind::IDENT, "x");
        let right = NodeCache::new().token(SyntaxKind::IDENT, "x");
        assert!(!left.ptr_eq(&right));
        assert_eq!(left, right);
    }

    #[test]
    fn unused_entries_are_collected() {
        let cache = NodeCache::new();
        let name = |text: &str| {
            let ident = cache.token(SyntaxKind::IDENT, text);
            let name = cache.node(SyntaxKind::NAME, vec![NodeOrToken::Token(ident)]);
            cache.node(SyntaxKind::PARAM, vec![NodeOrToken::Node(name)])
        };

        let kept = name("kept");
        drop(name("dropped"));
        assert_eq!(cache.len(), 6);

        assert_eq!(cache.collect_garbage(), 3);
        assert_eq!(cache.len(), 3);
        assert!(kept.ptr_eq(&name("kept")));

        drop(kept);
        assert_eq!(cache.collect_garbage(), 3);
        assert!(cache.is_empty());
    }

    #[test]
    fn threads_share_entries() {
        let cache = NodeCache::new();
        let tokens: Vec<_> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| cache.token(SyntaxKind::IDENT, "shared")))
                .collect();
            handles.into_iter().map(|handle| handle.join().unwrap()).collect()
        });

        assert!(tokens.windows(2).all(|pair| pair[0].ptr_eq(&pair[1])));
        assert_eq!(cache.len(), 1);
    }
}
