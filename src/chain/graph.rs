// Immutable word graph types and the publish-once set of loaded graphs.

use std::sync::{Arc, OnceLock};

/// One word's entry in a chain: its display key and weighted child edges.
///
/// `children` keeps the raw corpus tokens in order, duplicates included — a
/// repeated child is a stronger edge. `child_indices` is the resolved form,
/// computed once at load time, with one index per raw child.
#[derive(Debug, Clone)]
pub struct WordNode {
    pub key: String,
    pub children: Vec<String>,
    pub child_indices: Vec<usize>,
}

/// A fully resolved Markov chain. Never mutated after loading.
#[derive(Debug, Clone)]
pub struct ChainGraph {
    /// All nodes, in corpus line order.
    pub nodes: Vec<WordNode>,
    /// Index of the sentence-separator node.
    pub terminator: usize,
}

impl ChainGraph {
    /// First byte of the terminator's display key, used by the walker's
    /// sentence-boundary heuristic.
    pub fn terminator_initial(&self) -> u8 {
        self.nodes[self.terminator].key.as_bytes()[0]
    }
}

/// The set of loaded chains, published atomically exactly once.
///
/// Handlers clone the inner `Arc` at request start; until `publish` runs,
/// `get` returns `None` and the caller answers with the not-ready response.
#[derive(Debug, Clone, Default)]
pub struct ChainSet {
    inner: Arc<OnceLock<Arc<Vec<ChainGraph>>>>,
}

impl ChainSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish the loaded chains. Returns false if already published.
    pub fn publish(&self, chains: Vec<ChainGraph>) -> bool {
        self.inner.set(Arc::new(chains)).is_ok()
    }

    /// Take a stable reference to the published chains, if any.
    pub fn get(&self) -> Option<Arc<Vec<ChainGraph>>> {
        self.inner.get().cloned()
    }

    pub fn is_ready(&self) -> bool {
        self.inner.get().is_some()
    }
}
