// Randomized internal links and anchor text for the lure pages.

use super::graph::ChainGraph;
use super::rng::{hash_seed, next};
use super::walker::random_text;
use super::{ANCHOR_WORDS, COMPOSED_LINK_WORDS, LINK_COUNT, SENTINEL_WORD, URL_PREFIX};

/// An internal link with generated anchor text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub href: String,
    pub title: String,
}

/// Pick a uniformly random word from the chain.
///
/// The terminator index is substituted with [`SENTINEL_WORD`] so the reserved
/// separator token never leaks into a URL or page body.
pub fn random_word<'g>(graph: &'g ChainGraph, seed: &mut u32) -> &'g str {
    let index = next(seed) as usize % graph.nodes.len();
    if index == graph.terminator {
        SENTINEL_WORD
    } else {
        &graph.nodes[index].key
    }
}

/// Compose a path-style URL of three random words under [`URL_PREFIX`].
pub fn compose_link(chains: &[ChainGraph], mut seed: u32) -> String {
    let graph = &chains[next(&mut seed) as usize % chains.len()];
    let mut href = String::from(URL_PREFIX);
    for offset in 1..=COMPOSED_LINK_WORDS as u32 {
        seed = seed.wrapping_add(offset);
        if offset > 1 {
            href.push('/');
        }
        href.push_str(random_word(graph, &mut seed));
    }
    href
}

/// Compose a short walked title.
pub fn compose_title(chains: &[ChainGraph], mut seed: u32) -> String {
    let graph = &chains[next(&mut seed) as usize % chains.len()];
    random_text(graph, ANCHOR_WORDS, &mut seed)
}

/// Build the deterministic set of five links for a request path.
///
/// The base seed is a pure function of the path, and each link uses a
/// distinct offset: the same path always yields the same set, different
/// paths almost always differ.
pub fn compose_link_set(chains: &[ChainGraph], path: &str) -> Vec<Link> {
    let seed = hash_seed(path);
    (1..=LINK_COUNT as u32)
        .map(|offset| Link {
            href: compose_link(chains, seed.wrapping_add(offset)),
            title: compose_title(chains, seed.wrapping_add(offset)),
        })
        .collect()
}
