// Corpus parsing and resolution into an immutable ChainGraph.
//
// Load-time integrity is mandatory: an unresolved child key or a missing
// terminator node must never reach the serving path, so every defect here is
// an error that aborts startup.

use std::path::Path;

use super::graph::{ChainGraph, WordNode};
use super::{MAX_LEAF, TERMINATOR};

/// Errors raised while loading a corpus file. All of them are fatal at
/// startup; none can occur once a chain has been published.
#[derive(Debug, thiserror::Error)]
pub enum ChainError {
    #[error("failed to read corpus file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("no matching entry found for word: {0}")]
    UnresolvedChild(String),
    #[error("sentence separator '{TERMINATOR}' not found in chain")]
    MissingTerminator,
}

/// Load and resolve a corpus file from disk.
pub fn load_file(path: &Path) -> Result<ChainGraph, ChainError> {
    tracing::info!("    Loading {}...", path.display());
    let text = std::fs::read_to_string(path).map_err(|source| ChainError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_chain(&text)
}

/// Parse corpus text into a resolved chain.
///
/// One node per non-empty line: the first whitespace token is the key, the
/// rest are raw child keys, capped at [`MAX_LEAF`] with extras dropped. Order
/// and duplicates are preserved — a repeated child is a heavier edge.
pub fn parse_chain(text: &str) -> Result<ChainGraph, ChainError> {
    let mut nodes: Vec<WordNode> = Vec::new();
    let mut terminator = None;

    for line in text.lines() {
        let mut tokens = line.split_whitespace();
        let key = match tokens.next() {
            Some(k) => k.to_string(),
            None => continue,
        };

        let children: Vec<String> = tokens.take(MAX_LEAF).map(str::to_string).collect();

        if terminator.is_none() && key == TERMINATOR {
            terminator = Some(nodes.len());
        }
        nodes.push(WordNode {
            key,
            children,
            child_indices: Vec::new(),
        });
    }

    let terminator = terminator.ok_or(ChainError::MissingTerminator)?;

    // Resolve each raw child to the index of the first node with that key.
    for i in 0..nodes.len() {
        let indices = nodes[i]
            .children
            .iter()
            .map(|child| {
                nodes
                    .iter()
                    .position(|node| node.key == *child)
                    .ok_or_else(|| ChainError::UnresolvedChild(child.clone()))
            })
            .collect::<Result<Vec<usize>, ChainError>>()?;
        nodes[i].child_indices = indices;
    }

    // Truncate display keys at the first hyphen. Two corpus tokens sharing a
    // hyphen prefix render as the same word while keeping separate identities
    // (a cheap way to hack higher-order chains into the format). This must
    // run after resolution so it never perturbs edge indices.
    for node in &mut nodes {
        if let Some(hyphen) = node.key.find('-') {
            node.key.truncate(hyphen);
        }
    }

    Ok(ChainGraph { nodes, terminator })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_node_corpus() {
        let chain = parse_chain("END cat dog\ncat dog END\ndog cat END\n").unwrap();

        assert_eq!(chain.nodes.len(), 3);
        assert_eq!(chain.terminator, 0);
        assert_eq!(chain.nodes[chain.terminator].key, "END");

        for node in &chain.nodes {
            assert_eq!(node.children.len(), node.child_indices.len());
            for &idx in &node.child_indices {
                assert!(idx < chain.nodes.len());
            }
        }

        // "cat" -> [dog, END] resolves to [2, 0]
        assert_eq!(chain.nodes[1].child_indices, vec![2, 0]);
    }

    #[test]
    fn test_unresolved_child_is_fatal() {
        let err = parse_chain("END cat\ncat ghost\n").unwrap_err();
        assert!(matches!(err, ChainError::UnresolvedChild(word) if word == "ghost"));
    }

    #[test]
    fn test_missing_terminator_is_fatal() {
        let err = parse_chain("cat dog\ndog cat\n").unwrap_err();
        assert!(matches!(err, ChainError::MissingTerminator));
    }

    #[test]
    fn test_children_capped_at_max_leaf() {
        let mut line = String::from("END");
        for _ in 0..MAX_LEAF + 10 {
            line.push_str(" cat");
        }
        line.push_str("\ncat END\n");

        let chain = parse_chain(&line).unwrap();
        assert_eq!(chain.nodes[0].children.len(), MAX_LEAF);
    }

    #[test]
    fn test_duplicate_children_preserved_as_weight() {
        let chain = parse_chain("END cat cat cat dog\ncat END\ndog END\n").unwrap();
        assert_eq!(chain.nodes[0].children, vec!["cat", "cat", "cat", "dog"]);
        assert_eq!(chain.nodes[0].child_indices, vec![1, 1, 1, 2]);
    }

    #[test]
    fn test_child_resolves_to_first_matching_node() {
        // Two lines keyed "cat": children referencing "cat" must resolve to
        // the first one.
        let chain = parse_chain("END cat\ncat END\ncat dog\ndog cat\n").unwrap();
        assert_eq!(chain.nodes[0].child_indices, vec![1]);
        assert_eq!(chain.nodes[3].child_indices, vec![1]);
    }

    #[test]
    fn test_hyphen_truncation_after_resolution() {
        // "walk-1" and "walk-2" are distinct graph nodes that render as the
        // same visible word. Resolution happens on the raw keys, so edges to
        // each alias stay distinct.
        let chain = parse_chain("END walk-1\nwalk-1 walk-2\nwalk-2 END\n").unwrap();

        assert_eq!(chain.nodes[1].key, "walk");
        assert_eq!(chain.nodes[2].key, "walk");
        assert_eq!(chain.nodes[0].child_indices, vec![1]);
        assert_eq!(chain.nodes[1].child_indices, vec![2]);
    }

    #[test]
    fn test_blank_lines_skipped() {
        let chain = parse_chain("\nEND cat\n\n\ncat END\n\n").unwrap();
        assert_eq!(chain.nodes.len(), 2);
    }

    #[test]
    fn test_load_file_missing_path() {
        let err = load_file(Path::new("/nonexistent/corpus.txt")).unwrap_err();
        assert!(matches!(err, ChainError::Io { .. }));
    }
}
