// Bounded, seed-driven walk over a chain, rendered as sentence text.

use super::graph::ChainGraph;
use super::rng;

/// One emitted step of a walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step<'g> {
    /// A rendered word. `capitalize` is set for the first word of a sentence.
    Word { text: &'g str, capitalize: bool },
    /// A sentence boundary. `period` is false when the boundary lands while
    /// already at a sentence start, in which case nothing is rendered.
    Boundary { period: bool },
}

/// A lazy walk of exactly `remaining` steps. Borrows the caller's seed so
/// consecutive walks on one request continue the same deterministic sequence.
pub struct Walk<'g, 's> {
    graph: &'g ChainGraph,
    seed: &'s mut u32,
    at: usize,
    capitalize: bool,
    remaining: usize,
    boundary_initial: u8,
}

impl<'g, 's> Walk<'g, 's> {
    pub fn new(graph: &'g ChainGraph, steps: usize, seed: &'s mut u32) -> Self {
        Self {
            graph,
            seed,
            at: graph.terminator,
            capitalize: true,
            remaining: steps,
            boundary_initial: graph.terminator_initial(),
        }
    }
}

impl<'g> Iterator for Walk<'g, '_> {
    type Item = Step<'g>;

    fn next(&mut self) -> Option<Step<'g>> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let children = &self.graph.nodes[self.at].child_indices;
        if children.is_empty() {
            // A childless node dead-ends the walk; real corpora never
            // produce one.
            self.remaining = 0;
            return None;
        }

        // Squaring the uniform draw biases selection toward earlier-indexed
        // (more frequent) children.
        let r = (rng::next(self.seed) % 900) as f64 / 900.0;
        let r = r * r * children.len() as f64;
        let selection = (r as usize).min(children.len() - 1);
        self.at = children[selection];

        let key = self.graph.nodes[self.at].key.as_str();

        // Boundary detection is by first byte only. Any ordinary word that
        // happens to start with the terminator's first letter is misdetected
        // as a boundary; that heuristic is load-bearing, keep it.
        if !key.is_empty() && key.as_bytes()[0] == self.boundary_initial {
            let period = !self.capitalize;
            self.capitalize = true;
            Some(Step::Boundary { period })
        } else {
            let capitalize = self.capitalize;
            self.capitalize = false;
            Some(Step::Word { text: key, capitalize })
        }
    }
}

/// Walk `length` steps and append the rendered text to `out`.
///
/// Words are preceded by a single space and fully uppercased at sentence
/// starts; boundaries render as a period except at a sentence start.
pub fn write_text(graph: &ChainGraph, length: usize, out: &mut String, seed: &mut u32) {
    for step in Walk::new(graph, length, seed) {
        match step {
            Step::Word { text, capitalize } => {
                out.push(' ');
                if capitalize {
                    out.push_str(&text.to_uppercase());
                } else {
                    out.push_str(text);
                }
            }
            Step::Boundary { period: true } => out.push('.'),
            Step::Boundary { period: false } => {}
        }
    }
}

/// Buffered convenience form of [`write_text`].
pub fn random_text(graph: &ChainGraph, length: usize, seed: &mut u32) -> String {
    let mut out = String::new();
    write_text(graph, length, &mut out, seed);
    out
}
