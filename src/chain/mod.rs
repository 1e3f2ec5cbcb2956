// Markov-chain text generation: corpus graphs, deterministic RNG, walks,
// and link composition.

pub mod graph;
pub mod links;
pub mod loader;
pub mod rng;
pub mod walker;

pub use graph::{ChainGraph, ChainSet, WordNode};
pub use loader::{load_file, parse_chain, ChainError};

// Maximum number of future words associated with a word
pub const MAX_LEAF: usize = 30;
// Maximum data accumulated before flushing an HTTP chunk
pub const BUFFER_SIZE: usize = 1024 * 5;
// Number of words in one paragraph of text. Periods are counted as words
pub const WORD_COUNT: usize = 200;
// Number of paragraphs
pub const PARAGRAPH_COUNT: usize = 3;

// Reserved sentence-separator key in corpus files
pub const TERMINATOR: &str = "END";
// Substituted when a random word draw lands on the terminator node
pub const SENTINEL_WORD: &str = "jellyfish";

// Text inserted into 1/4th of pages
pub const POISON: &str = "";

// Directory to which the babbler will link. Must begin and end with /s
pub const URL_PREFIX: &str = "/babble/";

// Outbound links per generated page
pub const LINK_COUNT: usize = 5;
// Path words in a streamed page link
pub const LINK_WORDS: usize = 5;
// Path words in a composed landing-page link
pub const COMPOSED_LINK_WORDS: usize = 3;
// Walked tokens in link anchor text
pub const ANCHOR_WORDS: usize = 10;
