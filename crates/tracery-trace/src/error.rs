//! Error types shared with the embedding caller.

use thiserror::Error;

/// Result type for trace operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced around a simulation trace.
///
/// `Pattern` and `Alphabet` originate in the automaton collaborator and are
/// reported to the caller before playback is ever invoked. They live here so
/// every part of an embedding application shares one vocabulary for a failed
/// test attempt, which must stay a no-op for playback.
#[derive(Debug, Error)]
pub enum Error {
    /// The input expression could not be turned into an automaton.
    #[error("malformed pattern: {0}")]
    Pattern(String),

    /// The test string contains a symbol outside the declared alphabet.
    #[error("symbol {symbol:?} is not in the alphabet")]
    Alphabet { symbol: String },

    /// The verdict and the routes disagree.
    #[error("inconsistent trace: {0}")]
    Inconsistent(&'static str),
}
