use thiserror::Error;

/// Errors raised at the edges of the crate. Building and querying a tree
/// never fail.
#[derive(Debug, Error)]
pub enum Error {
    /// An interval whose start lies after its end.
    #[error("interval start {start} lies after its end {end}")]
    InvertedInterval { start: i128, end: i128 },

    /// Build parameters could not be parsed.
    #[error("invalid build parameters: {0}")]
    Config(#[from] serde_json::Error),
}
