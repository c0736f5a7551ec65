/// A failure of the line-delivery channel itself.
///
/// This says nothing about the script: the remote engine may well have
/// executed it fine. Script failures arrive as response lines instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("Failed to open the response stream: {0}")]
    Connect(String),
    #[error("Response stream broke: {0}")]
    Stream(String),
    #[error("Could not decode response line: {0}")]
    Decode(String),
}

/// The ways an aggregation can settle without producing an outcome.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AggregationError {
    #[error("Transport failure: {0}")]
    Transport(#[from] TransportError),
    #[error("Aggregation was dropped before the response stream terminated")]
    Abandoned,
}
