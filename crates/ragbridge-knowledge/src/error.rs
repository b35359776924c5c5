//! Error types for ragbridge-knowledge.

/// Errors that can occur while aggregating chunks into knowledge blocks.
#[derive(Debug, thiserror::Error)]
pub enum KnowledgeError {
    /// The chunk list was not a JSON array.
    #[error("chunks must be a JSON array, got {0}")]
    NotAnArray(&'static str),

    /// A chunk is missing a required field or has the wrong shape.
    #[error("invalid chunk at position {index}: {source}")]
    InvalidChunk {
        index: usize,
        source: serde_json::Error,
    },

    /// The document-info response body was not a JSON object.
    #[error("document info response must be a JSON object, got {0}")]
    UnexpectedResponse(&'static str),

    /// Document-info request failed.
    #[error(transparent)]
    Client(#[from] ragbridge_client::ClientError),
}

/// Result type alias using `KnowledgeError`.
pub type Result<T> = std::result::Result<T, KnowledgeError>;
