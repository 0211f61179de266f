use thiserror::Error;

/// Errors raised while building or restoring a recommender.
///
/// Per-query outcomes (no match above the threshold, no shared keywords,
/// unknown query terms) are never errors; they show up in the returned data.
#[derive(Debug, Error)]
pub enum RecommendError {
    /// No model can be fitted over zero documents.
    #[error("cannot fit a model over an empty corpus")]
    EmptyCorpus,

    #[error("default relevancy threshold must be a number, got {0}")]
    InvalidThreshold(f64),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("model snapshot encoding failed: {0}")]
    Snapshot(#[from] serde_cbor::Error),

    /// The snapshot was fitted over a corpus of a different size.
    #[error("model snapshot holds {found} document rows but the corpus has {expected} documents")]
    SnapshotMismatch { expected: usize, found: usize },

    /// A document's keywords, as normalized now, differ from the counts
    /// stored in the snapshot for it.
    #[error("model snapshot does not match the keywords of document {0}")]
    SnapshotKeywords(String),

    /// The snapshot decoded but its parts disagree in shape.
    #[error("corrupt model snapshot: {0}")]
    CorruptSnapshot(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RecommendError>;
