//! # Error Types

use std::path::PathBuf;

/// Errors from captionkit operations.
#[derive(Debug, thiserror::Error)]
pub enum CaptionError {
    /// An image id in the active split has no captions.
    ///
    /// Every caption encodes to at least `START END`, so this is also the only
    /// way a sample could end up with zero encoded captions.
    #[error("no captions found for image {image_id:?}")]
    MissingCaptions {
        /// The image id.
        image_id: String,
    },

    /// The backing image resource is missing or unreadable.
    #[error("image {image_id:?} not found at {}", .path.display())]
    ImageNotFound {
        /// The image id.
        image_id: String,

        /// The resolved path.
        path: PathBuf,
    },

    /// Decode was asked for an id the vocabulary does not hold.
    #[error("unknown token id: {id}")]
    UnknownId {
        /// The offending id.
        id: usize,
    },

    /// A sample index past the end of a dataset.
    #[error("sample index {index} out of range for {len} samples")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,

        /// The dataset length.
        len: usize,
    },

    /// Batch assembly was called with zero samples.
    #[error("cannot assemble a batch from zero samples")]
    EmptyBatch,

    /// Vocab size exceeds the capacity of the target token type.
    #[error("vocab size ({size}) exceeds token type capacity")]
    VocabSizeOverflow {
        /// The vocab size that exceeded the capacity.
        size: usize,
    },

    /// Persisted vocabulary data is inconsistent.
    #[error("vocabulary conflict: {0}")]
    VocabConflict(String),

    /// Invalid option value.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// The caption table is missing a column or a field.
    #[error("caption corpus format: {0}")]
    CorpusFormat(String),

    /// CSV error.
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// JSON error.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type for captionkit operations.
pub type CKResult<T> = core::result::Result<T, CaptionError>;
