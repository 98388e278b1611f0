//! # Training Collaborators
//!
//! Boundary pieces for an external training loop: named checkpoint blobs and
//! early-stopping bookkeeping. No model or optimizer lives here.
pub mod checkpoint;
pub mod early_stopping;

#[doc(inline)]
pub use checkpoint::{CheckpointName, CheckpointStore, DirectoryCheckpointStore, TrainingState};
#[doc(inline)]
pub use early_stopping::{EarlyStopping, EarlyStoppingOptions, EpochOutcome, ScoreMode};
