//! # Batching
//!
//! [`assemble_batch`] flattens samples into caption-aligned rows and pads them
//! to the batch's longest caption; [`CaptionDataLoader`] drives it over a
//! dataset.
pub mod batch_assembler;
pub mod data_loader;
pub mod padded;

#[doc(inline)]
pub use batch_assembler::{CaptionBatch, assemble_batch};
#[doc(inline)]
pub use data_loader::{
    BatchIter,
    CaptionDataLoader,
    DEFAULT_BATCH_SIZE,
    DataLoaderOptions,
    load_samples,
};
#[doc(inline)]
pub use padded::PaddedSequences;
