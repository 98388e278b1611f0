//! # Samples
//!
//! Per-image loading: captions are tokenized, wrapped, and encoded against a
//! frozen vocabulary, and paired with the image.
pub mod dataset;
pub mod sample_loader;

#[doc(inline)]
pub use dataset::CaptionDataset;
#[doc(inline)]
pub use sample_loader::{CaptionPair, CaptionSample, SampleLoader, SampleLoaderOptions};
