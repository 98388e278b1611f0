//! # `captionkit` Caption Data Pipeline
//!
//! Prepares image-caption data for sequence-model training.
//!
//! See:
//! * [`tokenizer`] to normalize caption text into word tokens.
//! * [`vocab`] to build, freeze, and persist a [`vocab::CaptionVocab`].
//! * [`corpus`] to load the caption table and group it by image.
//! * [`samples`] to load aligned `(image, encoded caption)` samples.
//! * [`batching`] to pad samples into rectangular batches.
//! * [`splits`] to partition image ids into train / dev / test.
//! * [`training`] for early stopping and named checkpoint blobs.
//!
//! ## Crate Features
//!
//! #### feature: ``ahash``
//!
//! Swaps the crate's hash maps for ``ahash``; see ``types::CKHashMap``.
//!
//! #### feature: ``rayon``
//!
//! Loads the samples of a batch in parallel.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use captionkit::{
//!     batching::DataLoaderOptions,
//!     corpus::{CaptionCorpus, CorpusOptions},
//!     images::DirectoryImageSource,
//!     samples::{CaptionDataset, SampleLoaderOptions},
//!     splits::{SplitOptions, list_image_ids, split_image_ids},
//!     vocab::CaptionVocab,
//! };
//!
//! # fn main() -> captionkit::CKResult<()> {
//! let corpus = CaptionCorpus::from_path("results.csv", &CorpusOptions::default())?;
//! let vocab: CaptionVocab<u32> = CaptionVocab::build(corpus.captions(), 5)?;
//!
//! let ids = list_image_ids("flickr30k-images", "jpg")?;
//! let split = split_image_ids(ids, &SplitOptions::default().with_seed(Some(0)))?;
//!
//! let loader = SampleLoaderOptions::default().init(Arc::new(vocab));
//! let images = DirectoryImageSource::new("flickr30k-images");
//! let dataset = CaptionDataset::from_corpus(split.train, &corpus, images, loader);
//!
//! let mut batches = DataLoaderOptions::default().with_shuffle(true).init()?;
//! for batch in batches.iter(&dataset) {
//!     let batch = batch?;
//!     assert_eq!(batch.images.len(), batch.lengths.len());
//! }
//! # Ok(())
//! # }
//! ```
#![warn(missing_docs, unused)]

pub mod batching;
pub mod corpus;
pub mod errors;
pub mod images;
pub mod samples;
pub mod splits;
pub mod tokenizer;
pub mod training;
pub mod types;
pub mod vocab;

#[doc(inline)]
pub use errors::{CKResult, CaptionError};
