//! # Caption Corpus
//!
//! Loading of the caption table and grouping by image id.
pub mod caption_corpus;
pub mod caption_index;

#[doc(inline)]
pub use caption_corpus::{CaptionCorpus, CaptionRecord, CorpusOptions};
#[doc(inline)]
pub use caption_index::CaptionIndex;
