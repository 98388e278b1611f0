//! # Caption Dataset

use crate::{
    corpus::{CaptionCorpus, CaptionIndex},
    errors::{CKResult, CaptionError},
    images::ImageSource,
    samples::{CaptionSample, SampleLoader},
    types::TokenType,
};

/// An indexable split: image ids, their captions, and an image source.
pub struct CaptionDataset<S: ImageSource, T: TokenType> {
    image_ids: Vec<String>,

    captions: CaptionIndex,

    images: S,

    loader: SampleLoader<T>,
}

impl<S: ImageSource, T: TokenType> CaptionDataset<S, T> {
    /// Build a dataset over `image_ids`, taking their captions from `corpus`.
    pub fn from_corpus(
        image_ids: Vec<String>,
        corpus: &CaptionCorpus,
        images: S,
        loader: SampleLoader<T>,
    ) -> Self {
        let captions = corpus.index_for(&image_ids);
        Self::new(image_ids, captions, images, loader)
    }

    /// Build a dataset from an already grouped [`CaptionIndex`].
    pub fn new(
        image_ids: Vec<String>,
        captions: CaptionIndex,
        images: S,
        loader: SampleLoader<T>,
    ) -> Self {
        Self {
            image_ids,
            captions,
            images,
            loader,
        }
    }

    /// Number of images in the split.
    pub fn len(&self) -> usize {
        self.image_ids.len()
    }

    /// Is the split empty?
    pub fn is_empty(&self) -> bool {
        self.image_ids.is_empty()
    }

    /// The split's image ids.
    pub fn image_ids(&self) -> &[String] {
        &self.image_ids
    }

    /// The grouped captions.
    pub fn captions(&self) -> &CaptionIndex {
        &self.captions
    }

    /// The sample loader.
    pub fn loader(&self) -> &SampleLoader<T> {
        &self.loader
    }

    /// Load sample `index`.
    pub fn get(
        &self,
        index: usize,
    ) -> CKResult<CaptionSample<S::Image, T>> {
        let image_id = self
            .image_ids
            .get(index)
            .ok_or(CaptionError::IndexOutOfRange {
                index,
                len: self.len(),
            })?;
        self.loader.load(image_id, &self.captions, &self.images)
    }
}
