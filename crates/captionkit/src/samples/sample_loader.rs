//! # Sample Loader

use std::sync::Arc;

use crate::{
    corpus::CaptionIndex,
    errors::{CKResult, CaptionError},
    images::ImageSource,
    tokenizer::CaptionTokenizer,
    types::TokenType,
    vocab::{CaptionVocab, specials::wrap_caption},
};

/// Options for [`SampleLoader`].
#[derive(Debug, Clone, Default)]
pub struct SampleLoaderOptions {
    /// Encode only the first caption of each image.
    pub first_caption_only: bool,

    /// The caption tokenizer.
    pub tokenizer: CaptionTokenizer,
}

impl SampleLoaderOptions {
    /// Set first-caption-only mode.
    pub fn with_first_caption_only(
        self,
        first_caption_only: bool,
    ) -> Self {
        Self {
            first_caption_only,
            ..self
        }
    }

    /// Set the tokenizer.
    pub fn with_tokenizer(
        self,
        tokenizer: CaptionTokenizer,
    ) -> Self {
        Self { tokenizer, ..self }
    }

    /// Build a [`SampleLoader`] over a frozen vocabulary.
    pub fn init<T: TokenType>(
        self,
        vocab: Arc<CaptionVocab<T>>,
    ) -> SampleLoader<T> {
        SampleLoader {
            options: self,
            vocab,
        }
    }
}

/// One image paired with one encoded caption.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionPair<I, T> {
    /// The image.
    pub image: I,

    /// Encoded caption ids, `START .. END` inclusive.
    pub caption: Vec<T>,
}

/// A loaded sample.
///
/// `pairs` holds one entry per encoded caption; the image is repeated
/// so that each caption carries its own image.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionSample<I, T> {
    /// The image id.
    pub image_id: String,

    /// Aligned `(image, encoded caption)` pairs.
    pub pairs: Vec<CaptionPair<I, T>>,

    /// Every caption of the image as wrapped tokens, whatever the mode.
    pub all_captions: Vec<Vec<String>>,
}

impl<I, T> CaptionSample<I, T> {
    /// Number of encoded captions.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Does the sample hold no encoded captions?
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Turns an image id into a [`CaptionSample`].
///
/// Holds no mutable state; the vocabulary is shared read-only, so a loader
/// may be used from many threads at once.
#[derive(Debug, Clone)]
pub struct SampleLoader<T: TokenType> {
    options: SampleLoaderOptions,

    vocab: Arc<CaptionVocab<T>>,
}

impl<T: TokenType> SampleLoader<T> {
    /// Get the options.
    pub fn options(&self) -> &SampleLoaderOptions {
        &self.options
    }

    /// Get the vocabulary.
    pub fn vocab(&self) -> &Arc<CaptionVocab<T>> {
        &self.vocab
    }

    /// Tokenize and wrap a raw caption with `START`/`END`.
    pub fn caption_tokens(
        &self,
        caption: &str,
    ) -> Vec<String> {
        wrap_caption(self.options.tokenizer.tokenize(caption))
    }

    /// Load the sample for `image_id`.
    ///
    /// ## Errors
    /// * [`CaptionError::MissingCaptions`] - `captions` has nothing for `image_id`.
    /// * [`CaptionError::ImageNotFound`] - propagated from `images`.
    ///
    /// A returned sample always holds at least one encoded caption.
    pub fn load<S: ImageSource>(
        &self,
        image_id: &str,
        captions: &CaptionIndex,
        images: &S,
    ) -> CKResult<CaptionSample<S::Image, T>> {
        let raw = captions.captions(image_id);
        if raw.is_empty() {
            return Err(CaptionError::MissingCaptions {
                image_id: image_id.to_string(),
            });
        }

        let image = images.load_image(image_id)?;

        let all_captions: Vec<Vec<String>> = raw.iter().map(|c| self.caption_tokens(c)).collect();

        let encode_count = if self.options.first_caption_only {
            1
        } else {
            all_captions.len()
        };
        let pairs: Vec<CaptionPair<S::Image, T>> = all_captions
            .iter()
            .take(encode_count)
            .map(|tokens| CaptionPair {
                image: image.clone(),
                caption: self.vocab.encode_sequence(tokens),
            })
            .collect();

        Ok(CaptionSample {
            image_id: image_id.to_string(),
            pairs,
            all_captions,
        })
    }
}
