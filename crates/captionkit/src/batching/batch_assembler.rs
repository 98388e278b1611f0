//! # Batch Assembler

use crate::{
    batching::PaddedSequences,
    errors::{CKResult, CaptionError},
    samples::CaptionSample,
    types::TokenType,
    vocab::ReservedToken,
};

/// A rectangular batch of caption-aligned images and padded captions.
///
/// For every `i < len()`, `images[i]` is the image of the caption in row `i`
/// of `captions`, whose true length is `lengths[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionBatch<I, T> {
    /// One image per caption row.
    pub images: Vec<I>,

    /// Padded caption ids, `(len(), max(lengths))`.
    pub captions: PaddedSequences<T>,

    /// Unpadded caption lengths.
    pub lengths: Vec<usize>,

    /// Per sample, every caption as wrapped tokens; for reference metrics.
    pub all_captions: Vec<Vec<Vec<String>>>,
}

impl<I, T> CaptionBatch<I, T> {
    /// Number of caption rows.
    pub fn len(&self) -> usize {
        self.lengths.len()
    }

    /// Is the batch empty? Never true for an assembled batch.
    pub fn is_empty(&self) -> bool {
        self.lengths.is_empty()
    }

    /// The longest caption length; the padded width.
    pub fn max_len(&self) -> usize {
        self.captions.width()
    }
}

/// Assemble samples into one [`CaptionBatch`], padding with the `PAD` id.
///
/// ## Errors
/// [`CaptionError::EmptyBatch`] when `samples` is empty.
pub fn assemble_batch<I, T>(samples: Vec<CaptionSample<I, T>>) -> CKResult<CaptionBatch<I, T>>
where
    T: TokenType,
{
    if samples.is_empty() {
        return Err(CaptionError::EmptyBatch);
    }

    let rows: usize = samples.iter().map(CaptionSample::len).sum();
    let mut images = Vec::with_capacity(rows);
    let mut captions = Vec::with_capacity(rows);
    let mut lengths = Vec::with_capacity(rows);
    let mut all_captions = Vec::with_capacity(samples.len());

    for sample in samples {
        for pair in sample.pairs {
            lengths.push(pair.caption.len());
            images.push(pair.image);
            captions.push(pair.caption);
        }
        all_captions.push(sample.all_captions);
    }

    let pad = T::from_usize(ReservedToken::Pad.index()).unwrap_or_else(T::zero);
    let captions = PaddedSequences::from_sequences(&captions, pad);

    log::debug!(
        "assembled batch: {} captions from {} samples, padded width {}",
        captions.rows(),
        all_captions.len(),
        captions.width()
    );

    Ok(CaptionBatch {
        images,
        captions,
        lengths,
        all_captions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::samples::CaptionPair;

    fn sample(
        image_id: &str,
        image: char,
        captions: &[Vec<u32>],
    ) -> CaptionSample<char, u32> {
        CaptionSample {
            image_id: image_id.to_string(),
            pairs: captions
                .iter()
                .map(|c| CaptionPair {
                    image,
                    caption: c.clone(),
                })
                .collect(),
            all_captions: captions
                .iter()
                .map(|c| c.iter().map(|id| id.to_string()).collect())
                .collect(),
        }
    }

    #[test]
    fn test_lengths_and_padding() {
        let batch = assemble_batch(vec![
            sample("a", 'a', &[vec![2, 4, 3]]),
            sample("b", 'b', &[vec![2, 4, 5, 6, 3]]),
            sample("c", 'c', &[vec![2, 3]]),
        ])
        .unwrap();

        assert_eq!(batch.lengths, vec![3, 5, 2]);
        assert_eq!(batch.captions.shape(), (3, 5));
        assert_eq!(batch.max_len(), 5);

        assert_eq!(batch.captions.row(0), &[2, 4, 3, 0, 0]);
        assert_eq!(batch.captions.row(1), &[2, 4, 5, 6, 3]);
        assert_eq!(batch.captions.row(2), &[2, 3, 0, 0, 0]);
    }

    #[test]
    fn test_repeated_images_stay_aligned() {
        let a = vec![vec![2, 10, 3], vec![2, 11, 12, 3], vec![2, 13, 3]];
        let b = vec![vec![2, 20, 21, 22, 23, 3], vec![2, 24, 3]];
        let batch = assemble_batch(vec![sample("a", 'a', &a), sample("b", 'b', &b)]).unwrap();

        assert_eq!(batch.len(), 5);
        assert_eq!(batch.images, vec!['a', 'a', 'a', 'b', 'b']);
        for (i, expected) in a.iter().chain(b.iter()).enumerate() {
            assert_eq!(&batch.captions.row(i)[..batch.lengths[i]], expected.as_slice());
        }

        assert_eq!(batch.all_captions.len(), 2);
        assert_eq!(batch.all_captions[0].len(), 3);
        assert_eq!(batch.all_captions[1][1], vec!["2", "24", "3"]);
    }

    #[test]
    fn test_empty_batch() {
        let samples: Vec<CaptionSample<char, u32>> = Vec::new();
        assert!(matches!(assemble_batch(samples), Err(CaptionError::EmptyBatch)));
    }
}
