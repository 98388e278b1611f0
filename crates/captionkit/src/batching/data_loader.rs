//! # Caption Data Loader
//!
//! Walks a [`CaptionDataset`] in batches, optionally shuffled.

use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

use crate::{
    batching::{CaptionBatch, assemble_batch},
    errors::{CKResult, CaptionError},
    images::ImageSource,
    samples::{CaptionDataset, CaptionSample},
    types::TokenType,
};

/// Default batch size.
pub const DEFAULT_BATCH_SIZE: usize = 32;

/// Options for [`CaptionDataLoader`].
#[derive(Debug, Clone)]
pub struct DataLoaderOptions {
    /// Samples (images) per batch.
    pub batch_size: usize,

    /// Shuffle sample order on every pass.
    pub shuffle: bool,

    /// Seed for the shuffle; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for DataLoaderOptions {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            shuffle: false,
            seed: None,
        }
    }
}

impl DataLoaderOptions {
    /// Set the batch size.
    pub fn with_batch_size(
        self,
        batch_size: usize,
    ) -> Self {
        Self { batch_size, ..self }
    }

    /// Enable or disable shuffling.
    pub fn with_shuffle(
        self,
        shuffle: bool,
    ) -> Self {
        Self { shuffle, ..self }
    }

    /// Set the shuffle seed.
    pub fn with_seed(
        self,
        seed: Option<u64>,
    ) -> Self {
        Self { seed, ..self }
    }

    /// Build a [`CaptionDataLoader`].
    pub fn init(self) -> CKResult<CaptionDataLoader> {
        if self.batch_size == 0 {
            return Err(CaptionError::InvalidConfig(
                "batch_size must be > 0".to_string(),
            ));
        }
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Ok(CaptionDataLoader { options: self, rng })
    }
}

/// Batches a dataset.
///
/// Each call to [`Self::iter`] is one pass; with shuffling on, successive
/// passes see different orders drawn from the same seeded generator.
#[derive(Debug, Clone)]
pub struct CaptionDataLoader {
    options: DataLoaderOptions,

    rng: StdRng,
}

impl CaptionDataLoader {
    /// Get the options.
    pub fn options(&self) -> &DataLoaderOptions {
        &self.options
    }

    /// Number of batches for a dataset of `len` samples.
    pub fn num_batches(
        &self,
        len: usize,
    ) -> usize {
        len.div_ceil(self.options.batch_size)
    }

    /// Plan the sample indices of each batch for one pass.
    ///
    /// The last batch may be short; no batch is empty.
    pub fn plan_batches(
        &mut self,
        len: usize,
    ) -> Vec<Vec<usize>> {
        let mut order: Vec<usize> = (0..len).collect();
        if self.options.shuffle {
            order.shuffle(&mut self.rng);
        }
        order
            .chunks(self.options.batch_size)
            .map(<[usize]>::to_vec)
            .collect()
    }

    /// Iterate one pass of batches over `dataset`.
    pub fn iter<'a, S, T>(
        &mut self,
        dataset: &'a CaptionDataset<S, T>,
    ) -> BatchIter<'a, S, T>
    where
        S: ImageSource,
        T: TokenType,
    {
        BatchIter {
            dataset,
            plan: self.plan_batches(dataset.len()).into_iter(),
        }
    }
}

/// Iterator over the batches of one pass.
pub struct BatchIter<'a, S: ImageSource, T: TokenType> {
    dataset: &'a CaptionDataset<S, T>,

    plan: std::vec::IntoIter<Vec<usize>>,
}

impl<S: ImageSource, T: TokenType> Iterator for BatchIter<'_, S, T> {
    type Item = CKResult<CaptionBatch<S::Image, T>>;

    fn next(&mut self) -> Option<Self::Item> {
        let indices = self.plan.next()?;
        Some(load_samples(self.dataset, &indices).and_then(assemble_batch))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.plan.size_hint()
    }
}

/// Load the samples at `indices`, in order.
///
/// Samples are independent, and load in parallel over ``rayon``.
#[cfg(feature = "rayon")]
pub fn load_samples<S, T>(
    dataset: &CaptionDataset<S, T>,
    indices: &[usize],
) -> CKResult<Vec<CaptionSample<S::Image, T>>>
where
    S: ImageSource,
    T: TokenType,
{
    use rayon::prelude::*;
    indices.par_iter().map(|&i| dataset.get(i)).collect()
}

/// Load the samples at `indices`, in order.
#[cfg(not(feature = "rayon"))]
pub fn load_samples<S, T>(
    dataset: &CaptionDataset<S, T>,
    indices: &[usize],
) -> CKResult<Vec<CaptionSample<S::Image, T>>>
where
    S: ImageSource,
    T: TokenType,
{
    indices.iter().map(|&i| dataset.get(i)).collect()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        corpus::CaptionIndex,
        images::MemoryImageSource,
        samples::SampleLoaderOptions,
        vocab::CaptionVocab,
    };

    fn dataset(first_caption_only: bool) -> CaptionDataset<MemoryImageSource<usize>, u32> {
        let ids: Vec<String> = (0..5).map(|i| format!("{i}.jpg")).collect();
        let mut rows = Vec::new();
        for (i, id) in ids.iter().enumerate() {
            for c in 0..5 {
                // caption c of image i has i + c words.
                rows.push((id.clone(), vec!["dog"; i + c].join(" ")));
            }
        }
        let captions: CaptionIndex = rows.into_iter().collect();
        let images: MemoryImageSource<usize> =
            ids.iter().enumerate().map(|(i, id)| (id.clone(), i)).collect();
        let vocab = Arc::new(CaptionVocab::from_tokens(["dog"]).unwrap());
        let loader = SampleLoaderOptions::default()
            .with_first_caption_only(first_caption_only)
            .init(vocab);
        CaptionDataset::new(ids, captions, images, loader)
    }

    #[test]
    fn test_plan_batches() {
        let mut loader = DataLoaderOptions::default().with_batch_size(2).init().unwrap();
        assert_eq!(loader.num_batches(5), 3);
        assert_eq!(
            loader.plan_batches(5),
            vec![vec![0, 1], vec![2, 3], vec![4]]
        );
        assert!(loader.plan_batches(0).is_empty());
    }

    #[test]
    fn test_seeded_shuffle_is_reproducible() {
        let options = DataLoaderOptions::default()
            .with_batch_size(3)
            .with_shuffle(true)
            .with_seed(Some(7));
        let mut a = options.clone().init().unwrap();
        let mut b = options.init().unwrap();

        let plan = a.plan_batches(20);
        assert_eq!(plan, b.plan_batches(20));

        let mut seen: Vec<usize> = plan.into_iter().flatten().collect();
        seen.sort();
        assert_eq!(seen, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn test_zero_batch_size() {
        assert!(matches!(
            DataLoaderOptions::default().with_batch_size(0).init(),
            Err(CaptionError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_full_mode_batches() {
        let dataset = dataset(false);
        let mut loader = DataLoaderOptions::default().with_batch_size(2).init().unwrap();

        let batches: Vec<_> = loader.iter(&dataset).collect::<CKResult<_>>().unwrap();
        assert_eq!(batches.len(), 3);

        let first = &batches[0];
        assert_eq!(first.len(), 10);
        assert_eq!(first.images, vec![0, 0, 0, 0, 0, 1, 1, 1, 1, 1]);
        // image 1, caption 4: 5 words + START/END.
        assert_eq!(first.max_len(), 7);
        for (i, &image) in first.images.iter().enumerate() {
            assert_eq!(first.lengths[i], image + i % 5 + 2);
        }

        assert_eq!(batches[2].len(), 5);
        assert_eq!(batches[2].all_captions.len(), 1);
    }

    #[test]
    fn test_first_caption_only_batches() {
        let dataset = dataset(true);
        let mut loader = DataLoaderOptions::default().with_batch_size(5).init().unwrap();

        let batch = loader.iter(&dataset).next().unwrap().unwrap();
        assert_eq!(batch.images, vec![0, 1, 2, 3, 4]);
        assert_eq!(batch.lengths, vec![2, 3, 4, 5, 6]);
        assert_eq!(batch.all_captions.iter().map(Vec::len).sum::<usize>(), 25);
    }
}
