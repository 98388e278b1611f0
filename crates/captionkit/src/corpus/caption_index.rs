//! # Caption Index

use crate::types::{CKHashMap, hash_map_with_capacity};

/// Raw captions grouped by image id.
///
/// Caption order within an image follows corpus row order.
#[derive(Debug, Clone, Default)]
pub struct CaptionIndex {
    captions: CKHashMap<String, Vec<String>>,
}

impl<K, V> FromIterator<(K, V)> for CaptionIndex
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut index = CaptionIndex::default();
        for (image_id, caption) in iter {
            index.push(image_id.into(), caption.into());
        }
        index
    }
}

impl CaptionIndex {
    /// Create an empty index with room for `images` image ids.
    pub fn with_capacity(images: usize) -> Self {
        Self {
            captions: hash_map_with_capacity(images),
        }
    }

    pub(crate) fn push(
        &mut self,
        image_id: String,
        caption: String,
    ) {
        self.captions.entry(image_id).or_default().push(caption);
    }

    /// The captions for `image_id`; empty when it has none.
    pub fn captions(
        &self,
        image_id: &str,
    ) -> &[String] {
        self.captions
            .get(image_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of image ids with at least one caption.
    pub fn num_images(&self) -> usize {
        self.captions.len()
    }

    /// Total number of captions.
    pub fn num_captions(&self) -> usize {
        self.captions.values().map(Vec::len).sum()
    }
}
