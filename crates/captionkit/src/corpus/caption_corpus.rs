//! # Caption Corpus
//!
//! Loads the delimited `image id / caption` table.

use std::{fs::File, io::Read, path::Path};

use crate::{
    corpus::CaptionIndex,
    errors::{CKResult, CaptionError},
    types::CKHashSet,
};

/// Default image id column name.
pub const DEFAULT_IMAGE_COLUMN: &str = "image_name";

/// Default caption column name.
pub const DEFAULT_CAPTION_COLUMN: &str = "comment";

/// Options for [`CaptionCorpus`].
///
/// Headers and fields are whitespace-trimmed before matching.
#[derive(Debug, Clone)]
pub struct CorpusOptions {
    /// Field delimiter; `|` for flickr30k, `,` for flickr8k.
    pub delimiter: char,

    /// Name of the image id column.
    pub image_column: String,

    /// Name of the caption column.
    pub caption_column: String,
}

impl Default for CorpusOptions {
    fn default() -> Self {
        Self {
            delimiter: '|',
            image_column: DEFAULT_IMAGE_COLUMN.to_string(),
            caption_column: DEFAULT_CAPTION_COLUMN.to_string(),
        }
    }
}

impl CorpusOptions {
    /// Set the field delimiter.
    pub fn with_delimiter(
        self,
        delimiter: char,
    ) -> Self {
        Self { delimiter, ..self }
    }

    /// Set the image id column name.
    pub fn with_image_column<S: Into<String>>(
        self,
        image_column: S,
    ) -> Self {
        Self {
            image_column: image_column.into(),
            ..self
        }
    }

    /// Set the caption column name.
    pub fn with_caption_column<S: Into<String>>(
        self,
        caption_column: S,
    ) -> Self {
        Self {
            caption_column: caption_column.into(),
            ..self
        }
    }

    fn delimiter_byte(&self) -> CKResult<u8> {
        if self.delimiter.is_ascii() {
            Ok(self.delimiter as u8)
        } else {
            Err(CaptionError::InvalidConfig(format!(
                "delimiter must be ascii: {:?}",
                self.delimiter
            )))
        }
    }
}

/// One `(image id, caption)` row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptionRecord {
    /// The image id.
    pub image_id: String,

    /// The raw caption text.
    pub caption: String,
}

/// The full caption table, in file order.
#[derive(Debug, Clone, Default)]
pub struct CaptionCorpus {
    records: Vec<CaptionRecord>,
}

impl CaptionCorpus {
    /// Load a corpus file.
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        options: &CorpusOptions,
    ) -> CKResult<Self> {
        let path = path.as_ref();
        let corpus = Self::from_reader(File::open(path)?, options)?;
        log::info!(
            "loaded {} captions from {}",
            corpus.len(),
            path.display()
        );
        Ok(corpus)
    }

    /// Load a corpus from a reader.
    pub fn from_reader<R: Read>(
        reader: R,
        options: &CorpusOptions,
    ) -> CKResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter_byte()?)
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let column = |name: &str| {
            headers.iter().position(|h| h == name).ok_or_else(|| {
                CaptionError::CorpusFormat(format!(
                    "missing column {name:?}; found {:?}",
                    headers.iter().collect::<Vec<_>>()
                ))
            })
        };
        let image_col = column(&options.image_column)?;
        let caption_col = column(&options.caption_column)?;

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row?;
            let field = |col: usize| {
                row.get(col).map(str::to_string).ok_or_else(|| {
                    let line = row.position().map(|p| p.line()).unwrap_or_default();
                    CaptionError::CorpusFormat(format!("line {line}: missing field {col}"))
                })
            };
            records.push(CaptionRecord {
                image_id: field(image_col)?,
                caption: field(caption_col)?,
            });
        }

        Ok(Self { records })
    }

    /// Build from in-memory rows.
    pub fn from_records(records: Vec<CaptionRecord>) -> Self {
        Self { records }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Is the corpus empty?
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The rows, in file order.
    pub fn records(&self) -> &[CaptionRecord] {
        &self.records
    }

    /// Every caption, in file order.
    pub fn captions(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.caption.as_str())
    }

    /// Group the captions of the images in `image_ids`.
    ///
    /// Rows for images outside `image_ids` are dropped.
    pub fn index_for<S: AsRef<str>>(
        &self,
        image_ids: &[S],
    ) -> CaptionIndex {
        let active: CKHashSet<&str> = image_ids.iter().map(|id| id.as_ref()).collect();

        let mut index = CaptionIndex::with_capacity(active.len());
        for record in &self.records {
            if active.contains(record.image_id.as_str()) {
                index.push(record.image_id.clone(), record.caption.clone());
            }
        }

        let missing = active
            .iter()
            .filter(|id| index.captions(id).is_empty())
            .count();
        if missing > 0 {
            log::warn!("{missing} of {} split images have no captions", active.len());
        }

        index
    }
}
