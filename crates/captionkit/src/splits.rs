//! # Data Splits
//!
//! Partitions image ids into train / dev / test subsets.

use std::{
    fs::{self, File},
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

use crate::errors::{CKResult, CaptionError};

/// Default fraction of ids assigned to the train split.
pub const DEFAULT_TRAIN_RATIO: f64 = 0.8;

/// Default image file extension.
pub const DEFAULT_IMAGE_EXTENSION: &str = "jpg";

/// Split file names, in [`DataSplit`] field order.
pub const SPLIT_FILE_NAMES: [&str; 3] = ["train.txt", "dev.txt", "test.txt"];

/// Options for [`split_image_ids`].
#[derive(Debug, Clone)]
pub struct SplitOptions {
    /// Fraction of ids for training; the rest is halved into dev and test.
    pub train_ratio: f64,

    /// Shuffle seed; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            train_ratio: DEFAULT_TRAIN_RATIO,
            seed: None,
        }
    }
}

impl SplitOptions {
    /// Set the train ratio.
    pub fn with_train_ratio(
        self,
        train_ratio: f64,
    ) -> Self {
        Self {
            train_ratio,
            ..self
        }
    }

    /// Set the shuffle seed.
    pub fn with_seed(
        self,
        seed: Option<u64>,
    ) -> Self {
        Self { seed, ..self }
    }

    /// The `(train, dev, test)` sizes for `n` ids.
    pub fn split_sizes(
        &self,
        n: usize,
    ) -> CKResult<(usize, usize, usize)> {
        if !(0.0..=1.0).contains(&self.train_ratio) {
            return Err(CaptionError::InvalidConfig(format!(
                "train_ratio must be in [0, 1]: {}",
                self.train_ratio
            )));
        }
        let train = (self.train_ratio * n as f64) as usize;
        let dev = (n - train) / 2;
        Ok((train, dev, n - train - dev))
    }
}

/// A train / dev / test partition of image ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataSplit {
    /// Training ids.
    pub train: Vec<String>,

    /// Validation ids.
    pub dev: Vec<String>,

    /// Test ids.
    pub test: Vec<String>,
}

impl DataSplit {
    fn parts(&self) -> [&Vec<String>; 3] {
        [&self.train, &self.dev, &self.test]
    }

    /// Write `train.txt`, `dev.txt` and `test.txt` under `dir`, one id per line.
    pub fn save_dir<P: AsRef<Path>>(
        &self,
        dir: P,
    ) -> CKResult<()> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        for (name, ids) in SPLIT_FILE_NAMES.iter().zip(self.parts()) {
            let mut writer = BufWriter::new(File::create(dir.join(name))?);
            for id in ids {
                writeln!(writer, "{id}")?;
            }
            writer.flush()?;
        }
        Ok(())
    }

    /// Read a split written by [`Self::save_dir`].
    pub fn load_dir<P: AsRef<Path>>(dir: P) -> CKResult<Self> {
        let dir = dir.as_ref();
        let [train, dev, test] = SPLIT_FILE_NAMES.map(|name| read_id_list(dir.join(name)));
        Ok(Self {
            train: train?,
            dev: dev?,
            test: test?,
        })
    }
}

/// Read one id per line, skipping blank lines.
pub fn read_id_list<P: AsRef<Path>>(path: P) -> CKResult<Vec<String>> {
    let reader = BufReader::new(File::open(path)?);
    let mut ids = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let id = line.trim();
        if !id.is_empty() {
            ids.push(id.to_string());
        }
    }
    Ok(ids)
}

/// List image file names in `dir` whose extension is `extension`, sorted.
pub fn list_image_ids<P: AsRef<Path>>(
    dir: P,
    extension: &str,
) -> CKResult<Vec<String>> {
    let mut ids = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !entry.file_type()?.is_file()
            || path.extension().and_then(|e| e.to_str()) != Some(extension)
        {
            continue;
        }
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            ids.push(name.to_string());
        }
    }
    ids.sort();
    Ok(ids)
}

/// Shuffle `image_ids` and cut them into a [`DataSplit`].
pub fn split_image_ids(
    mut image_ids: Vec<String>,
    options: &SplitOptions,
) -> CKResult<DataSplit> {
    let (train, dev, _) = options.split_sizes(image_ids.len())?;

    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    image_ids.shuffle(&mut rng);

    let test = image_ids.split_off(train + dev);
    let dev = image_ids.split_off(train);
    let split = DataSplit {
        train: image_ids,
        dev,
        test,
    };

    log::info!(
        "split {} images: train={} dev={} test={}",
        split.train.len() + split.dev.len() + split.test.len(),
        split.train.len(),
        split.dev.len(),
        split.test.len()
    );
    Ok(split)
}
