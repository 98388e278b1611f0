use std::{path::Path, sync::Arc};

use captionkit::{
    batching::{DEFAULT_BATCH_SIZE, DataLoaderOptions},
    images::DirectoryImageSource,
    samples::{CaptionDataset, SampleLoaderOptions},
    splits::read_id_list,
    vocab::{CaptionVocab, io::load_vocab_path},
};

use crate::{corpus_args::CorpusArgs, logging::LogArgs, tokenizer_args::TokenizerArgs};

/// Args for the batches command.
#[derive(clap::Args, Debug)]
pub struct BatchesArgs {
    #[clap(flatten)]
    pub logging: LogArgs,

    #[command(flatten)]
    corpus: CorpusArgs,

    // Must match the flags the vocabulary was built with.
    #[command(flatten)]
    tokenizer: TokenizerArgs,

    /// Vocabulary file from the `vocab` command.
    #[arg(long)]
    vocab: String,

    /// Split file (one image id per line), e.g. `splits/train.txt`.
    #[arg(long)]
    split: String,

    /// Directory of images.
    #[arg(long)]
    image_dir: String,

    /// Images per batch.
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    batch_size: usize,

    /// Encode only the first caption of each image.
    #[arg(long)]
    first_caption_only: bool,

    /// Shuffle the split.
    #[arg(long)]
    shuffle: bool,

    /// Shuffle seed.
    #[arg(long, default_value = None)]
    seed: Option<u64>,
}

impl BatchesArgs {
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.init()?;

        let corpus = self.corpus.load()?;
        let vocab: CaptionVocab<u32> = load_vocab_path(&self.vocab)?;
        log::info!("Vocabulary Size: {}", vocab.size());

        let ids = read_id_list(&self.split)?;
        log::info!(
            "{} images in {}",
            ids.len(),
            Path::new(&self.split).display()
        );

        let loader = SampleLoaderOptions::default()
            .with_first_caption_only(self.first_caption_only)
            .with_tokenizer(self.tokenizer.tokenizer())
            .init(Arc::new(vocab));
        let dataset = CaptionDataset::from_corpus(
            ids,
            &corpus,
            DirectoryImageSource::new(&self.image_dir),
            loader,
        );

        let mut batches = DataLoaderOptions::default()
            .with_batch_size(self.batch_size)
            .with_shuffle(self.shuffle)
            .with_seed(self.seed)
            .init()?;

        let num_batches = batches.num_batches(dataset.len());
        let mut captions = 0;
        for (idx, batch) in batches.iter(&dataset).enumerate() {
            let batch = batch?;
            let (rows, width) = batch.captions.shape();
            log::info!("batch {}/{}: captions={rows} max_len={width}", idx + 1, num_batches);
            captions += rows;
        }
        log::info!("{captions} captions in {num_batches} batches");

        Ok(())
    }
}
