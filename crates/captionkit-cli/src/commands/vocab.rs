use captionkit::vocab::{CaptionVocab, DEFAULT_MIN_FREQUENCY, VocabOptions};

use crate::{
    corpus_args::CorpusArgs,
    input_output::OutputArgs,
    logging::LogArgs,
    tokenizer_args::TokenizerArgs,
};

/// Args for the vocab command.
#[derive(clap::Args, Debug)]
pub struct VocabArgs {
    #[clap(flatten)]
    pub logging: LogArgs,

    #[command(flatten)]
    corpus: CorpusArgs,

    #[command(flatten)]
    tokenizer: TokenizerArgs,

    /// Tokens seen fewer times are mapped to `<unk>`.
    #[arg(long, default_value_t = DEFAULT_MIN_FREQUENCY)]
    min_frequency: usize,

    #[command(flatten)]
    output: OutputArgs,
}

impl VocabArgs {
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.init()?;

        let corpus = self.corpus.load()?;

        let vocab: CaptionVocab<u32> = VocabOptions::default()
            .with_min_frequency(self.min_frequency)
            .with_tokenizer(self.tokenizer.tokenizer())
            .build(corpus.captions())?;
        log::info!("Vocabulary Size: {}", vocab.size());

        self.output.write_vocab(&vocab)
    }
}
