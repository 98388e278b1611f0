use captionkit::corpus::{
    CaptionCorpus,
    CorpusOptions,
    caption_corpus::{DEFAULT_CAPTION_COLUMN, DEFAULT_IMAGE_COLUMN},
};

/// Caption table arg group.
#[derive(clap::Args, Debug)]
pub struct CorpusArgs {
    /// Caption table (csv-like) file.
    #[arg(long)]
    pub captions: String,

    /// Field delimiter; `|` for flickr30k, `,` for flickr8k.
    #[arg(long, default_value_t = '|')]
    pub delimiter: char,

    /// Image id column name.
    #[arg(long, default_value = DEFAULT_IMAGE_COLUMN)]
    pub image_column: String,

    /// Caption column name.
    #[arg(long, default_value = DEFAULT_CAPTION_COLUMN)]
    pub caption_column: String,
}

impl CorpusArgs {
    /// The corpus options.
    pub fn options(&self) -> CorpusOptions {
        CorpusOptions::default()
            .with_delimiter(self.delimiter)
            .with_image_column(self.image_column.clone())
            .with_caption_column(self.caption_column.clone())
    }

    /// Load the caption table.
    pub fn load(&self) -> Result<CaptionCorpus, Box<dyn std::error::Error>> {
        Ok(CaptionCorpus::from_path(&self.captions, &self.options())?)
    }
}
