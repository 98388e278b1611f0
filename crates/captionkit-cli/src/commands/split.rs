use captionkit::splits::{
    DEFAULT_IMAGE_EXTENSION,
    DEFAULT_TRAIN_RATIO,
    SplitOptions,
    list_image_ids,
    split_image_ids,
};

use crate::logging::LogArgs;

/// Args for the split command.
#[derive(clap::Args, Debug)]
pub struct SplitArgs {
    #[clap(flatten)]
    pub logging: LogArgs,

    /// Directory of images.
    #[arg(long)]
    image_dir: String,

    /// Image file extension.
    #[arg(long, default_value = DEFAULT_IMAGE_EXTENSION)]
    extension: String,

    /// Fraction of images for training; the rest is halved into dev / test.
    #[arg(long, default_value_t = DEFAULT_TRAIN_RATIO)]
    train_ratio: f64,

    /// Shuffle seed.
    #[arg(long, default_value = None)]
    seed: Option<u64>,

    /// Directory for `train.txt`, `dev.txt` and `test.txt`.
    #[arg(long)]
    output_dir: String,
}

impl SplitArgs {
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.init()?;

        let ids = list_image_ids(&self.image_dir, &self.extension)?;
        log::info!("found {} images in {}", ids.len(), self.image_dir);

        let options = SplitOptions::default()
            .with_train_ratio(self.train_ratio)
            .with_seed(self.seed);
        let split = split_image_ids(ids, &options)?;

        log::info!("output: {}", self.output_dir);
        split.save_dir(&self.output_dir)?;

        Ok(())
    }
}
