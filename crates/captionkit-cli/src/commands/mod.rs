mod batches;
mod split;
mod vocab;

/// Subcommands for captionkit
#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Build a caption vocabulary.
    Vocab(vocab::VocabArgs),

    /// Split an image directory into train / dev / test.
    Split(split::SplitArgs),

    /// Dry-run the batch pipeline over a split.
    Batches(batches::BatchesArgs),
}

impl Commands {
    /// Run the subcommand.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        match self {
            Commands::Vocab(cmd) => cmd.run(),
            Commands::Split(cmd) => cmd.run(),
            Commands::Batches(cmd) => cmd.run(),
        }
    }
}
