use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use captionkit::{
    types::TokenType,
    vocab::{CaptionVocab, io::write_vocab},
};

/// Output arg group.
#[derive(clap::Args, Debug)]
pub struct OutputArgs {
    /// Output file; stdout when absent or "-".
    #[arg(long)]
    pub output: Option<PathBuf>,
}

impl OutputArgs {
    /// The output file, or `None` for stdout.
    pub fn path(&self) -> Option<&Path> {
        self.output
            .as_deref()
            .filter(|path| *path != Path::new("-"))
    }

    /// Write `vocab` one token per line and flush.
    pub fn write_vocab<T: TokenType>(
        &self,
        vocab: &CaptionVocab<T>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match self.path() {
            Some(path) => {
                log::info!("writing {} tokens to {}", vocab.size(), path.display());
                write_flushed(vocab, BufWriter::new(File::create(path)?))
            }
            None => write_flushed(vocab, BufWriter::new(std::io::stdout().lock())),
        }
    }
}

fn write_flushed<T: TokenType, W: Write>(
    vocab: &CaptionVocab<T>,
    mut writer: W,
) -> Result<(), Box<dyn std::error::Error>> {
    write_vocab(vocab, &mut writer)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use captionkit::vocab::io::load_vocab_path;
    use tempdir::TempDir;

    use super::*;

    fn output(path: Option<&str>) -> OutputArgs {
        OutputArgs {
            output: path.map(PathBuf::from),
        }
    }

    #[test]
    fn test_dash_means_stdout() {
        assert_eq!(output(None).path(), None);
        assert_eq!(output(Some("-")).path(), None);
        assert_eq!(
            output(Some("vocab.txt")).path(),
            Some(Path::new("vocab.txt"))
        );
    }

    #[test]
    fn test_write_vocab_to_file() {
        let tmp = TempDir::new("captionkit-cli-output").unwrap();
        let path = tmp.path().join("vocab.txt");
        let vocab: CaptionVocab<u32> = CaptionVocab::from_tokens(["dog", "runs"]).unwrap();

        output(path.to_str()).write_vocab(&vocab).unwrap();

        let loaded: CaptionVocab<u32> = load_vocab_path(&path).unwrap();
        assert_eq!(
            loaded.tokens().collect::<Vec<_>>(),
            vocab.tokens().collect::<Vec<_>>()
        );
    }
}
