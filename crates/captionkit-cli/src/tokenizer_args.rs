use captionkit::tokenizer::{CaptionTokenizer, PieceFilter, TokenizerOptions};

/// Caption tokenizer arg group.
///
/// Flattened into both `vocab` and `batches`; a vocabulary only matches
/// batches tokenized the same way.
#[derive(clap::Args, Debug, Default)]
pub struct TokenizerArgs {
    /// Drop words carrying punctuation instead of stripping it.
    #[arg(long)]
    pub strict_tokens: bool,
}

impl TokenizerArgs {
    /// The selected piece filter.
    pub fn piece_filter(&self) -> PieceFilter {
        if self.strict_tokens {
            PieceFilter::AllAlphanumeric
        } else {
            PieceFilter::AnyAlphanumeric
        }
    }

    /// Build the tokenizer.
    pub fn tokenizer(&self) -> CaptionTokenizer {
        TokenizerOptions::default()
            .with_piece_filter(self.piece_filter())
            .init()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_tokens() {
        let lenient = TokenizerArgs::default().tokenizer();
        assert_eq!(lenient.tokenize("a dog, runs"), vec!["a", "dog", "runs"]);

        let strict = TokenizerArgs {
            strict_tokens: true,
        }
        .tokenizer();
        assert_eq!(strict.tokenize("a dog, runs"), vec!["a", "runs"]);
    }
}
