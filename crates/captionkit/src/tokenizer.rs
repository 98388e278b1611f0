//! # Caption Tokenizer
//!
//! Normalizes raw caption text into lowercase `[a-z0-9]` word tokens.
//!
//! ```rust
//! use captionkit::tokenizer::tokenize;
//!
//! assert_eq!(tokenize("A cat, sitting!"), vec!["a", "cat", "sitting"]);
//! ```

/// Which whitespace-delimited pieces survive before normalization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PieceFilter {
    /// Keep pieces containing at least one alphanumeric character.
    #[default]
    AnyAlphanumeric,

    /// Keep only pieces made entirely of alphanumeric characters.
    ///
    /// `"cat,"` is dropped rather than normalized to `"cat"`.
    AllAlphanumeric,
}

impl PieceFilter {
    /// Does the piece pass this filter?
    pub fn accepts(
        &self,
        piece: &str,
    ) -> bool {
        match self {
            PieceFilter::AnyAlphanumeric => piece.chars().any(char::is_alphanumeric),
            PieceFilter::AllAlphanumeric => piece.chars().all(char::is_alphanumeric),
        }
    }
}

/// Options for [`CaptionTokenizer`].
#[derive(Debug, Clone, Default)]
pub struct TokenizerOptions {
    /// The piece filter.
    pub piece_filter: PieceFilter,
}

impl TokenizerOptions {
    /// Set the piece filter.
    pub fn with_piece_filter(
        self,
        piece_filter: PieceFilter,
    ) -> Self {
        Self { piece_filter }
    }

    /// Build a [`CaptionTokenizer`].
    pub fn init(self) -> CaptionTokenizer {
        CaptionTokenizer { options: self }
    }
}

/// Stateless caption tokenizer.
#[derive(Debug, Clone, Default)]
pub struct CaptionTokenizer {
    options: TokenizerOptions,
}

impl CaptionTokenizer {
    /// Get the options.
    pub fn options(&self) -> &TokenizerOptions {
        &self.options
    }

    /// Split `text` into normalized tokens.
    ///
    /// Output order follows input order; duplicates are kept.
    pub fn tokenize(
        &self,
        text: &str,
    ) -> Vec<String> {
        text.split_whitespace()
            .filter(|piece| self.options.piece_filter.accepts(piece))
            .map(normalize_piece)
            .filter(|token| !token.is_empty())
            .collect()
    }
}

/// Lowercase `piece` and strip everything outside `[A-Za-z0-9]`.
fn normalize_piece(piece: &str) -> String {
    piece
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Tokenize `text` with the default options.
pub fn tokenize(text: &str) -> Vec<String> {
    CaptionTokenizer::default().tokenize(text)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_punctuation_is_stripped() {
        assert_eq!(tokenize("A cat, sitting!"), vec!["a", "cat", "sitting"]);
    }

    #[test]
    fn test_pure_punctuation_is_dropped() {
        assert_eq!(tokenize("dog - runs ... fast !!"), vec!["dog", "runs", "fast"]);
        assert!(tokenize("  \t\n ").is_empty());
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_order_and_duplicates_kept() {
        assert_eq!(
            tokenize("Two DOGS and two dogs"),
            vec!["two", "dogs", "and", "two", "dogs"]
        );
    }

    #[test]
    fn test_non_ascii_alphanumerics() {
        // Unicode letters pass the filter but are stripped by normalization.
        assert_eq!(tokenize("café 3rd"), vec!["caf", "3rd"]);
        assert!(tokenize("你好").is_empty());
    }

    #[test]
    fn test_strict_filter() {
        let tokenizer = TokenizerOptions::default()
            .with_piece_filter(PieceFilter::AllAlphanumeric)
            .init();

        assert_eq!(tokenizer.tokenize("A cat, sitting!"), vec!["a"]);
        assert_eq!(tokenizer.tokenize("A cat sitting"), vec!["a", "cat", "sitting"]);
    }

    proptest! {
        #[test]
        fn test_tokens_are_normalized(text in "\\PC*") {
            for token in tokenize(&text) {
                prop_assert!(!token.is_empty());
                prop_assert!(token.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
            }
        }

        #[test]
        fn test_clean_words_pass_through(words in prop::collection::vec("[a-z0-9]{1,8}", 0..12)) {
            let text = words.join(" ");
            prop_assert_eq!(tokenize(&text), words);
        }
    }
}
