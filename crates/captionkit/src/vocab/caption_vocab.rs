//! # Caption Vocabulary

use crate::{
    errors::{CKResult, CaptionError},
    tokenizer::CaptionTokenizer,
    types::{CKHashMap, TokenType, hash_map_with_capacity},
    vocab::{
        specials::{RESERVED_COUNT, ReservedToken},
        token_counter::TokenCounter,
    },
};

/// Default corpus frequency cutoff.
pub const DEFAULT_MIN_FREQUENCY: usize = 5;

/// Options for building a [`CaptionVocab`].
#[derive(Debug, Clone)]
pub struct VocabOptions {
    /// Tokens seen fewer times than this are left out.
    pub min_frequency: usize,

    /// The tokenizer used to scan the corpus.
    pub tokenizer: CaptionTokenizer,
}

impl Default for VocabOptions {
    fn default() -> Self {
        Self {
            min_frequency: DEFAULT_MIN_FREQUENCY,
            tokenizer: CaptionTokenizer::default(),
        }
    }
}

impl VocabOptions {
    /// Set the frequency cutoff.
    pub fn with_min_frequency(
        self,
        min_frequency: usize,
    ) -> Self {
        Self {
            min_frequency,
            ..self
        }
    }

    /// Set the tokenizer.
    pub fn with_tokenizer(
        self,
        tokenizer: CaptionTokenizer,
    ) -> Self {
        Self { tokenizer, ..self }
    }

    /// Count `corpus`, then build the vocabulary.
    pub fn build<T, I>(
        &self,
        corpus: I,
    ) -> CKResult<CaptionVocab<T>>
    where
        T: TokenType,
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut counter = TokenCounter::new(self.tokenizer.clone());
        counter.update_from_samples(corpus);
        CaptionVocab::from_counter(&counter, self.min_frequency)
    }
}

/// Frozen bidirectional `token <-> id` mapping.
///
/// Ids `0..4` are the [`ReservedToken`]s; corpus tokens follow in
/// first-seen order. There are no mutation methods; share it behind an
/// `Arc` across loaders.
#[derive(Debug, Clone)]
pub struct CaptionVocab<T: TokenType> {
    token_to_id: CKHashMap<String, T>,

    id_to_token: Vec<String>,
}

impl<T: TokenType> PartialEq for CaptionVocab<T> {
    fn eq(
        &self,
        other: &Self,
    ) -> bool {
        // The forward map is derived from the id order.
        self.id_to_token == other.id_to_token
    }
}

impl<T: TokenType> CaptionVocab<T> {
    /// Build from raw captions with a frequency cutoff.
    pub fn build<I>(
        corpus: I,
        min_frequency: usize,
    ) -> CKResult<Self>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        VocabOptions::default()
            .with_min_frequency(min_frequency)
            .build(corpus)
    }

    /// Assign ids from a completed count.
    pub fn from_counter(
        counter: &TokenCounter,
        min_frequency: usize,
    ) -> CKResult<Self> {
        let vocab = Self::from_tokens(counter.frequent_tokens(min_frequency))?;
        log::info!(
            "built vocabulary: {} entries from {} distinct tokens (min_frequency={})",
            vocab.size(),
            counter.distinct(),
            min_frequency
        );
        Ok(vocab)
    }

    /// Build from an ordered list of non-reserved tokens.
    ///
    /// Reserved symbols and repeated tokens in `tokens` are skipped.
    pub fn from_tokens<I, S>(tokens: I) -> CKResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tokens = tokens.into_iter();
        let capacity = RESERVED_COUNT + tokens.size_hint().0;
        let mut vocab = Self {
            token_to_id: hash_map_with_capacity(capacity),
            id_to_token: Vec::with_capacity(capacity),
        };

        use strum::IntoEnumIterator;
        for reserved in ReservedToken::iter() {
            vocab.push(reserved.symbol())?;
        }
        for token in tokens {
            let token = token.as_ref();
            if ReservedToken::from_symbol(token).is_some() || vocab.token_to_id.contains_key(token)
            {
                continue;
            }
            vocab.push(token)?;
        }

        Ok(vocab)
    }

    fn push(
        &mut self,
        token: &str,
    ) -> CKResult<()> {
        let size = self.id_to_token.len() + 1;
        let id = T::from_usize(self.id_to_token.len())
            .ok_or(CaptionError::VocabSizeOverflow { size })?;
        self.token_to_id.insert(token.to_string(), id);
        self.id_to_token.push(token.to_string());
        Ok(())
    }

    /// Total entries, including the reserved ones.
    pub fn size(&self) -> usize {
        self.id_to_token.len()
    }

    /// The id of a reserved token.
    pub fn reserved_id(
        &self,
        token: ReservedToken,
    ) -> T {
        // Ids 0..4 always fit: `push` checked them at construction.
        T::from_usize(token.index()).unwrap_or_else(T::zero)
    }

    /// The [`ReservedToken::Pad`] id.
    pub fn pad_id(&self) -> T {
        self.reserved_id(ReservedToken::Pad)
    }

    /// The [`ReservedToken::Unk`] id.
    pub fn unk_id(&self) -> T {
        self.reserved_id(ReservedToken::Unk)
    }

    /// Look up a token without the `UNK` fallback.
    pub fn lookup(
        &self,
        token: &str,
    ) -> Option<T> {
        self.token_to_id.get(token).copied()
    }

    /// Does the vocabulary hold `token`?
    pub fn contains(
        &self,
        token: &str,
    ) -> bool {
        self.token_to_id.contains_key(token)
    }

    /// Map a token to its id, or the `UNK` id.
    pub fn encode(
        &self,
        token: &str,
    ) -> T {
        self.lookup(token).unwrap_or_else(|| self.unk_id())
    }

    /// Map each token with [`Self::encode`].
    pub fn encode_sequence<S: AsRef<str>>(
        &self,
        tokens: &[S],
    ) -> Vec<T> {
        tokens.iter().map(|t| self.encode(t.as_ref())).collect()
    }

    /// Map an id back to its token.
    pub fn decode(
        &self,
        id: T,
    ) -> CKResult<&str> {
        let index = id.to_usize().unwrap_or(usize::MAX);
        self.id_to_token
            .get(index)
            .map(String::as_str)
            .ok_or(CaptionError::UnknownId { id: index })
    }

    /// Map each id with [`Self::decode`].
    pub fn decode_sequence(
        &self,
        ids: &[T],
    ) -> CKResult<Vec<String>> {
        ids.iter()
            .map(|&id| self.decode(id).map(str::to_string))
            .collect()
    }

    /// Iterate tokens in id order.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.id_to_token.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        types::{check_is_send, check_is_sync},
        vocab::specials::{END_SYMBOL, START_SYMBOL, UNK_SYMBOL},
    };

    fn corpus() -> Vec<&'static str> {
        vec![
            "A dog runs on the grass.",
            "The dog jumps.",
            "A dog and a cat.",
            "The cat sleeps.",
        ]
    }

    #[test]
    fn test_reserved_ids() {
        let vocab = CaptionVocab::<u32>::build(Vec::<String>::new(), 1).unwrap();
        assert_eq!(vocab.size(), RESERVED_COUNT);
        assert_eq!(vocab.pad_id(), 0);
        assert_eq!(vocab.unk_id(), 1);
        assert_eq!(vocab.encode(START_SYMBOL), 2);
        assert_eq!(vocab.encode(END_SYMBOL), 3);
    }

    #[test]
    fn test_first_seen_assignment() {
        let vocab = CaptionVocab::<u32>::build(corpus(), 2).unwrap();

        // a:3, dog:3, the:3, cat:2; the rest appear once.
        assert_eq!(
            vocab.tokens().skip(RESERVED_COUNT).collect::<Vec<_>>(),
            vec!["a", "dog", "the", "cat"]
        );
        assert_eq!(vocab.encode("a"), 4);
        assert_eq!(vocab.encode("dog"), 5);
        assert_eq!(vocab.encode("the"), 6);
        assert_eq!(vocab.encode("cat"), 7);
        assert_eq!(vocab.size(), RESERVED_COUNT + 4);
    }

    #[test]
    fn test_frequency_boundary() {
        let corpus = ["x y", "x y", "x"];

        let vocab = CaptionVocab::<u32>::build(corpus, 3).unwrap();
        assert!(vocab.contains("x"));
        assert!(!vocab.contains("y"));
        assert_eq!(vocab.encode("y"), vocab.unk_id());
        assert_eq!(vocab.size(), RESERVED_COUNT + 1);
    }

    #[test]
    fn test_default_min_frequency() {
        let mut corpus = vec!["kite"; DEFAULT_MIN_FREQUENCY];
        corpus.extend(vec!["ball"; DEFAULT_MIN_FREQUENCY - 1]);

        let vocab: CaptionVocab<u16> = VocabOptions::default().build(corpus).unwrap();
        assert!(vocab.contains("kite"));
        assert!(!vocab.contains("ball"));
    }

    #[test]
    fn test_round_trip_in_vocab() {
        let vocab = CaptionVocab::<u32>::build(corpus(), 1).unwrap();
        let tokens = vec!["<start>", "the", "cat", "jumps", "<end>"];

        let ids = vocab.encode_sequence(&tokens);
        assert_eq!(vocab.decode_sequence(&ids).unwrap(), tokens);
    }

    #[test]
    fn test_unknown_tokens_decode_to_unk() {
        let vocab = CaptionVocab::<u32>::build(corpus(), 1).unwrap();

        let ids = vocab.encode_sequence(&["zebra", "dog"]);
        assert_eq!(ids[0], vocab.unk_id());
        assert_eq!(vocab.decode_sequence(&ids).unwrap(), vec![UNK_SYMBOL, "dog"]);
    }

    #[test]
    fn test_unknown_id_fails() {
        let vocab = CaptionVocab::<u32>::build(corpus(), 1).unwrap();
        let bad = vocab.size() as u32;

        assert!(matches!(
            vocab.decode_sequence(&[2, bad]),
            Err(CaptionError::UnknownId { id }) if id == bad as usize
        ));
    }

    #[test]
    fn test_size_overflow() {
        let tokens: Vec<String> = (0..300).map(|i| format!("w{i}")).collect();
        assert!(matches!(
            CaptionVocab::<u8>::from_tokens(&tokens),
            Err(CaptionError::VocabSizeOverflow { size: 257 })
        ));
    }

    #[test]
    fn test_from_tokens_skips_reserved_and_repeats() {
        let vocab = CaptionVocab::<u32>::from_tokens(["dog", "<unk>", "dog", "cat"]).unwrap();
        assert_eq!(
            vocab.tokens().collect::<Vec<_>>(),
            vec!["<pad>", "<unk>", "<start>", "<end>", "dog", "cat"]
        );
    }

    #[test]
    fn test_vocab_is_shareable() {
        let vocab = CaptionVocab::<u32>::build(corpus(), 1).unwrap();
        check_is_send(vocab.clone());
        check_is_sync(vocab);
    }
}
