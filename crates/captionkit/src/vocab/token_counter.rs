//! # Token Counter
//!
//! The counting phase of vocabulary construction.

use crate::{
    tokenizer::CaptionTokenizer,
    types::{CKHashMap, hash_map_with_capacity},
};

/// Corpus-wide token frequency counter.
///
/// Remembers the order in which tokens were first seen,
/// so that id assignment is reproducible.
#[derive(Debug, Clone)]
pub struct TokenCounter {
    tokenizer: CaptionTokenizer,

    counts: CKHashMap<String, usize>,

    first_seen: Vec<String>,
}

impl Default for TokenCounter {
    fn default() -> Self {
        Self::new(CaptionTokenizer::default())
    }
}

impl TokenCounter {
    /// Create a new counter.
    pub fn new(tokenizer: CaptionTokenizer) -> Self {
        Self {
            tokenizer,
            counts: hash_map_with_capacity(10_000),
            first_seen: Vec::new(),
        }
    }

    /// Count a single token.
    pub fn update_from_token(
        &mut self,
        token: &str,
    ) {
        match self.counts.get_mut(token) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(token.to_string(), 1);
                self.first_seen.push(token.to_string());
            }
        }
    }

    /// Tokenize and count one raw caption.
    pub fn update_from_text<S: AsRef<str>>(
        &mut self,
        text: S,
    ) {
        for token in self.tokenizer.tokenize(text.as_ref()) {
            self.update_from_token(&token);
        }
    }

    /// Tokenize and count every caption in `samples`.
    pub fn update_from_samples<I>(
        &mut self,
        samples: I,
    ) where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for sample in samples {
            self.update_from_text(sample);
        }
    }

    /// The count for `token`; zero if never seen.
    pub fn count(
        &self,
        token: &str,
    ) -> usize {
        self.counts.get(token).copied().unwrap_or(0)
    }

    /// Number of distinct tokens seen.
    pub fn distinct(&self) -> usize {
        self.first_seen.len()
    }

    /// Iterate `(token, count)` in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.first_seen
            .iter()
            .map(|token| (token.as_str(), self.count(token)))
    }

    /// Tokens with `count >= min_frequency`, in first-seen order.
    pub fn frequent_tokens(
        &self,
        min_frequency: usize,
    ) -> impl Iterator<Item = &str> {
        self.iter()
            .filter(move |&(_, count)| count >= min_frequency)
            .map(|(token, _)| token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_counter() {
        let mut counter = TokenCounter::default();
        counter.update_from_samples(["A dog runs.", "The dog, the cat!"]);

        let counts: Vec<(&str, usize)> = counter.iter().collect();
        assert_eq!(
            counts,
            vec![("a", 1), ("dog", 2), ("runs", 1), ("the", 2), ("cat", 1)]
        );
        assert_eq!(counter.distinct(), 5);
        assert_eq!(counter.count("zebra"), 0);
    }

    #[test]
    fn test_frequent_tokens_keep_first_seen_order() {
        let mut counter = TokenCounter::default();
        counter.update_from_samples(["b a", "a b c", "c"]);

        let tokens: Vec<&str> = counter.frequent_tokens(2).collect();
        assert_eq!(tokens, vec!["b", "a", "c"]);

        let tokens: Vec<&str> = counter.frequent_tokens(3).collect();
        assert!(tokens.is_empty());
    }
}
