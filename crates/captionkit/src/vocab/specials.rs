//! # Reserved Control Tokens

/// Padding symbol.
pub const PAD_SYMBOL: &str = "<pad>";

/// Unknown-word symbol.
pub const UNK_SYMBOL: &str = "<unk>";

/// Sequence start symbol.
pub const START_SYMBOL: &str = "<start>";

/// Sequence end symbol.
pub const END_SYMBOL: &str = "<end>";

/// The reserved control tokens, in id order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter, strum::AsRefStr)]
pub enum ReservedToken {
    /// Padding; id 0.
    #[strum(serialize = "<pad>")]
    Pad,

    /// Unknown word; id 1.
    #[strum(serialize = "<unk>")]
    Unk,

    /// Sequence start; id 2.
    #[strum(serialize = "<start>")]
    Start,

    /// Sequence end; id 3.
    #[strum(serialize = "<end>")]
    End,
}

/// Number of reserved ids.
pub const RESERVED_COUNT: usize = 4;

impl ReservedToken {
    /// The fixed id of this token.
    pub fn index(self) -> usize {
        match self {
            ReservedToken::Pad => 0,
            ReservedToken::Unk => 1,
            ReservedToken::Start => 2,
            ReservedToken::End => 3,
        }
    }

    /// The symbol string of this token.
    pub fn symbol(self) -> &'static str {
        match self {
            ReservedToken::Pad => PAD_SYMBOL,
            ReservedToken::Unk => UNK_SYMBOL,
            ReservedToken::Start => START_SYMBOL,
            ReservedToken::End => END_SYMBOL,
        }
    }

    /// Look up a reserved token by symbol.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        use strum::IntoEnumIterator;
        Self::iter().find(|t| t.symbol() == symbol)
    }
}

/// Wrap `tokens` with the [`START_SYMBOL`] and [`END_SYMBOL`] markers.
pub fn wrap_caption<I, S>(tokens: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let tokens = tokens.into_iter();
    let mut caption = Vec::with_capacity(tokens.size_hint().0 + 2);
    caption.push(START_SYMBOL.to_string());
    caption.extend(tokens.map(Into::into));
    caption.push(END_SYMBOL.to_string());
    caption
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_reserved_ids_are_dense() {
        let ids: Vec<usize> = ReservedToken::iter().map(ReservedToken::index).collect();
        assert_eq!(ids, (0..RESERVED_COUNT).collect::<Vec<_>>());
    }

    #[test]
    fn test_symbols() {
        for token in ReservedToken::iter() {
            assert_eq!(token.as_ref(), token.symbol());
            assert_eq!(ReservedToken::from_symbol(token.symbol()), Some(token));
        }
        assert_eq!(ReservedToken::from_symbol("cat"), None);
    }

    #[test]
    fn test_wrap_caption() {
        assert_eq!(
            wrap_caption(["a", "dog"]),
            vec!["<start>", "a", "dog", "<end>"]
        );
        assert_eq!(wrap_caption(Vec::<String>::new()), vec!["<start>", "<end>"]);
    }
}
