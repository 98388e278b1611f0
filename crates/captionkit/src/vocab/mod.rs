//! # Vocabulary
//!
//! A [`CaptionVocab`] is built in two phases:
//! * [`TokenCounter`] scans the whole corpus and counts tokens;
//! * ids are assigned, in first-seen order, to tokens meeting the cutoff.
//!
//! The result is frozen; see [`specials`] for the reserved control tokens.
pub mod caption_vocab;
pub mod io;
pub mod specials;
pub mod token_counter;

#[doc(inline)]
pub use caption_vocab::{CaptionVocab, DEFAULT_MIN_FREQUENCY, VocabOptions};
#[doc(inline)]
pub use specials::ReservedToken;
#[doc(inline)]
pub use token_counter::TokenCounter;
