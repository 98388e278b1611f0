//! # Vocabulary IO
//!
//! Vocabularies are stored as plain text, one token per line, in id order.

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use crate::{
    errors::{CKResult, CaptionError},
    types::TokenType,
    vocab::{
        CaptionVocab,
        specials::{RESERVED_COUNT, ReservedToken},
    },
};

/// Load a [`CaptionVocab`] from a vocab file.
///
/// # Arguments
/// * `path` - the path to the vocabulary file.
pub fn load_vocab_path<T, P>(path: P) -> CKResult<CaptionVocab<T>>
where
    T: TokenType,
    P: AsRef<Path>,
{
    let file = File::open(path)?;
    read_vocab(BufReader::new(file))
}

/// Read a [`CaptionVocab`] from a [`BufRead`] stream.
///
/// The first four lines must be the reserved symbols, in id order;
/// every token must be unique.
pub fn read_vocab<T, R>(reader: R) -> CKResult<CaptionVocab<T>>
where
    T: TokenType,
    R: BufRead,
{
    let mut tokens = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let token = line.trim_end_matches('\r');
        if token.is_empty() {
            continue;
        }
        tokens.push(token.to_string());
    }

    use strum::IntoEnumIterator;
    for reserved in ReservedToken::iter() {
        match tokens.get(reserved.index()) {
            Some(token) if token == reserved.symbol() => {}
            found => {
                return Err(CaptionError::VocabConflict(format!(
                    "expected {:?} at id {}, found {:?}",
                    reserved.symbol(),
                    reserved.index(),
                    found
                )));
            }
        }
    }

    let vocab = CaptionVocab::from_tokens(&tokens[RESERVED_COUNT..])?;
    if vocab.size() != tokens.len() {
        return Err(CaptionError::VocabConflict(format!(
            "{} duplicate or reserved tokens after the reserved block",
            tokens.len() - vocab.size()
        )));
    }
    Ok(vocab)
}

/// Save a [`CaptionVocab`] to a vocab file.
///
/// # Arguments
/// * `vocab` - the vocabulary to save.
/// * `path` - the path to save the vocabulary to.
pub fn save_vocab_path<T: TokenType, P: AsRef<Path>>(
    vocab: &CaptionVocab<T>,
    path: P,
) -> CKResult<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    write_vocab(vocab, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Write a [`CaptionVocab`] to a [`Write`] writer.
pub fn write_vocab<T, W>(
    vocab: &CaptionVocab<T>,
    writer: &mut W,
) -> CKResult<()>
where
    T: TokenType,
    W: Write,
{
    for token in vocab.tokens() {
        writeln!(writer, "{token}")?;
    }
    Ok(())
}
