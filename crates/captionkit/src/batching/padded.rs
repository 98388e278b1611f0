//! # Padded Sequences

use crate::types::TokenType;

/// A row-major `(rows, width)` buffer of right-padded id sequences.
#[derive(Debug, Clone, PartialEq)]
pub struct PaddedSequences<T> {
    rows: usize,

    width: usize,

    data: Vec<T>,
}

impl<T: TokenType> PaddedSequences<T> {
    /// Pad `sequences` to the length of the longest one.
    ///
    /// Nothing is ever truncated; unused cells hold `pad`.
    pub fn from_sequences<S: AsRef<[T]>>(
        sequences: &[S],
        pad: T,
    ) -> Self {
        let rows = sequences.len();
        let width = sequences
            .iter()
            .map(|s| s.as_ref().len())
            .max()
            .unwrap_or(0);

        let mut data = vec![pad; rows * width];
        for (row, seq) in data.chunks_exact_mut(width.max(1)).zip(sequences) {
            let seq = seq.as_ref();
            row[..seq.len()].copy_from_slice(seq);
        }

        Self { rows, width, data }
    }
}

impl<T> PaddedSequences<T> {
    /// `(rows, width)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.width)
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Row width; the longest sequence length.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Row `index`, including padding; `None` past the last row.
    pub fn get_row(
        &self,
        index: usize,
    ) -> Option<&[T]> {
        if index >= self.rows {
            return None;
        }
        let start = index * self.width;
        Some(&self.data[start..start + self.width])
    }

    /// Row `index`, including padding.
    ///
    /// ## Panics
    /// When `index >= self.rows()`.
    pub fn row(
        &self,
        index: usize,
    ) -> &[T] {
        match self.get_row(index) {
            Some(row) => row,
            None => panic!("row {index} out of range for {} rows", self.rows),
        }
    }

    /// Iterate rows.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[T]> {
        (0..self.rows).map(|i| self.row(i))
    }

    /// The flat row-major buffer.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Release the flat row-major buffer.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}
