//! Frequency counting, the first pass over the input.

use std::collections::HashMap;
use std::io::{self, Read};

/// Occurrence counts for every distinct byte of one input.
///
/// Built by a single full pass and read-only afterwards. An empty table is a
/// valid value but an invalid input for tree construction; callers check
/// [`is_empty`](FrequencyTable::is_empty) before building a codec.
#[derive(Clone, Debug, Default)]
pub struct FrequencyTable {
    counts: HashMap<u8, u64>,
}

impl FrequencyTable {
    /// Counts every byte of an in-memory slice.
    pub fn from_bytes(data: &[u8]) -> Self {
        let counts = data.iter().copied().fold(HashMap::new(), |mut acc, byte| {
            *acc.entry(byte).or_insert(0u64) += 1;
            acc
        });

        FrequencyTable { counts }
    }

    /// Counts every byte of a stream, consuming it to completion. Fails if
    /// the stream cannot be fully read.
    pub fn from_reader<R: Read>(reader: R) -> io::Result<Self> {
        let mut counts = HashMap::new();
        for byte in reader.bytes() {
            *counts.entry(byte?).or_insert(0u64) += 1;
        }

        Ok(FrequencyTable { counts })
    }

    /// Number of distinct bytes seen, i.e. the alphabet size.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts, i.e. the total input length.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn get(&self, symbol: u8) -> u64 {
        self.counts.get(&symbol).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts.iter().map(|(&symbol, &weight)| (symbol, weight))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn counts_every_occurrence() {
        let table = FrequencyTable::from_bytes(b"aaabbc");
        assert_eq!(table.len(), 3);
        assert_eq!(table.get(b'a'), 3);
        assert_eq!(table.get(b'b'), 2);
        assert_eq!(table.get(b'c'), 1);
        assert_eq!(table.get(b'z'), 0);
        assert_eq!(table.total(), 6);
    }

    #[test]
    fn empty_input_yields_empty_table() {
        let table = FrequencyTable::from_bytes(b"");
        assert!(table.is_empty());
        assert_eq!(table.total(), 0);
    }

    #[test]
    fn reader_and_slice_agree() {
        let data = b"mississippi";
        let from_reader = FrequencyTable::from_reader(Cursor::new(data)).unwrap();
        let from_bytes = FrequencyTable::from_bytes(data);

        assert_eq!(from_reader.len(), from_bytes.len());
        for (symbol, weight) in from_bytes.iter() {
            assert_eq!(from_reader.get(symbol), weight);
        }
    }

    #[test]
    fn reader_failure_propagates() {
        struct FailingReader;

        impl Read for FailingReader {
            fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "gone"))
            }
        }

        let err = FrequencyTable::from_reader(FailingReader).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
