//! The encode/decode state machines over the bit sink/source contract.

use std::io::Write;

use crate::bitio::{BitReader, BitWriter};

use super::HuffmanError;
use super::code::{CodeTable, Codeword, InvertedCodeTable};
use super::freq::FrequencyTable;
use super::tree::build_tree;

if_tracing! {
    use tracing::debug;
}

/// Encode/decode context for one input's code assignment.
///
/// Holds everything derived from the frequency table, so one codec value can
/// run any number of independent encode and decode passes. Both sides of a
/// compress/decompress pair must build their codec from the same frequency
/// data; nothing about the table travels with the bit stream.
#[derive(Debug)]
pub struct HuffmanCodec {
    table: CodeTable,
    inverted: InvertedCodeTable,
    /// Set when the alphabet has exactly one symbol. Encode and decode then
    /// take the guarded fixed-bit branch instead of the path-derived table,
    /// since a lone leaf has no path.
    sole_symbol: Option<u8>,
    max_code_len: u8,
}

impl HuffmanCodec {
    /// Builds the codec from an in-memory input's own frequencies.
    pub fn from_bytes(data: &[u8]) -> Result<Self, HuffmanError> {
        Self::from_frequencies(&FrequencyTable::from_bytes(data))
    }

    /// Builds the codec from an already-counted frequency table.
    pub fn from_frequencies(freqs: &FrequencyTable) -> Result<Self, HuffmanError> {
        let root = build_tree(freqs)?;
        let table = CodeTable::from_tree(&root);
        // the tree has served its purpose, only the tables live on

        let sole_symbol = if freqs.len() == 1 {
            freqs.iter().next().map(|(symbol, _)| symbol)
        } else {
            None
        };

        let codec = HuffmanCodec {
            inverted: table.inverted(),
            max_code_len: table.max_len(),
            table,
            sole_symbol,
        };

        if_tracing! {
            debug!(
                alphabet = codec.table.len(),
                max_code_len = codec.max_code_len,
                single_symbol = codec.sole_symbol.is_some(),
                "codec built"
            );
        }

        Ok(codec)
    }

    /// Alphabet size of the input the codec was built from.
    pub fn alphabet_size(&self) -> usize {
        self.table.len()
    }

    /// Encodes `data` into `sink`, one codeword per input byte.
    ///
    /// A byte absent from the table aborts with
    /// [`HuffmanError::MissingCodeword`] before any of its bits are written.
    pub fn encode<W: Write>(
        &self,
        data: &[u8],
        sink: &mut BitWriter<W>,
    ) -> Result<(), HuffmanError> {
        if let Some(symbol) = self.sole_symbol {
            // one fixed bit per occurrence, the lookup path is never taken
            for &byte in data {
                if byte != symbol {
                    return Err(HuffmanError::MissingCodeword(byte));
                }
                sink.write_bit(0)?;
            }
        } else {
            for &byte in data {
                let code = self
                    .table
                    .get(byte)
                    .ok_or(HuffmanError::MissingCodeword(byte))?;
                for digit in code.digits() {
                    sink.write_bit(digit)?;
                }
            }
        }

        if_tracing! {
            debug!(input_len = data.len(), bits = sink.bits_written(), "encode complete");
        }

        Ok(())
    }

    /// Decodes `source` to the original byte stream.
    ///
    /// State machine: accumulate bits into a partial codeword; on a table
    /// match emit the symbol and reset. The stream must end exactly on a
    /// codeword boundary, a dangling partial codeword is reported as
    /// [`HuffmanError::TruncatedStream`] rather than silently dropped.
    pub fn decode(&self, source: &mut BitReader<'_>) -> Result<Vec<u8>, HuffmanError> {
        if let Some(symbol) = self.sole_symbol {
            // each consumed bit stands for one occurrence, its value is irrelevant
            let mut out = Vec::with_capacity(source.remaining_bits() as usize);
            while source.read_bit().is_some() {
                out.push(symbol);
            }
            return Ok(out);
        }

        let mut out = Vec::new();
        let mut partial = Codeword::empty();

        while let Some(bit) = source.read_bit() {
            partial = partial.push(bit);
            if let Some(&symbol) = self.inverted.get(&partial) {
                out.push(symbol);
                partial = Codeword::empty();
            } else if partial.len() >= self.max_code_len {
                // A table derived from a full tree resolves every bit
                // sequence, so this only fires when the codec does not match
                // the stream it is fed.
                return Err(HuffmanError::UnresolvableCodeword {
                    len: partial.len(),
                });
            }
        }

        if !partial.is_empty() {
            return Err(HuffmanError::TruncatedStream {
                dangling: partial.len(),
            });
        }

        if_tracing! {
            debug!(output_len = out.len(), "decode complete");
        }

        Ok(out)
    }
}
