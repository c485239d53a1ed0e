//! The Huffman codec: frequency counting, greedy tree construction, code
//! table derivation, and the bit-level encode/decode state machines.
//!
//! The stages hand their results forward immutably: a [`freq::FrequencyTable`]
//! seeds the forest, [`tree::build_tree`] merges it down to a single root,
//! [`code::CodeTable`] is derived from the root's leaf paths, and
//! [`codec::HuffmanCodec`] keeps only the tables for any number of encode and
//! decode passes. The tree itself is dropped as soon as the table exists.

use std::time::{Duration, Instant};

use anyhow::Result;
use thiserror::Error;

use crate::bitio::{BitReader, BitWriter};

pub mod code;
pub mod codec;
pub mod freq;
pub mod tree;

/// Everything that can go wrong between a symbol stream and its bit stream.
#[derive(Debug, Error)]
pub enum HuffmanError {
    /// The underlying stream could not be read or written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An empty frequency table was handed to tree construction. Callers are
    /// expected to check for empty input first and treat it as a no-op.
    #[error("input contains no symbols, there is nothing to build a tree from")]
    EmptyInput,

    /// The encoder met a symbol the code table does not cover. Cannot happen
    /// when the table was built from the same data that is being encoded.
    #[error("symbol {0:#04x} has no codeword in the table")]
    MissingCodeword(u8),

    /// The bit stream ended in the middle of a codeword.
    #[error("bit stream ended mid-codeword with {dangling} unresolved bits")]
    TruncatedStream { dangling: u8 },

    /// The accumulated bits outgrew every codeword without matching one.
    #[error("accumulated {len} bits without matching any codeword")]
    UnresolvableCodeword { len: u8 },

    /// The compressed frame's trailer is missing or inconsistent.
    #[error("malformed bit stream framing: {0}")]
    InvalidFrame(&'static str),
}

/// Result of one in-memory compress/decompress pair over the same data.
#[derive(Clone, Debug)]
pub struct RoundTrip {
    equal: bool,
    compressed_len: usize,
    decompressed: Vec<u8>,
    encode_time: Duration,
    decode_time: Duration,
}

impl RoundTrip {
    /// Whether the decompressed data matched the original.
    pub fn is_successful(&self) -> bool {
        self.equal
    }

    /// Size of the compressed frame in bytes, trailer included.
    pub fn compressed_len(&self) -> usize {
        self.compressed_len
    }

    /// The data after encoding and decoding it again.
    pub fn decompressed(&self) -> &[u8] {
        &self.decompressed
    }

    pub fn encode_time(&self) -> Duration {
        self.encode_time
    }

    pub fn decode_time(&self) -> Duration {
        self.decode_time
    }
}

/// Builds a codec from `data`, encodes it, decodes the result, and compares.
///
/// Use for sanity checking the encoder and decoder against each other; both
/// the `test` subcommand and the test suite run through here.
pub fn roundtrip(data: &[u8]) -> Result<RoundTrip> {
    let codec = codec::HuffmanCodec::from_bytes(data)?;

    let start = Instant::now();
    let mut writer = BitWriter::new(Vec::new());
    codec.encode(data, &mut writer)?;
    let compressed = writer.finish()?;
    let encode_time = start.elapsed();

    let start = Instant::now();
    let mut reader = BitReader::new(&compressed)?;
    let decompressed = codec.decode(&mut reader)?;
    let decode_time = start.elapsed();

    Ok(RoundTrip {
        equal: data == decompressed.as_slice(),
        compressed_len: compressed.len(),
        decompressed,
        encode_time,
        decode_time,
    })
}
