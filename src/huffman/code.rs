//! Codeword derivation from the merge tree's leaf paths.

use std::collections::HashMap;
use std::fmt;

use super::tree::HuffNode;

/// The fixed codeword used for every occurrence of a one-symbol alphabet's
/// sole symbol, where no leaf path exists to derive one from.
pub const SINGLE_SYMBOL_CODEWORD: Codeword = Codeword { bits: 0, len: 1 };

/// A sequence of binary digits, packed most significant digit first.
///
/// Table entries are always non-empty; the empty value only exists as the
/// decoder's accumulator state. Depth is bounded by 64 digits, which holds
/// for any input below the 64th Fibonacci-number total weight.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Codeword {
    bits: u64,
    len: u8,
}

impl Codeword {
    pub const fn empty() -> Self {
        Codeword { bits: 0, len: 0 }
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub const fn len(&self) -> u8 {
        self.len
    }

    /// Returns this codeword extended by one digit.
    pub const fn push(self, bit: u8) -> Self {
        Codeword {
            bits: (self.bits << 1) | (bit & 1) as u64,
            len: self.len + 1,
        }
    }

    /// The digits in order, each as `0` or `1`.
    pub fn digits(&self) -> impl Iterator<Item = u8> + '_ {
        (0..self.len).rev().map(move |i| ((self.bits >> i) & 1) as u8)
    }

    /// Whether this codeword is a proper prefix of `other`.
    pub fn is_prefix_of(&self, other: &Codeword) -> bool {
        self.len < other.len && (other.bits >> (other.len - self.len)) == self.bits
    }
}

impl fmt::Debug for Codeword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for digit in self.digits() {
            write!(f, "{digit}")?;
        }
        Ok(())
    }
}

/// Mapping from codeword back to symbol, used only while decoding.
pub type InvertedCodeTable = HashMap<Codeword, u8>;

/// Mapping from symbol to codeword, derived once per input from its tree.
///
/// For alphabets of two or more symbols the codeword set is prefix-free by
/// construction, since the codewords are distinct leaf paths of a full
/// binary tree.
#[derive(Clone, Debug)]
pub struct CodeTable {
    codes: HashMap<u8, Codeword>,
}

impl CodeTable {
    /// Walks the tree depth first, recording each leaf's path: left appends
    /// a `0` digit, right appends a `1` digit.
    pub fn from_tree(root: &HuffNode) -> Self {
        let mut codes = HashMap::new();
        match root {
            // A lone leaf has no path to derive a codeword from, so the sole
            // symbol gets the fixed one-bit codeword instead.
            HuffNode::Leaf { symbol, .. } => {
                codes.insert(*symbol, SINGLE_SYMBOL_CODEWORD);
            }
            HuffNode::Internal { .. } => {
                collect_paths(root, Codeword::empty(), &mut codes);
            }
        }

        CodeTable { codes }
    }

    pub fn get(&self, symbol: u8) -> Option<Codeword> {
        self.codes.get(&symbol).copied()
    }

    /// Number of symbols covered, i.e. the alphabet size.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, Codeword)> + '_ {
        self.codes.iter().map(|(&symbol, &code)| (symbol, code))
    }

    /// Length of the longest codeword in the table.
    pub fn max_len(&self) -> u8 {
        self.codes.values().map(|code| code.len()).max().unwrap_or(0)
    }

    /// Derives the codeword-to-symbol mapping for the decoder.
    pub fn inverted(&self) -> InvertedCodeTable {
        self.codes.iter().map(|(&symbol, &code)| (code, symbol)).collect()
    }
}

fn collect_paths(node: &HuffNode, path: Codeword, codes: &mut HashMap<u8, Codeword>) {
    match node {
        HuffNode::Leaf { symbol, .. } => {
            codes.insert(*symbol, path);
        }
        HuffNode::Internal { left, right, .. } => {
            collect_paths(left, path.push(0), codes);
            collect_paths(right, path.push(1), codes);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::huffman::freq::FrequencyTable;
    use crate::huffman::tree::build_tree;

    fn table_for(data: &[u8]) -> CodeTable {
        let root = build_tree(&FrequencyTable::from_bytes(data)).unwrap();
        CodeTable::from_tree(&root)
    }

    #[test]
    fn codeword_digits_come_out_in_push_order() {
        let code = Codeword::empty().push(1).push(0).push(1).push(1);
        assert_eq!(code.len(), 4);
        assert_eq!(code.digits().collect::<Vec<_>>(), vec![1, 0, 1, 1]);
        assert_eq!(format!("{code:?}"), "1011");
    }

    #[test]
    fn skewed_frequencies_give_expected_code_lengths() {
        let table = table_for(b"aaabbc");
        assert_eq!(table.len(), 3);
        assert_eq!(table.get(b'a').unwrap().len(), 1);
        assert_eq!(table.get(b'b').unwrap().len(), 2);
        assert_eq!(table.get(b'c').unwrap().len(), 2);
        assert_eq!(table.max_len(), 2);
    }

    #[test]
    fn codewords_are_prefix_free() {
        let table = table_for(b"the quick brown fox jumps over the lazy dog");
        let codes: Vec<Codeword> = table.iter().map(|(_, code)| code).collect();

        for (i, a) in codes.iter().enumerate() {
            for (j, b) in codes.iter().enumerate() {
                if i != j {
                    assert!(
                        !a.is_prefix_of(b),
                        "{a:?} is a prefix of {b:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn every_codeword_is_non_empty() {
        let table = table_for(b"abcdefgh");
        for (_, code) in table.iter() {
            assert!(code.len() >= 1);
        }
    }

    #[test]
    fn single_symbol_gets_the_fixed_one_bit_codeword() {
        let table = table_for(b"zzzzz");
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(b'z'), Some(SINGLE_SYMBOL_CODEWORD));
        assert_eq!(SINGLE_SYMBOL_CODEWORD.len(), 1);
    }

    #[test]
    fn inversion_swaps_keys_and_values() {
        let table = table_for(b"aaabbc");
        let inverted = table.inverted();
        assert_eq!(inverted.len(), table.len());
        for (symbol, code) in table.iter() {
            assert_eq!(inverted.get(&code), Some(&symbol));
        }
    }
}
