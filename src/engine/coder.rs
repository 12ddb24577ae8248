use tracing::debug;

use crate::engine::bitstream::{self, BitBuffer};
use crate::engine::codes::CodeTable;
use crate::engine::error::CodecError;
use crate::engine::frequency::FrequencyTable;
use crate::engine::huffman::{HuffmanTree, Node};

/// Huffman coder built once from a corpus and reused for encode and decode.
///
/// The raw output carries no framing. Decoding needs a coder built from the
/// same frequencies plus the number of symbols that were encoded.
#[derive(Debug, Clone, Default)]
pub struct HuffmanCoder {
    frequencies: FrequencyTable,
    tree: HuffmanTree,
    codes: CodeTable,
}

impl HuffmanCoder {
    pub fn from_input(input: &[u8]) -> Self {
        Self::from_frequencies(FrequencyTable::build(input))
    }

    pub fn from_frequencies(frequencies: FrequencyTable) -> Self {
        let tree = HuffmanTree::build(&frequencies);
        let codes = CodeTable::derive(&tree);
        debug!(
            "coder built: {} symbols, {} leaves, depth {}",
            frequencies.total(),
            tree.leaf_count(),
            tree.depth()
        );
        Self {
            frequencies,
            tree,
            codes,
        }
    }

    pub fn frequencies(&self) -> &FrequencyTable {
        &self.frequencies
    }

    pub fn tree(&self) -> &HuffmanTree {
        &self.tree
    }

    pub fn codes(&self) -> &CodeTable {
        &self.codes
    }

    pub fn encode_bits(&self, input: &[u8]) -> Result<BitBuffer, CodecError> {
        // Every code is at least one bit long.
        let mut bits = BitBuffer::with_capacity(input.len());
        for (position, &symbol) in input.iter().enumerate() {
            let code = self
                .codes
                .get(symbol)
                .ok_or(CodecError::UnknownSymbol { symbol, position })?;
            bits.extend_from_code(code);
        }
        Ok(bits)
    }

    pub fn encode(&self, input: &[u8]) -> Result<Vec<u8>, CodecError> {
        let bits = self.encode_bits(input)?;
        let packed = bits.pack();
        debug!(
            "encoded {} bytes into {} bits ({} bytes)",
            input.len(),
            bits.len(),
            packed.len()
        );
        Ok(packed)
    }

    /// Decode exactly `symbol_count` symbols from `data`.
    pub fn decode(&self, data: &[u8], symbol_count: usize) -> Result<Vec<u8>, CodecError> {
        decode(data, &self.tree, symbol_count)
    }
}

/// Walk `tree` bit by bit over `data`, emitting a symbol per leaf reached.
///
/// Stops after `symbol_count` symbols so the zero padding of the last byte
/// is never read as code bits. Running out of bits first, even in the
/// middle of a code, is a `TruncatedStream`. Leaving a whole unused byte
/// behind, or padding that is not all zero, is `TrailingData`.
pub fn decode(data: &[u8], tree: &HuffmanTree, symbol_count: usize) -> Result<Vec<u8>, CodecError> {
    let mut out = Vec::with_capacity(symbol_count.min(data.len().saturating_mul(8)));
    if symbol_count == 0 {
        return match data.len() {
            0 => Ok(out),
            n => Err(CodecError::TrailingData { unused_bits: n * 8 }),
        };
    }

    let Some(mut decoder) = SymbolDecoder::new(tree) else {
        return Err(CodecError::TruncatedStream {
            decoded: 0,
            expected: symbol_count,
        });
    };

    let bits = bitstream::unpack(data);
    let mut consumed = 0;
    for &bit in &bits {
        consumed += 1;
        if let Some(symbol) = decoder.push_bit(bit)? {
            out.push(symbol);
            if out.len() == symbol_count {
                break;
            }
        }
    }

    if out.len() < symbol_count {
        return Err(CodecError::TruncatedStream {
            decoded: out.len(),
            expected: symbol_count,
        });
    }

    let unused_bits = bits.len() - consumed;
    if unused_bits >= 8 || bits[consumed..].iter().any(|&bit| bit) {
        return Err(CodecError::TrailingData { unused_bits });
    }

    debug!("decoded {} symbols from {} bits", out.len(), consumed);
    Ok(out)
}

/// Incremental decoder. The current node is the only state carried from
/// one bit to the next.
#[derive(Debug, Clone)]
pub struct SymbolDecoder<'a> {
    root: &'a Node,
    current: &'a Node,
    position: usize,
}

impl<'a> SymbolDecoder<'a> {
    /// `None` for an empty tree, which can decode nothing.
    pub fn new(tree: &'a HuffmanTree) -> Option<Self> {
        let root = tree.root()?;
        Some(Self {
            root,
            current: root,
            position: 0,
        })
    }

    /// Consume one bit; returns the symbol once a leaf is reached and
    /// restarts at the root.
    pub fn push_bit(&mut self, bit: bool) -> Result<Option<u8>, CodecError> {
        let position = self.position;
        self.position += 1;

        let current = self.current;
        match current {
            // Lone leaf root: every symbol is the single bit 0.
            Node::Leaf { symbol, .. } => {
                if bit {
                    Err(CodecError::InvalidCode { position })
                } else {
                    Ok(Some(*symbol))
                }
            }
            Node::Internal { left, right, .. } => {
                let next: &'a Node = if bit { right.as_ref() } else { left.as_ref() };
                match next {
                    Node::Leaf { symbol, .. } => {
                        self.current = self.root;
                        Ok(Some(*symbol))
                    }
                    Node::Internal { .. } => {
                        self.current = next;
                        Ok(None)
                    }
                }
            }
        }
    }

    /// True when no partial code is pending.
    pub fn is_at_root(&self) -> bool {
        std::ptr::eq(self.current, self.root)
    }

    /// Number of bits consumed so far.
    pub fn position(&self) -> usize {
        self.position
    }
}
