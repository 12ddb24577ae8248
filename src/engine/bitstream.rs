//! MSB-first bit packing.
//!
//! `pack` pads the final byte with zero bits and does not record how many of
//! them were valid; framing is left to the caller (see `HuffmanCoder::decode`
//! and the container header).

use crate::engine::codes::Code;

/// Bytes needed to hold `bit_count` bits.
pub fn packed_len(bit_count: usize) -> usize {
    bit_count.div_ceil(8)
}

pub fn pack(bits: &[bool]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(packed_len(bits.len()));
    for group in bits.chunks(8) {
        let mut current_byte = 0u8;
        for (bit_pos, &bit) in group.iter().enumerate() {
            if bit {
                current_byte |= 1 << (7 - bit_pos);
            }
        }
        bytes.push(current_byte);
    }
    bytes
}

pub fn unpack(bytes: &[u8]) -> Vec<bool> {
    let mut bits = Vec::with_capacity(bytes.len() * 8);
    for &byte in bytes {
        for bit_pos in 0..8 {
            bits.push((byte >> (7 - bit_pos)) & 1 == 1);
        }
    }
    bits
}

/// Growable bit sequence built up during encoding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitBuffer {
    bits: Vec<bool>,
}

impl BitBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bits: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    pub fn extend_from_code(&mut self, code: &Code) {
        self.bits.extend_from_slice(code.bits());
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.bits
    }

    pub fn pack(&self) -> Vec<u8> {
        pack(&self.bits)
    }
}
