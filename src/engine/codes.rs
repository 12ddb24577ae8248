use std::collections::BTreeMap;
use std::fmt;

use sha2::{Digest, Sha256};

use crate::engine::frequency::FrequencyTable;
use crate::engine::huffman::{HuffmanTree, Node};

/// Root-to-leaf path: `false` for left, `true` for right. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Code(Vec<bool>);

impl Code {
    pub fn bits(&self) -> &[bool] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn starts_with(&self, other: &Code) -> bool {
        self.0.starts_with(&other.0)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.0 {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<u8, Code>,
}

impl CodeTable {
    /// Assign every leaf its path from the root.
    ///
    /// A lone leaf root gets the one-bit code `0` so each symbol still
    /// occupies a bit in the stream.
    pub fn derive(tree: &HuffmanTree) -> Self {
        let mut codes = BTreeMap::new();
        let Some(root) = tree.root() else {
            return Self { codes };
        };

        if let Node::Leaf { symbol, .. } = root {
            codes.insert(*symbol, Code(vec![false]));
            return Self { codes };
        }

        let mut stack: Vec<(&Node, Vec<bool>)> = vec![(root, Vec::new())];
        while let Some((node, path)) = stack.pop() {
            match node {
                Node::Leaf { symbol, .. } => {
                    codes.insert(*symbol, Code(path));
                }
                Node::Internal { left, right, .. } => {
                    let mut right_path = path.clone();
                    right_path.push(true);
                    stack.push((right, right_path));

                    let mut left_path = path;
                    left_path.push(false);
                    stack.push((left, left_path));
                }
            }
        }

        Self { codes }
    }

    pub fn get(&self, symbol: u8) -> Option<&Code> {
        self.codes.get(&symbol)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, &Code)> + '_ {
        self.codes.iter().map(|(&symbol, code)| (symbol, code))
    }

    pub fn is_prefix_free(&self) -> bool {
        let codes: Vec<&Code> = self.codes.values().collect();
        codes.iter().enumerate().all(|(i, a)| {
            codes
                .iter()
                .enumerate()
                .all(|(j, b)| i == j || !b.starts_with(a))
        })
    }

    /// Number of bits needed to encode an input with these frequencies.
    pub fn encoded_bit_length(&self, freq: &FrequencyTable) -> u64 {
        freq.iter()
            .filter_map(|(symbol, count)| self.get(symbol).map(|code| code.len() as u64 * count))
            .sum()
    }

    /// Frequency-weighted mean code length in bits.
    pub fn average_length(&self, freq: &FrequencyTable) -> f64 {
        match freq.total() {
            0 => 0.0,
            total => self.encoded_bit_length(freq) as f64 / total as f64,
        }
    }

    /// Short stable digest of the whole assignment.
    ///
    /// Two coders agree on every code iff their fingerprints match.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        for (symbol, code) in self.iter() {
            hasher.update([symbol]);
            hasher.update((code.len() as u32).to_be_bytes());
            hasher.update(crate::engine::bitstream::pack(code.bits()));
        }
        hex::encode(&hasher.finalize()[..16])
    }
}
