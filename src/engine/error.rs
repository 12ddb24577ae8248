use thiserror::Error;

/// Failures of the raw Huffman codec.
///
/// Empty input is not an error: encoding nothing yields nothing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    /// The coder was built from a corpus that never contained this byte.
    #[error("no code for symbol {symbol:#04x} at input position {position}")]
    UnknownSymbol { symbol: u8, position: usize },

    /// The bitstream ended before `expected` symbols were decoded.
    #[error("truncated stream: decoded {decoded} of {expected} symbols")]
    TruncatedStream { decoded: usize, expected: usize },

    /// A bit that leads nowhere in the tree.
    #[error("invalid code at bit position {position}")]
    InvalidCode { position: usize },

    /// Whole bytes were left over after the last expected symbol.
    #[error("{unused_bits} bits left after the last symbol")]
    TrailingData { unused_bits: usize },

    #[error("invalid frequency for symbol {symbol:#04x}: {reason}")]
    InvalidFrequency { symbol: u8, reason: String },
}
