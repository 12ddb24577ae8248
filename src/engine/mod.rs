pub mod error;
pub mod frequency;
pub mod huffman;
pub mod codes;
pub mod bitstream;
pub mod coder;

pub use coder::*;
pub use codes::{Code, CodeTable};
pub use error::CodecError;
pub use frequency::FrequencyTable;
pub use huffman::{HuffmanTree, Node};
