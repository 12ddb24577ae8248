//! Huffman coding over byte streams.
//!
//! [`engine`] holds the raw codec: frequency counting, deterministic tree
//! construction, code derivation, bit packing and the [`HuffmanCoder`]
//! façade. [`container`] wraps the raw bitstream in a self-describing
//! header. [`assembly`] is an unrelated dependency orderer kept alongside.
//!
//! ```
//! use symhuff::HuffmanCoder;
//!
//! let input = b"abracadabra";
//! let coder = HuffmanCoder::from_input(input);
//! let packed = coder.encode(input)?;
//! assert_eq!(coder.decode(&packed, input.len())?, input);
//! # Ok::<(), symhuff::CodecError>(())
//! ```

pub mod assembly;
pub mod config;
pub mod container;
pub mod engine;
pub mod report;
pub mod utils;

pub use container::{compress, decompress, ContainerError, ContainerOptions};
pub use engine::{CodecError, CodeTable, FrequencyTable, HuffmanCoder, HuffmanTree};
