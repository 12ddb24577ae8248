//! Self-describing container around the raw Huffman bitstream.
//!
//! The header carries the frequency table and the symbol count, so the
//! decoder rebuilds the exact tree the encoder used and stops before the
//! padding bits of the last byte.

pub mod constants;
pub mod error;
pub mod header;

use tracing::{debug, warn};

use crate::engine::{FrequencyTable, HuffmanCoder};
use crate::utils::crc::payload_crc32;

pub use constants::*;
pub use error::ContainerError;
pub use header::ContainerHeader;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerOptions {
    /// Store a CRC-32 of the original payload when compressing.
    pub write_checksum: bool,
    /// Check the stored CRC-32, if present, when decompressing.
    pub verify_checksum: bool,
}

impl Default for ContainerOptions {
    fn default() -> Self {
        Self {
            write_checksum: true,
            verify_checksum: true,
        }
    }
}

pub fn compress(input: &[u8], options: &ContainerOptions) -> Result<Vec<u8>, ContainerError> {
    let frequencies = FrequencyTable::build(input);
    let coder = HuffmanCoder::from_frequencies(frequencies);
    let body = coder.encode(input)?;

    let (flags, checksum) = if options.write_checksum {
        (FLAG_CRC, payload_crc32(input))
    } else {
        (0, 0)
    };

    let header = ContainerHeader {
        version: CONTAINER_VERSION,
        flags,
        symbol_count: input.len() as u64,
        checksum,
        frequencies: coder.frequencies().clone(),
    };

    let mut output = header.encode();
    let header_len = output.len();
    output.extend_from_slice(&body);
    debug!(
        "compressed {} bytes: header {} + body {}",
        input.len(),
        header_len,
        body.len()
    );
    Ok(output)
}

pub fn decompress(data: &[u8], options: &ContainerOptions) -> Result<Vec<u8>, ContainerError> {
    let (header, offset) = ContainerHeader::decode(data)?;
    let body = &data[offset..];

    // Every symbol costs at least one bit of body.
    let body_bits = (body.len() as u64).saturating_mul(8);
    if header.symbol_count > body_bits {
        return Err(ContainerError::InvalidHeader(format!(
            "symbol count {} exceeds the {} body bits",
            header.symbol_count, body_bits
        )));
    }
    let symbol_count = usize::try_from(header.symbol_count).map_err(|_| {
        ContainerError::InvalidHeader(format!("symbol count {} too large", header.symbol_count))
    })?;
    let has_checksum = header.has_checksum();

    let ContainerHeader {
        checksum,
        frequencies,
        ..
    } = header;

    let coder = HuffmanCoder::from_frequencies(frequencies);
    let output = coder.decode(body, symbol_count)?;

    if has_checksum {
        if options.verify_checksum {
            let actual = payload_crc32(&output);
            if actual != checksum {
                return Err(ContainerError::ChecksumMismatch {
                    expected: checksum,
                    actual,
                });
            }
        } else {
            warn!("checksum present but verification disabled");
        }
    }

    debug!("decompressed {} bytes into {}", data.len(), output.len());
    Ok(output)
}
