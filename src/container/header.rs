use tracing::error;

use crate::container::constants::*;
use crate::container::error::ContainerError;
use crate::engine::FrequencyTable;
use crate::utils::varint::{read_varint, write_varint};

/// Container header: a fixed 20-byte prefix followed by the frequency table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerHeader {
    pub version: u16,
    pub flags: u8,
    pub symbol_count: u64,
    pub checksum: u32,
    pub frequencies: FrequencyTable,
}

impl ContainerHeader {
    pub const FIXED_SIZE: usize = 20;

    pub fn has_checksum(&self) -> bool {
        self.flags & FLAG_CRC != 0
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(Self::FIXED_SIZE + 1 + self.frequencies.len() * 3);
        buf.extend_from_slice(&CONTAINER_MAGIC);
        buf.extend_from_slice(&self.version.to_be_bytes());
        buf.push(self.flags);
        buf.push(0);
        buf.extend_from_slice(&self.symbol_count.to_be_bytes());
        buf.extend_from_slice(&self.checksum.to_be_bytes());

        write_varint(self.frequencies.len() as u64, &mut buf);
        for (symbol, count) in self.frequencies.iter() {
            buf.push(symbol);
            write_varint(count, &mut buf);
        }
        buf
    }

    /// Parse a header from the front of `buf`, returning it with the
    /// offset of the packed bitstream.
    pub fn decode(buf: &[u8]) -> Result<(Self, usize), ContainerError> {
        if buf.len() < Self::FIXED_SIZE {
            error!("Container header too short: {} bytes", buf.len());
            return Err(ContainerError::Truncated);
        }

        if buf[0..4] != CONTAINER_MAGIC {
            return Err(ContainerError::InvalidMagic);
        }

        let version = u16::from_be_bytes([buf[4], buf[5]]);
        if version != CONTAINER_VERSION {
            return Err(ContainerError::UnsupportedVersion(version));
        }

        let flags = buf[6];
        if flags & !KNOWN_FLAGS != 0 {
            return Err(ContainerError::InvalidHeader(format!(
                "unknown flag bits {flags:08b}"
            )));
        }
        if buf[7] != 0 {
            return Err(ContainerError::InvalidHeader("reserved byte is not zero".into()));
        }

        let symbol_count = u64::from_be_bytes([
            buf[8], buf[9], buf[10], buf[11], buf[12], buf[13], buf[14], buf[15],
        ]);
        let checksum = u32::from_be_bytes([buf[16], buf[17], buf[18], buf[19]]);

        let mut offset = Self::FIXED_SIZE;
        let (table_len, used) = read_varint(&buf[offset..]).ok_or(ContainerError::Truncated)?;
        offset += used;
        if table_len > MAX_TABLE_ENTRIES {
            return Err(ContainerError::InvalidHeader(format!(
                "frequency table has {table_len} entries"
            )));
        }

        let mut pairs = Vec::with_capacity(table_len as usize);
        for _ in 0..table_len {
            let symbol = *buf.get(offset).ok_or(ContainerError::Truncated)?;
            offset += 1;
            let (count, used) = read_varint(&buf[offset..]).ok_or(ContainerError::Truncated)?;
            offset += used;
            pairs.push((symbol, count));
        }
        let frequencies = FrequencyTable::from_counts(pairs)?;

        if frequencies.total() != symbol_count {
            return Err(ContainerError::InvalidHeader(format!(
                "symbol count {symbol_count} does not match frequency total {}",
                frequencies.total()
            )));
        }

        let header = Self {
            version,
            flags,
            symbol_count,
            checksum,
            frequencies,
        };
        Ok((header, offset))
    }
}
