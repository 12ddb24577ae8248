//! Container format constants

/// Container magic bytes: "SYMH"
pub const CONTAINER_MAGIC: [u8; 4] = *b"SYMH";

/// Current container version
pub const CONTAINER_VERSION: u16 = 1;

/// Header flags (bitmask)
pub const FLAG_CRC: u8 = 0x01;
pub const KNOWN_FLAGS: u8 = FLAG_CRC;

/// Distinct byte values; a frequency table never has more entries.
pub const MAX_TABLE_ENTRIES: u64 = 256;
