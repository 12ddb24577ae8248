pub mod crc;
pub mod varint;
