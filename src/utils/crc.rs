use crc32fast::Hasher;

/// CRC-32 of an uncompressed payload, stored in the container header.
pub fn payload_crc32(data: &[u8]) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(data);
    hasher.finalize()
}
