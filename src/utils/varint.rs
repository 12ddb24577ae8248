/// Append `value` as an unsigned LEB128 varint.
pub fn write_varint(mut value: u64, out: &mut Vec<u8>) {
    loop {
        let byte = (value & 0x7F) as u8;
        value >>= 7;
        if value == 0 {
            out.push(byte);
            return;
        }
        out.push(byte | 0x80);
    }
}

/// Read a varint from the front of `buf`.
///
/// Returns the value and the number of bytes used, or `None` if the input
/// ends mid-varint or the value does not fit in 64 bits.
pub fn read_varint(buf: &[u8]) -> Option<(u64, usize)> {
    let mut result = 0u64;
    for (i, &byte) in buf.iter().enumerate().take(10) {
        let shift = 7 * i as u32;
        let chunk = (byte & 0x7F) as u64;
        if shift == 63 && chunk > 1 {
            return None;
        }
        result |= chunk << shift;
        if byte & 0x80 == 0 {
            return Some((result, i + 1));
        }
    }
    None
}
