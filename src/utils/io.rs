// Primitive reads over byte streams and slices

use crate::error::{Result, TagError};

use std::io::Read;

/// Read exactly `len` bytes
///
/// The buffer grows with the data actually read, so an absurd length from a
/// corrupted header fails with `TruncatedInput` instead of allocating it upfront.
pub fn read_bytes<R: Read>(reader: &mut R, len: usize) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    reader.by_ref().take(len as u64).read_to_end(&mut buffer)?;
    if buffer.len() != len {
        return Err(TagError::TruncatedInput);
    }
    Ok(buffer)
}

/// Read a big-endian unsigned integer stored in 1 to 4 bytes
pub fn read_uint<R: Read>(reader: &mut R, width: usize) -> Result<u32> {
    debug_assert!((1..=4).contains(&width));
    let mut buffer = [0u8; 4];
    reader.read_exact(&mut buffer[..width])?;
    Ok(be_uint(&buffer[..width]))
}

/// Read a synchsafe 32-bit integer (7 bits per byte)
pub fn read_synchsafe<R: Read>(reader: &mut R) -> Result<u32> {
    let mut buffer = [0u8; 4];
    reader.read_exact(&mut buffer)?;
    Ok(synchsafe(buffer))
}

/// Read `len` bytes as a string, without any trimming
pub fn read_string<R: Read>(reader: &mut R, len: usize) -> Result<String> {
    let bytes = read_bytes(reader, len)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Big-endian unsigned integer from up to 4 bytes
pub fn be_uint(bytes: &[u8]) -> u32 {
    bytes
        .iter()
        .take(4)
        .fold(0u32, |acc, &b| (acc << 8) | u32::from(b))
}

/// Decode a synchsafe integer, ignoring the high bit of every byte
///
/// The result never exceeds 2^28 - 1.
pub fn synchsafe(bytes: [u8; 4]) -> u32 {
    bytes
        .iter()
        .fold(0u32, |acc, &b| (acc << 7) | u32::from(b & 0x7F))
}

/// Test bit `n` of `byte`, 0 being the least significant
pub fn get_bit(byte: u8, n: u8) -> bool {
    (byte >> n) & 1 == 1
}

/// Split off the first `len` bytes of `data`, failing if there are fewer
pub fn take_prefix<'a>(data: &mut &'a [u8], len: usize) -> Option<&'a [u8]> {
    if data.len() < len {
        return None;
    }
    let (head, tail) = data.split_at(len);
    *data = tail;
    Some(head)
}
