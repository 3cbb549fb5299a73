// Text encodings used by ID3v2 frame bodies

use crate::error::{Result, TagError};

use encoding_rs::{UTF_16BE, UTF_16LE, UTF_8, WINDOWS_1252};

/// The encoding selector found in the first byte of text-bearing frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    /// Decoded as Windows-1252, so 0x80-0x9F give printable characters rather
    /// than ISO-8859-1 C1 controls
    Iso8859_1 = 0,
    /// UTF-16 with a leading byte order mark
    Utf16 = 1,
    Utf16BE = 2,
    Utf8 = 3,
}

impl TextEncoding {
    pub fn from_byte(byte: u8) -> Result<Self> {
        match byte {
            0 => Ok(TextEncoding::Iso8859_1),
            1 => Ok(TextEncoding::Utf16),
            2 => Ok(TextEncoding::Utf16BE),
            3 => Ok(TextEncoding::Utf8),
            _ => Err(TagError::InvalidEncoding(byte)),
        }
    }

    /// Width of the string terminator in bytes
    pub fn terminator_len(self) -> usize {
        match self {
            TextEncoding::Iso8859_1 | TextEncoding::Utf8 => 1,
            TextEncoding::Utf16 | TextEncoding::Utf16BE => 2,
        }
    }
}

/// Decode text with the specified encoding
///
/// Trailing NUL terminators are dropped, interior ones are kept as written.
pub fn decode_text(data: &[u8], encoding: TextEncoding) -> String {
    let decoded = match encoding {
        TextEncoding::Iso8859_1 => WINDOWS_1252.decode_without_bom_handling(data).0.into_owned(),
        TextEncoding::Utf16 => {
            if data.len() < 2 {
                return String::new();
            }
            decode_utf16_values(data)
        }
        TextEncoding::Utf16BE => UTF_16BE.decode_without_bom_handling(data).0.into_owned(),
        TextEncoding::Utf8 => UTF_8.decode_without_bom_handling(data).0.into_owned(),
    };

    decoded.trim_end_matches('\0').to_string()
}

/// Decode NUL-separated UTF-16 values, each of which may carry its own BOM
///
/// A value without a BOM keeps the byte order of the value before it, little
/// endian for the first one.
fn decode_utf16_values(data: &[u8]) -> String {
    let mut encoding = UTF_16LE;
    let mut values = Vec::new();

    let mut rest = data;
    loop {
        let (value, tail) = split_terminated(rest, TextEncoding::Utf16);

        let value = match value {
            [0xFF, 0xFE, body @ ..] => {
                encoding = UTF_16LE;
                body
            }
            [0xFE, 0xFF, body @ ..] => {
                encoding = UTF_16BE;
                body
            }
            body => body,
        };
        values.push(encoding.decode_without_bom_handling(value).0.into_owned());

        match tail {
            Some(tail) => rest = tail,
            None => break,
        }
    }

    values.join("\0")
}

/// Split `data` at the first terminator for `encoding`
///
/// Returns the bytes before the terminator and, if one was found, the bytes
/// after it. UTF-16 terminators are only matched on code unit boundaries.
pub fn split_terminated(data: &[u8], encoding: TextEncoding) -> (&[u8], Option<&[u8]>) {
    let position = match encoding.terminator_len() {
        1 => data.iter().position(|&b| b == 0),
        _ => data
            .chunks_exact(2)
            .position(|unit| unit == [0, 0])
            .map(|unit| unit * 2),
    };

    match position {
        Some(pos) => (
            &data[..pos],
            Some(&data[pos + encoding.terminator_len()..]),
        ),
        None => (data, None),
    }
}
