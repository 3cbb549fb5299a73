// Error types for tag decoding

use crate::metadata::TagFormat;

use std::fmt::{Display, Formatter};

/// Alias for `Result<T, TagError>`
pub type Result<T> = std::result::Result<T, TagError>;

/// Reasons a decode call can fail
///
/// Every variant is terminal for the call that produced it: no partially
/// populated [`Metadata`](crate::Metadata) is ever returned alongside an error.
#[derive(Debug)]
pub enum TagError {
    /// The stream ended before the expected number of bytes
    TruncatedInput,
    /// The 128-byte trailer does not start with `TAG`
    NotId3v1,
    /// Neither an ID3v2 header nor an ID3v1 trailer is present
    NoTagFound,
    /// ID3v2 major version outside of 2, 3 and 4
    UnsupportedVersion(u8),
    /// Bad marker bytes or an impossible header field
    MalformedHeader(String),
    /// Compression flag set on a version that cannot carry it
    UnsupportedCompression(TagFormat),
    /// ID3v2.4 compressed frame without a data length indicator
    MissingDataLengthIndicator,
    /// Data length indicator flag on a version that does not define it
    InvalidDataLengthIndicator(TagFormat),
    /// Text encoding selector outside of 0..=3
    InvalidEncoding(u8),
    /// A recognised frame whose body cannot be decoded
    MalformedFrame { id: String, reason: &'static str },
    /// The declared tag size is over the configured limit
    TagTooLarge { size: u32, limit: u32 },
    /// Any other stream failure
    Io(std::io::Error),
}

impl TagError {
    /// Whether the error only concerns a single frame body
    ///
    /// These are the errors [`ParsingMode::Relaxed`](crate::ParsingMode::Relaxed) skips.
    pub fn is_frame_error(&self) -> bool {
        matches!(self, TagError::InvalidEncoding(_) | TagError::MalformedFrame { .. })
    }

    pub(crate) fn malformed_frame(id: &str, reason: &'static str) -> Self {
        TagError::MalformedFrame {
            id: id.to_string(),
            reason,
        }
    }
}

impl Display for TagError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TagError::TruncatedInput => write!(f, "stream ended before the expected bytes"),
            TagError::NotId3v1 => write!(f, "invalid ID3v1 tag"),
            TagError::NoTagFound => write!(f, "no tag found"),
            TagError::UnsupportedVersion(major) => {
                write!(f, "ID3 version: {}, expected: 2, 3 and 4", major)
            }
            TagError::MalformedHeader(msg) => write!(f, "malformed header: {}", msg),
            TagError::UnsupportedCompression(format) => {
                write!(f, "unsupported compression flag used in {}", format)
            }
            TagError::MissingDataLengthIndicator => {
                write!(f, "compression without data length indicator")
            }
            TagError::InvalidDataLengthIndicator(format) => {
                write!(f, "data length indicator set but not defined for {}", format)
            }
            TagError::InvalidEncoding(byte) => write!(f, "invalid encoding byte {:#04x}", byte),
            TagError::MalformedFrame { id, reason } => {
                write!(f, "could not read {:?}: {}", id, reason)
            }
            TagError::TagTooLarge { size, limit } => {
                write!(f, "declared tag size {} exceeds limit {}", size, limit)
            }
            TagError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for TagError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TagError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for TagError {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::UnexpectedEof => TagError::TruncatedInput,
            _ => TagError::Io(e),
        }
    }
}
