// ID3v2 tag header and extended header

use crate::error::{Result, TagError};
use crate::metadata::TagFormat;
use crate::utils::io::{get_bit, read_bytes, read_synchsafe, read_uint, synchsafe};

use std::io::Read;

/// The ID3v2 sub-version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Id3v2Version {
    /// ID3v2.2
    V2,
    /// ID3v2.3
    V3,
    /// ID3v2.4
    V4,
}

impl From<Id3v2Version> for TagFormat {
    fn from(version: Id3v2Version) -> Self {
        match version {
            Id3v2Version::V2 => TagFormat::Id3v2_2,
            Id3v2Version::V3 => TagFormat::Id3v2_3,
            Id3v2Version::V4 => TagFormat::Id3v2_4,
        }
    }
}

/// The 10-byte ID3v2 header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Id3v2Header {
    pub version: Id3v2Version,
    pub unsynchronisation: bool,
    pub extended_header: bool,
    /// Read from bit 5, the same bit as `extended_header`
    ///
    /// The experimental indicator proper is bit 6, which is not read.
    pub experimental: bool,
    /// Tag size excluding the 10-byte header
    pub size: u32,
}

impl Id3v2Header {
    pub const SIZE: u32 = 10;
    const ID: [u8; 3] = [b'I', b'D', b'3'];

    /// Read the header, and skip the extended header if there is one
    ///
    /// Returns the header along with the number of bytes consumed from the
    /// start of the tag, which is where the first frame begins.
    pub fn read<R: Read>(reader: &mut R) -> Result<(Self, u32)> {
        tracing::debug!("Parsing ID3v2 header");

        let buffer = read_bytes(reader, Self::SIZE as usize)?;

        if buffer[0..3] != Self::ID {
            return Err(TagError::MalformedHeader(
                "expected to read \"ID3\"".to_string(),
            ));
        }

        let version = match buffer[3] {
            2 => Id3v2Version::V2,
            3 => Id3v2Version::V3,
            4 => Id3v2Version::V4,
            major => return Err(TagError::UnsupportedVersion(major)),
        };

        // The minor version in buffer[4] is ignored
        let flags = buffer[5];
        let header = Id3v2Header {
            version,
            unsynchronisation: get_bit(flags, 7),
            extended_header: get_bit(flags, 5),
            experimental: get_bit(flags, 5),
            size: synchsafe([buffer[6], buffer[7], buffer[8], buffer[9]]),
        };

        let mut offset = Self::SIZE;
        if header.extended_header {
            offset += header.skip_extended_header(reader)?;
        }

        tracing::debug!(
            version = %header.tag_format(),
            size = header.size,
            offset,
            "Read ID3v2 header"
        );

        Ok((header, offset))
    }

    /// Skip the extended header, returning the number of bytes consumed
    fn skip_extended_header<R: Read>(&self, reader: &mut R) -> Result<u32> {
        match self.version {
            // ID3v2.2 has no extended header
            Id3v2Version::V2 => Ok(0),
            Id3v2Version::V3 => {
                // Size excludes the 4 length bytes
                let size = read_uint(reader, 4)?;
                read_bytes(reader, size as usize)?;
                Ok(size.saturating_add(4))
            }
            Id3v2Version::V4 => {
                // Synchsafe size including the 4 length bytes
                let size = read_synchsafe(reader)?;
                let remaining = size.checked_sub(4).ok_or_else(|| {
                    TagError::MalformedHeader(format!(
                        "extended header size {} is smaller than its length field",
                        size
                    ))
                })?;
                read_bytes(reader, remaining as usize)?;
                Ok(size)
            }
        }
    }

    pub fn tag_format(&self) -> TagFormat {
        self.version.into()
    }

    /// Offset one past the last byte of the tag, counted from the start of the header
    pub fn tag_end(&self) -> u64 {
        u64::from(Self::SIZE) + u64::from(self.size)
    }
}
