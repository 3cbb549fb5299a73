// ID3v1 tag implementation

use crate::error::{Result, TagError};
use crate::id3::genres::genre_name;
use crate::utils::io::read_bytes;

use encoding_rs::WINDOWS_1252;
use std::io::{Read, Seek, SeekFrom};

/// ID3v1 tag structure
///
/// ID3v1.1 track numbers are not split out of the comment, and the format has
/// neither an album artist nor pictures.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Id3v1Tag {
    pub title: String,
    pub artist: String,
    pub album: String,
    /// Year as written, trimmed
    pub year: String,
    pub comment: String,
    /// Genre name, empty when the code is outside the genre table
    pub genre: String,
}

impl Id3v1Tag {
    pub const TAG_SIZE: usize = 128;
    const TAG_ID: [u8; 3] = [b'T', b'A', b'G'];

    /// Read the ID3v1 trailer at the end of the stream
    ///
    /// Fails with [`TagError::NotId3v1`] if the trailer does not start with `TAG`.
    pub fn read<R: Read + Seek>(reader: &mut R) -> Result<Self> {
        let end = reader.seek(SeekFrom::End(0))?;
        if end < Self::TAG_SIZE as u64 {
            return Err(TagError::TruncatedInput);
        }

        reader.seek(SeekFrom::End(-(Self::TAG_SIZE as i64)))?;
        let buffer = read_bytes(reader, Self::TAG_SIZE)?;

        if buffer[0..3] != Self::TAG_ID {
            return Err(TagError::NotId3v1);
        }

        Ok(Self::parse(&buffer))
    }

    /// Parse ID3v1 tag from a 128-byte buffer
    fn parse(buffer: &[u8]) -> Self {
        let genre = genre_name(usize::from(buffer[127]))
            .unwrap_or_default()
            .to_string();

        Id3v1Tag {
            title: Self::parse_string(&buffer[3..33]),
            artist: Self::parse_string(&buffer[33..63]),
            album: Self::parse_string(&buffer[63..93]),
            year: Self::parse_string(&buffer[93..97]),
            comment: Self::parse_string(&buffer[97..127]),
            genre,
        }
    }

    /// Year as a number, 0 when empty or unparsable
    pub fn year(&self) -> i32 {
        self.year.parse().unwrap_or(0)
    }

    /// Decode a fixed-width field, trimming NUL padding and whitespace
    ///
    /// Latin-1 is read as Windows-1252, so 0x80-0x9F map to printable
    /// characters instead of C1 controls.
    fn parse_string(bytes: &[u8]) -> String {
        let text = WINDOWS_1252.decode_without_bom_handling(bytes).0;
        text.trim_matches('\0').trim().to_string()
    }
}
