// ID3v2 tag and its canonical field accessors

use super::content::FrameValue;
use super::frame::{read_frames, FrameMap};
use super::header::Id3v2Header;
use crate::error::{Result, TagError};
use crate::field_mapping::{FieldMappings, StandardField, ValueConverter};
use crate::id3::genres::expand_genre;
use crate::metadata::{Picture, TagFormat};
use crate::options::ReadOptions;

use std::io::Read;

/// A decoded ID3v2 tag
///
/// Accessors resolve the bare frame identifier for the tag's version and
/// return empty values when the frame is absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Id3v2Tag {
    header: Id3v2Header,
    frames: FrameMap,
}

impl Id3v2Tag {
    /// Read a tag starting at the current position, with default options
    pub fn read<R: Read>(reader: &mut R) -> Result<Self> {
        Self::read_with(reader, ReadOptions::default())
    }

    pub fn read_with<R: Read>(reader: &mut R, options: ReadOptions) -> Result<Self> {
        let (header, offset) = Id3v2Header::read(reader)?;

        if let Some(limit) = options.max_tag_size {
            if header.size > limit {
                return Err(TagError::TagTooLarge {
                    size: header.size,
                    limit,
                });
            }
        }

        let frames = read_frames(reader, &header, offset, options)?;
        tracing::debug!(frames = frames.len(), "Read ID3v2 tag");

        Ok(Id3v2Tag { header, frames })
    }

    pub fn header(&self) -> &Id3v2Header {
        &self.header
    }

    /// The raw frame mapping, including suffixed duplicates
    pub fn frames(&self) -> &FrameMap {
        &self.frames
    }

    pub fn tag_format(&self) -> TagFormat {
        self.header.tag_format()
    }

    fn field(&self, field: StandardField) -> Option<&FrameValue> {
        self.frames
            .get(FieldMappings::frame_id(field, self.header.version))
    }

    fn text(&self, field: StandardField) -> &str {
        self.field(field)
            .and_then(FrameValue::as_text)
            .unwrap_or_default()
    }

    pub fn title(&self) -> &str {
        self.text(StandardField::Title)
    }

    pub fn artist(&self) -> &str {
        self.text(StandardField::Artist)
    }

    pub fn album(&self) -> &str {
        self.text(StandardField::Album)
    }

    pub fn album_artist(&self) -> &str {
        self.text(StandardField::AlbumArtist)
    }

    pub fn composer(&self) -> &str {
        self.text(StandardField::Composer)
    }

    /// Year from `TYE`/`TYER`/`TDRC`, 0 when absent or unparsable
    pub fn year(&self) -> i32 {
        ValueConverter::parse_year(self.text(StandardField::Year))
    }

    /// Raw track text, e.g. `3/12`
    pub fn track(&self) -> &str {
        self.text(StandardField::Track)
    }

    pub fn track_number(&self) -> Option<u32> {
        ValueConverter::normalize_track(self.track())
    }

    /// Genre with numeric references such as `(17)` replaced by their names
    pub fn genre(&self) -> String {
        expand_genre(self.text(StandardField::Genre))
    }

    /// Text of the first comment frame
    pub fn comment(&self) -> &str {
        self.text(StandardField::Comment)
    }

    /// Text of the first unsynchronised lyrics frame
    pub fn lyrics(&self) -> &str {
        self.text(StandardField::Lyrics)
    }

    /// The front cover, if the tag has one
    pub fn album_art(&self) -> Option<&Picture> {
        match self.field(StandardField::Picture)? {
            FrameValue::Picture(picture) => Some(picture),
            _ => None,
        }
    }
}
