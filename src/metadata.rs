// Format-independent metadata model
//
// A decoded tag is either ID3v1 or ID3v2. Both variants answer the same set of
// questions (title, artist, album, ...), and absent fields come back empty
// rather than as errors.

use crate::id3::{Id3v1Tag, Id3v2Tag};

use base64::Engine;
use serde::Serialize;
use std::fmt::{Display, Formatter};

/// The tag format a [`Metadata`] value was decoded from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum TagFormat {
    #[default]
    #[serde(rename = "")]
    Unknown,
    #[serde(rename = "ID3v1")]
    Id3v1,
    #[serde(rename = "ID3v2.2")]
    Id3v2_2,
    #[serde(rename = "ID3v2.3")]
    Id3v2_3,
    #[serde(rename = "ID3v2.4")]
    Id3v2_4,
}

impl TagFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            TagFormat::Unknown => "",
            TagFormat::Id3v1 => "ID3v1",
            TagFormat::Id3v2_2 => "ID3v2.2",
            TagFormat::Id3v2_3 => "ID3v2.3",
            TagFormat::Id3v2_4 => "ID3v2.4",
        }
    }
}

impl Display for TagFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The container the tag was found in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum FileType {
    #[default]
    #[serde(rename = "")]
    Unknown,
    #[serde(rename = "MP3")]
    Mp3,
}

/// An attached picture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Picture {
    pub mime_type: String,
    /// Picture type code as stored in the frame (0x03 is the front cover)
    pub picture_type: u8,
    pub description: String,
    pub data: Vec<u8>,
}

impl Picture {
    /// Picture type code of the front cover
    pub const COVER_FRONT: u8 = 0x03;

    pub fn is_cover_front(&self) -> bool {
        self.picture_type == Self::COVER_FRONT
    }

    /// File extension matching the MIME type
    pub fn extension(&self) -> &'static str {
        match self.mime_type.to_ascii_lowercase().as_str() {
            "image/jpeg" | "image/jpg" => "jpg",
            "image/png" => "png",
            "image/gif" => "gif",
            "image/webp" => "webp",
            "image/bmp" => "bmp",
            "image/tiff" => "tiff",
            _ => "jpg",
        }
    }
}

/// Metadata decoded from a single stream
#[derive(Debug, Clone)]
pub enum Metadata {
    Id3v1(Id3v1Tag),
    Id3v2(Id3v2Tag),
}

impl Metadata {
    pub fn tag_format(&self) -> TagFormat {
        match self {
            Metadata::Id3v1(_) => TagFormat::Id3v1,
            Metadata::Id3v2(tag) => tag.tag_format(),
        }
    }

    /// Currently always [`FileType::Mp3`]: ID3 is only looked for in MPEG audio
    pub fn file_type(&self) -> FileType {
        FileType::Mp3
    }

    pub fn title(&self) -> &str {
        match self {
            Metadata::Id3v1(tag) => &tag.title,
            Metadata::Id3v2(tag) => tag.title(),
        }
    }

    pub fn artist(&self) -> &str {
        match self {
            Metadata::Id3v1(tag) => &tag.artist,
            Metadata::Id3v2(tag) => tag.artist(),
        }
    }

    pub fn album(&self) -> &str {
        match self {
            Metadata::Id3v1(tag) => &tag.album,
            Metadata::Id3v2(tag) => tag.album(),
        }
    }

    /// Always empty for ID3v1, which has no such field
    pub fn album_artist(&self) -> &str {
        match self {
            Metadata::Id3v1(_) => "",
            Metadata::Id3v2(tag) => tag.album_artist(),
        }
    }

    pub fn composer(&self) -> &str {
        match self {
            Metadata::Id3v1(_) => "",
            Metadata::Id3v2(tag) => tag.composer(),
        }
    }

    /// Release year, 0 when absent or unparsable
    pub fn year(&self) -> i32 {
        match self {
            Metadata::Id3v1(tag) => tag.year(),
            Metadata::Id3v2(tag) => tag.year(),
        }
    }

    /// Raw track text, e.g. `3/12`
    pub fn track(&self) -> &str {
        match self {
            Metadata::Id3v1(_) => "",
            Metadata::Id3v2(tag) => tag.track(),
        }
    }

    pub fn track_number(&self) -> Option<u32> {
        match self {
            Metadata::Id3v1(_) => None,
            Metadata::Id3v2(tag) => tag.track_number(),
        }
    }

    /// Genre name with numeric references expanded
    pub fn genre(&self) -> String {
        match self {
            Metadata::Id3v1(tag) => tag.genre.clone(),
            Metadata::Id3v2(tag) => tag.genre(),
        }
    }

    pub fn comment(&self) -> &str {
        match self {
            Metadata::Id3v1(tag) => &tag.comment,
            Metadata::Id3v2(tag) => tag.comment(),
        }
    }

    pub fn lyrics(&self) -> &str {
        match self {
            Metadata::Id3v1(_) => "",
            Metadata::Id3v2(tag) => tag.lyrics(),
        }
    }

    /// Front cover, always `None` for ID3v1
    pub fn album_art(&self) -> Option<&Picture> {
        match self {
            Metadata::Id3v1(_) => None,
            Metadata::Id3v2(tag) => tag.album_art(),
        }
    }

    /// Snapshot of every canonical field
    ///
    /// Cover bytes are only included (base64) when `include_cover_data` is set.
    pub fn summary(&self, include_cover_data: bool) -> Summary {
        let cover = self.album_art().map(|picture| CoverSummary {
            mime_type: picture.mime_type.clone(),
            picture_type: picture.picture_type,
            description: picture.description.clone(),
            size: picture.data.len(),
            data: include_cover_data
                .then(|| base64::engine::general_purpose::STANDARD.encode(&picture.data)),
        });

        Summary {
            tag_format: self.tag_format(),
            file_type: self.file_type(),
            title: self.title().to_string(),
            artist: self.artist().to_string(),
            album: self.album().to_string(),
            album_artist: self.album_artist().to_string(),
            composer: self.composer().to_string(),
            year: self.year(),
            track: self.track().to_string(),
            genre: self.genre(),
            comment: self.comment().to_string(),
            cover,
        }
    }
}

/// Serialisable view of a [`Metadata`] value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub tag_format: TagFormat,
    pub file_type: FileType,
    pub title: String,
    pub artist: String,
    pub album: String,
    pub album_artist: String,
    pub composer: String,
    pub year: i32,
    pub track: String,
    pub genre: String,
    pub comment: String,
    pub cover: Option<CoverSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoverSummary {
    pub mime_type: String,
    pub picture_type: u8,
    pub description: String,
    pub size: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}
