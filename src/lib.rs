//! musictag - ID3 tag decoding for MP3 files
//!
//! [`read_from`] sniffs a seekable stream for an ID3v2 header and decodes
//! either the ID3v2 tag at the start or the ID3v1 trailer at the end.
//!
//! ```no_run
//! let metadata = musictag::read_from_path("song.mp3")?;
//! println!("{} - {}", metadata.artist(), metadata.title());
//! # Ok::<(), musictag::TagError>(())
//! ```

pub mod catalog;
pub mod error;
pub mod field_mapping;
pub mod id3;
pub mod metadata;
pub mod options;
mod utils;

pub use catalog::{read_track, scan_library, TrackDetails};
pub use error::{Result, TagError};
pub use field_mapping::StandardField;
pub use id3::v2::{Comment, FrameMap, FrameValue, Id3v2Version};
pub use id3::{Id3v1Tag, Id3v2Tag};
pub use metadata::{CoverSummary, FileType, Metadata, Picture, Summary, TagFormat};
pub use options::{ParsingMode, ReadOptions};

use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

/// Read the tag of a stream with default options
pub fn read_from<R: Read + Seek>(reader: &mut R) -> Result<Metadata> {
    read_from_with(reader, ReadOptions::default())
}

/// Read the tag of a stream
///
/// Streams starting with `ID3` are decoded as ID3v2, everything else as
/// ID3v1. A stream with neither fails with [`TagError::NoTagFound`].
pub fn read_from_with<R: Read + Seek>(reader: &mut R, options: ReadOptions) -> Result<Metadata> {
    let start = reader.stream_position()?;

    let mut signature = [0u8; 10];
    reader.read_exact(&mut signature)?;
    reader.seek(SeekFrom::Start(start))?;

    if &signature[0..3] == b"ID3" {
        tracing::debug!("Found an ID3v2 signature");
        let tag = Id3v2Tag::read_with(reader, options)?;
        return Ok(Metadata::Id3v2(tag));
    }

    tracing::debug!("No ID3v2 signature, checking for an ID3v1 trailer");
    match Id3v1Tag::read(reader) {
        Ok(tag) => Ok(Metadata::Id3v1(tag)),
        Err(TagError::NotId3v1) => Err(TagError::NoTagFound),
        Err(e) => Err(e),
    }
}

/// Open a file and read its tag with default options
pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Metadata> {
    read_from_path_with(path, ReadOptions::default())
}

pub fn read_from_path_with<P: AsRef<Path>>(path: P, options: ReadOptions) -> Result<Metadata> {
    let file = File::open(path.as_ref())?;
    let mut reader = BufReader::new(file);
    read_from_with(&mut reader, options)
}
