// ID3v2 frame headers and the frame loop

use super::content::{decode_frame, FrameKind, FrameValue};
use super::frame_ids::is_valid_frame_id;
use super::header::{Id3v2Header, Id3v2Version};
use crate::error::{Result, TagError};
use crate::options::{ParsingMode, ReadOptions};
use crate::utils::io::{get_bit, read_bytes, read_string, read_synchsafe, read_uint, take_prefix};

use std::borrow::Cow;
use std::collections::HashMap;
use std::io::Read;

/// Flags of an ID3v2.3/2.4 frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct FrameFlags {
    // Status messages
    pub tag_alter_preservation: bool,
    pub file_alter_preservation: bool,
    pub read_only: bool,

    // Format description
    pub compression: bool,
    pub encryption: bool,
    pub group_identity: bool,
    /// ID3v2.4 only
    pub unsynchronisation: bool,
    /// ID3v2.4 only
    pub data_length_indicator: bool,
}

impl FrameFlags {
    pub fn parse_id3v23(status: u8, format: u8) -> Self {
        FrameFlags {
            tag_alter_preservation: get_bit(status, 7),
            file_alter_preservation: get_bit(status, 6),
            read_only: get_bit(status, 5),
            compression: get_bit(format, 7),
            encryption: get_bit(format, 6),
            group_identity: get_bit(format, 5),
            unsynchronisation: false,
            data_length_indicator: false,
        }
    }

    pub fn parse_id3v24(status: u8, format: u8) -> Self {
        FrameFlags {
            tag_alter_preservation: get_bit(status, 6),
            file_alter_preservation: get_bit(status, 5),
            read_only: get_bit(status, 4),
            group_identity: get_bit(format, 6),
            compression: get_bit(format, 3),
            encryption: get_bit(format, 2),
            unsynchronisation: get_bit(format, 1),
            data_length_indicator: get_bit(format, 0),
        }
    }
}

/// A frame header as it appears in the stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameHeader {
    pub id: String,
    /// Size of the frame body, excluding this header
    pub size: u32,
    /// `None` for ID3v2.2, which has no frame flags
    pub flags: Option<FrameFlags>,
}

impl FrameHeader {
    /// Size of a frame header for the given version
    pub fn len(version: Id3v2Version) -> u32 {
        match version {
            Id3v2Version::V2 => 6,
            Id3v2Version::V3 | Id3v2Version::V4 => 10,
        }
    }

    pub fn read<R: Read>(reader: &mut R, version: Id3v2Version) -> Result<Self> {
        match version {
            Id3v2Version::V2 => {
                let id = read_string(reader, 3)?;
                let size = read_uint(reader, 3)?;
                Ok(FrameHeader {
                    id,
                    size,
                    flags: None,
                })
            }
            Id3v2Version::V3 => {
                let id = read_string(reader, 4)?;
                let size = read_uint(reader, 4)?;
                let flags = read_bytes(reader, 2)?;
                Ok(FrameHeader {
                    id,
                    size,
                    flags: Some(FrameFlags::parse_id3v23(flags[0], flags[1])),
                })
            }
            Id3v2Version::V4 => {
                let id = read_string(reader, 4)?;
                let size = read_synchsafe(reader)?;
                let flags = read_bytes(reader, 2)?;
                Ok(FrameHeader {
                    id,
                    size,
                    flags: Some(FrameFlags::parse_id3v24(flags[0], flags[1])),
                })
            }
        }
    }
}

/// Decoded frames keyed by identifier
///
/// The first occurrence of an identifier is stored under the bare identifier,
/// later ones under `<id>_0`, `<id>_1`, and so on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameMap {
    frames: HashMap<String, FrameValue>,
}

impl FrameMap {
    pub fn get(&self, key: &str) -> Option<&FrameValue> {
        self.frames.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.frames.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Iterate over `(key, value)` pairs in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FrameValue)> {
        self.frames.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Insert a frame, returning the key it was stored under
    pub(crate) fn insert(&mut self, id: &str, value: FrameValue) -> String {
        let mut key = id.to_string();
        let mut ordinal = 0;
        while self.frames.contains_key(&key) {
            key = format!("{}_{}", id, ordinal);
            ordinal += 1;
        }

        self.frames.insert(key.clone(), value);
        key
    }
}

/// Read frames until the end of the tag
///
/// `offset` is the number of tag bytes already consumed by the header. The
/// loop stops without error on a zero-sized frame (the start of padding), when
/// too few bytes remain for a frame header, or when an unknown frame would run
/// past the end of the tag.
pub(crate) fn read_frames<R: Read>(
    reader: &mut R,
    header: &Id3v2Header,
    offset: u32,
    options: ReadOptions,
) -> Result<FrameMap> {
    let version = header.version;
    let end = header.tag_end();
    let header_len = u64::from(FrameHeader::len(version));

    let mut offset = u64::from(offset);
    let mut frames = FrameMap::default();

    while offset < end {
        if end - offset < header_len {
            tracing::debug!(offset, "No room left for a frame header, assuming padding");
            break;
        }

        let frame = FrameHeader::read(reader, version)?;
        if frame.size == 0 {
            tracing::debug!(offset, "Found a zero-sized frame, assuming padding");
            break;
        }

        offset += header_len + u64::from(frame.size);

        // Avoid corrupted padding
        if !is_valid_frame_id(version, &frame.id) && offset > end {
            tracing::warn!(id = %frame.id, offset, "Unknown frame runs past the end of the tag");
            break;
        }

        // The whole body is always consumed so the stream stays aligned with `offset`
        let payload = read_bytes(reader, frame.size as usize)?;
        tracing::trace!(id = %frame.id, size = frame.size, "Read frame");

        let decoded = frame_content(&frame, &payload, version)
            .and_then(|content| decode_frame(&frame.id, &content, options));

        match decoded {
            Ok(Some(value)) => {
                let key = frames.insert(&frame.id, value);
                tracing::trace!(key = %key, "Stored frame");
            }
            Ok(None) => {}
            Err(e) if e.is_frame_error() && skippable(&frame.id, options) => {
                tracing::warn!(id = %frame.id, error = %e, "Skipping frame");
            }
            Err(e) => return Err(e),
        }
    }

    Ok(frames)
}

/// Whether a per-frame decode error may be skipped for this frame
fn skippable(id: &str, options: ReadOptions) -> bool {
    FrameKind::of(id) == FrameKind::Other || options.parsing_mode == ParsingMode::Relaxed
}

/// Strip the additional header data announced by the frame flags
///
/// Compressed payloads are returned as stored; decompression is not supported.
fn frame_content<'a>(
    frame: &FrameHeader,
    payload: &'a [u8],
    version: Id3v2Version,
) -> Result<Cow<'a, [u8]>> {
    let Some(flags) = frame.flags else {
        return Ok(Cow::Borrowed(payload));
    };

    if flags.compression {
        match version {
            // The decompressed size is skipped below
            Id3v2Version::V3 => {}
            Id3v2Version::V4 => {
                if !flags.data_length_indicator {
                    return Err(TagError::MissingDataLengthIndicator);
                }
            }
            Id3v2Version::V2 => return Err(TagError::UnsupportedCompression(version.into())),
        }
    }

    if flags.data_length_indicator && version != Id3v2Version::V4 {
        return Err(TagError::InvalidDataLengthIndicator(version.into()));
    }

    let short = || TagError::malformed_frame(&frame.id, "frame shorter than its flag data");
    let mut content = payload;
    let mut data_length = None;

    match version {
        Id3v2Version::V2 => {}
        Id3v2Version::V3 => {
            if flags.compression {
                take_prefix(&mut content, 4).ok_or_else(short)?;
            }
            if flags.encryption {
                take_prefix(&mut content, 1).ok_or_else(short)?;
            }
            if flags.group_identity {
                take_prefix(&mut content, 1).ok_or_else(short)?;
            }
        }
        Id3v2Version::V4 => {
            if flags.group_identity {
                take_prefix(&mut content, 1).ok_or_else(short)?;
            }
            if flags.encryption {
                take_prefix(&mut content, 1).ok_or_else(short)?;
            }
            if flags.data_length_indicator {
                data_length = Some(read_synchsafe(&mut content).map_err(|_| short())?);
            }
        }
    }

    let mut content = if version == Id3v2Version::V4 && flags.unsynchronisation {
        Cow::Owned(resynchronise(content))
    } else {
        Cow::Borrowed(content)
    };

    if let Some(len) = data_length {
        let len = len as usize;
        if len < content.len() {
            content.to_mut().truncate(len);
        }
    }

    Ok(content)
}

/// Undo unsynchronisation by dropping the `00` inserted after every `FF`
pub(crate) fn resynchronise(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len());
    let mut previous = 0u8;
    for &byte in data {
        if !(previous == 0xFF && byte == 0x00) {
            out.push(byte);
        }
        previous = byte;
    }
    out
}
