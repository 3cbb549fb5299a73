// ID3v2 frame bodies

use crate::error::{Result, TagError};
use crate::metadata::Picture;
use crate::options::ReadOptions;
use crate::utils::encoding::{decode_text, split_terminated, TextEncoding};

/// A decoded frame, as stored in the raw frame mapping
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameValue {
    /// Any `T***` frame
    Text(String),
    /// `COMM`/`COM` and `USLT`/`ULT`
    Comment(Comment),
    /// `APIC`/`PIC`, front covers only
    Picture(Picture),
}

impl FrameValue {
    /// The text carried by the frame, if it carries any
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FrameValue::Text(text) => Some(text),
            FrameValue::Comment(comment) => Some(&comment.text),
            FrameValue::Picture(_) => None,
        }
    }
}

/// Body of a comment or unsynchronised lyrics frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Comment {
    /// ISO-639-2 language code as written
    pub language: String,
    pub description: String,
    pub text: String,
}

/// How a frame body is decoded, derived from the frame identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    Text,
    Comment,
    Picture,
    Other,
}

impl FrameKind {
    pub fn of(id: &str) -> Self {
        if id.starts_with('T') {
            return FrameKind::Text;
        }
        match id {
            "COMM" | "COM" | "USLT" | "ULT" => FrameKind::Comment,
            "APIC" | "PIC" => FrameKind::Picture,
            _ => FrameKind::Other,
        }
    }
}

/// Decode a frame body according to its kind
///
/// Returns `None` for frames that are consumed but not kept: unknown frames,
/// pictures other than the front cover, and any picture when cover art
/// reading is disabled.
pub fn decode_frame(id: &str, content: &[u8], options: ReadOptions) -> Result<Option<FrameValue>> {
    match FrameKind::of(id) {
        FrameKind::Text => Ok(Some(FrameValue::Text(decode_text_frame(content)?))),
        FrameKind::Comment => Ok(Some(FrameValue::Comment(decode_comment_frame(id, content)?))),
        FrameKind::Picture if !options.read_cover_art => Ok(None),
        FrameKind::Picture => {
            let picture = if id == "PIC" {
                decode_pic_frame(id, content)?
            } else {
                decode_apic_frame(id, content)?
            };

            if picture.is_cover_front() {
                Ok(Some(FrameValue::Picture(picture)))
            } else {
                tracing::trace!(id, picture_type = picture.picture_type, "Discarding picture");
                Ok(None)
            }
        }
        FrameKind::Other => Ok(None),
    }
}

/// Decode text frame data
pub fn decode_text_frame(data: &[u8]) -> Result<String> {
    let Some((&encoding, text)) = data.split_first() else {
        return Ok(String::new());
    };

    let encoding = TextEncoding::from_byte(encoding)?;
    Ok(decode_text(text, encoding))
}

/// Decode `{encoding, language, description, text}`
pub fn decode_comment_frame(id: &str, data: &[u8]) -> Result<Comment> {
    if data.len() < 4 {
        return Err(TagError::malformed_frame(id, "missing encoding or language"));
    }

    let encoding = TextEncoding::from_byte(data[0])?;
    let language = String::from_utf8_lossy(&data[1..4]).into_owned();
    let (description, text) = split_terminated(&data[4..], encoding);

    Ok(Comment {
        language,
        description: decode_text(description, encoding),
        text: text
            .map(|text| decode_text(text, encoding))
            .unwrap_or_default(),
    })
}

/// Decode an ID3v2.3/2.4 attached picture
pub fn decode_apic_frame(id: &str, data: &[u8]) -> Result<Picture> {
    let Some((&encoding, rest)) = data.split_first() else {
        return Err(TagError::malformed_frame(id, "empty picture frame"));
    };
    let encoding = TextEncoding::from_byte(encoding)?;

    let (mime_type, rest) = split_terminated(rest, TextEncoding::Iso8859_1);
    let rest = rest.ok_or_else(|| TagError::malformed_frame(id, "missing MIME type terminator"))?;

    let Some((&picture_type, rest)) = rest.split_first() else {
        return Err(TagError::malformed_frame(id, "missing picture type"));
    };

    let (description, picture_data) = split_terminated(rest, encoding);
    let picture_data = picture_data
        .ok_or_else(|| TagError::malformed_frame(id, "missing description terminator"))?;

    Ok(Picture {
        mime_type: decode_text(mime_type, TextEncoding::Iso8859_1),
        picture_type,
        description: decode_text(description, encoding),
        data: picture_data.to_vec(),
    })
}

/// Decode an ID3v2.2 picture, which names a 3-byte image format instead of a MIME type
pub fn decode_pic_frame(id: &str, data: &[u8]) -> Result<Picture> {
    if data.len() < 5 {
        return Err(TagError::malformed_frame(id, "missing image format or picture type"));
    }

    let encoding = TextEncoding::from_byte(data[0])?;
    let format = String::from_utf8_lossy(&data[1..4]).to_ascii_lowercase();
    let picture_type = data[4];

    let (description, picture_data) = split_terminated(&data[5..], encoding);
    let picture_data = picture_data
        .ok_or_else(|| TagError::malformed_frame(id, "missing description terminator"))?;

    let mime_type = match format.as_str() {
        "jpg" | "jpeg" => "image/jpeg".to_string(),
        "png" => "image/png".to_string(),
        other => format!("image/{}", other.trim_end_matches('\0')),
    };

    Ok(Picture {
        mime_type,
        picture_type,
        description: decode_text(description, encoding),
        data: picture_data.to_vec(),
    })
}
