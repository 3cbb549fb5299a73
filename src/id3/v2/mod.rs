// ID3v2 tag implementation

pub mod content;
pub mod frame;
mod frame_ids;
pub mod header;
mod tag;

pub use content::{Comment, FrameValue};
pub use frame::{FrameFlags, FrameHeader, FrameMap};
pub use header::{Id3v2Header, Id3v2Version};
pub use tag::Id3v2Tag;

/// Builders for crafted tags used across the ID3v2 tests
#[cfg(test)]
pub(crate) mod test_util {
    pub fn synchsafe_bytes(value: u32) -> [u8; 4] {
        [
            ((value >> 21) & 0x7F) as u8,
            ((value >> 14) & 0x7F) as u8,
            ((value >> 7) & 0x7F) as u8,
            (value & 0x7F) as u8,
        ]
    }

    /// Latin-1 text frame body
    pub fn text_body(text: &str) -> Vec<u8> {
        let mut body = vec![0];
        body.extend(text.as_bytes());
        body
    }

    /// A frame with a version-appropriate header
    pub fn frame(major: u8, id: &str, flags: [u8; 2], body: &[u8]) -> Vec<u8> {
        let size = body.len() as u32;
        let mut data = id.as_bytes().to_vec();
        match major {
            2 => data.extend(&size.to_be_bytes()[1..]),
            3 => {
                data.extend(size.to_be_bytes());
                data.extend(flags);
            }
            _ => {
                data.extend(synchsafe_bytes(size));
                data.extend(flags);
            }
        }
        data.extend(body);
        data
    }

    /// A complete tag holding `frames` followed by `padding` zero bytes
    pub fn tag(major: u8, frames: &[Vec<u8>], padding: usize) -> Vec<u8> {
        let body: Vec<u8> = frames
            .iter()
            .flatten()
            .copied()
            .chain(std::iter::repeat(0).take(padding))
            .collect();

        let mut data = vec![b'I', b'D', b'3', major, 0, 0];
        data.extend(synchsafe_bytes(body.len() as u32));
        data.extend(body);
        data
    }
}
