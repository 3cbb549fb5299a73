// Options controlling how tags are decoded

/// How to react to a recognised frame whose body cannot be decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParsingMode {
    /// Fail the whole decode call
    #[default]
    Strict,
    /// Log the frame, drop it, and keep reading the rest of the tag
    ///
    /// Structural errors (header corruption, truncated streams, disallowed flag
    /// combinations) still abort in this mode.
    Relaxed,
}

/// Options for [`read_from_with`](crate::read_from_with)
///
/// The defaults are:
///
/// ```rust,ignore
/// ReadOptions {
///     parsing_mode: ParsingMode::Strict,
///     max_tag_size: None,
///     read_cover_art: true,
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadOptions {
    pub(crate) parsing_mode: ParsingMode,
    pub(crate) max_tag_size: Option<u32>,
    pub(crate) read_cover_art: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl ReadOptions {
    pub const fn new() -> Self {
        Self {
            parsing_mode: ParsingMode::Strict,
            max_tag_size: None,
            read_cover_art: true,
        }
    }

    /// The parsing mode to use, see [`ParsingMode`]
    pub fn parsing_mode(mut self, parsing_mode: ParsingMode) -> Self {
        self.parsing_mode = parsing_mode;
        self
    }

    /// Reject ID3v2 tags whose declared size is larger than `limit`
    ///
    /// The declared size is otherwise trusted as the frame loop bound.
    pub fn max_tag_size(mut self, limit: u32) -> Self {
        self.max_tag_size = Some(limit);
        self
    }

    /// Whether picture frames are decoded at all
    pub fn read_cover_art(mut self, read_cover_art: bool) -> Self {
        self.read_cover_art = read_cover_art;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let options = ReadOptions::new()
            .parsing_mode(ParsingMode::Relaxed)
            .max_tag_size(1024)
            .read_cover_art(false);

        assert_eq!(options.parsing_mode, ParsingMode::Relaxed);
        assert_eq!(options.max_tag_size, Some(1024));
        assert!(!options.read_cover_art);
        assert_eq!(ReadOptions::default(), ReadOptions::new());
    }
}
