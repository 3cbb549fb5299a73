// Canonical field mapping
//
// Maps the version-independent field names (title, artist, ...) to the frame
// identifiers each ID3v2 sub-version uses for them:
// - ID3v2.2: three-character ids (TT2, TP1, TAL, ...)
// - ID3v2.3: four-character ids (TIT2, TPE1, TALB, ...)
// - ID3v2.4: as ID3v2.3, except the year lives in TDRC instead of TYER

use crate::id3::v2::Id3v2Version;

use chrono::{Datelike, NaiveDate};

/// Standard metadata fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardField {
    Title,
    Artist,
    Album,
    AlbumArtist,
    Composer,
    Year,
    Track,
    Genre,
    Picture,
    Comment,
    Lyrics,
}

impl StandardField {
    pub const ALL: [StandardField; 11] = [
        StandardField::Title,
        StandardField::Artist,
        StandardField::Album,
        StandardField::AlbumArtist,
        StandardField::Composer,
        StandardField::Year,
        StandardField::Track,
        StandardField::Genre,
        StandardField::Picture,
        StandardField::Comment,
        StandardField::Lyrics,
    ];

    /// Get standard field name (lowercase)
    pub fn as_str(&self) -> &'static str {
        match self {
            StandardField::Title => "title",
            StandardField::Artist => "artist",
            StandardField::Album => "album",
            StandardField::AlbumArtist => "album_artist",
            StandardField::Composer => "composer",
            StandardField::Year => "year",
            StandardField::Track => "track",
            StandardField::Genre => "genre",
            StandardField::Picture => "picture",
            StandardField::Comment => "comment",
            StandardField::Lyrics => "lyrics",
        }
    }

    /// Parse from string, ignoring case
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.to_lowercase();
        Self::ALL.into_iter().find(|field| field.as_str() == s)
    }
}

/// Version-specific frame identifiers
pub struct FieldMappings;

impl FieldMappings {
    /// Get the frame identifier holding `field` in a tag of the given version
    pub fn frame_id(field: StandardField, version: Id3v2Version) -> &'static str {
        match version {
            Id3v2Version::V2 => match field {
                StandardField::Title => "TT2",
                StandardField::Artist => "TP1",
                StandardField::Album => "TAL",
                StandardField::AlbumArtist => "TP2",
                StandardField::Composer => "TCM",
                StandardField::Year => "TYE",
                StandardField::Track => "TRK",
                StandardField::Genre => "TCO",
                StandardField::Picture => "PIC",
                StandardField::Comment => "COM",
                StandardField::Lyrics => "ULT",
            },
            Id3v2Version::V3 | Id3v2Version::V4 => match field {
                StandardField::Title => "TIT2",
                StandardField::Artist => "TPE1",
                StandardField::Album => "TALB",
                StandardField::AlbumArtist => "TPE2",
                StandardField::Composer => "TCOM",
                StandardField::Year if version == Id3v2Version::V4 => "TDRC",
                StandardField::Year => "TYER",
                StandardField::Track => "TRCK",
                StandardField::Genre => "TCON",
                StandardField::Picture => "APIC",
                StandardField::Comment => "COMM",
                StandardField::Lyrics => "USLT",
            },
        }
    }

    /// Reverse lookup of [`FieldMappings::frame_id`]
    ///
    /// Suffixed keys of repeated frames (`COMM_0`) do not map to a field.
    pub fn field_for_frame(frame_id: &str, version: Id3v2Version) -> Option<StandardField> {
        StandardField::ALL
            .into_iter()
            .find(|field| Self::frame_id(*field, version) == frame_id)
    }
}

/// Conversions from the textual frame values to typed values
pub struct ValueConverter;

impl ValueConverter {
    /// Leading number of a track field (e.g., "1/10" -> 1)
    pub fn normalize_track(track: &str) -> Option<u32> {
        track.split('/').next()?.trim().parse().ok()
    }

    /// Parse a year field
    ///
    /// Plain integers are taken as is, `YYYY-MM-DD` dates give their year, and
    /// anything else gives 0.
    pub fn parse_year(year: &str) -> i32 {
        let year = year.trim();
        if let Ok(value) = year.parse() {
            return value;
        }

        NaiveDate::parse_from_str(year, "%Y-%m-%d")
            .map(|date| date.year())
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_field_parsing() {
        assert_eq!(StandardField::parse("title"), Some(StandardField::Title));
        assert_eq!(StandardField::parse("TITLE"), Some(StandardField::Title));
        assert_eq!(StandardField::parse("Album_Artist"), Some(StandardField::AlbumArtist));
        assert_eq!(StandardField::parse("unknown"), None);
    }

    #[test]
    fn test_field_mapping() {
        assert_eq!(FieldMappings::frame_id(StandardField::Title, Id3v2Version::V2), "TT2");
        assert_eq!(FieldMappings::frame_id(StandardField::Title, Id3v2Version::V3), "TIT2");
        assert_eq!(FieldMappings::frame_id(StandardField::Title, Id3v2Version::V4), "TIT2");
        assert_eq!(FieldMappings::frame_id(StandardField::Picture, Id3v2Version::V2), "PIC");
        assert_eq!(FieldMappings::frame_id(StandardField::AlbumArtist, Id3v2Version::V3), "TPE2");
    }

    #[test]
    fn test_year_frame_per_version() {
        assert_eq!(FieldMappings::frame_id(StandardField::Year, Id3v2Version::V2), "TYE");
        assert_eq!(FieldMappings::frame_id(StandardField::Year, Id3v2Version::V3), "TYER");
        assert_eq!(FieldMappings::frame_id(StandardField::Year, Id3v2Version::V4), "TDRC");
    }

    #[test]
    fn test_reverse_lookup() {
        assert_eq!(
            FieldMappings::field_for_frame("TDRC", Id3v2Version::V4),
            Some(StandardField::Year)
        );
        assert_eq!(FieldMappings::field_for_frame("TDRC", Id3v2Version::V3), None);
        assert_eq!(
            FieldMappings::field_for_frame("COM", Id3v2Version::V2),
            Some(StandardField::Comment)
        );
        assert_eq!(FieldMappings::field_for_frame("COMM_0", Id3v2Version::V3), None);
    }

    #[test]
    fn test_value_normalization() {
        assert_eq!(ValueConverter::normalize_track("1/10"), Some(1));
        assert_eq!(ValueConverter::normalize_track("5"), Some(5));
        assert_eq!(ValueConverter::normalize_track(""), None);
        assert_eq!(ValueConverter::normalize_track("A1"), None);

        assert_eq!(ValueConverter::parse_year("2024"), 2024);
        assert_eq!(ValueConverter::parse_year("2024-01-15"), 2024);
        assert_eq!(ValueConverter::parse_year("2024-13-45"), 0);
        assert_eq!(ValueConverter::parse_year("soon"), 0);
        assert_eq!(ValueConverter::parse_year(""), 0);
    }
}
