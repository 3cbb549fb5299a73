// Catalog extraction for music libraries
//
// Turns decoded tags into flat catalog entries. Files whose tag cannot be
// decoded still get an entry, built from the file name.

use crate::error::{Result, TagError};
use crate::metadata::Metadata;

use glob::{glob, Pattern};
use serde::Serialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Default file pattern for [`scan_library`]
pub const DEFAULT_PATTERN: &str = "*.mp3";

const UNKNOWN: &str = "Unknown";

/// One catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackDetails {
    pub path: PathBuf,
    pub title: String,
    pub artist: String,
    pub album: String,
    pub album_artist: String,
    pub year: i32,
    pub genre: String,
}

impl TrackDetails {
    /// Build an entry from decoded metadata, filling empty fields with defaults
    pub fn from_metadata(metadata: &Metadata, path: &Path) -> Self {
        let title = match metadata.title() {
            "" => file_title(path),
            title => title.to_string(),
        };

        TrackDetails {
            path: path.to_path_buf(),
            title,
            artist: or_unknown(metadata.artist()),
            album: or_unknown(metadata.album()),
            album_artist: or_unknown(metadata.album_artist()),
            year: metadata.year(),
            genre: or_unknown(&metadata.genre()),
        }
    }

    /// Entry for a file whose tag could not be decoded
    pub fn fallback(path: &Path) -> Self {
        TrackDetails {
            path: path.to_path_buf(),
            title: file_title(path),
            artist: UNKNOWN.to_string(),
            album: UNKNOWN.to_string(),
            album_artist: UNKNOWN.to_string(),
            year: 0,
            genre: UNKNOWN.to_string(),
        }
    }

    /// Individual artists of a combined artist field such as `A & B, C`
    pub fn artists(&self) -> Vec<&str> {
        self.artist
            .split(&['/', '&', ','][..])
            .map(str::trim)
            .filter(|artist| !artist.is_empty())
            .collect()
    }
}

fn or_unknown(value: &str) -> String {
    if value.is_empty() {
        UNKNOWN.to_string()
    } else {
        value.to_string()
    }
}

/// Base file name, including the extension
fn file_title(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Read the catalog entry of one file
///
/// Decode failures give [`TrackDetails::fallback`]. I/O errors other than
/// hitting the end of the file are returned, including failing to open it.
pub fn read_track(path: &Path) -> Result<TrackDetails> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);

    match crate::read_from(&mut reader) {
        Ok(metadata) => Ok(TrackDetails::from_metadata(&metadata, path)),
        Err(e @ TagError::Io(_)) => Err(e),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Falling back to file name");
            Ok(TrackDetails::fallback(path))
        }
    }
}

/// Recursively read every file under `dir` matching `pattern`
///
/// `dir` is taken literally; only `pattern` is a glob. Entries are returned in
/// path order. Files that cannot be opened and unreadable directory entries
/// are logged and skipped.
pub fn scan_library(dir: &Path, pattern: Option<&str>) -> Result<Vec<TrackDetails>> {
    let pattern = pattern.unwrap_or(DEFAULT_PATTERN);
    let glob_pattern = format!("{}/**/{}", Pattern::escape(&dir.to_string_lossy()), pattern);
    tracing::debug!(pattern = %glob_pattern, "Scanning library");

    let entries = glob(&glob_pattern).map_err(|e| {
        TagError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("invalid glob pattern: {}", e),
        ))
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) if path.is_file() => paths.push(path),
            Ok(_) => {}
            Err(e) => tracing::warn!(error = %e, "Skipping unreadable entry"),
        }
    }
    paths.sort();

    let mut tracks = Vec::with_capacity(paths.len());
    for path in paths {
        match read_track(&path) {
            Ok(track) => tracks.push(track),
            Err(e) => tracing::warn!(path = %path.display(), error = %e, "Skipping file"),
        }
    }

    Ok(tracks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id3::Id3v1Tag;

    fn id3v1(title: &str, artist: &str) -> Metadata {
        Metadata::Id3v1(Id3v1Tag {
            title: title.to_string(),
            artist: artist.to_string(),
            album: String::new(),
            year: "2001".to_string(),
            comment: String::new(),
            genre: "Rock".to_string(),
        })
    }

    #[test]
    fn test_from_metadata_defaults() {
        let track = TrackDetails::from_metadata(&id3v1("", "Band"), Path::new("music/song.mp3"));

        assert_eq!(track.title, "song.mp3");
        assert_eq!(track.artist, "Band");
        assert_eq!(track.album, "Unknown");
        assert_eq!(track.album_artist, "Unknown");
        assert_eq!(track.year, 2001);
        assert_eq!(track.genre, "Rock");
    }

    #[test]
    fn test_fallback() {
        let track = TrackDetails::fallback(Path::new("/library/a/b/track 01.mp3"));

        assert_eq!(track.title, "track 01.mp3");
        assert_eq!(track.artist, "Unknown");
        assert_eq!(track.genre, "Unknown");
        assert_eq!(track.year, 0);
    }

    #[test]
    fn test_artists() {
        let track = TrackDetails::from_metadata(
            &id3v1("x", "Alice / Bob & Carol, Dave,"),
            Path::new("x.mp3"),
        );
        assert_eq!(track.artists(), vec!["Alice", "Bob", "Carol", "Dave"]);

        let track = TrackDetails::fallback(Path::new("x.mp3"));
        assert_eq!(track.artists(), vec!["Unknown"]);
    }

    #[test]
    fn test_serialisation() {
        let track = TrackDetails::fallback(Path::new("x.mp3"));
        let json = serde_json::to_value(&track).unwrap();
        assert_eq!(json["title"], "x.mp3");
        assert_eq!(json["year"], 0);
    }
}
