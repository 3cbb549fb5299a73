// End-to-end reads of crafted MP3 files

use musictag::{
    read_from_path, read_from_path_with, read_track, scan_library, FrameValue, Metadata,
    ParsingMode, ReadOptions, TagError, TagFormat,
};
use std::fs;
use std::path::Path;

const MPEG_FRAME: [u8; 4] = [0xFF, 0xFB, 0x90, 0x64];

fn synchsafe(value: u32) -> [u8; 4] {
    [
        ((value >> 21) & 0x7F) as u8,
        ((value >> 14) & 0x7F) as u8,
        ((value >> 7) & 0x7F) as u8,
        (value & 0x7F) as u8,
    ]
}

fn v3_frame(id: &str, body: &[u8]) -> Vec<u8> {
    let mut data = id.as_bytes().to_vec();
    data.extend((body.len() as u32).to_be_bytes());
    data.extend([0, 0]);
    data.extend(body);
    data
}

fn v4_frame(id: &str, body: &[u8]) -> Vec<u8> {
    let mut data = id.as_bytes().to_vec();
    data.extend(synchsafe(body.len() as u32));
    data.extend([0, 0]);
    data.extend(body);
    data
}

fn text(value: &str) -> Vec<u8> {
    let mut body = vec![3];
    body.extend(value.as_bytes());
    body
}

fn id3v2(major: u8, frames: &[Vec<u8>]) -> Vec<u8> {
    let mut body: Vec<u8> = frames.concat();
    body.extend([0; 64]);

    let mut data = vec![b'I', b'D', b'3', major, 0, 0];
    data.extend(synchsafe(body.len() as u32));
    data.extend(body);
    data.extend(MPEG_FRAME.repeat(8));
    data
}

fn id3v1(title: &str, artist: &str, genre: u8) -> Vec<u8> {
    let mut data = MPEG_FRAME.repeat(8);
    let mut tag = b"TAG".to_vec();
    for (value, len) in [(title, 30), (artist, 30), ("Album", 30), ("2003", 4), ("", 30)] {
        let mut field = value.as_bytes().to_vec();
        field.resize(len, 0);
        tag.extend(field);
    }
    tag.push(genre);
    data.extend(tag);
    data
}

fn write(dir: &Path, name: &str, data: &[u8]) -> std::path::PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, data).unwrap();
    path
}

#[test]
fn reads_id3v24_file() {
    let dir = tempfile::tempdir().unwrap();
    let frames = vec![
        v4_frame("TIT2", &text("Ünïcödé")),
        v4_frame("TPE1", &text("Artist")),
        v4_frame("TDRC", &text("2019-04-05")),
        v4_frame("TCON", &text("(17)Indie")),
        v4_frame("APIC", b"\x00image/png\x00\x03\x00\x89PNG"),
    ];
    let path = write(dir.path(), "song.mp3", &id3v2(4, &frames));

    let metadata = read_from_path(&path).unwrap();
    assert_eq!(metadata.tag_format(), TagFormat::Id3v2_4);
    assert_eq!(metadata.title(), "Ünïcödé");
    assert_eq!(metadata.year(), 2019);
    assert_eq!(metadata.genre(), "Rock Indie");

    let cover = metadata.album_art().unwrap();
    assert_eq!(cover.extension(), "png");

    let summary = serde_json::to_value(metadata.summary(true)).unwrap();
    assert_eq!(summary["tag_format"], "ID3v2.4");
    assert_eq!(summary["cover"]["data"], "iVBORw==");
}

#[test]
fn reads_id3v1_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "old.mp3", &id3v1("Test Song", "Someone", 0));

    let metadata = read_from_path(&path).unwrap();
    assert!(matches!(metadata, Metadata::Id3v1(_)));
    assert_eq!(metadata.title(), "Test Song");
    assert_eq!(metadata.genre(), "Blues");
    assert_eq!(metadata.year(), 2003);
    assert!(metadata.album_art().is_none());
}

#[test]
fn untagged_file_has_no_tag() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "bare.mp3", &MPEG_FRAME.repeat(64));

    assert!(matches!(read_from_path(&path), Err(TagError::NoTagFound)));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        read_from_path(dir.path().join("missing.mp3")),
        Err(TagError::Io(_))
    ));
}

#[test]
fn relaxed_mode_keeps_the_rest_of_the_tag() {
    let dir = tempfile::tempdir().unwrap();
    let frames = vec![
        v3_frame("TIT2", &text("Title")),
        v3_frame("APIC", b"\x00image/png"),
        v3_frame("TALB", &text("Album")),
    ];
    let path = write(dir.path(), "broken.mp3", &id3v2(3, &frames));

    assert!(matches!(
        read_from_path(&path),
        Err(TagError::MalformedFrame { .. })
    ));

    let options = ReadOptions::new().parsing_mode(ParsingMode::Relaxed);
    let metadata = read_from_path_with(&path, options).unwrap();
    assert_eq!(metadata.title(), "Title");
    assert_eq!(metadata.album(), "Album");
    assert!(metadata.album_art().is_none());
}

#[test]
fn duplicate_comments_stay_separate() {
    let dir = tempfile::tempdir().unwrap();
    let frames = vec![
        v3_frame("COMM", b"\x00eng\x00first"),
        v3_frame("COMM", b"\x00eng\x00second"),
    ];
    let path = write(dir.path(), "comments.mp3", &id3v2(3, &frames));

    let metadata = read_from_path(&path).unwrap();
    assert_eq!(metadata.comment(), "first");

    let Metadata::Id3v2(tag) = metadata else {
        panic!("expected an ID3v2 tag");
    };
    match tag.frames().get("COMM_0") {
        Some(FrameValue::Comment(comment)) => assert_eq!(comment.text, "second"),
        other => panic!("unexpected frame {:?}", other),
    }
}

#[test]
fn read_track_falls_back_on_decode_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "Mystery Track.mp3", &MPEG_FRAME.repeat(64));

    let track = read_track(&path).unwrap();
    assert_eq!(track.title, "Mystery Track.mp3");
    assert_eq!(track.artist, "Unknown");
    assert_eq!(track.year, 0);

    assert!(read_track(&dir.path().join("absent.mp3")).is_err());
}

#[test]
fn scans_library_recursively() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "b/two.mp3", &id3v1("Two", "Alice & Bob", 17));
    write(
        dir.path(),
        "a/one.mp3",
        &id3v2(3, &[v3_frame("TIT2", &text("One")), v3_frame("TPE2", &text("Various"))]),
    );
    write(dir.path(), "a/deep/three.mp3", &MPEG_FRAME.repeat(64));
    write(dir.path(), "a/notes.txt", b"not music");

    let tracks = scan_library(dir.path(), None).unwrap();
    let titles: Vec<_> = tracks.iter().map(|track| track.title.as_str()).collect();
    assert_eq!(titles, ["three.mp3", "One", "Two"]);

    assert_eq!(tracks[1].album_artist, "Various");
    assert_eq!(tracks[1].artist, "Unknown");
    assert_eq!(tracks[2].artists(), ["Alice", "Bob"]);
    assert_eq!(tracks[2].genre, "Rock");

    let tracks = scan_library(dir.path(), Some("*.txt")).unwrap();
    assert_eq!(tracks.len(), 1);
    assert_eq!(tracks[0].title, "notes.txt");
}

#[test]
fn scans_library_with_glob_characters_in_its_path() {
    let dir = tempfile::tempdir().unwrap();
    let library = dir.path().join("Music [2020]");
    write(&library, "a/one.mp3", &id3v1("One", "Someone", 0));
    write(&library, "b [live]/two.mp3", &id3v1("Two", "Someone", 0));

    let tracks = scan_library(&library, None).unwrap();
    let titles: Vec<_> = tracks.iter().map(|track| track.title.as_str()).collect();
    assert_eq!(titles, ["One", "Two"]);
}
