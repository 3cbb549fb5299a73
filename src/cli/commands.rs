// CLI command implementations
use crate::cli::config::{Commands, Config};
use crate::cli::output::OutputFormatter;

use anyhow::{bail, Context, Result};
use musictag::{FrameValue, Metadata, ReadOptions};
use serde_json::{json, Value};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Run the selected subcommand
pub fn run(config: &Config) -> Result<()> {
    let formatter = OutputFormatter::new(config.format, config.quiet);
    let options = config.read_options();

    match &config.command {
        Commands::Read { files, cover_data } => command_read(files, *cover_data, options, &formatter),
        Commands::Frames { file } => command_frames(file, options, &formatter),
        Commands::Detect { files } => command_detect(files, options, &formatter),
        Commands::ExportCover { file, output } => command_export_cover(file, output, options, &formatter),
        Commands::Scan { directory, pattern } => command_scan(directory, pattern.as_deref(), &formatter),
    }
}

fn read_metadata(path: &Path, options: ReadOptions) -> Result<Metadata> {
    musictag::read_from_path_with(path, options)
        .with_context(|| format!("Failed to read {}", path.display()))
}

/// Read canonical fields from files
fn command_read(
    files: &[PathBuf],
    cover_data: bool,
    options: ReadOptions,
    formatter: &OutputFormatter,
) -> Result<()> {
    let mut stdout = io::stdout().lock();
    let mut success_count = 0;

    for path in files {
        match read_metadata(path, options) {
            Ok(metadata) => {
                let mut value = serde_json::to_value(metadata.summary(cover_data))?;
                if let Value::Object(obj) = &mut value {
                    obj.insert("path".to_string(), json!(path.display().to_string()));
                }
                formatter.output(&value, &mut stdout)?;
                success_count += 1;
            }
            Err(e) => formatter.print_error(&format!("{:#}", e)),
        }
    }

    if success_count == 0 {
        bail!("No file could be read");
    }
    Ok(())
}

/// Dump the raw frame mapping of a file
fn command_frames(path: &Path, options: ReadOptions, formatter: &OutputFormatter) -> Result<()> {
    let metadata = read_metadata(path, options)?;

    let Metadata::Id3v2(tag) = &metadata else {
        bail!("{} has no ID3v2 tag ({})", path.display(), metadata.tag_format());
    };

    let mut frames: Vec<_> = tag.frames().iter().collect();
    frames.sort_by(|a, b| a.0.cmp(b.0));

    let mut obj = serde_json::Map::new();
    for (key, value) in frames {
        obj.insert(key.to_string(), frame_to_json(value));
    }

    formatter.output(&Value::Object(obj), &mut io::stdout().lock())
}

fn frame_to_json(value: &FrameValue) -> Value {
    match value {
        FrameValue::Text(text) => json!(text),
        FrameValue::Comment(comment) => json!({
            "language": comment.language,
            "description": comment.description,
            "text": comment.text,
        }),
        FrameValue::Picture(picture) => json!({
            "mime_type": picture.mime_type,
            "picture_type": picture.picture_type,
            "description": picture.description,
            "size": picture.data.len(),
        }),
    }
}

/// Detect the tag format of files
fn command_detect(files: &[PathBuf], options: ReadOptions, formatter: &OutputFormatter) -> Result<()> {
    let mut stdout = io::stdout().lock();
    let mut success_count = 0;

    for path in files {
        match read_metadata(path, options) {
            Ok(metadata) => {
                let value = json!({
                    "path": path.display().to_string(),
                    "tag_format": metadata.tag_format(),
                    "file_type": metadata.file_type(),
                });
                formatter.output(&value, &mut stdout)?;
                success_count += 1;
            }
            Err(e) => formatter.print_error(&format!("{:#}", e)),
        }
    }

    if success_count == 0 {
        bail!("No file could be read");
    }
    Ok(())
}

/// Export the front cover as `<output>/<stem>.<ext>`
fn command_export_cover(
    path: &Path,
    output_dir: &Path,
    options: ReadOptions,
    formatter: &OutputFormatter,
) -> Result<()> {
    let metadata = read_metadata(path, options.read_cover_art(true))?;
    let Some(picture) = metadata.album_art() else {
        bail!("{} has no front cover", path.display());
    };

    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "cover".to_string());
    let target = output_dir.join(format!("{}.{}", stem, picture.extension()));

    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;
    let mut file = fs::File::create(&target)
        .with_context(|| format!("Failed to create {}", target.display()))?;
    file.write_all(&picture.data)?;

    formatter.print_success(&format!(
        "Exported {} ({} bytes) to {}",
        picture.mime_type,
        picture.data.len(),
        target.display()
    ));
    Ok(())
}

/// Build catalog entries for a directory tree
fn command_scan(directory: &Path, pattern: Option<&str>, formatter: &OutputFormatter) -> Result<()> {
    if !directory.is_dir() {
        bail!("{} is not a directory", directory.display());
    }

    let tracks = musictag::scan_library(directory, pattern)
        .with_context(|| format!("Failed to scan {}", directory.display()))?;

    formatter.output(&serde_json::to_value(&tracks)?, &mut io::stdout().lock())?;
    formatter.print_success(&format!("Scanned {} files", tracks.len()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use musictag::{Comment, Picture};

    #[test]
    fn test_frame_to_json() {
        assert_eq!(frame_to_json(&FrameValue::Text("Title".into())), json!("Title"));

        let comment = FrameValue::Comment(Comment {
            language: "eng".into(),
            description: String::new(),
            text: "hello".into(),
        });
        assert_eq!(frame_to_json(&comment)["text"], "hello");

        let picture = FrameValue::Picture(Picture {
            mime_type: "image/png".into(),
            picture_type: Picture::COVER_FRONT,
            description: String::new(),
            data: vec![1, 2, 3],
        });
        let value = frame_to_json(&picture);
        assert_eq!(value["size"], 3);
        assert!(value.get("data").is_none());
    }
}
