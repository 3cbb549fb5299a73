// CLI configuration
use crate::cli::output::OutputFormat;

use clap::{Parser, Subcommand};
use musictag::{ParsingMode, ReadOptions};
use std::path::PathBuf;

/// musictag - ID3 tag reader
#[derive(Parser, Debug)]
#[command(name = "musictag")]
#[command(about = "Read ID3v1 and ID3v2 tags from MP3 files", long_about = None)]
#[command(version)]
pub struct Config {
    /// Output format
    #[arg(short, long, value_enum, default_value = "pretty", global = true)]
    pub format: OutputFormat,

    /// Quiet mode (suppress progress messages)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging, unless RUST_LOG is set)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Skip undecodable frames instead of failing the whole tag
    #[arg(long, global = true)]
    pub relaxed: bool,

    /// Reject ID3v2 tags declaring more than this many bytes
    #[arg(long, value_name = "BYTES", global = true)]
    pub max_tag_size: Option<u32>,

    /// Subcommand
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Read canonical tag fields from file(s)
    Read {
        /// MP3 file path(s)
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,

        /// Include the base64-encoded front cover
        #[arg(long)]
        cover_data: bool,
    },

    /// Dump every decoded frame of a file
    Frames {
        /// MP3 file path
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Detect the tag format of file(s)
    Detect {
        /// MP3 file path(s)
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,
    },

    /// Export the front cover
    ExportCover {
        /// MP3 file path
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output directory for the cover image
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Build catalog entries for a directory tree
    Scan {
        /// Library directory
        #[arg(value_name = "DIR")]
        directory: PathBuf,

        /// File pattern (e.g., "*.mp3")
        #[arg(short, long)]
        pattern: Option<String>,
    },
}

impl Config {
    /// Library options selected by the global flags
    pub fn read_options(&self) -> ReadOptions {
        let mode = if self.relaxed {
            ParsingMode::Relaxed
        } else {
            ParsingMode::Strict
        };

        let options = ReadOptions::new().parsing_mode(mode);
        match self.max_tag_size {
            Some(limit) => options.max_tag_size(limit),
            None => options,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_read() {
        let config =
            Config::try_parse_from(["musictag", "read", "a.mp3", "b.mp3", "--cover-data", "-f", "json"])
                .unwrap();

        assert_eq!(config.format, OutputFormat::Json);
        match config.command {
            Commands::Read { files, cover_data } => {
                assert_eq!(files.len(), 2);
                assert!(cover_data);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_read_options() {
        let config =
            Config::try_parse_from(["musictag", "--relaxed", "--max-tag-size", "4096", "frames", "a.mp3"])
                .unwrap();
        let options = config.read_options();
        assert_eq!(
            options,
            ReadOptions::new()
                .parsing_mode(ParsingMode::Relaxed)
                .max_tag_size(4096)
        );
    }

    #[test]
    fn test_read_requires_files() {
        assert!(Config::try_parse_from(["musictag", "read"]).is_err());
    }
}
