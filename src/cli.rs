use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{Config, OutputFormat};
use crate::error::Result;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a single text file into captions
    Convert {
        /// Input text file
        #[arg(short, long)]
        input: PathBuf,

        /// Output directory (defaults to the input file's directory)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        #[command(flatten)]
        overrides: Overrides,
    },

    /// Convert every text file in a directory
    Batch {
        /// Input directory containing text files
        #[arg(short, long)]
        input_dir: PathBuf,

        /// Output directory (defaults to the input directory)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        #[command(flatten)]
        overrides: Overrides,
    },

    /// Inspect or create configuration files
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,

    /// Write the default configuration to a file
    Init {
        /// Destination path
        #[arg(short, long, default_value = "config.toml")]
        path: PathBuf,

        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Command-line values that take precedence over the configuration file
#[derive(ClapArgs, Debug, Default, Clone)]
pub struct Overrides {
    /// Output formats (comma-separated: srt, fcpxml, json)
    #[arg(short, long)]
    pub format: Option<String>,

    /// Sentences per caption
    #[arg(long)]
    pub sentences_per_cue: Option<usize>,

    /// Reading speed in words per minute
    #[arg(long)]
    pub wpm: Option<f64>,

    /// Reading speed in characters per second
    #[arg(long)]
    pub cps: Option<f64>,

    /// Gap between captions in seconds
    #[arg(long)]
    pub gap: Option<f64>,

    /// Minimum caption duration in seconds
    #[arg(long)]
    pub min_duration: Option<f64>,

    /// Maximum caption duration in seconds
    #[arg(long)]
    pub max_duration: Option<f64>,

    /// Treat each line of the input as one sentence
    #[arg(long)]
    pub split_on_newline: bool,

    /// Maximum characters per caption line
    #[arg(long)]
    pub max_line_length: Option<usize>,

    /// Maximum lines per caption
    #[arg(long)]
    pub max_lines: Option<usize>,

    /// Overwrite existing output files
    #[arg(long)]
    pub overwrite: bool,
}

impl Overrides {
    /// Apply the given values on top of `config`
    pub fn apply(&self, config: &mut Config) -> Result<()> {
        if let Some(format) = &self.format {
            config.output.formats = OutputFormat::parse_list(format)?;
        }

        let caption = &mut config.caption;
        if let Some(value) = self.sentences_per_cue {
            caption.sentences_per_cue = value;
        }
        if let Some(value) = self.wpm {
            caption.words_per_minute = value;
        }
        if let Some(value) = self.cps {
            caption.chars_per_second = value;
        }
        if let Some(value) = self.gap {
            caption.gap_seconds = value;
        }
        if let Some(value) = self.min_duration {
            caption.min_duration_seconds = value;
        }
        if let Some(value) = self.max_duration {
            caption.max_duration_seconds = value;
        }
        if self.split_on_newline {
            caption.split_on_newline = true;
        }
        if let Some(value) = self.max_line_length {
            caption.max_line_length = value;
        }
        if let Some(value) = self.max_lines {
            caption.max_lines = value;
        }
        if self.overwrite {
            config.output.overwrite = true;
        }

        Ok(())
    }
}
