use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

use crate::error::{Result, TextcueError};

/// Floor for the configured maximum line length
pub const MIN_LINE_LENGTH: usize = 10;

/// Upper bound for gap and duration settings (24 hours)
pub const MAX_TIME_SECONDS: f64 = 86_400.0;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub caption: CaptionOptions,
    pub output: OutputConfig,
    pub fcpxml: FcpxmlConfig,
    pub batch: BatchConfig,
}

/// Options controlling segmentation, timing and wrapping of caption cues
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptionOptions {
    /// Number of sentences joined into one cue
    pub sentences_per_cue: usize,
    /// Reading speed used by the word-based duration model
    pub words_per_minute: f64,
    /// Reading speed used by the character-based duration model
    pub chars_per_second: f64,
    /// Requested silence between cues (seconds), never less than the technical gap
    pub gap_seconds: f64,
    /// Shortest time a cue stays on screen (seconds)
    pub min_duration_seconds: f64,
    /// Longest time a cue stays on screen (seconds)
    pub max_duration_seconds: f64,
    /// Treat every input line as one sentence instead of using punctuation heuristics
    pub split_on_newline: bool,
    /// Preferred maximum characters per display line
    pub max_line_length: usize,
    /// Maximum display lines per cue
    pub max_lines: usize,
}

impl Default for CaptionOptions {
    fn default() -> Self {
        Self {
            sentences_per_cue: 1,
            words_per_minute: 200.0,
            chars_per_second: 15.0,
            gap_seconds: 1.0,
            min_duration_seconds: 1.0,
            max_duration_seconds: 7.0,
            split_on_newline: false,
            max_line_length: 42,
            max_lines: 2,
        }
    }
}

impl CaptionOptions {
    /// Check every field against its documented domain
    pub fn validate(&self) -> Result<()> {
        if self.sentences_per_cue == 0 {
            return Err(invalid("sentences_per_cue must be at least 1"));
        }
        if !positive(self.words_per_minute) {
            return Err(invalid("words_per_minute must be a positive number"));
        }
        if !positive(self.chars_per_second) {
            return Err(invalid("chars_per_second must be a positive number"));
        }
        if !self.gap_seconds.is_finite() || self.gap_seconds < 0.0 {
            return Err(invalid("gap_seconds must not be negative"));
        }
        if !positive(self.min_duration_seconds) {
            return Err(invalid("min_duration_seconds must be a positive number"));
        }
        if !positive(self.max_duration_seconds) {
            return Err(invalid("max_duration_seconds must be a positive number"));
        }
        for (name, value) in [
            ("gap_seconds", self.gap_seconds),
            ("max_duration_seconds", self.max_duration_seconds),
        ] {
            if value > MAX_TIME_SECONDS {
                return Err(TextcueError::InvalidConfiguration(format!(
                    "{} must not exceed {} seconds",
                    name, MAX_TIME_SECONDS
                )));
            }
        }
        if self.min_duration_seconds > self.max_duration_seconds {
            return Err(TextcueError::InvalidConfiguration(format!(
                "min_duration_seconds ({}) exceeds max_duration_seconds ({})",
                self.min_duration_seconds, self.max_duration_seconds
            )));
        }
        if self.max_line_length <= MIN_LINE_LENGTH {
            return Err(TextcueError::InvalidConfiguration(format!(
                "max_line_length must be greater than {}",
                MIN_LINE_LENGTH
            )));
        }
        if self.max_lines == 0 {
            return Err(invalid("max_lines must be at least 1"));
        }
        Ok(())
    }
}

fn positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn invalid(message: &str) -> TextcueError {
    TextcueError::InvalidConfiguration(message.to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// SubRip subtitles
    Srt,
    /// Final Cut Pro XML project with one title per cue
    Fcpxml,
    /// Cue list dump for tooling
    Json,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Srt => "srt",
            OutputFormat::Fcpxml => "fcpxml",
            OutputFormat::Json => "json",
        }
    }

    /// Parse a comma-separated list such as `srt,fcpxml`
    pub fn parse_list(list: &str) -> Result<Vec<Self>> {
        let mut formats = Vec::new();
        for name in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let format: OutputFormat = name.parse()?;
            if !formats.contains(&format) {
                formats.push(format);
            }
        }
        if formats.is_empty() {
            return Err(TextcueError::UnsupportedFormat(
                "at least one output format is required".to_string(),
            ));
        }
        Ok(formats)
    }
}

impl FromStr for OutputFormat {
    type Err = TextcueError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "srt" => Ok(OutputFormat::Srt),
            "fcpxml" | "xml" => Ok(OutputFormat::Fcpxml),
            "json" => Ok(OutputFormat::Json),
            _ => Err(TextcueError::UnsupportedFormat(format!(
                "'{}'. Valid formats: srt, fcpxml, json",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Formats written for every converted document
    pub formats: Vec<OutputFormat>,
    /// Appended to the input file stem when naming outputs
    pub file_suffix: String,
    /// Replace existing output files
    pub overwrite: bool,
    /// Treat a document without caption text as an error instead of skipping it
    pub fail_on_empty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            formats: vec![OutputFormat::Srt],
            file_suffix: "_subtitles".to_string(),
            overwrite: false,
            fail_on_empty: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FcpxmlConfig {
    /// Project name shown in the editor; the input file stem is used when empty
    pub project_name: String,
    /// Event that holds the generated project
    pub event_name: String,
    pub width: u32,
    pub height: u32,
    pub font: String,
    pub font_size: u32,
}

impl Default for FcpxmlConfig {
    fn default() -> Self {
        Self {
            project_name: String::new(),
            event_name: "Captions".to_string(),
            width: 1920,
            height: 1080,
            font: "Helvetica".to_string(),
            font_size: 60,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// File extensions picked up when converting a directory
    pub extensions: Vec<String>,
    /// Documents converted concurrently
    pub max_parallel: usize,
    /// Descend into subdirectories
    pub recursive: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["txt".to_string()],
            max_parallel: 4,
            recursive: true,
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| TextcueError::Config(format!("Failed to read config file: {}", e)))?;

        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config = toml::from_str(content)?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| TextcueError::Config(format!("Failed to serialize config: {}", e)))
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = self.to_toml()?;

        std::fs::write(path, content)
            .map_err(|e| TextcueError::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Validate the whole configuration before any document is touched
    pub fn validate(&self) -> Result<()> {
        self.caption.validate()?;

        if self.output.formats.is_empty() {
            return Err(invalid("output.formats must name at least one format"));
        }
        if self.batch.max_parallel == 0 {
            return Err(invalid("batch.max_parallel must be at least 1"));
        }
        if self.batch.extensions.is_empty() {
            return Err(invalid("batch.extensions must name at least one extension"));
        }
        if self.fcpxml.width == 0 || self.fcpxml.height == 0 {
            return Err(invalid("fcpxml.width and fcpxml.height must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_out_of_domain_options() {
        let cases = [
            CaptionOptions { sentences_per_cue: 0, ..Default::default() },
            CaptionOptions { words_per_minute: 0.0, ..Default::default() },
            CaptionOptions { chars_per_second: -1.0, ..Default::default() },
            CaptionOptions { gap_seconds: -0.5, ..Default::default() },
            CaptionOptions { min_duration_seconds: 0.0, ..Default::default() },
            CaptionOptions { min_duration_seconds: 8.0, max_duration_seconds: 7.0, ..Default::default() },
            CaptionOptions { max_line_length: 10, ..Default::default() },
            CaptionOptions { max_lines: 0, ..Default::default() },
            CaptionOptions { words_per_minute: f64::NAN, ..Default::default() },
            CaptionOptions { gap_seconds: 1e20, ..Default::default() },
            CaptionOptions { max_duration_seconds: 1e20, ..Default::default() },
            CaptionOptions { min_duration_seconds: 1e20, max_duration_seconds: 1e20, ..Default::default() },
        ];

        for options in cases {
            assert!(
                matches!(options.validate(), Err(TextcueError::InvalidConfiguration(_))),
                "expected rejection for {:?}",
                options
            );
        }
    }

    #[test]
    fn test_accepts_time_settings_at_upper_bound() {
        let options = CaptionOptions {
            gap_seconds: MAX_TIME_SECONDS,
            min_duration_seconds: MAX_TIME_SECONDS,
            max_duration_seconds: MAX_TIME_SECONDS,
            ..Default::default()
        };
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_malformed_toml_is_reported() {
        assert!(matches!(
            Config::from_toml("[caption]\nmax_lines = \"two\""),
            Err(TextcueError::Toml(_))
        ));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = Config::from_toml(
            r#"
            [caption]
            sentences_per_cue = 2
            max_lines = 3

            [output]
            formats = ["srt", "fcpxml"]
            "#,
        )
        .unwrap();

        assert_eq!(config.caption.sentences_per_cue, 2);
        assert_eq!(config.caption.max_lines, 3);
        assert_eq!(config.caption.words_per_minute, 200.0);
        assert_eq!(config.output.formats, vec![OutputFormat::Srt, OutputFormat::Fcpxml]);
        assert_eq!(config.output.file_suffix, "_subtitles");
        assert_eq!(config.batch.max_parallel, 4);
    }

    #[test]
    fn test_toml_round_trip_keeps_options() {
        let mut config = Config::default();
        config.caption.split_on_newline = true;
        config.output.formats = vec![OutputFormat::Json];

        let parsed = Config::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(parsed.caption, config.caption);
        assert_eq!(parsed.output.formats, vec![OutputFormat::Json]);
    }

    #[test]
    fn test_parse_format_list() {
        assert_eq!(
            OutputFormat::parse_list("srt, FCPXML,srt").unwrap(),
            vec![OutputFormat::Srt, OutputFormat::Fcpxml]
        );
        assert!(matches!(
            OutputFormat::parse_list("srt,vtt"),
            Err(TextcueError::UnsupportedFormat(_))
        ));
        assert!(OutputFormat::parse_list(" , ").is_err());
    }
}
