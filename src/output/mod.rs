// Cue list serializers
//
// Each output format implements `CueWriter`; the factory maps the configured
// formats to writers:
// - Srt: SubRip subtitles with CRLF line endings
// - Fcpxml: editor project with one title clip per cue
// - Json: cue dump for tooling

pub mod fcpxml;
pub mod json;
pub mod srt;

pub use fcpxml::FcpxmlWriter;
pub use json::JsonWriter;
pub use srt::{format_srt_time, SrtWriter};

use crate::caption::Cue;
use crate::config::{Config, OutputFormat};
use crate::error::Result;

/// Renders a cue list into the text of one output file
pub trait CueWriter: Send + Sync {
    /// Format produced by this writer
    fn format(&self) -> OutputFormat;

    /// Render the cues into the complete file contents
    fn render(&self, cues: &[Cue]) -> Result<String>;
}

/// Factory for creating writer instances
pub struct WriterFactory;

impl WriterFactory {
    /// Create a writer for `format`; `document_name` names the FCPXML project when none is configured
    pub fn create_writer(format: OutputFormat, config: &Config, document_name: &str) -> Box<dyn CueWriter> {
        match format {
            OutputFormat::Srt => Box::new(SrtWriter),
            OutputFormat::Fcpxml => {
                let project_name = if config.fcpxml.project_name.trim().is_empty() {
                    document_name.to_string()
                } else {
                    config.fcpxml.project_name.clone()
                };
                Box::new(FcpxmlWriter::new(config.fcpxml.clone(), project_name))
            }
            OutputFormat::Json => Box::new(JsonWriter),
        }
    }

    /// Create one writer per configured output format
    pub fn create_writers(config: &Config, document_name: &str) -> Vec<Box<dyn CueWriter>> {
        config
            .output
            .formats
            .iter()
            .map(|&format| Self::create_writer(format, config, document_name))
            .collect()
    }
}
