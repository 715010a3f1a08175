use std::time::Duration;

use super::CueWriter;
use crate::caption::Cue;
use crate::config::OutputFormat;
use crate::error::Result;

const LINE_BREAK: &str = "\r\n";

/// SubRip writer: `index`, `start --> end`, text lines, blank line, all CRLF-terminated
pub struct SrtWriter;

impl CueWriter for SrtWriter {
    fn format(&self) -> OutputFormat {
        OutputFormat::Srt
    }

    fn render(&self, cues: &[Cue]) -> Result<String> {
        let mut srt_content = String::new();

        for cue in cues {
            srt_content.push_str(&format!(
                "{}{LINE_BREAK}{} --> {}{LINE_BREAK}",
                cue.index,
                format_srt_time(cue.start),
                format_srt_time(cue.end),
            ));
            for line in &cue.lines {
                srt_content.push_str(line);
                srt_content.push_str(LINE_BREAK);
            }
            srt_content.push_str(LINE_BREAK);
        }

        Ok(srt_content)
    }
}

/// Format a timestamp as `HH:MM:SS,mmm`, rounded to the nearest millisecond
///
/// Hours are not wrapped at 24 and grow past two digits when needed.
pub fn format_srt_time(time: Duration) -> String {
    let total_milliseconds = (time.as_nanos() + 500_000) / 1_000_000;
    let hours = total_milliseconds / 3_600_000;
    let minutes = (total_milliseconds % 3_600_000) / 60_000;
    let secs = (total_milliseconds % 60_000) / 1_000;
    let millis = total_milliseconds % 1_000;

    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, secs, millis)
}
