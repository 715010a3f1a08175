use serde::Serialize;

use super::srt::format_srt_time;
use super::CueWriter;
use crate::caption::Cue;
use crate::config::OutputFormat;
use crate::error::Result;

/// Serialized view of one cue
#[derive(Debug, Serialize)]
struct JsonCue<'a> {
    index: usize,
    start: f64,
    end: f64,
    start_timecode: String,
    end_timecode: String,
    lines: &'a [String],
}

impl<'a> From<&'a Cue> for JsonCue<'a> {
    fn from(cue: &'a Cue) -> Self {
        Self {
            index: cue.index,
            start: cue.start.as_secs_f64(),
            end: cue.end.as_secs_f64(),
            start_timecode: format_srt_time(cue.start),
            end_timecode: format_srt_time(cue.end),
            lines: &cue.lines,
        }
    }
}

/// Pretty-printed JSON array of cues, times in seconds
pub struct JsonWriter;

impl CueWriter for JsonWriter {
    fn format(&self) -> OutputFormat {
        OutputFormat::Json
    }

    fn render(&self, cues: &[Cue]) -> Result<String> {
        let items: Vec<JsonCue> = cues.iter().map(JsonCue::from).collect();
        let mut json = serde_json::to_string_pretty(&items)?;
        json.push('\n');
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_render_cues() {
        let cues = vec![Cue {
            index: 1,
            start: Duration::from_millis(1500),
            end: Duration::from_millis(3250),
            lines: vec!["Hello".to_string(), "there".to_string()],
        }];

        let json = JsonWriter.render(&cues).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value[0]["index"], 1);
        assert_eq!(value[0]["start"], 1.5);
        assert_eq!(value[0]["end"], 3.25);
        assert_eq!(value[0]["start_timecode"], "00:00:01,500");
        assert_eq!(value[0]["end_timecode"], "00:00:03,250");
        assert_eq!(value[0]["lines"], serde_json::json!(["Hello", "there"]));
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(JsonWriter.render(&[]).unwrap(), "[]\n");
    }
}
