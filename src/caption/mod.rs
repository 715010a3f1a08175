// Caption pipeline
//
// sentences -> groups -> (duration, wrapped lines) -> cues
// Every stage is a pure function of its input and the caption options.

pub mod builder;
pub mod group;
pub mod timing;
pub mod wrap;

use std::time::Duration;
use tracing::debug;

pub use builder::CueBuilder;
pub use group::group_sentences;
pub use timing::{estimate_duration, MIN_TECHNICAL_GAP};
pub use wrap::wrap_text;

use crate::config::CaptionOptions;
use crate::error::Result;
use crate::segment;
use crate::text::normalize_input;

/// One timed caption unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cue {
    /// 1-based position in the cue list
    pub index: usize,
    pub start: Duration,
    pub end: Duration,
    /// Display lines, at least one
    pub lines: Vec<String>,
}

impl Cue {
    pub fn duration(&self) -> Duration {
        self.end.saturating_sub(self.start)
    }

    /// Lines joined back into a single line of text
    pub fn text(&self) -> String {
        self.lines.join(" ")
    }
}

pub type CueList = Vec<Cue>;

/// Run the whole text-to-cue pipeline on a raw document
///
/// Options are validated before anything else. Empty or whitespace-only text
/// yields an empty list.
pub fn generate_cues(raw_text: &str, options: &CaptionOptions) -> Result<CueList> {
    let builder = CueBuilder::new(options.clone())?;
    let text = normalize_input(raw_text);

    let sentences = segment::segment(&text, options.split_on_newline);
    debug!("Segmented {} sentences", sentences.len());

    Ok(builder.build(&sentences))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TextcueError;

    #[test]
    fn test_generate_cues_end_to_end() {
        let options = CaptionOptions {
            words_per_minute: 200.0,
            chars_per_second: 15.0,
            min_duration_seconds: 1.0,
            max_duration_seconds: 7.0,
            gap_seconds: 1.0,
            ..Default::default()
        };
        let cues = generate_cues("\u{feff}Dr. Smith went home.\r\nHe slept.", &options).unwrap();

        assert_eq!(cues.len(), 2);
        assert_eq!(cues[0].lines, vec!["Dr. Smith went home."]);
        assert_eq!(cues[1].lines, vec!["He slept."]);
        // 20 chars at 15 cps
        assert_eq!(cues[0].end.as_millis(), 1333);
        assert_eq!(cues[1].start.as_millis(), 2333);
    }

    #[test]
    fn test_split_on_newline_mode() {
        let options = CaptionOptions { split_on_newline: true, ..Default::default() };
        let cues = generate_cues("Title\nDr. Who. Part one.\n\n", &options).unwrap();

        assert_eq!(cues.len(), 2);
        assert_eq!(cues[1].text(), "Dr. Who. Part one.");
    }

    #[test]
    fn test_empty_input_is_not_an_error() {
        let options = CaptionOptions::default();
        assert!(generate_cues("", &options).unwrap().is_empty());
        assert!(generate_cues(" \r\n\t\n", &options).unwrap().is_empty());
        assert!(generate_cues("\u{feff}", &options).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_options_fail_fast() {
        let options = CaptionOptions {
            min_duration_seconds: 5.0,
            max_duration_seconds: 2.0,
            ..Default::default()
        };
        assert!(matches!(
            generate_cues("Some text.", &options),
            Err(TextcueError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_huge_gap_is_rejected_instead_of_overflowing() {
        let options = CaptionOptions { gap_seconds: 1e20, ..Default::default() };
        assert!(matches!(
            generate_cues("One. Two.", &options),
            Err(TextcueError::InvalidConfiguration(_))
        ));
    }
}
