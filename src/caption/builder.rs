use std::time::Duration;
use tracing::debug;

use super::group::group_sentences;
use super::timing::{effective_gap, estimate_duration};
use super::wrap::wrap_text;
use super::{Cue, CueList};
use crate::config::CaptionOptions;
use crate::error::Result;

/// Turns sentences into timed, wrapped cues
///
/// Options are validated on construction, so a builder always carries a usable
/// configuration.
#[derive(Debug, Clone)]
pub struct CueBuilder {
    options: CaptionOptions,
}

impl CueBuilder {
    pub fn new(options: CaptionOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    pub fn options(&self) -> &CaptionOptions {
        &self.options
    }

    /// Build the cue list for `sentences`, in document order
    pub fn build<S: AsRef<str>>(&self, sentences: &[S]) -> CueList {
        let gap = effective_gap(&self.options);
        let mut cues = Vec::new();
        let mut cursor = Duration::ZERO;

        for text in group_sentences(sentences, self.options.sentences_per_cue) {
            if text.is_empty() {
                continue;
            }

            let end = cursor + estimate_duration(&text, &self.options);
            let lines = wrap_text(&text, self.options.max_line_length, self.options.max_lines);

            cues.push(Cue {
                index: cues.len() + 1,
                start: cursor,
                end,
                lines,
            });
            cursor = end + gap;
        }

        debug!(
            "Built {} cues from {} sentences ({:.3}s total)",
            cues.len(),
            sentences.len(),
            cues.last().map(|cue| cue.end.as_secs_f64()).unwrap_or(0.0)
        );

        cues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::caption::timing::MIN_TECHNICAL_GAP;
    use crate::text::collapse_whitespace;

    fn sentences() -> Vec<String> {
        [
            "The quick brown fox jumps over the lazy dog near the riverbank.",
            "It was late.",
            "Everyone had already gone home, but the fox kept running through the fields until dawn broke over the hills.",
            "Fin.",
            "A short epilogue follows here.",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    #[test]
    fn test_rejects_invalid_options() {
        let options = CaptionOptions { max_lines: 0, ..Default::default() };
        assert!(CueBuilder::new(options).is_err());
    }

    #[test]
    fn test_indices_are_sequential() {
        let builder = CueBuilder::new(CaptionOptions::default()).unwrap();
        let cues = builder.build(&sentences());

        assert_eq!(cues.len(), 5);
        for (i, cue) in cues.iter().enumerate() {
            assert_eq!(cue.index, i + 1);
        }
        assert_eq!(cues[0].start, Duration::ZERO);
    }

    #[test]
    fn test_monotonic_and_duration_bounds() {
        let options = CaptionOptions {
            min_duration_seconds: 1.5,
            max_duration_seconds: 4.0,
            gap_seconds: 0.5,
            ..Default::default()
        };
        let builder = CueBuilder::new(options.clone()).unwrap();
        let cues = builder.build(&sentences());

        for cue in &cues {
            assert!(cue.start < cue.end);
            let seconds = cue.duration().as_secs_f64();
            assert!(seconds >= options.min_duration_seconds - 1e-9);
            assert!(seconds <= options.max_duration_seconds + 1e-9);
        }
        for pair in cues.windows(2) {
            assert!(pair[0].end <= pair[1].start);
            assert!(pair[0].start < pair[1].start);
        }
    }

    #[test]
    fn test_zero_gap_uses_technical_gap() {
        let options = CaptionOptions { gap_seconds: 0.0, ..Default::default() };
        let cues = CueBuilder::new(options).unwrap().build(&sentences());

        for pair in cues.windows(2) {
            assert_eq!(pair[1].start - pair[0].end, MIN_TECHNICAL_GAP);
        }
    }

    #[test]
    fn test_lines_preserve_content() {
        let options = CaptionOptions { max_line_length: 20, max_lines: 2, ..Default::default() };
        let input = sentences();
        let cues = CueBuilder::new(options).unwrap().build(&input);

        for (cue, sentence) in cues.iter().zip(&input) {
            assert!(!cue.lines.is_empty() && cue.lines.len() <= 2);
            assert!(cue.lines[0].chars().count() <= 20);
            assert_eq!(collapse_whitespace(&cue.lines.join(" ")), collapse_whitespace(sentence));
        }
    }

    #[test]
    fn test_grouping_reduces_cue_count() {
        let options = CaptionOptions { sentences_per_cue: 2, ..Default::default() };
        let cues = CueBuilder::new(options).unwrap().build(&sentences());

        assert_eq!(cues.len(), 3);
        assert_eq!(cues[2].text(), "A short epilogue follows here.");
    }

    #[test]
    fn test_empty_input_builds_nothing() {
        let builder = CueBuilder::new(CaptionOptions::default()).unwrap();
        assert!(builder.build::<&str>(&[]).is_empty());
        assert!(builder.build(&["   ", "\n"]).is_empty());
    }
}
