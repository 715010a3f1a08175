use std::time::Duration;

use crate::config::CaptionOptions;

/// Minimum silence enforced between consecutive cues
pub const MIN_TECHNICAL_GAP: Duration = Duration::from_millis(200);

/// Reading time for `text` in seconds under the word-rate model
pub fn seconds_by_wpm(text: &str, words_per_minute: f64) -> f64 {
    let word_count = text.split_whitespace().count() as f64;
    word_count * 60.0 / words_per_minute
}

/// Reading time for `text` in seconds under the character-rate model
pub fn seconds_by_cps(text: &str, chars_per_second: f64) -> f64 {
    let char_count = text.chars().count() as f64;
    char_count / chars_per_second
}

/// On-screen duration of one cue
///
/// The slower of the two reading models wins, then the result is clamped to
/// `[min_duration_seconds, max_duration_seconds]`.
pub fn estimate_duration(text: &str, options: &CaptionOptions) -> Duration {
    let raw = seconds_by_wpm(text, options.words_per_minute)
        .max(seconds_by_cps(text, options.chars_per_second));
    let seconds = raw.clamp(options.min_duration_seconds, options.max_duration_seconds);
    Duration::from_secs_f64(seconds)
}

/// Gap inserted after each cue
pub fn effective_gap(options: &CaptionOptions) -> Duration {
    Duration::from_secs_f64(options.gap_seconds).max(MIN_TECHNICAL_GAP)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> CaptionOptions {
        CaptionOptions {
            words_per_minute: 120.0,
            chars_per_second: 10.0,
            min_duration_seconds: 0.5,
            max_duration_seconds: 30.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_reading_models() {
        assert_eq!(seconds_by_wpm("one two three four", 120.0), 2.0);
        assert_eq!(seconds_by_cps("abcdefghij", 5.0), 2.0);
        // characters, not bytes
        assert_eq!(seconds_by_cps("ééééé", 5.0), 1.0);
    }

    #[test]
    fn test_slower_model_wins() {
        // 2 words -> 1.0s by wpm, 40 chars -> 4.0s by cps
        let text = "Supercalifragilistic expialidocious_now!";
        assert_eq!(text.chars().count(), 40);
        assert_eq!(estimate_duration(text, &options()), Duration::from_secs(4));

        // 10 one-letter words -> 5.0s by wpm, 19 chars -> 1.9s by cps
        let text = "a b c d e f g h i j";
        assert_eq!(estimate_duration(text, &options()), Duration::from_secs(5));
    }

    #[test]
    fn test_clamped_to_range() {
        let short = CaptionOptions {
            words_per_minute: 1000.0,
            chars_per_second: 1000.0,
            min_duration_seconds: 2.0,
            max_duration_seconds: 3.0,
            ..Default::default()
        };
        assert_eq!(estimate_duration("Hi.", &short), Duration::from_secs(2));

        let long = CaptionOptions {
            words_per_minute: 10.0,
            chars_per_second: 1.0,
            min_duration_seconds: 1.0,
            max_duration_seconds: 3.0,
            ..Default::default()
        };
        let text = vec!["word"; 100].join(" ");
        assert_eq!(estimate_duration(&text, &long), Duration::from_secs(3));
    }

    #[test]
    fn test_gap_never_below_technical_minimum() {
        let zero = CaptionOptions { gap_seconds: 0.0, ..Default::default() };
        assert_eq!(effective_gap(&zero), MIN_TECHNICAL_GAP);

        let wide = CaptionOptions { gap_seconds: 1.5, ..Default::default() };
        assert_eq!(effective_gap(&wide), Duration::from_millis(1500));
    }
}
