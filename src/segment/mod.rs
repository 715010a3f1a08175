// Sentence segmentation
//
// Two strategies share one trait and are picked by a factory:
// - Newline: every non-empty input line is a sentence
// - Heuristic: punctuation split followed by a false-boundary merge pass

pub mod heuristic;
pub mod newline;

pub use heuristic::HeuristicSegmenter;
pub use newline::NewlineSegmenter;

/// Splits normalized text into trimmed, non-empty sentences in document order
pub trait SentenceSegmenter: Send + Sync {
    fn segment(&self, text: &str) -> Vec<String>;
}

/// Factory for creating segmenter instances
pub struct SegmenterFactory;

impl SegmenterFactory {
    /// Create a segmenter for the configured split mode
    pub fn create_segmenter(split_on_newline: bool) -> Box<dyn SentenceSegmenter> {
        if split_on_newline {
            Box::new(NewlineSegmenter)
        } else {
            Box::new(HeuristicSegmenter)
        }
    }
}

/// Segment `text` with the strategy selected by `split_on_newline`
pub fn segment(text: &str, split_on_newline: bool) -> Vec<String> {
    SegmenterFactory::create_segmenter(split_on_newline).segment(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_selects_strategy() {
        let text = "First line. Still first\nSecond line";

        assert_eq!(
            segment(text, true),
            vec!["First line. Still first", "Second line"]
        );
        assert_eq!(
            segment(text, false),
            vec!["First line.", "Still first\nSecond line"]
        );
    }
}
