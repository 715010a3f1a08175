use super::SentenceSegmenter;

/// Line-oriented segmentation: one sentence per non-blank line, no merging
pub struct NewlineSegmenter;

impl SentenceSegmenter for NewlineSegmenter {
    fn segment(&self, text: &str) -> Vec<String> {
        text.split('\n')
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_sentence_per_line() {
        let sentences = NewlineSegmenter.segment("  Dr. Who\n\n\tNo. 5 is here.  \nEnd");
        assert_eq!(sentences, vec!["Dr. Who", "No. 5 is here.", "End"]);
    }

    #[test]
    fn test_blank_input() {
        assert!(NewlineSegmenter.segment("\n \n\t\n").is_empty());
        assert!(NewlineSegmenter.segment("").is_empty());
    }
}
