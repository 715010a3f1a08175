use crate::text::collapse_whitespace;

/// Partition sentences into runs of `sentences_per_cue` and normalize each run
///
/// Runs whose normalized text is empty are dropped without consuming a cue slot.
/// A `sentences_per_cue` of zero is treated as one.
pub fn group_sentences<S: AsRef<str>>(sentences: &[S], sentences_per_cue: usize) -> Vec<String> {
    sentences
        .chunks(sentences_per_cue.max(1))
        .map(|chunk| {
            let joined = chunk.iter().map(|s| s.as_ref()).collect::<Vec<&str>>().join(" ");
            collapse_whitespace(&joined)
        })
        .filter(|text| !text.is_empty())
        .collect()
}
