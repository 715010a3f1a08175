use crate::config::MIN_LINE_LENGTH;
use crate::text::collapse_whitespace;

/// One packed display line
#[derive(Debug, Clone, PartialEq, Eq)]
struct PackedLine {
    text: String,
    chars: usize,
    /// Continues a hard-split word from the previous line, so no space separates them
    glued: bool,
}

impl PackedLine {
    fn new(text: String, glued: bool) -> Self {
        let chars = text.chars().count();
        Self { text, chars, glued }
    }
}

/// Fold `text` into at most `max_lines` display lines without dropping any characters
///
/// Words are packed greedily up to `max_line_length` characters; a word longer than
/// that is cut at exact `max_line_length` boundaries. When more lines are needed than
/// allowed, the final line absorbs the rest and may run past `max_line_length`.
pub fn wrap_text(text: &str, max_line_length: usize, max_lines: usize) -> Vec<String> {
    if max_lines == 0 {
        return vec![collapse_whitespace(text)];
    }

    let max_line_length = max_line_length.max(MIN_LINE_LENGTH);
    let lines = pack_lines(text, max_line_length);
    if lines.is_empty() {
        return vec![String::new()];
    }

    absorb_overflow(lines, max_lines)
}

/// Greedy left fold of the words into lines, with no limit on the line count
fn pack_lines(text: &str, max_line_length: usize) -> Vec<PackedLine> {
    text.split_whitespace()
        .fold(Vec::new(), |mut lines: Vec<PackedLine>, word| {
            let word_chars = word.chars().count();

            if word_chars > max_line_length {
                lines.extend(
                    split_long_word(word, max_line_length)
                        .into_iter()
                        .enumerate()
                        .map(|(i, chunk)| PackedLine::new(chunk, i > 0)),
                );
                return lines;
            }

            match lines.last_mut() {
                Some(line) if line.chars + 1 + word_chars <= max_line_length => {
                    line.text.push(' ');
                    line.text.push_str(word);
                    line.chars += 1 + word_chars;
                }
                _ => lines.push(PackedLine::new(word.to_string(), false)),
            }
            lines
        })
}

/// Cut a word into consecutive chunks of exactly `max_line_length` characters (the last may be shorter)
fn split_long_word(word: &str, max_line_length: usize) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    chars
        .chunks(max_line_length)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

/// Keep the first `max_lines - 1` lines and merge everything after them into the last one
fn absorb_overflow(lines: Vec<PackedLine>, max_lines: usize) -> Vec<String> {
    if lines.len() <= max_lines {
        return lines.into_iter().map(|line| line.text).collect();
    }

    let mut lines = lines.into_iter();
    let mut kept: Vec<String> = lines.by_ref().take(max_lines - 1).map(|line| line.text).collect();

    let last = lines.fold(String::new(), |mut merged, line| {
        if !merged.is_empty() && !line.glued {
            merged.push(' ');
        }
        merged.push_str(&line.text);
        merged
    });
    kept.push(last);

    kept
}
