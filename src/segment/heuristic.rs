use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use super::SentenceSegmenter;

/// Tokens that end with a period without ending a sentence
pub static ABBREVIATIONS: &[&str] = &[
    "Mr", "Mrs", "Ms", "Dr", "Prof", "Sr", "Jr", "St", "Mt", "Msgr", "Messrs", "vs", "etc", "e.g",
    "i.e", "cf", "al",
];

/// Sentence terminator (or line break) followed by whitespace
static BOUNDARY_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?\n]\s+").unwrap());

static ABBREVIATION_END_REGEX: Lazy<Regex> = Lazy::new(|| {
    let alternatives = ABBREVIATIONS
        .iter()
        .map(|token| regex::escape(token))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\b(?:{})\.$", alternatives)).unwrap()
});

static DIGIT_PERIOD_END_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d\.$").unwrap());

static DIGIT_START_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d").unwrap());

static ORDINAL_END_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bNo\.$").unwrap());

/// Why a punctuation split was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FalseBoundary {
    /// `Dr.`, `etc.`, `e.g.` and the rest of the abbreviation table
    Abbreviation,
    /// `3.` followed by `14`
    Decimal,
    /// `..` continuation
    Ellipsis,
    /// `No.` used as "number"
    Ordinal,
}

impl FalseBoundary {
    /// Check whether the split between `current` and `next` is not a real sentence end
    pub fn detect(current: &str, next: &str) -> Option<Self> {
        if ABBREVIATION_END_REGEX.is_match(current) {
            Some(FalseBoundary::Abbreviation)
        } else if DIGIT_PERIOD_END_REGEX.is_match(current) && DIGIT_START_REGEX.is_match(next) {
            Some(FalseBoundary::Decimal)
        } else if current.ends_with("..") {
            Some(FalseBoundary::Ellipsis)
        } else if ORDINAL_END_REGEX.is_match(current) {
            Some(FalseBoundary::Ordinal)
        } else {
            None
        }
    }
}

/// Punctuation-driven segmentation with abbreviation, decimal and ellipsis awareness
pub struct HeuristicSegmenter;

impl HeuristicSegmenter {
    /// Break after every terminator that is followed by whitespace
    fn split_candidates(text: &str) -> Vec<&str> {
        let mut pieces = Vec::new();
        let mut start = 0;

        for boundary in BOUNDARY_REGEX.find_iter(text) {
            // terminators are single-byte ASCII, so this stays on a char boundary
            pieces.push(&text[start..boundary.start() + 1]);
            start = boundary.end();
        }
        pieces.push(&text[start..]);

        pieces
            .into_iter()
            .map(str::trim)
            .filter(|piece| !piece.is_empty())
            .collect()
    }

    /// Re-join candidates whose separating split was a false boundary
    fn merge_false_boundaries(pieces: Vec<&str>) -> Vec<String> {
        let mut pieces = pieces.into_iter();
        let Some(first) = pieces.next() else {
            return Vec::new();
        };

        let mut sentences = Vec::new();
        let mut current = first.to_string();

        for next in pieces {
            match FalseBoundary::detect(&current, next) {
                Some(reason) => {
                    trace!("Merging across {:?} boundary before '{}'", reason, next);
                    current.push(' ');
                    current.push_str(next);
                }
                None => sentences.push(std::mem::replace(&mut current, next.to_string())),
            }
        }
        sentences.push(current);

        sentences
    }
}

impl SentenceSegmenter for HeuristicSegmenter {
    fn segment(&self, text: &str) -> Vec<String> {
        Self::merge_false_boundaries(Self::split_candidates(text))
    }
}
