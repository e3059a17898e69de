//! Word cleanup and per-run deduplication.

use csv::StringRecord;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

use crate::constants::{MIN_COLUMNS, POS_COLUMN, WORD_COLUMN};

/// Homograph numbering in the source dictionary ("배1", "배2", ...).
static TRAILING_DIGITS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+$").expect("valid trailing digit regex"));

/// The form of a raw dictionary word that gets stored: homograph number
/// removed, surrounding whitespace trimmed, case preserved.
pub fn clean_word(raw: &str) -> String {
    TRAILING_DIGITS_RE
        .replace(raw.trim(), "")
        .trim()
        .to_string()
}

/// Case-folded key used only to decide whether a word was already emitted.
pub fn comparison_key(cleaned: &str) -> String {
    cleaned.to_lowercase().trim().to_string()
}

/// What happened to a single record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// New unique word; carries the cleaned (unescaped) form.
    Accepted(String),
    Malformed,
    WrongPartOfSpeech,
    Empty,
    TooLong,
    Duplicate,
}

impl Verdict {
    /// Label used for skip counters and logs.
    pub fn reason(&self) -> &'static str {
        match self {
            Verdict::Accepted(_) => "accepted",
            Verdict::Malformed => "malformed",
            Verdict::WrongPartOfSpeech => "wrong_pos",
            Verdict::Empty => "empty",
            Verdict::TooLong => "too_long",
            Verdict::Duplicate => "duplicate",
        }
    }
}

/// Filters dictionary records down to unique words of one part of speech.
///
/// Owns the set of comparison keys seen so far, so a single instance must be
/// used for the whole run.
#[derive(Debug)]
pub struct WordFilter {
    target_pos: Option<String>,
    max_word_length: usize,
    seen: HashSet<String>,
}

impl WordFilter {
    pub fn new(target_pos: Option<&str>, max_word_length: usize) -> Self {
        Self {
            target_pos: target_pos.filter(|p| !p.is_empty()).map(str::to_string),
            max_word_length,
            seen: HashSet::new(),
        }
    }

    /// Number of unique words accepted so far.
    pub fn unique_count(&self) -> usize {
        self.seen.len()
    }

    pub fn evaluate(&mut self, record: &StringRecord) -> Verdict {
        if record.len() < MIN_COLUMNS {
            return Verdict::Malformed;
        }
        match (record.get(WORD_COLUMN), record.get(POS_COLUMN)) {
            (Some(word), Some(pos)) => self.evaluate_entry(word, pos),
            _ => Verdict::Malformed,
        }
    }

    /// Decide on a single `(word, part of speech)` pair.
    pub fn evaluate_entry(&mut self, raw_word: &str, pos: &str) -> Verdict {
        if let Some(target) = &self.target_pos {
            if pos != target {
                return Verdict::WrongPartOfSpeech;
            }
        }

        let cleaned = clean_word(raw_word);
        let key = comparison_key(&cleaned);

        if key.is_empty() {
            return Verdict::Empty;
        }
        // Lowercasing can change the length of a few characters, so bound both forms.
        if key.chars().count() > self.max_word_length
            || cleaned.chars().count() > self.max_word_length
        {
            return Verdict::TooLong;
        }
        if !self.seen.insert(key) {
            return Verdict::Duplicate;
        }

        Verdict::Accepted(cleaned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(fields: &[&str]) -> StringRecord {
        StringRecord::from(fields.to_vec())
    }

    #[test]
    fn test_clean_word_strips_homograph_number() {
        assert_eq!(clean_word("달1"), "달");
        assert_eq!(clean_word("배12"), "배");
        assert_eq!(clean_word("  Bus  "), "Bus");
        assert_eq!(clean_word("word 3 "), "word");
        assert_eq!(clean_word("12"), "");
        assert_eq!(clean_word("a1b"), "a1b");
    }

    #[test]
    fn test_comparison_key_folds_case() {
        assert_eq!(comparison_key("Bus"), "bus");
        assert_eq!(comparison_key("사과"), "사과");
    }

    #[test]
    fn test_filter_by_part_of_speech() {
        let mut filter = WordFilter::new(Some("명"), 100);
        assert_eq!(
            filter.evaluate(&record(&["_", "사과", "부"])),
            Verdict::WrongPartOfSpeech
        );
        // Tag comparison is exact
        assert_eq!(
            filter.evaluate(&record(&["_", "사과", " 명"])),
            Verdict::WrongPartOfSpeech
        );
        assert_eq!(
            filter.evaluate(&record(&["_", "사과", "명"])),
            Verdict::Accepted("사과".to_string())
        );
    }

    #[test]
    fn test_no_target_accepts_every_tag() {
        let mut filter = WordFilter::new(Some(""), 100);
        assert!(matches!(
            filter.evaluate(&record(&["_", "run", "동"])),
            Verdict::Accepted(_)
        ));
        let mut filter = WordFilter::new(None, 100);
        assert!(matches!(
            filter.evaluate(&record(&["_", "walk", "형"])),
            Verdict::Accepted(_)
        ));
    }

    #[test]
    fn test_duplicates_are_case_insensitive() {
        let mut filter = WordFilter::new(Some("명"), 100);
        assert_eq!(
            filter.evaluate_entry("Bus", "명"),
            Verdict::Accepted("Bus".to_string())
        );
        assert_eq!(filter.evaluate_entry("bus2", "명"), Verdict::Duplicate);
        assert_eq!(filter.evaluate_entry(" BUS ", "명"), Verdict::Duplicate);
        assert_eq!(filter.unique_count(), 1);
    }

    #[test]
    fn test_short_records_are_malformed() {
        let mut filter = WordFilter::new(Some("명"), 100);
        assert_eq!(filter.evaluate(&record(&["_", "달"])), Verdict::Malformed);
        assert_eq!(filter.evaluate(&record(&[])), Verdict::Malformed);
        assert_eq!(filter.unique_count(), 0);
    }

    #[test]
    fn test_empty_and_too_long() {
        let mut filter = WordFilter::new(None, 5);
        assert_eq!(filter.evaluate_entry("   ", "명"), Verdict::Empty);
        assert_eq!(filter.evaluate_entry("42", "명"), Verdict::Empty);
        assert_eq!(filter.evaluate_entry("abcdef", "명"), Verdict::TooLong);
        // Length counts characters, not bytes
        assert_eq!(
            filter.evaluate_entry("가나다라마", "명"),
            Verdict::Accepted("가나다라마".to_string())
        );
    }

    #[test]
    fn test_rejected_words_do_not_enter_seen_set() {
        let mut filter = WordFilter::new(None, 3);
        assert_eq!(filter.evaluate_entry("abcd", "명"), Verdict::TooLong);
        assert_eq!(filter.unique_count(), 0);
    }
}
