//! Word filtering by grapheme length and accents.

use std::collections::HashSet;

use tracing::debug;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;
use unicode_segmentation::UnicodeSegmentation;

use super::Dictionary;
use crate::config::Config;
use crate::{Error, Result};

/// Smallest filtered word list passwords can be built from.
pub const MIN_WORDS: usize = 1;

/// Length in user-perceived characters.
pub fn grapheme_len(s: &str) -> usize {
    s.graphemes(true).count()
}

/// Remove diacritics, e.g. `crème` becomes `creme`.
pub fn strip_accents(s: &str) -> String {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .nfc()
        .collect()
}

/// Whether any word changes when its accents are stripped.
pub fn contains_accents(words: &[String]) -> bool {
    words.iter().any(|w| {
        let composed: String = w.nfc().collect();
        strip_accents(&composed) != composed
    })
}

/// Keep words whose grapheme length lies in `min..=max`.
///
/// Words are trimmed and normalised first, accents are stripped unless
/// `allow_accents` is set. Non-alphabetic entries and duplicates are
/// dropped so the result is the real pool passwords are drawn from.
pub fn filter(words: &[String], min: usize, max: usize, allow_accents: bool) -> Result<Vec<String>> {
    let mut seen = HashSet::new();
    let mut kept = Vec::new();

    for word in words {
        let word = word.trim();
        let candidate: String = if allow_accents {
            word.nfc().collect()
        } else {
            strip_accents(word)
        };

        if candidate.is_empty()
            || !candidate
                .chars()
                .all(|c| c.is_alphabetic() || is_combining_mark(c))
        {
            continue;
        }

        let len = grapheme_len(&candidate);
        if len < min || len > max {
            continue;
        }

        if seen.insert(candidate.clone()) {
            kept.push(candidate);
        }
    }

    if kept.len() < MIN_WORDS {
        return Err(Error::InsufficientWords {
            found: kept.len(),
            required: MIN_WORDS,
            min,
            max,
        });
    }
    Ok(kept)
}

// =============================================================================
// Word cache
// =============================================================================

/// Words from a dictionary, filtered for one configuration.
#[derive(Debug, Clone)]
pub struct WordCache {
    all: Vec<String>,
    filtered: Vec<String>,
    accents: bool,
    source: String,
    min: usize,
    max: usize,
    allow_accents: bool,
}

impl WordCache {
    pub fn build(dictionary: &dyn Dictionary, config: &Config) -> Result<Self> {
        Self::from_words(dictionary.source(), dictionary.word_list().to_vec(), config)
    }

    pub fn from_words(source: String, all: Vec<String>, config: &Config) -> Result<Self> {
        let filtered = filter(
            &all,
            config.word_length_min,
            config.word_length_max,
            config.allow_accents,
        )?;
        let accents = contains_accents(&filtered);
        debug!(
            source = %source,
            total = all.len(),
            usable = filtered.len(),
            accents,
            "built word cache"
        );
        Ok(Self {
            all,
            filtered,
            accents,
            source,
            min: config.word_length_min,
            max: config.word_length_max,
            allow_accents: config.allow_accents,
        })
    }

    /// Filter the same dictionary words again for a new configuration.
    pub fn refilter(&self, config: &Config) -> Result<Self> {
        Self::from_words(self.source.clone(), self.all.clone(), config)
    }

    /// Whether this cache already matches the filtering keys of `config`.
    pub fn fits(&self, config: &Config) -> bool {
        self.min == config.word_length_min
            && self.max == config.word_length_max
            && self.allow_accents == config.allow_accents
    }

    pub fn words(&self) -> &[String] {
        &self.filtered
    }

    pub fn all_words(&self) -> &[String] {
        &self.all
    }

    pub fn len(&self) -> usize {
        self.filtered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filtered.is_empty()
    }

    /// Whether accented letters survived filtering.
    pub fn contains_accents(&self) -> bool {
        self.accents
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn keeps_words_within_length_bounds() {
        let words = owned(&["cat", "blue", "ruby", "minty", "elephant"]);
        assert_eq!(filter(&words, 4, 5, false).unwrap(), owned(&["blue", "ruby", "minty"]));
    }

    #[test]
    fn counts_graphemes_not_bytes() {
        // "e" + combining acute accent is one grapheme but three bytes.
        let word = "cafe\u{301}";
        assert_eq!(grapheme_len(word), 4);
        assert_eq!(grapheme_len("naïve"), 5);
        let words = owned(&[word]);
        assert_eq!(filter(&words, 4, 4, true).unwrap(), owned(&["café"]));
    }

    #[test]
    fn strips_accents_unless_allowed() {
        let words = owned(&["crème", "brûlée", "plain"]);
        assert_eq!(
            filter(&words, 4, 8, false).unwrap(),
            owned(&["creme", "brulee", "plain"])
        );
        assert_eq!(filter(&words, 4, 8, true).unwrap(), owned(&["crème", "brûlée", "plain"]));
    }

    #[test]
    fn stripping_can_create_duplicates() {
        let words = owned(&["resume", "résumé"]);
        assert_eq!(filter(&words, 4, 8, false).unwrap(), owned(&["resume"]));
        assert_eq!(filter(&words, 4, 8, true).unwrap().len(), 2);
    }

    #[test]
    fn drops_non_alphabetic_entries() {
        let words = owned(&["don't", "well-known", "abc1", "  good  ", ""]);
        assert_eq!(filter(&words, 4, 10, false).unwrap(), owned(&["good"]));
    }

    #[test]
    fn empty_result_is_an_error() {
        let words = owned(&["cat", "dog"]);
        assert!(matches!(
            filter(&words, 4, 8, false),
            Err(Error::InsufficientWords { found: 0, min: 4, max: 8, .. })
        ));
    }

    #[test]
    fn detects_accents() {
        assert!(contains_accents(&owned(&["plain", "café"])));
        assert!(!contains_accents(&owned(&["plain", "cafe"])));
    }
}
