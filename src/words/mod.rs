//! Dictionary sources and the filtered word cache.

mod filter;

use std::fs;
use std::path::Path;
use std::sync::OnceLock;

pub use filter::{
    MIN_WORDS, WordCache, contains_accents, filter, grapheme_len, strip_accents,
};

/// A source of candidate words.
pub trait Dictionary {
    /// Every word the source offers, unfiltered.
    fn word_list(&self) -> &[String];

    /// Human readable label, shown in statistics.
    fn source(&self) -> String;
}

impl<D: Dictionary + ?Sized> Dictionary for Box<D> {
    fn word_list(&self) -> &[String] {
        (**self).word_list()
    }

    fn source(&self) -> String {
        (**self).source()
    }
}

// =============================================================================
// Sources
// =============================================================================

/// Words held in memory.
#[derive(Debug, Clone)]
pub struct WordList {
    words: Vec<String>,
    source: String,
}

impl WordList {
    pub fn new(source: impl Into<String>, words: Vec<String>) -> Self {
        Self {
            words,
            source: source.into(),
        }
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new("word list", words.into_iter().map(Into::into).collect())
    }
}

impl Dictionary for WordList {
    fn word_list(&self) -> &[String] {
        &self.words
    }

    fn source(&self) -> String {
        self.source.clone()
    }
}

/// A text file with one word per line.
///
/// Blank lines and lines starting with `#` are skipped.
#[derive(Debug, Clone)]
pub struct FileDictionary {
    words: Vec<String>,
    path: String,
}

impl FileDictionary {
    pub fn open(path: impl AsRef<Path>) -> crate::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let words = parse_lines(&content);
        tracing::debug!(path = %path.display(), count = words.len(), "loaded dictionary");
        Ok(Self {
            words,
            path: path.display().to_string(),
        })
    }
}

impl Dictionary for FileDictionary {
    fn word_list(&self) -> &[String] {
        &self.words
    }

    fn source(&self) -> String {
        format!("file {}", self.path)
    }
}

const DEFAULT_WORDS_RAW: &str = include_str!("default.txt");

static DEFAULT_WORDS: OnceLock<Vec<String>> = OnceLock::new();

/// The built-in English word list.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultDictionary;

impl Dictionary for DefaultDictionary {
    fn word_list(&self) -> &[String] {
        DEFAULT_WORDS.get_or_init(|| parse_lines(DEFAULT_WORDS_RAW))
    }

    fn source(&self) -> String {
        "built-in English word list".into()
    }
}

fn parse_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_dictionary_has_words_for_every_preset() {
        let words = DefaultDictionary.word_list();
        assert!(words.len() > 500);
        assert!(words.iter().all(|w| !w.is_empty() && !w.starts_with('#')));
        for name in crate::config::preset_names() {
            let config = crate::config::preset(name, None).unwrap();
            let cache = WordCache::build(&DefaultDictionary, &config).unwrap();
            assert!(cache.len() >= 100, "{name}: {}", cache.len());
        }
    }

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let words = parse_lines("# header\n\napple\n  banana  \n#skip\ncherry\n");
        assert_eq!(words, vec!["apple", "banana", "cherry"]);
    }

    #[test]
    fn boxed_dictionaries_delegate() {
        let dictionary: Box<dyn Dictionary> = Box::new(WordList::from_words(["alpha", "bravo"]));
        assert_eq!(dictionary.word_list().len(), 2);
        assert_eq!(dictionary.source(), "word list");
    }
}
