//! The stateful password generator.

use tracing::debug;

use super::assemble::{Draws, assemble};
use crate::config::{self, Config, PartialConfig};
use crate::entropy::{self, EntropySettings, EntropyStats};
use crate::rand::{OsRandom, RandomCache, RandomSource};
use crate::words::{DefaultDictionary, Dictionary, WordCache};
use crate::Result;

/// Owns a configuration, a dictionary and a random source, and turns them
/// into passwords.
///
/// Every update is validated before it is committed, a failed update
/// leaves the previous state in place.
pub struct Generator {
    config: Config,
    dictionary: Box<dyn Dictionary>,
    words: WordCache,
    rng: Box<dyn RandomSource>,
    cache: RandomCache,
    entropy: EntropySettings,
    stats: EntropyStats,
    generated: usize,
}

impl Generator {
    pub fn new(
        config: Config,
        dictionary: Box<dyn Dictionary>,
        rng: Box<dyn RandomSource>,
    ) -> Result<Self> {
        Self::with_settings(config, dictionary, rng, EntropySettings::default())
    }

    pub fn with_settings(
        config: Config,
        dictionary: Box<dyn Dictionary>,
        rng: Box<dyn RandomSource>,
        entropy: EntropySettings,
    ) -> Result<Self> {
        config::validate(&config)?;
        let words = WordCache::build(dictionary.as_ref(), &config)?;
        let stats = entropy::update_cache(&config, &words, &entropy);
        let cache = RandomCache::new(config.random_draws_required());
        Ok(Self {
            config,
            dictionary,
            words,
            rng,
            cache,
            entropy,
            stats,
            generated: 0,
        })
    }

    /// Generator for a named preset with optional overrides.
    pub fn with_preset(
        name: &str,
        overrides: Option<&PartialConfig>,
        dictionary: Box<dyn Dictionary>,
        rng: Box<dyn RandomSource>,
    ) -> Result<Self> {
        Self::new(config::preset(name, overrides)?, dictionary, rng)
    }

    /// `DEFAULT` preset, built-in dictionary, operating system randomness.
    pub fn default_preset() -> Result<Self> {
        Self::with_preset(
            config::presets::DEFAULT_PRESET,
            None,
            Box::new(DefaultDictionary),
            Box::new(OsRandom::new()),
        )
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn stats(&self) -> &EntropyStats {
        &self.stats
    }

    pub fn word_cache(&self) -> &WordCache {
        &self.words
    }

    pub fn entropy_settings(&self) -> &EntropySettings {
        &self.entropy
    }

    pub fn random_source_name(&self) -> &str {
        self.rng.name()
    }

    pub fn dictionary_source(&self) -> String {
        self.dictionary.source()
    }

    /// Passwords successfully generated by this instance.
    pub fn passwords_generated(&self) -> usize {
        self.generated
    }

    // =========================================================================
    // Updates
    // =========================================================================

    /// Replace the configuration.
    pub fn set_config(&mut self, config: Config) -> Result<()> {
        config::validate(&config)?;
        let words = if self.words.fits(&config) {
            None
        } else {
            Some(self.words.refilter(&config)?)
        };

        // Everything that can fail has succeeded, commit.
        if let Some(words) = words {
            self.words = words;
        }
        self.cache.set_batch(config.random_draws_required());
        self.config = config;
        self.refresh_stats();
        Ok(())
    }

    /// Apply overrides to the current configuration.
    pub fn update_config(&mut self, overrides: &PartialConfig) -> Result<()> {
        let config = config::merge_overrides(&self.config, overrides)?;
        self.set_config(config)
    }

    /// Replace the dictionary and rebuild the word cache from it.
    pub fn set_dictionary(&mut self, dictionary: Box<dyn Dictionary>) -> Result<()> {
        let words = WordCache::build(dictionary.as_ref(), &self.config)?;
        self.dictionary = dictionary;
        self.words = words;
        self.refresh_stats();
        Ok(())
    }

    /// Swap the random source, discarding numbers buffered from the old one.
    pub fn set_random_source(&mut self, rng: Box<dyn RandomSource>) {
        debug!(from = self.rng.name(), to = rng.name(), "switching random source");
        self.rng = rng;
        self.cache.clear();
    }

    pub fn set_entropy_settings(&mut self, entropy: EntropySettings) {
        self.entropy = entropy;
        self.refresh_stats();
    }

    fn refresh_stats(&mut self) {
        self.stats = entropy::update_cache(&self.config, &self.words, &self.entropy);
    }

    // =========================================================================
    // Generation
    // =========================================================================

    /// Generate one password.
    pub fn password(&mut self) -> Result<String> {
        let mut draws = Draws::new(&mut self.cache, self.rng.as_mut());
        let password = assemble(&self.config, self.words.words(), &mut draws)?;
        self.generated += 1;
        Ok(password)
    }

    /// Generate `count` passwords, or none if any of them fails.
    pub fn passwords(&mut self, count: usize) -> Result<Vec<String>> {
        let mut passwords = Vec::with_capacity(count);
        let mut draws = Draws::new(&mut self.cache, self.rng.as_mut());
        for _ in 0..count {
            match assemble(&self.config, self.words.words(), &mut draws) {
                Ok(password) => passwords.push(password),
                Err(e) => {
                    zeroize::Zeroize::zeroize(&mut passwords);
                    return Err(e);
                }
            }
        }
        self.generated += count;
        Ok(passwords)
    }

    /// Multi-line summary of the generator's state.
    pub fn status(&self) -> String {
        let stats = &self.stats;
        let mut lines = vec![
            format!("Dictionary: {}", self.dictionary.source()),
            format!(
                "Words: {} of {} usable ({}-{} characters)",
                self.words.len(),
                self.words.all_words().len(),
                self.config.word_length_min,
                self.config.word_length_max
            ),
        ];
        if self.words.contains_accents() {
            lines.push("Words contain accented letters".into());
        }
        lines.extend([
            format!("Random source: {}", self.rng.name()),
            format!(
                "Length: {} to {} characters, {} random draws each",
                stats.length.length_min,
                stats.length.length_max,
                stats.length.random_draws_required
            ),
            format!(
                "Blind entropy: {:.2} to {:.2} bits (alphabet of {})",
                stats.blind.entropy_min, stats.blind.entropy_max, stats.blind.alphabet_size
            ),
            format!("Seen entropy: {:.2} bits", stats.seen.entropy),
            format!("Passwords generated: {}", self.generated),
        ]);
        lines.join("\n")
    }
}

impl std::fmt::Debug for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Generator")
            .field("config", &self.config)
            .field("dictionary", &self.dictionary.source())
            .field("words", &self.words.len())
            .field("rng", &self.rng.name())
            .field("generated", &self.generated)
            .finish()
    }
}
