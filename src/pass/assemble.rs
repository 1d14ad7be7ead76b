//! Password assembly.

use std::collections::BTreeMap;

use unicode_segmentation::UnicodeSegmentation;
use zeroize::Zeroize;

use super::case;
use crate::config::{
    CaseTransform, Config, Key, PaddingCharacter, PaddingType, Separator, SubstitutionMode,
};
use crate::error::{ConfigError, RngError};
use crate::rand::{RandomCache, RandomSource};
use crate::words::grapheme_len;
use crate::{Error, Result};

/// Random draws for one password: the cache plus the source refilling it.
pub struct Draws<'a> {
    cache: &'a mut RandomCache,
    rng: &'a mut dyn RandomSource,
}

impl<'a> Draws<'a> {
    pub fn new(cache: &'a mut RandomCache, rng: &'a mut dyn RandomSource) -> Self {
        Self { cache, rng }
    }

    pub fn int(&mut self, max: usize) -> std::result::Result<usize, RngError> {
        self.cache.next_int(self.rng, max)
    }

    /// Unbiased coin, `true` on an even draw.
    pub fn coin(&mut self) -> std::result::Result<bool, RngError> {
        Ok(self.int(2)? == 0)
    }

    pub fn pick<T: Copy>(&mut self, items: &[T]) -> std::result::Result<T, RngError> {
        let idx = self.int(items.len())?;
        Ok(items[idx])
    }

    pub fn digits(&mut self, count: usize) -> std::result::Result<String, RngError> {
        self.cache.next_digits(self.rng, count)
    }
}

/// Build one password from `config` and the filtered `words`.
///
/// Steps run in a fixed order: pick words, transform case, substitute,
/// choose separator, join, add digits, choose padding character, pad.
pub fn assemble(config: &Config, words: &[String], draws: &mut Draws) -> Result<String> {
    if words.is_empty() {
        return Err(Error::InsufficientWords {
            found: 0,
            required: crate::words::MIN_WORDS,
            min: config.word_length_min,
            max: config.word_length_max,
        });
    }

    let mut chosen = Vec::with_capacity(config.num_words);
    for _ in 0..config.num_words {
        chosen.push(words[draws.int(words.len())?].clone());
    }

    transform_case(&mut chosen, config.case_transform, draws)?;

    if let Some(subs) = config.active_substitutions() {
        substitute(&mut chosen, subs, config.substitution_mode(), draws)?;
    }

    let separator = match config.separator_character {
        Separator::None => String::new(),
        Separator::Char(c) => c.to_string(),
        Separator::Random => {
            let alphabet = config
                .separator_alphabet()
                .filter(|a| !a.is_empty())
                .ok_or(ConfigError::MissingKey(Key::SeparatorAlphabet))?;
            draws.pick(alphabet)?.to_string()
        }
    };

    let mut password = chosen.join(&separator);
    chosen.zeroize();

    if config.padding_digits_before > 0 {
        let mut digits = draws.digits(config.padding_digits_before)?;
        password = format!("{digits}{separator}{password}");
        digits.zeroize();
    }
    if config.padding_digits_after > 0 {
        let mut digits = draws.digits(config.padding_digits_after)?;
        password.push_str(&separator);
        password.push_str(&digits);
        digits.zeroize();
    }

    if config.padding_type == PaddingType::None {
        return Ok(password);
    }

    let padding = match config.padding_character {
        Some(PaddingCharacter::Char(c)) => c.to_string(),
        Some(PaddingCharacter::Separator) => separator.clone(),
        Some(PaddingCharacter::Random) => {
            let alphabet = config
                .padding_alphabet()
                .filter(|a| !a.is_empty())
                .ok_or(ConfigError::MissingKey(Key::PaddingAlphabet))?;
            draws.pick(alphabet)?.to_string()
        }
        None => String::new(),
    };

    match config.padding_type {
        PaddingType::Fixed => {
            let before = padding.repeat(config.padding_characters_before.unwrap_or_default());
            let after = padding.repeat(config.padding_characters_after.unwrap_or_default());
            password = format!("{before}{password}{after}");
        }
        PaddingType::Adaptive => {
            let target = config.pad_to_length.unwrap_or_default();
            pad_or_truncate(&mut password, &padding, target);
        }
        PaddingType::None => {}
    }

    Ok(password)
}

fn transform_case(words: &mut [String], transform: CaseTransform, draws: &mut Draws) -> Result<()> {
    match transform {
        CaseTransform::Alternate => {
            // One coin per password picks which parity is lower case.
            let lower_even = draws.coin()?;
            for (i, word) in words.iter_mut().enumerate() {
                let lower = (i % 2 == 0) == lower_even;
                *word = if lower {
                    word.to_lowercase()
                } else {
                    word.to_uppercase()
                };
            }
        }
        CaseTransform::Random => {
            for word in words.iter_mut() {
                *word = if draws.coin()? {
                    word.to_uppercase()
                } else {
                    word.to_lowercase()
                };
            }
        }
        fixed => {
            for word in words.iter_mut() {
                *word = case::apply(word, fixed);
            }
        }
    }
    Ok(())
}

fn substitute(
    words: &mut [String],
    subs: &BTreeMap<String, String>,
    mode: SubstitutionMode,
    draws: &mut Draws,
) -> Result<()> {
    for word in words.iter_mut() {
        for (letter, replacement) in subs {
            let apply = match mode {
                SubstitutionMode::Always => true,
                SubstitutionMode::Never => false,
                SubstitutionMode::Random => draws.coin()?,
            };
            if apply {
                *word = word.replace(letter.as_str(), replacement);
            }
        }
    }
    Ok(())
}

/// Append `padding` until `password` is `target` graphemes long, or cut
/// it down to `target` graphemes. Truncation may cut into words and digits.
fn pad_or_truncate(password: &mut String, padding: &str, target: usize) {
    let len = grapheme_len(password);
    if len < target {
        password.push_str(&padding.repeat(target - len));
    } else if len > target {
        let end = password
            .grapheme_indices(true)
            .nth(target)
            .map_or(password.len(), |(idx, _)| idx);
        password.truncate(end);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rand::FixedRandom;

    fn config() -> Config {
        Config {
            word_length_min: 4,
            word_length_max: 4,
            num_words: 3,
            case_transform: CaseTransform::None,
            separator_character: Separator::Char('-'),
            padding_type: PaddingType::None,
            padding_digits_before: 0,
            padding_digits_after: 0,
            padding_character: None,
            padding_characters_before: None,
            padding_characters_after: None,
            pad_to_length: None,
            symbol_alphabet: None,
            separator_alphabet: None,
            padding_alphabet: None,
            character_substitutions: None,
            substitution_mode: None,
            allow_accents: false,
        }
    }

    fn words() -> Vec<String> {
        vec!["blue".into(), "ruby".into(), "mint".into()]
    }

    fn run(config: &Config, numbers: Vec<f64>) -> String {
        let mut rng = FixedRandom::new(numbers);
        let mut cache = RandomCache::new(config.random_draws_required());
        assemble(config, &words(), &mut Draws::new(&mut cache, &mut rng)).unwrap()
    }

    #[test]
    fn zero_draws_pick_the_first_word() {
        assert_eq!(run(&config(), vec![0.0]), "blue-blue-blue");
    }

    #[test]
    fn draws_select_words_in_order() {
        // floor(f * 1e6) % 3
        assert_eq!(run(&config(), vec![0.000_001_5, 0.000_002_5, 0.0]), "ruby-mint-blue");
    }

    #[test]
    fn alternate_uses_one_coin_for_parity() {
        let mut config = config();
        config.case_transform = CaseTransform::Alternate;
        // Words take three draws, the fourth is the parity coin.
        assert_eq!(run(&config, vec![0.0, 0.0, 0.0, 0.0]), "blue-BLUE-blue");
        assert_eq!(run(&config, vec![0.0, 0.0, 0.0, 0.000_001_5]), "BLUE-blue-BLUE");
    }

    #[test]
    fn random_case_flips_per_word() {
        let mut config = config();
        config.case_transform = CaseTransform::Random;
        let numbers = vec![0.0, 0.0, 0.0, 0.0, 0.000_001_5, 0.0];
        assert_eq!(run(&config, numbers), "BLUE-blue-BLUE");
    }

    #[test]
    fn substitutions_always_and_random() {
        let mut config = config();
        let mut subs = BTreeMap::new();
        subs.insert("u".to_string(), "|_|".to_string());
        config.character_substitutions = Some(subs);
        assert_eq!(run(&config, vec![0.0]), "bl|_|e-bl|_|e-bl|_|e");

        config.substitution_mode = Some(SubstitutionMode::Never);
        assert_eq!(run(&config, vec![0.0]), "blue-blue-blue");

        config.substitution_mode = Some(SubstitutionMode::Random);
        // Three word draws, then one coin per word.
        let numbers = vec![0.0, 0.0, 0.0, 0.000_001_5, 0.0, 0.000_001_5];
        assert_eq!(run(&config, numbers), "blue-bl|_|e-blue");
    }

    #[test]
    fn random_separator_and_digits() {
        let mut config = config();
        config.separator_character = Separator::Random;
        config.separator_alphabet = Some(vec!['.', '+']);
        config.padding_digits_before = 2;
        config.padding_digits_after = 1;
        // words, separator '+', digits 7 4 | 9
        let numbers = vec![0.0, 0.0, 0.0, 0.000_001_5, 0.000_007_5, 0.000_004_5, 0.000_009_5];
        assert_eq!(run(&config, numbers), "74+blue+blue+blue+9");
    }

    #[test]
    fn fixed_padding_wraps_password() {
        let mut config = config();
        config.padding_type = PaddingType::Fixed;
        config.padding_character = Some(PaddingCharacter::Char('*'));
        config.padding_characters_before = Some(1);
        config.padding_characters_after = Some(3);
        assert_eq!(run(&config, vec![0.0]), "*blue-blue-blue***");
    }

    #[test]
    fn separator_padding_reuses_the_separator() {
        let mut config = config();
        config.padding_type = PaddingType::Fixed;
        config.padding_character = Some(PaddingCharacter::Separator);
        config.padding_characters_before = Some(2);
        config.padding_characters_after = Some(0);
        assert_eq!(run(&config, vec![0.0]), "--blue-blue-blue");
    }

    #[test]
    fn adaptive_padding_extends_to_target() {
        let mut config = config();
        config.padding_type = PaddingType::Adaptive;
        config.padding_character = Some(PaddingCharacter::Char('!'));
        config.pad_to_length = Some(20);
        assert_eq!(run(&config, vec![0.0]), "blue-blue-blue!!!!!!");
    }

    #[test]
    fn adaptive_padding_truncates_without_padding() {
        let mut config = config();
        config.padding_type = PaddingType::Adaptive;
        config.padding_character = Some(PaddingCharacter::Char('!'));
        config.pad_to_length = Some(12);
        assert_eq!(run(&config, vec![0.0]), "blue-blue-bl");
    }

    #[test]
    fn truncation_counts_graphemes() {
        let mut password = "cafe\u{301}-cafe\u{301}".to_string();
        pad_or_truncate(&mut password, "!", 4);
        assert_eq!(password, "cafe\u{301}");
    }

    #[test]
    fn empty_word_list_fails() {
        let mut rng = FixedRandom::zero();
        let mut cache = RandomCache::default();
        let result = assemble(&config(), &[], &mut Draws::new(&mut cache, &mut rng));
        assert!(matches!(result, Err(Error::InsufficientWords { .. })));
    }
}
