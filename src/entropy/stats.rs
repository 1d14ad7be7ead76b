//! Length bounds and permutation counts.

use num_bigint::BigUint;
use num_traits::{One, ToPrimitive, Zero};
use tracing::warn;

use crate::config::{CaseTransform, Config, PaddingCharacter, PaddingType, Separator, SubstitutionMode};
use crate::words::{WordCache, grapheme_len};

const LOWER_LETTERS: u32 = 26;
const UPPER_LETTERS: u32 = 26;
const DIGITS: u32 = 10;
const SYMBOLS: u32 = 33;

/// Password length range and random draws for a configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthStats {
    pub length_min: usize,
    pub length_max: usize,
    pub random_draws_required: usize,
    /// Multi-character substitutions may push passwords past `length_max`.
    pub length_max_underestimated: bool,
}

/// Brute force figures for an attacker who knows nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct BlindStats {
    pub alphabet_size: u32,
    pub permutations_min: BigUint,
    pub permutations_max: BigUint,
    pub permutations_avg: BigUint,
    pub entropy_min: f64,
    pub entropy_max: f64,
    pub entropy_avg: f64,
}

/// Figures for an attacker who knows the configuration and dictionary.
#[derive(Debug, Clone, PartialEq)]
pub struct SeenStats {
    pub permutations: BigUint,
    pub entropy: f64,
}

/// Password length bounds for `config`.
///
/// Multi-character substitutions can make passwords longer than the
/// reported maximum unless padding is adaptive. Such configurations are
/// flagged and a warning is logged.
pub fn config_stats(config: &Config) -> LengthStats {
    let random_draws_required = config.random_draws_required();

    if config.padding_type == PaddingType::Adaptive {
        let target = config.pad_to_length.unwrap_or_default();
        return LengthStats {
            length_min: target,
            length_max: target,
            random_draws_required,
            length_max_underestimated: false,
        };
    }

    let length_max_underestimated = config
        .active_substitutions()
        .is_some_and(|subs| subs.values().any(|s| grapheme_len(s) > 1));
    if length_max_underestimated {
        warn!("character substitutions longer than one character, maximum length may be underestimated");
    }

    let mut base = config.padding_digits_before + config.padding_digits_after;
    if config.padding_type == PaddingType::Fixed {
        base += config.padding_characters_before.unwrap_or_default()
            + config.padding_characters_after.unwrap_or_default();
    }
    if config.separator_character != Separator::None {
        let mut separators = config.num_words - 1;
        if config.padding_digits_before > 0 {
            separators += 1;
        }
        if config.padding_digits_after > 0 {
            separators += 1;
        }
        base += separators;
    }

    LengthStats {
        length_min: base + config.num_words * config.word_length_min,
        length_max: base + config.num_words * config.word_length_max,
        random_draws_required,
        length_max_underestimated,
    }
}

/// Size of the generic alphabet a blind attacker has to search.
pub fn blind_alphabet_size(config: &Config, words: &WordCache) -> u32 {
    let mut size = LOWER_LETTERS;
    if config.case_transform.is_mixed() {
        size += UPPER_LETTERS;
    }
    if config.padding_digits_before + config.padding_digits_after > 0 {
        size += DIGITS;
    }
    if symbols_present(config) || words.contains_accents() {
        size += SYMBOLS;
    }
    size
}

fn has_symbol(chars: &[char]) -> bool {
    chars.iter().any(|c| !c.is_alphanumeric())
}

fn symbols_present(config: &Config) -> bool {
    let separator = match config.separator_character {
        Separator::None => false,
        Separator::Char(c) => !c.is_alphanumeric(),
        Separator::Random => config.separator_alphabet().is_some_and(has_symbol),
    };
    let padding = config.padding_type != PaddingType::None
        && match config.padding_character {
            Some(PaddingCharacter::Char(c)) => !c.is_alphanumeric(),
            Some(PaddingCharacter::Random) => config.padding_alphabet().is_some_and(has_symbol),
            Some(PaddingCharacter::Separator) => separator,
            None => false,
        };
    separator || padding
}

/// Blind brute force statistics over the configuration's length range.
pub fn blind_entropy(config: &Config, words: &WordCache) -> BlindStats {
    let lengths = config_stats(config);
    let alphabet_size = blind_alphabet_size(config, words);
    let alphabet = BigUint::from(alphabet_size);

    let avg_len = (lengths.length_min + lengths.length_max).div_ceil(2);
    let permutations_min = pow(&alphabet, lengths.length_min);
    let permutations_max = pow(&alphabet, lengths.length_max);
    let permutations_avg = pow(&alphabet, avg_len);

    BlindStats {
        alphabet_size,
        entropy_min: log2_big(&permutations_min),
        entropy_max: log2_big(&permutations_max),
        entropy_avg: log2_big(&permutations_avg),
        permutations_min,
        permutations_max,
        permutations_avg,
    }
}

/// Statistics for an attacker who knows the configuration and word list.
pub fn seen_entropy(config: &Config, words: &WordCache) -> SeenStats {
    let two = BigUint::from(2u32);
    let mut permutations = pow(&BigUint::from(words.len()), config.num_words);

    match config.case_transform {
        CaseTransform::Random => permutations *= pow(&two, config.num_words),
        CaseTransform::Alternate => permutations *= &two,
        _ => {}
    }

    if config.separator_character == Separator::Random
        && let Some(alphabet) = config.separator_alphabet()
    {
        permutations *= BigUint::from(alphabet.len());
    }

    if config.padding_type != PaddingType::None
        && config.padding_character == Some(PaddingCharacter::Random)
        && let Some(alphabet) = config.padding_alphabet()
    {
        permutations *= BigUint::from(alphabet.len());
    }

    let digits = config.padding_digits_before + config.padding_digits_after;
    permutations *= pow(&BigUint::from(DIGITS), digits);

    if config.substitution_mode() == SubstitutionMode::Random
        && let Some(subs) = config.active_substitutions()
    {
        permutations *= pow(&two, config.num_words * subs.len());
    }

    SeenStats {
        entropy: log2_big(&permutations),
        permutations,
    }
}

fn pow(base: &BigUint, exponent: usize) -> BigUint {
    // Exponents beyond u32 are not reachable from a real configuration.
    let exponent = u32::try_from(exponent).unwrap_or(u32::MAX);
    if exponent == 0 {
        return BigUint::one();
    }
    base.pow(exponent)
}

/// Base 2 logarithm of an arbitrarily large integer.
///
/// Returns 0 for 0 and 1.
pub fn log2_big(n: &BigUint) -> f64 {
    if n.is_zero() {
        return 0.0;
    }
    let bits = n.bits();
    if bits <= 64 {
        return n.to_u64().map_or(0.0, |v| (v as f64).log2());
    }
    let shift = bits - 64;
    let top = (n >> shift).to_u64().unwrap_or(u64::MAX);
    (top as f64).log2() + shift as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::presets;

    fn cache(words: &[&str], config: &Config) -> WordCache {
        WordCache::from_words(
            "test".into(),
            words.iter().map(|w| w.to_string()).collect(),
            config,
        )
        .unwrap()
    }

    fn xkcd() -> Config {
        presets::preset("XKCD", None).unwrap()
    }

    #[test]
    fn log2_of_large_numbers() {
        assert_eq!(log2_big(&BigUint::from(1u32)), 0.0);
        assert_eq!(log2_big(&BigUint::from(1024u32)), 10.0);
        let big = BigUint::from(2u32).pow(300);
        assert!((log2_big(&big) - 300.0).abs() < 1e-9);
        let big = BigUint::from(95u32).pow(63);
        assert!((log2_big(&big) - 63.0 * 95f64.log2()).abs() < 1e-6);
    }

    #[test]
    fn fixed_padding_length_bounds() {
        // DEFAULT: 2 digits, sep, w, sep, w, sep, w, sep, 2 digits, 2+2 padding.
        let config = presets::preset("DEFAULT", None).unwrap();
        let stats = config_stats(&config);
        assert_eq!(stats.length_min, 4 + 4 + 4 + 3 * 4);
        assert_eq!(stats.length_max, 4 + 4 + 4 + 3 * 8);
        assert_eq!(stats.random_draws_required, 3 + 1 + 1 + 4);
    }

    #[test]
    fn adaptive_padding_has_one_length() {
        let config = presets::preset("WIFI", None).unwrap();
        let stats = config_stats(&config);
        assert_eq!((stats.length_min, stats.length_max), (63, 63));
    }

    #[test]
    fn long_substitutions_flag_length_max() {
        let mut config = xkcd();
        let mut subs = std::collections::BTreeMap::new();
        subs.insert("o".to_string(), "0".to_string());
        config.character_substitutions = Some(subs.clone());
        config.substitution_mode = Some(SubstitutionMode::Always);
        assert!(!config_stats(&config).length_max_underestimated);

        subs.insert("o".to_string(), "()".to_string());
        config.character_substitutions = Some(subs);
        assert!(config_stats(&config).length_max_underestimated);

        config.substitution_mode = Some(SubstitutionMode::Never);
        assert!(!config_stats(&config).length_max_underestimated);

        let mut wifi = presets::preset("WIFI", None).unwrap();
        wifi.character_substitutions = config.character_substitutions.clone();
        wifi.substitution_mode = Some(SubstitutionMode::Always);
        assert!(!config_stats(&wifi).length_max_underestimated);
    }

    #[test]
    fn no_separator_adds_no_length() {
        let mut config = xkcd();
        config.separator_character = Separator::None;
        config.padding_digits_before = 3;
        let stats = config_stats(&config);
        assert_eq!(stats.length_min, 3 + 5 * 4);
    }

    #[test]
    fn blind_alphabet_grows_with_features() {
        let mut config = xkcd();
        config.case_transform = CaseTransform::Lower;
        config.separator_character = Separator::None;
        let words = cache(&["blue", "ruby"], &config);
        assert_eq!(blind_alphabet_size(&config, &words), 26);

        config.case_transform = CaseTransform::Capitalise;
        assert_eq!(blind_alphabet_size(&config, &words), 52);

        config.padding_digits_after = 2;
        assert_eq!(blind_alphabet_size(&config, &words), 62);

        config.separator_character = Separator::Char('-');
        assert_eq!(blind_alphabet_size(&config, &words), 95);
    }

    #[test]
    fn accented_words_count_as_symbols() {
        let mut config = xkcd();
        config.case_transform = CaseTransform::Lower;
        config.separator_character = Separator::None;
        config.allow_accents = true;
        let words = cache(&["café", "ruby"], &config);
        assert_eq!(blind_alphabet_size(&config, &words), 26 + 33);
    }

    #[test]
    fn blind_permutations_use_length_range() {
        let mut config = xkcd();
        config.case_transform = CaseTransform::Lower;
        config.separator_character = Separator::None;
        config.num_words = 2;
        config.word_length_max = 5;
        let words = cache(&["blue", "ruby", "minty"], &config);
        let blind = blind_entropy(&config, &words);
        assert_eq!(blind.permutations_min, BigUint::from(26u32).pow(8));
        assert_eq!(blind.permutations_max, BigUint::from(26u32).pow(10));
        assert_eq!(blind.permutations_avg, BigUint::from(26u32).pow(9));
        assert!((blind.entropy_min - 8.0 * 26f64.log2()).abs() < 1e-9);
    }

    #[test]
    fn seen_permutations_multiply_every_choice() {
        let mut config = presets::preset("DEFAULT", None).unwrap();
        config.symbol_alphabet = Some("!@#".chars().collect());
        let words = cache(&["blue", "ruby", "mint", "jade"], &config);
        let seen = seen_entropy(&config, &words);
        // 4^3 words, x2 alternate, x3 separators, x3 padding, 10^4 digits.
        let expected = BigUint::from(4u32 * 4 * 4 * 2 * 3 * 3) * BigUint::from(10_000u32);
        assert_eq!(seen.permutations, expected);
    }

    #[test]
    fn random_case_and_substitutions_double_per_word() {
        let mut config = xkcd();
        config.num_words = 3;
        let words = cache(&["blue", "ruby"], &config);
        assert_eq!(seen_entropy(&config, &words).permutations, BigUint::from(8u32 * 8));

        let mut subs = std::collections::BTreeMap::new();
        subs.insert("e".to_string(), "3".to_string());
        subs.insert("o".to_string(), "0".to_string());
        config.character_substitutions = Some(subs);
        config.substitution_mode = Some(SubstitutionMode::Random);
        assert_eq!(
            seen_entropy(&config, &words).permutations,
            BigUint::from(8u32 * 8 * 64)
        );

        config.substitution_mode = Some(SubstitutionMode::Always);
        assert_eq!(seen_entropy(&config, &words).permutations, BigUint::from(8u32 * 8));
    }

    #[test]
    fn seen_entropy_grows_with_words() {
        let mut config = xkcd();
        config.num_words = 2;
        let words = cache(&["blue", "ruby", "mint", "jade", "pearl"], &config);
        let mut previous = seen_entropy(&config, &words).entropy;
        for num_words in 3..10 {
            let mut bigger = config.clone();
            bigger.num_words = num_words;
            let entropy = seen_entropy(&bigger, &words).entropy;
            assert!(entropy >= previous);
            previous = entropy;
        }
    }
}
