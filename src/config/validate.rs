//! Configuration validation.
//!
//! Rules are checked in a fixed order and the first violation is reported:
//! each key's own constraint, then the cross-key dependencies.

use std::collections::{BTreeMap, HashSet};

use super::{Config, Key, PaddingCharacter, PaddingType, PartialConfig, Separator};
use crate::error::ConfigError;

const MIN_WORD_LENGTH: usize = 4;
const MIN_NUM_WORDS: usize = 2;
const MIN_PAD_TO_LENGTH: usize = 12;
const MIN_ALPHABET: usize = 2;

/// Check every rule of the configuration model.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    let partial = PartialConfig::from(config.clone());
    for key in Key::ALL {
        partial.check_key(key)?;
    }
    check_dependencies(config)
}

impl PartialConfig {
    /// Check the value stored under `key` against that key's own constraint.
    ///
    /// Absent keys pass, presence is enforced when building a [`Config`].
    pub fn check_key(&self, key: Key) -> Result<(), ConfigError> {
        match key {
            Key::WordLengthMin => at_least(key, self.word_length_min, MIN_WORD_LENGTH),
            Key::WordLengthMax => at_least(key, self.word_length_max, MIN_WORD_LENGTH),
            Key::NumWords => at_least(key, self.num_words, MIN_NUM_WORDS),
            Key::PadToLength => at_least(key, self.pad_to_length, MIN_PAD_TO_LENGTH),
            Key::SeparatorCharacter => match self.separator_character {
                Some(Separator::Char(c)) => symbol(key, c),
                _ => Ok(()),
            },
            Key::PaddingCharacter => match self.padding_character {
                Some(PaddingCharacter::Char(c)) => symbol(key, c),
                _ => Ok(()),
            },
            Key::SymbolAlphabet => alphabet(key, self.symbol_alphabet.as_deref()),
            Key::SeparatorAlphabet => alphabet(key, self.separator_alphabet.as_deref()),
            Key::PaddingAlphabet => alphabet(key, self.padding_alphabet.as_deref()),
            Key::CharacterSubstitutions => substitutions(self.character_substitutions.as_ref()),
            // Enum, boolean and unbounded counts are fully described by their type.
            Key::CaseTransform
            | Key::PaddingType
            | Key::PaddingDigitsBefore
            | Key::PaddingDigitsAfter
            | Key::PaddingCharactersBefore
            | Key::PaddingCharactersAfter
            | Key::SubstitutionMode
            | Key::AllowAccents => Ok(()),
        }
    }
}

fn at_least(key: Key, value: Option<usize>, min: usize) -> Result<(), ConfigError> {
    match value {
        Some(v) if v < min => Err(ConfigError::invalid(
            key,
            format!("{v} is below the minimum of {min}"),
        )),
        _ => Ok(()),
    }
}

fn symbol(key: Key, c: char) -> Result<(), ConfigError> {
    if c.is_control() {
        return Err(ConfigError::invalid(
            key,
            format!("{c:?} is a control character"),
        ));
    }
    if c.is_alphanumeric() {
        return Err(ConfigError::invalid(
            key,
            format!("{c:?} is a letter or digit, not a symbol"),
        ));
    }
    Ok(())
}

fn alphabet(key: Key, symbols: Option<&[char]>) -> Result<(), ConfigError> {
    let Some(symbols) = symbols else {
        return Ok(());
    };
    if symbols.len() < MIN_ALPHABET {
        return Err(ConfigError::invalid(
            key,
            format!("needs at least {MIN_ALPHABET} symbols, got {}", symbols.len()),
        ));
    }
    let mut seen = HashSet::with_capacity(symbols.len());
    for &c in symbols {
        symbol(key, c)?;
        if !seen.insert(c) {
            return Err(ConfigError::invalid(key, format!("symbol {c:?} appears twice")));
        }
    }
    Ok(())
}

fn substitutions(map: Option<&BTreeMap<String, String>>) -> Result<(), ConfigError> {
    let key = Key::CharacterSubstitutions;
    let Some(map) = map else {
        return Ok(());
    };
    for (letter, replacement) in map {
        let mut chars = letter.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_alphabetic() => {}
            _ => {
                return Err(ConfigError::invalid(
                    key,
                    format!("'{letter}' is not a single letter"),
                ));
            }
        }
        if replacement.is_empty() {
            return Err(ConfigError::invalid(
                key,
                format!("replacement for '{letter}' is empty"),
            ));
        }
    }
    Ok(())
}

fn check_dependencies(config: &Config) -> Result<(), ConfigError> {
    if config.word_length_max < config.word_length_min {
        return Err(ConfigError::dependency(
            &[Key::WordLengthMin, Key::WordLengthMax],
            format!(
                "word_length_max ({}) must not be less than word_length_min ({})",
                config.word_length_max, config.word_length_min
            ),
        ));
    }

    if config.separator_character == Separator::Random && config.separator_alphabet().is_none() {
        return Err(ConfigError::dependency(
            &[Key::SeparatorCharacter, Key::SymbolAlphabet, Key::SeparatorAlphabet],
            "separator_character RANDOM requires symbol_alphabet or separator_alphabet",
        ));
    }

    if config.padding_type != PaddingType::None {
        match config.padding_character {
            None => return Err(ConfigError::MissingKey(Key::PaddingCharacter)),
            Some(PaddingCharacter::Random) if config.padding_alphabet().is_none() => {
                return Err(ConfigError::dependency(
                    &[Key::PaddingCharacter, Key::SymbolAlphabet, Key::PaddingAlphabet],
                    "padding_character RANDOM requires symbol_alphabet or padding_alphabet",
                ));
            }
            Some(PaddingCharacter::Separator) if config.separator_character == Separator::None => {
                return Err(ConfigError::dependency(
                    &[Key::PaddingCharacter, Key::SeparatorCharacter],
                    "padding_character SEPARATOR cannot be used when separator_character is NONE",
                ));
            }
            Some(_) => {}
        }
    }

    match config.padding_type {
        PaddingType::Fixed => {
            let before = config
                .padding_characters_before
                .ok_or(ConfigError::MissingKey(Key::PaddingCharactersBefore))?;
            let after = config
                .padding_characters_after
                .ok_or(ConfigError::MissingKey(Key::PaddingCharactersAfter))?;
            if before + after == 0 {
                return Err(ConfigError::dependency(
                    &[Key::PaddingCharactersBefore, Key::PaddingCharactersAfter],
                    "FIXED padding needs padding_characters_before + padding_characters_after > 0",
                ));
            }
        }
        PaddingType::Adaptive => {
            config
                .pad_to_length
                .ok_or(ConfigError::MissingKey(Key::PadToLength))?;
        }
        PaddingType::None => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CaseTransform, presets};

    fn base() -> Config {
        Config {
            word_length_min: 4,
            word_length_max: 8,
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

    #[test]
    fn minimal_config_is_valid() {
        assert_eq!(validate(&base()), Ok(()));
    }

    #[test]
    fn word_lengths_must_exceed_three() {
        let mut config = base();
        config.word_length_min = 3;
        let err = validate(&config).unwrap_err();
        assert_eq!(err.keys(), vec![Key::WordLengthMin]);
    }

    #[test]
    fn max_length_below_min_is_rejected() {
        let mut config = base();
        config.word_length_min = 6;
        config.word_length_max = 5;
        let err = validate(&config).unwrap_err();
        assert_eq!(err.keys(), vec![Key::WordLengthMin, Key::WordLengthMax]);
    }

    #[test]
    fn one_word_is_not_enough() {
        let mut config = base();
        config.num_words = 1;
        assert!(matches!(
            validate(&config),
            Err(ConfigError::InvalidValue { key: Key::NumWords, .. })
        ));
    }

    #[test]
    fn random_separator_needs_an_alphabet() {
        let mut config = base();
        config.separator_character = Separator::Random;
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("separator_character"));

        config.separator_alphabet = Some(vec!['-', '+']);
        assert_eq!(validate(&config), Ok(()));

        config.separator_alphabet = None;
        config.symbol_alphabet = Some(vec!['-', '+']);
        assert_eq!(validate(&config), Ok(()));
    }

    #[test]
    fn alphabets_need_two_distinct_symbols() {
        let mut config = base();
        config.symbol_alphabet = Some(vec!['!']);
        assert!(validate(&config).is_err());
        config.symbol_alphabet = Some(vec!['!', '!']);
        assert!(validate(&config).is_err());
        config.symbol_alphabet = Some(vec!['!', '?']);
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn letters_and_digits_are_not_symbols() {
        let mut config = base();
        config.separator_character = Separator::Char('a');
        let err = validate(&config).unwrap_err();
        assert_eq!(err.keys(), vec![Key::SeparatorCharacter]);
        assert!(err.to_string().contains("letter or digit"), "{err}");

        let mut config = base();
        config.symbol_alphabet = Some(vec!['1', '2']);
        assert_eq!(validate(&config).unwrap_err().keys(), vec![Key::SymbolAlphabet]);

        let mut config = base();
        config.padding_type = PaddingType::Adaptive;
        config.pad_to_length = Some(20);
        config.padding_character = Some(PaddingCharacter::Char('x'));
        assert_eq!(validate(&config).unwrap_err().keys(), vec![Key::PaddingCharacter]);

        let mut config = base();
        config.separator_character = Separator::Char(' ');
        assert_eq!(validate(&config), Ok(()));
    }

    #[test]
    fn padding_needs_a_character() {
        let mut config = base();
        config.padding_type = PaddingType::Fixed;
        config.padding_characters_before = Some(1);
        config.padding_characters_after = Some(1);
        assert_eq!(
            validate(&config),
            Err(ConfigError::MissingKey(Key::PaddingCharacter))
        );

        config.padding_character = Some(PaddingCharacter::Random);
        assert!(validate(&config).unwrap_err().to_string().contains("padding_alphabet"));

        config.padding_alphabet = Some(vec!['*', '#']);
        assert_eq!(validate(&config), Ok(()));
    }

    #[test]
    fn separator_padding_needs_a_separator() {
        let mut config = base();
        config.separator_character = Separator::None;
        config.padding_type = PaddingType::Adaptive;
        config.pad_to_length = Some(20);
        config.padding_character = Some(PaddingCharacter::Separator);
        let err = validate(&config).unwrap_err();
        assert_eq!(err.keys(), vec![Key::PaddingCharacter, Key::SeparatorCharacter]);
    }

    #[test]
    fn fixed_padding_needs_counts() {
        let mut config = base();
        config.padding_type = PaddingType::Fixed;
        config.padding_character = Some(PaddingCharacter::Char('!'));
        config.padding_characters_before = Some(0);
        assert_eq!(
            validate(&config),
            Err(ConfigError::MissingKey(Key::PaddingCharactersAfter))
        );
        config.padding_characters_after = Some(0);
        assert!(matches!(validate(&config), Err(ConfigError::Dependency { .. })));
        config.padding_characters_after = Some(2);
        assert_eq!(validate(&config), Ok(()));
    }

    #[test]
    fn adaptive_padding_needs_target_length() {
        let mut config = base();
        config.padding_type = PaddingType::Adaptive;
        config.padding_character = Some(PaddingCharacter::Char('.'));
        assert_eq!(
            validate(&config),
            Err(ConfigError::MissingKey(Key::PadToLength))
        );
        config.pad_to_length = Some(11);
        assert!(validate(&config).is_err());
        config.pad_to_length = Some(12);
        assert_eq!(validate(&config), Ok(()));
    }

    #[test]
    fn substitution_keys_are_single_letters() {
        let mut config = base();
        let mut subs = BTreeMap::new();
        subs.insert("ab".to_string(), "4".to_string());
        config.character_substitutions = Some(subs);
        assert!(validate(&config).is_err());

        let mut subs = BTreeMap::new();
        subs.insert("a".to_string(), "4".to_string());
        subs.insert("e".to_string(), "3".to_string());
        config.character_substitutions = Some(subs);
        assert_eq!(validate(&config), Ok(()));
    }

    #[test]
    fn a_partial_only_checks_present_keys() {
        let partial = PartialConfig {
            num_words: Some(5),
            ..Default::default()
        };
        for key in Key::ALL {
            assert_eq!(partial.check_key(key), Ok(()));
        }
        let partial = PartialConfig {
            num_words: Some(0),
            ..Default::default()
        };
        assert!(partial.check_key(Key::NumWords).is_err());
    }

    #[test]
    fn presets_validate() {
        for name in presets::preset_names() {
            let config = presets::preset(name, None).unwrap();
            assert_eq!(validate(&config), Ok(()), "{name}");
        }
    }
}
