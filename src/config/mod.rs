//! Password configuration model.
//!
//! A [`Config`] is a closed set of typed keys. Required keys are plain
//! fields, conditional and optional keys are `Option`s. Values only become
//! a `Config` through [`validate`], either directly or via the
//! [`PartialConfig`] conversion used for overrides and JSON interchange.

mod merge;
pub mod presets;
mod validate;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub use merge::{merge_json, merge_overrides};
pub use presets::{check_presets, preset, preset_description, preset_names};
pub use validate::validate;

// =============================================================================
// Keys
// =============================================================================

/// Every configuration key the model knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    WordLengthMin,
    WordLengthMax,
    NumWords,
    CaseTransform,
    SeparatorCharacter,
    PaddingType,
    PaddingDigitsBefore,
    PaddingDigitsAfter,
    PaddingCharacter,
    PaddingCharactersBefore,
    PaddingCharactersAfter,
    PadToLength,
    SymbolAlphabet,
    SeparatorAlphabet,
    PaddingAlphabet,
    CharacterSubstitutions,
    SubstitutionMode,
    AllowAccents,
}

impl Key {
    pub const ALL: [Key; 18] = [
        Key::WordLengthMin,
        Key::WordLengthMax,
        Key::NumWords,
        Key::CaseTransform,
        Key::SeparatorCharacter,
        Key::PaddingType,
        Key::PaddingDigitsBefore,
        Key::PaddingDigitsAfter,
        Key::PaddingCharacter,
        Key::PaddingCharactersBefore,
        Key::PaddingCharactersAfter,
        Key::PadToLength,
        Key::SymbolAlphabet,
        Key::SeparatorAlphabet,
        Key::PaddingAlphabet,
        Key::CharacterSubstitutions,
        Key::SubstitutionMode,
        Key::AllowAccents,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Key::WordLengthMin => "word_length_min",
            Key::WordLengthMax => "word_length_max",
            Key::NumWords => "num_words",
            Key::CaseTransform => "case_transform",
            Key::SeparatorCharacter => "separator_character",
            Key::PaddingType => "padding_type",
            Key::PaddingDigitsBefore => "padding_digits_before",
            Key::PaddingDigitsAfter => "padding_digits_after",
            Key::PaddingCharacter => "padding_character",
            Key::PaddingCharactersBefore => "padding_characters_before",
            Key::PaddingCharactersAfter => "padding_characters_after",
            Key::PadToLength => "pad_to_length",
            Key::SymbolAlphabet => "symbol_alphabet",
            Key::SeparatorAlphabet => "separator_alphabet",
            Key::PaddingAlphabet => "padding_alphabet",
            Key::CharacterSubstitutions => "character_substitutions",
            Key::SubstitutionMode => "substitution_mode",
            Key::AllowAccents => "allow_accents",
        }
    }

    /// Keys that must be present in every configuration.
    pub fn is_required(&self) -> bool {
        matches!(
            self,
            Key::WordLengthMin
                | Key::WordLengthMax
                | Key::NumWords
                | Key::CaseTransform
                | Key::SeparatorCharacter
                | Key::PaddingType
                | Key::PaddingDigitsBefore
                | Key::PaddingDigitsAfter
        )
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Key {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Key::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownKey(s.to_string()))
    }
}

// =============================================================================
// Value types
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CaseTransform {
    None,
    Upper,
    Lower,
    Capitalise,
    Invert,
    Alternate,
    Random,
}

impl CaseTransform {
    /// Whether passwords are expected to mix upper and lower case letters.
    pub fn is_mixed(&self) -> bool {
        matches!(
            self,
            CaseTransform::Alternate
                | CaseTransform::Capitalise
                | CaseTransform::Invert
                | CaseTransform::Random
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaddingType {
    None,
    Fixed,
    Adaptive,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubstitutionMode {
    #[default]
    Always,
    Never,
    Random,
}

/// Character placed between words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Separator {
    None,
    Random,
    Char(char),
}

impl TryFrom<String> for Separator {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "NONE" => Ok(Separator::None),
            "RANDOM" => Ok(Separator::Random),
            other => single_char(other).map(Separator::Char),
        }
    }
}

impl From<Separator> for String {
    fn from(value: Separator) -> Self {
        match value {
            Separator::None => "NONE".into(),
            Separator::Random => "RANDOM".into(),
            Separator::Char(c) => c.to_string(),
        }
    }
}

/// Character used for symbol padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PaddingCharacter {
    Random,
    /// Reuse whatever separator was chosen for the password.
    Separator,
    Char(char),
}

impl TryFrom<String> for PaddingCharacter {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "RANDOM" => Ok(PaddingCharacter::Random),
            "SEPARATOR" => Ok(PaddingCharacter::Separator),
            other => single_char(other).map(PaddingCharacter::Char),
        }
    }
}

impl From<PaddingCharacter> for String {
    fn from(value: PaddingCharacter) -> Self {
        match value {
            PaddingCharacter::Random => "RANDOM".into(),
            PaddingCharacter::Separator => "SEPARATOR".into(),
            PaddingCharacter::Char(c) => c.to_string(),
        }
    }
}

fn single_char(s: &str) -> Result<char, String> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(format!("'{s}' is not a single character or a known keyword")),
    }
}

// =============================================================================
// Config
// =============================================================================

/// A complete password configuration.
///
/// Construct one field by field and pass it through [`validate`], or
/// convert from a [`PartialConfig`] which validates on the way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PartialConfig", into = "PartialConfig")]
pub struct Config {
    pub word_length_min: usize,
    pub word_length_max: usize,
    pub num_words: usize,
    pub case_transform: CaseTransform,
    pub separator_character: Separator,
    pub padding_type: PaddingType,
    pub padding_digits_before: usize,
    pub padding_digits_after: usize,
    pub padding_character: Option<PaddingCharacter>,
    pub padding_characters_before: Option<usize>,
    pub padding_characters_after: Option<usize>,
    pub pad_to_length: Option<usize>,
    pub symbol_alphabet: Option<Vec<char>>,
    pub separator_alphabet: Option<Vec<char>>,
    pub padding_alphabet: Option<Vec<char>>,
    /// Single letter to replacement text.
    pub character_substitutions: Option<BTreeMap<String, String>>,
    pub substitution_mode: Option<SubstitutionMode>,
    pub allow_accents: bool,
}

impl Config {
    /// Alphabet a random separator is drawn from.
    pub fn separator_alphabet(&self) -> Option<&[char]> {
        self.separator_alphabet
            .as_deref()
            .or(self.symbol_alphabet.as_deref())
    }

    /// Alphabet a random padding character is drawn from.
    pub fn padding_alphabet(&self) -> Option<&[char]> {
        self.padding_alphabet
            .as_deref()
            .or(self.symbol_alphabet.as_deref())
    }

    pub fn substitution_mode(&self) -> SubstitutionMode {
        self.substitution_mode.unwrap_or_default()
    }

    /// Substitutions that will actually be considered during generation.
    pub fn active_substitutions(&self) -> Option<&BTreeMap<String, String>> {
        match self.substitution_mode() {
            SubstitutionMode::Never => None,
            _ => self
                .character_substitutions
                .as_ref()
                .filter(|subs| !subs.is_empty()),
        }
    }

    /// Number of random draws needed for one password.
    pub fn random_draws_required(&self) -> usize {
        required_random_draws(self)
    }

    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a configuration from JSON.
    ///
    /// Keys outside the model are dropped with a warning, the remainder
    /// must form a valid configuration.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    pub fn from_value(value: serde_json::Value) -> crate::Result<Self> {
        let partial = PartialConfig::from_value_lenient(value)?;
        Ok(Config::try_from(partial)?)
    }
}

/// Random draws needed for one password under `config`.
pub fn required_random_draws(config: &Config) -> usize {
    let mut draws = config.num_words;
    if config.case_transform == CaseTransform::Random {
        draws += config.num_words;
    }
    if config.separator_character == Separator::Random {
        draws += 1;
    }
    if config.padding_character == Some(PaddingCharacter::Random) {
        draws += 1;
    }
    draws + config.padding_digits_before + config.padding_digits_after
}

// =============================================================================
// PartialConfig
// =============================================================================

/// A configuration where any key may be absent.
///
/// Used for overrides and as the JSON wire shape of [`Config`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PartialConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_length_min: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_length_max: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_words: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_transform: Option<CaseTransform>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub separator_character: Option<Separator>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_type: Option<PaddingType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_digits_before: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_digits_after: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_character: Option<PaddingCharacter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_characters_before: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_characters_after: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pad_to_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol_alphabet: Option<Vec<char>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub separator_alphabet: Option<Vec<char>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_alphabet: Option<Vec<char>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub character_substitutions: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub substitution_mode: Option<SubstitutionMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_accents: Option<bool>,
}

impl PartialConfig {
    pub fn has_key(&self, key: Key) -> bool {
        match key {
            Key::WordLengthMin => self.word_length_min.is_some(),
            Key::WordLengthMax => self.word_length_max.is_some(),
            Key::NumWords => self.num_words.is_some(),
            Key::CaseTransform => self.case_transform.is_some(),
            Key::SeparatorCharacter => self.separator_character.is_some(),
            Key::PaddingType => self.padding_type.is_some(),
            Key::PaddingDigitsBefore => self.padding_digits_before.is_some(),
            Key::PaddingDigitsAfter => self.padding_digits_after.is_some(),
            Key::PaddingCharacter => self.padding_character.is_some(),
            Key::PaddingCharactersBefore => self.padding_characters_before.is_some(),
            Key::PaddingCharactersAfter => self.padding_characters_after.is_some(),
            Key::PadToLength => self.pad_to_length.is_some(),
            Key::SymbolAlphabet => self.symbol_alphabet.is_some(),
            Key::SeparatorAlphabet => self.separator_alphabet.is_some(),
            Key::PaddingAlphabet => self.padding_alphabet.is_some(),
            Key::CharacterSubstitutions => self.character_substitutions.is_some(),
            Key::SubstitutionMode => self.substitution_mode.is_some(),
            Key::AllowAccents => self.allow_accents.is_some(),
        }
    }

    /// Keys that carry a value, in model order.
    pub fn keys(&self) -> Vec<Key> {
        Key::ALL
            .into_iter()
            .filter(|key| self.has_key(*key))
            .collect()
    }

    /// Copy the value of `key` from `other`, leaving every other key alone.
    pub fn copy_key(&mut self, other: &PartialConfig, key: Key) {
        match key {
            Key::WordLengthMin => self.word_length_min = other.word_length_min,
            Key::WordLengthMax => self.word_length_max = other.word_length_max,
            Key::NumWords => self.num_words = other.num_words,
            Key::CaseTransform => self.case_transform = other.case_transform,
            Key::SeparatorCharacter => self.separator_character = other.separator_character,
            Key::PaddingType => self.padding_type = other.padding_type,
            Key::PaddingDigitsBefore => self.padding_digits_before = other.padding_digits_before,
            Key::PaddingDigitsAfter => self.padding_digits_after = other.padding_digits_after,
            Key::PaddingCharacter => self.padding_character = other.padding_character,
            Key::PaddingCharactersBefore => {
                self.padding_characters_before = other.padding_characters_before
            }
            Key::PaddingCharactersAfter => {
                self.padding_characters_after = other.padding_characters_after
            }
            Key::PadToLength => self.pad_to_length = other.pad_to_length,
            Key::SymbolAlphabet => self.symbol_alphabet = other.symbol_alphabet.clone(),
            Key::SeparatorAlphabet => self.separator_alphabet = other.separator_alphabet.clone(),
            Key::PaddingAlphabet => self.padding_alphabet = other.padding_alphabet.clone(),
            Key::CharacterSubstitutions => {
                self.character_substitutions = other.character_substitutions.clone()
            }
            Key::SubstitutionMode => self.substitution_mode = other.substitution_mode,
            Key::AllowAccents => self.allow_accents = other.allow_accents,
        }
    }

    /// Parse from a JSON object, dropping (with a warning) any entry whose
    /// key is unknown or whose value does not fit the key's type.
    pub fn from_value_lenient(value: serde_json::Value) -> crate::Result<Self> {
        let serde_json::Value::Object(map) = value else {
            return Err(crate::Error::Json(<serde_json::Error as serde::de::Error>::custom(
                "configuration must be a JSON object",
            )));
        };

        let mut partial = PartialConfig::default();
        for (name, value) in map {
            let key = match name.parse::<Key>() {
                Ok(key) => key,
                Err(e) => {
                    tracing::warn!("dropping config entry: {e}");
                    continue;
                }
            };
            let mut single = serde_json::Map::new();
            single.insert(name, value);
            match serde_json::from_value::<PartialConfig>(serde_json::Value::Object(single)) {
                Ok(parsed) => partial.copy_key(&parsed, key),
                Err(e) => tracing::warn!("dropping config key '{key}': {e}"),
            }
        }
        Ok(partial)
    }
}

impl From<Config> for PartialConfig {
    fn from(config: Config) -> Self {
        Self {
            word_length_min: Some(config.word_length_min),
            word_length_max: Some(config.word_length_max),
            num_words: Some(config.num_words),
            case_transform: Some(config.case_transform),
            separator_character: Some(config.separator_character),
            padding_type: Some(config.padding_type),
            padding_digits_before: Some(config.padding_digits_before),
            padding_digits_after: Some(config.padding_digits_after),
            padding_character: config.padding_character,
            padding_characters_before: config.padding_characters_before,
            padding_characters_after: config.padding_characters_after,
            pad_to_length: config.pad_to_length,
            symbol_alphabet: config.symbol_alphabet,
            separator_alphabet: config.separator_alphabet,
            padding_alphabet: config.padding_alphabet,
            character_substitutions: config.character_substitutions,
            substitution_mode: config.substitution_mode,
            allow_accents: Some(config.allow_accents),
        }
    }
}

impl TryFrom<PartialConfig> for Config {
    type Error = ConfigError;

    fn try_from(partial: PartialConfig) -> Result<Self, Self::Error> {
        fn required<T>(value: Option<T>, key: Key) -> Result<T, ConfigError> {
            value.ok_or(ConfigError::MissingKey(key))
        }

        let config = Config {
            word_length_min: required(partial.word_length_min, Key::WordLengthMin)?,
            word_length_max: required(partial.word_length_max, Key::WordLengthMax)?,
            num_words: required(partial.num_words, Key::NumWords)?,
            case_transform: required(partial.case_transform, Key::CaseTransform)?,
            separator_character: required(partial.separator_character, Key::SeparatorCharacter)?,
            padding_type: required(partial.padding_type, Key::PaddingType)?,
            padding_digits_before: required(partial.padding_digits_before, Key::PaddingDigitsBefore)?,
            padding_digits_after: required(partial.padding_digits_after, Key::PaddingDigitsAfter)?,
            padding_character: partial.padding_character,
            padding_characters_before: partial.padding_characters_before,
            padding_characters_after: partial.padding_characters_after,
            pad_to_length: partial.pad_to_length,
            symbol_alphabet: partial.symbol_alphabet,
            separator_alphabet: partial.separator_alphabet,
            padding_alphabet: partial.padding_alphabet,
            character_substitutions: partial.character_substitutions,
            substitution_mode: partial.substitution_mode,
            allow_accents: partial.allow_accents.unwrap_or(false),
        };
        validate(&config)?;
        Ok(config)
    }
}
