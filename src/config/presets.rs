//! Built-in presets.

use super::{
    CaseTransform, Config, PaddingCharacter, PaddingType, PartialConfig, Separator,
    merge_overrides, validate,
};
use crate::{Error, Result};

pub const DEFAULT_PRESET: &str = "DEFAULT";

const NAMES: [&str; 8] = [
    "DEFAULT",
    "WEB16",
    "WEB32",
    "WIFI",
    "APPLEID",
    "NTLM",
    "SECURITYQ",
    "XKCD",
];

const SYMBOLS: &str = "!@$%^&*-_+=:|~?/.;";
const PADDING_SYMBOLS: &str = "!@$%^&*+=:|~?";
const SEPARATOR_SYMBOLS: &str = "-+=.*_|~,";

pub fn preset_names() -> &'static [&'static str] {
    &NAMES
}

pub fn preset_description(name: &str) -> Option<&'static str> {
    let description = match name.to_ascii_uppercase().as_str() {
        "DEFAULT" => "Three words with random separators, digits and symbol padding.",
        "WEB16" => "Short passwords for sites limited to 16 characters.",
        "WEB32" => "Passwords for sites limited to 32 characters.",
        "WIFI" => "63 character WPA2 keys padded to the maximum length.",
        "APPLEID" => "Passwords meeting Apple ID rules using symbols from the iOS keyboard.",
        "NTLM" => "14 character passwords for legacy NTLM systems.",
        "SECURITYQ" => "Sentence-like answers for security questions.",
        "XKCD" => "Five words joined by dashes, as in the XKCD comic.",
        _ => return None,
    };
    Some(description)
}

/// Look up a built-in preset and apply optional overrides.
pub fn preset(name: &str, overrides: Option<&PartialConfig>) -> Result<Config> {
    let config = builtin(name).ok_or_else(|| Error::UnknownPreset(name.to_string()))?;
    validate(&config)?;
    match overrides {
        Some(overrides) => Ok(merge_overrides(&config, overrides)?),
        None => Ok(config),
    }
}

/// Validate every built-in preset, reporting all failures.
pub fn check_presets() -> Result<()> {
    let failures: Vec<_> = NAMES
        .iter()
        .filter_map(|name| {
            let config = builtin(name)?;
            validate(&config).err().map(|e| (name.to_string(), e))
        })
        .collect();

    if failures.is_empty() {
        Ok(())
    } else {
        Err(Error::PresetCheck(failures))
    }
}

fn symbols(s: &str) -> Option<Vec<char>> {
    Some(s.chars().collect())
}

fn base(min: usize, max: usize, num_words: usize, case_transform: CaseTransform) -> Config {
    Config {
        word_length_min: min,
        word_length_max: max,
        num_words,
        case_transform,
        separator_character: Separator::Random,
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

fn builtin(name: &str) -> Option<Config> {
    let config = match name.to_ascii_uppercase().as_str() {
        "DEFAULT" => Config {
            symbol_alphabet: symbols(SYMBOLS),
            padding_digits_before: 2,
            padding_digits_after: 2,
            padding_type: PaddingType::Fixed,
            padding_character: Some(PaddingCharacter::Random),
            padding_characters_before: Some(2),
            padding_characters_after: Some(2),
            ..base(4, 8, 3, CaseTransform::Alternate)
        },
        // 3 x 4 letters, 2 separators, separator + 1 digit.
        "WEB16" => Config {
            symbol_alphabet: symbols(PADDING_SYMBOLS),
            padding_digits_after: 1,
            ..base(4, 4, 3, CaseTransform::Random)
        },
        "WEB32" => Config {
            padding_alphabet: symbols(PADDING_SYMBOLS),
            separator_alphabet: symbols(SEPARATOR_SYMBOLS),
            padding_digits_before: 2,
            padding_digits_after: 2,
            padding_type: PaddingType::Fixed,
            padding_character: Some(PaddingCharacter::Random),
            padding_characters_before: Some(1),
            padding_characters_after: Some(1),
            ..base(4, 5, 4, CaseTransform::Alternate)
        },
        "WIFI" => Config {
            padding_alphabet: symbols(PADDING_SYMBOLS),
            separator_alphabet: symbols(SEPARATOR_SYMBOLS),
            padding_digits_before: 4,
            padding_digits_after: 4,
            padding_type: PaddingType::Adaptive,
            padding_character: Some(PaddingCharacter::Random),
            pad_to_length: Some(63),
            ..base(4, 8, 6, CaseTransform::Random)
        },
        "APPLEID" => Config {
            padding_alphabet: symbols("-:.!?@&"),
            separator_alphabet: symbols("-:.@, "),
            padding_digits_before: 2,
            padding_digits_after: 2,
            padding_type: PaddingType::Fixed,
            padding_character: Some(PaddingCharacter::Random),
            padding_characters_before: Some(1),
            padding_characters_after: Some(1),
            ..base(4, 7, 3, CaseTransform::Random)
        },
        // 1 digit, separator, 2 x 5 letters, separator, 1 symbol.
        "NTLM" => Config {
            padding_alphabet: symbols(PADDING_SYMBOLS),
            separator_alphabet: symbols(SEPARATOR_SYMBOLS),
            padding_digits_before: 1,
            padding_type: PaddingType::Fixed,
            padding_character: Some(PaddingCharacter::Random),
            padding_characters_before: Some(0),
            padding_characters_after: Some(1),
            ..base(5, 5, 2, CaseTransform::Invert)
        },
        "SECURITYQ" => Config {
            separator_character: Separator::Char(' '),
            padding_alphabet: symbols(".!?"),
            padding_type: PaddingType::Fixed,
            padding_character: Some(PaddingCharacter::Random),
            padding_characters_before: Some(0),
            padding_characters_after: Some(1),
            ..base(4, 8, 6, CaseTransform::None)
        },
        "XKCD" => Config {
            separator_character: Separator::Char('-'),
            ..base(4, 8, 5, CaseTransform::Random)
        },
        _ => return None,
    };
    Some(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_presets_pass_batch_check() {
        check_presets().unwrap();
    }

    #[test]
    fn names_are_case_insensitive() {
        assert_eq!(preset("xkcd", None).unwrap(), preset("XKCD", None).unwrap());
    }

    #[test]
    fn unknown_preset_is_an_error() {
        assert!(matches!(
            preset("NOPE", None),
            Err(Error::UnknownPreset(name)) if name == "NOPE"
        ));
    }

    #[test]
    fn every_preset_has_a_description() {
        for name in preset_names() {
            assert!(preset_description(name).is_some(), "{name}");
        }
    }

    #[test]
    fn overrides_apply_to_presets() {
        let overrides = PartialConfig {
            num_words: Some(7),
            ..Default::default()
        };
        assert_eq!(preset("WEB32", Some(&overrides)).unwrap().num_words, 7);
    }
}
