//! Case transforms.

use unicode_segmentation::UnicodeSegmentation;

use crate::config::CaseTransform;

/// Upper-case the first grapheme and lower-case the rest.
pub fn capitalise(word: &str) -> String {
    split_first(word, |first| first.to_uppercase(), |rest| rest.to_lowercase())
}

/// Lower-case the first grapheme and upper-case the rest.
pub fn invert(word: &str) -> String {
    split_first(word, |first| first.to_lowercase(), |rest| rest.to_uppercase())
}

fn split_first(word: &str, first: impl Fn(&str) -> String, rest: impl Fn(&str) -> String) -> String {
    match word.grapheme_indices(true).nth(1) {
        Some((idx, _)) => first(&word[..idx]) + &rest(&word[idx..]),
        None => first(word),
    }
}

/// Apply a transform that needs no randomness.
///
/// `Alternate` and `Random` are resolved per word by the assembler and
/// passed here as `Upper` or `Lower`.
pub fn apply(word: &str, transform: CaseTransform) -> String {
    match transform {
        CaseTransform::Upper => word.to_uppercase(),
        CaseTransform::Lower => word.to_lowercase(),
        CaseTransform::Capitalise => capitalise(word),
        CaseTransform::Invert => invert(word),
        CaseTransform::None | CaseTransform::Alternate | CaseTransform::Random => word.to_string(),
    }
}
