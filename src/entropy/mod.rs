//! Entropy statistics and low-entropy warnings.

mod stats;

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::Config;
use crate::words::WordCache;

pub use stats::{
    BlindStats, LengthStats, SeenStats, blind_alphabet_size, blind_entropy, config_stats,
    log2_big, seen_entropy,
};

pub const DEFAULT_MIN_BLIND: u32 = 78;
pub const DEFAULT_MIN_SEEN: u32 = 52;

/// Which low-entropy warnings are emitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WarningLevel {
    #[default]
    All,
    Blind,
    Seen,
    None,
}

impl WarningLevel {
    fn blind(&self) -> bool {
        matches!(self, WarningLevel::All | WarningLevel::Blind)
    }

    fn seen(&self) -> bool {
        matches!(self, WarningLevel::All | WarningLevel::Seen)
    }
}

impl std::str::FromStr for WarningLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ALL" => Ok(WarningLevel::All),
            "BLIND" => Ok(WarningLevel::Blind),
            "SEEN" => Ok(WarningLevel::Seen),
            "NONE" => Ok(WarningLevel::None),
            _ => Err(format!("unknown warning level '{s}'")),
        }
    }
}

/// Thresholds and warning selection for entropy checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntropySettings {
    pub warnings: WarningLevel,
    /// Minimum acceptable blind entropy in bits.
    pub min_blind: u32,
    /// Minimum acceptable seen entropy in bits.
    pub min_seen: u32,
}

impl Default for EntropySettings {
    fn default() -> Self {
        Self {
            warnings: WarningLevel::All,
            min_blind: DEFAULT_MIN_BLIND,
            min_seen: DEFAULT_MIN_SEEN,
        }
    }
}

/// An advisory that a configuration produces weak passwords.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntropyWarning {
    Blind { bits: f64, min: u32 },
    Seen { bits: f64, min: u32 },
}

impl fmt::Display for EntropyWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntropyWarning::Blind { bits, min } => write!(
                f,
                "minimum blind entropy of {bits:.2} bits is below the recommended {min} bits"
            ),
            EntropyWarning::Seen { bits, min } => write!(
                f,
                "seen entropy of {bits:.2} bits is below the recommended {min} bits"
            ),
        }
    }
}

/// Every statistic derived from one configuration and word cache.
#[derive(Debug, Clone, PartialEq)]
pub struct EntropyStats {
    pub length: LengthStats,
    pub blind: BlindStats,
    pub seen: SeenStats,
    pub words_available: usize,
}

impl EntropyStats {
    pub fn compute(config: &Config, words: &WordCache) -> Self {
        Self {
            length: config_stats(config),
            blind: blind_entropy(config, words),
            seen: seen_entropy(config, words),
            words_available: words.len(),
        }
    }

    /// Warnings these statistics trigger under `settings`.
    pub fn warnings(&self, settings: &EntropySettings) -> Vec<EntropyWarning> {
        let mut warnings = Vec::new();
        if settings.warnings.blind() && self.blind.entropy_min < f64::from(settings.min_blind) {
            warnings.push(EntropyWarning::Blind {
                bits: self.blind.entropy_min,
                min: settings.min_blind,
            });
        }
        if settings.warnings.seen() && self.seen.entropy < f64::from(settings.min_seen) {
            warnings.push(EntropyWarning::Seen {
                bits: self.seen.entropy,
                min: settings.min_seen,
            });
        }
        warnings
    }
}

/// Recompute statistics and log any low-entropy warnings.
///
/// Warnings never stop generation.
pub fn update_cache(config: &Config, words: &WordCache, settings: &EntropySettings) -> EntropyStats {
    let stats = EntropyStats::compute(config, words);
    debug!(
        blind_min = stats.blind.entropy_min,
        blind_max = stats.blind.entropy_max,
        seen = stats.seen.entropy,
        "recomputed entropy statistics"
    );
    for warning in check_warnings(&stats, settings) {
        warn!(target: "xkpass::entropy", "{warning}");
    }
    stats
}

/// Warnings `stats` trigger under `settings`.
pub fn check_warnings(stats: &EntropyStats, settings: &EntropySettings) -> Vec<EntropyWarning> {
    stats.warnings(settings)
}

/// Rough strength label for a number of bits.
pub fn strength(bits: f64) -> &'static str {
    match bits as u32 {
        0..=35 => "Weak",
        36..=59 => "Fair",
        60..=127 => "Strong",
        _ => "Very Strong",
    }
}
