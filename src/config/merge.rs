//! Applying overrides to a configuration.

use tracing::warn;

use super::{Config, PartialConfig};
use crate::error::ConfigError;

/// Apply `overrides` on top of `base`.
///
/// Each override is checked on its own first. Keys whose value breaks
/// the key's constraint are dropped with a warning and the base value is
/// kept. The merged result must then pass full validation.
pub fn merge_overrides(base: &Config, overrides: &PartialConfig) -> Result<Config, ConfigError> {
    let mut merged = PartialConfig::from(base.clone());
    for key in overrides.keys() {
        match overrides.check_key(key) {
            Ok(()) => merged.copy_key(overrides, key),
            Err(e) => warn!("ignoring override: {e}"),
        }
    }
    Config::try_from(merged)
}

/// Apply overrides given as a JSON object.
///
/// Unknown keys and values of the wrong type are dropped with a warning,
/// like invalid values in [`merge_overrides`].
pub fn merge_json(base: &Config, overrides: serde_json::Value) -> crate::Result<Config> {
    let overrides = PartialConfig::from_value_lenient(overrides)?;
    Ok(merge_overrides(base, &overrides)?)
}
