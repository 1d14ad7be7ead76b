//! Settings file persistence.

use std::collections::BTreeMap;
use std::env;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::Settings;
use crate::Result;
use crate::config::Config;
use crate::entropy::EntropySettings;

/// On-disk shape. Custom presets stay raw so one bad preset does not
/// reject the whole file.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct SettingsFile {
    default_preset: Option<String>,
    custom_presets: BTreeMap<String, Value>,
    entropy: EntropySettings,
    #[serde(skip_serializing_if = "Option::is_none")]
    dictionary: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rng: Option<String>,
}

pub(super) fn read(path: &Path) -> Result<Settings> {
    let data = fs::read_to_string(path)?;
    if data.trim().is_empty() {
        return Ok(Settings::default());
    }
    let file: SettingsFile = serde_json::from_str(&data)?;
    debug!(path = %path.display(), presets = file.custom_presets.len(), "loaded settings");

    let mut settings = Settings {
        entropy: file.entropy,
        dictionary: file.dictionary,
        rng: file.rng,
        ..Settings::default()
    };
    if let Some(name) = file.default_preset {
        settings.default_preset = name.to_ascii_uppercase();
    }

    for (name, value) in file.custom_presets {
        match Config::from_value(value) {
            Ok(config) => {
                settings.custom_presets.insert(name.to_ascii_uppercase(), config);
            }
            Err(e) => warn!(preset = %name, "dropping invalid custom preset: {e}"),
        }
    }

    settings.check_default_preset();
    Ok(settings)
}

pub(super) fn write(settings: &Settings, path: &Path) -> Result<()> {
    let custom_presets = settings
        .custom_presets
        .iter()
        .map(|(name, config)| -> Result<(String, Value)> {
            Ok((name.clone(), serde_json::to_value(config)?))
        })
        .collect::<Result<BTreeMap<_, _>>>()?;

    let file = SettingsFile {
        default_preset: Some(settings.default_preset.clone()),
        custom_presets,
        entropy: settings.entropy,
        dictionary: settings.dictionary.clone(),
        rng: settings.rng.clone(),
    };

    let mut data = serde_json::to_string_pretty(&file)?;
    data.push('\n');

    let mut out = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;
    out.write_all(data.as_bytes())?;
    Ok(())
}

#[inline]
pub fn get_path() -> PathBuf {
    let home = env::var("HOME").unwrap_or_else(|_| ".".into());
    PathBuf::from(format!("{}/.config/xkpass/settings.json", home))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config;
    use crate::entropy::WarningLevel;

    #[test]
    fn round_trips_through_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let mut settings = Settings::default();
        settings
            .add_preset("mine", config::preset("WEB32", None).unwrap())
            .unwrap();
        settings.set_default_preset("MINE").unwrap();
        settings.entropy.warnings = WarningLevel::Seen;
        settings.rng = Some("urandom".into());
        settings.save_to(&path).unwrap();

        assert_eq!(Settings::load_from(&path).unwrap(), settings);
    }

    #[test]
    fn invalid_presets_are_dropped_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let mut good = serde_json::to_value(config::preset("XKCD", None).unwrap()).unwrap();
        good["num_words"] = 4.into();
        let document = serde_json::json!({
            "default_preset": "broken",
            "custom_presets": {
                "good": good,
                "broken": { "num_words": 1 }
            },
            "entropy": { "min_seen": 40 }
        });
        fs::write(&path, document.to_string()).unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.custom_presets.len(), 1);
        assert_eq!(settings.custom_presets["GOOD"].num_words, 4);
        assert_eq!(settings.default_preset, "DEFAULT");
        assert_eq!(settings.entropy.min_seen, 40);
        assert_eq!(settings.entropy.min_blind, 78);
    }

    #[test]
    fn empty_file_gives_defaults() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert_eq!(Settings::load_from(file.path()).unwrap(), Settings::default());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(Settings::load_from(&path), Err(crate::Error::Json(_))));
    }
}
