//! Persisted user settings: default preset, custom presets and entropy
//! thresholds.

mod file;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::config::{self, Config, PartialConfig, merge_overrides, presets, validate};
use crate::entropy::EntropySettings;
use crate::{Error, Result};

pub use file::get_path;

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub default_preset: String,
    /// User presets keyed by upper-case name. These shadow built-ins.
    pub custom_presets: BTreeMap<String, Config>,
    pub entropy: EntropySettings,
    /// Word list used instead of the built-in one.
    pub dictionary: Option<PathBuf>,
    /// Short name of the random source, see [`crate::rand::by_name`].
    pub rng: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_preset: presets::DEFAULT_PRESET.to_string(),
            custom_presets: BTreeMap::new(),
            entropy: EntropySettings::default(),
            dictionary: None,
            rng: None,
        }
    }
}

impl Settings {
    /// Load from the default location, writing defaults if no file exists.
    pub fn load() -> Result<Self> {
        let path = get_path();
        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let settings = Settings::default();
            settings.save_to(&path)?;
            return Ok(settings);
        }
        Self::load_from(&path)
    }

    pub fn save(&self) -> Result<()> {
        let path = get_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        self.save_to(&path)
    }

    /// Read settings from `path`. An empty file yields the defaults.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        file::read(path.as_ref())
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        file::write(self, path.as_ref())
    }

    /// Resolve a preset by name, custom presets first.
    pub fn preset(&self, name: &str, overrides: Option<&PartialConfig>) -> Result<Config> {
        match self.custom_presets.get(&name.to_ascii_uppercase()) {
            Some(config) => match overrides {
                Some(overrides) => Ok(merge_overrides(config, overrides)?),
                None => Ok(config.clone()),
            },
            None => config::preset(name, overrides),
        }
    }

    /// The configured default preset.
    pub fn default_config(&self) -> Result<Config> {
        self.preset(&self.default_preset, None)
    }

    /// Built-in and custom preset names, built-ins first.
    pub fn preset_names(&self) -> Vec<String> {
        let mut names: Vec<String> = presets::preset_names()
            .iter()
            .map(|name| name.to_string())
            .collect();
        for name in self.custom_presets.keys() {
            if !names.contains(name) {
                names.push(name.clone());
            }
        }
        names
    }

    pub fn has_preset(&self, name: &str) -> bool {
        let name = name.to_ascii_uppercase();
        self.custom_presets.contains_key(&name) || presets::preset_names().contains(&name.as_str())
    }

    /// Store a validated custom preset under `name`.
    pub fn add_preset(&mut self, name: &str, config: Config) -> Result<()> {
        validate(&config)?;
        self.custom_presets.insert(name.to_ascii_uppercase(), config);
        Ok(())
    }

    pub fn remove_preset(&mut self, name: &str) -> Option<Config> {
        self.custom_presets.remove(&name.to_ascii_uppercase())
    }

    /// Make `name` the default preset.
    pub fn set_default_preset(&mut self, name: &str) -> Result<()> {
        if !self.has_preset(name) {
            return Err(Error::UnknownPreset(name.to_string()));
        }
        self.default_preset = name.to_ascii_uppercase();
        Ok(())
    }

    fn check_default_preset(&mut self) {
        if !self.has_preset(&self.default_preset) {
            warn!(
                preset = %self.default_preset,
                "default preset does not exist, using {}",
                presets::DEFAULT_PRESET
            );
            self.default_preset = presets::DEFAULT_PRESET.to_string();
        }
    }
}
