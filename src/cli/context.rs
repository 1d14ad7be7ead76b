//! CLI context - bundles flags, settings and the generator.

use std::path::PathBuf;

use copypasta::{ClipboardContext, ClipboardProvider};
use thiserror::Error;
use tracing::debug;
use zeroize::Zeroize;

use super::{CliFlags, help, prompts, quiet};
use crate::terminal::{
    BOLD, GREEN, RED, RESET, YELLOW, box_bottom, box_opt, box_pair, box_rule, box_top,
    format_big, format_number,
};
use xkpass::config::{self, presets};
use xkpass::entropy::{self, EntropyWarning};
use xkpass::words::{DefaultDictionary, Dictionary, FileDictionary};
use xkpass::{Config, Generator, Settings};

/// Name custom configurations are stored under by `--save-default`.
const SAVED_PRESET: &str = "SAVED";

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Library(#[from] xkpass::Error),

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("--save-default needs --preset, --config or --overrides")]
    NothingToSave,

    #[error("aborted")]
    Aborted,
}

/// Application context for one CLI run.
pub struct Context {
    flags: CliFlags,
    settings: Settings,
    /// What the configuration was built from, for the statistics box.
    label: String,
}

impl Context {
    pub fn new(flags: CliFlags) -> Self {
        let settings = Settings::load().unwrap_or_else(|e| {
            prompts::settings_unreadable(&e);
            Settings::default()
        });
        Self {
            flags,
            settings,
            label: String::new(),
        }
    }

    pub fn run(&mut self) -> Result<(), CliError> {
        quiet::set(self.flags.quiet);
        if self.handle_info_flags() {
            return Ok(());
        }

        let config = self.resolve_config()?;
        let mut generator = self.build_generator(config)?;

        if self.flags.save_default {
            self.save_default(generator.config())?;
        }

        let count = self.flags.number.unwrap_or(1);
        let mut passwords = generator.passwords(count)?;
        debug!(count, "generated passwords");

        if self.flags.stats && !quiet::enabled() {
            self.print_stats(&generator);
        }
        let result = self.output(&passwords);
        passwords.zeroize();
        result
    }

    /// Returns true if an informational flag was handled.
    fn handle_info_flags(&self) -> bool {
        if self.flags.help {
            help::print_help();
        } else if self.flags.version {
            println!("xkpass {}", env!("CARGO_PKG_VERSION"));
        } else if self.flags.list_presets {
            self.list_presets();
        }
        self.flags.is_info()
    }

    fn list_presets(&self) {
        box_top("Presets");
        for name in self.settings.preset_names() {
            let marker = if name == self.settings.default_preset { " *" } else { "" };
            let description = if self.settings.custom_presets.contains_key(&name) {
                "Custom preset from the settings file."
            } else {
                presets::preset_description(&name).unwrap_or("")
            };
            box_opt(&format!("  {name}{marker}"), description);
        }
        box_bottom();
    }

    // ========================================================================
    // Setup
    // ========================================================================

    fn resolve_config(&mut self) -> Result<Config, CliError> {
        let mut config = match (&self.flags.config, &self.flags.preset) {
            (Some(path), _) => {
                let json = std::fs::read_to_string(path).map_err(|source| CliError::Read {
                    path: path.clone(),
                    source,
                })?;
                self.label = path.display().to_string();
                Config::from_json(&json)?
            }
            (None, Some(name)) => {
                self.label = name.to_ascii_uppercase();
                self.settings.preset(name, None)?
            }
            (None, None) => {
                self.label = self.settings.default_preset.clone();
                self.settings.default_config()?
            }
        };

        if let Some(overrides) = &self.flags.overrides {
            let value: serde_json::Value =
                serde_json::from_str(overrides).map_err(xkpass::Error::from)?;
            config = config::merge_json(&config, value)?;
            self.label.push_str(" + overrides");
        }
        Ok(config)
    }

    fn build_generator(&self, config: Config) -> Result<Generator, CliError> {
        let mut settings = self.settings.entropy;
        if let Some(level) = self.flags.warn {
            settings.warnings = level;
        }

        let dictionary: Box<dyn Dictionary> =
            match self.flags.dictionary.as_ref().or(self.settings.dictionary.as_ref()) {
                Some(path) => Box::new(FileDictionary::open(path)?),
                None => Box::new(DefaultDictionary),
            };

        let rng_name = self
            .flags
            .rng
            .as_deref()
            .or(self.settings.rng.as_deref())
            .unwrap_or("os");
        let rng = xkpass::rand::by_name(rng_name).map_err(xkpass::Error::from)?;

        Ok(Generator::with_settings(config, dictionary, rng, settings)?)
    }

    fn save_default(&mut self, config: &Config) -> Result<(), CliError> {
        let custom = self.flags.config.is_some() || self.flags.overrides.is_some();
        match (&self.flags.preset, custom) {
            (_, true) => {
                self.settings.add_preset(SAVED_PRESET, config.clone())?;
                self.settings.set_default_preset(SAVED_PRESET)?;
            }
            (Some(name), false) => self.settings.set_default_preset(name)?,
            (None, false) => return Err(CliError::NothingToSave),
        }
        if let Some(path) = &self.flags.dictionary {
            self.settings.dictionary = Some(path.clone());
        }
        if let Some(rng) = &self.flags.rng {
            self.settings.rng = Some(rng.to_ascii_lowercase());
        }
        if let Some(level) = self.flags.warn {
            self.settings.entropy.warnings = level;
        }
        self.settings.save()?;
        prompts::default_saved(&self.settings.default_preset);
        Ok(())
    }

    // ========================================================================
    // Output
    // ========================================================================

    fn output(&self, passwords: &[String]) -> Result<(), CliError> {
        if self.flags.clipboard {
            match ClipboardContext::new() {
                Ok(mut ctx) => {
                    let mut joined = passwords.join("\n");
                    let result = ctx.set_contents(joined.clone());
                    joined.zeroize();
                    match result {
                        Ok(()) => {
                            if let Ok(mut retrieved) = ctx.get_contents() {
                                retrieved.zeroize();
                            }
                            prompts::clipboard_copied(passwords.len());
                            return Ok(());
                        }
                        Err(e) => prompts::clipboard_error(&e.to_string()),
                    }
                }
                Err(e) => debug!("clipboard unavailable: {e}"),
            }
            if !prompts::clipboard_fallback_prompt() {
                return Err(CliError::Aborted);
            }
        }

        for password in passwords {
            println!("{password}");
        }
        Ok(())
    }

    fn print_stats(&self, generator: &Generator) {
        let stats = generator.stats();
        let config = generator.config();

        box_top("Statistics");
        box_pair("Configuration", &self.label);
        box_pair("Dictionary", &generator.dictionary_source());
        box_pair(
            "Words available",
            &format!(
                "{} of {}",
                format_number(stats.words_available),
                format_number(generator.word_cache().all_words().len())
            ),
        );
        box_pair("Random source", generator.random_source_name());
        box_rule();
        box_pair(
            "Length",
            &if stats.length.length_min == stats.length.length_max {
                format!("{} characters", stats.length.length_min)
            } else {
                format!(
                    "{} to {} characters",
                    stats.length.length_min, stats.length.length_max
                )
            },
        );
        box_pair(
            "Random draws per password",
            &stats.length.random_draws_required.to_string(),
        );
        box_pair("Words per password", &config.num_words.to_string());
        box_rule();
        box_pair(
            "Blind entropy",
            &format!(
                "{:.2} to {:.2} bits ({})",
                stats.blind.entropy_min,
                stats.blind.entropy_max,
                rated(stats.blind.entropy_min)
            ),
        );
        box_pair(
            "Blind permutations",
            &format_big(&stats.blind.permutations_avg.to_string()),
        );
        box_pair(
            "Seen entropy",
            &format!("{:.2} bits ({})", stats.seen.entropy, rated(stats.seen.entropy)),
        );
        box_pair(
            "Seen permutations",
            &format_big(&stats.seen.permutations.to_string()),
        );

        let warnings = entropy::check_warnings(stats, generator.entropy_settings());
        if !warnings.is_empty() {
            box_rule();
            for warning in warnings {
                let label = match warning {
                    EntropyWarning::Blind { .. } => "Blind",
                    EntropyWarning::Seen { .. } => "Seen",
                };
                box_pair(&format!("{YELLOW}Warning{RESET}"), &format!("{label} entropy is low"));
            }
        }
        box_bottom();
    }
}

/// Bits with a coloured strength label.
fn rated(bits: f64) -> String {
    let label = entropy::strength(bits);
    let colour = match label {
        "Weak" => RED,
        "Fair" => YELLOW,
        _ => GREEN,
    };
    format!("{colour}{BOLD}{label}{RESET}")
}
