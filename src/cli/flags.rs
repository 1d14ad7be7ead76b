use std::path::PathBuf;

use xkpass::WarningLevel;

#[derive(Debug, Default)]
pub struct CliFlags {
    pub help: bool,
    pub version: bool,
    pub quiet: bool,
    pub verbose: bool,
    pub stats: bool,
    pub clipboard: bool,
    pub list_presets: bool,
    pub save_default: bool,
    pub preset: Option<String>,
    pub config: Option<PathBuf>,
    pub overrides: Option<String>,
    pub dictionary: Option<PathBuf>,
    pub rng: Option<String>,
    pub number: Option<usize>,
    pub warn: Option<WarningLevel>,
}

impl CliFlags {
    /// Flags that only print information and exit.
    pub fn is_info(&self) -> bool {
        self.help || self.version || self.list_presets
    }

    /// Tracing filter implied by `--quiet` and `--verbose`, if any.
    pub fn log_filter(&self) -> Option<&'static str> {
        if self.quiet {
            Some("error")
        } else if self.verbose {
            Some("debug")
        } else {
            None
        }
    }
}
