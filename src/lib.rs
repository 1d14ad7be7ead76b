//! Memorable password generation from random dictionary words.
//!
//! Passwords are assembled from words drawn out of a [`words::Dictionary`]
//! using numbers from a [`rand::RandomSource`], shaped by a validated
//! [`config::Config`]. Every configuration change also recomputes blind and
//! seen entropy statistics in [`entropy`].

pub mod config;
pub mod entropy;
mod error;
pub mod pass;
pub mod rand;
pub mod settings;
pub mod words;

pub use config::{Config, Key, PartialConfig};
pub use entropy::{EntropySettings, EntropyStats, EntropyWarning, WarningLevel};
pub use error::{ConfigError, Error, RngError};
pub use pass::Generator;
pub use settings::Settings;

/// Result type for the library.
pub type Result<T> = std::result::Result<T, Error>;
