//! Random number sources and the buffered draw cache.

mod cache;
mod fixed;
mod os;
pub mod urand;

pub use cache::RandomCache;
pub use fixed::FixedRandom;
pub use os::OsRandom;
pub use urand::DevUrandom;

use crate::error::RngError;

/// A source of random floats in `[0, 1]`.
pub trait RandomSource {
    /// Produce random numbers. `count` is a hint: implementations may
    /// return more or fewer, but must return at least one.
    fn random_numbers(&mut self, count: usize) -> Result<Vec<f64>, RngError>;

    /// Name shown in statistics and error messages.
    fn name(&self) -> &str;
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn random_numbers(&mut self, count: usize) -> Result<Vec<f64>, RngError> {
        (**self).random_numbers(count)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Names accepted by [`by_name`].
pub const SOURCE_NAMES: [&str; 2] = ["os", "urandom"];

/// Open a random source by its short name.
pub fn by_name(name: &str) -> Result<Box<dyn RandomSource>, RngError> {
    match name.to_ascii_lowercase().as_str() {
        "os" => Ok(Box::new(OsRandom::new())),
        "urandom" => Ok(Box::new(DevUrandom::open()?)),
        other => Err(RngError::Io {
            source_name: other.to_string(),
            error: std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("unknown random source, expected one of {}", SOURCE_NAMES.join(", ")),
            ),
        }),
    }
}

/// Convert 64 random bits into a float in `[0, 1)` using the top 53 bits.
#[inline]
pub(crate) fn unit_float(bits: u64) -> f64 {
    (bits >> 11) as f64 / (1u64 << 53) as f64
}
