//! Operating system CSPRNG.

use ::rand::RngCore;
use ::rand::rngs::OsRng;

use super::{RandomSource, unit_float};
use crate::error::RngError;

/// Floats drawn from the operating system's secure generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl OsRandom {
    pub fn new() -> Self {
        OsRandom
    }
}

impl RandomSource for OsRandom {
    fn random_numbers(&mut self, count: usize) -> Result<Vec<f64>, RngError> {
        let mut rng = OsRng;
        let mut numbers = Vec::with_capacity(count.max(1));
        for _ in 0..count.max(1) {
            let mut bytes = [0u8; 8];
            rng.try_fill_bytes(&mut bytes).map_err(|e| RngError::Io {
                source_name: self.name().to_string(),
                error: std::io::Error::other(e.to_string()),
            })?;
            numbers.push(unit_float(u64::from_le_bytes(bytes)));
        }
        Ok(numbers)
    }

    fn name(&self) -> &str {
        "os"
    }
}
