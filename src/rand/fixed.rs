//! Replays a fixed sequence of numbers, for reproducible passwords.

use super::RandomSource;
use crate::error::RngError;

/// Returns the given numbers in order, wrapping around at the end.
///
/// Values are handed out as-is; range checking happens in the cache.
#[derive(Debug, Clone)]
pub struct FixedRandom {
    numbers: Vec<f64>,
    pos: usize,
}

impl FixedRandom {
    pub fn new(numbers: Vec<f64>) -> Self {
        Self { numbers, pos: 0 }
    }

    /// Always returns `0.0`, so every pick selects the first option.
    pub fn zero() -> Self {
        Self::new(vec![0.0])
    }
}

impl RandomSource for FixedRandom {
    fn random_numbers(&mut self, count: usize) -> Result<Vec<f64>, RngError> {
        if self.numbers.is_empty() {
            return Ok(Vec::new());
        }
        let numbers = (0..count.max(1))
            .map(|_| {
                let n = self.numbers[self.pos];
                self.pos = (self.pos + 1) % self.numbers.len();
                n
            })
            .collect();
        Ok(numbers)
    }

    fn name(&self) -> &str {
        "fixed sequence"
    }
}
