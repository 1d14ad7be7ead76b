//! Buffered random floats.

use std::collections::VecDeque;

use tracing::debug;

use super::RandomSource;
use crate::error::RngError;

/// Scale applied before reducing a float to an integer range.
const INT_SCALE: f64 = 1_000_000.0;

/// FIFO of floats fetched from a [`RandomSource`] in batches.
#[derive(Debug, Clone)]
pub struct RandomCache {
    queue: VecDeque<f64>,
    batch: usize,
}

impl Default for RandomCache {
    fn default() -> Self {
        Self::new(1)
    }
}

impl RandomCache {
    /// `batch` is the number of floats requested per refill.
    pub fn new(batch: usize) -> Self {
        Self {
            queue: VecDeque::new(),
            batch: batch.max(1),
        }
    }

    pub fn set_batch(&mut self, batch: usize) {
        self.batch = batch.max(1);
    }

    pub fn batch(&self) -> usize {
        self.batch
    }

    /// Drop every buffered float.
    pub fn clear(&mut self) {
        self.queue.clear();
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Next float, refilling from `rng` when the buffer is empty.
    ///
    /// A refill is rejected as a whole if the source returns nothing or
    /// any value outside `[0, 1]`; nothing is buffered in that case.
    pub fn next_float(&mut self, rng: &mut dyn RandomSource) -> Result<f64, RngError> {
        if let Some(n) = self.queue.pop_front() {
            return Ok(n);
        }

        let numbers = rng.random_numbers(self.batch)?;
        if numbers.is_empty() {
            return Err(RngError::NoNumbers {
                source_name: rng.name().to_string(),
            });
        }
        if let Some(&value) = numbers.iter().find(|n| !(0.0..=1.0).contains(*n)) {
            return Err(RngError::OutOfRange {
                source_name: rng.name().to_string(),
                value,
            });
        }
        debug!(source = rng.name(), count = numbers.len(), "refilled random cache");

        self.queue.extend(numbers);
        self.queue.pop_front().ok_or_else(|| RngError::NoNumbers {
            source_name: rng.name().to_string(),
        })
    }

    /// Integer in `0..max`, as `floor(f * 1_000_000) % max`.
    ///
    /// Slightly biased when `max` does not divide one million.
    pub fn next_int(&mut self, rng: &mut dyn RandomSource, max: usize) -> Result<usize, RngError> {
        debug_assert!(max > 0, "next_int needs a non-empty range");
        let n = self.next_float(rng)?;
        Ok(((n * INT_SCALE).floor() as u64 % max.max(1) as u64) as usize)
    }

    /// `count` random decimal digits.
    pub fn next_digits(&mut self, rng: &mut dyn RandomSource, count: usize) -> Result<String, RngError> {
        let mut digits = String::with_capacity(count);
        for _ in 0..count {
            let d = self.next_int(rng, 10)? as u32;
            digits.push(char::from_digit(d, 10).unwrap_or('0'));
        }
        Ok(digits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rand::FixedRandom;

    struct Broken(Vec<f64>);

    impl RandomSource for Broken {
        fn random_numbers(&mut self, _count: usize) -> Result<Vec<f64>, RngError> {
            Ok(self.0.clone())
        }

        fn name(&self) -> &str {
            "broken"
        }
    }

    #[test]
    fn refills_in_batches() {
        let mut rng = FixedRandom::new(vec![0.5]);
        let mut cache = RandomCache::new(4);
        assert_eq!(cache.next_float(&mut rng).unwrap(), 0.5);
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn int_scales_before_modulo() {
        let mut rng = FixedRandom::new(vec![0.0, 0.123_456_7, 0.999_999_9, 1.0]);
        let mut cache = RandomCache::new(4);
        assert_eq!(cache.next_int(&mut rng, 10).unwrap(), 0);
        // floor(123456.7) = 123456, 123456 % 10 = 6
        assert_eq!(cache.next_int(&mut rng, 10).unwrap(), 6);
        assert_eq!(cache.next_int(&mut rng, 7).unwrap(), 999_999 % 7);
        assert_eq!(cache.next_int(&mut rng, 3).unwrap(), 1_000_000 % 3);
    }

    #[test]
    fn digits_are_decimal() {
        let mut rng = FixedRandom::new(vec![0.000_003_5, 0.000_009_5]);
        let mut cache = RandomCache::new(2);
        assert_eq!(cache.next_digits(&mut rng, 4).unwrap(), "3939");
    }

    #[test]
    fn empty_batch_is_an_error() {
        let mut cache = RandomCache::new(2);
        assert!(matches!(
            cache.next_float(&mut Broken(Vec::new())),
            Err(RngError::NoNumbers { .. })
        ));
    }

    #[test]
    fn out_of_range_batch_is_rejected_whole() {
        let mut cache = RandomCache::new(3);
        let err = cache.next_float(&mut Broken(vec![0.2, 1.5, 0.3])).unwrap_err();
        assert!(matches!(err, RngError::OutOfRange { value, .. } if value == 1.5));
        assert!(cache.is_empty());
        assert!(cache.next_float(&mut Broken(vec![f64::NAN])).is_err());
    }

    #[test]
    fn clear_discards_buffered_numbers() {
        let mut rng = FixedRandom::new(vec![0.25]);
        let mut cache = RandomCache::new(8);
        cache.next_float(&mut rng).unwrap();
        assert_eq!(cache.len(), 7);
        cache.clear();
        assert!(cache.is_empty());
    }
}
