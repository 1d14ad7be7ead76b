//! Random floats read straight from /dev/urandom.

use std::fs::File;
use std::io::Read;

use zeroize::{Zeroize, Zeroizing};

use super::{RandomSource, unit_float};
use crate::error::RngError;

const PATH: &str = "/dev/urandom";

pub fn is_available() -> bool {
    std::path::Path::new(PATH).exists()
}

/// Reads 8 bytes per float from the kernel's urandom device.
#[derive(Debug)]
pub struct DevUrandom {
    file: File,
}

impl DevUrandom {
    pub fn open() -> Result<Self, RngError> {
        let file = File::open(PATH).map_err(|error| RngError::Io {
            source_name: PATH.to_string(),
            error,
        })?;
        Ok(Self::from_file(file))
    }

    fn from_file(file: File) -> Self {
        Self { file }
    }
}

impl RandomSource for DevUrandom {
    fn random_numbers(&mut self, count: usize) -> Result<Vec<f64>, RngError> {
        let count = count.max(1);
        // Wiped on drop, including when the read fails part way.
        let mut buf = Zeroizing::new(vec![0u8; count * 8]);
        self.file
            .read_exact(&mut buf)
            .map_err(|error| RngError::Io {
                source_name: PATH.to_string(),
                error,
            })?;

        let numbers = buf
            .chunks_exact(8)
            .map(|chunk| {
                let mut bytes = [0u8; 8];
                bytes.copy_from_slice(chunk);
                let n = u64::from_le_bytes(bytes);
                bytes.zeroize();
                unit_float(n)
            })
            .collect();
        Ok(numbers)
    }

    fn name(&self) -> &str {
        PATH
    }
}
