//! Run-length codec configuration.

use oxibwt_core::{OxiBwtError, Result};

/// Largest supported width of the run count field, in bytes.
pub const MAX_RUN_LENGTH_BYTES: usize = 8;

/// Run-length codec parameters.
///
/// A run of at least `min_run` identical bytes is written as `min_run`
/// literal copies followed by the number of further copies, little-endian,
/// in exactly `run_length_bytes` bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RleConfig {
    min_run: usize,
    run_length_bytes: usize,
}

impl RleConfig {
    /// Default escape threshold.
    pub const DEFAULT_MIN_RUN: usize = 4;
    /// Default width of the run count field.
    pub const DEFAULT_RUN_LENGTH_BYTES: usize = 1;

    /// Create a configuration.
    ///
    /// `min_run` must be at least 1; `run_length_bytes` must be in
    /// `1..=MAX_RUN_LENGTH_BYTES`.
    pub fn new(min_run: usize, run_length_bytes: usize) -> Result<Self> {
        if min_run == 0 {
            return Err(OxiBwtError::invalid_input("minimum run must be at least 1"));
        }
        if !(1..=MAX_RUN_LENGTH_BYTES).contains(&run_length_bytes) {
            return Err(OxiBwtError::invalid_input(format!(
                "run length field must be 1-{MAX_RUN_LENGTH_BYTES} bytes, got {run_length_bytes}"
            )));
        }
        Ok(Self {
            min_run,
            run_length_bytes,
        })
    }

    /// Number of identical bytes that triggers the escape form.
    pub fn min_run(&self) -> usize {
        self.min_run
    }

    /// Width of the run count field in bytes.
    pub fn run_length_bytes(&self) -> usize {
        self.run_length_bytes
    }

    /// Largest extra count the field can hold.
    pub fn max_extra(&self) -> u64 {
        if self.run_length_bytes >= MAX_RUN_LENGTH_BYTES {
            u64::MAX
        } else {
            (1u64 << (8 * self.run_length_bytes)) - 1
        }
    }

    /// Longest run a single escape sequence can describe.
    pub fn max_run(&self) -> u64 {
        (self.min_run as u64).saturating_add(self.max_extra())
    }

    /// Little-endian encoding of `extra` in exactly `run_length_bytes` bytes.
    pub fn encode_extra(&self, extra: u64) -> ([u8; MAX_RUN_LENGTH_BYTES], usize) {
        (extra.to_le_bytes(), self.run_length_bytes)
    }
}

impl Default for RleConfig {
    fn default() -> Self {
        Self {
            min_run: Self::DEFAULT_MIN_RUN,
            run_length_bytes: Self::DEFAULT_RUN_LENGTH_BYTES,
        }
    }
}
