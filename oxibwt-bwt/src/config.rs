//! Block size configuration for the framed BWT stream.

use oxibwt_core::{OxiBwtError, Result};

use crate::bwt::SENTINEL_OVERHEAD;

/// Default number of input bytes per block (1 KiB).
pub const DEFAULT_BLOCK_SIZE: usize = 1024;

/// Largest accepted block size (16 MiB).
///
/// Forward sorting is quadratic in the block length, so blocks are kept
/// well below what the 4-byte length prefix could describe.
pub const MAX_BLOCK_SIZE: usize = 16 * 1024 * 1024;

/// Largest payload a frame may declare.
pub const MAX_FRAME_LEN: usize = MAX_BLOCK_SIZE + SENTINEL_OVERHEAD;

/// Number of input bytes transformed per framed block (1..=16 MiB).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlockSize(usize);

impl BlockSize {
    /// Create a block size, rejecting zero and anything above [`MAX_BLOCK_SIZE`].
    pub fn new(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(OxiBwtError::invalid_input("block size must be at least 1"));
        }
        if size > MAX_BLOCK_SIZE {
            return Err(OxiBwtError::invalid_input(format!(
                "block size {size} exceeds maximum {MAX_BLOCK_SIZE}"
            )));
        }
        Ok(Self(size))
    }

    /// Get the block size in bytes.
    pub fn get(&self) -> usize {
        self.0
    }
}

impl Default for BlockSize {
    fn default() -> Self {
        Self(DEFAULT_BLOCK_SIZE)
    }
}

impl TryFrom<usize> for BlockSize {
    type Error = OxiBwtError;

    fn try_from(size: usize) -> Result<Self> {
        Self::new(size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxibwt_core::ErrorKind;

    #[test]
    fn test_block_size() {
        assert_eq!(BlockSize::new(256).unwrap().get(), 256);
        assert_eq!(BlockSize::new(1).unwrap().get(), 1);
        assert_eq!(BlockSize::new(MAX_BLOCK_SIZE).unwrap().get(), MAX_BLOCK_SIZE);
    }

    #[test]
    fn test_block_size_bounds() {
        assert_eq!(BlockSize::new(0).unwrap_err().kind(), ErrorKind::InvalidInput);
        assert_eq!(
            BlockSize::try_from(MAX_BLOCK_SIZE + 1).unwrap_err().kind(),
            ErrorKind::InvalidInput
        );
    }

    #[test]
    fn test_default_block_size() {
        assert_eq!(BlockSize::default().get(), 1024);
        assert!(MAX_FRAME_LEN <= u32::MAX as usize);
    }
}
