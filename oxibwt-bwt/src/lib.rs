//! Burrows-Wheeler Transform for OxiBWT.
//!
//! This crate provides a sentinel-delimited BWT and the block framing that
//! makes it usable on unbounded streams.
//!
//! - [`bwt`]: forward/inverse transform of a single in-memory block
//! - [`framer`]: splits a stream into blocks and writes each transformed
//!   block behind a 4-byte little-endian length
//!
//! ## Example
//!
//! ```rust
//! use oxibwt_bwt::{BlockSize, bwt, decode, encode};
//!
//! assert_eq!(bwt::transform(b"BANANA").unwrap(), b"\x03ANNB\x02AA");
//!
//! let framed = encode(b"BANANA", BlockSize::default()).unwrap();
//! assert_eq!(&framed[..4], &[8, 0, 0, 0]);
//! assert_eq!(decode(&framed).unwrap(), b"BANANA");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

/// Single-block Burrows-Wheeler Transform.
pub mod bwt;
mod config;
/// Length-prefixed block framing.
pub mod framer;

pub use config::{BlockSize, DEFAULT_BLOCK_SIZE, MAX_BLOCK_SIZE, MAX_FRAME_LEN};
pub use framer::{BlockFramer, FrameReader};

use oxibwt_core::{Result, StreamTransform};

/// Transform and frame an in-memory buffer.
pub fn encode(data: &[u8], block_size: BlockSize) -> Result<Vec<u8>> {
    BlockFramer::new(block_size).forward_to_vec(data)
}

/// Decode a framed stream held in memory.
pub fn decode(data: &[u8]) -> Result<Vec<u8>> {
    BlockFramer::default().inverse_to_vec(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_small_blocks() {
        let original = b"the quick brown fox jumps over the lazy dog";
        for size in [1, 2, 7, 64] {
            let framed = encode(original, BlockSize::new(size).unwrap()).unwrap();
            assert_eq!(decode(&framed).unwrap(), original.as_slice());
        }
    }

    #[test]
    fn test_block_count() {
        let framed = encode(b"abcdefghij", BlockSize::new(4).unwrap()).unwrap();
        // 3 frames: 4 + 4 + 2 input bytes, each +2 sentinels and +4 prefix
        assert_eq!(framed.len(), (4 + 2 + 4) * 2 + (2 + 2 + 4));
    }
}
