//! Run-length coding for OxiBWT.
//!
//! A run of `min_run` or more identical bytes is stored as `min_run` literal
//! copies followed by a little-endian count of the remaining copies. Shorter
//! runs are stored verbatim. Runs too long for the count field are split.
//!
//! ## Example
//!
//! ```rust
//! use oxibwt_rle::{RleConfig, compress, decompress};
//!
//! let config = RleConfig::new(1, 1).unwrap();
//! let packed = compress(b"Test    !!!", config).unwrap();
//! assert_eq!(packed, b"T\x00e\x00s\x00t\x00 \x03!\x02");
//! assert_eq!(decompress(&packed, config).unwrap(), b"Test    !!!");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod config;
mod rle;

pub use config::{MAX_RUN_LENGTH_BYTES, RleConfig};
pub use rle::RunLengthCodec;

use oxibwt_core::{Result, StreamTransform};

/// Compress an in-memory buffer.
pub fn compress(data: &[u8], config: RleConfig) -> Result<Vec<u8>> {
    RunLengthCodec::new(config).forward_to_vec(data)
}

/// Decompress an in-memory buffer.
pub fn decompress(data: &[u8], config: RleConfig) -> Result<Vec<u8>> {
    RunLengthCodec::new(config).inverse_to_vec(data)
}
