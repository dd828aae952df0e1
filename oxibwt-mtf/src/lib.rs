//! Move-to-Front transform for OxiBWT.
//!
//! A single-pass rank transform: each byte is replaced by its position in a
//! recency list and then promoted to the front. The default symbol set has
//! 255 entries (`0x00..=0xFE`); [`Alphabet::Full256`] widens it to every
//! byte value.
//!
//! ## Example
//!
//! ```rust
//! use oxibwt_mtf::{Alphabet, inverse_transform, transform};
//!
//! let ranks = transform(b"BANANA", Alphabet::default()).unwrap();
//! assert_eq!(ranks, [0x42, 0x42, 0x4e, 0x01, 0x01, 0x01]);
//! assert_eq!(inverse_transform(&ranks, Alphabet::default()).unwrap(), b"BANANA");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod mtf;

pub use mtf::{Alphabet, MoveToFront, inverse_transform, transform};
