//! # OxiBWT Core
//!
//! Core components for the OxiBWT transform suite.
//!
//! This crate provides the building blocks shared by every stage:
//!
//! - [`stream`]: Byte sources/sinks with clean-end detection and counters
//! - [`traits`]: The [`StreamTransform`] interface implemented by each stage
//! - [`error`]: Error types
//!
//! ## Architecture
//!
//! The suite is a set of independent, reversible byte-stream filters that
//! are composed by piping one into the next:
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//! │ BWT + framing│ → │ Move-to-front│ → │ Run-length   │ → entropy coder
//! │ (oxibwt-bwt) │   │ (oxibwt-mtf) │   │ (oxibwt-rle) │   (external)
//! └──────────────┘   └──────────────┘   └──────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use oxibwt_core::stream::{ByteSource, ReadOutcome};
//! use std::io::Cursor;
//!
//! let mut source = ByteSource::new(Cursor::new(vec![1, 2, 3]));
//! let mut buf = [0u8; 4];
//! assert_eq!(source.read_up_to(&mut buf).unwrap(), ReadOutcome::Partial(3));
//! assert_eq!(source.read_up_to(&mut buf).unwrap(), ReadOutcome::CleanEnd);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod stream;
pub mod traits;

// Re-exports for convenience
pub use error::{ErrorKind, OxiBwtError, Result};
pub use stream::{ByteSink, ByteSource, ReadOutcome, StreamStats};
pub use traits::{Direction, StreamTransform};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{ErrorKind, OxiBwtError, Result};
    pub use crate::stream::{ByteSink, ByteSource, ReadOutcome, StreamStats};
    pub use crate::traits::{Direction, StreamTransform};
}
