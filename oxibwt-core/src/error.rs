//! Error types for OxiBWT operations.
//!
//! Every failure raised by a transform falls into one of three categories
//! (see [`ErrorKind`]): the caller handed over data the transform cannot
//! accept, an encoded stream is structurally broken, or the underlying
//! reader/writer failed. All of them are terminal for the call that raised
//! them; output already written is not retracted.

use std::io;
use thiserror::Error;

/// The main error type for OxiBWT operations.
#[derive(Debug, Error)]
pub enum OxiBwtError {
    /// I/O error from underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Input data or parameters the transform cannot accept.
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// Description of the rejected input.
        message: String,
    },

    /// Move-to-front forward transform met a byte that is not in its table.
    #[error("Symbol {symbol:#04x} not found in move-to-front table")]
    SymbolNotFound {
        /// The byte that has no rank.
        symbol: u8,
    },

    /// Move-to-front inverse transform met a rank beyond the table.
    #[error("Rank {rank} out of range for move-to-front table of {table_len} symbols")]
    RankOutOfRange {
        /// The rank read from the stream.
        rank: u8,
        /// Number of symbols in the table.
        table_len: usize,
    },

    /// Encoded stream is truncated or structurally invalid.
    #[error("Malformed stream at offset {offset}: {message}")]
    MalformedStream {
        /// Byte offset into the input where the problem was detected.
        offset: u64,
        /// Description of the problem.
        message: String,
    },
}

/// Result type alias for OxiBWT operations.
pub type Result<T> = std::result::Result<T, OxiBwtError>;

/// Coarse failure category of an [`OxiBwtError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Data or parameters rejected before any decoding took place.
    InvalidInput,
    /// An encoded stream ended early or declared impossible lengths.
    MalformedStream,
    /// The source or sink failed.
    IoFailure,
}

impl OxiBwtError {
    /// Create an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a symbol not found error.
    pub fn symbol_not_found(symbol: u8) -> Self {
        Self::SymbolNotFound { symbol }
    }

    /// Create a rank out of range error.
    pub fn rank_out_of_range(rank: u8, table_len: usize) -> Self {
        Self::RankOutOfRange { rank, table_len }
    }

    /// Create a malformed stream error.
    pub fn malformed(offset: u64, message: impl Into<String>) -> Self {
        Self::MalformedStream {
            offset,
            message: message.into(),
        }
    }

    /// The failure category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Io(_) => ErrorKind::IoFailure,
            Self::InvalidInput { .. } | Self::SymbolNotFound { .. } | Self::RankOutOfRange { .. } => {
                ErrorKind::InvalidInput
            }
            Self::MalformedStream { .. } => ErrorKind::MalformedStream,
        }
    }
}
