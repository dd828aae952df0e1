//! Core traits for stream transforms.
//!
//! Every stage of the suite (block-sorting, move-to-front, run-length) is
//! a reversible byte-stream filter. This module defines the interface they
//! share so callers can drive any stage the same way.

use crate::error::Result;
use crate::stream::{ByteSink, ByteSource, StreamStats};
use std::io::{Cursor, Read, Write};

/// Direction of a transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Apply the transform.
    #[default]
    Forward,
    /// Undo the transform.
    Inverse,
}

/// A reversible, single-pass byte-stream transform.
///
/// Each call to [`forward`](StreamTransform::forward) or
/// [`inverse`](StreamTransform::inverse) processes one complete stream and
/// starts from a fresh transform state. Counters observed before a failure
/// remain available on the source and sink.
pub trait StreamTransform {
    /// Short, human-readable name of the stage.
    fn name(&self) -> &'static str;

    /// Apply the transform to `input`, writing into `output`.
    fn forward<R: Read, W: Write>(
        &mut self,
        input: &mut ByteSource<R>,
        output: &mut ByteSink<W>,
    ) -> Result<StreamStats>;

    /// Undo the transform on `input`, writing into `output`.
    fn inverse<R: Read, W: Write>(
        &mut self,
        input: &mut ByteSource<R>,
        output: &mut ByteSink<W>,
    ) -> Result<StreamStats>;

    /// Run the transform in the given direction.
    fn run<R: Read, W: Write>(
        &mut self,
        direction: Direction,
        input: &mut ByteSource<R>,
        output: &mut ByteSink<W>,
    ) -> Result<StreamStats> {
        match direction {
            Direction::Forward => self.forward(input, output),
            Direction::Inverse => self.inverse(input, output),
        }
    }

    /// Apply the transform to an in-memory buffer (convenience method).
    fn forward_to_vec(&mut self, data: &[u8]) -> Result<Vec<u8>> {
        let mut input = ByteSource::new(Cursor::new(data));
        let mut output = ByteSink::new(Vec::with_capacity(data.len()));
        self.forward(&mut input, &mut output)?;
        Ok(output.into_inner())
    }

    /// Undo the transform on an in-memory buffer (convenience method).
    fn inverse_to_vec(&mut self, data: &[u8]) -> Result<Vec<u8>> {
        let mut input = ByteSource::new(Cursor::new(data));
        let mut output = ByteSink::new(Vec::with_capacity(data.len()));
        self.inverse(&mut input, &mut output)?;
        Ok(output.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::stats;

    /// XOR every byte with a key; its own inverse.
    struct XorStage(u8);

    impl StreamTransform for XorStage {
        fn name(&self) -> &'static str {
            "xor"
        }

        fn forward<R: Read, W: Write>(
            &mut self,
            input: &mut ByteSource<R>,
            output: &mut ByteSink<W>,
        ) -> Result<StreamStats> {
            while let Some(b) = input.read_byte()? {
                output.write_byte(b ^ self.0)?;
            }
            Ok(stats(input, output))
        }

        fn inverse<R: Read, W: Write>(
            &mut self,
            input: &mut ByteSource<R>,
            output: &mut ByteSink<W>,
        ) -> Result<StreamStats> {
            self.forward(input, output)
        }
    }

    #[test]
    fn test_direction_default() {
        assert_eq!(Direction::default(), Direction::Forward);
    }

    #[test]
    fn test_to_vec_helpers() {
        let mut stage = XorStage(0x5A);
        let encoded = stage.forward_to_vec(b"abc").unwrap();
        assert_ne!(encoded, b"abc");
        assert_eq!(stage.inverse_to_vec(&encoded).unwrap(), b"abc");
    }

    #[test]
    fn test_run_reports_stats() {
        let mut stage = XorStage(1);
        let mut input = ByteSource::new(Cursor::new(b"four".to_vec()));
        let mut output = ByteSink::new(Vec::new());
        let stats = stage
            .run(Direction::Inverse, &mut input, &mut output)
            .unwrap();
        assert_eq!(stats.bytes_read, 4);
        assert_eq!(stats.bytes_written, 4);
    }
}
