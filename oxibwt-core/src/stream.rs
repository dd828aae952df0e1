//! Byte sources and sinks for stream transforms.
//!
//! Transforms never touch files or process state; they consume a
//! [`ByteSource`] and produce into a [`ByteSink`]. Both wrap a plain
//! `std::io` reader/writer and keep running byte counters, which stay
//! readable after a failure.
//!
//! A read has three distinguishable results: data was returned, the
//! stream ended cleanly, or the reader failed. [`ReadOutcome`] carries the
//! first two, the `Err` arm of [`Result`] the third.

use crate::error::Result;
use std::io::{self, Read, Write};

/// Result of a bounded read from a [`ByteSource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadOutcome {
    /// The whole buffer was filled.
    Filled,
    /// The stream ended after this many bytes (at least one, fewer than asked).
    Partial(usize),
    /// The stream ended before any byte was read.
    CleanEnd,
}

impl ReadOutcome {
    /// Number of bytes placed into a buffer of `requested` bytes.
    pub fn byte_count(&self, requested: usize) -> usize {
        match *self {
            Self::Filled => requested,
            Self::Partial(n) => n,
            Self::CleanEnd => 0,
        }
    }

    /// True if the stream ended during this read.
    pub fn hit_end(&self) -> bool {
        !matches!(self, Self::Filled)
    }
}

/// Byte counters for one stream-processing call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamStats {
    /// Bytes consumed from the source.
    pub bytes_read: u64,
    /// Bytes produced into the sink.
    pub bytes_written: u64,
}

/// A blocking byte source with clean-end detection.
#[derive(Debug)]
pub struct ByteSource<R> {
    inner: R,
    bytes_read: u64,
}

impl<R: Read> ByteSource<R> {
    /// Wrap a reader.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            bytes_read: 0,
        }
    }

    /// Read until `buf` is full or the stream ends.
    ///
    /// Interrupted reads are retried; any other reader error is returned
    /// as-is. An empty `buf` always reports [`ReadOutcome::Filled`].
    pub fn read_up_to(&mut self, buf: &mut [u8]) -> Result<ReadOutcome> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => {
                    filled += n;
                    self.bytes_read += n as u64;
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }

        Ok(if filled == buf.len() {
            ReadOutcome::Filled
        } else if filled == 0 {
            ReadOutcome::CleanEnd
        } else {
            ReadOutcome::Partial(filled)
        })
    }

    /// Read a single byte, `None` on clean end of stream.
    pub fn read_byte(&mut self) -> Result<Option<u8>> {
        let mut byte = [0u8; 1];
        match self.read_up_to(&mut byte)? {
            ReadOutcome::Filled => Ok(Some(byte[0])),
            _ => Ok(None),
        }
    }

    /// Total bytes read so far.
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    /// Get a reference to the wrapped reader.
    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Unwrap the reader.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

/// A blocking byte sink that refuses to silently lose data.
#[derive(Debug)]
pub struct ByteSink<W> {
    inner: W,
    bytes_written: u64,
}

impl<W: Write> ByteSink<W> {
    /// Wrap a writer.
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            bytes_written: 0,
        }
    }

    /// Write every byte of `data`.
    ///
    /// A write that accepts zero bytes without an error is reported as
    /// [`io::ErrorKind::WriteZero`] instead of being retried forever.
    pub fn write_all(&mut self, data: &[u8]) -> Result<()> {
        let mut written = 0;
        while written < data.len() {
            match self.inner.write(&data[written..]) {
                Ok(0) => {
                    return Err(io::Error::new(
                        io::ErrorKind::WriteZero,
                        "sink accepted zero bytes",
                    )
                    .into());
                }
                Ok(n) => {
                    written += n;
                    self.bytes_written += n as u64;
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }

    /// Write a single byte.
    pub fn write_byte(&mut self, byte: u8) -> Result<()> {
        self.write_all(&[byte])
    }

    /// Flush the wrapped writer.
    pub fn flush(&mut self) -> Result<()> {
        self.inner.flush()?;
        Ok(())
    }

    /// Total bytes written so far.
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Get a mutable reference to the wrapped writer.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    /// Unwrap the writer.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

/// Collect the counters of a source/sink pair.
pub fn stats<R: Read, W: Write>(source: &ByteSource<R>, sink: &ByteSink<W>) -> StreamStats {
    StreamStats {
        bytes_read: source.bytes_read(),
        bytes_written: sink.bytes_written(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, OxiBwtError};
    use std::io::Cursor;

    /// Reader that hands out one byte per call and is interrupted in between.
    struct Trickle {
        data: Vec<u8>,
        pos: usize,
        interrupt: bool,
    }

    impl Read for Trickle {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.interrupt = !self.interrupt;
            if self.interrupt {
                return Err(io::Error::new(io::ErrorKind::Interrupted, "again"));
            }
            if self.pos >= self.data.len() || buf.is_empty() {
                return Ok(0);
            }
            buf[0] = self.data[self.pos];
            self.pos += 1;
            Ok(1)
        }
    }

    struct Failing;

    impl Read for Failing {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset"))
        }
    }

    struct ZeroWriter;

    impl Write for ZeroWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Ok(0)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_read_outcomes() {
        let mut source = ByteSource::new(Cursor::new(b"abcdef".to_vec()));
        let mut buf = [0u8; 4];

        assert_eq!(source.read_up_to(&mut buf).unwrap(), ReadOutcome::Filled);
        assert_eq!(&buf, b"abcd");

        assert_eq!(source.read_up_to(&mut buf).unwrap(), ReadOutcome::Partial(2));
        assert_eq!(&buf[..2], b"ef");

        assert_eq!(source.read_up_to(&mut buf).unwrap(), ReadOutcome::CleanEnd);
        assert_eq!(source.bytes_read(), 6);
    }

    #[test]
    fn test_read_retries_interrupted() {
        let mut source = ByteSource::new(Trickle {
            data: b"xyz".to_vec(),
            pos: 0,
            interrupt: false,
        });
        let mut buf = [0u8; 3];
        assert_eq!(source.read_up_to(&mut buf).unwrap(), ReadOutcome::Filled);
        assert_eq!(&buf, b"xyz");
        assert_eq!(source.read_byte().unwrap(), None);
    }

    #[test]
    fn test_read_failure_propagates() {
        let mut source = ByteSource::new(Failing);
        let err = source.read_byte().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IoFailure);
    }

    #[test]
    fn test_outcome_len() {
        assert_eq!(ReadOutcome::Filled.byte_count(8), 8);
        assert_eq!(ReadOutcome::Partial(3).byte_count(8), 3);
        assert_eq!(ReadOutcome::CleanEnd.byte_count(8), 0);
        assert!(ReadOutcome::Partial(3).hit_end());
        assert!(!ReadOutcome::Filled.hit_end());
    }

    #[test]
    fn test_sink_counts() {
        let mut sink = ByteSink::new(Vec::new());
        sink.write_all(b"hello").unwrap();
        sink.write_byte(b'!').unwrap();
        sink.flush().unwrap();
        assert_eq!(sink.bytes_written(), 6);
        assert_eq!(sink.into_inner(), b"hello!");
    }

    #[test]
    fn test_sink_zero_write_is_error() {
        let mut sink = ByteSink::new(ZeroWriter);
        let err = sink.write_all(b"data").unwrap_err();
        match err {
            OxiBwtError::Io(e) => assert_eq!(e.kind(), io::ErrorKind::WriteZero),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(sink.bytes_written(), 0);
    }
}
