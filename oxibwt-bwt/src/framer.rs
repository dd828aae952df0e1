//! Block framing for unbounded BWT streams.
//!
//! Wire format:
//!
//! ```text
//! stream := block*
//! block  := length:u32-le  payload:[u8; length]
//! ```
//!
//! The payload is an already-transformed block. The stream ends when the
//! input ends at a frame boundary, or at a zero length prefix. The encoder
//! never writes the zero marker.

use std::io::{Read, Write};

use log::{debug, trace};
use oxibwt_core::stream::stats;
use oxibwt_core::{
    ByteSink, ByteSource, OxiBwtError, ReadOutcome, Result, StreamStats, StreamTransform,
};

use crate::bwt;
use crate::config::{BlockSize, MAX_FRAME_LEN};

/// Size of the little-endian length prefix in bytes.
pub const LENGTH_PREFIX_LEN: usize = 4;

/// Streams input through the BWT in fixed-size, length-prefixed blocks.
#[derive(Debug, Clone, Copy)]
pub struct BlockFramer {
    block_size: BlockSize,
    max_frame_len: usize,
}

impl BlockFramer {
    /// Create a framer that cuts the input into blocks of `block_size` bytes.
    pub fn new(block_size: BlockSize) -> Self {
        Self {
            block_size,
            max_frame_len: MAX_FRAME_LEN,
        }
    }

    /// Accept frames of up to `max_frame_len` payload bytes when decoding.
    ///
    /// Streams written by encoders with larger blocks than [`BlockSize`]
    /// allows need a higher limit.
    pub fn with_max_frame_len(mut self, max_frame_len: usize) -> Self {
        self.max_frame_len = max_frame_len;
        self
    }

    /// The configured block size.
    pub fn block_size(&self) -> BlockSize {
        self.block_size
    }

    /// Largest frame payload accepted when decoding.
    pub fn max_frame_len(&self) -> usize {
        self.max_frame_len
    }

    /// Transform `input` block by block, writing framed blocks to `output`.
    ///
    /// The final block may be shorter than the block size. Empty input
    /// produces empty output.
    pub fn encode<R: Read, W: Write>(
        &self,
        input: &mut ByteSource<R>,
        output: &mut ByteSink<W>,
    ) -> Result<StreamStats> {
        let size = self.block_size.get();
        let mut block = vec![0u8; size];
        let mut count = 0u64;

        loop {
            let outcome = input.read_up_to(&mut block)?;
            let len = outcome.byte_count(size);
            if len == 0 {
                break;
            }

            let transformed = bwt::transform(&block[..len])?;
            write_frame(output, &transformed)?;
            count += 1;
            trace!(
                "framed block {}: {} -> {} bytes",
                count,
                len,
                transformed.len()
            );

            if outcome.hit_end() {
                break;
            }
        }

        debug!("bwt: encoded {} block(s) of up to {} bytes", count, size);
        Ok(stats(input, output))
    }

    /// Read framed blocks from `input` and write the reconstructed stream.
    pub fn decode<R: Read, W: Write>(
        &self,
        input: &mut ByteSource<R>,
        output: &mut ByteSink<W>,
    ) -> Result<StreamStats> {
        let mut count = 0u64;
        {
            let mut frames = FrameReader::with_max_frame_len(input, self.max_frame_len);
            while let Some(frame) = frames.next_frame()? {
                let block = bwt::inverse_transform(&frame)?;
                output.write_all(&block)?;
                count += 1;
                trace!(
                    "unframed block {}: {} -> {} bytes",
                    count,
                    frame.len(),
                    block.len()
                );
            }
        }

        debug!("bwt: decoded {} block(s)", count);
        Ok(stats(input, output))
    }
}

impl Default for BlockFramer {
    fn default() -> Self {
        Self::new(BlockSize::default())
    }
}

impl StreamTransform for BlockFramer {
    fn name(&self) -> &'static str {
        "bwt"
    }

    fn forward<R: Read, W: Write>(
        &mut self,
        input: &mut ByteSource<R>,
        output: &mut ByteSink<W>,
    ) -> Result<StreamStats> {
        self.encode(input, output)
    }

    fn inverse<R: Read, W: Write>(
        &mut self,
        input: &mut ByteSource<R>,
        output: &mut ByteSink<W>,
    ) -> Result<StreamStats> {
        self.decode(input, output)
    }
}

/// Write one length-prefixed frame.
pub fn write_frame<W: Write>(output: &mut ByteSink<W>, payload: &[u8]) -> Result<()> {
    let len = u32::try_from(payload.len()).map_err(|_| {
        OxiBwtError::invalid_input(format!(
            "frame payload of {} bytes does not fit the length prefix",
            payload.len()
        ))
    })?;
    output.write_all(&len.to_le_bytes())?;
    output.write_all(payload)
}

/// Reads length-prefixed frames from a byte source.
///
/// Yields raw (still transformed) payloads. After the end of the stream or
/// the first error the reader yields nothing further.
#[derive(Debug)]
pub struct FrameReader<'a, R> {
    source: &'a mut ByteSource<R>,
    max_frame_len: usize,
    done: bool,
}

impl<'a, R: Read> FrameReader<'a, R> {
    /// Read frames from `source`, accepting payloads up to [`MAX_FRAME_LEN`].
    pub fn new(source: &'a mut ByteSource<R>) -> Self {
        Self::with_max_frame_len(source, MAX_FRAME_LEN)
    }

    /// Read frames from `source`, accepting payloads up to `max_frame_len`.
    pub fn with_max_frame_len(source: &'a mut ByteSource<R>, max_frame_len: usize) -> Self {
        Self {
            source,
            max_frame_len,
            done: false,
        }
    }

    /// Read the next frame payload, `None` at the end of the stream.
    pub fn next_frame(&mut self) -> Result<Option<Vec<u8>>> {
        if self.done {
            return Ok(None);
        }

        let result = self.read_frame();
        if !matches!(result, Ok(Some(_))) {
            self.done = true;
        }
        result
    }

    fn read_frame(&mut self) -> Result<Option<Vec<u8>>> {
        let Some(len) = self.read_length()? else {
            return Ok(None);
        };

        let offset = self.source.bytes_read();
        let mut payload = vec![0u8; len];
        match self.source.read_up_to(&mut payload)? {
            ReadOutcome::Filled => Ok(Some(payload)),
            short => Err(OxiBwtError::malformed(
                offset,
                format!(
                    "block of {} bytes, expected {}",
                    short.byte_count(len),
                    len
                ),
            )),
        }
    }

    fn read_length(&mut self) -> Result<Option<usize>> {
        let offset = self.source.bytes_read();
        let mut prefix = [0u8; LENGTH_PREFIX_LEN];

        match self.source.read_up_to(&mut prefix)? {
            ReadOutcome::CleanEnd => Ok(None),
            ReadOutcome::Partial(n) => Err(OxiBwtError::malformed(
                offset,
                format!("truncated block length: {n} of {LENGTH_PREFIX_LEN} bytes"),
            )),
            ReadOutcome::Filled => {
                let len = u32::from_le_bytes(prefix) as usize;
                if len == 0 {
                    Ok(None)
                } else if len > self.max_frame_len {
                    Err(OxiBwtError::malformed(
                        offset,
                        format!("block length {len} exceeds maximum {}", self.max_frame_len),
                    ))
                } else {
                    Ok(Some(len))
                }
            }
        }
    }
}

impl<R: Read> Iterator for FrameReader<'_, R> {
    type Item = Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_frame().transpose()
    }
}
