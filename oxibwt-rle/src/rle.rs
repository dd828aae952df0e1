//! Threshold run-length codec.
//!
//! There is no marker byte. The decoder counts identical bytes as it copies
//! them out; once `min_run` equal bytes have gone by, the next
//! `run_length_bytes` bytes are a little-endian count of further copies.
//! The encoder therefore has to use the escape form for every run of
//! `min_run` or more bytes.

use std::io::{Read, Write};

use log::{debug, trace};
use oxibwt_core::stream::stats;
use oxibwt_core::{
    ByteSink, ByteSource, OxiBwtError, ReadOutcome, Result, StreamStats, StreamTransform,
};

use crate::config::{MAX_RUN_LENGTH_BYTES, RleConfig};

/// Bytes processed per read from the source while compressing.
const CHUNK_SIZE: usize = 8 * 1024;

/// The run currently being tracked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Run {
    byte: u8,
    length: u64,
}

/// Streaming run-length codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunLengthCodec {
    config: RleConfig,
}

impl RunLengthCodec {
    /// Create a codec with the given parameters.
    pub fn new(config: RleConfig) -> Self {
        Self { config }
    }

    /// The codec parameters.
    pub fn config(&self) -> RleConfig {
        self.config
    }

    /// Encode `input` into `output`.
    ///
    /// On failure the counters already observed stay available on `input`
    /// and `output`.
    pub fn compress<R: Read, W: Write>(
        &self,
        input: &mut ByteSource<R>,
        output: &mut ByteSink<W>,
    ) -> Result<StreamStats> {
        let max_run = self.config.max_run();
        let mut run = Run::default();
        let mut escapes = 0u64;
        let mut chunk = vec![0u8; CHUNK_SIZE];

        loop {
            let outcome = input.read_up_to(&mut chunk)?;
            let len = outcome.byte_count(CHUNK_SIZE);

            for &byte in &chunk[..len] {
                if byte == run.byte && run.length < max_run {
                    run.length += 1;
                } else {
                    escapes += u64::from(self.flush_run(run, output)?);
                    run = Run { byte, length: 1 };
                }
            }

            if outcome.hit_end() {
                break;
            }
        }
        escapes += u64::from(self.flush_run(run, output)?);

        debug!(
            "rle: compressed {} -> {} bytes, {} escaped run(s)",
            input.bytes_read(),
            output.bytes_written(),
            escapes
        );
        Ok(stats(input, output))
    }

    /// Write out a finished run. Returns true if the escape form was used.
    fn flush_run<W: Write>(&self, run: Run, output: &mut ByteSink<W>) -> Result<bool> {
        if run.length == 0 {
            return Ok(false);
        }

        let min_run = self.config.min_run() as u64;
        if run.length < min_run {
            write_repeated(output, run.byte, run.length)?;
            return Ok(false);
        }

        trace!("rle: run of {} x {:#04x}", run.length, run.byte);
        write_repeated(output, run.byte, min_run)?;
        let (field, width) = self.config.encode_extra(run.length - min_run);
        output.write_all(&field[..width])?;
        Ok(true)
    }

    /// Decode `input` into `output`.
    ///
    /// Every byte is copied to `output` as soon as it is read, so a
    /// truncated stream still leaves the decoded prefix behind.
    pub fn decompress<R: Read, W: Write>(
        &self,
        input: &mut ByteSource<R>,
        output: &mut ByteSink<W>,
    ) -> Result<StreamStats> {
        let min_run = self.config.min_run() as u64;
        let mut run = Run::default();

        while let Some(byte) = input.read_byte()? {
            output.write_byte(byte)?;

            if byte == run.byte {
                run.length += 1;
            } else {
                run = Run { byte, length: 1 };
            }

            if run.length == min_run {
                let extra = self.read_extra(input)?;
                write_repeated(output, run.byte, extra)?;
                run = Run::default();
            }
        }

        debug!(
            "rle: decompressed {} -> {} bytes",
            input.bytes_read(),
            output.bytes_written()
        );
        Ok(stats(input, output))
    }

    fn read_extra<R: Read>(&self, input: &mut ByteSource<R>) -> Result<u64> {
        let width = self.config.run_length_bytes();
        let offset = input.bytes_read();
        let mut field = [0u8; MAX_RUN_LENGTH_BYTES];

        match input.read_up_to(&mut field[..width])? {
            ReadOutcome::Filled => Ok(u64::from_le_bytes(field)),
            ReadOutcome::CleanEnd => Err(OxiBwtError::malformed(
                offset,
                "expected encoded run length, got eof",
            )),
            ReadOutcome::Partial(n) => Err(OxiBwtError::malformed(
                offset,
                format!("truncated run length: {n} of {width} bytes"),
            )),
        }
    }
}

impl StreamTransform for RunLengthCodec {
    fn name(&self) -> &'static str {
        "rle"
    }

    fn forward<R: Read, W: Write>(
        &mut self,
        input: &mut ByteSource<R>,
        output: &mut ByteSink<W>,
    ) -> Result<StreamStats> {
        self.compress(input, output)
    }

    fn inverse<R: Read, W: Write>(
        &mut self,
        input: &mut ByteSource<R>,
        output: &mut ByteSink<W>,
    ) -> Result<StreamStats> {
        self.decompress(input, output)
    }
}

/// Write `count` copies of `byte`.
fn write_repeated<W: Write>(output: &mut ByteSink<W>, byte: u8, count: u64) -> Result<()> {
    let fill = [byte; 512];
    let mut remaining = count;
    while remaining > 0 {
        let n = remaining.min(fill.len() as u64) as usize;
        output.write_all(&fill[..n])?;
        remaining -= n as u64;
    }
    Ok(())
}
