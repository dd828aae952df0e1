//! Move-to-Front Transform.
//!
//! MTF replaces each byte with its position in a recency list, then moves
//! that byte to the front of the list. Clustered input (such as BWT output)
//! turns into many small ranks.

use std::io::{Read, Write};

use log::debug;
use oxibwt_core::stream::stats;
use oxibwt_core::{ByteSink, ByteSource, OxiBwtError, Result, StreamStats, StreamTransform};

/// Bytes processed per read from the source.
const CHUNK_SIZE: usize = 8 * 1024;

/// Symbol set of the recency list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alphabet {
    /// Byte values `0..=254`. Byte `0xFF` has no rank and is rejected.
    #[default]
    Legacy255,
    /// All 256 byte values; safe for arbitrary binary data.
    Full256,
}

impl Alphabet {
    /// Number of symbols in the initial table.
    pub fn symbol_count(&self) -> usize {
        match self {
            Self::Legacy255 => 255,
            Self::Full256 => 256,
        }
    }

    /// The initial table: the identity ordering of the symbol set.
    pub fn initial_table(&self) -> Vec<u8> {
        (0..self.symbol_count()).map(|v| v as u8).collect()
    }
}

/// The recency list of one transform pass.
#[derive(Debug, Clone)]
struct RankTable {
    symbols: Vec<u8>,
}

impl RankTable {
    fn new(alphabet: Alphabet) -> Self {
        Self {
            symbols: alphabet.initial_table(),
        }
    }

    /// Rank of `byte`, which then moves to the front.
    fn encode(&mut self, byte: u8) -> Result<u8> {
        let pos = self
            .symbols
            .iter()
            .position(|&s| s == byte)
            .ok_or_else(|| OxiBwtError::symbol_not_found(byte))?;
        self.promote(pos);
        Ok(pos as u8)
    }

    /// Byte at `rank`, which then moves to the front.
    fn decode(&mut self, rank: u8) -> Result<u8> {
        let pos = rank as usize;
        let byte = *self
            .symbols
            .get(pos)
            .ok_or_else(|| OxiBwtError::rank_out_of_range(rank, self.symbols.len()))?;
        self.promote(pos);
        Ok(byte)
    }

    fn promote(&mut self, pos: usize) {
        if pos > 0 {
            self.symbols[..=pos].rotate_right(1);
        }
    }
}

/// Perform Move-to-Front transform on a buffer.
pub fn transform(data: &[u8], alphabet: Alphabet) -> Result<Vec<u8>> {
    let mut table = RankTable::new(alphabet);
    data.iter().map(|&byte| table.encode(byte)).collect()
}

/// Perform inverse Move-to-Front transform on a buffer.
pub fn inverse_transform(data: &[u8], alphabet: Alphabet) -> Result<Vec<u8>> {
    let mut table = RankTable::new(alphabet);
    data.iter().map(|&rank| table.decode(rank)).collect()
}

/// Streaming Move-to-Front stage.
///
/// Every pass starts from the identity table of its [`Alphabet`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveToFront {
    alphabet: Alphabet,
}

impl MoveToFront {
    /// Create a stage over the given symbol set.
    pub fn new(alphabet: Alphabet) -> Self {
        Self { alphabet }
    }

    /// The configured symbol set.
    pub fn alphabet(&self) -> Alphabet {
        self.alphabet
    }

    fn pass<R, W, F>(
        &self,
        input: &mut ByteSource<R>,
        output: &mut ByteSink<W>,
        mut step: F,
    ) -> Result<StreamStats>
    where
        R: Read,
        W: Write,
        F: FnMut(&mut RankTable, u8) -> Result<u8>,
    {
        let mut table = RankTable::new(self.alphabet);
        let mut chunk = vec![0u8; CHUNK_SIZE];

        loop {
            let outcome = input.read_up_to(&mut chunk)?;
            let len = outcome.byte_count(CHUNK_SIZE);

            let mut failure = None;
            for (i, byte) in chunk[..len].iter_mut().enumerate() {
                match step(&mut table, *byte) {
                    Ok(mapped) => *byte = mapped,
                    Err(e) => {
                        failure = Some((i, e));
                        break;
                    }
                }
            }
            if let Some((mapped, e)) = failure {
                // Emit what was already mapped before failing
                output.write_all(&chunk[..mapped])?;
                return Err(e);
            }
            output.write_all(&chunk[..len])?;

            if outcome.hit_end() {
                break;
            }
        }

        Ok(stats(input, output))
    }
}

impl StreamTransform for MoveToFront {
    fn name(&self) -> &'static str {
        "mtf"
    }

    fn forward<R: Read, W: Write>(
        &mut self,
        input: &mut ByteSource<R>,
        output: &mut ByteSink<W>,
    ) -> Result<StreamStats> {
        let stats = self.pass(input, output, RankTable::encode)?;
        debug!("mtf: ranked {} byte(s)", stats.bytes_read);
        Ok(stats)
    }

    fn inverse<R: Read, W: Write>(
        &mut self,
        input: &mut ByteSource<R>,
        output: &mut ByteSink<W>,
    ) -> Result<StreamStats> {
        let stats = self.pass(input, output, RankTable::decode)?;
        debug!("mtf: restored {} byte(s)", stats.bytes_written);
        Ok(stats)
    }
}
