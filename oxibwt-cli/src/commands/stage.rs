//! Run one transform stage from an input stream to an output stream.

use crate::utils::{StatsJson, create_spinner};
use log::{info, warn};
use oxibwt_core::{ByteSink, ByteSource, Direction, StreamStats, StreamTransform};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;
use std::time::Instant;

/// Options shared by every stage command.
pub struct StageOptions<'a> {
    pub input: Option<&'a Path>,
    pub output: Option<&'a Path>,
    pub stats: bool,
    pub progress: bool,
}

pub fn cmd_stage<T: StreamTransform>(
    mut stage: T,
    direction: Direction,
    opts: &StageOptions<'_>,
) -> Result<(), Box<dyn std::error::Error>> {
    let reader: Box<dyn Read> = match opts.input {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(io::stdin().lock()),
    };
    let writer: Box<dyn Write> = match opts.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let spinner = create_spinner(opts.progress);
    let started = Instant::now();
    info!("{}: {:?} pass started", stage.name(), direction);

    let result = process(&mut stage, direction, spinner.wrap_read(reader), writer);
    spinner.finish_and_clear();
    let stats = result?;

    info!(
        "{}: {} -> {} bytes in {:.2?}",
        stage.name(),
        stats.bytes_read,
        stats.bytes_written,
        started.elapsed()
    );
    if opts.stats {
        let line = StatsJson::new(stage.name(), direction, stats, started.elapsed());
        eprintln!("{}", serde_json::to_string(&line)?);
    }
    Ok(())
}

/// Drive `stage` over `reader` into `writer`, flushing whatever was written
/// even when the stage fails.
pub fn process<T, R, W>(
    stage: &mut T,
    direction: Direction,
    reader: R,
    writer: W,
) -> oxibwt_core::Result<StreamStats>
where
    T: StreamTransform,
    R: Read,
    W: Write,
{
    let mut source = ByteSource::new(reader);
    let mut sink = ByteSink::new(writer);

    let result = stage.run(direction, &mut source, &mut sink);
    let flushed = sink.flush();
    if result.is_err() {
        warn!(
            "{}: stopped after {} bytes in, {} bytes out",
            stage.name(),
            source.bytes_read(),
            sink.bytes_written()
        );
    }

    let stats = result?;
    flushed?;
    Ok(stats)
}
