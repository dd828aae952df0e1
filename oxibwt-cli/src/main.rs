//! OxiBWT CLI - block-sorting transform stages
//!
//! Each subcommand is one reversible filter. Chain them with pipes:
//! `oxibwt bwt < in | oxibwt mtf | oxibwt compress > out`.

mod commands;
mod utils;

use clap::{ArgAction, Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use commands::{StageOptions, cmd_completions, cmd_stage};
use oxibwt_bwt::{BlockFramer, BlockSize, DEFAULT_BLOCK_SIZE, MAX_FRAME_LEN};
use oxibwt_core::Direction;
use oxibwt_mtf::{Alphabet, MoveToFront};
use oxibwt_rle::{RleConfig, RunLengthCodec};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "oxibwt")]
#[command(
    author,
    version,
    about = "Pure Rust block-sorting transforms: BWT, Move-To-Front and Run-Length"
)]
#[command(long_about = "
OxiBWT runs one transform stage per invocation, reading stdin (or --input)
and writing stdout (or --output).

Examples:
  oxibwt bwt --block-size 4096 < book.txt > book.bwt
  oxibwt mtf -i book.bwt -o book.mtf
  oxibwt compress --min-run 4 < book.mtf > book.rle
  oxibwt decompress < book.rle | oxibwt imtf | oxibwt ibwt > book.txt
  oxibwt completions bash > oxibwt.bash
")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Print a JSON statistics line to stderr when done
    #[arg(long, global = true)]
    stats: bool,

    /// Show a progress spinner on stderr
    #[arg(short = 'P', long, global = true)]
    progress: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Input/output paths shared by every stage.
#[derive(Args, Debug, Clone, Default)]
struct IoArgs {
    /// Input file (stdin if omitted)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output file (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

/// Run-length codec parameters. Both directions must use the same values.
#[derive(Args, Debug, Clone)]
struct RleArgs {
    /// Identical bytes needed before a run count is written
    #[arg(long, default_value_t = RleConfig::DEFAULT_MIN_RUN)]
    min_run: usize,

    /// Width of the little-endian run count field in bytes (1-8)
    #[arg(long, default_value_t = RleConfig::DEFAULT_RUN_LENGTH_BYTES)]
    run_length_bytes: usize,
}

impl RleArgs {
    fn config(&self) -> oxibwt_core::Result<RleConfig> {
        RleConfig::new(self.min_run, self.run_length_bytes)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Burrows-Wheeler transform into length-prefixed blocks
    Bwt {
        #[command(flatten)]
        io: IoArgs,

        /// Input bytes per block
        #[arg(short, long, default_value_t = DEFAULT_BLOCK_SIZE)]
        block_size: usize,
    },

    /// Undo the Burrows-Wheeler transform
    Ibwt {
        #[command(flatten)]
        io: IoArgs,

        /// Largest block payload accepted, in bytes
        #[arg(long, default_value_t = MAX_FRAME_LEN)]
        max_frame_len: usize,
    },

    /// Move-to-front transform
    Mtf {
        #[command(flatten)]
        io: IoArgs,

        /// Use all 256 byte values instead of the 255-entry table
        #[arg(long)]
        full_alphabet: bool,
    },

    /// Undo the move-to-front transform
    Imtf {
        #[command(flatten)]
        io: IoArgs,

        /// Use all 256 byte values instead of the 255-entry table
        #[arg(long)]
        full_alphabet: bool,
    },

    /// Run-length encode
    #[command(alias = "c")]
    Compress {
        #[command(flatten)]
        io: IoArgs,

        #[command(flatten)]
        rle: RleArgs,
    },

    /// Run-length decode
    #[command(alias = "d")]
    Decompress {
        #[command(flatten)]
        io: IoArgs,

        #[command(flatten)]
        rle: RleArgs,
    },

    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn alphabet(full: bool) -> Alphabet {
    if full {
        Alphabet::Full256
    } else {
        Alphabet::Legacy255
    }
}

impl IoArgs {
    fn options(&self, stats: bool, progress: bool) -> StageOptions<'_> {
        StageOptions {
            input: self.input.as_deref(),
            output: self.output.as_deref(),
            stats,
            progress,
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let (stats, progress) = (cli.stats, cli.progress);

    match &cli.command {
        Commands::Bwt { io, block_size } => {
            let framer = BlockFramer::new(BlockSize::new(*block_size)?);
            cmd_stage(framer, Direction::Forward, &io.options(stats, progress))
        }
        Commands::Ibwt { io, max_frame_len } => {
            let framer = BlockFramer::default().with_max_frame_len(*max_frame_len);
            cmd_stage(framer, Direction::Inverse, &io.options(stats, progress))
        }
        Commands::Mtf { io, full_alphabet } => {
            let stage = MoveToFront::new(alphabet(*full_alphabet));
            cmd_stage(stage, Direction::Forward, &io.options(stats, progress))
        }
        Commands::Imtf { io, full_alphabet } => {
            let stage = MoveToFront::new(alphabet(*full_alphabet));
            cmd_stage(stage, Direction::Inverse, &io.options(stats, progress))
        }
        Commands::Compress { io, rle } => {
            let codec = RunLengthCodec::new(rle.config()?);
            cmd_stage(codec, Direction::Forward, &io.options(stats, progress))
        }
        Commands::Decompress { io, rle } => {
            let codec = RunLengthCodec::new(rle.config()?);
            cmd_stage(codec, Direction::Inverse, &io.options(stats, progress))
        }
        Commands::Completions { shell } => cmd_completions(*shell, &mut Cli::command()),
    }
}

fn main() {
    let cli = Cli::parse();
    utils::init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
