//! zcrush - Command-line interface for zcrush
//!
//! Reads raw bytes from stdin and writes the compressed (or, with `-d`,
//! decompressed) result to stdout. With `--input` and `--output` it streams
//! file to file instead.

use clap::{CommandFactory, Parser};
use indicatif::{ProgressBar, ProgressStyle};
use log::{LevelFilter, Log, Metadata, Record};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use zcrush::{
    Direction, Format, StreamOptions, StreamStats, DEFAULT_LEVEL, MAX_BUFFER_SIZE_KIB,
};

#[derive(Parser)]
#[command(name = "zcrush")]
#[command(about = "Compress and decompress data with chunked streaming DEFLATE")]
#[command(version)]
struct Cli {
    /// Decompress instead of compress
    #[arg(short, long)]
    decompress: bool,

    /// Compression level (0 = store only, 9 = smallest output)
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_LEVEL,
        value_parser = clap::value_parser!(i32).range(0..=9)
    )]
    level: i32,

    /// Chunk size in KiB
    #[arg(
        short,
        long = "chunk-size",
        default_value_t = 256,
        value_parser = clap::value_parser!(u32).range(1..MAX_BUFFER_SIZE_KIB as i64)
    )]
    chunk_size: u32,

    /// Use the zlib header and trailer instead of raw DEFLATE
    #[arg(long)]
    zlib: bool,

    /// Input file (requires --output; stdin is used otherwise)
    #[arg(short, long, requires = "output")]
    input: Option<PathBuf>,

    /// Output file (requires --input; stdout is used otherwise)
    #[arg(short, long, requires = "input")]
    output: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    fn direction(&self) -> Direction {
        if self.decompress {
            Direction::Decompress
        } else {
            Direction::Compress
        }
    }

    fn options(&self) -> StreamOptions {
        let format = if self.zlib { Format::Zlib } else { Format::Raw };
        StreamOptions::default()
            .with_chunk_size_kib(self.chunk_size)
            .with_level(self.level)
            .with_format(format)
    }
}

/// Writes log records to stderr; stdout carries data
struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn init_logging(verbose: bool, quiet: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Error
    } else {
        LevelFilter::Warn
    };
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let direction = cli.direction();
    let options = cli.options();

    let result = match (&cli.input, &cli.output) {
        (Some(input), Some(output)) => {
            process_file(input, output, direction, &options, cli.quiet).map(|_| ())
        }
        _ => process_stdio(direction, &options),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn transform(
    data: &[u8],
    direction: Direction,
    options: &StreamOptions,
) -> zcrush::Result<Vec<u8>> {
    match direction {
        Direction::Compress => zcrush::compress_with(data, options),
        Direction::Decompress => zcrush::decompress_with(data, options),
    }
}

fn process_stdio(
    direction: Direction,
    options: &StreamOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut input = Vec::new();
    io::stdin().lock().read_to_end(&mut input)?;

    // Nothing piped in: show usage like a bare invocation would
    if input.is_empty() {
        Cli::command().print_help()?;
        return Ok(());
    }

    log::debug!("read {} bytes from stdin", input.len());

    // The whole result is produced before anything reaches stdout
    let output = transform(&input, direction, options)?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(&output)?;
    stdout.flush()?;
    Ok(())
}

fn process_file(
    input: &Path,
    output: &Path,
    direction: Direction,
    options: &StreamOptions,
    quiet: bool,
) -> Result<StreamStats, Box<dyn std::error::Error>> {
    let verb = match direction {
        Direction::Compress => "Compressing",
        Direction::Decompress => "Decompressing",
    };
    log::debug!("{} '{}' to '{}'", verb, input.display(), output.display());

    let start_time = Instant::now();

    let progress = if quiet {
        None
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {msg}")?,
        );
        pb.set_message(format!("{}...", verb));
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    };

    let result = match direction {
        Direction::Compress => zcrush::compress_file_with(input, output, options),
        Direction::Decompress => zcrush::decompress_file_with(input, output, options),
    };

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    let stats = result?;
    let elapsed = start_time.elapsed();

    if !quiet {
        eprintln!("✓ {} successful!", verb);
        eprintln!("  Input:  {} bytes", stats.bytes_in);
        eprintln!("  Output: {} bytes", stats.bytes_out);
        eprintln!("  Ratio:  {:.1}%", stats.ratio() * 100.0);
        eprintln!("  Chunks: {}", stats.chunks);
        eprintln!("  Time:   {:.2?}", elapsed);
    }

    Ok(stats)
}
