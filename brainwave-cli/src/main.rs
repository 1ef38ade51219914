use anyhow::{Context, Result};
use brainwave_lib::{Brain, StreamStats};
use bytes::BytesMut;
use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod output;

use output::{OutputFormat, ReadingWriter};

/// Decode a brainwave headset byte stream into readings.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Capture file to decode; stdin when omitted or "-"
    input: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Csv)]
    format: OutputFormat,

    /// Optional file to save output
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Stop after this many readings
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
    count: Option<u64>,

    /// Only emit readings that carry EEG band powers
    #[arg(long)]
    power_only: bool,

    /// Input is hex text (whitespace ignored) instead of raw bytes
    #[arg(long)]
    hex: bool,

    /// Bytes requested per read
    #[arg(long, default_value_t = 512)]
    chunk_size: usize,

    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Readings go to stdout, logs to stderr
    let filter = EnvFilter::builder()
        .with_default_directive(args.verbose.tracing_level_filter().into())
        .from_env_lossy();
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .with(filter)
        .init();

    // Owned here so the stats survive an interrupted run
    let mut brain = Brain::new(BytesMut::with_capacity(args.chunk_size));
    let outcome = tokio::select! {
        res = run(&args, &mut brain) => res,
        _ = signal::ctrl_c() => {
            info!("Ctrl+C received, shutting down.");
            Ok(())
        }
    };

    report(brain.stats());
    if let Err(e) = outcome {
        error!("Decoding failed: {:?}", e);
        std::process::exit(1);
    }
    Ok(())
}

async fn run(args: &Args, brain: &mut Brain<BytesMut>) -> Result<()> {
    let mut input: Box<dyn AsyncRead + Unpin + Send> = match &args.input {
        Some(path) if path.as_path() != Path::new("-") => {
            info!("Decoding {}", path.display());
            Box::new(
                tokio::fs::File::open(path)
                    .await
                    .with_context(|| format!("Failed to open {}", path.display()))?,
            )
        }
        _ => {
            info!("Decoding stdin");
            Box::new(tokio::io::stdin())
        }
    };

    let sink: Box<dyn Write + Send> = match &args.output {
        Some(path) => Box::new(File::create(path).with_context(|| format!("Failed to create {}", path.display()))?),
        None => Box::new(io::stdout()),
    };
    let mut writer = ReadingWriter::new(args.format, sink);

    let mut emitted = 0u64;

    if args.hex {
        let mut text = String::new();
        input.read_to_string(&mut text).await.context("Failed to read input")?;
        let digits: String = text.split_whitespace().collect();
        let bytes = hex::decode(&digits).context("Input is not valid hex")?;
        brain.source_mut().extend_from_slice(&bytes);
    }

    let mut chunk = vec![0u8; args.chunk_size.max(1)];
    loop {
        while let Some(reading) = brain.next_reading()? {
            if args.power_only && !reading.has_power {
                continue;
            }
            writer.write(&reading)?;
            emitted += 1;
            if args.count.is_some_and(|count| emitted >= count) {
                info!("Reached {} readings", emitted);
                writer.flush()?;
                return Ok(());
            }
        }
        writer.flush()?;

        if args.hex {
            break;
        }
        let n = input.read(&mut chunk).await.context("Failed to read input")?;
        if n == 0 {
            info!("End of input");
            break;
        }
        brain.source_mut().extend_from_slice(&chunk[..n]);
    }

    Ok(())
}

fn report(stats: &StreamStats) {
    info!(
        bytes = stats.bytes,
        frames = stats.frames,
        readings = stats.readings,
        "Stream summary"
    );
    if stats.errors() > 0 {
        warn!(
            too_long = stats.too_long,
            checksum = stats.checksum_mismatches,
            parse = stats.parse_errors,
            "{} packet(s) rejected",
            stats.errors()
        );
    }
}
