use anyhow::{Context, Result};
use brainwave_lib::constants::NO_CONTACT_SIGNAL_QUALITY;
use brainwave_lib::{EegPower, PayloadBuilder};
use clap::Parser;
use std::time::Duration;
use tokio::io::{AsyncWriteExt, stdout};
use tokio::time::sleep;
use tracing::{debug, info};

/// Write a synthetic headset byte stream to stdout, for exercising the decoder without hardware.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Number of frames to emit
    #[arg(short, long, default_value_t = 10)]
    count: u32,

    /// Delay between frames in milliseconds (0 = as fast as possible)
    #[arg(short, long, default_value_t = 0)]
    interval_ms: u64,

    /// Corrupt the checksum of every Nth frame
    #[arg(long)]
    corrupt_every: Option<u32>,

    /// Emit frames as hex text lines instead of raw bytes
    #[arg(long)]
    hex: bool,

    /// Frames emitted with the "no contact" signal before the headset settles
    #[arg(long, default_value_t = 2)]
    warmup: u32,
}

/// Deterministic reading for frame `i`
fn payload_for(i: u32, warmup: u32) -> PayloadBuilder {
    if i < warmup {
        return PayloadBuilder::new()
            .signal_quality(NO_CONTACT_SIGNAL_QUALITY)
            .attention(0)
            .meditation(0);
    }

    let attention = (i % 101 * 7 % 101) as u8;
    let meditation = ((i % 101 * 13 + 40) % 101) as u8;
    let mut values = [0u32; 8];
    for (band, value) in values.iter_mut().enumerate() {
        // Lower bands carry more power, as on a real headset
        let base = 1_000_000u32 >> band;
        *value = base + i.wrapping_mul(3_571).wrapping_add(band as u32 * 977) % (base / 2 + 1);
    }

    PayloadBuilder::new()
        .signal_quality(0)
        .eeg_power(&EegPower::new(values))
        .attention(attention)
        .meditation(meditation)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    // stdout carries the stream itself
    tracing_subscriber::fmt().with_writer(std::io::stderr).with_target(false).init();

    let mut out = stdout();
    for i in 0..args.count {
        let mut frame = payload_for(i, args.warmup)
            .build_frame()
            .context("Synthetic payload exceeds frame limit")?
            .to_vec();

        if args.corrupt_every.is_some_and(|n| n > 0 && (i + 1) % n == 0) {
            if let Some(checksum) = frame.last_mut() {
                *checksum = checksum.wrapping_add(1);
            }
            debug!(frame = i, "Corrupted checksum");
        }

        if args.hex {
            out.write_all(format!("{}\n", hex::encode(&frame)).as_bytes()).await?;
        } else {
            out.write_all(&frame).await?;
        }
        out.flush().await?;

        if args.interval_ms > 0 {
            sleep(Duration::from_millis(args.interval_ms)).await;
        }
    }

    info!("Wrote {} frames", args.count);
    Ok(())
}
