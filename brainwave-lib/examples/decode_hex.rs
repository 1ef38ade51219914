//! Decode a hex-encoded capture given on the command line.
//!
//! cargo run -p brainwave-lib --example decode_hex -- aaaa0402c8040031

use brainwave_lib::{StepResult, StreamDecoder};

fn main() {
    tracing_subscriber::fmt::init();

    let hex_data: String = std::env::args().skip(1).collect();
    let bytes = match hex::decode(hex_data.trim()) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("Invalid hex: {}", e);
            std::process::exit(1);
        }
    };

    let mut decoder = StreamDecoder::new();
    for result in decoder.submit_bytes(&bytes) {
        match result {
            StepResult::PacketReady(reading) => println!("{:?}", reading),
            StepResult::PacketError(err) => println!("ERROR: {}", err),
            StepResult::NoEvent => {}
        }
    }

    let stats = decoder.stats();
    println!(
        "{} bytes, {} frames, {} readings, {} errors",
        stats.bytes,
        stats.frames,
        stats.readings,
        stats.errors()
    );
}
