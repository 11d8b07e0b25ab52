/// Synthetic market data feed generator
///
/// Creates a realistic quote/trade mix and writes a binary feed to a file or
/// stdout. Useful for testing and benchmarking the pipeline.

use std::env;
use std::fs::File;
use std::io::Write;

use byteorder::{ByteOrder, LittleEndian};
use rand::Rng;

use tick_pipeline::protocol::{MessageType, FEED_HEADER_SIZE, QUOTE_WIRE_SIZE, TRADE_WIRE_SIZE};

const SYMBOLS: [&[u8; 8]; 4] = [
    b"AAPL\x00\x00\x00\x00",
    b"GOOGL\x00\x00\x00",
    b"MSFT\x00\x00\x00\x00",
    b"AMZN\x00\x00\x00\x00",
];

// Base prices in cents.
const BASE_PRICES: [u64; 4] = [15000, 280000, 35000, 17000];

fn main() -> std::io::Result<()> {
    let args: Vec<String> = env::args().collect();

    let output_path = if args.len() > 1 {
        args[1].clone()
    } else {
        "/tmp/feed_generator.bin".to_string()
    };

    let message_count: u64 = if args.len() > 2 {
        args[2].parse().unwrap_or(10000)
    } else {
        10000
    };

    let mut output: Box<dyn Write> = if output_path == "stdout" {
        Box::new(std::io::stdout())
    } else {
        Box::new(File::create(&output_path)?)
    };

    let mut rng = rand::thread_rng();
    let mut timestamp = 1_000_000u64;

    eprintln!("Generating {} messages to {}", message_count, output_path);

    let mut header = [0u8; FEED_HEADER_SIZE];
    LittleEndian::write_u64(&mut header, message_count);
    output.write_all(&header)?;

    let mut total_bytes = FEED_HEADER_SIZE;

    for i in 0..message_count {
        let pick = rng.gen_range(0..SYMBOLS.len());
        let symbol = u64::from_le_bytes(*SYMBOLS[pick]);
        let base_price = BASE_PRICES[pick];

        // 70% quotes, 30% trades.
        if rng.gen_bool(0.7) {
            let mut msg = [0u8; QUOTE_WIRE_SIZE];
            msg[0] = MessageType::Quote as u8;
            LittleEndian::write_u64(&mut msg[1..9], timestamp);
            LittleEndian::write_u64(&mut msg[9..17], symbol);
            LittleEndian::write_u64(&mut msg[17..25], base_price - rng.gen_range(0..=100));
            LittleEndian::write_u32(&mut msg[25..29], rng.gen_range(1..=20) * 100);
            LittleEndian::write_u64(&mut msg[29..37], base_price + rng.gen_range(0..=100));
            LittleEndian::write_u32(&mut msg[37..41], rng.gen_range(1..=20) * 100);

            output.write_all(&msg)?;
            total_bytes += QUOTE_WIRE_SIZE;
        } else {
            let mut msg = [0u8; TRADE_WIRE_SIZE];
            msg[0] = MessageType::Trade as u8;
            LittleEndian::write_u64(&mut msg[1..9], timestamp);
            LittleEndian::write_u64(&mut msg[9..17], symbol);
            LittleEndian::write_u64(&mut msg[17..25], base_price + rng.gen_range(0..=100) - 50);
            LittleEndian::write_u32(&mut msg[25..29], rng.gen_range(1..=10) * 100);

            output.write_all(&msg)?;
            total_bytes += TRADE_WIRE_SIZE;
        }

        timestamp += rng.gen_range(1..=100);

        if i % 100_000 == 0 && i > 0 {
            eprintln!("Generated {} messages", i);
        }
    }

    eprintln!("Feed generation complete: {} messages", message_count);
    eprintln!("File size: {} bytes", total_bytes);

    Ok(())
}
