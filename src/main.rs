/// Pipeline runner
///
/// Thin wrapper around the library core: maps the feed into memory (a file
/// path argument, or stdin when none is given), runs the pipeline, and
/// prints the final book state, VWAP statistics and performance metrics.

use std::env;
use std::error::Error;
use std::fs::File;
use std::io::Read;
use std::process;

use memmap2::Mmap;
use tracing_subscriber::EnvFilter;

use tick_pipeline::protocol::{price_from_fixed, symbol_to_string};
use tick_pipeline::{pipeline, PipelineResult};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(err) = run() {
        eprintln!("tick-pipeline: {err}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = env::args().collect();

    let result = if args.len() > 1 {
        let file = File::open(&args[1])?;
        // Read-only mapping of a file we never truncate while running.
        let mapped = unsafe { Mmap::map(&file)? };
        pipeline::run(&mapped)?
    } else {
        let mut buf = Vec::new();
        std::io::stdin().lock().read_to_end(&mut buf)?;
        pipeline::run(&buf)?
    };

    print_results(&result);
    Ok(())
}

fn print_results(result: &PipelineResult) {
    println!("\n=== Order Books (Final State) ===");
    println!(
        "{:<12}{:>12}{:>12}{:>12}{:>12}{:>15}",
        "Symbol", "Bid Price", "Bid Qty", "Ask Price", "Ask Qty", "Last Update"
    );
    println!("{}", "-".repeat(75));

    for (&symbol, entry) in result.book.iter() {
        println!(
            "{:<12}{:>12.2}{:>12}{:>12.2}{:>12}{:>15}",
            symbol_to_string(symbol),
            price_from_fixed(entry.bid_price),
            entry.bid_quantity,
            price_from_fixed(entry.ask_price),
            entry.ask_quantity,
            entry.updated_at
        );
    }

    println!("\n=== VWAP Statistics ===");
    println!(
        "{:<12}{:>12}{:>15}{:>15}",
        "Symbol", "VWAP", "Total Qty", "Trade Count"
    );
    println!("{}", "-".repeat(54));

    for (&symbol, entry) in result.vwap.iter() {
        let Some(vwap) = entry.vwap_price() else {
            continue;
        };
        println!(
            "{:<12}${:>11.2}{:>15}{:>15}",
            symbol_to_string(symbol),
            price_from_fixed(vwap),
            entry.total_quantity,
            entry.total_trades
        );
    }

    let stats = &result.stats;
    println!("\n=== Performance Metrics ===");
    println!("Total messages processed: {}", stats.total_messages());
    println!(
        "Processing time: {:.2} ms",
        stats.elapsed().as_secs_f64() * 1e3
    );
    println!("Throughput: {:.0} msgs/sec", stats.messages_per_sec());
    println!(
        "Average latency per message: {:.2} us",
        stats.mean_latency_us()
    );
}
