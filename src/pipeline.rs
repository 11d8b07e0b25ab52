/// Pipeline orchestration
///
/// Two phases. Setup: validate the feed (header plus a full bounds/tag scan)
/// and build the queue and the two aggregates. Run: one producer thread
/// decoding records into the queue, one consumer thread folding them into
/// the aggregates, joined when the consumer has processed exactly the
/// header-declared message count. Both sides back off with a thread yield
/// when the queue stalls them; there is no timeout and no cancellation, so a
/// partner thread that never progresses spins the other forever.
///
/// Because the feed is fully validated up front, the run phase cannot fail:
/// a malformed feed is rejected before any thread is spawned.

use std::thread;
use std::time::Instant;

use tracing::{debug, info};

use crate::book::OrderBook;
use crate::decoder::{validate_feed, DecodeResult, FeedCursor};
use crate::protocol::MarketDataMessage;
use crate::queue::SpscQueue;
use crate::stats::RunStats;
use crate::vwap::VwapTracker;

/// Ring size for the decode queue. Power of two; usable capacity is one
/// less.
pub const QUEUE_SIZE: usize = 4096;

/// Final aggregate state and timing figures of one completed run.
#[derive(Debug)]
pub struct PipelineResult {
    pub book: OrderBook,
    pub vwap: VwapTracker,
    pub stats: RunStats,
}

/// Process a complete feed buffer and return the final aggregates.
pub fn run(feed: &[u8]) -> DecodeResult<PipelineResult> {
    // Setup phase.
    let expected = validate_feed(feed)?;
    debug!(messages = expected, bytes = feed.len(), "feed validated");

    let (mut tx, mut rx) = SpscQueue::<MarketDataMessage, QUEUE_SIZE>::new();
    let mut book = OrderBook::new();
    let mut vwap = VwapTracker::new();

    // Run phase. The consumer alone borrows the aggregates mutably; the
    // scope joins both threads before they are readable again.
    let start = Instant::now();
    let produced: DecodeResult<()> = thread::scope(|s| {
        let producer = s.spawn(move || -> DecodeResult<()> {
            let mut cursor = FeedCursor::new(feed);
            cursor.read_header()?;

            for _ in 0..expected {
                let mut msg = cursor.next_message()?;
                loop {
                    match tx.push(msg) {
                        Ok(()) => break,
                        Err(back) => {
                            msg = back;
                            thread::yield_now();
                        }
                    }
                }
            }
            Ok(())
        });

        let book = &mut book;
        let vwap = &mut vwap;
        s.spawn(move || {
            let mut processed: u64 = 0;
            while processed < expected {
                match rx.pop() {
                    Some(MarketDataMessage::Trade(trade)) => {
                        vwap.upsert(trade.symbol, &trade);
                        processed += 1;
                    }
                    Some(MarketDataMessage::Quote(quote)) => {
                        book.upsert(quote.symbol, &quote);
                        processed += 1;
                    }
                    None => thread::yield_now(),
                }
            }
        });

        match producer.join() {
            Ok(res) => res,
            Err(panic) => std::panic::resume_unwind(panic),
        }
    });
    let elapsed = start.elapsed();
    produced?;

    let stats = RunStats::new(expected, feed.len() as u64, elapsed);
    info!(
        messages = expected,
        elapsed_ms = elapsed.as_secs_f64() * 1e3,
        msgs_per_sec = stats.messages_per_sec(),
        "run complete"
    );

    Ok(PipelineResult { book, vwap, stats })
}
