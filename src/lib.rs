/// Tick Pipeline - Market Data Tape Processor
///
/// Batch processor for binary exchange market-data feeds. Decodes a tagged
/// trade/quote record stream on one thread, moves messages through a
/// wait-free SPSC ring buffer, and folds them into live aggregates on a
/// second thread. Features include:
/// - Fixed-width binary protocol parsing with a bounds-checked cursor
/// - Lock-free single-producer/single-consumer queue
/// - Best bid/ask book keyed by instrument symbol
/// - Per-symbol VWAP accumulation
/// - Throughput and latency figures per run

pub mod book;
pub mod decoder;
pub mod pipeline;
pub mod protocol;
pub mod queue;
pub mod stats;
pub mod vwap;

pub use book::{BookEntry, OrderBook};
pub use decoder::{validate_feed, DecodeError, FeedCursor};
pub use pipeline::{run, PipelineResult, QUEUE_SIZE};
pub use protocol::{MarketDataMessage, MessageType, QuoteMessage, TradeMessage};
pub use queue::{Consumer, Producer, SpscQueue};
pub use stats::RunStats;
pub use vwap::{VwapEntry, VwapTracker};
