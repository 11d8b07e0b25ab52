/// End-to-end pipeline tests

use byteorder::{ByteOrder, LittleEndian};
use tick_pipeline::protocol::{MessageType, FEED_HEADER_SIZE, QUOTE_WIRE_SIZE, TRADE_WIRE_SIZE};
use tick_pipeline::{pipeline, BookEntry, VwapEntry};

fn trade_record(timestamp: u64, symbol: u64, price: u64, quantity: u32) -> Vec<u8> {
    let mut rec = vec![0u8; TRADE_WIRE_SIZE];
    rec[0] = MessageType::Trade as u8;
    LittleEndian::write_u64(&mut rec[1..9], timestamp);
    LittleEndian::write_u64(&mut rec[9..17], symbol);
    LittleEndian::write_u64(&mut rec[17..25], price);
    LittleEndian::write_u32(&mut rec[25..29], quantity);
    rec
}

fn quote_record(
    timestamp: u64,
    symbol: u64,
    bid_price: u64,
    bid_quantity: u32,
    ask_price: u64,
    ask_quantity: u32,
) -> Vec<u8> {
    let mut rec = vec![0u8; QUOTE_WIRE_SIZE];
    rec[0] = MessageType::Quote as u8;
    LittleEndian::write_u64(&mut rec[1..9], timestamp);
    LittleEndian::write_u64(&mut rec[9..17], symbol);
    LittleEndian::write_u64(&mut rec[17..25], bid_price);
    LittleEndian::write_u32(&mut rec[25..29], bid_quantity);
    LittleEndian::write_u64(&mut rec[29..37], ask_price);
    LittleEndian::write_u32(&mut rec[37..41], ask_quantity);
    rec
}

fn feed_with(records: &[Vec<u8>]) -> Vec<u8> {
    let mut feed = vec![0u8; FEED_HEADER_SIZE];
    LittleEndian::write_u64(&mut feed[..8], records.len() as u64);
    for rec in records {
        feed.extend_from_slice(rec);
    }
    feed
}

#[test]
fn test_quote_then_trade_scenario() {
    let feed = feed_with(&[
        quote_record(1_000_000, 1, 15005, 100, 14995, 90),
        trade_record(1_000_010, 1, 15000, 50),
    ]);

    let result = pipeline::run(&feed).unwrap();

    assert_eq!(
        result.book.get(1),
        Some(&BookEntry {
            updated_at: 1_000_000,
            bid_price: 15005,
            bid_quantity: 100,
            ask_price: 14995,
            ask_quantity: 90,
        })
    );
    assert_eq!(
        result.vwap.get(1),
        Some(&VwapEntry {
            updated_at: 1_000_010,
            total_price_by_quantity: 750_000,
            total_quantity: 50,
            total_trades: 1,
        })
    );
    assert_eq!(result.stats.total_messages(), 2);
}

#[test]
fn test_later_quote_replaces_entry() {
    let feed = feed_with(&[
        quote_record(1_000_000, 1, 15005, 100, 14995, 90),
        quote_record(1_000_050, 1, 15010, 200, 15020, 150),
    ]);

    let result = pipeline::run(&feed).unwrap();

    // Only the second quote's fields survive.
    assert_eq!(
        result.book.get(1),
        Some(&BookEntry {
            updated_at: 1_000_050,
            bid_price: 15010,
            bid_quantity: 200,
            ask_price: 15020,
            ask_quantity: 150,
        })
    );
    assert_eq!(result.book.len(), 1);
}

#[test]
fn test_three_trades_accumulate() {
    let feed = feed_with(&[
        trade_record(1_000_000, 1, 15000, 100),
        trade_record(1_000_050, 1, 15000, 100),
        trade_record(1_000_100, 1, 15000, 100),
    ]);

    let result = pipeline::run(&feed).unwrap();

    assert_eq!(
        result.vwap.get(1),
        Some(&VwapEntry {
            updated_at: 1_000_100,
            total_price_by_quantity: 4_500_000,
            total_quantity: 300,
            total_trades: 3,
        })
    );
}

#[test]
fn test_unknown_symbol_lookups() {
    let feed = feed_with(&[trade_record(1, 1, 100, 10)]);
    let result = pipeline::run(&feed).unwrap();

    assert_eq!(result.book.get(1), None);
    assert_eq!(result.vwap.get(99), None);
}

#[test]
fn test_large_feed_exceeding_queue_capacity() {
    // Far more messages than the ring holds, forcing producer back-pressure.
    const MESSAGES: u64 = 50_000;

    let mut records = Vec::with_capacity(MESSAGES as usize);
    for i in 0..MESSAGES {
        // Trades land on even offsets, quotes on odd; both cycle all four
        // symbols.
        let symbol = 1 + ((i / 2) % 4);
        if i % 2 == 0 {
            records.push(trade_record(i, symbol, 10_000 + i, 10));
        } else {
            records.push(quote_record(i, symbol, 9_990, 100, 10_010, 100));
        }
    }
    let feed = feed_with(&records);

    let result = pipeline::run(&feed).unwrap();

    assert_eq!(result.stats.total_messages(), MESSAGES);
    assert_eq!(result.book.len(), 4);
    assert_eq!(result.vwap.len(), 4);

    // Per-symbol trade counts: every other message is a trade, spread
    // round-robin over four symbols.
    let total_trades: u64 = (1..=4)
        .map(|s| u64::from(result.vwap.get(s).unwrap().total_trades))
        .sum();
    assert_eq!(total_trades, MESSAGES / 2);

    // The book holds the last quote per symbol, which always carries the
    // same prices here.
    for symbol in 1..=4 {
        let entry = result.book.get(symbol).unwrap();
        assert_eq!(entry.bid_price, 9_990);
        assert_eq!(entry.ask_price, 10_010);
    }
}

#[test]
fn test_consumer_sees_stream_order() {
    // Two quotes for the same symbol: the later one must win, which only
    // holds if the queue preserves FIFO order end to end.
    const ROUNDS: u64 = 10_000;

    let mut records = Vec::new();
    for i in 0..ROUNDS {
        records.push(quote_record(i, 1, i, 1, i + 1, 1));
    }
    let feed = feed_with(&records);

    let result = pipeline::run(&feed).unwrap();
    assert_eq!(result.book.get(1).unwrap().updated_at, ROUNDS - 1);
    assert_eq!(result.book.get(1).unwrap().bid_price, ROUNDS - 1);
}

#[test]
fn test_truncated_feed_fails() {
    let mut feed = feed_with(&[trade_record(1, 1, 100, 10)]);
    feed.truncate(feed.len() - 4);
    assert!(pipeline::run(&feed).is_err());
}
