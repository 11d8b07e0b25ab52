/// Aggregate update latency benchmarks

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tick_pipeline::protocol::{QuoteMessage, TradeMessage};
use tick_pipeline::{OrderBook, VwapTracker};

fn bench_book_upsert(c: &mut Criterion) {
    c.bench_function("book_upsert", |b| {
        let mut book = OrderBook::new();
        let mut timestamp = 0u64;

        b.iter(|| {
            let symbol = timestamp % 64;
            book.upsert(
                symbol,
                &QuoteMessage {
                    timestamp,
                    symbol,
                    bid_price: 14995,
                    bid_quantity: 100,
                    ask_price: 15005,
                    ask_quantity: 90,
                },
            );
            timestamp += 1;
        });
    });
}

fn bench_vwap_upsert(c: &mut Criterion) {
    c.bench_function("vwap_upsert", |b| {
        let mut tracker = VwapTracker::new();
        let mut timestamp = 0u64;

        b.iter(|| {
            let symbol = timestamp % 64;
            tracker.upsert(
                symbol,
                &TradeMessage {
                    timestamp,
                    symbol,
                    price: 15000,
                    quantity: 100,
                },
            );
            timestamp += 1;
        });
    });
}

fn bench_book_lookup(c: &mut Criterion) {
    let mut book = OrderBook::new();
    for symbol in 0..1000u64 {
        book.upsert(
            symbol,
            &QuoteMessage {
                timestamp: symbol,
                symbol,
                bid_price: 14995,
                bid_quantity: 100,
                ask_price: 15005,
                ask_quantity: 90,
            },
        );
    }

    c.bench_function("book_lookup", |b| {
        let mut symbol = 0u64;
        b.iter(|| {
            let entry = book.get(black_box(symbol));
            symbol = (symbol + 1) % 1000;
            entry.copied()
        });
    });
}

criterion_group!(benches, bench_book_upsert, bench_vwap_upsert, bench_book_lookup);
criterion_main!(benches);
