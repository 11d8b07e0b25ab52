/// Binary wire format for the exchange market-data feed
///
/// Feed layout (little-endian throughout):
///   - 8-byte header: u64 message count
///   - followed by that many tagged records, each a fixed width
///
/// Record layouts, tag byte included:
///   Trade (tag 1), 32 bytes:
///     [tag(1)][timestamp(8)][symbol(8)][price(8)][quantity(4)][padding(3)]
///   Quote (tag 2), 44 bytes:
///     [tag(1)][timestamp(8)][symbol(8)][bid_price(8)][bid_quantity(4)]
///     [ask_price(8)][ask_quantity(4)][padding(3)]
///
/// Prices are fixed-point integer cents (price * 100). The symbol is an
/// 8-byte value, usually an ASCII ticker packed little-endian into a u64;
/// the core treats it as an opaque key.

/// Size of the feed header carrying the message count.
pub const FEED_HEADER_SIZE: usize = 8;

/// Total wire width of a trade record, tag and trailing padding included.
pub const TRADE_WIRE_SIZE: usize = 32;

/// Total wire width of a quote record, tag and trailing padding included.
pub const QUOTE_WIRE_SIZE: usize = 44;

/// Trailing padding bytes on every record. Preserved on the wire, never
/// interpreted.
pub const RECORD_PADDING: usize = 3;

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Trade = 1,
    Quote = 2,
}

impl MessageType {
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            1 => Some(MessageType::Trade),
            2 => Some(MessageType::Quote),
            _ => None,
        }
    }

    /// Wire width of a record carrying this tag.
    pub fn wire_size(self) -> usize {
        match self {
            MessageType::Trade => TRADE_WIRE_SIZE,
            MessageType::Quote => QUOTE_WIRE_SIZE,
        }
    }
}

/// An executed trade for a single instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TradeMessage {
    pub timestamp: u64,
    pub symbol: u64,
    pub price: u64, // fixed-point: price * 100
    pub quantity: u32,
}

/// A best bid/ask update for a single instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuoteMessage {
    pub timestamp: u64,
    pub symbol: u64,
    pub bid_price: u64, // fixed-point: price * 100
    pub bid_quantity: u32,
    pub ask_price: u64, // fixed-point: price * 100
    pub ask_quantity: u32,
}

/// A decoded feed record. The discriminant mirrors the wire tag byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarketDataMessage {
    Trade(TradeMessage),
    Quote(QuoteMessage),
}

impl MarketDataMessage {
    pub fn message_type(&self) -> MessageType {
        match self {
            MarketDataMessage::Trade(_) => MessageType::Trade,
            MarketDataMessage::Quote(_) => MessageType::Quote,
        }
    }

    pub fn symbol(&self) -> u64 {
        match self {
            MarketDataMessage::Trade(m) => m.symbol,
            MarketDataMessage::Quote(m) => m.symbol,
        }
    }

    pub fn timestamp(&self) -> u64 {
        match self {
            MarketDataMessage::Trade(m) => m.timestamp,
            MarketDataMessage::Quote(m) => m.timestamp,
        }
    }
}

// Compile-time assertions tying the size constants to the field widths.
const _: () = {
    assert!(TRADE_WIRE_SIZE == 1 + 8 + 8 + 8 + 4 + RECORD_PADDING);
    assert!(QUOTE_WIRE_SIZE == 1 + 8 + 8 + 8 + 4 + 8 + 4 + RECORD_PADDING);
};

/// Convert a fixed-point cent price to a float dollar price.
pub fn price_from_fixed(fixed: u64) -> f64 {
    fixed as f64 / 100.0
}

/// Convert a float dollar price to fixed-point cents.
pub fn price_to_fixed(price: f64) -> u64 {
    (price * 100.0) as u64
}

/// Render a LE-packed ASCII symbol for display. Non-printable bytes end the
/// ticker; a symbol with no printable prefix falls back to its numeric value.
pub fn symbol_to_string(symbol: u64) -> String {
    let bytes = symbol.to_le_bytes();
    let ticker: String = bytes
        .iter()
        .take_while(|b| b.is_ascii_graphic())
        .map(|&b| b as char)
        .collect();

    if ticker.is_empty() {
        symbol.to_string()
    } else {
        ticker
    }
}
