/// Bounds-checked feed decoder
///
/// Walks the raw feed buffer sequentially: an 8-byte little-endian message
/// count, then that many tagged fixed-width records. The cursor never copies
/// the buffer and never reads past its end; a truncated feed or an unknown
/// tag byte is an explicit error, not a wild read.
///
/// Record widths come from the wire format constants, determined once, not
/// recomputed per message.

use crate::protocol::*;
use byteorder::{ByteOrder, LittleEndian};
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    #[error("buffer too small: need {need} bytes, have {have}")]
    BufferTooSmall { need: usize, have: usize },

    #[error("invalid tag byte: {0}")]
    InvalidTag(u8),
}

pub type DecodeResult<T> = Result<T, DecodeError>;

/// Read-only cursor over a raw feed buffer.
pub struct FeedCursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> FeedCursor<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        FeedCursor { buf, pos: 0 }
    }

    /// Bytes left between the cursor and the end of the buffer.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Read the feed header and return the expected message count.
    pub fn read_header(&mut self) -> DecodeResult<u64> {
        if self.remaining() < FEED_HEADER_SIZE {
            return Err(DecodeError::BufferTooSmall {
                need: FEED_HEADER_SIZE,
                have: self.remaining(),
            });
        }

        let count = LittleEndian::read_u64(&self.buf[self.pos..self.pos + FEED_HEADER_SIZE]);
        self.pos += FEED_HEADER_SIZE;
        Ok(count)
    }

    /// Decode the record at the cursor and advance past it, trailing padding
    /// included.
    pub fn next_message(&mut self) -> DecodeResult<MarketDataMessage> {
        if self.remaining() < 1 {
            return Err(DecodeError::BufferTooSmall {
                need: 1,
                have: 0,
            });
        }

        let tag = self.buf[self.pos];
        let msg_type = MessageType::from_u8(tag).ok_or(DecodeError::InvalidTag(tag))?;

        let size = msg_type.wire_size();
        if self.remaining() < size {
            return Err(DecodeError::BufferTooSmall {
                need: size,
                have: self.remaining(),
            });
        }

        let rec = &self.buf[self.pos..self.pos + size];
        let msg = match msg_type {
            MessageType::Trade => MarketDataMessage::Trade(TradeMessage {
                timestamp: LittleEndian::read_u64(&rec[1..9]),
                symbol: LittleEndian::read_u64(&rec[9..17]),
                price: LittleEndian::read_u64(&rec[17..25]),
                quantity: LittleEndian::read_u32(&rec[25..29]),
            }),
            MessageType::Quote => MarketDataMessage::Quote(QuoteMessage {
                timestamp: LittleEndian::read_u64(&rec[1..9]),
                symbol: LittleEndian::read_u64(&rec[9..17]),
                bid_price: LittleEndian::read_u64(&rec[17..25]),
                bid_quantity: LittleEndian::read_u32(&rec[25..29]),
                ask_price: LittleEndian::read_u64(&rec[29..37]),
                ask_quantity: LittleEndian::read_u32(&rec[37..41]),
            }),
        };

        self.pos += size;
        Ok(msg)
    }
}

/// Scan a whole feed without building messages: header, then every record's
/// tag and width against the buffer bounds. Returns the message count.
///
/// Run during pipeline setup so the producer's in-run decode cannot fail
/// mid-stream and leave the consumer waiting on messages that never arrive.
pub fn validate_feed(buf: &[u8]) -> DecodeResult<u64> {
    let mut cursor = FeedCursor::new(buf);
    let count = cursor.read_header()?;

    for _ in 0..count {
        if cursor.remaining() < 1 {
            return Err(DecodeError::BufferTooSmall {
                need: 1,
                have: 0,
            });
        }

        let tag = cursor.buf[cursor.pos];
        let msg_type = MessageType::from_u8(tag).ok_or(DecodeError::InvalidTag(tag))?;

        let size = msg_type.wire_size();
        if cursor.remaining() < size {
            return Err(DecodeError::BufferTooSmall {
                need: size,
                have: cursor.remaining(),
            });
        }
        cursor.pos += size;
    }

    Ok(count)
}
