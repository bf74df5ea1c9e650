//! Fixed-width serialization of one snapshot record.
//!
//! A [`Snapshot`] packs to exactly 54 bytes in schema order with no padding.
//! Byte order is pinned little-endian on every platform; the layout is part
//! of the wire contract shared with the downstream engine.

use crate::error::CodecError;
use crate::schema::FieldSchema;

/// Serialized width of one record in bytes.
pub const RECORD_WIDTH: usize = 54;

/// One L1 market snapshot.
///
/// In a raw batch every field holds absolute values. After the differential
/// transform, fields flagged differential hold raw-minus-previous-raw deltas
/// for records at index >= 1, and `sync` is true only on record 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Snapshot {
    pub sync: bool,
    /// Day of month, 1-31.
    pub date: u8,
    /// Seconds since midnight.
    pub time_s: u16,
    pub latest_price_tick: i16,
    /// Trades this second, saturated to 255.
    pub trade_count: u8,
    /// Turnover in currency units, saturated to u32.
    pub turnover: u32,
    /// Volume in lots of 100 shares.
    pub volume: u16,
    pub bid_price_ticks: [i16; 5],
    pub bid_volumes: [u16; 5],
    pub ask_price_ticks: [i16; 5],
    pub ask_volumes: [u16; 5],
    /// 0 = buy, 1 = sell, 2 = unknown/other.
    pub direction: u8,
}

impl Snapshot {
    /// Appends the record's 54-byte little-endian image to `out`.
    pub fn encode_into(&self, out: &mut Vec<u8>) {
        out.push(u8::from(self.sync));
        out.push(self.date);
        out.extend_from_slice(&self.time_s.to_le_bytes());
        out.extend_from_slice(&self.latest_price_tick.to_le_bytes());
        out.push(self.trade_count);
        out.extend_from_slice(&self.turnover.to_le_bytes());
        out.extend_from_slice(&self.volume.to_le_bytes());
        for tick in &self.bid_price_ticks {
            out.extend_from_slice(&tick.to_le_bytes());
        }
        for lots in &self.bid_volumes {
            out.extend_from_slice(&lots.to_le_bytes());
        }
        for tick in &self.ask_price_ticks {
            out.extend_from_slice(&tick.to_le_bytes());
        }
        for lots in &self.ask_volumes {
            out.extend_from_slice(&lots.to_le_bytes());
        }
        out.push(self.direction);
    }

    /// Decodes one record from exactly [`RECORD_WIDTH`] bytes.
    pub fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
        if bytes.len() != RECORD_WIDTH {
            return Err(CodecError::RecordWidthMismatch {
                expected: RECORD_WIDTH,
                got: bytes.len(),
            });
        }
        let mut pos = 0usize;
        let sync = take::<1>(bytes, &mut pos)[0] != 0;
        let date = take::<1>(bytes, &mut pos)[0];
        let time_s = u16::from_le_bytes(take::<2>(bytes, &mut pos));
        let latest_price_tick = i16::from_le_bytes(take::<2>(bytes, &mut pos));
        let trade_count = take::<1>(bytes, &mut pos)[0];
        let turnover = u32::from_le_bytes(take::<4>(bytes, &mut pos));
        let volume = u16::from_le_bytes(take::<2>(bytes, &mut pos));

        let mut bid_price_ticks = [0i16; 5];
        for tick in &mut bid_price_ticks {
            *tick = i16::from_le_bytes(take::<2>(bytes, &mut pos));
        }
        let mut bid_volumes = [0u16; 5];
        for lots in &mut bid_volumes {
            *lots = u16::from_le_bytes(take::<2>(bytes, &mut pos));
        }
        let mut ask_price_ticks = [0i16; 5];
        for tick in &mut ask_price_ticks {
            *tick = i16::from_le_bytes(take::<2>(bytes, &mut pos));
        }
        let mut ask_volumes = [0u16; 5];
        for lots in &mut ask_volumes {
            *lots = u16::from_le_bytes(take::<2>(bytes, &mut pos));
        }
        let direction = take::<1>(bytes, &mut pos)[0];

        Ok(Self {
            sync,
            date,
            time_s,
            latest_price_tick,
            trade_count,
            turnover,
            volume,
            bid_price_ticks,
            bid_volumes,
            ask_price_ticks,
            ask_volumes,
            direction,
        })
    }
}

/// Copies the next `N` bytes out of `bytes` and advances the cursor. The
/// caller guarantees the slice is long enough (length is checked once at the
/// top of `decode`).
fn take<const N: usize>(bytes: &[u8], pos: &mut usize) -> [u8; N] {
    let mut buf = [0u8; N];
    buf.copy_from_slice(&bytes[*pos..*pos + N]);
    *pos += N;
    buf
}

//==================================================================================
// Unit Tests
//==================================================================================
