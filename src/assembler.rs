//! Batch assembly: everything between raw per-day rows and the compressed
//! artifact bytes for one (symbol, month) pair.
//!
//! The assembler concatenates day sources in the order supplied (callers
//! pass them pre-sorted by file name, which is monotonic with calendar day),
//! quantizes each row, verifies the chronological invariant, serializes the
//! fixed-width batch, applies the differential transform, and compresses the
//! whole image in one pass. It performs no disk I/O; persistence belongs to
//! the caller, constrained by the naming contract.

use crate::error::CodecError;
use crate::kernels::{deflate, delta};
use crate::naming;
use crate::quant;
use crate::record::Snapshot;
use crate::schema::FieldSchema;

//==================================================================================
// 1. Input Types
//==================================================================================

/// One raw market event, pre-quantization. Produced by ingestion
/// collaborators; CSV parsing and column mapping are outside this crate.
#[derive(Debug, Clone)]
pub struct SnapshotRow {
    /// Day of month, 1-31.
    pub day: u8,
    /// Seconds since midnight.
    pub time_s: u16,
    /// Last trade price in currency units.
    pub price: f64,
    /// Trades this second.
    pub trade_count: u64,
    /// Turnover in currency units.
    pub turnover: f64,
    /// Volume in lots of 100 shares.
    pub volume_lots: u64,
    pub bid_prices: [f64; 5],
    pub bid_volumes: [u64; 5],
    pub ask_prices: [f64; 5],
    pub ask_volumes: [u64; 5],
    /// Raw direction marker, mapped by [`quant::direction_to_code`].
    pub direction: String,
}

/// All rows from one per-day source file.
#[derive(Debug, Clone)]
pub struct DaySource {
    /// Source file name, e.g. `sh600000_20250603.csv`.
    pub name: String,
    pub rows: Vec<SnapshotRow>,
}

/// The compressed output for one (symbol, month) pair.
#[derive(Debug, Clone)]
pub struct EncodedBatch {
    pub symbol: String,
    pub record_count: usize,
    pub bytes: Vec<u8>,
}

impl EncodedBatch {
    /// The artifact file name carrying the record count.
    pub fn file_name(&self) -> String {
        naming::artifact_file_name(&self.symbol, self.record_count)
    }
}

//==================================================================================
// 2. Assembly
//==================================================================================

/// Encodes one symbol-month. `days` must already be in chronological (file
/// name) order; row order inside each day is preserved as-is.
pub fn assemble(symbol: &str, days: &[DaySource], level: u32) -> Result<EncodedBatch, CodecError> {
    let schema = FieldSchema::shared();

    let total: usize = days.iter().map(|d| d.rows.len()).sum();
    let mut records = Vec::with_capacity(total);
    for day in days {
        for row in &day.rows {
            records.push(quantize_row(row)?);
        }
    }

    enforce_ordering(&records)?;
    delta::apply(&mut records);

    let mut raw = Vec::with_capacity(records.len() * schema.record_width());
    for record in &records {
        record.encode_into(&mut raw);
    }
    let bytes = deflate::compress(&raw, level)?;

    Ok(EncodedBatch {
        symbol: symbol.to_lowercase(),
        record_count: records.len(),
        bytes,
    })
}

/// Maps one raw row onto the fixed-width record. Fallible: price and volume
/// overflow is rejected rather than wrapped.
fn quantize_row(row: &SnapshotRow) -> Result<Snapshot, CodecError> {
    let mut bid_price_ticks = [0i16; 5];
    let mut ask_price_ticks = [0i16; 5];
    let mut bid_volumes = [0u16; 5];
    let mut ask_volumes = [0u16; 5];
    for level in 0..5 {
        bid_price_ticks[level] = quant::price_to_tick(row.bid_prices[level])?;
        ask_price_ticks[level] = quant::price_to_tick(row.ask_prices[level])?;
        bid_volumes[level] = quant::volume_to_lots(row.bid_volumes[level])?;
        ask_volumes[level] = quant::volume_to_lots(row.ask_volumes[level])?;
    }

    Ok(Snapshot {
        sync: false, // the transform owns the sync flag
        date: row.day,
        time_s: row.time_s,
        latest_price_tick: quant::price_to_tick(row.price)?,
        trade_count: quant::clip_trade_count(row.trade_count),
        turnover: quant::clip_turnover(row.turnover),
        volume: quant::volume_to_lots(row.volume_lots)?,
        bid_price_ticks,
        bid_volumes,
        ask_price_ticks,
        ask_volumes,
        direction: quant::direction_to_code(&row.direction),
    })
}

/// Rejects batches that are not strictly increasing by (date, time_s).
fn enforce_ordering(records: &[Snapshot]) -> Result<(), CodecError> {
    for (i, pair) in records.windows(2).enumerate() {
        let (prev, cur) = (&pair[0], &pair[1]);
        if (cur.date, cur.time_s) <= (prev.date, prev.time_s) {
            return Err(CodecError::OrderingViolation {
                index: i + 1,
                date: cur.date,
                time_s: cur.time_s,
                prev_date: prev.date,
                prev_time_s: prev.time_s,
            });
        }
    }
    Ok(())
}

//==================================================================================
// 3. Unit Tests
//==================================================================================

/// Builds a plausible raw row for tests elsewhere in the crate.
#[cfg(test)]
pub(crate) fn sample_row(day: u8, time_s: u16, price: f64) -> SnapshotRow {
    SnapshotRow {
        day,
        time_s,
        price,
        trade_count: 4,
        turnover: 125_000.0,
        volume_lots: 12,
        bid_prices: [price - 0.01, price - 0.02, price - 0.03, price - 0.04, price - 0.05],
        bid_volumes: [10, 20, 30, 40, 50],
        ask_prices: [price + 0.01, price + 0.02, price + 0.03, price + 0.04, price + 0.05],
        ask_volumes: [5, 15, 25, 35, 45],
        direction: "B".to_string(),
    }
}
