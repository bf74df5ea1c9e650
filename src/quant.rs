//! Quantization rules mapping raw float-valued rows onto the fixed-width
//! integer fields of the snapshot record.
//!
//! Price ticks use exact decimal arithmetic (`rust_decimal`) so that values
//! like `12.345` round the way they read, not the way their nearest binary
//! float happens to fall. Rounding is half-away-from-zero. Overflow policy:
//! trade count and turnover saturate to their storage width; price ticks and
//! volume lots are rejected with [`CodecError::QuantizationOverflow`] because
//! a wrapped or clamped price silently corrupts every downstream delta.

use rust_decimal::prelude::*;
use rust_decimal::RoundingStrategy;

use crate::error::CodecError;

/// Smallest quoted price increment: one tick = 0.01 currency unit.
pub const PRICE_TICK: f64 = 0.01;

//==================================================================================
// 1. Prices
//==================================================================================

/// Converts a price in currency units into an `i16` tick count
/// (`round(price * 100)`, half away from zero).
///
/// Non-finite input or a result outside `i16` range is rejected.
pub fn price_to_tick(price: f64) -> Result<i16, CodecError> {
    let overflow = || CodecError::QuantizationOverflow {
        field: "price_tick",
        value: price,
    };
    let decimal = Decimal::from_f64(price).ok_or_else(overflow)?;
    let scaled = decimal
        .checked_mul(Decimal::ONE_HUNDRED)
        .ok_or_else(overflow)?;
    scaled
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i16()
        .ok_or_else(overflow)
}

/// Converts a tick count back into a price in currency units.
pub fn tick_to_price(tick: i16) -> f64 {
    f64::from(tick) * PRICE_TICK
}

//==================================================================================
// 2. Counts, Turnover, Volume
//==================================================================================

/// Saturates a per-second trade count to `[0, 255]`.
pub fn clip_trade_count(count: u64) -> u8 {
    count.min(u64::from(u8::MAX)) as u8
}

/// Saturates turnover (currency units) to `[0, 2^32 - 1]`, truncating any
/// fractional part toward zero. NaN maps to 0.
pub fn clip_turnover(turnover: f64) -> u32 {
    // Float-to-int `as` casts saturate at the target bounds.
    turnover as u32
}

/// Converts a volume expressed in lots of 100 shares into `u16`, rejecting
/// values that do not fit.
pub fn volume_to_lots(lots: u64) -> Result<u16, CodecError> {
    u16::try_from(lots).map_err(|_| CodecError::QuantizationOverflow {
        field: "volume_lots",
        value: lots as f64,
    })
}

//==================================================================================
// 3. Direction
//==================================================================================

/// Trade direction codes: 0 = buy, 1 = sell, 2 = unknown/other.
pub const DIRECTION_BUY: u8 = 0;
pub const DIRECTION_SELL: u8 = 1;
pub const DIRECTION_UNKNOWN: u8 = 2;

/// Maps a raw direction marker onto its wire code. Unrecognized or missing
/// input defaults to [`DIRECTION_UNKNOWN`]; this function never errors.
pub fn direction_to_code(raw: &str) -> u8 {
    match raw.trim() {
        "买" | "B" | "0" => DIRECTION_BUY,
        "卖" | "S" | "1" => DIRECTION_SELL,
        _ => DIRECTION_UNKNOWN,
    }
}

//==================================================================================
// 4. Unit Tests
//==================================================================================
