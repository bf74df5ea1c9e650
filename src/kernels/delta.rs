//! In-place kernels for the differential (delta) transform across a
//! chronologically ordered batch of snapshot records.
//!
//! Encoding replaces each differential field of record `i` (`i >= 1`) with
//! `raw[i] - raw[i-1]`, element-wise for the quote-level arrays. The encode
//! loop proceeds in reverse so that every subtraction sees pre-transform
//! values on both sides; the decode loop proceeds forward, building each
//! record on top of the one just reconstructed (a sequential scan with a
//! data dependency).
//!
//! All arithmetic is wrapping: deltas of narrow unsigned fields (a day
//! boundary drops `time_s` by tens of thousands) must wrap on encode and
//! un-wrap on decode to round-trip exactly.

use num_traits::{WrappingAdd, WrappingSub};

use crate::record::Snapshot;

//==================================================================================
// 1. Generic Element Kernels
//==================================================================================

/// `cur[j] -= prev[j]` with wrapping, for every element.
fn encode_elems<T, const N: usize>(cur: &mut [T; N], prev: &[T; N])
where
    T: WrappingSub + Copy,
{
    for j in 0..N {
        cur[j] = cur[j].wrapping_sub(&prev[j]);
    }
}

/// `cur[j] += prev[j]` with wrapping, for every element.
fn decode_elems<T, const N: usize>(cur: &mut [T; N], prev: &[T; N])
where
    T: WrappingAdd + Copy,
{
    for j in 0..N {
        cur[j] = cur[j].wrapping_add(&prev[j]);
    }
}

//==================================================================================
// 2. Batch Transform
//==================================================================================

/// Applies the differential transform in place.
///
/// Record 0 keeps absolute values and has its `sync` flag forced true; every
/// later record is rewritten to deltas against the previous *raw* record and
/// has `sync` forced false. Empty and singleton batches are identity apart
/// from the `sync` flag.
pub fn apply(records: &mut [Snapshot]) {
    if let Some(first) = records.first_mut() {
        first.sync = true;
    }
    // Reverse iteration: record i-1 is still raw when record i is rewritten.
    for i in (1..records.len()).rev() {
        let (head, tail) = records.split_at_mut(i);
        let prev = &head[i - 1];
        let cur = &mut tail[0];
        cur.sync = false;
        cur.date = cur.date.wrapping_sub(prev.date);
        cur.time_s = cur.time_s.wrapping_sub(prev.time_s);
        cur.latest_price_tick = cur.latest_price_tick.wrapping_sub(prev.latest_price_tick);
        encode_elems(&mut cur.bid_price_ticks, &prev.bid_price_ticks);
        encode_elems(&mut cur.ask_price_ticks, &prev.ask_price_ticks);
    }
}

/// Reverses the differential transform in place, reconstructing raw values by
/// cumulative sum seeded from record 0. Must run in increasing index order.
pub fn reverse(records: &mut [Snapshot]) {
    for i in 1..records.len() {
        let (head, tail) = records.split_at_mut(i);
        let prev = &head[i - 1];
        let cur = &mut tail[0];
        cur.date = cur.date.wrapping_add(prev.date);
        cur.time_s = cur.time_s.wrapping_add(prev.time_s);
        cur.latest_price_tick = cur.latest_price_tick.wrapping_add(prev.latest_price_tick);
        decode_elems(&mut cur.bid_price_ticks, &prev.bid_price_ticks);
        decode_elems(&mut cur.ask_price_ticks, &prev.ask_price_ticks);
    }
}

//==================================================================================
// 3. Unit Tests
//==================================================================================
