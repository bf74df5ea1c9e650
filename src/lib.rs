//! This file is the root of the `snapcodec` crate.
//!
//! snapcodec turns daily per-symbol L1 market snapshots (top-5 bid/ask,
//! last trade, turnover, direction) into one compact binary artifact per
//! (symbol, calendar-month), and decodes those artifacts back byte-exactly.
//!
//! The encode path is: raw rows -> [`quant`] -> [`record`] fixed-width
//! serialization -> [`kernels::delta`] differential transform ->
//! [`kernels::deflate`] compression. The decode path reverses every arrow.
//! The record count is persisted only in the artifact file name (see
//! [`naming`]); the artifact carries no internal header.

//==================================================================================
// 0. Constants
//==================================================================================
/// The crate version, automatically set from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//==================================================================================
// 1. Module Declarations
//==================================================================================
pub mod assembler;
pub mod config;
pub mod decoder;
pub mod kernels;
pub mod naming;
pub mod observability;
pub mod pipeline;
pub mod quant;
pub mod record;
pub mod schema;

mod error;

pub use error::CodecError;
