//! This module defines the single, unified error type for the entire snapcodec
//! library. It uses the `thiserror` crate to provide ergonomic, context-aware
//! error handling.
//!
//! Every fallible codec operation returns `CodecError` so that a failure in
//! any stage (schema construction, quantization, record decode, inflate) can
//! be propagated to the per-unit boundary in the pipeline and reported there
//! without aborting sibling units.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodecError {
    // =========================================================================
    // === Fatal at process start
    // =========================================================================
    #[error("Schema initialization failed: {0}")]
    SchemaInit(String),

    // =========================================================================
    // === Fatal per input source
    // =========================================================================
    /// A required raw column is absent from an input source. Raised by
    /// ingestion collaborators that feed `SnapshotRow`s into the assembler.
    #[error("Required input field missing: {0}")]
    MissingField(String),

    /// Encode input is not strictly increasing by (date, time_s).
    #[error("Ordering violation at record {index}: ({date}, {time_s}) does not advance past ({prev_date}, {prev_time_s})")]
    OrderingViolation {
        index: usize,
        date: u8,
        time_s: u16,
        prev_date: u8,
        prev_time_s: u16,
    },

    /// A raw value does not fit its declared storage width. Trade count and
    /// turnover saturate instead; see the `quant` module for the policy.
    #[error("Quantization overflow in field '{field}': value {value} does not fit the target width")]
    QuantizationOverflow { field: &'static str, value: f64 },

    // =========================================================================
    // === Fatal per decode
    // =========================================================================
    #[error("Record width mismatch: expected {expected} bytes, got {got}")]
    RecordWidthMismatch { expected: usize, got: usize },

    #[error("Malformed artifact name: {0}")]
    MalformedArtifactName(String),

    #[error("Corrupt artifact: {0}")]
    CorruptArtifact(String),

    // =========================================================================
    // === External Error Wrappers
    // =========================================================================
    #[error("Deflate operation failed: {0}")]
    Deflate(String),

    /// An error originating from the underlying I/O subsystem.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal logic error (this is a bug): {0}")]
    Internal(String),
}
