//! Zlib/deflate kernel: the final stage of the encode pipeline.
//!
//! Compression runs once over the whole batch's raw byte image, never per
//! record; whole-batch compression amortizes the reduced entropy left by the
//! differential transform. The level is fixed at 6 for deterministic,
//! reproducible artifacts. Decompression validates the inflated length
//! against the count carried in the artifact name, since the stream itself
//! has no internal header.

use std::io::{Read, Write};

use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;

use crate::error::CodecError;

/// Fixed compression level for snapshot artifacts.
pub const DEFAULT_LEVEL: u32 = 6;

/// Compresses the batch image in one pass.
pub fn compress(input: &[u8], level: u32) -> Result<Vec<u8>, CodecError> {
    let out = Vec::with_capacity(input.len() / 2 + 64);
    let mut encoder = ZlibEncoder::new(out, Compression::new(level));
    encoder
        .write_all(input)
        .map_err(|e| CodecError::Deflate(e.to_string()))?;
    encoder.finish().map_err(|e| CodecError::Deflate(e.to_string()))
}

/// Decompresses an artifact payload, failing unless the inflated stream is
/// exactly `expected_len` bytes.
pub fn decompress(input: &[u8], expected_len: usize) -> Result<Vec<u8>, CodecError> {
    let mut decoder = ZlibDecoder::new(input);
    let mut out = Vec::with_capacity(expected_len);
    decoder
        .read_to_end(&mut out)
        .map_err(|e| CodecError::CorruptArtifact(format!("inflate failed: {e}")))?;
    if out.len() != expected_len {
        return Err(CodecError::CorruptArtifact(format!(
            "inflated length {} does not match expected {}",
            out.len(),
            expected_len
        )));
    }
    Ok(out)
}

//==================================================================================
// Unit Tests
//==================================================================================
