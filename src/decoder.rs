//! Symmetric decoder: artifact name plus bytes back to the original batch.
//!
//! The name supplies the record count (the artifact has no internal length
//! header), so decode is: parse name, inflate to exactly `count x 54` bytes,
//! slice into fixed-width records, reverse the differential transform. Any
//! mismatch is a hard failure; there is no partial or best-effort decode.

use crate::error::CodecError;
use crate::kernels::{deflate, delta};
use crate::naming;
use crate::record::Snapshot;
use crate::schema::FieldSchema;

/// A fully reconstructed record batch.
#[derive(Debug, Clone)]
pub struct DecodedBatch {
    pub symbol: String,
    pub records: Vec<Snapshot>,
}

/// Decodes one artifact given its file name and payload bytes.
pub fn decode_artifact(file_name: &str, bytes: &[u8]) -> Result<DecodedBatch, CodecError> {
    let (symbol, record_count) = naming::parse_artifact_name(file_name)?;
    let width = FieldSchema::shared().record_width();

    let raw = deflate::decompress(bytes, record_count * width)?;

    let mut records = Vec::with_capacity(record_count);
    for chunk in raw.chunks_exact(width) {
        records.push(Snapshot::decode(chunk)?);
    }
    delta::reverse(&mut records);

    Ok(DecodedBatch { symbol, records })
}

//==================================================================================
// Unit Tests
//==================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::{assemble, sample_row as row, DaySource};

    fn encoded() -> crate::assembler::EncodedBatch {
        let days = vec![DaySource {
            name: "sh600000_20250603.csv".into(),
            rows: vec![row(3, 34_200, 12.34), row(3, 34_203, 12.36), row(3, 34_209, 12.31)],
        }];
        assemble("sh600000", &days, deflate::DEFAULT_LEVEL).unwrap()
    }

    #[test]
    fn decode_reconstructs_absolute_values() {
        let batch = encoded();
        let decoded = decode_artifact(&batch.file_name(), &batch.bytes).unwrap();
        assert_eq!(decoded.symbol, "sh600000");
        assert_eq!(decoded.records.len(), 3);
        assert!(decoded.records[0].sync);
        assert!(!decoded.records[1].sync);
        assert_eq!(decoded.records[0].latest_price_tick, 1234);
        assert_eq!(decoded.records[1].latest_price_tick, 1236);
        assert_eq!(decoded.records[2].latest_price_tick, 1231);
        assert_eq!(decoded.records[2].time_s, 34_209);
    }

    #[test]
    fn malformed_name_is_rejected_before_inflate() {
        let batch = encoded();
        assert!(matches!(
            decode_artifact("sh600000.bin", &batch.bytes),
            Err(CodecError::MalformedArtifactName(_))
        ));
    }

    #[test]
    fn wrong_count_in_name_is_corrupt() {
        let batch = encoded();
        let lying_name = naming::artifact_file_name(&batch.symbol, batch.record_count + 1);
        assert!(matches!(
            decode_artifact(&lying_name, &batch.bytes),
            Err(CodecError::CorruptArtifact(_))
        ));
    }

    #[test]
    fn truncated_payload_is_corrupt() {
        let batch = encoded();
        let truncated = &batch.bytes[..batch.bytes.len() / 2];
        assert!(matches!(
            decode_artifact(&batch.file_name(), truncated),
            Err(CodecError::CorruptArtifact(_))
        ));
    }
}
