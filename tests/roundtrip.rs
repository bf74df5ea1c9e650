//! End-to-end encode/decode scenarios exercising the full pipeline through
//! the public API: raw rows -> quantize -> serialize -> delta -> deflate ->
//! artifact file -> decode.

use std::fs;
use std::sync::Arc;

use snapcodec::assembler::{assemble, DaySource, SnapshotRow};
use snapcodec::config::CodecConfig;
use snapcodec::decoder::decode_artifact;
use snapcodec::kernels::deflate;
use snapcodec::pipeline::{encode_jobs, SymbolMonthJob};
use snapcodec::quant;

fn row(day: u8, time_s: u16, price: f64, direction: &str) -> SnapshotRow {
    SnapshotRow {
        day,
        time_s,
        price,
        trade_count: 300, // saturates to 255 on encode
        turnover: 1_234_567.89,
        volume_lots: 42,
        bid_prices: [price - 0.01, price - 0.02, price - 0.03, price - 0.04, price - 0.05],
        bid_volumes: [11, 22, 33, 44, 55],
        ask_prices: [price + 0.01, price + 0.02, price + 0.03, price + 0.04, price + 0.05],
        ask_volumes: [55, 44, 33, 22, 11],
        direction: direction.to_string(),
    }
}

#[test]
fn two_day_month_produces_one_artifact_with_count_in_name() {
    // Two daily sources for sh600000 with 2 and 3 records, concatenated in
    // file-name order, must yield sh600000_5.bin and decode back exactly.
    let days = vec![
        DaySource {
            name: "sh600000_20250603.csv".into(),
            rows: vec![row(3, 34_200, 12.34, "B"), row(3, 34_210, 12.35, "S")],
        },
        DaySource {
            name: "sh600000_20250604.csv".into(),
            rows: vec![
                row(4, 34_200, 12.30, "买"),
                row(4, 34_205, 12.31, "卖"),
                row(4, 34_230, 12.28, "-"),
            ],
        },
    ];

    let batch = assemble("SH600000", &days, deflate::DEFAULT_LEVEL).unwrap();
    assert_eq!(batch.file_name(), "sh600000_5.bin");

    let decoded = decode_artifact(&batch.file_name(), &batch.bytes).unwrap();
    assert_eq!(decoded.symbol, "sh600000");
    assert_eq!(decoded.records.len(), 5);

    // Chronological order and absolute values restored.
    let times: Vec<(u8, u16)> = decoded.records.iter().map(|r| (r.date, r.time_s)).collect();
    assert_eq!(
        times,
        vec![(3, 34_200), (3, 34_210), (4, 34_200), (4, 34_205), (4, 34_230)]
    );
    let ticks: Vec<i16> = decoded.records.iter().map(|r| r.latest_price_tick).collect();
    assert_eq!(ticks, vec![1234, 1235, 1230, 1231, 1228]);

    // Only the first record is the sync seed.
    assert!(decoded.records[0].sync);
    assert!(decoded.records[1..].iter().all(|r| !r.sync));

    // Non-differential fields are stored absolute.
    assert!(decoded.records.iter().all(|r| r.trade_count == 255));
    assert!(decoded.records.iter().all(|r| r.turnover == 1_234_567));
    assert!(decoded.records.iter().all(|r| r.volume == 42));

    // Direction codes follow the marker mapping.
    let codes: Vec<u8> = decoded.records.iter().map(|r| r.direction).collect();
    assert_eq!(
        codes,
        vec![
            quant::DIRECTION_BUY,
            quant::DIRECTION_SELL,
            quant::DIRECTION_BUY,
            quant::DIRECTION_SELL,
            quant::DIRECTION_UNKNOWN
        ]
    );

    // Quote levels survive quantization and the per-element delta.
    assert_eq!(decoded.records[4].bid_price_ticks, [1227, 1226, 1225, 1224, 1223]);
    assert_eq!(decoded.records[4].ask_price_ticks, [1229, 1230, 1231, 1232, 1233]);
    assert_eq!(decoded.records[4].bid_volumes, [11, 22, 33, 44, 55]);
}

#[test]
fn encoding_is_deterministic() {
    let days = vec![DaySource {
        name: "sh600000_20250603.csv".into(),
        rows: (0..200u16)
            .map(|i| row(3, 34_200 + i * 3, 12.34 + f64::from(i % 7) * 0.01, "B"))
            .collect(),
    }];
    let a = assemble("sh600000", &days, deflate::DEFAULT_LEVEL).unwrap();
    let b = assemble("sh600000", &days, deflate::DEFAULT_LEVEL).unwrap();
    assert_eq!(a.bytes, b.bytes);
    assert_eq!(a.file_name(), b.file_name());
}

#[test]
fn empty_batch_roundtrips_through_a_file() {
    let tmp = tempfile::tempdir().unwrap();
    let config = Arc::new(CodecConfig {
        output_dir: tmp.path().to_path_buf(),
        ..CodecConfig::default()
    });
    let jobs = vec![SymbolMonthJob {
        symbol: "sh600000".into(),
        year: 2025,
        month: 6,
        days: Vec::new(),
    }];
    let summary = encode_jobs(&config, jobs);
    assert_eq!(summary.succeeded, 1);

    let path = tmp.path().join("2025_06").join("sh600000_0.bin");
    let bytes = fs::read(&path).unwrap();
    let decoded = decode_artifact("sh600000_0.bin", &bytes).unwrap();
    assert!(decoded.records.is_empty());
}

#[test]
fn singleton_batch_keeps_absolute_values() {
    let days = vec![DaySource {
        name: "sh600000_20250603.csv".into(),
        rows: vec![row(3, 34_200, 12.34, "B")],
    }];
    let batch = assemble("sh600000", &days, deflate::DEFAULT_LEVEL).unwrap();
    let decoded = decode_artifact(&batch.file_name(), &batch.bytes).unwrap();
    assert_eq!(decoded.records.len(), 1);
    assert!(decoded.records[0].sync);
    assert_eq!(decoded.records[0].latest_price_tick, 1234);
    assert_eq!(decoded.records[0].time_s, 34_200);
}
