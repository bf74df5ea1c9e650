//! File-name grammar for sources and artifacts.
//!
//! The artifact name is part of the wire contract: `<symbol>_<count>.bin` is
//! the only place the logical record count is persisted, so any consumer must
//! parse it before decompressing. Per-day source names follow
//! `^[A-Za-z]{2}\d{6}_\d{8}\.csv$`; the exchange-plus-code prefix is the
//! symbol key, normalized to lowercase. Files that do not match the grammar
//! are ignored.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::CodecError;

fn source_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^([A-Za-z]{2}[0-9]{6})_[0-9]{8}\.csv$").expect("static source regex")
    })
}

fn artifact_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^([a-z]{2}[0-9]{6})_([0-9]+)\.bin$").expect("static artifact regex")
    })
}

//==================================================================================
// 1. Source Names
//==================================================================================

/// Extracts the lowercase symbol key from a per-day source file name, or
/// `None` if the name does not match the grammar.
pub fn symbol_from_source_name(name: &str) -> Option<String> {
    source_re()
        .captures(name)
        .map(|caps| caps[1].to_lowercase())
}

/// Groups source file names by symbol, dropping names outside the grammar.
/// Each symbol's list is sorted by name; source names embed the calendar day,
/// so name order is chronological order within a month.
pub fn group_by_symbol<'a, I>(names: I) -> BTreeMap<String, Vec<String>>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut groups: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for name in names {
        if let Some(symbol) = symbol_from_source_name(name) {
            groups.entry(symbol).or_default().push(name.to_string());
        }
    }
    for files in groups.values_mut() {
        files.sort();
    }
    groups
}

//==================================================================================
// 2. Artifact Names
//==================================================================================

/// Builds the artifact file name for a symbol and its logical record count.
pub fn artifact_file_name(symbol: &str, record_count: usize) -> String {
    format!("{symbol}_{record_count}.bin")
}

/// Parses `<symbol>_<count>.bin` back into its parts.
pub fn parse_artifact_name(name: &str) -> Result<(String, usize), CodecError> {
    let caps = artifact_re()
        .captures(name)
        .ok_or_else(|| CodecError::MalformedArtifactName(name.to_string()))?;
    let symbol = caps[1].to_string();
    let record_count: usize = caps[2]
        .parse()
        .map_err(|_| CodecError::MalformedArtifactName(name.to_string()))?;
    Ok((symbol, record_count))
}

/// Output subdirectory for one month: `<year>_<month>`, zero-padded.
pub fn month_dir_name(year: u16, month: u8) -> String {
    format!("{year:04}_{month:02}")
}

//==================================================================================
// 3. Unit Tests
//==================================================================================
