//! Month-level orchestration: a bounded worker pool over (symbol, month)
//! units with a per-unit error boundary.
//!
//! Units are embarrassingly parallel: the only shared state is the read-only
//! field schema and the shared `Arc<CodecConfig>`. Each worker writes a
//! uniquely named, symbol-qualified artifact, so there is no write
//! contention on the shared output directory. A failed unit is captured as a
//! report and never aborts sibling units (skip-and-report policy).

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use log::{info, warn};
use rayon::prelude::*;

use crate::assembler::{self, DaySource};
use crate::config::CodecConfig;
use crate::error::CodecError;
use crate::naming;

//==================================================================================
// 1. Units & Reports
//==================================================================================

/// One unit of work: everything needed to encode one symbol for one month.
#[derive(Debug)]
pub struct SymbolMonthJob {
    pub symbol: String,
    pub year: u16,
    pub month: u8,
    /// Day sources in chronological (file name) order.
    pub days: Vec<DaySource>,
}

/// The outcome of one unit.
#[derive(Debug)]
pub enum UnitOutcome {
    Encoded { record_count: usize, path: PathBuf },
    Failed { reason: String },
}

/// Per-unit result, reported independently of sibling units.
#[derive(Debug)]
pub struct UnitReport {
    pub symbol: String,
    pub year: u16,
    pub month: u8,
    pub outcome: UnitOutcome,
}

impl UnitReport {
    pub fn succeeded(&self) -> bool {
        matches!(self.outcome, UnitOutcome::Encoded { .. })
    }
}

/// Aggregate result of a full run.
#[derive(Debug)]
pub struct RunSummary {
    pub succeeded: usize,
    pub failed: usize,
    pub reports: Vec<UnitReport>,
}

impl RunSummary {
    fn from_reports(reports: Vec<UnitReport>) -> Self {
        let succeeded = reports.iter().filter(|r| r.succeeded()).count();
        let failed = reports.len() - succeeded;
        Self { succeeded, failed, reports }
    }
}

//==================================================================================
// 2. Runner
//==================================================================================

/// Encodes a set of symbol-month units on a worker pool sized by
/// `config.workers` (all cores when unset) and writes each artifact under
/// `<output_dir>/<year>_<month>/`.
pub fn encode_jobs(config: &Arc<CodecConfig>, jobs: Vec<SymbolMonthJob>) -> RunSummary {
    let run = |jobs: Vec<SymbolMonthJob>| -> Vec<UnitReport> {
        jobs.into_par_iter()
            .map(|job| process_unit(config, job))
            .collect()
    };

    let reports = match config.workers {
        Some(workers) => match rayon::ThreadPoolBuilder::new().num_threads(workers).build() {
            Ok(pool) => pool.install(|| run(jobs)),
            Err(e) => {
                warn!("worker pool of {workers} unavailable ({e}), using global pool");
                run(jobs)
            }
        },
        None => run(jobs),
    };

    let summary = RunSummary::from_reports(reports);
    info!(
        "encode run finished: {} succeeded, {} failed",
        summary.succeeded, summary.failed
    );
    summary
}

fn process_unit(config: &CodecConfig, job: SymbolMonthJob) -> UnitReport {
    let outcome = match encode_unit(config, &job) {
        Ok((record_count, path)) => {
            info!(
                "{} {}: {} records -> {}",
                naming::month_dir_name(job.year, job.month),
                job.symbol,
                record_count,
                path.display()
            );
            UnitOutcome::Encoded { record_count, path }
        }
        Err(e) => {
            warn!(
                "SKIPPED {} in {}: {e}",
                job.symbol,
                naming::month_dir_name(job.year, job.month)
            );
            UnitOutcome::Failed { reason: e.to_string() }
        }
    };
    UnitReport {
        symbol: job.symbol,
        year: job.year,
        month: job.month,
        outcome,
    }
}

fn encode_unit(config: &CodecConfig, job: &SymbolMonthJob) -> Result<(usize, PathBuf), CodecError> {
    let batch = assembler::assemble(&job.symbol, &job.days, config.compression_level)?;
    let month_dir = config
        .output_dir
        .join(naming::month_dir_name(job.year, job.month));
    fs::create_dir_all(&month_dir)?;
    let path = month_dir.join(batch.file_name());
    fs::write(&path, &batch.bytes)?;
    Ok((batch.record_count, path))
}

//==================================================================================
// 3. Unit Tests
//==================================================================================
