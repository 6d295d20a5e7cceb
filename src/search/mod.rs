//! Parallel Seed Search
//!
//! Enumerates candidate seeds, runs each through the predicate pipeline and
//! reports the first match.
//!
//! ## Module Structure
//!
//! - `config`: Search parameters, file/env loading, validation
//! - `shard`: Stride-interleaved partitioning of the range
//! - `pipeline`: Per-candidate predicate chain
//! - `oracle`: External structure viability predicate
//! - `result`: Shared result cells and rejection tallies
//! - `cpu`: OS-thread lanes with cooperative early exit
//! - `batch`: Single-dispatch tiled scan on a rayon pool
//! - `progress`: Progress checkpoint arithmetic
//! - `report`: Throughput and outcome summary

pub mod config;
pub mod shard;
pub mod pipeline;
pub mod oracle;
pub mod result;
pub mod cpu;
pub mod batch;
pub mod progress;
pub mod report;

use std::time::Instant;

use chrono::Utc;
use tracing::info;

use crate::core::hash::short_hex;
use crate::treasure::TargetLayout;

// Re-export key types
pub use config::{Backend, ConfigError, SearchConfig, MAX_RANGE};
pub use shard::SearchShard;
pub use pipeline::{SeedChecker, Verdict};
pub use oracle::{expand_world_seeds, AnyTerrain, StructureOracle};
pub use result::{BatchResultBuffer, SearchOutcome, SearchResult, StageTally};
pub use cpu::{LaneReport, LaneState, ThreadOutcome};
pub use report::{format_num, SearchReport};

/// Search errors.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// Configuration is invalid.
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// A lane thread could not be started.
    #[error("Failed to spawn lane {lane}: {source}")]
    Spawn {
        /// Lane index.
        lane: usize,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A lane thread panicked.
    #[error("Lane {0} panicked")]
    LanePanic(usize),

    /// The batch thread pool could not be built.
    #[error("Failed to build batch pool: {0}")]
    PoolBuild(#[from] rayon::ThreadPoolBuildError),
}

/// Run a full search with the backend `config` selects.
pub fn run<O: StructureOracle + ?Sized>(
    config: &SearchConfig,
    target: &TargetLayout,
    oracle: &O,
) -> Result<SearchReport, SearchError> {
    config.validate()?;

    let checker = SeedChecker::from_config(config, target, oracle);

    info!(
        backend = %config.backend,
        lanes = config.lanes,
        base_offset = config.base_offset,
        range = %format_num(config.range),
        chunk_x = config.chunk_x,
        chunk_z = config.chunk_z,
        target = %short_hex(&target.fingerprint()),
        "starting search"
    );

    let started_at = Utc::now();
    let timer = Instant::now();

    let outcome = match config.backend {
        Backend::Threads => cpu::run_threads(config, &checker)?.outcome,
        Backend::Batch => batch::run_batch(config, &checker)?,
    };

    let report = SearchReport::new(config, target, started_at, timer.elapsed(), outcome);
    match report.found {
        Some(seed) => info!(run_id = %report.run_id, seed, scanned = report.scanned, "search finished with a match"),
        None => info!(run_id = %report.run_id, scanned = report.scanned, "search range exhausted"),
    }
    Ok(report)
}
