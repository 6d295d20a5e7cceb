//! Batch Dispatch
//!
//! Device-style execution: the whole range is split into fixed-size tiles
//! and handed to a dedicated rayon pool in one dispatch. There is no
//! cancellation and no coordination between tiles. Every tile that confirms
//! a match writes it to the shared two-slot buffer, and the host reads the
//! buffer once the dispatch has completed.

use std::sync::atomic::{AtomicU64, Ordering};

use rayon::prelude::*;
use tracing::{debug, info, trace};

use super::config::SearchConfig;
use super::oracle::StructureOracle;
use super::pipeline::{SeedChecker, Verdict};
use super::progress::{checkpoint_crossed, percent};
use super::result::{BatchResultBuffer, SearchOutcome, StageTally};
use super::shard::candidate;
use super::SearchError;

fn scan_tile<O: StructureOracle + ?Sized>(
    tile: u64,
    config: &SearchConfig,
    checker: &SeedChecker<'_, O>,
    buffer: &BatchResultBuffer,
    done: &AtomicU64,
) -> StageTally {
    let start = tile * config.batch_tile;
    let end = start.saturating_add(config.batch_tile).min(config.range);

    let mut tally = StageTally::default();
    for relative in start..end {
        let seed = candidate(config.base_offset, relative);
        match checker.evaluate(seed) {
            Verdict::Match => buffer.write(seed),
            Verdict::Reject(stage) => tally.record(stage),
        }
    }

    // Tiles finish in any order; progress follows the running total.
    let before = done.fetch_add(end - start, Ordering::Relaxed);
    let after = before + (end - start);
    trace!(tile, scanned = end - start, "tile finished");
    if checkpoint_crossed(config.progress_interval, before, after) {
        info!(scanned = after, "search progress {:.2}%", percent(after, config.range));
    }

    tally
}

/// Scan `config`'s range in one batch dispatch on a pool of `config.lanes`
/// threads.
///
/// Fails before scanning anything if the pool cannot be built.
pub fn run_batch<O: StructureOracle + ?Sized>(
    config: &SearchConfig,
    checker: &SeedChecker<'_, O>,
) -> Result<SearchOutcome, SearchError> {
    config.validate()?;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.lanes)
        .thread_name(|index| format!("batch-{index}"))
        .build()?;

    let tiles = config.range.div_ceil(config.batch_tile);
    debug!(tiles, tile = config.batch_tile, threads = config.lanes, "dispatching batch");

    let buffer = BatchResultBuffer::new();
    let done = AtomicU64::new(0);
    let tally = pool.install(|| {
        (0..tiles)
            .into_par_iter()
            .map(|tile| scan_tile(tile, config, checker, &buffer, &done))
            .reduce(StageTally::default, StageTally::merge)
    });

    let found = buffer.read();
    if let Some(seed) = found {
        info!(seed, "batch confirmed a match");
    }

    Ok(SearchOutcome {
        found,
        scanned: config.range,
        hit_lane_scanned: None,
        tally,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::lcg::MASK_48;
    use crate::search::config::Backend;
    use crate::treasure::{Stage, TargetLayout};

    const KNOWN_LOW: i64 = (-4872636734044769429i64 as u64 & MASK_48) as i64;

    fn batch_config(base_offset: i64, range: u64) -> SearchConfig {
        SearchConfig {
            base_offset,
            range,
            lanes: 2,
            batch_tile: 300,
            backend: Backend::Batch,
            ..SearchConfig::default()
        }
    }

    #[test]
    fn test_batch_finds_known_seed() {
        let target = TargetLayout::known_treasure();
        let checker = SeedChecker::without_oracle(&target, -28, -73);
        let config = batch_config(KNOWN_LOW - 4095, 4096);

        let outcome = run_batch(&config, &checker).unwrap();
        assert_eq!(outcome.found, Some(KNOWN_LOW));
        assert_eq!(outcome.scanned, 4096);
        assert_eq!(outcome.hit_lane_scanned, None);
        assert_eq!(outcome.tally.total(), 4095);
        assert_eq!(outcome.tally.get(Stage::Placement), 4096 - 54);
    }

    #[test]
    fn test_batch_disjoint_range() {
        let target = TargetLayout::known_treasure();
        let checker = SeedChecker::without_oracle(&target, -28, -73);

        let outcome = run_batch(&batch_config(0, 4096), &checker).unwrap();
        assert_eq!(outcome.found, None);
        assert_eq!(outcome.tally.total(), 4096);
        assert_eq!(outcome.tally.get(Stage::Placement), 4096);
    }

    #[test]
    fn test_batch_partial_last_tile() {
        let target = TargetLayout::known_treasure();
        let checker = SeedChecker::without_oracle(&target, -28, -73);

        // 1001 candidates in tiles of 300 leaves a short last tile
        let outcome = run_batch(&batch_config(KNOWN_LOW - 1000, 1001), &checker).unwrap();
        assert_eq!(outcome.found, Some(KNOWN_LOW));
        assert_eq!(outcome.tally.total(), 1000);
    }

    #[test]
    fn test_tiles_account_for_every_candidate() {
        let target = TargetLayout::known_treasure();
        let checker = SeedChecker::without_oracle(&target, -28, -73);
        let config = SearchConfig {
            progress_interval: 250,
            ..batch_config(0, 1001)
        };

        let buffer = BatchResultBuffer::new();
        let done = AtomicU64::new(0);
        let tiles = config.range.div_ceil(config.batch_tile);
        assert_eq!(tiles, 4);
        for tile in (0..tiles).rev() {
            scan_tile(tile, &config, &checker, &buffer, &done);
        }
        assert_eq!(done.load(Ordering::Relaxed), 1001);
        assert_eq!(buffer.read(), None);
    }

    #[test]
    fn test_batch_rejects_invalid_config() {
        let target = TargetLayout::known_treasure();
        let checker = SeedChecker::without_oracle(&target, -28, -73);
        let config = SearchConfig {
            batch_tile: 0,
            ..batch_config(0, 10)
        };
        assert!(matches!(run_batch(&config, &checker), Err(SearchError::Config(_))));
    }
}
