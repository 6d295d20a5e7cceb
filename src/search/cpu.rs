//! CPU Thread Lanes
//!
//! One named OS thread per lane, each scanning its own interleaved shard.
//! Lanes share exactly two things: a stop flag, polled with relaxed loads
//! every `poll_interval` candidates, and the first-hit result cell.
//!
//! Early exit is best effort. A lane may scan up to `poll_interval - 1`
//! extra candidates after another lane raised the flag.
//!
//! ## Lane Lifecycle
//!
//! ```text
//! Idle ──▶ Scanning ──┬──▶ Hit        (this lane found a match)
//!                     ├──▶ Exhausted  (shard fully scanned)
//!                     └──▶ Cancelled  (stop flag seen)
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use tracing::{debug, info, warn};

use super::config::SearchConfig;
use super::oracle::StructureOracle;
use super::pipeline::{SeedChecker, Verdict};
use super::progress::{checkpoint_crossed, percent};
use super::result::{SearchOutcome, SearchResult, StageTally};
use super::shard::{candidate, SearchShard};
use super::SearchError;

/// Lifecycle state of one lane.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LaneState {
    /// Not started.
    Idle,
    /// Scanning its shard.
    Scanning,
    /// Found a match.
    Hit,
    /// Scanned its whole shard.
    Exhausted,
    /// Stopped because another lane found a match.
    Cancelled,
}

/// What one lane did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LaneReport {
    /// Lane index.
    pub lane: usize,
    /// Final state.
    pub state: LaneState,
    /// Candidates evaluated.
    pub scanned: u64,
    /// Rejections by stage.
    pub tally: StageTally,
}

/// Thread backend result, with per-lane detail.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThreadOutcome {
    /// Aggregated outcome.
    pub outcome: SearchOutcome,
    /// Per-lane reports, in lane order.
    pub lanes: Vec<LaneReport>,
}

struct Lane<'s, 'c, O: StructureOracle + ?Sized> {
    index: usize,
    lanes: usize,
    shard: SearchShard,
    base_offset: i64,
    range: u64,
    poll_interval: u64,
    progress_interval: u64,
    checker: &'s SeedChecker<'c, O>,
    stop: &'s AtomicBool,
    result: &'s SearchResult,
}

impl<O: StructureOracle + ?Sized> Lane<'_, '_, O> {
    fn scan(self) -> LaneReport {
        let mut report = LaneReport {
            lane: self.index,
            state: LaneState::Idle,
            scanned: 0,
            tally: StageTally::default(),
        };

        // Lane 0 speaks for the whole run; shards are interleaved so its
        // share scales by the lane count.
        let mut estimated = 0;

        report.state = LaneState::Scanning;
        for relative in self.shard {
            if report.scanned % self.poll_interval == 0 {
                if self.stop.load(Ordering::Relaxed) {
                    report.state = LaneState::Cancelled;
                    break;
                }
                if self.index == 0 {
                    let now = report.scanned.saturating_mul(self.lanes as u64);
                    if checkpoint_crossed(self.progress_interval, estimated, now) {
                        info!(
                            lane = self.index,
                            scanned = now,
                            "search progress {:.2}%",
                            percent(now, self.range)
                        );
                    }
                    estimated = now;
                }
            }

            let seed = candidate(self.base_offset, relative);
            report.scanned += 1;

            match self.checker.evaluate(seed) {
                Verdict::Match => {
                    if self.result.try_record(seed, report.scanned) {
                        info!(lane = self.index, seed, "match found");
                    } else {
                        debug!(lane = self.index, seed, "match found after another lane");
                    }
                    self.stop.store(true, Ordering::Relaxed);
                    report.state = LaneState::Hit;
                    break;
                }
                Verdict::Reject(stage) => report.tally.record(stage),
            }
        }

        if report.state == LaneState::Scanning {
            report.state = LaneState::Exhausted;
        }

        debug!(
            lane = report.lane,
            state = ?report.state,
            scanned = report.scanned,
            "lane finished"
        );
        report
    }
}

/// Scan `config`'s range on `config.lanes` OS threads.
///
/// If a thread fails to spawn, lanes already running are cancelled and
/// joined before the error is returned.
pub fn run_threads<O: StructureOracle + ?Sized>(
    config: &SearchConfig,
    checker: &SeedChecker<'_, O>,
) -> Result<ThreadOutcome, SearchError> {
    config.validate()?;

    let stop = AtomicBool::new(false);
    let result = SearchResult::new();

    let reports = thread::scope(|scope| {
        let mut handles = Vec::with_capacity(config.lanes);
        let mut spawn_error = None;

        for index in 0..config.lanes {
            let lane = Lane {
                index,
                lanes: config.lanes,
                shard: SearchShard::for_lane(index, config.lanes, config.range),
                base_offset: config.base_offset,
                range: config.range,
                poll_interval: config.poll_interval,
                progress_interval: config.progress_interval,
                checker,
                stop: &stop,
                result: &result,
            };

            let spawned = thread::Builder::new()
                .name(format!("lane-{index}"))
                .spawn_scoped(scope, move || lane.scan());

            match spawned {
                Ok(handle) => handles.push(handle),
                Err(source) => {
                    warn!(lane = index, error = %source, "failed to spawn lane, cancelling");
                    stop.store(true, Ordering::Relaxed);
                    spawn_error = Some(SearchError::Spawn { lane: index, source });
                    break;
                }
            }
        }

        let mut reports = Vec::with_capacity(handles.len());
        let mut join_error = None;
        for (index, handle) in handles.into_iter().enumerate() {
            match handle.join() {
                Ok(report) => reports.push(report),
                Err(_) => {
                    warn!(lane = index, "lane panicked");
                    stop.store(true, Ordering::Relaxed);
                    if join_error.is_none() {
                        join_error = Some(SearchError::LanePanic(index));
                    }
                }
            }
        }

        match spawn_error.or(join_error) {
            Some(err) => Err(err),
            None => Ok(reports),
        }
    })?;

    let outcome = SearchOutcome {
        found: result.seed(),
        scanned: reports.iter().map(|r| r.scanned).sum(),
        hit_lane_scanned: result.watermark(),
        tally: reports
            .iter()
            .fold(StageTally::default(), |acc, r| acc.merge(r.tally)),
    };

    Ok(ThreadOutcome {
        outcome,
        lanes: reports,
    })
}
