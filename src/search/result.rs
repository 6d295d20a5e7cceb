//! Shared Result Cells
//!
//! The only state lanes share besides the stop flag. Thread lanes race on a
//! first-writer-wins cell; batch work items write a two-slot buffer where
//! the last writer wins.

use std::sync::atomic::{AtomicBool, AtomicI64, AtomicU64, Ordering};

use serde::{Serialize, Deserialize};

use crate::treasure::Stage;

/// Status slot value once a seed has been written.
const STATUS_FOUND: u64 = 1;

/// First-hit cell for thread lanes.
///
/// `found` never goes back to false once set.
#[derive(Debug, Default)]
pub struct SearchResult {
    claimed: AtomicBool,
    found: AtomicBool,
    seed: AtomicI64,
    watermark: AtomicU64,
}

impl SearchResult {
    /// Empty cell.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a hit found after `scanned` candidates in the winning lane.
    ///
    /// Returns false if another lane already recorded one.
    pub fn try_record(&self, seed: i64, scanned: u64) -> bool {
        if self
            .claimed
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Relaxed)
            .is_err()
        {
            return false;
        }
        self.seed.store(seed, Ordering::Relaxed);
        self.watermark.store(scanned, Ordering::Relaxed);
        self.found.store(true, Ordering::Release);
        true
    }

    /// Has a hit been recorded?
    #[inline]
    pub fn is_found(&self) -> bool {
        self.found.load(Ordering::Acquire)
    }

    /// The recorded seed, if any.
    pub fn seed(&self) -> Option<i64> {
        self.is_found().then(|| self.seed.load(Ordering::Relaxed))
    }

    /// Winning lane's scanned count at the time of the hit.
    pub fn watermark(&self) -> Option<u64> {
        self.is_found().then(|| self.watermark.load(Ordering::Relaxed))
    }
}

/// Two-slot `[status, seed]` buffer written by batch work items.
///
/// Writes are unordered; the host reads only after the batch completes.
#[derive(Debug, Default)]
pub struct BatchResultBuffer {
    slots: [AtomicU64; 2],
}

impl BatchResultBuffer {
    /// Zeroed buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Unconditionally record `seed`.
    #[inline]
    pub fn write(&self, seed: i64) {
        self.slots[1].store(seed as u64, Ordering::Relaxed);
        self.slots[0].store(STATUS_FOUND, Ordering::Relaxed);
    }

    /// Read back after the batch has completed.
    pub fn read(&self) -> Option<i64> {
        if self.slots[0].load(Ordering::Relaxed) == STATUS_FOUND {
            Some(self.slots[1].load(Ordering::Relaxed) as i64)
        } else {
            None
        }
    }
}

/// Rejections per pipeline stage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageTally {
    /// No treasure in the chunk.
    pub placement: u64,
    /// Common metal tallies off.
    pub common_metals: u64,
    /// Valuable tallies off.
    pub valuables: u64,
    /// Bonus gear off.
    pub bonus_gear: u64,
    /// Food tallies off.
    pub food: u64,
    /// Slot layout off.
    pub layout: u64,
    /// Structure oracle said no.
    pub structure: u64,
}

impl StageTally {
    /// Count one rejection.
    #[inline]
    pub fn record(&mut self, stage: Stage) {
        let slot = match stage {
            Stage::Placement => &mut self.placement,
            Stage::CommonMetals => &mut self.common_metals,
            Stage::Valuables => &mut self.valuables,
            Stage::BonusGear => &mut self.bonus_gear,
            Stage::Food => &mut self.food,
            Stage::Layout => &mut self.layout,
            Stage::Structure => &mut self.structure,
        };
        *slot += 1;
    }

    /// Rejections at one stage.
    pub fn get(&self, stage: Stage) -> u64 {
        match stage {
            Stage::Placement => self.placement,
            Stage::CommonMetals => self.common_metals,
            Stage::Valuables => self.valuables,
            Stage::BonusGear => self.bonus_gear,
            Stage::Food => self.food,
            Stage::Layout => self.layout,
            Stage::Structure => self.structure,
        }
    }

    /// Sum of all rejections.
    pub fn total(&self) -> u64 {
        Stage::ALL.iter().map(|stage| self.get(*stage)).sum()
    }

    /// Combine two tallies.
    pub fn merge(mut self, other: StageTally) -> StageTally {
        self.placement += other.placement;
        self.common_metals += other.common_metals;
        self.valuables += other.valuables;
        self.bonus_gear += other.bonus_gear;
        self.food += other.food;
        self.layout += other.layout;
        self.structure += other.structure;
        self
    }
}

/// What a backend returns to the host.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Matching seed, if one was found.
    pub found: Option<i64>,
    /// Candidates actually evaluated.
    pub scanned: u64,
    /// Candidates the winning lane had evaluated when it hit. Batch
    /// dispatches have no lane order and leave this unset.
    pub hit_lane_scanned: Option<u64>,
    /// Why the rest were rejected.
    pub tally: StageTally,
}
