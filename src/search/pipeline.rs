//! Predicate Pipeline
//!
//! Evaluates one candidate seed through every stage, cheapest first:
//!
//! ```text
//! placement ──▶ loot roll ──▶ chest layout ──▶ structure oracle ──▶ Match
//!    │             │               │                  │
//!    ▼             ▼               ▼                  ▼
//!  ~99%          most           nearly all         rare
//! ```
//!
//! Each stage only runs if every earlier one passed, and the verdict names
//! the first stage that failed.

use crate::treasure::{
    can_generate_treasure, loot_rng, roll_loot, verify_layout, LayoutCheck, Rejected, Stage,
    TargetLayout,
};
use super::config::SearchConfig;
use super::oracle::{structure_block, AnyTerrain, StructureOracle};

/// Outcome of evaluating one candidate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// Passed every stage.
    Match,
    /// Failed at a stage.
    Reject(Stage),
}

impl Verdict {
    /// Is this a match?
    #[inline]
    pub fn is_match(self) -> bool {
        matches!(self, Verdict::Match)
    }
}

/// Reusable, immutable candidate checker.
///
/// Shared by reference across all lanes; evaluation allocates nothing and
/// touches no shared state.
pub struct SeedChecker<'a, O: StructureOracle + ?Sized = AnyTerrain> {
    target: &'a TargetLayout,
    chunk_x: i32,
    chunk_z: i32,
    check: LayoutCheck,
    oracle: &'a O,
}

impl<'a> SeedChecker<'a, AnyTerrain> {
    /// Checker with no structure oracle.
    pub fn without_oracle(target: &'a TargetLayout, chunk_x: i32, chunk_z: i32) -> Self {
        Self::new(target, chunk_x, chunk_z, LayoutCheck::Exact, &AnyTerrain)
    }
}

impl<'a, O: StructureOracle + ?Sized> SeedChecker<'a, O> {
    /// Create a checker.
    pub fn new(
        target: &'a TargetLayout,
        chunk_x: i32,
        chunk_z: i32,
        check: LayoutCheck,
        oracle: &'a O,
    ) -> Self {
        Self {
            target,
            chunk_x,
            chunk_z,
            check,
            oracle,
        }
    }

    /// Checker for the chunk and layout mode of `config`.
    pub fn from_config(config: &SearchConfig, target: &'a TargetLayout, oracle: &'a O) -> Self {
        Self::new(target, config.chunk_x, config.chunk_z, config.layout_check, oracle)
    }

    /// Target this checker matches against.
    pub fn target(&self) -> &TargetLayout {
        self.target
    }

    fn run(&self, seed: i64) -> Result<(), Rejected> {
        if !can_generate_treasure(seed, self.chunk_x, self.chunk_z) {
            return Err(Rejected(Stage::Placement));
        }

        let mut rng = loot_rng(seed, self.chunk_x, self.chunk_z);
        let bag = roll_loot(&mut rng, self.target)?;
        verify_layout(&mut rng, &bag, self.target, self.check)?;

        let (block_x, block_z) = (structure_block(self.chunk_x), structure_block(self.chunk_z));
        if !self.oracle.is_viable(seed, block_x, block_z) {
            return Err(Rejected(Stage::Structure));
        }

        Ok(())
    }

    /// Evaluate a candidate.
    #[inline]
    pub fn evaluate(&self, seed: i64) -> Verdict {
        match self.run(seed) {
            Ok(()) => Verdict::Match,
            Err(Rejected(stage)) => Verdict::Reject(stage),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KNOWN_SEED: i64 = -4872636734044769429;

    #[test]
    fn test_known_seed_matches() {
        let target = TargetLayout::known_treasure();
        let checker = SeedChecker::without_oracle(&target, -28, -73);
        assert_eq!(checker.evaluate(KNOWN_SEED), Verdict::Match);
        assert!(checker.evaluate(KNOWN_SEED & 0xFFFF_FFFF_FFFF).is_match());
    }

    #[test]
    fn test_wrong_chunk_rejected_at_placement() {
        let target = TargetLayout::known_treasure();
        let checker = SeedChecker::without_oracle(&target, -28, -72);
        assert_eq!(checker.evaluate(KNOWN_SEED), Verdict::Reject(Stage::Placement));
    }

    #[test]
    fn test_oracle_runs_last() {
        let target = TargetLayout::known_treasure();
        let never = |_: i64, _: i32, _: i32| false;
        let checker = SeedChecker::new(&target, -28, -73, LayoutCheck::Exact, &never);
        assert_eq!(checker.evaluate(KNOWN_SEED), Verdict::Reject(Stage::Structure));

        // Non-matching seeds never reach the oracle
        let panicking = |_: i64, _: i32, _: i32| -> bool { panic!("oracle reached") };
        let checker = SeedChecker::new(&target, -28, -73, LayoutCheck::Exact, &panicking);
        for seed in 0..1_000 {
            assert!(!checker.evaluate(seed).is_match());
        }
    }

    #[test]
    fn test_evaluation_is_idempotent() {
        let target = TargetLayout::known_treasure();
        let checker = SeedChecker::without_oracle(&target, -28, -73);
        let low = KNOWN_SEED & 0xFFFF_FFFF_FFFF;
        for seed in (low - 300)..(low + 300) {
            assert_eq!(checker.evaluate(seed), checker.evaluate(seed));
        }
    }

    #[test]
    fn test_from_config() {
        let target = TargetLayout::known_treasure();
        let config = SearchConfig {
            layout_check: LayoutCheck::SlotProbe,
            ..SearchConfig::default()
        };
        let checker = SeedChecker::from_config(&config, &target, &AnyTerrain);
        assert_eq!(checker.evaluate(KNOWN_SEED), Verdict::Match);
        assert_eq!(checker.target(), &target);
    }
}
