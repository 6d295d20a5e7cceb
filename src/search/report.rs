//! Search Reports
//!
//! Throughput and outcome of a finished run, as a log-friendly summary and
//! as JSON.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};
use uuid::Uuid;

use crate::core::hash::short_hex;
use crate::treasure::TargetLayout;
use super::config::{Backend, SearchConfig};
use super::result::{SearchOutcome, StageTally};

/// Summary of a finished search.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchReport {
    /// Unique id of this run.
    pub run_id: Uuid,
    /// When the scan started.
    pub started_at: DateTime<Utc>,
    /// Engine used.
    pub backend: Backend,
    /// Lanes (threads or pool size).
    pub lanes: usize,
    /// First candidate.
    pub base_offset: i64,
    /// Candidates requested.
    pub range: u64,
    /// Treasure chunk X.
    pub chunk_x: i32,
    /// Treasure chunk Z.
    pub chunk_z: i32,
    /// Candidates evaluated.
    pub scanned: u64,
    /// Wall-clock seconds.
    pub elapsed_secs: f64,
    /// Throughput.
    pub seeds_per_sec: f64,
    /// Mean time per candidate.
    pub ns_per_seed: f64,
    /// Matching seed; `None` means the range was exhausted.
    pub found: Option<i64>,
    /// Candidates the winning lane had evaluated when it hit.
    pub hit_lane_scanned: Option<u64>,
    /// Rejections by stage.
    pub rejections: StageTally,
    /// Target layout fingerprint (short hex).
    pub target_fingerprint: String,
    /// Search parameter fingerprint (short hex).
    pub search_fingerprint: String,
}

impl SearchReport {
    /// Build a report from a backend outcome.
    pub fn new(
        config: &SearchConfig,
        target: &TargetLayout,
        started_at: DateTime<Utc>,
        elapsed: Duration,
        outcome: SearchOutcome,
    ) -> Self {
        let elapsed_secs = elapsed.as_secs_f64();
        let (seeds_per_sec, ns_per_seed) = if outcome.scanned == 0 || elapsed_secs == 0.0 {
            (0.0, 0.0)
        } else {
            (
                outcome.scanned as f64 / elapsed_secs,
                elapsed.as_nanos() as f64 / outcome.scanned as f64,
            )
        };

        Self {
            run_id: Uuid::new_v4(),
            started_at,
            backend: config.backend,
            lanes: config.lanes,
            base_offset: config.base_offset,
            range: config.range,
            chunk_x: config.chunk_x,
            chunk_z: config.chunk_z,
            scanned: outcome.scanned,
            elapsed_secs,
            seeds_per_sec,
            ns_per_seed,
            found: outcome.found,
            hit_lane_scanned: outcome.hit_lane_scanned,
            rejections: outcome.tally,
            target_fingerprint: short_hex(&target.fingerprint()),
            search_fingerprint: short_hex(&config.fingerprint()),
        }
    }

    /// Did the search find a seed?
    pub fn is_found(&self) -> bool {
        self.found.is_some()
    }

    /// Write as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
    }
}

impl fmt::Display for SearchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.found, self.hit_lane_scanned) {
            (Some(seed), Some(position)) => writeln!(
                f,
                "Found seed `{seed}` in {:.3}s, {} candidates into its lane",
                self.elapsed_secs,
                format_num(position)
            )?,
            (Some(seed), None) => writeln!(f, "Found seed `{seed}` in {:.3}s", self.elapsed_secs)?,
            (None, _) => writeln!(f, "No seed in range, exhausted in {:.3}s", self.elapsed_secs)?,
        }
        writeln!(
            f,
            "{} seeds in {:.3}s ({}, {} lanes)",
            format_num(self.scanned),
            self.elapsed_secs,
            self.backend,
            self.lanes
        )?;
        write!(
            f,
            "{} seeds/s or {:.4}ns per seed",
            format_num(self.seeds_per_sec as u64),
            self.ns_per_seed
        )
    }
}

/// Compact count: `9999`, `12k`, `3.4M`, `250M`, `1.2B`, ... `2.81Q`.
pub fn format_num(num: u64) -> String {
    const K: f64 = 1e3;
    const M: f64 = 1e6;
    const B: f64 = 1e9;
    const T: f64 = 1e12;
    const Q: f64 = 1e15;

    let n = num as f64;
    match num {
        0..=9_999 => num.to_string(),
        10_000..=999_999 => format!("{:.0}k", n / K),
        1_000_000..=9_999_999 => format!("{:.1}M", n / M),
        10_000_000..=999_999_999 => format!("{:.0}M", n / M),
        1_000_000_000..=9_999_999_999 => format!("{:.1}B", n / B),
        10_000_000_000..=999_999_999_999 => format!("{:.0}B", n / B),
        1_000_000_000_000..=9_999_999_999_999 => format!("{:.1}T", n / T),
        10_000_000_000_000..=999_999_999_999_999 => format!("{:.0}T", n / T),
        _ => format!("{:.2}Q", n / Q),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::config::MAX_RANGE;

    fn report(found: Option<i64>, scanned: u64, elapsed: Duration) -> SearchReport {
        report_with_lane(found, None, scanned, elapsed)
    }

    fn report_with_lane(
        found: Option<i64>,
        hit_lane_scanned: Option<u64>,
        scanned: u64,
        elapsed: Duration,
    ) -> SearchReport {
        let config = SearchConfig {
            lanes: 4,
            range: scanned,
            ..SearchConfig::default()
        };
        let outcome = SearchOutcome {
            found,
            scanned,
            hit_lane_scanned,
            tally: StageTally::default(),
        };
        SearchReport::new(
            &config,
            &TargetLayout::known_treasure(),
            Utc::now(),
            elapsed,
            outcome,
        )
    }

    #[test]
    fn test_format_num() {
        assert_eq!(format_num(0), "0");
        assert_eq!(format_num(9_999), "9999");
        assert_eq!(format_num(12_345), "12k");
        assert_eq!(format_num(3_400_000), "3.4M");
        assert_eq!(format_num(250_000_000), "250M");
        assert_eq!(format_num(1_200_000_000), "1.2B");
        assert_eq!(format_num(1 << 38), "275B");
        assert_eq!(format_num(5_000_000_000_000), "5.0T");
        assert_eq!(format_num(MAX_RANGE), "281T");
        assert_eq!(format_num(2_810_000_000_000_000), "2.81Q");
    }

    #[test]
    fn test_throughput() {
        let r = report(None, 2_000_000, Duration::from_secs(2));
        assert_eq!(r.seeds_per_sec, 1_000_000.0);
        assert_eq!(r.ns_per_seed, 1_000.0);
        assert!(!r.is_found());
    }

    #[test]
    fn test_run_ids_are_unique() {
        let a = report(None, 1, Duration::from_millis(1));
        let b = report(None, 1, Duration::from_millis(1));
        assert_ne!(a.run_id, b.run_id);
    }

    #[test]
    fn test_zero_elapsed_does_not_divide() {
        let r = report(None, 10, Duration::ZERO);
        assert_eq!(r.seeds_per_sec, 0.0);
        assert_eq!(r.ns_per_seed, 0.0);
    }

    #[test]
    fn test_display() {
        let r = report(Some(258062770107243), 4096, Duration::from_millis(500));
        let text = r.to_string();
        assert!(text.starts_with("Found seed `258062770107243` in 0.500s"));
        assert!(text.contains("4096 seeds in 0.500s (threads, 4 lanes)"));
        assert!(text.contains("8192 seeds/s or 122070.3125ns per seed"));
    }

    #[test]
    fn test_display_hit_lane_position() {
        let r = report_with_lane(Some(7), Some(1024), 4096, Duration::from_millis(500));
        assert!(r
            .to_string()
            .starts_with("Found seed `7` in 0.500s, 1024 candidates into its lane"));
    }

    #[test]
    fn test_json_fields() {
        let r = report(Some(-1), 16, Duration::from_millis(1));
        let value: serde_json::Value = serde_json::to_value(&r).unwrap();
        assert_eq!(value["found"], -1);
        assert_eq!(value["backend"], "threads");
        assert_eq!(value["target_fingerprint"].as_str().unwrap().len(), 16);
        assert_eq!(value["rejections"]["placement"], 0);
        assert!(value["hit_lane_scanned"].is_null());

        let back: SearchReport = serde_json::from_value(value).unwrap();
        assert_eq!(back.found, r.found);
        assert_eq!(back.started_at, r.started_at);
        assert_eq!(back.run_id, r.run_id);
    }

    #[test]
    fn test_write_json() {
        let r = report(None, 16, Duration::from_millis(1));
        let path = std::env::temp_dir().join(format!("seedcracker-report-{}.json", std::process::id()));
        r.write_json(&path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert!(text.contains("\"found\": null"));
    }
}
