//! Search Configuration
//!
//! Defaults reproduce the known-treasure search at chunk (-28, -73) over the
//! full 48-bit space. A JSON file and `SEEDCRACKER_*` environment variables
//! can override any field; everything is validated before a scan starts.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Serialize, Deserialize};
use tracing::debug;

use crate::core::hash::{Fingerprint, FingerprintHasher};
use crate::treasure::{LayoutCheck, LayoutError, TargetLayout};
use super::progress::DEFAULT_PROGRESS_INTERVAL;

/// Size of the structure seed space.
pub const MAX_RANGE: u64 = 1 << 48;

/// Default candidates between stop-flag polls.
pub const DEFAULT_POLL_INTERVAL: u64 = 4096;

/// Default candidates per batch tile.
pub const DEFAULT_BATCH_TILE: u64 = 1 << 16;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "SEEDCRACKER_";

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// At least one lane is required.
    #[error("Lane count must be at least 1")]
    ZeroLanes,

    /// Nothing to scan.
    #[error("Search range is empty")]
    EmptyRange,

    /// Range exceeds the seed space.
    #[error("Search range {0} exceeds 2^48")]
    RangeTooWide(u64),

    /// Poll interval of zero.
    #[error("Poll interval must be at least 1")]
    ZeroPollInterval,

    /// Batch tile of zero.
    #[error("Batch tile must be at least 1")]
    ZeroBatchTile,

    /// Environment variable could not be parsed.
    #[error("Invalid value {value:?} for {var}")]
    InvalidEnv {
        /// Variable name.
        var: String,
        /// Raw value.
        value: String,
    },

    /// File could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid JSON.
    #[error("Failed to parse {path}: {source}")]
    Parse {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },

    /// Target layout file is invalid.
    #[error("Invalid target layout: {0}")]
    Layout(#[from] LayoutError),
}

/// Which engine runs the scan.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Backend {
    /// One OS thread per lane with cooperative early exit.
    #[default]
    Threads,
    /// Whole range dispatched at once, no early exit.
    Batch,
}

impl Backend {
    /// Config/log name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Backend::Threads => "threads",
            Backend::Batch => "batch",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "threads" => Ok(Backend::Threads),
            "batch" => Ok(Backend::Batch),
            other => Err(format!("unknown backend `{other}`")),
        }
    }
}

/// Search configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// First candidate seed.
    pub base_offset: i64,
    /// Number of candidates, at most 2^48.
    pub range: u64,
    /// Worker lanes (threads, or batch pool size).
    pub lanes: usize,
    /// Treasure chunk X.
    pub chunk_x: i32,
    /// Treasure chunk Z.
    pub chunk_z: i32,
    /// Scan engine.
    pub backend: Backend,
    /// How chest layouts are compared.
    pub layout_check: LayoutCheck,
    /// Candidates between stop-flag polls (threads backend).
    pub poll_interval: u64,
    /// Candidates per work item (batch backend).
    pub batch_tile: u64,
    /// Candidates between progress log lines; zero disables them.
    pub progress_interval: u64,
    /// JSON target layout; the built-in known treasure when unset.
    pub target_path: Option<PathBuf>,
    /// Where to write the JSON report, if anywhere.
    pub report_path: Option<PathBuf>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_offset: 0,
            range: MAX_RANGE,
            lanes: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4),
            chunk_x: -28,
            chunk_z: -73,
            backend: Backend::Threads,
            layout_check: LayoutCheck::Exact,
            poll_interval: DEFAULT_POLL_INTERVAL,
            batch_tile: DEFAULT_BATCH_TILE,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            target_path: None,
            report_path: None,
        }
    }
}

fn env_override<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    slot: &mut T,
) -> Result<(), ConfigError> {
    let var = format!("{ENV_PREFIX}{name}");
    if let Some(value) = lookup(&var) {
        *slot = value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidEnv { var: var.clone(), value: value.clone() })?;
        debug!(%var, %value, "config override from environment");
    }
    Ok(())
}

impl SearchConfig {
    /// Defaults overlaid with the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_env()
    }

    /// Load from a JSON file. Missing fields take their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Scan the `range` seeds ending at `known_seed`, inclusive.
    pub fn verification(known_seed: i64, range: u64) -> Self {
        Self {
            base_offset: known_seed.wrapping_sub(range as i64).wrapping_add(1),
            range,
            ..Self::default()
        }
    }

    /// Overlay `SEEDCRACKER_*` variables from the process environment.
    pub fn with_env(self) -> Result<Self, ConfigError> {
        self.with_env_from(|var| std::env::var(var).ok())
    }

    /// Overlay `SEEDCRACKER_*` variables from `lookup`.
    pub fn with_env_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        env_override(&lookup, "BASE_OFFSET", &mut self.base_offset)?;
        env_override(&lookup, "RANGE", &mut self.range)?;
        env_override(&lookup, "LANES", &mut self.lanes)?;
        env_override(&lookup, "CHUNK_X", &mut self.chunk_x)?;
        env_override(&lookup, "CHUNK_Z", &mut self.chunk_z)?;
        env_override(&lookup, "BACKEND", &mut self.backend)?;
        env_override(&lookup, "LAYOUT_CHECK", &mut self.layout_check)?;
        env_override(&lookup, "POLL_INTERVAL", &mut self.poll_interval)?;
        env_override(&lookup, "BATCH_TILE", &mut self.batch_tile)?;
        env_override(&lookup, "PROGRESS_INTERVAL", &mut self.progress_interval)?;

        if let Some(path) = lookup(&format!("{ENV_PREFIX}TARGET")) {
            self.target_path = Some(PathBuf::from(path));
        }
        if let Some(path) = lookup(&format!("{ENV_PREFIX}REPORT")) {
            self.report_path = Some(PathBuf::from(path));
        }

        Ok(self)
    }

    /// Check the configuration before scanning.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lanes == 0 {
            return Err(ConfigError::ZeroLanes);
        }
        if self.range == 0 {
            return Err(ConfigError::EmptyRange);
        }
        if self.range > MAX_RANGE {
            return Err(ConfigError::RangeTooWide(self.range));
        }
        if self.poll_interval == 0 {
            return Err(ConfigError::ZeroPollInterval);
        }
        if self.batch_tile == 0 {
            return Err(ConfigError::ZeroBatchTile);
        }
        Ok(())
    }

    /// Load the target layout this config points at.
    pub fn load_target(&self) -> Result<TargetLayout, ConfigError> {
        let Some(path) = &self.target_path else {
            return Ok(TargetLayout::known_treasure());
        };
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(TargetLayout::from_json(&text)?)
    }

    /// Fingerprint of the parameters that decide which seeds match.
    ///
    /// Lane count, poll and progress intervals and output paths are
    /// excluded: they change how a run goes, not what it finds.
    pub fn fingerprint(&self) -> Fingerprint {
        let mut hasher = FingerprintHasher::for_search();
        hasher.update_u64(self.base_offset as u64);
        hasher.update_u64(self.range);
        hasher.update_i32(self.chunk_x);
        hasher.update_i32(self.chunk_z);
        hasher.update_u8(self.layout_check as u8);
        hasher.finalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_default_is_valid() {
        let config = SearchConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.range, MAX_RANGE);
        assert!(config.lanes >= 1);
        assert_eq!(config.progress_interval, DEFAULT_PROGRESS_INTERVAL);
    }

    #[test]
    fn test_validation_errors() {
        let base = SearchConfig::default();

        let config = SearchConfig { lanes: 0, ..base.clone() };
        assert!(matches!(config.validate(), Err(ConfigError::ZeroLanes)));

        let config = SearchConfig { range: 0, ..base.clone() };
        assert!(matches!(config.validate(), Err(ConfigError::EmptyRange)));

        let config = SearchConfig { range: MAX_RANGE + 1, ..base.clone() };
        assert!(matches!(config.validate(), Err(ConfigError::RangeTooWide(_))));

        let config = SearchConfig { poll_interval: 0, ..base.clone() };
        assert!(matches!(config.validate(), Err(ConfigError::ZeroPollInterval)));

        let config = SearchConfig { batch_tile: 0, ..base };
        assert!(matches!(config.validate(), Err(ConfigError::ZeroBatchTile)));
    }

    #[test]
    fn test_verification_window_ends_at_seed() {
        let config = SearchConfig::verification(258062770107243, 4096);
        assert_eq!(config.base_offset, 258062770107243 - 4095);
        assert_eq!(config.base_offset + config.range as i64 - 1, 258062770107243);
    }

    #[test]
    fn test_env_overlay() {
        let config = SearchConfig::default()
            .with_env_from(env(&[
                ("SEEDCRACKER_LANES", "3"),
                ("SEEDCRACKER_RANGE", " 1024 "),
                ("SEEDCRACKER_BASE_OFFSET", "-17"),
                ("SEEDCRACKER_BACKEND", "batch"),
                ("SEEDCRACKER_LAYOUT_CHECK", "slot_probe"),
                ("SEEDCRACKER_REPORT", "/tmp/report.json"),
                ("SEEDCRACKER_PROGRESS_INTERVAL", "0"),
            ]))
            .unwrap();

        assert_eq!(config.lanes, 3);
        assert_eq!(config.range, 1024);
        assert_eq!(config.base_offset, -17);
        assert_eq!(config.backend, Backend::Batch);
        assert_eq!(config.layout_check, LayoutCheck::SlotProbe);
        assert_eq!(config.report_path, Some(PathBuf::from("/tmp/report.json")));
        assert_eq!(config.progress_interval, 0);
        assert_eq!(config.chunk_x, -28);
    }

    #[test]
    fn test_env_rejects_garbage() {
        let err = SearchConfig::default()
            .with_env_from(env(&[("SEEDCRACKER_LANES", "many")]))
            .unwrap_err();
        match err {
            ConfigError::InvalidEnv { var, value } => {
                assert_eq!(var, "SEEDCRACKER_LANES");
                assert_eq!(value, "many");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_json_partial_config() {
        let config: SearchConfig =
            serde_json::from_str(r#"{ "range": 4096, "backend": "batch", "chunk_z": 5 }"#).unwrap();
        assert_eq!(config.range, 4096);
        assert_eq!(config.backend, Backend::Batch);
        assert_eq!(config.chunk_z, 5);
        assert_eq!(config.chunk_x, -28);
        assert_eq!(config.layout_check, LayoutCheck::Exact);
    }

    #[test]
    fn test_from_file_missing() {
        let err = SearchConfig::from_file("/nonexistent/seedcracker.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_load_default_target() {
        let target = SearchConfig::default().load_target().unwrap();
        assert_eq!(target, TargetLayout::known_treasure());
    }

    #[test]
    fn test_fingerprint_ignores_speed_knobs() {
        let a = SearchConfig::verification(1234, 4096);
        let b = SearchConfig {
            lanes: a.lanes + 7,
            poll_interval: 1,
            progress_interval: 0,
            ..a.clone()
        };
        let c = SearchConfig { chunk_x: 0, ..a.clone() };
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_ne!(a.fingerprint(), c.fingerprint());
    }

    #[test]
    fn test_backend_names() {
        for backend in [Backend::Threads, Backend::Batch] {
            assert_eq!(backend.as_str().parse::<Backend>(), Ok(backend));
        }
    }
}
