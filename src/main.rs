//! Buried Treasure Seed Cracker
//!
//! Scans a seed range for the structure seed that produces a known
//! buried-treasure chest.
//!
//! Usage: `seedcracker [config.json]`. `SEEDCRACKER_*` environment
//! variables override the file; `RUST_LOG` controls log verbosity.

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use seedcracker::{
    VERSION,
    core::hash::short_hex,
    search::{self, expand_world_seeds, AnyTerrain, SearchConfig},
};

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    info!("Seed Cracker v{}", VERSION);

    let config = match std::env::args().nth(1) {
        Some(path) => SearchConfig::from_file(&path)
            .with_context(|| format!("Failed to load config from {path}"))?,
        None => SearchConfig::default(),
    };
    let config = config
        .with_env()
        .context("Failed to apply environment overrides")?;
    config.validate().context("Invalid search configuration")?;

    let target = config.load_target().context("Failed to load target layout")?;
    info!(
        "Target: {} occupied slots, fingerprint {}",
        target.occupied_slots(),
        short_hex(&target.fingerprint())
    );
    info!("Search: {}", short_hex(&config.fingerprint()));

    let report = search::run(&config, &target, &AnyTerrain).context("Search failed")?;
    for line in report.to_string().lines() {
        info!("{}", line);
    }

    if let Some(seed) = report.found {
        let worlds = expand_world_seeds(seed, config.chunk_x, config.chunk_z, &AnyTerrain);
        info!("{} world seeds share structure seed {}", worlds.len(), seed);
    } else {
        warn!("No matching seed in [{}, +{})", config.base_offset, config.range);
    }

    if let Some(path) = &config.report_path {
        report
            .write_json(path)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        info!("Report written to {}", path.display());
    }

    Ok(())
}
