//! # Buried Treasure Seed Cracker
//!
//! Recovers the 48-bit structure seed behind a known buried-treasure chest by
//! replaying the game's loot generation for every candidate seed.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    SEED CRACKER                              │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Deterministic primitives                  │
//! │  ├── lcg.rs      - java.util.Random LCG with O(log n) skip   │
//! │  ├── seeds.rs    - Region/population/decorator seeds         │
//! │  └── hash.rs     - Layout and parameter fingerprints         │
//! │                                                              │
//! │  treasure/       - Chest simulation (deterministic)          │
//! │  ├── item.rs     - Items and stacks                          │
//! │  ├── inventory.rs- Fixed 27-slot sequences                   │
//! │  ├── layout.rs   - Target layout and counts                  │
//! │  ├── placement.rs- Treasure spawn gate                       │
//! │  ├── roll.rs     - Loot table replay                         │
//! │  └── chest.rs    - Shuffle, split and place                  │
//! │                                                              │
//! │  search/         - Parallel search (non-deterministic order) │
//! │  ├── config.rs   - Parameters, file/env loading              │
//! │  ├── shard.rs    - Interleaved range partitioning            │
//! │  ├── pipeline.rs - Per-candidate predicate chain             │
//! │  ├── oracle.rs   - Structure viability interface             │
//! │  ├── result.rs   - Shared result cells                       │
//! │  ├── cpu.rs      - OS-thread lanes                           │
//! │  ├── batch.rs    - Tiled single-dispatch scan                │
//! │  ├── progress.rs - Progress checkpoints                      │
//! │  └── report.rs   - Throughput reporting                      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism Guarantee
//!
//! The `core/` and `treasure/` modules are **pure functions of the seed**:
//! - Integer arithmetic on a 48-bit state, wrapping where the JVM wraps
//! - The only float is `next_float`, exact in `f32`
//! - No allocation, no shared state, no system time
//!
//! A match found by one backend is found by every backend; only the order
//! in which candidates are visited differs.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod treasure;
pub mod search;

// Re-export commonly used types
pub use crate::core::lcg::JavaRng;
pub use treasure::{Item, ItemStack, LayoutCheck, Stage, TargetLayout};
pub use search::{run, Backend, SearchConfig, SearchError, SearchReport, StructureOracle};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The structure seed of the built-in known treasure.
pub const KNOWN_SEED: i64 = -4872636734044769429;
