//! Shared-memory multiprocessor cache coherence simulator library.
//!
//! This crate implements a cycle-accurate simulator of a four-core machine with
//! per-core write-back, write-allocate L1 caches kept coherent by the MESI
//! protocol over a single snooping bus. It provides:
//! 1. **Cache:** Set-associative MESI controllers with LRU replacement.
//! 2. **Bus:** Arbitrated request queue, snoop broadcast, and timing model.
//! 3. **Cores:** Trace-driven front ends with a block/unblock handshake.
//! 4. **Simulation:** Two-phase global tick, trace loading, configuration.
//! 5. **Statistics:** Per-core and bus counters with stable report output.

/// Common types and constants (addresses, operations, errors).
pub mod common;
/// Simulator configuration (defaults, geometry, validation).
pub mod config;
/// Per-core hardware (MESI states, cache controller, core driver).
pub mod core;
/// Simulation driver (trace reading, top-level loop).
pub mod sim;
/// Shared system fabric (snooping bus and its port traits).
pub mod soc;
/// Statistics aggregation and report formatting.
pub mod stats;

/// Root configuration type; construct directly or deserialize from JSON.
pub use crate::config::Config;
/// Top-level simulator; construct with `Simulator::new` and call `run`.
pub use crate::sim::Simulator;
/// Snapshot of all counters, rendered with the stable label set.
pub use crate::stats::Report;
