//! Global system constants.
//!
//! This module defines the fixed parameters of the simulated machine. It
//! includes:
//! 1. **Topology:** The number of cores (and private caches) on the bus.
//! 2. **Timing:** Main memory latency and per-word bus transfer time.

/// Number of cores in the system; one trace file and one L1 cache per core.
pub const NUM_CORES: usize = 4;

/// Main memory access latency in cycles.
pub const MEM_LATENCY: u64 = 100;

/// Bytes per machine word.
pub const WORD_BYTES: u64 = 4;

/// Bus transfer time per word for a cache-to-cache supply, in cycles.
///
/// A whole-block transfer from another cache takes
/// `WORD_TRANSFER_LATENCY * (block_bytes / WORD_BYTES)` cycles.
pub const WORD_TRANSFER_LATENCY: u64 = 2;
