//! Statistics aggregation and report formatting.
//!
//! This module turns the per-component counters into the human-readable
//! report. It provides:
//! 1. **Collection:** A snapshot taken from cores, caches, and bus at print
//!    time; components never format their own counters.
//! 2. **Rendering:** A stable label set (parameters block, per-core blocks,
//!    bus summary) identical across runs of the same input.
//!
//! "Total Execution Cycles" is the global cycle count at termination and is
//! therefore the same for every core; per-core waiting time is reported
//! separately as "Idle Cycles".

use std::fmt;
use std::io;

use crate::config::{CacheGeometry, Config};
use crate::core::cache::{Cache, CacheStats};
use crate::core::driver::{Core, CoreStats};
use crate::soc::bus::{Bus, BusStats};

/// Counter snapshot for one core and its cache.
#[derive(Clone, Copy, Debug)]
struct CoreBlock {
    core: CoreStats,
    cache: CacheStats,
}

/// A complete statistics snapshot, rendered with the stable label set.
#[derive(Clone, Debug)]
pub struct Report {
    trace_prefix: String,
    geometry: CacheGeometry,
    cores: Vec<CoreBlock>,
    bus: BusStats,
}

impl Report {
    /// Collects a snapshot from the live components.
    pub fn collect(config: &Config, cores: &[Core], caches: &[Cache], bus: &Bus) -> Self {
        let cores = cores
            .iter()
            .zip(caches.iter())
            .map(|(core, cache)| CoreBlock {
                core: core.stats,
                cache: cache.stats,
            })
            .collect();
        Self {
            trace_prefix: config.trace_prefix.clone(),
            geometry: config.cache,
            cores,
            bus: bus.stats,
        }
    }

    /// Cache miss rate for one core block, in percent.
    fn miss_rate(cache: &CacheStats) -> f64 {
        if cache.accesses == 0 {
            return 0.0;
        }
        cache.misses as f64 / cache.accesses as f64 * 100.0
    }

    /// Writes the rendered report to `out`.
    pub fn write_to<W: io::Write>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "{}", self)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let g = &self.geometry;
        writeln!(f, "Simulation Parameters:")?;
        writeln!(f, "Trace Prefix: {}", self.trace_prefix)?;
        writeln!(f, "Set Index Bits: {}", g.index_bits)?;
        writeln!(f, "Associativity: {}", g.ways)?;
        writeln!(f, "Block Bits: {}", g.offset_bits)?;
        writeln!(f, "Block Size (Bytes): {}", g.block_bytes())?;
        writeln!(f, "Number of Sets: {}", g.num_sets())?;
        writeln!(f, "Cache Size (KB per core): {}", g.cache_bytes() as f64 / 1024.0)?;
        writeln!(f, "MESI Protocol: Enabled")?;
        writeln!(f, "Write Policy: Write-back, Write-allocate")?;
        writeln!(f, "Replacement Policy: LRU")?;
        writeln!(f, "Bus: Central snooping bus")?;
        writeln!(f)?;

        for (id, block) in self.cores.iter().enumerate() {
            writeln!(f, "Core {} Statistics:", id)?;
            writeln!(f, "Total Instructions: {}", block.core.instructions)?;
            writeln!(f, "Total Reads: {}", block.core.reads)?;
            writeln!(f, "Total Writes: {}", block.core.writes)?;
            writeln!(f, "Total Execution Cycles: {}", block.core.total_cycles)?;
            writeln!(f, "Idle Cycles: {}", block.core.idle_cycles)?;
            writeln!(f, "Cache Misses: {}", block.cache.misses)?;
            writeln!(f, "Cache Miss Rate: {:.2}%", Self::miss_rate(&block.cache))?;
            writeln!(f, "Cache Evictions: {}", block.cache.evictions)?;
            writeln!(f, "Writebacks: {}", block.cache.writebacks)?;
            writeln!(f, "Bus Invalidations: {}", block.cache.invalidations)?;
            writeln!(f, "Data Traffic (Bytes): {}", self.bus.data_bytes)?;
            writeln!(f)?;
        }

        writeln!(f, "Overall Bus Summary:")?;
        writeln!(f, "Total Bus Transactions: {}", self.bus.transactions)?;
        writeln!(f, "Total Bus Traffic (Bytes): {}", self.bus.data_bytes)?;
        Ok(())
    }
}
