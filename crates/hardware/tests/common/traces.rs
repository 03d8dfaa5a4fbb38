//! Tempfile-backed builder for per-core trace file sets.

use std::fs;

use tempfile::TempDir;

use mesi_core::common::constants::NUM_CORES;
use mesi_core::config::{CacheGeometry, Config};
use mesi_core::sim::trace::trace_path;
use mesi_core::Simulator;

/// A directory of four trace files sharing one prefix.
///
/// All four files exist from the start (empty), so cores without a workload
/// finish immediately without missing-file warnings.
pub struct TraceSet {
    _dir: TempDir,
    prefix: String,
}

impl TraceSet {
    /// Creates a fresh set with four empty traces.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let prefix = dir
            .path()
            .join("app")
            .to_str()
            .expect("utf-8 temp path")
            .to_string();
        for id in 0..NUM_CORES {
            fs::write(trace_path(&prefix, id), "").expect("write empty trace");
        }
        Self { _dir: dir, prefix }
    }

    /// Replaces core `id`'s trace with the given lines.
    pub fn with_core(self, id: usize, lines: &[&str]) -> Self {
        let mut body = lines.join("\n");
        body.push('\n');
        fs::write(trace_path(&self.prefix, id), body).expect("write trace");
        self
    }

    /// The shared file prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Builds a configuration over this set.
    pub fn config(&self, index_bits: u32, ways: u32, offset_bits: u32) -> Config {
        Config::new(
            self.prefix.clone(),
            CacheGeometry::new(index_bits, ways, offset_bits),
        )
    }

    /// Builds a simulator over this set.
    pub fn simulator(&self, index_bits: u32, ways: u32, offset_bits: u32) -> Simulator {
        Simulator::new(self.config(index_bits, ways, offset_bits)).expect("valid config")
    }
}
