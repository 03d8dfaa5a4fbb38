//! Configuration system for the coherence simulator.
//!
//! This module defines the structures used to parameterize a run. It provides:
//! 1. **Defaults:** Baseline cache geometry used when flags are omitted.
//! 2. **Structures:** The root config and the per-core cache geometry.
//! 3. **Validation:** Fail-fast rejection of degenerate geometry before any
//!    simulation begins.
//!
//! Configuration is built by the CLI from its flags, or deserialized from JSON.

use serde::Deserialize;

use crate::common::addr::AddressLayout;
use crate::common::constants::WORD_BYTES;
use crate::common::error::SimError;

/// Default configuration constants for the simulator.
///
/// These values define the baseline cache geometry when not explicitly
/// overridden on the command line.
mod defaults {
    /// Default number of set index bits (64 sets).
    pub const INDEX_BITS: u32 = 6;

    /// Default associativity (cache lines per set).
    pub const WAYS: u32 = 2;

    /// Default number of block offset bits (32-byte blocks).
    pub const OFFSET_BITS: u32 = 5;
}

/// Root configuration structure for one simulation run.
///
/// # Examples
///
/// Deserializing from JSON with geometry defaults applied:
///
/// ```
/// use mesi_core::config::Config;
///
/// let json = r#"{ "trace_prefix": "app1" }"#;
/// let config: Config = serde_json::from_str(json).unwrap();
/// assert_eq!(config.trace_prefix, "app1");
/// assert_eq!(config.cache.index_bits, 6);
/// assert_eq!(config.cache.block_bytes(), 32);
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Prefix of the four per-core trace files (`<prefix>_proc0.trace` ..
    /// `<prefix>_proc3.trace`).
    pub trace_prefix: String,

    /// Geometry of each private L1 cache.
    #[serde(default)]
    pub cache: CacheGeometry,
}

impl Config {
    /// Creates a configuration with the given trace prefix and geometry.
    pub fn new(trace_prefix: impl Into<String>, cache: CacheGeometry) -> Self {
        Self {
            trace_prefix: trace_prefix.into(),
            cache,
        }
    }
}

/// Geometry of a set-associative cache: `2^index_bits` sets of `ways` lines
/// holding `2^offset_bits`-byte blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CacheGeometry {
    /// Number of set index bits (`s`); the cache has `2^s` sets.
    #[serde(default = "CacheGeometry::default_index_bits")]
    pub index_bits: u32,

    /// Associativity (`E`); lines per set.
    #[serde(default = "CacheGeometry::default_ways")]
    pub ways: u32,

    /// Number of block offset bits (`b`); blocks are `2^b` bytes.
    #[serde(default = "CacheGeometry::default_offset_bits")]
    pub offset_bits: u32,
}

impl CacheGeometry {
    /// Creates a geometry from raw bit widths and associativity.
    pub fn new(index_bits: u32, ways: u32, offset_bits: u32) -> Self {
        Self {
            index_bits,
            ways,
            offset_bits,
        }
    }

    /// Returns the default number of set index bits.
    fn default_index_bits() -> u32 {
        defaults::INDEX_BITS
    }

    /// Returns the default associativity.
    fn default_ways() -> u32 {
        defaults::WAYS
    }

    /// Returns the default number of block offset bits.
    fn default_offset_bits() -> u32 {
        defaults::OFFSET_BITS
    }

    /// Number of sets in the cache.
    pub fn num_sets(&self) -> usize {
        1usize << self.index_bits
    }

    /// Block size in bytes.
    pub fn block_bytes(&self) -> usize {
        1usize << self.offset_bits
    }

    /// Total cache capacity in bytes.
    pub fn cache_bytes(&self) -> usize {
        self.num_sets() * self.ways as usize * self.block_bytes()
    }

    /// Number of 4-byte words per block.
    pub fn words_per_block(&self) -> u64 {
        self.block_bytes() as u64 / WORD_BYTES
    }

    /// Returns the address layout induced by this geometry.
    pub fn layout(&self) -> AddressLayout {
        AddressLayout::new(self.index_bits, self.offset_bits)
    }

    /// Rejects degenerate geometry before the system is built.
    ///
    /// All three parameters must be positive; the block must hold at least
    /// one word (the bus timing model counts words per block); and the index
    /// and offset fields must leave at least one tag bit in a 32-bit address.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.index_bits == 0 || self.ways == 0 || self.offset_bits == 0 {
            return Err(SimError::Config(format!(
                "set index bits, associativity, and block bits must be positive \
                 (got s={}, E={}, b={})",
                self.index_bits, self.ways, self.offset_bits
            )));
        }
        if self.offset_bits < 2 {
            return Err(SimError::Config(format!(
                "block bits must be at least 2 so a block holds one {}-byte word (got b={})",
                WORD_BYTES, self.offset_bits
            )));
        }
        if self.index_bits + self.offset_bits >= 32 {
            return Err(SimError::Config(format!(
                "set index and block bits leave no tag bits in a 32-bit address \
                 (s={} + b={} >= 32)",
                self.index_bits, self.offset_bits
            )));
        }
        Ok(())
    }
}

impl Default for CacheGeometry {
    fn default() -> Self {
        Self {
            index_bits: defaults::INDEX_BITS,
            ways: defaults::WAYS,
            offset_bits: defaults::OFFSET_BITS,
        }
    }
}
