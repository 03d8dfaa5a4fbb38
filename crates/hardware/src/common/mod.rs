//! Common utilities and types used throughout the coherence simulator.
//!
//! This module provides fundamental building blocks shared across all
//! components. It includes:
//! 1. **Address Types:** A 32-bit address newtype and its tag/index/offset split.
//! 2. **Constants:** Core count and fixed timing parameters.
//! 3. **Memory Operations:** Read/write classification for trace entries.
//! 4. **Error Handling:** Configuration, trace, and I/O error types.

/// Address type and geometry-dependent decomposition.
pub mod addr;

/// System-wide constants (core count, latencies).
pub mod constants;

/// Memory operation and trace entry definitions.
pub mod data;

/// Error types for configuration, trace, and I/O failures.
pub mod error;

pub use addr::{Addr, AddressLayout};
pub use constants::{MEM_LATENCY, NUM_CORES, WORD_BYTES, WORD_TRANSFER_LATENCY};
pub use data::{MemOp, TraceEntry};
pub use error::SimError;
