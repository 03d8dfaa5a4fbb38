//! Per-core hardware: MESI protocol, cache controller, and trace driver.
//!
//! This module groups everything private to one core. It provides:
//! 1. **Protocol:** MESI line states and the snoop transition table.
//! 2. **Cache:** The set-associative write-back controller.
//! 3. **Driver:** The trace-driven front end that issues accesses.

/// Set-associative MESI cache controller.
pub mod cache;

/// Trace-driven core front end.
pub mod driver;

/// MESI line states and snoop transitions.
pub mod mesi;

pub use cache::{Cache, CacheStats};
pub use driver::{Core, CoreStats};
pub use mesi::LineState;
