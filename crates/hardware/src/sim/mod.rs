//! Simulation driver: trace input and the top-level loop.

/// Trace file discovery and parsing.
pub mod trace;

/// Top-level simulator owning the bus, caches, and cores.
pub mod simulator;

pub use simulator::Simulator;
pub use trace::{trace_path, TraceReader};
