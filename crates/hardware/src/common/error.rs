//! Error definitions for the coherence simulator.
//!
//! This module defines the error taxonomy of the simulator. It provides:
//! 1. **Configuration Errors:** Bad geometry or arguments, rejected before any
//!    simulation begins.
//! 2. **Trace Errors:** Malformed trace lines, reported by the reader; the
//!    affected core treats its stream as ended at the point of error.
//! 3. **I/O Errors:** File open or write failures with source chaining.

use std::fmt;
use std::io;

/// Errors surfaced by the simulator and its external interfaces.
///
/// There are no transient conditions and no retry semantics anywhere in the
/// core: configuration errors are fatal, trace errors end the affected
/// stream, and I/O errors are reported to the caller.
#[derive(Debug)]
pub enum SimError {
    /// Invalid configuration (non-positive geometry, degenerate layout).
    ///
    /// Raised by `CacheGeometry::validate` before the system is built.
    Config(String),

    /// A trace line that could not be parsed.
    ///
    /// Carries the file path, the 1-based line number, and the reason.
    Trace {
        /// Path of the offending trace file.
        path: String,
        /// 1-based line number of the malformed line.
        line: u64,
        /// Human-readable description of the parse failure.
        reason: String,
    },

    /// A file could not be opened or written.
    Io {
        /// Path of the file involved.
        path: String,
        /// Underlying OS error.
        source: io::Error,
    },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::Config(msg) => write!(f, "invalid configuration: {}", msg),
            SimError::Trace { path, line, reason } => {
                write!(f, "malformed trace {}:{}: {}", path, line, reason)
            }
            SimError::Io { path, source } => write!(f, "i/o error on {}: {}", path, source),
        }
    }
}

impl std::error::Error for SimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
