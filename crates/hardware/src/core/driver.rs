//! Trace-driven core front end.
//!
//! Each core replays one memory trace against its private cache, one
//! operation per cycle, blocking whenever the cache has an outstanding bus
//! request and resuming once the cache reports ready.

use crate::common::data::MemOp;
use crate::core::cache::Cache;
use crate::sim::trace::TraceReader;
use crate::soc::traits::BusPort;

/// Counters kept by one core.
#[derive(Clone, Copy, Debug, Default)]
pub struct CoreStats {
    /// Trace operations executed.
    pub instructions: u64,
    /// Read operations executed.
    pub reads: u64,
    /// Write operations executed.
    pub writes: u64,
    /// Cycles spent blocked waiting for the cache.
    pub idle_cycles: u64,
    /// Global cycle count at termination, stamped by the simulator.
    pub total_cycles: u64,
}

/// A core: a trace cursor and the block/unblock handshake with its cache.
pub struct Core {
    id: usize,
    trace: TraceReader,
    finished: bool,
    blocked: bool,
    /// Instruction and idle counters, aggregated into the report.
    pub stats: CoreStats,
}

impl Core {
    /// Creates a core that replays `trace`.
    pub fn new(id: usize, trace: TraceReader) -> Self {
        Self {
            id,
            trace,
            finished: false,
            blocked: false,
            stats: CoreStats::default(),
        }
    }

    /// Identifier of this core.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Whether this core has exhausted its trace.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Whether this core is waiting for its cache.
    pub fn is_blocked(&self) -> bool {
        self.blocked
    }

    /// Advances the core by one cycle.
    ///
    /// A blocked core first tests its cache: if the cache is unblocked and
    /// ready it resumes in the same cycle, otherwise the cycle counts as
    /// idle. An unblocked core fetches the next trace entry and issues it;
    /// a miss (or upgrade stall) blocks the core.
    pub fn tick(&mut self, cycle: u64, cache: &mut Cache, bus: &mut dyn BusPort) {
        if self.finished {
            return;
        }

        if self.blocked {
            if !cache.is_blocked() && cycle >= cache.ready_cycle() {
                self.blocked = false;
            } else {
                self.stats.idle_cycles += 1;
                return;
            }
        }

        let Some(entry) = self.trace.next_entry() else {
            self.finished = true;
            return;
        };

        self.stats.instructions += 1;
        match entry.op {
            MemOp::Read => self.stats.reads += 1,
            MemOp::Write => self.stats.writes += 1,
        }

        if !cache.access(cycle, entry.op, entry.addr, bus) {
            self.blocked = true;
        }
    }
}
