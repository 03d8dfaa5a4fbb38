//! Per-core write-back, write-allocate L1 cache with MESI coherence.
//!
//! This module implements the cache controller. It provides:
//! 1. **Storage:** Set-associative line array with LRU replacement.
//! 2. **Access:** Synchronous hit/miss decisions; misses and write-to-shared
//!    upgrades queue a bus request and block the cache.
//! 3. **Snooping:** Local state changes in response to other caches' bus
//!    requests, including flushing dirty blocks.
//! 4. **Completion:** Allocation and unblocking when the bus notifies the
//!    cache that its outstanding request finished.

use crate::common::addr::{Addr, AddressLayout};
use crate::common::data::MemOp;
use crate::config::CacheGeometry;
use crate::core::mesi::{snoop_transition, LineState};
use crate::soc::bus::{BusRequest, BusRequestKind};
use crate::soc::traits::BusPort;

/// A single cache line: tag, MESI state, and LRU timestamp.
#[derive(Clone, Copy, Debug)]
struct CacheLine {
    tag: u32,
    state: LineState,
    last_used: u64,
}

impl CacheLine {
    fn empty() -> Self {
        Self {
            tag: 0,
            state: LineState::Invalid,
            last_used: 0,
        }
    }
}

/// Counters kept by one cache controller.
#[derive(Clone, Copy, Debug, Default)]
pub struct CacheStats {
    /// Total accesses issued by the core.
    pub accesses: u64,
    /// Accesses that found their block in the cache.
    pub hits: u64,
    /// Accesses that did not find their block.
    pub misses: u64,
    /// Valid lines overwritten by an allocation.
    pub evictions: u64,
    /// Dirty blocks flushed to memory (victim evictions and snoop flushes).
    pub writebacks: u64,
    /// Valid lines invalidated by a snooped `BusRdX`.
    pub invalidations: u64,
    /// Write hits on SHARED lines that required a `BusRdX` ownership upgrade.
    pub upgrades: u64,
}

/// A private L1 cache attached to the snooping bus.
///
/// While an access is outstanding on the bus the cache is *blocked*: the
/// owning core must not issue further accesses until the bus notifies
/// completion and `ready_cycle` is reached.
pub struct Cache {
    id: usize,
    layout: AddressLayout,
    ways: usize,
    lines: Vec<CacheLine>,
    blocked: bool,
    ready_cycle: u64,
    pending: Option<(BusRequestKind, Addr)>,
    /// Hit/miss/coherence counters, aggregated into the report at print time.
    pub stats: CacheStats,
}

impl Cache {
    /// Creates an empty cache with the given geometry.
    pub fn new(id: usize, geometry: &CacheGeometry) -> Self {
        let layout = geometry.layout();
        let ways = geometry.ways as usize;
        Self {
            id,
            layout,
            ways,
            lines: vec![CacheLine::empty(); layout.num_sets() * ways],
            blocked: false,
            ready_cycle: 0,
            pending: None,
            stats: CacheStats::default(),
        }
    }

    /// Identifier of this cache (equal to its core's id).
    pub fn id(&self) -> usize {
        self.id
    }

    /// Whether this cache has an outstanding bus request.
    pub fn is_blocked(&self) -> bool {
        self.blocked
    }

    /// First cycle at which the core may issue again after an unblock.
    pub fn ready_cycle(&self) -> u64 {
        self.ready_cycle
    }

    /// Address layout of this cache.
    pub fn layout(&self) -> &AddressLayout {
        &self.layout
    }

    /// Coherence state of the block containing `addr`; INVALID when absent.
    pub fn state_of(&self, addr: Addr) -> LineState {
        let set = self.layout.set_index(addr);
        let tag = self.layout.tag(addr);
        match self.find_line(set, tag) {
            Some(i) => self.lines[i].state,
            None => LineState::Invalid,
        }
    }

    fn find_line(&self, set: usize, tag: u32) -> Option<usize> {
        let base = set * self.ways;
        (base..base + self.ways).find(|&i| self.lines[i].state.is_valid() && self.lines[i].tag == tag)
    }

    /// Selects the victim way in a set: any INVALID line wins, otherwise the
    /// least recently used.
    fn victim_index(&self, set: usize) -> usize {
        let base = set * self.ways;
        if let Some(i) = (base..base + self.ways).find(|&i| !self.lines[i].state.is_valid()) {
            return i;
        }
        let mut victim = base;
        for i in base + 1..base + self.ways {
            if self.lines[i].last_used < self.lines[victim].last_used {
                victim = i;
            }
        }
        victim
    }

    /// Services one core access at `cycle`. Returns `true` on a hit the core
    /// can retire immediately; on a miss or a write-to-shared upgrade the
    /// request is queued on `bus` and the cache blocks until notified.
    pub fn access(&mut self, cycle: u64, op: MemOp, addr: Addr, bus: &mut dyn BusPort) -> bool {
        debug_assert!(!self.blocked, "access issued while cache {} is blocked", self.id);
        self.stats.accesses += 1;
        let set = self.layout.set_index(addr);
        let tag = self.layout.tag(addr);

        if let Some(i) = self.find_line(set, tag) {
            self.stats.hits += 1;
            self.lines[i].last_used = cycle;
            return match (op, self.lines[i].state) {
                (MemOp::Read, _) => true,
                (MemOp::Write, LineState::Modified) => true,
                (MemOp::Write, LineState::Exclusive) => {
                    // Silent upgrade: exclusivity means no other copy exists.
                    self.lines[i].state = LineState::Modified;
                    true
                }
                (MemOp::Write, LineState::Shared) => {
                    // Ownership upgrade. The line stays SHARED until the
                    // BusRdX completes; not counted as a miss.
                    self.stats.upgrades += 1;
                    self.issue(cycle, BusRequestKind::BusRdX, addr, bus);
                    false
                }
                (MemOp::Write, LineState::Invalid) => unreachable!("hit on an invalid line"),
            };
        }

        self.stats.misses += 1;
        let kind = match op {
            MemOp::Read => BusRequestKind::BusRd,
            MemOp::Write => BusRequestKind::BusRdX,
        };
        self.issue(cycle, kind, addr, bus);
        false
    }

    fn issue(&mut self, cycle: u64, kind: BusRequestKind, addr: Addr, bus: &mut dyn BusPort) {
        debug_assert!(
            self.pending.is_none(),
            "cache {} already has an outstanding request",
            self.id
        );
        self.blocked = true;
        self.pending = Some((kind, addr));
        bus.enqueue(BusRequest {
            requester: self.id,
            kind,
            addr,
            issued_at: cycle,
        });
    }

    /// Completion notification from the bus at `cycle`.
    ///
    /// `LineState::Invalid` acknowledges a finished writeback: victim and
    /// snoop flushes are fire-and-forget, so the cache unblocks only if a
    /// writeback is its recorded outstanding request. Any other state installs
    /// the fetched block (or resolves an in-place upgrade) and unblocks; the
    /// core may issue again from `cycle + 1`.
    pub fn complete(&mut self, cycle: u64, addr: Addr, new_state: LineState, bus: &mut dyn BusPort) {
        if new_state == LineState::Invalid {
            if matches!(self.pending, Some((BusRequestKind::WriteBack, a)) if a == addr) {
                self.unblock(cycle);
            }
            return;
        }

        debug_assert!(
            matches!(self.pending, Some((_, a))
                if self.layout.block_base(a) == self.layout.block_base(addr)),
            "cache {} notified for a block it did not request",
            self.id
        );

        let set = self.layout.set_index(addr);
        let tag = self.layout.tag(addr);
        if let Some(i) = self.find_line(set, tag) {
            // Write-to-shared upgrade resolving in place.
            self.lines[i].state = new_state;
            self.lines[i].last_used = cycle;
        } else {
            self.allocate(cycle, addr, new_state, bus);
        }
        self.unblock(cycle);
    }

    fn unblock(&mut self, cycle: u64) {
        self.pending = None;
        self.blocked = false;
        self.ready_cycle = cycle + 1;
    }

    /// Installs `addr` in `new_state`, evicting the LRU victim of its set.
    ///
    /// A valid victim counts as an eviction; a dirty victim additionally
    /// queues a `WriteBack` for its reconstructed block address.
    fn allocate(&mut self, cycle: u64, addr: Addr, new_state: LineState, bus: &mut dyn BusPort) {
        let set = self.layout.set_index(addr);
        let v = self.victim_index(set);
        let victim = self.lines[v];

        if victim.state.is_valid() {
            self.stats.evictions += 1;
        }
        if victim.state.is_dirty() {
            self.stats.writebacks += 1;
            let victim_addr = self.layout.reconstruct(victim.tag, set);
            bus.enqueue(BusRequest {
                requester: self.id,
                kind: BusRequestKind::WriteBack,
                addr: victim_addr,
                issued_at: cycle,
            });
        }

        self.lines[v] = CacheLine {
            tag: self.layout.tag(addr),
            state: new_state,
            last_used: cycle,
        };
    }

    /// Snoops a bus request issued by another cache at `cycle`.
    ///
    /// Returns whether this cache will supply the block. Flushing a dirty
    /// line (MODIFIED observed by `BusRd` or `BusRdX`) counts a writeback and
    /// queues a `WriteBack` for the block base address; losing a valid line
    /// to `BusRdX` counts an invalidation.
    pub fn snoop(&mut self, cycle: u64, kind: BusRequestKind, addr: Addr, bus: &mut dyn BusPort) -> bool {
        let set = self.layout.set_index(addr);
        let tag = self.layout.tag(addr);
        let Some(i) = self.find_line(set, tag) else {
            return false;
        };

        let outcome = snoop_transition(self.lines[i].state, kind);
        if outcome.flushes_dirty {
            self.stats.writebacks += 1;
            bus.enqueue(BusRequest {
                requester: self.id,
                kind: BusRequestKind::WriteBack,
                addr: self.layout.block_base(addr),
                issued_at: cycle,
            });
        }
        if outcome.invalidation {
            self.stats.invalidations += 1;
        }
        self.lines[i].state = outcome.next;
        outcome.supplies_data
    }
}
