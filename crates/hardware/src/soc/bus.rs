//! Shared snooping bus and its timing model.
//!
//! This module implements the single bus connecting the four caches to the
//! memory model. It provides:
//! 1. **Queueing:** Requests accumulate until the bus is free.
//! 2. **Arbitration:** A fixed-priority, deterministic selection policy.
//! 3. **Snoop Broadcast:** Every non-requester cache observes the selected
//!    request and may change state or volunteer to supply the block.
//! 4. **Timing:** Completion cycles from the fixed latency table.
//! 5. **Retirement:** Requester notification and aggregate traffic counters.

use std::collections::VecDeque;

use crate::common::addr::Addr;
use crate::common::constants::{MEM_LATENCY, WORD_TRANSFER_LATENCY};
use crate::config::CacheGeometry;
use crate::core::cache::Cache;
use crate::core::mesi::LineState;
use crate::soc::traits::BusPort;

/// Kind of transaction carried on the shared bus.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BusRequestKind {
    /// Fetch a block for reading (read miss).
    BusRd,
    /// Fetch a block with exclusive ownership (write miss or upgrade);
    /// invalidates all other copies.
    BusRdX,
    /// Flush a dirty block to memory.
    WriteBack,
}

impl BusRequestKind {
    /// Arbitration rank; lower wins.
    fn priority(self) -> u8 {
        match self {
            BusRequestKind::BusRdX => 0,
            BusRequestKind::BusRd => 1,
            BusRequestKind::WriteBack => 2,
        }
    }
}

/// A queued coherence request from one cache.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BusRequest {
    /// Id of the cache that issued the request.
    pub requester: usize,
    /// Transaction kind.
    pub kind: BusRequestKind,
    /// Address the request concerns.
    pub addr: Addr,
    /// Cycle the request was pushed.
    pub issued_at: u64,
}

/// An in-flight transaction and its computed completion time.
#[derive(Clone, Copy, Debug)]
pub struct BusTransaction {
    /// The request being serviced.
    pub request: BusRequest,
    /// Cycle the bus dequeued the request.
    pub start_cycle: u64,
    /// Cycle the transaction retires.
    pub completion_cycle: u64,
    /// Whether another cache volunteered to supply the block.
    pub served_by_cache: bool,
}

/// Aggregate bus counters.
#[derive(Clone, Copy, Debug, Default)]
pub struct BusStats {
    /// Transactions dequeued onto the bus.
    pub transactions: u64,
    /// Bytes transferred; one block per transaction.
    pub data_bytes: u64,
}

/// The arbitrated snooping bus.
///
/// At most one transaction is in flight; the next is not selected until the
/// previous completes. The bus holds no cache handles: each `tick` receives
/// the cache registry from the simulator.
pub struct Bus {
    queue: VecDeque<BusRequest>,
    current: Option<BusTransaction>,
    block_bytes: u64,
    cache_supply_latency: u64,
    /// Transaction and traffic counters, aggregated into the report.
    pub stats: BusStats,
}

impl Bus {
    /// Creates an idle bus for caches of the given geometry.
    pub fn new(geometry: &CacheGeometry) -> Self {
        Self {
            queue: VecDeque::new(),
            current: None,
            block_bytes: geometry.block_bytes() as u64,
            cache_supply_latency: WORD_TRANSFER_LATENCY * geometry.words_per_block(),
            stats: BusStats::default(),
        }
    }

    /// Whether a transaction is in flight.
    pub fn is_busy(&self) -> bool {
        self.current.is_some()
    }

    /// Number of requests waiting for arbitration.
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// The in-flight transaction, if any.
    pub fn current(&self) -> Option<&BusTransaction> {
        self.current.as_ref()
    }

    /// Advances the bus by one cycle.
    ///
    /// First sub-step: retire the in-flight transaction if its completion
    /// cycle has been reached, notifying the requester. Second sub-step: if
    /// idle and requests are queued, arbitrate one, broadcast the snoop, and
    /// compute its completion time. Requests pushed by cores at cycle `cycle`
    /// are not seen before the next tick because the core phase runs after
    /// the bus phase.
    pub fn tick(&mut self, cycle: u64, caches: &mut [Cache]) {
        if let Some(txn) = self.current {
            if cycle >= txn.completion_cycle {
                self.current = None;
                self.retire(cycle, txn, caches);
            }
        }

        if self.current.is_none() {
            if let Some(pos) = self.arbitrate() {
                if let Some(req) = self.queue.remove(pos) {
                    self.start(cycle, req, caches);
                }
            }
        }
    }

    /// Picks the next request: `BusRdX` before `BusRd` before `WriteBack`,
    /// lowest requester id within a kind, queue order as the final tie-break.
    fn arbitrate(&self) -> Option<usize> {
        self.queue
            .iter()
            .enumerate()
            .min_by_key(|(_, r)| (r.kind.priority(), r.requester))
            .map(|(i, _)| i)
    }

    /// Dequeues `req`, broadcasts the snoop, and marks the bus busy.
    fn start(&mut self, cycle: u64, req: BusRequest, caches: &mut [Cache]) {
        self.stats.transactions += 1;
        self.stats.data_bytes += self.block_bytes;

        // Snoop side effects may queue flush writebacks; collect them locally
        // since the bus is mid-tick.
        let mut follow_ups: Vec<BusRequest> = Vec::new();
        let mut served_by_cache = false;
        for cache in caches.iter_mut() {
            if cache.id() == req.requester {
                continue;
            }
            let supplies = cache.snoop(cycle, req.kind, req.addr, &mut follow_ups);
            if matches!(req.kind, BusRequestKind::BusRd | BusRequestKind::BusRdX) {
                served_by_cache |= supplies;
            }
        }
        self.queue.extend(follow_ups);

        let completion_cycle = cycle + self.latency(req.kind, served_by_cache);
        log::debug!(
            "bus: start {:?} from cache {} for {:#010x}, completes at {}",
            req.kind,
            req.requester,
            req.addr,
            completion_cycle
        );
        self.current = Some(BusTransaction {
            request: req,
            start_cycle: cycle,
            completion_cycle,
            served_by_cache,
        });
    }

    /// Transfer time for one transaction.
    ///
    /// A `BusRd` supplied by another cache moves the block cache-to-cache in
    /// `2 * words` cycles; everything else is served by memory at the fixed
    /// memory latency (memory always sources a `BusRdX` in this model).
    fn latency(&self, kind: BusRequestKind, served_by_cache: bool) -> u64 {
        match kind {
            BusRequestKind::BusRd if served_by_cache => self.cache_supply_latency,
            BusRequestKind::BusRd | BusRequestKind::BusRdX | BusRequestKind::WriteBack => {
                MEM_LATENCY
            }
        }
    }

    /// Notifies the requester of a completed transaction.
    fn retire(&mut self, cycle: u64, txn: BusTransaction, caches: &mut [Cache]) {
        let new_state = match txn.request.kind {
            BusRequestKind::BusRd => {
                if txn.served_by_cache {
                    LineState::Shared
                } else {
                    LineState::Exclusive
                }
            }
            BusRequestKind::BusRdX => LineState::Modified,
            BusRequestKind::WriteBack => LineState::Invalid,
        };
        log::debug!(
            "bus: retire {:?} from cache {} for {:#010x} as {:?}",
            txn.request.kind,
            txn.request.requester,
            txn.request.addr,
            new_state
        );

        // Completion may evict a dirty victim; its writeback joins the queue.
        let mut follow_ups: Vec<BusRequest> = Vec::new();
        caches[txn.request.requester].complete(cycle, txn.request.addr, new_state, &mut follow_ups);
        self.queue.extend(follow_ups);
    }
}

impl BusPort for Bus {
    fn enqueue(&mut self, req: BusRequest) {
        self.queue.push_back(req);
    }
}
