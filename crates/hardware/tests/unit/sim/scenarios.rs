//! # End-to-End Scenario Tests
//!
//! The seed suite at geometry `s=2, E=2, b=4` (4 sets, 2 ways, 16-byte
//! blocks): short traces with fully determined counter outcomes, covering
//! cold fills, sharing, write contention, replacement, dirty eviction, and
//! the write-to-shared upgrade.

use crate::common::traces::TraceSet;
use mesi_core::common::Addr;
use mesi_core::core::LineState;

/// A lone cold read is served by memory and lands EXCLUSIVE.
#[test]
fn lone_read_from_memory() {
    let set = TraceSet::new().with_core(0, &["R 0x1000"]);
    let mut sim = set.simulator(2, 2, 4);
    sim.run();

    assert_eq!(sim.cache(0).state_of(Addr(0x1000)), LineState::Exclusive);
    assert_eq!(sim.core(0).stats.instructions, 1);
    assert_eq!(sim.cache(0).stats.accesses, 1);
    assert_eq!(sim.cache(0).stats.misses, 1);
    assert_eq!(sim.cache(0).stats.writebacks, 0);
    assert_eq!(sim.bus().stats.transactions, 1);
    assert_eq!(sim.bus().stats.data_bytes, 16);

    // One instruction, one 100-cycle memory fetch, one cycle to resume and
    // one to observe the empty trace.
    assert_eq!(sim.cycle(), 103);
    assert_eq!(sim.core(0).stats.idle_cycles, 101);
}

/// Two readers of one block: the first fill is EXCLUSIVE, the second read
/// finds a supplier and both copies end SHARED.
#[test]
fn second_reader_finds_supplier() {
    let set = TraceSet::new()
        .with_core(0, &["R 0x1000"])
        .with_core(1, &["R 0x1000"]);
    let mut sim = set.simulator(2, 2, 4);
    sim.run();

    assert_eq!(sim.cache(0).state_of(Addr(0x1000)), LineState::Shared);
    assert_eq!(sim.cache(1).state_of(Addr(0x1000)), LineState::Shared);
    assert_eq!(sim.bus().stats.transactions, 2);
    assert_eq!(sim.bus().stats.data_bytes, 32);
    assert_eq!(sim.cache(0).stats.invalidations, 0);
    assert_eq!(sim.cache(1).stats.invalidations, 0);
}

/// Two writers of one block: the loser's MODIFIED line is invalidated and
/// written back, accounted to the loser.
#[test]
fn write_contention_invalidates_and_flushes() {
    let set = TraceSet::new()
        .with_core(0, &["W 0x2000"])
        .with_core(1, &["W 0x2000"]);
    let mut sim = set.simulator(2, 2, 4);
    sim.run();

    assert_eq!(sim.cache(0).state_of(Addr(0x2000)), LineState::Invalid);
    assert_eq!(sim.cache(1).state_of(Addr(0x2000)), LineState::Modified);
    assert_eq!(sim.cache(0).stats.invalidations, 1);
    assert_eq!(sim.cache(0).stats.writebacks, 1);
    assert_eq!(sim.cache(1).stats.invalidations, 0);
    assert_eq!(sim.cache(1).stats.writebacks, 0);
    // Two BusRdX plus the loser's flush writeback.
    assert_eq!(sim.bus().stats.transactions, 3);
    assert_eq!(sim.bus().stats.data_bytes, 48);
}

/// Three reads mapping to one set with two ways: the third fill evicts the
/// least recently used clean line without a writeback.
#[test]
fn conflict_misses_evict_lru() {
    // 0x3000, 0x3040, 0x3080 share set 0 with distinct tags at s=2, b=4.
    let set = TraceSet::new().with_core(0, &["R 0x3000", "R 0x3040", "R 0x3080"]);
    let mut sim = set.simulator(2, 2, 4);
    sim.run();

    assert_eq!(sim.cache(0).stats.misses, 3);
    assert_eq!(sim.cache(0).stats.evictions, 1);
    assert_eq!(sim.cache(0).stats.writebacks, 0);
    assert_eq!(sim.cache(0).state_of(Addr(0x3000)), LineState::Invalid);
    assert_eq!(sim.cache(0).state_of(Addr(0x3040)), LineState::Exclusive);
    assert_eq!(sim.cache(0).state_of(Addr(0x3080)), LineState::Exclusive);
}

/// Direct-mapped conflict on a dirty line: the eviction writes the victim
/// back as its own 100-cycle bus transaction.
#[test]
fn dirty_eviction_writes_back() {
    let set = TraceSet::new().with_core(0, &["W 0x4000", "R 0x5000"]);
    let mut sim = set.simulator(2, 1, 4);
    sim.run();

    assert_eq!(sim.cache(0).stats.misses, 2);
    assert_eq!(sim.cache(0).stats.evictions, 1);
    assert_eq!(sim.cache(0).stats.writebacks, 1);
    assert_eq!(sim.cache(0).state_of(Addr(0x4000)), LineState::Invalid);
    assert_eq!(sim.cache(0).state_of(Addr(0x5000)), LineState::Exclusive);
    // BusRdX, BusRd, and the victim writeback all reached the bus.
    assert_eq!(sim.bus().stats.transactions, 3);
    assert_eq!(sim.bus().stats.data_bytes, 48);
}

/// Read-share then write: the writer upgrades in place with a `BusRdX`,
/// invalidating the other sharer, without a fresh miss.
#[test]
fn write_to_shared_upgrades_in_place() {
    let set = TraceSet::new()
        .with_core(0, &["R 0x6000", "W 0x6000"])
        .with_core(1, &["R 0x6000"]);
    let mut sim = set.simulator(2, 2, 4);
    sim.run();

    assert_eq!(sim.cache(0).state_of(Addr(0x6000)), LineState::Modified);
    assert_eq!(sim.cache(1).state_of(Addr(0x6000)), LineState::Invalid);
    assert_eq!(sim.cache(1).stats.invalidations, 1);
    assert_eq!(sim.cache(0).stats.misses, 1, "the write is not a miss");
    assert_eq!(sim.cache(0).stats.hits, 1);
    assert_eq!(sim.cache(0).stats.upgrades, 1);
    assert_eq!(sim.cache(0).stats.evictions, 0);
    // Two BusRd fills plus the upgrade BusRdX; no writebacks (the shared
    // copies were clean).
    assert_eq!(sim.bus().stats.transactions, 3);
    assert_eq!(sim.cache(0).stats.writebacks, 0);
    assert_eq!(sim.cache(1).stats.writebacks, 0);
}
