//! # Report Formatting Tests
//!
//! The statistics report's stable label set, value formatting, and the
//! equivalence of its two output paths.

use crate::common::traces::TraceSet;

/// Every contracted label appears in the rendered report.
#[test]
fn report_contains_stable_labels() {
    let set = TraceSet::new().with_core(0, &["R 0x1000", "W 0x1000"]);
    let mut sim = set.simulator(2, 2, 4);
    sim.run();
    let text = sim.report().to_string();

    for label in [
        "Simulation Parameters:",
        "Trace Prefix: ",
        "Set Index Bits: 2",
        "Associativity: 2",
        "Block Bits: 4",
        "Block Size (Bytes): 16",
        "Number of Sets: 4",
        "Cache Size (KB per core): 0.125",
        "MESI Protocol: Enabled",
        "Write Policy: Write-back, Write-allocate",
        "Replacement Policy: LRU",
        "Bus: Central snooping bus",
        "Core 0 Statistics:",
        "Core 3 Statistics:",
        "Total Instructions: ",
        "Total Reads: ",
        "Total Writes: ",
        "Total Execution Cycles: ",
        "Idle Cycles: ",
        "Cache Misses: ",
        "Cache Miss Rate: ",
        "Cache Evictions: ",
        "Writebacks: ",
        "Bus Invalidations: ",
        "Data Traffic (Bytes): ",
        "Overall Bus Summary:",
        "Total Bus Transactions: ",
        "Total Bus Traffic (Bytes): ",
    ] {
        assert!(text.contains(label), "missing label: {:?}", label);
    }
}

/// Miss rate renders as a percentage with two decimals.
#[test]
fn miss_rate_two_decimals() {
    let set = TraceSet::new().with_core(0, &["R 0x1000", "R 0x1004", "R 0x1008"]);
    let mut sim = set.simulator(2, 2, 4);
    sim.run();
    let text = sim.report().to_string();

    // One miss in three accesses.
    assert!(text.contains("Cache Miss Rate: 33.33%"), "report was:\n{}", text);
}

/// A core that never accessed memory reports a 0.00% miss rate.
#[test]
fn idle_core_reports_zero_miss_rate() {
    let set = TraceSet::new().with_core(0, &["R 0x1000"]);
    let mut sim = set.simulator(2, 2, 4);
    sim.run();
    let text = sim.report().to_string();

    assert!(text.contains("Cache Miss Rate: 0.00%"));
}

/// `write_to` produces exactly the bytes of the `Display` rendering.
#[test]
fn write_to_matches_display() {
    let set = TraceSet::new().with_core(0, &["W 0x2000"]);
    let mut sim = set.simulator(2, 2, 4);
    sim.run();
    let report = sim.report();

    let mut buffer: Vec<u8> = Vec::new();
    report.write_to(&mut buffer).expect("write report");
    assert_eq!(buffer, report.to_string().into_bytes());
}

/// Per-core blocks appear for all four cores in order.
#[test]
fn four_core_blocks_in_order() {
    let set = TraceSet::new();
    let mut sim = set.simulator(2, 2, 4);
    sim.run();
    let text = sim.report().to_string();

    let positions: Vec<usize> = (0..4)
        .map(|id| {
            text.find(&format!("Core {} Statistics:", id))
                .expect("core block present")
        })
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}
