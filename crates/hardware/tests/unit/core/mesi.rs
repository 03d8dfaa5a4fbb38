//! # MESI Transition Table Tests
//!
//! Exhaustive checks of the snoop transition table: next state, supply
//! decision, invalidation counting, and dirty flushes.

use mesi_core::core::mesi::{snoop_transition, LineState};
use mesi_core::soc::bus::BusRequestKind;

/// MODIFIED observed by a read: downgrade to SHARED and supply, flushing
/// the dirty block.
#[test]
fn modified_on_busrd() {
    let o = snoop_transition(LineState::Modified, BusRequestKind::BusRd);
    assert_eq!(o.next, LineState::Shared);
    assert!(o.supplies_data);
    assert!(!o.invalidation);
    assert!(o.flushes_dirty);
}

/// MODIFIED observed by an exclusive read: invalidate, supply, and flush.
#[test]
fn modified_on_busrdx() {
    let o = snoop_transition(LineState::Modified, BusRequestKind::BusRdX);
    assert_eq!(o.next, LineState::Invalid);
    assert!(o.supplies_data);
    assert!(o.invalidation);
    assert!(o.flushes_dirty);
}

/// EXCLUSIVE observed by a read: clean downgrade to SHARED, can supply.
#[test]
fn exclusive_on_busrd() {
    let o = snoop_transition(LineState::Exclusive, BusRequestKind::BusRd);
    assert_eq!(o.next, LineState::Shared);
    assert!(o.supplies_data);
    assert!(!o.invalidation);
    assert!(!o.flushes_dirty);
}

/// EXCLUSIVE observed by an exclusive read: invalidate without flushing.
#[test]
fn exclusive_on_busrdx() {
    let o = snoop_transition(LineState::Exclusive, BusRequestKind::BusRdX);
    assert_eq!(o.next, LineState::Invalid);
    assert!(!o.supplies_data);
    assert!(o.invalidation);
    assert!(!o.flushes_dirty);
}

/// SHARED observed by a read: no change and no supply (memory sources).
#[test]
fn shared_on_busrd() {
    let o = snoop_transition(LineState::Shared, BusRequestKind::BusRd);
    assert_eq!(o.next, LineState::Shared);
    assert!(!o.supplies_data);
    assert!(!o.invalidation);
    assert!(!o.flushes_dirty);
}

/// SHARED observed by an exclusive read: invalidate quietly.
#[test]
fn shared_on_busrdx() {
    let o = snoop_transition(LineState::Shared, BusRequestKind::BusRdX);
    assert_eq!(o.next, LineState::Invalid);
    assert!(!o.supplies_data);
    assert!(o.invalidation);
    assert!(!o.flushes_dirty);
}

/// Writebacks carry no coherence action for observers in any valid state.
#[test]
fn writeback_is_inert() {
    for state in [LineState::Modified, LineState::Exclusive, LineState::Shared] {
        let o = snoop_transition(state, BusRequestKind::WriteBack);
        assert_eq!(o.next, state);
        assert!(!o.supplies_data);
        assert!(!o.invalidation);
        assert!(!o.flushes_dirty);
    }
}

/// State predicates: only MODIFIED is dirty, only INVALID is not valid.
#[test]
fn state_predicates() {
    assert!(LineState::Modified.is_dirty());
    for state in [LineState::Exclusive, LineState::Shared, LineState::Invalid] {
        assert!(!state.is_dirty());
    }
    assert!(!LineState::Invalid.is_valid());
    for state in [LineState::Modified, LineState::Exclusive, LineState::Shared] {
        assert!(state.is_valid());
    }
}
