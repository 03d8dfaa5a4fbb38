//! MESI line states and snoop transitions.
//!
//! This module defines the coherence state machine shared by all cache
//! controllers. It provides:
//! 1. **States:** The MODIFIED / EXCLUSIVE / SHARED / INVALID tagged enum.
//! 2. **Snoop Table:** The transition a valid line takes when another cache's
//!    bus request is observed, as one exhaustive match.

use crate::soc::bus::BusRequestKind;

/// Coherence state of a single cache line.
///
/// At most one cache may hold a block in `Modified` or `Exclusive` at any
/// instant; if any cache holds it in `Shared`, no cache holds it exclusively;
/// `Modified` is the only dirty state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineState {
    /// Line is dirty and exclusive to this cache.
    Modified,
    /// Line is clean and exclusive to this cache.
    Exclusive,
    /// Line is clean and may be replicated in other caches.
    Shared,
    /// Line holds no block.
    Invalid,
}

impl LineState {
    /// Whether the line holds a block.
    #[inline]
    pub fn is_valid(self) -> bool {
        self != LineState::Invalid
    }

    /// Whether the line differs from memory. Only MODIFIED lines are dirty.
    #[inline]
    pub fn is_dirty(self) -> bool {
        self == LineState::Modified
    }
}

/// Effect of snooping a bus request against a valid line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SnoopOutcome {
    /// State the line transitions to.
    pub next: LineState,
    /// Whether this cache supplies the block to the requester.
    pub supplies_data: bool,
    /// Whether the transition invalidates a valid line.
    pub invalidation: bool,
    /// Whether dirty data leaves MODIFIED and must reach memory.
    pub flushes_dirty: bool,
}

impl SnoopOutcome {
    fn unchanged(state: LineState) -> Self {
        Self {
            next: state,
            supplies_data: false,
            invalidation: false,
            flushes_dirty: false,
        }
    }
}

/// Returns the transition a valid line in `state` takes when a request of
/// `kind` from another cache is observed on the bus.
///
/// `WriteBack` requests carry no coherence action for observers. Snooping an
/// INVALID line is a caller bug: absent blocks are filtered out before the
/// table is consulted.
pub fn snoop_transition(state: LineState, kind: BusRequestKind) -> SnoopOutcome {
    match (state, kind) {
        (LineState::Modified, BusRequestKind::BusRd) => SnoopOutcome {
            next: LineState::Shared,
            supplies_data: true,
            invalidation: false,
            flushes_dirty: true,
        },
        (LineState::Modified, BusRequestKind::BusRdX) => SnoopOutcome {
            next: LineState::Invalid,
            supplies_data: true,
            invalidation: true,
            flushes_dirty: true,
        },
        (LineState::Exclusive, BusRequestKind::BusRd) => SnoopOutcome {
            next: LineState::Shared,
            supplies_data: true,
            invalidation: false,
            flushes_dirty: false,
        },
        (LineState::Exclusive, BusRequestKind::BusRdX) => SnoopOutcome {
            next: LineState::Invalid,
            supplies_data: false,
            invalidation: true,
            flushes_dirty: false,
        },
        // A SHARED line never supplies data; memory is up to date and the
        // transfer cost is attributed to memory.
        (LineState::Shared, BusRequestKind::BusRd) => SnoopOutcome::unchanged(LineState::Shared),
        (LineState::Shared, BusRequestKind::BusRdX) => SnoopOutcome {
            next: LineState::Invalid,
            supplies_data: false,
            invalidation: true,
            flushes_dirty: false,
        },
        (state, BusRequestKind::WriteBack) => SnoopOutcome::unchanged(state),
        (LineState::Invalid, _) => unreachable!("snooped an absent block"),
    }
}
