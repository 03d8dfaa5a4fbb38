//! Memory address type and its geometry-dependent decomposition.
//!
//! This module defines the address representation used by the caches and the
//! bus. It provides the following:
//! 1. **Type Safety:** A newtype for 32-bit trace addresses.
//! 2. **Decomposition:** Splitting an address into tag, set index, and offset.
//! 3. **Reconstruction:** Rebuilding a block base address from tag and index,
//!    as needed when a victim line is written back.

use std::fmt;

/// A 32-bit physical address as it appears in a memory trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Addr(pub u32);

impl Addr {
    /// Creates a new address from a raw 32-bit value.
    #[inline(always)]
    pub fn new(addr: u32) -> Self {
        Self(addr)
    }

    /// Returns the raw 32-bit address value.
    #[inline(always)]
    pub fn val(&self) -> u32 {
        self.0
    }
}

impl fmt::LowerHex for Addr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

/// Precomputed shifts and masks splitting an address into
/// `tag | set index | block offset`.
///
/// The layout is fixed by the cache geometry: `index_bits` selects one of
/// `2^index_bits` sets and `offset_bits` addresses a byte within a
/// `2^offset_bits`-byte block; the tag occupies the remaining high bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddressLayout {
    index_bits: u32,
    offset_bits: u32,
    index_mask: u32,
    offset_mask: u32,
    tag_shift: u32,
}

impl AddressLayout {
    /// Creates a layout for the given bit widths.
    ///
    /// Callers must have validated `index_bits + offset_bits < 32` so at
    /// least one tag bit remains (see `CacheGeometry::validate`).
    pub fn new(index_bits: u32, offset_bits: u32) -> Self {
        debug_assert!(index_bits + offset_bits < 32);
        Self {
            index_bits,
            offset_bits,
            index_mask: (1u32 << index_bits) - 1,
            offset_mask: (1u32 << offset_bits) - 1,
            tag_shift: index_bits + offset_bits,
        }
    }

    /// Extracts the tag (high) bits of `addr`.
    #[inline]
    pub fn tag(&self, addr: Addr) -> u32 {
        addr.0 >> self.tag_shift
    }

    /// Extracts the set index of `addr`.
    #[inline]
    pub fn set_index(&self, addr: Addr) -> usize {
        ((addr.0 >> self.offset_bits) & self.index_mask) as usize
    }

    /// Extracts the byte offset of `addr` within its block.
    ///
    /// The controller never uses the offset (no data is modelled); it exists
    /// for completeness of the decomposition.
    #[inline]
    pub fn offset(&self, addr: Addr) -> u32 {
        addr.0 & self.offset_mask
    }

    /// Returns the base address of the block containing `addr`.
    #[inline]
    pub fn block_base(&self, addr: Addr) -> Addr {
        Addr(addr.0 & !self.offset_mask)
    }

    /// Rebuilds a block base address from its tag and set index.
    ///
    /// For any address `a`, `reconstruct(tag(a), set_index(a))` equals
    /// `block_base(a)`.
    #[inline]
    pub fn reconstruct(&self, tag: u32, set_index: usize) -> Addr {
        Addr((tag << self.tag_shift) | ((set_index as u32) << self.offset_bits))
    }

    /// Number of sets addressed by this layout.
    #[inline]
    pub fn num_sets(&self) -> usize {
        1usize << self.index_bits
    }

    /// Block size in bytes addressed by this layout.
    #[inline]
    pub fn block_bytes(&self) -> usize {
        1usize << self.offset_bits
    }
}
