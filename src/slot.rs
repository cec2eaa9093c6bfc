//! Buckets and the linear probe sequence over them.

use alloc::boxed::Box;
use core::fmt;
use core::fmt::Debug;

/// An owned, immutable copy of a key.
///
/// The table never keeps a reference to a caller's buffer; every stored key
/// is copied into one of these on insert.
#[derive(Clone, PartialEq, Eq, Hash)]
pub(crate) struct Key(Box<[u8]>);

impl Key {
    #[inline]
    pub(crate) fn copy_from(bytes: &[u8]) -> Self {
        Key(Box::from(bytes))
    }

    #[inline]
    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    #[inline]
    pub(crate) fn into_bytes(self) -> Box<[u8]> {
        self.0
    }
}

impl Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self.0.escape_ascii())
    }
}

/// A live entry.
#[derive(Clone)]
pub(crate) struct Occupied<V> {
    pub(crate) hash: u64,
    pub(crate) key: Key,
    pub(crate) data: V,
}

impl<V> Occupied<V> {
    #[inline]
    pub(crate) fn matches(&self, hash: u64, key: &[u8]) -> bool {
        self.hash == hash && self.key.as_bytes() == key
    }
}

/// One bucket of the table.
///
/// `Empty` ends a lookup: nothing was ever stored past this point in the
/// probe chain. `Tombstone` marks a deleted entry; lookups step over it,
/// inserts may reuse it, and a resize drops it.
#[derive(Clone)]
pub(crate) enum Slot<V> {
    Empty,
    Occupied(Occupied<V>),
    Tombstone,
}

impl<V> Default for Slot<V> {
    #[inline]
    fn default() -> Self {
        Slot::Empty
    }
}

impl<V> Slot<V> {
    #[inline]
    pub(crate) fn is_occupied(&self) -> bool {
        matches!(self, Slot::Occupied(_))
    }

    #[cfg(any(test, feature = "stats"))]
    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }

    #[inline]
    pub(crate) fn is_tombstone(&self) -> bool {
        matches!(self, Slot::Tombstone)
    }

    #[inline]
    pub(crate) fn as_occupied(&self) -> Option<&Occupied<V>> {
        match self {
            Slot::Occupied(entry) => Some(entry),
            _ => None,
        }
    }

    #[inline]
    pub(crate) fn as_occupied_mut(&mut self) -> Option<&mut Occupied<V>> {
        match self {
            Slot::Occupied(entry) => Some(entry),
            _ => None,
        }
    }

    /// Replaces an occupied slot with a tombstone and returns its entry.
    ///
    /// Leaves any other slot untouched.
    #[inline]
    pub(crate) fn bury(&mut self) -> Option<Occupied<V>> {
        if !self.is_occupied() {
            return None;
        }

        match core::mem::replace(self, Slot::Tombstone) {
            Slot::Occupied(entry) => Some(entry),
            _ => None,
        }
    }
}

/// Maps `hash` to its home bucket in a table of `size` buckets.
#[inline(always)]
pub(crate) fn home(hash: u64, size: usize) -> usize {
    debug_assert!(size > 0, "table size must be non-zero");
    (hash % size as u64) as usize
}

/// Walks every bucket once, starting at `home` and wrapping at `size`.
#[derive(Debug, Clone)]
pub(crate) struct Probe {
    next: usize,
    size: usize,
    remaining: usize,
}

impl Probe {
    #[inline]
    pub(crate) fn new(home: usize, size: usize) -> Self {
        debug_assert!(home < size || size == 0);
        Probe {
            next: home,
            size,
            remaining: size,
        }
    }
}

impl Iterator for Probe {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }

        let index = self.next;
        self.remaining -= 1;
        self.next += 1;
        if self.next == self.size {
            self.next = 0;
        }

        Some(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Probe {}

/// Returns the first bucket in the probe sequence from `home` that is not
/// occupied.
///
/// Both empty slots and tombstones qualify.
pub(crate) fn find_vacant<V>(slots: &[Slot<V>], home: usize) -> Option<usize> {
    Probe::new(home, slots.len()).find(|&index| !slots[index].is_occupied())
}

/// Distance travelled from `home` to reach `index`, accounting for wraparound.
#[cfg(any(test, feature = "stats"))]
#[inline]
pub(crate) fn probe_distance(home: usize, index: usize, size: usize) -> usize {
    if index >= home {
        index - home
    } else {
        size - home + index
    }
}
