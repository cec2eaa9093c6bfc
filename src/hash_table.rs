use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt::Debug;

use tracing::debug;
use tracing::trace;
use tracing::warn;

use crate::config::DEFAULT_CAPACITY;
use crate::config::GROWTH_FACTOR;
use crate::config::Threshold;
use crate::error::Error;
use crate::error::InsertError;
use crate::hasher::Djb2;
use crate::hasher::KeyHasher;
use crate::slot::Key;
use crate::slot::Occupied;
use crate::slot::Probe;
use crate::slot::Slot;
use crate::slot::find_vacant;
use crate::slot::home;

/// Allocates `size` empty buckets, reporting allocator failure instead of
/// aborting.
fn alloc_slots<V>(size: usize) -> Result<Box<[Slot<V>]>, Error> {
    let mut slots = Vec::new();
    if slots.try_reserve_exact(size).is_err() {
        warn!(size, "bucket array allocation failed");
        return Err(Error::AllocFailed);
    }
    slots.resize_with(size, Slot::default);
    Ok(slots.into_boxed_slice())
}

/// Debug statistics for hash table analysis.
#[cfg(feature = "stats")]
#[derive(Debug, Clone)]
pub struct DebugStats {
    /// Number of live entries
    pub populated: usize,
    /// Number of buckets
    pub capacity: usize,
    /// Number of buckets holding a tombstone
    pub tombstones: usize,
    /// Number of buckets that were never written since the last resize
    pub empty: usize,
    /// Load factor (populated / capacity)
    pub load_factor: f64,
    /// Longest distance between an entry and its home bucket
    pub max_probe: usize,
    /// Average distance between an entry and its home bucket
    pub mean_probe: f64,
}

#[cfg(feature = "stats")]
impl DebugStats {
    /// Pretty-print the debug statistics.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        println!("=== Hash Table Debug Statistics ===");
        println!(
            "Population: {}/{} ({:.2}% load factor)",
            self.populated,
            self.capacity,
            self.load_factor * 100.0
        );
        println!(
            "Buckets: {} empty, {} tombstones",
            self.empty, self.tombstones
        );
        println!(
            "Probe length: {} max, {:.02} mean",
            self.max_probe, self.mean_probe
        );
    }
}

/// A hash table keyed by byte strings, using open addressing with linear
/// probing.
///
/// `LinearHashTable<V, H>` copies every key it is given into storage it owns,
/// and stores the caller's data `V` next to it. Collisions are resolved by
/// scanning forward from the key's home bucket, wrapping at the end of the
/// bucket array. Removing an entry leaves a tombstone behind so that probe
/// chains running through it stay connected.
///
/// Before every insert the table checks its load (`len * 10 / capacity`)
/// against its [`Threshold`] and doubles the bucket array if the load has
/// reached it. The table never shrinks on its own; use [`resize`] for that.
///
/// `V` is whatever the caller wants the table to hold. The table never
/// inspects it. Choose a borrowed or handle type (`&T`, an index, a
/// `NonNull<T>`) when the data should outlive the table; dropping the table
/// then only releases its own keys and buckets.
///
/// ## Example
///
/// ```rust
/// use linear_hash::LinearHashTable;
///
/// let mut table = LinearHashTable::new();
/// table.insert("bacon", 1).unwrap();
/// table.insert("chicken", 2).unwrap();
///
/// // Insert never overwrites.
/// let err = table.insert("bacon", 10).unwrap_err();
/// assert_eq!(err.into_data(), 10);
///
/// // Set only overwrites.
/// assert_eq!(table.set("bacon", 11), Ok(1));
/// assert_eq!(table.set("pork", 3), Err(3));
///
/// assert_eq!(table.remove("chicken"), Some(2));
/// assert_eq!(table.get("chicken"), None);
/// assert_eq!(table.len(), 1);
/// ```
///
/// [`resize`]: LinearHashTable::resize
#[derive(Clone)]
pub struct LinearHashTable<V, H = Djb2> {
    slots: Box<[Slot<V>]>,
    populated: usize,
    tombstones: usize,
    threshold: Threshold,
    hasher: H,
}

impl<V, H> Debug for LinearHashTable<V, H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        use alloc::format;
        use alloc::string::ToString;

        f.debug_struct("LinearHashTable")
            .field(
                "slots",
                &self
                    .slots
                    .iter()
                    .map(|slot| match slot {
                        Slot::Empty => "..".to_string(),
                        Slot::Tombstone => "xx".to_string(),
                        Slot::Occupied(entry) => format!(
                            "{}@{}",
                            entry.key.as_bytes().escape_ascii(),
                            home(entry.hash, self.slots.len())
                        ),
                    })
                    .collect::<Vec<_>>(),
            )
            .field("populated", &self.populated)
            .field("tombstones", &self.tombstones)
            .field("capacity", &self.slots.len())
            .field("threshold", &self.threshold)
            .finish()
    }
}

impl<V> LinearHashTable<V, Djb2> {
    /// Creates an empty table with 32 buckets and the default [`Djb2`]
    /// hasher.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use linear_hash::LinearHashTable;
    /// #
    /// let table: LinearHashTable<i32> = LinearHashTable::new();
    /// assert_eq!(table.capacity(), 32);
    /// assert!(table.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::with_hasher(Djb2)
    }

    /// Creates an empty table with exactly `capacity` buckets.
    ///
    /// Fails with [`Error::ZeroCapacity`] if `capacity` is zero.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use linear_hash::Error;
    /// # use linear_hash::LinearHashTable;
    /// #
    /// let table: LinearHashTable<i32> = LinearHashTable::with_capacity(4).unwrap();
    /// assert_eq!(table.capacity(), 4);
    ///
    /// assert_eq!(
    ///     LinearHashTable::<i32>::with_capacity(0).unwrap_err(),
    ///     Error::ZeroCapacity
    /// );
    /// ```
    pub fn with_capacity(capacity: usize) -> Result<Self, Error> {
        Self::with_capacity_and_hasher(capacity, Djb2)
    }
}

impl<V> Default for LinearHashTable<V, Djb2> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, H> LinearHashTable<V, H> {
    /// Creates an empty table with 32 buckets and the given hasher.
    pub fn with_hasher(hasher: H) -> Self {
        let mut slots = Vec::with_capacity(DEFAULT_CAPACITY);
        slots.resize_with(DEFAULT_CAPACITY, Slot::default);

        Self {
            slots: slots.into_boxed_slice(),
            populated: 0,
            tombstones: 0,
            threshold: Threshold::DEF,
            hasher,
        }
    }

    /// Creates an empty table with exactly `capacity` buckets and the given
    /// hasher.
    pub fn with_capacity_and_hasher(capacity: usize, hasher: H) -> Result<Self, Error> {
        if capacity == 0 {
            warn!("refusing to create a table with zero capacity");
            return Err(Error::ZeroCapacity);
        }

        Ok(Self {
            slots: alloc_slots(capacity)?,
            populated: 0,
            tombstones: 0,
            threshold: Threshold::DEF,
            hasher,
        })
    }

    /// Returns the number of live entries.
    pub fn len(&self) -> usize {
        self.populated
    }

    /// Returns `true` if the table holds no live entries.
    pub fn is_empty(&self) -> bool {
        self.populated == 0
    }

    /// Returns the number of buckets.
    ///
    /// Unlike most hash maps this is not the number of entries the table can
    /// hold before growing; see [`threshold`](Self::threshold) for that.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the number of tombstones left behind by removals since the
    /// last resize or clear.
    pub fn tombstones(&self) -> usize {
        self.tombstones
    }

    /// Returns the current load in tenths, `len * 10 / capacity`, rounded
    /// down.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use linear_hash::LinearHashTable;
    /// #
    /// let mut table = LinearHashTable::with_capacity(4).unwrap();
    /// assert_eq!(table.load(), 0);
    /// table.insert("a", ()).unwrap();
    /// assert_eq!(table.load(), 2);
    /// table.insert("b", ()).unwrap();
    /// assert_eq!(table.load(), 5);
    /// ```
    pub fn load(&self) -> usize {
        self.populated.saturating_mul(10) / self.slots.len()
    }

    /// Returns the load at which an insert grows the table first.
    pub fn threshold(&self) -> Threshold {
        self.threshold
    }

    /// Sets the load threshold from a raw value in tenths.
    ///
    /// Accepts `1` (grow at 10% load) through `10` (grow only once full);
    /// anything else is rejected with [`Error::ThresholdOutOfRange`] and the
    /// threshold is left as it was.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use linear_hash::Error;
    /// # use linear_hash::LinearHashTable;
    /// #
    /// let mut table: LinearHashTable<()> = LinearHashTable::new();
    /// assert!(table.tune_threshold(10).is_ok());
    /// assert_eq!(table.threshold().get(), 10);
    ///
    /// assert_eq!(table.tune_threshold(11), Err(Error::ThresholdOutOfRange(11)));
    /// assert_eq!(table.threshold().get(), 10);
    /// ```
    pub fn tune_threshold(&mut self, threshold: u8) -> Result<(), Error> {
        let threshold = Threshold::new(threshold).inspect_err(|_| {
            warn!(threshold, "threshold must be between 1 and 10 (inclusive)");
        })?;
        self.set_threshold(threshold);
        Ok(())
    }

    /// Sets an already validated load threshold.
    pub fn set_threshold(&mut self, threshold: Threshold) {
        self.threshold = threshold;
    }

    /// Returns a reference to the table's hasher.
    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Removes every entry, keeping the bucket count and threshold.
    ///
    /// Tombstones are cleared as well, so the table behaves exactly like a
    /// freshly created one of the same capacity.
    pub fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            *slot = Slot::Empty;
        }
        self.populated = 0;
        self.tombstones = 0;
    }

    /// Rebuilds the table with exactly `new_size` buckets.
    ///
    /// Every live entry is placed again from its home bucket in the new
    /// array; tombstones are dropped. The table can be grown or shrunk, but
    /// `new_size` must leave at least one bucket free.
    ///
    /// The resize is all-or-nothing: on any error the table is left exactly
    /// as it was.
    ///
    /// # Errors
    ///
    /// - [`Error::ZeroCapacity`] if `new_size` is zero.
    /// - [`Error::CapacityTooSmall`] if `new_size <= len()`.
    /// - [`Error::AllocFailed`] if the new bucket array or its placement plan
    ///   cannot be allocated.
    /// - [`Error::NoFreeSlot`] if some entry could not be placed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use linear_hash::Error;
    /// # use linear_hash::LinearHashTable;
    /// #
    /// let mut table = LinearHashTable::new();
    /// table.insert("a", 1).unwrap();
    /// table.insert("b", 2).unwrap();
    ///
    /// table.resize(3).unwrap();
    /// assert_eq!(table.capacity(), 3);
    /// assert_eq!(table.get("a"), Some(&1));
    ///
    /// assert_eq!(
    ///     table.resize(2),
    ///     Err(Error::CapacityTooSmall {
    ///         requested: 2,
    ///         len: 2
    ///     })
    /// );
    /// assert_eq!(table.capacity(), 3);
    /// ```
    pub fn resize(&mut self, new_size: usize) -> Result<(), Error> {
        if new_size == 0 {
            warn!("asked for a new size of 0");
            return Err(Error::ZeroCapacity);
        }

        if new_size <= self.populated {
            warn!(
                new_size,
                len = self.populated,
                "asked for a new size that cannot hold every entry"
            );
            return Err(Error::CapacityTooSmall {
                requested: new_size,
                len: self.populated,
            });
        }

        debug!(
            from = self.slots.len(),
            to = new_size,
            len = self.populated,
            tombstones = self.tombstones,
            "resizing table"
        );

        let mut new_slots = alloc_slots::<V>(new_size)?;

        // Plan every placement before moving anything so that a failure
        // leaves the old array intact.
        let mut taken = Vec::new();
        let mut moves = Vec::new();
        if taken.try_reserve_exact(new_size).is_err()
            || moves.try_reserve_exact(self.populated).is_err()
        {
            warn!(new_size, "resize scratch allocation failed");
            return Err(Error::AllocFailed);
        }
        taken.resize(new_size, false);
        for (old_index, slot) in self.slots.iter().enumerate() {
            let Some(entry) = slot.as_occupied() else {
                continue;
            };

            let start = home(entry.hash, new_size);
            let Some(new_index) = Probe::new(start, new_size).find(|&index| !taken[index]) else {
                warn!(
                    new_size,
                    key = ?entry.key,
                    "failed to find a slot for an entry, aborting resize"
                );
                return Err(Error::NoFreeSlot);
            };

            taken[new_index] = true;
            moves.push((old_index, new_index));
        }

        for (old_index, new_index) in moves {
            new_slots[new_index] = core::mem::take(&mut self.slots[old_index]);
        }

        self.slots = new_slots;
        self.tombstones = 0;

        debug!(capacity = new_size, len = self.populated, "resized table");
        Ok(())
    }

    /// Returns an iterator over the keys and values in the table.
    ///
    /// The iteration order is unspecified.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use linear_hash::LinearHashTable;
    /// #
    /// let mut table = LinearHashTable::new();
    /// table.insert("a", 1).unwrap();
    /// table.insert("b", 2).unwrap();
    ///
    /// let mut pairs: Vec<_> = table.iter().collect();
    /// pairs.sort();
    /// assert_eq!(pairs, [(&b"a"[..], &1), (&b"b"[..], &2)]);
    /// ```
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            slots: self.slots.iter(),
            remaining: self.populated,
        }
    }

    /// Returns an iterator over the keys in the table.
    pub fn keys(&self) -> impl Iterator<Item = &[u8]> {
        self.iter().map(|(key, _)| key)
    }

    /// Returns an iterator over the values in the table.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, value)| value)
    }

    /// Returns an iterator over mutable references to the values in the
    /// table.
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut V> {
        self.slots
            .iter_mut()
            .filter_map(Slot::as_occupied_mut)
            .map(|entry| &mut entry.data)
    }

    /// Removes every entry, yielding the owned keys and values.
    ///
    /// The bucket array is kept. Entries not consumed before the iterator is
    /// dropped are dropped with it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use linear_hash::LinearHashTable;
    /// #
    /// let mut table = LinearHashTable::new();
    /// table.insert("a", 1).unwrap();
    /// table.insert("b", 2).unwrap();
    /// table.remove("a");
    ///
    /// let drained: Vec<_> = table.drain().collect();
    /// assert_eq!(drained.len(), 1);
    /// assert!(table.is_empty());
    /// assert_eq!(table.tombstones(), 0);
    /// ```
    pub fn drain(&mut self) -> Drain<'_, V, H> {
        Drain {
            table: self,
            slot_index: 0,
        }
    }

    /// Tears the table down, releasing every key and handing the values back
    /// to the caller.
    ///
    /// Dropping the table releases the values as well; use this instead when
    /// the caller keeps ownership of the data.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use linear_hash::LinearHashTable;
    /// #
    /// let mut table = LinearHashTable::new();
    /// table.insert("a", String::from("first")).unwrap();
    ///
    /// let values: Vec<String> = table.into_values().collect();
    /// assert_eq!(values, ["first"]);
    /// ```
    pub fn into_values(self) -> IntoValues<V> {
        IntoValues {
            inner: self.into_iter(),
        }
    }
}

impl<V, H> LinearHashTable<V, H>
where
    H: KeyHasher,
{
    /// Hashes `key` with the table's hasher.
    #[inline]
    pub fn hash_key(&self, key: &[u8]) -> u64 {
        self.hasher.hash_key(key)
    }

    /// Locates the live entry for `key`.
    ///
    /// Steps over tombstones and stops at the first empty bucket, or after
    /// visiting every bucket once.
    fn find_index(&self, hash: u64, key: &[u8]) -> Option<usize> {
        let size = self.slots.len();
        for index in Probe::new(home(hash, size), size) {
            match &self.slots[index] {
                Slot::Empty => {
                    trace!(index, "lookup hit an empty slot");
                    return None;
                }
                Slot::Tombstone => continue,
                Slot::Occupied(entry) if entry.matches(hash, key) => return Some(index),
                Slot::Occupied(_) => continue,
            }
        }

        trace!("lookup visited every slot");
        None
    }

    /// Returns `true` if `key` has a live entry.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use linear_hash::LinearHashTable;
    /// #
    /// let mut table = LinearHashTable::new();
    /// table.insert("a", 1).unwrap();
    /// assert!(table.contains_key("a"));
    /// assert!(!table.contains_key("b"));
    /// ```
    pub fn contains_key(&self, key: impl AsRef<[u8]>) -> bool {
        let key = key.as_ref();
        self.find_index(self.hash_key(key), key).is_some()
    }

    /// Returns a reference to the data stored under `key`.
    pub fn get(&self, key: impl AsRef<[u8]>) -> Option<&V> {
        let key = key.as_ref();
        let index = self.find_index(self.hash_key(key), key)?;
        self.slots[index].as_occupied().map(|entry| &entry.data)
    }

    /// Returns a mutable reference to the data stored under `key`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use linear_hash::LinearHashTable;
    /// #
    /// let mut table = LinearHashTable::new();
    /// table.insert("count", 1).unwrap();
    /// if let Some(count) = table.get_mut("count") {
    ///     *count += 1;
    /// }
    /// assert_eq!(table.get("count"), Some(&2));
    /// ```
    pub fn get_mut(&mut self, key: impl AsRef<[u8]>) -> Option<&mut V> {
        let key = key.as_ref();
        let index = self.find_index(self.hash_key(key), key)?;
        self.slots[index]
            .as_occupied_mut()
            .map(|entry| &mut entry.data)
    }

    /// Returns the stored copy of `key` together with its data.
    pub fn get_key_value(&self, key: impl AsRef<[u8]>) -> Option<(&[u8], &V)> {
        let key = key.as_ref();
        let index = self.find_index(self.hash_key(key), key)?;
        self.slots[index]
            .as_occupied()
            .map(|entry| (entry.key.as_bytes(), &entry.data))
    }

    /// Stores `data` under a copy of `key`.
    ///
    /// Insert never overwrites: if `key` already has a live entry the insert
    /// fails with [`Error::KeyExists`]. Before placing the entry the table
    /// grows to twice its capacity if its [`load`](Self::load) has reached
    /// the threshold. The entry then takes the first bucket at or after its
    /// home that holds no live entry, reusing tombstones.
    ///
    /// On failure the table is unchanged and `data` is handed back inside the
    /// [`InsertError`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use linear_hash::Error;
    /// # use linear_hash::LinearHashTable;
    /// #
    /// let mut table = LinearHashTable::with_capacity(4).unwrap();
    /// for key in ["a", "b", "c"] {
    ///     table.insert(key, ()).unwrap();
    /// }
    /// assert_eq!(table.capacity(), 4);
    ///
    /// // 3 / 4 is at least 60%, so the table doubles before placing "d".
    /// table.insert("d", ()).unwrap();
    /// assert_eq!(table.capacity(), 8);
    /// assert_eq!(table.len(), 4);
    ///
    /// let err = table.insert("d", ()).unwrap_err();
    /// assert_eq!(err.kind, Error::KeyExists);
    /// ```
    pub fn insert(&mut self, key: impl AsRef<[u8]>, data: V) -> Result<(), InsertError<V>> {
        let key = key.as_ref();
        let hash = self.hash_key(key);

        if self.find_index(hash, key).is_some() {
            debug!(key = %key.escape_ascii(), "key already exists in table");
            return Err(InsertError::new(Error::KeyExists, data));
        }

        if self.load() >= usize::from(self.threshold.get()) {
            if let Err(err) = self.grow() {
                warn!(%err, "automatic resize failed");
                return Err(InsertError::new(err, data));
            }
        }

        let size = self.slots.len();
        let Some(index) = find_vacant(&self.slots, home(hash, size)) else {
            warn!(size, "unable to find an insertion slot");
            return Err(InsertError::new(Error::NoFreeSlot, data));
        };

        trace!(index, home = home(hash, size), "inserting entry");

        if self.slots[index].is_tombstone() {
            self.tombstones -= 1;
        }

        self.slots[index] = Slot::Occupied(Occupied {
            hash,
            key: Key::copy_from(key),
            data,
        });
        self.populated += 1;

        Ok(())
    }

    fn grow(&mut self) -> Result<(), Error> {
        let new_size = self
            .slots
            .len()
            .checked_mul(GROWTH_FACTOR)
            .ok_or(Error::Overflow)?;

        debug!(
            load = self.load(),
            threshold = self.threshold.get(),
            new_size,
            "load threshold reached"
        );
        self.resize(new_size)
    }

    /// Replaces the data stored under an existing `key`, returning the
    /// previous data.
    ///
    /// Set never creates an entry: if `key` is absent, `data` is handed back
    /// as `Err(data)` and the table is unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use linear_hash::LinearHashTable;
    /// #
    /// let mut table = LinearHashTable::new();
    /// table.insert("a", 1).unwrap();
    ///
    /// assert_eq!(table.set("a", 2), Ok(1));
    /// assert_eq!(table.get("a"), Some(&2));
    ///
    /// assert_eq!(table.set("b", 3), Err(3));
    /// assert!(!table.contains_key("b"));
    /// ```
    pub fn set(&mut self, key: impl AsRef<[u8]>, data: V) -> Result<V, V> {
        match self.get_mut(key) {
            Some(slot) => Ok(core::mem::replace(slot, data)),
            None => Err(data),
        }
    }

    /// Removes the entry for `key`, returning its data.
    ///
    /// The bucket becomes a tombstone: later lookups step over it and later
    /// inserts may reuse it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use linear_hash::LinearHashTable;
    /// #
    /// let mut table = LinearHashTable::new();
    /// table.insert("a", 1).unwrap();
    ///
    /// assert_eq!(table.remove("a"), Some(1));
    /// assert_eq!(table.remove("a"), None);
    /// assert_eq!(table.tombstones(), 1);
    /// ```
    pub fn remove(&mut self, key: impl AsRef<[u8]>) -> Option<V> {
        self.remove_entry(key).map(|(_, data)| data)
    }

    /// Removes the entry for `key`, returning the stored key and its data.
    pub fn remove_entry(&mut self, key: impl AsRef<[u8]>) -> Option<(Box<[u8]>, V)> {
        let key = key.as_ref();
        let Some(index) = self.find_index(self.hash_key(key), key) else {
            trace!(key = %key.escape_ascii(), "nothing to remove");
            return None;
        };

        let entry = self.slots[index].bury()?;
        self.populated -= 1;
        self.tombstones += 1;

        Some((entry.key.into_bytes(), entry.data))
    }

    /// Returns a histogram of probe lengths, indexed by the distance between
    /// each live entry and its home bucket.
    #[cfg(feature = "stats")]
    pub fn probe_histogram(&self) -> Vec<usize> {
        let size = self.slots.len();
        let mut histogram = Vec::new();
        for (index, slot) in self.slots.iter().enumerate() {
            let Some(entry) = slot.as_occupied() else {
                continue;
            };
            let distance = crate::slot::probe_distance(home(entry.hash, size), index, size);
            if histogram.len() <= distance {
                histogram.resize(distance + 1, 0);
            }
            histogram[distance] += 1;
        }
        histogram
    }

    /// Collects occupancy and probe length statistics.
    #[cfg(feature = "stats")]
    pub fn debug_stats(&self) -> DebugStats {
        let histogram = self.probe_histogram();
        let total_probe: usize = histogram
            .iter()
            .enumerate()
            .map(|(distance, count)| distance * count)
            .sum();

        DebugStats {
            populated: self.populated,
            capacity: self.slots.len(),
            tombstones: self.tombstones,
            empty: self.slots.iter().filter(|slot| slot.is_empty()).count(),
            load_factor: self.populated as f64 / self.slots.len() as f64,
            max_probe: histogram.len().saturating_sub(1),
            mean_probe: if self.populated == 0 {
                0.0
            } else {
                total_probe as f64 / self.populated as f64
            },
        }
    }

    /// Pretty-print the probe length histogram.
    #[cfg(all(feature = "stats", feature = "std"))]
    pub fn print_probe_histogram(&self) {
        let histogram = self.probe_histogram();
        let widest = histogram.iter().copied().max().unwrap_or(0).max(1);

        println!("=== Probe Length Histogram ===");
        for (distance, count) in histogram.iter().enumerate() {
            let bar = "#".repeat(count * 50 / widest);
            println!("{distance:>4}: {count:>8} {bar}");
        }
    }
}

impl<'a, V, H> IntoIterator for &'a LinearHashTable<V, H> {
    type IntoIter = Iter<'a, V>;
    type Item = (&'a [u8], &'a V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<V, H> IntoIterator for LinearHashTable<V, H> {
    type IntoIter = IntoIter<V>;
    type Item = (Box<[u8]>, V);

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            remaining: self.populated,
            slots: self.slots.into_vec().into_iter(),
        }
    }
}

/// An iterator over the entries of a [`LinearHashTable`].
///
/// This struct is created by the [`iter`] method on [`LinearHashTable`].
///
/// [`iter`]: LinearHashTable::iter
pub struct Iter<'a, V> {
    slots: core::slice::Iter<'a, Slot<V>>,
    remaining: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a [u8], &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let entry = self.slots.by_ref().find_map(Slot::as_occupied)?;
        self.remaining -= 1;
        Some((entry.key.as_bytes(), &entry.data))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

/// An owning iterator over the entries of a [`LinearHashTable`].
pub struct IntoIter<V> {
    slots: alloc::vec::IntoIter<Slot<V>>,
    remaining: usize,
}

impl<V> Iterator for IntoIter<V> {
    type Item = (Box<[u8]>, V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let entry = self.slots.by_ref().find_map(|slot| match slot {
            Slot::Occupied(entry) => Some(entry),
            _ => None,
        })?;
        self.remaining -= 1;
        Some((entry.key.into_bytes(), entry.data))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for IntoIter<V> {}

/// An owning iterator over the values of a [`LinearHashTable`].
///
/// This struct is created by the [`into_values`] method on
/// [`LinearHashTable`].
///
/// [`into_values`]: LinearHashTable::into_values
pub struct IntoValues<V> {
    inner: IntoIter<V>,
}

impl<V> Iterator for IntoValues<V> {
    type Item = V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, data)| data)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> ExactSizeIterator for IntoValues<V> {}

/// A draining iterator over the entries of a [`LinearHashTable`].
///
/// This struct is created by the [`drain`] method on [`LinearHashTable`].
/// It yields owned keys and values and leaves every bucket empty once
/// dropped. If the iterator is leaked instead, the entries it has not yet
/// yielded stay reachable and the yielded ones are left as tombstones.
///
/// [`drain`]: LinearHashTable::drain
pub struct Drain<'a, V, H> {
    table: &'a mut LinearHashTable<V, H>,
    slot_index: usize,
}

impl<V, H> Drop for Drain<'_, V, H> {
    fn drop(&mut self) {
        for _ in &mut *self {}

        for slot in self.table.slots.iter_mut() {
            *slot = Slot::Empty;
        }
        self.table.tombstones = 0;
    }
}

impl<V, H> Iterator for Drain<'_, V, H> {
    type Item = (Box<[u8]>, V);

    fn next(&mut self) -> Option<Self::Item> {
        while self.table.populated > 0 && self.slot_index < self.table.slots.len() {
            let slot = &mut self.table.slots[self.slot_index];
            self.slot_index += 1;

            // Tombstone, not Empty: a leaked drain must leave the remaining
            // probe chains intact.
            if let Some(entry) = slot.bury() {
                self.table.populated -= 1;
                self.table.tombstones += 1;
                return Some((entry.key.into_bytes(), entry.data));
            }
        }

        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.table.populated, Some(self.table.populated))
    }
}
