use core::fmt;
use core::fmt::Debug;
use core::fmt::Display;

/// The ways a table operation can refuse to happen.
///
/// A missing key is not an error; lookups report it as `None`. Every
/// operation that returns an `Error` leaves the table exactly as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// A table cannot have zero buckets.
    ZeroCapacity,
    /// The requested bucket count does not leave at least one free slot for
    /// the live entries.
    CapacityTooSmall {
        /// The bucket count that was asked for.
        requested: usize,
        /// The number of live entries at the time of the request.
        len: usize,
    },
    /// The load threshold must lie in `1..=10`.
    ThresholdOutOfRange(u8),
    /// `insert` never overwrites; the key is already live in the table.
    KeyExists,
    /// A full wraparound probe found no slot to place an entry in.
    NoFreeSlot,
    /// Growing the table would overflow `usize`.
    Overflow,
    /// The allocator could not provide a new bucket array.
    AllocFailed,
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ZeroCapacity => f.write_str("capacity must be greater than zero"),
            Error::CapacityTooSmall { requested, len } => write!(
                f,
                "capacity {requested} cannot hold {len} entries with a free slot to spare"
            ),
            Error::ThresholdOutOfRange(value) => {
                write!(f, "threshold {value} is outside of 1..=10")
            }
            Error::KeyExists => f.write_str("key already exists in table"),
            Error::NoFreeSlot => f.write_str("unable to find a free slot"),
            Error::Overflow => f.write_str("capacity overflow"),
            Error::AllocFailed => f.write_str("bucket array allocation failed"),
        }
    }
}

impl core::error::Error for Error {}

/// A failed [`insert`], carrying the rejected data back to the caller.
///
/// [`insert`]: crate::LinearHashTable::insert
#[derive(Clone, PartialEq, Eq)]
pub struct InsertError<V> {
    /// Why the insert was rejected.
    pub kind: Error,
    /// The data that was not stored.
    pub data: V,
}

impl<V> InsertError<V> {
    pub(crate) fn new(kind: Error, data: V) -> Self {
        Self { kind, data }
    }

    /// Returns the data that was not stored.
    pub fn into_data(self) -> V {
        self.data
    }
}

impl<V> Debug for InsertError<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InsertError")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

impl<V> Display for InsertError<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "insert failed: {}", self.kind)
    }
}

impl<V> core::error::Error for InsertError<V> {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        Some(&self.kind)
    }
}

impl<V> From<InsertError<V>> for Error {
    fn from(err: InsertError<V>) -> Self {
        err.kind
    }
}
