use core::fmt;
use core::fmt::Display;

use crate::error::Error;
use crate::hash_table::LinearHashTable;
use crate::hasher::Djb2;
use crate::hasher::KeyHasher;

// -----------------------------------------------------------------------------
// Defaults
// -----------------------------------------------------------------------------

/// Number of buckets a table starts with when none is requested.
pub const DEFAULT_CAPACITY: usize = 32;

/// Factor the bucket count is multiplied by on automatic growth.
pub const GROWTH_FACTOR: usize = 2;

// -----------------------------------------------------------------------------
// Threshold
// -----------------------------------------------------------------------------

/// The load, in tenths, at which an insert doubles the table first.
///
/// Load is measured as `len * 10 / capacity` using integer division, so a
/// threshold of `6` grows the table once it is at least 60% full, and `10`
/// only grows it once every bucket is taken.
///
/// # Examples
///
/// ```rust
/// use linear_hash::Threshold;
///
/// assert_eq!(Threshold::default().get(), 6);
/// assert!(Threshold::new(10).is_ok());
/// assert!(Threshold::new(0).is_err());
/// assert!(Threshold::new(11).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Threshold(u8);

impl Threshold {
    /// The lowest accepted threshold, 10%.
    pub const MIN: Self = Self(1);

    /// The highest accepted threshold, 100%.
    pub const MAX: Self = Self(10);

    /// The default threshold, 60%.
    pub const DEF: Self = Self(6);

    /// Validates `value` against `1..=10`.
    pub const fn new(value: u8) -> Result<Self, Error> {
        if value < Self::MIN.0 || value > Self::MAX.0 {
            return Err(Error::ThresholdOutOfRange(value));
        }

        Ok(Self(value))
    }

    /// Returns the threshold in tenths.
    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl Default for Threshold {
    #[inline]
    fn default() -> Self {
        Self::DEF
    }
}

impl TryFrom<u8> for Threshold {
    type Error = Error;

    #[inline]
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", u32::from(self.0) * 10)
    }
}

// -----------------------------------------------------------------------------
// Builder
// -----------------------------------------------------------------------------

/// Configures and creates a [`LinearHashTable`].
///
/// All settings are validated in [`build`](Builder::build), before anything
/// is allocated.
///
/// # Examples
///
/// ```rust
/// use linear_hash::Builder;
/// use linear_hash::LinearHashTable;
///
/// let table: LinearHashTable<u32> = Builder::new().capacity(4).threshold(10).build().unwrap();
/// assert_eq!(table.capacity(), 4);
/// assert_eq!(table.threshold().get(), 10);
///
/// assert!(Builder::new().capacity(0).build::<u32>().is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Builder<H = Djb2> {
    capacity: usize,
    threshold: u8,
    hasher: H,
}

impl Builder<Djb2> {
    /// Starts from the defaults: 32 buckets, a 60% threshold, and [`Djb2`].
    pub fn new() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            threshold: Threshold::DEF.get(),
            hasher: Djb2,
        }
    }
}

impl Default for Builder<Djb2> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> Builder<H>
where
    H: KeyHasher,
{
    /// Sets the initial number of buckets.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the load threshold in tenths, see [`Threshold`].
    pub fn threshold(mut self, threshold: u8) -> Self {
        self.threshold = threshold;
        self
    }

    /// Replaces the hashing strategy.
    pub fn hasher<H2>(self, hasher: H2) -> Builder<H2>
    where
        H2: KeyHasher,
    {
        Builder {
            capacity: self.capacity,
            threshold: self.threshold,
            hasher,
        }
    }

    /// Validates the configuration and creates an empty table.
    pub fn build<V>(self) -> Result<LinearHashTable<V, H>, Error> {
        let threshold = Threshold::new(self.threshold)?;
        let mut table = LinearHashTable::with_capacity_and_hasher(self.capacity, self.hasher)?;
        table.set_threshold(threshold);
        Ok(table)
    }
}
