//! Key hashing strategies.
//!
//! Every table operation starts by turning the key bytes into a `u64`. The
//! default strategy is [`Djb2`], which is deterministic across runs and
//! platforms. Other strategies can be plugged in through [`KeyHasher`].

/// Hashes raw key bytes into a 64-bit value.
///
/// Implementations must be pure functions of the byte content: two calls with
/// equal slices must return the same hash for the lifetime of the table.
///
/// Any `Fn(&[u8]) -> u64` closure implements this trait.
///
/// # Examples
///
/// ```rust
/// use linear_hash::KeyHasher;
/// use linear_hash::LinearHashTable;
///
/// // A deliberately terrible strategy, every key lands in the same bucket.
/// let constant = |_: &[u8]| 7u64;
/// assert_eq!(constant.hash_key(b"anything"), 7);
///
/// let mut table = LinearHashTable::with_capacity_and_hasher(8, constant).unwrap();
/// table.insert("a", 1).unwrap();
/// table.insert("b", 2).unwrap();
/// assert_eq!(table.get("b"), Some(&2));
/// ```
pub trait KeyHasher {
    /// Returns the hash of `key`.
    fn hash_key(&self, key: &[u8]) -> u64;
}

impl<F> KeyHasher for F
where
    F: Fn(&[u8]) -> u64,
{
    #[inline]
    fn hash_key(&self, key: &[u8]) -> u64 {
        self(key)
    }
}

/// Computes the djb2 hash of `key`.
///
/// Accumulates `h = h * 33 + byte` over every byte starting from `0`. The
/// arithmetic wraps on overflow.
///
/// # Examples
///
/// ```rust
/// use linear_hash::hasher::djb2;
///
/// assert_eq!(djb2(b""), 0);
/// assert_eq!(djb2(b"a"), 97);
/// assert_eq!(djb2(b"ab"), 97 * 33 + 98);
/// ```
#[inline]
pub fn djb2(key: &[u8]) -> u64 {
    key.iter().fold(0u64, |hash, &byte| {
        (hash << 5).wrapping_add(hash).wrapping_add(u64::from(byte))
    })
}

/// The default hashing strategy, see [`djb2`].
///
/// A hash of `0` carries no special meaning; the empty key hashes to `0` and
/// is stored like any other key.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Djb2;

impl KeyHasher for Djb2 {
    #[inline]
    fn hash_key(&self, key: &[u8]) -> u64 {
        djb2(key)
    }
}

/// A seeded strategy backed by [`foldhash`].
///
/// Trades the cross-platform stability of [`Djb2`] for far better
/// distribution on adversarial or highly regular keys.
///
/// # Examples
///
/// ```rust
/// use linear_hash::LinearHashTable;
/// use linear_hash::hasher::FoldHasher;
///
/// let mut table = LinearHashTable::with_capacity_and_hasher(16, FoldHasher::with_seed(42)).unwrap();
/// table.insert("key", 1).unwrap();
/// assert_eq!(table.get("key"), Some(&1));
/// ```
#[cfg(feature = "foldhash")]
#[derive(Debug, Clone)]
pub struct FoldHasher {
    state: foldhash::fast::FixedState,
}

#[cfg(feature = "foldhash")]
impl FoldHasher {
    /// Creates a strategy seeded with `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            state: foldhash::fast::FixedState::with_seed(seed),
        }
    }
}

#[cfg(feature = "foldhash")]
impl Default for FoldHasher {
    fn default() -> Self {
        Self {
            state: foldhash::fast::FixedState::default(),
        }
    }
}

#[cfg(feature = "foldhash")]
impl KeyHasher for FoldHasher {
    #[inline]
    fn hash_key(&self, key: &[u8]) -> u64 {
        use core::hash::BuildHasher;
        use core::hash::Hasher;

        let mut hasher = self.state.build_hasher();
        hasher.write(key);
        hasher.finish()
    }
}
