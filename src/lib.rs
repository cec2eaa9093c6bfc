#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

/// Validated table settings and the table builder.
pub mod config;

/// Error types returned by table operations.
pub mod error;

/// The open-addressing table engine.
pub mod hash_table;

pub mod hasher;

mod slot;

pub use config::Builder;
pub use config::Threshold;
pub use error::Error;
pub use error::InsertError;
pub use hash_table::LinearHashTable;
pub use hasher::Djb2;
pub use hasher::KeyHasher;
