//! Storage adapters implementing the domain ports.
//!
//! The in-memory adapters back the default CLI mode and the unit tests. The
//! RocksDB adapter is compiled in only when the `storage-rocksdb` feature is
//! enabled and gives the machine a depot and order log that survive restarts.

pub mod in_memory;
#[cfg(feature = "storage-rocksdb")]
pub mod rocksdb;
pub mod seed;
