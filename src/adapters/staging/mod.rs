//! Staged record access
//!
//! - [`traits::RecordStore`] - the aggregation queries the builder relies on
//! - [`memory::MemoryRecordStore`] - in-memory implementation
//! - [`csv`] - loader filling the store from staging CSV files

pub mod csv;
pub mod memory;
pub mod traits;

pub use memory::MemoryRecordStore;
pub use traits::RecordStore;
