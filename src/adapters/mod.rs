//! Adapters for external data sources
//!
//! - [`staging`] - staged bibliographic records (CSV and in-memory)

pub mod staging;
