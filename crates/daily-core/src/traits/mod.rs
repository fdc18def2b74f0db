//! Core traits for the daily score tracker
//!
//! - [`RecordStore`]: Read and merge the current day's record
//! - [`Clock`]: Source of "today" for the store

pub mod record_store;

pub use crate::clock::Clock;
pub use record_store::RecordStore;
