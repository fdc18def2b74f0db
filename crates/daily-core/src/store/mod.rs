// # Record Store Implementations
//
// Only an in-memory store exists: the daily record is deliberately not
// persisted across restarts.

pub mod memory;

pub use memory::MemoryRecordStore;
