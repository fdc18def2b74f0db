// # daily-core
//
// Core library for the daily puzzle score tracker.
//
// ## Architecture Overview
//
// This library owns the single piece of shared state in the system, the
// best result for the current day, and every rule about it:
// - **RecordStore**: Trait for reading and merging today's record
// - **MemoryRecordStore**: RwLock-guarded in-memory implementation
// - **Clock**: Seam for "today", so the day boundary can be tested
// - **DailyBoard**: Deterministic puzzle layout derived from the date
//
// ## Design Principles
//
// 1. **Library-First**: The HTTP daemon is a thin layer over this crate
// 2. **Lazy Rollover**: No timers; the next request after midnight resets the day
// 3. **Explicit Unset**: Moves and pieces are `Option`, a submitted zero is a result

pub mod board;
pub mod clock;
pub mod config;
pub mod error;
pub mod record;
pub mod store;
pub mod traits;

// Re-export core types for convenience
pub use board::{BoardSize, DailyBoard, Piece};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{BoardConfig, DailyConfig, ServerConfig};
pub use error::{Error, Result};
pub use record::{DailyRecord, GameDate, Scores, Submission};
pub use store::MemoryRecordStore;
pub use traits::RecordStore;
