// # Record Store Trait
//
// Defines the interface the HTTP layer uses to reach the daily record.
//
// ## Purpose
//
// The store owns the single live `DailyRecord` and every rule about it:
// - Detecting that the day has rolled over
// - Resetting the record for the new day
// - Folding submissions into the day's best result
//
// Callers only ever see snapshots; they never hold a reference into the
// live record.
//
// ## Usage
//
// ```rust
// use daily_core::{BoardSize, MemoryRecordStore, RecordStore, Submission, SystemClock};
//
// #[tokio::main]
// async fn main() {
//     let store = MemoryRecordStore::new(SystemClock::Local, BoardSize::default());
//
//     let merged = store.merge(Submission::new(120, 30, 4)).await;
//     let current = store.read().await;
//     assert_eq!(merged.score, current.score);
// }
// ```

use async_trait::async_trait;

use crate::record::{DailyRecord, Submission};

/// Trait for daily record store implementations
///
/// # Thread Safety
///
/// All methods must be safe to call concurrently from multiple tasks. A
/// merge must never interleave with another merge or with a rollover.
///
/// # Failure
///
/// None of the operations can fail. Input validation belongs to the
/// caller; by the time a [`Submission`] exists it is well-typed.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Snapshot of today's record
    ///
    /// Rolls the record over first if it belongs to another day, so this
    /// may mutate state even though it is a read.
    async fn read(&self) -> DailyRecord;

    /// Merge a submission into today's record and return the result
    ///
    /// A submission dated for a different day is ignored and today's
    /// record is returned unchanged.
    async fn merge(&self, submission: Submission) -> DailyRecord;

    /// Reset the record if the day has changed
    ///
    /// # Returns
    ///
    /// - `true`: the record was stale and has been replaced
    /// - `false`: the record was already current (no-op)
    async fn maybe_rollover(&self) -> bool;
}
