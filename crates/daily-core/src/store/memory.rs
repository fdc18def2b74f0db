// # Memory Record Store
//
// In-memory implementation of RecordStore.
//
// ## Locking
//
// One `RwLock` guards the record.
//
// - `read` checks staleness under the shared lock. Only when the day has
//   changed does it drop that lock, take the exclusive one, and read the
//   clock again before rolling over, since another task may have won the
//   race.
// - `merge` holds the exclusive lock for the whole
//   check / rollover / merge sequence.
// - The clock is read after the exclusive lock is held, and the record
//   only ever moves forward. A reading older than the stored day is
//   treated as the stored day, so a task that was delayed across midnight
//   cannot reset the new day.

// ## Crash Behavior
//
// - All state is lost on restart
// - The first request after a restart sees an empty record for today

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::board::BoardSize;
use crate::clock::{Clock, SystemClock};
use crate::record::{DailyRecord, GameDate, Submission};
use crate::traits::record_store::RecordStore;

/// In-memory daily record store
///
/// Cloning is cheap and every clone shares the same record.
///
/// # Example
///
/// ```rust
/// use chrono::NaiveDate;
/// use daily_core::clock::ManualClock;
/// use daily_core::{BoardSize, MemoryRecordStore, RecordStore, Submission};
///
/// #[tokio::main]
/// async fn main() {
///     let clock = ManualClock::new(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
///     let store = MemoryRecordStore::new(clock.clone(), BoardSize::default());
///
///     store.merge(Submission::new(50, 12, 3)).await;
///     assert_eq!(store.read().await.score, 50);
///
///     clock.advance_days(1);
///     assert_eq!(store.read().await.score, 0);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct MemoryRecordStore<C = SystemClock> {
    inner: Arc<RwLock<DailyRecord>>,
    clock: C,
    board_size: BoardSize,
}

impl<C: Clock> MemoryRecordStore<C> {
    /// Create a store holding an empty record for today
    pub fn new(clock: C, board_size: BoardSize) -> Self {
        let today = GameDate::from(clock.today());
        info!(date = %today, "Initialized daily record");

        Self {
            inner: Arc::new(RwLock::new(DailyRecord::fresh(today, board_size))),
            clock,
            board_size,
        }
    }

    fn today(&self) -> GameDate {
        GameDate::from(self.clock.today())
    }

    /// Start a new record if the clock has moved past the stored day.
    ///
    /// Caller holds the write lock. Afterwards `record.date` is the day to
    /// merge into.
    fn rollover_locked(&self, record: &mut DailyRecord) -> bool {
        let today = self.today();
        if today <= record.date {
            return false;
        }

        info!(
            previous = %record.date,
            date = %today,
            score = record.score,
            "Day rolled over, resetting daily record"
        );
        *record = DailyRecord::fresh(today, self.board_size);
        true
    }
}

#[async_trait]
impl<C: Clock> RecordStore for MemoryRecordStore<C> {
    async fn read(&self) -> DailyRecord {
        {
            let guard = self.inner.read().await;
            if self.today() <= guard.date {
                return guard.clone();
            }
        }

        let mut guard = self.inner.write().await;
        self.rollover_locked(&mut guard);
        guard.clone()
    }

    async fn merge(&self, submission: Submission) -> DailyRecord {
        let mut guard = self.inner.write().await;

        let rolled_over = self.rollover_locked(&mut guard);
        let today = guard.date;

        if let Some(date) = submission.date
            && date != today
        {
            warn!(
                submitted = %date,
                today = %today,
                "Ignoring submission for another day"
            );
            return guard.clone();
        }

        if rolled_over || guard.is_empty() {
            guard.accept_first(&submission);
        } else {
            guard.absorb(&submission);
        }

        debug!(
            score = guard.score,
            moves = ?guard.moves,
            pieces = ?guard.pieces,
            "Merged submission"
        );
        guard.clone()
    }

    async fn maybe_rollover(&self) -> bool {
        let mut guard = self.inner.write().await;
        self.rollover_locked(&mut guard)
    }
}
