//! Shared helpers for record store contract tests
//!
//! Every test builds its own store on a `ManualClock`, so nothing leaks
//! between cases and the calendar only moves when a test says so.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use chrono::NaiveDate;
use daily_core::{BoardSize, Clock, GameDate, ManualClock, MemoryRecordStore};

/// The day most contract tests start on
pub fn start_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 9).expect("valid date")
}

/// A fresh store on `start_day()` with the default 12x12 board
pub fn fresh_store() -> (MemoryRecordStore<ManualClock>, ManualClock) {
    store_with_board(BoardSize::default())
}

/// A fresh store on `start_day()` with a custom board
pub fn store_with_board(size: BoardSize) -> (MemoryRecordStore<ManualClock>, ManualClock) {
    let clock = ManualClock::new(start_day());
    let store = MemoryRecordStore::new(clock.clone(), size);
    (store, clock)
}

/// `start_day()` shifted by `offset` days, as a wire date
pub fn game_date(offset: i64) -> GameDate {
    let day = start_day() + chrono::Duration::days(offset);
    GameDate::from(day)
}

/// `start_day()` shifted by `offset` days
pub fn day(offset: i64) -> NaiveDate {
    start_day() + chrono::Duration::days(offset)
}

/// Clock that answers each call with the next scripted day, then keeps
/// repeating the last one
///
/// Lets a test pin down exactly which day every clock reading sees,
/// including readings that arrive out of order around midnight.
#[derive(Debug)]
pub struct ScriptedClock {
    days: Mutex<VecDeque<NaiveDate>>,
}

impl ScriptedClock {
    pub fn new(days: impl IntoIterator<Item = NaiveDate>) -> Self {
        let days: VecDeque<_> = days.into_iter().collect();
        assert!(!days.is_empty(), "script needs at least one day");
        Self {
            days: Mutex::new(days),
        }
    }
}

impl Clock for ScriptedClock {
    fn today(&self) -> NaiveDate {
        let mut days = self.days.lock().expect("script lock");
        if days.len() > 1 {
            days.pop_front().expect("script is not empty")
        } else {
            days[0]
        }
    }
}
