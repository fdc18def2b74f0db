// # Daily Record
//
// The best result seen for one calendar day, plus the rules for folding a
// new submission into it.
//
// ## Merge Rules
//
// - `score` keeps the highest value submitted
// - `moves` and `pieces` keep the lowest value submitted
// - `moves` and `pieces` start out unset (`None`), so a submitted `0` is a
//   real result and never confused with "nobody has played yet"

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::board::{BoardSize, DailyBoard};

/// A calendar day packed as `YYYYMMDD`
///
/// This is the wire format for dates and the seed for the day's board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameDate(u32);

impl GameDate {
    /// Wrap an already packed value
    pub fn from_packed(packed: u32) -> Self {
        Self(packed)
    }

    /// The packed `YYYYMMDD` value
    pub fn packed(self) -> u32 {
        self.0
    }

    /// Seed for the day's board
    pub fn seed(self) -> u64 {
        u64::from(self.0)
    }

    /// The calendar date, if the packed value names a real day
    pub fn to_naive_date(self) -> Option<NaiveDate> {
        let year = i32::try_from(self.0 / 10_000).ok()?;
        NaiveDate::from_ymd_opt(year, (self.0 / 100) % 100, self.0 % 100)
    }
}

impl From<NaiveDate> for GameDate {
    fn from(date: NaiveDate) -> Self {
        // Years before 0 have no meaning for a daily puzzle
        let year = u32::try_from(date.year()).unwrap_or(0);
        Self(year * 10_000 + date.month() * 100 + date.day())
    }
}

impl fmt::Display for GameDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_naive_date() {
            Some(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            None => write!(f, "{}", self.0),
        }
    }
}

/// One player's result, as posted by a client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Submission {
    pub score: u32,
    pub moves: u32,
    pub pieces: u32,
    /// The day the client believes it played; absent means "today"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<GameDate>,
}

impl Submission {
    /// A submission for whatever day the server considers current
    pub fn new(score: u32, moves: u32, pieces: u32) -> Self {
        Self {
            score,
            moves,
            pieces,
            date: None,
        }
    }

    /// Pin the submission to a specific day
    pub fn with_date(mut self, date: GameDate) -> Self {
        self.date = Some(date);
        self
    }
}

/// The best result for a single day
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyRecord {
    pub date: GameDate,
    pub score: u32,
    pub moves: Option<u32>,
    pub pieces: Option<u32>,
    pub board: DailyBoard,
}

impl DailyRecord {
    /// An empty record for `date`, with that day's board
    pub fn fresh(date: GameDate, size: BoardSize) -> Self {
        Self {
            date,
            score: 0,
            moves: None,
            pieces: None,
            board: DailyBoard::generate(date.seed(), size),
        }
    }

    /// True until the first submission of the day lands
    pub fn is_empty(&self) -> bool {
        self.score == 0 && self.moves.is_none() && self.pieces.is_none()
    }

    /// Take a submission as the day's result outright
    pub fn accept_first(&mut self, submission: &Submission) {
        self.score = submission.score;
        self.moves = Some(submission.moves);
        self.pieces = Some(submission.pieces);
    }

    /// Fold a submission into the record: highest score, fewest moves and pieces
    pub fn absorb(&mut self, submission: &Submission) {
        self.score = self.score.max(submission.score);
        self.moves = Some(min_or_set(self.moves, submission.moves));
        self.pieces = Some(min_or_set(self.pieces, submission.pieces));
    }

    /// Wire view of the record, without the board
    pub fn scores(&self) -> Scores {
        Scores {
            date: self.date,
            score: self.score,
            moves: self.moves,
            pieces: self.pieces,
        }
    }
}

fn min_or_set(current: Option<u32>, submitted: u32) -> u32 {
    match current {
        Some(best) => best.min(submitted),
        None => submitted,
    }
}

/// The scores part of a [`DailyRecord`], as served to clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scores {
    pub date: GameDate,
    pub score: u32,
    pub moves: Option<u32>,
    pub pieces: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> GameDate {
        GameDate::from(NaiveDate::from_ymd_opt(2024, 3, 9).unwrap())
    }

    #[test]
    fn test_game_date_packing() {
        let date = day();
        assert_eq!(date.packed(), 20240309);
        assert_eq!(date.to_naive_date(), NaiveDate::from_ymd_opt(2024, 3, 9));
        assert_eq!(date.to_string(), "2024-03-09");
    }

    #[test]
    fn test_game_date_invalid_packed_value() {
        let bogus = GameDate::from_packed(20241399);
        assert_eq!(bogus.to_naive_date(), None);
        assert_eq!(bogus.to_string(), "20241399");
    }

    #[test]
    fn test_fresh_record_is_empty() {
        let record = DailyRecord::fresh(day(), BoardSize::default());
        assert!(record.is_empty());
        assert_eq!(record.board.len(), 144);
    }

    #[test]
    fn test_absorb_keeps_best_values() {
        let mut record = DailyRecord::fresh(day(), BoardSize::default());
        record.accept_first(&Submission::new(10, 20, 30));

        record.absorb(&Submission::new(5, 25, 12));
        assert_eq!((record.score, record.moves, record.pieces), (10, Some(20), Some(12)));

        record.absorb(&Submission::new(40, 18, 50));
        assert_eq!((record.score, record.moves, record.pieces), (40, Some(18), Some(12)));
    }

    #[test]
    fn test_absorb_accepts_zero_as_real_value() {
        let mut record = DailyRecord::fresh(day(), BoardSize::default());
        record.accept_first(&Submission::new(3, 4, 5));
        record.absorb(&Submission::new(0, 0, 0));

        assert_eq!(record.score, 3);
        assert_eq!(record.moves, Some(0));
        assert_eq!(record.pieces, Some(0));

        record.absorb(&Submission::new(1, 9, 9));
        assert_eq!(record.moves, Some(0));
    }

    #[test]
    fn test_submission_rejects_unknown_fields() {
        let err = serde_json::from_str::<Submission>(
            r#"{"score":1,"moves":2,"pieces":3,"player":"x"}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("unknown field"));
    }

    #[test]
    fn test_submission_optional_date() {
        let sub: Submission =
            serde_json::from_str(r#"{"score":1,"moves":2,"pieces":3,"date":20240309}"#).unwrap();
        assert_eq!(sub.date, Some(day()));

        let sub: Submission = serde_json::from_str(r#"{"score":1,"moves":2,"pieces":3}"#).unwrap();
        assert_eq!(sub.date, None);
    }

    #[test]
    fn test_scores_serialize_unset_as_null() {
        let record = DailyRecord::fresh(day(), BoardSize::default());
        let json = serde_json::to_value(record.scores()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"date": 20240309, "score": 0, "moves": null, "pieces": null})
        );
    }
}
