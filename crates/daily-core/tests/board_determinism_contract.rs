//! Contract Test: Daily Board
//!
//! Verifies that the puzzle layout is a pure function of the day.
//!
//! Constraints verified:
//! - Same seed, same board
//! - Board length matches the configured size
//! - Every caller on the same day sees the same board
//! - The board changes with the day

mod common;

use common::*;
use daily_core::{BoardSize, DailyBoard, Piece, RecordStore};

#[test]
fn same_seed_same_board() {
    let size = BoardSize::default();
    let seed = game_date(0).seed();

    assert_eq!(
        DailyBoard::generate(seed, size),
        DailyBoard::generate(seed, size)
    );
}

#[test]
fn board_length_matches_size() {
    let board = DailyBoard::generate(game_date(0).seed(), BoardSize::default());
    assert_eq!(board.len(), 144);

    let size = BoardSize::new(6, 9).expect("valid size");
    let board = DailyBoard::generate(game_date(0).seed(), size);
    assert_eq!(board.len(), 54);
    assert_eq!(board.rows().count(), 6);
}

#[test]
fn board_uses_only_known_pieces() {
    let board = DailyBoard::generate(game_date(0).seed(), BoardSize::default());
    assert!(board.cells().iter().all(|piece| Piece::ALL.contains(piece)));
}

#[test]
fn consecutive_days_get_different_boards() {
    let size = BoardSize::default();
    let boards: Vec<_> = (0..7)
        .map(|offset| DailyBoard::generate(game_date(offset).seed(), size))
        .collect();

    for pair in boards.windows(2) {
        assert_ne!(pair[0], pair[1]);
    }
}

#[tokio::test]
async fn store_board_is_the_days_board() {
    let size = BoardSize::new(4, 4).expect("valid size");
    let (store, clock) = store_with_board(size);

    let record = store.read().await;
    assert_eq!(record.board, DailyBoard::generate(game_date(0).seed(), size));

    clock.advance_days(1);
    let record = store.read().await;
    assert_eq!(record.board, DailyBoard::generate(game_date(1).seed(), size));
}

#[tokio::test]
async fn board_survives_merges() {
    let (store, _clock) = fresh_store();
    let before = store.read().await.board;

    store.merge(daily_core::Submission::new(1, 2, 3)).await;
    assert_eq!(store.read().await.board, before);
}
