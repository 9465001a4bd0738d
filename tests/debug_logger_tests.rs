// Tests for the JSONL turn log

mod common;

use lucky_snake::debug_logger::{DebugLogger, TurnRecord};
use lucky_snake::decision::{Decision, Reason};
use lucky_snake::types::Direction;

fn temp_log(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("lucky-snake-{}-{}.jsonl", name, std::process::id()))
}

#[tokio::test]
async fn test_records_round_trip_through_the_log() {
    let path = temp_log("round-trip");
    let logger = DebugLogger::new(true, path.to_str().unwrap()).await;
    assert!(logger.is_enabled());

    let state = common::open_game("g", 4);
    let moved = Decision::Move {
        direction: Direction::Up,
        reason: Reason::Wander,
    };
    logger.write(&TurnRecord::new("lucky", &state, &moved)).await;
    logger
        .write(&TurnRecord::new("lucky", &state, &Decision::NoSafeMove))
        .await;

    let contents = std::fs::read_to_string(&path).unwrap();
    let records: Vec<TurnRecord> = contents
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].game_id, "g");
    assert_eq!(records[0].turn, 4);
    assert_eq!(records[0].chosen_move, "up");
    assert_eq!(records[1].chosen_move, "");
    assert_eq!(records[0].you.id, "me");

    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn test_disabled_logger_writes_nothing() {
    let path = temp_log("disabled");
    let logger = DebugLogger::new(false, path.to_str().unwrap()).await;
    assert!(!logger.is_enabled());

    let state = common::open_game("g", 1);
    logger.log_turn(TurnRecord::new("lucky", &state, &Decision::NoSafeMove));
    assert!(!path.exists());
}

#[test]
fn test_log_turn_outside_runtime_is_dropped() {
    let logger = DebugLogger::disabled();
    let state = common::open_game("g", 1);
    // Must not panic without a runtime
    logger.log_turn(TurnRecord::new("lucky", &state, &Decision::NoSafeMove));
}
