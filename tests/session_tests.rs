// Session lifecycle tests
//
// Every game gets its own engine; sequencing errors are rejected without
// touching any session.

mod common;

use std::sync::Arc;
use std::thread;

use lucky_snake::config::{Config, EndPolicy};
use lucky_snake::decision::Strategy;
use lucky_snake::session::SessionManager;
use lucky_snake::snake::{EntropySource, FixedSeed, SessionError};

fn fixed() -> Box<dyn EntropySource> {
    Box::new(FixedSeed(42))
}

fn manager(end_policy: EndPolicy) -> SessionManager {
    let mut config = Config::default_hardcoded();
    config.session.end_without_game = end_policy;
    SessionManager::with_entropy(Strategy::Lucky, config, fixed)
}

#[test]
fn test_full_game() {
    let sessions = manager(EndPolicy::Accept);
    sessions.start(&common::open_game("g1", 0)).unwrap();
    assert_eq!(sessions.active(), 1);

    for turn in 1..5 {
        let decision = sessions.get_move(&common::open_game("g1", turn)).unwrap();
        assert!(decision.direction().is_some());
    }

    sessions.end(&common::open_game("g1", 5)).unwrap();
    assert_eq!(sessions.active(), 0);
}

#[test]
fn test_move_without_start_is_rejected() {
    let sessions = manager(EndPolicy::Accept);
    assert_eq!(
        sessions.get_move(&common::open_game("g1", 1)),
        Err(SessionError::GameNotStarted)
    );
    assert_eq!(sessions.active(), 0);
}

#[test]
fn test_start_while_in_progress_is_rejected() {
    let sessions = manager(EndPolicy::Accept);
    sessions.start(&common::open_game("g1", 0)).unwrap();
    assert_eq!(
        sessions.start(&common::open_game("g1", 0)),
        Err(SessionError::GameInProgress)
    );
    // The original session keeps playing
    assert!(sessions.get_move(&common::open_game("g1", 1)).is_ok());
}

#[test]
fn test_rejected_start_leaves_running_game_untouched() {
    let sessions = manager(EndPolicy::Accept);
    let untouched = manager(EndPolicy::Accept);
    sessions.start(&common::open_game("g1", 0)).unwrap();
    untouched.start(&common::open_game("g1", 0)).unwrap();

    for turn in 1..10 {
        let state = common::open_game("g1", turn);
        assert_eq!(sessions.start(&state), Err(SessionError::GameInProgress));
        assert_eq!(sessions.get_move(&state), untouched.get_move(&state));
    }
    assert_eq!(sessions.active(), 1);
}

#[test]
fn test_move_after_end_is_rejected() {
    let sessions = manager(EndPolicy::Accept);
    sessions.start(&common::open_game("g1", 0)).unwrap();
    sessions.end(&common::open_game("g1", 1)).unwrap();
    assert_eq!(
        sessions.get_move(&common::open_game("g1", 2)),
        Err(SessionError::GameNotStarted)
    );
}

#[test]
fn test_end_without_game_policy() {
    assert_eq!(manager(EndPolicy::Accept).end(&common::open_game("g1", 0)), Ok(()));
    assert_eq!(
        manager(EndPolicy::Reject).end(&common::open_game("g1", 0)),
        Err(SessionError::GameNotStarted)
    );
}

#[test]
fn test_sessions_are_keyed_by_game_and_player() {
    let sessions = manager(EndPolicy::Reject);
    let mut other_player = common::open_game("g1", 0);
    other_player.you.id = "other".to_string();

    sessions.start(&common::open_game("g1", 0)).unwrap();
    sessions.start(&other_player).unwrap();
    sessions.start(&common::open_game("g2", 0)).unwrap();
    assert_eq!(sessions.active(), 3);

    sessions.end(&other_player).unwrap();
    assert_eq!(sessions.active(), 2);
    assert!(sessions.get_move(&common::open_game("g1", 1)).is_ok());
    assert!(sessions.get_move(&other_player).is_err());
}

#[test]
fn test_same_seed_games_play_the_same() {
    let first = manager(EndPolicy::Accept);
    let second = manager(EndPolicy::Accept);
    first.start(&common::open_game("g1", 0)).unwrap();
    second.start(&common::open_game("g1", 0)).unwrap();

    for turn in 1..10 {
        let state = common::open_game("g1", turn);
        assert_eq!(first.get_move(&state), second.get_move(&state));
    }
}

#[test]
fn test_concurrent_games_do_not_interfere() {
    let sessions = Arc::new(manager(EndPolicy::Reject));

    let handles: Vec<_> = (0..8)
        .map(|g| {
            let sessions = Arc::clone(&sessions);
            thread::spawn(move || {
                let id = format!("game-{}", g);
                sessions.start(&common::open_game(&id, 0)).unwrap();
                for turn in 1..20 {
                    let decision = sessions.get_move(&common::open_game(&id, turn)).unwrap();
                    assert!(decision.direction().is_some());
                }
                sessions.end(&common::open_game(&id, 20)).unwrap();
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(sessions.active(), 0);
}
