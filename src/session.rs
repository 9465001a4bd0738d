// Per-game session bookkeeping
//
// Each game (keyed by game id + our snake id) gets its own Snake. The map
// lock is only held to look a session up, so a slow decision in one game
// never holds up the others. Requests for the same game arrive one at a
// time from the game host.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use log::warn;
use parking_lot::Mutex;

use crate::config::{Config, EndPolicy};
use crate::decision::{Decision, Strategy};
use crate::snake::{EntropySource, OsEntropy, SessionError, Snake};
use crate::types::GameState;

/// Produces the entropy source for each new game
pub type EntropyFactory = fn() -> Box<dyn EntropySource>;

fn os_entropy() -> Box<dyn EntropySource> {
    Box::new(OsEntropy)
}

pub struct SessionManager {
    strategy: Strategy,
    config: Config,
    entropy: EntropyFactory,
    sessions: Mutex<HashMap<String, Arc<Mutex<Snake>>>>,
}

impl SessionManager {
    pub fn new(strategy: Strategy, config: Config) -> Self {
        Self::with_entropy(strategy, config, os_entropy)
    }

    pub fn with_entropy(strategy: Strategy, config: Config, entropy: EntropyFactory) -> Self {
        SessionManager {
            strategy,
            config,
            entropy,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Number of games currently in progress
    pub fn active(&self) -> usize {
        self.sessions.lock().len()
    }

    pub fn start(&self, state: &GameState) -> Result<(), SessionError> {
        let key = state.session_key();
        // Seeding may block on the OS, so it happens before taking the map lock
        let mut snake = Snake::with_entropy(self.strategy, &self.config, (self.entropy)());
        snake.start(state)?;

        match self.sessions.lock().entry(key) {
            Entry::Occupied(entry) => {
                warn!("Rejected start for game in progress: {}", entry.key());
                Err(SessionError::GameInProgress)
            }
            Entry::Vacant(entry) => {
                entry.insert(Arc::new(Mutex::new(snake)));
                Ok(())
            }
        }
    }

    pub fn get_move(&self, state: &GameState) -> Result<Decision, SessionError> {
        let key = state.session_key();
        let snake = self.sessions.lock().get(&key).cloned();
        match snake {
            Some(snake) => snake.lock().get_move(state),
            None => {
                warn!("Rejected move for game not started: {}", key);
                Err(SessionError::GameNotStarted)
            }
        }
    }

    /// Ends the game and releases its session
    pub fn end(&self, state: &GameState) -> Result<(), SessionError> {
        let key = state.session_key();
        let snake = self.sessions.lock().remove(&key);
        match snake {
            Some(snake) => snake.lock().end(state),
            None => match self.config.session.end_without_game {
                EndPolicy::Accept => Ok(()),
                EndPolicy::Reject => {
                    warn!("Rejected end for game not started: {}", key);
                    Err(SessionError::GameNotStarted)
                }
            },
        }
    }
}
