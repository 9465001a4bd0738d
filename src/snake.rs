// One decision engine per game
//
// A Snake reacts only to the current board state on each move. It keeps the
// states it has seen for the game it is playing, and its own random source,
// seeded when the game starts. Nothing spatial survives from one turn to
// the next.

use log::{debug, info, warn};
use rand::rngs::{OsRng, StdRng};
use rand::{RngCore, SeedableRng, TryRngCore};
use thiserror::Error;

use crate::config::{Config, PerceptionConfig};
use crate::decision::{Decision, DecisionPolicy, Strategy};
use crate::occupancy::classify;
use crate::perception::explore;
use crate::types::{Battlesnake, Board, GameState};

/// Protocol sequencing errors, surfaced to the caller as a rejected request
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    #[error("cannot start a game in progress")]
    GameInProgress,
    #[error("game not started")]
    GameNotStarted,
}

/// Where a game is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    InProgress,
    Ended,
}

/// Supplies seeds for a game's random source
pub trait EntropySource: Send {
    fn seed(&mut self) -> Result<u64, String>;
}

/// Operating system entropy
#[derive(Debug, Default, Clone, Copy)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn seed(&mut self) -> Result<u64, String> {
        OsRng
            .try_next_u64()
            .map_err(|e| format!("OS entropy unavailable: {}", e))
    }
}

/// Always the same seed, for reproducible games
#[derive(Debug, Clone, Copy)]
pub struct FixedSeed(pub u64);

impl EntropySource for FixedSeed {
    fn seed(&mut self) -> Result<u64, String> {
        Ok(self.0)
    }
}

/// Seeds a generator from `source`, falling back to the wall clock
pub fn seed_rng(source: &mut dyn EntropySource) -> StdRng {
    let seed = source.seed().unwrap_or_else(|e| {
        warn!("{}; seeding from the clock", e);
        clock_seed()
    });
    StdRng::seed_from_u64(seed)
}

fn clock_seed() -> u64 {
    let now = chrono::Utc::now();
    now.timestamp_nanos_opt()
        .unwrap_or_else(|| now.timestamp_micros()) as u64
}

/// Runs one turn of perception and decision
pub fn think(
    board: &Board,
    you: &Battlesnake,
    params: &PerceptionConfig,
    policy: &dyn DecisionPolicy,
    rng: &mut dyn RngCore,
) -> Decision {
    let grid = classify(board, you);
    let tree = explore(&grid, you.head, params, rng);
    debug!(
        "{}: {} nodes sensed, root freedom {}",
        policy.name(),
        tree.len(),
        tree.root().freedom
    );
    policy.decide(&tree, you.length, rng)
}

/// A Battlesnake playing a single game
pub struct Snake {
    policy: Box<dyn DecisionPolicy>,
    perception: PerceptionConfig,
    entropy: Box<dyn EntropySource>,
    rng: StdRng,
    phase: Phase,
    current: Option<GameState>,
    history: Vec<GameState>,
}

impl Snake {
    /// Creates a snake playing `strategy`, drawing its seed from `entropy` at start
    pub fn with_entropy(
        strategy: Strategy,
        config: &Config,
        entropy: Box<dyn EntropySource>,
    ) -> Self {
        Snake {
            policy: strategy.build(config),
            perception: config.perception.clone(),
            entropy,
            // Replaced by a real seed in `start`
            rng: StdRng::seed_from_u64(0),
            phase: Phase::NotStarted,
            current: None,
            history: Vec::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Latest state seen, while the game is in progress
    pub fn current(&self) -> Option<&GameState> {
        self.current.as_ref()
    }

    /// States seen before the current one
    pub fn history(&self) -> &[GameState] {
        &self.history
    }

    pub fn start(&mut self, state: &GameState) -> Result<(), SessionError> {
        if self.phase == Phase::InProgress {
            return Err(SessionError::GameInProgress);
        }
        self.rng = seed_rng(self.entropy.as_mut());
        self.phase = Phase::InProgress;
        self.current = Some(state.clone());
        self.history.clear();
        info!("GAME START {} as {}", state.game.id, self.policy.name());
        Ok(())
    }

    /// Decides the move for this turn
    pub fn get_move(&mut self, state: &GameState) -> Result<Decision, SessionError> {
        if self.phase != Phase::InProgress {
            return Err(SessionError::GameNotStarted);
        }
        if let Some(previous) = self.current.replace(state.clone()) {
            self.history.push(previous);
        }

        let decision = think(
            &state.board,
            &state.you,
            &self.perception,
            self.policy.as_ref(),
            &mut self.rng,
        );
        Ok(decision)
    }

    pub fn end(&mut self, state: &GameState) -> Result<(), SessionError> {
        if self.phase != Phase::InProgress {
            return Err(SessionError::GameNotStarted);
        }
        if let Some(previous) = self.current.take() {
            self.history.push(previous);
        }
        self.history.push(state.clone());
        self.phase = Phase::Ended;
        info!(
            "GAME OVER {} after {} turns",
            state.game.id,
            self.history.len()
        );
        Ok(())
    }
}
