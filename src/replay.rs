// Replay module for analyzing logged turns and debugging decision-making
//
// This module provides functionality to:
// 1. Parse JSONL debug logs
// 2. Re-run perception and decision on historical states
// 3. Compare logged vs replayed moves
//
// Moves are partly random, so a replay is seeded per turn and a mismatch
// means "this turn is sensitive to the random walk", not necessarily a bug.

use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::config::Config;
use crate::debug_logger::TurnRecord;
use crate::decision::{Decision, DecisionPolicy, Strategy};
use crate::snake::think;
use crate::types::{Coord, Direction};

/// Loads all records from a JSONL turn log
pub fn load_log_file<P: AsRef<Path>>(log_path: P) -> Result<Vec<TurnRecord>, String> {
    let file =
        File::open(log_path.as_ref()).map_err(|e| format!("Failed to open log file: {}", e))?;

    let reader = BufReader::new(file);
    let mut entries = Vec::new();

    for (line_num, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| format!("Failed to read line {}: {}", line_num + 1, e))?;

        if line.trim().is_empty() {
            continue;
        }

        let entry: TurnRecord = serde_json::from_str(&line)
            .map_err(|e| format!("Failed to parse JSON on line {}: {}", line_num + 1, e))?;

        entries.push(entry);
    }

    info!("Loaded {} log entries", entries.len());
    Ok(entries)
}

/// Our head came back to a cell it occupied a few turns earlier
#[derive(Debug, Clone, PartialEq)]
pub struct Cycle {
    pub game_id: String,
    pub turn: i32,
    pub head: Coord,
    /// Turns since the head was last on this cell
    pub period: i32,
    /// Moves logged from the earlier visit up to this turn
    pub moves: Vec<String>,
}

/// Finds turns where the head revisits a cell within `window` turns
///
/// Records are grouped by game and snake and taken in turn order.
pub fn find_cycles(records: &[TurnRecord], window: i32) -> Vec<Cycle> {
    let mut games: BTreeMap<(&str, &str), Vec<&TurnRecord>> = BTreeMap::new();
    for record in records {
        games
            .entry((record.game_id.as_str(), record.snake.as_str()))
            .or_default()
            .push(record);
    }

    let mut cycles = Vec::new();
    for turns in games.values_mut() {
        turns.sort_by_key(|r| r.turn);
        for (i, record) in turns.iter().enumerate() {
            let earlier = turns[..i]
                .iter()
                .rev()
                .take_while(|prev| record.turn - prev.turn <= window)
                .find(|prev| prev.you.head == record.you.head);
            if let Some(prev) = earlier {
                cycles.push(Cycle {
                    game_id: record.game_id.clone(),
                    turn: record.turn,
                    head: record.you.head,
                    period: record.turn - prev.turn,
                    moves: turns
                        .iter()
                        .filter(|r| r.turn >= prev.turn && r.turn < record.turn)
                        .map(|r| r.chosen_move.clone())
                        .collect(),
                });
            }
        }
    }
    cycles
}

/// Result of replaying a single turn
#[derive(Debug, Clone)]
pub struct ReplayResult {
    pub turn: i32,
    pub original_move: Option<Direction>,
    pub replayed: Decision,
    pub matches: bool,
}

/// Statistics for a complete replay session
#[derive(Debug, Default, PartialEq)]
pub struct ReplayStats {
    pub total_turns: usize,
    pub matches: usize,
    pub mismatches: usize,
    pub match_rate: f64,
}

impl ReplayStats {
    pub fn from_results(results: &[ReplayResult]) -> Self {
        let total_turns = results.len();
        let matches = results.iter().filter(|r| r.matches).count();
        let match_rate = if total_turns == 0 {
            0.0
        } else {
            matches as f64 / total_turns as f64
        };
        ReplayStats {
            total_turns,
            matches,
            mismatches: total_turns - matches,
            match_rate,
        }
    }
}

/// Replay engine for analyzing debug logs
pub struct ReplayEngine {
    config: Config,
    policy: Box<dyn DecisionPolicy>,
    seed: u64,
    verbose: bool,
}

impl ReplayEngine {
    /// Creates a new replay engine playing `strategy`
    pub fn new(config: Config, strategy: Strategy, seed: u64, verbose: bool) -> Self {
        let policy = strategy.build(&config);
        ReplayEngine {
            config,
            policy,
            seed,
            verbose,
        }
    }

    /// Loads all records from a JSONL file
    pub fn load_log_file<P: AsRef<Path>>(&self, log_path: P) -> Result<Vec<TurnRecord>, String> {
        load_log_file(log_path)
    }

    /// Re-runs the engine on one logged turn
    pub fn replay_turn(&self, entry: &TurnRecord) -> Decision {
        let mut rng = StdRng::seed_from_u64(self.seed.wrapping_add(entry.turn as u64));
        think(
            &entry.board,
            &entry.you,
            &self.config.perception,
            self.policy.as_ref(),
            &mut rng,
        )
    }

    /// Replays a single log entry and compares the result
    pub fn replay_entry(&self, entry: &TurnRecord) -> Result<ReplayResult, String> {
        let original_move = if entry.chosen_move.is_empty() {
            None
        } else {
            Some(entry.chosen_move.parse::<Direction>()?)
        };

        let replayed = self.replay_turn(entry);
        let matches = original_move == replayed.direction();

        if self.verbose {
            if matches {
                info!("Turn {}: MATCH - {:?}", entry.turn, replayed);
            } else {
                warn!(
                    "Turn {}: MISMATCH - Original: {:?}, Replayed: {:?}",
                    entry.turn, original_move, replayed
                );
            }
        }

        Ok(ReplayResult {
            turn: entry.turn,
            original_move,
            replayed,
            matches,
        })
    }

    /// Replays every entry, or only those whose turn is listed in `turns`
    pub fn replay_all(
        &self,
        entries: &[TurnRecord],
        turns: Option<&[i32]>,
    ) -> Result<Vec<ReplayResult>, String> {
        entries
            .iter()
            .filter(|e| turns.map_or(true, |t| t.contains(&e.turn)))
            .map(|e| self.replay_entry(e))
            .collect()
    }
}
