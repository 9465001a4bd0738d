// Move selection
//
// A policy looks only at the four first steps out of the sensing tree.
// The default policy is a ladder of drives, in descending order of
// precedence:
// - Survival (avoid walls, snakes, and obvious tight spaces)
// - Strike prey if immediately adjacent
// - Seek food
// - Seek freedom, if there is a strongly discernable difference.
//   Otherwise, wander in a random direction, away from hazards if possible.

use std::cmp::Reverse;
use std::fmt;

use log::warn;
use rand::seq::{IndexedRandom, SliceRandom};
use rand::RngCore;
use serde::Deserialize;

use crate::config::Config;
use crate::perception::Perception;
use crate::types::Direction;

/// A first step out of the head and the signals found behind it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub direction: Direction,
    pub yum: u32,
    pub freedom: u32,
    pub yuck: u32,
    pub can_strike: bool,
}

/// Which drive settled the move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    Strike,
    Food,
    Freedom,
    Wander,
    Random,
    Weighted,
}

/// Outcome of one turn's decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Move { direction: Direction, reason: Reason },
    /// Nothing passed the survivability filter
    NoSafeMove,
}

impl Decision {
    pub fn direction(&self) -> Option<Direction> {
        match self {
            Decision::Move { direction, .. } => Some(*direction),
            Decision::NoSafeMove => None,
        }
    }

    /// Direction label for the wire; empty when there is no safe move
    pub fn as_str(&self) -> &'static str {
        self.direction().map(|d| d.as_str()).unwrap_or("")
    }
}

/// Every first step the tree holds, in up, down, left, right order
pub fn first_steps(tree: &Perception) -> Vec<Candidate> {
    Direction::all()
        .iter()
        .filter_map(|&direction| {
            tree.first_step(direction).map(|node| Candidate {
                direction,
                yum: node.yum,
                freedom: node.freedom,
                yuck: node.yuck,
                can_strike: node.can_strike,
            })
        })
        .collect()
}

/// First steps with more room behind them than our own length
///
/// This doesn't account for growth in a tight space, or a retreating tail.
pub fn survivable(tree: &Perception, length: i32) -> Vec<Candidate> {
    first_steps(tree)
        .into_iter()
        .filter(|c| i64::from(c.freedom) > i64::from(length))
        .collect()
}

/// Chooses a direction from a sensing tree
pub trait DecisionPolicy: Send {
    fn name(&self) -> &'static str;

    fn decide(&self, tree: &Perception, length: i32, rng: &mut dyn RngCore) -> Decision;
}

/// Strategies that can be mounted in Snake.toml
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// The full ladder of drives
    Lucky,
    /// The ladder without striking at prey
    Docile,
    /// Any passable first step
    Random,
    /// Single weighted sum of the signals
    Weighted,
}

impl Strategy {
    pub fn build(&self, config: &Config) -> Box<dyn DecisionPolicy> {
        let food_threshold = config.perception.food_scent_range as u32;
        match self {
            Strategy::Lucky => Box::new(Ladder {
                strike: true,
                food_threshold,
            }),
            Strategy::Docile => Box::new(Ladder {
                strike: false,
                food_threshold,
            }),
            Strategy::Random => Box::new(RandomWalk),
            Strategy::Weighted => Box::new(WeightedSum {
                weight_yum: config.weighted.weight_yum,
                weight_freedom: config.weighted.weight_freedom,
                weight_yuck: config.weighted.weight_yuck,
            }),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::Lucky => "lucky",
            Strategy::Docile => "docile",
            Strategy::Random => "random",
            Strategy::Weighted => "weighted",
        };
        f.write_str(name)
    }
}

/// Precedence ladder: strike, food, freedom, then a hazard-shy wander
#[derive(Debug, Clone)]
pub struct Ladder {
    /// Whether adjacent prey is struck
    pub strike: bool,
    /// Yum needed before food outranks freedom
    pub food_threshold: u32,
}

impl DecisionPolicy for Ladder {
    fn name(&self) -> &'static str {
        if self.strike {
            "lucky"
        } else {
            "docile"
        }
    }

    fn decide(&self, tree: &Perception, length: i32, rng: &mut dyn RngCore) -> Decision {
        self.choose(survivable(tree, length), length, rng)
    }
}

impl Ladder {
    /// Applies the ladder to already filtered candidates
    pub fn choose(
        &self,
        mut moves: Vec<Candidate>,
        length: i32,
        rng: &mut dyn RngCore,
    ) -> Decision {
        if moves.is_empty() {
            warn!("out of moves!");
            return Decision::NoSafeMove;
        }

        if self.strike {
            if let Some(m) = moves.iter().find(|m| m.can_strike) {
                return Decision::Move {
                    direction: m.direction,
                    reason: Reason::Strike,
                };
            }
        }

        // Strict comparisons keep the earliest candidate on ties
        let mut yummiest = moves[0];
        let mut freest = moves[0];
        let mut min_free = moves[0].freedom;
        for m in &moves[1..] {
            if m.yum > yummiest.yum {
                yummiest = *m;
            }
            if m.freedom > freest.freedom {
                freest = *m;
            }
            min_free = min_free.min(m.freedom);
        }

        // Prefer the yummiest direction
        if yummiest.yum >= self.food_threshold {
            return Decision::Move {
                direction: yummiest.direction,
                reason: Reason::Food,
            };
        }

        // Without a strong food signal, aim for a clearly more open space.
        if i64::from(freest.freedom - min_free) > i64::from(length / 2) {
            return Decision::Move {
                direction: freest.direction,
                reason: Reason::Freedom,
            };
        }

        // Otherwise, mix it up, so we don't get stuck in circles.
        moves.shuffle(rng);
        moves.sort_by_key(|m| Reverse(m.yuck));
        let last = moves[moves.len() - 1];
        Decision::Move {
            direction: last.direction,
            reason: Reason::Wander,
        }
    }
}

/// Picks any first step that doesn't end the game outright
#[derive(Debug, Clone, Copy)]
pub struct RandomWalk;

impl DecisionPolicy for RandomWalk {
    fn name(&self) -> &'static str {
        "random"
    }

    fn decide(&self, tree: &Perception, _length: i32, rng: &mut dyn RngCore) -> Decision {
        match first_steps(tree).choose(rng) {
            Some(m) => Decision::Move {
                direction: m.direction,
                reason: Reason::Random,
            },
            None => {
                warn!("out of moves!");
                Decision::NoSafeMove
            }
        }
    }
}

/// Scores every survivable step with one weighted sum
#[derive(Debug, Clone)]
pub struct WeightedSum {
    pub weight_yum: f64,
    pub weight_freedom: f64,
    pub weight_yuck: f64,
}

impl WeightedSum {
    pub fn score(&self, m: &Candidate) -> f64 {
        self.weight_yum * f64::from(m.yum) + self.weight_freedom * f64::from(m.freedom)
            - self.weight_yuck * f64::from(m.yuck)
    }

    /// Highest scoring candidate, the earliest on ties
    pub fn choose(&self, moves: Vec<Candidate>) -> Decision {
        let mut best: Option<(Candidate, f64)> = None;
        for m in moves {
            let score = self.score(&m);
            match best {
                Some((_, top)) if score <= top => {}
                _ => best = Some((m, score)),
            }
        }

        match best {
            Some((m, _)) => Decision::Move {
                direction: m.direction,
                reason: Reason::Weighted,
            },
            None => {
                warn!("out of moves!");
                Decision::NoSafeMove
            }
        }
    }
}

impl DecisionPolicy for WeightedSum {
    fn name(&self) -> &'static str {
        "weighted"
    }

    fn decide(&self, tree: &Perception, length: i32, _rng: &mut dyn RngCore) -> Decision {
        self.choose(survivable(tree, length))
    }
}
