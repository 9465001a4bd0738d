// Configuration module for reading Snake.toml
// This module provides OOP-style configuration management for the snake farm

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::decision::Strategy;

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub perception: PerceptionConfig,
    pub weighted: WeightedConfig,
    pub session: SessionConfig,
    pub appearance: AppearanceConfig,
    pub snakes: Vec<SnakeMount>,
    pub debug: DebugConfig,
}

/// Limits and ranges of the board sensing walk
#[derive(Debug, Deserialize, Clone)]
pub struct PerceptionConfig {
    /// Longest ancestor chain a node may have
    pub max_depth: usize,
    /// Expansions allowed per coordinate before it stops spawning nodes
    pub visit_cap: u32,
    /// Food is worth treking across the board for, use a longer range
    pub food_scent_range: usize,
    /// Hazards only matter when they are close
    pub hazard_scent_range: usize,
}

/// Weights for the single-sum scorer
#[derive(Debug, Deserialize, Clone)]
pub struct WeightedConfig {
    pub weight_yum: f64,
    pub weight_freedom: f64,
    pub weight_yuck: f64,
}

/// What to do when /end arrives for a game with no live session
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EndPolicy {
    /// Treat it as already ended
    Accept,
    /// Reject it as a sequencing error
    Reject,
}

/// Session lifecycle behavior
#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    pub end_without_game: EndPolicy,
}

/// Customization returned from GET /
#[derive(Debug, Deserialize, Clone)]
pub struct AppearanceConfig {
    pub author: String,
    pub color: String,
    pub head: String,
    pub tail: String,
    pub version: String,
}

/// One snake served by this process, mounted at /<path>
#[derive(Debug, Deserialize, Clone)]
pub struct SnakeMount {
    pub path: String,
    pub strategy: Strategy,
}

/// Debug configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DebugConfig {
    pub enabled: bool,
    pub log_file_path: String,
}

impl Config {
    /// Loads configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the Snake.toml configuration file
    ///
    /// # Returns
    /// * `Result<Config, String>` - Parsed configuration or error message
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        Self::from_toml(&contents)
    }

    /// Parses configuration from TOML text
    pub fn from_toml(contents: &str) -> Result<Self, String> {
        let config: Config =
            toml::from_str(contents).map_err(|e| format!("Failed to parse config file: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads default configuration from Snake.toml in the project root
    pub fn load_default() -> Result<Self, String> {
        Self::from_file("Snake.toml")
    }

    /// Rejects values the engine cannot work with
    fn validate(&self) -> Result<(), String> {
        if self.perception.max_depth == 0 {
            return Err("perception.max_depth must be at least 1".to_string());
        }
        if self.perception.visit_cap == 0 {
            return Err("perception.visit_cap must be at least 1".to_string());
        }
        for mount in &self.snakes {
            if mount.path.is_empty() || mount.path.contains('/') {
                return Err(format!("Invalid snake path '{}'", mount.path));
            }
        }
        Ok(())
    }

    /// Creates a configuration with hardcoded default values as fallback
    /// This should match the constants defined in Snake.toml
    pub fn default_hardcoded() -> Self {
        Config {
            perception: PerceptionConfig {
                max_depth: 12,
                visit_cap: 2,
                food_scent_range: 10,
                hazard_scent_range: 2,
            },
            weighted: WeightedConfig {
                weight_yum: 1.0,
                weight_freedom: 0.1,
                weight_yuck: 5.0,
            },
            session: SessionConfig {
                end_without_game: EndPolicy::Accept,
            },
            appearance: AppearanceConfig {
                author: "cmars".to_string(),
                color: "#00DEAD".to_string(),
                head: "default".to_string(),
                tail: "default".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            snakes: vec![
                SnakeMount {
                    path: "lucky".to_string(),
                    strategy: Strategy::Lucky,
                },
                SnakeMount {
                    path: "luckydocile".to_string(),
                    strategy: Strategy::Docile,
                },
            ],
            debug: DebugConfig {
                enabled: false,
                log_file_path: "battlesnake_debug.jsonl".to_string(),
            },
        }
    }

    /// Attempts to load from file, falls back to hardcoded defaults on error
    pub fn load_or_default() -> Self {
        Self::load_default().unwrap_or_else(|e| {
            log::warn!("Could not load Snake.toml ({}), using hardcoded defaults", e);
            Self::default_hardcoded()
        })
    }
}
