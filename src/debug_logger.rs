// Debug logging module for asynchronous game state logging
//
// This module provides fire-and-forget async logging to avoid blocking
// the main request/response cycle. Each turn's state is written to a JSONL file.

use log::{error, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::decision::Decision;
use crate::types::{Battlesnake, Board, GameState};

/// A single decided turn, one per line of the log file
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TurnRecord {
    pub game_id: String,
    pub snake: String,
    pub turn: i32,
    /// Empty when no safe move was found
    pub chosen_move: String,
    pub you: Battlesnake,
    pub board: Board,
    pub timestamp: String,
}

impl TurnRecord {
    pub fn new(snake: &str, state: &GameState, decision: &Decision) -> Self {
        TurnRecord {
            game_id: state.game.id.clone(),
            snake: snake.to_string(),
            turn: state.turn,
            chosen_move: decision.as_str().to_string(),
            you: state.you.clone(),
            board: state.board.clone(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Shared debug logger state
/// Uses Arc<Mutex<File>> to allow concurrent async writes from multiple tasks
#[derive(Clone)]
pub struct DebugLogger {
    file: Arc<Mutex<Option<File>>>,
    enabled: bool,
}

impl DebugLogger {
    /// Creates a new debug logger
    /// If enabled is true, initializes the log file (truncating if it exists)
    pub async fn new(enabled: bool, log_file_path: &str) -> Self {
        if !enabled {
            return Self::disabled();
        }

        match OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_file_path)
            .await
        {
            Ok(file) => {
                log::info!("Debug logging enabled: {}", log_file_path);
                DebugLogger {
                    file: Arc::new(Mutex::new(Some(file))),
                    enabled: true,
                }
            }
            Err(e) => {
                error!("Failed to create debug log file '{}': {}", log_file_path, e);
                Self::disabled()
            }
        }
    }

    /// Creates a disabled debug logger (no-op)
    pub fn disabled() -> Self {
        DebugLogger {
            file: Arc::new(Mutex::new(None)),
            enabled: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Logs a turn asynchronously (fire-and-forget)
    /// This spawns a tokio task that writes to the file without blocking
    pub fn log_turn(&self, record: TurnRecord) {
        if !self.enabled {
            return;
        }

        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                warn!("No async runtime, dropping debug log for turn {}", record.turn);
                return;
            }
        };

        let logger = self.clone();
        handle.spawn(async move {
            logger.write(&record).await;
        });
    }

    /// Appends one record and flushes it to disk
    pub async fn write(&self, record: &TurnRecord) {
        let mut file_guard = self.file.lock().await;

        if let Some(file) = file_guard.as_mut() {
            match serde_json::to_string(record) {
                Ok(json_line) => {
                    let line_with_newline = format!("{}\n", json_line);
                    if let Err(e) = file.write_all(line_with_newline.as_bytes()).await {
                        error!("Failed to write debug log entry: {}", e);
                    } else if let Err(e) = file.flush().await {
                        error!("Failed to flush debug log: {}", e);
                    }
                }
                Err(e) => {
                    error!("Failed to serialize debug log entry: {}", e);
                }
            }
        }
    }
}
