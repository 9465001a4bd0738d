// Welcome to
// __________         __    __  .__                               __
// \______   \_____ _/  |__/  |_|  |   ____   ______ ____ _____  |  | __ ____
//  |    |  _/\__  \\   __\   __\  | _/ __ \ /  ___//    \\__  \ |  |/ // __ \
//  |    |   \ / __ \|  |  |  | |  |_\  ___/ \___ \|   |  \/ __ \|    <\  ___/
//  |________/(______/__|  |__| |____/\_____>______>___|__(______/__|__\\_____>
//
// A Bot is one snake served over the API. It routes every request to the
// session of the game it belongs to and reports what was decided.

use log::info;

use crate::config::Config;
use crate::debug_logger::{DebugLogger, TurnRecord};
use crate::decision::{Decision, Strategy};
use crate::session::{EntropyFactory, SessionManager};
use crate::snake::SessionError;
use crate::types::{GameState, InfoResponse, MoveResponse};

/// Battlesnake Bot with OOP-style API
/// Takes static configuration dependencies and exposes methods corresponding to API endpoints
pub struct Bot {
    name: String,
    config: Config,
    sessions: SessionManager,
    logger: DebugLogger,
}

impl Bot {
    /// Creates a new Bot instance
    ///
    /// # Arguments
    /// * `name` - Path the bot is mounted at, used in logs
    /// * `strategy` - Decision policy every game of this bot plays
    /// * `config` - Static configuration that does not change during the bot's lifetime
    /// * `logger` - Turn log shared between bots
    pub fn new(name: &str, strategy: Strategy, config: Config, logger: DebugLogger) -> Self {
        let sessions = SessionManager::new(strategy, config.clone());
        Self::with_sessions(name, config, sessions, logger)
    }

    /// Creates a bot whose games are seeded from `entropy`
    pub fn with_entropy(
        name: &str,
        strategy: Strategy,
        config: Config,
        entropy: EntropyFactory,
    ) -> Self {
        let sessions = SessionManager::with_entropy(strategy, config.clone(), entropy);
        Self::with_sessions(name, config, sessions, DebugLogger::disabled())
    }

    fn with_sessions(
        name: &str,
        config: Config,
        sessions: SessionManager,
        logger: DebugLogger,
    ) -> Self {
        Bot {
            name: name.to_string(),
            config,
            sessions,
            logger,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    /// Returns bot metadata and appearance
    /// Corresponds to GET / endpoint
    pub fn info(&self) -> InfoResponse {
        info!("INFO {}", self.name);

        let appearance = &self.config.appearance;
        InfoResponse {
            apiversion: "1".to_string(),
            author: appearance.author.clone(),
            color: appearance.color.clone(),
            head: appearance.head.clone(),
            tail: appearance.tail.clone(),
            version: appearance.version.clone(),
        }
    }

    /// Called when a game starts
    /// Corresponds to POST /start endpoint
    pub fn start(&self, state: &GameState) -> Result<(), SessionError> {
        self.sessions.start(state)
    }

    /// Decides the next move for the game this state belongs to
    /// Corresponds to POST /move endpoint
    ///
    /// An empty move means no safe move was found; the host applies its
    /// own default in that case.
    pub fn get_move(&self, state: &GameState) -> Result<MoveResponse, SessionError> {
        let decision = self.sessions.get_move(state)?;

        match decision {
            Decision::Move { direction, reason } => info!(
                "{} turn {}: Chose {} ({:?})",
                self.name, state.turn, direction, reason
            ),
            Decision::NoSafeMove => info!("{} turn {}: No safe move", self.name, state.turn),
        }
        self.logger
            .log_turn(TurnRecord::new(&self.name, state, &decision));

        Ok(MoveResponse {
            direction: decision.as_str().to_string(),
            shout: String::new(),
        })
    }

    /// Called when a game ends
    /// Corresponds to POST /end endpoint
    pub fn end(&self, state: &GameState) -> Result<(), SessionError> {
        self.sessions.end(state)
    }
}
