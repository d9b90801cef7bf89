// Welcome to
// __________         __    __  .__                               __
// \______   \_____ _/  |__/  |_|  |   ____   ______ ____ _____  |  | __ ____
//  |    |  _/\__  \\   __\   __\  | _/ __ \ /  ___//    \\__  \ |  |/ // __ \
//  |    |   \ / __ \|  |  |  | |  |_\  ___/ \___ \|   |  \/ __ \|    <\  ___/
//  |________/(______/__|  |__| |____/\_____>______>___|__(______/__|__\\_____>
//
// Decision pipeline: snapshot -> grid -> mode -> planner -> safety gate -> resolver.
// For more info on the game see docs.battlesnake.com

use log::{debug, error, info, warn};
use serde::Serialize;
use serde_json::{json, Value};

use crate::config::Config;
use crate::context::TurnContext;
use crate::debug_logger::DebugLogger;
use crate::mode::{self, Mode};
use crate::planner::{self, SearchBudget, SearchStats};
use crate::resolver;
use crate::safety::{self, Safety};
use crate::snapshot::TurnSnapshot;
use crate::timing::{TurnTimer, TurnTiming};
use crate::types::{Battlesnake, Board, Direction, Game};

/// Which stage of the pipeline produced the move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionSource {
    /// First step of a planned path, rated Safe.
    Planner,
    /// Best classified direction after the planner had nothing usable.
    Resolver,
    /// Nothing was even risky; the configured default was returned.
    LastResort,
}

impl DecisionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionSource::Planner => "planner",
            DecisionSource::Resolver => "resolver",
            DecisionSource::LastResort => "last_resort",
        }
    }
}

/// Everything known about one turn's choice
#[derive(Debug, Clone, Copy)]
pub struct Decision {
    pub direction: Direction,
    pub source: DecisionSource,
    pub mode: Mode,
    pub safety: Safety,
    pub search: SearchStats,
    pub timing: TurnTiming,
}

/// Battlesnake Bot with OOP-style API
/// Takes static configuration dependencies and exposes methods corresponding to API endpoints
pub struct Bot {
    config: Config,
    debug_logger: DebugLogger,
}

impl Bot {
    /// Creates a new Bot instance
    ///
    /// # Arguments
    /// * `config` - Static configuration that does not change during the bot's lifetime
    /// * `debug_logger` - Per-turn JSONL sink, usually `DebugLogger::disabled()`
    pub fn new(config: Config, debug_logger: DebugLogger) -> Self {
        Bot {
            config,
            debug_logger,
        }
    }

    /// Returns bot metadata and appearance
    /// Corresponds to GET / endpoint
    pub fn info(&self) -> Value {
        info!("INFO");

        let appearance = &self.config.appearance;
        json!({
            "apiversion": "1",
            "author": appearance.author,
            "color": appearance.color,
            "head": appearance.head,
            "tail": appearance.tail,
            "version": appearance.version,
        })
    }

    /// Called when a game starts
    /// Corresponds to POST /start endpoint
    pub fn start(&self, game: &Game, _turn: &i32, board: &Board, you: &Battlesnake) {
        info!(
            "GAME START {} ({}x{}) as {}",
            game.id, board.width, board.height, you.id
        );
    }

    /// Called when a game ends
    /// Corresponds to POST /end endpoint
    pub fn end(&self, game: &Game, turn: &i32, _board: &Board, _you: &Battlesnake) {
        info!("GAME OVER {} after {} turns", game.id, turn);
    }

    /// Computes and returns the next move
    /// Corresponds to POST /move endpoint
    ///
    /// The CPU-bound decision runs on tokio's blocking pool so the server's
    /// async workers stay free for other games.
    ///
    /// # Returns
    /// * `Value` - JSON response containing the chosen move direction and a shout
    pub async fn get_move(
        &self,
        _game: &Game,
        turn: &i32,
        board: &Board,
        you: &Battlesnake,
    ) -> Value {
        let snapshot = match TurnSnapshot::from_board(board, &you.id) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!("Turn {}: rejecting board: {}", turn, e);
                return self.fallback_response();
            }
        };

        let turn = *turn;
        let config = self.config.clone();
        let decision = match tokio::task::spawn_blocking(move || {
            Bot::compute_move(&snapshot, turn, &config)
        })
        .await
        {
            Ok(decision) => decision,
            Err(e) => {
                error!("Turn {}: decision task failed: {}", turn, e);
                return self.fallback_response();
            }
        };

        self.debug_logger
            .log_move(turn, &you.id, board.clone(), &decision);

        json!({
            "move": decision.direction.as_str(),
            "shout": format!("{} via {}", decision.mode.as_str(), decision.source.as_str()),
        })
    }

    /// Reply used when a request cannot be turned into a snapshot
    pub fn fallback_response(&self) -> Value {
        json!({
            "move": self.config.strategy.default_direction.as_str(),
            "shout": self.config.responses.parse_error_shout,
        })
    }

    /// Runs the full decision pipeline for one validated snapshot
    ///
    /// Pure with respect to its inputs apart from the search deadline, which
    /// only matters when the planner would otherwise overrun.
    pub fn compute_move(snapshot: &TurnSnapshot, turn: i32, config: &Config) -> Decision {
        let mut timer = TurnTimer::start(turn, config.timing.soft_deadline());
        let strategy = &config.strategy;
        let priority = &strategy.direction_priority;

        let ctx = TurnContext::new(snapshot);
        let mode = mode::select(&ctx, strategy.pursuit_health_threshold);

        let budget = SearchBudget::new(
            config.timing.max_search_expansions,
            Some(timer.deadline_after(config.timing.search_deadline())),
        );
        let report = planner::plan(&ctx, mode, priority, &budget);

        let planned = report.direction.map(|dir| (dir, safety::classify(&ctx, dir)));
        let (direction, safety, source) = match planned {
            Some((dir, Safety::Safe)) => (dir, Safety::Safe, DecisionSource::Planner),
            other => {
                if let Some((dir, level)) = other {
                    debug!(
                        "Turn {}: planned step {} rated {:?}, deferring to resolver",
                        turn, dir, level
                    );
                }
                let resolution = resolver::resolve(&ctx, priority, strategy.default_direction);
                let source = if resolution.is_last_resort() {
                    warn!(
                        "Turn {}: no safe or risky move, falling back to {}",
                        turn, resolution.direction
                    );
                    DecisionSource::LastResort
                } else {
                    DecisionSource::Resolver
                };
                (resolution.direction, resolution.safety, source)
            }
        };

        let timing = timer.finish();
        info!(
            "Turn {}: Chose {} ({} via {}, {:?}, {} expansions)",
            turn,
            direction,
            mode.as_str(),
            source.as_str(),
            safety,
            report.stats.expansions
        );

        Decision {
            direction,
            source,
            mode,
            safety,
            search: report.stats,
            timing,
        }
    }
}
