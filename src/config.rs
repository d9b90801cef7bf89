// Configuration module for reading Snake.toml
// Static, read-only settings shared by every turn

use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::types::Direction;

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub timing: TimingConfig,
    pub strategy: StrategyConfig,
    pub appearance: AppearanceConfig,
    pub responses: ResponsesConfig,
    pub debug: DebugConfig,
}

/// Timing and search limits
#[derive(Debug, Deserialize, Clone)]
pub struct TimingConfig {
    /// Budget the game engine expects a reply within; overruns are logged
    pub soft_deadline_ms: u64,
    /// Point after which the planner abandons its search
    pub search_deadline_ms: u64,
    /// Hard cap on planner frontier expansions per turn
    pub max_search_expansions: usize,
}

impl TimingConfig {
    pub fn soft_deadline(&self) -> Duration {
        Duration::from_millis(self.soft_deadline_ms)
    }

    pub fn search_deadline(&self) -> Duration {
        Duration::from_millis(self.search_deadline_ms)
    }
}

/// Decision policy constants
#[derive(Debug, Deserialize, Clone)]
pub struct StrategyConfig {
    /// Health must exceed this for pursuit mode
    pub pursuit_health_threshold: i32,
    /// Order in which directions are expanded and resolved
    pub direction_priority: Vec<Direction>,
    /// Returned when no direction is even risky, and on unreadable requests
    pub default_direction: Direction,
}

/// Customizations reported on GET /
#[derive(Debug, Deserialize, Clone)]
pub struct AppearanceConfig {
    pub author: String,
    pub color: String,
    pub head: String,
    pub tail: String,
    pub version: String,
}

/// Fixed response texts
#[derive(Debug, Deserialize, Clone)]
pub struct ResponsesConfig {
    /// Shout sent alongside the default move when a request cannot be decoded
    pub parse_error_shout: String,
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

        Self::from_toml_str(&contents)
    }

    /// Parses and validates configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self, String> {
        let config: Config =
            toml::from_str(contents).map_err(|e| format!("Failed to parse config file: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads default configuration from Snake.toml in the project root
    pub fn load_default() -> Result<Self, String> {
        Self::from_file("Snake.toml")
    }

    /// Creates a configuration with hardcoded default values as fallback
    /// This should match the constants defined in Snake.toml
    pub fn default_hardcoded() -> Self {
        Config {
            timing: TimingConfig {
                soft_deadline_ms: 200,
                search_deadline_ms: 150,
                max_search_expansions: 100_000,
            },
            strategy: StrategyConfig {
                pursuit_health_threshold: 25,
                direction_priority: Direction::all().to_vec(),
                default_direction: Direction::Up,
            },
            appearance: AppearanceConfig {
                author: "pursuit-snake".to_string(),
                color: "#00FF00".to_string(),
                head: "default".to_string(),
                tail: "default".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            responses: ResponsesConfig {
                parse_error_shout: "can't parse this!".to_string(),
            },
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

    /// Rejects settings the decision core cannot work with
    fn validate(&self) -> Result<(), String> {
        let priority = &self.strategy.direction_priority;
        if priority.is_empty() {
            return Err("strategy.direction_priority must not be empty".to_string());
        }
        for (i, dir) in priority.iter().enumerate() {
            if priority[..i].contains(dir) {
                return Err(format!(
                    "strategy.direction_priority lists '{}' more than once",
                    dir
                ));
            }
        }
        if self.timing.max_search_expansions == 0 {
            return Err("timing.max_search_expansions must be positive".to_string());
        }
        Ok(())
    }
}
