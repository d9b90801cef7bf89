// Debug logging module for asynchronous decision logging
//
// Fire-and-forget async writes keep file I/O out of the request/response
// cycle. Each decided turn becomes one line of a JSONL file that the replay
// module can read back.

use log::error;
use serde::Serialize;
use std::sync::Arc;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::bot::Decision;
use crate::types::Board;

/// Represents a single debug log entry
#[derive(Debug, Serialize)]
struct DebugLogEntry {
    turn: i32,
    you_id: String,
    chosen_move: String,
    mode: String,
    source: String,
    elapsed_ms: u64,
    board: Board,
    timestamp: String,
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

    /// Logs a move decision asynchronously (fire-and-forget)
    /// This spawns a tokio task that writes to the file without blocking
    pub fn log_move(&self, turn: i32, you_id: &str, board: Board, decision: &Decision) {
        if !self.enabled {
            return;
        }

        let entry = DebugLogEntry {
            turn,
            you_id: you_id.to_string(),
            chosen_move: decision.direction.as_str().to_string(),
            mode: decision.mode.as_str().to_string(),
            source: decision.source.as_str().to_string(),
            elapsed_ms: decision.timing.elapsed.as_millis() as u64,
            board,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };
        let file_handle = self.file.clone();

        tokio::spawn(async move {
            Self::write_entry(file_handle, entry).await;
        });
    }

    /// Internal async function that performs the actual file write
    async fn write_entry(file_handle: Arc<Mutex<Option<File>>>, entry: DebugLogEntry) {
        let mut file_guard = file_handle.lock().await;

        if let Some(file) = file_guard.as_mut() {
            match serde_json::to_string(&entry) {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::Bot;
    use crate::config::Config;
    use crate::replay::LogEntry;
    use crate::snapshot::TurnSnapshot;
    use crate::types::{Battlesnake, Coord};

    fn board() -> Board {
        let body = vec![Coord::new(1, 5), Coord::new(1, 4), Coord::new(1, 3)];
        Board {
            height: 11,
            width: 11,
            food: vec![Coord::new(8, 5)],
            snakes: vec![Battlesnake {
                id: "me".to_string(),
                name: "me".to_string(),
                health: 90,
                head: body[0],
                length: 3,
                body,
                latency: "0".to_string(),
                shout: None,
            }],
            hazards: vec![],
        }
    }

    #[tokio::test]
    async fn test_disabled_logger_writes_nothing() {
        let logger = DebugLogger::new(false, "unused.jsonl").await;
        assert!(!logger.is_enabled());
        assert!(logger.file.lock().await.is_none());
    }

    #[tokio::test]
    async fn test_entry_is_readable_by_replay() {
        let path = std::env::temp_dir().join(format!("debug_logger_{}.jsonl", std::process::id()));
        let path_str = path.to_string_lossy().to_string();
        let logger = DebugLogger::new(true, &path_str).await;
        assert!(logger.is_enabled());

        let board = board();
        let snapshot = TurnSnapshot::from_board(&board, "me").unwrap();
        let decision = Bot::compute_move(&snapshot, 4, &Config::default_hardcoded());
        let entry = DebugLogEntry {
            turn: 4,
            you_id: "me".to_string(),
            chosen_move: decision.direction.as_str().to_string(),
            mode: decision.mode.as_str().to_string(),
            source: decision.source.as_str().to_string(),
            elapsed_ms: 0,
            board,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };
        DebugLogger::write_entry(logger.file.clone(), entry).await;

        let contents = tokio::fs::read_to_string(&path).await.unwrap();
        let _ = tokio::fs::remove_file(&path).await;

        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 1);
        let read: LogEntry = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(read.turn, 4);
        assert_eq!(read.chosen_move, "right");
        assert_eq!(read.source, "planner");
        assert_eq!(read.mode, "forage");
    }
}
