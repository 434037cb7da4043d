//! SeatPlan Application
//!
//! Headless shell around the editor: replays recorded sessions, persists
//! the resulting plan and renders the final frame.

mod app;
pub mod replay;
mod shortcuts;

pub use app::{App, AppConfig, RunSummary};
pub use replay::{Replay, Script, Step};
pub use shortcuts::{Shortcut, ShortcutRegistry};

use seatplan_core::{ConfigError, StorageError};
use seatplan_render::RendererError;
use std::path::PathBuf;

/// Application errors.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("render error: {0}")]
    Render(#[from] RendererError),
    #[error("failed to read script {}: {source}", path.display())]
    ScriptIo { path: PathBuf, source: std::io::Error },
    #[error("invalid script: {0}")]
    Script(#[from] serde_json::Error),
}
