//! Core logic for the taskdeck board.
//! This crate is the single source of truth for task identity, persistence
//! and the derived views the board renders.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod time;
pub mod view;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::task::{
    Priority, Task, TaskDraft, TaskId, TaskPatch, TaskStatus, TaskValidationError,
};
pub use repo::task_repo::{
    RepoError, RepoResult, SqliteTaskRepository, TaskRepository, DEFAULT_COLLECTION_KEY,
};
pub use service::board_service::BoardService;
pub use time::{relative_age, Clock, SystemClock};
pub use view::board::{derive_board, normalize_query, BoardCard, BoardGroup, BoardView};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
