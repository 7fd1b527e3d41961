//! Task store contract and SQLite implementation.
//!
//! # Responsibility
//! - Hold the durable task collection as one serialized record per named
//!   collection key.
//! - Guard mutations against duplicate and missing IDs.
//!
//! # Invariants
//! - The collection keeps insertion order; delete never reorders survivors.
//! - A failed durable write leaves prior state as the durable truth.
//! - Trait methods never raise: internal errors are logged and converted to
//!   `false`/`None`/empty results so a cold start cannot crash the shell.

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::DbError;
use crate::model::task::{Task, TaskId, TaskPatch};
use log::{error, warn};
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Collection key used by the board unless a caller names its own.
pub const DEFAULT_COLLECTION_KEY: &str = "kanban-tasks";

pub type RepoResult<T> = Result<T, RepoError>;

/// Store-layer error. Only construction surfaces these to callers; the
/// `TaskRepository` methods convert them to their boolean/optional results.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// The stored record exists but is not a readable task collection.
    Corrupt {
        collection: String,
        message: String,
    },
    DuplicateId(TaskId),
    NotFound(TaskId),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Corrupt {
                collection,
                message,
            } => write!(f, "collection `{collection}` is corrupt: {message}"),
            Self::DuplicateId(id) => write!(f, "task already exists: {id}"),
            Self::NotFound(id) => write!(f, "task not found: {id}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection not migrated: schema version {actual_version}, expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Store contract for one named durable task collection.
///
/// All methods are infallible from the caller's perspective: not-found,
/// duplicate and medium failures are reported through the return value and
/// logged, never thrown.
pub trait TaskRepository {
    /// Returns the full collection in stored order. Empty when the store is
    /// empty, corrupt, or unreadable.
    fn load_all(&self) -> Vec<Task>;
    /// Replaces the entire stored collection atomically. Write failures are
    /// logged; prior durable state remains the truth.
    fn save_all(&self, tasks: &[Task]);
    /// Appends and persists. `false` when the ID already exists or the write
    /// fails; the stored collection is then unchanged.
    fn create(&self, task: &Task) -> bool;
    /// Shallow-merges `patch` into the task. `false` on unknown ID or failed
    /// write.
    fn update(&self, id: TaskId, patch: &TaskPatch) -> bool;
    /// Removes and persists. `false` on unknown ID or failed write. Survivors
    /// keep their order.
    fn delete(&self, id: TaskId) -> bool;
    /// Read-only lookup, no side effect.
    fn get_by_id(&self, id: TaskId) -> Option<Task>;
    /// Removes the whole collection. Idempotent.
    fn clear(&self);
}

/// SQLite-backed task store. One row in `collections` per named collection;
/// the row value is the JSON array of tasks.
pub struct SqliteTaskRepository<'conn> {
    conn: &'conn Connection,
    collection: String,
}

impl<'conn> SqliteTaskRepository<'conn> {
    /// Constructs a store over the default collection key.
    ///
    /// The connection must come from `db::open_db`/`open_db_in_memory`
    /// (migrated); anything else is rejected here rather than failing later
    /// inside a swallowed operation.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        Self::try_with_collection(conn, DEFAULT_COLLECTION_KEY)
    }

    /// Constructs a store over a caller-named collection key.
    pub fn try_with_collection(
        conn: &'conn Connection,
        collection: impl Into<String>,
    ) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self {
            conn,
            collection: collection.into(),
        })
    }

    /// The collection key this store reads and writes.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    fn try_load(&self) -> RepoResult<Vec<Task>> {
        let raw: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM collections WHERE key = ?1;",
                params![self.collection],
                |row| row.get(0),
            )
            .optional()?;

        match raw {
            Some(raw) => self.decode_collection(&raw),
            None => Ok(Vec::new()),
        }
    }

    fn decode_collection(&self, raw: &str) -> RepoResult<Vec<Task>> {
        let records: Vec<serde_json::Value> =
            serde_json::from_str(raw).map_err(|err| RepoError::Corrupt {
                collection: self.collection.clone(),
                message: err.to_string(),
            })?;

        let mut tasks = Vec::with_capacity(records.len());
        for record in records {
            match serde_json::from_value::<Task>(record) {
                Ok(task) => tasks.push(task),
                Err(err) => {
                    // Skipped records stay invisible everywhere until repaired
                    // by the next save_all; siblings still load.
                    warn!(
                        "event=record_skipped module=store collection={} reason={err}",
                        self.collection
                    );
                }
            }
        }
        Ok(tasks)
    }

    fn try_persist(&self, tasks: &[Task]) -> RepoResult<()> {
        let encoded = serde_json::to_string(tasks).map_err(|err| RepoError::Corrupt {
            collection: self.collection.clone(),
            message: err.to_string(),
        })?;

        self.conn.execute(
            "INSERT INTO collections (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(key) DO UPDATE
             SET value = excluded.value, updated_at = excluded.updated_at;",
            params![self.collection, encoded],
        )?;
        Ok(())
    }

    fn try_create(&self, task: &Task) -> RepoResult<()> {
        let mut tasks = self.try_load()?;
        if tasks.iter().any(|existing| existing.id == task.id) {
            return Err(RepoError::DuplicateId(task.id));
        }
        tasks.push(task.clone());
        self.try_persist(&tasks)
    }

    fn try_update(&self, id: TaskId, patch: &TaskPatch) -> RepoResult<()> {
        let mut tasks = self.try_load()?;
        let target = tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or(RepoError::NotFound(id))?;
        patch.apply_to(target);
        self.try_persist(&tasks)
    }

    fn try_delete(&self, id: TaskId) -> RepoResult<()> {
        let mut tasks = self.try_load()?;
        let before = tasks.len();
        tasks.retain(|task| task.id != id);
        if tasks.len() == before {
            return Err(RepoError::NotFound(id));
        }
        self.try_persist(&tasks)
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn load_all(&self) -> Vec<Task> {
        match self.try_load() {
            Ok(tasks) => tasks,
            Err(err) => {
                // An unreadable store degrades to an empty board; the durable
                // record is left in place for inspection.
                error!(
                    "event=collection_load module=store status=error collection={} error={err}",
                    self.collection
                );
                Vec::new()
            }
        }
    }

    fn save_all(&self, tasks: &[Task]) {
        if let Err(err) = self.try_persist(tasks) {
            error!(
                "event=collection_save module=store status=error collection={} error={err}",
                self.collection
            );
        }
    }

    fn create(&self, task: &Task) -> bool {
        match self.try_create(task) {
            Ok(()) => true,
            Err(err) => {
                warn!(
                    "event=task_create module=store status=rejected collection={} id={} error={err}",
                    self.collection, task.id
                );
                false
            }
        }
    }

    fn update(&self, id: TaskId, patch: &TaskPatch) -> bool {
        match self.try_update(id, patch) {
            Ok(()) => true,
            Err(err) => {
                warn!(
                    "event=task_update module=store status=rejected collection={} id={id} error={err}",
                    self.collection
                );
                false
            }
        }
    }

    fn delete(&self, id: TaskId) -> bool {
        match self.try_delete(id) {
            Ok(()) => true,
            Err(err) => {
                warn!(
                    "event=task_delete module=store status=rejected collection={} id={id} error={err}",
                    self.collection
                );
                false
            }
        }
    }

    fn get_by_id(&self, id: TaskId) -> Option<Task> {
        self.load_all().into_iter().find(|task| task.id == id)
    }

    fn clear(&self) {
        let result = self.conn.execute(
            "DELETE FROM collections WHERE key = ?1;",
            params![self.collection],
        );
        if let Err(err) = result {
            error!(
                "event=collection_clear module=store status=error collection={} error={err}",
                self.collection
            );
        }
    }
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = current_user_version(conn)?;
    if actual_version == 0 {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let table_present: Option<String> = conn
        .query_row(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name = 'collections';",
            [],
            |row| row.get(0),
        )
        .optional()?;
    if table_present.is_none() {
        return Err(RepoError::MissingRequiredTable("collections"));
    }

    Ok(())
}
