//! Board use-case service: mutations, mirror cache, drag protocol.
//!
//! # Responsibility
//! - Apply shell actions (create, edit, delete, drag) through the store.
//! - Own the advisory in-memory mirror of the durable collection.
//!
//! # Invariants
//! - The mirror is updated only after the store accepted the mutation; a
//!   rejected mutation leaves mirror and durable state unchanged.
//! - The durable collection stays authoritative: any doubt is resolved by
//!   reloading, never by trusting the mirror.
//! - Drag changes `status` only; a drop on the origin column is a no-op.

use crate::model::task::{Task, TaskDraft, TaskId, TaskPatch, TaskStatus};
use crate::repo::task_repo::TaskRepository;
use crate::time::{Clock, SystemClock};
use crate::view::board::{derive_board, BoardView};
use log::warn;

/// Shell-facing orchestration over one task store.
///
/// Holds the mirror the board renders from, so derivation never re-reads
/// the durable medium on a pure query change.
pub struct BoardService<R: TaskRepository> {
    repo: R,
    clock: Box<dyn Clock>,
    tasks: Vec<Task>,
}

impl<R: TaskRepository> BoardService<R> {
    /// Creates a service over `repo` with the wall clock.
    ///
    /// Cold start loads the mirror through `load_all`, so a corrupt or
    /// unreadable store degrades to an empty board instead of failing.
    pub fn new(repo: R) -> Self {
        Self::with_clock(repo, Box::new(SystemClock))
    }

    /// Creates a service with an injected clock. Test seam.
    pub fn with_clock(repo: R, clock: Box<dyn Clock>) -> Self {
        let tasks = repo.load_all();
        Self { repo, clock, tasks }
    }

    /// The mirrored collection in insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Validates and creates a task from the form draft.
    ///
    /// Stamps a fresh ID and the clock's current timestamp. Returns the new
    /// ID, or `None` when the draft is invalid or the store rejected the
    /// create; the board is then unchanged.
    pub fn add_task(&mut self, draft: TaskDraft) -> Option<TaskId> {
        let draft = draft.normalized();
        if let Err(err) = draft.validate() {
            warn!("event=task_add module=board status=rejected error={err}");
            return None;
        }

        let task = Task::new(draft, self.clock.now());
        if !self.repo.create(&task) {
            return None;
        }

        let id = task.id;
        self.tasks.push(task);
        Some(id)
    }

    /// Edits an existing task. Mirror follows the store on success.
    pub fn update_task(&mut self, id: TaskId, patch: &TaskPatch) -> bool {
        if !self.repo.update(id, patch) {
            return false;
        }

        if let Some(index) = self.tasks.iter().position(|task| task.id == id) {
            patch.apply_to(&mut self.tasks[index]);
        } else {
            // Mirror drifted from the durable truth; resync wholesale.
            self.refresh();
        }
        true
    }

    /// Deletes a task. `false` on unknown ID, board unchanged.
    pub fn remove_task(&mut self, id: TaskId) -> bool {
        if !self.repo.delete(id) {
            return false;
        }

        self.tasks.retain(|task| task.id != id);
        true
    }

    /// Drag protocol: move `id` to `destination`.
    ///
    /// A drop on the task's current column is ignored and reported as
    /// success without touching the store. A stale ID (deleted meanwhile)
    /// fails quietly; the board stays as it was.
    pub fn move_task(&mut self, id: TaskId, destination: TaskStatus) -> bool {
        if let Some(task) = self.tasks.iter().find(|task| task.id == id) {
            if task.status == destination {
                return true;
            }
        }

        self.update_task(id, &TaskPatch::status_only(destination))
    }

    /// Resynchronizes the mirror from the durable collection.
    pub fn refresh(&mut self) {
        self.tasks = self.repo.load_all();
    }

    /// Derives the renderable board for the current mirror and query.
    pub fn board(&self, query: &str) -> BoardView<'_> {
        derive_board(&self.tasks, query)
    }

    /// Removes every task, durable and mirrored. Idempotent.
    pub fn clear_board(&mut self) {
        self.repo.clear();
        self.tasks.clear();
    }
}
