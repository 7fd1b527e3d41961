//! Pure derivation of the rendered board from `(tasks, search query)`.
//!
//! # Responsibility
//! - Partition tasks into the three status groups in collection order.
//! - Compute the title match-set used for search highlighting.
//!
//! # Invariants
//! - Inputs are never mutated; the view borrows the tasks it was given.
//! - The match-set is built from the whole collection, not per group, so
//!   counts and cross-column highlighting agree.
//! - Search dims, it does not filter: non-matching tasks stay in their group.

use crate::model::task::{Task, TaskId, TaskStatus};
use std::collections::HashSet;

/// One card as the board renders it: the task plus its highlight flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardCard<'a> {
    pub task: &'a Task,
    /// Whether the title matches the active search. Always `true` when
    /// search is inactive.
    pub matched: bool,
}

/// Ordered cards of one status column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardGroup<'a> {
    pub status: TaskStatus,
    pub cards: Vec<BoardCard<'a>>,
}

impl BoardGroup<'_> {
    fn new(status: TaskStatus) -> Self {
        Self {
            status,
            cards: Vec::new(),
        }
    }

    /// Number of cards in this column (independent of search state).
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// Renderable board: three ordered groups plus the search match-set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView<'a> {
    pub todo: BoardGroup<'a>,
    pub in_progress: BoardGroup<'a>,
    pub done: BoardGroup<'a>,
    /// IDs whose title matches the active search. Contains every task when
    /// search is inactive.
    pub matched_ids: HashSet<TaskId>,
    pub search_active: bool,
}

impl<'a> BoardView<'a> {
    /// The group owning the given status.
    pub fn group(&self, status: TaskStatus) -> &BoardGroup<'a> {
        match status {
            TaskStatus::Todo => &self.todo,
            TaskStatus::InProgress => &self.in_progress,
            TaskStatus::Done => &self.done,
        }
    }

    /// Total task count across all groups (the header's "all" stat).
    pub fn total(&self) -> usize {
        self.todo.len() + self.in_progress.len() + self.done.len()
    }

    /// Number of tasks matching the active search.
    pub fn match_count(&self) -> usize {
        self.matched_ids.len()
    }
}

/// Normalizes a search query: surrounding whitespace trimmed, lower-cased.
/// An empty normalized query means search is inactive.
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Derives the board view for `tasks` under `query`.
///
/// Pure function of its inputs; recomputed on every collection or query
/// change. Group order preserves the collection's insertion order.
pub fn derive_board<'a>(tasks: &'a [Task], query: &str) -> BoardView<'a> {
    let normalized = normalize_query(query);
    let search_active = !normalized.is_empty();

    let mut matched_ids = HashSet::with_capacity(tasks.len());
    for task in tasks {
        if !search_active || task.title.to_lowercase().contains(&normalized) {
            matched_ids.insert(task.id);
        }
    }

    let mut view = BoardView {
        todo: BoardGroup::new(TaskStatus::Todo),
        in_progress: BoardGroup::new(TaskStatus::InProgress),
        done: BoardGroup::new(TaskStatus::Done),
        matched_ids,
        search_active,
    };

    for task in tasks {
        let card = BoardCard {
            task,
            matched: view.matched_ids.contains(&task.id),
        };
        let group = match task.status {
            TaskStatus::Todo => &mut view.todo,
            TaskStatus::InProgress => &mut view.in_progress,
            TaskStatus::Done => &mut view.done,
        };
        group.cards.push(card);
    }

    view
}
