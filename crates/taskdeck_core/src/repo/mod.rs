//! Persistence layer for the durable task collection.
//!
//! # Responsibility
//! - Define the store contract consumed by the board shell.
//! - Isolate SQLite and serialization details from orchestration code.
//!
//! # Invariants
//! - Every successful mutation performs exactly one full-collection durable
//!   write (read-modify-write of the whole set).
//! - Store operations never panic or propagate faults to the caller; failures
//!   are logged and reported as `false`/`None`/empty.

pub mod task_repo;
