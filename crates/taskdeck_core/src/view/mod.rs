//! Board view derivation.
//!
//! # Responsibility
//! - Turn the task collection plus a search query into the grouped,
//!   highlight-annotated structure the board renders.
//!
//! # Invariants
//! - Derivation is pure: same inputs always produce the same view.

pub mod board;
