//! Board orchestration services.
//!
//! # Responsibility
//! - Drive store mutations from shell actions and keep the in-memory mirror
//!   in sync after every success.
//! - Keep the presentation shell decoupled from storage details.

pub mod board_service;
