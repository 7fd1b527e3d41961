//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `taskdeck_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use taskdeck_core::{core_version, derive_board};

fn main() {
    let view = derive_board(&[], "");
    println!("taskdeck_core version={}", core_version());
    println!(
        "empty board todo={} in_progress={} done={}",
        view.todo.len(),
        view.in_progress.len(),
        view.done.len()
    );
}
