//! Creation timestamps and relative-age display.
//!
//! # Responsibility
//! - Provide the clock collaborator used to stamp `created_at` at creation.
//! - Bucket a creation timestamp into the card's age label.
//!
//! # Invariants
//! - Timestamps are RFC 3339 / ISO-8601 strings in UTC.
//! - `relative_age` never panics on malformed input.

use chrono::{DateTime, SecondsFormat, Utc};

/// Source of creation timestamps. Injectable so tests stay deterministic.
pub trait Clock {
    /// Current time as an ISO-8601 string.
    fn now(&self) -> String;
}

/// Wall-clock implementation used outside tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> String {
        // Millisecond precision with a trailing `Z`, the same shape the
        // stored records have always used.
        Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

/// Buckets `created_at` against `now` for card display: "today",
/// "yesterday", "N days ago", else the calendar date.
///
/// Returns `None` when `created_at` does not parse; the caller decides how
/// to render an unknown age.
pub fn relative_age(created_at: &str, now: DateTime<Utc>) -> Option<String> {
    let created = DateTime::parse_from_rfc3339(created_at)
        .ok()?
        .with_timezone(&Utc);

    let days = now.signed_duration_since(created).num_days();
    let label = if days <= 0 {
        "today".to_string()
    } else if days == 1 {
        "yesterday".to_string()
    } else if days < 7 {
        format!("{days} days ago")
    } else {
        created.format("%Y-%m-%d").to_string()
    };
    Some(label)
}
