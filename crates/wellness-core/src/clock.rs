//! Time conversion helpers.
//!
//! The core never reads the ambient clock. Every mutating operation takes
//! `now` as an explicit [`NaiveDateTime`] (local wall-clock time supplied by
//! the host loop), and the helpers here derive the epoch-millisecond and
//! calendar-date views the state machines compare against.

use chrono::{NaiveDate, NaiveDateTime};

/// Milliseconds since the Unix epoch for a wall-clock instant.
///
/// Saturates at zero for pre-epoch inputs so interval arithmetic stays in
/// unsigned space.
pub fn epoch_ms(now: NaiveDateTime) -> u64 {
    now.and_utc().timestamp_millis().max(0) as u64
}

/// Calendar date used for the once-per-day fire guard.
pub fn calendar_date(now: NaiveDateTime) -> NaiveDate {
    now.date()
}
