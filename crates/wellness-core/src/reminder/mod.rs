mod timer;
mod track;

pub use timer::{ReminderTimer, StartOutcome, TrackStatus};
pub use track::{
    mode_for, ReminderKind, ReminderMode, TrackSettings, AFTERNOON_TEA_TIME, DEFAULT_INTERVAL_MIN,
    DEMO_INTERVAL_MS, LUNCH_TIME, MAX_INTERVAL_MS, MIN_INTERVAL_MS,
};
