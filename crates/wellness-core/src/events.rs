use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::reminder::ReminderKind;

/// Every externally visible state change produces an Event.
/// The CLI prints them as JSON lines; hosts may forward them elsewhere.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    ReminderStarted {
        kind: ReminderKind,
        at: NaiveDateTime,
    },
    ReminderFired {
        kind: ReminderKind,
        toast_id: u64,
        source: String,
        at: NaiveDateTime,
    },
    ReminderAcknowledged {
        kind: ReminderKind,
        at: NaiveDateTime,
    },
    /// First afternoon-tea popup recorded; tier one of the easter egg.
    EasterEggShown {
        at: NaiveDateTime,
    },
    /// Share action completed; the lunch track is now unlocked.
    TierTwoUnlocked {
        at: NaiveDateTime,
    },
}
