use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Shortest accepted reminder interval (also the demo-mode floor).
pub const MIN_INTERVAL_MS: u64 = 1_000;
/// Longest accepted reminder interval: one day.
pub const MAX_INTERVAL_MS: u64 = 24 * 60 * 60 * 1_000;

/// Default fixed-interval cadence in minutes.
pub const DEFAULT_INTERVAL_MIN: u32 = 30;
/// Demo-mode cadence for quick walkthroughs.
pub const DEMO_INTERVAL_MS: u64 = 30_000;

/// Afternoon tea fires at 15:15 local time.
pub const AFTERNOON_TEA_TIME: (u8, u8) = (15, 15);
/// Lunch fires at 12:00 local time.
pub const LUNCH_TIME: (u8, u8) = (12, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderKind {
    Water,
    Standup,
    AfternoonTea,
    Lunch,
}

impl ReminderKind {
    pub const ALL: [ReminderKind; 4] = [
        ReminderKind::Water,
        ReminderKind::Standup,
        ReminderKind::AfternoonTea,
        ReminderKind::Lunch,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ReminderKind::Water => "water",
            ReminderKind::Standup => "standup",
            ReminderKind::AfternoonTea => "afternoon_tea",
            ReminderKind::Lunch => "lunch",
        }
    }

    /// Attribution string carried on every notification request.
    pub fn source(self) -> &'static str {
        match self {
            ReminderKind::Water => "water_reminder",
            ReminderKind::Standup => "standup_reminder",
            ReminderKind::AfternoonTea => "afternoon_tea",
            ReminderKind::Lunch => "lunch_reminder",
        }
    }

    /// Store key for this track's settings bundle.
    pub fn settings_key(self) -> &'static str {
        match self {
            ReminderKind::Water => "reminder.water",
            ReminderKind::Standup => "reminder.standup",
            ReminderKind::AfternoonTea => "reminder.afternoon_tea",
            ReminderKind::Lunch => "reminder.lunch",
        }
    }

    /// Store key for the last-fired calendar-date marker (clock-aligned only).
    pub fn marker_key(self) -> Option<&'static str> {
        match self {
            ReminderKind::AfternoonTea => Some("marker.afternoon_tea"),
            ReminderKind::Lunch => Some("marker.lunch"),
            _ => None,
        }
    }
}

impl std::str::FromStr for ReminderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "water" => Ok(ReminderKind::Water),
            "standup" => Ok(ReminderKind::Standup),
            "afternoon_tea" | "afternoon-tea" | "tea" => Ok(ReminderKind::AfternoonTea),
            "lunch" => Ok(ReminderKind::Lunch),
            other => Err(format!("unknown reminder kind: {other}")),
        }
    }
}

/// Scheduling mode of one track.
///
/// A single tagged union rather than per-kind subtypes: tick and trigger
/// logic dispatch on the tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ReminderMode {
    /// Fires every `interval_ms` after the last trigger/restart.
    Interval { interval_ms: u64 },
    /// Fires once per calendar day at the given local wall-clock time.
    ClockAligned { hour: u8, minute: u8 },
}

impl ReminderMode {
    /// Reject out-of-range intervals and malformed target times.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match *self {
            ReminderMode::Interval { interval_ms } => {
                if !(MIN_INTERVAL_MS..=MAX_INTERVAL_MS).contains(&interval_ms) {
                    return Err(ValidationError::IntervalOutOfRange {
                        interval_ms,
                        min_ms: MIN_INTERVAL_MS,
                        max_ms: MAX_INTERVAL_MS,
                    });
                }
                Ok(())
            }
            ReminderMode::ClockAligned { hour, minute } => {
                if hour > 23 || minute > 59 {
                    return Err(ValidationError::InvalidTargetTime { hour, minute });
                }
                Ok(())
            }
        }
    }
}

/// Persisted per-track settings bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackSettings {
    #[serde(default = "default_interval_min")]
    pub interval_min: u32,
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_true")]
    pub sound: bool,
}

fn default_interval_min() -> u32 {
    DEFAULT_INTERVAL_MIN
}

fn default_true() -> bool {
    true
}

impl Default for TrackSettings {
    fn default() -> Self {
        Self {
            interval_min: DEFAULT_INTERVAL_MIN,
            enabled: true,
            sound: true,
        }
    }
}

impl TrackSettings {
    /// Hard defaults per kind. Lunch ships disabled until the tier-two
    /// unlock flips it.
    pub fn defaults_for(kind: ReminderKind) -> Self {
        Self {
            enabled: kind != ReminderKind::Lunch,
            ..Self::default()
        }
    }

    pub fn interval_ms(&self) -> u64 {
        u64::from(self.interval_min) * 60 * 1_000
    }
}

/// Build the scheduling mode a kind uses from its settings bundle.
pub fn mode_for(kind: ReminderKind, settings: &TrackSettings) -> ReminderMode {
    match kind {
        ReminderKind::Water | ReminderKind::Standup => ReminderMode::Interval {
            interval_ms: settings.interval_ms(),
        },
        ReminderKind::AfternoonTea => ReminderMode::ClockAligned {
            hour: AFTERNOON_TEA_TIME.0,
            minute: AFTERNOON_TEA_TIME.1,
        },
        ReminderKind::Lunch => ReminderMode::ClockAligned {
            hour: LUNCH_TIME.0,
            minute: LUNCH_TIME.1,
        },
    }
}
