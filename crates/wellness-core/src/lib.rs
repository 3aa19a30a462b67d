//! # Wellness Reminder Core Library
//!
//! Core business logic for the office wellness reminder: periodic
//! drink-water and stand-up reminders plus the Chinese-locale afternoon-tea
//! easter egg with its two-stage unlock of a lunch reminder.
//!
//! ## Architecture
//!
//! - **Reminder timers**: wall-clock state machines that require the host
//!   to periodically invoke `tick(now)` -- no internal threads. Interval
//!   and clock-aligned reminders are one type parameterized by mode.
//! - **Notification presenter**: shared by all tracks; in-process toasts
//!   with auto-hide, best-effort native notifications, per-kind tones.
//! - **Coordinator**: owns the tracks, the presenter, the settings store
//!   and the unlock gate; re-evaluates the lunch unlock at startup and on
//!   every share action.
//! - **Storage**: crash-safe TOML key-value file for settings bundles,
//!   fired-date markers and unlock flags.
//!
//! ## Key Components
//!
//! - [`ReminderTimer`]: per-track state machine
//! - [`NotificationPresenter`]: shared presentation service
//! - [`ReminderCoordinator`]: track set ownership and unlock gating
//! - [`EasterEggGate`]: two-stage unlock flag set

pub mod clock;
pub mod coordinator;
pub mod easter_egg;
pub mod error;
pub mod events;
pub mod locale;
pub mod notify;
pub mod reminder;
pub mod storage;

pub use coordinator::{CoordinatorOptions, ReminderCoordinator};
pub use easter_egg::{EasterEggGate, UnlockStage};
pub use error::{CoreError, NotifyError, StorageError, ValidationError};
pub use events::Event;
pub use locale::{Locale, Message};
pub use notify::{NotificationPresenter, NotificationRequest, Toast, ToastPhase, ToneSpec};
pub use reminder::{
    ReminderKind, ReminderMode, ReminderTimer, StartOutcome, TrackSettings, TrackStatus,
};
pub use storage::{MemoryStore, SettingsStore, TomlKvStore};
