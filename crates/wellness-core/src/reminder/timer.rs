//! Reminder timer implementation.
//!
//! The timer is a wall-clock-based state machine. It does not use internal
//! threads -- the host loop is responsible for calling `tick()` periodically
//! and passing the current time in.
//!
//! ## State Transitions
//!
//! ```text
//! Stopped -> Running -> (Stopped | self-loop on fire)
//! ```
//!
//! Interval tracks re-arm themselves immediately after each fire;
//! clock-aligned tracks record the fire date and keep watching.
//!
//! ## Usage
//!
//! ```ignore
//! let mut timer = ReminderTimer::new(kind, mode, &settings, locale)?;
//! timer.start(now);
//! // In a loop:
//! if let Some(request) = timer.tick(now) {
//!     presenter.show(request, now);
//! }
//! ```

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::Serialize;

use super::track::{ReminderKind, ReminderMode};
use super::TrackSettings;
use crate::clock::{calendar_date, epoch_ms};
use crate::error::ValidationError;
use crate::locale::{self, Locale, Message};
use crate::notify::NotificationRequest;

/// Result of a `start()` call. A repeat start is a distinct no-op, not a
/// fresh arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StartOutcome {
    Started,
    AlreadyRunning,
    Disabled,
}

/// Timing snapshot captured when the track arms.
///
/// Configuration edits while running touch only the configured mode; the
/// armed snapshot keeps the in-flight cycle from jumping mid-countdown.
#[derive(Debug, Clone, Copy)]
struct Armed {
    mode: ReminderMode,
    started_at_epoch_ms: u64,
    /// Interval mode only; clock-aligned tracks watch wall-clock time.
    next_fire_at_epoch_ms: Option<u64>,
}

/// Read-only snapshot of one track.
#[derive(Debug, Clone, Serialize)]
pub struct TrackStatus {
    pub kind: ReminderKind,
    pub enabled: bool,
    pub is_active: bool,
    pub mode: ReminderMode,
    pub time_remaining_ms: Option<u64>,
    pub started_at_epoch_ms: Option<u64>,
    pub next_fire_at_epoch_ms: Option<u64>,
    pub last_fired_date: Option<NaiveDate>,
}

/// State machine for one reminder track.
#[derive(Debug, Clone)]
pub struct ReminderTimer {
    kind: ReminderKind,
    mode: ReminderMode,
    message: Message,
    enabled: bool,
    sound_on: bool,
    armed: Option<Armed>,
    /// Clock-aligned only: prevents a second fire within the same date.
    last_fired_date: Option<NaiveDate>,
}

impl ReminderTimer {
    /// Create a stopped timer for the given kind.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the mode carries an out-of-range
    /// interval or a malformed target time.
    pub fn new(
        kind: ReminderKind,
        mode: ReminderMode,
        settings: &TrackSettings,
        locale: Locale,
    ) -> Result<Self, ValidationError> {
        mode.validate()?;
        Ok(Self {
            kind,
            mode,
            message: locale::for_kind(kind, locale),
            enabled: settings.enabled,
            sound_on: settings.sound,
            armed: None,
            last_fired_date: None,
        })
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn kind(&self) -> ReminderKind {
        self.kind
    }

    pub fn is_active(&self) -> bool {
        self.armed.is_some()
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn mode(&self) -> ReminderMode {
        self.mode
    }

    pub fn last_fired_date(&self) -> Option<NaiveDate> {
        self.last_fired_date
    }

    /// Read-only snapshot; never mutates timer state.
    pub fn status(&self, now: NaiveDateTime) -> TrackStatus {
        let (time_remaining_ms, next_fire_at_epoch_ms) = match self.armed {
            None => (None, None),
            Some(armed) => match armed.mode {
                ReminderMode::Interval { .. } => {
                    let next = armed.next_fire_at_epoch_ms;
                    let remaining = next.map(|n| n.saturating_sub(epoch_ms(now)));
                    (remaining, next)
                }
                ReminderMode::ClockAligned { hour, minute } => {
                    let next = self.next_occurrence(now, hour, minute);
                    let next_ms = epoch_ms(next);
                    (Some(next_ms.saturating_sub(epoch_ms(now))), Some(next_ms))
                }
            },
        };
        TrackStatus {
            kind: self.kind,
            enabled: self.enabled,
            is_active: self.is_active(),
            mode: self.mode,
            time_remaining_ms,
            started_at_epoch_ms: self.armed.map(|a| a.started_at_epoch_ms),
            next_fire_at_epoch_ms,
            last_fired_date: self.last_fired_date,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Arm the track. Requires `enabled`; a second start without an
    /// intervening `stop()` leaves the running cycle untouched.
    pub fn start(&mut self, now: NaiveDateTime) -> StartOutcome {
        if !self.enabled {
            tracing::warn!(kind = self.kind.as_str(), "reminder not started: disabled");
            return StartOutcome::Disabled;
        }
        if self.armed.is_some() {
            return StartOutcome::AlreadyRunning;
        }
        self.arm(now);
        tracing::info!(kind = self.kind.as_str(), "reminder started");
        StartOutcome::Started
    }

    /// Disarm the track; idempotent. After this returns no further fires
    /// occur until the next `start()`.
    pub fn stop(&mut self) {
        if self.armed.take().is_some() {
            tracing::info!(kind = self.kind.as_str(), "reminder stopped");
        }
    }

    /// Advance the state machine. Returns a request when the track fires.
    ///
    /// The re-arm / date-write step runs before the request is returned, so
    /// nothing the caller does with the request can stop future fires.
    pub fn tick(&mut self, now: NaiveDateTime) -> Option<NotificationRequest> {
        if !self.enabled {
            return None;
        }
        let armed = self.armed?;
        match armed.mode {
            ReminderMode::Interval { .. } => {
                let next = armed.next_fire_at_epoch_ms?;
                if epoch_ms(now) < next {
                    return None;
                }
                self.arm(now);
                tracing::debug!(kind = self.kind.as_str(), "interval reminder fired");
                Some(self.request())
            }
            ReminderMode::ClockAligned { hour, minute } => {
                let today = calendar_date(now);
                if now.hour() == 0 && now.minute() == 0 {
                    if let Some(last) = self.last_fired_date {
                        if last < today {
                            tracing::debug!(
                                kind = self.kind.as_str(),
                                "date rollover observed, fire guard now clear"
                            );
                        }
                    }
                }
                if now.hour() != u32::from(hour) || now.minute() != u32::from(minute) {
                    return None;
                }
                if self.last_fired_date == Some(today) {
                    return None;
                }
                self.last_fired_date = Some(today);
                tracing::debug!(
                    kind = self.kind.as_str(),
                    date = %today,
                    "clock-aligned reminder fired"
                );
                Some(self.request())
            }
        }
    }

    /// User-initiated early completion: the trigger's restart/date-write
    /// step without a notification. Returns false when the track is not
    /// running.
    pub fn acknowledge(&mut self, now: NaiveDateTime) -> bool {
        if !self.enabled {
            return false;
        }
        let Some(armed) = self.armed else {
            return false;
        };
        match armed.mode {
            ReminderMode::Interval { .. } => self.arm(now),
            ReminderMode::ClockAligned { .. } => {
                self.last_fired_date = Some(calendar_date(now));
            }
        }
        tracing::debug!(kind = self.kind.as_str(), "reminder acknowledged");
        true
    }

    /// Fire the track's notification on demand without consuming the daily
    /// guard. Interval tracks restart their cycle, as a real trigger would.
    pub fn manual_trigger(&mut self, now: NaiveDateTime) -> Option<NotificationRequest> {
        if !self.enabled {
            return None;
        }
        if self.armed.is_some() && matches!(self.mode, ReminderMode::Interval { .. }) {
            self.arm(now);
        }
        Some(self.request())
    }

    // ── Configuration ────────────────────────────────────────────────

    /// Replace the configured mode. Takes effect on the next arm (start or
    /// post-fire restart); an in-flight countdown is never mutated.
    pub fn set_mode(&mut self, mode: ReminderMode) -> Result<(), ValidationError> {
        mode.validate()?;
        self.mode = mode;
        Ok(())
    }

    /// Disabling also disarms, so a disabled track holds no live countdown.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.stop();
        }
    }

    pub fn set_sound(&mut self, sound_on: bool) {
        self.sound_on = sound_on;
    }

    /// Restore the persisted once-per-day guard after a restart.
    pub fn restore_last_fired(&mut self, date: NaiveDate) {
        self.last_fired_date = Some(date);
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn arm(&mut self, now: NaiveDateTime) {
        let now_ms = epoch_ms(now);
        let next_fire_at_epoch_ms = match self.mode {
            ReminderMode::Interval { interval_ms } => Some(now_ms + interval_ms),
            ReminderMode::ClockAligned { .. } => None,
        };
        self.armed = Some(Armed {
            mode: self.mode,
            started_at_epoch_ms: now_ms,
            next_fire_at_epoch_ms,
        });
    }

    fn request(&self) -> NotificationRequest {
        NotificationRequest {
            kind: self.kind,
            title: self.message.title.to_string(),
            body: self.message.body.to_string(),
            source: self.kind.source().to_string(),
            sound: self.sound_on,
        }
    }

    /// Next wall-clock instant at which this clock-aligned track can fire.
    fn next_occurrence(&self, now: NaiveDateTime, hour: u8, minute: u8) -> NaiveDateTime {
        let today = calendar_date(now);
        let target = today
            .and_hms_opt(u32::from(hour), u32::from(minute), 0)
            .unwrap_or(now);
        let fired_today = self.last_fired_date == Some(today);
        if !fired_today && now <= target {
            target
        } else {
            target + chrono::Duration::days(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 8, 4)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    fn water(interval_ms: u64) -> ReminderTimer {
        ReminderTimer::new(
            ReminderKind::Water,
            ReminderMode::Interval { interval_ms },
            &TrackSettings::default(),
            Locale::En,
        )
        .unwrap()
    }

    fn tea() -> ReminderTimer {
        ReminderTimer::new(
            ReminderKind::AfternoonTea,
            ReminderMode::ClockAligned { hour: 15, minute: 15 },
            &TrackSettings::default(),
            Locale::ZhCn,
        )
        .unwrap()
    }

    #[test]
    fn rejects_invalid_configuration() {
        let err = ReminderTimer::new(
            ReminderKind::Water,
            ReminderMode::Interval { interval_ms: 10 },
            &TrackSettings::default(),
            Locale::En,
        );
        assert!(err.is_err());

        let err = ReminderTimer::new(
            ReminderKind::Lunch,
            ReminderMode::ClockAligned { hour: 25, minute: 0 },
            &TrackSettings::default(),
            Locale::ZhCn,
        );
        assert!(err.is_err());
    }

    #[test]
    fn start_requires_enabled() {
        let mut timer = water(1_800_000);
        timer.set_enabled(false);
        assert_eq!(timer.start(at(9, 0, 0)), StartOutcome::Disabled);
        assert!(!timer.is_active());
    }

    #[test]
    fn second_start_is_a_distinct_no_op() {
        let mut timer = water(1_800_000);
        assert_eq!(timer.start(at(9, 0, 0)), StartOutcome::Started);
        assert_eq!(timer.start(at(9, 5, 0)), StartOutcome::AlreadyRunning);
        // The original cycle is untouched: still fires at 9:30, once.
        assert!(timer.tick(at(9, 29, 59)).is_none());
        assert!(timer.tick(at(9, 30, 0)).is_some());
        assert!(timer.tick(at(9, 30, 1)).is_none());
    }

    #[test]
    fn fires_exactly_at_interval() {
        let t0 = at(9, 0, 0);
        let mut timer = water(1_800_000);
        timer.start(t0);

        // One millisecond early: nothing.
        assert!(timer.tick(t0 + Duration::milliseconds(1_799_999)).is_none());

        let request = timer.tick(t0 + Duration::milliseconds(1_800_000)).unwrap();
        assert_eq!(request.kind, ReminderKind::Water);
        assert_eq!(request.source, "water_reminder");

        // Cycle restarted from the fire instant.
        let status = timer.status(t0 + Duration::milliseconds(1_800_000));
        assert_eq!(
            status.next_fire_at_epoch_ms,
            Some(epoch_ms(t0) + 3_600_000)
        );
    }

    #[test]
    fn stop_halts_future_fires_and_is_idempotent() {
        let mut timer = water(60_000);
        timer.start(at(9, 0, 0));
        timer.stop();
        timer.stop();
        assert!(!timer.is_active());
        assert!(timer.tick(at(10, 0, 0)).is_none());
    }

    #[test]
    fn disabled_track_never_fires_regardless_of_timer_state() {
        let mut timer = water(60_000);
        timer.start(at(9, 0, 0));
        timer.set_enabled(false);
        assert!(timer.tick(at(9, 1, 0)).is_none());
        assert!(!timer.is_active());
    }

    #[test]
    fn acknowledge_restarts_without_firing() {
        let t0 = at(9, 0, 0);
        let mut timer = water(1_800_000);
        timer.start(t0);

        assert!(timer.acknowledge(at(9, 10, 0)));
        // The old deadline passes silently; the new one fires.
        assert!(timer.tick(at(9, 30, 0)).is_none());
        assert!(timer.tick(at(9, 40, 0)).is_some());
    }

    #[test]
    fn acknowledge_on_stopped_track_reports_false() {
        let mut timer = water(60_000);
        assert!(!timer.acknowledge(at(9, 0, 0)));
    }

    #[test]
    fn clock_aligned_fires_once_per_date() {
        let mut timer = tea();
        timer.start(at(9, 0, 0));

        assert!(timer.tick(at(15, 14, 59)).is_none());
        let request = timer.tick(at(15, 15, 0)).unwrap();
        assert_eq!(request.kind, ReminderKind::AfternoonTea);
        assert_eq!(request.body, "三点几啦！饮茶先啦！");

        // Repeat ticks inside the target minute are a no-op.
        assert!(timer.tick(at(15, 15, 20)).is_none());
        assert!(timer.tick(at(15, 15, 59)).is_none());

        // Next day fires again.
        let next_day = at(15, 15, 0) + Duration::days(1);
        assert!(timer.tick(next_day).is_some());
    }

    #[test]
    fn restored_marker_suppresses_same_day_fire() {
        let mut timer = tea();
        timer.restore_last_fired(NaiveDate::from_ymd_opt(2026, 8, 4).unwrap());
        timer.start(at(9, 0, 0));
        assert!(timer.tick(at(15, 15, 0)).is_none());
        assert!(timer.tick(at(15, 15, 0) + Duration::days(1)).is_some());
    }

    #[test]
    fn acknowledge_marks_clock_aligned_day_done() {
        let mut timer = tea();
        timer.start(at(9, 0, 0));
        assert!(timer.acknowledge(at(11, 0, 0)));
        assert!(timer.tick(at(15, 15, 0)).is_none());
    }

    #[test]
    fn mode_change_applies_on_next_cycle_only() {
        let t0 = at(9, 0, 0);
        let mut timer = water(1_800_000);
        timer.start(t0);

        timer.set_mode(ReminderMode::Interval { interval_ms: 600_000 }).unwrap();

        // In-flight countdown keeps the old deadline.
        assert!(timer.tick(at(9, 10, 0)).is_none());
        assert!(timer.tick(at(9, 30, 0)).is_some());

        // The restarted cycle uses the new interval.
        assert!(timer.tick(at(9, 39, 59)).is_none());
        assert!(timer.tick(at(9, 40, 0)).is_some());
    }

    #[test]
    fn status_does_not_mutate() {
        let t0 = at(9, 0, 0);
        let mut timer = water(1_800_000);
        timer.start(t0);

        let before = timer.status(at(9, 10, 0));
        assert_eq!(before.time_remaining_ms, Some(1_200_000));
        let after = timer.status(at(9, 10, 0));
        assert_eq!(after.time_remaining_ms, Some(1_200_000));
        assert!(after.is_active);
    }

    #[test]
    fn clock_aligned_status_points_at_next_occurrence() {
        let mut timer = tea();
        timer.start(at(9, 0, 0));

        let morning = timer.status(at(14, 15, 0));
        assert_eq!(morning.time_remaining_ms, Some(60 * 60 * 1_000));

        // After today's fire the next occurrence is tomorrow.
        timer.tick(at(15, 15, 0)).unwrap();
        let evening = timer.status(at(16, 15, 0));
        assert_eq!(evening.time_remaining_ms, Some(23 * 60 * 60 * 1_000));
    }

    #[test]
    fn manual_trigger_skips_the_daily_guard() {
        let mut timer = tea();
        timer.start(at(9, 0, 0));
        assert!(timer.manual_trigger(at(10, 0, 0)).is_some());
        // The real 15:15 fire is still due.
        assert!(timer.tick(at(15, 15, 0)).is_some());
    }
}
