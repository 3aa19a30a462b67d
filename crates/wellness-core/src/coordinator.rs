//! Reminder coordinator.
//!
//! Owns the track set, the shared presenter, the unlock gate and the
//! settings store. Water and standup tracks always exist; the afternoon-tea
//! and lunch tracks are created only when the locale and feature gates pass,
//! and the lunch track's `enabled` flag is driven by the tier-two unlock --
//! re-evaluated at startup and flipped live when the share action lands.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};

use crate::easter_egg::EasterEggGate;
use crate::events::Event;
use crate::locale::Locale;
use crate::notify::NotificationPresenter;
use crate::reminder::{
    mode_for, ReminderKind, ReminderMode, ReminderTimer, StartOutcome, TrackSettings,
    TrackStatus, DEMO_INTERVAL_MS,
};
use crate::storage::SettingsStore;

#[derive(Debug, Clone)]
pub struct CoordinatorOptions {
    pub locale: Locale,
    /// Feature switch for the afternoon-tea track.
    pub afternoon_tea_enabled: bool,
    /// Feature switch for the whole two-stage easter egg.
    pub easter_egg_enabled: bool,
    /// Demo mode: interval tracks run on 30-second cycles.
    pub demo: bool,
}

impl Default for CoordinatorOptions {
    fn default() -> Self {
        Self {
            locale: Locale::En,
            afternoon_tea_enabled: true,
            easter_egg_enabled: true,
            demo: false,
        }
    }
}

impl CoordinatorOptions {
    pub fn with_locale(locale: Locale) -> Self {
        Self {
            locale,
            ..Self::default()
        }
    }
}

pub struct ReminderCoordinator {
    store: Box<dyn SettingsStore>,
    presenter: NotificationPresenter,
    options: CoordinatorOptions,
    gate: EasterEggGate,
    gate_eligible: bool,
    tracks: BTreeMap<ReminderKind, ReminderTimer>,
}

impl ReminderCoordinator {
    /// Build the coordinator, restoring settings, last-fired markers and
    /// the unlock state from the store. Bad stored data falls back to safe
    /// defaults; construction itself never fails.
    pub fn new(
        store: Box<dyn SettingsStore>,
        presenter: NotificationPresenter,
        options: CoordinatorOptions,
    ) -> Self {
        let gate_eligible = options.locale == Locale::ZhCn && options.easter_egg_enabled;
        let gate = if gate_eligible {
            EasterEggGate::load(store.as_ref())
        } else {
            EasterEggGate::locked()
        };

        let mut coordinator = Self {
            store,
            presenter,
            options,
            gate,
            gate_eligible,
            tracks: BTreeMap::new(),
        };

        coordinator.ensure_track(ReminderKind::Water);
        coordinator.ensure_track(ReminderKind::Standup);
        if coordinator.options.locale == Locale::ZhCn {
            if coordinator.options.afternoon_tea_enabled {
                coordinator.ensure_track(ReminderKind::AfternoonTea);
            }
            if coordinator.gate_eligible {
                coordinator.ensure_track(ReminderKind::Lunch);
            }
        }
        coordinator
    }

    // ── Track construction ───────────────────────────────────────────

    /// Create the track for `kind` if it does not exist yet. Idempotent:
    /// a second call for the same kind leaves the live timer untouched.
    pub fn ensure_track(&mut self, kind: ReminderKind) {
        if self.tracks.contains_key(&kind) {
            tracing::debug!(kind = kind.as_str(), "track already exists, skipping");
            return;
        }

        let mut settings = self.load_settings(kind);
        if kind == ReminderKind::Lunch {
            // The unlock gate, not the stored bundle, owns this flag.
            settings.enabled = self.gate.second_tier_unlocked();
        }

        let mode = self.mode_for_kind(kind, &settings);
        let mut timer = match ReminderTimer::new(kind, mode, &settings, self.options.locale) {
            Ok(timer) => timer,
            Err(e) => {
                tracing::warn!(
                    kind = kind.as_str(),
                    error = %e,
                    "invalid track configuration, falling back to defaults"
                );
                let defaults = TrackSettings::defaults_for(kind);
                let mode = self.mode_for_kind(kind, &defaults);
                match ReminderTimer::new(kind, mode, &defaults, self.options.locale) {
                    Ok(timer) => timer,
                    Err(e) => {
                        tracing::error!(kind = kind.as_str(), error = %e, "default track invalid");
                        return;
                    }
                }
            }
        };

        if let Some(marker_key) = kind.marker_key() {
            if let Some(date) = self.load_marker(marker_key) {
                timer.restore_last_fired(date);
            }
        }
        self.tracks.insert(kind, timer);
    }

    fn mode_for_kind(&self, kind: ReminderKind, settings: &TrackSettings) -> ReminderMode {
        if self.options.demo
            && matches!(kind, ReminderKind::Water | ReminderKind::Standup)
        {
            return ReminderMode::Interval {
                interval_ms: DEMO_INTERVAL_MS,
            };
        }
        mode_for(kind, settings)
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Start every enabled track.
    pub fn start_all(&mut self, now: NaiveDateTime) -> Vec<Event> {
        let mut events = Vec::new();
        for timer in self.tracks.values_mut() {
            if timer.start(now) == StartOutcome::Started {
                events.push(Event::ReminderStarted {
                    kind: timer.kind(),
                    at: now,
                });
            }
        }
        events
    }

    /// Stop every track; after this returns no further fires occur.
    pub fn stop_all(&mut self) {
        for timer in self.tracks.values_mut() {
            timer.stop();
        }
    }

    /// Advance every track and the presenter by one tick.
    ///
    /// Fired requests are written through to the store (clock-aligned
    /// markers), drive the easter-egg gate, and land on the shared
    /// presenter. A failure in any of those steps cannot reach another
    /// track's path.
    pub fn tick(&mut self, now: NaiveDateTime) -> Vec<Event> {
        let mut events = Vec::new();
        let kinds: Vec<ReminderKind> = self.tracks.keys().copied().collect();
        for kind in kinds {
            let Some(timer) = self.tracks.get_mut(&kind) else {
                continue;
            };
            let Some(request) = timer.tick(now) else {
                continue;
            };
            let fired_date = timer.last_fired_date();

            if let Some(marker_key) = kind.marker_key() {
                self.persist_marker(marker_key, fired_date);
            }

            if kind == ReminderKind::AfternoonTea
                && self.gate_eligible
                && self.gate.mark_shown(self.store.as_mut())
            {
                events.push(Event::EasterEggShown { at: now });
            }

            let source = request.source.clone();
            let toast_id = self.presenter.show(request, now);
            events.push(Event::ReminderFired {
                kind,
                toast_id,
                source,
                at: now,
            });
        }
        self.presenter.tick(now);
        events
    }

    /// User completed a share action. On the real `Shown -> Unlocked`
    /// transition the lunch track is enabled, persisted, and started within
    /// this same call.
    pub fn share_completed(&mut self, now: NaiveDateTime) -> Vec<Event> {
        let mut events = Vec::new();
        if !self.gate_eligible {
            return events;
        }
        if !self.gate.mark_unlocked(self.store.as_mut()) {
            return events;
        }
        events.push(Event::TierTwoUnlocked { at: now });

        self.ensure_track(ReminderKind::Lunch);
        let mut settings = self.load_settings(ReminderKind::Lunch);
        settings.enabled = true;
        self.persist_settings(ReminderKind::Lunch, &settings);

        if let Some(timer) = self.tracks.get_mut(&ReminderKind::Lunch) {
            timer.set_enabled(true);
            if timer.start(now) == StartOutcome::Started {
                events.push(Event::ReminderStarted {
                    kind: ReminderKind::Lunch,
                    at: now,
                });
            }
        }
        events
    }

    /// Early completion of the current cycle for one track.
    pub fn acknowledge(&mut self, kind: ReminderKind, now: NaiveDateTime) -> Option<Event> {
        if !self.tracks.get_mut(&kind)?.acknowledge(now) {
            return None;
        }
        if let Some(marker_key) = kind.marker_key() {
            let date = self.tracks.get(&kind).and_then(|t| t.last_fired_date());
            self.persist_marker(marker_key, date);
        }
        Some(Event::ReminderAcknowledged { kind, at: now })
    }

    /// Debug-harness affordance: fire one track's notification on demand.
    pub fn trigger_now(&mut self, kind: ReminderKind, now: NaiveDateTime) -> Option<Event> {
        let timer = self.tracks.get_mut(&kind)?;
        let request = timer.manual_trigger(now)?;
        let source = request.source.clone();
        let toast_id = self.presenter.show(request, now);
        Some(Event::ReminderFired {
            kind,
            toast_id,
            source,
            at: now,
        })
    }

    /// Debug-harness affordance: relock the easter egg and disable lunch.
    pub fn reset_easter_egg(&mut self) {
        if !self.gate_eligible {
            return;
        }
        self.gate.reset(self.store.as_mut());
        let mut settings = self.load_settings(ReminderKind::Lunch);
        settings.enabled = false;
        self.persist_settings(ReminderKind::Lunch, &settings);
        if let Some(timer) = self.tracks.get_mut(&ReminderKind::Lunch) {
            timer.set_enabled(false);
        }
    }

    // ── Settings ─────────────────────────────────────────────────────

    /// Validated settings write-through. Interval changes apply on the
    /// track's next cycle, never to an in-flight countdown.
    pub fn set_track_settings(
        &mut self,
        kind: ReminderKind,
        settings: TrackSettings,
    ) -> Result<(), crate::error::CoreError> {
        let mode = self.mode_for_kind(kind, &settings);
        mode.validate()?;
        self.persist_settings(kind, &settings);
        if let Some(timer) = self.tracks.get_mut(&kind) {
            timer.set_mode(mode)?;
            timer.set_sound(settings.sound);
            timer.set_enabled(settings.enabled);
        }
        Ok(())
    }

    fn load_settings(&self, kind: ReminderKind) -> TrackSettings {
        let Some(raw) = self.store.get(kind.settings_key()) else {
            return TrackSettings::defaults_for(kind);
        };
        match serde_json::from_str::<TrackSettings>(&raw) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!(
                    kind = kind.as_str(),
                    error = %e,
                    "unreadable settings bundle, using defaults"
                );
                TrackSettings::defaults_for(kind)
            }
        }
    }

    fn persist_settings(&mut self, kind: ReminderKind, settings: &TrackSettings) {
        match serde_json::to_string(settings) {
            Ok(json) => {
                if let Err(e) = self.store.set(kind.settings_key(), &json) {
                    tracing::warn!(kind = kind.as_str(), error = %e, "settings not persisted");
                }
            }
            Err(e) => tracing::warn!(kind = kind.as_str(), error = %e, "settings not serialized"),
        }
    }

    fn load_marker(&self, key: &str) -> Option<NaiveDate> {
        let raw = self.store.get(key)?;
        match raw.parse::<NaiveDate>() {
            Ok(date) => Some(date),
            Err(e) => {
                tracing::warn!(key, error = %e, "unreadable fired-date marker ignored");
                None
            }
        }
    }

    fn persist_marker(&mut self, key: &str, date: Option<NaiveDate>) {
        let Some(date) = date else { return };
        if let Err(e) = self.store.set(key, &date.to_string()) {
            tracing::warn!(key, error = %e, "fired-date marker not persisted");
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn statuses(&self, now: NaiveDateTime) -> Vec<TrackStatus> {
        self.tracks.values().map(|t| t.status(now)).collect()
    }

    pub fn track_status(&self, kind: ReminderKind, now: NaiveDateTime) -> Option<TrackStatus> {
        self.tracks.get(&kind).map(|t| t.status(now))
    }

    pub fn has_track(&self, kind: ReminderKind) -> bool {
        self.tracks.contains_key(&kind)
    }

    pub fn gate(&self) -> &EasterEggGate {
        &self.gate
    }

    pub fn presenter(&self) -> &NotificationPresenter {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut NotificationPresenter {
        &mut self.presenter
    }
}

impl Drop for ReminderCoordinator {
    fn drop(&mut self) {
        self.stop_all();
    }
}
