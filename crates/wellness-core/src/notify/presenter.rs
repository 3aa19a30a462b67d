//! Notification presenter.
//!
//! One presenter instance is shared by every reminder track. It records an
//! in-process toast for each firing (always), raises a native notification
//! when permission is granted (best-effort), and plays the kind's tone
//! (best-effort). `show` never blocks and never raises; each sub-step is
//! fenced so a sound failure cannot suppress the toast.
//!
//! Toast lifecycle:
//!
//! ```text
//! Visible --auto-hide deadline or dismiss()--> Closing --exit delay--> gone
//! ```
//!
//! Each phase transition happens at most once per toast; a manual dismiss
//! replaces the pending auto-hide deadline rather than racing it.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::clock::epoch_ms;
use crate::reminder::ReminderKind;

use super::native::{DesktopChannel, NativeChannel, NullChannel};
use super::tone::{ToneSink, ToneSpec, TracingToneSink};
use super::NotificationRequest;

/// Toasts auto-hide after five seconds.
pub const AUTO_HIDE_MS: u64 = 5_000;
/// Removal lags the close transition by the UI exit-animation delay.
pub const EXIT_ANIMATION_MS: u64 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum ToastPhase {
    Visible { hide_at_epoch_ms: u64 },
    Closing { remove_at_epoch_ms: u64 },
}

/// Runtime record of one visible notification.
#[derive(Debug, Clone, Serialize)]
pub struct Toast {
    pub id: u64,
    pub kind: ReminderKind,
    pub title: String,
    pub body: String,
    pub source: String,
    pub shown_at_epoch_ms: u64,
    pub phase: ToastPhase,
}

pub struct NotificationPresenter {
    native: Box<dyn NativeChannel>,
    tone: Box<dyn ToneSink>,
    has_permission: bool,
    sound_enabled: bool,
    next_id: u64,
    toasts: BTreeMap<u64, Toast>,
}

impl NotificationPresenter {
    pub fn new(native: Box<dyn NativeChannel>, tone: Box<dyn ToneSink>) -> Self {
        Self {
            native,
            tone,
            has_permission: false,
            sound_enabled: true,
            next_id: 0,
            toasts: BTreeMap::new(),
        }
    }

    /// Presenter wired to the OS notification server.
    pub fn desktop() -> Self {
        Self::new(Box::new(DesktopChannel), Box::new(TracingToneSink))
    }

    /// Presenter with no native capability; toasts only.
    pub fn headless() -> Self {
        Self::new(Box::new(NullChannel), Box::new(TracingToneSink))
    }

    /// Ask the native channel for permission. On denial or error the
    /// presenter keeps working through the toast channel alone.
    pub fn request_permission(&mut self) -> bool {
        match self.native.request_permission() {
            Ok(granted) => {
                self.has_permission = granted;
                if !granted {
                    tracing::info!("native notifications denied, using toasts only");
                }
                granted
            }
            Err(e) => {
                tracing::warn!(error = %e, "permission request failed, using toasts only");
                self.has_permission = false;
                false
            }
        }
    }

    pub fn has_permission(&self) -> bool {
        self.has_permission
    }

    pub fn set_sound_enabled(&mut self, enabled: bool) {
        self.sound_enabled = enabled;
    }

    /// Present one notification. Always records a toast and returns its id;
    /// native delivery and tone playback are fire-and-forget.
    pub fn show(&mut self, request: NotificationRequest, now: NaiveDateTime) -> u64 {
        let now_ms = epoch_ms(now);
        self.next_id += 1;
        let id = self.next_id;

        if self.has_permission {
            if let Err(e) = self.native.show(&request) {
                tracing::warn!(id, error = %e, "native notification failed, toast still shown");
            }
        }

        if self.sound_enabled && request.sound {
            let spec = ToneSpec::for_kind(request.kind);
            if let Err(e) = self.tone.play(&spec) {
                tracing::warn!(id, error = %e, "tone playback failed, toast still shown");
            }
        }

        self.toasts.insert(
            id,
            Toast {
                id,
                kind: request.kind,
                title: request.title,
                body: request.body,
                source: request.source,
                shown_at_epoch_ms: now_ms,
                phase: ToastPhase::Visible {
                    hide_at_epoch_ms: now_ms + AUTO_HIDE_MS,
                },
            },
        );
        tracing::debug!(id, kind = request.kind.as_str(), "toast shown");
        id
    }

    /// Close a toast early. Idempotent: unknown or already-closing ids are a
    /// no-op. The pending auto-hide deadline is superseded by the phase
    /// change before the removal is scheduled.
    pub fn dismiss(&mut self, id: u64, now: NaiveDateTime) {
        match self.toasts.get_mut(&id) {
            Some(toast) => {
                if let ToastPhase::Visible { .. } = toast.phase {
                    toast.phase = ToastPhase::Closing {
                        remove_at_epoch_ms: epoch_ms(now) + EXIT_ANIMATION_MS,
                    };
                    tracing::debug!(id, "toast dismissed");
                }
            }
            None => {
                tracing::debug!(id, "dismiss for unknown toast ignored");
            }
        }
    }

    /// Advance toast phases: expire auto-hide deadlines, drop toasts whose
    /// exit delay has elapsed.
    pub fn tick(&mut self, now: NaiveDateTime) {
        let now_ms = epoch_ms(now);
        for toast in self.toasts.values_mut() {
            if let ToastPhase::Visible { hide_at_epoch_ms } = toast.phase {
                if now_ms >= hide_at_epoch_ms {
                    toast.phase = ToastPhase::Closing {
                        remove_at_epoch_ms: now_ms + EXIT_ANIMATION_MS,
                    };
                }
            }
        }
        self.toasts.retain(|_, toast| {
            !matches!(toast.phase, ToastPhase::Closing { remove_at_epoch_ms } if now_ms >= remove_at_epoch_ms)
        });
    }

    pub fn active_toasts(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.values()
    }

    pub fn toast(&self, id: u64) -> Option<&Toast> {
        self.toasts.get(&id)
    }
}
