mod native;
mod presenter;
mod tone;

pub use native::{DesktopChannel, NativeChannel, NullChannel};
pub use presenter::{
    NotificationPresenter, Toast, ToastPhase, AUTO_HIDE_MS, EXIT_ANIMATION_MS,
};
pub use tone::{ToneSegment, ToneSink, ToneSpec, TracingToneSink, Waveform};

use serde::{Deserialize, Serialize};

use crate::reminder::ReminderKind;

/// One firing, described by the track that produced it.
///
/// Ephemeral: identity begins when the presenter assigns a toast id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationRequest {
    pub kind: ReminderKind,
    pub title: String,
    pub body: String,
    /// Attribution string for analytics consumers, e.g. `water_reminder`.
    pub source: String,
    /// Whether the originating track wants the tone played.
    pub sound: bool,
}
