//! Per-kind tone specifications.
//!
//! The tone is a UX signal, not a precise audio contract: the core owns the
//! waveform/frequency/duration data and hands it to a pluggable sink. The
//! default sink only traces; hosts with an audio path install their own.

use serde::{Deserialize, Serialize};

use crate::error::NotifyError;
use crate::reminder::ReminderKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Waveform {
    Sine,
    Triangle,
}

/// One held frequency within a tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToneSegment {
    pub frequency_hz: u16,
    pub duration_ms: u64,
}

/// A complete tone: waveform plus the frequencies it steps through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToneSpec {
    pub waveform: Waveform,
    pub gain: f32,
    pub segments: Vec<ToneSegment>,
}

impl ToneSpec {
    /// Tone for a reminder kind. Afternoon tea and lunch reuse the water
    /// drop tone; their notifications share the water presentation style.
    pub fn for_kind(kind: ReminderKind) -> Self {
        match kind {
            ReminderKind::Water | ReminderKind::AfternoonTea | ReminderKind::Lunch => Self {
                waveform: Waveform::Sine,
                gain: 0.1,
                segments: vec![ToneSegment {
                    frequency_hz: 800,
                    duration_ms: 300,
                }],
            },
            ReminderKind::Standup => Self {
                waveform: Waveform::Triangle,
                gain: 0.1,
                segments: vec![
                    ToneSegment {
                        frequency_hz: 600,
                        duration_ms: 200,
                    },
                    ToneSegment {
                        frequency_hz: 700,
                        duration_ms: 200,
                    },
                ],
            },
        }
    }

    pub fn total_duration_ms(&self) -> u64 {
        self.segments.iter().map(|s| s.duration_ms).sum()
    }
}

/// Playback seam. Implementations must return promptly; long playback
/// belongs on the host side of the seam.
pub trait ToneSink {
    fn play(&mut self, spec: &ToneSpec) -> Result<(), NotifyError>;
}

/// Default sink: records the tone at debug level and plays nothing.
#[derive(Debug, Default)]
pub struct TracingToneSink;

impl ToneSink for TracingToneSink {
    fn play(&mut self, spec: &ToneSpec) -> Result<(), NotifyError> {
        tracing::debug!(
            waveform = ?spec.waveform,
            duration_ms = spec.total_duration_ms(),
            "tone requested"
        );
        Ok(())
    }
}
