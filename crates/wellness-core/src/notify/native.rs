//! Native notification channel.
//!
//! The platform notification capability is a best-effort enhancement behind
//! a trait; absence or denial is a normal degraded mode and the in-process
//! toast channel keeps working without it.

use crate::error::NotifyError;

use super::presenter::AUTO_HIDE_MS;
use super::NotificationRequest;

pub trait NativeChannel {
    /// Ask the platform for permission. Resolves immediately on desktop.
    fn request_permission(&mut self) -> Result<bool, NotifyError>;

    /// Deliver one native notification.
    fn show(&mut self, request: &NotificationRequest) -> Result<(), NotifyError>;
}

/// Desktop channel backed by the OS notification server.
#[derive(Debug, Default)]
pub struct DesktopChannel;

impl NativeChannel for DesktopChannel {
    fn request_permission(&mut self) -> Result<bool, NotifyError> {
        // Desktop servers do not gate ahead of time; delivery failures
        // surface per-show instead.
        Ok(true)
    }

    fn show(&mut self, request: &NotificationRequest) -> Result<(), NotifyError> {
        notify_rust::Notification::new()
            .appname("wellness-reminder")
            .summary(&request.title)
            .body(&request.body)
            .timeout(notify_rust::Timeout::Milliseconds(AUTO_HIDE_MS as u32))
            .show()
            .map(|_| ())
            .map_err(|e| NotifyError::Delivery(e.to_string()))
    }
}

/// Channel for headless hosts and tests: permission is always denied.
#[derive(Debug, Default)]
pub struct NullChannel;

impl NativeChannel for NullChannel {
    fn request_permission(&mut self) -> Result<bool, NotifyError> {
        Ok(false)
    }

    fn show(&mut self, _request: &NotificationRequest) -> Result<(), NotifyError> {
        Err(NotifyError::ChannelUnavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_channel_denies_permission() {
        let mut channel = NullChannel;
        assert_eq!(channel.request_permission().unwrap(), false);
        let request = NotificationRequest {
            kind: crate::reminder::ReminderKind::Water,
            title: "t".into(),
            body: "b".into(),
            source: "water_reminder".into(),
            sound: false,
        };
        assert!(channel.show(&request).is_err());
    }
}
