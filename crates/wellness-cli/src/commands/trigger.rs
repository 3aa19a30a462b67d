use wellness_core::{Locale, ReminderKind};

use crate::common::{build_coordinator, now_local};

/// Fire one reminder on demand. The daily guard of clock-aligned tracks is
/// left untouched, so the real scheduled fire still happens.
pub fn run(kind: ReminderKind, locale: Locale) -> Result<(), Box<dyn std::error::Error>> {
    let mut coordinator = build_coordinator(locale, false, true);
    coordinator.presenter_mut().request_permission();

    match coordinator.trigger_now(kind, now_local()) {
        Some(event) => {
            println!("{}", serde_json::to_string(&event)?);
            Ok(())
        }
        None => Err(format!(
            "track '{}' is not available in this locale or is disabled",
            kind.as_str()
        )
        .into()),
    }
}
