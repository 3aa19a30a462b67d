use chrono::NaiveDateTime;
use wellness_core::{
    CoordinatorOptions, Locale, MemoryStore, NotificationPresenter, ReminderCoordinator,
    SettingsStore, TomlKvStore,
};

/// Open the default file store, degrading to a session-only store when the
/// filesystem location is unusable.
pub fn open_store() -> Box<dyn SettingsStore> {
    match TomlKvStore::open_default() {
        Ok(store) => Box::new(store),
        Err(e) => {
            tracing::warn!(error = %e, "settings store unavailable, state will not persist");
            Box::new(MemoryStore::new())
        }
    }
}

/// Coordinator wired for this process. `desktop` selects the native
/// notification channel; status-style commands stay headless.
pub fn build_coordinator(locale: Locale, demo: bool, desktop: bool) -> ReminderCoordinator {
    let presenter = if desktop {
        NotificationPresenter::desktop()
    } else {
        NotificationPresenter::headless()
    };
    let mut options = CoordinatorOptions::with_locale(locale);
    options.demo = demo;
    ReminderCoordinator::new(open_store(), presenter, options)
}

pub fn now_local() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

pub fn print_json<T: serde::Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
