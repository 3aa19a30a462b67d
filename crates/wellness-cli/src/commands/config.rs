use clap::Subcommand;
use serde::Serialize;
use wellness_core::{ReminderKind, TrackSettings};

use crate::common::{open_store, print_json};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print a stored value by key
    Get { key: String },
    /// Set a track's settings bundle (JSON value)
    Set { key: String, value: String },
    /// Print every track's resolved settings bundle
    Show,
}

#[derive(Serialize)]
struct ResolvedBundle {
    kind: ReminderKind,
    key: &'static str,
    settings: TrackSettings,
}

fn kind_for_key(key: &str) -> Option<ReminderKind> {
    ReminderKind::ALL
        .into_iter()
        .find(|kind| kind.settings_key() == key)
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store();

    match action {
        ConfigAction::Get { key } => match store.get(&key) {
            Some(value) => {
                println!("{value}");
                Ok(())
            }
            None => Err(format!("unknown config key: {key}").into()),
        },
        ConfigAction::Set { key, value } => {
            let Some(kind) = kind_for_key(&key) else {
                return Err(format!("unknown config key: {key}").into());
            };
            // Parse and validate before writing so a malformed bundle
            // never lands in the store.
            let settings: TrackSettings = serde_json::from_str(&value)?;
            wellness_core::reminder::mode_for(kind, &settings).validate()?;
            store.set(&key, &serde_json::to_string(&settings)?)?;
            println!("{key} updated");
            Ok(())
        }
        ConfigAction::Show => {
            let bundles: Vec<ResolvedBundle> = ReminderKind::ALL
                .into_iter()
                .map(|kind| {
                    let settings = store
                        .get(kind.settings_key())
                        .and_then(|raw| serde_json::from_str(&raw).ok())
                        .unwrap_or_else(|| TrackSettings::defaults_for(kind));
                    ResolvedBundle {
                        kind,
                        key: kind.settings_key(),
                        settings,
                    }
                })
                .collect();
            print_json(&bundles)
        }
    }
}
