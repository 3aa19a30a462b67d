use serde::Serialize;
use wellness_core::{Locale, TrackStatus, UnlockStage};

use crate::common::{build_coordinator, now_local, print_json};

#[derive(Serialize)]
struct StatusReport {
    locale: Locale,
    tracks: Vec<TrackStatus>,
    easter_egg: UnlockStage,
}

pub fn run(locale: Locale) -> Result<(), Box<dyn std::error::Error>> {
    let coordinator = build_coordinator(locale, false, false);
    let report = StatusReport {
        locale,
        tracks: coordinator.statuses(now_local()),
        easter_egg: coordinator.gate().stage(),
    };
    print_json(&report)
}
