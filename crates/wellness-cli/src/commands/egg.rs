use clap::Subcommand;
use serde::Serialize;
use wellness_core::{Locale, UnlockStage};

use crate::common::{build_coordinator, now_local, print_json};

#[derive(Subcommand)]
pub enum EggAction {
    /// Print the unlock state
    Status,
    /// Record a completed share action (unlocks the lunch reminder)
    Share,
    /// Relock both tiers (testing affordance)
    Reset,
}

#[derive(Serialize)]
struct EggReport {
    stage: UnlockStage,
    first_popup_shown: bool,
    second_tier_unlocked: bool,
}

pub fn run(action: EggAction) -> Result<(), Box<dyn std::error::Error>> {
    // The easter egg is a Chinese-locale feature; the harness pins the
    // locale accordingly.
    let mut coordinator = build_coordinator(Locale::ZhCn, false, false);

    match action {
        EggAction::Status => {}
        EggAction::Share => {
            let events = coordinator.share_completed(now_local());
            for event in &events {
                println!("{}", serde_json::to_string(event)?);
            }
            if events.is_empty() {
                eprintln!("no transition: the first popup has not been shown yet, or tier two is already unlocked");
            }
        }
        EggAction::Reset => {
            coordinator.reset_easter_egg();
        }
    }

    let gate = coordinator.gate();
    print_json(&EggReport {
        stage: gate.stage(),
        first_popup_shown: gate.first_popup_shown(),
        second_tier_unlocked: gate.second_tier_unlocked(),
    })
}
