//! Two-stage easter-egg unlock gate.
//!
//! ```text
//! Locked --(first afternoon-tea popup)--> Shown --(share action)--> Unlocked
//! ```
//!
//! Both flags persist immediately on transition and are re-read at every
//! process start. Flags only move forward; the explicit `reset` operation
//! exists for tests and the debug harness.

use serde::{Deserialize, Serialize};

use crate::storage::SettingsStore;

pub const FIRST_SHOWN_KEY: &str = "easter_egg.first_popup_shown";
pub const UNLOCKED_KEY: &str = "easter_egg.second_tier_unlocked";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnlockStage {
    Locked,
    Shown,
    Unlocked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EasterEggGate {
    first_popup_shown: bool,
    second_tier_unlocked: bool,
}

impl EasterEggGate {
    /// Fresh gate with nothing unlocked.
    pub fn locked() -> Self {
        Self {
            first_popup_shown: false,
            second_tier_unlocked: false,
        }
    }

    /// Restore the gate from the store. A stored unlock without the shown
    /// flag violates the invariant; the shown flag is promoted so the state
    /// stays monotonic.
    pub fn load(store: &dyn SettingsStore) -> Self {
        let first_popup_shown = flag(store, FIRST_SHOWN_KEY);
        let second_tier_unlocked = flag(store, UNLOCKED_KEY);
        if second_tier_unlocked && !first_popup_shown {
            tracing::warn!("unlock flag present without shown flag, repairing");
            return Self {
                first_popup_shown: true,
                second_tier_unlocked: true,
            };
        }
        Self {
            first_popup_shown,
            second_tier_unlocked,
        }
    }

    pub fn stage(&self) -> UnlockStage {
        match (self.first_popup_shown, self.second_tier_unlocked) {
            (_, true) => UnlockStage::Unlocked,
            (true, false) => UnlockStage::Shown,
            (false, false) => UnlockStage::Locked,
        }
    }

    pub fn first_popup_shown(&self) -> bool {
        self.first_popup_shown
    }

    pub fn second_tier_unlocked(&self) -> bool {
        self.second_tier_unlocked
    }

    /// Record the first qualifying popup. Returns true only on the actual
    /// transition; repeats are no-ops.
    pub fn mark_shown(&mut self, store: &mut dyn SettingsStore) -> bool {
        if self.first_popup_shown {
            return false;
        }
        self.first_popup_shown = true;
        persist(store, FIRST_SHOWN_KEY, true);
        tracing::info!("easter egg shown for the first time");
        true
    }

    /// Record a completed share action. Rejected while still `Locked`:
    /// tier two cannot unlock before tier one was seen.
    pub fn mark_unlocked(&mut self, store: &mut dyn SettingsStore) -> bool {
        if !self.first_popup_shown {
            tracing::debug!("share before first popup ignored");
            return false;
        }
        if self.second_tier_unlocked {
            return false;
        }
        self.second_tier_unlocked = true;
        persist(store, UNLOCKED_KEY, true);
        tracing::info!("second-tier easter egg unlocked");
        true
    }

    /// Clear both flags. Debug/test affordance only.
    pub fn reset(&mut self, store: &mut dyn SettingsStore) {
        self.first_popup_shown = false;
        self.second_tier_unlocked = false;
        persist(store, FIRST_SHOWN_KEY, false);
        persist(store, UNLOCKED_KEY, false);
        tracing::info!("easter egg state reset");
    }
}

fn flag(store: &dyn SettingsStore, key: &str) -> bool {
    store.get(key).as_deref() == Some("true")
}

fn persist(store: &mut dyn SettingsStore, key: &str, value: bool) {
    if let Err(e) = store.set(key, if value { "true" } else { "false" }) {
        tracing::warn!(key, error = %e, "unlock flag not persisted, continuing in-memory");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn starts_locked() {
        assert_eq!(EasterEggGate::locked().stage(), UnlockStage::Locked);
    }

    #[test]
    fn full_unlock_sequence() {
        let mut store = MemoryStore::new();
        let mut gate = EasterEggGate::locked();

        assert!(gate.mark_shown(&mut store));
        assert_eq!(gate.stage(), UnlockStage::Shown);

        assert!(gate.mark_unlocked(&mut store));
        assert_eq!(gate.stage(), UnlockStage::Unlocked);
    }

    #[test]
    fn unlock_before_shown_has_no_effect() {
        let mut store = MemoryStore::new();
        let mut gate = EasterEggGate::locked();

        assert!(!gate.mark_unlocked(&mut store));
        assert_eq!(gate.stage(), UnlockStage::Locked);
        assert_eq!(store.get(UNLOCKED_KEY), None);
    }

    #[test]
    fn transitions_are_monotonic() {
        let mut store = MemoryStore::new();
        let mut gate = EasterEggGate::locked();

        assert!(gate.mark_shown(&mut store));
        assert!(!gate.mark_shown(&mut store));

        assert!(gate.mark_unlocked(&mut store));
        assert!(!gate.mark_unlocked(&mut store));
        assert_eq!(gate.stage(), UnlockStage::Unlocked);
    }

    #[test]
    fn state_survives_reload() {
        let mut store = MemoryStore::new();
        let mut gate = EasterEggGate::locked();
        gate.mark_shown(&mut store);
        gate.mark_unlocked(&mut store);

        let reloaded = EasterEggGate::load(&store);
        assert_eq!(reloaded.stage(), UnlockStage::Unlocked);
    }

    #[test]
    fn reset_returns_to_locked() {
        let mut store = MemoryStore::new();
        let mut gate = EasterEggGate::locked();
        gate.mark_shown(&mut store);
        gate.mark_unlocked(&mut store);

        gate.reset(&mut store);
        assert_eq!(gate.stage(), UnlockStage::Locked);
        assert_eq!(EasterEggGate::load(&store).stage(), UnlockStage::Locked);
    }

    #[test]
    fn load_repairs_invariant_violation() {
        let mut store = MemoryStore::new();
        store.set(UNLOCKED_KEY, "true").unwrap();

        let gate = EasterEggGate::load(&store);
        assert!(gate.first_popup_shown());
        assert_eq!(gate.stage(), UnlockStage::Unlocked);
    }
}
