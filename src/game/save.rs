//! Save/load for progression and achievements.
//!
//! Two storage keys: `clickerGame` for the progression aggregate and
//! `achievements` for unlock flags. Field names in the progression JSON are
//! fixed (`totalClicks` stays camelCase) so existing browser saves keep
//! loading. Malformed or missing data falls back to a fresh state; the next
//! autosave overwrites it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::achievements::AchievementBook;
use super::catalog::UpgradeId;
use super::state::GameState;

/// Progression storage key in localStorage.
pub const PROGRESS_KEY: &str = "clickerGame";

/// Achievement flags storage key.
pub const ACHIEVEMENTS_KEY: &str = "achievements";

/// Autosave interval in ticks. 10 ticks/sec x 30 sec = 300 ticks.
pub const AUTOSAVE_INTERVAL: u32 = 300;

/// Abstraction over the key-value store backing saves. The browser build
/// uses localStorage; tests use an in-memory map.
pub trait StoragePort {
    fn load(&self, key: &str) -> Option<String>;
    fn store(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

/// Serialized progression. Unknown upgrade keys survive in the map and are
/// dropped on apply; missing fields take defaults.
#[derive(Serialize, Deserialize, Default)]
#[serde(default)]
struct ProgressSave {
    coins: u64,
    rebirths: u32,
    #[serde(rename = "totalClicks")]
    total_clicks: u64,
    /// Upgrade levels keyed by upgrade id string.
    upgrades: BTreeMap<String, u32>,
    airdrops_collected: u32,
    lucky_event_triggered: bool,
}

#[derive(Serialize, Deserialize)]
struct AchievementSave {
    id: String,
    achieved: bool,
}

fn extract_progress(state: &GameState) -> ProgressSave {
    ProgressSave {
        coins: state.coins,
        rebirths: state.rebirths,
        total_clicks: state.total_clicks,
        upgrades: state
            .upgrade_levels
            .iter()
            .map(|(id, level)| (id.key().to_string(), *level))
            .collect(),
        airdrops_collected: state.airdrops_collected,
        lucky_event_triggered: state.lucky_event_triggered,
    }
}

/// Rebuild a `GameState` from a save. Unrecognized upgrade keys are
/// ignored rather than erroring.
fn apply_progress(save: &ProgressSave) -> GameState {
    let mut state = GameState::new();
    state.coins = save.coins;
    state.rebirths = save.rebirths;
    state.total_clicks = save.total_clicks;
    state.airdrops_collected = save.airdrops_collected;
    state.lucky_event_triggered = save.lucky_event_triggered;
    for (key, level) in &save.upgrades {
        if let Some(id) = UpgradeId::from_key(key) {
            state.upgrade_levels.insert(id, *level);
        }
    }
    state
}

/// Persist progression. Serialization failures are dropped silently; the
/// state stays authoritative in memory.
pub fn save_progress(storage: &mut dyn StoragePort, state: &GameState) {
    if let Ok(json) = serde_json::to_string(&extract_progress(state)) {
        storage.store(PROGRESS_KEY, &json);
    }
}

/// Load progression, or a fresh state when the key is absent or the JSON
/// does not parse.
pub fn load_progress(storage: &dyn StoragePort) -> GameState {
    storage
        .load(PROGRESS_KEY)
        .and_then(|json| serde_json::from_str::<ProgressSave>(&json).ok())
        .map(|save| apply_progress(&save))
        .unwrap_or_default()
}

/// Persist achievement unlock flags as `[{id, achieved}]`.
pub fn save_achievements(storage: &mut dyn StoragePort, book: &AchievementBook) {
    let flags: Vec<AchievementSave> = book
        .achievements
        .iter()
        .map(|a| AchievementSave {
            id: a.id.to_string(),
            achieved: a.achieved,
        })
        .collect();
    if let Ok(json) = serde_json::to_string(&flags) {
        storage.store(ACHIEVEMENTS_KEY, &json);
    }
}

/// Merge persisted unlock flags into the book. Unknown ids are ignored and
/// a saved `false` never revokes an unlock.
pub fn load_achievements(storage: &dyn StoragePort, book: &mut AchievementBook) {
    let Some(json) = storage.load(ACHIEVEMENTS_KEY) else {
        return;
    };
    let Ok(flags) = serde_json::from_str::<Vec<AchievementSave>>(&json) else {
        return;
    };
    let pairs: Vec<(String, bool)> = flags.into_iter().map(|f| (f.id, f.achieved)).collect();
    book.merge_saved(&pairs);
}

/// Wipe both storage keys, for the full game reset.
pub fn delete_all(storage: &mut dyn StoragePort) {
    storage.remove(PROGRESS_KEY);
    storage.remove(ACHIEVEMENTS_KEY);
}

/// In-memory store for tests and headless use.
#[derive(Default)]
pub struct MemoryStorage {
    entries: BTreeMap<String, String>,
}

impl StoragePort for MemoryStorage {
    fn load(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn store(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// Browser localStorage. Absent storage (disabled cookies, sandboxed
/// iframe) degrades to a no-op port.
#[cfg(target_arch = "wasm32")]
pub struct LocalStorage;

#[cfg(target_arch = "wasm32")]
fn web_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

#[cfg(target_arch = "wasm32")]
impl StoragePort for LocalStorage {
    fn load(&self, key: &str) -> Option<String> {
        web_storage()?.get_item(key).ok()?
    }

    fn store(&mut self, key: &str, value: &str) {
        if let Some(storage) = web_storage() {
            if let Err(e) = storage.set_item(key, value) {
                web_sys::console::warn_1(&format!("save failed for {key}: {e:?}").into());
            }
        }
    }

    fn remove(&mut self, key: &str) {
        if let Some(storage) = web_storage() {
            let _ = storage.remove_item(key);
        }
    }
}
