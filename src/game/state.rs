//! Progression state and its command reducer.
//!
//! `GameState` is the single persisted aggregate. Every mutation goes
//! through `apply`, which takes a `Command` and returns the next state,
//! the only writer path, so the rest of the game reads freely.

use std::collections::BTreeMap;

use super::catalog::{definition, UpgradeId};

/// Canonical progression state.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    /// Primary resource.
    pub coins: u64,
    /// Permanent multiplier counter; survives progress resets.
    pub rebirths: u32,
    /// Lifetime manual clicks.
    pub total_clicks: u64,
    /// Sparse upgrade levels; absent id means level 0.
    pub upgrade_levels: BTreeMap<UpgradeId, u32>,
    /// Airdrops collected this run.
    pub airdrops_collected: u32,
    /// Sticky flag for the one-in-a-million click. Never reset by progress resets.
    pub lucky_event_triggered: bool,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    pub fn new() -> Self {
        Self {
            coins: 0,
            rebirths: 0,
            total_clicks: 0,
            upgrade_levels: BTreeMap::new(),
            airdrops_collected: 0,
            lucky_event_triggered: false,
        }
    }

    /// Current level of an upgrade (0 when never purchased).
    pub fn level(&self, id: UpgradeId) -> u32 {
        self.upgrade_levels.get(&id).copied().unwrap_or(0)
    }

    /// Sum of all upgrade levels, for achievements and stats.
    pub fn total_upgrade_levels(&self) -> u64 {
        self.upgrade_levels.values().map(|&v| v as u64).sum()
    }

    /// Apply a command, returning the next state. Total: commands whose
    /// precondition fails (unaffordable purchases) return the state
    /// unchanged rather than erroring.
    pub fn apply(&self, cmd: &Command) -> GameState {
        let mut next = self.clone();
        match cmd {
            Command::AddCoins { amount } => {
                next.coins = next.coins.saturating_add(*amount);
            }
            Command::RemoveCoins { amount } => {
                next.coins = next.coins.saturating_sub(*amount);
            }
            Command::RecordClick => {
                next.total_clicks += 1;
            }
            Command::BuyUpgrade { id, cost } => {
                if next.coins < *cost || at_max(&next, *id, 1) {
                    return next;
                }
                next.coins -= cost;
                *next.upgrade_levels.entry(*id).or_insert(0) += 1;
            }
            Command::BuyUpgradeBulk {
                id,
                quantity,
                total_cost,
            } => {
                if *quantity == 0 || next.coins < *total_cost || at_max(&next, *id, *quantity) {
                    return next;
                }
                next.coins -= total_cost;
                *next.upgrade_levels.entry(*id).or_insert(0) += quantity;
            }
            Command::CollectAirdrop { amount } => {
                next.airdrops_collected += 1;
                next.coins = next.coins.saturating_add(*amount);
            }
            Command::TriggerLuckyEvent => {
                next.lucky_event_triggered = true;
            }
            Command::AddRebirth => {
                next.rebirths += 1;
            }
            Command::ResetProgress => {
                next.coins = 0;
                next.upgrade_levels.clear();
                next.airdrops_collected = 0;
                // rebirths, total_clicks, lucky_event_triggered retained
            }
            Command::ResetGame => {
                next = GameState::new();
            }
        }
        next
    }
}

/// Would buying `quantity` more levels push the upgrade past its max?
fn at_max(state: &GameState, id: UpgradeId, quantity: u32) -> bool {
    match definition(id).max_level {
        Some(max) => state.level(id) + quantity > max,
        None => false,
    }
}

/// A state transition. Purchases carry the price the caller quoted via the
/// solver; `apply` re-validates it against the coin balance defensively.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    AddCoins { amount: u64 },
    RemoveCoins { amount: u64 },
    RecordClick,
    BuyUpgrade { id: UpgradeId, cost: u64 },
    BuyUpgradeBulk { id: UpgradeId, quantity: u32, total_cost: u64 },
    CollectAirdrop { amount: u64 },
    TriggerLuckyEvent,
    AddRebirth,
    ResetProgress,
    ResetGame,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_coins() {
        let s = GameState::new().apply(&Command::AddCoins { amount: 120 });
        assert_eq!(s.coins, 120);
    }

    #[test]
    fn remove_coins_clamps_at_zero() {
        let mut s = GameState::new();
        s.coins = 50;
        let s = s.apply(&Command::RemoveCoins { amount: 80 });
        assert_eq!(s.coins, 0);
    }

    #[test]
    fn record_click_counts_up() {
        let s = GameState::new()
            .apply(&Command::RecordClick)
            .apply(&Command::RecordClick);
        assert_eq!(s.total_clicks, 2);
    }

    #[test]
    fn buy_upgrade_deducts_and_levels() {
        let mut s = GameState::new();
        s.coins = 100;
        let s = s.apply(&Command::BuyUpgrade {
            id: UpgradeId::AutoClicker,
            cost: 10,
        });
        assert_eq!(s.coins, 90);
        assert_eq!(s.level(UpgradeId::AutoClicker), 1);
    }

    #[test]
    fn buy_upgrade_unaffordable_is_noop() {
        let mut s = GameState::new();
        s.coins = 5;
        let next = s.apply(&Command::BuyUpgrade {
            id: UpgradeId::AutoClicker,
            cost: 10,
        });
        assert_eq!(next, s);
    }

    #[test]
    fn buy_upgrade_at_max_level_is_noop() {
        let mut s = GameState::new();
        s.coins = 1_000_000;
        s.upgrade_levels.insert(UpgradeId::LuckyCoins, 10); // max is 10
        let next = s.apply(&Command::BuyUpgrade {
            id: UpgradeId::LuckyCoins,
            cost: 150,
        });
        assert_eq!(next, s);
    }

    #[test]
    fn buy_bulk_applies_quantity() {
        let mut s = GameState::new();
        s.coins = 1000;
        let s = s.apply(&Command::BuyUpgradeBulk {
            id: UpgradeId::AutoClicker,
            quantity: 13,
            total_cost: 910,
        });
        assert_eq!(s.coins, 90);
        assert_eq!(s.level(UpgradeId::AutoClicker), 13);
    }

    #[test]
    fn buy_bulk_past_max_is_noop() {
        let mut s = GameState::new();
        s.coins = 1_000_000;
        s.upgrade_levels.insert(UpgradeId::LuckyCoins, 8);
        let next = s.apply(&Command::BuyUpgradeBulk {
            id: UpgradeId::LuckyCoins,
            quantity: 3, // 8 + 3 > 10
            total_cost: 100,
        });
        assert_eq!(next, s);
    }

    #[test]
    fn collect_airdrop_counts_and_pays() {
        let s = GameState::new().apply(&Command::CollectAirdrop { amount: 55 });
        assert_eq!(s.airdrops_collected, 1);
        assert_eq!(s.coins, 55);
    }

    #[test]
    fn reset_progress_retains_permanent_fields() {
        let mut s = GameState::new();
        s.coins = 500;
        s.rebirths = 3;
        s.total_clicks = 77;
        s.upgrade_levels.insert(UpgradeId::ClickPower, 4);
        s.airdrops_collected = 9;
        s.lucky_event_triggered = true;
        let s = s.apply(&Command::ResetProgress);
        assert_eq!(s.coins, 0);
        assert!(s.upgrade_levels.is_empty());
        assert_eq!(s.airdrops_collected, 0);
        assert_eq!(s.rebirths, 3);
        assert_eq!(s.total_clicks, 77);
        assert!(s.lucky_event_triggered);
    }

    #[test]
    fn reset_progress_is_idempotent() {
        let mut s = GameState::new();
        s.coins = 500;
        s.rebirths = 2;
        s.upgrade_levels.insert(UpgradeId::ClickPower, 4);
        let once = s.apply(&Command::ResetProgress);
        let twice = once.apply(&Command::ResetProgress);
        assert_eq!(once, twice);
    }

    #[test]
    fn reset_game_restores_defaults() {
        let mut s = GameState::new();
        s.coins = 500;
        s.rebirths = 3;
        s.lucky_event_triggered = true;
        let s = s.apply(&Command::ResetGame);
        assert_eq!(s, GameState::new());
    }

    #[test]
    fn level_defaults_to_zero() {
        let s = GameState::new();
        assert_eq!(s.level(UpgradeId::ExtraDropValue), 0);
    }

    #[test]
    fn total_upgrade_levels_sums_map() {
        let mut s = GameState::new();
        s.upgrade_levels.insert(UpgradeId::AutoClicker, 4);
        s.upgrade_levels.insert(UpgradeId::ClickPower, 6);
        assert_eq!(s.total_upgrade_levels(), 10);
    }
}
