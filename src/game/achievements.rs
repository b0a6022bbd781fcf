//! Achievements: data-variant predicates over progression state.
//!
//! Evaluation is a linear scan of not-yet-achieved entries; unlocks are
//! monotonic and survive progress resets (the book is separate state from
//! the progression aggregate).

use super::state::GameState;

/// What a single achievement checks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Condition {
    CoinsAtLeast(u64),
    AirdropsAtLeast(u32),
    AnyUpgradeOwned,
    TotalUpgradesAtLeast(u64),
    RebirthsAtLeast(u32),
    LuckyEventTriggered,
}

impl Condition {
    pub fn holds(&self, state: &GameState) -> bool {
        match self {
            Condition::CoinsAtLeast(n) => state.coins >= *n,
            Condition::AirdropsAtLeast(n) => state.airdrops_collected >= *n,
            Condition::AnyUpgradeOwned => state.upgrade_levels.values().any(|&v| v >= 1),
            Condition::TotalUpgradesAtLeast(n) => state.total_upgrade_levels() >= *n,
            Condition::RebirthsAtLeast(n) => state.rebirths >= *n,
            Condition::LuckyEventTriggered => state.lucky_event_triggered,
        }
    }
}

/// One achievement definition plus its unlock flag.
#[derive(Clone, Debug)]
pub struct Achievement {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub condition: Condition,
    pub achieved: bool,
}

/// The full achievement list with unlock state.
pub struct AchievementBook {
    pub achievements: Vec<Achievement>,
}

impl Default for AchievementBook {
    fn default() -> Self {
        Self::new()
    }
}

impl AchievementBook {
    pub fn new() -> Self {
        let mk = |id, title, description, condition| Achievement {
            id,
            title,
            description,
            condition,
            achieved: false,
        };
        Self {
            achievements: vec![
                mk(
                    "first_click",
                    "First Click!",
                    "You made your first click!",
                    Condition::CoinsAtLeast(1),
                ),
                mk(
                    "airdrop_hunter",
                    "Airdrop Hunter",
                    "You collected your first airdrop!",
                    Condition::AirdropsAtLeast(1),
                ),
                mk(
                    "rich",
                    "Getting Rich!",
                    "You have accumulated 100,000 coins!",
                    Condition::CoinsAtLeast(100_000),
                ),
                mk(
                    "millionaire",
                    "Millionaire",
                    "Wow! You've reached 1,000,000 coins!",
                    Condition::CoinsAtLeast(1_000_000),
                ),
                mk(
                    "billionaire",
                    "Billionaire",
                    "You are unstoppable! 1,000,000,000 coins!",
                    Condition::CoinsAtLeast(1_000_000_000),
                ),
                mk(
                    "shopper",
                    "Shopper",
                    "You bought your first upgrade!",
                    Condition::AnyUpgradeOwned,
                ),
                mk(
                    "upgrade_enthusiast",
                    "Upgrade Enthusiast",
                    "You own 10 upgrades in total.",
                    Condition::TotalUpgradesAtLeast(10),
                ),
                mk(
                    "upgrade_master",
                    "Upgrade Master",
                    "You own 100 upgrades in total.",
                    Condition::TotalUpgradesAtLeast(100),
                ),
                mk(
                    "rebirth_beginner",
                    "Rebirth Beginner",
                    "You have performed your first rebirth!",
                    Condition::RebirthsAtLeast(1),
                ),
                mk(
                    "reborn_again",
                    "Reborn Again",
                    "You have performed 5 rebirths.",
                    Condition::RebirthsAtLeast(5),
                ),
                mk(
                    "cycle_of_life",
                    "Cycle of Life",
                    "You have performed 20 rebirths. A true veteran.",
                    Condition::RebirthsAtLeast(20),
                ),
                mk(
                    "one_in_a_million",
                    "One in a Million",
                    "There was a 0.0001% chance of this happening.",
                    Condition::LuckyEventTriggered,
                ),
            ],
        }
    }

    /// Scan for newly satisfied achievements, mark them achieved, and
    /// return their ids. Already-achieved entries are never re-emitted.
    pub fn evaluate(&mut self, state: &GameState) -> Vec<&'static str> {
        let mut unlocked = Vec::new();
        for ach in &mut self.achievements {
            if !ach.achieved && ach.condition.holds(state) {
                ach.achieved = true;
                unlocked.push(ach.id);
            }
        }
        unlocked
    }

    /// Merge saved `(id, achieved)` pairs by id. Unknown ids are ignored;
    /// absent ids keep their current flag. A saved `false` never clears an
    /// already-achieved entry.
    pub fn merge_saved(&mut self, saved: &[(String, bool)]) {
        for (id, achieved) in saved {
            if let Some(ach) = self.achievements.iter_mut().find(|a| a.id == id) {
                ach.achieved = ach.achieved || *achieved;
            }
        }
    }

    pub fn achieved_count(&self) -> usize {
        self.achievements.iter().filter(|a| a.achieved).count()
    }

    pub fn find(&self, id: &str) -> Option<&Achievement> {
        self.achievements.iter().find(|a| a.id == id)
    }
}
