//! Airdrop spawner: probabilistic collectibles on a fixed-timestep clock.
//!
//! Every spawn period (shrunk by the Airdrop Speed upgrade) a Bernoulli
//! trial decides whether a drop appears. Drops expire after one period and
//! are collected at most once, keyed by id.

use super::catalog::{definition, UpgradeId};
use super::state::GameState;
use crate::rng::SimpleRng;

/// Base spawn period: 10 seconds at 10 ticks/sec.
pub const BASE_INTERVAL_TICKS: u32 = 100;

/// Coins a drop is worth before the Extra Drop Value multiplier.
pub const BASE_DROP_VALUE: u64 = 50;

/// One visible collectible.
#[derive(Clone, Debug)]
pub struct Airdrop {
    pub id: u32,
    /// Horizontal position as a percentage of the play area (0..80).
    pub x_pct: u8,
    /// Remaining lifetime in ticks.
    pub ticks_left: u32,
}

/// Spawner state: visible drops plus the countdown to the next trial.
pub struct AirdropSpawner {
    pub drops: Vec<Airdrop>,
    next_id: u32,
    countdown: u32,
}

impl Default for AirdropSpawner {
    fn default() -> Self {
        Self::new()
    }
}

impl AirdropSpawner {
    pub fn new() -> Self {
        Self {
            drops: Vec::new(),
            next_id: 0,
            countdown: BASE_INTERVAL_TICKS,
        }
    }

    /// Current spawn period in ticks: base shrunk by the speed upgrade.
    pub fn interval_ticks(state: &GameState) -> u32 {
        let factor = definition(UpgradeId::AirdropSpeed)
            .effect(state.level(UpgradeId::AirdropSpeed))
            .value;
        ((BASE_INTERVAL_TICKS as f64 * factor) as u32).max(1)
    }

    /// Probability that a trial spawns a drop.
    pub fn spawn_chance(state: &GameState) -> f64 {
        definition(UpgradeId::AirdropChance)
            .effect(state.level(UpgradeId::AirdropChance))
            .value
    }

    /// Coins one drop pays out at the current Extra Drop Value level.
    pub fn drop_value(state: &GameState) -> u64 {
        let multiplier = definition(UpgradeId::ExtraDropValue)
            .effect(state.level(UpgradeId::ExtraDropValue))
            .value;
        (BASE_DROP_VALUE as f64 * multiplier) as u64
    }

    /// Advance by `delta_ticks`: age out expired drops and run spawn
    /// trials as periods elapse.
    pub fn tick(&mut self, state: &GameState, delta_ticks: u32, rng: &mut SimpleRng) {
        if delta_ticks == 0 {
            return;
        }

        for drop in &mut self.drops {
            drop.ticks_left = drop.ticks_left.saturating_sub(delta_ticks);
        }
        self.drops.retain(|d| d.ticks_left > 0);

        let interval = Self::interval_ticks(state);
        let mut remaining = delta_ticks;
        while remaining > 0 {
            if self.countdown > remaining {
                self.countdown -= remaining;
                break;
            }
            remaining -= self.countdown;
            self.countdown = interval;
            if rng.next_f64() < Self::spawn_chance(state) {
                self.spawn(interval, rng);
            }
        }
    }

    fn spawn(&mut self, lifetime: u32, rng: &mut SimpleRng) {
        let drop = Airdrop {
            id: self.next_id,
            x_pct: (rng.next_u32() % 80) as u8,
            ticks_left: lifetime,
        };
        self.next_id = self.next_id.wrapping_add(1);
        self.drops.push(drop);
    }

    /// Collect a drop by id. Returns its coin value, or None if the id is
    /// gone (already collected or expired); collection is idempotent.
    pub fn collect(&mut self, id: u32, state: &GameState) -> Option<u64> {
        let idx = self.drops.iter().position(|d| d.id == id)?;
        self.drops.remove(idx);
        Some(Self::drop_value(state))
    }

    /// Oldest visible drop, for keyboard collection.
    pub fn oldest(&self) -> Option<&Airdrop> {
        self.drops.first()
    }
}
