//! Gain calculator: folds every catalog effect into one coins-per-action
//! number for manual clicks and passive ticks.

use super::catalog::{EffectKind, EffectTarget, UpgradeId, CATALOG};
use super::state::GameState;

/// Critical hit multiplier applied when the accumulated chance fires.
pub const CRIT_MULTIPLIER: f64 = 2.5;

/// Coins produced by one manual click (`passive = false`) or one passive
/// second (`passive = true`).
///
/// `roll` is a uniform sample in [0, 1) supplied by the caller; the
/// computation is deterministic given the sample. The result is a float;
/// callers floor before crediting coins.
///
/// With no autoclicker levels the passive result is forced to 0 no matter
/// what other bonuses exist: no autoclicker, no idle income.
pub fn compute_gain(state: &GameState, passive: bool, roll: f64) -> f64 {
    let base = 1.0;
    let mut bonus = 0.0;
    let mut multiplier = 1.0;
    let mut chance = 0.0;

    for def in CATALOG {
        let effect = def.effect(state.level(def.id));
        match effect.target {
            EffectTarget::Click => match effect.kind {
                EffectKind::Additive => bonus += effect.value,
                EffectKind::Multiplier => multiplier *= effect.value,
                EffectKind::Chance => chance += effect.value,
            },
            EffectTarget::AutoClicker if passive => {
                // The implicit base of 1 already stands in for the first
                // autoclicker level; count only the surplus.
                if effect.kind == EffectKind::Additive {
                    bonus += effect.value - 1.0;
                }
            }
            _ => {}
        }
    }

    if state.rebirths > 0 {
        multiplier *= (state.rebirths + 1) as f64;
    }

    let mut gain = (base + bonus) * multiplier;

    if roll < chance {
        gain *= CRIT_MULTIPLIER;
    }

    if passive && state.level(UpgradeId::AutoClicker) == 0 {
        0.0
    } else {
        gain
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A roll that never triggers a critical (chance caps at 0.5).
    const NO_CRIT: f64 = 0.99;

    fn state_with(levels: &[(UpgradeId, u32)]) -> GameState {
        let mut s = GameState::new();
        for &(id, lv) in levels {
            s.upgrade_levels.insert(id, lv);
        }
        s
    }

    #[test]
    fn bare_click_yields_one() {
        let s = GameState::new();
        assert_eq!(compute_gain(&s, false, NO_CRIT), 1.0);
    }

    #[test]
    fn click_power_adds_per_level() {
        let s = state_with(&[(UpgradeId::ClickPower, 4)]);
        assert_eq!(compute_gain(&s, false, NO_CRIT), 5.0);
    }

    #[test]
    fn passive_without_autoclicker_is_zero() {
        // Even with click bonuses, no autoclicker means no idle income
        let s = state_with(&[(UpgradeId::ClickPower, 10)]);
        assert_eq!(compute_gain(&s, true, NO_CRIT), 0.0);
    }

    #[test]
    fn passive_one_autoclicker_yields_one() {
        let s = state_with(&[(UpgradeId::AutoClicker, 1)]);
        // base 1 + (level 1 - 1 implicit) = 1
        assert_eq!(compute_gain(&s, true, NO_CRIT), 1.0);
    }

    #[test]
    fn passive_autoclicker_scales_with_level() {
        let s = state_with(&[(UpgradeId::AutoClicker, 5)]);
        assert_eq!(compute_gain(&s, true, NO_CRIT), 5.0);
    }

    #[test]
    fn passive_includes_click_power_bonus() {
        let s = state_with(&[(UpgradeId::AutoClicker, 2), (UpgradeId::ClickPower, 3)]);
        // base 1 + (2-1) autoclicker + 3 click power = 5
        assert_eq!(compute_gain(&s, true, NO_CRIT), 5.0);
    }

    #[test]
    fn autoclicker_does_not_affect_manual_clicks() {
        let s = state_with(&[(UpgradeId::AutoClicker, 9)]);
        assert_eq!(compute_gain(&s, false, NO_CRIT), 1.0);
    }

    #[test]
    fn rebirth_multiplies_gain() {
        let mut s = state_with(&[(UpgradeId::ClickPower, 1)]);
        s.rebirths = 2;
        // (1 + 1) * (2 + 1) = 6
        assert_eq!(compute_gain(&s, false, NO_CRIT), 6.0);
    }

    #[test]
    fn zero_rebirths_leaves_multiplier_alone() {
        let s = GameState::new();
        assert_eq!(compute_gain(&s, false, NO_CRIT), 1.0);
    }

    #[test]
    fn critical_fires_below_chance() {
        let s = state_with(&[(UpgradeId::LuckyCoins, 4)]); // 20% chance
        assert_eq!(compute_gain(&s, false, 0.19), 2.5);
        assert_eq!(compute_gain(&s, false, 0.20), 1.0);
    }

    #[test]
    fn critical_applies_to_passive_too() {
        let s = state_with(&[(UpgradeId::AutoClicker, 4), (UpgradeId::LuckyCoins, 4)]);
        assert_eq!(compute_gain(&s, true, 0.0), 4.0 * 2.5);
    }

    #[test]
    fn deterministic_given_fixed_roll() {
        let s = state_with(&[(UpgradeId::LuckyCoins, 10), (UpgradeId::ClickPower, 7)]);
        let a = compute_gain(&s, false, 0.42);
        let b = compute_gain(&s, false, 0.42);
        assert_eq!(a, b);
    }

    #[test]
    fn airdrop_upgrades_do_not_touch_click_gain() {
        let s = state_with(&[
            (UpgradeId::AirdropChance, 20),
            (UpgradeId::AirdropSpeed, 15),
            (UpgradeId::ExtraDropValue, 10),
        ]);
        assert_eq!(compute_gain(&s, false, NO_CRIT), 1.0);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_gain_nonnegative(
            auto in 0u32..50,
            power in 0u32..50,
            lucky in 0u32..10,
            rebirths in 0u32..30,
            roll in 0.0f64..1.0,
            passive in proptest::bool::ANY,
        ) {
            let mut s = GameState::new();
            s.upgrade_levels.insert(UpgradeId::AutoClicker, auto);
            s.upgrade_levels.insert(UpgradeId::ClickPower, power);
            s.upgrade_levels.insert(UpgradeId::LuckyCoins, lucky);
            s.rebirths = rebirths;
            prop_assert!(compute_gain(&s, passive, roll) >= 0.0);
        }

        #[test]
        fn prop_passive_zero_iff_no_autoclicker(
            power in 0u32..50,
            rebirths in 0u32..30,
        ) {
            let mut s = GameState::new();
            s.upgrade_levels.insert(UpgradeId::ClickPower, power);
            s.rebirths = rebirths;
            prop_assert_eq!(compute_gain(&s, true, 0.99), 0.0);
            s.upgrade_levels.insert(UpgradeId::AutoClicker, 1);
            prop_assert!(compute_gain(&s, true, 0.99) > 0.0);
        }

        #[test]
        fn prop_crit_is_exactly_2_5x(
            power in 0u32..50,
            lucky in 1u32..=10,
        ) {
            let mut s = GameState::new();
            s.upgrade_levels.insert(UpgradeId::ClickPower, power);
            s.upgrade_levels.insert(UpgradeId::LuckyCoins, lucky);
            let plain = compute_gain(&s, false, 0.99);
            let crit = compute_gain(&s, false, 0.0);
            prop_assert!((crit - plain * CRIT_MULTIPLIER).abs() < 1e-9);
        }

        #[test]
        fn prop_rebirth_multiplier_is_linear(
            rebirths in 1u32..50,
        ) {
            let mut s = GameState::new();
            let base = compute_gain(&s, false, 0.99);
            s.rebirths = rebirths;
            let boosted = compute_gain(&s, false, 0.99);
            prop_assert!((boosted - base * (rebirths + 1) as f64).abs() < 1e-9);
        }
    }
}
