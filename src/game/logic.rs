//! Game orchestration: pure functions combining the state machine, gain
//! calculator, and solver into player-facing operations.

use super::catalog::{definition, UpgradeId};
use super::gain::compute_gain;
use super::solver::{bulk_affordable, single_cost, BulkQuote};
use super::state::{Command, GameState};
use crate::rng::SimpleRng;

/// Probability that any single click triggers the lucky event.
pub const LUCKY_CHANCE: f64 = 0.000_001;
/// Coins paid out by the lucky event.
pub const LUCKY_REWARD: u64 = 1_000_000;

/// What one manual click produced.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClickResult {
    pub gain: u64,
    pub crit: bool,
    pub lucky: bool,
}

/// Handle one manual click: credit the (possibly critical) gain, count the
/// click, and roll the one-in-a-million event.
pub fn click(state: &GameState, rng: &mut SimpleRng) -> (GameState, ClickResult) {
    let roll = rng.next_f64();
    let gain = compute_gain(state, false, roll).floor() as u64;
    // A roll of 1.0 can never beat the chance term, so this isolates the crit
    let plain = compute_gain(state, false, 1.0).floor() as u64;

    let mut next = state
        .apply(&Command::AddCoins { amount: gain })
        .apply(&Command::RecordClick);

    let lucky = rng.next_f64() < LUCKY_CHANCE;
    if lucky {
        next = next
            .apply(&Command::TriggerLuckyEvent)
            .apply(&Command::AddCoins {
                amount: LUCKY_REWARD,
            });
    }

    (
        next,
        ClickResult {
            gain,
            crit: gain > plain,
            lucky,
        },
    )
}

/// One passive second: credit the floored passive gain, if any.
pub fn passive_tick(state: &GameState, rng: &mut SimpleRng) -> (GameState, u64) {
    let roll = rng.next_f64();
    let gain = compute_gain(state, true, roll).floor() as u64;
    if gain == 0 {
        return (state.clone(), 0);
    }
    (state.apply(&Command::AddCoins { amount: gain }), gain)
}

/// Buy one level of an upgrade. None when maxed or unaffordable.
pub fn buy_one(state: &GameState, id: UpgradeId) -> Option<(GameState, u64)> {
    let def = definition(id);
    let level = state.level(id);
    if def.max_level.is_some_and(|max| level >= max) {
        return None;
    }
    let cost = single_cost(def, level);
    if state.coins < cost {
        return None;
    }
    Some((state.apply(&Command::BuyUpgrade { id, cost }), cost))
}

/// Buy as many levels as the balance allows. None when nothing is affordable.
pub fn buy_max(state: &GameState, id: UpgradeId) -> Option<(GameState, BulkQuote)> {
    let def = definition(id);
    let quote = bulk_affordable(def, state.level(id), state.coins);
    if quote.quantity == 0 {
        return None;
    }
    let next = state.apply(&Command::BuyUpgradeBulk {
        id,
        quantity: quote.quantity,
        total_cost: quote.total_cost,
    });
    Some((next, quote))
}

/// Cost of the next rebirth: 100,000 * (rebirths + 1)^2.
pub fn next_rebirth_cost(state: &GameState) -> u64 {
    let run = state.rebirths as u64 + 1;
    100_000 * run * run
}

/// Perform a rebirth if affordable. The command order matters: the cost is
/// paid from pre-reset coins, and the rebirth counter is bumped before the
/// progress wipe.
pub fn rebirth(state: &GameState) -> Option<GameState> {
    let cost = next_rebirth_cost(state);
    if state.coins < cost {
        return None;
    }
    Some(
        state
            .apply(&Command::RemoveCoins { amount: cost })
            .apply(&Command::AddRebirth)
            .apply(&Command::ResetProgress),
    )
}

/// Abbreviate a coin amount with thousands suffixes (1.5K, 2.3M, …).
pub fn format_coins(amount: u64) -> String {
    const SUFFIXES: &[&str] = &[
        "", "K", "M", "B", "T", "Qa", "Qi", "Sx", "Sp", "Oc", "No", "Dc", "Ud", "Dd", "Td", "Qad",
        "Qid", "Sxd", "Spd", "Ocd", "Nod",
    ];
    let mut num = amount as f64;
    let mut i = 0;
    while num >= 1000.0 && i < SUFFIXES.len() - 1 {
        num /= 1000.0;
        i += 1;
    }
    format!("{:.1}{}", num, SUFFIXES[i])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn click_credits_and_counts() {
        let mut rng = SimpleRng::new(1);
        let (next, result) = click(&GameState::new(), &mut rng);
        assert_eq!(result.gain, 1);
        assert!(!result.crit);
        assert_eq!(next.total_clicks, 1);
        assert!(next.coins >= 1);
    }

    #[test]
    fn click_gain_floors_fractional_crit() {
        // Crit on a bare click: 1 * 2.5 floors to 2
        let mut s = GameState::new();
        s.upgrade_levels.insert(UpgradeId::LuckyCoins, 10); // 50% crit
        let mut found_crit = false;
        let mut rng = SimpleRng::new(5);
        for _ in 0..64 {
            let (_, result) = click(&s, &mut rng);
            if result.crit {
                assert_eq!(result.gain, 2);
                found_crit = true;
                break;
            }
        }
        assert!(found_crit, "no crit in 64 clicks at 50% chance");
    }

    #[test]
    fn passive_tick_idle_without_autoclicker() {
        let mut rng = SimpleRng::new(1);
        let state = GameState::new();
        let (next, gain) = passive_tick(&state, &mut rng);
        assert_eq!(gain, 0);
        assert_eq!(next, state);
    }

    #[test]
    fn passive_tick_pays_autoclicker_level() {
        let mut rng = SimpleRng::new(1);
        let mut state = GameState::new();
        state.upgrade_levels.insert(UpgradeId::AutoClicker, 3);
        let (next, gain) = passive_tick(&state, &mut rng);
        assert_eq!(gain, 3);
        assert_eq!(next.coins, 3);
    }

    #[test]
    fn buy_one_succeeds_at_exact_cost() {
        let mut state = GameState::new();
        state.coins = 10;
        let (next, cost) = buy_one(&state, UpgradeId::AutoClicker).unwrap();
        assert_eq!(cost, 10);
        assert_eq!(next.coins, 0);
        assert_eq!(next.level(UpgradeId::AutoClicker), 1);
    }

    #[test]
    fn buy_one_fails_short_of_cost() {
        let mut state = GameState::new();
        state.coins = 9;
        assert!(buy_one(&state, UpgradeId::AutoClicker).is_none());
    }

    #[test]
    fn buy_one_fails_at_max_level() {
        let mut state = GameState::new();
        state.coins = 1_000_000;
        state.upgrade_levels.insert(UpgradeId::LuckyCoins, 10);
        assert!(buy_one(&state, UpgradeId::LuckyCoins).is_none());
    }

    #[test]
    fn buy_max_takes_the_full_quote() {
        let mut state = GameState::new();
        state.coins = 1000;
        let (next, quote) = buy_max(&state, UpgradeId::AutoClicker).unwrap();
        assert_eq!(quote.quantity, 13);
        assert_eq!(quote.total_cost, 910);
        assert_eq!(next.coins, 90);
        assert_eq!(next.level(UpgradeId::AutoClicker), 13);
    }

    #[test]
    fn buy_max_none_when_broke() {
        assert!(buy_max(&GameState::new(), UpgradeId::AutoClicker).is_none());
    }

    #[test]
    fn rebirth_cost_grows_quadratically() {
        let mut state = GameState::new();
        assert_eq!(next_rebirth_cost(&state), 100_000);
        state.rebirths = 2;
        assert_eq!(next_rebirth_cost(&state), 900_000);
    }

    #[test]
    fn rebirth_unaffordable_is_none() {
        let mut state = GameState::new();
        state.coins = 99_999;
        assert!(rebirth(&state).is_none());
    }

    #[test]
    fn rebirth_pays_then_resets() {
        let mut state = GameState::new();
        state.coins = 150_000;
        state.total_clicks = 42;
        state.upgrade_levels.insert(UpgradeId::ClickPower, 5);
        let next = rebirth(&state).unwrap();
        assert_eq!(next.rebirths, 1);
        // RemoveCoins precedes ResetProgress, so the surplus is wiped too
        assert_eq!(next.coins, 0);
        assert!(next.upgrade_levels.is_empty());
        assert_eq!(next.total_clicks, 42);
    }

    #[test]
    fn rebirth_exact_cost_qualifies() {
        let mut state = GameState::new();
        state.coins = 100_000;
        assert!(rebirth(&state).is_some());
    }

    #[test]
    fn format_coins_suffixes() {
        assert_eq!(format_coins(0), "0.0");
        assert_eq!(format_coins(999), "999.0");
        assert_eq!(format_coins(1_500), "1.5K");
        assert_eq!(format_coins(1_000_000), "1.0M");
        assert_eq!(format_coins(2_500_000_000), "2.5B");
        assert_eq!(format_coins(1_200_000_000_000), "1.2T");
    }
}
