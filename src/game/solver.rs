//! Affordability solver: single-purchase pricing and maximum bulk buys.
//!
//! The cost to go from level L to L+1 is `base_cost + cost_increment * L`,
//! so buying `n` levels at once prices an arithmetic series. The bulk
//! solver binary-searches the largest `n` whose series sum fits in the
//! available coins.

use super::catalog::UpgradeDef;

/// Search bound when an upgrade has no max level.
const UNCAPPED_BOUND: u64 = 1_000_000_000;

/// A bulk purchase quote: how many levels, at what total price.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BulkQuote {
    pub quantity: u32,
    pub total_cost: u64,
}

impl BulkQuote {
    pub const NONE: BulkQuote = BulkQuote {
        quantity: 0,
        total_cost: 0,
    };
}

/// Price of the next single level at the given current level.
pub fn single_cost(def: &UpgradeDef, level: u32) -> u64 {
    def.base_cost + def.cost_increment * level as u64
}

/// Total price of `n` consecutive levels starting from `level`.
/// Arithmetic series: n * first + increment * n*(n-1)/2. Computed in u128
/// so large quantities cannot overflow.
fn series_cost(def: &UpgradeDef, level: u32, n: u64) -> u128 {
    if n == 0 {
        return 0;
    }
    let first = single_cost(def, level) as u128;
    let inc = def.cost_increment as u128;
    let n = n as u128;
    n * first + inc * (n * (n - 1) / 2)
}

/// The largest quantity purchasable with `coins`, and its total price.
///
/// Already-maxed upgrades quote zero regardless of coins; a balance exactly
/// equal to a cumulative cost qualifies.
pub fn bulk_affordable(def: &UpgradeDef, level: u32, coins: u64) -> BulkQuote {
    let remaining = match def.max_level {
        Some(max) => max.saturating_sub(level) as u64,
        None => UNCAPPED_BOUND,
    };
    if remaining == 0 || coins == 0 {
        return BulkQuote::NONE;
    }

    if def.cost_increment == 0 {
        let unit = single_cost(def, level);
        let quantity = remaining.min(coins / unit);
        return BulkQuote {
            quantity: quantity as u32,
            total_cost: quantity * unit,
        };
    }

    // Series sums grow monotonically in n, so binary search the largest
    // n with sum <= coins.
    let mut lo = 0u64;
    let mut hi = remaining;
    let mut best = BulkQuote::NONE;
    while lo <= hi {
        let mid = lo + (hi - lo) / 2;
        let total = series_cost(def, level, mid);
        if total <= coins as u128 {
            best = BulkQuote {
                quantity: mid as u32,
                total_cost: total as u64,
            };
            if mid == hi {
                break;
            }
            lo = mid + 1;
        } else {
            if mid == 0 {
                break;
            }
            hi = mid - 1;
        }
    }
    best
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::game::catalog::{UpgradeId, CATALOG};
    use proptest::prelude::*;

    fn arb_def() -> impl Strategy<Value = &'static crate::game::catalog::UpgradeDef> {
        (0..CATALOG.len()).prop_map(|i| &CATALOG[i])
    }

    proptest! {
        #[test]
        fn prop_quote_fits_budget_and_next_level_does_not(
            def in arb_def(),
            level in 0u32..30,
            coins in 0u64..10_000_000,
        ) {
            let quote = bulk_affordable(def, level, coins);
            let n = quote.quantity as u64;
            prop_assert!(quote.total_cost <= coins);
            prop_assert_eq!(series_cost(def, level, n), quote.total_cost as u128);

            // Unless capped by max level, n+1 must not fit
            let capped = def
                .max_level
                .map(|m| level + quote.quantity >= m)
                .unwrap_or(false);
            if !capped {
                prop_assert!(series_cost(def, level, n + 1) > coins as u128);
            }
        }

        #[test]
        fn prop_quote_never_exceeds_max_level(
            def in arb_def(),
            level in 0u32..30,
            coins in 0u64..u64::MAX / 4,
        ) {
            let quote = bulk_affordable(def, level, coins);
            if let Some(max) = def.max_level {
                prop_assert!(level.saturating_add(quote.quantity) <= max.max(level));
            }
        }

        #[test]
        fn prop_quote_monotonic_in_coins(
            def in arb_def(),
            level in 0u32..30,
            coins in 0u64..1_000_000,
            extra in 0u64..1_000_000,
        ) {
            let a = bulk_affordable(def, level, coins);
            let b = bulk_affordable(def, level, coins + extra);
            prop_assert!(b.quantity >= a.quantity);
        }

        #[test]
        fn prop_single_cost_matches_series_of_one(
            level in 0u32..1000,
        ) {
            let def = crate::game::catalog::definition(UpgradeId::AirdropSpeed);
            prop_assert_eq!(
                series_cost(def, level, 1),
                single_cost(def, level) as u128
            );
        }
    }
}
