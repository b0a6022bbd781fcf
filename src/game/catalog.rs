//! Static upgrade catalog.
//!
//! Each upgrade is pure data: cost-curve parameters plus a scaling rule
//! that maps the current level to a single gameplay effect. Keeping the
//! rules as variants (rather than closures) makes the table serializable
//! and exhaustively testable.

/// Identity of an upgrade. Order here is display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum UpgradeId {
    AutoClicker,
    LuckyCoins,
    ClickPower,
    AirdropChance,
    AirdropSpeed,
    ExtraDropValue,
}

impl UpgradeId {
    /// All upgrade ids in display order.
    pub fn all() -> &'static [UpgradeId] {
        &[
            UpgradeId::AutoClicker,
            UpgradeId::LuckyCoins,
            UpgradeId::ClickPower,
            UpgradeId::AirdropChance,
            UpgradeId::AirdropSpeed,
            UpgradeId::ExtraDropValue,
        ]
    }

    /// Stable string key, used in the save file.
    pub fn key(&self) -> &'static str {
        match self {
            UpgradeId::AutoClicker => "autoClicker",
            UpgradeId::LuckyCoins => "luckyCoins",
            UpgradeId::ClickPower => "clickPower",
            UpgradeId::AirdropChance => "airdropChance",
            UpgradeId::AirdropSpeed => "airdropSpeed",
            UpgradeId::ExtraDropValue => "extraDropValue",
        }
    }

    /// Inverse of `key`. Unknown keys (from stale saves) map to None.
    pub fn from_key(key: &str) -> Option<UpgradeId> {
        UpgradeId::all().iter().copied().find(|id| id.key() == key)
    }
}

/// Which part of the game an effect feeds into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectTarget {
    /// Manual coin clicks.
    Click,
    /// Passive once-per-second generation.
    AutoClicker,
    /// Airdrop spawning and value.
    Airdrop,
}

/// How an effect combines with others on the same target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectKind {
    Additive,
    Multiplier,
    Chance,
}

/// One gameplay contribution, derived from an upgrade level on demand.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Effect {
    pub target: EffectTarget,
    pub kind: EffectKind,
    pub value: f64,
}

/// Level-to-value scaling rule for an upgrade's effect.
#[derive(Clone, Copy, Debug)]
pub enum Scaling {
    /// `value = level * per_level`, combined additively.
    Additive { per_level: f64 },
    /// `value = min(level * per_level, cap)`, a probability.
    Chance { per_level: f64, cap: f64 },
    /// `value = 1 - min(level * per_level, cap)`, a shrinking multiplier
    /// (used for cooldown reduction).
    Discount { per_level: f64, cap: f64 },
    /// `value = 1 + level * per_level`, a growing multiplier.
    Amplify { per_level: f64 },
}

/// Immutable definition of one upgrade.
#[derive(Clone, Copy, Debug)]
pub struct UpgradeDef {
    pub id: UpgradeId,
    pub title: &'static str,
    pub description: &'static str,
    pub base_cost: u64,
    pub cost_increment: u64,
    pub max_level: Option<u32>,
    pub target: EffectTarget,
    pub scaling: Scaling,
}

impl UpgradeDef {
    /// The effect this upgrade contributes at the given level.
    /// Level 0 yields the neutral value for the effect's kind.
    pub fn effect(&self, level: u32) -> Effect {
        let level = level as f64;
        let (kind, value) = match self.scaling {
            Scaling::Additive { per_level } => (EffectKind::Additive, level * per_level),
            Scaling::Chance { per_level, cap } => {
                (EffectKind::Chance, (level * per_level).min(cap))
            }
            Scaling::Discount { per_level, cap } => {
                (EffectKind::Multiplier, 1.0 - (level * per_level).min(cap))
            }
            Scaling::Amplify { per_level } => (EffectKind::Multiplier, 1.0 + level * per_level),
        };
        Effect {
            target: self.target,
            kind,
            value,
        }
    }
}

/// The full upgrade catalog, in display order.
pub const CATALOG: &[UpgradeDef] = &[
    UpgradeDef {
        id: UpgradeId::AutoClicker,
        title: "Auto Clicker",
        description: "Generates coins automatically every second.",
        base_cost: 10,
        cost_increment: 10,
        max_level: None,
        target: EffectTarget::AutoClicker,
        scaling: Scaling::Additive { per_level: 1.0 },
    },
    UpgradeDef {
        id: UpgradeId::LuckyCoins,
        title: "Lucky Coins",
        description: "Chance to trigger a critical click.",
        base_cost: 150,
        cost_increment: 200,
        max_level: Some(10),
        target: EffectTarget::Click,
        scaling: Scaling::Chance {
            per_level: 0.05,
            cap: 0.5,
        },
    },
    UpgradeDef {
        id: UpgradeId::ClickPower,
        title: "Click Power",
        description: "Increase the amount of coins gained per click.",
        base_cost: 50,
        cost_increment: 50,
        max_level: None,
        target: EffectTarget::Click,
        scaling: Scaling::Additive { per_level: 1.0 },
    },
    UpgradeDef {
        id: UpgradeId::AirdropChance,
        title: "Airdrop Chance",
        description: "Increase the chance of an airdrop appearing.",
        base_cost: 200,
        cost_increment: 250,
        max_level: Some(20),
        target: EffectTarget::Airdrop,
        scaling: Scaling::Chance {
            per_level: 0.02,
            cap: 0.5,
        },
    },
    UpgradeDef {
        id: UpgradeId::AirdropSpeed,
        title: "Airdrop Speed",
        description: "Decrease cooldown between airdrops.",
        base_cost: 300,
        cost_increment: 300,
        max_level: Some(15),
        target: EffectTarget::Airdrop,
        scaling: Scaling::Discount {
            per_level: 0.05,
            cap: 0.75,
        },
    },
    UpgradeDef {
        id: UpgradeId::ExtraDropValue,
        title: "Extra Drop Value",
        description: "Increase the coins gained from airdrops.",
        base_cost: 250,
        cost_increment: 200,
        max_level: None,
        target: EffectTarget::Airdrop,
        scaling: Scaling::Amplify { per_level: 0.1 },
    },
];

/// Look up a definition by id.
pub fn definition(id: UpgradeId) -> &'static UpgradeDef {
    CATALOG
        .iter()
        .find(|d| d.id == id)
        .expect("catalog covers every UpgradeId")
}
