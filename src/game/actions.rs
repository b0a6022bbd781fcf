//! Semantic action IDs for click targets.
//!
//! Each constant names one clickable action in the UI. Render registers
//! these during draw; the mouse handler dispatches them as
//! `InputEvent::Click`.

// ── Core actions ────────────────────────────────────────────────
pub const CLICK_COIN: u16 = 0;
pub const REBIRTH: u16 = 1;

// ── Tab navigation ──────────────────────────────────────────────
pub const TAB_CLICKER: u16 = 10;
pub const TAB_STORE: u16 = 11;
pub const TAB_ACHIEVEMENTS: u16 = 12;
pub const TAB_STATS: u16 = 13;

// ── Store (base + catalog index 0..5) ───────────────────────────
pub const BUY_UPGRADE_BASE: u16 = 100;
pub const BUY_BULK_BASE: u16 = 200;

// ── Airdrops (base + visible drop index) ────────────────────────
pub const COLLECT_AIRDROP_BASE: u16 = 300;
