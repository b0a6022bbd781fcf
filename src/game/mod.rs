/// Coin Clicker, an incremental coin clicker game.
pub mod achievements;
pub mod actions;
pub mod airdrop;
pub mod catalog;
pub mod gain;
pub mod logic;
pub mod palette;
pub mod render;
pub mod save;
pub mod solver;
pub mod state;

use crate::input::InputEvent;
use crate::rng::SimpleRng;
use crate::time::TICKS_PER_SEC;

use achievements::AchievementBook;
use airdrop::AirdropSpawner;
use catalog::{definition, UpgradeId};
use logic::ClickResult;
use palette::Palette;
use state::{Command, GameState};

/// How long a toast stays visible: 3 seconds.
const TOAST_TICKS: u32 = 30;

/// How long the coin shows its pressed art after a click.
const CLICK_FLASH_TICKS: u32 = 3;

const MAX_LOG: usize = 50;

/// Which content tab is active.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Tab {
    Clicker,
    Store,
    Achievements,
    Stats,
}

impl Tab {
    pub fn next(self) -> Tab {
        match self {
            Tab::Clicker => Tab::Store,
            Tab::Store => Tab::Achievements,
            Tab::Achievements => Tab::Stats,
            Tab::Stats => Tab::Clicker,
        }
    }
}

pub struct LogEntry {
    pub text: String,
    pub important: bool,
}

/// Transient notification shown over the UI.
pub struct Toast {
    pub text: String,
    pub ticks_left: u32,
}

/// The whole game: progression state plus everything around it that is not
/// persisted as-is (spawner, palette, log, toasts, rng).
pub struct ClickerGame {
    pub state: GameState,
    pub book: AchievementBook,
    pub airdrops: AirdropSpawner,
    pub rng: SimpleRng,
    pub tab: Tab,
    pub palette: Palette,
    pub log: Vec<LogEntry>,
    pub toasts: Vec<Toast>,
    pub last_click: Option<ClickResult>,
    pub click_flash: u32,
    /// Set when the shell should persist; cleared by the shell.
    pub save_due: bool,
    /// Set when the shell should wipe storage (full reset via palette).
    pub wipe_save: bool,
    passive_countdown: u32,
    autosave_countdown: u32,
}

impl ClickerGame {
    pub fn new(rng: SimpleRng) -> Self {
        Self::from_parts(GameState::new(), AchievementBook::new(), rng)
    }

    /// Assemble from loaded progression and achievement flags.
    pub fn from_parts(state: GameState, book: AchievementBook, rng: SimpleRng) -> Self {
        Self {
            state,
            book,
            airdrops: AirdropSpawner::new(),
            rng,
            tab: Tab::Clicker,
            palette: Palette::new(),
            log: Vec::new(),
            toasts: Vec::new(),
            last_click: None,
            click_flash: 0,
            save_due: false,
            wipe_save: false,
            passive_countdown: TICKS_PER_SEC,
            autosave_countdown: save::AUTOSAVE_INTERVAL,
        }
    }

    /// Handle one input event. Returns true if the event was consumed.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        if self.palette.open {
            return self.handle_palette_input(event);
        }

        match event {
            InputEvent::Key('`') => {
                self.palette.toggle();
                true
            }
            InputEvent::Tab => {
                self.tab = self.tab.next();
                true
            }
            InputEvent::Key('c') if self.tab == Tab::Clicker => {
                self.do_click();
                true
            }
            InputEvent::Key('g') if self.tab == Tab::Clicker => {
                if let Some(id) = self.airdrops.oldest().map(|d| d.id) {
                    self.collect_airdrop(id);
                }
                true
            }
            InputEvent::Key('r') => {
                self.do_rebirth();
                true
            }
            InputEvent::Key(d @ '1'..='6') if self.tab == Tab::Store => {
                self.buy(*d as usize - '1' as usize, false);
                true
            }
            InputEvent::Key(l @ 'a'..='f') if self.tab == Tab::Store => {
                self.buy(*l as usize - 'a' as usize, true);
                true
            }
            InputEvent::Click(id) => self.handle_click_action(*id),
            _ => false,
        }
    }

    fn handle_palette_input(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::Key('`') | InputEvent::Esc => self.palette.toggle(),
            InputEvent::Key(c) => self.palette.push_char(*c),
            InputEvent::Backspace => self.palette.backspace(),
            InputEvent::Tab => self.palette.complete(),
            InputEvent::Up => self.palette.history_prev(),
            InputEvent::Down => self.palette.history_next(),
            InputEvent::Enter => {
                let cmds = self.palette.submit();
                for cmd in &cmds {
                    self.state = self.state.apply(cmd);
                }
                if cmds.iter().any(|c| matches!(c, Command::ResetGame)) {
                    self.book = AchievementBook::new();
                    self.airdrops = AirdropSpawner::new();
                    self.wipe_save = true;
                }
                if !cmds.is_empty() {
                    self.save_due = true;
                }
            }
            InputEvent::Click(_) => return false,
        }
        true
    }

    fn handle_click_action(&mut self, id: u16) -> bool {
        match id {
            actions::CLICK_COIN => self.do_click(),
            actions::REBIRTH => self.do_rebirth(),
            actions::TAB_CLICKER => self.tab = Tab::Clicker,
            actions::TAB_STORE => self.tab = Tab::Store,
            actions::TAB_ACHIEVEMENTS => self.tab = Tab::Achievements,
            actions::TAB_STATS => self.tab = Tab::Stats,
            _ if (actions::BUY_UPGRADE_BASE..actions::BUY_UPGRADE_BASE + 6).contains(&id) => {
                self.buy((id - actions::BUY_UPGRADE_BASE) as usize, false);
            }
            _ if (actions::BUY_BULK_BASE..actions::BUY_BULK_BASE + 6).contains(&id) => {
                self.buy((id - actions::BUY_BULK_BASE) as usize, true);
            }
            _ if id >= actions::COLLECT_AIRDROP_BASE => {
                let idx = (id - actions::COLLECT_AIRDROP_BASE) as usize;
                if let Some(drop_id) = self.airdrops.drops.get(idx).map(|d| d.id) {
                    self.collect_airdrop(drop_id);
                }
            }
            _ => return false,
        }
        true
    }

    /// Advance game logic by `delta_ticks` discrete ticks.
    pub fn tick(&mut self, delta_ticks: u32) {
        if delta_ticks == 0 {
            return;
        }

        self.click_flash = self.click_flash.saturating_sub(delta_ticks);

        // Passive income, once per second
        let mut remaining = delta_ticks;
        while remaining > 0 {
            if self.passive_countdown > remaining {
                self.passive_countdown -= remaining;
                break;
            }
            remaining -= self.passive_countdown;
            self.passive_countdown = TICKS_PER_SEC;
            let (next, _gain) = logic::passive_tick(&self.state, &mut self.rng);
            self.state = next;
        }

        self.airdrops.tick(&self.state, delta_ticks, &mut self.rng);

        for toast in &mut self.toasts {
            toast.ticks_left = toast.ticks_left.saturating_sub(delta_ticks);
        }
        self.toasts.retain(|t| t.ticks_left > 0);

        let unlocked = self.book.evaluate(&self.state);
        for id in unlocked {
            if let Some(ach) = self.book.find(id) {
                let text = format!("Achievement unlocked: {}", ach.title);
                self.toast(text.clone());
                self.log_line(text, true);
            }
        }

        if self.autosave_countdown <= delta_ticks {
            self.save_due = true;
            self.autosave_countdown = save::AUTOSAVE_INTERVAL;
        } else {
            self.autosave_countdown -= delta_ticks;
        }
    }

    fn do_click(&mut self) {
        let (next, result) = logic::click(&self.state, &mut self.rng);
        self.state = next;
        self.last_click = Some(result);
        self.click_flash = CLICK_FLASH_TICKS;
        if result.lucky {
            let text = format!(
                "LUCKY! The one-in-a-million coin pays {}",
                logic::format_coins(logic::LUCKY_REWARD)
            );
            self.toast(text.clone());
            self.log_line(text, true);
        }
    }

    fn do_rebirth(&mut self) {
        let cost = logic::next_rebirth_cost(&self.state);
        match logic::rebirth(&self.state) {
            Some(next) => {
                self.state = next;
                self.airdrops = AirdropSpawner::new();
                let text = format!("Rebirth #{} complete", self.state.rebirths);
                self.toast(text.clone());
                self.log_line(text, true);
                self.save_due = true;
            }
            None => {
                self.toast(format!(
                    "Rebirth costs {} coins",
                    logic::format_coins(cost)
                ));
            }
        }
    }

    fn buy(&mut self, index: usize, bulk: bool) {
        let Some(&id) = UpgradeId::all().get(index) else {
            return;
        };
        let title = definition(id).title;
        if bulk {
            if let Some((next, quote)) = logic::buy_max(&self.state, id) {
                self.state = next;
                self.log_line(
                    format!(
                        "Bought {}x {} for {} coins",
                        quote.quantity,
                        title,
                        logic::format_coins(quote.total_cost)
                    ),
                    false,
                );
            }
        } else if let Some((next, cost)) = logic::buy_one(&self.state, id) {
            self.state = next;
            self.log_line(
                format!("Bought {} for {} coins", title, logic::format_coins(cost)),
                false,
            );
        }
    }

    fn collect_airdrop(&mut self, drop_id: u32) {
        if let Some(value) = self.airdrops.collect(drop_id, &self.state) {
            self.state = self.state.apply(&Command::CollectAirdrop { amount: value });
            self.log_line(
                format!("Airdrop collected (+{} coins)", logic::format_coins(value)),
                false,
            );
        }
    }

    fn toast(&mut self, text: String) {
        self.toasts.push(Toast {
            text,
            ticks_left: TOAST_TICKS,
        });
    }

    fn log_line(&mut self, text: String, important: bool) {
        self.log.push(LogEntry { text, important });
        if self.log.len() > MAX_LOG {
            self.log.remove(0);
        }
    }
}
