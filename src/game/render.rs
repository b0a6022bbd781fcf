//! Coin Clicker rendering: header, tab bar, per-tab content, airdrops,
//! toasts, palette overlay, and the event log panel on wide screens.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::input::ClickState;

use super::actions;
use super::airdrop::AirdropSpawner;
use super::catalog::{definition, UpgradeId};
use super::gain::compute_gain;
use super::logic::{format_coins, next_rebirth_cost};
use super::solver::{bulk_affordable, single_cost};
use super::{ClickerGame, Tab};

/// Coin art, 5 rows. Resting state.
const COIN_ART: &[&str] = &[
    "  ╭──────╮  ",
    " ╱ ◉◉◉◉ ╲ ",
    "│  ◉ $$ ◉  │",
    " ╲ ◉◉◉◉ ╱ ",
    "  ╰──────╯  ",
];

/// Coin art while a click flash is active.
const COIN_CLICK_ART: &[&str] = &[
    "            ",
    "  ╭────╮  ",
    " │ $$$$ │ ",
    "  ╰────╯  ",
    "            ",
];

pub fn render(game: &ClickerGame, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let (main_area, log_area) = if area.width >= 80 {
        let h = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(area);
        (h[0], Some(h[1]))
    } else {
        (area, None)
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // header
            Constraint::Length(4), // tab bar
            Constraint::Min(6),    // content
        ])
        .split(main_area);

    render_header(game, f, chunks[0], click_state);
    render_tab_bar(game, f, chunks[1], click_state);
    match game.tab {
        Tab::Clicker => render_clicker(game, f, chunks[2], click_state),
        Tab::Store => render_store(game, f, chunks[2], click_state),
        Tab::Achievements => render_achievements(game, f, chunks[2]),
        Tab::Stats => render_stats(game, f, chunks[2]),
    }

    if let Some(log_area) = log_area {
        render_log(game, f, log_area);
    }

    render_toasts(game, f, main_area);
    if game.palette.open {
        render_palette(game, f, area);
    }
}

/// Coin balance, income rates, and the rebirth button when affordable.
fn render_header(
    game: &ClickerGame,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let per_click = compute_gain(&game.state, false, 1.0).floor() as u64;
    let per_sec = compute_gain(&game.state, true, 1.0).floor() as u64;
    let rebirth_cost = next_rebirth_cost(&game.state);

    let balance = Line::from(vec![
        Span::styled(
            format!(" ⬤ {} ", format_coins(game.state.coins)),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("+{per_click}/click  +{per_sec}/sec"),
            Style::default().fg(Color::Gray),
        ),
    ]);

    let rebirth_style = if game.state.coins >= rebirth_cost {
        Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let rebirth = Line::from(Span::styled(
        format!(
            " [R] Rebirth x{} ({} coins)",
            game.state.rebirths + 2,
            format_coins(rebirth_cost)
        ),
        rebirth_style,
    ));

    let header = Paragraph::new(vec![balance, rebirth]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" COIN CLICKER "),
    );
    f.render_widget(header, area);

    let mut cs = click_state.borrow_mut();
    cs.add_row_target(area, area.y + 2, actions::REBIRTH);
}

fn render_tab_bar(
    game: &ClickerGame,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let achieved = game.book.achieved_count();
    let total = game.book.achievements.len();
    let tabs: [(String, Tab, u16); 4] = [
        (" ▸ Clicker ".to_string(), Tab::Clicker, actions::TAB_CLICKER),
        (" ▸ Store ".to_string(), Tab::Store, actions::TAB_STORE),
        (
            format!(" ▸ Achievements ({achieved}/{total}) "),
            Tab::Achievements,
            actions::TAB_ACHIEVEMENTS,
        ),
        (" ▸ Stats ".to_string(), Tab::Stats, actions::TAB_STATS),
    ];

    let mut cs = click_state.borrow_mut();
    let mut lines = Vec::with_capacity(tabs.len());
    for (i, (label, tab, action)) in tabs.iter().enumerate() {
        let style = if game.tab == *tab {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Yellow)
        };
        lines.push(Line::from(Span::styled(label.clone(), style)));
        cs.add_row_target(area, area.y + i as u16, *action);
    }
    f.render_widget(Paragraph::new(lines), area);
}

/// The coin itself, income hints, and any falling airdrops.
fn render_clicker(
    game: &ClickerGame,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let art = if game.click_flash > 0 {
        COIN_CLICK_ART
    } else {
        COIN_ART
    };
    let art_width = 12u16;
    let art_x = inner.x + inner.width.saturating_sub(art_width) / 2;

    let mut lines: Vec<Line> = Vec::new();
    for row in art {
        lines.push(Line::from(Span::styled(
            *row,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
    }
    let gain_text = match game.last_click {
        Some(r) if r.crit => format!("CRITICAL! +{}", format_coins(r.gain)),
        Some(r) => format!("+{}", format_coins(r.gain)),
        None => String::new(),
    };
    lines.push(Line::from(Span::styled(
        gain_text,
        Style::default().fg(Color::Green),
    )));
    lines.push(Line::from(Span::styled(
        "[C] Click the coin",
        Style::default().fg(Color::DarkGray),
    )));

    let art_area = Rect::new(
        art_x,
        inner.y,
        art_width.min(inner.width),
        (art.len() as u16 + 2).min(inner.height),
    );
    f.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        Rect::new(
            inner.x,
            inner.y,
            inner.width,
            (art.len() as u16 + 2).min(inner.height),
        ),
    );

    let mut cs = click_state.borrow_mut();
    cs.add_click_target(art_area, actions::CLICK_COIN);
    // The hint row clicks too
    cs.add_row_target(inner, inner.y + art.len() as u16 + 1, actions::CLICK_COIN);

    // Airdrops fall across one row under the coin
    let drop_row = inner.y + art.len() as u16 + 2;
    if drop_row < inner.y + inner.height {
        for (i, drop) in game.airdrops.drops.iter().enumerate() {
            let x = inner.x + (drop.x_pct as u32 * inner.width as u32 / 100) as u16;
            let rect = Rect::new(x, drop_row, 3.min(inner.width), 1);
            f.render_widget(
                Paragraph::new(Span::styled(
                    "✦",
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )),
                rect,
            );
            cs.add_click_target(rect, actions::COLLECT_AIRDROP_BASE + i as u16);
        }
        if !game.airdrops.drops.is_empty() {
            let hint_row = drop_row + 1;
            if hint_row < inner.y + inner.height {
                f.render_widget(
                    Paragraph::new(Span::styled(
                        format!(
                            "[G] Grab airdrop (+{})",
                            format_coins(AirdropSpawner::drop_value(&game.state))
                        ),
                        Style::default().fg(Color::Cyan),
                    )),
                    Rect::new(inner.x, hint_row, inner.width, 1),
                );
                // Oldest drop is index 0
                cs.add_row_target(inner, hint_row, actions::COLLECT_AIRDROP_BASE);
            }
        }
    }
}

/// One row per upgrade: buy-one on the row, buy-max on its right edge.
fn render_store(
    game: &ClickerGame,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green))
        .title(" Store ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut cs = click_state.borrow_mut();
    let mut items: Vec<ListItem> = Vec::new();
    for (i, id) in UpgradeId::all().iter().enumerate() {
        let def = definition(*id);
        let level = game.state.level(*id);
        let maxed = def.max_level.is_some_and(|m| level >= m);
        let cost = single_cost(def, level);
        let quote = bulk_affordable(def, level, game.state.coins);

        let digit = (b'1' + i as u8) as char;
        let letter = (b'a' + i as u8) as char;
        let (price_text, style) = if maxed {
            ("MAX".to_string(), Style::default().fg(Color::DarkGray))
        } else if game.state.coins >= cost {
            (
                format!("{} coins", format_coins(cost)),
                Style::default().fg(Color::Green),
            )
        } else {
            (
                format!("{} coins", format_coins(cost)),
                Style::default().fg(Color::DarkGray),
            )
        };
        let bulk_text = if quote.quantity > 1 {
            format!("  [{letter}] x{}", quote.quantity)
        } else {
            String::new()
        };

        items.push(ListItem::new(Line::from(vec![
            Span::styled(
                format!("[{digit}] "),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("{} Lv.{} ", def.title, level), style),
            Span::styled(price_text, style),
            Span::styled(bulk_text, Style::default().fg(Color::Cyan)),
        ])));

        let row = inner.y + i as u16;
        cs.add_row_target(inner, row, actions::BUY_UPGRADE_BASE + i as u16);
        if quote.quantity > 1 && inner.width > 12 {
            // Right edge buys the whole quote; registered after the row so
            // it wins the hit test
            let w = inner.width / 3;
            cs.add_click_target(
                Rect::new(inner.x + inner.width - w, row, w, 1),
                actions::BUY_BULK_BASE + i as u16,
            );
        }
    }
    f.render_widget(List::new(items), inner);
}

fn render_achievements(game: &ClickerGame, f: &mut Frame, area: Rect) {
    let items: Vec<ListItem> = game
        .book
        .achievements
        .iter()
        .map(|a| {
            let (mark, style) = if a.achieved {
                (
                    "✔",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                ("·", Style::default().fg(Color::DarkGray))
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!(" {mark} "), style),
                Span::styled(a.title, style),
                Span::styled(
                    format!("  {}", a.description),
                    Style::default().fg(Color::Gray),
                ),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Magenta))
            .title(format!(
                " Achievements {}/{} ",
                game.book.achieved_count(),
                game.book.achievements.len()
            )),
    );
    f.render_widget(list, area);
}

fn render_stats(game: &ClickerGame, f: &mut Frame, area: Rect) {
    let s = &game.state;
    let lines = vec![
        stat_line("Coins", format_coins(s.coins)),
        stat_line("Total clicks", s.total_clicks.to_string()),
        stat_line("Rebirths", s.rebirths.to_string()),
        stat_line("Upgrades owned", s.total_upgrade_levels().to_string()),
        stat_line("Airdrops collected", s.airdrops_collected.to_string()),
        stat_line(
            "Achievements",
            format!(
                "{}/{}",
                game.book.achieved_count(),
                game.book.achievements.len()
            ),
        ),
        stat_line(
            "Lucky event",
            if s.lucky_event_triggered { "seen" } else { "not yet" }.to_string(),
        ),
    ];
    let stats = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Stats "),
    );
    f.render_widget(stats, area);
}

fn stat_line(label: &str, value: String) -> Line<'_> {
    Line::from(vec![
        Span::styled(format!(" {label:<20}"), Style::default().fg(Color::Gray)),
        Span::styled(value, Style::default().fg(Color::White)),
    ])
}

fn render_log(game: &ClickerGame, f: &mut Frame, area: Rect) {
    let visible = area.height.saturating_sub(2) as usize;
    let start = game.log.len().saturating_sub(visible);
    let lines: Vec<Line> = game.log[start..]
        .iter()
        .map(|entry| {
            let style = if entry.important {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            Line::from(Span::styled(&entry.text, style))
        })
        .collect();

    let log = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue))
                .title(" Log "),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(log, area);
}

fn render_toasts(game: &ClickerGame, f: &mut Frame, area: Rect) {
    if game.toasts.is_empty() {
        return;
    }
    let shown = game.toasts.len().min(2);
    let width = area.width.saturating_sub(4).min(44);
    let rect = Rect::new(
        area.x + area.width.saturating_sub(width + 1),
        area.y + 1,
        width,
        shown as u16,
    );
    let lines: Vec<Line> = game.toasts[game.toasts.len() - shown..]
        .iter()
        .map(|t| {
            Line::from(Span::styled(
                format!(" {} ", t.text),
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ))
        })
        .collect();
    f.render_widget(Clear, rect);
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Right), rect);
}

/// Terminal overlay across the lower half of the screen.
fn render_palette(game: &ClickerGame, f: &mut Frame, area: Rect) {
    let height = (area.height / 2).max(6).min(area.height);
    let rect = Rect::new(area.x, area.y + area.height - height, area.width, height);
    f.render_widget(Clear, rect);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green))
        .title(" terminal ");
    let inner = block.inner(rect);
    f.render_widget(block, rect);

    let visible = inner.height.saturating_sub(1) as usize;
    let start = game.palette.logs.len().saturating_sub(visible);
    let mut lines: Vec<Line> = game.palette.logs[start..]
        .iter()
        .map(|l| Line::from(Span::styled(l.clone(), Style::default().fg(Color::Green))))
        .collect();

    let mut prompt = vec![
        Span::styled("dev@clicker:~$ ", Style::default().fg(Color::Green)),
        Span::styled(
            game.palette.input.clone(),
            Style::default().fg(Color::White),
        ),
        Span::styled("▌", Style::default().fg(Color::Green)),
    ];
    if let Some(rest) = super::palette::completion(&game.palette.input) {
        prompt.push(Span::styled(rest, Style::default().fg(Color::DarkGray)));
    }
    lines.push(Line::from(prompt));

    f.render_widget(Paragraph::new(lines), inner);
}
