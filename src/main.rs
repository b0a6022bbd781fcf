mod game;
mod input;
mod rng;
mod time;

use std::{cell::RefCell, io, rc::Rc};

use ratzilla::event::{KeyCode, MouseButton, MouseEventKind};
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};

use game::{render, ClickerGame};
use input::{pixel_to_cell, ClickState, InputEvent};
use rng::SimpleRng;
use time::GameTime;

/// Resolve a mouse event's pixel position to a terminal cell, using the
/// grid container's bounding rect.
fn dom_pixel_to_cell(mouse_x: u32, mouse_y: u32, cs: &ClickState) -> Option<(u16, u16)> {
    let document = web_sys::window()?.document()?;
    // DomBackend renders into a <div> directly under <body>
    let grid = document.query_selector("body > div").ok()??;
    let rect = grid.get_bounding_client_rect();

    pixel_to_cell(
        mouse_x as f64 - rect.left(),
        mouse_y as f64 - rect.top(),
        rect.width(),
        rect.height(),
        cs.terminal_cols,
        cs.terminal_rows,
    )
}

/// Create the game, restoring saved progression where available.
fn load_game() -> ClickerGame {
    #[cfg(target_arch = "wasm32")]
    {
        let storage = game::save::LocalStorage;
        let state = game::save::load_progress(&storage);
        let mut book = game::achievements::AchievementBook::new();
        game::save::load_achievements(&storage, &mut book);
        // Seen-before achievements must not re-toast on load
        book.evaluate(&state);
        return ClickerGame::from_parts(state, book, SimpleRng::from_clock());
    }
    #[cfg(not(target_arch = "wasm32"))]
    return ClickerGame::new(SimpleRng::new(1));
}

/// Persist when the game has flagged a save, wiping first if requested.
fn flush_saves(g: &mut ClickerGame) {
    #[cfg(target_arch = "wasm32")]
    {
        let mut storage = game::save::LocalStorage;
        if g.wipe_save {
            game::save::delete_all(&mut storage);
            g.wipe_save = false;
        }
        if g.save_due {
            game::save::save_progress(&mut storage, &g.state);
            game::save::save_achievements(&mut storage, &g.book);
            g.save_due = false;
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        g.wipe_save = false;
        g.save_due = false;
    }
}

fn main() -> io::Result<()> {
    console_error_panic_hook::set_once();

    let game = Rc::new(RefCell::new(load_game()));
    let click_state = Rc::new(RefCell::new(ClickState::new()));
    let clock = Rc::new(RefCell::new(GameTime::new()));

    let backend = DomBackend::new()?;
    let terminal = Terminal::new(backend)?;

    terminal.on_mouse_event({
        let game = game.clone();
        let click_state = click_state.clone();
        move |mouse_event| {
            if mouse_event.event != MouseEventKind::Pressed
                || mouse_event.button != MouseButton::Left
            {
                return;
            }

            let cs = click_state.borrow();
            if cs.terminal_rows == 0 || cs.terminal_cols == 0 {
                return;
            }
            let Some((col, row)) = dom_pixel_to_cell(mouse_event.x, mouse_event.y, &cs) else {
                return;
            };
            let action = cs.hit_test(col, row);
            drop(cs);

            if let Some(action_id) = action {
                game.borrow_mut().handle_input(&InputEvent::Click(action_id));
            }
        }
    });

    terminal.on_key_event({
        let game = game.clone();
        move |key_event| {
            let event = match key_event.code {
                KeyCode::Char(c) => InputEvent::Key(c),
                KeyCode::Enter => InputEvent::Enter,
                KeyCode::Backspace => InputEvent::Backspace,
                KeyCode::Esc => InputEvent::Esc,
                KeyCode::Tab => InputEvent::Tab,
                KeyCode::Up => InputEvent::Up,
                KeyCode::Down => InputEvent::Down,
                _ => return,
            };
            game.borrow_mut().handle_input(&event);
        }
    });

    terminal.draw_web({
        let game = game.clone();
        let click_state = click_state.clone();
        move |f| {
            let mut g = game.borrow_mut();

            let ticks = clock.borrow_mut().advance(js_sys::Date::now());
            g.tick(ticks);
            flush_saves(&mut g);

            let size = f.area();
            {
                let mut cs = click_state.borrow_mut();
                cs.terminal_cols = size.width;
                cs.terminal_rows = size.height;
                cs.clear_targets();
            }

            render::render(&g, f, size, &click_state);
        }
    });

    Ok(())
}
