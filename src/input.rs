//! Input normalization and click-target hit testing.
//!
//! Keyboard, mouse, and touch all reduce to `InputEvent`; the game layer
//! never sees raw DOM events. Click targets are rectangular regions in
//! terminal cell coordinates, registered fresh each frame by the renderer.

use ratzilla::ratatui::layout::Rect;

/// A normalized input event.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A printable key press.
    Key(char),
    /// A click/tap resolved to a semantic action ID (see `game::actions`).
    Click(u16),
    Enter,
    Backspace,
    Esc,
    Tab,
    Up,
    Down,
}

/// One clickable region, in terminal cell coordinates.
#[derive(Debug, Clone)]
pub struct ClickTarget {
    pub rect: Rect,
    pub action_id: u16,
}

/// Click targets plus the terminal dimensions needed to resolve pixel
/// coordinates. Shared between the draw loop and the mouse handler.
pub struct ClickState {
    pub targets: Vec<ClickTarget>,
    pub terminal_cols: u16,
    pub terminal_rows: u16,
}

impl Default for ClickState {
    fn default() -> Self {
        Self::new()
    }
}

impl ClickState {
    pub fn new() -> Self {
        Self {
            targets: Vec::new(),
            terminal_cols: 0,
            terminal_rows: 0,
        }
    }

    pub fn clear_targets(&mut self) {
        self.targets.clear();
    }

    pub fn add_click_target(&mut self, rect: Rect, action_id: u16) {
        self.targets.push(ClickTarget { rect, action_id });
    }

    /// Register a full-width single-row target at `row`, clipped to `area`.
    pub fn add_row_target(&mut self, area: Rect, row: u16, action_id: u16) {
        if row >= area.y && row < area.y + area.height {
            self.add_click_target(Rect::new(area.x, row, area.width, 1), action_id);
        }
    }

    /// Resolve a cell coordinate to an action ID. Later-registered targets
    /// sit on top, so the scan runs newest-first.
    pub fn hit_test(&self, col: u16, row: u16) -> Option<u16> {
        self.targets.iter().rev().find_map(|t| {
            let r = &t.rect;
            let inside =
                col >= r.x && col < r.x + r.width && row >= r.y && row < r.y + r.height;
            inside.then_some(t.action_id)
        })
    }
}

/// Convert a pixel coordinate inside the grid container to a terminal cell.
/// Returns None when the point falls outside the grid or the grid has no
/// measurable size yet.
pub fn pixel_to_cell(
    px: f64,
    py: f64,
    grid_width: f64,
    grid_height: f64,
    cols: u16,
    rows: u16,
) -> Option<(u16, u16)> {
    if grid_width <= 0.0 || grid_height <= 0.0 || cols == 0 || rows == 0 {
        return None;
    }
    if px < 0.0 || py < 0.0 {
        return None;
    }
    let col = (px / (grid_width / cols as f64)) as u16;
    let row = (py / (grid_height / rows as f64)) as u16;
    if col >= cols || row >= rows {
        return None;
    }
    Some((col, row))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_test_single_rows() {
        let mut cs = ClickState::new();
        cs.add_click_target(Rect::new(0, 10, 80, 1), 1);
        cs.add_click_target(Rect::new(0, 11, 80, 1), 2);
        assert_eq!(cs.hit_test(5, 10), Some(1));
        assert_eq!(cs.hit_test(5, 11), Some(2));
        assert_eq!(cs.hit_test(5, 12), None);
    }

    #[test]
    fn hit_test_multi_row_rect() {
        let mut cs = ClickState::new();
        cs.add_click_target(Rect::new(10, 5, 20, 3), 42);
        assert_eq!(cs.hit_test(15, 4), None);
        assert_eq!(cs.hit_test(15, 5), Some(42));
        assert_eq!(cs.hit_test(15, 7), Some(42));
        assert_eq!(cs.hit_test(9, 6), None);
        assert_eq!(cs.hit_test(30, 6), None);
    }

    #[test]
    fn hit_test_overlap_newest_wins() {
        let mut cs = ClickState::new();
        cs.add_click_target(Rect::new(0, 5, 80, 1), 1);
        cs.add_click_target(Rect::new(5, 5, 10, 1), 2);
        assert_eq!(cs.hit_test(7, 5), Some(2));
        assert_eq!(cs.hit_test(0, 5), Some(1));
        assert_eq!(cs.hit_test(20, 5), Some(1));
    }

    #[test]
    fn row_target_clipped_to_area() {
        let mut cs = ClickState::new();
        let area = Rect::new(5, 10, 30, 5);
        cs.add_row_target(area, 12, 7);
        cs.add_row_target(area, 9, 8); // above area
        cs.add_row_target(area, 15, 9); // below area
        assert_eq!(cs.targets.len(), 1);
        assert_eq!(cs.hit_test(10, 12), Some(7));
    }

    #[test]
    fn clear_targets_resets() {
        let mut cs = ClickState::new();
        cs.add_click_target(Rect::new(0, 0, 10, 1), 1);
        cs.clear_targets();
        assert_eq!(cs.hit_test(0, 0), None);
    }

    #[test]
    fn pixel_to_cell_basic() {
        // 80x30 grid, 10px cells
        assert_eq!(pixel_to_cell(0.0, 0.0, 800.0, 300.0, 80, 30), Some((0, 0)));
        assert_eq!(pixel_to_cell(15.0, 25.0, 800.0, 300.0, 80, 30), Some((1, 2)));
        assert_eq!(
            pixel_to_cell(799.0, 299.0, 800.0, 300.0, 80, 30),
            Some((79, 29))
        );
    }

    #[test]
    fn pixel_to_cell_out_of_bounds() {
        assert_eq!(pixel_to_cell(800.0, 0.0, 800.0, 300.0, 80, 30), None);
        assert_eq!(pixel_to_cell(0.0, 300.0, 800.0, 300.0, 80, 30), None);
        assert_eq!(pixel_to_cell(-1.0, 0.0, 800.0, 300.0, 80, 30), None);
        assert_eq!(pixel_to_cell(0.0, -1.0, 800.0, 300.0, 80, 30), None);
    }

    #[test]
    fn pixel_to_cell_degenerate_grid() {
        assert_eq!(pixel_to_cell(5.0, 5.0, 0.0, 300.0, 80, 30), None);
        assert_eq!(pixel_to_cell(5.0, 5.0, 800.0, 300.0, 0, 30), None);
    }

    #[test]
    fn pixel_to_cell_fractional_cells() {
        // 24 rows over 400px: 16.67px per row
        assert_eq!(pixel_to_cell(0.0, 16.0, 100.0, 400.0, 10, 24), Some((0, 0)));
        assert_eq!(pixel_to_cell(0.0, 17.0, 100.0, 400.0, 10, 24), Some((0, 1)));
        assert_eq!(
            pixel_to_cell(0.0, 399.0, 100.0, 400.0, 10, 24),
            Some((0, 23))
        );
    }

    #[test]
    fn full_click_pipeline() {
        let mut cs = ClickState::new();
        cs.terminal_cols = 80;
        cs.terminal_rows = 30;
        cs.add_click_target(Rect::new(0, 11, 80, 1), 1);
        cs.add_click_target(Rect::new(40, 20, 10, 2), 2);

        let (col, row) =
            pixel_to_cell(100.0, 115.0, 800.0, 300.0, cs.terminal_cols, cs.terminal_rows)
                .unwrap();
        assert_eq!((col, row), (10, 11));
        assert_eq!(cs.hit_test(col, row), Some(1));

        let (col, row) =
            pixel_to_cell(450.0, 210.0, 800.0, 300.0, cs.terminal_cols, cs.terminal_rows)
                .unwrap();
        assert_eq!(cs.hit_test(col, row), Some(2));
    }
}
