// Responsive layout: anchor names to screen rectangles.
//
// Single source of truth for the gallery's column breakpoints - no magic
// widths scattered in render code. The shell computes this once per frame
// and looks up each anchor's rectangle; regions that do not fit the current
// terminal are simply not drawn.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Rows per card slot, including the border.
pub const CARD_ROWS: u16 = 5;
/// Columns reserved for the basket/checkout sidebar.
const SIDEBAR_COLS: u16 = 36;
/// Rows reserved for the checkout form panel.
const ORDER_ROWS: u16 = 9;

/// Gallery column count for a given gallery width.
pub fn gallery_columns(width: u16) -> u16 {
    match width {
        0..=55 => 1,
        56..=83 => 2,
        _ => 3,
    }
}

/// Every anchor's rectangle for one frame.
pub struct ScreenLayout {
    pub header: Rect,
    pub cards: Vec<Rect>,
    pub basket: Rect,
    pub order: Rect,
    pub status: Rect,
}

pub fn screen(area: Rect, card_count: usize) -> ScreenLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(CARD_ROWS),
            Constraint::Length(1),
        ])
        .split(area);

    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(SIDEBAR_COLS)])
        .split(rows[1]);

    let sidebar = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(4), Constraint::Length(ORDER_ROWS)])
        .split(content[1]);

    ScreenLayout {
        header: rows[0],
        cards: card_slots(content[0], card_count),
        basket: sidebar[0],
        order: sidebar[1],
        status: rows[2],
    }
}

/// Grid of card slots inside the gallery rect, row by row. Slots that do
/// not fully fit are dropped; the caller draws only what comes back.
fn card_slots(gallery: Rect, card_count: usize) -> Vec<Rect> {
    if gallery.width == 0 || card_count == 0 {
        return Vec::new();
    }
    let columns = gallery_columns(gallery.width);
    let slot_width = gallery.width / columns;

    let mut slots = Vec::new();
    for index in 0..card_count as u16 {
        let col = index % columns;
        let row = index / columns;
        let y = gallery.y + row * CARD_ROWS;
        if y + CARD_ROWS > gallery.y + gallery.height {
            break;
        }
        slots.push(Rect::new(
            gallery.x + col * slot_width,
            y,
            slot_width,
            CARD_ROWS,
        ));
    }
    slots
}

/// Centered overlay rect for the modal dialog.
pub fn modal_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_breakpoints() {
        assert_eq!(gallery_columns(40), 1);
        assert_eq!(gallery_columns(55), 1);
        assert_eq!(gallery_columns(56), 2);
        assert_eq!(gallery_columns(83), 2);
        assert_eq!(gallery_columns(84), 3);
    }

    #[test]
    fn slots_stay_inside_the_gallery() {
        let layout = screen(Rect::new(0, 0, 120, 30), 6);
        for slot in &layout.cards {
            assert!(slot.right() <= 120 - SIDEBAR_COLS);
            assert!(slot.bottom() <= 29);
        }
        assert_eq!(layout.cards.len(), 6);
    }

    #[test]
    fn overflowing_cards_are_dropped_not_clipped() {
        // Two columns, room for one row of cards only.
        let layout = screen(Rect::new(0, 0, 100, 8), 10);
        assert_eq!(layout.cards.len(), 2);
    }

    #[test]
    fn sidebar_and_chrome_are_carved_out() {
        let layout = screen(Rect::new(0, 0, 120, 30), 1);
        assert_eq!(layout.header.height, 1);
        assert_eq!(layout.status.height, 1);
        assert_eq!(layout.basket.width, SIDEBAR_COLS);
        assert_eq!(layout.order.height, ORDER_ROWS);
    }

    #[test]
    fn modal_rect_is_centered_and_clamped() {
        let area = Rect::new(0, 0, 100, 40);
        let rect = modal_rect(area, 52, 12);
        assert_eq!(rect, Rect::new(24, 14, 52, 12));

        let clamped = modal_rect(Rect::new(0, 0, 30, 8), 52, 12);
        assert_eq!(clamped.width, 30);
        assert_eq!(clamped.height, 8);
    }
}
