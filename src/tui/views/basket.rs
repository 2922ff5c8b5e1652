// Basket view
//
// Renders the current snapshot of basket lines with a selection cursor and
// the running total. The remove gesture carries the selected line's product
// and the checkout gesture carries the session's default order details,
// both fixed at bind time; every `BasketChanged` re-renders and rebinds, so
// the payloads always match the rows on screen. Checkout is only bound
// while the basket is non-empty.

use crate::events::AppEvent;
use crate::model::{BasketLine, OrderDetails, OrderTotal};
use crate::tui::view::{Gesture, View, ViewState};
use crate::tui::views::clip;
use crossterm::event::KeyCode;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};

const LINE_TITLE_COLS: usize = 20;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BasketState {
    pub lines: Vec<BasketLine>,
    pub selected: usize,
}

#[derive(Debug, Clone, Default)]
pub struct BasketPatch {
    pub lines: Option<Vec<BasketLine>>,
    pub selected: Option<usize>,
}

impl ViewState for BasketState {
    type Patch = BasketPatch;

    fn merge(&mut self, patch: BasketPatch) {
        if let Some(lines) = patch.lines {
            self.lines = lines;
        }
        if let Some(selected) = patch.selected {
            self.selected = selected;
        }
    }
}

impl BasketState {
    /// Selection clamped into the current line range. The merge is a plain
    /// shallow merge, so a shrunken snapshot can leave `selected` past the
    /// end; render and bind always go through this.
    fn cursor(&self) -> usize {
        self.selected.min(self.lines.len().saturating_sub(1))
    }
}

pub struct BasketView;

impl View for BasketView {
    type State = BasketState;

    fn render(&self, state: &BasketState) -> Text<'static> {
        if state.lines.is_empty() {
            return Text::from(vec![
                Line::from(Span::styled(
                    "basket is empty",
                    Style::default().add_modifier(Modifier::DIM),
                )),
                Line::raw(""),
            ]);
        }

        let cursor = state.cursor();
        let mut rows: Vec<Line> = state
            .lines
            .iter()
            .enumerate()
            .map(|(i, line)| {
                let pointer = if i == cursor { "▸ " } else { "  " };
                let row = format!(
                    "{}{} × {:<width$} {}",
                    pointer,
                    line.item_count,
                    clip(&line.product.title, LINE_TITLE_COLS),
                    line.product.price_label(),
                    width = LINE_TITLE_COLS,
                );
                if i == cursor {
                    Line::from(Span::styled(row, Style::default().add_modifier(Modifier::BOLD)))
                } else {
                    Line::from(row)
                }
            })
            .collect();

        rows.push(Line::raw(""));
        rows.push(Line::from(format!(
            "Total: {}",
            OrderTotal::of_lines(&state.lines)
        )));
        Text::from(rows)
    }

    fn bind(&self, state: &BasketState) -> Vec<Gesture<BasketPatch>> {
        if state.lines.is_empty() {
            return Vec::new();
        }

        let cursor = state.cursor();
        let selected_product = state.lines[cursor].product.clone();

        let mut gestures = vec![
            Gesture::update(
                KeyCode::Up,
                "select",
                BasketPatch {
                    selected: Some(cursor.saturating_sub(1)),
                    ..BasketPatch::default()
                },
            ),
            Gesture::update(
                KeyCode::Down,
                "select",
                BasketPatch {
                    selected: Some((cursor + 1).min(state.lines.len() - 1)),
                    ..BasketPatch::default()
                },
            ),
            Gesture::publish(
                KeyCode::Char('x'),
                "remove",
                AppEvent::ProductRemoved(selected_product.clone()),
            ),
            Gesture::publish(
                KeyCode::Delete,
                "remove",
                AppEvent::ProductRemoved(selected_product),
            ),
        ];
        // Browsing hands over to checkout here: default details, to be
        // completed in the order form.
        gestures.push(Gesture::publish(
            KeyCode::Char('c'),
            "checkout",
            AppEvent::OrderInitiated(OrderDetails::default()),
        ));
        gestures
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Product;
    use crate::tui::view::Action;

    fn line(id: &str, count: u32) -> BasketLine {
        BasketLine {
            product: Product {
                id: id.to_string(),
                title: id.to_uppercase(),
                price: Some("5".parse().unwrap()),
                ..Product::default()
            },
            item_count: count,
        }
    }

    fn published_on(gestures: &[Gesture<BasketPatch>], key: KeyCode) -> Vec<AppEvent> {
        gestures
            .iter()
            .filter(|g| g.key == key)
            .flat_map(|g| g.actions.iter())
            .filter_map(|a| match a {
                Action::Publish(event) => Some(event.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn empty_basket_binds_no_gestures() {
        assert!(BasketView.bind(&BasketState::default()).is_empty());
        let text = BasketView.render(&BasketState::default());
        assert_eq!(text.lines[0].to_string(), "basket is empty");
    }

    #[test]
    fn remove_targets_the_selected_line() {
        let state = BasketState {
            lines: vec![line("p1", 1), line("p2", 3)],
            selected: 1,
        };
        let events = published_on(&BasketView.bind(&state), KeyCode::Char('x'));
        let AppEvent::ProductRemoved(product) = &events[0] else {
            panic!("remove should publish ProductRemoved");
        };
        assert_eq!(product.id, "p2");
    }

    #[test]
    fn cursor_is_clamped_after_the_snapshot_shrinks() {
        let state = BasketState {
            lines: vec![line("p1", 1)],
            selected: 7,
        };
        // Bind must target the only remaining line, not index 7.
        let events = published_on(&BasketView.bind(&state), KeyCode::Delete);
        let AppEvent::ProductRemoved(product) = &events[0] else {
            panic!();
        };
        assert_eq!(product.id, "p1");
    }

    #[test]
    fn checkout_publishes_default_details() {
        let state = BasketState {
            lines: vec![line("p1", 2)],
            selected: 0,
        };
        let events = published_on(&BasketView.bind(&state), KeyCode::Char('c'));
        assert_eq!(
            events,
            vec![AppEvent::OrderInitiated(OrderDetails::default())]
        );
    }

    #[test]
    fn render_shows_counts_and_total() {
        let state = BasketState {
            lines: vec![line("p1", 2), line("p2", 1)],
            selected: 0,
        };
        let text = BasketView.render(&state);
        let all: String = text
            .lines
            .iter()
            .map(|l| l.to_string())
            .collect::<Vec<_>>()
            .join("\n");
        assert!(all.contains("2 × P1"));
        assert!(all.contains("Total: 15 cr"));
    }
}
