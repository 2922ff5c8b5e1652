// Product card view
//
// One card per product in the gallery grid. The toggle gesture is a
// two-way switch: its label and the event it publishes (add vs remove)
// follow the `in_basket` flag, which is part of the typed state so that
// render stays a pure function of one value. The card never decides
// whether the toggle outcome is consistent with the real basket - it
// publishes intent and waits for `BasketChanged` to tell it the truth.

use crate::events::AppEvent;
use crate::model::Product;
use crate::tui::view::{Gesture, ModalContent, View, ViewState};
use crate::tui::views::clip;
use crossterm::event::KeyCode;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};

/// Most columns a title row may take inside a card box.
const TITLE_COLS: usize = 24;
/// Wrap width for description text inside the preview modal.
const PREVIEW_COLS: usize = 46;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardState {
    pub product: Product,
    pub in_basket: bool,
}

#[derive(Debug, Clone, Default)]
pub struct CardPatch {
    pub product: Option<Product>,
    pub in_basket: Option<bool>,
}

impl ViewState for CardState {
    type Patch = CardPatch;

    fn merge(&mut self, patch: CardPatch) {
        if let Some(product) = patch.product {
            self.product = product;
        }
        if let Some(in_basket) = patch.in_basket {
            self.in_basket = in_basket;
        }
    }
}

pub struct CardView;

impl View for CardView {
    type State = CardState;

    fn render(&self, state: &CardState) -> Text<'static> {
        let product = &state.product;
        let marker = if state.in_basket { "● " } else { "" };

        Text::from(vec![
            Line::from(Span::styled(
                format!("{} {}", product.image, product.category),
                Style::default().add_modifier(Modifier::DIM),
            )),
            Line::from(Span::styled(
                clip(&product.title, TITLE_COLS),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(format!("{}{}", marker, product.price_label())),
        ])
    }

    fn bind(&self, state: &CardState) -> Vec<Gesture<CardPatch>> {
        let toggle = if state.in_basket {
            Gesture::publish(
                KeyCode::Char(' '),
                "drop",
                AppEvent::ProductRemoved(state.product.clone()),
            )
        } else {
            Gesture::publish(
                KeyCode::Char(' '),
                "add",
                AppEvent::ProductAdded(state.product.clone()),
            )
        };
        let preview = Gesture::publish(
            KeyCode::Enter,
            "view",
            AppEvent::ProductViewed(state.product.clone()),
        )
        .then_open(preview_content(&state.product));

        vec![toggle, preview]
    }
}

/// Modal body for the card's preview gesture.
fn preview_content(product: &Product) -> ModalContent {
    let mut body = vec![format!("{}  {}", product.image, product.category), String::new()];
    body.extend(wrap_words(&product.description, PREVIEW_COLS));
    body.push(String::new());
    body.push(format!("Price: {}", product.price_label()));
    ModalContent {
        title: product.title.clone(),
        body,
    }
}

/// Greedy word wrap; good enough for short catalog descriptions.
fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::view::Action;

    fn widget() -> Product {
        Product {
            id: "p1".to_string(),
            title: "Widget".to_string(),
            description: "A very fine widget for all seasons".to_string(),
            image: "▣".to_string(),
            category: "hardware".to_string(),
            price: Some("10".parse().unwrap()),
        }
    }

    fn published_on(gestures: &[Gesture<CardPatch>], key: KeyCode) -> Vec<AppEvent> {
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
    fn toggle_publishes_add_when_outside_the_basket() {
        let state = CardState {
            product: widget(),
            in_basket: false,
        };
        let events = published_on(&CardView.bind(&state), KeyCode::Char(' '));
        assert_eq!(events, vec![AppEvent::ProductAdded(widget())]);
    }

    #[test]
    fn toggle_publishes_remove_when_already_in_the_basket() {
        let state = CardState {
            product: widget(),
            in_basket: true,
        };
        let events = published_on(&CardView.bind(&state), KeyCode::Char(' '));
        assert_eq!(events, vec![AppEvent::ProductRemoved(widget())]);
    }

    #[test]
    fn preview_publishes_viewed_and_opens_the_modal() {
        let state = CardState {
            product: widget(),
            in_basket: false,
        };
        let gestures = CardView.bind(&state);
        let preview = gestures.iter().find(|g| g.key == KeyCode::Enter).unwrap();

        assert!(matches!(
            preview.actions[0],
            Action::Publish(AppEvent::ProductViewed(_))
        ));
        let Action::Open(content) = &preview.actions[1] else {
            panic!("second action should open the modal");
        };
        assert_eq!(content.title, "Widget");
        assert!(content.body.last().unwrap().contains("10 cr"));
    }

    #[test]
    fn render_marks_basketed_products() {
        let mut state = CardState {
            product: widget(),
            in_basket: false,
        };
        let plain = CardView.render(&state).lines[2].to_string();
        assert_eq!(plain, "10 cr");

        state.in_basket = true;
        let marked = CardView.render(&state).lines[2].to_string();
        assert_eq!(marked, "● 10 cr");
    }

    #[test]
    fn wrap_words_respects_the_width() {
        let lines = wrap_words("one two three four five", 9);
        assert_eq!(lines, vec!["one two", "three", "four five"]);
    }
}
