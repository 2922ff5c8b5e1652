// Modal view - the single shared overlay
//
// Two states: closed (initial) and open. `open` replaces the displayed
// content in place, so opening while already open swaps content without
// stacking. Closing is event-mediated: the Escape gesture publishes
// `ModalClosed`, and the modal's own subscription to that event performs
// the transition - button, Escape, and external dispatch all converge on
// one path. Opening stays a direct method call, the one sanctioned
// non-event interface, because other views need to raise the dialog
// synchronously.

use crate::events::AppEvent;
use crate::tui::view::{Gesture, ModalContent, View, ViewHost, ViewState};
use crossterm::event::KeyCode;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModalState {
    pub open: bool,
    pub content: ModalContent,
}

#[derive(Debug, Clone, Default)]
pub struct ModalPatch {
    pub open: Option<bool>,
    pub content: Option<ModalContent>,
}

impl ViewState for ModalState {
    type Patch = ModalPatch;

    fn merge(&mut self, patch: ModalPatch) {
        if let Some(open) = patch.open {
            self.open = open;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
    }
}

pub struct ModalView;

impl View for ModalView {
    type State = ModalState;

    fn render(&self, state: &ModalState) -> Text<'static> {
        if !state.open {
            return Text::default();
        }

        let mut lines = vec![
            Line::from(Span::styled(
                state.content.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::raw(""),
        ];
        lines.extend(state.content.body.iter().cloned().map(Line::from));
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            "esc to close",
            Style::default().add_modifier(Modifier::DIM),
        )));
        Text::from(lines)
    }

    fn bind(&self, state: &ModalState) -> Vec<Gesture<ModalPatch>> {
        if !state.open {
            return Vec::new();
        }
        vec![Gesture::publish(
            KeyCode::Esc,
            "close",
            AppEvent::ModalClosed,
        )]
    }
}

impl ViewHost<ModalView> {
    /// Direct open call: closed -> open, or replace content while open.
    pub fn open(&mut self, content: ModalContent) {
        self.update(ModalPatch {
            open: Some(true),
            content: Some(content),
        });
    }

    /// Transition open -> closed. Content is left as-is; the next open
    /// replaces it.
    pub fn close(&mut self) {
        self.update(ModalPatch {
            open: Some(false),
            content: None,
        });
    }

    pub fn is_open(&self) -> bool {
        self.state().open
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::page::Page;
    use crate::tui::view::Outcome;

    fn content(title: &str) -> ModalContent {
        ModalContent {
            title: title.to_string(),
            body: vec!["line".to_string()],
        }
    }

    fn mounted() -> ViewHost<ModalView> {
        let page = Page::new();
        page.register("modal");
        ViewHost::mount(&page, "modal", ModalView).unwrap()
    }

    #[test]
    fn opening_while_open_replaces_content_in_place() {
        let mut modal = mounted();
        assert!(!modal.is_open());

        modal.open(content("A"));
        assert!(modal.is_open());
        assert_eq!(modal.state().content.title, "A");

        modal.open(content("B"));
        assert!(modal.is_open());
        assert_eq!(modal.state().content.title, "B");
    }

    #[test]
    fn close_keeps_stale_content_but_renders_nothing() {
        let page = Page::new();
        page.register("modal");
        let mut modal = ViewHost::mount(&page, "modal", ModalView).unwrap();

        modal.open(content("A"));
        assert!(!page.content("modal").lines.is_empty());

        modal.close();
        assert!(!modal.is_open());
        assert_eq!(modal.state().content.title, "A");
        assert!(page.content("modal").lines.is_empty());
    }

    #[test]
    fn escape_publishes_modal_closed_only_while_open() {
        let mut modal = mounted();
        assert!(modal.handle_key(KeyCode::Esc).is_none());

        modal.open(content("A"));
        let outcomes = modal.handle_key(KeyCode::Esc).unwrap();
        assert!(matches!(
            outcomes[0],
            Outcome::Publish(AppEvent::ModalClosed)
        ));
    }
}
