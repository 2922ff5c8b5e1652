// View lifecycle base - generic contract for "a region backed by state"
//
// A concrete view supplies two operations: `render` (pure state -> content)
// and `bind` (state -> key gestures). `ViewHost` is the lifecycle around
// them: mounting resolves the anchor once and immediately runs one render
// pass followed by one bind pass; `update` shallow-merges a patch into the
// state and refreshes. Render and rebind always happen together as a single
// refresh, so the gesture table can never describe stale content.
//
// Gesture payloads are computed from the state at bind time. Because every
// state change rebinds, a payload is always consistent with what is on
// screen - the card's toggle publishes add or remove depending on the
// in_basket flag of the state that produced the current render.
//
// Key handling applies local patches immediately but returns publish/open
// effects to the caller. The shell executes them after releasing its borrow
// of the host, mirroring the bus's snapshot-then-invoke discipline: a
// published event may re-enter this very host through a subscription.

use crate::events::AppEvent;
use crate::tui::page::{Page, RegionHandle};
use anyhow::Result;
use crossterm::event::KeyCode;
use ratatui::text::Text;

/// State held by a view host. `Patch` is the partial-update shape: every
/// field is optional and `merge` keeps current values where the patch is
/// `None`.
pub trait ViewState: Default + Clone {
    type Patch: Clone;

    fn merge(&mut self, patch: Self::Patch);
}

/// Content shown by the shared modal overlay.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModalContent {
    pub title: String,
    pub body: Vec<String>,
}

/// One effect a gesture can ask for.
#[derive(Clone)]
pub enum Action<P> {
    /// Publish an event on the bus.
    Publish(AppEvent),
    /// Apply a local state patch (and so re-render).
    Update(P),
    /// Open the shared modal with this content - the one direct,
    /// non-event-mediated call in the system.
    Open(ModalContent),
}

/// A key bound to one or more actions, with a label for the status bar.
#[derive(Clone)]
pub struct Gesture<P> {
    pub key: KeyCode,
    pub hint: &'static str,
    pub actions: Vec<Action<P>>,
}

impl<P> Gesture<P> {
    pub fn publish(key: KeyCode, hint: &'static str, event: AppEvent) -> Self {
        Self {
            key,
            hint,
            actions: vec![Action::Publish(event)],
        }
    }

    pub fn update(key: KeyCode, hint: &'static str, patch: P) -> Self {
        Self {
            key,
            hint,
            actions: vec![Action::Update(patch)],
        }
    }

    pub fn then_open(mut self, content: ModalContent) -> Self {
        self.actions.push(Action::Open(content));
        self
    }
}

/// Character-level edits for views that accept free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit {
    Insert(char),
    DeleteBack,
}

/// The two abstract operations every concrete view supplies, plus an
/// optional text-editing hook.
pub trait View {
    type State: ViewState;

    /// Build the region content from the state. Must be idempotent and
    /// side-effect-free; the host writes the result into the region.
    fn render(&self, state: &Self::State) -> Text<'static>;

    /// Declare the key gestures valid for this state.
    fn bind(&self, state: &Self::State) -> Vec<Gesture<<Self::State as ViewState>::Patch>>;

    /// Turn a character edit into a state patch. Views without text entry
    /// keep the default.
    fn edit(&self, _state: &Self::State, _edit: Edit) -> Option<<Self::State as ViewState>::Patch> {
        None
    }
}

/// Effects returned from key handling for the shell to execute once all
/// borrows are released.
#[derive(Clone)]
pub enum Outcome {
    Publish(AppEvent),
    Open(ModalContent),
}

/// Lifecycle base: a view, its state, its region, and its current gestures.
pub struct ViewHost<V: View> {
    region: RegionHandle,
    view: V,
    state: V::State,
    gestures: Vec<Gesture<<V::State as ViewState>::Patch>>,
}

impl<V: View> ViewHost<V> {
    /// Mount with the state type's default value.
    pub fn mount(page: &Page, anchor: &str, view: V) -> Result<Self> {
        Self::mount_with(page, anchor, view, V::State::default())
    }

    /// Mount on `anchor` with an explicit initial state. Fails when the
    /// anchor does not exist; performs the initial render+bind pass.
    pub fn mount_with(page: &Page, anchor: &str, view: V, initial: V::State) -> Result<Self> {
        let region = page.resolve(anchor)?;
        let mut host = Self {
            region,
            view,
            state: initial,
            gestures: Vec::new(),
        };
        host.refresh();
        Ok(host)
    }

    pub fn state(&self) -> &V::State {
        &self.state
    }

    /// Shallow-merge the patch into the state, then refresh. The single
    /// state-mutation entry point.
    pub fn update(&mut self, patch: <V::State as ViewState>::Patch) {
        self.state.merge(patch);
        self.refresh();
    }

    fn refresh(&mut self) {
        self.region.write(self.view.render(&self.state));
        self.gestures = self.view.bind(&self.state);
    }

    /// Run the gestures bound to `key`. Local patches are applied in place;
    /// publish/open effects come back as outcomes. `None` means the key is
    /// not bound and the caller should fall through.
    pub fn handle_key(&mut self, key: KeyCode) -> Option<Vec<Outcome>> {
        // Clone the matching actions first: applying an Update rebinds and
        // replaces the gesture table under us.
        let matched: Vec<Action<_>> = self
            .gestures
            .iter()
            .filter(|gesture| gesture.key == key)
            .flat_map(|gesture| gesture.actions.iter().cloned())
            .collect();

        if !matched.is_empty() {
            let mut outcomes = Vec::new();
            for action in matched {
                match action {
                    Action::Update(patch) => self.update(patch),
                    Action::Publish(event) => outcomes.push(Outcome::Publish(event)),
                    Action::Open(content) => outcomes.push(Outcome::Open(content)),
                }
            }
            return Some(outcomes);
        }

        let edit = match key {
            KeyCode::Char(c) => Some(Edit::Insert(c)),
            KeyCode::Backspace => Some(Edit::DeleteBack),
            _ => None,
        };
        if let Some(edit) = edit {
            if let Some(patch) = self.view.edit(&self.state, edit) {
                self.update(patch);
                return Some(Vec::new());
            }
        }
        None
    }

    /// Key hints for the status bar, one per gesture, deduplicated by label.
    pub fn hints(&self) -> Vec<(String, &'static str)> {
        let mut hints: Vec<(String, &'static str)> = Vec::new();
        for gesture in &self.gestures {
            if hints.iter().any(|(_, hint)| *hint == gesture.hint) {
                continue;
            }
            hints.push((key_label(gesture.key), gesture.hint));
        }
        hints
    }
}

/// Type-erased key routing, so the shell can hold differently typed hosts
/// in one focus table.
pub trait InputSink {
    fn handle_key(&mut self, key: KeyCode) -> Option<Vec<Outcome>>;
    fn hints(&self) -> Vec<(String, &'static str)>;
}

impl<V: View> InputSink for ViewHost<V> {
    fn handle_key(&mut self, key: KeyCode) -> Option<Vec<Outcome>> {
        ViewHost::handle_key(self, key)
    }

    fn hints(&self) -> Vec<(String, &'static str)> {
        ViewHost::hints(self)
    }
}

/// Short display label for a key, for status-bar hints.
pub fn key_label(key: KeyCode) -> String {
    match key {
        KeyCode::Char(' ') => "space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "enter".to_string(),
        KeyCode::Esc => "esc".to_string(),
        KeyCode::Up => "↑".to_string(),
        KeyCode::Down => "↓".to_string(),
        KeyCode::Left => "←".to_string(),
        KeyCode::Right => "→".to_string(),
        KeyCode::Backspace => "⌫".to_string(),
        KeyCode::Delete => "del".to_string(),
        KeyCode::Tab => "tab".to_string(),
        other => format!("{other:?}").to_lowercase(),
    }
}
