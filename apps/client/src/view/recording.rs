//! View that records what it was asked to draw.
//!
//! Used by headless drivers and by tests; clones share one log.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::actions::ActionRegistry;
use crate::domain::selection::SelectionSession;
use crate::domain::snapshot::{GameStateSnapshot, PileId};
use crate::view::{ActionButton, GameOutcome, GameView};

#[derive(Clone, Debug, PartialEq)]
pub enum ViewEvent {
    State(GameStateSnapshot),
    Status(String),
    Actions(Vec<ActionButton>),
    Selection {
        action: String,
        count: usize,
        min: usize,
        max: usize,
        piles: Vec<PileId>,
        done_enabled: bool,
    },
    SelectionHidden,
    GameOver(GameOutcome),
}

#[derive(Clone, Debug, Default)]
pub struct RecordingView {
    events: Arc<Mutex<Vec<ViewEvent>>>,
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    fn log(&self) -> MutexGuard<'_, Vec<ViewEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn push(&self, event: ViewEvent) {
        self.log().push(event);
    }

    pub fn events(&self) -> Vec<ViewEvent> {
        self.log().clone()
    }

    pub fn last(&self) -> Option<ViewEvent> {
        self.log().last().cloned()
    }

    pub fn take(&self) -> Vec<ViewEvent> {
        std::mem::take(&mut *self.log())
    }
}

impl GameView for RecordingView {
    fn render_state(&mut self, snapshot: &GameStateSnapshot, _actions: &ActionRegistry) {
        self.push(ViewEvent::State(snapshot.clone()));
    }

    fn show_status(&mut self, message: &str) {
        self.push(ViewEvent::Status(message.to_string()));
    }

    fn show_actions(&mut self, buttons: &[ActionButton]) {
        self.push(ViewEvent::Actions(buttons.to_vec()));
    }

    fn show_selection(&mut self, selection: &SelectionSession) {
        let constraint = selection.constraint();
        self.push(ViewEvent::Selection {
            action: constraint.action.clone(),
            count: selection.selected_count(),
            min: constraint.min,
            max: constraint.max,
            piles: selection.candidate_piles().cloned().collect(),
            done_enabled: selection.done_enabled(),
        });
    }

    fn hide_selection(&mut self) {
        self.push(ViewEvent::SelectionHidden);
    }

    fn game_over(&mut self, outcome: GameOutcome) {
        self.push(ViewEvent::GameOver(outcome));
    }
}
