//! Rendering collaborator and UI element wiring.
//!
//! The view only draws; what clicking an element does lives in the
//! [`HandlerRegistry`](elements::HandlerRegistry) owned by the session.

pub mod elements;
pub mod recording;
pub mod text;

use crate::domain::actions::ActionRegistry;
use crate::domain::selection::SelectionSession;
use crate::domain::snapshot::GameStateSnapshot;
use crate::view::elements::ElementId;

pub use elements::{HandlerRegistry, UiCommand};
pub use recording::{RecordingView, ViewEvent};
pub use text::TextView;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameOutcome {
    Won,
    Lost,
}

impl GameOutcome {
    pub fn notice(&self) -> &'static str {
        match self {
            GameOutcome::Won => "we won!",
            GameOutcome::Lost => "you lost :(",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionButton {
    pub element: ElementId,
    pub label: String,
}

pub trait GameView: Send {
    fn render_state(&mut self, snapshot: &GameStateSnapshot, actions: &ActionRegistry);
    fn show_status(&mut self, message: &str);
    fn show_actions(&mut self, buttons: &[ActionButton]);
    fn show_selection(&mut self, selection: &SelectionSession);
    fn hide_selection(&mut self);
    fn game_over(&mut self, outcome: GameOutcome);
}
