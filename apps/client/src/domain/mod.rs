//! Domain layer: snapshot, cards, legal actions and pile selection.

pub mod actions;
pub mod cards;
pub mod selection;
pub mod snapshot;

#[cfg(test)]
mod test_prelude;
#[cfg(test)]
mod tests_props_selection;

// Re-exports for ergonomics
pub use actions::{ActionMap, ActionRegistry, PLAY_ALL_KEY};
pub use cards::{base_art_path, card_art_path, Card, CardRecord};
pub use selection::{
    PileConstraint, SelectionError, SelectionOutcome, SelectionPhase, SelectionSession, SlotRef,
    Toggle,
};
pub use snapshot::{GameStateSnapshot, PileId, PlayerRecord};
