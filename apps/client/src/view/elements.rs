use std::collections::HashMap;

use crate::domain::selection::SlotRef;

/// Identity of an interactive element on screen.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ElementId {
    ActionButton(String),
    PlayAll,
    /// Position in the trade row, explorer included.
    TradeRowCard(usize),
    HandCard(usize),
    SelectionCard(SlotRef),
    SelectionDone,
    NewGame,
}

impl ElementId {
    fn is_action(&self) -> bool {
        matches!(self, ElementId::ActionButton(_) | ElementId::PlayAll)
    }

    fn is_card_affordance(&self) -> bool {
        matches!(self, ElementId::TradeRowCard(_) | ElementId::HandCard(_))
    }

    fn is_selection(&self) -> bool {
        matches!(self, ElementId::SelectionCard(_) | ElementId::SelectionDone)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UiCommand {
    SendAction(String),
    ToggleCard(SlotRef),
    SubmitSelection,
    NewGame,
}

/// Map from element identity to what activating it does.
#[derive(Debug, Default)]
pub struct HandlerRegistry {
    handlers: HashMap<ElementId, UiCommand>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, element: ElementId, command: UiCommand) {
        self.handlers.insert(element, command);
    }

    pub fn lookup(&self, element: &ElementId) -> Option<&UiCommand> {
        self.handlers.get(element)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn clear(&mut self) {
        self.handlers.clear();
    }

    pub fn clear_actions(&mut self) {
        self.handlers.retain(|element, _| !element.is_action());
    }

    pub fn clear_card_affordances(&mut self) {
        self.handlers.retain(|element, _| !element.is_card_affordance());
    }

    pub fn clear_selection(&mut self) {
        self.handlers.retain(|element, _| !element.is_selection());
    }
}
