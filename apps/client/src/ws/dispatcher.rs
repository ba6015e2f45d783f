//! Routes decoded server events into session state and the view.

use tracing::{debug, info};

use crate::domain::actions::PLAY_ALL_KEY;
use crate::domain::selection::{
    PileConstraint, SelectionError, SelectionOutcome, SelectionSession, SlotRef, Toggle,
};
use crate::domain::snapshot::GameStateSnapshot;
use crate::error::ClientError;
use crate::protocol::{ClientEvent, ServerEvent};
use crate::view::elements::{ElementId, UiCommand};
use crate::view::{ActionButton, GameOutcome, GameView};
use crate::ws::session::ClientSession;

/// What handling one event did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatched {
    Rendered,
    Status,
    ActionsOffered { count: usize, play_all: bool },
    SelectionOpened { candidates: usize, replaced: bool },
    GameOver(GameOutcome),
    Ignored,
}

pub struct EventDispatcher<V: GameView> {
    view: V,
}

impl<V: GameView> EventDispatcher<V> {
    pub fn new(view: V) -> Self {
        Self { view }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn dispatch(
        &mut self,
        session: &mut ClientSession,
        event: ServerEvent,
    ) -> Result<Dispatched, ClientError> {
        debug!(event = event.name(), "[DISPATCH] inbound");
        match event {
            ServerEvent::GameState(snapshot) => {
                session.replace_snapshot(snapshot);
                self.render(session);
                Ok(Dispatched::Rendered)
            }
            ServerEvent::Status(message) => {
                self.view.show_status(&message);
                Ok(Dispatched::Status)
            }
            ServerEvent::ChooseAction(actions) => {
                session.actions_mut().set_all(actions);
                Ok(self.offer_actions(session))
            }
            ServerEvent::ChoosePiles(constraint) => self.open_selection(session, constraint),
            ServerEvent::PlayerWon(snapshot) => {
                Ok(self.finish(session, snapshot, GameOutcome::Won))
            }
            ServerEvent::PlayerLost(snapshot) => {
                Ok(self.finish(session, snapshot, GameOutcome::Lost))
            }
            ServerEvent::Unknown { name } => {
                debug!(event = %name, "[DISPATCH] unknown event ignored");
                Ok(Dispatched::Ignored)
            }
        }
    }

    fn finish(
        &mut self,
        session: &mut ClientSession,
        snapshot: GameStateSnapshot,
        outcome: GameOutcome,
    ) -> Dispatched {
        session.replace_snapshot(snapshot);
        self.render(session);
        info!(?outcome, "[DISPATCH] game over");
        self.view.game_over(outcome);
        Dispatched::GameOver(outcome)
    }

    /// Re-register card affordances for the current snapshot and draw it.
    fn render(&mut self, session: &mut ClientSession) {
        let Some(snapshot) = session.snapshot() else {
            return;
        };
        let actions = session.actions();
        let mut affordances = Vec::new();
        for (index, card) in snapshot.trade_row().iter().enumerate() {
            if let Some(key) = actions.buy_key(card.name()) {
                affordances.push((
                    ElementId::TradeRowCard(index),
                    UiCommand::SendAction(key.to_string()),
                ));
            }
        }
        for (index, card) in snapshot.player.hand.iter().enumerate() {
            if let Some(key) = actions.play_key(card.name()) {
                affordances.push((
                    ElementId::HandCard(index),
                    UiCommand::SendAction(key.to_string()),
                ));
            }
        }

        let handlers = session.handlers_mut();
        handlers.clear_card_affordances();
        for (element, command) in affordances {
            handlers.register(element, command);
        }

        if let Some(snapshot) = session.snapshot() {
            self.view.render_state(snapshot, session.actions());
        }
    }

    fn offer_actions(&mut self, session: &mut ClientSession) -> Dispatched {
        let mut buttons: Vec<ActionButton> = session
            .actions()
            .actions()
            .iter()
            .map(|(key, description)| ActionButton {
                element: ElementId::ActionButton(key.to_string()),
                label: description.to_string(),
            })
            .collect();
        let count = buttons.len();
        let play_all = session.snapshot().is_some_and(|s| !s.hand_is_empty());
        if play_all {
            buttons.push(ActionButton {
                element: ElementId::PlayAll,
                label: "play all".to_string(),
            });
        }

        let keys: Vec<String> = session
            .actions()
            .actions()
            .iter()
            .map(|(key, _)| key.to_string())
            .collect();
        let handlers = session.handlers_mut();
        handlers.clear_actions();
        for key in keys {
            handlers.register(
                ElementId::ActionButton(key.clone()),
                UiCommand::SendAction(key),
            );
        }
        if play_all {
            handlers.register(
                ElementId::PlayAll,
                UiCommand::SendAction(PLAY_ALL_KEY.to_string()),
            );
        }

        self.view.show_actions(&buttons);
        self.render(session);
        Dispatched::ActionsOffered { count, play_all }
    }

    fn open_selection(
        &mut self,
        session: &mut ClientSession,
        constraint: PileConstraint,
    ) -> Result<Dispatched, ClientError> {
        let Some(snapshot) = session.snapshot() else {
            return Err(ClientError::protocol("choose_piles received before game_state"));
        };

        let outbox = session.outbox().cloned();
        let selection = SelectionSession::open(
            constraint,
            snapshot,
            Box::new(move |outcome: &SelectionOutcome| {
                outbox.ok_or(ClientError::NotConnected)?.send(&ClientEvent::ChoosePiles {
                    pile: outcome.pile.clone(),
                    cards: outcome.cards.clone(),
                })
            }),
        );
        let candidates = selection.groups().len();

        let handlers = session.handlers_mut();
        handlers.clear_actions();
        handlers.clear_selection();
        for group in selection.groups() {
            for index in 0..group.slots.len() {
                let slot = SlotRef::new(group.pile.clone(), index);
                handlers.register(
                    ElementId::SelectionCard(slot.clone()),
                    UiCommand::ToggleCard(slot),
                );
            }
        }
        handlers.register(ElementId::SelectionDone, UiCommand::SubmitSelection);

        self.view.show_actions(&[]);
        self.view.show_selection(&selection);
        let replaced = session.set_selection(selection).is_some();
        if replaced {
            debug!("[DISPATCH] open selection replaced by a newer request");
        }
        Ok(Dispatched::SelectionOpened {
            candidates,
            replaced,
        })
    }

    pub fn toggle_selection(
        &mut self,
        session: &mut ClientSession,
        slot: &SlotRef,
    ) -> Result<Toggle, ClientError> {
        let selection = session.selection_mut().ok_or(SelectionError::Closed)?;
        let toggled = selection.toggle(slot)?;
        self.view.show_selection(selection);
        Ok(toggled)
    }

    /// Submit the open selection. A submission below the minimum leaves it
    /// open; anything else tears it down.
    pub fn submit_selection(
        &mut self,
        session: &mut ClientSession,
    ) -> Result<SelectionOutcome, ClientError> {
        let selection = session.selection_mut().ok_or(SelectionError::Closed)?;
        let submitted = selection.submit();
        if let Err(ClientError::Selection(SelectionError::BelowMinimum { .. })) = &submitted {
            return submitted;
        }

        session.take_selection();
        session.handlers_mut().clear_selection();
        self.view.hide_selection();
        submitted
    }
}
