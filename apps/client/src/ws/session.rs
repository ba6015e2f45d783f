//! Per-connection client state.
//!
//! Everything the client knows about the current game lives here and is
//! cleared together when the channel goes away.

use tracing::info;
use uuid::Uuid;

use crate::domain::actions::ActionRegistry;
use crate::domain::selection::SelectionSession;
use crate::domain::snapshot::GameStateSnapshot;
use crate::error::ClientError;
use crate::protocol::ClientEvent;
use crate::view::elements::{ElementId, HandlerRegistry, UiCommand};
use crate::ws::channel::Outbox;

#[derive(Debug)]
pub struct ClientSession {
    outbox: Option<Outbox>,
    snapshot: Option<GameStateSnapshot>,
    actions: ActionRegistry,
    selection: Option<SelectionSession>,
    handlers: HandlerRegistry,
}

impl Default for ClientSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientSession {
    pub fn new() -> Self {
        let mut handlers = HandlerRegistry::new();
        handlers.register(ElementId::NewGame, UiCommand::NewGame);
        Self {
            outbox: None,
            snapshot: None,
            actions: ActionRegistry::new(),
            selection: None,
            handlers,
        }
    }

    pub fn attach(&mut self, outbox: Outbox) {
        self.outbox = Some(outbox);
    }

    pub fn outbox(&self) -> Option<&Outbox> {
        self.outbox.as_ref()
    }

    pub fn conn_id(&self) -> Option<Uuid> {
        self.outbox.as_ref().map(Outbox::conn_id)
    }

    pub fn is_connected(&self) -> bool {
        self.outbox.as_ref().is_some_and(|o| !o.is_closed())
    }

    /// Fails with `NotConnected` when no channel is attached; nothing is queued.
    pub fn send(&self, event: &ClientEvent) -> Result<(), ClientError> {
        self.outbox
            .as_ref()
            .ok_or(ClientError::NotConnected)?
            .send(event)
    }

    pub fn snapshot(&self) -> Option<&GameStateSnapshot> {
        self.snapshot.as_ref()
    }

    /// Replace the snapshot wholesale; the previous one is dropped.
    pub fn replace_snapshot(&mut self, snapshot: GameStateSnapshot) {
        self.snapshot = Some(snapshot);
    }

    pub fn actions(&self) -> &ActionRegistry {
        &self.actions
    }

    pub fn actions_mut(&mut self) -> &mut ActionRegistry {
        &mut self.actions
    }

    pub fn selection(&self) -> Option<&SelectionSession> {
        self.selection.as_ref()
    }

    pub fn selection_mut(&mut self) -> Option<&mut SelectionSession> {
        self.selection.as_mut()
    }

    /// Install a selection, returning the one it replaces.
    pub fn set_selection(&mut self, selection: SelectionSession) -> Option<SelectionSession> {
        self.selection.replace(selection)
    }

    pub fn take_selection(&mut self) -> Option<SelectionSession> {
        self.selection.take()
    }

    pub fn handlers(&self) -> &HandlerRegistry {
        &self.handlers
    }

    pub fn handlers_mut(&mut self) -> &mut HandlerRegistry {
        &mut self.handlers
    }

    /// Drop channel, snapshot, actions and any open selection in one step.
    /// An abandoned selection never invokes its completion callback.
    pub fn reset(&mut self) {
        if let Some(conn_id) = self.conn_id() {
            info!(conn_id = %conn_id, "[WS CLIENT] session reset");
        }
        *self = Self::new();
    }
}
