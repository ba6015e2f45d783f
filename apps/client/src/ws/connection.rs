//! Connection lifecycle: open, inbound routing, UI activations, close.

use tokio::sync::mpsc::error::TryRecvError;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, info, warn};

use crate::error::ClientError;
use crate::protocol::{ClientEvent, ServerEvent};
use crate::view::elements::{ElementId, UiCommand};
use crate::view::GameView;
use crate::ws::channel::{Connector, InboundFrame};
use crate::ws::dispatcher::{Dispatched, EventDispatcher};
use crate::ws::session::ClientSession;

/// Input from whatever front end drives the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiInput {
    Activate(ElementId),
    Quit,
}

pub struct ConnectionSession<C: Connector, V: GameView> {
    connector: C,
    server_url: String,
    session: ClientSession,
    dispatcher: EventDispatcher<V>,
    inbound: Option<UnboundedReceiver<InboundFrame>>,
}

impl<C: Connector, V: GameView> ConnectionSession<C, V> {
    pub fn new(connector: C, server_url: impl Into<String>, view: V) -> Self {
        Self {
            connector,
            server_url: server_url.into(),
            session: ClientSession::new(),
            dispatcher: EventDispatcher::new(view),
            inbound: None,
        }
    }

    pub fn session(&self) -> &ClientSession {
        &self.session
    }

    pub fn view(&self) -> &V {
        self.dispatcher.view()
    }

    pub fn is_open(&self) -> bool {
        self.session.is_connected()
    }

    /// Ask the server for a new game, connecting first if needed.
    ///
    /// Calling this on an open channel just sends `start_game` again.
    pub async fn open(&mut self) -> Result<(), ClientError> {
        self.drain_pending();
        if self.session.outbox().is_some_and(|o| o.is_closed()) {
            self.on_close();
        }

        if !self.session.is_connected() {
            let connection = self.connector.connect(&self.server_url).await?;
            info!(
                conn_id = %connection.outbox.conn_id(),
                url = %self.server_url,
                "[WS CLIENT] connected"
            );
            self.session.attach(connection.outbox);
            self.inbound = Some(connection.inbound);
            self.dispatcher.view_mut().show_status("connected");
        }

        self.send(&ClientEvent::StartGame)
    }

    pub fn send(&self, event: &ClientEvent) -> Result<(), ClientError> {
        self.session.send(event)
    }

    /// Decode one raw frame and route it. A malformed frame leaves all state
    /// untouched.
    pub fn on_message(&mut self, raw: &str) -> Result<Dispatched, ClientError> {
        let event = match ServerEvent::decode(raw) {
            Ok(event) => event,
            Err(err) => {
                warn!(
                    conn_id = ?self.session.conn_id(),
                    code = err.code(),
                    error = %err,
                    "[WS CLIENT] dropping malformed message"
                );
                return Err(err);
            }
        };
        self.dispatcher.dispatch(&mut self.session, event)
    }

    /// Transport went away: forget everything tied to it.
    pub fn on_close(&mut self) {
        let had_selection = self.session.selection().is_some();
        info!(conn_id = ?self.session.conn_id(), "[WS CLIENT] channel closed");
        self.session.reset();
        self.inbound = None;

        let view = self.dispatcher.view_mut();
        if had_selection {
            view.hide_selection();
        }
        view.show_status("not connected");
    }

    /// Run whatever the element is wired to. Elements with no handler are
    /// ignored.
    pub async fn activate(&mut self, element: &ElementId) -> Result<(), ClientError> {
        let Some(command) = self.session.handlers().lookup(element).cloned() else {
            debug!(?element, "[WS CLIENT] no handler for element");
            return Ok(());
        };

        match command {
            UiCommand::SendAction(action) => self.send(&ClientEvent::ChooseAction { action }),
            UiCommand::ToggleCard(slot) => self
                .dispatcher
                .toggle_selection(&mut self.session, &slot)
                .map(|_| ()),
            UiCommand::SubmitSelection => self
                .dispatcher
                .submit_selection(&mut self.session)
                .map(|_| ()),
            UiCommand::NewGame => self.open().await,
        }
    }

    /// Handle frames that arrived while nobody was polling, so a close the
    /// transport already reported is seen before the channel is reused.
    fn drain_pending(&mut self) {
        loop {
            let next = match self.inbound.as_mut() {
                Some(rx) => rx.try_recv(),
                None => break,
            };
            match next {
                Ok(frame) => {
                    if let Err(err) = self.handle_frame(Some(frame)) {
                        warn!(code = err.code(), error = %err, "[WS CLIENT] queued message failed");
                    }
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.on_close();
                    break;
                }
            }
        }
    }

    fn handle_frame(
        &mut self,
        frame: Option<InboundFrame>,
    ) -> Result<Option<Dispatched>, ClientError> {
        match frame {
            Some(InboundFrame::Text(raw)) => self.on_message(&raw).map(Some),
            Some(InboundFrame::Closed) | None => {
                self.on_close();
                Ok(None)
            }
        }
    }

    /// Wait for and handle the next inbound frame. `None` means the channel
    /// closed.
    pub async fn process_next(&mut self) -> Result<Option<Dispatched>, ClientError> {
        if self.inbound.is_none() {
            return Err(ClientError::NotConnected);
        }
        let frame = recv_inbound(&mut self.inbound).await;
        self.handle_frame(frame)
    }

    /// Drive the client until the front end quits or its input ends.
    pub async fn run(&mut self, ui: &mut UnboundedReceiver<UiInput>) -> Result<(), ClientError> {
        loop {
            tokio::select! {
                frame = recv_inbound(&mut self.inbound) => {
                    if let Err(err) = self.handle_frame(frame) {
                        warn!(code = err.code(), error = %err, "[WS CLIENT] inbound message failed");
                    }
                }
                input = ui.recv() => match input {
                    Some(UiInput::Activate(element)) => {
                        if let Err(err) = self.activate(&element).await {
                            warn!(?element, code = err.code(), error = %err, "[WS CLIENT] activation failed");
                            if err.is_fatal_to_channel() {
                                self.on_close();
                            }
                        }
                    }
                    Some(UiInput::Quit) | None => {
                        info!("[WS CLIENT] front end finished");
                        return Ok(());
                    }
                },
            }
        }
    }
}

async fn recv_inbound(
    inbound: &mut Option<UnboundedReceiver<InboundFrame>>,
) -> Option<InboundFrame> {
    match inbound {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}
