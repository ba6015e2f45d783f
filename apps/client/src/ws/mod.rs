//! Client side of the game channel.

pub mod channel;
pub mod connection;
pub mod dispatcher;
pub mod session;

pub use channel::{Connection, Connector, InboundFrame, Outbox, WsConnector};
pub use connection::{ConnectionSession, UiInput};
pub use dispatcher::{Dispatched, EventDispatcher};
pub use session::ClientSession;
