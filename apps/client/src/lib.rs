#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod bin_support;
pub mod config;
pub mod domain;
pub mod error;
pub mod protocol;
pub mod telemetry;
pub mod view;
pub mod ws;


// Re-exports for public API
pub use config::{ClientConfig, LogFormat};
pub use domain::{ActionRegistry, GameStateSnapshot, PileConstraint, PileId, SelectionSession};
pub use error::ClientError;
pub use protocol::{ClientEvent, ServerEvent};
pub use view::{GameView, RecordingView, TextView};
pub use ws::{ConnectionSession, Connector, UiInput, WsConnector};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
