//! Wire protocol: `[eventName, payload]` envelopes and typed events.

pub mod envelope;
pub mod events;

pub use envelope::{decode_envelope, encode_envelope};
pub use events::{ClientEvent, ServerEvent};
