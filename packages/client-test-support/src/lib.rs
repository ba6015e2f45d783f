//! Client test support utilities
//!
//! Shared by the client's integration tests: logging initialisation and
//! helpers for building wire frames.

pub mod frames;
pub mod test_logging;
