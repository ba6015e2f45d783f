//! Pieces of the terminal front end that are worth testing on their own.

pub mod input;
