//! Four-way intersection simulation library
//!
//! The simulation core runs independently; the Bevy renderer is optional.

pub mod simulation;

#[cfg(feature = "ui")]
pub mod ui;
