//! Standalone intersection simulation module
//!
//! This module contains the signal controller, the vehicle motion model and
//! the per-tick orchestration. None of it depends on Bevy, so it can run in
//! a console loop or under test.

mod config;
mod controller;
mod error;
mod stats;
mod types;
mod vehicle;
mod world;

pub use config::SimConfig;
pub use controller::{IntersectionController, SignalState, TrafficCounts};
pub use error::{ConfigError, ControlError};
pub use stats::SimStats;
pub use types::{Approach, PhaseColor, Position, VehicleId};
pub use vehicle::SimVehicle;
pub use world::{SimWorld, Snapshot};
