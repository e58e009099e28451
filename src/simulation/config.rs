//! Tunable parameters of the simulation

use super::error::ConfigError;
use super::types::{Approach, Position};

/// Default field width in world units
pub const DEFAULT_WIDTH: f32 = 600.0;

/// Default field height in world units
pub const DEFAULT_HEIGHT: f32 = 600.0;

/// Per-tick chance of spawning a normal vehicle
pub const DEFAULT_SPAWN_PROBABILITY: f64 = 0.05;

/// Per-tick chance of spawning an emergency vehicle
pub const DEFAULT_EMERGENCY_SPAWN_PROBABILITY: f64 = 0.01;

pub const DEFAULT_NORMAL_SPEED: f32 = 2.0;
pub const DEFAULT_EMERGENCY_SPEED: f32 = 3.0;

/// Half the side of a vehicle's square bounding box
pub const DEFAULT_VEHICLE_HALF_SIZE: f32 = 10.0;

/// Lateral distance of each lane from the road centre line
pub const LANE_OFFSET: f32 = 30.0;

/// Configuration for a `SimWorld`
///
/// Per-approach tables are indexed by `Approach::index`.
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    pub width: f32,
    pub height: f32,
    pub spawn_probability: f64,
    pub emergency_spawn_probability: f64,
    pub normal_speed: f32,
    pub emergency_speed: f32,
    pub vehicle_half_size: f32,
    /// Where normal vehicles enter on each approach
    pub entry_positions: [Position; 4],
    /// Where emergency vehicles appear
    pub emergency_spawn: Position,
    /// Display-only lamp positions for renderers
    pub signal_positions: [Position; 4],
    /// Upper bound on live vehicles; `None` leaves the fleet unbounded
    pub max_vehicles: Option<usize>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::for_field(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl SimConfig {
    /// Build the default layout scaled to a `width` x `height` field
    pub fn for_field(width: f32, height: f32) -> Self {
        let cx = width / 2.0;
        let cy = height / 2.0;
        Self {
            width,
            height,
            spawn_probability: DEFAULT_SPAWN_PROBABILITY,
            emergency_spawn_probability: DEFAULT_EMERGENCY_SPAWN_PROBABILITY,
            normal_speed: DEFAULT_NORMAL_SPEED,
            emergency_speed: DEFAULT_EMERGENCY_SPEED,
            vehicle_half_size: DEFAULT_VEHICLE_HALF_SIZE,
            entry_positions: [
                Position::new(cx - LANE_OFFSET, height),
                Position::new(cx + LANE_OFFSET, 0.0),
                Position::new(0.0, cy - LANE_OFFSET),
                Position::new(width, cy + LANE_OFFSET),
            ],
            emergency_spawn: Position::new(cx, cy),
            signal_positions: [
                Position::new(cx - 100.0, 50.0),
                Position::new(cx + 50.0, height - 50.0),
                Position::new(width - 50.0, cy - 100.0),
                Position::new(50.0, cy + 50.0),
            ],
            max_vehicles: None,
        }
    }

    pub fn entry_position(&self, approach: Approach) -> Position {
        self.entry_positions[approach.index()]
    }

    pub fn signal_position(&self, approach: Approach) -> Position {
        self.signal_positions[approach.index()]
    }

    /// Check that every parameter can drive a simulation
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [("width", self.width), ("height", self.height)] {
            if !(value > 0.0) {
                return Err(ConfigError::Dimension { name, value });
            }
        }

        for (name, value) in [
            ("spawn_probability", self.spawn_probability),
            ("emergency_spawn_probability", self.emergency_spawn_probability),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Probability { name, value });
            }
        }

        for (name, value) in [
            ("normal_speed", self.normal_speed),
            ("emergency_speed", self.emergency_speed),
        ] {
            if !(value > 0.0) {
                return Err(ConfigError::Speed { name, value });
            }
        }

        let entries = Approach::ALL
            .into_iter()
            .map(|a| (format!("{a} entry"), self.entry_position(a)))
            .chain(std::iter::once((
                "emergency spawn".to_string(),
                self.emergency_spawn,
            )));
        for (what, pos) in entries {
            if !pos.within(self.width, self.height) {
                return Err(ConfigError::EntryOutOfField {
                    what,
                    x: pos.x,
                    y: pos.y,
                });
            }
        }

        Ok(())
    }
}
