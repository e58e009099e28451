//! Core types for the intersection simulation
//!
//! These are standalone types that don't depend on Bevy.

use std::fmt;
use std::str::FromStr;

use super::error::ControlError;

/// A unique identifier for a vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VehicleId(pub usize);

/// One of the four fixed approaches into the intersection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Approach {
    North,
    South,
    East,
    West,
}

/// Unit motion vectors, indexed by `Approach::index`.
///
/// Screen coordinates: y grows downwards, so northbound traffic moves -y.
const MOTION: [Position; 4] = [
    Position { x: 0.0, y: -1.0 },
    Position { x: 0.0, y: 1.0 },
    Position { x: 1.0, y: 0.0 },
    Position { x: -1.0, y: 0.0 },
];

impl Approach {
    /// All approaches in arbitration order
    pub const ALL: [Approach; 4] = [
        Approach::North,
        Approach::South,
        Approach::East,
        Approach::West,
    ];

    /// Position of this approach in `Approach::ALL`
    pub const fn index(self) -> usize {
        match self {
            Approach::North => 0,
            Approach::South => 1,
            Approach::East => 2,
            Approach::West => 3,
        }
    }

    /// Unit vector a vehicle on this approach travels along
    pub fn motion(self) -> Position {
        MOTION[self.index()]
    }

    pub fn name(self) -> &'static str {
        match self {
            Approach::North => "North",
            Approach::South => "South",
            Approach::East => "East",
            Approach::West => "West",
        }
    }
}

impl fmt::Display for Approach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Approach {
    type Err = ControlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Approach::ALL
            .into_iter()
            .find(|approach| approach.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ControlError::UnknownApproach(s.to_string()))
    }
}

/// Signal phase shown to one approach
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PhaseColor {
    #[default]
    Red,
    Green,
}

impl PhaseColor {
    pub fn is_green(self) -> bool {
        self == PhaseColor::Green
    }
}

impl fmt::Display for PhaseColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhaseColor::Red => f.write_str("RED"),
            PhaseColor::Green => f.write_str("GREEN"),
        }
    }
}

/// A 2D position on the simulated field
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Move `distance` units along `direction`
    pub fn offset(&self, direction: Position, distance: f32) -> Position {
        Position {
            x: self.x + direction.x * distance,
            y: self.y + direction.y * distance,
        }
    }

    /// Whether this position lies inside `[0, width] x [0, height]`
    pub fn within(&self, width: f32, height: f32) -> bool {
        (0.0..=width).contains(&self.x) && (0.0..=height).contains(&self.y)
    }
}
