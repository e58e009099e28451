//! Vehicle motion logic for the intersection simulation
//!
//! Standalone implementation that doesn't depend on Bevy.

use super::types::{Approach, PhaseColor, Position, VehicleId};

/// A vehicle in the intersection simulation
#[derive(Debug, Clone, PartialEq)]
pub struct SimVehicle {
    pub id: VehicleId,
    approach: Approach,
    pub position: Position,
    speed: f32,
    is_emergency: bool,
    /// Whether the vehicle held still on its last advance
    pub stopped: bool,
}

impl SimVehicle {
    pub fn new(id: VehicleId, approach: Approach, position: Position, speed: f32) -> Self {
        Self {
            id,
            approach,
            position,
            speed,
            is_emergency: false,
            stopped: false,
        }
    }

    /// An emergency vehicle, which never stops for a red signal
    pub fn emergency(id: VehicleId, approach: Approach, position: Position, speed: f32) -> Self {
        Self {
            is_emergency: true,
            ..Self::new(id, approach, position, speed)
        }
    }

    pub fn approach(&self) -> Approach {
        self.approach
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn is_emergency(&self) -> bool {
        self.is_emergency
    }

    /// Advance one tick under the signal shown to this vehicle's approach
    pub fn advance(&mut self, signal: PhaseColor) {
        self.stopped = !self.is_emergency && !signal.is_green();

        if !self.stopped {
            self.position = self.position.offset(self.approach.motion(), self.speed);
        }
    }

    /// Whether the vehicle is still inside a `width` x `height` field
    pub fn in_bounds(&self, width: f32, height: f32) -> bool {
        self.position.within(width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_north_vehicle_moves_on_green() {
        let mut vehicle = SimVehicle::new(VehicleId(0), Approach::North, Position::new(300.0, 600.0), 2.0);
        vehicle.advance(PhaseColor::Green);
        assert_eq!(vehicle.position, Position::new(300.0, 598.0));
        assert!(!vehicle.stopped);
    }

    #[test]
    fn test_north_vehicle_holds_on_red() {
        let mut vehicle = SimVehicle::new(VehicleId(0), Approach::North, Position::new(300.0, 600.0), 2.0);
        vehicle.advance(PhaseColor::Red);
        assert_eq!(vehicle.position, Position::new(300.0, 600.0));
        assert!(vehicle.stopped);

        vehicle.advance(PhaseColor::Green);
        assert!(!vehicle.stopped);
    }

    #[test]
    fn test_each_approach_moves_along_one_axis() {
        let start = Position::new(100.0, 100.0);
        let expected = [
            (Approach::North, Position::new(100.0, 97.0)),
            (Approach::South, Position::new(100.0, 103.0)),
            (Approach::East, Position::new(103.0, 100.0)),
            (Approach::West, Position::new(97.0, 100.0)),
        ];
        for (approach, target) in expected {
            let mut vehicle = SimVehicle::new(VehicleId(1), approach, start, 3.0);
            vehicle.advance(PhaseColor::Green);
            assert_eq!(vehicle.position, target, "wrong motion for {approach}");
        }
    }

    #[test]
    fn test_emergency_vehicle_ignores_red() {
        let mut vehicle =
            SimVehicle::emergency(VehicleId(2), Approach::East, Position::new(300.0, 300.0), 3.0);
        vehicle.advance(PhaseColor::Red);
        assert!(!vehicle.stopped);
        assert_eq!(vehicle.position, Position::new(303.0, 300.0));
        assert!(vehicle.is_emergency());
        assert_eq!(vehicle.speed(), 3.0);
        assert_eq!(vehicle.approach(), Approach::East);
    }

    #[test]
    fn test_in_bounds() {
        let mut vehicle = SimVehicle::new(VehicleId(3), Approach::West, Position::new(1.0, 330.0), 2.0);
        assert!(vehicle.in_bounds(600.0, 600.0));
        vehicle.advance(PhaseColor::Green);
        assert!(!vehicle.in_bounds(600.0, 600.0));
    }
}
