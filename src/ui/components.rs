//! UI components and resources for linking Bevy entities to simulation state

use bevy::prelude::*;
use std::collections::HashMap;

use crate::simulation::{Approach, Position, SimConfig, SimWorld, VehicleId};

/// Resource wrapper for the simulation world
#[derive(Resource)]
pub struct SimWorldResource(pub SimWorld);

/// Marker component for the main camera
#[derive(Component)]
pub struct MainCamera;

/// Links a Bevy entity to a simulation vehicle
#[derive(Component)]
pub struct VehicleLink(pub VehicleId);

/// Lamp showing the signal for one approach
#[derive(Component)]
pub struct SignalLamp(pub Approach);

/// Resource to track mappings between simulation IDs and Bevy entities
#[derive(Resource, Default)]
pub struct EntityMappings {
    pub vehicles: HashMap<VehicleId, Entity>,
}

pub const ROAD_WIDTH: f32 = 100.0;
pub const LAMP_RADIUS: f32 = 15.0;

pub const ROAD_COLOR: Color = Color::srgb(0.2, 0.2, 0.2);
pub const CAR_COLOR: Color = Color::srgb(0.0, 0.0, 1.0);
pub const AMBULANCE_COLOR: Color = Color::srgb(1.0, 0.0, 0.0);
pub const LABEL_COLOR: Color = Color::srgb(1.0, 1.0, 0.0);
pub const GREEN_LAMP: Color = Color::srgb(0.0, 1.0, 0.0);
pub const RED_LAMP: Color = Color::srgb(1.0, 0.0, 0.0);

/// Map a field position (origin top-left, y down) to world space (origin centre, y up)
pub fn to_screen(position: Position, config: &SimConfig) -> Vec2 {
    Vec2::new(
        position.x - config.width / 2.0,
        config.height / 2.0 - position.y,
    )
}
