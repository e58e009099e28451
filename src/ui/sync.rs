//! Systems for syncing Bevy entities with simulation state

use bevy::prelude::*;
use std::collections::HashMap;

use super::components::{
    to_screen, EntityMappings, SignalLamp, SimWorldResource, VehicleLink, AMBULANCE_COLOR,
    CAR_COLOR, GREEN_LAMP, LABEL_COLOR, RED_LAMP,
};
use crate::simulation::{SimVehicle, VehicleId};

const VEHICLE_Z: f32 = 2.0;

/// System to run one simulation tick
pub fn tick_simulation(mut sim_world: ResMut<SimWorldResource>) {
    sim_world.0.tick();
}

/// System to sync vehicle sprites from the latest snapshot
pub fn sync_vehicles(
    mut commands: Commands,
    sim_world: Res<SimWorldResource>,
    mut mappings: ResMut<EntityMappings>,
    mut vehicle_query: Query<(Entity, &VehicleLink, &mut Transform)>,
) {
    let world = &sim_world.0;
    let config = world.config();
    let snapshot = world.snapshot();
    let live: HashMap<VehicleId, &SimVehicle> =
        snapshot.vehicles.iter().map(|v| (v.id, v)).collect();

    // Update existing vehicles, despawn the ones that left the field
    for (entity, link, mut transform) in vehicle_query.iter_mut() {
        if let Some(vehicle) = live.get(&link.0) {
            transform.translation = to_screen(vehicle.position, config).extend(VEHICLE_Z);
        } else {
            commands.entity(entity).despawn();
            mappings.vehicles.remove(&link.0);
        }
    }

    let size = Vec2::splat(config.vehicle_half_size * 2.0);
    for vehicle in snapshot.vehicles {
        if mappings.vehicles.contains_key(&vehicle.id) {
            continue;
        }

        let translation = to_screen(vehicle.position, config).extend(VEHICLE_Z);
        let mut entity = commands.spawn((
            VehicleLink(vehicle.id),
            Sprite::from_color(
                if vehicle.is_emergency() {
                    AMBULANCE_COLOR
                } else {
                    CAR_COLOR
                },
                size,
            ),
            Transform::from_translation(translation),
        ));
        if vehicle.is_emergency() {
            entity.with_child((
                Text2d::new("Ambulance"),
                TextFont {
                    font_size: 12.0,
                    ..default()
                },
                TextColor(LABEL_COLOR),
                Transform::from_xyz(0.0, config.vehicle_half_size + 10.0, 0.0),
            ));
        }
        mappings.vehicles.insert(vehicle.id, entity.id());
    }
}

/// System to recolour signal lamps from the controller state
pub fn update_signal_lamps(
    sim_world: Res<SimWorldResource>,
    lamp_query: Query<(&SignalLamp, &MeshMaterial2d<ColorMaterial>)>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    let signals = sim_world.0.signals();
    for (lamp, material_handle) in lamp_query.iter() {
        if let Some(material) = materials.get_mut(&material_handle.0) {
            material.color = if signals.get(lamp.0).is_green() {
                GREEN_LAMP
            } else {
                RED_LAMP
            };
        }
    }
}
