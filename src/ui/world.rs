//! Scene setup systems for the camera, roads and signal lamps

use bevy::prelude::*;

use super::components::{
    to_screen, MainCamera, SignalLamp, SimWorldResource, LAMP_RADIUS, RED_LAMP, ROAD_COLOR,
    ROAD_WIDTH,
};
use crate::simulation::Approach;

/// System to spawn the camera and the two crossing roads
pub fn setup_world(mut commands: Commands, sim_world: Res<SimWorldResource>) {
    let config = sim_world.0.config();

    commands.spawn((MainCamera, Camera2d));

    // Both roads cross at the field centre, which is the world origin
    commands.spawn((
        Sprite::from_color(ROAD_COLOR, Vec2::new(ROAD_WIDTH, config.height)),
        Transform::from_xyz(0.0, 0.0, 0.0),
    ));
    commands.spawn((
        Sprite::from_color(ROAD_COLOR, Vec2::new(config.width, ROAD_WIDTH)),
        Transform::from_xyz(0.0, 0.0, 0.0),
    ));
}

/// System to spawn one labelled lamp per approach
pub fn spawn_signal_lamps(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    sim_world: Res<SimWorldResource>,
) {
    let config = sim_world.0.config();

    for approach in Approach::ALL {
        let pos = to_screen(config.signal_position(approach), config);
        commands.spawn((
            SignalLamp(approach),
            Mesh2d(meshes.add(Circle::new(LAMP_RADIUS))),
            MeshMaterial2d(materials.add(RED_LAMP)),
            Transform::from_xyz(pos.x, pos.y, 1.0),
            children![(
                Text2d::new(approach.name()),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                Transform::from_xyz(0.0, LAMP_RADIUS + 12.0, 0.0),
            )],
        ));
    }
}
