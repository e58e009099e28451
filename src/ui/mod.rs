//! UI module that renders the intersection using Bevy
//!
//! This module is purely for visualization - all simulation logic is in the `simulation` module.
//! The UI reads the `SimWorld` snapshot every frame and draws it in 2D.

mod components;
mod input;
mod sync;
mod world;

use std::time::Duration;

use bevy::log::LogPlugin;
use bevy::prelude::*;

pub use components::{EntityMappings, SimWorldResource};

use input::handle_input;
use sync::{sync_vehicles, tick_simulation, update_signal_lamps};
use world::{setup_world, spawn_signal_lamps};

use crate::simulation::SimWorld;

/// Fixed simulation step, matching the original 30 ms frame wait
const TICK_MILLIS: u64 = 30;

/// Plugin to register all UI systems
pub struct IntersectionUIPlugin;

impl Plugin for IntersectionUIPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Time::<Fixed>::from_duration(Duration::from_millis(TICK_MILLIS)))
            .insert_resource(ClearColor(Color::BLACK))
            .init_resource::<EntityMappings>()
            .add_systems(Startup, (setup_world, spawn_signal_lamps))
            .add_systems(FixedUpdate, tick_simulation)
            .add_systems(Update, (sync_vehicles, update_signal_lamps, handle_input));
    }
}

/// Open a window sized to the field and drive `world` until the user quits
pub fn run(world: SimWorld) {
    let (width, height) = (world.config().width, world.config().height);

    println!("Starting Intersection Sim UI...");
    println!("  Q / ESC - Exit");

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(LogPlugin {
                    filter: "warn,intersection_sim=info".to_string(),
                    level: bevy::log::Level::INFO,
                    ..default()
                })
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Smart Traffic Intersection".into(),
                        resolution: (width as u32, height as u32).into(),
                        ..default()
                    }),
                    ..default()
                }),
        )
        .insert_resource(SimWorldResource(world))
        .add_plugins(IntersectionUIPlugin)
        .run();
}
