//! Scenario tests for the controller, motion model and tick pipeline

use std::collections::HashMap;

use intersection_sim::simulation::{
    Approach, ControlError, IntersectionController, PhaseColor, Position, SimConfig, SimVehicle,
    SimWorld, VehicleId,
};

fn counts(n: usize, s: usize, e: usize, w: usize) -> HashMap<Approach, usize> {
    HashMap::from([
        (Approach::North, n),
        (Approach::South, s),
        (Approach::East, e),
        (Approach::West, w),
    ])
}

#[test]
fn test_busiest_then_emergency_scenario() {
    let mut controller = IntersectionController::new();
    let traffic = counts(3, 1, 0, 5);

    let signals = controller.decide(&traffic, None).unwrap();
    for approach in Approach::ALL {
        let expected = if approach == Approach::West {
            PhaseColor::Green
        } else {
            PhaseColor::Red
        };
        assert_eq!(signals.get(approach), expected);
    }

    let emergency: Approach = "North".parse().unwrap();
    let signals = controller.decide(&traffic, Some(emergency)).unwrap();
    assert_eq!(signals.green(), Some(Approach::North));
    assert_eq!(signals.green_count(), 1);
}

#[test]
fn test_malformed_controller_input() {
    let mut controller = IntersectionController::new();
    let mut traffic = counts(1, 2, 3, 4);
    traffic.remove(&Approach::East);
    assert_eq!(
        controller.decide(&traffic, None),
        Err(ControlError::MissingApproach(Approach::East))
    );

    assert!(matches!(
        "Up".parse::<Approach>(),
        Err(ControlError::UnknownApproach(_))
    ));
}

#[test]
fn test_north_vehicle_scenario() {
    let start = Position::new(300.0, 600.0);

    let mut vehicle = SimVehicle::new(VehicleId(0), Approach::North, start, 2.0);
    vehicle.advance(PhaseColor::Green);
    assert_eq!(vehicle.position, Position::new(300.0, 598.0));

    let mut vehicle = SimVehicle::new(VehicleId(1), Approach::North, start, 2.0);
    vehicle.advance(PhaseColor::Red);
    assert_eq!(vehicle.position, start);
    assert!(vehicle.stopped);
}

#[test]
fn test_signals_stay_exclusive_over_long_run() {
    let config = SimConfig {
        spawn_probability: 0.3,
        emergency_spawn_probability: 0.05,
        ..SimConfig::default()
    };
    let width = config.width;
    let height = config.height;
    let mut world = SimWorld::new_with_seed(config, 2024).unwrap();

    for _ in 0..2000 {
        let snapshot = world.tick();
        assert!(snapshot.signals.green_count() <= 1);

        for vehicle in snapshot.vehicles {
            assert!(vehicle.in_bounds(width, height));
            if vehicle.is_emergency() {
                assert!(!vehicle.stopped);
            } else {
                assert_eq!(
                    vehicle.stopped,
                    !snapshot.signals.get(vehicle.approach()).is_green()
                );
            }
        }
    }

    let stats = world.stats();
    assert!(stats.vehicles_spawned > 0);
    assert!(stats.emergency_spawned > 0);
    assert_eq!(
        stats.vehicles_spawned,
        stats.vehicles_exited + world.vehicles().len() as u64
    );
}

#[test]
fn test_moving_vehicles_change_one_axis_by_speed() {
    let config = SimConfig {
        spawn_probability: 0.2,
        emergency_spawn_probability: 0.02,
        ..SimConfig::default()
    };
    let mut world = SimWorld::new_with_seed(config, 99).unwrap();

    for _ in 0..500 {
        let before: HashMap<VehicleId, Position> = world
            .vehicles()
            .iter()
            .map(|v| (v.id, v.position))
            .collect();
        let snapshot = world.tick();

        for vehicle in snapshot.vehicles {
            let Some(prev) = before.get(&vehicle.id) else {
                continue;
            };
            let expected = if vehicle.stopped {
                *prev
            } else {
                prev.offset(vehicle.approach().motion(), vehicle.speed())
            };
            assert_eq!(vehicle.position, expected);
        }
    }
}

#[test]
fn test_emergency_runs_through_red() {
    let config = SimConfig {
        spawn_probability: 0.0,
        emergency_spawn_probability: 0.0,
        ..SimConfig::default()
    };
    let mut world = SimWorld::new_with_seed(config, 0).unwrap();
    world.spawn_emergency(Approach::East);
    world.spawn_emergency(Approach::West);

    // Last emergency wins the light; the other still moves on red
    let snapshot = world.tick();
    assert_eq!(snapshot.signals.green(), Some(Approach::West));
    let east = snapshot
        .vehicles
        .iter()
        .find(|v| v.approach() == Approach::East)
        .unwrap();
    assert_eq!(snapshot.signals.get(Approach::East), PhaseColor::Red);
    assert!(!east.stopped);
    assert_eq!(east.position, Position::new(303.0, 300.0));
}
