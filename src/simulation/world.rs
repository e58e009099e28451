//! Main simulation world that ties everything together
//!
//! `SimWorld` is the simulation context a driver loop owns. Each call to
//! `tick` runs the spawn, aggregate, decide, advance and prune phases in
//! that order and hands back a read-only snapshot for rendering.

use log::{debug, warn};
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use super::config::SimConfig;
use super::controller::{IntersectionController, SignalState, TrafficCounts};
use super::error::ConfigError;
use super::stats::SimStats;
use super::types::{Approach, Position, VehicleId};
use super::vehicle::SimVehicle;

/// Half-width of the drawn road bands, in world units
const ROAD_HALF_WIDTH: f32 = 50.0;

/// Read-only view of the world after a tick
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub tick: u64,
    pub signals: SignalState,
    pub vehicles: &'a [SimVehicle],
}

/// The main simulation world
///
/// Generic over the random source so spawning can be replayed under a
/// fixed seed or driven by a scripted generator.
pub struct SimWorld<R: Rng = StdRng> {
    config: SimConfig,
    controller: IntersectionController,
    /// Live vehicles in spawn order
    vehicles: Vec<SimVehicle>,
    next_id: usize,
    tick: u64,
    rng: R,
    stats: SimStats,
}

impl SimWorld<StdRng> {
    /// Create a world seeded from OS entropy
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    /// Create a world with a seeded RNG for reproducible runs
    pub fn new_with_seed(config: SimConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> SimWorld<R> {
    pub fn with_rng(config: SimConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            controller: IntersectionController::new(),
            vehicles: Vec::new(),
            next_id: 0,
            tick: 0,
            rng,
            stats: SimStats::default(),
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn vehicles(&self) -> &[SimVehicle] {
        &self.vehicles
    }

    pub fn signals(&self) -> SignalState {
        self.controller.signals()
    }

    pub fn stats(&self) -> &SimStats {
        &self.stats
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            tick: self.tick,
            signals: self.controller.signals(),
            vehicles: &self.vehicles,
        }
    }

    fn next_vehicle_id(&mut self) -> VehicleId {
        let id = VehicleId(self.next_id);
        self.next_id += 1;
        id
    }

    fn has_capacity(&self) -> bool {
        self.config
            .max_vehicles
            .is_none_or(|max| self.vehicles.len() < max)
    }

    /// Add a vehicle at an arbitrary position
    ///
    /// Returns `None` without spawning if the fleet is at `max_vehicles`.
    pub fn add_vehicle(
        &mut self,
        approach: Approach,
        position: Position,
        speed: f32,
        is_emergency: bool,
    ) -> Option<VehicleId> {
        if !self.has_capacity() {
            if self.stats.spawns_suppressed == 0 {
                warn!(
                    "Vehicle cap of {} reached; further spawns are skipped while full",
                    self.vehicles.len()
                );
            }
            self.stats.spawns_suppressed += 1;
            return None;
        }

        let id = self.next_vehicle_id();
        let vehicle = if is_emergency {
            self.stats.emergency_spawned += 1;
            SimVehicle::emergency(id, approach, position, speed)
        } else {
            SimVehicle::new(id, approach, position, speed)
        };
        debug!(
            "Spawned {} vehicle {:?} on {} at ({:.1}, {:.1})",
            if is_emergency { "emergency" } else { "normal" },
            id.0,
            approach,
            position.x,
            position.y
        );
        self.stats.vehicles_spawned += 1;
        self.vehicles.push(vehicle);
        Some(id)
    }

    /// Spawn a normal vehicle at `approach`'s entry position
    pub fn spawn_vehicle(&mut self, approach: Approach) -> Option<VehicleId> {
        let position = self.config.entry_position(approach);
        let speed = self.config.normal_speed;
        self.add_vehicle(approach, position, speed, false)
    }

    /// Spawn an emergency vehicle at the intersection centre heading along `approach`
    pub fn spawn_emergency(&mut self, approach: Approach) -> Option<VehicleId> {
        let position = self.config.emergency_spawn;
        let speed = self.config.emergency_speed;
        self.add_vehicle(approach, position, speed, true)
    }

    fn random_approach(&mut self) -> Approach {
        Approach::ALL[self.rng.random_range(0..Approach::ALL.len())]
    }

    /// Two independent Bernoulli trials: one normal, one emergency spawn
    fn spawn_phase(&mut self) {
        if self.rng.random_bool(self.config.spawn_probability) {
            let approach = self.random_approach();
            self.spawn_vehicle(approach);
        }

        if self.rng.random_bool(self.config.emergency_spawn_probability) {
            let approach = self.random_approach();
            self.spawn_emergency(approach);
        }
    }

    /// Per-approach counts and the approach of the last emergency vehicle found
    pub fn aggregate(&self) -> (TrafficCounts, Option<Approach>) {
        let mut counts = TrafficCounts::default();
        let mut emergency = None;
        for vehicle in &self.vehicles {
            if vehicle.is_emergency() {
                emergency = Some(vehicle.approach());
            }
            counts.increment(vehicle.approach());
        }
        (counts, emergency)
    }

    fn prune_phase(&mut self) {
        let (width, height) = (self.config.width, self.config.height);
        let before = self.vehicles.len();
        self.vehicles.retain(|vehicle| {
            let keep = vehicle.in_bounds(width, height);
            if !keep {
                debug!("Vehicle {:?} left the field on {}", vehicle.id.0, vehicle.approach());
            }
            keep
        });
        self.stats.vehicles_exited += (before - self.vehicles.len()) as u64;
    }

    /// Run one full simulation step
    pub fn tick(&mut self) -> Snapshot<'_> {
        self.tick += 1;
        self.stats.ticks += 1;

        self.spawn_phase();
        self.stats.peak_vehicles = self.stats.peak_vehicles.max(self.vehicles.len());

        let (counts, emergency) = self.aggregate();
        let signals = self.controller.decide_counts(&counts, emergency);
        if emergency.is_some() {
            self.stats.preemption_ticks += 1;
        }

        for vehicle in &mut self.vehicles {
            vehicle.advance(signals.get(vehicle.approach()));
        }

        self.prune_phase();
        self.snapshot()
    }

    /// Print a summary of the world state
    pub fn print_summary(&self) {
        println!("=== Intersection Simulation Summary ===");
        println!("Tick: {}", self.tick);
        println!("Vehicles: {}", self.vehicles.len());

        println!("--- Signals ---");
        let (counts, emergency) = self.aggregate();
        for (approach, color) in self.controller.signals().iter() {
            println!(
                "  {:<5} {:<5} queued={}",
                approach.name(),
                color.to_string(),
                counts.get(approach)
            );
        }
        if let Some(approach) = emergency {
            println!("  Emergency vehicle present on {}", approach);
        }

        if !self.vehicles.is_empty() {
            println!("--- Active Vehicles ---");
            for vehicle in &self.vehicles {
                println!(
                    "  Vehicle {:?}: {} {}, position=({:.1}, {:.1}), {}",
                    vehicle.id.0,
                    vehicle.approach(),
                    if vehicle.is_emergency() { "ambulance" } else { "car" },
                    vehicle.position.x,
                    vehicle.position.y,
                    if vehicle.stopped { "stopped" } else { "moving" }
                );
            }
        }
    }

    /// Draw the field as an ASCII map in the terminal
    ///
    /// Vehicles show as arrows for their heading (`A` for ambulances), lamps
    /// as the approach initial, uppercase when green.
    pub fn draw_map(&self) {
        for line in self.render_map(60, 30) {
            println!("{}", line);
        }
    }

    fn render_map(&self, cols: usize, rows: usize) -> Vec<String> {
        let (width, height) = (self.config.width, self.config.height);
        let (cx, cy) = (width / 2.0, height / 2.0);
        let col_of = |x: f32| ((x / width * cols as f32) as usize).min(cols - 1);
        let row_of = |y: f32| ((y / height * rows as f32) as usize).min(rows - 1);

        let mut grid = vec![vec![' '; cols]; rows];
        for (r, row) in grid.iter_mut().enumerate() {
            let y = (r as f32 + 0.5) / rows as f32 * height;
            for (c, cell) in row.iter_mut().enumerate() {
                let x = (c as f32 + 0.5) / cols as f32 * width;
                if (x - cx).abs() <= ROAD_HALF_WIDTH || (y - cy).abs() <= ROAD_HALF_WIDTH {
                    *cell = '.';
                }
            }
        }

        let signals = self.controller.signals();
        for approach in Approach::ALL {
            let pos = self.config.signal_position(approach);
            let initial = approach.name().chars().next().unwrap_or('?');
            grid[row_of(pos.y)][col_of(pos.x)] = if signals.get(approach).is_green() {
                initial
            } else {
                initial.to_ascii_lowercase()
            };
        }

        for vehicle in &self.vehicles {
            let marker = match (vehicle.is_emergency(), vehicle.approach()) {
                (true, _) => 'A',
                (false, Approach::North) => '^',
                (false, Approach::South) => 'v',
                (false, Approach::East) => '>',
                (false, Approach::West) => '<',
            };
            grid[row_of(vehicle.position.y)][col_of(vehicle.position.x)] = marker;
        }

        let border = format!("+{}+", "-".repeat(cols));
        let mut lines = Vec::with_capacity(rows + 2);
        lines.push(border.clone());
        lines.extend(grid.into_iter().map(|row| format!("|{}|", row.into_iter().collect::<String>())));
        lines.push(border);
        lines
    }
}
