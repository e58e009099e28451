//! Cumulative statistics for a simulation run

use log::info;

/// Counters accumulated across ticks
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimStats {
    pub ticks: u64,
    pub vehicles_spawned: u64,
    pub emergency_spawned: u64,
    pub vehicles_exited: u64,
    /// Spawns skipped because the fleet was at `max_vehicles`
    pub spawns_suppressed: u64,
    /// Ticks in which an emergency vehicle held right-of-way
    pub preemption_ticks: u64,
    pub peak_vehicles: usize,
}

impl SimStats {
    /// Log the end-of-run summary
    pub fn log_summary(&self, active_vehicles: usize) {
        info!("=== SIMULATION COMPLETE ===");
        info!("Ticks: {}", self.ticks);
        info!("Total vehicles spawned: {}", self.vehicles_spawned);
        info!("Emergency vehicles spawned: {}", self.emergency_spawned);
        info!("Vehicles exited: {}", self.vehicles_exited);
        info!("Active vehicles: {}", active_vehicles);
        info!("Peak vehicles: {}", self.peak_vehicles);
        info!("Preemption ticks: {}", self.preemption_ticks);
        if self.spawns_suppressed > 0 {
            info!("Spawns suppressed by cap: {}", self.spawns_suppressed);
        }
    }
}
