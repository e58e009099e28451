use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use intersection_sim::simulation::{SimConfig, SimWorld};

#[derive(Parser)]
#[command(name = "intersection_sim")]
#[command(about = "Four-way intersection simulation with optional UI")]
struct Cli {
    /// Run with the Bevy game engine UI
    #[arg(long)]
    ui: bool,

    /// Number of simulation ticks to run in headless mode
    #[arg(long, default_value = "1000")]
    ticks: u64,

    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Field width in world units
    #[arg(long, default_value = "600")]
    width: f32,

    /// Field height in world units
    #[arg(long, default_value = "600")]
    height: f32,

    /// Per-tick chance of a normal vehicle spawning
    #[arg(long)]
    spawn_probability: Option<f64>,

    /// Per-tick chance of an emergency vehicle spawning
    #[arg(long)]
    emergency_probability: Option<f64>,

    /// Speed of normal vehicles per tick
    #[arg(long)]
    normal_speed: Option<f32>,

    /// Speed of emergency vehicles per tick
    #[arg(long)]
    emergency_speed: Option<f32>,

    /// Upper bound on live vehicles
    #[arg(long)]
    max_vehicles: Option<usize>,

    /// Print a summary every N ticks in headless mode (0 disables)
    #[arg(long, default_value = "250")]
    report_every: u64,

    /// Sleep between headless ticks, in milliseconds
    #[arg(long, default_value = "0")]
    pace_ms: u64,

    /// Draw an ASCII map alongside each headless summary
    #[arg(long)]
    map: bool,
}

impl Cli {
    fn config(&self) -> SimConfig {
        let mut config = SimConfig::for_field(self.width, self.height);
        if let Some(p) = self.spawn_probability {
            config.spawn_probability = p;
        }
        if let Some(p) = self.emergency_probability {
            config.emergency_spawn_probability = p;
        }
        if let Some(speed) = self.normal_speed {
            config.normal_speed = speed;
        }
        if let Some(speed) = self.emergency_speed {
            config.emergency_speed = speed;
        }
        config.max_vehicles = self.max_vehicles;
        config
    }

    fn build_world(&self) -> Result<SimWorld> {
        let config = self.config();
        let world = match self.seed {
            Some(seed) => SimWorld::new_with_seed(config, seed),
            None => SimWorld::new(config),
        };
        world.context("Invalid simulation configuration")
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.ui {
        #[cfg(feature = "ui")]
        {
            let world = cli.build_world()?;
            intersection_sim::ui::run(world);
            Ok(())
        }
        #[cfg(not(feature = "ui"))]
        {
            anyhow::bail!("UI feature is not enabled. Rebuild with --features ui");
        }
    } else {
        env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or("warn,intersection_sim=info"),
        )
        .init();
        run_headless(&cli)
    }
}

/// Run the simulation in headless mode (no graphics)
fn run_headless(cli: &Cli) -> Result<()> {
    let mut world = cli.build_world()?;
    info!(
        "Running intersection simulation headless: {} ticks on a {}x{} field",
        cli.ticks, cli.width, cli.height
    );

    for tick in 1..=cli.ticks {
        world.tick();

        if cli.report_every > 0 && tick % cli.report_every == 0 {
            println!("--- After tick {} ---", tick);
            world.print_summary();
            if cli.map {
                world.draw_map();
            }
            println!();
        }

        if cli.pace_ms > 0 {
            std::thread::sleep(std::time::Duration::from_millis(cli.pace_ms));
        }
    }

    world.stats().log_summary(world.vehicles().len());
    Ok(())
}
