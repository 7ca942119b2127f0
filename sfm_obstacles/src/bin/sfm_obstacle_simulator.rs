use std::thread;
use std::time::{Duration, Instant, SystemTime};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use sfm_obstacles::diagnostics::format_population;
use sfm_obstacles::population::spawn_population;
use sfm_obstacles::transform::broadcaster::TracingBroadcaster;
use sfm_obstacles::transform::obstacle_transforms;
use sfm_obstacles::*;

/// Usage: `sfm_obstacle_simulator [config.yaml] [max_ticks]`
fn main() -> Result<(), ConfigError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => SimulatorConfig::from_yaml_file(path)?,
        None => SimulatorConfig::default(),
    };
    let max_ticks = match args.next() {
        Some(raw) => Some(raw.parse::<u64>().map_err(|err| {
            ConfigError::InvalidValue {
                key: "max_ticks",
                reason: err.to_string(),
            }
        })?),
        None => None,
    };

    info!(
        hz = config.hz,
        num_obstacles = config.num_obstacles,
        desired_force_factor = config.model.desired_force_weight,
        social_force_factor = config.model.social_force_weight,
        simulation_square_length = config.simulation_square_length,
        "=== sfm_obstacle_simulator ==="
    );

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let agents = spawn_population(&config, &mut rng)?;
    let mut crowd_simulation = Simulation::new(
        agents,
        config.model,
        RejectionSampler::new(config.domain_half_length(), config.max_goal_attempts),
    );
    let mut broadcaster = TracingBroadcaster::new();

    let dt = config.dt();
    let period = Duration::try_from_secs_f64(dt).map_err(|err| ConfigError::InvalidValue {
        key: "hz",
        reason: err.to_string(),
    })?;
    let mut next_tick = Instant::now();
    while max_ticks.map_or(true, |max| crowd_simulation.ticks() < max) {
        crowd_simulation.step(dt, &mut rng);

        let transforms = obstacle_transforms(
            &crowd_simulation.agents,
            &config.world_frame,
            &config.obstacles_frame,
            SystemTime::now(),
        );
        broadcaster.send_transforms(&transforms);
        debug!("\n{}", format_population(&crowd_simulation.agents));

        next_tick += period;
        match next_tick.checked_duration_since(Instant::now()) {
            Some(remaining) => thread::sleep(remaining),
            // Running late, don't try to catch up.
            None => next_tick = Instant::now(),
        }
    }

    info!(
        ticks = crowd_simulation.ticks(),
        sim_time = crowd_simulation.sim_time(),
        transforms = broadcaster.sent(),
        "simulation finished"
    );
    Ok(())
}
