use rand::{Rng, RngCore};
use statrs::distribution::Uniform;

use crate::error::ConfigError;
use crate::goal_selectors::rejection_sampler::sample_in_domain;
use crate::params::simulator_config::SimulatorConfig;
use crate::{Agent, Vec3f};

/// Creates `config.num_obstacles` agents with randomised initial state.
///
/// Positions and goals are uniform over the simulation square, velocities
/// uniform over `[-1, 1]²` and preferred speeds uniform between the
/// configured bounds. Each agent flips a fair coin for its dodging side.
/// The config is validated first.
pub fn spawn_population(
    config: &SimulatorConfig,
    rng: &mut dyn RngCore,
) -> Result<Vec<Agent>, ConfigError> {
    config.validate()?;
    let half_length = config.domain_half_length();
    let speed_distribution = if config.min_preferred_speed < config.max_preferred_speed {
        Some(Uniform::new(
            config.min_preferred_speed,
            config.max_preferred_speed,
        )?)
    } else {
        None
    };

    let mut agents = Vec::with_capacity(config.num_obstacles);
    for agent_id in 0..config.num_obstacles {
        let position = sample_in_domain(half_length, rng);
        let velocity = Vec3f::new(rng.gen_range(-1.0..=1.0), rng.gen_range(-1.0..=1.0), 0.0);
        let goal = sample_in_domain(half_length, rng);
        let preferred_speed = match &speed_distribution {
            Some(distribution) => rng.sample(distribution),
            None => config.min_preferred_speed,
        };
        let dodging_right = rng.gen_bool(0.5);
        agents.push(Agent::new(
            agent_id,
            position,
            velocity,
            goal,
            preferred_speed,
            dodging_right,
        ));
    }
    Ok(agents)
}
