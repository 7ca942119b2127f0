use rand::RngCore;
use tracing::{debug, warn};

pub extern crate nalgebra as na;
use na::Vector3;

pub mod diagnostics;
pub mod error;
pub mod forces;
pub mod goal_selectors;
pub mod integrator;
pub mod params;
pub mod population;
pub mod transform;

pub use crate::error::{ConfigError, GoalSelectionError};
pub use crate::goal_selectors::goal_selector::GoalSelector;
pub use crate::goal_selectors::rejection_sampler::RejectionSampler;
pub use crate::params::model_params::ModelParams;
pub use crate::params::simulator_config::SimulatorConfig;
pub use crate::transform::broadcaster::TransformBroadcaster;

use crate::forces::desired_force::desired_force;
use crate::forces::social_force::social_force;
use crate::integrator::integrate;

/// Agent  ID
pub type AgentId = usize;

/// Point in the world frame. z is always 0.
pub type Point = Vector3<f64>;

/// 3-vector
pub type Vec3f = Vector3<f64>;

/// Data representing an individual simulated obstacle
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Agent {
    /// Unique Agent ID
    pub agent_id: AgentId,
    /// Position of agent
    pub position: Point,
    /// Velocity of agent
    pub velocity: Vec3f,
    /// Point the agent is currently walking towards
    pub goal: Point,
    /// Speed cap, fixed at creation
    pub preferred_speed: f64,
    /// Side the agent steers to when avoiding a neighbour
    pub dodging_right: bool,
    /// Desired force of the last step. Diagnostics only.
    pub last_desired_force: Vec3f,
    /// Social force of the last step. Diagnostics only.
    pub last_social_force: Vec3f,
}

impl Default for Agent {
    fn default() -> Self {
        Agent {
            agent_id: 0,
            position: Point::zeros(),
            velocity: Vec3f::zeros(),
            goal: Point::zeros(),
            preferred_speed: 1f64,
            dodging_right: true,
            last_desired_force: Vec3f::zeros(),
            last_social_force: Vec3f::zeros(),
        }
    }
}

impl Agent {
    /// Creates an agent. The z components of the vectors are dropped.
    pub fn new(
        agent_id: AgentId,
        position: Point,
        velocity: Vec3f,
        goal: Point,
        preferred_speed: f64,
        dodging_right: bool,
    ) -> Self {
        Agent {
            agent_id,
            position: Point::new(position.x, position.y, 0f64),
            velocity: Vec3f::new(velocity.x, velocity.y, 0f64),
            goal: Point::new(goal.x, goal.y, 0f64),
            preferred_speed,
            dodging_right,
            ..Agent::default()
        }
    }

    /// Heading of the velocity vector. 0 for a stationary agent.
    pub fn heading(&self) -> f64 {
        self.velocity.y.atan2(self.velocity.x)
    }

    pub fn speed(&self) -> f64 {
        self.velocity.norm()
    }
}

/// A representation of a simulation session
pub struct Simulation<G: GoalSelector> {
    /// All agents, in creation order. Never grows or shrinks.
    pub agents: Vec<Agent>,
    /// Model tunables
    params: ModelParams,
    /// Goal refresh strategy
    goal_selector: G,
    /// Simulation time in seconds
    sim_time: f64,
    /// Number of completed steps
    ticks: u64,
}

impl<G: GoalSelector> Simulation<G> {
    /// Create a new simulation environment
    pub fn new(agents: Vec<Agent>, params: ModelParams, goal_selector: G) -> Self {
        Self {
            agents,
            params,
            goal_selector,
            sim_time: 0f64,
            ticks: 0,
        }
    }

    pub fn params(&self) -> &ModelParams {
        &self.params
    }

    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Advances every agent by `dt` seconds.
    ///
    /// Forces are evaluated against the population as it was when the call
    /// started, so the result does not depend on iteration order. An agent
    /// whose goal cannot be resampled keeps its old goal for this step.
    /// Negative `dt` is ignored.
    pub fn step(&mut self, dt: f64, rng: &mut dyn RngCore) {
        if dt < 0f64 || dt.is_nan() {
            return;
        }
        let snapshot = self.agents.clone();

        for agent in self.agents.iter_mut() {
            if (agent.goal - agent.position).norm() < self.params.goal_tolerance {
                match self.goal_selector.select_new_goal(agent, rng) {
                    Ok(goal) => {
                        debug!(agent = agent.agent_id, x = goal.x, y = goal.y, "new goal");
                        agent.goal = Point::new(goal.x, goal.y, 0f64);
                    }
                    Err(err) => warn!("{err}; keeping previous goal"),
                }
            }

            let desired = desired_force(agent);
            let social = social_force(agent, &snapshot, &self.params);
            agent.last_desired_force = desired;
            agent.last_social_force = social;

            integrate(
                agent,
                &desired,
                &social,
                self.params.desired_force_weight,
                self.params.social_force_weight,
                dt,
            );
        }

        self.sim_time += dt;
        self.ticks += 1;
    }
}
