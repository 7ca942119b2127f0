use crate::error::GoalSelectionError;
use crate::goal_selectors::goal_selector::GoalSelector;
use crate::Agent;
use crate::Point;

use rand::{Rng, RngCore};

/// Draws goals uniformly from the square `[-L, L]²` and keeps the first one
/// further than `L` from the agent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RejectionSampler {
    domain_half_length: f64,
    max_attempts: usize,
}

impl RejectionSampler {
    /// `domain_half_length` should be finite and non-negative; any other
    /// value makes every `select_new_goal` call fail with `InvalidDomain`.
    pub fn new(domain_half_length: f64, max_attempts: usize) -> Self {
        RejectionSampler {
            domain_half_length,
            max_attempts,
        }
    }

    pub fn domain_half_length(&self) -> f64 {
        self.domain_half_length
    }
}

impl GoalSelector for RejectionSampler {
    fn select_new_goal(
        &self,
        agent: &Agent,
        rng: &mut dyn RngCore,
    ) -> Result<Point, GoalSelectionError> {
        select_new_goal(agent, self.domain_half_length, self.max_attempts, rng)
    }
}

fn valid_half_length(domain_half_length: f64) -> bool {
    domain_half_length.is_finite() && domain_half_length >= 0.0
}

/// Draws a uniform point in the planar square `[-L, L]²`. `L` must be finite
/// and non-negative.
pub(crate) fn sample_in_domain(domain_half_length: f64, rng: &mut dyn RngCore) -> Point {
    let l = domain_half_length;
    Point::new(rng.gen_range(-l..=l), rng.gen_range(-l..=l), 0.0)
}

/// Rejection samples a goal whose distance from the agent's current position
/// exceeds `domain_half_length`. Gives up after `max_attempts` draws.
pub fn select_new_goal(
    agent: &Agent,
    domain_half_length: f64,
    max_attempts: usize,
    rng: &mut dyn RngCore,
) -> Result<Point, GoalSelectionError> {
    if !valid_half_length(domain_half_length) {
        return Err(GoalSelectionError::InvalidDomain {
            half_length: domain_half_length,
        });
    }
    for _ in 0..max_attempts {
        let candidate = sample_in_domain(domain_half_length, rng);
        if (candidate - agent.position).norm() > domain_half_length {
            return Ok(candidate);
        }
    }
    Err(GoalSelectionError::ResampleFailed {
        agent: agent.agent_id,
        attempts: max_attempts,
    })
}
