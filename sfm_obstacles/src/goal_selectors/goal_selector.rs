use crate::error::GoalSelectionError;
use crate::Agent;
use crate::Point;

use rand::RngCore;

/// Picks the next target point for an agent that reached its goal.
pub trait GoalSelector {
    fn select_new_goal(
        &self,
        agent: &Agent,
        rng: &mut dyn RngCore,
    ) -> Result<Point, GoalSelectionError>;
}
