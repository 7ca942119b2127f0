use crate::Agent;
use crate::Vec3f;

/// Unit vector from the agent towards its goal. Zero if the agent sits
/// exactly on the goal.
pub fn desired_force(agent: &Agent) -> Vec3f {
    (agent.goal - agent.position)
        .try_normalize(0.0)
        .unwrap_or_else(Vec3f::zeros)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Point;
    use approx::assert_relative_eq;

    #[test]
    fn test_desired_force_is_unit_towards_goal() {
        let mut agent = Agent::default();
        agent.position = Point::new(1.0, -2.0, 0.0);
        agent.goal = Point::new(4.0, 2.0, 0.0);
        let force = desired_force(&agent);
        assert_relative_eq!(force.norm(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(force, Vec3f::new(0.6, 0.8, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_desired_force_ignores_velocity() {
        let mut agent = Agent::default();
        agent.goal = Point::new(0.0, 5.0, 0.0);
        agent.velocity = Vec3f::new(-1.0, 0.0, 0.0);
        assert_relative_eq!(desired_force(&agent), Vec3f::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_agent_on_goal_feels_no_pull() {
        let mut agent = Agent::default();
        agent.position = Point::new(2.0, 2.0, 0.0);
        agent.goal = agent.position;
        assert_eq!(desired_force(&agent), Vec3f::zeros());
    }
}
