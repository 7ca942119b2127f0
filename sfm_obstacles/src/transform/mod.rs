pub mod broadcaster;

use std::time::SystemTime;

use nalgebra::{UnitQuaternion, Vector3};

use crate::Agent;

/// Pose of one obstacle expressed as a named child frame of the world frame.
#[derive(Clone, Debug, PartialEq)]
pub struct ObstacleTransform {
    pub stamp: SystemTime,
    pub parent_frame: String,
    pub child_frame: String,
    pub translation: Vector3<f64>,
    pub rotation: UnitQuaternion<f64>,
}

impl ObstacleTransform {
    /// Builds the transform of `agent`. The frame faces along the velocity.
    pub fn from_agent(
        agent: &Agent,
        world_frame: &str,
        obstacles_frame: &str,
        stamp: SystemTime,
    ) -> Self {
        ObstacleTransform {
            stamp,
            parent_frame: world_frame.to_owned(),
            child_frame: format!("{}{}", obstacles_frame, agent.agent_id),
            translation: Vector3::new(agent.position.x, agent.position.y, 0f64),
            rotation: UnitQuaternion::from_euler_angles(0f64, 0f64, agent.heading()),
        }
    }

    pub fn yaw(&self) -> f64 {
        self.rotation.euler_angles().2
    }
}

/// One transform per agent, all sharing `stamp`.
pub fn obstacle_transforms(
    agents: &[Agent],
    world_frame: &str,
    obstacles_frame: &str,
    stamp: SystemTime,
) -> Vec<ObstacleTransform> {
    agents
        .iter()
        .map(|agent| ObstacleTransform::from_agent(agent, world_frame, obstacles_frame, stamp))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Point, Vec3f};
    use approx::assert_relative_eq;

    #[test]
    fn test_transform_follows_position_and_heading() {
        let mut agent = Agent::default();
        agent.agent_id = 12;
        agent.position = Point::new(2.0, -3.0, 0.0);
        agent.velocity = Vec3f::new(0.0, -1.0, 0.0);

        let stamp = SystemTime::UNIX_EPOCH;
        let transforms = obstacle_transforms(&[agent], "map", "obs", stamp);
        assert_eq!(transforms.len(), 1);
        let transform = &transforms[0];
        assert_eq!(transform.parent_frame, "map");
        assert_eq!(transform.child_frame, "obs12");
        assert_eq!(transform.stamp, stamp);
        assert_eq!(transform.translation, Vector3::new(2.0, -3.0, 0.0));
        assert_relative_eq!(transform.yaw(), -std::f64::consts::FRAC_PI_2, epsilon = 1e-12);
    }

    #[test]
    fn test_stationary_agent_faces_x() {
        let agent = Agent::default();
        let transform = ObstacleTransform::from_agent(&agent, "map", "obs", SystemTime::now());
        assert_relative_eq!(transform.yaw(), 0.0, epsilon = 1e-12);
    }
}
