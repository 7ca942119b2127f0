use std::time::UNIX_EPOCH;

use tracing::info;

use crate::transform::ObstacleTransform;

/// Publishes obstacle frames to whoever consumes them.
pub trait TransformBroadcaster {
    fn send_transforms(&mut self, transforms: &[ObstacleTransform]);
}

/// Emits every transform as a structured `tracing` event on the
/// `obstacle_tf` target.
#[derive(Debug, Default)]
pub struct TracingBroadcaster {
    sent: u64,
}

impl TracingBroadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of transforms sent so far.
    pub fn sent(&self) -> u64 {
        self.sent
    }
}

impl TransformBroadcaster for TracingBroadcaster {
    fn send_transforms(&mut self, transforms: &[ObstacleTransform]) {
        for transform in transforms {
            let stamp = transform
                .stamp
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs_f64())
                .unwrap_or_default();
            info!(
                target: "obstacle_tf",
                stamp,
                parent = %transform.parent_frame,
                child = %transform.child_frame,
                x = transform.translation.x,
                y = transform.translation.y,
                yaw = transform.yaw(),
                "obstacle transform"
            );
            self.sent += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::obstacle_transforms;
    use crate::Agent;
    use std::time::SystemTime;

    #[test]
    fn test_counts_sent_transforms() {
        let agents = [Agent::default(), Agent::default()];
        let transforms = obstacle_transforms(&agents, "map", "obs", SystemTime::now());
        let mut broadcaster = TracingBroadcaster::new();
        broadcaster.send_transforms(&transforms);
        broadcaster.send_transforms(&transforms[..1]);
        assert_eq!(broadcaster.sent(), 3);
    }
}
