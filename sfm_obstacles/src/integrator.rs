use crate::Agent;
use crate::Vec3f;

/// Advances `agent` by one explicit step of length `dt`.
///
/// The blended force updates the velocity, the speed is capped at the
/// agent's preferred speed and the position moves along the new velocity.
/// A negative (or NaN) `dt` leaves the agent untouched.
///
/// Note that the previous velocity enters the update twice,
/// `v' = v + (v + F * dt)`, before the cap is applied (see DESIGN.md).
pub fn integrate(
    agent: &mut Agent,
    desired_force: &Vec3f,
    social_force: &Vec3f,
    desired_weight: f64,
    social_weight: f64,
    dt: f64,
) {
    if dt < 0f64 || dt.is_nan() {
        return;
    }
    let force = desired_force * desired_weight + social_force * social_weight;

    let mut velocity = agent.velocity + (agent.velocity + force * dt);
    velocity.z = 0f64;
    clamp_speed(&mut velocity, agent.preferred_speed);

    agent.velocity = velocity;
    agent.position += velocity * dt;
    agent.position.z = 0f64;
}

/// Rescales `velocity` so its norm does not exceed `max_speed`. The rescale
/// can round a few ulps over the cap, so it is nudged down until it is not.
fn clamp_speed(velocity: &mut Vec3f, max_speed: f64) {
    let speed = velocity.norm();
    if speed <= max_speed {
        return;
    }
    *velocity *= max_speed / speed;
    while velocity.norm() > max_speed {
        *velocity *= 1f64 - f64::EPSILON;
    }
}
