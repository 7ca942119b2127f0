use crate::params::model_params::ModelParams;
use crate::Agent;
use crate::Vec3f;

/// Wraps an angle into `[-pi, pi]`.
fn wrap_angle(angle: f64) -> f64 {
    angle.sin().atan2(angle.cos())
}

fn planar_angle(v: &Vec3f) -> f64 {
    v.y.atan2(v.x)
}

/// Force a single neighbour exerts on `agent`.
///
/// Only the acting agent's field of view and dodging side are consulted, so
/// the force `a` feels from `b` is in general not the mirror of the one `b`
/// feels from `a`.
pub fn neighbour_force(agent: &Agent, neighbour: &Agent, params: &ModelParams) -> Vec3f {
    let diff_vector = neighbour.position - agent.position;
    let distance = diff_vector.norm();
    if distance > params.neighbour_range {
        return Vec3f::zeros();
    }
    let diff_direction = match diff_vector.try_normalize(0.0) {
        Some(direction) => direction,
        None => return Vec3f::zeros(),
    };

    let other_angle = planar_angle(&diff_direction);
    let bearing = wrap_angle(other_angle - agent.heading());
    if bearing.abs() > params.field_of_view {
        return Vec3f::zeros();
    }

    let velocity_diff = agent.velocity - neighbour.velocity;
    let interaction_vector = params.lambda * velocity_diff + diff_direction;
    let interaction_direction = match interaction_vector.try_normalize(0.0) {
        Some(direction) => direction,
        None => return Vec3f::zeros(),
    };

    let theta = wrap_angle(other_angle - planar_angle(&interaction_direction));
    let sign_of_theta = if theta.abs() < params.theta_epsilon {
        0f64
    } else {
        theta.signum()
    };

    let b = params.gamma * interaction_vector.norm();

    let velocity_amount = -(-distance / b - (params.n_prime * b * theta).powi(2)).exp();
    let angle_amount = -sign_of_theta * (-distance / b - (params.n * b * theta).powi(2)).exp();

    let interaction_normal = if agent.dodging_right {
        Vec3f::new(
            -interaction_direction.y,
            interaction_direction.x,
            interaction_direction.z,
        )
    } else {
        Vec3f::new(
            interaction_direction.y,
            -interaction_direction.x,
            interaction_direction.z,
        )
    };

    interaction_direction * velocity_amount + interaction_normal * angle_amount
}

/// Sum of the forces every other agent of `population` exerts on `agent`.
/// The agent itself is skipped by id.
pub fn social_force(agent: &Agent, population: &[Agent], params: &ModelParams) -> Vec3f {
    population
        .iter()
        .filter(|other| other.agent_id != agent.agent_id)
        .fold(Vec3f::zeros(), |force, other| {
            force + neighbour_force(agent, other, params)
        })
}
