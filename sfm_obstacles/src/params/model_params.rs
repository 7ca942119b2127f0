use std::f64::consts::PI;

/// Tunables of the anisotropic social force model.
///
/// A single immutable value is handed to every force and integration call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModelParams {
    /// Neighbours further than this (in meters) exert no force
    pub neighbour_range: f64,
    /// Weight of the relative velocity in the interaction vector
    pub lambda: f64,
    /// Scales the interaction vector magnitude into the range parameter `b`
    pub gamma: f64,
    /// Angular decay of the velocity component
    pub n_prime: f64,
    /// Angular decay of the angular component
    pub n: f64,
    /// Half-angle (radians) of the forward field of view
    pub field_of_view: f64,
    /// Below this magnitude the interaction angle is treated as zero
    pub theta_epsilon: f64,
    /// Multiplier on the goal attraction force
    pub desired_force_weight: f64,
    /// Multiplier on the summed social force
    pub social_force_weight: f64,
    /// An agent closer than this to its goal gets a new one
    pub goal_tolerance: f64,
}

impl Default for ModelParams {
    fn default() -> Self {
        Self {
            neighbour_range: 3.0,
            lambda: 2.0,
            gamma: 0.35,
            n_prime: 3.0,
            n: 2.0,
            field_of_view: PI / 6.0,
            theta_epsilon: 1e-2,
            desired_force_weight: 20.0,
            social_force_weight: 20.0,
            goal_tolerance: 0.5,
        }
    }
}
