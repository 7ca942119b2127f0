pub mod desired_force;
pub mod social_force;
