pub mod goal_selector;
pub mod rejection_sampler;
