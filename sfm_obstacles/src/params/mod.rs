pub mod model_params;
pub mod simulator_config;
