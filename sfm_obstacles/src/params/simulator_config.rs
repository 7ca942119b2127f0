use std::f64::consts::PI;
use std::path::Path;
use std::time::Duration;

use yaml_rust::{Yaml, YamlLoader};

use crate::error::ConfigError;
use crate::params::model_params::ModelParams;

/// Start-up configuration for an obstacle simulation run.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulatorConfig {
    /// Parent frame of every published obstacle transform
    pub world_frame: String,
    /// Prefix of the per-obstacle child frames; the agent id is appended
    pub obstacles_frame: String,
    /// Target loop rate
    pub hz: f64,
    /// Number of agents created at start-up
    pub num_obstacles: usize,
    /// Side length of the square domain centred at the origin
    pub simulation_square_length: f64,
    pub min_preferred_speed: f64,
    pub max_preferred_speed: f64,
    /// Cap on goal rejection sampling draws
    pub max_goal_attempts: usize,
    /// Seed for reproducible runs. Entropy is used when absent.
    pub seed: Option<u64>,
    pub model: ModelParams,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            world_frame: "map".to_owned(),
            obstacles_frame: "obs".to_owned(),
            hz: 20.0,
            num_obstacles: 20,
            simulation_square_length: 15.0,
            min_preferred_speed: 1.0,
            max_preferred_speed: 1.5,
            max_goal_attempts: 1000,
            seed: None,
            model: ModelParams::default(),
        }
    }
}

impl SimulatorConfig {
    /// Time step handed to the step driver for each tick.
    pub fn dt(&self) -> f64 {
        1.0 / self.hz
    }

    /// Half the side length of the simulation square.
    pub fn domain_half_length(&self) -> f64 {
        self.simulation_square_length * 0.5
    }

    /// Reads and parses a YAML configuration file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses a YAML configuration document. Keys that are absent keep their
    /// default value.
    pub fn from_yaml_str(yaml_str: &str) -> Result<Self, ConfigError> {
        let docs = YamlLoader::load_from_str(yaml_str)?;
        let doc = docs.first().ok_or(ConfigError::EmptyDocument)?;
        let defaults = Self::default();
        let model_defaults = defaults.model;
        let model = &doc["model"];

        let config = Self {
            world_frame: read_string(doc, "world_frame", defaults.world_frame)?,
            obstacles_frame: read_string(doc, "obstacles_frame", defaults.obstacles_frame)?,
            hz: read_f64(doc, "hz", defaults.hz)?,
            num_obstacles: read_usize(doc, "num_obstacles", defaults.num_obstacles)?,
            simulation_square_length: read_f64(
                doc,
                "simulation_square_length",
                defaults.simulation_square_length,
            )?,
            min_preferred_speed: read_f64(
                doc,
                "min_preferred_speed",
                defaults.min_preferred_speed,
            )?,
            max_preferred_speed: read_f64(
                doc,
                "max_preferred_speed",
                defaults.max_preferred_speed,
            )?,
            max_goal_attempts: read_usize(doc, "max_goal_attempts", defaults.max_goal_attempts)?,
            seed: read_optional_u64(doc, "seed")?,
            model: ModelParams {
                neighbour_range: read_f64(
                    model,
                    "neighbour_range",
                    model_defaults.neighbour_range,
                )?,
                lambda: read_f64(model, "lambda", model_defaults.lambda)?,
                gamma: read_f64(model, "gamma", model_defaults.gamma)?,
                n_prime: read_f64(model, "n_prime", model_defaults.n_prime)?,
                n: read_f64(model, "n", model_defaults.n)?,
                field_of_view: read_optional_f64(model, "field_of_view_deg")?
                    .map_or(model_defaults.field_of_view, f64::to_radians),
                theta_epsilon: read_f64(model, "theta_epsilon", model_defaults.theta_epsilon)?,
                desired_force_weight: read_f64(
                    model,
                    "desired_force_factor",
                    model_defaults.desired_force_weight,
                )?,
                social_force_weight: read_f64(
                    model,
                    "social_force_factor",
                    model_defaults.social_force_weight,
                )?,
                goal_tolerance: read_f64(model, "goal_tolerance", model_defaults.goal_tolerance)?,
            },
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges. Called by the YAML loaders; call it yourself when
    /// building a config by hand.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.hz.is_finite() && self.hz > 0.0) {
            return Err(ConfigError::invalid("hz", "must be finite and positive"));
        }
        if let Err(err) = Duration::try_from_secs_f64(self.dt()) {
            return Err(ConfigError::invalid("hz", format!("tick period unusable: {err}")));
        }
        if self.num_obstacles == 0 {
            return Err(ConfigError::invalid("num_obstacles", "must be at least 1"));
        }
        if !(self.simulation_square_length.is_finite() && self.simulation_square_length > 0.0) {
            return Err(ConfigError::invalid(
                "simulation_square_length",
                "must be finite and positive",
            ));
        }
        if !(self.min_preferred_speed > 0.0) {
            return Err(ConfigError::invalid("min_preferred_speed", "must be positive"));
        }
        if !(self.max_preferred_speed.is_finite()
            && self.max_preferred_speed >= self.min_preferred_speed)
        {
            return Err(ConfigError::invalid(
                "max_preferred_speed",
                "must be finite and not below min_preferred_speed",
            ));
        }
        if self.max_goal_attempts == 0 {
            return Err(ConfigError::invalid("max_goal_attempts", "must be at least 1"));
        }
        let model = &self.model;
        for (key, value) in [
            ("neighbour_range", model.neighbour_range),
            ("lambda", model.lambda),
            ("gamma", model.gamma),
            ("n_prime", model.n_prime),
            ("n", model.n),
            ("field_of_view_deg", model.field_of_view),
            ("theta_epsilon", model.theta_epsilon),
            ("desired_force_factor", model.desired_force_weight),
            ("social_force_factor", model.social_force_weight),
            ("goal_tolerance", model.goal_tolerance),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::invalid(key, "must be finite"));
            }
        }
        if !(self.model.neighbour_range >= 0.0) {
            return Err(ConfigError::invalid("neighbour_range", "must not be negative"));
        }
        if !(self.model.gamma > 0.0) {
            return Err(ConfigError::invalid("gamma", "must be positive"));
        }
        if !(0.0..=PI).contains(&self.model.field_of_view) {
            return Err(ConfigError::invalid(
                "field_of_view_deg",
                "must lie within [0, 180] degrees",
            ));
        }
        Ok(())
    }
}

fn read_f64(node: &Yaml, key: &'static str, default: f64) -> Result<f64, ConfigError> {
    Ok(read_optional_f64(node, key)?.unwrap_or(default))
}

fn read_optional_f64(node: &Yaml, key: &'static str) -> Result<Option<f64>, ConfigError> {
    match &node[key] {
        Yaml::BadValue => Ok(None),
        Yaml::Integer(value) => Ok(Some(*value as f64)),
        value @ Yaml::Real(_) => value.as_f64().map(Some).ok_or(ConfigError::WrongType {
            key,
            expected: "a number",
        }),
        _ => Err(ConfigError::WrongType {
            key,
            expected: "a number",
        }),
    }
}

fn read_usize(node: &Yaml, key: &'static str, default: usize) -> Result<usize, ConfigError> {
    match &node[key] {
        Yaml::BadValue => Ok(default),
        Yaml::Integer(value) => usize::try_from(*value)
            .map_err(|_| ConfigError::invalid(key, format!("{value} is not a valid count"))),
        _ => Err(ConfigError::WrongType {
            key,
            expected: "an integer",
        }),
    }
}

fn read_optional_u64(node: &Yaml, key: &'static str) -> Result<Option<u64>, ConfigError> {
    match &node[key] {
        Yaml::BadValue | Yaml::Null => Ok(None),
        Yaml::Integer(value) => u64::try_from(*value)
            .map(Some)
            .map_err(|_| ConfigError::invalid(key, format!("{value} is negative"))),
        _ => Err(ConfigError::WrongType {
            key,
            expected: "an integer",
        }),
    }
}

fn read_string(node: &Yaml, key: &'static str, default: String) -> Result<String, ConfigError> {
    match &node[key] {
        Yaml::BadValue => Ok(default),
        Yaml::String(value) => Ok(value.clone()),
        _ => Err(ConfigError::WrongType {
            key,
            expected: "a string",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_mapping_gives_defaults() {
        let config = SimulatorConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, SimulatorConfig::default());
        assert_eq!(config.dt(), 0.05);
        assert_eq!(config.domain_half_length(), 7.5);
    }

    #[test]
    fn test_shipped_config_matches_defaults() {
        let yaml = include_str!("../../../config/sfm_obstacle_simulator.yaml");
        let config = SimulatorConfig::from_yaml_str(yaml).unwrap();
        let defaults = SimulatorConfig::default();
        assert_eq!(config.world_frame, defaults.world_frame);
        assert_eq!(config.num_obstacles, defaults.num_obstacles);
        assert_eq!(config.seed, None);
        assert_eq!(config.model.desired_force_weight, 20.0);
        assert!((config.model.field_of_view - defaults.model.field_of_view).abs() < 1e-12);
    }

    #[test]
    fn test_reads_top_level_and_model_keys() {
        let yaml = "
world_frame: world
obstacles_frame: person_
hz: 10
num_obstacles: 5
simulation_square_length: 20.0
seed: 7
model:
  neighbour_range: 4.5
  field_of_view_deg: 45
  desired_force_factor: 10.0
  social_force_factor: 5
";
        let config = SimulatorConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.world_frame, "world");
        assert_eq!(config.obstacles_frame, "person_");
        assert_eq!(config.hz, 10.0);
        assert_eq!(config.num_obstacles, 5);
        assert_eq!(config.domain_half_length(), 10.0);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.model.neighbour_range, 4.5);
        assert!((config.model.field_of_view - PI / 4.0).abs() < 1e-12);
        assert_eq!(config.model.desired_force_weight, 10.0);
        assert_eq!(config.model.social_force_weight, 5.0);
        assert_eq!(config.model.lambda, ModelParams::default().lambda);
    }

    #[test]
    fn test_wrong_type_is_reported() {
        let err = SimulatorConfig::from_yaml_str("hz: fast").unwrap_err();
        assert!(matches!(err, ConfigError::WrongType { key: "hz", .. }));
    }

    #[test]
    fn test_out_of_range_values_are_rejected() {
        let err = SimulatorConfig::from_yaml_str("hz: 0").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "hz", .. }));

        let err = SimulatorConfig::from_yaml_str("num_obstacles: -3").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                key: "num_obstacles",
                ..
            }
        ));

        let err =
            SimulatorConfig::from_yaml_str("min_preferred_speed: 2.0\nmax_preferred_speed: 1.0")
                .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                key: "max_preferred_speed",
                ..
            }
        ));
    }

    #[test]
    fn test_non_finite_model_values_are_rejected() {
        for key in [
            "lambda",
            "n_prime",
            "n",
            "theta_epsilon",
            "goal_tolerance",
            "desired_force_factor",
            "social_force_factor",
        ] {
            for value in [".nan", ".inf", "-.inf"] {
                let yaml = format!("model:\n  {key}: {value}\n");
                let err = SimulatorConfig::from_yaml_str(&yaml).unwrap_err();
                assert!(
                    matches!(err, ConfigError::InvalidValue { key: k, .. } if k == key),
                    "{key}: {value} gave {err:?}"
                );
            }
        }
    }

    #[test]
    fn test_tick_period_must_fit_a_duration() {
        let err = SimulatorConfig::from_yaml_str("hz: 1.0e-30").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "hz", .. }));
        assert!(SimulatorConfig::from_yaml_str("hz: 0.001").is_ok());
    }

    #[test]
    fn test_empty_input_is_an_error() {
        let err = SimulatorConfig::from_yaml_str("").unwrap_err();
        assert!(matches!(err, ConfigError::EmptyDocument));
    }
}
