use crate::AgentId;

/// Errors raised while loading or validating simulator configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] yaml_rust::ScanError),

    #[error("config document is empty")]
    EmptyDocument,

    #[error("key `{key}` has the wrong type, expected {expected}")]
    WrongType {
        key: &'static str,
        expected: &'static str,
    },

    #[error("key `{key}` is invalid: {reason}")]
    InvalidValue { key: &'static str, reason: String },

    #[error("bad distribution parameters: {0}")]
    Distribution(#[from] statrs::StatsError),
}

impl ConfigError {
    pub(crate) fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            key,
            reason: reason.into(),
        }
    }
}

/// Errors raised while picking a new goal for an agent.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum GoalSelectionError {
    #[error("agent {agent}: no acceptable goal after {attempts} attempts")]
    ResampleFailed { agent: AgentId, attempts: usize },

    #[error("domain half-length {half_length} is not finite and non-negative")]
    InvalidDomain { half_length: f64 },
}
