//! Configuration System
//!
//! Run parameters are loaded from a TOML file with a `[simulation]` table and
//! optional `[[experiment]]` entries, each overriding part of that table.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Parameters of a single run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Number of agents in the population
    pub agent_count: usize,
    /// Random contact draws per agent
    pub connectivity: usize,
    /// Number of knowledge levels tracked
    pub knowledge_depth: usize,
    /// Seed for graph construction and origin choice; random when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub random_seed: Option<u64>,
    /// Stop after this many rounds even if the run has not finished
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_rounds: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            agent_count: 10,
            connectivity: 2,
            knowledge_depth: 2,
            random_seed: None,
            max_rounds: None,
        }
    }
}

/// Partial [`SimConfig`] applied on top of the base table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connectivity: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub knowledge_depth: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub random_seed: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_rounds: Option<u64>,
}

impl ExperimentConfig {
    /// Resolve this experiment against `base`.
    pub fn apply(&self, base: &SimConfig) -> SimConfig {
        SimConfig {
            agent_count: self.agent_count.unwrap_or(base.agent_count),
            connectivity: self.connectivity.unwrap_or(base.connectivity),
            knowledge_depth: self.knowledge_depth.unwrap_or(base.knowledge_depth),
            random_seed: self.random_seed.or(base.random_seed),
            max_rounds: self.max_rounds.or(base.max_rounds),
        }
    }
}

/// Complete configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub simulation: SimConfig,
    #[serde(default, rename = "experiment", skip_serializing_if = "Vec::is_empty")]
    pub experiments: Vec<ExperimentConfig>,
}

impl ConfigFile {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Runs described by this file: one per experiment, or the base table
    /// alone when no experiments are listed.
    pub fn experiments(&self) -> Vec<SimConfig> {
        if self.experiments.is_empty() {
            vec![self.simulation.clone()]
        } else {
            self.experiments
                .iter()
                .map(|experiment| experiment.apply(&self.simulation))
                .collect()
        }
    }
}

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Generates a default configuration file content.
pub fn default_config_toml() -> String {
    r#"# Rumor simulation configuration

[simulation]
agent_count = 10
connectivity = 2
knowledge_depth = 2
# random_seed = 42
# max_rounds = 1000

# Each [[experiment]] overrides part of [simulation] and runs in turn.
# [[experiment]]
# agent_count = 20
# connectivity = 2
# knowledge_depth = 2
#
# [[experiment]]
# agent_count = 40
# connectivity = 10
# knowledge_depth = 4
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = SimConfig::default();

        assert_eq!(config.agent_count, 10);
        assert_eq!(config.connectivity, 2);
        assert_eq!(config.knowledge_depth, 2);
        assert!(config.random_seed.is_none());
        assert!(config.max_rounds.is_none());
    }

    #[test]
    fn test_parse_config_from_toml() {
        let toml = r#"
            [simulation]
            agent_count = 40
            connectivity = 10
            knowledge_depth = 4
            random_seed = 7
        "#;

        let config = ConfigFile::from_str(toml).unwrap();

        assert_eq!(config.simulation.agent_count, 40);
        assert_eq!(config.simulation.connectivity, 10);
        assert_eq!(config.simulation.knowledge_depth, 4);
        assert_eq!(config.simulation.random_seed, Some(7));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let toml = r#"
            [simulation]
            knowledge_depth = 5
        "#;

        let config = ConfigFile::from_str(toml).unwrap();

        assert_eq!(config.simulation.knowledge_depth, 5);
        assert_eq!(config.simulation.agent_count, 10);
        assert_eq!(config.simulation.connectivity, 2);
    }

    #[test]
    fn test_empty_file_is_default() {
        let config = ConfigFile::from_str("").unwrap();
        assert_eq!(config, ConfigFile::default());
        assert_eq!(config.experiments(), vec![SimConfig::default()]);
    }

    #[test]
    fn test_negative_values_are_rejected() {
        let toml = r#"
            [simulation]
            connectivity = -1
        "#;

        assert!(matches!(ConfigFile::from_str(toml), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn test_experiments_override_base() {
        let toml = r#"
            [simulation]
            agent_count = 20
            connectivity = 2
            knowledge_depth = 2
            random_seed = 1

            [[experiment]]
            agent_count = 40

            [[experiment]]
            connectivity = 20
            knowledge_depth = 10
            random_seed = 9
        "#;

        let runs = ConfigFile::from_str(toml).unwrap().experiments();

        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].agent_count, 40);
        assert_eq!(runs[0].connectivity, 2);
        assert_eq!(runs[0].random_seed, Some(1));
        assert_eq!(runs[1].agent_count, 20);
        assert_eq!(runs[1].connectivity, 20);
        assert_eq!(runs[1].knowledge_depth, 10);
        assert_eq!(runs[1].random_seed, Some(9));
    }

    #[test]
    fn test_config_to_toml() {
        let config = ConfigFile::default();
        let toml = config.to_toml().unwrap();

        assert!(toml.contains("[simulation]"));
        assert!(toml.contains("agent_count = 10"));
        assert_eq!(ConfigFile::from_str(&toml).unwrap(), config);
    }

    #[test]
    fn test_default_config_toml_parses() {
        let config = ConfigFile::from_str(&default_config_toml()).unwrap();
        assert_eq!(config.simulation, SimConfig::default());
        assert!(config.experiments.is_empty());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[simulation]\nagent_count = 3").unwrap();

        let config = ConfigFile::from_file(file.path()).unwrap();
        assert_eq!(config.simulation.agent_count, 3);
    }

    #[test]
    fn test_missing_file() {
        let result = ConfigFile::from_file("/nonexistent/rumor.toml");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
