//! User configuration for graphstep (stored in ~/.config/graphstep/config.toml)
//!
//! Every key is optional; command-line flags take precedence.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{GraphError, Result};
use crate::step::{Pacing, StepMode, DEFAULT_PACING_MS};

const CONFIG_DIR: &str = "graphstep";
const CONFIG_FILE: &str = "config.toml";
const CONFIG_DIR_ENV_VAR: &str = "GRAPHSTEP_CONFIG_DIR";
const DEFAULT_GRAPH_FILE: &str = "graph.toml";

fn default_pacing_ms() -> u64 {
    DEFAULT_PACING_MS
}

fn default_graph_file() -> PathBuf {
    PathBuf::from(DEFAULT_GRAPH_FILE)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepConfig {
    /// Milliseconds per step in auto mode
    #[serde(default = "default_pacing_ms")]
    pub pacing_ms: u64,
    /// Initial stepping mode for runs
    #[serde(default)]
    pub mode: StepMode,
    /// Graph file used when `--graph` is not given
    #[serde(default = "default_graph_file")]
    pub graph_file: PathBuf,
}

impl Default for StepConfig {
    fn default() -> Self {
        Self {
            pacing_ms: default_pacing_ms(),
            mode: StepMode::default(),
            graph_file: default_graph_file(),
        }
    }
}

impl StepConfig {
    pub fn config_path() -> Result<PathBuf> {
        // Allow environment variable override for testing
        let config_dir = if let Ok(env_dir) = std::env::var(CONFIG_DIR_ENV_VAR) {
            PathBuf::from(env_dir)
        } else {
            dirs::config_dir()
                .ok_or_else(|| {
                    GraphError::Other("unable to determine config directory".to_string())
                })?
                .join(CONFIG_DIR)
        };

        Ok(config_dir.join(CONFIG_FILE))
    }

    /// Load the user configuration, falling back to defaults when absent
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Ok(path) => Self::load_from(&path),
            Err(e) => {
                tracing::debug!(error = %e, "no config directory, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            GraphError::Other(format!(
                "failed to read config from {}: {}",
                path.display(),
                e
            ))
        })?;

        let config: StepConfig = toml::from_str(&content).map_err(|e| {
            GraphError::Other(format!(
                "failed to parse config from {}: {}",
                path.display(),
                e
            ))
        })?;
        tracing::debug!(path = %path.display(), ?config, "load_config");
        Ok(config)
    }

    /// Pacing with range clamping applied
    pub fn pacing(&self) -> Pacing {
        Pacing::from_millis(self.pacing_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let config = StepConfig::load_from(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config, StepConfig::default());
        assert_eq!(config.pacing().as_millis(), 300);
        assert_eq!(config.mode, StepMode::Auto);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "mode = \"manual\"\n").unwrap();

        let config = StepConfig::load_from(&path).unwrap();
        assert_eq!(config.mode, StepMode::Manual);
        assert_eq!(config.pacing_ms, 300);
        assert_eq!(config.graph_file, PathBuf::from("graph.toml"));
    }

    #[test]
    fn test_pacing_from_config_is_clamped() {
        let config = StepConfig {
            pacing_ms: 5,
            ..Default::default()
        };
        assert_eq!(config.pacing().as_millis(), 10);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "mode = \"sideways\"\n").unwrap();
        assert!(StepConfig::load_from(&path).is_err());
    }
}
