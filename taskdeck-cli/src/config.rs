//! Layered configuration for the CLI
//!
//! Sources, later ones winning:
//! 1. Built-in defaults
//! 2. `taskdeck.toml`, `taskdeck.yaml`, `taskdeck.yml` or `taskdeck.json` in the working
//!    directory, or the single file passed with `--config`
//! 3. `TASKDECK_*` environment variables, `__` separating nested keys
//!    (`TASKDECK_DRAG__ACTIVATION_DISTANCE=4`)

use crate::layout::{LayoutConfig, LayoutConfigError};
use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use taskdeck_drag::{DragConfig, DragConfigError};
use thiserror::Error;
use tracing::{debug, trace};

pub const ENV_PREFIX: &str = "TASKDECK_";

/// File names probed in the working directory, lowest precedence first
pub const CONFIG_FILE_NAMES: [&str; 4] = [
    "taskdeck.toml",
    "taskdeck.yaml",
    "taskdeck.yml",
    "taskdeck.json",
];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Unsupported configuration file format: {path}")]
    UnsupportedFormat { path: PathBuf },

    #[error("Failed to parse configuration: {source}")]
    Parse {
        #[source]
        source: Box<figment::Error>,
    },

    #[error("Invalid drag configuration: {0}")]
    Drag(#[from] DragConfigError),

    #[error("Invalid layout configuration: {0}")]
    Layout(#[from] LayoutConfigError),
}

impl From<figment::Error> for ConfigError {
    fn from(error: figment::Error) -> Self {
        ConfigError::Parse {
            source: Box::new(error),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskdeckConfig {
    pub drag: DragConfig,
    pub layout: LayoutConfig,
    /// Actor recorded on logged operations when `--actor` is not given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,
    /// Board seed used when a command gets no `--seed`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<PathBuf>,
}

impl TaskdeckConfig {
    /// Load from the current directory and the process environment
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::load_from(&dir, explicit, ENV_PREFIX)
    }

    /// Load with an explicit search directory and environment prefix
    pub fn load_from(dir: &Path, explicit: Option<&Path>, env_prefix: &str) -> Result<Self, ConfigError> {
        let config: TaskdeckConfig = build_figment(dir, explicit, env_prefix)?.extract()?;
        config.validate()?;
        debug!(?config, "loaded configuration");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.drag.validate()?;
        self.layout.validate()?;
        Ok(())
    }
}

fn build_figment(dir: &Path, explicit: Option<&Path>, env_prefix: &str) -> Result<Figment, ConfigError> {
    let mut figment = Figment::new().merge(Serialized::defaults(TaskdeckConfig::default()));

    match explicit {
        Some(path) => {
            if !path.is_file() {
                return Err(ConfigError::FileNotFound {
                    path: path.to_path_buf(),
                });
            }
            figment = figment.merge(file_provider(path)?);
        }
        None => {
            for name in CONFIG_FILE_NAMES {
                let path = dir.join(name);
                if path.is_file() {
                    trace!(path = %path.display(), "found config file");
                    figment = figment.merge(file_provider(&path)?);
                }
            }
        }
    }

    Ok(figment.merge(Env::prefixed(env_prefix).split("__")))
}

fn file_provider(path: &Path) -> Result<Figment, ConfigError> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => Ok(Figment::from(Toml::file(path))),
        Some("yaml" | "yml") => Ok(Figment::from(Yaml::file(path))),
        Some("json") => Ok(Figment::from(Json::file(path))),
        _ => Err(ConfigError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use taskdeck_drag::DropPlacement;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_without_files() {
        let dir = TempDir::new().unwrap();
        let config = TaskdeckConfig::load_from(dir.path(), None, "TASKDECK_TEST_NONE_").unwrap();
        assert_eq!(config, TaskdeckConfig::default());
    }

    #[test]
    fn test_discovered_toml() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("taskdeck.toml"),
            "actor = \"ada\"\n[drag]\nactivation_distance = 3.5\ndrop_placement = \"after\"\n",
        )
        .unwrap();

        let config = TaskdeckConfig::load_from(dir.path(), None, "TASKDECK_TEST_TOML_").unwrap();
        assert_eq!(config.actor.as_deref(), Some("ada"));
        assert_eq!(config.drag.activation_distance, 3.5);
        assert_eq!(config.drag.drop_placement, DropPlacement::After);
        assert_eq!(config.layout, LayoutConfig::default());
    }

    #[test]
    fn test_json_overrides_toml() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("taskdeck.toml"), "actor = \"toml\"\n").unwrap();
        fs::write(dir.path().join("taskdeck.json"), r#"{"actor": "json"}"#).unwrap();

        let config = TaskdeckConfig::load_from(dir.path(), None, "TASKDECK_TEST_ORDER_").unwrap();
        assert_eq!(config.actor.as_deref(), Some("json"));
    }

    #[test]
    fn test_explicit_file_skips_discovery() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("taskdeck.toml"), "actor = \"discovered\"\n").unwrap();
        let explicit = dir.path().join("custom.yaml");
        fs::write(&explicit, "layout:\n  column_width: 300\n").unwrap();

        let config =
            TaskdeckConfig::load_from(dir.path(), Some(&explicit), "TASKDECK_TEST_EXPLICIT_").unwrap();
        assert_eq!(config.actor, None);
        assert_eq!(config.layout.column_width, 300.0);
    }

    #[test]
    fn test_missing_explicit_file() {
        let dir = TempDir::new().unwrap();
        let err = TaskdeckConfig::load_from(
            dir.path(),
            Some(&dir.path().join("nope.toml")),
            "TASKDECK_TEST_MISSING_",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("taskdeck.ini");
        fs::write(&path, "actor=x").unwrap();
        let err = TaskdeckConfig::load_from(dir.path(), Some(&path), "TASKDECK_TEST_INI_").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_invalid_drag_values_rejected() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("taskdeck.toml"), "[drag]\nactivation_distance = -1.0\n").unwrap();
        let err = TaskdeckConfig::load_from(dir.path(), None, "TASKDECK_TEST_NEG_").unwrap_err();
        assert!(matches!(err, ConfigError::Drag(_)));
    }

    #[test]
    fn test_invalid_layout_values_rejected() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("taskdeck.yaml"), "layout:\n  card_height: 0\n").unwrap();
        let err = TaskdeckConfig::load_from(dir.path(), None, "TASKDECK_TEST_LAYOUT_").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Layout(LayoutConfigError::Size {
                field: "card_height",
                ..
            })
        ));
    }

    #[test]
    #[serial]
    fn test_env_overrides_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("taskdeck.toml"), "[drag]\nactivation_distance = 3.0\n").unwrap();

        std::env::set_var("TASKDECK_TEST_ENV_DRAG__ACTIVATION_DISTANCE", "12");
        std::env::set_var("TASKDECK_TEST_ENV_ACTOR", "env-actor");
        let result = TaskdeckConfig::load_from(dir.path(), None, "TASKDECK_TEST_ENV_");
        std::env::remove_var("TASKDECK_TEST_ENV_DRAG__ACTIVATION_DISTANCE");
        std::env::remove_var("TASKDECK_TEST_ENV_ACTOR");

        let config = result.unwrap();
        assert_eq!(config.drag.activation_distance, 12.0);
        assert_eq!(config.actor.as_deref(), Some("env-actor"));
    }
}
