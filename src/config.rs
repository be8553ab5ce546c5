//! Project configuration loaded from `.tfsalvage.yaml`

use crate::executor::ExecutorConfig;
use crate::traits::FileSystem;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Name of the configuration file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = ".tfsalvage.yaml";

/// Executor used when neither the CLI nor the config file names one
pub const DEFAULT_EXECUTOR: &str = "terraform";

/// Settings from `.tfsalvage.yaml`. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SalvageConfig {
    /// Executor name (`terraform` or `opentofu`)
    #[serde(default)]
    pub executor: Option<String>,

    /// Command printing the state as JSON
    #[serde(default)]
    pub show_command: Option<String>,

    /// Command printing the provider schemas as JSON
    #[serde(default)]
    pub schema_command: Option<String>,
}

impl SalvageConfig {
    /// Load the config file from the working directory, if present
    pub fn load(fs: &dyn FileSystem, working_dir: &Path) -> Result<Self> {
        let path = working_dir.join(CONFIG_FILE_NAME);
        if !fs.exists(&path) {
            return Ok(Self::default());
        }

        let content = fs.read_to_string(&path)?;
        Self::parse(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        // An empty file deserializes to null
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Resolve the executor name: CLI value, then config file, then default
    pub fn executor_name<'a>(&'a self, cli: Option<&'a str>) -> &'a str {
        cli.or(self.executor.as_deref()).unwrap_or(DEFAULT_EXECUTOR)
    }

    pub fn executor_config(&self) -> ExecutorConfig {
        ExecutorConfig {
            show_command: self.show_command.clone(),
            schema_command: self.schema_command.clone(),
        }
    }
}
