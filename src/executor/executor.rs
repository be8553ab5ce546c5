use anyhow::Result;
use std::path::Path;

/// Configuration for executor invocation, typically loaded from .tfsalvage.yaml
#[derive(Debug, Clone, Default)]
pub struct ExecutorConfig {
    /// Optional custom state command (overrides default)
    pub show_command: Option<String>,
    /// Optional custom schema command (overrides default)
    pub schema_command: Option<String>,
}

/// Trait for the provisioning tools state is read from (Terraform, OpenTofu)
pub trait Executor: Send + Sync {
    /// Check if the executor is installed and available
    /// Typically runs a version command to verify
    fn check_installed(&self, working_dir: &Path) -> Result<bool>;

    /// Get the JSON state snapshot (`show -json`)
    /// Uses custom command from config if provided, otherwise uses default
    fn show_state(&self, config: &ExecutorConfig, working_dir: &Path) -> Result<String>;

    /// Get the JSON provider schemas (`providers schema -json`)
    /// Uses custom command from config if provided, otherwise uses default
    fn providers_schema(&self, config: &ExecutorConfig, working_dir: &Path) -> Result<String>;

    /// Get the name of this executor (e.g., "opentofu", "terraform")
    fn get_name(&self) -> &str;

    /// Get the default state command for this executor
    fn default_show_command(&self) -> &str;

    /// Get the default schema command for this executor
    fn default_schema_command(&self) -> &str;
}
