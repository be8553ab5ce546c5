use super::executor::{Executor, ExecutorConfig};
use crate::traits::CommandExecutor;
use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;

/// Executor for Terraform-compatible command line tools
pub struct CliExecutor {
    name: String,
    binary: String,
    show_command: String,
    schema_command: String,
    command: Arc<dyn CommandExecutor>,
}

impl CliExecutor {
    pub fn new(name: &str, binary: &str, command: Arc<dyn CommandExecutor>) -> Self {
        Self {
            name: name.to_string(),
            binary: binary.to_string(),
            show_command: format!("{} show -json", binary),
            schema_command: format!("{} providers schema -json", binary),
            command,
        }
    }

    /// HashiCorp Terraform (`terraform`)
    pub fn terraform(command: Arc<dyn CommandExecutor>) -> Self {
        Self::new("terraform", "terraform", command)
    }

    /// OpenTofu (`tofu`)
    pub fn opentofu(command: Arc<dyn CommandExecutor>) -> Self {
        Self::new("opentofu", "tofu", command)
    }

    /// Run a command line and return its standard output
    fn run(&self, command_line: &str, working_dir: &Path) -> Result<String> {
        // Parse the command string into command and args
        let parts: Vec<&str> = command_line.split_whitespace().collect();

        if parts.is_empty() {
            anyhow::bail!("Empty command provided");
        }

        let output = self
            .command
            .execute(parts[0], &parts[1..], working_dir)
            .with_context(|| format!("Failed to execute '{}'", command_line))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!(
                "'{}' exited with {}: {}",
                command_line,
                output
                    .status
                    .code()
                    .map(|c| format!("status {}", c))
                    .unwrap_or_else(|| "a signal".to_string()),
                stderr.trim()
            );
        }

        String::from_utf8(output.stdout)
            .with_context(|| format!("Output of '{}' is not valid UTF-8", command_line))
    }
}

impl Executor for CliExecutor {
    fn check_installed(&self, working_dir: &Path) -> Result<bool> {
        // Try to run '<binary> version' to check if the tool is installed
        let result = self.command.execute(&self.binary, &["version"], working_dir);

        match result {
            Ok(output) => Ok(output.status.success()),
            Err(_) => Ok(false), // Command not found or failed to execute
        }
    }

    fn show_state(&self, config: &ExecutorConfig, working_dir: &Path) -> Result<String> {
        let command = config
            .show_command
            .as_deref()
            .unwrap_or(self.default_show_command());

        self.run(command, working_dir)
    }

    fn providers_schema(&self, config: &ExecutorConfig, working_dir: &Path) -> Result<String> {
        let command = config
            .schema_command
            .as_deref()
            .unwrap_or(self.default_schema_command());

        self.run(command, working_dir)
    }

    fn get_name(&self) -> &str {
        &self.name
    }

    fn default_show_command(&self) -> &str {
        &self.show_command
    }

    fn default_schema_command(&self) -> &str {
        &self.schema_command
    }
}
