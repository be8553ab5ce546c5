use crate::config::SalvageConfig;
use crate::context::Context;
use crate::executor::Executor;
use crate::salvage::{generate_document, Selection};
use crate::tfjson::{SchemaCatalog, StateDocument};
use anyhow::{Context as _, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// How the resource list is filtered by the addresses on standard input
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SelectionMode {
    #[default]
    All,
    Include,
    Exclude,
}

/// Options of the salvage command
#[derive(Debug, Clone, Default)]
pub struct SalvageOptions {
    /// Terraform working directory
    pub working_dir: PathBuf,
    pub mode: SelectionMode,
    /// Executor name from the command line
    pub executor: Option<String>,
    /// Saved `show -json` output to use instead of running the executor
    pub state_json: Option<PathBuf>,
    /// Saved `providers schema -json` output to use instead of running the executor
    pub schema_json: Option<PathBuf>,
    /// Destination file; standard output when absent
    pub output: Option<PathBuf>,
}

/// Handles salvaging resource blocks from state
pub struct SalvageCommand;

impl SalvageCommand {
    /// Generate the configuration and write it to its destination.
    ///
    /// Nothing is written unless every selected resource was converted.
    pub fn execute(ctx: &Context, options: &SalvageOptions) -> Result<()> {
        let hcl = Self::generate(ctx, options)?;

        match &options.output {
            Some(path) => {
                ctx.fs.write(path, &hcl)?;
                ctx.output.key_value("Written to", &path.display().to_string());
            }
            None => {
                let stdout = std::io::stdout();
                let mut handle = stdout.lock();
                handle
                    .write_all(hcl.as_bytes())
                    .context("Failed to write to standard output")?;
                handle.flush()?;
            }
        }

        Ok(())
    }

    /// Generate the configuration text
    pub fn generate(ctx: &Context, options: &SalvageOptions) -> Result<String> {
        let working_dir = options.working_dir.as_path();
        let config = SalvageConfig::load(ctx.fs.as_ref(), working_dir)?;

        let selection = Self::read_selection(ctx, options.mode)?;

        let executor = if options.state_json.is_none() || options.schema_json.is_none() {
            Some(Self::get_executor(ctx, &config, options.executor.as_deref(), working_dir)?)
        } else {
            None
        };

        // State
        let state_text = match &options.state_json {
            Some(path) => Self::read_json_file(ctx, path)?,
            None => Self::required(&executor)?
                .show_state(&config.executor_config(), working_dir)
                .context("Failed to read state")?,
        };
        let state = StateDocument::parse(&state_text)?;
        if let Some(version) = &state.terraform_version {
            ctx.output.key_value("State written by", version);
        }
        let resources = state
            .root_resources()
            .with_context(|| format!("No state found in {}", working_dir.display()))?;

        let selected = selection.apply(resources);
        if options.mode != SelectionMode::All {
            ctx.output.info(&format!(
                "Selected {} of {} resources",
                selected.len(),
                resources.len()
            ));
        }
        for address in selection.unmatched(resources) {
            ctx.output
                .warning(&format!("Resource not found in state: {}", address));
        }

        // Schemas
        let schema_text = match &options.schema_json {
            Some(path) => Self::read_json_file(ctx, path)?,
            None => Self::required(&executor)?
                .providers_schema(&config.executor_config(), working_dir)
                .context("Failed to read provider schemas")?,
        };
        let catalog = SchemaCatalog::parse(&schema_text)?;
        ctx.output
            .key_value("Providers", &catalog.provider_count().to_string());

        let report = generate_document(&catalog, selected)?;

        for (resource_type, providers) in &report.ambiguous {
            ctx.output.warning(&format!(
                "Resource type {} is declared by several providers ({}); using {}",
                resource_type,
                providers.join(", "),
                providers.first().map(String::as_str).unwrap_or_default()
            ));
        }
        for address in &report.skipped {
            ctx.output
                .dimmed(&format!("Skipping data source: {}", address));
        }

        ctx.output.success(&format!(
            "Salvaged {} resource{}",
            report.document.len(),
            if report.document.len() == 1 { "" } else { "s" }
        ));

        Ok(report.document.to_string())
    }

    /// Read the address list from standard input when a filter is requested
    fn read_selection(ctx: &Context, mode: SelectionMode) -> Result<Selection> {
        let selection = match mode {
            SelectionMode::All => Selection::All,
            SelectionMode::Include => Selection::include_from(&ctx.input.read_all()?),
            SelectionMode::Exclude => Selection::exclude_from(&ctx.input.read_all()?),
        };
        Ok(selection)
    }

    fn get_executor(
        ctx: &Context,
        config: &SalvageConfig,
        cli_executor: Option<&str>,
        working_dir: &Path,
    ) -> Result<Arc<dyn Executor>> {
        let name = config.executor_name(cli_executor);
        let executor = ctx.executor_registry.get(name)?;

        if !executor.check_installed(working_dir)? {
            anyhow::bail!(
                "{} is not installed or not available in PATH",
                executor.get_name()
            );
        }

        ctx.output.key_value("Executor", executor.get_name());
        ctx.output
            .key_value("Working directory", &working_dir.display().to_string());

        Ok(executor)
    }

    fn required(executor: &Option<Arc<dyn Executor>>) -> Result<&Arc<dyn Executor>> {
        executor
            .as_ref()
            .context("No executor resolved for the working directory")
    }

    fn read_json_file(ctx: &Context, path: &Path) -> Result<String> {
        ctx.output.key_value("Reading", &path.display().to_string());
        ctx.fs.read_to_string(path)
    }
}
