use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::{Map, Value};

/// Output of `terraform show -json`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StateDocument {
    #[serde(default)]
    pub format_version: Option<String>,
    #[serde(default)]
    pub terraform_version: Option<String>,
    /// Absent when the working directory has no state
    #[serde(default)]
    pub values: Option<StateValues>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StateValues {
    #[serde(default)]
    pub root_module: StateModule,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StateModule {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub resources: Vec<StateResource>,
    #[serde(default)]
    pub child_modules: Vec<StateModule>,
}

/// Whether a resource is managed or read from a data source
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceMode {
    #[default]
    Managed,
    Data,
}

/// A resource instance and its attribute values
#[derive(Debug, Clone, Deserialize)]
pub struct StateResource {
    /// Absolute address, e.g. `aws_instance.web` or `aws_instance.web[0]`
    pub address: String,
    #[serde(default)]
    pub mode: ResourceMode,
    #[serde(rename = "type")]
    pub resource_type: String,
    pub name: String,
    #[serde(default)]
    pub provider_name: Option<String>,
    /// Attribute name to value
    #[serde(default = "empty_object")]
    pub values: Value,
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

impl StateDocument {
    /// Parse the JSON emitted by `show -json`
    pub fn parse(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse state as JSON")
    }

    /// Resources of the root module.
    ///
    /// Fails when the document has no `values`, which is what the
    /// provisioning tool reports for a directory without state.
    pub fn root_resources(&self) -> Result<&[StateResource]> {
        let values = self
            .values
            .as_ref()
            .context("State has no values; is this a Terraform working directory?")?;
        Ok(&values.root_module.resources)
    }
}

impl StateResource {
    /// Build a managed resource instance; the address is `type.name`
    #[cfg(test)]
    pub fn managed(resource_type: &str, name: &str, values: Value) -> Self {
        Self {
            address: format!("{}.{}", resource_type, name),
            mode: ResourceMode::Managed,
            resource_type: resource_type.to_string(),
            name: name.to_string(),
            provider_name: None,
            values,
        }
    }
}
