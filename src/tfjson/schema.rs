use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Output of `terraform providers schema -json`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderSchemas {
    #[serde(default)]
    pub format_version: Option<String>,

    /// Provider schemas keyed by provider address
    /// (e.g. `registry.terraform.io/hashicorp/aws`)
    #[serde(default)]
    pub provider_schemas: BTreeMap<String, ProviderSchema>,
}

/// Schema of a single provider
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderSchema {
    #[serde(default)]
    pub resource_schemas: BTreeMap<String, ResourceSchema>,

    #[serde(default)]
    pub data_source_schemas: BTreeMap<String, ResourceSchema>,
}

/// Schema of a resource type
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResourceSchema {
    #[serde(default)]
    pub version: u64,
    #[serde(default)]
    pub block: SchemaBlock,
}

/// A block type: its attributes and nested block types
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SchemaBlock {
    #[serde(default)]
    pub attributes: BTreeMap<String, SchemaAttribute>,

    /// Nested block types keyed by block type name
    #[serde(default)]
    pub block_types: BTreeMap<String, NestedBlock>,
}

impl SchemaBlock {
    pub fn attribute(&self, name: &str) -> Option<&SchemaAttribute> {
        self.attributes.get(name)
    }

    pub fn nested_block(&self, name: &str) -> Option<&NestedBlock> {
        self.block_types.get(name)
    }
}

/// Attribute descriptor
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SchemaAttribute {
    /// Type constraint, e.g. `"string"` or `["map", "string"]`
    #[serde(rename = "type", default)]
    pub attribute_type: Option<Value>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub optional: bool,
    /// Assigned by the provider. Computed attributes are never written back.
    #[serde(default)]
    pub computed: bool,
    #[serde(default)]
    pub sensitive: bool,
}

impl SchemaAttribute {
    /// Non-computed attribute with no type constraint
    #[cfg(test)]
    pub fn settable() -> Self {
        Self {
            optional: true,
            ..Self::default()
        }
    }

    /// Provider-assigned attribute
    #[cfg(test)]
    pub fn computed() -> Self {
        Self {
            computed: true,
            ..Self::default()
        }
    }
}

/// How instances of a nested block are collected
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NestingMode {
    Single,
    Group,
    #[default]
    List,
    Set,
    Map,
}

/// Nested block type descriptor
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NestedBlock {
    #[serde(default)]
    pub nesting_mode: NestingMode,
    #[serde(default)]
    pub block: SchemaBlock,
    #[serde(default)]
    pub min_items: Option<u64>,
    #[serde(default)]
    pub max_items: Option<u64>,
}

impl NestedBlock {
    #[cfg(test)]
    pub fn list(block: SchemaBlock) -> Self {
        Self {
            nesting_mode: NestingMode::List,
            block,
            min_items: None,
            max_items: None,
        }
    }
}

/// Resource schemas of all loaded providers, indexed by resource type
#[derive(Debug, Clone, Default)]
pub struct SchemaCatalog {
    schemas: ProviderSchemas,
}

impl SchemaCatalog {
    pub fn new(schemas: ProviderSchemas) -> Self {
        Self { schemas }
    }

    /// Parse the JSON emitted by `providers schema -json`
    pub fn parse(json: &str) -> Result<Self> {
        let schemas: ProviderSchemas =
            serde_json::from_str(json).context("Failed to parse provider schemas as JSON")?;
        Ok(Self::new(schemas))
    }

    /// Find the schema for a resource type.
    ///
    /// Providers are searched in address order and the first match wins;
    /// use [`SchemaCatalog::providers_for`] to detect ambiguous types.
    pub fn lookup(&self, resource_type: &str) -> Option<&ResourceSchema> {
        self.schemas
            .provider_schemas
            .values()
            .find_map(|provider| provider.resource_schemas.get(resource_type))
    }

    /// Addresses of all providers declaring the resource type
    pub fn providers_for(&self, resource_type: &str) -> Vec<&str> {
        self.schemas
            .provider_schemas
            .iter()
            .filter(|(_, provider)| provider.resource_schemas.contains_key(resource_type))
            .map(|(address, _)| address.as_str())
            .collect()
    }

    /// Number of providers in the catalog
    pub fn provider_count(&self) -> usize {
        self.schemas.provider_schemas.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEMAS: &str = r#"{
        "format_version": "1.0",
        "provider_schemas": {
            "registry.terraform.io/hashicorp/aws": {
                "provider": {"version": 0, "block": {}},
                "resource_schemas": {
                    "aws_instance": {
                        "version": 1,
                        "block": {
                            "attributes": {
                                "ami": {"type": "string", "optional": true},
                                "id": {"type": "string", "optional": true, "computed": true},
                                "tags": {"type": ["map", "string"], "optional": true}
                            },
                            "block_types": {
                                "ebs_block_device": {
                                    "nesting_mode": "set",
                                    "block": {
                                        "attributes": {
                                            "device_name": {"type": "string", "required": true}
                                        }
                                    }
                                }
                            },
                            "description_kind": "plain"
                        }
                    }
                }
            },
            "registry.terraform.io/other/aws": {
                "resource_schemas": {
                    "aws_instance": {"version": 0, "block": {}}
                }
            }
        }
    }"#;

    #[test]
    fn test_parse_provider_schemas() {
        let catalog = SchemaCatalog::parse(SCHEMAS).unwrap();
        assert_eq!(catalog.provider_count(), 2);

        let schema = catalog.lookup("aws_instance").unwrap();
        assert_eq!(schema.version, 1);
        assert!(schema.block.attribute("id").unwrap().computed);
        assert!(!schema.block.attribute("ami").unwrap().computed);

        let ebs = schema.block.nested_block("ebs_block_device").unwrap();
        assert_eq!(ebs.nesting_mode, NestingMode::Set);
        assert!(ebs.block.attribute("device_name").unwrap().required);
    }

    #[test]
    fn test_lookup_first_match_in_address_order() {
        let catalog = SchemaCatalog::parse(SCHEMAS).unwrap();
        assert_eq!(
            catalog.providers_for("aws_instance"),
            vec![
                "registry.terraform.io/hashicorp/aws",
                "registry.terraform.io/other/aws"
            ]
        );
        // hashicorp sorts first, so its schema (version 1) wins
        assert_eq!(catalog.lookup("aws_instance").unwrap().version, 1);
    }

    #[test]
    fn test_lookup_unknown_type() {
        let catalog = SchemaCatalog::parse(SCHEMAS).unwrap();
        assert!(catalog.lookup("google_compute_instance").is_none());
        assert!(catalog.providers_for("google_compute_instance").is_empty());
    }

    #[test]
    fn test_parse_invalid_json() {
        assert!(SchemaCatalog::parse("not json").is_err());
    }
}
