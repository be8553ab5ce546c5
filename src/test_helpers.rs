//! Test helpers for building schemas, catalogs and provisioning tool output
//!
//! Builders keep schema fixtures short; the JSON constants mirror what
//! `terraform providers schema -json` and `terraform show -json` print.

#![cfg(test)]

use crate::tfjson::schema::{ProviderSchema, ProviderSchemas, ResourceSchema};
use crate::tfjson::{NestedBlock, SchemaAttribute, SchemaBlock, SchemaCatalog};

/// Builder for a schema block
#[derive(Default)]
pub struct SchemaBuilder {
    block: SchemaBlock,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a user-settable attribute
    pub fn attribute(mut self, name: &str) -> Self {
        self.block
            .attributes
            .insert(name.to_string(), SchemaAttribute::settable());
        self
    }

    /// Add a provider-computed attribute
    pub fn computed(mut self, name: &str) -> Self {
        self.block
            .attributes
            .insert(name.to_string(), SchemaAttribute::computed());
        self
    }

    /// Add a nested block type
    pub fn block(mut self, name: &str, nested: SchemaBuilder) -> Self {
        self.block
            .block_types
            .insert(name.to_string(), NestedBlock::list(nested.build()));
        self
    }

    pub fn build(self) -> SchemaBlock {
        self.block
    }
}

/// Builder for a schema catalog spanning several providers
#[derive(Default)]
pub struct CatalogBuilder {
    schemas: ProviderSchemas,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a resource type under a provider address
    pub fn resource(mut self, provider: &str, resource_type: &str, schema: SchemaBuilder) -> Self {
        self.schemas
            .provider_schemas
            .entry(provider.to_string())
            .or_insert_with(ProviderSchema::default)
            .resource_schemas
            .insert(
                resource_type.to_string(),
                ResourceSchema {
                    version: 0,
                    block: schema.build(),
                },
            );
        self
    }

    pub fn build(self) -> SchemaCatalog {
        SchemaCatalog::new(self.schemas)
    }
}

/// `providers schema -json` output declaring `aws_instance` and `aws_s3_bucket`
pub const SCHEMA_JSON: &str = r#"{
  "format_version": "1.0",
  "provider_schemas": {
    "registry.terraform.io/hashicorp/aws": {
      "resource_schemas": {
        "aws_instance": {
          "version": 1,
          "block": {
            "attributes": {
              "id": {"type": "string", "optional": true, "computed": true},
              "name": {"type": "string", "optional": true},
              "tags": {"type": ["map", "string"], "optional": true}
            },
            "block_types": {
              "tag": {
                "nesting_mode": "list",
                "block": {
                  "attributes": {
                    "key": {"type": "string", "required": true},
                    "value": {"type": "string", "required": true}
                  }
                }
              }
            }
          }
        },
        "aws_s3_bucket": {
          "version": 0,
          "block": {
            "attributes": {
              "arn": {"type": "string", "computed": true},
              "bucket": {"type": "string", "optional": true}
            }
          }
        }
      }
    }
  }
}"#;

/// `show -json` output with two managed resources and one data source
pub const STATE_JSON: &str = r#"{
  "format_version": "1.0",
  "terraform_version": "1.6.0",
  "values": {
    "root_module": {
      "resources": [
        {
          "address": "aws_instance.web",
          "mode": "managed",
          "type": "aws_instance",
          "name": "web",
          "provider_name": "registry.terraform.io/hashicorp/aws",
          "values": {
            "id": "i-123",
            "name": "web-1",
            "tags": {"env": "prod"},
            "tag": [{"key": "env", "value": "prod"}]
          }
        },
        {
          "address": "aws_s3_bucket.logs",
          "mode": "managed",
          "type": "aws_s3_bucket",
          "name": "logs",
          "provider_name": "registry.terraform.io/hashicorp/aws",
          "values": {"arn": "arn:aws:s3:::logs", "bucket": "logs"}
        },
        {
          "address": "data.aws_s3_bucket.shared",
          "mode": "data",
          "type": "aws_s3_bucket",
          "name": "shared",
          "values": {"arn": "arn:aws:s3:::shared", "bucket": "shared"}
        }
      ]
    }
  }
}"#;

/// Expected HCL for [`STATE_JSON`] with every resource selected
pub const EXPECTED_HCL: &str = r#"resource "aws_instance" "web" {
  name = "web-1"
  tag {
    key   = "env"
    value = "prod"
  }
  tags = {
    env = "prod"
  }
}

resource "aws_s3_bucket" "logs" {
  bucket = "logs"
}
"#;
