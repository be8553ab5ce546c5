use super::builder::build_block;
use super::error::SalvageError;
use crate::hcl::Document;
use crate::tfjson::{ResourceMode, SchemaCatalog, StateResource};

/// Result of salvaging a set of resources
#[derive(Debug, Default)]
pub struct SalvageReport {
    pub document: Document,
    /// Addresses of data sources that were skipped
    pub skipped: Vec<String>,
    /// Resource types declared by more than one provider, with the providers
    /// in lookup order (the first one was used)
    pub ambiguous: Vec<(String, Vec<String>)>,
}

/// Generate a `resource` block for every managed resource, in input order.
///
/// The first error aborts generation; no partial document is returned.
pub fn generate_document<'a, I>(
    catalog: &SchemaCatalog,
    resources: I,
) -> Result<SalvageReport, SalvageError>
where
    I: IntoIterator<Item = &'a StateResource>,
{
    let mut report = SalvageReport::default();

    for resource in resources {
        if resource.mode != ResourceMode::Managed {
            report.skipped.push(resource.address.clone());
            continue;
        }

        let schema = catalog
            .lookup(&resource.resource_type)
            .ok_or_else(|| SalvageError::UnknownResourceType(resource.resource_type.clone()))?;

        let providers = catalog.providers_for(&resource.resource_type);
        if providers.len() > 1
            && !report
                .ambiguous
                .iter()
                .any(|(resource_type, _)| resource_type == &resource.resource_type)
        {
            report.ambiguous.push((
                resource.resource_type.clone(),
                providers.into_iter().map(str::to_string).collect(),
            ));
        }

        let mut block = build_block(&[], "resource", &schema.block, &resource.values).map_err(
            |source| SalvageError::InResource {
                address: resource.address.clone(),
                source: Box::new(source),
            },
        )?;
        block.set_labels([resource.resource_type.as_str(), resource.name.as_str()]);
        report.document.append_block(block);
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{CatalogBuilder, SchemaBuilder};
    use serde_json::json;

    fn catalog() -> SchemaCatalog {
        CatalogBuilder::new()
            .resource(
                "registry.terraform.io/hashicorp/aws",
                "aws_instance",
                SchemaBuilder::new()
                    .attribute("name")
                    .computed("id")
                    .block("tag", SchemaBuilder::new().attribute("key").attribute("value")),
            )
            .resource(
                "registry.terraform.io/hashicorp/aws",
                "aws_s3_bucket",
                SchemaBuilder::new().attribute("bucket"),
            )
            .build()
    }

    #[test]
    fn test_blocks_labeled_in_input_order() {
        let resources = vec![
            StateResource::managed("aws_s3_bucket", "logs", json!({"bucket": "logs"})),
            StateResource::managed(
                "aws_instance",
                "web",
                json!({"name": "web-1", "id": "i-123", "tag": [{"key": "env", "value": "prod"}]}),
            ),
        ];

        let report = generate_document(&catalog(), &resources).unwrap();

        let labels: Vec<_> = report
            .document
            .blocks()
            .iter()
            .map(|b| b.labels.clone())
            .collect();
        assert_eq!(
            labels,
            vec![
                vec!["aws_s3_bucket".to_string(), "logs".to_string()],
                vec!["aws_instance".to_string(), "web".to_string()],
            ]
        );
        assert!(report.document.blocks().iter().all(|b| b.block_type == "resource"));
        assert!(report.skipped.is_empty());
        assert!(report.ambiguous.is_empty());
    }

    #[test]
    fn test_web_instance_renders() {
        let resources = vec![StateResource::managed(
            "aws_instance",
            "web",
            json!({"name": "web-1", "id": "i-123", "tag": [{"key": "env", "value": "prod"}]}),
        )];

        let report = generate_document(&catalog(), &resources).unwrap();

        assert_eq!(
            report.document.to_string(),
            "resource \"aws_instance\" \"web\" {\n  name = \"web-1\"\n  tag {\n    key   = \"env\"\n    value = \"prod\"\n  }\n}\n"
        );
    }

    #[test]
    fn test_data_sources_are_skipped() {
        let mut data = StateResource::managed("aws_ami", "ubuntu", json!({"id": "ami-1"}));
        data.mode = ResourceMode::Data;
        data.address = "data.aws_ami.ubuntu".to_string();

        let report = generate_document(&catalog(), [&data]).unwrap();

        assert!(report.document.is_empty());
        assert_eq!(report.skipped, vec!["data.aws_ami.ubuntu"]);
    }

    #[test]
    fn test_unknown_resource_type_fails() {
        let resources = vec![StateResource::managed("google_thing", "x", json!({}))];

        let err = generate_document(&catalog(), &resources).unwrap_err();

        assert_eq!(err, SalvageError::UnknownResourceType("google_thing".to_string()));
    }

    #[test]
    fn test_build_error_names_resource() {
        let resources = vec![StateResource::managed(
            "aws_instance",
            "web",
            json!({"surprise": true}),
        )];

        let err = generate_document(&catalog(), &resources).unwrap_err();

        assert_eq!(
            err.to_string(),
            "aws_instance.web: Block schema not found: resource.surprise"
        );
    }

    #[test]
    fn test_ambiguous_types_reported_once() {
        let catalog = CatalogBuilder::new()
            .resource("registry.terraform.io/a/x", "x_thing", SchemaBuilder::new().attribute("v"))
            .resource("registry.terraform.io/b/x", "x_thing", SchemaBuilder::new())
            .build();
        let resources = vec![
            StateResource::managed("x_thing", "one", json!({"v": 1})),
            StateResource::managed("x_thing", "two", json!({"v": 2})),
        ];

        let report = generate_document(&catalog, &resources).unwrap();

        assert_eq!(report.document.len(), 2);
        assert_eq!(
            report.ambiguous,
            vec![(
                "x_thing".to_string(),
                vec![
                    "registry.terraform.io/a/x".to_string(),
                    "registry.terraform.io/b/x".to_string()
                ]
            )]
        );
    }
}
