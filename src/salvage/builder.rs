//! Schema-guided block generation
//!
//! Walks a resource's schema block and its state values in lockstep. Every
//! state entry must be declared by the schema, either as an attribute or as
//! a nested block type; anything else means the state and schema disagree.

use super::error::SalvageError;
use crate::hcl::{to_typed_value, Block};
use crate::tfjson::SchemaBlock;
use serde_json::Value;

/// Build the body of a block from its schema and state values.
///
/// `path` holds the names of the ancestor blocks and is only used for error
/// reporting. The returned block carries no labels.
pub fn build_block(
    path: &[String],
    block_type: &str,
    schema: &SchemaBlock,
    state: &Value,
) -> Result<Block, SalvageError> {
    let mut path = path.to_vec();
    path.push(block_type.to_string());

    let attributes = state
        .as_object()
        .ok_or_else(|| SalvageError::UnexpectedShape {
            path: dotted(&path),
            expected: "object",
            found: shape_name(state),
        })?;

    let mut block = Block::new(block_type);

    for (name, value) in attributes {
        if let Some(attribute) = schema.attribute(name) {
            // Computed values belong to the provider; unset ones add nothing
            if attribute.computed || value.is_null() {
                continue;
            }

            let typed = to_typed_value(value).map_err(|source| {
                SalvageError::UnconvertibleValue {
                    path: dotted_with(&path, name),
                    source,
                }
            })?;
            block.body.set_attribute(name.as_str(), typed);
        } else if let Some(nested) = schema.nested_block(name) {
            let instances = match value {
                Value::Null => continue,
                Value::Array(instances) => instances,
                other => {
                    return Err(SalvageError::UnexpectedShape {
                        path: dotted_with(&path, name),
                        expected: "array of blocks",
                        found: shape_name(other),
                    });
                }
            };

            for instance in instances {
                let child = build_block(&path, name, &nested.block, instance)?;
                block.body.append_block(child);
            }
        } else {
            return Err(SalvageError::SchemaMismatch {
                path: dotted_with(&path, name),
            });
        }
    }

    Ok(block)
}

fn dotted(path: &[String]) -> String {
    path.join(".")
}

fn dotted_with(path: &[String], name: &str) -> String {
    format!("{}.{}", dotted(path), name)
}

fn shape_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hcl::{TypeConversionError, TypedValue};
    use crate::test_helpers::SchemaBuilder;
    use serde_json::json;

    fn web_schema() -> SchemaBlock {
        SchemaBuilder::new()
            .attribute("name")
            .computed("id")
            .block(
                "tag",
                SchemaBuilder::new().attribute("key").attribute("value"),
            )
            .build()
    }

    fn string(s: &str) -> TypedValue {
        TypedValue::String(s.to_string())
    }

    #[test]
    fn test_build_web_instance() {
        let state = json!({
            "name": "web-1",
            "id": "i-123",
            "tag": [{"key": "env", "value": "prod"}]
        });

        let block = build_block(&[], "resource", &web_schema(), &state).unwrap();

        assert_eq!(block.block_type, "resource");
        assert!(block.labels.is_empty());
        assert_eq!(block.body.attribute("name"), Some(&string("web-1")));
        assert_eq!(block.body.attribute("id"), None);

        let tags: Vec<_> = block.body.blocks_of_type("tag").collect();
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].body.attribute("key"), Some(&string("env")));
        assert_eq!(tags[0].body.attribute("value"), Some(&string("prod")));
    }

    #[test]
    fn test_computed_attributes_never_emitted() {
        let schema = SchemaBuilder::new()
            .computed("id")
            .computed("arn")
            .attribute("name")
            .build();
        let state = json!({"id": "i-1", "arn": "arn:aws:::x", "name": "x"});

        let block = build_block(&[], "resource", &schema, &state).unwrap();

        let names: Vec<_> = block.body.attributes().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["name"]);
    }

    #[test]
    fn test_attribute_value_equals_typed_conversion() {
        let schema = SchemaBuilder::new()
            .attribute("tags")
            .attribute("ports")
            .attribute("enabled")
            .build();
        let state = json!({
            "tags": {"env": "prod", "team": "core"},
            "ports": [80, 443],
            "enabled": true
        });

        let block = build_block(&[], "resource", &schema, &state).unwrap();

        for name in ["tags", "ports", "enabled"] {
            assert_eq!(
                block.body.attribute(name),
                Some(&to_typed_value(&state[name]).unwrap()),
                "attribute {}",
                name
            );
        }
    }

    #[test]
    fn test_nested_instances_keep_order() {
        let state = json!({
            "name": "web-1",
            "tag": [
                {"key": "c", "value": "3"},
                {"key": "a", "value": "1"},
                {"key": "b", "value": "2"}
            ]
        });

        let block = build_block(&[], "resource", &web_schema(), &state).unwrap();

        let keys: Vec<_> = block
            .body
            .blocks_of_type("tag")
            .map(|b| b.body.attribute("key").cloned())
            .collect();
        assert_eq!(
            keys,
            vec![Some(string("c")), Some(string("a")), Some(string("b"))]
        );
    }

    #[test]
    fn test_deeply_nested_blocks() {
        let schema = SchemaBuilder::new()
            .block(
                "rule",
                SchemaBuilder::new()
                    .attribute("priority")
                    .block("action", SchemaBuilder::new().attribute("type")),
            )
            .build();
        let state = json!({
            "rule": [{"priority": 1, "action": [{"type": "forward"}]}]
        });

        let block = build_block(&[], "resource", &schema, &state).unwrap();

        let rule = block.body.blocks_of_type("rule").next().unwrap();
        assert_eq!(rule.body.attribute("priority"), Some(&TypedValue::Integer(1)));
        let action = rule.body.blocks_of_type("action").next().unwrap();
        assert_eq!(action.body.attribute("type"), Some(&string("forward")));
    }

    #[test]
    fn test_unknown_name_is_schema_mismatch() {
        let state = json!({"name": "web-1", "bogus": 1});

        let err = build_block(&[], "resource", &web_schema(), &state).unwrap_err();

        assert_eq!(
            err,
            SalvageError::SchemaMismatch {
                path: "resource.bogus".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_name_in_nested_block_reports_full_path() {
        let state = json!({"tag": [{"key": "env", "colour": "red"}]});

        let err = build_block(&[], "resource", &web_schema(), &state).unwrap_err();

        assert_eq!(err.path(), Some("resource.tag.colour"));
    }

    #[test]
    fn test_empty_nested_list_emits_no_blocks() {
        let state = json!({"name": "web-1", "tag": []});

        let block = build_block(&[], "resource", &web_schema(), &state).unwrap();

        assert_eq!(block.body.blocks_of_type("tag").count(), 0);
        assert_eq!(block.body.items().len(), 1);
    }

    #[test]
    fn test_null_nested_block_is_skipped() {
        let state = json!({"name": "web-1", "tag": null});

        let block = build_block(&[], "resource", &web_schema(), &state).unwrap();

        assert_eq!(block.body.blocks_of_type("tag").count(), 0);
    }

    #[test]
    fn test_null_attribute_is_skipped() {
        let state = json!({"name": null});

        let block = build_block(&[], "resource", &web_schema(), &state).unwrap();

        assert!(block.body.is_empty());
    }

    #[test]
    fn test_nested_block_must_be_array() {
        let state = json!({"tag": {"key": "env", "value": "prod"}});

        let err = build_block(&[], "resource", &web_schema(), &state).unwrap_err();

        assert_eq!(
            err,
            SalvageError::UnexpectedShape {
                path: "resource.tag".to_string(),
                expected: "array of blocks",
                found: "object",
            }
        );
    }

    #[test]
    fn test_state_must_be_object() {
        let err = build_block(&[], "resource", &web_schema(), &json!(["x"])).unwrap_err();
        assert!(matches!(
            err,
            SalvageError::UnexpectedShape { found: "array", .. }
        ));

        let err = build_block(&[], "resource", &web_schema(), &json!({"tag": ["x"]})).unwrap_err();
        assert_eq!(err.path(), Some("resource.tag"));
    }

    #[test]
    fn test_unconvertible_attribute_fails() {
        let schema = SchemaBuilder::new().attribute("mixed").build();
        let state = json!({"mixed": [1, "a"]});

        let err = build_block(&[], "resource", &schema, &state).unwrap_err();

        match err {
            SalvageError::UnconvertibleValue { path, source } => {
                assert_eq!(path, "resource.mixed");
                assert!(matches!(
                    source,
                    TypeConversionError::ListElementMismatch { index: 1, .. }
                ));
            }
            other => panic!("expected UnconvertibleValue, got {:?}", other),
        }
    }

    #[test]
    fn test_attribute_takes_precedence_over_block() {
        let mut schema = SchemaBuilder::new()
            .block("tag", SchemaBuilder::new().attribute("key"))
            .build();
        schema
            .attributes
            .insert("tag".to_string(), crate::tfjson::SchemaAttribute::settable());
        let state = json!({"tag": ["a", "b"]});

        let block = build_block(&[], "resource", &schema, &state).unwrap();

        assert_eq!(
            block.body.attribute("tag"),
            Some(&to_typed_value(&json!(["a", "b"])).unwrap())
        );
    }

    #[test]
    fn test_path_prefix_is_preserved() {
        let err = build_block(
            &["module".to_string()],
            "resource",
            &web_schema(),
            &json!({"bogus": true}),
        )
        .unwrap_err();
        assert_eq!(err.path(), Some("module.resource.bogus"));
    }
}
