//! HCL text serialization for generated documents
//!
//! Output follows `terraform fmt` conventions: two-space indentation, `=`
//! aligned across consecutive attributes, top-level blocks separated by a
//! blank line.

use super::body::{Attribute, Block, Body, BodyItem, Document};
use super::value::TypedValue;
use std::fmt;

const INDENT: &str = "  ";

/// Serializes documents, blocks and values to HCL
pub struct HclWriter;

impl Default for HclWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl HclWriter {
    pub fn new() -> Self {
        Self
    }

    /// Render a whole document
    pub fn render_document(&self, document: &Document) -> String {
        document
            .blocks()
            .iter()
            .map(|block| self.render_block(block, 0))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Render a block at the given nesting depth
    pub fn render_block(&self, block: &Block, depth: usize) -> String {
        let indent = INDENT.repeat(depth);
        let mut output = String::new();

        output.push_str(&indent);
        output.push_str(&block.block_type);
        for label in &block.labels {
            output.push(' ');
            output.push_str(&quote(label));
        }
        output.push_str(" {\n");
        output.push_str(&self.render_body(&block.body, depth + 1));
        output.push_str(&indent);
        output.push_str("}\n");

        output
    }

    fn render_body(&self, body: &Body, depth: usize) -> String {
        let mut output = String::new();
        let mut run: Vec<&Attribute> = Vec::new();

        for item in body.items() {
            match item {
                BodyItem::Attribute(attr) => run.push(attr),
                BodyItem::Block(block) => {
                    output.push_str(&self.render_attribute_run(&run, depth));
                    run.clear();
                    output.push_str(&self.render_block(block, depth));
                }
            }
        }
        output.push_str(&self.render_attribute_run(&run, depth));

        output
    }

    /// Render consecutive attributes with their `=` aligned
    fn render_attribute_run(&self, run: &[&Attribute], depth: usize) -> String {
        let entries: Vec<(String, &TypedValue)> = run
            .iter()
            .map(|attr| (attr.name.clone(), &attr.value))
            .collect();
        self.render_assignments(&entries, depth)
    }

    fn render_assignments(&self, entries: &[(String, &TypedValue)], depth: usize) -> String {
        let indent = INDENT.repeat(depth);
        let width = entries
            .iter()
            .map(|(key, _)| key.chars().count())
            .max()
            .unwrap_or(0);

        let mut output = String::new();
        for (key, value) in entries {
            output.push_str(&format!(
                "{}{:<width$} = {}\n",
                indent,
                key,
                self.render_value(value, depth),
                width = width
            ));
        }
        output
    }

    /// Render a value as an expression; `depth` is the indentation of the
    /// line the expression starts on
    pub fn render_value(&self, value: &TypedValue, depth: usize) -> String {
        match value {
            TypedValue::String(s) => quote(s),
            TypedValue::Integer(i) => i.to_string(),
            TypedValue::Float(f) => format_float(*f),
            TypedValue::Bool(b) => b.to_string(),
            TypedValue::List { items, .. } => self.render_list(items, depth),
            TypedValue::Map { entries, .. } => {
                if entries.is_empty() {
                    return "{}".to_string();
                }

                let keyed: Vec<(String, &TypedValue)> = entries
                    .iter()
                    .map(|(key, value)| (object_key(key), value))
                    .collect();

                format!(
                    "{{\n{}{}}}",
                    self.render_assignments(&keyed, depth + 1),
                    INDENT.repeat(depth)
                )
            }
        }
    }

    fn render_list(&self, items: &[TypedValue], depth: usize) -> String {
        if items.is_empty() {
            return "[]".to_string();
        }

        let inline = items.iter().all(|item| {
            !matches!(item, TypedValue::List { .. } | TypedValue::Map { .. })
        });

        if inline {
            let rendered: Vec<String> = items
                .iter()
                .map(|item| self.render_value(item, depth))
                .collect();
            return format!("[{}]", rendered.join(", "));
        }

        let inner = INDENT.repeat(depth + 1);
        let mut output = String::from("[\n");
        for item in items {
            output.push_str(&inner);
            output.push_str(&self.render_value(item, depth + 1));
            output.push_str(",\n");
        }
        output.push_str(&INDENT.repeat(depth));
        output.push(']');
        output
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&HclWriter::new().render_document(self))
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&HclWriter::new().render_block(self, 0))
    }
}

/// Quote a string literal, escaping characters and template sequences
pub fn quote(s: &str) -> String {
    let mut output = String::with_capacity(s.len() + 2);
    output.push('"');

    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => output.push_str("\\\\"),
            '"' => output.push_str("\\\""),
            '\n' => output.push_str("\\n"),
            '\r' => output.push_str("\\r"),
            '\t' => output.push_str("\\t"),
            '$' | '%' if chars.peek() == Some(&'{') => {
                output.push(c);
                output.push(c);
            }
            c if c.is_control() => output.push_str(&format!("\\u{:04x}", c as u32)),
            c => output.push(c),
        }
    }

    output.push('"');
    output
}

/// Check whether a string is a valid HCL identifier
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '-')
}

/// Words a bare object key must not be; `for` would open a for-expression
const RESERVED_KEYS: [&str; 6] = ["for", "if", "in", "null", "true", "false"];

fn object_key(key: &str) -> String {
    if is_identifier(key) && !RESERVED_KEYS.contains(&key) {
        key.to_string()
    } else {
        quote(key)
    }
}

fn format_float(f: f64) -> String {
    let magnitude = f.abs();
    if magnitude != 0.0 && !(1e-5..1e16).contains(&magnitude) {
        return format!("{:e}", f);
    }

    let rendered = f.to_string();
    if rendered.contains(['.', 'e', 'E']) {
        rendered
    } else {
        format!("{}.0", rendered)
    }
}
