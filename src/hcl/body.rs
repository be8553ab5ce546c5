//! Output model for generated configuration: blocks, bodies and documents

use super::value::TypedValue;

/// Attribute assignment inside a body
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub value: TypedValue,
}

/// Item of a block body, in the order it was added
#[derive(Debug, Clone, PartialEq)]
pub enum BodyItem {
    Attribute(Attribute),
    Block(Block),
}

/// Body of a block: attributes and nested blocks
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Body {
    items: Vec<BodyItem>,
}

impl Body {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute, replacing any existing attribute with the same name
    pub fn set_attribute(&mut self, name: impl Into<String>, value: TypedValue) {
        let name = name.into();

        for item in &mut self.items {
            if let BodyItem::Attribute(existing) = item {
                if existing.name == name {
                    existing.value = value;
                    return;
                }
            }
        }

        self.items.push(BodyItem::Attribute(Attribute { name, value }));
    }

    /// Append a nested block
    pub fn append_block(&mut self, block: Block) {
        self.items.push(BodyItem::Block(block));
    }

    /// Get an attribute value by name
    pub fn attribute(&self, name: &str) -> Option<&TypedValue> {
        self.items.iter().find_map(|item| match item {
            BodyItem::Attribute(attr) if attr.name == name => Some(&attr.value),
            _ => None,
        })
    }

    /// Iterate over the attributes in insertion order
    pub fn attributes(&self) -> impl Iterator<Item = &Attribute> {
        self.items.iter().filter_map(|item| match item {
            BodyItem::Attribute(attr) => Some(attr),
            BodyItem::Block(_) => None,
        })
    }

    /// Iterate over the nested blocks of the given type, in insertion order
    pub fn blocks_of_type<'a>(&'a self, block_type: &'a str) -> impl Iterator<Item = &'a Block> {
        self.items.iter().filter_map(move |item| match item {
            BodyItem::Block(block) if block.block_type == block_type => Some(block),
            _ => None,
        })
    }

    pub fn items(&self) -> &[BodyItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Configuration block such as `resource "aws_instance" "web" { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub block_type: String,
    pub labels: Vec<String>,
    pub body: Body,
}

impl Block {
    /// Create an unlabeled block with an empty body
    pub fn new(block_type: impl Into<String>) -> Self {
        Self {
            block_type: block_type.into(),
            labels: Vec::new(),
            body: Body::new(),
        }
    }

    /// Replace the block labels
    pub fn set_labels<I, S>(&mut self, labels: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = labels.into_iter().map(Into::into).collect();
    }
}

/// Ordered collection of top-level blocks
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    blocks: Vec<Block>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append_block(&mut self, block: Block) {
        self.blocks.push(block);
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
