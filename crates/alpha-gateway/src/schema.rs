//! Declared output shapes for schema-constrained replies.
//!
//! Serializes to the OpenAPI subset the generate-content endpoint accepts
//! under `generationConfig.responseSchema`.

use serde::Serialize;
use std::collections::BTreeMap;

/// Primitive or container type of a schema node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SchemaType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
}

/// One node of a declared output schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schema {
    #[serde(rename = "type")]
    pub kind: SchemaType,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, Schema>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    #[serde(rename = "enum", skip_serializing_if = "Vec::is_empty")]
    pub allowed: Vec<String>,
}

impl Schema {
    fn leaf(kind: SchemaType) -> Self {
        Self {
            kind,
            properties: BTreeMap::new(),
            items: None,
            required: Vec::new(),
            allowed: Vec::new(),
        }
    }

    pub fn string() -> Self {
        Self::leaf(SchemaType::String)
    }

    pub fn number() -> Self {
        Self::leaf(SchemaType::Number)
    }

    /// A string restricted to the given values.
    pub fn one_of(values: &[&str]) -> Self {
        Self {
            allowed: values.iter().map(|v| v.to_string()).collect(),
            ..Self::leaf(SchemaType::String)
        }
    }

    pub fn array(items: Schema) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::leaf(SchemaType::Array)
        }
    }

    /// An object with the given properties, of which `required` must be present.
    pub fn object(properties: Vec<(&str, Schema)>, required: &[&str]) -> Self {
        Self {
            properties: properties
                .into_iter()
                .map(|(name, schema)| (name.to_string(), schema))
                .collect(),
            required: required.iter().map(|r| r.to_string()).collect(),
            ..Self::leaf(SchemaType::Object)
        }
    }
}
