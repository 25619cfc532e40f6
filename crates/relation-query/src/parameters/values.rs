//! Query parameter values.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::types::{ParameterDefinition, ParameterSchema};

/// A configured parameter value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ParameterValue {
    Null,
    Bool(bool),
    Integer(i64),
    Text(String),
    List(Vec<ParameterValue>),
}

impl ParameterValue {
    /// Whether this is exactly `true`.
    pub fn is_true(&self) -> bool {
        matches!(self, ParameterValue::Bool(true))
    }

    /// Convert to integer if possible. Numeric text is accepted.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ParameterValue::Integer(i) => Some(*i),
            ParameterValue::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Borrow as text.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParameterValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Extract the text items of a list value.
    pub fn as_text_list(&self) -> Vec<String> {
        match self {
            ParameterValue::List(items) => items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
            _ => Vec::new(),
        }
    }
}

impl From<bool> for ParameterValue {
    fn from(value: bool) -> Self {
        ParameterValue::Bool(value)
    }
}

impl From<i64> for ParameterValue {
    fn from(value: i64) -> Self {
        ParameterValue::Integer(value)
    }
}

impl From<i32> for ParameterValue {
    fn from(value: i32) -> Self {
        ParameterValue::Integer(i64::from(value))
    }
}

impl From<&str> for ParameterValue {
    fn from(value: &str) -> Self {
        ParameterValue::Text(value.to_string())
    }
}

impl From<String> for ParameterValue {
    fn from(value: String) -> Self {
        ParameterValue::Text(value)
    }
}

impl<T: Into<ParameterValue>> From<Vec<T>> for ParameterValue {
    fn from(values: Vec<T>) -> Self {
        ParameterValue::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<ParameterValue>> From<Option<T>> for ParameterValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(ParameterValue::Null, Into::into)
    }
}

/// The configuration of a single query: parameter name to value.
///
/// Lookups of missing parameters behave like a null value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct QueryParameters {
    values: BTreeMap<String, ParameterValue>,
}

impl QueryParameters {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter (builder style).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ParameterValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Set a parameter.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<ParameterValue>) {
        self.values.insert(name.into(), value.into());
    }

    /// Get a raw parameter value.
    pub fn get(&self, name: &str) -> Option<&ParameterValue> {
        self.values.get(name)
    }

    /// Whether the parameter is exactly `true`.
    pub fn is_true(&self, name: &str) -> bool {
        self.get(name).is_some_and(ParameterValue::is_true)
    }

    /// Integer value of a parameter.
    pub fn integer(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(ParameterValue::as_i64)
    }

    /// Text value of a parameter.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(ParameterValue::as_str)
    }

    /// Text items of a list parameter.
    pub fn text_list(&self, name: &str) -> Vec<String> {
        self.get(name)
            .map(ParameterValue::as_text_list)
            .unwrap_or_default()
    }

    /// Number of parameters set.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if no parameter is set.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Fill parameters missing from this set with the schema's declared defaults.
    pub fn with_defaults(&self, schema: &ParameterSchema) -> Self {
        let mut merged = self.clone();
        for definition in schema.definitions() {
            merged.fill_default(definition);
        }
        merged
    }

    fn fill_default(&mut self, definition: &ParameterDefinition) {
        if let Some(default) = &definition.default_value
            && !self.values.contains_key(&definition.name)
        {
            self.values.insert(definition.name.clone(), default.clone());
        }
        for child in &definition.children {
            self.fill_default(child);
        }
    }
}
