//! Parameter definitions and the builder contract.

use serde::{Deserialize, Serialize};

use super::values::{ParameterValue, QueryParameters};

/// Group holding parameters shown under "advanced" in the admin UI.
pub const GROUP_ADVANCED: &str = "advanced";

/// A labelled choice option.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChoiceOption {
    pub label: String,
    pub value: String,
}

/// Parameter types with type-specific options.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ParameterType {
    Boolean,
    /// Boolean toggle owning child parameters. With `reverse`, the children
    /// apply while the toggle is off.
    CompoundBoolean {
        #[serde(default)]
        reverse: bool,
    },
    Choice {
        options: Vec<ChoiceOption>,
        #[serde(default)]
        multiple: bool,
    },
    TextLine,
    Integer {
        #[serde(default)]
        min: Option<i64>,
    },
    /// Location picker.
    Location {
        #[serde(default)]
        allow_invalid: bool,
    },
    /// Content type picker.
    ContentType {
        #[serde(default)]
        multiple: bool,
    },
}

impl ParameterType {
    /// Single-value choice from `(label, value)` pairs.
    pub fn choice<'a>(options: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        ParameterType::Choice {
            options: options
                .into_iter()
                .map(|(label, value)| ChoiceOption {
                    label: label.to_string(),
                    value: value.to_string(),
                })
                .collect(),
            multiple: false,
        }
    }

    /// Values allowed by a choice type; empty for any other type.
    pub fn choice_values(&self) -> Vec<&str> {
        match self {
            ParameterType::Choice { options, .. } => {
                options.iter().map(|o| o.value.as_str()).collect()
            }
            _ => Vec::new(),
        }
    }
}

/// A single parameter declaration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParameterDefinition {
    pub name: String,

    #[serde(flatten)]
    pub parameter_type: ParameterType,

    #[serde(default)]
    pub required: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<ParameterValue>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<String>,

    /// Child parameters of a compound parameter.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ParameterDefinition>,
}

impl ParameterDefinition {
    pub fn new(name: impl Into<String>, parameter_type: ParameterType) -> Self {
        Self {
            name: name.into(),
            parameter_type,
            required: false,
            default_value: None,
            groups: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn default_value(mut self, value: impl Into<ParameterValue>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Place the parameter in the given groups.
    pub fn groups<I, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.groups = groups.into_iter().map(Into::into).collect();
        self
    }

    /// Add a child parameter.
    pub fn child(mut self, definition: ParameterDefinition) -> Self {
        self.children.push(definition);
        self
    }

    /// Find this parameter or one of its descendants by name.
    pub fn find(&self, name: &str) -> Option<&ParameterDefinition> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(name))
    }
}

/// Receives parameter declarations from a query type handler.
pub trait ParameterBuilder {
    fn add(&mut self, definition: ParameterDefinition);
}

/// Ordered collection of parameter declarations.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ParameterSchema {
    definitions: Vec<ParameterDefinition>,
}

impl ParameterBuilder for ParameterSchema {
    fn add(&mut self, definition: ParameterDefinition) {
        self.definitions.push(definition);
    }
}

impl ParameterSchema {
    /// Top-level definitions in declaration order.
    pub fn definitions(&self) -> &[ParameterDefinition] {
        &self.definitions
    }

    /// Find a definition at any depth.
    pub fn get(&self, name: &str) -> Option<&ParameterDefinition> {
        self.definitions.iter().find_map(|d| d.find(name))
    }

    /// Names of all definitions, depth first.
    pub fn names(&self) -> Vec<&str> {
        fn collect<'a>(definitions: &'a [ParameterDefinition], names: &mut Vec<&'a str>) {
            for d in definitions {
                names.push(&d.name);
                collect(&d.children, names);
            }
        }

        let mut names = Vec::new();
        collect(&self.definitions, &mut names);
        names
    }

    /// Parameter set holding only the declared defaults.
    pub fn defaults(&self) -> QueryParameters {
        QueryParameters::new().with_defaults(self)
    }
}
