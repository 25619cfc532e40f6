//! Query parameters.
//!
//! - `QueryParameters`: per-invocation configuration values
//! - `ParameterDefinition` / `ParameterSchema`: the declared, typed options
//! - `ParameterBuilder`: the contract handlers declare their options through

mod types;
mod values;

pub use types::{
    ChoiceOption, GROUP_ADVANCED, ParameterBuilder, ParameterDefinition, ParameterSchema,
    ParameterType,
};
pub use values::{ParameterValue, QueryParameters};
