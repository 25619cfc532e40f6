//! Relation list query types for page layout blocks.
//!
//! This crate provides:
//! - `RelationListQueryHandler`: locations of the content a relation list field points at
//! - `ReverseRelationListQueryHandler`: locations of the content pointing at the selected content
//! - `QueryTypeRegistry`: query type declarations mapped onto handler implementations
//! - The value, search and parameter models the handlers exchange with the host repository

pub mod config;
pub mod error;
pub mod handler;
pub mod parameters;
pub mod registry;
pub mod repository;
pub mod search;

pub use config::{HandlerSettings, Profile};
pub use error::{ConfigError, HandlerError, HandlerResult, RepositoryError, SearchError};
pub use handler::{
    FieldRelations, QueryTypeHandler, RelationListQueryHandler, RelationQueryHandler,
    RelationSource, ReverseRelationListQueryHandler, ReverseRelations, SortType,
};
pub use parameters::{ParameterValue, QueryParameters};
pub use registry::QueryTypeRegistry;
pub use repository::Repository;
