//! Host repository seams.
//!
//! The handlers consume the host's location, content, content type and
//! search services through these traits. Implementations live in the host
//! (or in the in-memory repository used by tests and the inspect tool).

mod values;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{RepositoryError, SearchError};
use crate::search::{LocationQuery, SearchResult};

pub use values::{
    Content, ContentId, ContentInfo, ContentType, ContentTypeId, Field, FieldValue, Location,
    LocationId, Relation, RelationKind,
};

/// Location lookup.
#[async_trait]
pub trait LocationService: Send + Sync {
    /// Load a location by id, optionally scoped to a language list.
    ///
    /// Fails with `RepositoryError::NotFound` when the location does not exist
    /// or is not available in any of the given languages.
    async fn load_location(
        &self,
        id: LocationId,
        languages: Option<&[String]>,
    ) -> Result<Location, RepositoryError>;
}

/// Content lookup.
#[async_trait]
pub trait ContentService: Send + Sync {
    /// Load a content item by id, optionally scoped to a language list.
    async fn load_content(
        &self,
        id: ContentId,
        languages: Option<&[String]>,
    ) -> Result<Content, RepositoryError>;

    /// Load the relations pointing at the given content.
    async fn load_reverse_relations(
        &self,
        info: &ContentInfo,
    ) -> Result<Vec<Relation>, RepositoryError>;
}

/// Content type lookup.
#[async_trait]
pub trait ContentTypeService: Send + Sync {
    async fn load_content_type_by_identifier(
        &self,
        identifier: &str,
    ) -> Result<ContentType, RepositoryError>;
}

/// Location search.
#[async_trait]
pub trait SearchService: Send + Sync {
    /// Execute a location query with the given language list.
    async fn find_locations(
        &self,
        query: &LocationQuery,
        languages: &[String],
    ) -> Result<SearchResult<Location>, SearchError>;
}

/// Ambient "current content" of the request being rendered.
pub trait ContentProvider: Send + Sync {
    fn provide_content(&self) -> Option<Content>;
}

/// Bundle of repository services handed to the handlers.
#[derive(Clone)]
pub struct Repository {
    pub locations: Arc<dyn LocationService>,
    pub contents: Arc<dyn ContentService>,
    pub content_types: Arc<dyn ContentTypeService>,
    pub search: Arc<dyn SearchService>,
}

impl Repository {
    /// Build a bundle from a single value implementing every service.
    pub fn from_shared<R>(repository: Arc<R>) -> Self
    where
        R: LocationService + ContentService + ContentTypeService + SearchService + 'static,
    {
        Self {
            locations: repository.clone(),
            contents: repository.clone(),
            content_types: repository.clone(),
            search: repository,
        }
    }
}

impl std::fmt::Debug for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository").finish_non_exhaustive()
    }
}
