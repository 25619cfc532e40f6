//! In-memory repository for the relation list query types.
//!
//! Implements the location, content, content type and search services over
//! maps held in memory. Every location query is recorded so tests and the
//! inspect tool can show what the handlers asked the backend for.

mod fixture;
mod matcher;

use std::collections::BTreeMap;

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use tracing::{debug, trace};

use layouts_relation_query::error::{RepositoryError, SearchError};
use layouts_relation_query::repository::{
    Content, ContentId, ContentInfo, ContentProvider, ContentService, ContentType,
    ContentTypeService, FieldValue, Location, LocationId, LocationService, Relation, RelationKind,
    SearchService,
};
use layouts_relation_query::search::{LocationQuery, SearchHit, SearchResult};

pub use fixture::{FixtureContent, RepositoryFixture};
use matcher::Candidate;

#[derive(Debug, Default)]
struct Store {
    content_types: BTreeMap<String, ContentType>,
    contents: BTreeMap<ContentId, Content>,
    locations: BTreeMap<LocationId, Location>,
    relations: Vec<Relation>,
}

#[derive(Debug, Default)]
struct Failures {
    search: Option<String>,
    reverse_relations: Option<String>,
}

/// Repository services backed by in-memory maps.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    store: RwLock<Store>,
    queries: Mutex<Vec<LocationQuery>>,
    failures: Mutex<Failures>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a repository from a fixture.
    ///
    /// Relation list and relation fields produce field relations in
    /// addition to the fixture's explicit relations.
    pub fn from_fixture(fixture: RepositoryFixture) -> Result<Self> {
        let repository = Self::new();
        for content_type in &fixture.content_types {
            repository.insert_content_type(content_type.clone());
        }
        for content in fixture.contents {
            repository.insert_content(content.into_content(&fixture.content_types)?);
        }
        for location in fixture.locations {
            repository.insert_location(location)?;
        }
        for relation in fixture.relations {
            repository.insert_relation(relation);
        }

        debug!(
            contents = repository.store.read().contents.len(),
            locations = repository.store.read().locations.len(),
            "repository fixture loaded"
        );
        Ok(repository)
    }

    pub fn insert_content_type(&self, content_type: ContentType) {
        self.store
            .write()
            .content_types
            .insert(content_type.identifier.clone(), content_type);
    }

    /// Insert content, recording field relations for its relation fields.
    pub fn insert_content(&self, content: Content) {
        let mut store = self.store.write();
        let source = content.id();
        store
            .relations
            .retain(|r| !(r.source_content_id == source && r.kind == RelationKind::Field));

        for field in &content.fields {
            let destinations: Vec<ContentId> = match &field.value {
                FieldValue::RelationList {
                    destination_content_ids,
                } => destination_content_ids.clone(),
                FieldValue::Relation {
                    destination_content_id: Some(id),
                } => vec![*id],
                _ => continue,
            };

            for destination in destinations {
                let relation = Relation {
                    source_content_id: source,
                    destination_content_id: destination,
                    field_identifier: Some(field.identifier.clone()),
                    kind: RelationKind::Field,
                };
                // One relation per field, not per translation.
                if !store.relations.contains(&relation) {
                    store.relations.push(relation);
                }
            }
        }

        store.contents.insert(source, content);
    }

    /// Insert a location; its content must exist.
    pub fn insert_location(&self, location: Location) -> Result<()> {
        let mut store = self.store.write();
        if !store.contents.contains_key(&location.content_id) {
            return Err(anyhow!(
                "location {} references unknown content {}",
                location.id,
                location.content_id
            ));
        }
        store.locations.insert(location.id, location);
        Ok(())
    }

    pub fn insert_relation(&self, relation: Relation) {
        self.store.write().relations.push(relation);
    }

    /// Content by id, ignoring languages.
    pub fn content(&self, id: ContentId) -> Option<Content> {
        self.store.read().contents.get(&id).cloned()
    }

    /// Every location query executed so far, oldest first.
    pub fn queries(&self) -> Vec<LocationQuery> {
        self.queries.lock().clone()
    }

    /// The most recent location query.
    pub fn last_query(&self) -> Option<LocationQuery> {
        self.queries.lock().last().cloned()
    }

    pub fn clear_queries(&self) {
        self.queries.lock().clear();
    }

    /// Make subsequent searches fail with a backend error.
    pub fn fail_search(&self, message: &str) {
        self.failures.lock().search = Some(message.to_string());
    }

    /// Make subsequent reverse relation lookups fail with a backend error.
    pub fn fail_reverse_relations(&self, message: &str) {
        self.failures.lock().reverse_relations = Some(message.to_string());
    }

    pub fn clear_failures(&self) {
        *self.failures.lock() = Failures::default();
    }
}

/// Whether content is available in one of the given languages.
fn is_available(content: &Content, languages: Option<&[String]>) -> bool {
    let Some(languages) = languages.filter(|l| !l.is_empty()) else {
        return true;
    };

    languages.iter().any(|language| {
        content.info.main_language_code == *language
            || content.fields.iter().any(|f| f.language_code == *language)
    })
}

#[async_trait]
impl LocationService for MemoryRepository {
    async fn load_location(
        &self,
        id: LocationId,
        languages: Option<&[String]>,
    ) -> Result<Location, RepositoryError> {
        let store = self.store.read();
        let location = store
            .locations
            .get(&id)
            .ok_or_else(|| RepositoryError::not_found("location", id))?;

        match store.contents.get(&location.content_id) {
            Some(content) if is_available(content, languages) => Ok(location.clone()),
            _ => Err(RepositoryError::not_found("location", id)),
        }
    }
}

#[async_trait]
impl ContentService for MemoryRepository {
    async fn load_content(
        &self,
        id: ContentId,
        languages: Option<&[String]>,
    ) -> Result<Content, RepositoryError> {
        match self.store.read().contents.get(&id) {
            Some(content) if is_available(content, languages) => Ok(content.clone()),
            _ => Err(RepositoryError::not_found("content", id)),
        }
    }

    async fn load_reverse_relations(
        &self,
        info: &ContentInfo,
    ) -> Result<Vec<Relation>, RepositoryError> {
        if let Some(message) = &self.failures.lock().reverse_relations {
            return Err(RepositoryError::Backend(anyhow!(message.clone())));
        }

        Ok(self
            .store
            .read()
            .relations
            .iter()
            .filter(|r| r.destination_content_id == info.id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ContentTypeService for MemoryRepository {
    async fn load_content_type_by_identifier(
        &self,
        identifier: &str,
    ) -> Result<ContentType, RepositoryError> {
        self.store
            .read()
            .content_types
            .get(identifier)
            .cloned()
            .ok_or_else(|| RepositoryError::not_found("content type", identifier))
    }
}

#[async_trait]
impl SearchService for MemoryRepository {
    async fn find_locations(
        &self,
        query: &LocationQuery,
        languages: &[String],
    ) -> Result<SearchResult<Location>, SearchError> {
        self.queries.lock().push(query.clone());

        if let Some(message) = &self.failures.lock().search {
            return Err(SearchError::Backend(anyhow!(message.clone())));
        }

        let store = self.store.read();
        let mut candidates: Vec<Candidate<'_>> = store
            .locations
            .values()
            .filter_map(|location| {
                let content = store.contents.get(&location.content_id)?;
                is_available(content, Some(languages)).then_some(Candidate { location, content })
            })
            .filter(|candidate| matcher::matches(&query.filter, candidate))
            .collect();

        candidates.sort_by(|a, b| matcher::compare(&query.sort_clauses, a, b));

        let total = candidates.len();
        let hits: Vec<SearchHit<Location>> = candidates
            .into_iter()
            .skip(query.offset)
            .take(query.limit.unwrap_or(usize::MAX))
            .map(|candidate| SearchHit {
                value: candidate.location.clone(),
                score: None,
            })
            .collect();

        trace!(total, returned = hits.len(), "location search");

        Ok(SearchResult {
            hits,
            total_count: query.perform_count.then_some(total),
        })
    }
}

/// Content provider returning a fixed content item.
#[derive(Debug, Clone, Default)]
pub struct StaticContentProvider {
    content: Option<Content>,
}

impl StaticContentProvider {
    pub fn new(content: Option<Content>) -> Self {
        Self { content }
    }
}

impl ContentProvider for StaticContentProvider {
    fn provide_content(&self) -> Option<Content> {
        self.content.clone()
    }
}
