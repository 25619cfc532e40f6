//! Relation list query type handlers.
//!
//! One handler type, `RelationQueryHandler`, parameterized over a
//! `RelationSource`:
//! - `RelationListQueryHandler`: destination ids of a relation list field
//! - `ReverseRelationListQueryHandler`: sources of relations pointing at the content
//!
//! A query resolves the selected content, extracts its relation id list,
//! builds a location query restricted to those ids and runs it against the
//! host search. Failures resolving the selected content produce an empty
//! result, never an error.

mod options;
mod ordering;
mod schema;
mod source;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::config::{HandlerSettings, Profile};
use crate::error::HandlerResult;
use crate::parameters::{ParameterBuilder, ParameterSchema, QueryParameters};
use crate::repository::{Content, ContentId, ContentProvider, Location, Repository};
use crate::search::{Criterion, LocationQuery, MainLocation, SortClause, Visibility};

pub use options::{ContentTypeFilter, LEGACY_DEFAULT_LIMIT, Page, QueryOptions, SortType};
pub use ordering::sort_by_relation_order;
pub use source::{FieldRelations, RelationSource, ReverseRelations};

/// Contract between the layout engine and a query type.
#[async_trait]
pub trait QueryTypeHandler: Send + Sync {
    /// Declare the parameters the query type is configured with.
    fn build_parameters(&self, builder: &mut dyn ParameterBuilder);

    /// Locations for the given page of results.
    async fn get_values(
        &self,
        query: &QueryParameters,
        offset: usize,
        limit: Option<usize>,
    ) -> HandlerResult<Vec<Location>>;

    /// Total number of results.
    async fn get_count(&self, query: &QueryParameters) -> HandlerResult<usize>;

    /// Whether results depend on the content currently being rendered.
    fn is_contextual(&self, query: &QueryParameters) -> bool;
}

/// Query type handler listing the locations of related content.
pub struct RelationQueryHandler<S> {
    source: S,
    repository: Repository,
    content_provider: Arc<dyn ContentProvider>,
    settings: HandlerSettings,
    schema: ParameterSchema,
}

/// Locations of the content referenced by a relation list field.
pub type RelationListQueryHandler = RelationQueryHandler<FieldRelations>;

/// Locations of the content relating to the selected content.
pub type ReverseRelationListQueryHandler = RelationQueryHandler<ReverseRelations>;

impl RelationListQueryHandler {
    pub fn relation_list(
        repository: Repository,
        content_provider: Arc<dyn ContentProvider>,
        settings: HandlerSettings,
    ) -> Self {
        Self::new(FieldRelations, repository, content_provider, settings)
    }
}

impl ReverseRelationListQueryHandler {
    pub fn reverse_relation_list(
        repository: Repository,
        content_provider: Arc<dyn ContentProvider>,
        settings: HandlerSettings,
    ) -> Self {
        let source = ReverseRelations::new(repository.contents.clone());
        Self::new(source, repository, content_provider, settings)
    }
}

impl<S: RelationSource> RelationQueryHandler<S> {
    /// Create a handler. The parameter schema is built once, here.
    pub fn new(
        source: S,
        repository: Repository,
        content_provider: Arc<dyn ContentProvider>,
        settings: HandlerSettings,
    ) -> Self {
        let mut parameters = ParameterSchema::default();
        source.build_parameters(&mut parameters, &settings);
        schema::pagination(&mut parameters, &settings);

        Self {
            source,
            repository,
            content_provider,
            settings,
            schema: parameters,
        }
    }

    /// The relation source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Settings injected at construction.
    pub fn settings(&self) -> &HandlerSettings {
        &self.settings
    }

    /// Declared parameters.
    pub fn schema(&self) -> &ParameterSchema {
        &self.schema
    }

    /// Resolve the selected content.
    ///
    /// With `use_current_location` the ambient content is used and
    /// `location_id` is ignored. Lookup failures yield `None`.
    pub async fn selected_content(&self, params: &QueryParameters) -> Option<Content> {
        if params.is_true("use_current_location") {
            return self.content_provider.provide_content();
        }

        let location_id = params.integer("location_id")?;
        let languages = Some(self.settings.languages.as_slice());

        let location = match self
            .repository
            .locations
            .load_location(location_id, languages)
            .await
        {
            Ok(location) => location,
            Err(e) => {
                debug!(location_id, error = %e, "selected location not available");
                return None;
            }
        };

        match self
            .repository
            .contents
            .load_content(location.content_id, languages)
            .await
        {
            Ok(content) => Some(content),
            Err(e) => {
                debug!(
                    location_id,
                    content_id = location.content_id,
                    error = %e,
                    "selected content not available"
                );
                None
            }
        }
    }

    /// Selected content and its relation id list, or `None` when either is missing.
    async fn related(
        &self,
        params: &QueryParameters,
    ) -> HandlerResult<Option<(Content, Vec<ContentId>)>> {
        let Some(content) = self.selected_content(params).await else {
            return Ok(None);
        };

        let ids = self
            .source
            .related_content_ids(&content, params, &self.settings.languages)
            .await?;

        if ids.is_empty() {
            debug!(
                handler = self.source.handler_name(),
                content_id = content.id(),
                "no related content"
            );
            return Ok(None);
        }

        Ok(Some((content, ids)))
    }

    fn page(&self, params: &QueryParameters, offset: usize, limit: Option<usize>) -> Page {
        match self.settings.profile {
            Profile::Current => Page { offset, limit },
            Profile::Legacy => Page::legacy(params, offset, limit),
        }
    }

    /// Build the backend location query.
    ///
    /// `ids` must already be sliced when sorting by relation order. Without a
    /// page a count query is built.
    async fn location_query(
        &self,
        content: &Content,
        ids: Vec<ContentId>,
        options: &QueryOptions,
        page: Option<Page>,
    ) -> LocationQuery {
        let mut criteria = vec![
            Criterion::ContentId(ids),
            Criterion::Visibility(Visibility::Visible),
        ];

        if options.only_main_locations {
            criteria.push(Criterion::IsMainLocation(MainLocation::Main));
        }

        if let Some(filter) = &options.content_types {
            criteria.push(self.content_type_criterion(filter).await);
        }

        criteria.extend(self.source.extra_criteria(content, options));

        let mut query = LocationQuery {
            filter: Criterion::LogicalAnd(criteria),
            ..Default::default()
        };

        match page {
            None => query.limit = Some(0),
            // The id list is already sliced to the page.
            Some(page) if options.sort_type == SortType::DefinedByField => {
                query.limit = page.limit;
            }
            Some(page) => {
                query.offset = page.offset;
                query.limit = page.limit;
            }
        }

        if let Some(field) = options.sort_type.sort_field() {
            query.sort_clauses = vec![SortClause::new(field, options.sort_direction)];
        }

        query
    }

    async fn content_type_criterion(&self, filter: &ContentTypeFilter) -> Criterion {
        let criterion = match self.settings.profile {
            Profile::Current => Criterion::ContentTypeIdentifier(filter.identifiers.clone()),
            Profile::Legacy => {
                let mut ids = Vec::with_capacity(filter.identifiers.len());
                for identifier in &filter.identifiers {
                    match self
                        .repository
                        .content_types
                        .load_content_type_by_identifier(identifier)
                        .await
                    {
                        Ok(content_type) => ids.push(content_type.id),
                        Err(e) => {
                            debug!(identifier = %identifier, error = %e, "skipping unknown content type");
                        }
                    }
                }
                Criterion::ContentTypeId(ids)
            }
        };

        if filter.exclude {
            Criterion::not(criterion)
        } else {
            criterion
        }
    }
}

#[async_trait]
impl<S: RelationSource> QueryTypeHandler for RelationQueryHandler<S> {
    fn build_parameters(&self, builder: &mut dyn ParameterBuilder) {
        self.source.build_parameters(builder, &self.settings);
        schema::pagination(builder, &self.settings);
    }

    async fn get_values(
        &self,
        query: &QueryParameters,
        offset: usize,
        limit: Option<usize>,
    ) -> HandlerResult<Vec<Location>> {
        let params = query.with_defaults(&self.schema);
        let Some((content, ids)) = self.related(&params).await? else {
            return Ok(Vec::new());
        };

        let options = QueryOptions::resolve(&params, &self.source);
        let page = self.page(&params, offset, limit);

        let query_ids = if options.sort_type == SortType::DefinedByField {
            page.slice(&ids)
        } else {
            ids.clone()
        };
        if query_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut location_query = self
            .location_query(&content, query_ids, &options, Some(page))
            .await;

        // Counting is only needed when no hits are requested.
        location_query.perform_count = match self.settings.profile {
            Profile::Current => location_query.limit == Some(0),
            Profile::Legacy => false,
        };

        debug!(
            handler = self.source.handler_name(),
            content_id = content.id(),
            related = ids.len(),
            offset = location_query.offset,
            limit = ?location_query.limit,
            "searching related locations"
        );

        let result = self
            .repository
            .search
            .find_locations(&location_query, &self.settings.languages)
            .await?;
        let mut locations = result.into_values();

        if options.sort_type == SortType::DefinedByField {
            sort_by_relation_order(&ids, &mut locations, options.sort_direction);
        }

        Ok(locations)
    }

    async fn get_count(&self, query: &QueryParameters) -> HandlerResult<usize> {
        let params = query.with_defaults(&self.schema);
        let Some((content, ids)) = self.related(&params).await? else {
            return Ok(0);
        };

        let options = QueryOptions::resolve(&params, &self.source);
        let location_query = self.location_query(&content, ids, &options, None).await;

        let result = self
            .repository
            .search
            .find_locations(&location_query, &self.settings.languages)
            .await?;
        let total = result.total_count.unwrap_or(0);

        Ok(match self.settings.profile {
            Profile::Current => total,
            Profile::Legacy => total
                .saturating_sub(options::legacy_offset(&params))
                .min(options::legacy_limit(&params)),
        })
    }

    fn is_contextual(&self, query: &QueryParameters) -> bool {
        query.is_true("use_current_location")
    }
}
