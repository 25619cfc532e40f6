//! Relation sources: where the related content ids come from.

use std::sync::Arc;

use async_trait::async_trait;

use super::options::{QueryOptions, SortType};
use super::schema;
use crate::config::HandlerSettings;
use crate::error::HandlerResult;
use crate::parameters::{ParameterBuilder, ParameterDefinition, ParameterType, QueryParameters};
use crate::repository::{Content, ContentId, ContentService};
use crate::search::{Criterion, FieldCriterionValue, FieldOperator};

/// Strategy resolving the relation id list of a selected content item.
#[async_trait]
pub trait RelationSource: Send + Sync {
    /// Handler name used in query type declarations.
    fn handler_name(&self) -> &'static str;

    /// Declare the parameters of a handler using this source.
    fn build_parameters(&self, builder: &mut dyn ParameterBuilder, settings: &HandlerSettings);

    /// Whether the source can order its results by the given sort type.
    fn supports_sort(&self, sort_type: SortType) -> bool;

    /// Related content ids, in relation order.
    async fn related_content_ids(
        &self,
        content: &Content,
        params: &QueryParameters,
        languages: &[String],
    ) -> HandlerResult<Vec<ContentId>>;

    /// Criteria added to the backend filter after the shared ones.
    fn extra_criteria(&self, _content: &Content, _options: &QueryOptions) -> Vec<Criterion> {
        Vec::new()
    }
}

// ---------------------------------------------------------------------------
// FieldRelations
// ---------------------------------------------------------------------------

/// Destination ids of a relation list field on the selected content.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldRelations;

#[async_trait]
impl RelationSource for FieldRelations {
    fn handler_name(&self) -> &'static str {
        "relation_list"
    }

    fn build_parameters(&self, builder: &mut dyn ParameterBuilder, settings: &HandlerSettings) {
        builder.add(schema::location());
        builder.add(
            ParameterDefinition::new("field_definition_identifier", ParameterType::TextLine)
                .required(),
        );
        builder.add(schema::sort_type(&[
            ("Defined by field", "defined_by_field"),
            ("Published", "date_published"),
            ("Modified", "date_modified"),
            ("Alphabetical", "content_name"),
        ]));
        builder.add(schema::sort_direction());
        builder.add(schema::only_main_locations(settings));
        builder.add(schema::content_type_filter(settings, Vec::new()));
    }

    fn supports_sort(&self, _sort_type: SortType) -> bool {
        true
    }

    async fn related_content_ids(
        &self,
        content: &Content,
        params: &QueryParameters,
        languages: &[String],
    ) -> HandlerResult<Vec<ContentId>> {
        let Some(identifier) = params
            .text("field_definition_identifier")
            .filter(|s| !s.is_empty())
        else {
            return Ok(Vec::new());
        };

        let ids = content
            .translated_field(identifier, languages)
            .and_then(|field| field.value.relation_list())
            .map(<[ContentId]>::to_vec)
            .unwrap_or_default();

        Ok(ids)
    }
}

// ---------------------------------------------------------------------------
// ReverseRelations
// ---------------------------------------------------------------------------

/// Source ids of all relations pointing at the selected content.
#[derive(Clone)]
pub struct ReverseRelations {
    contents: Arc<dyn ContentService>,
}

impl ReverseRelations {
    pub fn new(contents: Arc<dyn ContentService>) -> Self {
        Self { contents }
    }
}

#[async_trait]
impl RelationSource for ReverseRelations {
    fn handler_name(&self) -> &'static str {
        "reverse_relation_list"
    }

    fn build_parameters(&self, builder: &mut dyn ParameterBuilder, settings: &HandlerSettings) {
        builder.add(schema::location());
        builder.add(schema::sort_type(&[
            ("Published", "date_published"),
            ("Modified", "date_modified"),
            ("Alphabetical", "content_name"),
        ]));
        builder.add(schema::sort_direction());
        builder.add(schema::content_type_filter(
            settings,
            vec![
                ParameterDefinition::new("field_definition_identifier", ParameterType::TextLine)
                    .groups(schema::advanced(settings)),
            ],
        ));
        builder.add(schema::only_main_locations(settings));
    }

    fn supports_sort(&self, sort_type: SortType) -> bool {
        matches!(
            sort_type,
            SortType::DatePublished | SortType::DateModified | SortType::ContentName
        )
    }

    async fn related_content_ids(
        &self,
        content: &Content,
        _params: &QueryParameters,
        _languages: &[String],
    ) -> HandlerResult<Vec<ContentId>> {
        let relations = self.contents.load_reverse_relations(&content.info).await?;
        Ok(relations.iter().map(|r| r.source_content_id).collect())
    }

    /// Restricts the relating content to content whose field contains the
    /// selected content. Only applies together with content type filtering.
    fn extra_criteria(&self, content: &Content, options: &QueryOptions) -> Vec<Criterion> {
        if !options.filter_by_content_type {
            return Vec::new();
        }

        match &options.field_definition_identifier {
            Some(identifier) => vec![Criterion::Field {
                identifier: identifier.clone(),
                operator: FieldOperator::Contains,
                value: FieldCriterionValue::Integer(content.id()),
            }],
            None => Vec::new(),
        }
    }
}

impl std::fmt::Debug for ReverseRelations {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReverseRelations").finish_non_exhaustive()
    }
}
