//! Typed view of the query parameters a handler acts on.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::source::RelationSource;
use crate::parameters::{ParameterValue, QueryParameters};
use crate::search::{SortDirection, SortField};

/// Result limit applied by the legacy profile when the query sets none.
pub const LEGACY_DEFAULT_LIMIT: usize = 25;

/// How results are ordered.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortType {
    /// Order of the relation list itself. Cannot be expressed as a backend
    /// sort clause.
    DefinedByField,
    #[default]
    DatePublished,
    DateModified,
    ContentName,
    LocationPriority,
    LocationPath,
    SectionIdentifier,
    LocationDepth,
    LocationId,
    ContentId,
}

impl SortType {
    /// Parse a sort type name or a host location sort-field code.
    ///
    /// `default` maps to date published. Numeric codes follow the host's
    /// location sort fields (1 path, 2 published, 3 modified, 4 section,
    /// 5 depth, 8 priority, 9 name, 11 location id, 12 content id).
    pub fn parse(value: &ParameterValue) -> Option<Self> {
        if let Some(code) = value.as_i64() {
            return Self::from_code(code);
        }

        match value.as_str()? {
            "default" | "date_published" => Some(SortType::DatePublished),
            "defined_by_field" => Some(SortType::DefinedByField),
            "date_modified" => Some(SortType::DateModified),
            "content_name" => Some(SortType::ContentName),
            "location_priority" => Some(SortType::LocationPriority),
            _ => None,
        }
    }

    fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(SortType::LocationPath),
            2 => Some(SortType::DatePublished),
            3 => Some(SortType::DateModified),
            4 => Some(SortType::SectionIdentifier),
            5 => Some(SortType::LocationDepth),
            8 => Some(SortType::LocationPriority),
            9 => Some(SortType::ContentName),
            11 => Some(SortType::LocationId),
            12 => Some(SortType::ContentId),
            _ => None,
        }
    }

    /// Backend sort field, if the sort type maps onto one.
    pub fn sort_field(self) -> Option<SortField> {
        match self {
            SortType::DefinedByField => None,
            SortType::DatePublished => Some(SortField::DatePublished),
            SortType::DateModified => Some(SortField::DateModified),
            SortType::ContentName => Some(SortField::ContentName),
            SortType::LocationPriority => Some(SortField::LocationPriority),
            SortType::LocationPath => Some(SortField::LocationPath),
            SortType::SectionIdentifier => Some(SortField::SectionIdentifier),
            SortType::LocationDepth => Some(SortField::LocationDepth),
            SortType::LocationId => Some(SortField::LocationId),
            SortType::ContentId => Some(SortField::ContentId),
        }
    }
}

/// Content type restriction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContentTypeFilter {
    /// Content type identifiers.
    pub identifiers: Vec<String>,
    /// Exclude the listed types instead of including them.
    pub exclude: bool,
}

/// Options resolved from a query's parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueryOptions {
    pub sort_type: SortType,
    pub sort_direction: SortDirection,
    pub only_main_locations: bool,
    pub filter_by_content_type: bool,
    /// Present when content type filtering is on and at least one type is selected.
    pub content_types: Option<ContentTypeFilter>,
    pub field_definition_identifier: Option<String>,
}

impl QueryOptions {
    /// Resolve options, falling back to defaults for unknown or unsupported values.
    pub fn resolve<S: RelationSource + ?Sized>(params: &QueryParameters, source: &S) -> Self {
        let sort_type = match params.get("sort_type") {
            None | Some(ParameterValue::Null) => SortType::default(),
            Some(value) => match SortType::parse(value) {
                Some(sort_type) if source.supports_sort(sort_type) => sort_type,
                _ => {
                    warn!(
                        handler = source.handler_name(),
                        sort_type = ?value,
                        "unsupported sort type, using default"
                    );
                    SortType::default()
                }
            },
        };

        let sort_direction = match params.text("sort_direction") {
            Some(value) => SortDirection::parse(value).unwrap_or_else(|| {
                warn!(sort_direction = %value, "unknown sort direction, using descending");
                SortDirection::Desc
            }),
            None => SortDirection::Desc,
        };

        let filter_by_content_type = params.is_true("filter_by_content_type");
        let content_types = if filter_by_content_type {
            let identifiers = params.text_list("content_types");
            (!identifiers.is_empty()).then(|| ContentTypeFilter {
                identifiers,
                exclude: params.text("content_types_filter") == Some("exclude"),
            })
        } else {
            None
        };

        let field_definition_identifier = params
            .text("field_definition_identifier")
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Self {
            sort_type,
            sort_direction,
            only_main_locations: params.is_true("only_main_locations"),
            filter_by_content_type,
            content_types,
            field_definition_identifier,
        }
    }
}

/// Pagination requested for a value query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub offset: usize,
    pub limit: Option<usize>,
}

impl Page {
    /// Page for the legacy profile: the query's own `offset` and `limit`
    /// parameters apply on top of the requested page.
    pub fn legacy(params: &QueryParameters, offset: usize, limit: Option<usize>) -> Self {
        let internal_limit = legacy_limit(params);
        Self {
            offset: legacy_offset(params).saturating_add(offset),
            limit: Some(limit.map_or(internal_limit, |l| l.min(internal_limit))),
        }
    }

    /// Slice of `ids` this page covers.
    pub fn slice<T: Clone>(&self, ids: &[T]) -> Vec<T> {
        let start = self.offset.min(ids.len());
        let end = match self.limit {
            Some(limit) => start.saturating_add(limit).min(ids.len()),
            None => ids.len(),
        };
        ids[start..end].to_vec()
    }
}

/// Offset set through the legacy `offset` parameter; negative values count as 0.
pub fn legacy_offset(params: &QueryParameters) -> usize {
    params
        .integer("offset")
        .and_then(|o| usize::try_from(o).ok())
        .unwrap_or(0)
}

/// Limit set through the legacy `limit` parameter; missing or negative values
/// use the default limit.
pub fn legacy_limit(params: &QueryParameters) -> usize {
    params
        .integer("limit")
        .and_then(|l| usize::try_from(l).ok())
        .unwrap_or(LEGACY_DEFAULT_LIMIT)
}
