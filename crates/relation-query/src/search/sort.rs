//! Sort clauses understood by the location search.

use serde::{Deserialize, Serialize};

/// Sort direction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[serde(alias = "ascending")]
    Asc,
    #[default]
    #[serde(alias = "descending")]
    Desc,
}

impl SortDirection {
    /// Parse a configured direction. Accepts the short and long spellings.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "asc" | "ascending" => Some(SortDirection::Asc),
            "desc" | "descending" => Some(SortDirection::Desc),
            _ => None,
        }
    }
}

/// Sortable properties of a location search hit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    DatePublished,
    DateModified,
    ContentName,
    ContentId,
    SectionIdentifier,
    LocationPath,
    LocationDepth,
    LocationPriority,
    LocationId,
}

/// A single sort clause.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SortClause {
    pub field: SortField,
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortClause {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }
}
