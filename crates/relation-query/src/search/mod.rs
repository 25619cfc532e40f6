//! Location search model.
//!
//! Provides:
//! - `Criterion`: filter expression tree
//! - `SortClause`: sort field and direction
//! - `LocationQuery`: filter, sort, pagination and count suppression
//! - `SearchResult`: hits plus an optional total count

mod criterion;
mod sort;

use serde::{Deserialize, Serialize};

pub use criterion::{Criterion, FieldCriterionValue, FieldOperator, MainLocation, Visibility};
pub use sort::{SortClause, SortDirection, SortField};

/// A location search request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LocationQuery {
    /// Filter applied without affecting relevance.
    pub filter: Criterion,

    /// Sort clauses, applied in order. Empty leaves ordering to the backend.
    #[serde(default)]
    pub sort_clauses: Vec<SortClause>,

    /// Number of hits to skip.
    #[serde(default)]
    pub offset: usize,

    /// Maximum number of hits. `None` is unbounded; `Some(0)` returns no hits.
    #[serde(default)]
    pub limit: Option<usize>,

    /// Whether the backend should compute the total count.
    #[serde(default = "default_true")]
    pub perform_count: bool,
}

fn default_true() -> bool {
    true
}

impl Default for LocationQuery {
    fn default() -> Self {
        Self {
            filter: Criterion::LogicalAnd(Vec::new()),
            sort_clauses: Vec::new(),
            offset: 0,
            limit: None,
            perform_count: true,
        }
    }
}

/// A single search hit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchHit<T> {
    pub value: T,
    #[serde(default)]
    pub score: Option<f32>,
}

/// Result of a search request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResult<T> {
    pub hits: Vec<SearchHit<T>>,

    /// Total number of matches before pagination. `None` when counting was
    /// suppressed.
    pub total_count: Option<usize>,
}

impl<T> SearchResult<T> {
    /// Unwrap the hit values, keeping backend order.
    pub fn into_values(self) -> Vec<T> {
        self.hits.into_iter().map(|hit| hit.value).collect()
    }
}
