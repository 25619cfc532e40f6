//! Filter criteria understood by the location search.

use serde::{Deserialize, Serialize};

use crate::repository::{ContentId, ContentTypeId};

/// Visibility states.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Visible,
    Hidden,
}

/// Main location states.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MainLocation {
    Main,
    NotMain,
}

/// Operators for field criteria.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FieldOperator {
    /// Exact match.
    Eq,
    /// Field value contains the given value (list membership or substring).
    Contains,
}

/// Value compared by a field criterion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum FieldCriterionValue {
    Integer(i64),
    Text(String),
}

/// Filter expression tree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    /// Content id in the given set.
    ContentId(Vec<ContentId>),
    /// Location visibility.
    Visibility(Visibility),
    /// Whether the location is the content's main location.
    IsMainLocation(MainLocation),
    /// Content type machine name in the given set.
    ContentTypeIdentifier(Vec<String>),
    /// Content type id in the given set.
    ContentTypeId(Vec<ContentTypeId>),
    /// Field value comparison.
    Field {
        identifier: String,
        operator: FieldOperator,
        value: FieldCriterionValue,
    },
    LogicalAnd(Vec<Criterion>),
    LogicalNot(Box<Criterion>),
}

impl Criterion {
    /// Negate a criterion.
    pub fn not(criterion: Criterion) -> Self {
        Criterion::LogicalNot(Box::new(criterion))
    }

    /// Operands of a conjunction; empty for any other criterion.
    pub fn operands(&self) -> &[Criterion] {
        match self {
            Criterion::LogicalAnd(criteria) => criteria,
            _ => &[],
        }
    }

    /// Whether this criterion, or any criterion nested in it, satisfies `predicate`.
    pub fn any(&self, predicate: &impl Fn(&Criterion) -> bool) -> bool {
        if predicate(self) {
            return true;
        }
        match self {
            Criterion::LogicalAnd(criteria) => criteria.iter().any(|c| c.any(predicate)),
            Criterion::LogicalNot(inner) => inner.any(predicate),
            _ => false,
        }
    }
}
