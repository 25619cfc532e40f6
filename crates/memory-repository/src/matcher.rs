//! Criterion evaluation and sorting over in-memory search hits.

use std::cmp::Ordering;

use layouts_relation_query::repository::{Content, FieldValue, Location};
use layouts_relation_query::search::{
    Criterion, FieldCriterionValue, FieldOperator, MainLocation, SortClause, SortDirection,
    SortField, Visibility,
};

/// A location together with the content it places.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Candidate<'a> {
    pub location: &'a Location,
    pub content: &'a Content,
}

/// Evaluate a criterion against a candidate.
pub(crate) fn matches(criterion: &Criterion, candidate: &Candidate<'_>) -> bool {
    let Candidate { location, content } = *candidate;

    match criterion {
        Criterion::ContentId(ids) => ids.contains(&location.content_id),
        Criterion::Visibility(Visibility::Visible) => location.is_visible(),
        Criterion::Visibility(Visibility::Hidden) => !location.is_visible(),
        Criterion::IsMainLocation(MainLocation::Main) => {
            content.info.main_location_id == Some(location.id)
        }
        Criterion::IsMainLocation(MainLocation::NotMain) => {
            content.info.main_location_id != Some(location.id)
        }
        Criterion::ContentTypeIdentifier(identifiers) => identifiers
            .iter()
            .any(|i| *i == content.content_type_identifier),
        Criterion::ContentTypeId(ids) => ids.contains(&content.info.content_type_id),
        Criterion::Field {
            identifier,
            operator,
            value,
        } => content
            .fields
            .iter()
            .filter(|f| f.identifier == *identifier)
            .any(|f| field_matches(&f.value, *operator, value)),
        Criterion::LogicalAnd(criteria) => criteria.iter().all(|c| matches(c, candidate)),
        Criterion::LogicalNot(inner) => !matches(inner, candidate),
    }
}

fn field_matches(field: &FieldValue, operator: FieldOperator, value: &FieldCriterionValue) -> bool {
    match (field, operator, value) {
        (
            FieldValue::RelationList {
                destination_content_ids,
            },
            FieldOperator::Contains,
            FieldCriterionValue::Integer(id),
        ) => destination_content_ids.contains(id),
        (
            FieldValue::RelationList {
                destination_content_ids,
            },
            FieldOperator::Eq,
            FieldCriterionValue::Integer(id),
        ) => destination_content_ids.as_slice() == [*id],
        (
            FieldValue::Relation {
                destination_content_id,
            },
            _,
            FieldCriterionValue::Integer(id),
        ) => *destination_content_id == Some(*id),
        (FieldValue::Integer { value: field }, _, FieldCriterionValue::Integer(v)) => field == v,
        (FieldValue::Text { text }, FieldOperator::Eq, FieldCriterionValue::Text(v)) => text == v,
        (FieldValue::Text { text }, FieldOperator::Contains, FieldCriterionValue::Text(v)) => {
            text.contains(v.as_str())
        }
        _ => false,
    }
}

/// Compare two candidates by a list of sort clauses.
pub(crate) fn compare(clauses: &[SortClause], a: &Candidate<'_>, b: &Candidate<'_>) -> Ordering {
    for clause in clauses {
        let ordering = compare_field(clause.field, a, b);
        let ordering = match clause.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

fn compare_field(field: SortField, a: &Candidate<'_>, b: &Candidate<'_>) -> Ordering {
    match field {
        SortField::DatePublished => a.content.info.published.cmp(&b.content.info.published),
        SortField::DateModified => a.content.info.modified.cmp(&b.content.info.modified),
        SortField::ContentName => a.content.info.name.cmp(&b.content.info.name),
        SortField::ContentId => a.content.info.id.cmp(&b.content.info.id),
        SortField::SectionIdentifier => a
            .content
            .info
            .section_identifier
            .cmp(&b.content.info.section_identifier),
        SortField::LocationPath => a.location.path_string.cmp(&b.location.path_string),
        SortField::LocationDepth => a.location.depth.cmp(&b.location.depth),
        SortField::LocationPriority => a.location.priority.cmp(&b.location.priority),
        SortField::LocationId => a.location.id.cmp(&b.location.id),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use layouts_relation_query::repository::{ContentInfo, Field};

    fn content(id: i64, type_identifier: &str, fields: Vec<Field>) -> Content {
        Content {
            info: ContentInfo {
                id,
                content_type_id: 1,
                name: format!("Content {id}"),
                main_location_id: Some(id * 10),
                main_language_code: "eng-GB".to_string(),
                section_identifier: "standard".to_string(),
                published: id * 100,
                modified: 0,
            },
            content_type_identifier: type_identifier.to_string(),
            fields,
        }
    }

    fn location(id: i64, content_id: i64) -> Location {
        Location {
            id,
            content_id,
            parent_location_id: Some(2),
            path_string: format!("/1/2/{id}/"),
            depth: 2,
            priority: 0,
            hidden: false,
            invisible: false,
        }
    }

    #[test]
    fn main_location_and_visibility() {
        let content = content(1, "article", Vec::new());
        let main = location(10, 1);
        let mut secondary = location(11, 1);
        secondary.invisible = true;

        let main = Candidate {
            location: &main,
            content: &content,
        };
        let secondary = Candidate {
            location: &secondary,
            content: &content,
        };

        let criterion = Criterion::IsMainLocation(MainLocation::Main);
        assert!(matches(&criterion, &main));
        assert!(!matches(&criterion, &secondary));

        let criterion = Criterion::Visibility(Visibility::Visible);
        assert!(matches(&criterion, &main));
        assert!(!matches(&criterion, &secondary));
    }

    #[test]
    fn negated_content_type() {
        let content = content(1, "article", Vec::new());
        let location = location(10, 1);
        let candidate = Candidate {
            location: &location,
            content: &content,
        };

        let include = Criterion::ContentTypeIdentifier(vec!["article".to_string()]);
        assert!(matches(&include, &candidate));
        assert!(!matches(&Criterion::not(include), &candidate));
    }

    #[test]
    fn field_contains_relation() {
        let content = content(
            1,
            "article",
            vec![Field {
                identifier: "related".to_string(),
                language_code: "eng-GB".to_string(),
                value: FieldValue::RelationList {
                    destination_content_ids: vec![5, 6],
                },
            }],
        );
        let location = location(10, 1);
        let candidate = Candidate {
            location: &location,
            content: &content,
        };

        let criterion = |id| Criterion::Field {
            identifier: "related".to_string(),
            operator: FieldOperator::Contains,
            value: FieldCriterionValue::Integer(id),
        };
        assert!(matches(&criterion(6), &candidate));
        assert!(!matches(&criterion(7), &candidate));
    }

    #[test]
    fn compare_falls_through_clauses() {
        let first = content(1, "article", Vec::new());
        let mut second = content(2, "article", Vec::new());
        second.info.published = first.info.published;
        let (l1, l2) = (location(10, 1), location(20, 2));
        let a = Candidate {
            location: &l1,
            content: &first,
        };
        let b = Candidate {
            location: &l2,
            content: &second,
        };

        let clauses = [
            SortClause::new(SortField::DatePublished, SortDirection::Desc),
            SortClause::new(SortField::ContentId, SortDirection::Desc),
        ];
        assert_eq!(compare(&clauses, &a, &b), Ordering::Greater);
        assert_eq!(compare(&[], &a, &b), Ordering::Equal);
    }
}
