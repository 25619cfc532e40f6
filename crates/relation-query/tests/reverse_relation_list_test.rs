#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Reverse relation list query type tests.

mod common;

use layouts_relation_query::search::{
    Criterion, FieldCriterionValue, FieldOperator, SortClause, SortDirection, SortField,
};
use layouts_relation_query::{HandlerError, HandlerSettings, QueryTypeHandler};
use layouts_test_utils::{
    content_ids, current_location_query, filtered_by_content_type, reverse_relation_list_query,
    sorted,
};

#[tokio::test]
async fn test_lists_relating_content() {
    let site = common::site();
    let handler = site.reverse_relation_list(HandlerSettings::default());
    let query = reverse_relation_list_query(40);

    let locations = handler.get_values(&query, 0, None).await.unwrap();
    assert_eq!(content_ids(&locations), vec![3, 2, 1]);
    assert_eq!(handler.get_count(&query).await.unwrap(), 3);

    let backend = site.repository.last_query().unwrap();
    assert_eq!(backend.filter.operands()[0], Criterion::ContentId(vec![1, 2, 3]));
}

#[tokio::test]
async fn test_sort_by_name() {
    let site = common::site();
    let handler = site.reverse_relation_list(HandlerSettings::default());
    let query = sorted(reverse_relation_list_query(40), "content_name", "asc");

    let locations = handler.get_values(&query, 0, None).await.unwrap();
    assert_eq!(content_ids(&locations), vec![3, 2, 1]);

    let query = sorted(reverse_relation_list_query(40), "content_name", "desc");
    let locations = handler.get_values(&query, 0, None).await.unwrap();
    assert_eq!(content_ids(&locations), vec![1, 2, 3]);
}

#[tokio::test]
async fn test_defined_by_field_is_not_offered() {
    let site = common::site();
    let handler = site.reverse_relation_list(HandlerSettings::default());
    let query = sorted(reverse_relation_list_query(40), "defined_by_field", "asc");

    handler.get_values(&query, 0, None).await.unwrap();
    assert_eq!(
        site.repository.last_query().unwrap().sort_clauses,
        vec![SortClause::new(SortField::DatePublished, SortDirection::Asc)]
    );
}

#[tokio::test]
async fn test_field_criterion_with_content_type_filter() {
    let site = common::site();
    let handler = site.reverse_relation_list(HandlerSettings::default());
    let query = filtered_by_content_type(reverse_relation_list_query(40), &["article"], false)
        .with("field_definition_identifier", "related");

    let locations = handler.get_values(&query, 0, None).await.unwrap();
    assert_eq!(content_ids(&locations), vec![2, 1]);

    let backend = site.repository.last_query().unwrap();
    assert!(backend.filter.operands().contains(&Criterion::Field {
        identifier: "related".to_string(),
        operator: FieldOperator::Contains,
        value: FieldCriterionValue::Integer(4),
    }));
}

#[tokio::test]
async fn test_field_criterion_selects_the_relating_field() {
    let site = common::site();
    let handler = site.reverse_relation_list(HandlerSettings::default());
    let query = filtered_by_content_type(
        reverse_relation_list_query(40),
        &["article", "blog_post"],
        false,
    )
    .with("field_definition_identifier", "featured");

    let locations = handler.get_values(&query, 0, None).await.unwrap();
    assert_eq!(content_ids(&locations), vec![3]);
    assert_eq!(handler.get_count(&query).await.unwrap(), 1);
}

#[tokio::test]
async fn test_field_identifier_needs_content_type_filtering() {
    let site = common::site();
    let handler = site.reverse_relation_list(HandlerSettings::default());
    let query = reverse_relation_list_query(40).with("field_definition_identifier", "featured");

    let locations = handler.get_values(&query, 0, None).await.unwrap();
    assert_eq!(content_ids(&locations), vec![3, 2, 1]);
    assert!(
        !site
            .repository
            .last_query()
            .unwrap()
            .filter
            .any(&|c| matches!(c, Criterion::Field { .. }))
    );
}

#[tokio::test]
async fn test_current_location() {
    let site = common::site().with_current(4);
    let handler = site.reverse_relation_list(HandlerSettings::default());
    let query = current_location_query();

    assert_eq!(handler.get_count(&query).await.unwrap(), 3);
    assert!(handler.is_contextual(&query));
}

#[tokio::test]
async fn test_content_without_reverse_relations() {
    let site = common::site();
    let handler = site.reverse_relation_list(HandlerSettings::default());
    let query = reverse_relation_list_query(60);

    assert!(handler.get_values(&query, 0, None).await.unwrap().is_empty());
    assert_eq!(handler.get_count(&query).await.unwrap(), 0);
    assert!(site.repository.queries().is_empty());
}

#[tokio::test]
async fn test_unknown_location_yields_empty_result() {
    let site = common::site();
    let handler = site.reverse_relation_list(HandlerSettings::default());
    let query = reverse_relation_list_query(999);

    assert!(handler.get_values(&query, 0, None).await.unwrap().is_empty());
    assert_eq!(handler.get_count(&query).await.unwrap(), 0);
}

#[tokio::test]
async fn test_reverse_relation_failure_propagates() {
    let site = common::site();
    site.repository.fail_reverse_relations("relation table locked");
    let handler = site.reverse_relation_list(HandlerSettings::default());

    let err = handler
        .get_values(&reverse_relation_list_query(40), 0, None)
        .await
        .unwrap_err();
    assert!(matches!(err, HandlerError::Repository(_)));
    assert!(site.repository.queries().is_empty());
}

#[test]
fn test_parameter_schema() {
    let site = common::site();
    let handler = site.reverse_relation_list(HandlerSettings::default());
    assert_eq!(
        handler.schema().names(),
        vec![
            "use_current_location",
            "location_id",
            "sort_type",
            "sort_direction",
            "filter_by_content_type",
            "content_types",
            "content_types_filter",
            "field_definition_identifier",
            "only_main_locations",
        ]
    );
    assert_eq!(
        handler
            .schema()
            .get("sort_type")
            .unwrap()
            .parameter_type
            .choice_values(),
        vec!["date_published", "date_modified", "content_name"]
    );
}
