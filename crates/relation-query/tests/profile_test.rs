#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Current and legacy profile behaviour, side by side.

mod common;

use layouts_relation_query::handler::LEGACY_DEFAULT_LIMIT;
use layouts_relation_query::search::Criterion;
use layouts_relation_query::{HandlerSettings, Profile, QueryTypeHandler};
use layouts_test_utils::{content_ids, filtered_by_content_type, relation_list_query};

fn legacy() -> HandlerSettings {
    HandlerSettings::default().with_profile(Profile::Legacy)
}

#[tokio::test]
async fn test_value_queries_count_only_without_hits_in_current_profile() {
    let site = common::site();
    let handler = site.relation_list(HandlerSettings::default());
    let query = relation_list_query(10, "related");

    handler.get_values(&query, 0, Some(5)).await.unwrap();
    assert!(!site.repository.last_query().unwrap().perform_count);

    handler.get_values(&query, 0, None).await.unwrap();
    assert!(!site.repository.last_query().unwrap().perform_count);

    let locations = handler.get_values(&query, 0, Some(0)).await.unwrap();
    assert!(locations.is_empty());
    assert!(site.repository.last_query().unwrap().perform_count);
}

#[tokio::test]
async fn test_value_queries_never_count_in_legacy_profile() {
    let site = common::site();
    let handler = site.relation_list(legacy());
    let query = relation_list_query(10, "related");

    handler.get_values(&query, 0, Some(5)).await.unwrap();
    assert!(!site.repository.last_query().unwrap().perform_count);

    handler.get_values(&query, 0, Some(0)).await.unwrap();
    assert!(!site.repository.last_query().unwrap().perform_count);
}

#[tokio::test]
async fn test_count_queries_always_count() {
    for settings in [HandlerSettings::default(), legacy()] {
        let site = common::site();
        let handler = site.relation_list(settings);
        handler
            .get_count(&relation_list_query(10, "related"))
            .await
            .unwrap();

        let backend = site.repository.last_query().unwrap();
        assert!(backend.perform_count);
        assert_eq!(backend.limit, Some(0));
        assert_eq!(backend.offset, 0);
    }
}

#[tokio::test]
async fn test_legacy_default_limit() {
    let site = common::site();
    let handler = site.relation_list(legacy());

    handler
        .get_values(&relation_list_query(10, "related"), 0, None)
        .await
        .unwrap();
    assert_eq!(
        site.repository.last_query().unwrap().limit,
        Some(LEGACY_DEFAULT_LIMIT)
    );
}

#[tokio::test]
async fn test_legacy_pagination_parameters() {
    let site = common::site();
    let handler = site.relation_list(legacy());
    let query = relation_list_query(10, "related")
        .with("offset", 1_i64)
        .with("limit", 1_i64);

    let locations = handler.get_values(&query, 0, None).await.unwrap();
    assert_eq!(content_ids(&locations), vec![2]);
    assert_eq!(handler.get_count(&query).await.unwrap(), 1);

    // The current profile ignores the parameters.
    let handler = site.relation_list(HandlerSettings::default());
    assert_eq!(
        handler.get_values(&query, 0, None).await.unwrap().len(),
        3
    );
    assert_eq!(handler.get_count(&query).await.unwrap(), 3);
}

#[tokio::test]
async fn test_legacy_count_subtracts_offset() {
    let site = common::site();
    let handler = site.relation_list(legacy());

    let query = relation_list_query(10, "related").with("offset", 2_i64);
    assert_eq!(handler.get_count(&query).await.unwrap(), 1);

    let query = relation_list_query(10, "related").with("offset", 7_i64);
    assert_eq!(handler.get_count(&query).await.unwrap(), 0);
}

#[tokio::test]
async fn test_legacy_content_types_use_ids() {
    let site = common::site();
    let handler = site.relation_list(legacy());
    let query = filtered_by_content_type(
        relation_list_query(10, "related"),
        &["blog_post", "unknown"],
        true,
    );

    let locations = handler.get_values(&query, 0, None).await.unwrap();
    assert_eq!(content_ids(&locations), vec![2, 4]);
    assert!(
        site.repository
            .last_query()
            .unwrap()
            .filter
            .operands()
            .contains(&Criterion::not(Criterion::ContentTypeId(vec![2])))
    );
}

#[test]
fn test_pagination_parameters_are_declared_only_for_legacy() {
    let site = common::site();
    assert!(
        site.relation_list(HandlerSettings::default())
            .schema()
            .get("limit")
            .is_none()
    );
    let handler = site.relation_list(legacy());
    assert!(handler.schema().get("limit").is_some());
    assert!(handler.schema().get("offset").is_some());
}
