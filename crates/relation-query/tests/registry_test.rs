#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Query type registry wired to the relation handlers.

mod common;

use std::sync::Arc;

use layouts_memory_repository::StaticContentProvider;
use layouts_relation_query::{HandlerSettings, QueryTypeRegistry, Repository};
use layouts_test_utils::{relation_list_query, reverse_relation_list_query};

const DECLARATIONS: &str = include_str!("../../../config/query_types.yaml");

fn registry() -> QueryTypeRegistry {
    let site = common::site();
    QueryTypeRegistry::with_relation_handlers(
        Repository::from_shared(site.repository),
        Arc::new(StaticContentProvider::default()),
        HandlerSettings::default(),
    )
}

#[tokio::test]
async fn test_default_declarations() {
    let mut registry = registry();
    let warnings = registry.load_yaml(DECLARATIONS).unwrap();
    assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
    assert_eq!(
        registry.identifiers(),
        vec!["relation_list", "reverse_relation_list"]
    );

    let (declaration, handler) = registry.get("relation_list").unwrap();
    assert_eq!(declaration.name, "Relation list");
    assert_eq!(
        handler
            .get_count(&relation_list_query(10, "related"))
            .await
            .unwrap(),
        3
    );

    let handler = registry.handler("reverse_relation_list").unwrap();
    assert_eq!(
        handler
            .get_count(&reverse_relation_list_query(40))
            .await
            .unwrap(),
        3
    );
}

#[tokio::test]
async fn test_custom_query_type_on_builtin_handler() {
    let mut registry = registry();
    let warnings = registry
        .load_yaml(
            r#"
query_types:
  related_articles:
    name: Related articles
    handler: relation_list
  tagged_by:
    name: Tagged by
    handler: tags
"#,
        )
        .unwrap();

    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("tagged_by"));
    assert!(registry.get("related_articles").is_some());
    assert!(registry.get("tagged_by").is_none());
}
