#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Common test utilities for integration tests.
//!
//! Builds a small site on the in-memory repository:
//!
//! | content | type      | name    | published | modified | relations                  |
//! |---------|-----------|---------|-----------|----------|----------------------------|
//! | 1       | article   | Home    | 50        | 50       | related: [2, 3, 4, 5]      |
//! | 2       | article   | Bravo   | 200       | 500      | related: [4]               |
//! | 3       | blog_post | Alpha   | 300       | 100      | featured: [4]              |
//! | 4       | article   | Charlie | 100       | 300      |                            |
//! | 5       | article   | Hidden  | 400       | 400      |                            |
//! | 6       | article   | Empty   | 0         | 0        | related: [], title is text |
//!
//! Content `n` has its main location at `n * 10`. Content 4 has a second,
//! non-main location 41; content 5's only location is hidden. Content 1 has
//! a German translation of `related` holding `[4]`.

#![allow(dead_code)]

use std::sync::Arc;

use layouts_memory_repository::{MemoryRepository, StaticContentProvider};
use layouts_relation_query::repository::{Content, ContentType, FieldValue};
use layouts_relation_query::{
    HandlerSettings, RelationListQueryHandler, Repository, ReverseRelationListQueryHandler,
};
use layouts_test_utils::{test_content, test_location};

/// Site fixture plus the content the "current location" resolves to.
pub struct TestSite {
    pub repository: Arc<MemoryRepository>,
    pub current: Option<Content>,
}

impl TestSite {
    pub fn relation_list(&self, settings: HandlerSettings) -> RelationListQueryHandler {
        RelationListQueryHandler::relation_list(
            Repository::from_shared(self.repository.clone()),
            Arc::new(StaticContentProvider::new(self.current.clone())),
            settings,
        )
    }

    pub fn reverse_relation_list(
        &self,
        settings: HandlerSettings,
    ) -> ReverseRelationListQueryHandler {
        ReverseRelationListQueryHandler::reverse_relation_list(
            Repository::from_shared(self.repository.clone()),
            Arc::new(StaticContentProvider::new(self.current.clone())),
            settings,
        )
    }

    /// Make `content` the content currently being rendered.
    pub fn with_current(mut self, content_id: i64) -> Self {
        self.current = self.repository.content(content_id);
        self
    }
}

pub fn site() -> TestSite {
    let repository = MemoryRepository::new();
    repository.insert_content_type(ContentType {
        id: 1,
        identifier: "article".to_string(),
        name: "Article".to_string(),
    });
    repository.insert_content_type(ContentType {
        id: 2,
        identifier: "blog_post".to_string(),
        name: "Blog post".to_string(),
    });

    let contents = [
        test_content(1, "article", "Home")
            .published_at(50)
            .modified_at(50)
            .with_relation_list("related", &[2, 3, 4, 5])
            .with_translated_field(
                "related",
                "ger-DE",
                FieldValue::RelationList {
                    destination_content_ids: vec![4],
                },
            ),
        test_content(2, "article", "Bravo")
            .published_at(200)
            .modified_at(500)
            .with_relation_list("related", &[4]),
        test_content(3, "blog_post", "Alpha")
            .with_content_type_id(2)
            .published_at(300)
            .modified_at(100)
            .with_relation_list("featured", &[4]),
        test_content(4, "article", "Charlie")
            .published_at(100)
            .modified_at(300),
        test_content(5, "article", "Hidden")
            .published_at(400)
            .modified_at(400),
        test_content(6, "article", "Empty")
            .with_relation_list("related", &[])
            .with_text_field("title", "Empty"),
    ];

    for builder in contents {
        let hidden = builder.id == 5;
        let (content, location) = builder.build_with_location();
        repository.insert_content(content);

        let mut location = location;
        location.hidden = hidden;
        repository.insert_location(location).unwrap();
    }

    repository
        .insert_location(test_location(41, 4).build())
        .unwrap();

    TestSite {
        repository: Arc::new(repository),
        current: None,
    }
}

/// A site holding only the given content ids, each with a main location,
/// and content 1 relating to them in the given order.
pub fn site_with_relations(ids: &[i64]) -> TestSite {
    let repository = MemoryRepository::new();
    repository.insert_content_type(ContentType {
        id: 1,
        identifier: "article".to_string(),
        name: "Article".to_string(),
    });

    let source = test_content(1, "article", "Source").with_relation_list("related", ids);
    for builder in std::iter::once(source).chain(
        ids.iter()
            .map(|id| test_content(*id, "article", &format!("Content {id}")).published_at(*id)),
    ) {
        let (content, location) = builder.build_with_location();
        repository.insert_content(content);
        repository.insert_location(location).unwrap();
    }

    TestSite {
        repository: Arc::new(repository),
        current: None,
    }
}
