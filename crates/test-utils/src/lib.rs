//! Relation query test utilities.
//!
//! Builders for content, locations and query parameters used by the
//! integration tests of the relation list query types.

use layouts_relation_query::QueryParameters;
use layouts_relation_query::repository::{
    Content, ContentId, ContentInfo, ContentTypeId, Field, FieldValue, Location, LocationId,
};

/// Language used when none is given.
pub const DEFAULT_LANGUAGE: &str = "eng-GB";

/// Location id a test content item's main location gets by default.
pub fn main_location_id(content_id: ContentId) -> LocationId {
    content_id * 10
}

/// Create test content with default values.
///
/// The main location id defaults to `main_location_id(id)`.
pub fn test_content(id: ContentId, content_type: &str, name: &str) -> TestContent {
    TestContent {
        id,
        content_type: content_type.to_string(),
        content_type_id: 1,
        name: name.to_string(),
        main_location_id: Some(main_location_id(id)),
        main_language_code: DEFAULT_LANGUAGE.to_string(),
        section_identifier: "standard".to_string(),
        published: 0,
        modified: 0,
        fields: Vec::new(),
    }
}

/// A test content builder.
#[derive(Debug, Clone)]
pub struct TestContent {
    pub id: ContentId,
    pub content_type: String,
    pub content_type_id: ContentTypeId,
    pub name: String,
    pub main_location_id: Option<LocationId>,
    pub main_language_code: String,
    pub section_identifier: String,
    pub published: i64,
    pub modified: i64,
    pub fields: Vec<Field>,
}

impl TestContent {
    /// Set the content type id.
    pub fn with_content_type_id(mut self, id: ContentTypeId) -> Self {
        self.content_type_id = id;
        self
    }

    /// Set the main location.
    pub fn with_main_location(mut self, location_id: LocationId) -> Self {
        self.main_location_id = Some(location_id);
        self
    }

    /// Set the main language.
    pub fn in_language(mut self, language_code: &str) -> Self {
        self.main_language_code = language_code.to_string();
        self
    }

    pub fn with_section(mut self, identifier: &str) -> Self {
        self.section_identifier = identifier.to_string();
        self
    }

    /// Set the publication timestamp.
    pub fn published_at(mut self, timestamp: i64) -> Self {
        self.published = timestamp;
        self
    }

    /// Set the modification timestamp.
    pub fn modified_at(mut self, timestamp: i64) -> Self {
        self.modified = timestamp;
        self
    }

    /// Add a field in the main language.
    pub fn with_field(self, identifier: &str, value: FieldValue) -> Self {
        let language = self.main_language_code.clone();
        self.with_translated_field(identifier, &language, value)
    }

    /// Add a field translation.
    pub fn with_translated_field(
        mut self,
        identifier: &str,
        language_code: &str,
        value: FieldValue,
    ) -> Self {
        self.fields.push(Field {
            identifier: identifier.to_string(),
            language_code: language_code.to_string(),
            value,
        });
        self
    }

    /// Add a relation list field in the main language.
    pub fn with_relation_list(self, identifier: &str, ids: &[ContentId]) -> Self {
        self.with_field(
            identifier,
            FieldValue::RelationList {
                destination_content_ids: ids.to_vec(),
            },
        )
    }

    /// Add a text field in the main language.
    pub fn with_text_field(self, identifier: &str, text: &str) -> Self {
        self.with_field(
            identifier,
            FieldValue::Text {
                text: text.to_string(),
            },
        )
    }

    /// Build the content value.
    pub fn build(self) -> Content {
        Content {
            info: ContentInfo {
                id: self.id,
                content_type_id: self.content_type_id,
                name: self.name,
                main_location_id: self.main_location_id,
                main_language_code: self.main_language_code,
                section_identifier: self.section_identifier,
                published: self.published,
                modified: self.modified,
            },
            content_type_identifier: self.content_type,
            fields: self.fields,
        }
    }

    /// Build the content value and its main location.
    pub fn build_with_location(self) -> (Content, Location) {
        let location_id = self
            .main_location_id
            .unwrap_or_else(|| main_location_id(self.id));
        let location = test_location(location_id, self.id).build();
        (self.build(), location)
    }
}

/// Create a visible test location under location 2.
pub fn test_location(id: LocationId, content_id: ContentId) -> TestLocation {
    TestLocation {
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

/// A test location builder.
#[derive(Debug, Clone)]
pub struct TestLocation {
    pub id: LocationId,
    pub content_id: ContentId,
    pub parent_location_id: Option<LocationId>,
    pub path_string: String,
    pub depth: i32,
    pub priority: i32,
    pub hidden: bool,
    pub invisible: bool,
}

impl TestLocation {
    /// Place the location under a parent, updating path and depth.
    pub fn under(mut self, parent: &Location) -> Self {
        self.parent_location_id = Some(parent.id);
        self.path_string = format!("{}{}/", parent.path_string, self.id);
        self.depth = parent.depth + 1;
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Set as hidden.
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Set as invisible through a hidden ancestor.
    pub fn invisible(mut self) -> Self {
        self.invisible = true;
        self
    }

    pub fn build(self) -> Location {
        Location {
            id: self.id,
            content_id: self.content_id,
            parent_location_id: self.parent_location_id,
            path_string: self.path_string,
            depth: self.depth,
            priority: self.priority,
            hidden: self.hidden,
            invisible: self.invisible,
        }
    }
}

/// Relation list query selecting content by location.
pub fn relation_list_query(location_id: LocationId, field: &str) -> QueryParameters {
    QueryParameters::new()
        .with("use_current_location", false)
        .with("location_id", location_id)
        .with("field_definition_identifier", field)
}

/// Reverse relation list query selecting content by location.
pub fn reverse_relation_list_query(location_id: LocationId) -> QueryParameters {
    QueryParameters::new()
        .with("use_current_location", false)
        .with("location_id", location_id)
}

/// Query using the content currently being rendered.
pub fn current_location_query() -> QueryParameters {
    QueryParameters::new().with("use_current_location", true)
}

/// Sort options for a query.
pub fn sorted(query: QueryParameters, sort_type: &str, direction: &str) -> QueryParameters {
    query
        .with("sort_type", sort_type)
        .with("sort_direction", direction)
}

/// Content type filtering for a query.
pub fn filtered_by_content_type(
    query: QueryParameters,
    content_types: &[&str],
    exclude: bool,
) -> QueryParameters {
    query
        .with("filter_by_content_type", true)
        .with(
            "content_types",
            content_types.iter().map(|s| s.to_string()).collect::<Vec<_>>(),
        )
        .with(
            "content_types_filter",
            if exclude { "exclude" } else { "include" },
        )
}

/// Content ids of a list of locations, in order.
pub fn content_ids(locations: &[Location]) -> Vec<ContentId> {
    locations.iter().map(|l| l.content_id).collect()
}
