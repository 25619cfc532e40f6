//! Repository value types.
//!
//! These mirror the host repository's content model closely enough for the
//! handlers and the collaborator traits to be typed. The handlers never
//! construct them; they come from the repository services.

use serde::{Deserialize, Serialize};

/// Content identifier.
pub type ContentId = i64;

/// Location identifier.
pub type LocationId = i64;

/// Content type identifier.
pub type ContentTypeId = i64;

/// Metadata shared by every version and translation of a content item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContentInfo {
    pub id: ContentId,

    pub content_type_id: ContentTypeId,

    /// Content name in the main language.
    pub name: String,

    /// Location the content is primarily placed at.
    #[serde(default)]
    pub main_location_id: Option<LocationId>,

    pub main_language_code: String,

    #[serde(default)]
    pub section_identifier: String,

    /// Unix timestamp of the first publication.
    #[serde(default)]
    pub published: i64,

    /// Unix timestamp of the last modification.
    #[serde(default)]
    pub modified: i64,
}

/// A loaded content item with its translated fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Content {
    pub info: ContentInfo,

    /// Machine name of the content type (e.g. "article").
    pub content_type_identifier: String,

    #[serde(default)]
    pub fields: Vec<Field>,
}

impl Content {
    /// Content identifier.
    pub fn id(&self) -> ContentId {
        self.info.id
    }

    /// Find the field translation to use for the given language priority list.
    ///
    /// Tries each prioritized language in order, then the main language,
    /// then any translation of the field.
    pub fn translated_field(&self, identifier: &str, languages: &[String]) -> Option<&Field> {
        languages
            .iter()
            .chain(std::iter::once(&self.info.main_language_code))
            .find_map(|language| {
                self.fields
                    .iter()
                    .find(|f| f.identifier == identifier && &f.language_code == language)
            })
            .or_else(|| self.fields.iter().find(|f| f.identifier == identifier))
    }
}

/// A single field translation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Field {
    pub identifier: String,
    pub language_code: String,
    pub value: FieldValue,
}

/// Field values the handlers distinguish between.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldValue {
    /// Ordered destination content ids.
    RelationList {
        #[serde(default)]
        destination_content_ids: Vec<ContentId>,
    },
    /// Single relation.
    Relation {
        destination_content_id: Option<ContentId>,
    },
    Text {
        text: String,
    },
    Integer {
        value: i64,
    },
    Boolean {
        value: bool,
    },
    Empty,
}

impl FieldValue {
    /// Destination ids of a relation list value; `None` for any other value.
    pub fn relation_list(&self) -> Option<&[ContentId]> {
        match self {
            FieldValue::RelationList {
                destination_content_ids,
            } => Some(destination_content_ids),
            _ => None,
        }
    }
}

/// A node in the content tree placing a content item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Location {
    pub id: LocationId,

    pub content_id: ContentId,

    #[serde(default)]
    pub parent_location_id: Option<LocationId>,

    /// Materialized path, e.g. "/1/2/42/".
    #[serde(default)]
    pub path_string: String,

    #[serde(default)]
    pub depth: i32,

    #[serde(default)]
    pub priority: i32,

    /// Hidden explicitly.
    #[serde(default)]
    pub hidden: bool,

    /// Hidden through an ancestor.
    #[serde(default)]
    pub invisible: bool,
}

impl Location {
    /// Whether the location is visible (neither hidden nor invisible).
    pub fn is_visible(&self) -> bool {
        !self.hidden && !self.invisible
    }
}

/// Relation kinds recorded by the repository.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    #[default]
    Common,
    Embed,
    Link,
    Field,
    Asset,
}

/// A relation between two content items.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Relation {
    pub source_content_id: ContentId,

    pub destination_content_id: ContentId,

    /// Field the relation was made through, for field relations.
    #[serde(default)]
    pub field_identifier: Option<String>,

    #[serde(default)]
    pub kind: RelationKind,
}

/// Content type metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContentType {
    pub id: ContentTypeId,
    pub identifier: String,
    #[serde(default)]
    pub name: String,
}
