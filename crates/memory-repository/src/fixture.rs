//! Repository fixtures loaded from YAML or JSON.
//!
//! ```yaml
//! content_types:
//!   - { id: 1, identifier: article, name: Article }
//! contents:
//!   - id: 1
//!     content_type: article
//!     name: Home
//!     main_location_id: 2
//!     fields:
//!       - identifier: related
//!         language_code: eng-GB
//!         value: { type: relation_list, destination_content_ids: [10, 20] }
//! locations:
//!   - { id: 2, content_id: 1, path_string: /1/2/, depth: 1 }
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use layouts_relation_query::repository::{
    Content, ContentId, ContentInfo, ContentType, Field, Location, LocationId, Relation,
};

fn default_language() -> String {
    "eng-GB".to_string()
}

/// Content entry of a fixture. The content type is referenced by identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureContent {
    pub id: ContentId,
    pub content_type: String,
    pub name: String,
    #[serde(default)]
    pub main_location_id: Option<LocationId>,
    #[serde(default = "default_language")]
    pub main_language_code: String,
    #[serde(default)]
    pub section_identifier: String,
    #[serde(default)]
    pub published: i64,
    #[serde(default)]
    pub modified: i64,
    #[serde(default)]
    pub fields: Vec<Field>,
}

/// Serializable repository contents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RepositoryFixture {
    #[serde(default)]
    pub content_types: Vec<ContentType>,
    #[serde(default)]
    pub contents: Vec<FixtureContent>,
    #[serde(default)]
    pub locations: Vec<Location>,
    /// Relations in addition to the ones implied by relation fields.
    #[serde(default)]
    pub relations: Vec<Relation>,
}

impl RepositoryFixture {
    /// Parse a YAML fixture. JSON parses too, being a subset.
    pub fn from_yaml(source: &str) -> Result<Self> {
        serde_yml::from_str(source).context("Failed to parse repository fixture")
    }

    /// Parse a JSON fixture.
    pub fn from_json(source: &str) -> Result<Self> {
        serde_json::from_str(source).context("Failed to parse repository fixture")
    }

    /// Load a fixture file, choosing the format by extension.
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read fixture {}", path.display()))?;

        let fixture = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&source),
            _ => Self::from_yaml(&source),
        };
        fixture.with_context(|| format!("Invalid fixture {}", path.display()))
    }
}

impl FixtureContent {
    /// Resolve into a content value; unknown content types are an error.
    pub(crate) fn into_content(self, content_types: &[ContentType]) -> Result<Content> {
        let content_type = content_types
            .iter()
            .find(|t| t.identifier == self.content_type)
            .with_context(|| {
                format!(
                    "content {} references unknown content type '{}'",
                    self.id, self.content_type
                )
            })?;

        Ok(Content {
            info: ContentInfo {
                id: self.id,
                content_type_id: content_type.id,
                name: self.name,
                main_location_id: self.main_location_id,
                main_language_code: self.main_language_code,
                section_identifier: self.section_identifier,
                published: self.published,
                modified: self.modified,
            },
            content_type_identifier: self.content_type,
            fields: self.fields,
        })
    }
}
