//! Query type registry.
//!
//! Handler implementations are registered by handler name. Query types are
//! declared in YAML and activate a handler under their own identifier:
//!
//! ```yaml
//! query_types:
//!   relation_list:
//!     name: Relation list
//!     handler: relation_list
//! ```

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::HandlerSettings;
use crate::error::ConfigError;
use crate::handler::{QueryTypeHandler, RelationListQueryHandler, ReverseRelationListQueryHandler};
use crate::repository::{ContentProvider, Repository};

// ---------------------------------------------------------------------------
// Serde declaration types
// ---------------------------------------------------------------------------

/// Top-level query type declaration file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct QueryTypeDeclarations {
    #[serde(default)]
    pub query_types: BTreeMap<String, QueryTypeDeclaration>,
}

impl QueryTypeDeclarations {
    /// Parse declarations from YAML.
    pub fn from_yaml(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_yml::from_str(source)?)
    }
}

/// A single query type declaration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueryTypeDeclaration {
    /// Human readable name.
    pub name: String,
    /// Registered handler name.
    pub handler: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Validate a query type identifier: non-empty, lowercase alphanumeric or
/// underscore, starting with a letter, max 64 chars.
fn is_valid_identifier(identifier: &str) -> bool {
    !identifier.is_empty()
        && identifier.len() <= 64
        && identifier
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        && identifier.starts_with(|c: char| c.is_ascii_lowercase())
}

/// Two-level lookup: query type identifier → declaration → handler.
#[derive(Default)]
pub struct QueryTypeRegistry {
    handlers: HashMap<String, Arc<dyn QueryTypeHandler>>,
    query_types: BTreeMap<String, QueryTypeDeclaration>,
}

impl QueryTypeRegistry {
    /// Create a registry holding no handlers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with both relation list handlers registered.
    pub fn with_relation_handlers(
        repository: Repository,
        content_provider: Arc<dyn ContentProvider>,
        settings: HandlerSettings,
    ) -> Self {
        let mut registry = Self::new();
        registry.register_handler(
            "relation_list",
            Arc::new(RelationListQueryHandler::relation_list(
                repository.clone(),
                content_provider.clone(),
                settings.clone(),
            )),
        );
        registry.register_handler(
            "reverse_relation_list",
            Arc::new(ReverseRelationListQueryHandler::reverse_relation_list(
                repository,
                content_provider,
                settings,
            )),
        );
        registry
    }

    /// Register a handler implementation by name.
    pub fn register_handler(&mut self, name: &str, handler: Arc<dyn QueryTypeHandler>) {
        self.handlers.insert(name.to_string(), handler);
    }

    /// Apply declarations, validating that referenced handlers exist.
    ///
    /// Returns a warning for each rejected or overwriting declaration.
    pub fn apply_declarations(&mut self, declarations: QueryTypeDeclarations) -> Vec<String> {
        let mut warnings = Vec::new();

        for (identifier, declaration) in declarations.query_types {
            if !is_valid_identifier(&identifier) {
                warnings.push(format!(
                    "query type identifier '{identifier}' is invalid (must be lowercase alphanumeric/underscore, start with a letter)"
                ));
                continue;
            }
            if !self.handlers.contains_key(&declaration.handler) {
                warnings.push(format!(
                    "query type '{}' references unknown handler '{}'",
                    identifier, declaration.handler
                ));
                continue;
            }
            if self.query_types.contains_key(&identifier) {
                warnings.push(format!(
                    "query type '{identifier}' overwrites existing declaration"
                ));
            }

            debug!(
                query_type = %identifier,
                handler = %declaration.handler,
                enabled = declaration.enabled,
                "query type declared"
            );
            self.query_types.insert(identifier, declaration);
        }

        for warning in &warnings {
            warn!("{warning}");
        }
        warnings
    }

    /// Parse YAML declarations and apply them.
    pub fn load_yaml(&mut self, source: &str) -> Result<Vec<String>, ConfigError> {
        let declarations = QueryTypeDeclarations::from_yaml(source)?;
        Ok(self.apply_declarations(declarations))
    }

    /// Look up an enabled query type, returning its declaration and handler.
    pub fn get(&self, identifier: &str) -> Option<(&QueryTypeDeclaration, &dyn QueryTypeHandler)> {
        let declaration = self.query_types.get(identifier)?;
        if !declaration.enabled {
            return None;
        }
        let handler = self.handlers.get(&declaration.handler)?;
        Some((declaration, handler.as_ref()))
    }

    /// Shared handle to an enabled query type's handler.
    pub fn handler(&self, identifier: &str) -> Option<Arc<dyn QueryTypeHandler>> {
        let declaration = self.query_types.get(identifier)?;
        if !declaration.enabled {
            return None;
        }
        self.handlers.get(&declaration.handler).cloned()
    }

    /// Check if a query type is declared, enabled or not.
    pub fn has_query_type(&self, identifier: &str) -> bool {
        self.query_types.contains_key(identifier)
    }

    /// Identifiers of enabled query types, sorted.
    pub fn identifiers(&self) -> Vec<&str> {
        self.query_types
            .iter()
            .filter(|(_, d)| d.enabled)
            .map(|(id, _)| id.as_str())
            .collect()
    }
}

impl std::fmt::Debug for QueryTypeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut handlers: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        handlers.sort_unstable();
        f.debug_struct("QueryTypeRegistry")
            .field("handlers", &handlers)
            .field("query_types", &self.query_types)
            .finish()
    }
}
