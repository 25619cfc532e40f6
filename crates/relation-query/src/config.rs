//! Handler settings loaded from environment variables.

use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Handler behavior profile.
///
/// `Legacy` reproduces the oldest release of the query types: explicit
/// `limit`/`offset` parameters, content types filtered by numeric id and
/// result counting always disabled on value queries.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    #[default]
    Current,
    Legacy,
}

impl FromStr for Profile {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "current" => Ok(Profile::Current),
            "legacy" => Ok(Profile::Legacy),
            _ => Err(ConfigError::InvalidValue {
                name: "RELATION_QUERY_PROFILE",
                value: s.to_string(),
            }),
        }
    }
}

/// Settings injected into every handler at construction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandlerSettings {
    /// Prioritized language codes used for location lookup, field
    /// translation and search (default: eng-GB).
    pub languages: Vec<String>,

    /// Behavior profile (default: current).
    pub profile: Profile,

    /// Whether the host supports parameter groups. When false, no parameter
    /// is placed in the advanced group (default: true).
    pub advanced_groups: bool,
}

impl Default for HandlerSettings {
    fn default() -> Self {
        Self {
            languages: vec!["eng-GB".to_string()],
            profile: Profile::Current,
            advanced_groups: true,
        }
    }
}

impl HandlerSettings {
    /// Load settings from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load settings through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let languages: Vec<String> = lookup("RELATION_QUERY_LANGUAGES")
            .map(|v| {
                v.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();
        let languages = if languages.is_empty() {
            Self::default().languages
        } else {
            languages
        };

        let profile = match lookup("RELATION_QUERY_PROFILE") {
            Some(v) => v.parse()?,
            None => Profile::default(),
        };

        let advanced_groups = match lookup("RELATION_QUERY_ADVANCED_GROUPS") {
            Some(v) => parse_bool(&v).ok_or(ConfigError::InvalidValue {
                name: "RELATION_QUERY_ADVANCED_GROUPS",
                value: v,
            })?,
            None => true,
        };

        Ok(Self {
            languages,
            profile,
            advanced_groups,
        })
    }

    /// Set the language list.
    pub fn with_languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.languages = languages.into_iter().map(Into::into).collect();
        self
    }

    /// Set the behavior profile.
    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profile = profile;
        self
    }

    /// Enable or disable the advanced parameter group.
    pub fn with_advanced_groups(mut self, enabled: bool) -> Self {
        self.advanced_groups = enabled;
        self
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
