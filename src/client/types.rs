// ABOUTME: Core types for the authoring API - application specs, entities,
// ABOUTME: identifiers, and the input validation applied before any request.

use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ClientError;

static LOCALE_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[a-z]{2,3}(-[a-z0-9]{2,8})*$").expect("locale pattern is valid")
});

/// Server-assigned application identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppId(String);

impl AppId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Server-assigned entity identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parameters for creating an application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationSpec {
    pub name: String,
    pub culture: String,
    #[serde(rename = "initialVersionId")]
    pub version_id: String,
    pub description: String,
}

impl ApplicationSpec {
    /// Create a spec with the default culture and no description.
    pub fn new(name: impl Into<String>, version_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            culture: "en-us".to_string(),
            version_id: version_id.into(),
            description: String::new(),
        }
    }

    /// Create a spec whose name is made unique by appending a millisecond timestamp.
    pub fn timestamped(
        base_name: &str,
        timestamp_millis: i64,
        version_id: impl Into<String>,
    ) -> Self {
        Self::new(format!("{}-{}", base_name, timestamp_millis), version_id)
    }

    /// Set the locale.
    pub fn culture(mut self, culture: impl Into<String>) -> Self {
        self.culture = culture.into();
        self
    }

    /// Set the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Check the constraints the service would otherwise reject.
    pub fn validate(&self) -> Result<(), ClientError> {
        if self.name.trim().is_empty() {
            return Err(ClientError::Validation(
                "application name must not be empty".to_string(),
            ));
        }
        if self.version_id.trim().is_empty() {
            return Err(ClientError::Validation(
                "version id must not be empty".to_string(),
            ));
        }
        if !is_locale_tag(&self.culture) {
            return Err(ClientError::Validation(format!(
                "'{}' is not a valid locale tag",
                self.culture
            )));
        }
        Ok(())
    }
}

/// Returns true if `tag` looks like a locale tag such as `en-us` or `zh-Hans-CN`.
pub fn is_locale_tag(tag: &str) -> bool {
    LOCALE_TAG.is_match(tag)
}

/// Which flavour of entity an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Simple,
    Hierarchical,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Simple => write!(f, "simple"),
            EntityKind::Hierarchical => write!(f, "hierarchical"),
        }
    }
}

/// An entity to attach to an application version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntitySpec {
    Simple { name: String },
    Hierarchical { name: String, children: Vec<String> },
}

impl EntitySpec {
    pub fn simple(name: impl Into<String>) -> Self {
        Self::Simple { name: name.into() }
    }

    pub fn hierarchical<I, S>(name: impl Into<String>, children: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Hierarchical {
            name: name.into(),
            children: children.into_iter().map(Into::into).collect(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            EntitySpec::Simple { name } | EntitySpec::Hierarchical { name, .. } => name,
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            EntitySpec::Simple { .. } => EntityKind::Simple,
            EntitySpec::Hierarchical { .. } => EntityKind::Hierarchical,
        }
    }
}

pub(crate) fn validate_entity_name(name: &str) -> Result<(), ClientError> {
    if name.trim().is_empty() {
        return Err(ClientError::Validation(
            "entity name must not be empty".to_string(),
        ));
    }
    Ok(())
}

pub(crate) fn validate_children(children: &[String]) -> Result<(), ClientError> {
    if children.is_empty() {
        return Err(ClientError::Validation(
            "hierarchical entity needs at least one child".to_string(),
        ));
    }
    let mut seen = HashSet::with_capacity(children.len());
    for child in children {
        if child.trim().is_empty() {
            return Err(ClientError::Validation(
                "child labels must not be empty".to_string(),
            ));
        }
        if !seen.insert(child.as_str()) {
            return Err(ClientError::Validation(format!(
                "duplicate child label '{}'",
                child
            )));
        }
    }
    Ok(())
}

/// Application details returned by the read operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationInfo {
    pub id: AppId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub culture: String,
    #[serde(default)]
    pub active_version: Option<String>,
    #[serde(default)]
    pub versions_count: u32,
}
