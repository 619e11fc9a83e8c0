//! Role catalog — category → role → `RoleProfile`, loaded once at startup and
//! shared read-only through `AppState`.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read role catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid role catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The skills and tools a role expects. Terms are unique case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RoleProfile {
    pub skills: Vec<String>,
    pub tools: Vec<String>,
}

impl RoleProfile {
    pub fn new<S: Into<String>>(
        skills: impl IntoIterator<Item = S>,
        tools: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            skills: dedup_terms(skills),
            tools: dedup_terms(tools),
        }
    }

    /// Lower-cased skills followed by tools, the vocabulary for relevance checks.
    pub fn keywords(&self) -> Vec<String> {
        self.skills
            .iter()
            .chain(self.tools.iter())
            .map(|k| k.to_lowercase())
            .collect()
    }
}

impl<'de> Deserialize<'de> for RoleProfile {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            #[serde(default)]
            skills: Vec<String>,
            #[serde(default)]
            tools: Vec<String>,
        }
        let raw = Raw::deserialize(deserializer)?;
        Ok(RoleProfile::new(raw.skills, raw.tools))
    }
}

fn dedup_terms<S: Into<String>>(terms: impl IntoIterator<Item = S>) -> Vec<String> {
    let mut seen = HashSet::new();
    terms
        .into_iter()
        .map(|t| t.into().trim().to_string())
        .filter(|t| !t.is_empty() && seen.insert(t.to_lowercase()))
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryListing {
    pub category: String,
    pub roles: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct RoleCatalog {
    categories: BTreeMap<String, BTreeMap<String, RoleProfile>>,
}

impl RoleCatalog {
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    pub fn profile(&self, category: &str, role: &str) -> Option<&RoleProfile> {
        self.categories.get(category)?.get(role)
    }

    pub fn listing(&self) -> Vec<CategoryListing> {
        self.categories
            .iter()
            .map(|(category, roles)| CategoryListing {
                category: category.clone(),
                roles: roles.keys().cloned().collect(),
            })
            .collect()
    }

    pub fn role_count(&self) -> usize {
        self.categories.values().map(BTreeMap::len).sum()
    }
}
