//! Structured resume record consumed by the rubric.
//!
//! Every field defaults when absent and degrades to its default when the
//! structuring model returns the wrong shape, so scoring never sees a
//! half-parsed record.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::resume::lenient;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeLinks {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub linkedin: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub github: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub portfolio: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub others: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub degree: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub institution: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub year: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub score: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub company: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub role: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub duration: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectEntry {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub technologies: Vec<String>,
}

impl ProjectEntry {
    /// Title and description joined by a single space, the text searched for role keywords.
    pub fn searchable_text(&self) -> String {
        format!(
            "{} {}",
            self.title.as_deref().unwrap_or_default(),
            self.description.as_deref().unwrap_or_default()
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeRecord {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub links: ResumeLinks,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub summary: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub skills: Vec<String>,
    #[serde(default, deserialize_with = "lenient::record_list")]
    pub education: Vec<EducationEntry>,
    #[serde(default, deserialize_with = "lenient::record_list")]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default, deserialize_with = "lenient::record_list")]
    pub projects: Vec<ProjectEntry>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub certifications: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub achievements: Vec<String>,
}

impl ResumeRecord {
    /// Builds a record from arbitrary JSON. Never fails: anything that is not an
    /// object yields the empty record.
    pub fn from_value(value: Value) -> Self {
        serde_json::from_value(value).unwrap_or_default()
    }

    /// Deduplicates skills case-insensitively (first spelling wins) and sorts them.
    pub fn normalize_skills(&mut self) {
        let mut seen = std::collections::HashSet::new();
        self.skills.retain(|s| {
            let trimmed = s.trim();
            !trimmed.is_empty() && seen.insert(trimmed.to_lowercase())
        });
        for skill in &mut self.skills {
            *skill = skill.trim().to_string();
        }
        self.skills.sort_by_key(|s| s.to_lowercase());
    }
}

/// A scalar field counts as present when it holds a non-empty string.
pub fn is_present(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|s| !s.is_empty())
}
