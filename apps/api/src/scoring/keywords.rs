//! Case-insensitive keyword containment shared by every relevance check
//! (projects, certifications, achievements, summary).

use crate::roles::RoleProfile;

/// Lower-cased role vocabulary. A text is relevant when any term occurs in it as a
/// substring; no tokenization.
#[derive(Debug, Clone, Default)]
pub struct KeywordSet {
    terms: Vec<String>,
}

impl KeywordSet {
    pub fn from_profile(profile: &RoleProfile) -> Self {
        Self::new(profile.keywords())
    }

    pub fn new<S: AsRef<str>>(terms: impl IntoIterator<Item = S>) -> Self {
        Self {
            terms: terms
                .into_iter()
                .map(|t| t.as_ref().to_lowercase())
                .filter(|t| !t.is_empty())
                .collect(),
        }
    }

    pub fn matches(&self, text: &str) -> bool {
        if self.terms.is_empty() {
            return false;
        }
        let haystack = text.to_lowercase();
        self.terms.iter().any(|term| haystack.contains(term.as_str()))
    }

    pub fn matches_any<S: AsRef<str>>(&self, texts: &[S]) -> bool {
        texts.iter().any(|t| self.matches(t.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substring_match_is_case_insensitive() {
        let keywords = KeywordSet::new(["Python", "SQL"]);
        assert!(keywords.matches("Built a PYTHON scraper"));
        assert!(keywords.matches("PostgreSQL tuning"));
        assert!(!keywords.matches("Java microservices"));
    }

    #[test]
    fn test_empty_set_matches_nothing() {
        let keywords = KeywordSet::new(Vec::<String>::new());
        assert!(!keywords.matches("anything"));
    }

    #[test]
    fn test_blank_terms_are_dropped() {
        let keywords = KeywordSet::new(["", "go"]);
        assert!(!keywords.matches("rust"));
        assert!(keywords.matches("Google Cloud"));
    }

    #[test]
    fn test_matches_any() {
        let keywords = KeywordSet::new(["docker"]);
        assert!(keywords.matches_any(&["AWS Certified", "Docker Certified Associate"]));
        assert!(!keywords.matches_any::<&str>(&[]));
    }
}
