use std::fmt;

use serde::{Deserialize, Serialize};

use crate::resume::model::ResumeRecord;

/// Phrases in the raw document that mark an early-career candidate.
const FRESHER_SIGNALS: &[&str] = &["intern", "internship", "trainee", "fresher"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateType {
    Fresher,
    Experienced,
}

impl CandidateType {
    /// Project count that earns full Projects credit.
    pub fn min_projects(self) -> usize {
        match self {
            CandidateType::Fresher => 3,
            CandidateType::Experienced => 5,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CandidateType::Fresher => "fresher",
            CandidateType::Experienced => "experienced",
        }
    }

    pub fn capitalized(self) -> &'static str {
        match self {
            CandidateType::Fresher => "Fresher",
            CandidateType::Experienced => "Experienced",
        }
    }
}

impl fmt::Display for CandidateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fresher when there is no experience at all, or when the document mentions an
/// internship/trainee signal and lists at most one experience entry.
pub fn classify(record: &ResumeRecord, raw_text: &str) -> CandidateType {
    let experience = record.experience.len();
    if experience == 0 {
        return CandidateType::Fresher;
    }
    let text = raw_text.to_lowercase();
    let has_signal = FRESHER_SIGNALS.iter().any(|k| text.contains(k));
    if has_signal && experience <= 1 {
        CandidateType::Fresher
    } else {
        CandidateType::Experienced
    }
}
