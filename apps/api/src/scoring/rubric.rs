//! ATS section checks for a structured resume against one role's skills and tools.
//!
//! Each section yields a `Verdict` and a non-negative contribution bounded by its
//! weight. Contributions stay fractional until the final total, which is rounded
//! (ties to even) once and capped at 100.

use std::collections::HashSet;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::resume::model::{is_present, ResumeRecord};
use crate::roles::RoleProfile;
use crate::scoring::classifier::CandidateType;
use crate::scoring::keywords::KeywordSet;
use crate::scoring::verdict::Verdict;

/// Share of role terms at which Skills / Tools earn full credit.
const FULL_MATCH_PERCENT: f64 = 80.0;
/// Summaries longer than this many characters earn full credit.
const SUMMARY_MIN_CHARS: usize = 30;
pub const MAX_SCORE: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Summary,
    Skills,
    Tools,
    Projects,
    ContactInfo,
    Links,
    Certifications,
    Achievements,
    RoleRelevance,
}

impl Section {
    pub const ALL: [Section; 9] = [
        Section::Summary,
        Section::Skills,
        Section::Tools,
        Section::Projects,
        Section::ContactInfo,
        Section::Links,
        Section::Certifications,
        Section::Achievements,
        Section::RoleRelevance,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Section::Summary => "Summary",
            Section::Skills => "Skills",
            Section::Tools => "Tools",
            Section::Projects => "Projects",
            Section::ContactInfo => "Contact Info",
            Section::Links => "Links",
            Section::Certifications => "Certifications",
            Section::Achievements => "Achievements",
            Section::RoleRelevance => "Role Relevance",
        }
    }

    /// Maximum points the section can contribute.
    pub fn weight(self) -> f64 {
        match self {
            Section::Skills => 30.0,
            Section::Projects => 20.0,
            Section::Summary | Section::Tools | Section::ContactInfo => 10.0,
            Section::Links
            | Section::Certifications
            | Section::Achievements
            | Section::RoleRelevance => 5.0,
        }
    }
}

impl Serialize for Section {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionOutcome {
    pub section: Section,
    pub verdict: Verdict,
    pub points: f64,
}

impl SectionOutcome {
    fn new(section: Section, verdict: Verdict, points: f64) -> Self {
        Self {
            section,
            verdict,
            points,
        }
    }

    fn full(section: Section) -> Self {
        Self::new(section, Verdict::Good, section.weight())
    }

    fn none(section: Section, verdict: Verdict) -> Self {
        Self::new(section, verdict, 0.0)
    }
}

/// Outcomes in rubric order. Serializes as an ordered object of section name to
/// status string, the shape of the exported report.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionReport {
    outcomes: Vec<SectionOutcome>,
}

impl SectionReport {
    pub fn outcomes(&self) -> &[SectionOutcome] {
        &self.outcomes
    }

    #[cfg(test)]
    pub fn verdict(&self, section: Section) -> Option<Verdict> {
        self.get(section).map(|o| o.verdict)
    }

    #[cfg(test)]
    pub fn get(&self, section: Section) -> Option<&SectionOutcome> {
        self.outcomes.iter().find(|o| o.section == section)
    }

    /// Sum of fractional contributions before rounding.
    pub fn raw_points(&self) -> f64 {
        self.outcomes.iter().map(|o| o.points).sum()
    }

    pub fn total(&self) -> u32 {
        let rounded = self.raw_points().round_ties_even().max(0.0) as u32;
        rounded.min(MAX_SCORE)
    }
}

impl Serialize for SectionReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.outcomes.len()))?;
        for outcome in &self.outcomes {
            map.serialize_entry(outcome.section.name(), &outcome.verdict.status_line())?;
        }
        map.end()
    }
}

/// Scores a record against a role profile. Total function: never fails, never
/// divides by zero.
pub fn score(
    record: &ResumeRecord,
    profile: &RoleProfile,
    candidate_type: CandidateType,
) -> (SectionReport, u32) {
    let keywords = KeywordSet::from_profile(profile);

    let outcomes = Section::ALL
        .iter()
        .map(|&section| match section {
            Section::Summary => score_summary(record),
            Section::Skills => score_term_match(section, &record.skills, &profile.skills),
            Section::Tools => score_term_match(section, &record.skills, &profile.tools),
            Section::Projects => score_projects(record, &keywords, candidate_type),
            Section::ContactInfo => score_contact_info(record),
            Section::Links => score_links(record),
            Section::Certifications => {
                score_relevant_list(section, &record.certifications, &keywords)
            }
            Section::Achievements => score_relevant_list(section, &record.achievements, &keywords),
            Section::RoleRelevance => score_role_relevance(record, &keywords),
        })
        .collect();

    let report = SectionReport { outcomes };
    let total = report.total();
    (report, total)
}

fn score_summary(record: &ResumeRecord) -> SectionOutcome {
    let section = Section::Summary;
    match record.summary.as_deref() {
        None | Some("") => SectionOutcome::none(section, Verdict::Missing),
        Some(s) if s.chars().count() > SUMMARY_MIN_CHARS => SectionOutcome::full(section),
        Some(_) => SectionOutcome::new(section, Verdict::Improve, section.weight() / 2.0),
    }
}

/// Exact, case-insensitive term equality between resume skills and role terms.
/// A resume listing no skills at all is Missing rather than irrelevant.
fn score_term_match(
    section: Section,
    resume_terms: &[String],
    role_terms: &[String],
) -> SectionOutcome {
    if role_terms.is_empty() || resume_terms.is_empty() {
        return SectionOutcome::none(section, Verdict::Missing);
    }

    let role: HashSet<String> = role_terms.iter().map(|t| t.to_lowercase()).collect();
    let matched = resume_terms
        .iter()
        .map(|t| t.to_lowercase())
        .filter(|t| role.contains(t))
        .collect::<HashSet<_>>()
        .len();

    if matched == 0 {
        return SectionOutcome::none(section, Verdict::PresentButIrrelevant);
    }

    let percent = matched as f64 / role.len() as f64 * 100.0;
    if percent >= FULL_MATCH_PERCENT {
        SectionOutcome::full(section)
    } else {
        SectionOutcome::new(section, Verdict::Improve, percent / 100.0 * section.weight())
    }
}

fn score_projects(
    record: &ResumeRecord,
    keywords: &KeywordSet,
    candidate_type: CandidateType,
) -> SectionOutcome {
    let section = Section::Projects;
    let projects = &record.projects;
    if projects.is_empty() {
        return SectionOutcome::none(section, Verdict::Missing);
    }

    let related = projects
        .iter()
        .filter(|p| keywords.matches(&p.searchable_text()))
        .count();
    if related == 0 {
        return SectionOutcome::none(section, Verdict::PresentButIrrelevant);
    }

    // Credit is proportional to all projects once any one is relevant.
    let min_projects = candidate_type.min_projects();
    if projects.len() >= min_projects {
        SectionOutcome::full(section)
    } else {
        let ratio = projects.len() as f64 / min_projects as f64;
        SectionOutcome::new(section, Verdict::Improve, ratio * section.weight())
    }
}

fn score_contact_info(record: &ResumeRecord) -> SectionOutcome {
    let section = Section::ContactInfo;
    let fields = [&record.name, &record.email, &record.phone, &record.location];
    let present = fields.iter().filter(|f| is_present(f)).count();
    if present == fields.len() {
        SectionOutcome::full(section)
    } else {
        // Never Missing: zero fields still reports Improve with zero points.
        let ratio = present as f64 / fields.len() as f64;
        SectionOutcome::new(section, Verdict::Improve, ratio * section.weight())
    }
}

fn score_links(record: &ResumeRecord) -> SectionOutcome {
    let section = Section::Links;
    if is_present(&record.links.linkedin) || is_present(&record.links.github) {
        SectionOutcome::full(section)
    } else {
        SectionOutcome::none(section, Verdict::Missing)
    }
}

/// Binary check used by Certifications and Achievements.
fn score_relevant_list(
    section: Section,
    items: &[String],
    keywords: &KeywordSet,
) -> SectionOutcome {
    if items.is_empty() {
        SectionOutcome::none(section, Verdict::Missing)
    } else if !keywords.matches_any(items) {
        SectionOutcome::none(section, Verdict::PresentButIrrelevant)
    } else {
        SectionOutcome::full(section)
    }
}

fn score_role_relevance(record: &ResumeRecord, keywords: &KeywordSet) -> SectionOutcome {
    let section = Section::RoleRelevance;
    match record.summary.as_deref() {
        Some(summary) if !summary.is_empty() && keywords.matches(summary) => {
            SectionOutcome::full(section)
        }
        _ => SectionOutcome::none(section, Verdict::Missing),
    }
}
