//! Evaluation pipeline.
//!
//! `evaluate` is the pure entry point: classify, then score. `run` wraps it with the
//! external collaborators (document loader, structuring model, feedback model), each
//! passed in explicitly. Only document problems abort a run; model failures
//! degrade and surface as warnings.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

pub mod handlers;

use crate::document::load_document;
use crate::errors::AppError;
use crate::feedback::{generate_or_fallback, render_bullets, FeedbackGenerator};
use crate::resume::model::ResumeRecord;
use crate::resume::structurer::{structure_or_empty, ResumeStructurer};
use crate::roles::{RoleCatalog, RoleProfile};
use crate::scoring::verdict::Tone;
use crate::scoring::{classify, score, CandidateType, Section, SectionReport, Verdict};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub candidate_type: CandidateType,
    pub sections: SectionReport,
    pub score: u32,
}

/// Classifies the candidate and scores the record against the role.
pub fn evaluate(record: &ResumeRecord, profile: &RoleProfile, raw_text: &str) -> Evaluation {
    let candidate_type = classify(record, raw_text);
    let (sections, score) = score(record, profile, candidate_type);
    Evaluation {
        candidate_type,
        sections,
        score,
    }
}

/// One row of the section breakdown shown next to the score.
#[derive(Debug, Clone, Serialize)]
pub struct SectionDetail {
    pub section: Section,
    pub verdict: Verdict,
    pub status: String,
    pub tone: Tone,
    pub points: f64,
    pub max_points: f64,
}

pub fn section_details(report: &SectionReport) -> Vec<SectionDetail> {
    report
        .outcomes()
        .iter()
        .map(|o| SectionDetail {
            section: o.section,
            verdict: o.verdict,
            status: o.verdict.status_line(),
            tone: o.verdict.tone(),
            points: o.points,
            max_points: o.section.weight(),
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct DocumentUpload {
    pub filename: String,
    pub bytes: Bytes,
}

#[derive(Debug, Clone)]
pub struct EvaluationRequest {
    pub upload: DocumentUpload,
    pub category: String,
    pub role: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AtsReport {
    pub evaluation_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub category: String,
    pub role: String,
    pub candidate_type: CandidateType,
    pub score: u32,
    pub sections: SectionReport,
    pub details: Vec<SectionDetail>,
    pub feedback: String,
    /// `feedback` with bullet markers rendered as `•`.
    pub feedback_display: String,
    pub warnings: Vec<String>,
}

/// The downloadable report: `{sections, score, feedback}`.
#[derive(Debug, Clone, Serialize)]
pub struct ExportReport {
    pub sections: SectionReport,
    pub score: u32,
    pub feedback: String,
}

impl AtsReport {
    pub fn export(&self) -> ExportReport {
        ExportReport {
            sections: self.sections.clone(),
            score: self.score,
            feedback: self.feedback.clone(),
        }
    }
}

pub fn resolve_profile<'a>(
    catalog: &'a RoleCatalog,
    category: &str,
    role: &str,
) -> Result<&'a RoleProfile, AppError> {
    catalog.profile(category, role).ok_or_else(|| {
        AppError::NotFound(format!(
            "Role '{role}' not found in category '{category}'"
        ))
    })
}

/// Full pipeline: role lookup → document → structuring → scoring → feedback.
pub async fn run(
    catalog: &RoleCatalog,
    structurer: &dyn ResumeStructurer,
    feedback: &dyn FeedbackGenerator,
    request: EvaluationRequest,
) -> Result<AtsReport, AppError> {
    let profile = resolve_profile(catalog, &request.category, &request.role)?;

    if request.upload.bytes.is_empty() {
        return Err(AppError::Validation("Uploaded file is empty".to_string()));
    }

    let DocumentUpload { filename, bytes } = request.upload;
    let document = tokio::task::spawn_blocking(move || load_document(&filename, &bytes))
        .await
        .map_err(|e| AppError::UnprocessableEntity(format!("Document extraction aborted: {e}")))??;

    let mut warnings = Vec::new();

    let (record, warning) =
        structure_or_empty(structurer, &document.raw_text, &document.hyperlinks).await;
    warnings.extend(warning);

    let evaluation = evaluate(&record, profile, &document.raw_text);

    let (feedback_text, warning) =
        generate_or_fallback(feedback, &record, &request.role, evaluation.candidate_type).await;
    warnings.extend(warning);

    info!(
        "Evaluated resume for {} / {}: {} candidate, score {}",
        request.category, request.role, evaluation.candidate_type, evaluation.score
    );

    Ok(AtsReport {
        evaluation_id: Uuid::new_v4(),
        generated_at: Utc::now(),
        category: request.category,
        role: request.role,
        candidate_type: evaluation.candidate_type,
        score: evaluation.score,
        details: section_details(&evaluation.sections),
        sections: evaluation.sections,
        feedback_display: render_bullets(&feedback_text),
        feedback: feedback_text,
        warnings,
    })
}

#[cfg(test)]
pub(crate) mod test_support {
    use async_trait::async_trait;

    use crate::feedback::FeedbackGenerator;
    use crate::llm_client::LlmError;
    use crate::resume::model::ResumeRecord;
    use crate::resume::structurer::ResumeStructurer;
    use crate::roles::RoleCatalog;
    use crate::scoring::CandidateType;

    pub const CATALOG: &str = r#"{
        "Data & Analytics": {
            "Data Analyst": {"skills": ["Python", "SQL"], "tools": ["Tableau"]}
        }
    }"#;

    pub fn catalog() -> RoleCatalog {
        RoleCatalog::from_json(CATALOG).unwrap()
    }

    /// A real .docx with one paragraph per line.
    pub fn docx_bytes(lines: &[&str]) -> Vec<u8> {
        use docx_rs::{Docx, Paragraph, Run};

        let docx = lines.iter().fold(Docx::new(), |docx, line| {
            docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*line)))
        });
        let mut cursor = std::io::Cursor::new(Vec::new());
        docx.build().pack(&mut cursor).unwrap();
        cursor.into_inner()
    }

    pub struct StubStructurer(pub Option<ResumeRecord>);

    #[async_trait]
    impl ResumeStructurer for StubStructurer {
        async fn structure(&self, _: &str, _: &[String]) -> Result<ResumeRecord, LlmError> {
            self.0.clone().ok_or(LlmError::EmptyContent)
        }
    }

    pub struct StubFeedback(pub Option<String>);

    #[async_trait]
    impl FeedbackGenerator for StubFeedback {
        async fn generate(
            &self,
            _: &ResumeRecord,
            _: &str,
            _: CandidateType,
        ) -> Result<String, LlmError> {
            self.0.clone().ok_or(LlmError::RateLimited { retries: 3 })
        }
    }
}
