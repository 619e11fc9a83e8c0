//! Recruiter-style feedback for an evaluated resume.
//!
//! Not part of the score. `FeedbackGenerator` is carried in `AppState` as
//! `Arc<dyn FeedbackGenerator>`; failures degrade to `FALLBACK_FEEDBACK`.

use async_trait::async_trait;
use tracing::warn;

pub mod prompts;

use crate::llm_client::prompts::PLAIN_TEXT_SYSTEM;
use crate::llm_client::{LlmClient, LlmError};
use crate::resume::model::ResumeRecord;
use crate::scoring::CandidateType;
use prompts::FEEDBACK_PROMPT_TEMPLATE;

pub const FALLBACK_FEEDBACK: &str = "⚠️ AI feedback not available.";

#[async_trait]
pub trait FeedbackGenerator: Send + Sync {
    async fn generate(
        &self,
        record: &ResumeRecord,
        role: &str,
        candidate_type: CandidateType,
    ) -> Result<String, LlmError>;
}

pub struct LlmFeedbackGenerator(pub LlmClient);

#[async_trait]
impl FeedbackGenerator for LlmFeedbackGenerator {
    async fn generate(
        &self,
        record: &ResumeRecord,
        role: &str,
        candidate_type: CandidateType,
    ) -> Result<String, LlmError> {
        let prompt = build_feedback_prompt(record, role, candidate_type)?;
        let text = self.0.call(&prompt, PLAIN_TEXT_SYSTEM).await?;
        Ok(text.trim().to_string())
    }
}

pub fn build_feedback_prompt(
    record: &ResumeRecord,
    role: &str,
    candidate_type: CandidateType,
) -> Result<String, LlmError> {
    let resume_json = serde_json::to_string(record)?;
    Ok(FEEDBACK_PROMPT_TEMPLATE
        .replace("{role}", role)
        .replace("{candidate_type}", candidate_type.capitalized())
        .replace("{resume_json}", &resume_json))
}

/// Runs the generator; on failure returns the fixed fallback and a user-facing warning.
pub async fn generate_or_fallback(
    generator: &dyn FeedbackGenerator,
    record: &ResumeRecord,
    role: &str,
    candidate_type: CandidateType,
) -> (String, Option<String>) {
    match generator.generate(record, role, candidate_type).await {
        Ok(text) if !text.trim().is_empty() => (text, None),
        Ok(_) => {
            warn!("Feedback generation returned no text");
            (
                FALLBACK_FEEDBACK.to_string(),
                Some("AI feedback generation returned no text".to_string()),
            )
        }
        Err(e) => {
            warn!("Feedback generation failed: {e}");
            (
                FALLBACK_FEEDBACK.to_string(),
                Some(format!("AI feedback generation failed: {e}")),
            )
        }
    }
}

/// Replaces leading `-` / `*` bullet markers with `•` for display.
pub fn render_bullets(feedback: &str) -> String {
    feedback
        .lines()
        .map(|line| {
            let trimmed = line.trim_start();
            let indent = &line[..line.len() - trimmed.len()];
            match trimmed
                .strip_prefix("- ")
                .or_else(|| trimmed.strip_prefix("* "))
            {
                Some(rest) => format!("{indent}• {rest}"),
                None => line.to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
