//! Resume structuring — turns extracted document text into a `ResumeRecord`.
//!
//! The model call is an external collaborator behind `ResumeStructurer`, carried in
//! `AppState` as `Arc<dyn ResumeStructurer>`. A failed call never aborts an
//! evaluation: `structure_or_empty` degrades to the empty record.

use async_trait::async_trait;
use serde_json::Value;
use tracing::warn;

use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{LlmClient, LlmError};
use crate::resume::model::ResumeRecord;
use crate::resume::prompts::build_parse_prompt;

#[async_trait]
pub trait ResumeStructurer: Send + Sync {
    async fn structure(
        &self,
        raw_text: &str,
        hyperlinks: &[String],
    ) -> Result<ResumeRecord, LlmError>;
}

/// Structurer backed by the generative model.
pub struct LlmResumeStructurer(pub LlmClient);

#[async_trait]
impl ResumeStructurer for LlmResumeStructurer {
    async fn structure(
        &self,
        raw_text: &str,
        hyperlinks: &[String],
    ) -> Result<ResumeRecord, LlmError> {
        let prompt = build_parse_prompt(raw_text, hyperlinks);
        let value: Value = self.0.call_json(&prompt, JSON_ONLY_SYSTEM).await?;
        let mut record = ResumeRecord::from_value(value);
        record.normalize_skills();
        Ok(record)
    }
}

/// Runs the structurer; on failure returns the empty record and a user-facing warning.
pub async fn structure_or_empty(
    structurer: &dyn ResumeStructurer,
    raw_text: &str,
    hyperlinks: &[String],
) -> (ResumeRecord, Option<String>) {
    match structurer.structure(raw_text, hyperlinks).await {
        Ok(record) => (record, None),
        Err(e) => {
            warn!("Resume structuring failed, scoring an empty record: {e}");
            (
                ResumeRecord::default(),
                Some(format!("Resume parsing failed: {e}")),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingStructurer;

    #[async_trait]
    impl ResumeStructurer for FailingStructurer {
        async fn structure(&self, _: &str, _: &[String]) -> Result<ResumeRecord, LlmError> {
            Err(LlmError::EmptyContent)
        }
    }

    struct FixedStructurer(ResumeRecord);

    #[async_trait]
    impl ResumeStructurer for FixedStructurer {
        async fn structure(&self, _: &str, _: &[String]) -> Result<ResumeRecord, LlmError> {
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn test_failure_degrades_to_empty_record() {
        let (record, warning) = structure_or_empty(&FailingStructurer, "text", &[]).await;
        assert_eq!(record, ResumeRecord::default());
        assert!(warning.unwrap().contains("empty content"));
    }

    #[tokio::test]
    async fn test_success_has_no_warning() {
        let expected = ResumeRecord {
            name: Some("Kiran".to_string()),
            ..Default::default()
        };
        let (record, warning) =
            structure_or_empty(&FixedStructurer(expected.clone()), "text", &[]).await;
        assert_eq!(record, expected);
        assert!(warning.is_none());
    }
}
