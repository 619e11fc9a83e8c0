// Shared prompt constants.
// Each service that needs LLM calls defines its own prompts.rs alongside it.

/// System instruction that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// System instruction for free-text recruiter feedback.
pub const PLAIN_TEXT_SYSTEM: &str = "You are an expert technical recruiter. \
    Respond with plain text only. Do NOT use markdown headings or code fences.";
