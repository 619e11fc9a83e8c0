// Feedback generation prompt templates.

pub const FEEDBACK_PROMPT_TEMPLATE: &str = r#"You are an expert recruiter.
Evaluate this resume for role: {role}, Candidate type: {candidate_type}

Resume Data:
{resume_json}

Guidelines:
1. Generate 9-12 concise bullet points, max 18 words each.
2. Focus on strengths, improvement areas, skills, projects, achievements, certifications.
3. Tailor suggestions strictly to role and candidate type.
4. Use action verbs.

Output:
- Bullet points only as plain text."#;
