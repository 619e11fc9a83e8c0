// Resume structuring prompt templates.

pub const RESUME_PARSE_PROMPT: &str = r#"You are an intelligent resume parser.

Task:
Extract structured information from the provided resume text and hyperlinks.
Return strictly valid JSON with keys:
- name, email, phone, location
- links: {linkedin, github, portfolio, others}
- summary
- skills
- education: list of {degree, institution, year, score}
- experience: list of {company, role, duration, description}
- projects: list of {title, description, technologies}
- certifications
- achievements

Resume Text:
{resume_text}

Extracted Hyperlinks:
{hyperlinks}

Instructions:
1. Ensure JSON is valid.
2. Deduplicate skills and links.
3. Return lists where applicable."#;

pub fn build_parse_prompt(resume_text: &str, hyperlinks: &[String]) -> String {
    let links = serde_json::to_string(hyperlinks).unwrap_or_else(|_| "[]".to_string());
    RESUME_PARSE_PROMPT
        .replace("{hyperlinks}", &links)
        .replace("{resume_text}", resume_text)
}
