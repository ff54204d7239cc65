// Prompt constants for resume tailoring.
// Reuses cross-cutting fragments from llm_client::prompts.

use crate::llm_client::prompts::{JSON_ONLY_INSTRUCTION, TRUTHFULNESS_INSTRUCTION};

/// System prompt template.
/// Replace: {resume}, {truthfulness_instruction}, {json_only_instruction}
pub const RESUME_SYSTEM_TEMPLATE: &str = r#"You are a resume tailoring expert. You will receive a candidate's full resume and a job description. Your job is to tailor the resume to maximize relevance for the specific role while remaining truthful.

Here is the candidate's full resume:

---
{resume}
---

Instructions:
1. Rewrite the professional summary to highlight the aspects most relevant to the target job.
2. Reorder and selectively emphasize featured shipments (projects) that are most relevant. Include 2-4 shipments. Adjust bullet points to emphasize relevant skills.
3. Rewrite experience bullets to emphasize skills and achievements most relevant to the job. Keep every position but adjust emphasis.
4. Reorder and emphasize skills most relevant to the role.
5. {truthfulness_instruction}

Return a JSON object with this exact structure:
{
  "summary": "tailored professional summary string",
  "featuredShipments": [
    {
      "name": "Project Name",
      "role": "Role Title",
      "mission": "One-line mission",
      "bullets": ["bullet 1", "bullet 2"]
    }
  ],
  "experience": [
    {
      "title": "Job Title",
      "company": "Company Name",
      "location": "City, State",
      "when": "Date Range",
      "bullets": ["bullet 1", "bullet 2"]
    }
  ],
  "skills": {
    "Category Name": ["skill1", "skill2"]
  }
}

{json_only_instruction}"#;

/// User message template. Replace `{job_description}` before sending.
pub const RESUME_USER_TEMPLATE: &str =
    "Here is the job description I'm applying for:\n\n{job_description}";

/// Renders the system prompt around the candidate's resume text.
pub fn build_system_prompt(resume: &str) -> String {
    RESUME_SYSTEM_TEMPLATE
        .replace("{truthfulness_instruction}", TRUTHFULNESS_INSTRUCTION)
        .replace("{json_only_instruction}", JSON_ONLY_INSTRUCTION)
        .replace("{resume}", resume.trim())
}

pub fn build_user_prompt(job_description: &str) -> String {
    RESUME_USER_TEMPLATE.replace("{job_description}", job_description)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_prompt_embeds_resume_and_fragments() {
        let prompt = build_system_prompt("\nJane Doe\nStaff Engineer\n");
        assert!(prompt.contains("---\nJane Doe\nStaff Engineer\n---"));
        assert!(prompt.contains(TRUTHFULNESS_INSTRUCTION));
        assert!(prompt.ends_with(JSON_ONLY_INSTRUCTION));
        assert!(!prompt.contains("{resume}"));
    }

    #[test]
    fn test_resume_placeholders_are_substituted_last() {
        // Braces inside the resume text must survive untouched.
        let prompt = build_system_prompt("Skills: {json_only_instruction}");
        assert!(prompt.contains("Skills: {json_only_instruction}"));
    }

    #[test]
    fn test_user_prompt() {
        assert_eq!(
            build_user_prompt("Senior Engineer role"),
            "Here is the job description I'm applying for:\n\nSenior Engineer role"
        );
    }
}
