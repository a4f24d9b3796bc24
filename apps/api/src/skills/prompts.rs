use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;

pub const SKILLS_SYSTEM_ROLE: &str =
    "You are an expert HR professional skilled at identifying technical and soft skills from resumes.";

pub fn skills_system() -> String {
    format!("{SKILLS_SYSTEM_ROLE} {JSON_ONLY_INSTRUCTION}")
}

pub fn build_skills_prompt(resume_text: &str) -> String {
    format!(
        r#"Extract technical and soft skills from the following resume text.
Return only a JSON object with the skills, properly categorized.
Format: {{"technical_skills": [], "soft_skills": []}}

Resume text:
{resume_text}"#
    )
}
