use crate::llm_client::prompts::or_not_specified;
use crate::models::seeker::SeekerProfile;

pub const ADVICE_SYSTEM: &str = "You are a career coach with expertise in helping job seekers.";

pub fn build_advice_prompt(seeker: &SeekerProfile, category: &str, question: &str) -> String {
    let experience = if seeker.experience_years == 0 {
        "Not specified".to_string()
    } else {
        seeker.experience_years.to_string()
    };

    format!(
        r#"Generate personalized career advice for a job seeker.

Job Seeker Profile:
- Skills: {skills}
- Experience: {experience} years
- Education: {education}

Advice Category: {category}
Specific Question: {question}

Provide detailed, actionable advice with examples where appropriate."#,
        skills = or_not_specified(&seeker.skills),
        education = or_not_specified(&seeker.education),
    )
}
