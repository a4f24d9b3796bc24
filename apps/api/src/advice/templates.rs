// Canned advice served when the reasoning service cannot answer.

pub const SERVICE_NOTICE: &str =
    "Note: Personalized AI advice requires the AI service to be configured.";

const RESUME_ADVICE: &str = "Here are some general tips to strengthen your resume:

1. Tailor it to each role. Mirror the language of the job posting and move the most relevant experience to the top.

2. Lead with results. Start bullet points with strong action verbs and quantify outcomes wherever you can (for example, \"cut report generation time by 40%\").

3. Keep it scannable. One to two pages, consistent formatting, clear section headings and no dense paragraphs.

4. Put your skills where they are easy to find. List the technical and soft skills the role asks for, and back them up in your experience section.

5. Proofread carefully. Typos and inconsistent dates are among the most common reasons a resume gets passed over.";

const INTERVIEW_ADVICE: &str = "Here are some general tips for interview preparation:

1. Research the company. Understand its products, customers and recent news, and be ready to explain why you want to work there.

2. Prepare your stories. Use the STAR method (Situation, Task, Action, Result) for behavioral questions and have four or five examples ready.

3. Practice out loud. Rehearse common questions such as \"tell me about yourself\" with a friend or in front of a camera.

4. Review the fundamentals. For technical roles, revisit core concepts and practice explaining your reasoning as you solve problems.

5. Ask good questions. Prepare thoughtful questions about the team, the role and how success is measured.";

const CAREER_ADVICE: &str = "Here are some general tips for growing your career:

1. Set clear goals. Decide where you want to be in one, three and five years, and work backwards to the skills and experience you need.

2. Seek feedback regularly. Ask managers and peers what you do well and where you can improve.

3. Take on stretch assignments. Volunteer for projects that expose you to new responsibilities and stakeholders.

4. Keep learning. Courses, certifications and side projects all signal initiative and keep your skills current.

5. Find mentors. People a few steps ahead of you can help you avoid common mistakes and spot opportunities early.";

const SALARY_ADVICE: &str = "Here are some general tips for salary negotiation:

1. Research the market. Use salary surveys and job postings to establish a realistic range for your role, level and location.

2. Let the employer go first when possible. If asked for a number, give a well-researched range rather than a single figure.

3. Negotiate the whole package. Bonuses, equity, remote work, vacation time and professional development budgets are all negotiable.

4. Anchor on value. Tie your request to the impact you will bring, using concrete examples from past roles.

5. Stay professional and positive. Express enthusiasm for the role while being clear about what you need.";

fn category_advice(category: &str) -> Option<&'static str> {
    match category {
        "resume" => Some(RESUME_ADVICE),
        "interview" => Some(INTERVIEW_ADVICE),
        "career" => Some(CAREER_ADVICE),
        "salary" => Some(SALARY_ADVICE),
        _ => None,
    }
}

fn generic_advice(question: &str) -> String {
    format!(
        "Regarding your question: \"{question}\"

Here is some general advice:

- Break the problem into small, concrete steps you can act on this week.
- Talk to people who have faced the same situation and learn from their experience.
- Keep your profile, resume and skills list up to date so opportunities can find you.
- Review your progress regularly and adjust your plan as you learn more."
    )
}

/// Canned advice for `category`. Categories without a dedicated template get
/// a generic answer that repeats `question`. Always ends with `SERVICE_NOTICE`.
pub fn fallback_advice(category: &str, question: &str) -> String {
    let body = match category_advice(category) {
        Some(text) => text.to_string(),
        None => generic_advice(question),
    };
    format!("{body}\n\n{SERVICE_NOTICE}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_categories_use_their_template() {
        let advice = fallback_advice("salary", "How much should I ask for?");
        assert!(advice.starts_with("Here are some general tips for salary negotiation"));
        assert!(!advice.contains("How much should I ask for?"));
    }

    #[test]
    fn test_unknown_category_echoes_question() {
        let advice = fallback_advice("astrology", "Is Mercury in retrograde?");
        assert!(advice.contains("\"Is Mercury in retrograde?\""));
    }

    #[test]
    fn test_catalog_categories_without_template_are_generic() {
        for category in ["skills", "networking"] {
            let advice = fallback_advice(category, "Where do I start?");
            assert!(advice.contains("Where do I start?"), "{category}");
        }
    }

    #[test]
    fn test_every_template_ends_with_notice() {
        for category in ["resume", "interview", "career", "salary", "skills", "other"] {
            assert!(fallback_advice(category, "q").ends_with(SERVICE_NOTICE));
        }
    }
}
