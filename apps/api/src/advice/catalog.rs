use serde::Serialize;

/// An advice topic offered to seekers, with suggested starter questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AdviceCategory {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub questions: &'static [&'static str],
}

pub const CATEGORIES: &[AdviceCategory] = &[
    AdviceCategory {
        id: "resume",
        name: "Resume Tips",
        description: "Get personalized advice to improve your resume and stand out to employers.",
        questions: &[
            "How can I improve my resume for a specific role?",
            "What skills should I highlight on my resume?",
            "How should I format my work experience?",
            "What resume mistakes should I avoid?",
            "How long should my resume be?",
        ],
    },
    AdviceCategory {
        id: "interview",
        name: "Interview Preparation",
        description: "Prepare for job interviews with personalized advice and practice questions.",
        questions: &[
            "How should I prepare for a technical interview?",
            "What are common behavioral interview questions?",
            "How should I answer the \"tell me about yourself\" question?",
            "How can I demonstrate my skills in an interview?",
            "What questions should I ask the interviewer?",
        ],
    },
    AdviceCategory {
        id: "career",
        name: "Career Growth",
        description: "Get advice on advancing your career and reaching your professional goals.",
        questions: &[
            "How can I advance in my current role?",
            "When is the right time to change jobs?",
            "How can I transition to a new industry?",
            "What skills should I develop for future career growth?",
            "How can I build a career development plan?",
        ],
    },
    AdviceCategory {
        id: "salary",
        name: "Salary Negotiation",
        description: "Learn strategies for negotiating better compensation and benefits.",
        questions: &[
            "How should I respond to a salary offer?",
            "When is the best time to negotiate salary?",
            "What benefits should I negotiate besides salary?",
            "How do I research appropriate salary ranges?",
            "How can I justify asking for a higher salary?",
        ],
    },
    AdviceCategory {
        id: "skills",
        name: "Skills Development",
        description: "Identify and develop the skills that will make you more valuable in the job market.",
        questions: &[
            "What skills are most in-demand in my industry?",
            "How can I develop new technical skills?",
            "Which soft skills should I focus on improving?",
            "What certifications would be valuable for my career?",
            "How can I demonstrate my skills to potential employers?",
        ],
    },
    AdviceCategory {
        id: "networking",
        name: "Networking",
        description: "Build and leverage your professional network to find new opportunities.",
        questions: &[
            "How can I build my professional network?",
            "How should I approach cold outreach?",
            "How can I use LinkedIn effectively?",
            "What networking events should I attend?",
            "How can I maintain professional relationships?",
        ],
    },
];

pub fn find_category(id: &str) -> Option<&'static AdviceCategory> {
    CATEGORIES.iter().find(|c| c.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_six_categories_with_five_questions() {
        assert_eq!(CATEGORIES.len(), 6);
        for category in CATEGORIES {
            assert_eq!(category.questions.len(), 5, "{}", category.id);
            assert!(!category.name.is_empty());
            assert!(!category.description.is_empty());
        }
    }

    #[test]
    fn test_find_category() {
        assert_eq!(find_category("salary").map(|c| c.name), Some("Salary Negotiation"));
        assert!(find_category("Salary").is_none());
        assert!(find_category("astrology").is_none());
    }
}
