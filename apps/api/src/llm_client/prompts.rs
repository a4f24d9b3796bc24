// Shared prompt fragments.
// Each feature that calls the reasoning service keeps its own prompts.rs alongside it;
// this file holds the cross-cutting pieces.

/// Appended to every system prompt that expects a JSON reply.
pub const JSON_ONLY_INSTRUCTION: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Placeholder used in prompts for empty profile or posting fields.
pub const NOT_SPECIFIED: &str = "Not specified";

/// Returns `value`, or the "Not specified" placeholder when it is blank.
pub fn or_not_specified(value: &str) -> &str {
    if value.trim().is_empty() {
        NOT_SPECIFIED
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_or_not_specified() {
        assert_eq!(or_not_specified(""), NOT_SPECIFIED);
        assert_eq!(or_not_specified("  "), NOT_SPECIFIED);
        assert_eq!(or_not_specified("BSc Physics"), "BSc Physics");
    }
}
