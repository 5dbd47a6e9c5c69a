// Prompt text shared by both model backends.

use crate::models::reflection::ReflectionKind;

/// System instruction for reflection prose.
pub const REFLECTION_SYSTEM: &str = "You are a thoughtful journal reflection assistant. \
    Provide insightful, empathetic, and constructive reflections on journal entries.";

/// Reply text used when the remote backend has no credential configured.
pub const UNAVAILABLE_PLACEHOLDER: &str = "AI reflection unavailable - API key not configured";

const SUMMARY_TEMPLATE: &str = "Please provide a concise summary of this journal entry, \
    highlighting the main themes and emotions:";

const ANALYSIS_TEMPLATE: &str = "Please provide a thoughtful analysis of this journal entry, \
    identifying patterns, emotions, and potential insights for personal growth:";

const INSIGHT_TEMPLATE: &str = "Please provide a thoughtful reflection on this journal entry, \
    offering gentle insights and perspectives that might help with self-understanding and growth:";

const KEYWORDS_TEMPLATE: &str = "Extract 3-5 key themes or keywords from this journal entry. \
    Return only the keywords separated by commas:";

/// Kind-specific user instruction followed by the entry text.
pub fn reflection_prompt(content: &str, kind: ReflectionKind) -> String {
    let template = match kind {
        ReflectionKind::Summary => SUMMARY_TEMPLATE,
        ReflectionKind::Analysis => ANALYSIS_TEMPLATE,
        ReflectionKind::Insight => INSIGHT_TEMPLATE,
    };
    format!("{template}\n\n{content}")
}

pub fn keywords_prompt(content: &str) -> String {
    format!("{KEYWORDS_TEMPLATE}\n\n{content}")
}

/// Single-string form for completion-style endpoints that take no message list.
pub fn local_reflection_prompt(content: &str, kind: ReflectionKind) -> String {
    format!(
        "{REFLECTION_SYSTEM}\n\nUser: {}\n\nAssistant:",
        reflection_prompt(content, kind)
    )
}

pub fn local_keywords_prompt(content: &str) -> String {
    format!("{}\n\nKeywords:", keywords_prompt(content))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_kind_uses_its_own_template() {
        let summary = reflection_prompt("entry", ReflectionKind::Summary);
        assert!(summary.starts_with("Please provide a concise summary"));
        assert!(summary.ends_with("\n\nentry"));

        let analysis = reflection_prompt("entry", ReflectionKind::Analysis);
        assert!(analysis.contains("identifying patterns, emotions"));

        let insight = reflection_prompt("entry", ReflectionKind::Insight);
        assert!(insight.contains("gentle insights and perspectives"));
    }

    #[test]
    fn test_local_prompts_frame_the_exchange() {
        let prompt = local_reflection_prompt("I slept well.", ReflectionKind::Insight);
        assert!(prompt.starts_with(REFLECTION_SYSTEM));
        assert!(prompt.contains("\n\nUser: Please provide a thoughtful reflection"));
        assert!(prompt.ends_with("I slept well.\n\nAssistant:"));

        let keywords = local_keywords_prompt("I slept well.");
        assert!(keywords.starts_with("Extract 3-5 key themes"));
        assert!(keywords.ends_with("I slept well.\n\nKeywords:"));
    }
}
