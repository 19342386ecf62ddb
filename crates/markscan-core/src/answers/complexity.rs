use super::split::extract_all_valid_alternatives;
use crate::model::AnswerEntry;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnswerComplexity {
    pub has_multiple_answers: bool,
    pub has_alternatives: bool,
    pub requires_all_components: bool,
    /// Alternatives extracted from slash/"or" answers, or the number of
    /// answers when none carry alternative markers.
    pub alternative_count: usize,
}

/// Summarize how a question's accepted answers combine.
pub fn analyze_answer_complexity(answers: &[AnswerEntry]) -> AnswerComplexity {
    let mut result = AnswerComplexity {
        has_multiple_answers: answers.len() > 1,
        ..AnswerComplexity::default()
    };

    for entry in answers {
        let text = entry.answer.as_str();
        let lower = text.to_lowercase();

        if text.contains('/') || lower.contains(" or ") {
            result.has_alternatives = true;
            result.alternative_count += extract_all_valid_alternatives(text).len();
        }
        if lower.contains(" and ") || lower.contains(" & ") {
            result.requires_all_components = true;
        }
    }

    if !result.has_alternatives {
        result.alternative_count = answers.len();
    }
    result
}
