use crate::model::QuestionNode;
use serde::Serialize;

const FIGURE_KEYWORDS: &[&str] = &[
    "diagram",
    "figure",
    "graph",
    "chart",
    "illustration",
    "shown",
    "image",
    "picture",
    "sketch",
    "draw",
];

const MULTIPLE_CHOICE_TYPES: &[&str] = &["mcq", "multiple_choice", "multiple-choice"];

/// Whether the question text refers to a figure the student must see or produce.
pub fn requires_figure(question_text: &str) -> bool {
    let lower = question_text.to_lowercase();
    FIGURE_KEYWORDS.iter().any(|k| lower.contains(k))
}

/// Best guess at the answer format a question expects.
///
/// An explicit `answer_format` wins, then multiple-choice structure, then
/// keywords in the question text; `single_line` otherwise.
pub fn detect_answer_format(question: &QuestionNode) -> String {
    if let Some(format) = question.answer_format.as_deref() {
        return format.to_string();
    }

    let declared_mcq = [
        question.declared_question_type.as_deref(),
        question.question_type.as_deref(),
    ]
    .into_iter()
    .flatten()
    .any(|t| MULTIPLE_CHOICE_TYPES.contains(&t.to_lowercase().as_str()));
    if !question.options.is_empty() || declared_mcq {
        return "mcq".to_string();
    }

    let text = question
        .question_text
        .as_deref()
        .unwrap_or_default()
        .to_lowercase();
    let format = if text.contains("calculate") || text.contains("work out") {
        "calculation"
    } else if text.contains("draw") || text.contains("sketch") {
        "diagram"
    } else if text.contains("table") {
        "table"
    } else if text.contains("graph") || text.contains("plot") {
        "graph"
    } else if text.contains("explain") || text.contains("describe") {
        "multi_line"
    } else {
        "single_line"
    };
    format.to_string()
}

/// What a marker expects from an answer, derived from the command word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerExpectation {
    pub requirement: String,
    pub partial_credit: bool,
    pub strict_marking: bool,
}

/// Derive marking expectations from the question's command words.
pub fn derive_answer_requirement(question_text: &str) -> AnswerExpectation {
    let lower = question_text.to_lowercase();
    let (requirement, partial_credit, strict_marking) =
        if lower.contains("calculate") || lower.contains("work out") {
            ("Show working and final calculated value", true, false)
        } else if lower.contains("explain") || lower.contains("describe") {
            ("Clear explanation covering the key points", true, false)
        } else if lower.contains("compare") || lower.contains("contrast") {
            ("Comparison addressing similarities and differences", true, false)
        } else if lower.contains("state") || lower.contains("name") {
            ("Brief, precise answer", false, true)
        } else {
            ("Complete and accurate answer", false, false)
        };
    AnswerExpectation {
        requirement: requirement.to_string(),
        partial_credit,
        strict_marking,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn node(value: serde_json::Value) -> QuestionNode {
        QuestionNode::from(&value)
    }

    #[test]
    fn test_requires_figure() {
        assert!(requires_figure("Use the Diagram to answer"));
        assert!(requires_figure("as shown below"));
        assert!(!requires_figure("State the formula for density"));
    }

    #[test]
    fn test_explicit_format_wins() {
        let q = node(json!({ "answer_format": "code", "question_text": "Calculate x" }));
        assert_eq!(detect_answer_format(&q), "code");
    }

    #[test]
    fn test_mcq_from_options_or_declared_type() {
        assert_eq!(detect_answer_format(&node(json!({ "options": ["a", "b"] }))), "mcq");
        assert_eq!(
            detect_answer_format(&node(json!({ "question_type": "Multiple_Choice" }))),
            "mcq"
        );
    }

    #[test]
    fn test_keyword_priority() {
        let detect = |text: &str| detect_answer_format(&node(json!({ "question_text": text })));
        assert_eq!(detect("Calculate and plot the graph"), "calculation");
        assert_eq!(detect("Draw a table"), "diagram");
        assert_eq!(detect("Complete the table"), "table");
        assert_eq!(detect("Plot the points"), "graph");
        assert_eq!(detect("Describe the process"), "multi_line");
        assert_eq!(detect("Name the gas"), "single_line");
    }

    #[test]
    fn test_requirement_priority() {
        let calc = derive_answer_requirement("Work out the area and explain");
        assert!(calc.partial_credit);
        assert!(calc.requirement.contains("working"));

        let explain = derive_answer_requirement("Explain why");
        assert!(explain.partial_credit);
        assert!(!explain.strict_marking);

        let compare = derive_answer_requirement("Compare the two cells");
        assert!(compare.requirement.contains("Comparison"));

        let state = derive_answer_requirement("State one use");
        assert!(state.strict_marking);
        assert!(!state.partial_credit);

        let other = derive_answer_requirement("Complete the sentence");
        assert!(!other.partial_credit && !other.strict_marking);
    }
}
