use markscan_core::answers::{
    analyze_answer_complexity, derive_answer_requirement, detect_answer_format,
    extract_all_valid_alternatives, parse_operators, requires_figure, split_forward_slash,
    AnswerAlternative, AnswerComplexity, AnswerExpectation, OperatorParse,
};
use markscan_core::error::MarkscanError;
use markscan_core::model::{AnswerEntry, QuestionNode};
use serde::Serialize;

use crate::output;

/// Everything the answer helpers can tell about one answer string.
#[derive(Debug, Serialize)]
pub struct AnswerBreakdown {
    pub answer: String,
    pub slash_alternatives: Vec<AnswerAlternative>,
    pub operators: OperatorParse,
    pub valid_alternatives: Vec<String>,
    pub complexity: AnswerComplexity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<QuestionHints>,
}

#[derive(Debug, Serialize)]
pub struct QuestionHints {
    pub answer_format: String,
    pub requires_figure: bool,
    pub expectation: AnswerExpectation,
}

pub fn run(text: &str, question: Option<&str>, output_format: &str) -> Result<(), MarkscanError> {
    let breakdown = breakdown(text, question);

    match output_format {
        "json" => output::json::print(&breakdown)?,
        _ => output::table::print_answer(&breakdown),
    }

    Ok(())
}

fn breakdown(text: &str, question: Option<&str>) -> AnswerBreakdown {
    let slash_alternatives = if text.contains('/') {
        split_forward_slash(text)
    } else {
        Vec::new()
    };

    let question = question.map(|question_text| {
        let node = QuestionNode {
            question_text: Some(question_text.to_string()),
            correct_answer: Some(text.to_string()),
            ..QuestionNode::default()
        };
        QuestionHints {
            answer_format: detect_answer_format(&node),
            requires_figure: requires_figure(question_text),
            expectation: derive_answer_requirement(question_text),
        }
    });

    AnswerBreakdown {
        answer: text.to_string(),
        slash_alternatives,
        operators: parse_operators(text),
        valid_alternatives: extract_all_valid_alternatives(text),
        complexity: analyze_answer_complexity(&[AnswerEntry::synthesized(text, None, None)]),
        question,
    }
}
