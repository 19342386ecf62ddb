use super::outcome::{BatchValidationReport, QuestionReport};
use super::question::validate_question;
use crate::model::QuestionNode;
use std::collections::HashSet;
use tracing::debug;

/// Validate every question of a paper.
///
/// Results are keyed by the question's `id`/`question_number`, or by its
/// 1-based position when it has none.
pub fn validate_questions(questions: &[QuestionNode]) -> BatchValidationReport {
    let mut report = BatchValidationReport::default();
    let mut seen = HashSet::new();

    for (i, question) in questions.iter().enumerate() {
        let question_id = question
            .id
            .clone()
            .unwrap_or_else(|| (i + 1).to_string());

        let mut result = validate_question(question);
        if !seen.insert(question_id.clone()) {
            result.warn(
                "id".to_string(),
                format!("Duplicate question identifier '{question_id}'"),
                Some("Give each question a unique id or question_number"),
            );
        }

        if result.is_valid {
            report.valid += 1;
        } else {
            report.invalid += 1;
        }
        report.questions.push(QuestionReport {
            question_id,
            result,
        });
    }
    report.total = questions.len();

    debug!(
        total = report.total,
        valid = report.valid,
        invalid = report.invalid,
        "validated questions"
    );
    report
}
