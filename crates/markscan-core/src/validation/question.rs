use super::outcome::{Severity, ValidationResult};
use crate::answers::requires_figure;
use crate::model::{AnswerEntry, QuestionNode};
use crate::sanitize::{ensure_string, exact_match, fuzzy_match};

/// Check a question and, recursively, its parts and subparts.
pub fn validate_question(question: &QuestionNode) -> ValidationResult {
    let mut result = ValidationResult::default();
    check_node(question, "", true, &mut result);
    result.finish()
}

/// Check a single accepted answer on its own.
pub fn validate_answer(entry: &AnswerEntry) -> ValidationResult {
    let mut result = ValidationResult::default();
    check_answer(entry, "", &mut result);
    result.finish()
}

fn check_node(node: &QuestionNode, prefix: &str, top_level: bool, result: &mut ValidationResult) {
    let at = |field: &str| format!("{prefix}{field}");
    let has_children = !node.parts.is_empty() || !node.subparts.is_empty();

    match (&node.question_text, has_children) {
        (Some(_), _) => {}
        (None, true) => result.warn(
            at("question_text"),
            "Question stem is empty",
            Some("Add introductory text if the parts depend on shared context"),
        ),
        (None, false) => result.error(
            at("question_text"),
            Severity::Critical,
            "Question text is required",
        ),
    }

    match node.marks {
        Some(m) if m > 0.0 => {}
        Some(_) => result.error(at("marks"), Severity::High, "Marks must be a positive number"),
        None if has_children => result.warn(
            at("marks"),
            "Marks not set",
            Some("Total marks will be taken from the parts"),
        ),
        None => result.error(at("marks"), Severity::High, "Marks are required"),
    }

    let kind = node.effective_type();
    if kind.is_none() && top_level {
        result.warn(
            at("type"),
            "Question type not specified",
            Some("Set `type` to mcq, tf, descriptive or complex"),
        );
    }

    let is_mcq = kind.is_some_and(|k| {
        k.eq_ignore_ascii_case("mcq") || k.eq_ignore_ascii_case("multiple_choice")
    });
    if is_mcq {
        check_options(node, prefix, result);
    } else if !has_children && !node.has_answer_data() {
        if node.requires_manual_marking() {
            result.warn(
                at("correct_answers"),
                "No model answer provided",
                Some("This answer format is marked manually; add marking guidance if available"),
            );
        } else {
            result.error(
                at("correct_answers"),
                Severity::Medium,
                "No correct answer provided",
            );
        }
    }

    if let Some(entries) = &node.correct_answers {
        for (i, entry) in entries.iter().enumerate() {
            check_answer(entry, &format!("{prefix}correct_answers[{i}]."), result);
        }

        let awarded: f64 = entries.iter().filter_map(|e| e.marks).sum();
        if let Some(total) = node.marks {
            if total > 0.0 && awarded > total {
                result.warn(
                    at("correct_answers"),
                    format!("Answer marks add up to {awarded}, more than the {total} available"),
                    Some("Link the answers as alternatives or adjust their marks"),
                );
            }
        }
    }

    if let Some(text) = node.question_text.as_deref() {
        if requires_figure(text) && !node.figure && node.attachments.is_empty() {
            result.warn(
                at("figure"),
                "Question text refers to a figure but none is attached",
                Some("Attach the figure or set `figure_required`"),
            );
        }
    }

    for (i, part) in node.parts.iter().enumerate() {
        check_node(part, &format!("{prefix}parts[{i}]."), false, result);
    }
    for (i, subpart) in node.subparts.iter().enumerate() {
        check_node(subpart, &format!("{prefix}subparts[{i}]."), false, result);
    }
}

fn check_options(node: &QuestionNode, prefix: &str, result: &mut ValidationResult) {
    if node.options.is_empty() {
        result.error(
            format!("{prefix}options"),
            Severity::Critical,
            "Multiple-choice questions need options",
        );
        return;
    }

    for (i, option) in node.options.iter().enumerate() {
        if option.label.is_none() && option.text.is_none() {
            result.error(
                format!("{prefix}options[{i}]"),
                Severity::Medium,
                "Option has neither label nor text",
            );
        }
    }

    let flagged = node.options.iter().any(|o| o.is_correct);
    let answered = node.correct_answer.is_some()
        || node.correct_answers.as_ref().is_some_and(|a| !a.is_empty());
    if !flagged && !answered {
        result.error(
            format!("{prefix}options"),
            Severity::High,
            "Multiple-choice question has no correct option",
        );
    }

    if let Some(answer) = node.correct_answer.as_deref() {
        let matches_option = node.options.iter().any(|o| {
            o.label.as_deref().is_some_and(|l| exact_match(l, answer))
                || o.text.as_deref().is_some_and(|t| fuzzy_match(t, answer))
        });
        if !matches_option {
            result.warn(
                format!("{prefix}correct_answer"),
                format!("Correct answer '{answer}' does not match any option"),
                Some("Use the option label (e.g. A) or its exact text"),
            );
        }
    }
}

fn check_answer(entry: &AnswerEntry, prefix: &str, result: &mut ValidationResult) {
    let at = |field: &str| format!("{prefix}{field}");

    if entry.answer.trim().is_empty() {
        result.error(at("answer"), Severity::High, "Answer text is required");
    }

    if entry.marks.is_some_and(|m| m <= 0.0) {
        result.error(at("marks"), Severity::Medium, "Answer marks must be positive");
    }

    if !entry.answer.trim().is_empty()
        && entry
            .rejected_answers
            .iter()
            .any(|r| exact_match(&ensure_string(Some(r)), &entry.answer))
    {
        result.error(
            at("rejected_answers"),
            Severity::Medium,
            "Answer is also listed as rejected",
        );
    }

    if entry.total_alternatives.is_some_and(|n| n > 1.0) && entry.linked_alternatives.is_empty() {
        result.warn(
            at("linked_alternatives"),
            "total_alternatives is set but no alternatives are linked",
            Some("List the linked alternatives so they can be matched"),
        );
    }
}
