use super::summary::{
    Abbreviation, Collector, SIGNAL_ANSWER_VARIATIONS, SIGNAL_CONDITIONAL_MARKING,
    SIGNAL_IGNORE_LIST, SIGNAL_REJECT_LIST,
};
use crate::model::AnswerEntry;
use crate::sanitize::contains_word;

const ALTERNATIVE_TYPE_KEYWORDS: &[&str] = &["one", "any", "all", "both"];

/// Scan an `answer_requirement` string such as `"any_one_from"` or `"both_required"`.
///
/// Abbreviations are matched as plain substrings here, unlike answer text.
pub(crate) fn scan_requirement(requirement: &str, c: &mut Collector) {
    let requirement = requirement.trim();
    if requirement.is_empty() {
        return;
    }
    c.answer_requirements.insert(requirement.to_string());

    let lower = requirement.to_lowercase();
    if lower.contains("any") || lower.contains("alternative") {
        c.uses_alternative_linking = true;
    }
    if lower.contains("all") || lower.contains("both") {
        c.has_multi_mark_allocations = true;
    }

    for (needle, abbreviation) in [
        ("owtte", Abbreviation::Owtte),
        ("ora", Abbreviation::Ora),
        ("ecf", Abbreviation::Ecf),
        ("cao", Abbreviation::Cao),
    ] {
        if lower.contains(needle) {
            c.add_abbreviation(abbreviation);
        }
    }
}

/// Scan one accepted answer for marking conventions.
pub(crate) fn scan_answer(entry: &AnswerEntry, c: &mut Collector) {
    let text = entry.answer.as_str();
    let lower = text.to_lowercase();

    if text.contains('/') {
        c.uses_forward_slash = true;
    }

    let linked_by_type = entry.alternative_type.as_deref().is_some_and(|t| {
        let t = t.to_lowercase();
        ALTERNATIVE_TYPE_KEYWORDS.iter().any(|k| t.contains(k))
    });
    if lower.contains(" or ")
        || lower.contains(" and ")
        || entry.total_alternatives.is_some_and(|n| n > 1.0)
        || !entry.linked_alternatives.is_empty()
        || linked_by_type
    {
        c.uses_alternative_linking = true;
    }

    if entry.context.is_present() {
        c.includes_contextual_answers = true;
        c.add_context_types(&entry.context.types);
    }

    if entry.has_line_reference || !entry.marking_points.is_empty() {
        c.uses_line_by_line_marking = true;
    }

    if entry.accepts_equivalent_phrasing || lower.contains("owtte") {
        c.add_abbreviation(Abbreviation::Owtte);
    }
    if entry.accepts_reverse_argument
        || lower.contains("reverse argument")
        || contains_word(text, "ora")
    {
        c.add_abbreviation(Abbreviation::Ora);
    }
    if entry.error_carried_forward
        || lower.contains("error carried forward")
        || contains_word(text, "ecf")
    {
        c.add_abbreviation(Abbreviation::Ecf);
    }
    let cao_level = entry
        .accept_level
        .as_deref()
        .is_some_and(|level| level.to_lowercase().contains("cao"));
    if cao_level || has_cao_phrase(&lower) {
        c.add_abbreviation(Abbreviation::Cao);
    }

    if entry.has_conditions {
        c.add_signal(SIGNAL_CONDITIONAL_MARKING);
    }
    if !entry.rejected_answers.is_empty() {
        c.add_signal(SIGNAL_REJECT_LIST);
    }
    if !entry.ignored_content.is_empty() {
        c.add_signal(SIGNAL_IGNORE_LIST);
    }
    if entry.has_answer_variations {
        c.add_signal(SIGNAL_ANSWER_VARIATIONS);
    }

    if let Some(flags) = entry.marking_flags {
        for (set, abbreviation) in [
            (flags.owtte, Abbreviation::Owtte),
            (flags.ora, Abbreviation::Ora),
            (flags.ecf, Abbreviation::Ecf),
            (flags.cao, Abbreviation::Cao),
        ] {
            if set {
                c.add_abbreviation(abbreviation);
            }
        }
    }

    if entry.partial_credit_declared || entry.has_marks_mismatch() {
        c.partial_credit_detected = true;
    }
    if entry.marks.is_some_and(|m| m > 1.0) {
        c.has_multi_mark_allocations = true;
    }
    if let Some(requirement) = entry.answer_requirement.as_deref() {
        scan_requirement(requirement, c);
    }
}

/// CAO phrasings seen in answer text. Expects lower-cased input.
///
/// Punctuated forms such as `"cao,"` and a bare `"cao"` are not recognized.
pub(crate) fn has_cao_phrase(lower: &str) -> bool {
    lower.contains("(cao")
        || lower.contains(" cao ")
        || lower.ends_with(" cao")
        || lower.starts_with("cao ")
        || lower.contains("cao only")
}
