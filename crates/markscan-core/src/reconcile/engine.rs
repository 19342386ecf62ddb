use super::outcome::{ChangeLog, RuleChange};
use crate::guideline::{Abbreviation, JsonGuidelineSummary};
use crate::rules::schema::{ExamBoard, ExtractionRules};
use std::borrow::Cow;

/// Bring `rules` in line with what a document summary shows.
///
/// Returns `Cow::Borrowed(rules)` when nothing needed to change, so callers
/// can skip downstream work. Booleans are only ever turned on, except the
/// educational-content and subject-specific blocks, which mirror the
/// summary exactly. Applying the result again with the same summary is a
/// no-op.
pub fn reconcile<'a>(
    summary: &JsonGuidelineSummary,
    rules: &'a ExtractionRules,
) -> Cow<'a, ExtractionRules> {
    let mut updated = rules.clone();
    if reconcile_in_place(summary, &mut updated).is_empty() {
        Cow::Borrowed(rules)
    } else {
        Cow::Owned(updated)
    }
}

/// Like [`reconcile`], also returning what changed.
pub fn reconcile_with_changes(
    summary: &JsonGuidelineSummary,
    rules: &ExtractionRules,
) -> (ExtractionRules, Vec<RuleChange>) {
    let mut updated = rules.clone();
    let changes = reconcile_in_place(summary, &mut updated);
    (updated, changes)
}

/// Apply the reconciliation to `rules` directly, returning the changes in rule order.
pub fn reconcile_in_place(
    summary: &JsonGuidelineSummary,
    rules: &mut ExtractionRules,
) -> Vec<RuleChange> {
    let mut log = ChangeLog::default();
    let s = summary;
    let links_alternatives = s.uses_alternative_linking || !s.answer_requirements.is_empty();
    let weighs_marks = s.has_multi_mark_allocations || s.partial_credit_detected;

    // Core settings
    log.enable(
        &mut rules.forward_slash_handling,
        "forwardSlashHandling",
        s.uses_forward_slash,
    );
    log.enable(
        &mut rules.line_by_line_processing,
        "lineByLineProcessing",
        s.uses_line_by_line_marking,
    );
    log.enable(
        &mut rules.alternative_linking,
        "alternativeLinking",
        links_alternatives,
    );
    log.enable(
        &mut rules.figure_detection,
        "figureDetection",
        s.includes_figures || s.includes_attachments,
    );
    log.enable(
        &mut rules.context_required,
        "contextRequired",
        s.includes_contextual_answers,
    );
    log.enable(
        &mut rules.answer_structure.require_context,
        "answerStructure.requireContext",
        s.includes_contextual_answers,
    );

    // Educational content tracks the document exactly
    log.set(
        &mut rules.educational_content.hints_required,
        "educationalContent.hintsRequired",
        s.includes_hints,
    );
    log.set(
        &mut rules.educational_content.explanations_required,
        "educationalContent.explanationsRequired",
        s.includes_explanations,
    );

    // Subject toggles track the detected subjects exactly
    let subjects: Vec<String> = s.subjects_detected.iter().map(|x| x.to_lowercase()).collect();
    let mentions = |keyword: &str| subjects.iter().any(|x| x.contains(keyword));
    log.set(
        &mut rules.subject_specific.physics,
        "subjectSpecific.physics",
        mentions("physics"),
    );
    log.set(
        &mut rules.subject_specific.chemistry,
        "subjectSpecific.chemistry",
        mentions("chemistry"),
    );
    log.set(
        &mut rules.subject_specific.biology,
        "subjectSpecific.biology",
        mentions("biology"),
    );
    log.set(
        &mut rules.subject_specific.mathematics,
        "subjectSpecific.mathematics",
        mentions("math"),
    );

    for abbreviation in Abbreviation::ALL {
        let (flag, field) = match abbreviation {
            Abbreviation::Ora => (&mut rules.abbreviations.ora, "abbreviations.ora"),
            Abbreviation::Owtte => (&mut rules.abbreviations.owtte, "abbreviations.owtte"),
            Abbreviation::Ecf => (&mut rules.abbreviations.ecf, "abbreviations.ecf"),
            Abbreviation::Cao => (&mut rules.abbreviations.cao, "abbreviations.cao"),
        };
        log.enable(flag, field, s.has_abbreviation(abbreviation));
    }

    log.enable(
        &mut rules.answer_structure.validate_linking,
        "answerStructure.validateLinking",
        links_alternatives,
    );
    log.enable(
        &mut rules.answer_structure.accept_alternatives,
        "answerStructure.acceptAlternatives",
        !s.variation_signals.is_empty() || s.uses_alternative_linking,
    );
    log.enable(
        &mut rules.answer_structure.validate_marks,
        "answerStructure.validateMarks",
        weighs_marks,
    );

    log.enable(
        &mut rules.mark_scheme.requires_manual_marking,
        "markScheme.requiresManualMarking",
        s.requires_manual_marking,
    );
    log.enable(
        &mut rules.mark_scheme.component_marking,
        "markScheme.componentMarking",
        s.has_component_marking,
    );
    log.enable(
        &mut rules.mark_scheme.marking_criteria,
        "markScheme.markingCriteria",
        weighs_marks,
    );

    if let Some(board) = s.exam_board.as_deref().and_then(ExamBoard::from_str_loose) {
        if board != rules.exam_board {
            log.record("examBoard", rules.exam_board, board);
            rules.exam_board = board;
        }
    }

    log.changes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> JsonGuidelineSummary {
        JsonGuidelineSummary::default()
    }

    #[test]
    fn test_empty_summary_leaves_default_rules_untouched() {
        let rules = ExtractionRules::default();
        assert!(matches!(reconcile(&summary(), &rules), Cow::Borrowed(_)));
    }

    #[test]
    fn test_manual_marking_propagates() {
        let s = JsonGuidelineSummary {
            requires_manual_marking: true,
            ..summary()
        };
        let rules = ExtractionRules::default();
        let updated = reconcile(&s, &rules);
        assert!(updated.mark_scheme.requires_manual_marking);
        assert!(matches!(updated, Cow::Owned(_)));
    }

    #[test]
    fn test_never_disables_monotonic_flags() {
        let mut rules = ExtractionRules::default();
        rules.forward_slash_handling = true;
        rules.abbreviations.cao = true;
        rules.mark_scheme.component_marking = true;
        rules.answer_structure.validate_marks = true;

        let updated = reconcile(&summary(), &rules);
        assert!(updated.forward_slash_handling);
        assert!(updated.abbreviations.cao);
        assert!(updated.mark_scheme.component_marking);
        assert!(updated.answer_structure.validate_marks);
    }

    #[test]
    fn test_wholesale_blocks_track_summary() {
        let mut rules = ExtractionRules::default();
        rules.educational_content.hints_required = true;
        rules.subject_specific.biology = true;

        let s = JsonGuidelineSummary {
            includes_explanations: true,
            subjects_detected: vec!["Further Mathematics".into(), "Physics 0625".into()],
            ..summary()
        };
        let (updated, changes) = reconcile_with_changes(&s, &rules);
        assert!(!updated.educational_content.hints_required);
        assert!(updated.educational_content.explanations_required);
        assert!(!updated.subject_specific.biology);
        assert!(updated.subject_specific.physics);
        assert!(updated.subject_specific.mathematics);
        assert!(!updated.subject_specific.chemistry);
        assert_eq!(changes.len(), 5);
    }

    #[test]
    fn test_requirements_alone_enable_linking() {
        let s = JsonGuidelineSummary {
            answer_requirements: vec!["exact".into()],
            ..summary()
        };
        let (updated, _) = reconcile_with_changes(&s, &ExtractionRules::default());
        assert!(updated.alternative_linking);
        assert!(updated.answer_structure.validate_linking);
        assert!(!updated.answer_structure.accept_alternatives);
    }

    #[test]
    fn test_exam_board_overwritten_when_recognized() {
        let s = JsonGuidelineSummary {
            exam_board: Some("Pearson Edexcel".into()),
            ..summary()
        };
        let rules = ExtractionRules::default();
        let updated = reconcile(&s, &rules);
        assert_eq!(updated.exam_board, ExamBoard::Edexcel);

        let unknown = JsonGuidelineSummary {
            exam_board: Some("AQA".into()),
            ..summary()
        };
        assert_eq!(reconcile(&unknown, &updated).exam_board, ExamBoard::Edexcel);
    }

    #[test]
    fn test_idempotent() {
        let s = JsonGuidelineSummary {
            uses_forward_slash: true,
            includes_contextual_answers: true,
            includes_hints: true,
            partial_credit_detected: true,
            abbreviations_detected: vec!["ECF".into(), "ORA".into()],
            variation_signals: vec!["ECF: error carried forward".into()],
            subjects_detected: vec!["Chemistry".into()],
            exam_board: Some("Cambridge and Edexcel".into()),
            ..summary()
        };
        let first = reconcile(&s, &ExtractionRules::default()).into_owned();
        let second = reconcile(&s, &first);
        assert!(matches!(second, Cow::Borrowed(_)));
        assert_eq!(*second, first);
        assert_eq!(first.exam_board, ExamBoard::Both);
    }

    #[test]
    fn test_changes_listed_in_rule_order() {
        let s = JsonGuidelineSummary {
            uses_forward_slash: true,
            has_component_marking: true,
            ..summary()
        };
        let (_, changes) = reconcile_with_changes(&s, &ExtractionRules::default());
        let fields: Vec<_> = changes.iter().map(|c| c.field).collect();
        assert_eq!(fields, vec!["forwardSlashHandling", "markScheme.componentMarking"]);
    }
}
