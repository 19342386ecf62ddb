//! End-to-end tests: JSON document -> analyze -> reconcile, plus the
//! helper services and validators working on the same documents.

use markscan_core::answers::extract_all_valid_alternatives;
use markscan_core::guideline::JsonGuidelineSummary;
use markscan_core::model::PaperDocument;
use markscan_core::reconcile::{reconcile, reconcile_with_changes};
use markscan_core::rules::builtin::load_preset;
use markscan_core::rules::schema::{ExamBoard, ExtractionRules};
use markscan_core::validation::{validate_question, validate_questions, Severity};
use markscan_core::{analyze, analyze_value, inspect, load_document};
use serde_json::{json, Value};
use std::borrow::Cow;
use std::io::Write;

fn analyze_json(value: Value) -> JsonGuidelineSummary {
    analyze_value(&value)
}

fn sample_paper() -> Value {
    json!({
        "exam_board": "Cambridge International (CIE)",
        "qualification": "IGCSE",
        "paper_metadata": { "subject": "Physics", "subject_code": "0625" },
        "questions": [
            {
                "question_number": 1,
                "type": "mcq",
                "question_text": "Which quantity is a vector?",
                "marks": 1,
                "options": [
                    { "label": "A", "text": "mass" },
                    { "label": "B", "text": "velocity", "is_correct": true }
                ]
            },
            {
                "question_number": 2,
                "question_text": "A car accelerates uniformly.",
                "parts": [
                    {
                        "question_text": "Calculate the acceleration.",
                        "marks": 2,
                        "hint": "Use a = (v - u) / t",
                        "correct_answers": [
                            { "answer": "2.5 m/s²", "marks": 2, "unit": "m/s²", "error_carried_forward": true }
                        ]
                    },
                    {
                        "question_text": "Sketch the velocity-time graph.",
                        "marks": 3,
                        "answer_format": "graph",
                        "figure_required": true,
                        "marking_points": ["straight line", "positive gradient", "labelled axes"]
                    }
                ]
            }
        ]
    })
}

// ---------------------------------------------------------------------------
// Scenario from the import wizard: MCQ with slash alternatives
// ---------------------------------------------------------------------------
#[test]
fn cambridge_mcq_end_to_end() {
    let summary = analyze_json(json!({
        "exam_board": "Cambridge",
        "qualification": "IGCSE",
        "questions": [{
            "type": "mcq",
            "options": [{ "is_correct": true }],
            "correct_answers": [
                { "answer": "A / B", "marks": 2, "answer_requirement": "any_one_from" }
            ]
        }]
    }));

    assert!(summary.uses_forward_slash);
    assert!(summary.uses_alternative_linking);
    assert!(summary.has_multi_mark_allocations);
    assert_eq!(summary.answer_requirements, vec!["any_one_from"]);

    let rules = ExtractionRules::default();
    let updated = reconcile(&summary, &rules);
    assert!(updated.forward_slash_handling);
    assert!(updated.alternative_linking);
    assert!(updated.answer_structure.validate_marks);
    assert!(updated.answer_structure.validate_linking);
    assert!(updated.answer_structure.accept_alternatives);
    assert_eq!(updated.exam_board, ExamBoard::Cambridge);
}

#[test]
fn forward_slash_in_bare_correct_answer() {
    let summary = analyze_json(json!({ "questions": [{ "correct_answer": "A/B" }] }));
    assert!(summary.uses_forward_slash);
}

#[test]
fn or_answer_links_alternatives() {
    let summary = analyze_json(json!({ "questions": [{ "correct_answer": "red or blue" }] }));
    assert!(summary.uses_alternative_linking);
    assert_eq!(extract_all_valid_alternatives("red or blue"), vec!["red", "blue"]);
}

#[test]
fn manual_marking_format_reaches_rules() {
    let summary = analyze_json(json!({ "questions": [{ "answer_format": "diagram" }] }));
    assert!(summary.requires_manual_marking);

    let mut rules = ExtractionRules::default();
    rules.mark_scheme.requires_manual_marking = false;
    assert!(reconcile(&summary, &rules).mark_scheme.requires_manual_marking);
}

#[test]
fn cao_needs_a_whole_word() {
    let paris = analyze_json(json!({ "questions": [{ "correct_answer": "Paris cao" }] }));
    assert_eq!(paris.abbreviations_detected, vec!["CAO"]);
    assert!(paris
        .variation_signals
        .contains(&"CAO: correct answer only".to_string()));

    let macao = analyze_json(json!({ "questions": [{ "correct_answer": "macao" }] }));
    assert!(macao.abbreviations_detected.is_empty());
}

#[test]
fn empty_part_still_means_component_marking() {
    let summary = analyze_json(json!({ "questions": [{ "parts": [{}] }] }));
    assert!(summary.has_component_marking);
}

#[test]
fn validator_flags_missing_text_and_marks() {
    let doc = PaperDocument::from(&json!({ "questions": [{ "question_text": "", "marks": 0 }] }));
    let result = validate_question(&doc.questions[0]);
    assert!(!result.is_valid);
    assert!(result.errors_at_least(Severity::High).count() >= 2);
}

// ---------------------------------------------------------------------------
// Richer paper
// ---------------------------------------------------------------------------
#[test]
fn sample_paper_summary() {
    let summary = analyze_json(sample_paper());

    assert_eq!(summary.question_count, 2);
    assert_eq!(summary.node_count, 4);
    assert_eq!(summary.question_types, vec!["complex", "mcq"]);
    assert_eq!(summary.answer_formats, vec!["graph"]);
    assert_eq!(summary.subjects_detected, vec!["Physics", "0625"]);
    assert_eq!(summary.exam_board.as_deref(), Some("Cambridge International (CIE)"));
    assert!(summary.uses_forward_slash);
    assert!(summary.uses_line_by_line_marking);
    assert!(summary.includes_contextual_answers);
    assert_eq!(summary.context_types_detected, vec!["unit"]);
    assert!(summary.includes_figures);
    assert!(summary.includes_hints);
    assert!(!summary.includes_explanations);
    assert!(summary.requires_manual_marking);
    assert!(summary.has_component_marking);
    assert!(summary.has_multi_mark_allocations);
    assert_eq!(summary.abbreviations_detected, vec!["ECF"]);
}

#[test]
fn sample_paper_reconciles_from_cambridge_preset() {
    let doc = PaperDocument::from(&sample_paper());
    let preset = load_preset("cambridge").unwrap();
    let inspection = inspect(&doc, &preset);

    let rules = &inspection.rules;
    assert!(rules.line_by_line_processing);
    assert!(rules.figure_detection);
    assert!(rules.context_required);
    assert!(rules.answer_structure.require_context);
    assert!(rules.educational_content.hints_required);
    assert!(rules.subject_specific.physics);
    assert!(!rules.subject_specific.chemistry);
    assert!(rules.mark_scheme.requires_manual_marking);
    assert!(rules.mark_scheme.component_marking);
    assert!(rules.mark_scheme.marking_criteria);
    // Preset flags the paper gives no evidence for stay on
    assert!(rules.abbreviations.ora);
    assert!(rules.abbreviations.owtte);
    assert!(!inspection.changes.is_empty());
}

#[test]
fn reconcile_reaches_fixed_point() {
    let summary = analyze_json(sample_paper());
    for preset in ["default", "cambridge", "edexcel"] {
        let rules = load_preset(preset).unwrap();
        let once = reconcile(&summary, &rules).into_owned();
        let twice = reconcile(&summary, &once);
        assert!(matches!(twice, Cow::Borrowed(_)), "preset {preset} not idempotent");
    }
}

#[test]
fn reconcile_is_monotonic_outside_wholesale_blocks() {
    let summary = analyze_json(json!({ "questions": [] }));
    let mut rules = ExtractionRules::default();
    rules.forward_slash_handling = true;
    rules.line_by_line_processing = true;
    rules.alternative_linking = true;
    rules.context_required = true;
    rules.figure_detection = true;
    rules.abbreviations.ora = true;
    rules.answer_structure.validate_linking = true;
    rules.answer_structure.require_context = true;
    rules.answer_structure.accept_alternatives = true;
    rules.answer_structure.validate_marks = true;
    rules.mark_scheme.requires_manual_marking = true;
    rules.mark_scheme.component_marking = true;
    rules.mark_scheme.marking_criteria = true;
    rules.educational_content.hints_required = true;
    rules.subject_specific.biology = true;

    let (updated, changes) = reconcile_with_changes(&summary, &rules);
    assert_eq!(
        ExtractionRules {
            educational_content: updated.educational_content,
            subject_specific: updated.subject_specific,
            ..rules.clone()
        },
        updated
    );
    let fields: Vec<_> = changes.iter().map(|c| c.field).collect();
    assert_eq!(
        fields,
        vec!["educationalContent.hintsRequired", "subjectSpecific.biology"]
    );
}

#[test]
fn batch_validation_of_sample_paper() {
    let doc = PaperDocument::from(&sample_paper());
    let report = validate_questions(&doc.questions);
    assert_eq!(report.total, 2);
    assert!(report.all_valid(), "{:#?}", report.questions);
    // Part (b) is a graph: marked manually, so no model answer is fine
    let q2 = report.get("2").unwrap();
    assert!(q2
        .warnings
        .iter()
        .any(|w| w.field == "parts[1].correct_answers"));
}

#[test]
fn load_document_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{}", sample_paper()).unwrap();
    let doc = load_document(file.path()).unwrap();
    assert_eq!(doc.questions.len(), 2);
    assert_eq!(analyze(&doc), analyze_json(sample_paper()));
}
