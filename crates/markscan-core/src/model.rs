//! Lenient, fully-optional view of an uploaded exam-paper document.
//!
//! Documents come from many sources and rarely agree on shape, so every
//! type here is built from a raw [`serde_json::Value`] without failing:
//! a missing or wrongly-typed field simply reads as absent.

use crate::sanitize::{
    ensure_array, ensure_number, ensure_string, is_non_empty_object, is_present, is_true,
    is_truthy,
    non_empty_string,
};
use serde::Deserialize;
use serde_json::Value;
use std::borrow::Cow;

/// Answer formats that cannot be auto-graded.
pub const MANUAL_MARKING_FORMATS: &[&str] = &[
    "diagram",
    "chemical_structure",
    "structural_diagram",
    "table",
    "graph",
    "multi_line",
    "multi_line_labeled",
    "file_upload",
    "audio",
    "code",
];

/// Whether an answer format needs a human marker.
pub fn is_manual_marking_format(format: &str) -> bool {
    MANUAL_MARKING_FORMATS.contains(&format)
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub struct PaperDocument {
    pub subject: Option<String>,
    pub subject_code: Option<String>,
    pub exam_board: Option<String>,
    pub board: Option<String>,
    pub paper_metadata: Option<PaperMetadata>,
    pub metadata: Option<PaperMetadata>,
    pub questions: Vec<QuestionNode>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaperMetadata {
    pub subject: Option<String>,
    pub subject_code: Option<String>,
    pub exam_board: Option<String>,
}

impl PaperDocument {
    /// The first exam board given at document level.
    pub fn exam_board(&self) -> Option<&str> {
        self.exam_board
            .as_deref()
            .or(self.board.as_deref())
            .or_else(|| {
                self.paper_metadata
                    .as_ref()
                    .and_then(|m| m.exam_board.as_deref())
            })
    }

    /// Subject strings declared at document level, in declaration order.
    pub fn declared_subjects(&self) -> Vec<&str> {
        let mut subjects = Vec::new();
        subjects.extend(self.subject.as_deref());
        subjects.extend(self.subject_code.as_deref());
        for meta in [&self.paper_metadata, &self.metadata].into_iter().flatten() {
            subjects.extend(meta.subject.as_deref());
            subjects.extend(meta.subject_code.as_deref());
        }
        subjects
    }
}

impl From<&Value> for PaperDocument {
    fn from(value: &Value) -> Self {
        PaperDocument {
            subject: non_empty_string(value.get("subject")),
            subject_code: non_empty_string(value.get("subject_code")),
            exam_board: non_empty_string(value.get("exam_board")),
            board: non_empty_string(value.get("board")),
            paper_metadata: value.get("paper_metadata").and_then(PaperMetadata::from_value),
            metadata: value.get("metadata").and_then(PaperMetadata::from_value),
            questions: ensure_array(value.get("questions"))
                .iter()
                .map(QuestionNode::from)
                .collect(),
        }
    }
}

impl From<Value> for PaperDocument {
    fn from(value: Value) -> Self {
        PaperDocument::from(&value)
    }
}

impl PaperMetadata {
    fn from_value(value: &Value) -> Option<PaperMetadata> {
        if !value.is_object() {
            return None;
        }
        Some(PaperMetadata {
            subject: non_empty_string(value.get("subject")),
            subject_code: non_empty_string(value.get("subject_code")),
            exam_board: non_empty_string(value.get("exam_board")),
        })
    }
}

/// Context evidence attached to a question or answer, reduced to the
/// context types it names. Empty means no context was given.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContextInfo {
    pub types: Vec<String>,
}

impl ContextInfo {
    fn from_value(value: &Value) -> ContextInfo {
        let mut types = Vec::new();

        match value.get("context") {
            Some(Value::Array(items)) => {
                for item in items {
                    types.push(context_type_of(item));
                }
            }
            Some(ctx) if is_truthy(Some(ctx)) => types.push(context_type_of(ctx)),
            _ => {}
        }

        for field in ensure_array(value.get("context_fields")) {
            let name = field
                .get("type")
                .and_then(|t| non_empty_string(Some(t)))
                .or_else(|| non_empty_string(Some(field)))
                .unwrap_or_else(|| "context_field".to_string());
            types.push(name);
        }

        if let Some(context_type) = non_empty_string(value.get("context_type")) {
            types.push(context_type);
        }
        if non_empty_string(value.get("unit")).is_some() {
            types.push("unit".to_string());
        }
        if is_truthy(value.get("measurement_details")) {
            types.push("measurement".to_string());
        }

        ContextInfo { types }
    }

    pub fn is_present(&self) -> bool {
        !self.types.is_empty()
    }
}

fn context_type_of(item: &Value) -> String {
    non_empty_string(item.get("type")).unwrap_or_else(|| "context".to_string())
}

/// Shape of a `mark_scheme` field.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum MarkSchemeField {
    #[default]
    Absent,
    /// An itemized scheme with this many entries.
    Lines(usize),
    Text(String),
}

impl MarkSchemeField {
    fn from_value(value: Option<&Value>) -> MarkSchemeField {
        match value {
            Some(Value::Array(items)) => MarkSchemeField::Lines(items.len()),
            Some(Value::String(s)) => MarkSchemeField::Text(s.clone()),
            _ => MarkSchemeField::Absent,
        }
    }

    /// Itemized or multi-line schemes mark line by line.
    pub fn is_line_by_line(&self) -> bool {
        match self {
            MarkSchemeField::Absent => false,
            MarkSchemeField::Lines(n) => *n > 0,
            MarkSchemeField::Text(s) => s.contains('\n'),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChoiceOption {
    pub label: Option<String>,
    pub text: Option<String>,
    pub is_correct: bool,
}

impl From<&Value> for ChoiceOption {
    fn from(value: &Value) -> Self {
        if !value.is_object() {
            return ChoiceOption {
                label: None,
                text: non_empty_string(Some(value)),
                is_correct: false,
            };
        }
        ChoiceOption {
            label: non_empty_string(value.get("label"))
                .or_else(|| non_empty_string(value.get("option_label")))
                .or_else(|| non_empty_string(value.get("key"))),
            text: non_empty_string(value.get("text"))
                .or_else(|| non_empty_string(value.get("option_text")))
                .or_else(|| non_empty_string(value.get("content"))),
            is_correct: is_truthy(value.get("is_correct")) || is_truthy(value.get("correct")),
        }
    }
}

/// Boolean marking conventions declared in a nested `marking_flags` object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarkingFlags {
    pub owtte: bool,
    pub ora: bool,
    pub ecf: bool,
    pub cao: bool,
}

impl MarkingFlags {
    fn from_value(value: &Value) -> Option<MarkingFlags> {
        if !value.is_object() {
            return None;
        }
        Some(MarkingFlags {
            owtte: any_truthy(value, &["owtte", "accepts_equivalent_phrasing"]),
            ora: any_truthy(value, &["ora", "accepts_reverse_argument"]),
            ecf: any_truthy(value, &["ecf", "error_carried_forward"]),
            cao: any_truthy(value, &["cao", "correct_answer_only"]),
        })
    }
}

/// One accepted answer from a `correct_answers` list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnswerEntry {
    pub answer: String,
    pub marks: Option<f64>,
    pub maximum_marks_available: Option<f64>,
    pub total_alternatives: Option<f64>,
    pub linked_alternatives: Vec<Value>,
    pub alternative_type: Option<String>,
    pub context: ContextInfo,
    /// `line_number` or `marking_point` was given.
    pub has_line_reference: bool,
    pub marking_points: Vec<Value>,
    /// `accepts_equivalent_phrasing` or `accepts_equivalent`.
    pub accepts_equivalent_phrasing: bool,
    pub accepts_reverse_argument: bool,
    pub error_carried_forward: bool,
    pub accept_level: Option<String>,
    pub marking_flags: Option<MarkingFlags>,
    pub partial_credit_declared: bool,
    pub answer_requirement: Option<String>,
    /// `conditional_on`, `conditions` or `marking_conditions` was given.
    pub has_conditions: bool,
    pub rejected_answers: Vec<Value>,
    pub ignored_content: Vec<Value>,
    pub has_answer_variations: bool,
}

impl AnswerEntry {
    /// Answer entry standing in for a bare `correct_answer` field.
    pub fn synthesized(
        answer: &str,
        marks: Option<f64>,
        answer_requirement: Option<&str>,
    ) -> AnswerEntry {
        AnswerEntry {
            answer: answer.to_string(),
            marks,
            answer_requirement: answer_requirement.map(str::to_string),
            ..AnswerEntry::default()
        }
    }

    /// `maximum_marks_available` and `marks` are both given and disagree.
    pub fn has_marks_mismatch(&self) -> bool {
        marks_mismatch(self.maximum_marks_available, self.marks)
    }
}

impl From<&Value> for AnswerEntry {
    fn from(value: &Value) -> Self {
        if !value.is_object() {
            return AnswerEntry {
                answer: ensure_string(Some(value)),
                ..AnswerEntry::default()
            };
        }
        let present = |key: &str| value.get(key).is_some_and(|v| !v.is_null());
        AnswerEntry {
            answer: ensure_string(value.get("answer")),
            marks: ensure_number(value.get("marks")),
            maximum_marks_available: ensure_number(value.get("maximum_marks_available")),
            total_alternatives: ensure_number(value.get("total_alternatives")),
            linked_alternatives: ensure_array(value.get("linked_alternatives")).to_vec(),
            alternative_type: non_empty_string(value.get("alternative_type")),
            context: ContextInfo::from_value(value),
            has_line_reference: present("line_number") || present("marking_point"),
            marking_points: ensure_array(value.get("marking_points")).to_vec(),
            accepts_equivalent_phrasing: is_truthy(value.get("accepts_equivalent_phrasing"))
                || is_truthy(value.get("accepts_equivalent")),
            accepts_reverse_argument: is_truthy(value.get("accepts_reverse_argument")),
            error_carried_forward: is_truthy(value.get("error_carried_forward")),
            accept_level: non_empty_string(value.get("accept_level")),
            marking_flags: value.get("marking_flags").and_then(MarkingFlags::from_value),
            partial_credit_declared: any_present(
                value,
                &["partial_credit", "partial_marking", "partial_marks"],
            ),
            answer_requirement: non_empty_string(value.get("answer_requirement")),
            has_conditions: any_present(
                value,
                &["conditional_on", "conditions", "marking_conditions"],
            ),
            rejected_answers: ensure_array(value.get("rejected_answers")).to_vec(),
            ignored_content: ensure_array(value.get("ignored_content")).to_vec(),
            has_answer_variations: is_non_empty_object(value.get("answer_variations")),
        }
    }
}

/// A question, part or subpart. Parts and subparts share the same shape.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuestionNode {
    /// `id`, `question_number` or `number`.
    pub id: Option<String>,
    /// Explicit `type` field.
    pub question_type: Option<String>,
    /// Secondary `question_type` field some exporters emit.
    pub declared_question_type: Option<String>,
    pub answer_format: Option<String>,
    pub answer_requirement: Option<String>,
    pub question_text: Option<String>,
    pub hint: Option<String>,
    pub explanation: Option<String>,
    pub marks: Option<f64>,
    pub maximum_marks_available: Option<f64>,
    pub options: Vec<ChoiceOption>,
    pub parts: Vec<QuestionNode>,
    pub subparts: Vec<QuestionNode>,
    pub correct_answer: Option<String>,
    /// `Some` only when `correct_answers` is an array.
    pub correct_answers: Option<Vec<AnswerEntry>>,
    /// `figure` or `figure_required`.
    pub figure: bool,
    pub attachments: Vec<Value>,
    pub context: ContextInfo,
    pub subject: Option<String>,
    pub subject_code: Option<String>,
    pub partial_credit_declared: bool,
    pub marking_points: Vec<Value>,
    pub mark_scheme: MarkSchemeField,
    pub line_by_line: bool,
}

impl QuestionNode {
    /// Explicit type, or one inferred from the node's structure.
    pub fn effective_type(&self) -> Option<&str> {
        if let Some(t) = self.question_type.as_deref() {
            return Some(t);
        }
        if !self.parts.is_empty() {
            Some("complex")
        } else if !self.options.is_empty() {
            Some("mcq")
        } else if self.answer_format.as_deref() == Some("true_false") {
            Some("tf")
        } else {
            None
        }
    }

    /// Whether the node's answer format needs a human marker.
    pub fn requires_manual_marking(&self) -> bool {
        self.answer_format
            .as_deref()
            .is_some_and(is_manual_marking_format)
    }

    /// The node's answer entries; a bare `correct_answer` is wrapped into one
    /// entry carrying the node's marks and requirement.
    pub fn answer_entries(&self) -> Cow<'_, [AnswerEntry]> {
        match (&self.correct_answers, &self.correct_answer) {
            (Some(entries), _) => Cow::Borrowed(entries.as_slice()),
            (None, Some(answer)) => Cow::Owned(vec![AnswerEntry::synthesized(
                answer,
                self.marks,
                self.answer_requirement.as_deref(),
            )]),
            (None, None) => Cow::Owned(Vec::new()),
        }
    }

    /// `maximum_marks_available` and `marks` are both given and disagree.
    pub fn has_marks_mismatch(&self) -> bool {
        marks_mismatch(self.maximum_marks_available, self.marks)
    }

    /// Parts followed by subparts, in document order.
    pub fn children(&self) -> impl Iterator<Item = &QuestionNode> {
        self.parts.iter().chain(self.subparts.iter())
    }

    pub fn has_answer_data(&self) -> bool {
        self.correct_answer.is_some()
            || self.correct_answers.as_ref().is_some_and(|a| !a.is_empty())
            || self.options.iter().any(|o| o.is_correct)
    }
}

impl From<&Value> for QuestionNode {
    fn from(value: &Value) -> Self {
        QuestionNode {
            id: non_empty_string(value.get("id"))
                .or_else(|| non_empty_string(value.get("question_number")))
                .or_else(|| non_empty_string(value.get("number"))),
            question_type: non_empty_string(value.get("type")),
            declared_question_type: non_empty_string(value.get("question_type")),
            answer_format: non_empty_string(value.get("answer_format")),
            answer_requirement: non_empty_string(value.get("answer_requirement")),
            question_text: ["question_text", "question_description", "description", "text"]
                .iter()
                .find_map(|k| non_empty_string(value.get(*k))),
            hint: non_empty_string(value.get("hint")),
            explanation: non_empty_string(value.get("explanation")),
            marks: ensure_number(value.get("marks")),
            maximum_marks_available: ensure_number(value.get("maximum_marks_available")),
            options: ensure_array(value.get("options"))
                .iter()
                .map(ChoiceOption::from)
                .collect(),
            parts: ensure_array(value.get("parts"))
                .iter()
                .map(QuestionNode::from)
                .collect(),
            subparts: ensure_array(value.get("subparts"))
                .iter()
                .map(QuestionNode::from)
                .collect(),
            correct_answer: non_empty_string(value.get("correct_answer")),
            correct_answers: match value.get("correct_answers") {
                Some(Value::Array(items)) => Some(items.iter().map(AnswerEntry::from).collect()),
                _ => None,
            },
            figure: is_truthy(value.get("figure")) || is_truthy(value.get("figure_required")),
            attachments: ensure_array(value.get("attachments")).to_vec(),
            context: ContextInfo::from_value(value),
            subject: non_empty_string(value.get("subject")),
            subject_code: non_empty_string(value.get("subject_code")),
            partial_credit_declared: any_present(
                value,
                &[
                    "partial_credit",
                    "partial_marking",
                    "partial_mark_distribution",
                    "partial_marks",
                ],
            ),
            marking_points: ensure_array(value.get("marking_points")).to_vec(),
            mark_scheme: MarkSchemeField::from_value(value.get("mark_scheme")),
            line_by_line: is_true(value.get("line_by_line")),
        }
    }
}

fn any_truthy(value: &Value, keys: &[&str]) -> bool {
    keys.iter().any(|k| is_truthy(value.get(*k)))
}

fn any_present(value: &Value, keys: &[&str]) -> bool {
    keys.iter().any(|k| is_present(value.get(*k)))
}

fn marks_mismatch(maximum: Option<f64>, marks: Option<f64>) -> bool {
    matches!((maximum, marks), (Some(max), Some(m)) if max != m)
}
