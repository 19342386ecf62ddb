use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Structural facts derived from one exam-paper document.
///
/// Recomputed from scratch on every analysis; sequences are sorted except
/// `subjects_detected`, which keeps the order subjects were first seen in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonGuidelineSummary {
    pub question_types: Vec<String>,
    pub answer_formats: Vec<String>,
    pub answer_requirements: Vec<String>,
    pub subjects_detected: Vec<String>,
    pub context_types_detected: Vec<String>,
    pub abbreviations_detected: Vec<String>,
    /// Human-readable notes about detected marking conventions.
    pub variation_signals: Vec<String>,
    /// Raw exam board string from the document, if any.
    pub exam_board: Option<String>,
    pub uses_forward_slash: bool,
    pub uses_line_by_line_marking: bool,
    pub uses_alternative_linking: bool,
    pub includes_contextual_answers: bool,
    pub includes_figures: bool,
    pub includes_attachments: bool,
    pub includes_hints: bool,
    pub includes_explanations: bool,
    pub requires_manual_marking: bool,
    pub has_component_marking: bool,
    pub has_multi_mark_allocations: bool,
    pub partial_credit_detected: bool,
    /// Top-level questions in the document.
    pub question_count: usize,
    /// Questions, parts and subparts visited.
    pub node_count: usize,
}

impl JsonGuidelineSummary {
    pub fn has_abbreviation(&self, abbreviation: Abbreviation) -> bool {
        self.abbreviations_detected
            .iter()
            .any(|a| a == abbreviation.label())
    }
}

/// Marking-convention abbreviations used in mark schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Abbreviation {
    /// Or words to that effect.
    Owtte,
    /// Or reverse argument.
    Ora,
    /// Error carried forward.
    Ecf,
    /// Correct answer only.
    Cao,
}

impl Abbreviation {
    pub const ALL: [Abbreviation; 4] = [
        Abbreviation::Ora,
        Abbreviation::Owtte,
        Abbreviation::Ecf,
        Abbreviation::Cao,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Abbreviation::Owtte => "OWTTE",
            Abbreviation::Ora => "ORA",
            Abbreviation::Ecf => "ECF",
            Abbreviation::Cao => "CAO",
        }
    }

    /// Variation signal recorded alongside the abbreviation.
    pub fn signal(self) -> &'static str {
        match self {
            Abbreviation::Owtte => "OWTTE: equivalent phrasing accepted",
            Abbreviation::Ora => "ORA: reverse argument accepted",
            Abbreviation::Ecf => "ECF: error carried forward",
            Abbreviation::Cao => "CAO: correct answer only",
        }
    }
}

pub const SIGNAL_CONDITIONAL_MARKING: &str = "Conditional marking rules present";
pub const SIGNAL_REJECT_LIST: &str = "Reject list provided";
pub const SIGNAL_IGNORE_LIST: &str = "Ignore list provided";
pub const SIGNAL_ANSWER_VARIATIONS: &str = "Documented answer variations";

/// Evidence accumulated during one tree walk.
///
/// Sets only grow and flags only move from false to true.
#[derive(Debug, Default)]
pub(crate) struct Collector {
    pub question_types: BTreeSet<String>,
    pub answer_formats: BTreeSet<String>,
    pub answer_requirements: BTreeSet<String>,
    pub subjects: Vec<String>,
    pub context_types: BTreeSet<String>,
    pub abbreviations: BTreeSet<&'static str>,
    pub variation_signals: BTreeSet<String>,
    pub uses_forward_slash: bool,
    pub uses_line_by_line_marking: bool,
    pub uses_alternative_linking: bool,
    pub includes_contextual_answers: bool,
    pub includes_figures: bool,
    pub includes_attachments: bool,
    pub includes_hints: bool,
    pub includes_explanations: bool,
    pub requires_manual_marking: bool,
    pub has_component_marking: bool,
    pub has_multi_mark_allocations: bool,
    pub partial_credit_detected: bool,
    pub node_count: usize,
}

impl Collector {
    pub fn add_subject(&mut self, subject: &str) {
        let subject = subject.trim();
        if subject.is_empty() || self.subjects.iter().any(|s| s == subject) {
            return;
        }
        self.subjects.push(subject.to_string());
    }

    pub fn add_abbreviation(&mut self, abbreviation: Abbreviation) {
        self.abbreviations.insert(abbreviation.label());
        self.variation_signals
            .insert(abbreviation.signal().to_string());
    }

    pub fn add_signal(&mut self, signal: &str) {
        self.variation_signals.insert(signal.to_string());
    }

    pub fn add_context_types<'a>(&mut self, types: impl IntoIterator<Item = &'a String>) {
        for t in types {
            self.context_types.insert(t.clone());
        }
    }

    pub fn finish(
        mut self,
        exam_board: Option<String>,
        question_count: usize,
    ) -> JsonGuidelineSummary {
        if !self.context_types.is_empty() {
            self.includes_contextual_answers = true;
        }

        JsonGuidelineSummary {
            question_types: self.question_types.into_iter().collect(),
            answer_formats: self.answer_formats.into_iter().collect(),
            answer_requirements: self.answer_requirements.into_iter().collect(),
            subjects_detected: self.subjects,
            context_types_detected: self.context_types.into_iter().collect(),
            abbreviations_detected: self
                .abbreviations
                .into_iter()
                .map(str::to_string)
                .collect(),
            variation_signals: self.variation_signals.into_iter().collect(),
            exam_board,
            uses_forward_slash: self.uses_forward_slash,
            uses_line_by_line_marking: self.uses_line_by_line_marking,
            uses_alternative_linking: self.uses_alternative_linking,
            includes_contextual_answers: self.includes_contextual_answers,
            includes_figures: self.includes_figures,
            includes_attachments: self.includes_attachments,
            includes_hints: self.includes_hints,
            includes_explanations: self.includes_explanations,
            requires_manual_marking: self.requires_manual_marking,
            has_component_marking: self.has_component_marking,
            has_multi_mark_allocations: self.has_multi_mark_allocations,
            partial_credit_detected: self.partial_credit_detected,
            question_count,
            node_count: self.node_count,
        }
    }
}
