use super::signals::{scan_answer, scan_requirement};
use super::summary::{Collector, JsonGuidelineSummary};
use crate::model::{PaperDocument, QuestionNode};
use serde_json::Value;
use tracing::{debug, trace};

/// Derive the structural summary of a paper document.
///
/// Walks every question depth-first (question, then its parts, then its
/// subparts, in array order). Evidence from any node applies to the whole
/// document. Never fails: malformed fields count as absent evidence.
pub fn analyze(document: &PaperDocument) -> JsonGuidelineSummary {
    let mut collector = Collector::default();

    for subject in document.declared_subjects() {
        collector.add_subject(subject);
    }

    for question in &document.questions {
        visit(question, &mut collector);
    }

    let summary = collector.finish(
        document.exam_board().map(str::to_string),
        document.questions.len(),
    );

    debug!(
        questions = summary.question_count,
        nodes = summary.node_count,
        forward_slash = summary.uses_forward_slash,
        alternatives = summary.uses_alternative_linking,
        manual_marking = summary.requires_manual_marking,
        abbreviations = ?summary.abbreviations_detected,
        "analyzed paper document"
    );

    summary
}

/// Analyze a raw JSON value. Anything but an object yields the empty summary.
pub fn analyze_value(value: &Value) -> JsonGuidelineSummary {
    if !value.is_object() {
        debug!("document root is not an object, skipping analysis");
        return JsonGuidelineSummary::default();
    }
    analyze(&PaperDocument::from(value))
}

fn visit(node: &QuestionNode, c: &mut Collector) {
    c.node_count += 1;
    trace!(id = ?node.id, kind = ?node.effective_type(), "visiting question node");

    scan_node(node, c);

    for child in node.children() {
        if child.marks.is_some_and(|m| m > 0.0) {
            c.has_multi_mark_allocations = true;
        }
        visit(child, c);
    }
}

/// Record the evidence a single node carries, without descending into it.
pub(crate) fn scan_node(node: &QuestionNode, c: &mut Collector) {
    if let Some(kind) = node.effective_type() {
        c.question_types.insert(kind.to_string());
    }

    if let Some(format) = node.answer_format.as_deref() {
        c.answer_formats.insert(format.to_string());
    }
    if node.requires_manual_marking() {
        c.requires_manual_marking = true;
    }

    if let Some(requirement) = node.answer_requirement.as_deref() {
        scan_requirement(requirement, c);
    }

    if node.context.is_present() {
        c.includes_contextual_answers = true;
        c.add_context_types(&node.context.types);
    }

    if node.figure {
        c.includes_figures = true;
    }
    if !node.attachments.is_empty() {
        c.includes_attachments = true;
    }
    if node.hint.is_some() {
        c.includes_hints = true;
    }
    if node.explanation.is_some() {
        c.includes_explanations = true;
    }

    if node.partial_credit_declared || node.has_marks_mismatch() {
        c.partial_credit_detected = true;
    }

    if !node.marking_points.is_empty() || node.mark_scheme.is_line_by_line() || node.line_by_line
    {
        c.uses_line_by_line_marking = true;
    }

    let answer_count = node.correct_answers.as_ref().map_or(0, Vec::len);
    if node.marks.is_some_and(|m| m > 1.0) || answer_count > 1 {
        c.has_multi_mark_allocations = true;
    }

    if !node.parts.is_empty() || !node.subparts.is_empty() {
        c.has_component_marking = true;
    }

    for subject in [node.subject.as_deref(), node.subject_code.as_deref()]
        .into_iter()
        .flatten()
    {
        c.add_subject(subject);
    }

    for entry in node.answer_entries().iter() {
        scan_answer(entry, c);
    }
}
