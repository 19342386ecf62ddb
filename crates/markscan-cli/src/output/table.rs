use markscan_core::guideline::JsonGuidelineSummary;
use markscan_core::validation::BatchValidationReport;
use markscan_core::Inspection;

use crate::commands::answer::AnswerBreakdown;

pub fn print_summary(summary: &JsonGuidelineSummary) {
    println!("=== Document summary ===\n");
    println!(
        "  Questions: {} ({} nodes including parts)",
        summary.question_count, summary.node_count
    );
    if let Some(ref board) = summary.exam_board {
        println!("  Exam board: {}", board);
    }
    println!();

    let lists = [
        ("Question types", &summary.question_types),
        ("Answer formats", &summary.answer_formats),
        ("Answer requirements", &summary.answer_requirements),
        ("Subjects", &summary.subjects_detected),
        ("Context types", &summary.context_types_detected),
        ("Abbreviations", &summary.abbreviations_detected),
    ];
    let width = lists.iter().map(|(label, _)| label.len()).max().unwrap_or(10);
    for (label, values) in lists {
        let shown = if values.is_empty() {
            "-".to_string()
        } else {
            values.join(", ")
        };
        println!("  {:<width$}  {}", label, shown, width = width);
    }
    println!();

    let flags = [
        ("Forward-slash alternatives", summary.uses_forward_slash),
        ("Line-by-line marking", summary.uses_line_by_line_marking),
        ("Alternative linking", summary.uses_alternative_linking),
        ("Contextual answers", summary.includes_contextual_answers),
        ("Figures", summary.includes_figures),
        ("Attachments", summary.includes_attachments),
        ("Hints", summary.includes_hints),
        ("Explanations", summary.includes_explanations),
        ("Manual marking", summary.requires_manual_marking),
        ("Component marking", summary.has_component_marking),
        ("Multi-mark allocations", summary.has_multi_mark_allocations),
        ("Partial credit", summary.partial_credit_detected),
    ];
    let width = flags.iter().map(|(label, _)| label.len()).max().unwrap_or(10);
    for (label, set) in flags {
        println!("  {:<width$}  {}", label, if set { "yes" } else { "no" }, width = width);
    }

    if !summary.variation_signals.is_empty() {
        println!("\n  Marking signals:");
        for signal in &summary.variation_signals {
            println!("    - {}", signal);
        }
    }
    println!();
}

pub fn print_inspection(inspection: &Inspection) {
    print_summary(&inspection.summary);

    println!("=== Rule changes ===\n");
    if inspection.changes.is_empty() {
        println!("  Rules already match the document.\n");
        return;
    }

    let width = inspection
        .changes
        .iter()
        .map(|c| c.field.len())
        .max()
        .unwrap_or(20);
    for change in &inspection.changes {
        println!(
            "  {:<width$}  {} -> {}",
            change.field,
            change.from,
            change.to,
            width = width
        );
    }
    println!();
}

pub fn print_validation(report: &BatchValidationReport) {
    for question in &report.questions {
        let result = &question.result;
        let status = if result.is_valid { "OK" } else { "INVALID" };
        println!("Question {}: {}", question.question_id, status);

        for e in &result.errors {
            println!("  [{}] {}: {}", e.severity, e.field, e.message);
        }
        for w in &result.warnings {
            println!("  [warning] {}: {}", w.field, w.message);
            if let Some(ref suggestion) = w.suggestion {
                println!("            {}", suggestion);
            }
        }
    }

    if !report.questions.is_empty() {
        println!();
    }
    println!(
        "{} question(s): {} valid, {} invalid",
        report.total, report.valid, report.invalid
    );
}

pub fn print_answer(breakdown: &AnswerBreakdown) {
    println!("Answer: {}\n", breakdown.answer);

    if !breakdown.slash_alternatives.is_empty() {
        println!("  Slash alternatives:");
        for alt in &breakdown.slash_alternatives {
            println!("    {}. {}", alt.id, alt.text);
        }
        println!();
    }

    let ops = &breakdown.operators;
    println!("  Operator: {:?}", ops.kind);
    if !ops.required_components.is_empty() {
        println!("    required: {}", ops.required_components.join(" | "));
    }
    if !ops.optional_components.is_empty() {
        println!("    any of:   {}", ops.optional_components.join(" | "));
    }
    println!();

    println!(
        "  Valid alternatives: {}",
        breakdown.valid_alternatives.join(" | ")
    );
    let c = &breakdown.complexity;
    println!(
        "  Complexity: {} alternative(s){}{}",
        c.alternative_count,
        if c.has_alternatives { ", has alternatives" } else { "" },
        if c.requires_all_components {
            ", all components required"
        } else {
            ""
        }
    );

    if let Some(ref q) = breakdown.question {
        println!();
        println!("  Answer format: {}", q.answer_format);
        println!("  Needs figure:  {}", if q.requires_figure { "yes" } else { "no" });
        println!("  Expectation:   {}", q.expectation.requirement);
        if q.expectation.partial_credit {
            println!("                 partial credit available");
        }
        if q.expectation.strict_marking {
            println!("                 strict marking");
        }
    }
    println!();
}
