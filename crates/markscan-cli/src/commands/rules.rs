use markscan_core::error::MarkscanError;
use markscan_core::rules::builtin;
use std::path::Path;

pub fn list() -> Result<(), MarkscanError> {
    println!("Available predefined rule presets:\n");
    for name in builtin::PRESETS {
        let rules = builtin::load_preset(name)?;
        println!("  {:<10} [{}]", name, rules.exam_board);
        if let Some(desc) = builtin::describe_preset(name) {
            println!("             {}", desc);
        }
        println!();
    }
    Ok(())
}

pub fn show(preset: &str) -> Result<(), MarkscanError> {
    let rules = builtin::load_preset(preset)?;
    let json = serde_json::to_string_pretty(&rules)?;
    println!("{json}");
    Ok(())
}

pub fn schema() -> Result<(), MarkscanError> {
    print!(
        r#"Extraction Rules Schema
=======================

A rules file tells the import pipeline which mark-scheme conventions to
expect. `markscan reconcile` starts from a rules file (or preset) and
turns on whatever the analyzed paper shows it needs. Every field is
optional and defaults to false; unknown fields are rejected.

Top-level fields:
  forwardSlashHandling   (bool)    Split "A / B" answers into alternatives
  lineByLineProcessing   (bool)    Mark against itemized marking points
  alternativeLinking     (bool)    Link alternative answers to one mark
  contextRequired        (bool)    Answers carry units or context
  figureDetection        (bool)    Questions reference figures/attachments
  examBoard              (string)  "Cambridge" (default), "Edexcel" or "Both"

educationalContent (replaced on every reconcile):
  hintsRequired          (bool)
  explanationsRequired   (bool)

subjectSpecific (replaced on every reconcile):
  physics, chemistry, biology, mathematics   (bool)

abbreviations:
  ora     (bool)  Or reverse argument
  owtte   (bool)  Or words to that effect
  ecf     (bool)  Error carried forward
  cao     (bool)  Correct answer only

answerStructure:
  validateLinking        (bool)
  requireContext         (bool)
  acceptAlternatives     (bool)
  validateMarks          (bool)

markScheme:
  requiresManualMarking  (bool)    Some answers need a human marker
  componentMarking       (bool)    Marks are split across parts
  markingCriteria        (bool)    Multi-mark or partial-credit criteria

Example:
{{
  "forwardSlashHandling": true,
  "abbreviations": {{ "ora": true, "ecf": true }},
  "answerStructure": {{ "acceptAlternatives": true }},
  "markScheme": {{ "componentMarking": true }},
  "examBoard": "Edexcel"
}}

Run `markscan rules show <preset>` to see a complete rules file.
"#
    );
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), MarkscanError> {
    let rules = markscan_core::rules::load_rules(file)?;

    println!("Rules file '{}' is valid.", file.display());
    println!("  Exam board: {}", rules.exam_board);

    let warnings = markscan_core::rules::lint_rules(&rules);
    if !warnings.is_empty() {
        println!("\nWarnings:");
        for w in &warnings {
            println!("  - {}", w);
        }
    }

    Ok(())
}
