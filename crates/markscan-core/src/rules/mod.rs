pub mod builtin;
pub mod schema;

use crate::error::MarkscanError;
use schema::ExtractionRules;
use std::path::Path;
use tracing::debug;

/// Load extraction rules from a JSON file.
pub fn load_rules(path: &Path) -> Result<ExtractionRules, MarkscanError> {
    let content = std::fs::read_to_string(path).map_err(|e| MarkscanError::RulesLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    debug!(path = %path.display(), "loading extraction rules");
    parse_rules(&content, path)
}

/// Parse extraction rules from a JSON string, attributing errors to `source`.
pub fn parse_rules(json: &str, source: &Path) -> Result<ExtractionRules, MarkscanError> {
    serde_json::from_str(json).map_err(|e| MarkscanError::RulesLoad {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Parse extraction rules from a JSON string (no file path context).
pub fn parse_rules_str(json: &str) -> Result<ExtractionRules, MarkscanError> {
    let trimmed = json.trim();
    if !trimmed.starts_with('{') {
        return Err(MarkscanError::RulesInvalid(
            "extraction rules must be a JSON object".into(),
        ));
    }
    Ok(serde_json::from_str(trimmed)?)
}

/// Report settings that are valid but unlikely to be intended.
pub fn lint_rules(rules: &ExtractionRules) -> Vec<String> {
    let mut warnings = Vec::new();

    if rules.answer_structure.require_context && !rules.context_required {
        warnings.push(
            "answerStructure.requireContext is enabled but contextRequired is not".to_string(),
        );
    }
    if rules.answer_structure.validate_linking && !rules.alternative_linking {
        warnings.push(
            "answerStructure.validateLinking is enabled but alternativeLinking is not".to_string(),
        );
    }
    if rules.mark_scheme.marking_criteria && !rules.answer_structure.validate_marks {
        warnings.push(
            "markScheme.markingCriteria is enabled but answerStructure.validateMarks is not"
                .to_string(),
        );
    }
    if rules.abbreviations.cao && rules.answer_structure.accept_alternatives {
        warnings.push(
            "abbreviations.cao (correct answer only) is combined with answerStructure.acceptAlternatives"
                .to_string(),
        );
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_valid_rules() {
        let rules = parse_rules_str(r#"{ "examBoard": "Edexcel", "figureDetection": true }"#).unwrap();
        assert_eq!(rules.exam_board, schema::ExamBoard::Edexcel);
        assert!(rules.figure_detection);
    }

    #[test]
    fn test_non_object_rejected() {
        assert!(matches!(
            parse_rules_str("[true]"),
            Err(MarkscanError::RulesInvalid(_))
        ));
    }

    #[test]
    fn test_unknown_exam_board_rejected() {
        assert!(parse_rules_str(r#"{ "examBoard": "AQA" }"#).is_err());
    }

    #[test]
    fn test_load_rules_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "lineByLineProcessing": true }}"#).unwrap();
        let rules = load_rules(file.path()).unwrap();
        assert!(rules.line_by_line_processing);
    }

    #[test]
    fn test_load_missing_file_names_path() {
        let err = load_rules(Path::new("/nonexistent/rules.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/rules.json"));
    }

    #[test]
    fn test_lint_flags_inconsistencies() {
        let mut rules = ExtractionRules::default();
        assert!(lint_rules(&rules).is_empty());

        rules.answer_structure.require_context = true;
        rules.answer_structure.validate_linking = true;
        assert_eq!(lint_rules(&rules).len(), 2);
    }
}
