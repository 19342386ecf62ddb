use serde::{Deserialize, Serialize};
use std::fmt;

/// Settings that steer how an import pipeline treats a paper document.
///
/// Every field defaults, so a rules file only needs the keys it changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct ExtractionRules {
    pub forward_slash_handling: bool,
    pub line_by_line_processing: bool,
    pub alternative_linking: bool,
    pub context_required: bool,
    pub figure_detection: bool,
    pub educational_content: EducationalContent,
    pub subject_specific: SubjectSpecific,
    pub abbreviations: AbbreviationRules,
    pub answer_structure: AnswerStructure,
    pub mark_scheme: MarkSchemeRules,
    pub exam_board: ExamBoard,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct EducationalContent {
    pub hints_required: bool,
    pub explanations_required: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct SubjectSpecific {
    pub physics: bool,
    pub chemistry: bool,
    pub biology: bool,
    pub mathematics: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AbbreviationRules {
    pub ora: bool,
    pub owtte: bool,
    pub ecf: bool,
    pub cao: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct AnswerStructure {
    pub validate_linking: bool,
    pub require_context: bool,
    pub accept_alternatives: bool,
    pub validate_marks: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct MarkSchemeRules {
    pub requires_manual_marking: bool,
    pub component_marking: bool,
    pub marking_criteria: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExamBoard {
    #[default]
    Cambridge,
    Edexcel,
    Both,
}

impl fmt::Display for ExamBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExamBoard::Cambridge => write!(f, "Cambridge"),
            ExamBoard::Edexcel => write!(f, "Edexcel"),
            ExamBoard::Both => write!(f, "Both"),
        }
    }
}

impl ExamBoard {
    /// Recognize an exam board from free text such as "Cambridge IGCSE" or
    /// "Pearson Edexcel". Text naming both boards maps to [`ExamBoard::Both`].
    pub fn from_str_loose(s: &str) -> Option<ExamBoard> {
        let lower = s.trim().to_lowercase();
        let cambridge = lower.contains("cambridge") || lower.contains("cie");
        let edexcel = lower.contains("edexcel") || lower.contains("pearson");
        match (cambridge, edexcel) {
            (true, true) => Some(ExamBoard::Both),
            (true, false) => Some(ExamBoard::Cambridge),
            (false, true) => Some(ExamBoard::Edexcel),
            (false, false) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exam_board_loose() {
        assert_eq!(ExamBoard::from_str_loose("Cambridge IGCSE"), Some(ExamBoard::Cambridge));
        assert_eq!(ExamBoard::from_str_loose("CIE"), Some(ExamBoard::Cambridge));
        assert_eq!(ExamBoard::from_str_loose("Pearson"), Some(ExamBoard::Edexcel));
        assert_eq!(
            ExamBoard::from_str_loose("Cambridge / Edexcel"),
            Some(ExamBoard::Both)
        );
        assert_eq!(ExamBoard::from_str_loose("AQA"), None);
    }

    #[test]
    fn test_partial_rules_json_uses_defaults() {
        let rules: ExtractionRules =
            serde_json::from_str(r#"{ "forwardSlashHandling": true, "abbreviations": { "ecf": true } }"#)
                .unwrap();
        assert!(rules.forward_slash_handling);
        assert!(rules.abbreviations.ecf);
        assert!(!rules.abbreviations.ora);
        assert_eq!(rules.exam_board, ExamBoard::Cambridge);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result: Result<ExtractionRules, _> =
            serde_json::from_str(r#"{ "forwardSlashHandlng": true }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_round_trip_camel_case() {
        let json = serde_json::to_value(ExtractionRules::default()).unwrap();
        assert_eq!(json["answerStructure"]["validateMarks"], false);
        assert_eq!(json["examBoard"], "Cambridge");
    }
}
