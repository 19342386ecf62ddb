use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Critical => write!(f, "critical"),
            Severity::High => write!(f, "high"),
            Severity::Medium => write!(f, "medium"),
        }
    }
}

/// A problem that blocks import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    /// Field path, e.g. `parts[2].subparts[0].question_text`.
    pub field: String,
    pub message: String,
    pub severity: Severity,
}

/// A non-blocking observation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub(crate) fn error(&mut self, field: String, severity: Severity, message: impl Into<String>) {
        self.errors.push(ValidationError {
            field,
            message: message.into(),
            severity,
        });
    }

    pub(crate) fn warn(
        &mut self,
        field: String,
        message: impl Into<String>,
        suggestion: Option<&str>,
    ) {
        self.warnings.push(ValidationWarning {
            field,
            message: message.into(),
            suggestion: suggestion.map(str::to_string),
        });
    }

    pub(crate) fn finish(mut self) -> Self {
        self.is_valid = self.errors.is_empty();
        self
    }

    /// Errors at or above `severity`.
    pub fn errors_at_least(&self, severity: Severity) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter().filter(move |e| e.severity <= severity)
    }
}

/// Validation outcome for one question of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionReport {
    pub question_id: String,
    #[serde(flatten)]
    pub result: ValidationResult,
}

/// Validation outcome for a whole paper.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchValidationReport {
    pub questions: Vec<QuestionReport>,
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
}

impl BatchValidationReport {
    pub fn all_valid(&self) -> bool {
        self.invalid == 0
    }

    /// Result for a question identifier.
    pub fn get(&self, question_id: &str) -> Option<&ValidationResult> {
        self.questions
            .iter()
            .find(|q| q.question_id == question_id)
            .map(|q| &q.result)
    }
}
