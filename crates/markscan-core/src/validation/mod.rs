pub mod batch;
pub mod outcome;
pub mod question;

pub use batch::validate_questions;
pub use outcome::{
    BatchValidationReport, QuestionReport, Severity, ValidationError, ValidationResult,
    ValidationWarning,
};
pub use question::{validate_answer, validate_question};
