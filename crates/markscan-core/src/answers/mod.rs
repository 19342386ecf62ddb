//! Standalone answer heuristics used by the validators and the CLI.

pub mod complexity;
pub mod format;
pub mod split;

pub use complexity::{analyze_answer_complexity, AnswerComplexity};
pub use format::{derive_answer_requirement, detect_answer_format, requires_figure, AnswerExpectation};
pub use split::{
    extract_all_valid_alternatives, parse_operators, split_forward_slash, AlternativeKind,
    AnswerAlternative, OperatorKind, OperatorParse,
};
