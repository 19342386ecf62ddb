pub mod answers;
pub mod error;
pub mod guideline;
pub mod model;
pub mod reconcile;
pub mod rules;
pub mod sanitize;
pub mod validation;

use error::MarkscanError;
use guideline::JsonGuidelineSummary;
use model::PaperDocument;
use reconcile::RuleChange;
use rules::schema::ExtractionRules;
use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use tracing::debug;

pub use guideline::{analyze, analyze_value};
pub use reconcile::reconcile;

/// Analysis and reconciliation of one document against a rule set.
#[derive(Debug, Clone, Serialize)]
pub struct Inspection {
    pub summary: JsonGuidelineSummary,
    pub rules: ExtractionRules,
    pub changes: Vec<RuleChange>,
}

/// Main API entry point: analyze a document and reconcile `rules` with it.
pub fn inspect(document: &PaperDocument, rules: &ExtractionRules) -> Inspection {
    let summary = analyze(document);
    let (rules, changes) = reconcile::reconcile_with_changes(&summary, rules);
    Inspection {
        summary,
        rules,
        changes,
    }
}

/// Load a paper document from a JSON file.
pub fn load_document(path: &Path) -> Result<PaperDocument, MarkscanError> {
    let content = std::fs::read_to_string(path).map_err(|e| MarkscanError::DocumentLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    debug!(path = %path.display(), bytes = content.len(), "loading paper document");
    parse_document_str(&content).map_err(|e| match e {
        MarkscanError::Json(err) => MarkscanError::DocumentLoad {
            path: path.to_path_buf(),
            reason: err.to_string(),
        },
        other => other,
    })
}

/// Parse a paper document from a JSON string. The root must be an object.
pub fn parse_document_str(json: &str) -> Result<PaperDocument, MarkscanError> {
    let value: Value = serde_json::from_str(json)?;
    if !value.is_object() {
        let kind = match value {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        };
        return Err(MarkscanError::DocumentShape(format!("found {kind}")));
    }
    Ok(PaperDocument::from(&value))
}
