use crate::error::MarkscanError;
use crate::rules::schema::ExtractionRules;

const DEFAULT_JSON: &str = include_str!("../../../../rules/default.json");
const CAMBRIDGE_JSON: &str = include_str!("../../../../rules/cambridge.json");
const EDEXCEL_JSON: &str = include_str!("../../../../rules/edexcel.json");

/// Available predefined rule sets.
pub const PRESETS: &[&str] = &["default", "cambridge", "edexcel"];

/// One-line description of a preset, for listings.
pub fn describe_preset(name: &str) -> Option<&'static str> {
    match name {
        "default" => Some("Everything off; let the analyzer turn on what the paper needs"),
        "cambridge" => Some("Cambridge mark-scheme conventions (ORA, OWTTE, ECF, slash alternatives)"),
        "edexcel" => Some("Edexcel mark-scheme conventions (line-by-line marking points, criteria)"),
        _ => None,
    }
}

/// Load a predefined rule set by name.
pub fn load_preset(name: &str) -> Result<ExtractionRules, MarkscanError> {
    let json = match name {
        "default" => DEFAULT_JSON,
        "cambridge" => CAMBRIDGE_JSON,
        "edexcel" => EDEXCEL_JSON,
        _ => {
            return Err(MarkscanError::UnknownPreset(format!(
                "{}. Available: {}",
                name,
                PRESETS.join(", ")
            )))
        }
    };
    tracing::debug!(preset = name, "loading built-in extraction rules");
    let rules: ExtractionRules = serde_json::from_str(json)?;
    Ok(rules)
}
