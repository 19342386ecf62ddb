use markscan_core::error::MarkscanError;
use markscan_core::rules::builtin;
use markscan_core::rules::schema::ExtractionRules;
use std::path::PathBuf;
use tracing::info;

use crate::output;

pub fn run(
    input_file: PathBuf,
    rule_file: Option<PathBuf>,
    preset: Option<String>,
    output_format: &str,
    output_file: Option<PathBuf>,
) -> Result<(), MarkscanError> {
    // Start from the default preset unless told otherwise
    let rules: ExtractionRules = match (&rule_file, &preset) {
        (Some(path), _) => markscan_core::rules::load_rules(path)?,
        (None, Some(name)) => builtin::load_preset(name)?,
        (None, None) => builtin::load_preset("default")?,
    };

    let document = markscan_core::load_document(&input_file)?;
    let inspection = markscan_core::inspect(&document, &rules);
    info!(
        changes = inspection.changes.len(),
        "reconciled extraction rules"
    );

    match output_format {
        "json" => output::json::print(&inspection)?,
        _ => output::table::print_inspection(&inspection),
    }

    if let Some(path) = output_file {
        let json = serde_json::to_string_pretty(&inspection.rules)?;
        std::fs::write(&path, json)?;
        eprintln!("Updated rules written to {}", path.display());
    }

    Ok(())
}
