use markscan_core::error::MarkscanError;
use std::path::PathBuf;

use crate::output;

/// Returns whether every question passed.
pub fn run(input_file: PathBuf, output_format: &str) -> Result<bool, MarkscanError> {
    let document = markscan_core::load_document(&input_file)?;
    let report = markscan_core::validation::validate_questions(&document.questions);

    match output_format {
        "json" => output::json::print(&report)?,
        _ => output::table::print_validation(&report),
    }

    Ok(report.all_valid())
}
