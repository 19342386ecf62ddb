use markscan_core::error::MarkscanError;
use std::path::PathBuf;

use crate::output;

pub fn run(input_file: PathBuf, output_format: &str) -> Result<(), MarkscanError> {
    let document = markscan_core::load_document(&input_file)?;
    let summary = markscan_core::analyze(&document);

    match output_format {
        "json" => output::json::print(&summary)?,
        _ => output::table::print_summary(&summary),
    }

    Ok(())
}
