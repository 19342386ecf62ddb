use markscan_core::error::MarkscanError;
use serde::Serialize;

pub fn print<T: Serialize + ?Sized>(value: &T) -> Result<(), MarkscanError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
