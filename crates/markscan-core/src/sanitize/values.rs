use serde_json::Value;

/// View a value as an array, treating anything that is not an array as empty.
pub fn ensure_array(value: Option<&Value>) -> &[Value] {
    match value {
        Some(Value::Array(items)) => items,
        _ => &[],
    }
}

/// Coerce a scalar value to a string.
///
/// - `"text"` -> `"text"`
/// - `2` -> `"2"`, `2.5` -> `"2.5"`
/// - `true` -> `"true"`
/// - null, arrays, objects and missing values -> `""`
pub fn ensure_string(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

/// Like [`ensure_string`], but trimmed and `None` when nothing is left.
pub fn non_empty_string(value: Option<&Value>) -> Option<String> {
    let s = ensure_string(value);
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Read a JSON number. Numeric strings such as `"3"` are not numbers.
pub fn ensure_number(value: Option<&Value>) -> Option<f64> {
    match value {
        Some(Value::Number(n)) => n.as_f64(),
        _ => None,
    }
}

/// True when the key is given with any non-null value, `false` included.
pub fn is_present(value: Option<&Value>) -> bool {
    value.is_some_and(|v| !v.is_null())
}

/// Loose truthiness as documents from the import UI use it:
/// null, `false`, `0`, `""` and missing values are false; arrays and objects are true.
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map(|v| v != 0.0 && !v.is_nan()).unwrap_or(false),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// True when the value is an object with at least one key.
pub fn is_non_empty_object(value: Option<&Value>) -> bool {
    matches!(value, Some(Value::Object(map)) if !map.is_empty())
}

/// True only for a literal JSON `true`.
pub fn is_true(value: Option<&Value>) -> bool {
    matches!(value, Some(Value::Bool(true)))
}
