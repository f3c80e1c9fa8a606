pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Result fields holding year- or month-level rows, in lookup order.
pub(crate) const BREAKDOWN_KEYS: [&str; 4] = [
    "year_wise_data",
    "year_wise_breakdown",
    "yearly_breakdown",
    "yearly_summary",
];

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// First non-empty breakdown array in a result object.
pub(crate) fn breakdown_rows(result: &serde_json::Map<String, Value>) -> Option<&[Value]> {
    BREAKDOWN_KEYS.iter().find_map(|key| match result.get(*key) {
        Some(Value::Array(rows)) if !rows.is_empty() => Some(rows.as_slice()),
        _ => None,
    })
}

/// Render a scalar JSON value for a text cell.
pub(crate) fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
