pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Locate the schedule object inside a command's output: `schedule` for the
/// tracking commands, `result` for the build envelope.
pub(crate) fn schedule_object(value: &Value) -> Option<&serde_json::Map<String, Value>> {
    let root = value.as_object()?;
    let candidate = root.get("schedule").or_else(|| root.get("result"))?;
    let map = candidate.as_object()?;
    if map.contains_key("installments") {
        Some(map)
    } else {
        None
    }
}
