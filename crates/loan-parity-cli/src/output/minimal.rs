use serde_json::Value;

/// Print just the key answer value from the output.
///
/// Tracking commands surface the confirmed paid total; the build envelope
/// surfaces the flat installment amount.
pub fn print_minimal(value: &Value) {
    let root = match value.as_object() {
        Some(map) => map,
        None => {
            println!("{}", format_minimal(value));
            return;
        }
    };

    if let Some(Value::Object(totals)) = root.get("totals") {
        if print_first_of(totals, &["paid_total", "difference_total"]) {
            return;
        }
    }

    if let Some(schedule) = super::schedule_object(value) {
        if print_first_of(schedule, &["installment_amount", "total_investment_value"]) {
            return;
        }
    }

    if let Some((key, val)) = root.iter().next() {
        println!("{}: {}", key, format_minimal(val));
        return;
    }

    println!("{}", format_minimal(value));
}

fn print_first_of(map: &serde_json::Map<String, Value>, keys: &[&str]) -> bool {
    for key in keys {
        if let Some(val) = map.get(*key) {
            if !val.is_null() {
                println!("{}", format_minimal(val));
                return true;
            }
        }
    }
    false
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
