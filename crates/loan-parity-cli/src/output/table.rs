use std::str::FromStr;

use chrono::NaiveDate;
use loan_parity_core::locale::{format_currency_brl, format_date_br};
use rust_decimal::Decimal;
use serde_json::Value;
use tabled::{builder::Builder, Table};

/// Numeric fields that are not currency amounts.
const PLAIN_FIELDS: [&str; 2] = ["monthly_rate_pct", "term_count"];

/// Render a command's output as tables: the plan summary as field/value
/// pairs, installments as rows, both with pt-BR currency/date formatting.
pub fn print_table(value: &Value) {
    if let Some(schedule) = super::schedule_object(value) {
        print_summary(schedule);
        if let Some(Value::Array(installments)) = schedule.get("installments") {
            print_installment_rows(installments);
        }
        print_trailer(value);
        return;
    }
    print_flat_object(value);
}

fn print_summary(schedule: &serde_json::Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in schedule {
        if key == "installments" {
            continue;
        }
        builder.push_record([key.as_str(), &display_value(key, val)]);
    }
    println!("{}", Table::from(builder));
}

fn print_installment_rows(installments: &[Value]) {
    let first = match installments.first() {
        Some(Value::Object(map)) => map,
        _ => return,
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(&headers);

    for item in installments {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|key| {
                    map.get(key)
                        .map(|val| display_value(key, val))
                        .unwrap_or_default()
                })
                .collect();
            builder.push_record(row);
        }
    }

    println!("\n{}", Table::from(builder));
}

fn print_trailer(value: &Value) {
    let root = match value.as_object() {
        Some(map) => map,
        None => return,
    };

    if let Some(Value::Object(totals)) = root.get("totals") {
        let mut builder = Builder::default();
        builder.push_record(["Total", "Value"]);
        for (key, val) in totals {
            builder.push_record([key.as_str(), &display_value(key, val)]);
        }
        println!("\n{}", Table::from(builder));
    }

    if let Some(Value::Array(warnings)) = root.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(methodology)) = root.get("methodology") {
        println!("\nMethodology: {}", methodology);
    }
}

fn print_flat_object(value: &Value) {
    if let Value::Object(map) = value {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in map {
            builder.push_record([key.as_str(), &display_value(key, val)]);
        }
        println!("{}", Table::from(builder));
    } else {
        println!("{}", value);
    }
}

/// Format one cell: dates as dd/mm/aaaa, decimal strings as BRL currency,
/// everything else verbatim.
fn display_value(key: &str, value: &Value) -> String {
    match value {
        Value::String(s) => {
            if key.ends_with("date") {
                return NaiveDate::from_str(s)
                    .map(format_date_br)
                    .unwrap_or_else(|_| s.clone());
            }
            if PLAIN_FIELDS.contains(&key) {
                return s.clone();
            }
            match Decimal::from_str(s) {
                Ok(amount) => format_currency_brl(amount),
                Err(_) => s.clone(),
            }
        }
        Value::Bool(b) => {
            if *b {
                "yes".to_string()
            } else {
                "no".to_string()
            }
        }
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
